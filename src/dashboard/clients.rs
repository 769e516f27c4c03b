//! Client Management
//!
//! Listing and creating tenants, and copying their API keys.

use crate::types::Client;

/// Characters of an API key shown before the ellipsis
pub const API_KEY_PREVIEW_LEN: usize = 20;

/// Truncated API key for display. The full key is what gets copied.
pub fn display_api_key(api_key: &str) -> String {
    let preview: String = api_key.chars().take(API_KEY_PREVIEW_LEN).collect();
    format!("{}...", preview)
}

pub fn status_label(client: &Client) -> &'static str {
    if client.is_active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Headline counts for the overview page
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClientOverview {
    pub total: usize,
    pub active: usize,
}

impl ClientOverview {
    pub fn from_clients(clients: &[Client]) -> Self {
        Self {
            total: clients.len(),
            active: clients.iter().filter(|c| c.is_active).count(),
        }
    }

    pub fn inactive(&self) -> usize {
        self.total - self.active
    }
}

#[cfg(feature = "native")]
pub use manager::ClientManager;

#[cfg(feature = "native")]
mod manager {
    use super::ClientOverview;
    use crate::dashboard::clipboard::Clipboard;
    use crate::dashboard::{ManagementApi, ManagerError};
    use crate::types::Client;
    use crate::validation::ClientForm;

    /// Client list plus the create and copy-key actions
    pub struct ClientManager<A> {
        api: A,
        clients: Vec<Client>,
    }

    impl<A: ManagementApi> ClientManager<A> {
        pub fn new(api: A) -> Self {
            Self {
                api,
                clients: Vec::new(),
            }
        }

        /// Replace the list with the backend's
        pub async fn load(&mut self) -> Result<&[Client], ManagerError> {
            self.clients = self.api.list_clients().await?;
            tracing::debug!(count = self.clients.len(), "Loaded clients");
            Ok(&self.clients)
        }

        /// Validate, create, then reload the full list
        pub async fn create(&mut self, form: &ClientForm) -> Result<Client, ManagerError> {
            let new_client = form.validate()?;

            let created = self.api.create_client(&new_client).await.map_err(|e| {
                tracing::error!(error = %e, "Error creating client");
                e
            })?;
            tracing::info!(client_id = %created.id, name = %created.name, "Client created");

            self.load().await?;
            Ok(created)
        }

        /// Copy the full, untruncated key
        pub fn copy_api_key<C: Clipboard + ?Sized>(
            &self,
            client: &Client,
            clipboard: &mut C,
        ) -> Result<(), ManagerError> {
            clipboard.write_text(&client.api_key)?;
            Ok(())
        }

        pub fn clients(&self) -> &[Client] {
            &self.clients
        }

        pub fn find(&self, client_id: &str) -> Option<&Client> {
            self.clients.iter().find(|c| c.id == client_id)
        }

        pub fn overview(&self) -> ClientOverview {
            ClientOverview::from_clients(&self.clients)
        }

        pub fn api(&self) -> &A {
            &self.api
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: &str, active: bool) -> Client {
        Client {
            id: id.to_string(),
            name: format!("Tenant {}", id),
            email: format!("{}@example.com", id),
            api_key: format!("pk_{}_abcdefghijklmnopqrstuvwxyz0123456789", id),
            website_url: None,
            theme: None,
            is_active: active,
            created_at: None,
        }
    }

    #[test]
    fn test_display_api_key_truncates() {
        let key = "pk_abcdefghijklmnopqrstuvwxyz";
        assert_eq!(display_api_key(key), "pk_abcdefghijklmnopq...");
        assert_eq!(display_api_key("pk_short"), "pk_short...");
    }

    #[test]
    fn test_overview_counts() {
        let clients = vec![client("a", true), client("b", false), client("c", true)];
        let overview = ClientOverview::from_clients(&clients);
        assert_eq!(overview.total, 3);
        assert_eq!(overview.active, 2);
        assert_eq!(overview.inactive(), 1);
        assert_eq!(status_label(&clients[1]), "Inactive");
    }

    #[cfg(feature = "native")]
    mod manager {
        use super::client;
        use crate::client::ClientError;
        use crate::dashboard::clipboard::RecordingClipboard;
        use crate::dashboard::{display_api_key, ClientManager, ManagementApi, ManagerError};
        use crate::types::{AnalyticsSummary, Client, Lead, NewClient};
        use crate::validation::ClientForm;
        use async_trait::async_trait;
        use std::sync::Mutex;

        #[derive(Default)]
        struct RecordingApi {
            calls: Mutex<Vec<String>>,
            clients: Mutex<Vec<Client>>,
            reject_create: bool,
        }

        impl RecordingApi {
            fn calls(&self) -> Vec<String> {
                self.calls.lock().unwrap().clone()
            }
        }

        #[async_trait]
        impl ManagementApi for RecordingApi {
            async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
                self.calls.lock().unwrap().push("list".to_string());
                Ok(self.clients.lock().unwrap().clone())
            }

            async fn create_client(&self, new_client: &NewClient) -> Result<Client, ClientError> {
                self.calls.lock().unwrap().push("create".to_string());
                if self.reject_create {
                    return Err(ClientError::Api {
                        status: 400,
                        message: "Client with this email already exists".to_string(),
                    });
                }
                let mut created = client("new", true);
                created.name = new_client.name.clone();
                created.email = new_client.email.clone();
                self.clients.lock().unwrap().push(created.clone());
                Ok(created)
            }

            async fn get_client(&self, client_id: &str) -> Result<Client, ClientError> {
                Ok(client(client_id, true))
            }

            async fn analytics(&self, _api_key: &str) -> Result<AnalyticsSummary, ClientError> {
                Err(ClientError::Unavailable)
            }

            async fn leads(&self, _api_key: &str) -> Result<Vec<Lead>, ClientError> {
                Ok(Vec::new())
            }
        }

        fn acme() -> ClientForm {
            ClientForm {
                name: "Acme".to_string(),
                email: "ops@acme.io".to_string(),
                website_url: "https://acme.io".to_string(),
            }
        }

        #[tokio::test]
        async fn test_create_then_reload_once() {
            let mut manager = ClientManager::new(RecordingApi::default());

            let created = manager.create(&acme()).await.unwrap();
            assert_eq!(created.name, "Acme");
            assert_eq!(manager.api().calls(), vec!["create", "list"]);
            assert_eq!(manager.clients().len(), 1);
            assert_eq!(manager.overview().active, 1);
        }

        #[tokio::test]
        async fn test_invalid_form_makes_no_calls() {
            let mut manager = ClientManager::new(RecordingApi::default());
            let form = ClientForm {
                name: "Acme".to_string(),
                email: "nope".to_string(),
                ..Default::default()
            };

            let err = manager.create(&form).await.unwrap_err();
            assert!(matches!(err, ManagerError::Validation(_)));
            assert!(manager.api().calls().is_empty());
        }

        #[tokio::test]
        async fn test_rejected_create_skips_reload() {
            let mut manager = ClientManager::new(RecordingApi {
                reject_create: true,
                ..Default::default()
            });

            let err = manager.create(&acme()).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                "API error 400: Client with this email already exists"
            );
            assert_eq!(manager.api().calls(), vec!["create"]);
        }

        #[tokio::test]
        async fn test_copy_writes_full_key() {
            let api = RecordingApi::default();
            api.clients.lock().unwrap().push(client("a", true));
            let mut manager = ClientManager::new(api);
            manager.load().await.unwrap();

            let tenant = manager.find("a").unwrap().clone();
            let mut clipboard = RecordingClipboard::default();
            manager.copy_api_key(&tenant, &mut clipboard).unwrap();

            assert_eq!(clipboard.contents, vec![tenant.api_key.clone()]);
            assert_ne!(display_api_key(&tenant.api_key), tenant.api_key);
        }
    }
}
