//! Admin Dashboard
//!
//! Tenant management and per-tenant analytics. The helpers here (API-key
//! display, overview counts, lead search, CSV export) are pure and shared
//! by the browser dashboard and `prodesk-cli`. With the `native` feature the
//! orchestration types ([`ClientManager`], [`AnalyticsView`]) run them
//! against a [`ManagementApi`].

pub mod analytics;
pub mod clients;
pub mod clipboard;
pub mod export;

pub use analytics::{filter_leads, format_lead_date, format_lead_date_in, ranked_queries};
pub use clients::{display_api_key, status_label, ClientOverview};
pub use clipboard::{Clipboard, ClipboardError};
pub use export::{export_filename, leads_to_csv, leads_to_csv_in};

#[cfg(feature = "native")]
pub use analytics::{search_leads, AnalyticsView};
#[cfg(feature = "native")]
pub use clients::ClientManager;
#[cfg(feature = "native")]
pub use clipboard::SystemClipboard;
#[cfg(feature = "native")]
pub use native::{ManagementApi, ManagerError};

#[cfg(feature = "native")]
mod native {
    use async_trait::async_trait;
    use thiserror::Error;

    use super::clipboard::ClipboardError;
    use crate::client::ClientError;
    use crate::types::{AnalyticsSummary, Client, Lead, NewClient};
    use crate::validation::FormErrors;

    /// Management endpoints used by the dashboard
    #[async_trait]
    pub trait ManagementApi: Send + Sync {
        async fn list_clients(&self) -> Result<Vec<Client>, ClientError>;

        async fn create_client(&self, new_client: &NewClient) -> Result<Client, ClientError>;

        async fn get_client(&self, client_id: &str) -> Result<Client, ClientError>;

        async fn analytics(&self, api_key: &str) -> Result<AnalyticsSummary, ClientError>;

        async fn leads(&self, api_key: &str) -> Result<Vec<Lead>, ClientError>;
    }

    /// Errors surfaced by dashboard operations
    #[derive(Error, Debug)]
    pub enum ManagerError {
        #[error("{0}")]
        Validation(#[from] FormErrors),

        #[error(transparent)]
        Api(#[from] ClientError),

        #[error("Failed to copy: {0}")]
        Clipboard(#[from] ClipboardError),
    }
}
