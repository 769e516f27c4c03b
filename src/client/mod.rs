//! Prodesk REST API Client
//!
//! HTTP client for the Prodesk backend: tenant management, analytics, chat
//! and lead capture. Implements both [`ChatBackend`] (for the widget) and
//! [`ManagementApi`] (for the dashboard).

mod error;

pub use error::ClientError;

use async_trait::async_trait;
use reqwest::{Client as HttpClient, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

use crate::dashboard::ManagementApi;
use crate::types::{
    AnalyticsSummary, ChatReply, ChatRequest, Client, ConversationRecord, Lead, LeadCapture,
    NewClient,
};
use crate::widget::{ChatBackend, Theme};

/// Header carrying a tenant's API key on analytics calls
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Configuration for [`ProdeskClient`]
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend (e.g., "http://localhost:8000")
    pub base_url: String,
    /// Request timeout in milliseconds
    pub request_timeout_ms: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

impl From<&crate::config::ApiConfig> for ClientConfig {
    fn from(api: &crate::config::ApiConfig) -> Self {
        Self {
            base_url: api.base_url.clone(),
            request_timeout_ms: api.request_timeout_secs.saturating_mul(1000),
        }
    }
}

/// `{"message": "..."}` acknowledgement of PATCH/DELETE calls
#[derive(Debug, Deserialize)]
struct Acknowledgement {
    #[serde(default)]
    message: String,
}

/// Prodesk REST API client
#[derive(Debug, Clone)]
pub struct ProdeskClient {
    http: HttpClient,
    config: ClientConfig,
}

impl ProdeskClient {
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let http = HttpClient::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    // ---- tenants ----

    /// `GET /api/clients`
    pub async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        self.send(self.http.get(self.url("/api/clients"))).await
    }

    /// `POST /api/clients`
    pub async fn create_client(&self, new_client: &NewClient) -> Result<Client, ClientError> {
        self.send(self.http.post(self.url("/api/clients")).json(new_client))
            .await
    }

    /// `GET /api/clients/{id}`
    pub async fn get_client(&self, client_id: &str) -> Result<Client, ClientError> {
        let path = format!("/api/clients/{}", urlencoding::encode(client_id));
        self.send(self.http.get(self.url(&path))).await
    }

    /// `PATCH /api/clients/{id}/theme`, returning the backend's confirmation
    pub async fn update_client_theme(
        &self,
        client_id: &str,
        theme: &Theme,
    ) -> Result<String, ClientError> {
        let path = format!("/api/clients/{}/theme", urlencoding::encode(client_id));
        let ack: Acknowledgement = self.send(self.http.patch(self.url(&path)).json(theme)).await?;
        Ok(ack.message)
    }

    /// `DELETE /api/clients/{id}`: marks the tenant inactive
    pub async fn deactivate_client(&self, client_id: &str) -> Result<String, ClientError> {
        let path = format!("/api/clients/{}", urlencoding::encode(client_id));
        let ack: Acknowledgement = self.send(self.http.delete(self.url(&path))).await?;
        Ok(ack.message)
    }

    // ---- analytics ----

    /// `GET /api/analytics` for the tenant owning `api_key`
    pub async fn analytics(&self, api_key: &str) -> Result<AnalyticsSummary, ClientError> {
        self.send(
            self.http
                .get(self.url("/api/analytics"))
                .header(API_KEY_HEADER, api_key),
        )
        .await
    }

    /// `GET /api/analytics/leads` for the tenant owning `api_key`
    pub async fn leads(&self, api_key: &str) -> Result<Vec<Lead>, ClientError> {
        self.send(
            self.http
                .get(self.url("/api/analytics/leads"))
                .header(API_KEY_HEADER, api_key),
        )
        .await
    }

    // ---- widget ----

    /// `POST /api/chat`
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.send(self.http.post(self.url("/api/chat")).json(request))
            .await
    }

    /// `POST /api/leads`
    pub async fn capture_lead(&self, capture: &LeadCapture) -> Result<Lead, ClientError> {
        self.send(self.http.post(self.url("/api/leads")).json(capture))
            .await
    }

    /// `GET /api/conversations/{session_id}?api_key=`
    pub async fn conversation(
        &self,
        session_id: &str,
        api_key: &str,
    ) -> Result<ConversationRecord, ClientError> {
        let path = format!("/api/conversations/{}", urlencoding::encode(session_id));
        self.send(
            self.http
                .get(self.url(&path))
                .query(&[("api_key", api_key)]),
        )
        .await
    }

    /// Send a request and decode a JSON body, mapping non-2xx responses to
    /// [`ClientError::Api`]
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await.map_err(ClientError::from_transport)?;
        tracing::debug!(url = %response.url(), status = %response.status(), "Backend response");
        Self::decode(response).await
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        let body = response.text().await.map_err(ClientError::from_transport)?;

        if !status.is_success() {
            return Err(ClientError::from_response(status.as_u16(), &body));
        }

        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }
}

#[async_trait]
impl ChatBackend for ProdeskClient {
    async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, ClientError> {
        self.chat(request).await
    }

    async fn capture_lead(&self, capture: &LeadCapture) -> Result<Lead, ClientError> {
        ProdeskClient::capture_lead(self, capture).await
    }
}

#[async_trait]
impl ManagementApi for ProdeskClient {
    async fn list_clients(&self) -> Result<Vec<Client>, ClientError> {
        ProdeskClient::list_clients(self).await
    }

    async fn create_client(&self, new_client: &NewClient) -> Result<Client, ClientError> {
        ProdeskClient::create_client(self, new_client).await
    }

    async fn get_client(&self, client_id: &str) -> Result<Client, ClientError> {
        ProdeskClient::get_client(self, client_id).await
    }

    async fn analytics(&self, api_key: &str) -> Result<AnalyticsSummary, ClientError> {
        ProdeskClient::analytics(self, api_key).await
    }

    async fn leads(&self, api_key: &str) -> Result<Vec<Lead>, ClientError> {
        ProdeskClient::leads(self, api_key).await
    }
}
