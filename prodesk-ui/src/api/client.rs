//! HTTP API Client
//!
//! Functions for communicating with the Prodesk REST API.

use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use prodesk::types::{
    AnalyticsSummary, ChatReply, ChatRequest, Client, Lead, LeadCapture, NewClient,
};

/// Default API base URL
pub const DEFAULT_API_BASE: &str = "http://localhost:8000";

const API_BASE_KEY: &str = "prodesk_api_url";

/// Get the API base URL from local storage or use default
pub fn get_api_base() -> String {
    let url = web_sys::window()
        .and_then(|window| window.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(API_BASE_KEY).ok().flatten())
        .filter(|url| !url.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_API_BASE.to_string());
    // Normalize: remove trailing slash
    url.trim_end_matches('/').to_string()
}

/// Set the API base URL in local storage
pub fn set_api_base(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(Some(storage)) = window.local_storage() {
            let _ = storage.set_item(API_BASE_KEY, url);
        }
    }
}

/// FastAPI error body
#[derive(Debug, Deserialize)]
struct ApiError {
    detail: serde_json::Value,
}

async fn read<T: DeserializeOwned>(response: Response) -> Result<T, String> {
    if !response.ok() {
        let status = response.status();
        let message = match response.json::<ApiError>().await {
            Ok(ApiError {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ApiError { detail }) => detail.to_string(),
            Err(_) => response.status_text(),
        };
        return Err(format!("{} ({})", message, status));
    }

    response
        .json()
        .await
        .map_err(|e| format!("Parse error: {}", e))
}

fn network(e: gloo_net::Error) -> String {
    format!("Network error: {}", e)
}

// ============ Tenants ============

/// List all clients
pub async fn fetch_clients() -> Result<Vec<Client>, String> {
    let response = Request::get(&format!("{}/api/clients", get_api_base()))
        .send()
        .await
        .map_err(network)?;

    read(response).await
}

/// Create a client
pub async fn create_client(new_client: &NewClient) -> Result<Client, String> {
    let response = Request::post(&format!("{}/api/clients", get_api_base()))
        .json(new_client)
        .map_err(|e| format!("Serialize error: {}", e))?
        .send()
        .await
        .map_err(network)?;

    read(response).await
}

// ============ Analytics ============

/// Pre-aggregated stats for one tenant
pub async fn fetch_analytics(api_key: &str) -> Result<AnalyticsSummary, String> {
    let response = Request::get(&format!("{}/api/analytics", get_api_base()))
        .header("X-API-Key", api_key)
        .send()
        .await
        .map_err(network)?;

    read(response).await
}

/// Captured leads for one tenant
pub async fn fetch_leads(api_key: &str) -> Result<Vec<Lead>, String> {
    let response = Request::get(&format!("{}/api/analytics/leads", get_api_base()))
        .header("X-API-Key", api_key)
        .send()
        .await
        .map_err(network)?;

    read(response).await
}

// ============ Widget ============

/// Send a visitor message
pub async fn send_chat(request: &ChatRequest) -> Result<ChatReply, String> {
    let response = Request::post(&format!("{}/api/chat", get_api_base()))
        .json(request)
        .map_err(|e| format!("Serialize error: {}", e))?
        .send()
        .await
        .map_err(network)?;

    read(response).await
}

/// Submit lead contact details
pub async fn capture_lead(capture: &LeadCapture) -> Result<Lead, String> {
    let response = Request::post(&format!("{}/api/leads", get_api_base()))
        .json(capture)
        .map_err(|e| format!("Serialize error: {}", e))?
        .send()
        .await
        .map_err(network)?;

    read(response).await
}
