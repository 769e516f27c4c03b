//! REST client against an in-process mock of the Prodesk backend.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use prodesk::client::{ClientConfig, ClientError, ProdeskClient};
use prodesk::types::{ChatRequest, LeadCapture, NewClient};
use prodesk::widget::{InitConfig, LeadOutcome, MemoryStore, Theme, WidgetHandle};
use prodesk::dashboard::search_leads;
use prodesk::{AnalyticsView, ClientForm, ClientManager, LeadForm};

const API_KEY: &str = "pk_test_0123456789abcdefghijklmnopqrstuvwxyz";

#[derive(Default)]
struct Backend {
    calls: Mutex<Vec<String>>,
    clients: Mutex<Vec<Value>>,
    themes: Mutex<Vec<Value>>,
}

type Shared = Arc<Backend>;

impl Backend {
    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

type ApiResult = Result<(StatusCode, Json<Value>), (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

fn check_key(headers: &HeaderMap) -> Result<(), (StatusCode, Json<Value>)> {
    match headers.get("X-API-Key").and_then(|v| v.to_str().ok()) {
        Some(API_KEY) => Ok(()),
        _ => Err(detail(StatusCode::UNAUTHORIZED, "Invalid API key")),
    }
}

async fn list_clients(State(backend): State<Shared>) -> Json<Value> {
    backend.record("GET /api/clients");
    Json(Value::Array(backend.clients.lock().unwrap().clone()))
}

async fn create_client(State(backend): State<Shared>, Json(body): Json<Value>) -> ApiResult {
    backend.record("POST /api/clients");

    let mut clients = backend.clients.lock().unwrap();
    if clients.iter().any(|c| c["email"] == body["email"]) {
        return Err(detail(
            StatusCode::BAD_REQUEST,
            "Client with this email already exists",
        ));
    }

    let client = json!({
        "_id": format!("65f0{:04}", clients.len()),
        "name": body["name"],
        "email": body["email"],
        "api_key": API_KEY,
        "website_url": body.get("website_url").cloned().unwrap_or(Value::Null),
        "theme": {"primary_color": "#667eea", "position": "bottom-right",
                  "welcome_message": "Hello! How can I help you today?"},
        "is_active": true,
        "created_at": "2024-05-01T10:15:00.123000",
    });
    clients.push(client.clone());
    Ok((StatusCode::CREATED, Json(client)))
}

async fn get_client(State(backend): State<Shared>, Path(id): Path<String>) -> ApiResult {
    backend.record(format!("GET /api/clients/{}", id));

    backend
        .clients
        .lock()
        .unwrap()
        .iter()
        .find(|c| c["_id"] == id.as_str())
        .cloned()
        .map(|c| (StatusCode::OK, Json(c)))
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Client not found"))
}

async fn update_theme(
    State(backend): State<Shared>,
    Path(id): Path<String>,
    Json(theme): Json<Value>,
) -> Json<Value> {
    backend.record(format!("PATCH /api/clients/{}/theme", id));
    backend.themes.lock().unwrap().push(theme);
    Json(json!({"message": "Theme updated successfully"}))
}

async fn deactivate(State(backend): State<Shared>, Path(id): Path<String>) -> Json<Value> {
    backend.record(format!("DELETE /api/clients/{}", id));
    Json(json!({"message": "Client deactivated successfully"}))
}

async fn analytics(headers: HeaderMap) -> ApiResult {
    check_key(&headers)?;
    Ok((
        StatusCode::OK,
        Json(json!({
            "total_chats": 42,
            "leads_collected": 7,
            "avg_response_time": 1.25,
            "top_queries": ["pricing", "opening hours"],
            "chats_today": 3,
            "leads_today": 1,
        })),
    ))
}

async fn leads(headers: HeaderMap) -> ApiResult {
    check_key(&headers)?;
    Ok((
        StatusCode::OK,
        Json(json!([
            {"_id": "l1", "client_id": "65f00000", "session_id": "session_1",
             "name": "Ann Lee", "email": "ann@alpha.io", "phone": "555-0100",
             "message": "Call me", "created_at": "2024-03-07T15:30:00"},
            {"_id": "l2", "client_id": "65f00000", "session_id": "session_2",
             "name": "Bob Stone", "email": "bob@beta.io", "phone": null,
             "message": null, "created_at": "2024-03-08T09:00:00"},
        ])),
    ))
}

async fn chat(State(backend): State<Shared>, Json(request): Json<ChatRequest>) -> ApiResult {
    backend.record(format!("POST /api/chat {}", request.message));
    if request.api_key != API_KEY {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid API key"));
    }
    Ok((
        StatusCode::OK,
        Json(json!({
            "answer": format!("You said: {}", request.message),
            "sources": [],
            "session_id": request.session_id,
        })),
    ))
}

async fn capture_lead(State(backend): State<Shared>, Json(capture): Json<Value>) -> ApiResult {
    backend.record("POST /api/leads");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "_id": "lead_1",
            "client_id": "65f00000",
            "session_id": capture["session_id"],
            "name": capture["name"],
            "email": capture["email"],
            "phone": capture.get("phone").cloned().unwrap_or(Value::Null),
            "message": capture.get("message").cloned().unwrap_or(Value::Null),
            "created_at": "2024-03-07T15:30:00.000000",
        })),
    ))
}

async fn conversation(
    Path(session_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return Err(detail(StatusCode::UNAUTHORIZED, "Invalid API key"));
    }
    Ok((
        StatusCode::OK,
        Json(json!({
            "_id": "c1",
            "client_id": "65f00000",
            "session_id": session_id,
            "messages": [
                {"role": "user", "content": "Hi", "timestamp": "2024-03-07T15:30:00"},
                {"role": "assistant", "content": "Hello!", "timestamp": "2024-03-07T15:30:01"},
            ],
            "lead_captured": {"name": "Ann", "email": "ann@alpha.io", "phone": null},
            "created_at": "2024-03-07T15:30:00",
            "updated_at": "2024-03-07T15:30:01",
        })),
    ))
}

async fn spawn_backend() -> (ProdeskClient, Shared) {
    let backend: Shared = Arc::new(Backend::default());

    let app = Router::new()
        .route("/api/clients", get(list_clients).post(create_client))
        .route("/api/clients/:id", get(get_client).delete(deactivate))
        .route("/api/clients/:id/theme", patch(update_theme))
        .route("/api/analytics", get(analytics))
        .route("/api/analytics/leads", get(leads))
        .route("/api/chat", post(chat))
        .route("/api/leads", post(capture_lead))
        .route("/api/conversations/:session_id", get(conversation))
        .with_state(Arc::clone(&backend));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client = ProdeskClient::new(ClientConfig {
        base_url: format!("http://{}", addr),
        request_timeout_ms: 5_000,
    })
    .unwrap();

    (client, backend)
}

#[tokio::test]
async fn create_then_reload() {
    let (client, backend) = spawn_backend().await;
    let mut manager = ClientManager::new(client);

    let form = ClientForm {
        name: "Acme".to_string(),
        email: "ops@acme.io".to_string(),
        website_url: "https://acme.io".to_string(),
    };
    let created = manager.create(&form).await.unwrap();

    assert_eq!(created.id, "65f00000");
    assert_eq!(created.website_url.as_deref(), Some("https://acme.io"));
    assert_eq!(manager.clients().len(), 1);
    assert_eq!(backend.calls(), vec!["POST /api/clients", "GET /api/clients"]);
}

#[tokio::test]
async fn api_errors_carry_detail() {
    let (client, _backend) = spawn_backend().await;
    let new_client = NewClient {
        name: "Acme".to_string(),
        email: "ops@acme.io".to_string(),
        website_url: None,
    };

    client.create_client(&new_client).await.unwrap();
    let err = client.create_client(&new_client).await.unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "Client with this email already exists");
        }
        other => panic!("unexpected error: {other}"),
    }

    let missing = client.get_client("nope").await.unwrap_err();
    assert_eq!(missing.status(), Some(404));
}

#[tokio::test]
async fn analytics_sends_api_key_header() {
    let (client, _backend) = spawn_backend().await;

    let summary = client.analytics(API_KEY).await.unwrap();
    assert_eq!(summary.total_chats, 42);
    assert_eq!(summary.top_queries, vec!["pricing", "opening hours"]);

    let err = client.analytics("pk_wrong").await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let leads = client.leads(API_KEY).await.unwrap();
    assert_eq!(leads.len(), 2);
    assert!(leads[1].phone.is_none());
}

#[tokio::test]
async fn analytics_view_survives_bad_key() {
    let (client, _backend) = spawn_backend().await;

    let view = AnalyticsView::load(&client, "pk_wrong").await;
    assert!(view.summary.is_none());
    assert!(view.leads.is_empty());

    let view = AnalyticsView::load(&client, API_KEY).await;
    assert!(view.summary.is_some());
    assert_eq!(view.search("STONE").len(), 1);
}

#[tokio::test]
async fn lead_search_reports_bad_key() {
    let (client, _backend) = spawn_backend().await;

    let err = search_leads(&client, "pk_wrong", "").await.unwrap_err();
    assert_eq!(err.status(), Some(401));

    let leads = search_leads(&client, API_KEY, "stone").await.unwrap();
    assert_eq!(leads.len(), 1);
}

#[tokio::test]
async fn theme_and_deactivate() {
    let (client, backend) = spawn_backend().await;

    let theme = Theme {
        primary_color: "#112233".to_string(),
        ..Theme::default()
    };
    let message = client.update_client_theme("65f00000", &theme).await.unwrap();
    assert_eq!(message, "Theme updated successfully");
    assert_eq!(backend.themes.lock().unwrap()[0]["primary_color"], "#112233");

    let message = client.deactivate_client("65f00000").await.unwrap();
    assert_eq!(message, "Client deactivated successfully");
}

#[tokio::test]
async fn conversation_lookup() {
    let (client, _backend) = spawn_backend().await;

    let record = client.conversation("session_9", API_KEY).await.unwrap();
    assert_eq!(record.session_id, "session_9");
    assert_eq!(record.messages.len(), 2);
    assert!(record.messages[0].is_user());
    assert_eq!(record.lead_captured.unwrap().name, "Ann");
}

#[tokio::test]
async fn widget_against_backend() {
    let (client, backend) = spawn_backend().await;

    let mut widget =
        WidgetHandle::init(InitConfig::new(API_KEY), client.clone(), MemoryStore::new()).unwrap();
    widget.open();

    let mut prompt_delay = None;
    for text in ["Hi", "Pricing?", "Thanks"] {
        let report = widget.send(text).await.unwrap();
        assert_eq!(report.reply.content, format!("You said: {}", text));
        prompt_delay = report.lead_prompt_in;
    }
    assert!(prompt_delay.is_some());
    assert!(widget.show_lead_prompt());

    let form = LeadForm {
        name: "Ann".to_string(),
        email: "ann@alpha.io".to_string(),
        ..Default::default()
    };
    assert_eq!(widget.submit_lead(&form).await.unwrap(), LeadOutcome::Captured);
    assert!(backend.calls().contains(&"POST /api/leads".to_string()));

    let capture = LeadCapture {
        api_key: API_KEY.to_string(),
        session_id: widget.conversation().session().to_string(),
        name: "Bob".to_string(),
        email: "bob@beta.io".to_string(),
        phone: Some("555".to_string()),
        message: None,
    };
    let lead = client.capture_lead(&capture).await.unwrap();
    assert_eq!(lead.phone.as_deref(), Some("555"));
    assert!(lead.message.is_none());
}

#[tokio::test]
async fn chat_failure_falls_back() {
    let (client, _backend) = spawn_backend().await;

    let mut widget =
        WidgetHandle::init(InitConfig::new("pk_unknown"), client, MemoryStore::new()).unwrap();
    widget.open();

    let report = widget.send("Hello?").await.unwrap();
    assert_eq!(report.reply.content, prodesk::widget::CHAT_ERROR_MESSAGE);
}
