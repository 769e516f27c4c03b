//! Domain Types
//!
//! DTOs mirrored from the Prodesk backend API. Nothing here enforces
//! invariants beyond what the forms in [`crate::validation`] check; the
//! backend owns the lifecycle of every entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::widget::theme::Theme;

// ============================================
// Tenants
// ============================================

/// A tenant of the platform, identified by its generated API key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    /// Backend identifier (emitted as `_id`)
    #[serde(alias = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    /// Generated key, `pk_...`
    pub api_key: String,
    #[serde(default)]
    pub website_url: Option<String>,
    /// Widget theme stored server-side
    #[serde(default)]
    pub theme: Option<Theme>,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
}

fn default_active() -> bool {
    true
}

/// Body of `POST /api/clients`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website_url: Option<String>,
}

// ============================================
// Leads
// ============================================

/// A prospective contact captured through the widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(default)]
    pub client_id: Option<String>,
    #[serde(default)]
    pub session_id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /api/leads`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadCapture {
    pub api_key: String,
    pub session_id: String,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================
// Chat
// ============================================

/// Author of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry of a conversation transcript
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Short clock time shown under each bubble, e.g. `09:41`
    pub fn clock_time(&self) -> String {
        self.timestamp.format("%H:%M").to_string()
    }
}

/// Body of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub api_key: String,
    pub message: String,
    pub session_id: String,
}

/// Response of `POST /api/chat`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    #[serde(default)]
    pub sources: Vec<String>,
    #[serde(default)]
    pub session_id: Option<String>,
}

/// Stored conversation, as returned by `GET /api/conversations/{session_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub client_id: String,
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    #[serde(default)]
    pub lead_captured: Option<CapturedContact>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "timestamp::deserialize_option")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Contact details attached to a conversation once a lead is captured
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedContact {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

// ============================================
// Analytics
// ============================================

/// Pre-aggregated stats from `GET /api/analytics`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    pub total_chats: u64,
    pub leads_collected: u64,
    /// Seconds
    pub avg_response_time: f64,
    #[serde(default)]
    pub top_queries: Vec<String>,
    pub chats_today: u64,
    pub leads_today: u64,
}

/// Timestamp decoding for backend payloads.
///
/// The backend writes naive UTC datetimes (`2024-05-01T10:15:00.123000`);
/// RFC 3339 strings are accepted as well.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer};

    const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

    /// Parse an RFC 3339 or naive ISO-8601 timestamp, assuming UTC for the latter
    pub fn parse(s: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Some(dt.with_timezone(&Utc));
        }

        NAIVE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| naive.and_utc())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn deserialize_option<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {}", raw))),
            None => Ok(None),
        }
    }
}
