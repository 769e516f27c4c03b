//! # Prodesk
//!
//! Client side of the Prodesk multi-tenant chatbot platform: an embeddable
//! chat widget that answers visitors and collects leads, and an admin
//! dashboard for managing tenants and reading their analytics.
//!
//! ## Modules
//!
//! - [`types`]: DTOs shared with the backend API
//! - [`validation`]: lead and client form checks
//! - [`widget`]: theme, session, lead-flag store and the conversation state machine
//! - [`dashboard`]: API-key display, lead search, CSV export, client management
//! - [`client`]: typed REST client (`native`)
//! - [`config`] / [`logging`]: TOML + env configuration and tracing setup (`native`)
//!
//! The core modules have no IO and build for `wasm32-unknown-unknown`; the
//! browser UI (`prodesk-ui`) depends on this crate with default features off.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prodesk::client::{ClientConfig, ProdeskClient};
//! use prodesk::widget::{FileStore, InitConfig, WidgetHandle};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let backend = ProdeskClient::new(ClientConfig::default())?;
//!     let store = FileStore::open("widget_store.json")?;
//!
//!     let mut widget = WidgetHandle::init(InitConfig::new("pk_live_..."), backend, store)?;
//!     widget.open();
//!
//!     if let Some(report) = widget.send("What are your opening hours?").await {
//!         println!("{}", report.reply.content);
//!     }
//!
//!     widget.destroy();
//!     Ok(())
//! }
//! ```

pub mod dashboard;
pub mod types;
pub mod validation;
pub mod widget;

#[cfg(feature = "native")]
pub mod client;
#[cfg(feature = "native")]
pub mod config;
#[cfg(feature = "native")]
pub mod logging;

// Re-export top-level types for convenience
pub use types::{
    AnalyticsSummary, ChatMessage, ChatReply, ChatRequest, Client, ConversationRecord, Lead,
    LeadCapture, NewClient, Role,
};

pub use validation::{is_valid_email, ClientForm, FormErrors, LeadForm};

pub use widget::{
    Conversation, InitConfig, ConfigUpdate, KeyValueStore, LeadOutcome, LeadPromptPolicy,
    MemoryStore, Position, SessionId, StoreError, Theme, ThemeOverrides, WidgetError,
};

pub use dashboard::{display_api_key, export_filename, filter_leads, leads_to_csv, ClientOverview};

#[cfg(feature = "native")]
pub use client::{ClientConfig, ClientError, ProdeskClient};

#[cfg(feature = "native")]
pub use config::{Config, ConfigError};

#[cfg(feature = "native")]
pub use widget::{ChatBackend, FileStore, WidgetHandle};

#[cfg(feature = "native")]
pub use dashboard::{AnalyticsView, ClientManager, ManagementApi, ManagerError};
