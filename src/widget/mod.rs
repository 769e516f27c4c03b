//! Embeddable Chat Widget
//!
//! Everything the widget needs that does not touch a DOM or a socket:
//!
//! - [`theme`]: colour, corner and greeting, plus partial overrides
//! - [`session`]: the per-mount session identifier
//! - [`store`]: the persisted "lead captured" flag
//! - [`conversation`]: the open/chat/lead-prompt state machine
//!
//! With the `native` feature, [`WidgetHandle`] drives a [`Conversation`]
//! against a [`ChatBackend`] over async IO. The browser build drives the
//! same state machine from Leptos signals.

pub mod conversation;
pub mod session;
pub mod store;
pub mod theme;

#[cfg(feature = "native")]
mod handle;

pub use conversation::{
    Conversation, LeadOutcome, LeadPrompt, LeadPromptPolicy, Outgoing, Phase, CHAT_ERROR_MESSAGE,
    LEAD_FAILED_NOTICE, LEAD_THANKS_MESSAGE,
};
pub use session::SessionId;
pub use store::{KeyValueStore, MemoryStore, StoreError};
pub use theme::{Position, Theme, ThemeOverrides};

#[cfg(feature = "native")]
pub use handle::{ChatBackend, SendReport, WidgetHandle};
#[cfg(feature = "native")]
pub use store::FileStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::FormErrors;

/// Errors surfaced by the widget lifecycle
#[derive(Error, Debug)]
pub enum WidgetError {
    #[error("Prodesk widget requires an apiKey")]
    MissingApiKey,

    #[error("Invalid contact details: {0}")]
    Validation(#[from] FormErrors),
}

/// Wire shape shared by `init` and `update`: `{apiKey, theme: {...}}`.
/// Theme keys at the top level are still read; the nested object wins.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct EmbedConfig {
    #[serde(default, alias = "api_key")]
    api_key: Option<String>,

    #[serde(default)]
    theme: ThemeOverrides,

    #[serde(flatten)]
    top_level: ThemeOverrides,
}

impl EmbedConfig {
    fn into_parts(self) -> (Option<String>, ThemeOverrides) {
        let mut theme = self.top_level;
        theme.merge(self.theme);
        (self.api_key, theme)
    }
}

/// Configuration passed to `init`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EmbedConfig")]
pub struct InitConfig {
    pub api_key: String,

    #[serde(skip_serializing_if = "ThemeOverrides::is_empty")]
    pub theme: ThemeOverrides,
}

impl From<EmbedConfig> for InitConfig {
    fn from(raw: EmbedConfig) -> Self {
        let (api_key, theme) = raw.into_parts();
        Self {
            api_key: api_key.unwrap_or_default(),
            theme,
        }
    }
}

impl InitConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            theme: ThemeOverrides::default(),
        }
    }

    /// Reject a missing or blank API key
    pub fn validate(&self) -> Result<(), WidgetError> {
        if self.api_key.trim().is_empty() {
            Err(WidgetError::MissingApiKey)
        } else {
            Ok(())
        }
    }

    /// Default theme with this config's overrides applied
    pub fn resolved_theme(&self) -> Theme {
        Theme::default().with_overrides(&self.theme)
    }
}

/// Partial configuration passed to `update`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "EmbedConfig")]
pub struct ConfigUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "ThemeOverrides::is_empty")]
    pub theme: ThemeOverrides,
}

impl From<EmbedConfig> for ConfigUpdate {
    fn from(raw: EmbedConfig) -> Self {
        let (api_key, theme) = raw.into_parts();
        Self { api_key, theme }
    }
}

impl ConfigUpdate {
    /// Apply to a live conversation. A blank API key is ignored.
    pub fn apply_to(&self, conversation: &mut Conversation) {
        if let Some(key) = self.api_key.as_deref().filter(|k| !k.trim().is_empty()) {
            conversation.set_api_key(key);
        }
        conversation.apply_theme(&self.theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_config_from_embed_snippet() {
        let config: InitConfig = serde_json::from_str(
            r##"{"apiKey": "pk_live_1", "primaryColor": "#ff0000", "welcomeMessage": "Hi!"}"##,
        )
        .unwrap();

        assert!(config.validate().is_ok());
        let theme = config.resolved_theme();
        assert_eq!(theme.primary_color, "#ff0000");
        assert_eq!(theme.welcome_message, "Hi!");
        assert_eq!(theme.position, Position::BottomRight);
    }

    #[test]
    fn test_init_config_nested_theme() {
        let config: InitConfig = serde_json::from_str(
            r##"{
                "apiKey": "pk_1",
                "theme": {
                    "primaryColor": "#ff0000",
                    "position": "bottom-left",
                    "welcomeMessage": "Welcome aboard"
                }
            }"##,
        )
        .unwrap();

        let theme = config.resolved_theme();
        assert_eq!(theme.primary_color, "#ff0000");
        assert_eq!(theme.position, Position::BottomLeft);
        assert_eq!(theme.welcome_message, "Welcome aboard");
    }

    #[test]
    fn test_nested_theme_wins_over_top_level() {
        let config: InitConfig = serde_json::from_str(
            r##"{"apiKey": "pk_1", "primaryColor": "#111111", "theme": {"primaryColor": "#222222"}}"##,
        )
        .unwrap();
        assert_eq!(config.resolved_theme().primary_color, "#222222");
    }

    #[test]
    fn test_update_nested_theme() {
        let update: ConfigUpdate =
            serde_json::from_str(r#"{"theme": {"welcomeMessage": "Yo"}}"#).unwrap();
        assert_eq!(update.api_key, None);
        assert_eq!(update.theme.welcome_message.as_deref(), Some("Yo"));

        let mut conversation =
            Conversation::new("pk_1", Theme::default(), SessionId::generate());
        update.apply_to(&mut conversation);
        conversation.open();
        assert_eq!(conversation.messages()[0].content, "Yo");
    }

    #[test]
    fn test_init_config_serializes_nested() {
        let mut config = InitConfig::new("pk_1");
        config.theme.primary_color = Some("#00ff00".to_string());

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["apiKey"], "pk_1");
        assert_eq!(json["theme"]["primaryColor"], "#00ff00");

        let back: InitConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_api_key_rejected() {
        let config: InitConfig = serde_json::from_str(r#"{"position": "bottom-left"}"#).unwrap();
        assert!(matches!(config.validate(), Err(WidgetError::MissingApiKey)));
    }

    #[test]
    fn test_update_keeps_history_and_session() {
        let store = MemoryStore::new();
        let init = InitConfig::new("pk_old");
        let mut conversation = Conversation::new(
            init.api_key.clone(),
            init.resolved_theme(),
            SessionId::generate(),
        );
        conversation.open();
        conversation.begin_send("hello", &store);
        let session = conversation.session().clone();

        let update: ConfigUpdate =
            serde_json::from_str(r##"{"apiKey": "pk_new", "primaryColor": "#123456"}"##).unwrap();
        update.apply_to(&mut conversation);

        assert_eq!(conversation.api_key(), "pk_new");
        assert_eq!(conversation.theme().primary_color, "#123456");
        assert_eq!(conversation.session(), &session);
        assert_eq!(conversation.messages().len(), 2);
    }
}
