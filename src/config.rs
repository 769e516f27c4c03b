//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::widget::{LeadPromptPolicy, Position, ThemeOverrides};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub widget: WidgetConfigDefaults,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Theme and lead-prompt defaults for the terminal widget.
/// Command-line flags override these.
#[derive(Debug, Clone, Deserialize)]
pub struct WidgetConfigDefaults {
    pub primary_color: Option<String>,

    pub position: Option<Position>,

    pub welcome_message: Option<String>,

    #[serde(default = "default_lead_prompt_after")]
    pub lead_prompt_after: usize,

    #[serde(default = "default_lead_prompt_delay")]
    pub lead_prompt_delay_ms: u64,
}

fn default_lead_prompt_after() -> usize {
    3
}

fn default_lead_prompt_delay() -> u64 {
    1000
}

impl Default for WidgetConfigDefaults {
    fn default() -> Self {
        Self {
            primary_color: None,
            position: None,
            welcome_message: None,
            lead_prompt_after: default_lead_prompt_after(),
            lead_prompt_delay_ms: default_lead_prompt_delay(),
        }
    }
}

impl WidgetConfigDefaults {
    pub fn theme_overrides(&self) -> ThemeOverrides {
        ThemeOverrides {
            primary_color: self.primary_color.clone(),
            position: self.position,
            welcome_message: self.welcome_message.clone(),
        }
    }

    pub fn lead_prompt_policy(&self) -> LeadPromptPolicy {
        LeadPromptPolicy {
            after_user_messages: self.lead_prompt_after,
            delay: Duration::from_millis(self.lead_prompt_delay_ms),
        }
    }
}

/// Widget key-value store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_path")]
    pub path: String,
}

fn default_store_path() -> String {
    dirs::data_local_dir()
        .map(|p| {
            p.join("prodesk")
                .join("widget_store.json")
                .to_string_lossy()
                .to_string()
        })
        .unwrap_or_else(|| "./prodesk_widget_store.json".to_string())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,

    pub file: Option<String>,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("prodesk").join("config.toml")),
            Some(PathBuf::from("/etc/prodesk/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PRODESK_API_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("PRODESK_API_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.api.request_timeout_secs = secs;
            }
        }

        if let Ok(path) = std::env::var("PRODESK_STORE_PATH") {
            self.store.path = path;
        }

        if let Ok(level) = std::env::var("PRODESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PRODESK_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# Prodesk Configuration
#
# Environment variables override these settings:
# - PRODESK_API_URL
# - PRODESK_API_TIMEOUT_SECS
# - PRODESK_STORE_PATH
# - PRODESK_LOG_LEVEL
# - PRODESK_LOG_FORMAT

[api]
# Prodesk backend URL
base_url = "http://localhost:8000"

# Request timeout in seconds
request_timeout_secs = 30

[widget]
# Theme defaults for prodesk-chat (flags override)
# primary_color = "#667eea"
# position = "bottom-right"
# welcome_message = "Hello! How can I help you today?"

# Offer the lead form after this many visitor messages
lead_prompt_after = 3

# Delay before the lead form appears (ms)
lead_prompt_delay_ms = 1000

[store]
# Where the "lead captured" flags are kept
path = "~/.local/share/prodesk/widget_store.json"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"

# Optional log file path
# file = "/var/log/prodesk/prodesk.log"
"##
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_missing_sections_use_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"https://api.example.com\"").unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, "https://api.example.com");
        assert_eq!(config.api.request_timeout_secs, 30);
        assert_eq!(config.widget.lead_prompt_after, 3);
        assert_eq!(config.logging.format, "pretty");
    }

    #[test]
    fn test_default_config_prompts_after_third_message() {
        let policy = Config::default().widget.lead_prompt_policy();
        assert_eq!(policy, LeadPromptPolicy::default());
        assert_eq!(policy.after_user_messages, 3);
        assert_eq!(policy.delay, Duration::from_millis(1000));

        let policy = Config::from_env().widget.lead_prompt_policy();
        assert_eq!(policy.after_user_messages, 3);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8000");
        assert_eq!(config.widget.lead_prompt_delay_ms, 1000);
        assert!(config.widget.primary_color.is_none());
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn test_widget_section() {
        let config: Config = toml::from_str(
            r##"
            [widget]
            primary_color = "#ff5500"
            position = "bottom-left"
            lead_prompt_after = 5
            "##,
        )
        .unwrap();

        let overrides = config.widget.theme_overrides();
        assert_eq!(overrides.primary_color.as_deref(), Some("#ff5500"));
        assert_eq!(overrides.position, Some(Position::BottomLeft));

        let policy = config.widget.lead_prompt_policy();
        assert_eq!(policy.after_user_messages, 5);
        assert_eq!(policy.delay, Duration::from_millis(1000));
    }

    #[test]
    fn test_unreadable_and_invalid_files() {
        let missing = Config::load(Path::new("/nonexistent/prodesk.toml"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api\nbase_url = ").unwrap();
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_env_overrides_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"http://from-file\"\nrequest_timeout_secs = 5").unwrap();

        std::env::set_var("PRODESK_API_URL", "http://from-env");
        std::env::set_var("PRODESK_API_TIMEOUT_SECS", "not-a-number");
        let config = Config::load_with_env(file.path()).unwrap();
        std::env::remove_var("PRODESK_API_URL");
        std::env::remove_var("PRODESK_API_TIMEOUT_SECS");

        assert_eq!(config.api.base_url, "http://from-env");
        assert_eq!(config.api.request_timeout_secs, 5);
    }
}
