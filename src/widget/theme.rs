//! Widget Theme
//!
//! Colour, corner and greeting of the chat widget. Host pages pass partial
//! overrides (camelCase, as in the embed snippet); the backend stores the
//! snake_case form. Both spellings are accepted.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_PRIMARY_COLOR: &str = "#667eea";
pub const DEFAULT_WELCOME_MESSAGE: &str = "Hello! How can I help you today?";

/// Screen corner the widget is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
}

impl Position {
    pub fn as_str(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
        }
    }

    /// Inline CSS offsets for the fixed-position root element
    pub fn css_offsets(&self) -> &'static str {
        match self {
            Position::BottomRight => "bottom: 20px; right: 20px;",
            Position::BottomLeft => "bottom: 20px; left: 20px;",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottom-right" => Ok(Position::BottomRight),
            "bottom-left" => Ok(Position::BottomLeft),
            other => Err(format!(
                "unknown position '{}', expected bottom-right or bottom-left",
                other
            )),
        }
    }
}

/// Resolved widget theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(alias = "primaryColor", default = "default_primary_color")]
    pub primary_color: String,

    #[serde(default)]
    pub position: Position,

    #[serde(alias = "welcomeMessage", default = "default_welcome_message")]
    pub welcome_message: String,
}

fn default_primary_color() -> String {
    DEFAULT_PRIMARY_COLOR.to_string()
}

fn default_welcome_message() -> String {
    DEFAULT_WELCOME_MESSAGE.to_string()
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            position: Position::default(),
            welcome_message: default_welcome_message(),
        }
    }
}

impl Theme {
    /// Apply the fields set in `overrides`. A primary colour that is not a
    /// hex colour is ignored.
    pub fn apply(&mut self, overrides: &ThemeOverrides) {
        if let Some(color) = &overrides.primary_color {
            if is_hex_color(color) {
                self.primary_color = color.clone();
            } else {
                tracing::warn!(color = %color, "Ignoring invalid primary color");
            }
        }
        if let Some(position) = overrides.position {
            self.position = position;
        }
        if let Some(welcome) = &overrides.welcome_message {
            self.welcome_message = welcome.clone();
        }
    }

    /// Builder-style [`Theme::apply`]
    pub fn with_overrides(mut self, overrides: &ThemeOverrides) -> Self {
        self.apply(overrides);
        self
    }

    /// Header background: primary colour fading into a darker shade
    pub fn header_gradient(&self) -> String {
        format!(
            "linear-gradient(135deg, {} 0%, {} 100%)",
            self.primary_color,
            adjust_color(&self.primary_color, -20)
        )
    }
}

/// Partial theme as passed to `init` / `update`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeOverrides {
    #[serde(default, alias = "primary_color", skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,

    #[serde(default, alias = "welcome_message", skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}

impl ThemeOverrides {
    /// Layer `newer` on top of `self`; fields set in `newer` win
    pub fn merge(&mut self, newer: ThemeOverrides) {
        if newer.primary_color.is_some() {
            self.primary_color = newer.primary_color;
        }
        if newer.position.is_some() {
            self.position = newer.position;
        }
        if newer.welcome_message.is_some() {
            self.welcome_message = newer.welcome_message;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none() && self.position.is_none() && self.welcome_message.is_none()
    }
}

/// `#rgb` or `#rrggbb`
pub fn is_hex_color(color: &str) -> bool {
    match color.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Shift every RGB channel of a `#rrggbb` colour by `amount`, clamped to
/// 0..=255. Anything else is returned unchanged.
pub fn adjust_color(color: &str, amount: i32) -> String {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 {
        return color.to_string();
    }
    let Ok(value) = u32::from_str_radix(hex, 16) else {
        return color.to_string();
    };

    let shift = |channel: u32| (channel as i32 + amount).clamp(0, 255) as u32;
    let r = shift((value >> 16) & 0xff);
    let g = shift((value >> 8) & 0xff);
    let b = shift(value & 0xff);

    format!("#{:06x}", (r << 16) | (g << 8) | b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let theme = Theme::default();
        assert_eq!(theme.primary_color, "#667eea");
        assert_eq!(theme.position, Position::BottomRight);
        assert_eq!(theme.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[test]
    fn test_overrides_from_embed_config() {
        let overrides: ThemeOverrides = serde_json::from_str(
            r##"{"primaryColor": "#ff5500", "position": "bottom-left"}"##,
        )
        .unwrap();

        let theme = Theme::default().with_overrides(&overrides);
        assert_eq!(theme.primary_color, "#ff5500");
        assert_eq!(theme.position, Position::BottomLeft);
        assert_eq!(theme.welcome_message, DEFAULT_WELCOME_MESSAGE);
    }

    #[test]
    fn test_invalid_color_ignored() {
        let overrides = ThemeOverrides {
            primary_color: Some("blue".to_string()),
            ..Default::default()
        };
        let theme = Theme::default().with_overrides(&overrides);
        assert_eq!(theme.primary_color, DEFAULT_PRIMARY_COLOR);
    }

    #[test]
    fn test_merge_keeps_unset_fields() {
        let mut base = ThemeOverrides {
            primary_color: Some("#111111".to_string()),
            welcome_message: Some("Hey".to_string()),
            ..Default::default()
        };
        base.merge(ThemeOverrides {
            welcome_message: Some("Welcome back".to_string()),
            ..Default::default()
        });

        assert_eq!(base.primary_color.as_deref(), Some("#111111"));
        assert_eq!(base.welcome_message.as_deref(), Some("Welcome back"));
    }

    #[test]
    fn test_adjust_color() {
        assert_eq!(adjust_color("#667eea", -20), "#526ad6");
        assert_eq!(adjust_color("#0a0a0a", -20), "#000000");
        assert_eq!(adjust_color("#fafafa", 20), "#ffffff");
        assert_eq!(adjust_color("red", -20), "red");
    }

    #[test]
    fn test_position_parse() {
        assert_eq!("bottom-left".parse::<Position>().unwrap(), Position::BottomLeft);
        assert!("top-left".parse::<Position>().is_err());
        assert_eq!(Position::BottomLeft.css_offsets(), "bottom: 20px; left: 20px;");
    }
}
