//! Form Validation
//!
//! Local checks run before anything is sent to the backend: the lead-capture
//! form in the widget and the client-creation form in the dashboard.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

use crate::types::NewClient;

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Invalid email format";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

/// `local@domain.tld` with no whitespace and exactly one `@`
pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

/// Per-field validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none()
    }

    /// Messages in field order
    pub fn messages(&self) -> Vec<&str> {
        [self.name.as_deref(), self.email.as_deref()]
            .into_iter()
            .flatten()
            .collect()
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for FormErrors {}

/// Name must be non-blank, email non-blank and well formed
pub fn validate_contact(name: &str, email: &str) -> FormErrors {
    let mut errors = FormErrors::default();

    if name.trim().is_empty() {
        errors.name = Some(NAME_REQUIRED.to_string());
    }

    if email.trim().is_empty() {
        errors.email = Some(EMAIL_REQUIRED.to_string());
    } else if !is_valid_email(email) {
        errors.email = Some(EMAIL_INVALID.to_string());
    }

    errors
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Raw input of the widget's lead-capture form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

/// Validated lead contact details
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadDetails {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: Option<String>,
}

impl LeadForm {
    pub fn validate(&self) -> Result<LeadDetails, FormErrors> {
        let errors = validate_contact(&self.name, &self.email);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(LeadDetails {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: non_blank(&self.phone),
            message: non_blank(&self.message),
        })
    }
}

/// Raw input of the dashboard's "Create New Client" form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientForm {
    pub name: String,
    pub email: String,
    pub website_url: String,
}

impl ClientForm {
    pub fn validate(&self) -> Result<NewClient, FormErrors> {
        let errors = validate_contact(&self.name, &self.email);
        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(NewClient {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            website_url: non_blank(&self.website_url),
        })
    }
}
