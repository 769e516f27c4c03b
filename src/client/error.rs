//! REST Client Errors

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the Prodesk backend
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Prodesk backend unavailable")]
    Unavailable,

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response: {0}")]
    Decode(String),
}

impl ClientError {
    /// Classify a transport-level failure
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_connect() {
            ClientError::Unavailable
        } else {
            ClientError::Request(err)
        }
    }

    /// Build an `Api` error from a non-2xx response body.
    ///
    /// FastAPI wraps messages as `{"detail": "..."}`; anything else is kept
    /// verbatim.
    pub(crate) fn from_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct ErrorBody {
            detail: serde_json::Value,
        }

        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(ErrorBody {
                detail: serde_json::Value::String(detail),
            }) => detail,
            Ok(ErrorBody { detail }) => detail.to_string(),
            Err(_) => body.to_string(),
        };

        ClientError::Api { status, message }
    }

    /// HTTP status for `Api` errors
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
