//! Widget Session Identifier
//!
//! Generated once per widget mount and sent with every chat and lead request
//! so the backend can correlate them.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const SUFFIX_LEN: usize = 9;

/// Opaque session id: `session_<unix-millis>_<9 base36 chars>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    /// New id stamped with the current time
    pub fn generate() -> Self {
        Self::generate_at(chrono::Utc::now().timestamp_millis())
    }

    fn generate_at(millis: i64) -> Self {
        Self(format!("session_{}_{}", millis, random_suffix()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for SessionId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn random_suffix() -> String {
    let mut entropy = Uuid::new_v4().as_u128();
    (0..SUFFIX_LEN)
        .map(|_| {
            let c = BASE36[(entropy % 36) as usize] as char;
            entropy /= 36;
            c
        })
        .collect()
}
