use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A status attached to an error: the human-readable label and its numeric code.
///
/// A code of `0` means no status was assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Status {
    /// Reason phrase, or the decimal code when the number is not a known status
    pub message: String,
    /// Numeric, HTTP-style status code
    pub code: u16,
}

impl Status {
    /// Create a status, resolving its label from the code
    pub fn new(code: u16) -> Self {
        Self {
            message: status_label(code),
            code,
        }
    }

    /// HTTP status for this entry, if the code is a valid one
    pub fn http_status(&self) -> Option<StatusCode> {
        StatusCode::from_u16(self.code).ok()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{\"message\": \"{}\", \"code\": {}}}",
            self.message, self.code
        )
    }
}

/// Resolve a numeric status to its reason phrase.
///
/// Unknown numbers fall back to their decimal string.
pub fn status_label(code: u16) -> String {
    StatusCode::from_u16(code)
        .ok()
        .and_then(|status| status.canonical_reason())
        .map(str::to_owned)
        .unwrap_or_else(|| code.to_string())
}
