//! Error types for the EduShare SDK.

use thiserror::Error;

/// SDK operation errors.
///
/// Every error is terminal to the triggering operation; the SDK never
/// retries on its own.
#[derive(Debug, Error)]
pub enum SdkError {
    /// No session is attached to the client (log in first).
    #[error("Not authenticated - no session loaded")]
    NotAuthenticated,

    /// The backend answered with a non-2xx status.
    #[error("API error (HTTP {status}): {detail}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Backend-provided detail, or the raw body when unparseable.
        detail: String,
    },

    /// Network-level failure (connect, DNS, timeout).
    #[error("Connection error: {0}")]
    Connection(String),

    /// The response body could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::Connection(e.to_string())
        } else if e.is_decode() {
            SdkError::Decode(e.to_string())
        } else if let Some(status) = e.status() {
            SdkError::Api {
                status: status.as_u16(),
                detail: e.to_string(),
            }
        } else {
            SdkError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::Decode(format!("JSON parsing error: {}", e))
    }
}
