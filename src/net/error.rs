//! Error taxonomy for identity backend calls.
//!
//! ERROR HANDLING
//! ==============
//! The gateway maps every failure into one `ApiError` shape before
//! rethrowing, so callers never branch on transport details. The backend
//! sends either a structured envelope `{error: {code, message, details}}`
//! or a flat `{message}`; both are handled here, with a per-operation
//! fallback when neither yields a usable message.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use serde::Deserialize;
use thiserror::Error;

/// Failure classes surfaced to the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// 4xx field-level problems the user can correct.
    Validation,
    /// 401/403: invalid credentials or an expired session.
    Auth,
    /// Transport failure with no HTTP response.
    Network,
    /// 5xx backend faults.
    Server,
}

/// Uniform error carried by every auth/profile operation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub kind: ErrorKind,
    /// Human-readable message, preferring whatever the backend supplied.
    pub message: String,
    /// HTTP status of the failing response; `None` for transport failures.
    pub status: Option<u16>,
}

impl ApiError {
    /// Transport-level failure: the request never produced an HTTP response.
    pub fn network(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::Network,
            message: message.into(),
            status: None,
        }
    }

    /// Builds an error from a non-success HTTP response.
    ///
    /// `default_status` stands in when the response carries no usable status
    /// (opaque responses report 0); `fallback` is the operation's generic
    /// message used when the body yields nothing more specific.
    pub fn from_response(status: u16, body: &str, fallback: &str, default_status: u16) -> Self {
        let status = if status == 0 { default_status } else { status };
        Self {
            kind: classify_status(status),
            message: extract_message(body, fallback),
            status: Some(status),
        }
    }
}

/// Structured envelope variant of the backend error body.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Flat variant of the backend error body.
#[derive(Debug, Deserialize)]
struct FlatError {
    message: Option<String>,
}

fn classify_status(status: u16) -> ErrorKind {
    match status {
        401 | 403 => ErrorKind::Auth,
        500.. => ErrorKind::Server,
        _ => ErrorKind::Validation,
    }
}

/// Picks the most specific message available: `error.message`, then a flat
/// `message`, then the operation fallback.
fn extract_message(body: &str, fallback: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        if let Some(message) = envelope.error.message {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }
    if let Ok(flat) = serde_json::from_str::<FlatError>(body) {
        if let Some(message) = flat.message {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }
    fallback.to_owned()
}
