//! Error types for the to-do service client.
//!
//! # Design
//! Failures are classified once, where a response (or the lack of one)
//! comes back from the transport. The service reports application errors
//! as `{ "status": false, "message": ... }`; a message equal to
//! [`SESSION_EXPIRED`] gets its own variant because callers react to it by
//! sending the user back to the login screen.

use serde_json::Value;
use thiserror::Error;

use crate::http::HttpResponse;

/// Message the service sends when the session token is missing or stale.
pub const SESSION_EXPIRED: &str = "驗證失效";

/// Errors surfaced by the facade, the transports and the `parse_*` helpers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("network error: {0}")]
    Network(String),

    /// Non-2xx response carrying a `message` field.
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    /// Non-2xx response whose message is the session-expired sentinel.
    #[error("HTTP {status}: {}", SESSION_EXPIRED)]
    SessionExpired { status: u16 },

    /// Non-2xx response without a usable `message`.
    #[error("HTTP {status}: {body}")]
    Unknown { status: u16, body: String },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body did not match the expected shape.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// Classify a non-2xx response.
    pub fn from_response(response: &HttpResponse) -> Self {
        let status = response.status;
        match extract_message(&response.body) {
            Some(message) if message == SESSION_EXPIRED => ApiError::SessionExpired { status },
            Some(message) => ApiError::Server { status, message },
            None => ApiError::Unknown {
                status,
                body: response.body.clone(),
            },
        }
    }

    /// The server-reported message, if this error carries one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } => Some(message),
            ApiError::SessionExpired { .. } => Some(SESSION_EXPIRED),
            _ => None,
        }
    }

    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. }
            | ApiError::SessionExpired { status }
            | ApiError::Unknown { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Pull `message` out of a JSON error body. Arrays are joined with `,`;
/// numbers, `true` and objects are rendered as JSON. `null`, `false`, `0`
/// and `""` count as no message.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let message = match value.get("message")? {
        Value::Null | Value::Bool(false) => return None,
        Value::Number(n) if n.as_f64() == Some(0.0) => return None,
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect::<Vec<_>>()
            .join(","),
        other => other.to_string(),
    };
    if message.is_empty() {
        None
    } else {
        Some(message)
    }
}
