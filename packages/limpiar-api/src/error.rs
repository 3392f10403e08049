//! Typed errors for the Limpiar API client.
//!
//! Uses `thiserror` for library errors (not `anyhow`). The only
//! distinction the backend contract supports is server-reported failure
//! (non-2xx with a `message` body) versus transport/parse failure, plus a
//! couple of purely client-side preconditions.

use thiserror::Error;

/// Result type for Limpiar API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Limpiar API client errors.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server-reported failure: non-2xx status, message taken from the body
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Transport failure (connection refused, TLS, timeout)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Response body did not parse as the expected shape
    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Authenticated endpoint called without an established session
    #[error("not authenticated: sign in first")]
    NotAuthenticated,

    /// Resend requested with neither a user id nor a phone number on file
    #[error("no user id or phone number available to resend the code")]
    MissingContact,

    /// Session state file could not be read or written
    #[error("session store error: {0}")]
    Store(#[from] std::io::Error),
}

impl ApiError {
    /// Message suitable for showing to the operator: the server's own words
    /// for API errors, the error display otherwise.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Api { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
