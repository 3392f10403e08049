//! Pure Limpiar REST API client.
//!
//! A minimal client for the Limpiar property-management backend. Covers
//! the OTP-based authentication flow (login, verify, resend) and the admin
//! endpoints for users, properties, bookings and payments, plus the
//! client-side session model and its on-disk store.
//!
//! # Example
//!
//! ```rust,ignore
//! use limpiar_api::{LimpiarClient, VerificationMode};
//!
//! let client = LimpiarClient::new();
//! let login = client.login("admin@limpiar.online", "secret").await?;
//! // ...operator receives the code out-of-band...
//! let verified = client
//!     .verify_otp(VerificationMode::Login, "+15551230000", "123456")
//!     .await?;
//! println!("signed in as {}", verified.user.full_name);
//! ```

pub mod auth;
pub mod bookings;
pub mod error;
pub mod payments;
pub mod properties;
pub mod session;
pub mod types;
pub mod users;

pub use error::{ApiError, Result};
pub use session::{PendingVerification, Session, SessionStore, VerificationMode};
pub use types::{
    Booking, BookingStatus, Payment, PaymentStatus, Property, PropertyStatus, Role, User,
};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// The hosted backend origin. Override per-client for tests or staging.
pub const DEFAULT_BASE_URL: &str = "https://limpiar-backend.onrender.com/api";

pub struct LimpiarClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl LimpiarClient {
    /// Unauthenticated client against the hosted backend.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL.to_string())
    }

    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            token: None,
        }
    }

    /// Attach a bearer token. Every authenticated endpoint reads it from
    /// here; unauthenticated clients get [`ApiError::NotAuthenticated`].
    pub fn with_token(mut self, token: String) -> Self {
        self.token = Some(token);
        self
    }

    /// Attach the token from an established session.
    pub fn with_session(self, session: &Session) -> Self {
        self.with_token(session.token.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn bearer(&self) -> Result<&str> {
        self.token.as_deref().ok_or(ApiError::NotAuthenticated)
    }

    /// Authenticated GET returning a decoded JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Authenticated POST with a JSON body.
    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .client
            .post(self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Authenticated PUT with a JSON body.
    pub(crate) async fn put_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self
            .client
            .put(self.url(path))
            .bearer_auth(self.bearer()?)
            .json(body)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Authenticated DELETE.
    pub(crate) async fn delete_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let resp = self
            .client
            .delete(self.url(path))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::decode(resp).await
    }

    /// Unauthenticated POST, for the auth endpoints.
    pub(crate) async fn post_public<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let resp = self.client.post(self.url(path)).json(body).send().await?;
        Self::decode(resp).await
    }

    /// Decode a response. Non-2xx statuses become [`ApiError::Api`] with
    /// the server's `message` field when the body carries one; transport
    /// and parse failures stay distinct.
    pub(crate) async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = error_message(&body);
            tracing::debug!(status = status.as_u16(), %message, "API request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let text = resp.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

impl Default for LimpiarClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Pull the `message` field out of an error body, falling back to the raw
/// text. The backend is expected, not guaranteed, to send JSON.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_owned)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::error_message;

    #[test]
    fn error_message_prefers_message_field() {
        let body = r#"{"message":"Invalid OTP code","code":401}"#;
        assert_eq!(error_message(body), "Invalid OTP code");
    }

    #[test]
    fn error_message_falls_back_to_raw_body() {
        assert_eq!(error_message("Bad Gateway"), "Bad Gateway");
        assert_eq!(error_message(r#"{"error":"nope"}"#), r#"{"error":"nope"}"#);
    }
}
