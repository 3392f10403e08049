//! Authentication endpoints: login, OTP verification, resend, registration
//! and password reset.
//!
//! Login and registration only stage a verification: the backend dispatches
//! a 6-digit code out-of-band and no token exists until the matching
//! `verify-*` call succeeds.

use serde::Serialize;

use crate::error::{ApiError, Result};
use crate::session::{PendingVerification, VerificationMode};
use crate::types::{
    LoginResponse, MessageResponse, RegistrationData, ResendResponse, VerifyResponse,
};
use crate::LimpiarClient;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct VerifyRequest<'a> {
    phone_number: &'a str,
    code: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResendRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    user_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phone_number: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResetConfirmRequest<'a> {
    token: &'a str,
    new_password: &'a str,
}

impl LimpiarClient {
    /// Submit credentials. On success the backend answers with the user id
    /// (and sometimes the masked contact phone) and sends the OTP.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        self.post_public("/auth/login", &LoginRequest { email, password })
            .await
    }

    /// Check a 6-digit code against the endpoint matching the mode.
    pub async fn verify_otp(
        &self,
        mode: VerificationMode,
        phone_number: &str,
        code: &str,
    ) -> Result<VerifyResponse> {
        let path = match mode {
            VerificationMode::Login => "/auth/verify-login",
            VerificationMode::Registration => "/auth/verify-register",
        };
        self.post_public(path, &VerifyRequest { phone_number, code })
            .await
    }

    /// Ask the backend to dispatch a fresh code. Fails without a network
    /// call when the pending state carries neither contact value.
    pub async fn resend_otp(&self, pending: &PendingVerification) -> Result<ResendResponse> {
        if !pending.has_contact() {
            return Err(ApiError::MissingContact);
        }
        self.post_public(
            "/auth/resend-otp",
            &ResendRequest {
                user_id: pending.user_id.as_deref(),
                phone_number: pending.phone_number.as_deref(),
            },
        )
        .await
    }

    /// Create an account. Verification continues with
    /// [`VerificationMode::Registration`] against the submitted phone number.
    pub async fn register(&self, data: &RegistrationData) -> Result<MessageResponse> {
        self.post_public("/auth/register", data).await
    }

    /// Request a password-reset email.
    pub async fn request_password_reset(&self, email: &str) -> Result<MessageResponse> {
        self.post_public("/auth/reset-password", &ResetRequest { email })
            .await
    }

    /// Complete a password reset with the emailed token.
    pub async fn reset_password(&self, token: &str, new_password: &str) -> Result<MessageResponse> {
        self.post_public(
            "/auth/reset-password/confirm",
            &ResetConfirmRequest {
                token,
                new_password,
            },
        )
        .await
    }

    /// Best-effort server-side logout. Callers clear their local session
    /// whether or not this succeeds.
    pub async fn logout(&self) -> Result<MessageResponse> {
        let resp = self
            .client
            .post(self.url("/auth/logout"))
            .bearer_auth(self.bearer()?)
            .send()
            .await?;
        Self::decode(resp).await
    }
}
