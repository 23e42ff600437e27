//! Typed Account endpoints.

use crate::client::ApiClient;
use crate::error::{ApiError, Result};
use crate::paths;
use crate::types::{
    ApiRequest, LoginRequest, OtpVerification, PasswordChange, PasswordReset,
    ProviderRegistration, UserProfile, UserRegistration,
};
use std::time::Duration;

impl ApiClient {
    /// `POST /Account/login`. On success the returned profile carries the
    /// token pair alongside the user fields; callers hand it to the
    /// session layer whole.
    pub async fn login(&self, credentials: &LoginRequest) -> Result<UserProfile> {
        let body = serde_json::to_value(credentials)?;
        let response = self.post_json(paths::LOGIN, body).await?;
        response.envelope()
    }

    /// `POST /Account/login/google` with the OAuth id token.
    pub async fn login_google(&self, id_token: &str) -> Result<UserProfile> {
        let response = self
            .post_json(paths::LOGIN_GOOGLE, serde_json::json!({ "token": id_token }))
            .await?;
        response.envelope()
    }

    /// Best-effort `POST /Account/logout`. Bypasses bearer attachment and
    /// 401 recovery: the token being invalidated must never trigger a
    /// refresh, and callers swallow the outcome anyway.
    pub async fn notify_logout(&self, access_token: &str) -> Result<()> {
        let request = ApiRequest::post(paths::LOGOUT)
            .with_bearer(access_token)
            .with_timeout(Duration::from_millis(self.config().logout_timeout_ms));
        let response = self.execute_raw(request).await?;
        if response.is_success() {
            Ok(())
        } else {
            Err(ApiError::Http {
                status: response.status,
                message: "logout notification rejected".to_string(),
            })
        }
    }

    /// `POST /Account/register-user` (multipart, anonymous).
    pub async fn register_user(&self, registration: UserRegistration) -> Result<serde_json::Value> {
        let request = ApiRequest::post(paths::REGISTER_USER)
            .with_form(registration.into_form())
            .with_timeout(Duration::from_millis(self.config().upload_timeout_ms));
        let response = self.execute_raw(request).await?;
        response.envelope()
    }

    /// `POST /Account/register-service-provider` (multipart, anonymous).
    /// The new provider starts in the pending-approval state.
    pub async fn register_service_provider(
        &self,
        registration: ProviderRegistration,
    ) -> Result<serde_json::Value> {
        let request = ApiRequest::post(paths::REGISTER_SERVICE_PROVIDER)
            .with_form(registration.into_form())
            .with_timeout(Duration::from_millis(self.config().upload_timeout_ms));
        let response = self.execute_raw(request).await?;
        response.envelope()
    }

    /// `POST /Account/forget-password` — sends a reset email.
    pub async fn forgot_password(&self, email: &str) -> Result<()> {
        let response = self
            .post_json(paths::FORGET_PASSWORD, serde_json::json!({ "email": email }))
            .await?;
        response.ack()
    }

    /// `POST /Account/reset-password` with the emailed token.
    pub async fn reset_password(&self, reset: &PasswordReset) -> Result<()> {
        let body = serde_json::to_value(reset)?;
        let response = self.post_json(paths::RESET_PASSWORD, body).await?;
        response.ack()
    }

    /// `POST /Account/change-password`. Requires an authenticated session;
    /// the bearer token and 401 recovery apply as for any data request.
    pub async fn change_password(&self, change: &PasswordChange) -> Result<()> {
        let body = serde_json::to_value(change)?;
        let response = self.post_json(paths::CHANGE_PASSWORD, body).await?;
        response.ack()
    }

    /// `POST /Account/verify-otp` for the registration flow.
    pub async fn verify_otp(&self, verification: &OtpVerification) -> Result<()> {
        let body = serde_json::to_value(verification)?;
        let response = self.post_json(paths::VERIFY_OTP, body).await?;
        response.ack()
    }

    /// `POST /Account/resend-otp`.
    pub async fn resend_otp(&self, email: &str) -> Result<()> {
        let response = self
            .post_json(paths::RESEND_OTP, serde_json::json!({ "email": email }))
            .await?;
        response.ack()
    }
}
