use crate::error::Result;
use crate::types::{ApiRequest, ApiResponse};
use async_trait::async_trait;

/// Abstraction for network operations.
///
/// The production implementation wraps `reqwest`; tests substitute scripted
/// responses to exercise the 401 recovery path without a server.
#[async_trait]
pub trait Network: Send + Sync + 'static {
    async fn execute(&self, url: &str, request: ApiRequest) -> Result<ApiResponse>;
}

/// Source of truth for the current token pair.
///
/// Lookups and rotation never fail across this boundary; implementations
/// log persistence problems and carry on (the in-memory session still
/// holds the fresh pair).
pub trait CredentialStore: Send + Sync + 'static {
    fn access_token(&self) -> Option<String>;
    fn refresh_token(&self) -> Option<String>;
    fn store_tokens(&self, access_token: &str, refresh_token: &str);
}

/// Credential store for anonymous clients. Never holds a token.
pub struct NoCredentials;

impl CredentialStore for NoCredentials {
    fn access_token(&self) -> Option<String> {
        None
    }

    fn refresh_token(&self) -> Option<String> {
        None
    }

    fn store_tokens(&self, _access_token: &str, _refresh_token: &str) {}
}
