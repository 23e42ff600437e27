//! Main Elanis API client implementation.

use crate::client::native_network::NativeNetwork;
use crate::client::ClientConfig;
use crate::error::{ApiError, Result};
use crate::paths;
use crate::traits::{CredentialStore, Network};
use crate::types::{ApiRequest, ApiResponse, TokenPair};
use std::sync::Arc;
use std::time::Duration;

/// The main Elanis API client.
///
/// Attaches the current access token to every outbound request and, on a
/// 401, performs exactly one refresh-and-replay before giving up. A shared
/// gate keeps concurrent 401 handlers from issuing more than one refresh
/// call at a time.
#[derive(Clone)]
pub struct ApiClient {
    network: Arc<dyn Network>,
    config: Arc<ClientConfig>,
    credentials: Arc<dyn CredentialStore>,
    refresh_gate: Arc<tokio::sync::Mutex<()>>,
}

impl ApiClient {
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialStore>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(Self::with_network(
            Arc::new(NativeNetwork::new(client)),
            config,
            credentials,
        ))
    }

    /// Construct over an arbitrary network backend. Tests use this to
    /// script responses.
    pub fn with_network(
        network: Arc<dyn Network>,
        config: ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Self {
        ApiClient {
            network,
            config: Arc::new(config),
            credentials,
            refresh_gate: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialStore> {
        &self.credentials
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Execute a request with bearer attachment and one-shot 401 recovery.
    ///
    /// Every status except 401 passes through unchanged; 5xx, timeouts and
    /// network errors are never retried here.
    pub async fn request(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let stale = self.credentials.access_token();
        if request.bearer.is_none() {
            request.bearer = stale.clone();
        }

        let url = self.url_for(&request.path);
        self.log_request(&url, &request);
        let response = self.network.execute(&url, request.clone()).await?;
        self.log_response(&url, &response);

        if response.status != 401 || request.retried {
            return Ok(response);
        }

        let Some(access_token) = self.refresh_access_token(stale.as_deref()).await? else {
            // No refresh token stored; the original 401 stands and no
            // refresh call was made.
            return Ok(response);
        };

        request.retried = true;
        request.bearer = Some(access_token);
        self.log_request(&url, &request);
        let replayed = self.network.execute(&url, request).await?;
        self.log_response(&url, &replayed);
        Ok(replayed)
    }

    pub async fn get(&self, path: &str) -> Result<ApiResponse> {
        self.request(ApiRequest::get(path)).await
    }

    pub async fn post_json(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse> {
        self.request(ApiRequest::post(path).with_json(body)).await
    }

    pub async fn put_json(&self, path: &str, body: serde_json::Value) -> Result<ApiResponse> {
        self.request(ApiRequest::put(path).with_json(body)).await
    }

    pub async fn delete(&self, path: &str) -> Result<ApiResponse> {
        self.request(ApiRequest::delete(path)).await
    }

    /// Refresh the access token, single-flight across concurrent callers.
    ///
    /// Returns `Ok(None)` when no refresh token is stored (the caller then
    /// propagates its original 401 unchanged). A failed refresh call is an
    /// authentication failure that supersedes the original 401.
    async fn refresh_access_token(&self, stale: Option<&str>) -> Result<Option<String>> {
        if self.credentials.refresh_token().is_none() {
            tracing::debug!("No refresh token stored, skipping refresh");
            return Ok(None);
        }

        let _gate = self.refresh_gate.lock().await;

        // Another caller may have rotated the pair while we waited on the
        // gate; if so, reuse its result instead of refreshing again.
        if let Some(current) = self.credentials.access_token() {
            if stale != Some(current.as_str()) {
                tracing::debug!("Access token already rotated by a concurrent refresh");
                return Ok(Some(current));
            }
        }

        let Some(refresh_token) = self.credentials.refresh_token() else {
            return Ok(None);
        };

        tracing::debug!("Access token rejected, attempting refresh");
        let request = ApiRequest::post(paths::REFRESH_TOKEN)
            .with_json(serde_json::json!({ "refreshToken": refresh_token }))
            .with_timeout(Duration::from_millis(self.config.refresh_timeout_ms));
        let url = self.url_for(paths::REFRESH_TOKEN);
        let response = self.network.execute(&url, request).await?;

        let pair: TokenPair = response.envelope().map_err(|e| match e {
            ApiError::Api { message, .. } => ApiError::AuthenticationFailed(message),
            other => other,
        })?;

        self.credentials
            .store_tokens(&pair.access_token, &pair.refresh_token);
        tracing::debug!("Token refresh successful");
        Ok(Some(pair.access_token))
    }

    /// Explicit refresh, for callers that manage their own retry policy.
    pub async fn refresh(&self) -> Result<TokenPair> {
        let refresh_token = self
            .credentials
            .refresh_token()
            .ok_or(ApiError::RefreshUnavailable)?;

        let request = ApiRequest::post(paths::REFRESH_TOKEN)
            .with_json(serde_json::json!({ "refreshToken": refresh_token }))
            .with_timeout(Duration::from_millis(self.config.refresh_timeout_ms));
        let url = self.url_for(paths::REFRESH_TOKEN);
        let response = self.network.execute(&url, request).await?;

        let pair: TokenPair = response.envelope()?;
        self.credentials
            .store_tokens(&pair.access_token, &pair.refresh_token);
        Ok(pair)
    }

    /// Raw network call bypassing bearer attachment and 401 recovery.
    /// The logout notification uses this so an expired token cannot
    /// trigger a refresh loop during teardown.
    pub(crate) async fn execute_raw(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        self.log_request(&url, &request);
        self.network.execute(&url, request).await
    }

    fn log_request(&self, url: &str, request: &ApiRequest) {
        if self.config.enable_logging {
            tracing::debug!(
                "[ElanisAPI-Out] {} {} bearer={} retried={}",
                request.method,
                url,
                request.bearer.is_some(),
                request.retried
            );
        }
    }

    fn log_response(&self, url: &str, response: &ApiResponse) {
        if self.config.enable_logging {
            tracing::debug!("[ElanisAPI-In] {} from {}", response.status, url);
        }
    }
}
