//! Configuration for the Elanis API client.

/// Configuration for the Elanis API client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the remote API, without a trailing slash.
    pub base_url: String,
    /// Default request timeout in milliseconds.
    pub request_timeout_ms: u64,
    /// Timeout for the dedicated refresh call in milliseconds.
    pub refresh_timeout_ms: u64,
    /// Timeout for the best-effort logout notification in milliseconds.
    pub logout_timeout_ms: u64,
    /// Timeout for multipart registration uploads in milliseconds.
    pub upload_timeout_ms: u64,
    /// Enable request/response logging.
    pub enable_logging: bool,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            base_url: "http://elanis.runasp.net/api".to_string(),
            request_timeout_ms: 15000,
            refresh_timeout_ms: 5000,
            logout_timeout_ms: 5000,
            upload_timeout_ms: 30000,
            enable_logging: false,
            user_agent: "elanis-client/0.1".to_string(),
        }
    }
}

impl ClientConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        let mut url = base_url.into();
        while url.ends_with('/') {
            url.pop();
        }
        self.base_url = url;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.base_url, "http://elanis.runasp.net/api");
        assert_eq!(config.request_timeout_ms, 15000);
        assert_eq!(config.refresh_timeout_ms, 5000);
        assert_eq!(config.logout_timeout_ms, 5000);
        assert_eq!(config.upload_timeout_ms, 30000);
        assert!(!config.enable_logging);
    }

    #[test]
    fn test_with_base_url_strips_trailing_slash() {
        let config = ClientConfig::default().with_base_url("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn test_partial_override() {
        let config = ClientConfig {
            request_timeout_ms: 1000,
            ..Default::default()
        };
        assert_eq!(config.request_timeout_ms, 1000);
        assert_eq!(config.refresh_timeout_ms, 5000);
    }
}
