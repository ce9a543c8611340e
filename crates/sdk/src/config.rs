//! Configuration types for the Sprout SDK.

use std::time::Duration;
use url::Url;

/// Default Sprout Social API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.sproutsocial.com";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Sprout client.
///
/// Built once at startup and shared read-only by every request.
#[derive(Clone)]
pub struct ClientConfig {
    /// Base URL of the Sprout API.
    pub base_url: Url,
    /// Bearer token sent with every request.
    pub api_token: String,
    /// Customer used when a call does not name one.
    pub customer_id: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl ClientConfig {
    /// Create a configuration against the default endpoint.
    pub fn new(api_token: impl Into<String>) -> Self {
        Self {
            base_url: default_base_url(),
            api_token: api_token.into(),
            customer_id: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: default_user_agent(),
        }
    }
}

// The token never ends up in logs.
impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("api_token", &"<redacted>")
            .field("customer_id", &self.customer_id)
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

pub(crate) fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

/// Make `url` usable as a join base: a path prefix such as `/sprout`
/// only survives `Url::join` when it ends in a slash.
pub(crate) fn ensure_trailing_slash(url: &mut Url) {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
}

pub(crate) fn default_user_agent() -> String {
    format!("sprout-mcp/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_config_defaults() {
        let config = ClientConfig::new("tok");

        assert_eq!(config.base_url.as_str(), "https://api.sproutsocial.com/");
        assert_eq!(config.api_token, "tok");
        assert!(config.customer_id.is_none());
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert!(config.user_agent.starts_with("sprout-mcp/"));
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ClientConfig::new("super-secret");
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
