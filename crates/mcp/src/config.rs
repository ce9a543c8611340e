// Server configuration: TOML file merged with CLI/env overrides

use crate::tools::de_opt_id;
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use sprout_sdk::{SproutClient, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "sprout-mcp.toml";

#[derive(Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default)]
    pub api_token: Option<String>,

    #[serde(default, deserialize_with = "de_opt_id")]
    pub customer_id: Option<String>,

    #[serde(default)]
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT.as_secs()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Values given on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api_token: Option<String>,
    pub customer_id: Option<String>,
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Load the config file, falling back to defaults when it doesn't exist.
    pub fn load(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "Configuration file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path).with_context(|| {
            format!("Failed to read configuration file {}", config_path.display())
        })?;
        let config: Self = toml::from_str(&content).with_context(|| {
            format!("Failed to parse configuration file {}", config_path.display())
        })?;

        tracing::info!(path = %config_path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Overlay non-blank overrides on top of the file values.
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        fn pick(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.trim().is_empty())
        }

        if let Some(token) = pick(overrides.api_token) {
            self.api_token = Some(token);
        }
        if let Some(customer_id) = pick(overrides.customer_id) {
            self.customer_id = Some(customer_id);
        }
        if let Some(base_url) = pick(overrides.base_url) {
            self.api.base_url = base_url;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            self.api.timeout_secs = timeout_secs;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_token.as_deref().map_or(true, |t| t.trim().is_empty()) {
            bail!(
                "No Sprout API token configured: set SPROUT_API_TOKEN, pass --api-token \
                 or add api_token to the configuration file"
            );
        }
        Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid base URL '{}'", self.api.base_url))?;
        if self.api.timeout_secs == 0 {
            bail!("timeout_secs must be greater than zero");
        }
        Ok(())
    }

    /// Build the API client shared by every tool.
    pub fn build_client(&self) -> Result<SproutClient> {
        self.validate()?;

        let mut builder = SproutClient::builder()
            .base_url(self.api.base_url.as_str())
            .api_token(self.api_token.as_deref().unwrap_or_default())
            .timeout(Duration::from_secs(self.api.timeout_secs));
        if let Some(customer_id) = &self.customer_id {
            builder = builder.customer_id(customer_id.as_str());
        }

        builder.build().context("Failed to create Sprout API client")
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("api_token", &self.api_token.as_ref().map(|_| "<redacted>"))
            .field("customer_id", &self.customer_id)
            .field("api", &self.api)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ServerConfig::load(&dir.path().join("absent.toml")).unwrap();

        assert!(config.api_token.is_none());
        assert!(config.customer_id.is_none());
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 30);
    }

    #[test]
    fn test_load_file() {
        let file = write_config(
            r#"
api_token = "file-token"
customer_id = 42

[api]
base_url = "http://localhost:9000"
timeout_secs = 5
"#,
        );

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.api_token.as_deref(), Some("file-token"));
        assert_eq!(config.customer_id.as_deref(), Some("42"));
        assert_eq!(config.api.base_url, "http://localhost:9000");
        assert_eq!(config.api.timeout_secs, 5);
    }

    #[test]
    fn test_partial_api_section_keeps_defaults() {
        let file = write_config("[api]\ntimeout_secs = 10\n");

        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout_secs, 10);
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let file = write_config("api_token = [\n");
        let err = ServerConfig::load(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse configuration file"));

        let file = write_config("api_tokn = \"typo\"\n");
        assert!(ServerConfig::load(file.path()).is_err());
    }

    #[test]
    fn test_overrides_take_precedence() {
        let file = write_config("api_token = \"file-token\"\ncustomer_id = \"1\"\n");

        let config = ServerConfig::load(file.path())
            .unwrap()
            .with_overrides(Overrides {
                api_token: Some("cli-token".to_string()),
                customer_id: Some("  ".to_string()),
                base_url: Some("http://127.0.0.1:1".to_string()),
                timeout_secs: Some(3),
            });

        assert_eq!(config.api_token.as_deref(), Some("cli-token"));
        // blank override leaves the file value
        assert_eq!(config.customer_id.as_deref(), Some("1"));
        assert_eq!(config.api.base_url, "http://127.0.0.1:1");
        assert_eq!(config.api.timeout_secs, 3);
    }

    #[test]
    fn test_missing_token_is_a_startup_error() {
        let err = ServerConfig::default().build_client().unwrap_err();
        assert!(err.to_string().contains("SPROUT_API_TOKEN"));

        let blank = ServerConfig::default().with_overrides(Overrides {
            api_token: Some(String::new()),
            ..Default::default()
        });
        assert!(blank.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = ServerConfig::default().with_overrides(Overrides {
            api_token: Some("tok".to_string()),
            ..Default::default()
        });
        config.api.base_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config.api.base_url = DEFAULT_BASE_URL.to_string();
        config.api.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_client() {
        let config = ServerConfig::default().with_overrides(Overrides {
            api_token: Some("tok".to_string()),
            customer_id: Some("77".to_string()),
            timeout_secs: Some(12),
            ..Default::default()
        });

        let client = config.build_client().unwrap();
        assert_eq!(client.config().customer_id.as_deref(), Some("77"));
        assert_eq!(client.config().timeout, Duration::from_secs(12));
        assert_eq!(client.resolve_customer_id(None).unwrap(), "77");
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = ServerConfig::default().with_overrides(Overrides {
            api_token: Some("super-secret".to_string()),
            ..Default::default()
        });

        let debug = format!("{:?}", config);
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }
}
