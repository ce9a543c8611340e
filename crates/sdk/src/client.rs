//! Main client for the Sprout SDK.

use crate::api::*;
use crate::config::{
    default_base_url, default_user_agent, ensure_trailing_slash, ClientConfig, DEFAULT_TIMEOUT,
};
use crate::error::{SproutError, SproutResult};
use crate::transport::HttpTransport;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main client for interacting with the Sprout API.
///
/// Cheap to clone; clones share one connection pool and one immutable
/// configuration.
#[derive(Clone)]
pub struct SproutClient {
    config: Arc<ClientConfig>,
    pub(crate) http: HttpTransport,
}

impl SproutClient {
    /// Create a new client builder.
    pub fn builder() -> SproutClientBuilder {
        SproutClientBuilder::new()
    }

    /// Create a client from configuration.
    pub fn from_config(mut config: ClientConfig) -> SproutResult<Self> {
        if config.api_token.trim().is_empty() {
            return Err(SproutError::Config("api_token is required".to_string()));
        }
        ensure_trailing_slash(&mut config.base_url);

        let config = Arc::new(config);
        let http = HttpTransport::new(config.clone())?;

        Ok(Self { config, http })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Pick the customer a call applies to.
    ///
    /// An explicit, non-blank id wins; otherwise the configured default is
    /// used.
    pub fn resolve_customer_id(&self, explicit: Option<&str>) -> SproutResult<String> {
        explicit
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .or_else(|| self.config.customer_id.as_deref())
            .map(str::to_string)
            .ok_or_else(|| {
                SproutError::InvalidInput(
                    "customer_id is required: pass it explicitly or set SPROUT_CUSTOMER_ID"
                        .to_string(),
                )
            })
    }

    /// Get the metadata API.
    pub fn metadata(&self) -> MetadataApi<'_> {
        MetadataApi::new(self)
    }

    /// Get the analytics API.
    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    /// Get the messages API.
    pub fn messages(&self) -> MessagesApi<'_> {
        MessagesApi::new(self)
    }

    /// Get the listening API.
    pub fn listening(&self) -> ListeningApi<'_> {
        ListeningApi::new(self)
    }

    /// Get the publishing API.
    pub fn publishing(&self) -> PublishingApi<'_> {
        PublishingApi::new(self)
    }
}

impl std::fmt::Debug for SproutClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SproutClient")
            .field("config", &self.config)
            .finish()
    }
}

/// Builder for creating a SproutClient.
pub struct SproutClientBuilder {
    base_url: Option<String>,
    api_token: Option<String>,
    customer_id: Option<String>,
    timeout: Duration,
    user_agent: Option<String>,
}

impl SproutClientBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            base_url: None,
            api_token: None,
            customer_id: None,
            timeout: DEFAULT_TIMEOUT,
            user_agent: None,
        }
    }

    /// Override the API base URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the API token used for bearer authentication.
    pub fn api_token(mut self, token: impl Into<String>) -> Self {
        self.api_token = Some(token.into());
        self
    }

    /// Set the default customer ID.
    pub fn customer_id(mut self, id: impl Into<String>) -> Self {
        let id = id.into();
        self.customer_id = if id.trim().is_empty() {
            None
        } else {
            Some(id.trim().to_string())
        };
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build the client.
    pub fn build(self) -> SproutResult<SproutClient> {
        let api_token = self
            .api_token
            .ok_or_else(|| SproutError::Config("api_token is required".to_string()))?;

        let base_url = match self.base_url {
            Some(url) => Url::parse(&url)?,
            None => default_base_url(),
        };

        if self.timeout.is_zero() {
            return Err(SproutError::Config("timeout must be greater than zero".to_string()));
        }

        let config = ClientConfig {
            base_url,
            api_token,
            customer_id: self.customer_id,
            timeout: self.timeout,
            user_agent: self.user_agent.unwrap_or_else(default_user_agent),
        };

        SproutClient::from_config(config)
    }
}

impl Default for SproutClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
