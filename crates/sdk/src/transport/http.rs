//! HTTP transport layer for the Sprout SDK.

use crate::config::ClientConfig;
use crate::error::{SproutError, SproutResult};
use reqwest::{header, Client, Method, RequestBuilder};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP transport for making API requests.
///
/// One attempt per call: failures are reported immediately as a
/// [`SproutError`] tagged with the method and endpoint.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: Arc<ClientConfig>,
}

impl HttpTransport {
    /// Create a new HTTP transport with the given configuration.
    pub fn new(config: Arc<ClientConfig>) -> SproutResult<Self> {
        let mut headers = header::HeaderMap::new();

        let mut auth = header::HeaderValue::from_str(&format!("Bearer {}", config.api_token))
            .map_err(|_| SproutError::Config("Invalid API token format".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .build()
            .map_err(|e| SproutError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client, config })
    }

    /// Build a URL for the given path, relative to the base URL's path.
    fn build_url(&self, path: &str) -> SproutResult<url::Url> {
        self.config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(SproutError::InvalidUrl)
    }

    /// Send a request and parse its body as JSON.
    async fn execute(
        &self,
        method: Method,
        path: &str,
        request: RequestBuilder,
    ) -> SproutResult<serde_json::Value> {
        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                let err = SproutError::from_reqwest(e, method.as_str(), path);
                warn!(method = %method, endpoint = path, error = %err, "Request failed");
                return Err(err);
            }
        };

        let status = response.status();

        // Reading the body can time out as well.
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                let err = SproutError::from_reqwest(e, method.as_str(), path);
                warn!(method = %method, endpoint = path, error = %err, "Failed to read response body");
                return Err(err);
            }
        };

        if !status.is_success() {
            warn!(
                method = %method,
                endpoint = path,
                status = status.as_u16(),
                "API returned error status"
            );
            return Err(SproutError::from_response(
                status.as_u16(),
                method.as_str(),
                path,
                &body,
            ));
        }

        if body.trim().is_empty() {
            return Ok(serde_json::Value::Null);
        }

        serde_json::from_str(&body).map_err(|e| {
            warn!(method = %method, endpoint = path, error = %e, "Response is not valid JSON");
            SproutError::from_decode(e, status.as_u16(), method.as_str(), path, &body)
        })
    }

    /// Execute a GET request.
    pub async fn get(&self, path: &str) -> SproutResult<serde_json::Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request");

        self.execute(Method::GET, path, self.client.get(url)).await
    }

    /// Execute a GET request with query parameters.
    pub async fn get_with_query<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> SproutResult<serde_json::Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "GET request with query");

        self.execute(Method::GET, path, self.client.get(url).query(query))
            .await
    }

    /// Execute a POST request with a JSON body.
    pub async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> SproutResult<serde_json::Value> {
        let url = self.build_url(path)?;
        debug!(url = %url, "POST request");

        self.execute(Method::POST, path, self.client.post(url).json(body))
            .await
    }
}
