//! Error types for the Sprout SDK.
//!
//! Every failure a request can run into ends up as a [`SproutError`], and
//! every `SproutError` can be flattened into an [`ErrorRecord`]: the JSON
//! object tool callers receive instead of a raw fault.

use serde::{Deserialize, Serialize};

/// Result type for SDK operations.
pub type SproutResult<T> = Result<T, SproutError>;

/// Status reported in an [`ErrorRecord`] when no HTTP response was received.
pub const NO_HTTP_STATUS: u16 = 0;

/// Longest unparseable response body kept on a decode error, in bytes.
pub const MAX_DECODE_BODY: usize = 4096;

/// Error types that can occur when using the Sprout SDK.
#[derive(Debug, thiserror::Error)]
pub enum SproutError {
    /// API returned a non-success status.
    #[error("API error (status {status}) from {method} {endpoint}")]
    Api {
        status: u16,
        method: String,
        endpoint: String,
        body: serde_json::Value,
    },

    /// Request did not complete within the configured timeout.
    #[error("Request to {method} {endpoint} timed out")]
    Timeout { method: String, endpoint: String },

    /// Connection or other network-level failure.
    #[error("Transport error for {method} {endpoint}: {message}")]
    Transport {
        method: String,
        endpoint: String,
        message: String,
    },

    /// Successful status but the body is not valid JSON.
    #[error("Invalid JSON in response from {method} {endpoint}: {message}")]
    Decode {
        status: u16,
        method: String,
        endpoint: String,
        message: String,
        /// Raw response text, cut to [`MAX_DECODE_BODY`] bytes.
        body: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error outside a request.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Invalid input, rejected before any request is made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl SproutError {
    /// Build an API error from a status code and raw response body.
    pub fn from_response(status: u16, method: &str, endpoint: &str, body: &str) -> Self {
        Self::Api {
            status,
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            body: parse_body(body),
        }
    }

    /// Build a decode error, keeping the start of the body that failed to parse.
    pub(crate) fn from_decode(
        err: serde_json::Error,
        status: u16,
        method: &str,
        endpoint: &str,
        body: &str,
    ) -> Self {
        Self::Decode {
            status,
            method: method.to_string(),
            endpoint: endpoint.to_string(),
            message: err.to_string(),
            body: truncate(body, MAX_DECODE_BODY).to_string(),
        }
    }

    /// Classify a reqwest failure for the given request.
    pub(crate) fn from_reqwest(err: reqwest::Error, method: &str, endpoint: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
            }
        } else {
            Self::Transport {
                method: method.to_string(),
                endpoint: endpoint.to_string(),
                message: err.to_string(),
            }
        }
    }

    /// HTTP status, or [`NO_HTTP_STATUS`] when none was received.
    pub fn status(&self) -> u16 {
        match self {
            Self::Api { status, .. } | Self::Decode { status, .. } => *status,
            _ => NO_HTTP_STATUS,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Api { status, .. } => match *status {
                401 | 403 => ErrorKind::Authentication,
                429 => ErrorKind::RateLimited,
                400..=499 => ErrorKind::Validation,
                _ => ErrorKind::Upstream,
            },
            Self::Timeout { .. } => ErrorKind::Timeout,
            Self::Transport { .. } => ErrorKind::Transport,
            Self::Decode { .. } | Self::Json(_) => ErrorKind::Decode,
            Self::InvalidInput(_) => ErrorKind::InvalidArguments,
            Self::Config(_) | Self::InvalidUrl(_) => ErrorKind::Configuration,
        }
    }

    /// Endpoint path the failing request was sent to, if one was sent.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            Self::Api { endpoint, .. }
            | Self::Timeout { endpoint, .. }
            | Self::Transport { endpoint, .. }
            | Self::Decode { endpoint, .. } => Some(endpoint),
            _ => None,
        }
    }

    fn method(&self) -> Option<&str> {
        match self {
            Self::Api { method, .. }
            | Self::Timeout { method, .. }
            | Self::Transport { method, .. }
            | Self::Decode { method, .. } => Some(method),
            _ => None,
        }
    }

    /// Check whether the upstream timed out.
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }

    /// Flatten into the record returned to tool callers.
    pub fn to_record(&self) -> ErrorRecord {
        let body = match self {
            Self::Api { body, .. } => body.clone(),
            Self::Decode { body, .. } => serde_json::Value::String(body.clone()),
            _ => serde_json::Value::Null,
        };

        ErrorRecord {
            status: self.status(),
            endpoint: self.endpoint().map(str::to_string),
            method: self.method().map(str::to_string),
            kind: self.kind(),
            message: self.to_string(),
            body,
        }
    }
}

/// Failure category carried by an [`ErrorRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 401 or 403: bad or missing credential.
    Authentication,
    RateLimited,
    /// Other 4xx: upstream rejected the arguments.
    Validation,
    /// 5xx.
    Upstream,
    Timeout,
    Transport,
    Decode,
    /// Rejected locally before any request.
    InvalidArguments,
    Configuration,
}

/// Uniform failure description returned in place of a tool payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorRecord {
    /// HTTP status, or 0 for failures without a response.
    pub status: u16,
    /// Path of the request that failed; `None` when nothing was sent.
    pub endpoint: Option<String>,
    pub method: Option<String>,
    pub kind: ErrorKind,
    pub message: String,
    /// Upstream body: JSON when it parsed, the raw text otherwise.
    pub body: serde_json::Value,
}

fn parse_body(body: &str) -> serde_json::Value {
    if body.trim().is_empty() {
        return serde_json::Value::Null;
    }
    serde_json::from_str(body).unwrap_or_else(|_| serde_json::Value::String(body.to_string()))
}

fn truncate(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_response_keeps_json_body() {
        let err = SproutError::from_response(
            400,
            "POST",
            "/v1/1/messages",
            r#"{"error":"bad filter"}"#,
        );
        let record = err.to_record();

        assert_eq!(record.status, 400);
        assert_eq!(record.endpoint.as_deref(), Some("/v1/1/messages"));
        assert_eq!(record.method.as_deref(), Some("POST"));
        assert_eq!(record.kind, ErrorKind::Validation);
        assert_eq!(record.body, json!({"error": "bad filter"}));
    }

    #[test]
    fn test_from_response_keeps_text_body() {
        let err = SproutError::from_response(502, "GET", "/v1/metadata/client", "Bad Gateway");

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(err.to_record().body, json!("Bad Gateway"));
    }

    #[test]
    fn test_empty_body_is_null() {
        let err = SproutError::from_response(500, "GET", "/x", "  ");
        assert_eq!(err.to_record().body, serde_json::Value::Null);
    }

    #[test]
    fn test_status_classification() {
        let kind = |status| SproutError::from_response(status, "GET", "/x", "").kind();

        assert_eq!(kind(401), ErrorKind::Authentication);
        assert_eq!(kind(403), ErrorKind::Authentication);
        assert_eq!(kind(404), ErrorKind::Validation);
        assert_eq!(kind(422), ErrorKind::Validation);
        assert_eq!(kind(429), ErrorKind::RateLimited);
        assert_eq!(kind(500), ErrorKind::Upstream);
        assert_eq!(kind(503), ErrorKind::Upstream);
    }

    #[test]
    fn test_non_http_errors_use_sentinel_status() {
        let timeout = SproutError::Timeout {
            method: "GET".into(),
            endpoint: "/v1/metadata/client".into(),
        };
        let record = timeout.to_record();
        assert_eq!(record.status, NO_HTTP_STATUS);
        assert_eq!(record.kind, ErrorKind::Timeout);
        assert_eq!(record.endpoint.as_deref(), Some("/v1/metadata/client"));
        assert!(timeout.is_timeout());

        let invalid = SproutError::InvalidInput("text is required".into()).to_record();
        assert_eq!(invalid.status, NO_HTTP_STATUS);
        assert_eq!(invalid.kind, ErrorKind::InvalidArguments);
        assert!(invalid.endpoint.is_none());
        assert!(invalid.message.contains("text is required"));
    }

    #[test]
    fn test_record_serializes_snake_case_kind() {
        let record = SproutError::from_response(429, "GET", "/x", "").to_record();
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["kind"], "rate_limited");
        assert_eq!(value["status"], 429);
        assert_eq!(value["endpoint"], "/x");
    }

    #[test]
    fn test_decode_record_keeps_raw_body() {
        let parse_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
        let record =
            SproutError::from_decode(parse_err, 200, "GET", "/v1/metadata/client", "<html>")
                .to_record();

        assert_eq!(record.kind, ErrorKind::Decode);
        assert_eq!(record.status, 200);
        assert_eq!(record.body, json!("<html>"));
    }

    #[test]
    fn test_decode_body_is_truncated_on_char_boundary() {
        // multi-byte chars so the byte limit falls inside one
        let body = "é€".repeat(MAX_DECODE_BODY);
        let parse_err = serde_json::from_str::<serde_json::Value>(&body).unwrap_err();

        match SproutError::from_decode(parse_err, 200, "GET", "/x", &body) {
            SproutError::Decode { body: kept, .. } => {
                assert!(kept.len() <= MAX_DECODE_BODY);
                assert!(kept.len() > MAX_DECODE_BODY - 4);
                assert!(body.starts_with(&kept));
            }
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }
}
