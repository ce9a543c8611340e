//! Listening API endpoints.

use crate::api::{customer_path, path_segment};
use crate::client::SproutClient;
use crate::error::SproutResult;
use crate::types::Filter;
use serde::Serialize;

/// Body of a listening topic message query.
#[derive(Debug, Clone, Serialize)]
pub struct ListeningMessagesRequest {
    pub filters: Vec<Filter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl ListeningMessagesRequest {
    pub fn new(start_time: &str, end_time: &str, limit: u32) -> Self {
        Self {
            filters: vec![Filter::between("created_time", start_time, end_time)],
            fields: None,
            limit,
            page: None,
        }
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    pub fn fields(mut self, fields: Vec<String>) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Listening API for messages matched by listening topics.
///
/// Topics themselves are listed through [`crate::api::MetadataApi::customer`].
pub struct ListeningApi<'a> {
    client: &'a SproutClient,
}

impl<'a> ListeningApi<'a> {
    pub(crate) fn new(client: &'a SproutClient) -> Self {
        Self { client }
    }

    /// Messages matched by a listening topic.
    pub async fn messages(
        &self,
        customer_id: &str,
        topic_id: &str,
        request: &ListeningMessagesRequest,
    ) -> SproutResult<serde_json::Value> {
        let topic_id = path_segment("topic_id", topic_id)?;
        let path = customer_path(
            customer_id,
            &format!("/listening/topics/{}/messages", topic_id),
        )?;
        self.client.http.post(&path, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SproutError;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_request_body() {
        let request = ListeningMessagesRequest::new("s", "e", 20)
            .page(2)
            .fields(vec!["text".to_string()]);

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "filters": ["created_time.in(s..e)"],
                "fields": ["text"],
                "limit": 20,
                "page": 2
            })
        );
    }

    #[tokio::test]
    async fn test_messages_endpoint() {
        let server = MockServer::start().await;
        let request = ListeningMessagesRequest::new("s", "e", 50);

        Mock::given(method("POST"))
            .and(path("/v1/3/listening/topics/t-1/messages"))
            .and(body_json(json!({"filters": ["created_time.in(s..e)"], "limit": 50})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"id": 1}]})))
            .mount(&server)
            .await;

        let client = SproutClient::builder()
            .base_url(server.uri())
            .api_token("tok")
            .build()
            .unwrap();

        let result = client
            .listening()
            .messages("3", "t-1", &request)
            .await
            .unwrap();
        assert_eq!(result, json!({"data": [{"id": 1}]}));
    }

    #[tokio::test]
    async fn test_blank_topic_rejected() {
        let client = SproutClient::builder().api_token("tok").build().unwrap();
        let request = ListeningMessagesRequest::new("s", "e", 50);

        let result = client.listening().messages("3", " ", &request).await;
        assert!(matches!(result, Err(SproutError::InvalidInput(_))));
    }
}
