// Social listening message search

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    customer_id_property, de_id, de_opt_id, into_tool_result, json_schema_id_list,
    json_schema_integer, json_schema_object, json_schema_string, parse_args, positive, require,
    Tool,
};
use anyhow::Result;
use serde::Deserialize;
use sprout_sdk::{IdList, ListeningMessagesRequest, SproutClient, SproutResult};

const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct ListeningArgs {
    #[serde(deserialize_with = "de_id")]
    topic_id: String,
    #[serde(alias = "start")]
    start_time: String,
    #[serde(alias = "end")]
    end_time: String,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default)]
    fields: Option<IdList>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool to fetch messages matched by a listening topic
pub struct ListeningMessagesTool {
    client: SproutClient,
}

impl ListeningMessagesTool {
    pub const NAME: &'static str = "get_listening_messages";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: ListeningArgs = parse_args(Self::NAME, arguments)?;

        require("topic_id", &args.topic_id)?;
        require("start_time", &args.start_time)?;
        require("end_time", &args.end_time)?;
        let limit = positive("limit", args.limit.unwrap_or(DEFAULT_LIMIT))?;

        let mut request =
            ListeningMessagesRequest::new(args.start_time.trim(), args.end_time.trim(), limit);
        if let Some(page) = args.page {
            request = request.page(positive("page", page)?);
        }
        if let Some(fields) = args.fields.filter(|f| !f.is_empty()) {
            request = request.fields(fields.into_vec());
        }

        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client
            .listening()
            .messages(&customer_id, args.topic_id.trim(), &request)
            .await
    }
}

#[async_trait::async_trait]
impl Tool for ListeningMessagesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get public messages matched by a listening topic in a time range. \
                          Topic IDs come from list_listening_topics."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "topic_id": json_schema_string("Listening topic ID."),
                    "start_time": json_schema_string("Start of range, ISO 8601 (e.g. '2024-01-01T00:00:00')."),
                    "end_time": json_schema_string("End of range, ISO 8601 (e.g. '2024-01-31T23:59:59')."),
                    "limit": json_schema_integer("Number of messages to return (default 50).", 1),
                    "page": json_schema_integer("Page number of the result set, starting at 1.", 1),
                    "fields": json_schema_id_list("Comma-separated message fields to return, e.g. 'text,created_time,network'."),
                    "customer_id": customer_id_property()
                }),
                vec!["topic_id", "start_time", "end_time"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}

#[cfg(test)]
mod tests {
    use crate::tools::test_support::*;
    use serde_json::json;
    use sprout_sdk::ErrorKind;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_numeric_topic_and_fields() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/123/listening/topics/42/messages"))
            .and(body_json(json!({
                "filters": ["created_time.in(2024-01-01T00:00:00..2024-01-02T00:00:00)"],
                "fields": ["text", "network"],
                "limit": 25,
                "page": 3
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [{"text": "hi"}]})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &client_for(&server),
            "get_listening_messages",
            json!({
                "topic_id": 42,
                "start_time": "2024-01-01T00:00:00",
                "end_time": "2024-01-02T00:00:00",
                "limit": 25,
                "page": 3,
                "fields": "text, network"
            }),
        )
        .await;

        assert_eq!(result_json(&result), json!({"data": [{"text": "hi"}]}));
    }

    #[tokio::test]
    async fn test_topic_id_must_be_a_path_segment() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = client_for(&server);
        for topic in ["", "../admin", "a/b"] {
            let result = call(
                &client,
                "get_listening_messages",
                json!({"topic_id": topic, "start_time": "a", "end_time": "b"}),
            )
            .await;
            assert_eq!(error_record(&result).kind, ErrorKind::InvalidArguments, "{}", topic);
        }
    }
}
