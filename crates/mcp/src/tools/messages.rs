// Inbox message search

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    customer_id_property, de_opt_id, into_tool_result, json_schema_enum, json_schema_id_list,
    json_schema_integer, json_schema_object, json_schema_string, non_empty, parse_args, positive,
    require, Tool,
};
use anyhow::Result;
use serde::Deserialize;
use sprout_sdk::{IdList, MessagesRequest, PostDirection, SproutClient, SproutResult};

const DEFAULT_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct MessagesArgs {
    #[serde(alias = "profile_id")]
    profile_ids: IdList,
    #[serde(alias = "start")]
    start_time: String,
    #[serde(alias = "end")]
    end_time: String,
    #[serde(default)]
    post_type: Option<String>,
    #[serde(default)]
    tag_ids: Option<IdList>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page_cursor: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool to search inbound and outbound messages
pub struct MessagesTool {
    client: SproutClient,
}

impl MessagesTool {
    pub const NAME: &'static str = "get_messages";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: MessagesArgs = parse_args(Self::NAME, arguments)?;

        require("start_time", &args.start_time)?;
        require("end_time", &args.end_time)?;
        let limit = positive("limit", args.limit.unwrap_or(DEFAULT_LIMIT))?;

        let mut request = MessagesRequest::new(
            &args.profile_ids,
            args.start_time.trim(),
            args.end_time.trim(),
            limit,
        )?;
        if let Some(post_type) = non_empty(args.post_type) {
            request = request.direction(post_type.parse::<PostDirection>()?);
        }
        if let Some(tag_ids) = args.tag_ids {
            request = request.tags(&tag_ids);
        }
        if let Some(cursor) = non_empty(args.page_cursor) {
            request = request.page_cursor(cursor);
        }

        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client.messages().list(&customer_id, &request).await
    }
}

#[async_trait::async_trait]
impl Tool for MessagesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get inbox messages (comments, mentions, DMs, replies) for the given \
                          profiles in a time range. Use the returned paging cursor to fetch \
                          the next page."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "profile_ids": json_schema_id_list("Comma-separated Sprout profile IDs (or an array of IDs)."),
                    "start_time": json_schema_string("Start of range, ISO 8601 (e.g. '2024-01-01T00:00:00')."),
                    "end_time": json_schema_string("End of range, ISO 8601 (e.g. '2024-01-31T23:59:59')."),
                    "post_type": json_schema_enum(
                        &["INBOUND", "OUTBOUND"],
                        "Only inbound (received) or outbound (sent) messages.",
                    ),
                    "tag_ids": json_schema_id_list("Comma-separated tag IDs; messages with any of them match."),
                    "limit": json_schema_integer("Number of messages to return (default 50).", 1),
                    "page_cursor": json_schema_string("Cursor from a previous response for the next page."),
                    "customer_id": customer_id_property()
                }),
                vec!["profile_ids", "start_time", "end_time"],
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
    async fn test_filters_and_cursor_in_body() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/123/messages"))
            .and(body_json(json!({
                "filters": [
                    "customer_profile_id.eq(1,2)",
                    "created_time.in(2024-01-01T00:00:00..2024-01-31T23:59:59)",
                    "post_type.eq(INBOUND)",
                    "tag_id.eq(5)"
                ],
                "limit": 10,
                "page_cursor": "abc"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": [], "paging": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &client_for(&server),
            "get_messages",
            json!({
                "profile_ids": "1,2",
                "start_time": "2024-01-01T00:00:00",
                "end_time": "2024-01-31T23:59:59",
                "post_type": "inbound",
                "tag_ids": [5],
                "limit": 10,
                "page_cursor": "abc"
            }),
        )
        .await;

        assert!(!result.is_error(), "{:?}", result);
    }

    #[tokio::test]
    async fn test_blank_optionals_are_ignored() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v1/123/messages"))
            .and(body_json(json!({
                "filters": [
                    "customer_profile_id.eq(1)",
                    "created_time.in(a..b)"
                ],
                "limit": 50
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = call(
            &client_for(&server),
            "get_messages",
            json!({
                "profile_ids": "1",
                "start_time": "a",
                "end_time": "b",
                "post_type": "",
                "tag_ids": "",
                "page_cursor": " "
            }),
        )
        .await;

        assert!(!result.is_error(), "{:?}", result);
    }

    #[tokio::test]
    async fn test_unknown_post_type_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = call(
            &client_for(&server),
            "get_messages",
            json!({"profile_ids": "1", "start_time": "a", "end_time": "b", "post_type": "SIDEWAYS"}),
        )
        .await;
        let record = error_record(&result);

        assert_eq!(record.kind, ErrorKind::InvalidArguments);
        assert!(record.message.contains("post_type"));
    }
}
