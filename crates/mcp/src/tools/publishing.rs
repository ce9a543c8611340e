// Publishing tools: list, create and fetch posts

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    customer_id_property, de_id, de_opt_id, into_tool_result, json_schema_array,
    json_schema_id_list, json_schema_integer, json_schema_object, json_schema_string, non_empty,
    parse_args, positive, Tool,
};
use anyhow::Result;
use serde::Deserialize;
use sprout_sdk::{CreatePostRequest, IdList, MediaRef, PostListQuery, SproutClient, SproutResult};

#[derive(Debug, Deserialize)]
struct ListPostsArgs {
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page_cursor: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool to list drafts, scheduled and published posts
pub struct ListPublishingPostsTool {
    client: SproutClient,
}

impl ListPublishingPostsTool {
    pub const NAME: &'static str = "list_publishing_posts";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: ListPostsArgs = parse_args(Self::NAME, arguments)?;

        let query = PostListQuery {
            limit: args.limit.map(|l| positive("limit", l)).transpose()?,
            page_cursor: non_empty(args.page_cursor),
        };
        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client.publishing().list(&customer_id, &query).await
    }
}

#[async_trait::async_trait]
impl Tool for ListPublishingPostsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "List publishing posts (drafts, scheduled and sent) for a customer."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "limit": json_schema_integer("Number of posts to return.", 1),
                    "page_cursor": json_schema_string("Cursor from a previous response for the next page."),
                    "customer_id": customer_id_property()
                }),
                vec![],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}

#[derive(Debug, Deserialize)]
struct CreatePostArgs {
    #[serde(alias = "profile_id")]
    profile_ids: IdList,
    text: String,
    #[serde(default)]
    scheduled_send_time: Option<String>,
    #[serde(default)]
    media: Option<Vec<MediaRef>>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool to create a draft or scheduled post
pub struct CreatePostTool {
    client: SproutClient,
}

impl CreatePostTool {
    pub const NAME: &'static str = "create_post";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: CreatePostArgs = parse_args(Self::NAME, arguments)?;

        let mut request = CreatePostRequest::new(args.profile_ids, args.text)?;
        if let Some(send_time) = non_empty(args.scheduled_send_time) {
            request = request.scheduled_at(send_time);
        }
        if let Some(media) = args.media.filter(|m| !m.is_empty()) {
            request = request.media(media)?;
        }

        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        tracing::info!(
            customer_id = %customer_id,
            profiles = request.profile_ids.len(),
            scheduled = request.scheduled_send_time.is_some(),
            "Creating post"
        );
        self.client.publishing().create(&customer_id, &request).await
    }
}

#[async_trait::async_trait]
impl Tool for CreatePostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Create a draft or scheduled outbound post. Without scheduled_send_time \
                          the post is saved as a draft."
                .to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "profile_ids": json_schema_id_list("Comma-separated Sprout profile IDs to post to."),
                    "text": json_schema_string("Post text."),
                    "scheduled_send_time": json_schema_string("ISO 8601 send time, e.g. '2024-05-01T09:00:00Z'. Omit to save a draft."),
                    "media": json_schema_array(
                        serde_json::json!({
                            "type": "object",
                            "properties": {
                                "media_id": {"type": "string"},
                                "media_type": {"type": "string", "description": "e.g. PHOTO or VIDEO"}
                            },
                            "required": ["media_id", "media_type"]
                        }),
                        "Media already uploaded to Sprout.",
                    ),
                    "customer_id": customer_id_property()
                }),
                vec!["profile_ids", "text"],
            ),
            annotations: None,
        }
    }

    fn read_only(&self) -> bool {
        false
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}

#[derive(Debug, Deserialize)]
struct GetPostArgs {
    #[serde(deserialize_with = "de_id")]
    post_id: String,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool to fetch a single publishing post
pub struct GetPublishingPostTool {
    client: SproutClient,
}

impl GetPublishingPostTool {
    pub const NAME: &'static str = "get_publishing_post";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: GetPostArgs = parse_args(Self::NAME, arguments)?;
        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client
            .publishing()
            .get(&customer_id, &args.post_id)
            .await
    }
}

#[async_trait::async_trait]
impl Tool for GetPublishingPostTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get a single publishing post by ID.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "post_id": json_schema_string("Publishing post ID."),
                    "customer_id": customer_id_property()
                }),
                vec!["post_id"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}
