// Analytics tools: profile and post metrics over a date range

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    customer_id_property, de_opt_id, into_tool_result, json_schema_id_list, json_schema_integer,
    json_schema_object, json_schema_string, non_empty, parse_args, positive, require, Tool,
};
use anyhow::Result;
use serde::Deserialize;
use sprout_sdk::{reporting_date, AnalyticsRequest, IdList, SproutClient, SproutResult};

const DEFAULT_PROFILE_METRICS: &str = "impressions,engagements,net_follower_growth";
const DEFAULT_POST_METRICS: &str = "impressions,engagements,clicks";
const DEFAULT_TIMEZONE: &str = "UTC";
const DEFAULT_POST_LIMIT: u32 = 50;

#[derive(Debug, Deserialize)]
struct ProfileAnalyticsArgs {
    #[serde(alias = "profile_id")]
    profile_ids: IdList,
    #[serde(alias = "start")]
    start_time: String,
    #[serde(alias = "end")]
    end_time: String,
    #[serde(default)]
    metrics: Option<IdList>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PostAnalyticsArgs {
    #[serde(alias = "profile_id")]
    profile_ids: IdList,
    #[serde(alias = "start")]
    start_time: String,
    #[serde(alias = "end")]
    end_time: String,
    #[serde(default)]
    metrics: Option<IdList>,
    #[serde(default)]
    timezone: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(default)]
    page: Option<u32>,
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

fn metrics_or(metrics: Option<IdList>, default: &str) -> IdList {
    metrics
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| IdList::parse(default))
}

fn range_properties(metrics_hint: &str) -> serde_json::Value {
    serde_json::json!({
        "profile_ids": json_schema_id_list("Comma-separated Sprout profile IDs (or an array of IDs)."),
        "start_time": json_schema_string("Start of period, ISO 8601 (e.g. '2024-01-01' or '2024-01-01T00:00:00')."),
        "end_time": json_schema_string("End of period, ISO 8601 (e.g. '2024-01-31' or '2024-01-31T23:59:59')."),
        "metrics": json_schema_id_list(metrics_hint),
        "timezone": json_schema_string("Timezone for the report, e.g. 'America/Chicago'. Default: UTC."),
        "customer_id": customer_id_property()
    })
}

/// Tool to fetch metrics aggregated per social profile
pub struct ProfileAnalyticsTool {
    client: SproutClient,
}

impl ProfileAnalyticsTool {
    pub const NAME: &'static str = "get_profile_analytics";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: ProfileAnalyticsArgs = parse_args(Self::NAME, arguments)?;

        // The profile report works on whole days.
        let start = reporting_date(&args.start_time)?;
        let end = reporting_date(&args.end_time)?;
        let metrics = metrics_or(args.metrics, DEFAULT_PROFILE_METRICS);
        let timezone = non_empty(args.timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());

        let request = AnalyticsRequest::profiles(&args.profile_ids, start, end, &metrics, &timezone)?;
        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client.analytics().profiles(&customer_id, &request).await
    }
}

#[async_trait::async_trait]
impl Tool for ProfileAnalyticsTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get analytics metrics aggregated by social profile over a reporting \
                          period. Only the date part of start_time/end_time is used."
                .to_string(),
            input_schema: json_schema_object(
                range_properties(
                    "Comma-separated metric names. Default: impressions,engagements,net_follower_growth. \
                     Others include engagement_rate, video_views, reactions, comments, shares, clicks.",
                ),
                vec!["profile_ids", "start_time", "end_time"],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}

/// Tool to fetch metrics for individual posts
pub struct PostAnalyticsTool {
    client: SproutClient,
}

impl PostAnalyticsTool {
    pub const NAME: &'static str = "get_post_analytics";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: PostAnalyticsArgs = parse_args(Self::NAME, arguments)?;

        require("start_time", &args.start_time)?;
        require("end_time", &args.end_time)?;
        let metrics = metrics_or(args.metrics, DEFAULT_POST_METRICS);
        let timezone = non_empty(args.timezone).unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let limit = positive("limit", args.limit.unwrap_or(DEFAULT_POST_LIMIT))?;

        let mut request = AnalyticsRequest::posts(
            &args.profile_ids,
            args.start_time.trim(),
            args.end_time.trim(),
            &metrics,
            &timezone,
        )?
        .limit(limit);
        if let Some(page) = args.page {
            request = request.page(positive("page", page)?);
        }

        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client.analytics().posts(&customer_id, &request).await
    }
}

#[async_trait::async_trait]
impl Tool for PostAnalyticsTool {
    fn schema(&self) -> ToolSchema {
        let mut properties = range_properties(
            "Comma-separated metric names. Default: impressions,engagements,clicks. \
             Others include reactions, comments, shares, video_views.",
        );
        properties["limit"] = json_schema_integer("Number of posts to return (default 50, max 100).", 1);
        properties["page"] = json_schema_integer("Page number of the result set, starting at 1.", 1);

        ToolSchema {
            name: Self::NAME.to_string(),
            description: "Get analytics metrics for individual posts published in a time range."
                .to_string(),
            input_schema: json_schema_object(properties, vec!["profile_ids", "start_time", "end_time"]),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.call(arguments).await)
    }
}
