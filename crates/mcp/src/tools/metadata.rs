// Metadata tools: customers, profiles, tags, groups, users, teams, topics

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{
    customer_id_property, de_opt_id, into_tool_result, json_schema_object, parse_args, Tool,
};
use anyhow::Result;
use serde::Deserialize;
use sprout_sdk::{CustomerMetadata, SproutClient, SproutResult};

/// Tool to list the customers reachable with the configured token
pub struct ListCustomersTool {
    client: SproutClient,
}

impl ListCustomersTool {
    pub const NAME: &'static str = "list_customers";

    pub fn new(client: SproutClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl Tool for ListCustomersTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: Self::NAME.to_string(),
            description: "List all customers/accounts accessible with the current API token. \
                          Returns the customer IDs and names needed by the other tools."
                .to_string(),
            input_schema: json_schema_object(serde_json::json!({}), vec![]),
            annotations: None,
        }
    }

    async fn execute(&self, _arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(Self::NAME, self.client.metadata().client().await)
    }
}

#[derive(Debug, Default, Deserialize)]
struct CustomerArgs {
    #[serde(default, deserialize_with = "de_opt_id")]
    customer_id: Option<String>,
}

/// Tool listing one per-customer metadata collection
pub struct CustomerMetadataTool {
    client: SproutClient,
    collection: CustomerMetadata,
}

impl CustomerMetadataTool {
    pub fn new(client: SproutClient, collection: CustomerMetadata) -> Self {
        Self { client, collection }
    }

    pub fn name(&self) -> &'static str {
        match self.collection {
            CustomerMetadata::Profiles => "list_profiles",
            CustomerMetadata::Tags => "list_tags",
            CustomerMetadata::Groups => "list_groups",
            CustomerMetadata::Users => "list_users",
            CustomerMetadata::Teams => "list_teams",
            CustomerMetadata::ListeningTopics => "list_listening_topics",
        }
    }

    fn description(&self) -> &'static str {
        match self.collection {
            CustomerMetadata::Profiles => {
                "List all social profiles for a customer, with the profile IDs used by \
                 analytics, messages and publishing tools."
            }
            CustomerMetadata::Tags => "List all message tags for a customer.",
            CustomerMetadata::Groups => "List all profile groups for a customer.",
            CustomerMetadata::Users => "List all active users for a customer.",
            CustomerMetadata::Teams => "List all teams for a customer.",
            CustomerMetadata::ListeningTopics => {
                "List the listening topics configured for a customer. Topic IDs feed \
                 get_listening_messages."
            }
        }
    }

    async fn call(&self, arguments: serde_json::Value) -> SproutResult<serde_json::Value> {
        let args: CustomerArgs = parse_args(self.name(), arguments)?;
        let customer_id = self.client.resolve_customer_id(args.customer_id.as_deref())?;

        self.client
            .metadata()
            .customer(&customer_id, self.collection)
            .await
    }
}

#[async_trait::async_trait]
impl Tool for CustomerMetadataTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "customer_id": customer_id_property()
                }),
                vec![],
            ),
            annotations: None,
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        into_tool_result(self.name(), self.call(arguments).await)
    }
}
