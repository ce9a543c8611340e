// Sprout tools exposed over MCP
//
// Each tool deserializes typed arguments, validates them before any
// request is made, calls the SDK and hands the upstream payload back
// unchanged. Every failure is returned as an `ErrorRecord` result.

pub mod analytics;
pub mod listening;
pub mod messages;
pub mod metadata;
pub mod publishing;
mod registry;

#[cfg(test)]
pub(crate) mod test_support;

pub use analytics::{PostAnalyticsTool, ProfileAnalyticsTool};
pub use listening::ListeningMessagesTool;
pub use messages::MessagesTool;
pub use metadata::{CustomerMetadataTool, ListCustomersTool};
pub use publishing::{CreatePostTool, GetPublishingPostTool, ListPublishingPostsTool};
pub use registry::{
    json_schema_array, json_schema_enum, json_schema_id_list, json_schema_integer,
    json_schema_object, json_schema_string, Tool, ToolRegistry,
};

use crate::protocol::CallToolResult;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use sprout_sdk::{CustomerMetadata, SproutClient, SproutError, SproutResult};
use std::sync::Arc;

/// Register every Sprout tool against one shared client.
pub fn register_all(registry: &mut ToolRegistry, client: &SproutClient) {
    registry.register(Arc::new(ListCustomersTool::new(client.clone())));
    for collection in CustomerMetadata::ALL {
        registry.register(Arc::new(CustomerMetadataTool::new(client.clone(), collection)));
    }

    registry.register(Arc::new(ProfileAnalyticsTool::new(client.clone())));
    registry.register(Arc::new(PostAnalyticsTool::new(client.clone())));

    registry.register(Arc::new(MessagesTool::new(client.clone())));
    registry.register(Arc::new(ListeningMessagesTool::new(client.clone())));

    registry.register(Arc::new(ListPublishingPostsTool::new(client.clone())));
    registry.register(Arc::new(CreatePostTool::new(client.clone())));
    registry.register(Arc::new(GetPublishingPostTool::new(client.clone())));
}

/// Registry holding every Sprout tool.
pub fn sprout_registry(client: &SproutClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();
    register_all(&mut registry, client);
    registry
}

/// Deserialize tool arguments, treating a missing object as empty.
pub(crate) fn parse_args<T: DeserializeOwned>(
    tool: &str,
    arguments: serde_json::Value,
) -> SproutResult<T> {
    let arguments = if arguments.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        arguments
    };

    serde_json::from_value(arguments)
        .map_err(|e| SproutError::InvalidInput(format!("Invalid arguments for {}: {}", tool, e)))
}

/// Turn an SDK outcome into the tool result returned to the caller.
pub(crate) fn into_tool_result(
    tool: &str,
    result: SproutResult<serde_json::Value>,
) -> anyhow::Result<CallToolResult> {
    match result {
        Ok(payload) => Ok(CallToolResult::json(payload)?),
        Err(e) => {
            let record = e.to_record();
            tracing::warn!(
                tool,
                status = record.status,
                kind = ?record.kind,
                endpoint = ?record.endpoint,
                "Tool call failed"
            );
            Ok(CallToolResult::json_error(serde_json::to_value(&record)?)?)
        }
    }
}

/// Drop blank strings; optional string arguments arrive as `""` from some clients.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub(crate) fn require(name: &str, value: &str) -> SproutResult<()> {
    if value.trim().is_empty() {
        return Err(SproutError::InvalidInput(format!("{} is required", name)));
    }
    Ok(())
}

pub(crate) fn positive(name: &str, value: u32) -> SproutResult<u32> {
    if value == 0 {
        return Err(SproutError::InvalidInput(format!(
            "{} must be greater than zero",
            name
        )));
    }
    Ok(value)
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(u64),
}

impl From<RawId> for String {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        }
    }
}

/// Identifier given either as a string or a bare number.
pub(crate) fn de_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(RawId::deserialize(deserializer)?.into())
}

pub(crate) fn de_opt_id<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<RawId>::deserialize(deserializer)?.map(String::from))
}

pub(crate) fn customer_id_property() -> serde_json::Value {
    json_schema_string("Sprout customer ID. Defaults to the configured SPROUT_CUSTOMER_ID.")
}
