// Shared helpers for tool tests

use crate::protocol::CallToolResult;
use crate::tools::sprout_registry;
use sprout_sdk::{ErrorRecord, SproutClient};
use std::time::Duration;
use wiremock::MockServer;

/// Client pointed at the stub, with default customer `123`.
pub(crate) fn client_for(server: &MockServer) -> SproutClient {
    client_with_timeout(server, Duration::from_secs(5))
}

pub(crate) fn client_with_timeout(server: &MockServer, timeout: Duration) -> SproutClient {
    SproutClient::builder()
        .base_url(server.uri())
        .api_token("test-token")
        .customer_id("123")
        .timeout(timeout)
        .build()
        .unwrap()
}

/// Run a tool by name the way the server does.
pub(crate) async fn call(
    client: &SproutClient,
    tool: &str,
    arguments: serde_json::Value,
) -> CallToolResult {
    let registry = sprout_registry(client);
    registry
        .get(tool)
        .unwrap_or_else(|| panic!("tool {} not registered", tool))
        .execute(arguments)
        .await
        .unwrap()
}

/// JSON carried in the text content of a result.
pub(crate) fn result_json(result: &CallToolResult) -> serde_json::Value {
    serde_json::from_str(result.content[0].as_text()).unwrap()
}

pub(crate) fn error_record(result: &CallToolResult) -> ErrorRecord {
    assert!(result.is_error(), "expected an error result, got {:?}", result);
    serde_json::from_value(result_json(result)).unwrap()
}
