//! API endpoint groups, one module per area of the Sprout API.

pub mod analytics;
pub mod listening;
pub mod messages;
pub mod metadata;
pub mod publishing;

pub use analytics::{AnalyticsApi, AnalyticsRequest};
pub use listening::{ListeningApi, ListeningMessagesRequest};
pub use messages::{MessagesApi, MessagesRequest, PostDirection};
pub use metadata::{CustomerMetadata, MetadataApi};
pub use publishing::{CreatePostRequest, MediaRef, PostFields, PostListQuery, PublishingApi};

use crate::error::{SproutError, SproutResult};

/// Check an identifier before it is spliced into a request path.
pub(crate) fn path_segment<'v>(name: &str, value: &'v str) -> SproutResult<&'v str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SproutError::InvalidInput(format!("{} is required", name)));
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(SproutError::InvalidInput(format!(
            "{} '{}' may only contain letters, digits, '-' and '_'",
            name, value
        )));
    }
    Ok(value)
}

/// `/v1/{customer_id}{suffix}`
pub(crate) fn customer_path(customer_id: &str, suffix: &str) -> SproutResult<String> {
    let customer_id = path_segment("customer_id", customer_id)?;
    Ok(format!("/v1/{}{}", customer_id, suffix))
}
