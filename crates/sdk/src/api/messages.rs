//! Messages API endpoints.

use crate::api::customer_path;
use crate::client::SproutClient;
use crate::error::{SproutError, SproutResult};
use crate::types::{Filter, IdList};
use serde::Serialize;
use std::str::FromStr;

/// Message direction as understood by the `post_type` filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostDirection {
    Inbound,
    Outbound,
}

impl PostDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inbound => "INBOUND",
            Self::Outbound => "OUTBOUND",
        }
    }
}

impl FromStr for PostDirection {
    type Err = SproutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "INBOUND" => Ok(Self::Inbound),
            "OUTBOUND" => Ok(Self::Outbound),
            other => Err(SproutError::InvalidInput(format!(
                "post_type must be INBOUND or OUTBOUND, got '{}'",
                other
            ))),
        }
    }
}

/// Body of a message search.
#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub filters: Vec<Filter>,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cursor: Option<String>,
}

impl MessagesRequest {
    pub fn new(
        profile_ids: &IdList,
        start_time: &str,
        end_time: &str,
        limit: u32,
    ) -> SproutResult<Self> {
        if profile_ids.is_empty() {
            return Err(SproutError::InvalidInput(
                "profile_ids must name at least one profile".to_string(),
            ));
        }
        Ok(Self {
            filters: vec![
                Filter::eq("customer_profile_id", profile_ids),
                Filter::between("created_time", start_time, end_time),
            ],
            limit,
            page_cursor: None,
        })
    }

    pub fn direction(mut self, direction: PostDirection) -> Self {
        self.filters.push(Filter::eq(
            "post_type",
            &IdList::new([direction.as_str()]),
        ));
        self
    }

    /// Restrict to messages carrying any of these tags. No-op when empty.
    pub fn tags(mut self, tag_ids: &IdList) -> Self {
        if !tag_ids.is_empty() {
            self.filters.push(Filter::eq("tag_id", tag_ids));
        }
        self
    }

    pub fn page_cursor(mut self, cursor: impl Into<String>) -> Self {
        self.page_cursor = Some(cursor.into());
        self
    }
}

/// Messages API for inbox and sent messages.
pub struct MessagesApi<'a> {
    client: &'a SproutClient,
}

impl<'a> MessagesApi<'a> {
    pub(crate) fn new(client: &'a SproutClient) -> Self {
        Self { client }
    }

    /// Search messages.
    pub async fn list(
        &self,
        customer_id: &str,
        request: &MessagesRequest,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, "/messages")?;
        self.client.http.post(&path, request).await
    }
}
