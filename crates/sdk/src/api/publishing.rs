//! Publishing API endpoints.

use crate::api::{customer_path, path_segment};
use crate::client::SproutClient;
use crate::error::{SproutError, SproutResult};
use crate::types::IdList;
use serde::{Deserialize, Serialize};

/// Media already uploaded to Sprout, attached to a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaRef {
    pub media_id: String,
    /// e.g. `PHOTO` or `VIDEO`
    pub media_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostFields {
    pub text: String,
}

/// Body of a post creation.
///
/// Without `scheduled_send_time` the post is saved as a draft.
#[derive(Debug, Clone, Serialize)]
pub struct CreatePostRequest {
    pub post_type: &'static str,
    pub profile_ids: Vec<String>,
    pub fields: PostFields,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_send_time: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub media: Vec<MediaRef>,
}

impl CreatePostRequest {
    pub fn new(profile_ids: IdList, text: impl Into<String>) -> SproutResult<Self> {
        let text = text.into();
        if profile_ids.is_empty() {
            return Err(SproutError::InvalidInput(
                "profile_ids must name at least one profile".to_string(),
            ));
        }
        if text.trim().is_empty() {
            return Err(SproutError::InvalidInput("text must not be empty".to_string()));
        }
        Ok(Self {
            post_type: "OUTBOUND",
            profile_ids: profile_ids.into_vec(),
            fields: PostFields { text },
            scheduled_send_time: None,
            media: Vec::new(),
        })
    }

    pub fn scheduled_at(mut self, send_time: impl Into<String>) -> Self {
        self.scheduled_send_time = Some(send_time.into());
        self
    }

    pub fn media(mut self, media: Vec<MediaRef>) -> SproutResult<Self> {
        if let Some(bad) = media
            .iter()
            .find(|m| m.media_id.trim().is_empty() || m.media_type.trim().is_empty())
        {
            return Err(SproutError::InvalidInput(format!(
                "media entries need both media_id and media_type, got {:?}",
                bad
            )));
        }
        self.media = media;
        Ok(self)
    }
}

/// Query string of a post listing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PostListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_cursor: Option<String>,
}

/// Publishing API for drafts and scheduled posts.
pub struct PublishingApi<'a> {
    client: &'a SproutClient,
}

impl<'a> PublishingApi<'a> {
    pub(crate) fn new(client: &'a SproutClient) -> Self {
        Self { client }
    }

    /// List publishing posts.
    pub async fn list(
        &self,
        customer_id: &str,
        query: &PostListQuery,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, "/publishing/posts")?;
        self.client.http.get_with_query(&path, query).await
    }

    /// Create a draft or scheduled post.
    pub async fn create(
        &self,
        customer_id: &str,
        request: &CreatePostRequest,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, "/publishing/posts")?;
        self.client.http.post(&path, request).await
    }

    /// Fetch one publishing post.
    pub async fn get(&self, customer_id: &str, post_id: &str) -> SproutResult<serde_json::Value> {
        let post_id = path_segment("post_id", post_id)?;
        let path = customer_path(customer_id, &format!("/publishing/posts/{}", post_id))?;
        self.client.http.get(&path).await
    }
}
