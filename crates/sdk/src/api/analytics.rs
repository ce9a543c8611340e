//! Analytics API endpoints.

use crate::api::customer_path;
use crate::client::SproutClient;
use crate::error::{SproutError, SproutResult};
use crate::types::{Filter, IdList};
use chrono::NaiveDate;
use serde::Serialize;

/// Body of an analytics report request.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsRequest {
    pub filters: Vec<Filter>,
    pub metrics: Vec<String>,
    pub timezone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
}

impl AnalyticsRequest {
    /// Profile-level report over whole calendar days.
    pub fn profiles(
        profile_ids: &IdList,
        start: NaiveDate,
        end: NaiveDate,
        metrics: &IdList,
        timezone: &str,
    ) -> SproutResult<Self> {
        require_ids(profile_ids, metrics)?;
        Ok(Self {
            filters: vec![
                Filter::eq("customer_profile_id", profile_ids),
                Filter::period("reporting_period", start, end),
            ],
            metrics: metrics.as_slice().to_vec(),
            timezone: timezone.to_string(),
            limit: None,
            page: None,
        })
    }

    /// Post-level report; the time bounds are passed through as given.
    pub fn posts(
        profile_ids: &IdList,
        start_time: &str,
        end_time: &str,
        metrics: &IdList,
        timezone: &str,
    ) -> SproutResult<Self> {
        require_ids(profile_ids, metrics)?;
        Ok(Self {
            filters: vec![
                Filter::eq("customer_profile_id", profile_ids),
                Filter::between("created_time", start_time, end_time),
            ],
            metrics: metrics.as_slice().to_vec(),
            timezone: timezone.to_string(),
            limit: None,
            page: None,
        })
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }
}

fn require_ids(profile_ids: &IdList, metrics: &IdList) -> SproutResult<()> {
    if profile_ids.is_empty() {
        return Err(SproutError::InvalidInput(
            "profile_ids must name at least one profile".to_string(),
        ));
    }
    if metrics.is_empty() {
        return Err(SproutError::InvalidInput(
            "metrics must name at least one metric".to_string(),
        ));
    }
    Ok(())
}

/// Analytics API for profile and post metrics.
pub struct AnalyticsApi<'a> {
    client: &'a SproutClient,
}

impl<'a> AnalyticsApi<'a> {
    pub(crate) fn new(client: &'a SproutClient) -> Self {
        Self { client }
    }

    /// Metrics aggregated per social profile.
    pub async fn profiles(
        &self,
        customer_id: &str,
        request: &AnalyticsRequest,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, "/analytics/profiles")?;
        self.client.http.post(&path, request).await
    }

    /// Metrics for individual posts.
    pub async fn posts(
        &self,
        customer_id: &str,
        request: &AnalyticsRequest,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, "/analytics/posts")?;
        self.client.http.post(&path, request).await
    }
}
