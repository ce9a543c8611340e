//! Metadata API endpoints.

use crate::api::customer_path;
use crate::client::SproutClient;
use crate::error::SproutResult;

/// Per-customer metadata collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerMetadata {
    Profiles,
    Tags,
    Groups,
    Users,
    Teams,
    ListeningTopics,
}

impl CustomerMetadata {
    pub const ALL: [CustomerMetadata; 6] = [
        Self::Profiles,
        Self::Tags,
        Self::Groups,
        Self::Users,
        Self::Teams,
        Self::ListeningTopics,
    ];

    fn path_suffix(self) -> &'static str {
        match self {
            Self::Profiles => "/metadata/customer",
            Self::Tags => "/metadata/customer/tags",
            Self::Groups => "/metadata/customer/groups",
            Self::Users => "/metadata/customer/users",
            Self::Teams => "/metadata/customer/teams",
            Self::ListeningTopics => "/metadata/customer/topics",
        }
    }
}

/// Metadata API for accounts, profiles and customer-level lookups.
pub struct MetadataApi<'a> {
    client: &'a SproutClient,
}

impl<'a> MetadataApi<'a> {
    pub(crate) fn new(client: &'a SproutClient) -> Self {
        Self { client }
    }

    /// List the customers the token can access.
    pub async fn client(&self) -> SproutResult<serde_json::Value> {
        self.client.http.get("/v1/metadata/client").await
    }

    /// Fetch one per-customer metadata collection.
    pub async fn customer(
        &self,
        customer_id: &str,
        collection: CustomerMetadata,
    ) -> SproutResult<serde_json::Value> {
        let path = customer_path(customer_id, collection.path_suffix())?;
        self.client.http.get(&path).await
    }

    /// List social profiles.
    pub async fn profiles(&self, customer_id: &str) -> SproutResult<serde_json::Value> {
        self.customer(customer_id, CustomerMetadata::Profiles).await
    }

    /// List message tags.
    pub async fn tags(&self, customer_id: &str) -> SproutResult<serde_json::Value> {
        self.customer(customer_id, CustomerMetadata::Tags).await
    }

    /// List profile groups.
    pub async fn groups(&self, customer_id: &str) -> SproutResult<serde_json::Value> {
        self.customer(customer_id, CustomerMetadata::Groups).await
    }

    /// List active users.
    pub async fn users(&self, customer_id: &str) -> SproutResult<serde_json::Value> {
        self.customer(customer_id, CustomerMetadata::Users).await
    }

    /// List teams.
    pub async fn teams(&self, customer_id: &str) -> SproutResult<serde_json::Value> {
        self.customer(customer_id, CustomerMetadata::Teams).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SproutError;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> SproutClient {
        SproutClient::builder()
            .base_url(server.uri())
            .api_token("tok")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_client_metadata() {
        let server = MockServer::start().await;
        let payload = json!({"data": [{"customer_id": 123, "name": "Acme"}]});

        Mock::given(method("GET"))
            .and(path("/v1/metadata/client"))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&server)
            .await;

        let result = client(&server).metadata().client().await.unwrap();
        assert_eq!(result, payload);
    }

    #[tokio::test]
    async fn test_customer_collections_hit_expected_paths() {
        let server = MockServer::start().await;

        for (collection, suffix) in [
            (CustomerMetadata::Profiles, "/v1/7/metadata/customer"),
            (CustomerMetadata::Tags, "/v1/7/metadata/customer/tags"),
            (CustomerMetadata::Groups, "/v1/7/metadata/customer/groups"),
            (CustomerMetadata::Users, "/v1/7/metadata/customer/users"),
            (CustomerMetadata::Teams, "/v1/7/metadata/customer/teams"),
            (CustomerMetadata::ListeningTopics, "/v1/7/metadata/customer/topics"),
        ] {
            Mock::given(method("GET"))
                .and(path(suffix))
                .respond_with(ResponseTemplate::new(200).set_body_json(json!({"path": suffix})))
                .mount(&server)
                .await;

            let result = client(&server)
                .metadata()
                .customer("7", collection)
                .await
                .unwrap();
            assert_eq!(result["path"], suffix);
        }
    }

    #[tokio::test]
    async fn test_invalid_customer_id_sends_nothing() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let result = client(&server).metadata().tags("12/../34").await;
        assert!(matches!(result, Err(SproutError::InvalidInput(_))));
    }
}
