//! # Sprout SDK
//!
//! Rust client for the Sprout Social REST API.
//!
//! Every call returns the upstream JSON payload unchanged, or a
//! [`SproutError`] that flattens into an [`ErrorRecord`] with the HTTP
//! status, endpoint and upstream error body.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprout_sdk::{SproutClient, SproutResult};
//!
//! #[tokio::main]
//! async fn main() -> SproutResult<()> {
//!     let client = SproutClient::builder()
//!         .api_token("your-api-token")
//!         .customer_id("123456")
//!         .build()?;
//!
//!     // Accounts reachable with this token
//!     let customers = client.metadata().client().await?;
//!     println!("{}", customers);
//!
//!     // Profiles of the default customer
//!     let customer_id = client.resolve_customer_id(None)?;
//!     let profiles = client.metadata().profiles(&customer_id).await?;
//!     println!("{}", profiles);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod transport;
pub mod types;

// Re-export main client
pub use client::{SproutClient, SproutClientBuilder};
pub use config::{ClientConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use error::{
    ErrorKind, ErrorRecord, SproutError, SproutResult, MAX_DECODE_BODY, NO_HTTP_STATUS,
};
pub use types::{reporting_date, Filter, IdList};

// Re-export request types
pub use api::{
    AnalyticsRequest, CreatePostRequest, CustomerMetadata, ListeningMessagesRequest, MediaRef,
    MessagesRequest, PostDirection, PostFields, PostListQuery,
};
