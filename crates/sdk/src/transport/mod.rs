//! Transport layer for the Sprout SDK.

pub mod http;

pub use http::HttpTransport;
