//! Transport abstraction between [`MinterClient`](crate::MinterClient) and
//! the node.
//!
//! Defines the [`Transport`] trait and provides an HTTP implementation
//! ([`HttpTransport`]) plus a test mock (`mock::MockTransport`).

mod http;
#[cfg(test)]
pub mod mock;
mod protocol;

pub use http::HttpTransport;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::params::QueryParams;

/// One GET round trip to a named node endpoint.
///
/// Implementations return the decoded JSON body of a successful response
/// and surface transport failures and non-success statuses as errors. They
/// must not retry.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ApiError>;
}
