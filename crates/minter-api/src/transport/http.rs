use async_trait::async_trait;
use reqwest::{header, Url};
use tracing::{debug, trace};

use crate::config::{parse_base_url, ClientConfig};
use crate::error::ApiError;
use crate::params::QueryParams;

use super::protocol::{decode_success, status_error};
use super::Transport;

/// Node transport over HTTP(S) using `reqwest`.
///
/// Every call is a single `GET <base_url>/<endpoint>?<params>`. Timeouts,
/// TLS and pooling are whatever the wrapped `reqwest::Client` was built with.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpTransport {
    /// Build a transport with the connect/total timeouts from `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let base_url = config.validate()?;
        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout()?)
            .timeout(config.timeout()?)
            .build()
            .map_err(|e| ApiError::Config(format!("build HTTP client: {e}")))?;
        Ok(Self { client, base_url })
    }

    /// Wrap a pre-configured client. Nothing about it is changed.
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            client,
            base_url: parse_base_url(base_url)?,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve `endpoint` under the base URL. Anything that would leave the
    /// base (a scheme, a `//host` prefix, `..` segments) or smuggle a query
    /// or fragment is rejected.
    fn endpoint_url(&self, endpoint: &str) -> Result<Url, ApiError> {
        let invalid = |reason: &str| {
            ApiError::Config(format!("invalid endpoint `{endpoint}`: {reason}"))
        };

        if endpoint.starts_with("//") {
            return Err(invalid("protocol-relative reference"));
        }
        if endpoint.contains(['?', '#']) {
            return Err(invalid("query and fragment belong in the params"));
        }
        let relative = endpoint.trim_start_matches('/');
        if relative.is_empty() {
            return Err(invalid("empty path"));
        }
        let first_segment = relative.split('/').next().unwrap_or_default();
        if first_segment.contains(':') {
            return Err(invalid("absolute URL"));
        }
        if relative.split('/').any(|segment| segment == "." || segment == "..") {
            return Err(invalid("dot segments"));
        }

        let url = self
            .base_url
            .join(relative)
            .map_err(|e| invalid(&e.to_string()))?;
        if !url.as_str().starts_with(self.base_url.as_str()) {
            return Err(invalid("resolves outside the base url"));
        }
        Ok(url)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ApiError> {
        let url = self.endpoint_url(endpoint)?;
        debug!(
            api.endpoint = endpoint,
            api.params = params.len(),
            "node request"
        );

        let mut builder = self
            .client
            .get(url)
            .header(header::ACCEPT, "application/json");
        if !params.is_empty() {
            builder = builder.query(params.as_pairs());
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        debug!(api.endpoint = endpoint, %status, body_len = body.len(), "node response");
        trace!(api.endpoint = endpoint, body = %body, "node response body");

        if !status.is_success() {
            return Err(status_error(status.as_u16(), body));
        }
        decode_success(&body)
    }
}
