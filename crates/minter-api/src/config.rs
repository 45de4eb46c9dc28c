use std::time::Duration;

use reqwest::Url;
use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_CONNECT_TIMEOUT_SECS: f64 = 15.0;
pub const DEFAULT_TIMEOUT_SECS: f64 = 30.0;

/// Settings for the default HTTP transport.
///
/// Deserializable so embedding applications can keep it alongside their own
/// configuration; omitted timeouts fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClientConfig {
    /// Node API root, e.g. `http://127.0.0.1:8841`.
    pub base_url: String,

    /// Seconds allowed for establishing the TCP/TLS connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: f64,

    /// Seconds allowed for the whole request, body included.
    #[serde(default = "default_timeout")]
    pub timeout_secs: f64,
}

fn default_connect_timeout() -> f64 {
    DEFAULT_CONNECT_TIMEOUT_SECS
}

fn default_timeout() -> f64 {
    DEFAULT_TIMEOUT_SECS
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_connect_timeout(mut self, secs: f64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_timeout(mut self, secs: f64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Check the URL scheme and timeouts, returning the parsed base URL.
    pub fn validate(&self) -> Result<Url, ApiError> {
        self.connect_timeout()?;
        self.timeout()?;
        parse_base_url(&self.base_url)
    }

    pub fn connect_timeout(&self) -> Result<Duration, ApiError> {
        secs_to_duration(self.connect_timeout_secs, "connect timeout")
    }

    pub fn timeout(&self) -> Result<Duration, ApiError> {
        secs_to_duration(self.timeout_secs, "timeout")
    }
}

fn secs_to_duration(secs: f64, what: &str) -> Result<Duration, ApiError> {
    if !secs.is_finite() || secs <= 0.0 {
        return Err(ApiError::Config(format!(
            "{what} must be a positive number of seconds, got {secs}"
        )));
    }
    Duration::try_from_secs_f64(secs)
        .map_err(|e| ApiError::Config(format!("{what} of {secs}s is not representable: {e}")))
}

/// Parse a node base URL, accepting only HTTP(S).
///
/// The path always ends with `/` so that endpoint names are appended to it
/// by [`Url::join`] instead of replacing its last segment.
pub(crate) fn parse_base_url(base_url: &str) -> Result<Url, ApiError> {
    let mut parsed = Url::parse(base_url).map_err(|e| {
        ApiError::Config(format!(
            "invalid base url `{base_url}`: expected HTTP(S) URL ({e})"
        ))
    })?;
    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ApiError::Config(format!(
                "unsupported base url scheme `{other}`; expected http or https"
            )));
        }
    }
    if !parsed.path().ends_with('/') {
        let path = format!("{}/", parsed.path());
        parsed.set_path(&path);
    }
    parsed.set_query(None);
    parsed.set_fragment(None);
    Ok(parsed)
}
