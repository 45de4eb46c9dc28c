use serde::Deserialize;

use crate::types::lenient_i64;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("node returned HTTP {status}{}", node_suffix(.node))]
    Status {
        status: u16,
        node: Option<NodeError>,
        body: String,
    },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl ApiError {
    /// Node-reported error details carried by a non-2xx response.
    pub fn node_error(&self) -> Option<&NodeError> {
        match self {
            Self::Status { node, .. } => node.as_ref(),
            _ => None,
        }
    }
}

fn node_suffix(node: &Option<NodeError>) -> String {
    node.as_ref().map(|n| format!(": {n}")).unwrap_or_default()
}

/// The `error` object of a node response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeError {
    #[serde(deserialize_with = "lenient_i64")]
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.message, self.code)?;
        if let Some(data) = &self.data {
            write!(f, ": {data}")?;
        }
        Ok(())
    }
}
