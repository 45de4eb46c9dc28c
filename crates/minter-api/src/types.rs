//! Response envelope and the few result shapes the client itself relies on.
//!
//! Most endpoints return an opaque [`serde_json::Value`] result; callers that
//! want a typed view can use [`NodeResponse::decode_result`].

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

use crate::error::ApiError;

// ==============================================================================
// Envelope
// ==============================================================================

/// A successful node response: `{"jsonrpc": "2.0", "id": "", "result": ...}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NodeResponse<T = serde_json::Value> {
    #[serde(default)]
    pub jsonrpc: Option<String>,
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    pub result: T,
}

impl<T> NodeResponse<T> {
    pub fn into_result(self) -> T {
        self.result
    }
}

impl NodeResponse<serde_json::Value> {
    /// Re-decode an opaque result into a caller-provided model.
    pub fn decode_result<U: DeserializeOwned>(self) -> Result<NodeResponse<U>, ApiError> {
        let result = serde_json::from_value(self.result)
            .map_err(|e| ApiError::InvalidResponse(format!("decode result: {e}")))?;
        Ok(NodeResponse {
            jsonrpc: self.jsonrpc,
            id: self.id,
            result,
        })
    }

    /// Look up a top-level field of the result by name.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.result.get(name)
    }
}

// ==============================================================================
// Balance
// ==============================================================================

/// Result of the `address` endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Balance {
    /// Coin symbol to amount in pips. Amounts are kept as decimal strings
    /// since they routinely exceed `u64`.
    #[serde(default, deserialize_with = "lenient_amounts")]
    pub balance: BTreeMap<String, String>,
    #[serde(deserialize_with = "lenient_u64")]
    pub transaction_count: u64,
}

impl Balance {
    /// Nonce to use for the next transaction from this address.
    pub fn next_nonce(&self) -> Option<u64> {
        self.transaction_count.checked_add(1)
    }
}

// ==============================================================================
// Lenient scalar decoding
// ==============================================================================

// The node serializes most integers as decimal strings, but some versions
// emit bare numbers. Both forms are accepted.
fn parse_integer<T>(value: &serde_json::Value) -> Result<T, String>
where
    T: FromStr + TryFrom<i64> + TryFrom<u64>,
    <T as FromStr>::Err: std::fmt::Display,
{
    match value {
        serde_json::Value::Number(n) => {
            if let Some(n) = n.as_u64() {
                T::try_from(n).map_err(|_| format!("integer out of range: {n}"))
            } else if let Some(n) = n.as_i64() {
                T::try_from(n).map_err(|_| format!("integer out of range: {n}"))
            } else {
                Err(format!("expected integer, got {n}"))
            }
        }
        serde_json::Value::String(s) => s
            .trim()
            .parse()
            .map_err(|e| format!("invalid integer string `{s}`: {e}")),
        other => Err(format!("expected integer or integer string, got {other}")),
    }
}

pub(crate) fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    parse_integer(&value).map_err(serde::de::Error::custom)
}

pub(crate) fn lenient_i64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let value = serde_json::Value::deserialize(deserializer)?;
    parse_integer(&value).map_err(serde::de::Error::custom)
}

fn lenient_amounts<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<BTreeMap<String, String>, D::Error> {
    let raw = BTreeMap::<String, serde_json::Value>::deserialize(deserializer)?;
    raw.into_iter()
        .map(|(coin, amount)| match amount {
            serde_json::Value::String(s) => Ok((coin, s)),
            serde_json::Value::Number(n) => Ok((coin, n.to_string())),
            other => Err(serde::de::Error::custom(format!(
                "invalid amount for {coin}: {other}"
            ))),
        })
        .collect()
}
