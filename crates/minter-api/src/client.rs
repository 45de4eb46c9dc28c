//! The node API client: one method per REST endpoint.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::params::QueryParams;
use crate::transport::{HttpTransport, Transport};
use crate::types::{Balance, NodeResponse};

/// Client for the Minter node REST API.
///
/// Each endpoint method is one stateless GET round trip; the client holds no
/// state besides its transport and can be shared across tasks.
#[derive(Clone)]
pub struct MinterClient {
    transport: Arc<dyn Transport>,
}

impl MinterClient {
    /// Connect to `base_url` with the default 15 s connect / 30 s total
    /// timeouts.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, ApiError> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// Use a pre-configured transport as-is.
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Issue a GET to `endpoint` and decode the envelope's result as `T`.
    pub async fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: QueryParams,
    ) -> Result<NodeResponse<T>, ApiError> {
        let body = self.transport.get(endpoint, &params).await?;
        serde_json::from_value(body).map_err(|e| {
            ApiError::InvalidResponse(format!("decode `{endpoint}` response: {e}"))
        })
    }

    pub async fn get_status(&self) -> Result<NodeResponse, ApiError> {
        self.call("status", QueryParams::new()).await
    }

    pub async fn get_candidate(
        &self,
        pub_key: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("pub_key", pub_key)
            .optional("height", height);
        self.call("candidate", params).await
    }

    pub async fn get_validators(&self, height: Option<u64>) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().optional("height", height);
        self.call("validators", params).await
    }

    pub async fn get_balance(
        &self,
        address: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse<Balance>, ApiError> {
        let params = QueryParams::new()
            .required("address", address)
            .optional("height", height);
        self.call("address", params).await
    }

    /// Nonce for the next transaction from `address`: its current
    /// transaction count plus one. Costs a single `address` request.
    pub async fn get_nonce(&self, address: &str) -> Result<u64, ApiError> {
        let balance = self.get_balance(address, None).await?.into_result();
        let nonce = balance.next_nonce().ok_or_else(|| {
            ApiError::InvalidResponse(format!(
                "transaction_count {} has no successor",
                balance.transaction_count
            ))
        })?;
        debug!(address, nonce, "resolved nonce");
        Ok(nonce)
    }

    /// Submit a signed, hex-encoded transaction.
    pub async fn send(&self, tx: &str) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().required("tx", tx);
        self.call("send_transaction", params).await
    }

    pub async fn get_transaction(&self, hash: &str) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().required("hash", hash);
        self.call("transaction", params).await
    }

    pub async fn get_block(&self, height: u64) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().required("height", height);
        self.call("block", params).await
    }

    pub async fn get_events(&self, height: u64) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().required("height", height);
        self.call("events", params).await
    }

    pub async fn get_candidates(
        &self,
        include_stakes: bool,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .flag("include_stakes", include_stakes)
            .optional("height", height);
        self.call("candidates", params).await
    }

    pub async fn get_coin_info(
        &self,
        symbol: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("symbol", symbol)
            .optional("height", height);
        self.call("coin_info", params).await
    }

    /// Estimate how much `coin_to_buy` selling `value_to_sell` pips of
    /// `coin_to_sell` yields.
    pub async fn estimate_coin_sell(
        &self,
        coin_to_sell: &str,
        value_to_sell: &str,
        coin_to_buy: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("coin_to_sell", coin_to_sell)
            .required("value_to_sell", value_to_sell)
            .required("coin_to_buy", coin_to_buy)
            .optional("height", height);
        self.call("estimate_coin_sell", params).await
    }

    /// Estimate how much `coin_to_sell` buying `value_to_buy` pips of
    /// `coin_to_buy` costs.
    pub async fn estimate_coin_buy(
        &self,
        coin_to_sell: &str,
        value_to_buy: &str,
        coin_to_buy: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("coin_to_sell", coin_to_sell)
            .required("value_to_buy", value_to_buy)
            .required("coin_to_buy", coin_to_buy)
            .optional("height", height);
        self.call("estimate_coin_buy", params).await
    }

    pub async fn estimate_tx_commission(&self, tx: &str) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().required("tx", tx);
        self.call("estimate_tx_commission", params).await
    }

    /// Search transactions with a Tendermint event query,
    /// e.g. `tags.tx.from='Mx...'`.
    pub async fn get_transactions(
        &self,
        query: &str,
        page: Option<u32>,
        per_page: Option<u32>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("query", query)
            .optional("page", page)
            .optional("perPage", per_page);
        self.call("transactions", params).await
    }

    pub async fn get_unconfirmed_txs(&self, limit: Option<u32>) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().optional("limit", limit);
        self.call("unconfirmed_txs", params).await
    }

    pub async fn get_max_gas_price(&self, height: Option<u64>) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new().optional("height", height);
        self.call("max_gas", params).await
    }

    pub async fn get_min_gas_price(&self) -> Result<NodeResponse, ApiError> {
        self.call("min_gas_price", QueryParams::new()).await
    }

    pub async fn get_missed_blocks(
        &self,
        pub_key: &str,
        height: Option<u64>,
    ) -> Result<NodeResponse, ApiError> {
        let params = QueryParams::new()
            .required("pub_key", pub_key)
            .optional("height", height);
        self.call("missed_blocks", params).await
    }
}

impl std::fmt::Debug for MinterClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MinterClient").finish_non_exhaustive()
    }
}
