use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::params::QueryParams;

use super::Transport;

enum Canned {
    Body(serde_json::Value),
    Status { status: u16, body: String },
}

/// A mock node transport for testing. Returns canned bodies per endpoint,
/// populated via the builder pattern, and records every request it sees.
pub struct MockTransport {
    responses: HashMap<String, Canned>,
    calls: Mutex<Vec<(String, QueryParams)>>,
}

impl MockTransport {
    pub fn builder() -> MockTransportBuilder {
        MockTransportBuilder {
            responses: HashMap::new(),
        }
    }

    /// Every `(endpoint, params)` pair requested so far, in order.
    pub fn calls(&self) -> Vec<(String, QueryParams)> {
        self.calls.lock().expect("mock call log poisoned").clone()
    }
}

pub struct MockTransportBuilder {
    responses: HashMap<String, Canned>,
}

impl MockTransportBuilder {
    pub fn with_result(mut self, endpoint: &str, result: serde_json::Value) -> Self {
        let body = serde_json::json!({"jsonrpc": "2.0", "id": "", "result": result});
        self.responses.insert(endpoint.to_owned(), Canned::Body(body));
        self
    }

    pub fn with_status(mut self, endpoint: &str, status: u16, body: &str) -> Self {
        self.responses.insert(
            endpoint.to_owned(),
            Canned::Status {
                status,
                body: body.to_owned(),
            },
        );
        self
    }

    pub fn build(self) -> MockTransport {
        MockTransport {
            responses: self.responses,
            calls: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(
        &self,
        endpoint: &str,
        params: &QueryParams,
    ) -> Result<serde_json::Value, ApiError> {
        self.calls
            .lock()
            .expect("mock call log poisoned")
            .push((endpoint.to_owned(), params.clone()));

        match self.responses.get(endpoint) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status { status, body }) => Err(super::protocol::status_error(
                *status,
                body.clone(),
            )),
            // Unconfigured endpoints answer with an empty result.
            None => Ok(serde_json::json!({"jsonrpc": "2.0", "id": "", "result": {}})),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let mock = MockTransport::builder()
            .with_result("status", serde_json::json!({"latest_block_height": "1"}))
            .build();
        mock.get("status", &QueryParams::new()).await.unwrap();
        mock.get("block", &QueryParams::new().required("height", 5))
            .await
            .unwrap();

        let calls = mock.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].0, "status");
        assert_eq!(calls[1].1.get("height"), Some("5"));
    }

    #[tokio::test]
    async fn canned_status_becomes_error() {
        let mock = MockTransport::builder()
            .with_status("transaction", 404, r#"{"error":{"code":404,"message":"not found"}}"#)
            .build();
        let err = mock
            .get("transaction", &QueryParams::new())
            .await
            .expect_err("canned status must fail");
        assert_eq!(err.node_error().map(|n| n.code), Some(404));
    }
}
