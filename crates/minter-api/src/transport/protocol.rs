use tracing::warn;

use crate::error::{ApiError, NodeError};

/// Pull a node error out of an envelope, if the body carries one.
///
/// The node reports failures as `{"error": {"code": .., "message": ..}}`.
/// A body whose `error` member has some other shape is not treated as a
/// node error.
fn extract_node_error(body: &serde_json::Value) -> Option<NodeError> {
    let err = body.get("error")?;
    if err.is_null() {
        return None;
    }
    match serde_json::from_value::<NodeError>(err.clone()) {
        Ok(parsed) => Some(parsed),
        Err(e) => {
            warn!(error = %e, raw = %err, "non-standard node error payload");
            None
        }
    }
}

/// Map a non-success HTTP response to an error, keeping the raw body.
pub(super) fn status_error(status: u16, body: String) -> ApiError {
    let node = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|decoded| extract_node_error(&decoded));
    ApiError::Status { status, node, body }
}

// Cap on how much of an undecodable body is echoed into the error message;
// the full body is already traced by the transport.
const BODY_EXCERPT_LEN: usize = 256;

/// Decode a successful response body. The JSON is returned unchanged; an
/// `error` member next to `result` is left for the caller to read.
pub(super) fn decode_success(body: &str) -> Result<serde_json::Value, ApiError> {
    serde_json::from_str(body).map_err(|e| {
        ApiError::InvalidResponse(format!(
            "decode JSON response: {e}; body starts with {:?}",
            excerpt(body)
        ))
    })
}

fn excerpt(body: &str) -> &str {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((end, _)) => &body[..end],
        None => body,
    }
}
