//! Messages proxy handler.
//!
//! # Responsibilities
//! - Resolve the upstream endpoint, rejecting when unconfigured
//! - Validate the inbound payload before any network call
//! - Clamp max_tokens to the provider ceiling
//! - Issue the single outbound call and relay the upstream reply verbatim
//!
//! # Design Decisions
//! - The outbound body contains exactly model, max_tokens, system (when
//!   present), and messages; nothing else from the client is forwarded
//! - Upstream status codes are relayed as-is, success or failure

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;

use crate::http::error::ProxyError;
use crate::http::server::AppState;
use crate::security::validate_messages_payload;
use crate::upstream::resolve;

/// Provider ceiling for max_tokens.
pub const MAX_TOKENS_LIMIT: u64 = 8192;

/// Applied when the client omits max_tokens or sends an out-of-range value.
pub const DEFAULT_MAX_TOKENS: u64 = 1400;

/// POST /api/messages — validate, forward, relay.
pub async fn messages_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ProxyError> {
    let endpoint = resolve(&state.config.upstream);
    let Some(target) = endpoint.target() else {
        return Err(ProxyError::Unconfigured);
    };

    let payload: Value = serde_json::from_slice(&body)
        .map_err(|_| ProxyError::Validation("Request body must be a JSON object.".to_string()))?;
    validate_messages_payload(&payload).map_err(ProxyError::Validation)?;

    // The validator guarantees an object with model and messages.
    let Some(request) = payload.as_object() else {
        return Err(ProxyError::Validation(
            "Request body must be a JSON object.".to_string(),
        ));
    };

    let mut outbound = serde_json::Map::new();
    outbound.insert("model".to_string(), request["model"].clone());
    outbound.insert(
        "max_tokens".to_string(),
        Value::from(effective_max_tokens(request.get("max_tokens"))),
    );
    if let Some(system) = request.get("system") {
        outbound.insert("system".to_string(), system.clone());
    }
    outbound.insert("messages".to_string(), request["messages"].clone());

    tracing::debug!(mode = ?endpoint.mode, "Forwarding messages request");

    let reply = state
        .client
        .post_messages(target, &Value::Object(outbound))
        .await?;

    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    if !status.is_success() {
        tracing::warn!(status = reply.status, "Upstream rejected the request");
    }

    Ok((status, Json(reply.body)).into_response())
}

/// Fallback for non-POST methods on the messages route.
pub async fn method_not_allowed() -> ProxyError {
    ProxyError::MethodNotAllowed
}

/// The requested value when it is a positive integer within the provider
/// ceiling, else the default.
fn effective_max_tokens(requested: Option<&Value>) -> u64 {
    requested
        .and_then(Value::as_u64)
        .filter(|&n| n >= 1 && n <= MAX_TOKENS_LIMIT)
        .unwrap_or(DEFAULT_MAX_TOKENS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn in_range_max_tokens_passes_through() {
        assert_eq!(effective_max_tokens(Some(&json!(1))), 1);
        assert_eq!(effective_max_tokens(Some(&json!(4096))), 4096);
        assert_eq!(effective_max_tokens(Some(&json!(8192))), 8192);
    }

    #[test]
    fn out_of_range_values_fall_back_to_default() {
        assert_eq!(effective_max_tokens(Some(&json!(0))), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!(8193))), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!(999_999))), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!(-5))), DEFAULT_MAX_TOKENS);
    }

    #[test]
    fn non_integer_values_fall_back_to_default() {
        assert_eq!(effective_max_tokens(None), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!("800"))), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!(12.5))), DEFAULT_MAX_TOKENS);
        assert_eq!(effective_max_tokens(Some(&json!(null))), DEFAULT_MAX_TOKENS);
    }
}
