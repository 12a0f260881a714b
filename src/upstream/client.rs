//! Outbound Messages API client.
//!
//! # Responsibilities
//! - Build the outbound POST (headers, credential attachment)
//! - Enforce the per-request deadline
//! - Split timeout from other transport failures
//! - Decode the upstream body, substituting a synthetic error body when the
//!   upstream returns non-JSON
//!
//! # Design Decisions
//! - reqwest's per-request timeout aborts the connection on every exit path
//! - No retries: a failed or timed-out attempt is reported, never repeated,
//!   so an upstream call is billed at most once
//! - Upstream status is relayed verbatim; this layer never rewrites it

use std::time::Duration;

use crate::upstream::resolve::Target;

/// Protocol version header required by the Anthropic Messages API.
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Transport-level failure of an outbound call.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("upstream call exceeded the deadline")]
    Timeout,

    #[error("upstream unreachable: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Upstream reply: verbatim status plus decoded JSON body.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

/// Client for the upstream Messages endpoint (direct or gateway).
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    timeout: Duration,
}

impl UpstreamClient {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout,
        }
    }

    /// POST a Messages request to the resolved target.
    pub async fn post_messages(
        &self,
        target: Target<'_>,
        body: &serde_json::Value,
    ) -> Result<UpstreamResponse, UpstreamError> {
        let mut request = self
            .client
            .post(target.url)
            .timeout(self.timeout)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body);

        if let Some(key) = target.api_key {
            request = if target.bearer {
                request.bearer_auth(key)
            } else {
                request.header("x-api-key", key)
            };
        }

        let response = request.send().await.map_err(classify)?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await.map_err(classify)?;

        let body = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            tracing::warn!(status, "Upstream returned a non-JSON body");
            serde_json::json!({
                "error": { "message": "Upstream returned a non-JSON response." }
            })
        });

        Ok(UpstreamResponse { status, body })
    }
}

fn classify(err: reqwest::Error) -> UpstreamError {
    if err.is_timeout() {
        UpstreamError::Timeout
    } else {
        UpstreamError::Transport(err)
    }
}
