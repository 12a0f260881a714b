//! Request-level error taxonomy and response mapping.
//!
//! Every failure class maps to one status code and a `{error:{message}}`
//! JSON body. Transport details and credentials are logged, never returned.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::upstream::UpstreamError;

/// Terminal failure of a proxied request. Never retried.
#[derive(Debug, thiserror::Error)]
pub enum ProxyError {
    #[error("Server is not configured. Set AI_GATEWAY_URL (plus gateway key) or ANTHROPIC_API_KEY.")]
    Unconfigured,

    #[error("{0}")]
    Validation(String),

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Too many requests. Try again shortly.")]
    RateLimited,

    #[error("The AI endpoint timed out. Try again shortly.")]
    UpstreamTimeout,

    #[error("Failed to reach AI endpoint. Check your gateway URL or API key configuration.")]
    UpstreamUnreachable,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::Unconfigured => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Validation(_) => StatusCode::BAD_REQUEST,
            ProxyError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ProxyError::RateLimited => StatusCode::TOO_MANY_REQUESTS,
            ProxyError::UpstreamTimeout => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::UpstreamUnreachable => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<UpstreamError> for ProxyError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => ProxyError::UpstreamTimeout,
            UpstreamError::Transport(source) => {
                tracing::error!(error = %source, "Upstream transport failure");
                ProxyError::UpstreamUnreachable
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": { "message": self.to_string() }
        }));

        let mut response = (self.status(), body).into_response();
        if matches!(self, ProxyError::MethodNotAllowed) {
            response
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("POST"));
        }
        response
    }
}
