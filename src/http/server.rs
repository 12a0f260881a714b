//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum Router with all handlers
//! - Wire up middleware (tracing, request ID, body limit, security headers,
//!   rate limiting)
//! - Serve with client address info and graceful shutdown
//!
//! # Design Decisions
//! - Config is loaded once and shared immutably through AppState
//! - The rate limiter is constructed here and injected, never global
//! - The router is buildable without binding a socket, so tests drive it
//!   with oneshot calls

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::ProxyConfig;
use crate::http::health::health_handler;
use crate::http::messages::{messages_handler, method_not_allowed};
use crate::http::request::MakeRequestUuid;
use crate::security::{rate_limit_middleware, security_headers_middleware, RateLimiter};
use crate::upstream::UpstreamClient;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ProxyConfig>,
    pub client: UpstreamClient,
}

/// HTTP server for the prompt proxy.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: ProxyConfig) -> Self {
        Self {
            router: build_router(config),
        }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let app = self
            .router
            .into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
///
/// Exposed for integration tests, which call it directly with a test config.
pub fn build_router(config: ProxyConfig) -> Router {
    let client = UpstreamClient::new(Duration::from_secs(config.timeouts.upstream_secs));
    let limiter = Arc::new(RateLimiter::new(&config.rate_limit));
    let rate_limit_enabled = config.rate_limit.enabled;
    let max_body_bytes = config.limits.max_body_bytes;

    let state = AppState {
        config: Arc::new(config),
        client,
    };

    let mut messages_routes = Router::new().route(
        "/api/messages",
        post(messages_handler).fallback(method_not_allowed),
    );
    if rate_limit_enabled {
        messages_routes = messages_routes.layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ));
    }

    Router::new()
        .route("/api/health", get(health_handler))
        .merge(messages_routes)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(RequestBodyLimitLayer::new(max_body_bytes)),
        )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
