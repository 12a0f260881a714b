//! Backend proxy for the Anthropic Messages API.
//!
//! Accepts chat requests over HTTP, validates them, and forwards them either
//! to the Anthropic API or to an operator-configured AI gateway, keeping the
//! credential out of the browser. The proxy route is protected by payload
//! validation, per-IP fixed-window rate limiting, and security response
//! headers.

pub mod config;
pub mod http;
pub mod security;
pub mod upstream;

pub use config::ProxyConfig;
pub use http::HttpServer;
