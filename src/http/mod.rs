//! HTTP surface subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack, ConnectInfo)
//!     → request.rs (request ID for correlation)
//!     → health.rs   GET  /api/health
//!     → messages.rs POST /api/messages (validate → forward → relay)
//!     → error.rs (failure → status + {error:{message}} body)
//! ```

pub mod error;
pub mod health;
pub mod messages;
pub mod request;
pub mod server;

pub use error::ProxyError;
pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::{build_router, AppState, HttpServer};
