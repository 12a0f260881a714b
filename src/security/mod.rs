//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request:
//!     → headers.rs (browser hardening headers on the response)
//!     → rate_limit.rs (per-IP fixed window, messages route only)
//!     → validate.rs (structural payload checks in the handler)
//!     → Pass to the upstream call
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any check failure, before any upstream call
//! - No trust in client input: every field is shape- and bound-checked
//! - Rejections carry a human-readable message, never internals

pub mod headers;
pub mod rate_limit;
pub mod validate;

pub use headers::security_headers_middleware;
pub use rate_limit::{rate_limit_middleware, RateLimiter};
pub use validate::{validate_messages_payload, MAX_MESSAGES, MAX_TEXT_LENGTH};
