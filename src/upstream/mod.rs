//! Upstream subsystem: endpoint resolution and the outbound client.
//!
//! # Data Flow
//! ```text
//! UpstreamConfig (env-derived, immutable)
//!     → resolve.rs (pure: gateway / direct / unconfigured)
//!     → Endpoint { url, credential, mode, auth scheme }
//!     → client.rs (outbound POST with deadline)
//!     → UpstreamResponse { verbatim status, JSON body }
//! ```
//!
//! # Design Decisions
//! - Resolution never fails; callers branch on mode
//! - One outbound attempt per inbound request, no retries
//! - The credential never appears in logs or response bodies

pub mod client;
pub mod resolve;

pub use client::{UpstreamClient, UpstreamError, UpstreamResponse, ANTHROPIC_VERSION};
pub use resolve::{resolve, AuthScheme, Endpoint, EndpointMode, ANTHROPIC_MESSAGES_URL};
