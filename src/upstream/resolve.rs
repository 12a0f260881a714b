//! Upstream endpoint resolution.
//!
//! Decides where outbound Messages calls go and which credential they carry.
//!
//! Priority:
//!   1. Gateway URL — custom gateway / AI gateway deployment
//!   2. Anthropic API key — direct Anthropic API
//!
//! Resolution is a pure function over the upstream config section: no I/O,
//! no error conditions. Callers branch on `Endpoint::mode`.

use crate::config::UpstreamConfig;

/// Fixed direct endpoint for the Anthropic Messages API.
pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";

/// How the proxy reaches the upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndpointMode {
    /// Forward through an operator-configured gateway.
    Gateway,
    /// Forward straight to the Anthropic API.
    Direct,
    /// Neither a gateway URL nor a credential is configured.
    Unconfigured,
}

/// How the credential is attached to outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthScheme {
    /// `x-api-key` header (Anthropic's native scheme, gateway default).
    XApiKey,
    /// `Authorization: Bearer` header (gateway opt-in).
    Bearer,
}

/// Resolved target for outbound Messages calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: Option<String>,
    pub api_key: Option<String>,
    pub mode: EndpointMode,
    pub auth_scheme: AuthScheme,
}

/// Borrowed view of a configured endpoint, ready for an outbound call.
#[derive(Debug, Clone, Copy)]
pub struct Target<'a> {
    pub url: &'a str,
    pub api_key: Option<&'a str>,
    /// Attach the credential as a bearer token instead of `x-api-key`.
    pub bearer: bool,
}

impl Endpoint {
    pub fn is_configured(&self) -> bool {
        self.mode != EndpointMode::Unconfigured
    }

    /// The outbound target, or `None` when unconfigured.
    pub fn target(&self) -> Option<Target<'_>> {
        self.url.as_deref().map(|url| Target {
            url,
            api_key: self.api_key.as_deref(),
            bearer: self.mode == EndpointMode::Gateway && self.auth_scheme == AuthScheme::Bearer,
        })
    }
}

/// Resolve the target URL, credential, and auth scheme for outbound calls.
///
/// In gateway mode the credential falls back to the direct Anthropic key
/// when no gateway key is set. That mirrors the deployed behavior and is
/// kept deliberately, though it means the direct credential can be sent to
/// a third-party gateway (see DESIGN.md).
pub fn resolve(upstream: &UpstreamConfig) -> Endpoint {
    let gateway_url = upstream
        .gateway_url
        .trim()
        .trim_end_matches('/')
        .to_string();
    let auth_scheme = if upstream.gateway_auth_mode.trim().eq_ignore_ascii_case("bearer") {
        AuthScheme::Bearer
    } else {
        AuthScheme::XApiKey
    };

    if !gateway_url.is_empty() {
        let url = if has_messages_like_path(&gateway_url) {
            gateway_url
        } else {
            let path = upstream.gateway_messages_path.trim();
            let path = if path.is_empty() { "/messages" } else { path };
            if path.starts_with('/') {
                format!("{gateway_url}{path}")
            } else {
                format!("{gateway_url}/{path}")
            }
        };

        let key = if upstream.gateway_api_key.is_empty() {
            upstream.anthropic_api_key.clone()
        } else {
            upstream.gateway_api_key.clone()
        };

        return Endpoint {
            url: Some(url),
            api_key: non_empty(key),
            mode: EndpointMode::Gateway,
            auth_scheme,
        };
    }

    if !upstream.anthropic_api_key.is_empty() {
        return Endpoint {
            url: Some(ANTHROPIC_MESSAGES_URL.to_string()),
            api_key: Some(upstream.anthropic_api_key.clone()),
            mode: EndpointMode::Direct,
            auth_scheme: AuthScheme::XApiKey,
        };
    }

    Endpoint {
        url: None,
        api_key: None,
        mode: EndpointMode::Unconfigured,
        auth_scheme: AuthScheme::XApiKey,
    }
}

/// True when the URL already ends in a `/messages` path, optionally followed
/// by a query string, so no path should be appended.
fn has_messages_like_path(url: &str) -> bool {
    url.ends_with("/messages") || url.contains("/messages?")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
