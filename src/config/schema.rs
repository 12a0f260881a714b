//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files; the
//! upstream section is additionally populated from environment variables by
//! the loader.

use serde::{Deserialize, Serialize};

/// Root configuration for the prompt proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Rate limiting configuration.
    pub rate_limit: RateLimitConfig,

    /// Request size limits.
    pub limits: LimitsConfig,

    /// Upstream endpoint selection (gateway / direct Anthropic).
    pub upstream: UpstreamConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Outbound upstream call deadline in seconds.
    pub upstream_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { upstream_secs: 20 }
    }
}

/// Rate limiting configuration (fixed window, per client IP).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting on the messages route.
    pub enabled: bool,

    /// Window length in seconds.
    pub window_secs: u64,

    /// Maximum admitted requests per window per client.
    pub max_requests: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            window_secs: 60,
            max_requests: 60,
        }
    }
}

/// Request size limits.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Maximum inbound request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            // Image content blocks carry base64 payloads.
            max_body_bytes: 20 * 1024 * 1024,
        }
    }
}

/// Upstream endpoint selection.
///
/// Populated from environment variables by the loader:
/// `AI_GATEWAY_URL`, `AI_GATEWAY_MESSAGES_PATH`, `AI_GATEWAY_AUTH_MODE`,
/// `AI_GATEWAY_API_KEY`, `ANTHROPIC_API_KEY`. A TOML file may set the
/// non-secret fields; credentials come from the environment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Gateway base URL, or a full messages endpoint. Empty = no gateway.
    pub gateway_url: String,

    /// Path appended to the gateway URL when it is a base URL.
    pub gateway_messages_path: String,

    /// Gateway auth mode: "x-api-key" (default) or "bearer".
    pub gateway_auth_mode: String,

    /// Explicit gateway credential (falls back to the Anthropic key).
    #[serde(skip_serializing)]
    pub gateway_api_key: String,

    /// Direct Anthropic API credential.
    #[serde(skip_serializing)]
    pub anthropic_api_key: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            gateway_url: String::new(),
            gateway_messages_path: "/messages".to_string(),
            gateway_auth_mode: "x-api-key".to_string(),
            gateway_api_key: String::new(),
            anthropic_api_key: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = ProxyConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.timeouts.upstream_secs, 20);
        assert!(config.rate_limit.enabled);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.rate_limit.max_requests, 60);
        assert_eq!(config.limits.max_body_bytes, 20 * 1024 * 1024);
        assert_eq!(config.upstream.gateway_messages_path, "/messages");
        assert_eq!(config.upstream.gateway_auth_mode, "x-api-key");
        assert!(config.upstream.gateway_url.is_empty());
    }

    #[test]
    fn partial_toml_overrides_only_named_fields() {
        let config: ProxyConfig = toml::from_str(
            r#"
            [rate_limit]
            max_requests = 5

            [timeouts]
            upstream_secs = 2
            "#,
        )
        .unwrap();
        assert_eq!(config.rate_limit.max_requests, 5);
        assert_eq!(config.rate_limit.window_secs, 60);
        assert_eq!(config.timeouts.upstream_secs, 2);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
    }
}
