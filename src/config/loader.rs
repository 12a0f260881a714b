//! Configuration loading from disk and environment.

use std::path::Path;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: TOML file (if given), then environment overlay,
/// then semantic validation.
pub fn load_config(path: Option<&Path>) -> Result<ProxyConfig, ConfigError> {
    let mut config = match path {
        Some(p) => {
            let content = std::fs::read_to_string(p)?;
            toml::from_str(&content)?
        }
        None => ProxyConfig::default(),
    };

    apply_env(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment variables onto the config.
///
/// The lookup is injected so tests can supply a fixed map instead of
/// mutating process-wide environment state.
pub fn apply_env<F>(config: &mut ProxyConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let upstream = &mut config.upstream;

    if let Some(url) = lookup("AI_GATEWAY_URL") {
        upstream.gateway_url = url;
    }
    if let Some(path) = lookup("AI_GATEWAY_MESSAGES_PATH") {
        upstream.gateway_messages_path = path;
    }
    if let Some(mode) = lookup("AI_GATEWAY_AUTH_MODE") {
        upstream.gateway_auth_mode = mode;
    }
    if let Some(key) = lookup("AI_GATEWAY_API_KEY") {
        upstream.gateway_api_key = key;
    }
    if let Some(key) = lookup("ANTHROPIC_API_KEY") {
        upstream.anthropic_api_key = key;
    }

    // The original server honored PORT for its bind port.
    if let Some(port) = lookup("PORT") {
        if port.parse::<u16>().is_ok() {
            let host = config
                .listener
                .bind_address
                .rsplit_once(':')
                .map(|(h, _)| h.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            config.listener.bind_address = format!("{host}:{port}");
        }
    }
}
