//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::blockchain::types::Chain;
use crate::config::schema::GatewayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the base RPC endpoint.
pub const RPC_ENDPOINT_URL_ENV: &str = "RPC_ENDPOINT_URL";
/// Environment variable holding the provider API key.
pub const PROVIDER_API_KEY_ENV: &str = "PROVIDER_API_KEY";
/// Environment variable selecting the chain (`hardhat` or `sepolia`).
pub const CHAIN_ENV: &str = "CHAIN";
/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "PORT";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides and validate the result.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    let config = apply_env_overrides(config, |name| std::env::var(name).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Apply environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(mut config: GatewayConfig, lookup: F) -> Result<GatewayConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup(RPC_ENDPOINT_URL_ENV) {
        config.blockchain.rpc_url = url;
    }

    if let Some(key) = lookup(PROVIDER_API_KEY_ENV) {
        config.blockchain.provider_api_key = Some(key);
    }

    if let Some(chain) = lookup(CHAIN_ENV) {
        config.blockchain.chain = chain.parse::<Chain>().map_err(|reason| ConfigError::Env {
            name: CHAIN_ENV,
            reason,
        })?;
    }

    if let Some(port) = lookup(PORT_ENV) {
        let port: u16 = port.parse().map_err(|_| ConfigError::Env {
            name: PORT_ENV,
            reason: format!("'{}' is not a port number", port),
        })?;
        let host = config
            .listener
            .bind_address
            .rsplit_once(':')
            .map(|(host, _)| host.to_string())
            .unwrap_or_else(|| "0.0.0.0".to_string());
        config.listener.bind_address = format!("{}:{}", host, port);
    }

    Ok(config)
}
