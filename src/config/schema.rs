//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the gateway.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::blockchain::types::Chain;

/// Root configuration for the lottery gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Blockchain integration settings.
    pub blockchain: BlockchainConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request hardening.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3001").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3001".to_string(),
            tls: None,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    ///
    /// Must cover `blockchain.receipt_timeout_secs` for the write routes.
    pub request_secs: u64,

    /// Grace period for in-flight requests on shutdown, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 180,
            shutdown_grace_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Blockchain integration configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BlockchainConfig {
    /// JSON-RPC endpoint URL (without the provider API key).
    pub rpc_url: String,

    /// API key appended verbatim to `rpc_url` and every failover URL.
    ///
    /// Never serialized back out.
    #[serde(skip_serializing)]
    pub provider_api_key: Option<String>,

    /// Failover JSON-RPC endpoint URLs.
    pub failover_urls: Vec<String>,

    /// Target chain.
    pub chain: Chain,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Number of block confirmations required before a write returns.
    pub confirmation_blocks: u32,

    /// Maximum time to wait for a transaction receipt, in seconds.
    pub receipt_timeout_secs: u64,

    /// Receipt polling interval in milliseconds.
    pub receipt_poll_interval_ms: u64,
}

impl BlockchainConfig {
    /// The primary endpoint with the provider key appended.
    pub fn endpoint_url(&self) -> String {
        self.with_api_key(&self.rpc_url)
    }

    /// Failover endpoints with the provider key appended.
    pub fn failover_endpoint_urls(&self) -> Vec<String> {
        self.failover_urls.iter().map(|u| self.with_api_key(u)).collect()
    }

    fn with_api_key(&self, base: &str) -> String {
        match &self.provider_api_key {
            Some(key) => format!("{}{}", base, key),
            None => base.to_string(),
        }
    }
}

impl Default for BlockchainConfig {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            provider_api_key: None,
            failover_urls: Vec::new(),
            chain: Chain::Hardhat,
            rpc_timeout_secs: 10,
            confirmation_blocks: 1,
            receipt_timeout_secs: 120,
            receipt_poll_interval_ms: 1000,
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,

    /// Allowed CORS origins. Empty means any origin.
    pub cors_allowed_origins: Vec<String>,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024, // 64KB
            cors_allowed_origins: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_toml_uses_defaults() {
        let config: GatewayConfig = toml::from_str(
            r#"
            [blockchain]
            chain = "sepolia"
            rpc_url = "https://eth-sepolia.g.alchemy.com/v2/"
            "#,
        )
        .unwrap();

        assert_eq!(config.blockchain.chain, Chain::Sepolia);
        assert_eq!(config.listener.bind_address, "0.0.0.0:3001");
        assert_eq!(config.blockchain.confirmation_blocks, 1);
        assert!(config.listener.tls.is_none());
    }

    #[test]
    fn test_endpoint_url_appends_api_key() {
        let config = BlockchainConfig {
            rpc_url: "https://eth-sepolia.g.alchemy.com/v2/".to_string(),
            provider_api_key: Some("abc123".to_string()),
            failover_urls: vec!["https://backup.example/".to_string()],
            ..Default::default()
        };

        assert_eq!(config.endpoint_url(), "https://eth-sepolia.g.alchemy.com/v2/abc123");
        assert_eq!(config.failover_endpoint_urls(), vec!["https://backup.example/abc123"]);
    }

    #[test]
    fn test_api_key_is_not_serialized() {
        let config = BlockchainConfig {
            provider_api_key: Some("secret".to_string()),
            ..Default::default()
        };
        let rendered = toml::to_string(&config).unwrap();
        assert!(!rendered.contains("secret"));
    }
}
