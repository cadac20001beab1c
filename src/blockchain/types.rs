//! Chain-specific types and error definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Chains the gateway knows how to talk to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Chain {
    /// Local Hardhat/Anvil node.
    #[default]
    Hardhat,
    /// Sepolia testnet.
    Sepolia,
}

impl Chain {
    /// EIP-155 chain id.
    pub fn id(self) -> ChainId {
        match self {
            Chain::Hardhat => ChainId(31337),
            Chain::Sepolia => ChainId(11_155_111),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Chain::Hardhat => "hardhat",
            Chain::Sepolia => "sepolia",
        }
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Chain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hardhat" => Ok(Chain::Hardhat),
            "sepolia" => Ok(Chain::Sepolia),
            other => Err(format!("unknown chain '{}' (expected hardhat or sepolia)", other)),
        }
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// No receipt arrived within the configured wait.
    #[error("Transaction {0} not confirmed before timeout")]
    ConfirmationTimeout(String),

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Contract call or transaction submission failed.
    #[error("Contract error: {0}")]
    Contract(#[from] alloy::contract::Error),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1u64);
        assert_eq!(chain_id.0, 1);
        assert_eq!(u64::from(chain_id), 1);
    }

    #[test]
    fn test_chain_ids() {
        assert_eq!(Chain::Hardhat.id(), ChainId(31337));
        assert_eq!(Chain::Sepolia.id(), ChainId(11155111));
    }

    #[test]
    fn test_chain_from_str() {
        assert_eq!("hardhat".parse::<Chain>().unwrap(), Chain::Hardhat);
        assert_eq!("Sepolia".parse::<Chain>().unwrap(), Chain::Sepolia);
        assert!("mainnet".parse::<Chain>().is_err());
    }

    #[test]
    fn test_default_config() {
        let config = BlockchainConfig::default();
        assert_eq!(config.chain, Chain::Hardhat);
        assert_eq!(config.rpc_timeout_secs, 10);
        assert_eq!(config.confirmation_blocks, 1);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ChainMismatch {
            expected: 31337,
            actual: 1,
        };
        assert!(err.to_string().contains("31337"));
    }
}
