//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (read-only RPC with timeouts and failover)
//!     → contract.rs (lottery ABI bindings)
//!     → signature.rs (personal-message verification)
//!     → transaction.rs (sign, broadcast, confirm)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or RPC URLs (they may embed an API key)
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod signature;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{TransactionOutcome, TxSender};
pub use types::{BlockchainConfig, BlockchainError, BlockchainResult, Chain, ChainId};
pub use wallet::Wallet;
