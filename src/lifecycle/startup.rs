//! Startup orchestration.
//!
//! Subsystems initialize in dependency order and any failure is fatal:
//! RPC client, then wallet, then the transaction sender, then the service.

use thiserror::Error;

use crate::blockchain::{BlockchainClient, BlockchainError, TxSender, Wallet};
use crate::config::GatewayConfig;
use crate::lottery::ChainLotteryService;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("blockchain client: {0}")]
    Client(BlockchainError),

    #[error("wallet: {0}")]
    Wallet(BlockchainError),
}

/// Build the chain-backed lottery service, reading the signing key from
/// the environment.
pub async fn build_service(config: &GatewayConfig) -> Result<ChainLotteryService, StartupError> {
    let wallet = Wallet::from_env(config.blockchain.chain.id()).map_err(StartupError::Wallet)?;
    build_service_with_wallet(config, wallet).await
}

/// Build the chain-backed lottery service with an explicit wallet.
pub async fn build_service_with_wallet(
    config: &GatewayConfig,
    wallet: Wallet,
) -> Result<ChainLotteryService, StartupError> {
    let client = BlockchainClient::new(config.blockchain.clone())
        .await
        .map_err(StartupError::Client)?;
    let sender = TxSender::new(client.clone(), wallet).map_err(StartupError::Client)?;

    tracing::info!(
        chain = %config.blockchain.chain,
        signer = %sender.address(),
        "Lottery service ready"
    );
    Ok(ChainLotteryService::new(client, sender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::ChainId;

    const TEST_PRIVATE_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[tokio::test]
    async fn test_build_with_unreachable_node() {
        let mut config = GatewayConfig::default();
        config.blockchain.rpc_url = "http://127.0.0.1:1".to_string();
        config.blockchain.rpc_timeout_secs = 1;
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, ChainId(31337)).unwrap();

        assert!(build_service_with_wallet(&config, wallet).await.is_ok());
    }

    #[tokio::test]
    async fn test_bad_rpc_url_is_fatal() {
        let mut config = GatewayConfig::default();
        config.blockchain.rpc_url = "no scheme".to_string();
        let wallet = Wallet::from_private_key(TEST_PRIVATE_KEY, ChainId(31337)).unwrap();

        let err = build_service_with_wallet(&config, wallet).await.unwrap_err();
        assert!(matches!(err, StartupError::Client(_)));
    }
}
