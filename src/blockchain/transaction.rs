//! Transaction signing, broadcast and confirmation monitoring.
//!
//! # Responsibilities
//! - Build a wallet-backed provider for contract writes
//! - Monitor confirmations until the configured depth is reached
//! - Shape the final receipt for API responses
//!
//! No retries: a failed broadcast or a timed-out wait is returned as an
//! error to the caller.

use alloy::primitives::{Address, TxHash, B256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};
use crate::blockchain::wallet::Wallet;

/// Summary of a mined transaction returned by the write routes.
///
/// Only successful receipts are returned; a revert is an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub transaction_hash: TxHash,
    pub block_number: Option<u64>,
    pub block_hash: Option<B256>,
    pub from: Address,
    pub to: Option<Address>,
    /// Gas used, as a decimal string.
    pub gas_used: String,
}

impl From<&TransactionReceipt> for TransactionOutcome {
    fn from(receipt: &TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            block_hash: receipt.block_hash,
            from: receipt.from,
            to: receipt.to,
            gas_used: receipt.gas_used.to_string(),
        }
    }
}

/// Signs and tracks transactions sent from the backend wallet.
#[derive(Clone)]
pub struct TxSender {
    client: BlockchainClient,
    wallet: Wallet,
    provider: DynProvider,
}

impl TxSender {
    /// Create a sender bound to the client's primary endpoint.
    ///
    /// Nonce, gas and chain id are filled by the provider on each send.
    pub fn new(client: BlockchainClient, wallet: Wallet) -> BlockchainResult<Self> {
        let url: url::Url = client
            .config()
            .endpoint_url()
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL: {}", e)))?;

        let provider = ProviderBuilder::new()
            .wallet(wallet.ethereum_wallet())
            .connect_http(url)
            .erased();

        Ok(Self::with_provider(client, wallet, provider))
    }

    /// Create a sender that writes through `provider`, which must already
    /// sign with `wallet`.
    pub fn with_provider(client: BlockchainClient, wallet: Wallet, provider: DynProvider) -> Self {
        Self {
            client,
            wallet,
            provider,
        }
    }

    /// Wallet-backed provider used to send contract writes.
    pub fn provider(&self) -> &DynProvider {
        &self.provider
    }

    /// Get the wallet address.
    pub fn address(&self) -> Address {
        self.wallet.address()
    }

    /// Wait for a transaction to reach the configured confirmation depth.
    ///
    /// The block that includes the transaction counts as the first
    /// confirmation. A reverted receipt is returned as
    /// [`BlockchainError::Reverted`].
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        let config = self.client.config();
        let required_confirmations = u64::from(config.confirmation_blocks.max(1));
        let timeout_duration = Duration::from_secs(config.receipt_timeout_secs);
        let poll_interval = Duration::from_millis(config.receipt_poll_interval_ms);

        let result = timeout(timeout_duration, async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Err(BlockchainError::Reverted(tx_hash.to_string()));
                }

                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) + 1;

                if confirmations >= required_confirmations {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(receipt) => receipt,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(tx_hash.to_string())),
        }
    }
}

impl std::fmt::Debug for TxSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TxSender")
            .field("address", &self.wallet.address())
            .field("client", &self.client)
            .finish()
    }
}
