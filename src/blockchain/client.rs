//! Blockchain RPC client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint (primary + failovers)
//! - Query chain state (chain id, block number, receipts, code)
//! - Handle timeouts and network errors gracefully
//! - Provide health check for blockchain connectivity

use alloy::primitives::{Address, Bytes, TxHash};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::rpc::types::TransactionReceipt;
use alloy::transports::TransportResult;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;

use crate::blockchain::types::{BlockchainConfig, BlockchainError, BlockchainResult, ChainId};
use crate::observability::metrics;

/// Read-only RPC client wrapper with failover support.
#[derive(Clone)]
pub struct BlockchainClient {
    /// List of providers (primary + failovers).
    providers: Vec<DynProvider>,
    /// Configuration.
    config: BlockchainConfig,
    /// Request timeout duration.
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a new blockchain client.
    ///
    /// Fails only on an unparsable primary URL; an unreachable node or a
    /// chain id mismatch is logged and tolerated.
    pub async fn new(config: BlockchainConfig) -> BlockchainResult<Self> {
        let primary_url: url::Url = config.endpoint_url().parse().map_err(|e| {
            BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", config.rpc_url, e))
        })?;
        let primary = ProviderBuilder::new().connect_http(primary_url).erased();

        let mut failovers = Vec::new();
        for url_str in config.failover_endpoint_urls() {
            match url_str.parse::<url::Url>() {
                Ok(url) => failovers.push(ProviderBuilder::new().connect_http(url).erased()),
                Err(_) => tracing::warn!("Ignoring invalid failover RPC URL"),
            }
        }

        let client = Self::from_providers(primary, failovers, config.clone());

        // The URL may embed an API key, so only the chain is logged.
        match client.verify_chain_id().await {
            Ok(()) => {
                tracing::info!(
                    chain = %config.chain,
                    chain_id = config.chain.id().0,
                    failovers = client.providers.len() - 1,
                    "Blockchain client initialized"
                );
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Blockchain client initialized but chain verification failed"
                );
            }
        }

        Ok(client)
    }

    /// Build a client over already-connected providers, primary first.
    ///
    /// No chain verification is done here.
    pub fn from_providers(
        primary: DynProvider,
        failovers: Vec<DynProvider>,
        config: BlockchainConfig,
    ) -> Self {
        let mut providers = Vec::with_capacity(1 + failovers.len());
        providers.push(primary);
        providers.extend(failovers);

        Self {
            providers,
            timeout_duration: Duration::from_secs(config.rpc_timeout_secs),
            config,
        }
    }

    /// Run `f` against each provider in order until one answers in time.
    ///
    /// `Err(None)` means every provider timed out.
    async fn first_answer<T, E, F, Fut>(&self, op: &'static str, f: F) -> Result<T, Option<E>>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        let mut last_error = None;
        for (i, provider) in self.providers.iter().enumerate() {
            match timeout(self.timeout_duration, f(provider.clone())).await {
                Ok(Ok(result)) => return Ok(result),
                Ok(Err(e)) => {
                    tracing::warn!(provider_idx = i, op, error = %e, "RPC error, trying next provider");
                    last_error = Some(e);
                }
                Err(_) => {
                    tracing::warn!(provider_idx = i, op, "RPC timeout, trying next provider");
                }
            }
        }
        Err(last_error)
    }

    async fn with_failover<T, F, Fut>(&self, op: &'static str, f: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = TransportResult<T>>,
    {
        self.first_answer(op, f).await.map_err(|last| match last {
            None => BlockchainError::Timeout(self.config.rpc_timeout_secs),
            Some(_) => BlockchainError::Rpc(format!("All RPC providers failed: {}", op)),
        })
    }

    /// Run a contract read with the same timeout and failover as the raw
    /// RPC helpers. `f` gets each provider in turn and builds its own
    /// contract instance on it.
    pub async fn call_contract<T, F, Fut>(&self, op: &'static str, f: F) -> BlockchainResult<T>
    where
        F: Fn(DynProvider) -> Fut,
        Fut: Future<Output = Result<T, alloy::contract::Error>>,
    {
        self.first_answer(op, f).await.map_err(|last| match last {
            None => BlockchainError::Timeout(self.config.rpc_timeout_secs),
            Some(e) => BlockchainError::Contract(e),
        })
    }

    /// Verify the connected chain ID matches configuration.
    pub async fn verify_chain_id(&self) -> BlockchainResult<()> {
        let chain_id = self.get_chain_id().await?;
        let expected = self.config.chain.id();
        if chain_id != expected {
            return Err(BlockchainError::ChainMismatch {
                expected: expected.0,
                actual: chain_id.0,
            });
        }
        Ok(())
    }

    /// Get the chain ID from the RPC.
    pub async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.with_failover("eth_chainId", |p| async move { p.get_chain_id().await })
            .await
            .map(ChainId)
    }

    /// Get the latest block number.
    pub async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.with_failover("eth_blockNumber", |p| async move { p.get_block_number().await })
            .await
    }

    /// Get a transaction receipt by hash.
    pub async fn get_transaction_receipt(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<TransactionReceipt>> {
        self.with_failover("eth_getTransactionReceipt", |p| async move {
            p.get_transaction_receipt(tx_hash).await
        })
        .await
    }

    /// Get the deployed bytecode at an address (empty for EOAs).
    pub async fn get_code_at(&self, address: Address) -> BlockchainResult<Bytes> {
        self.with_failover("eth_getCode", |p| async move { p.get_code_at(address).await })
            .await
    }

    /// Check if the blockchain is reachable and healthy.
    ///
    /// Returns true if we can query the block number.
    pub async fn is_healthy(&self) -> bool {
        let healthy = self.get_block_number().await.is_ok();
        metrics::record_rpc_health(healthy);
        healthy
    }

    /// Get the primary provider.
    pub fn provider(&self) -> &DynProvider {
        &self.providers[0]
    }

    /// Get the configuration.
    pub fn config(&self) -> &BlockchainConfig {
        &self.config
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("chain", &self.config.chain)
            .field("providers", &self.providers.len())
            .field("timeout_secs", &self.config.rpc_timeout_secs)
            .finish()
    }
}

/// Node doubles shared by the chain-layer tests.
#[cfg(test)]
pub(crate) mod test_support {
    use alloy::providers::mock::Asserter;
    use alloy::providers::{DynProvider, Provider, ProviderBuilder};

    /// URL of a node that accepts connections and never answers.
    pub(crate) async fn silent_node() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}", addr)
    }

    pub(crate) async fn silent_provider() -> DynProvider {
        let url = silent_node().await.parse().unwrap();
        ProviderBuilder::new().connect_http(url).erased()
    }

    /// Provider answering from `asserter`'s queue, in request order.
    pub(crate) fn mocked(asserter: &Asserter) -> DynProvider {
        ProviderBuilder::new()
            .connect_mocked_client(asserter.clone())
            .erased()
    }
}
