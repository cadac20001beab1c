//! The seam between the HTTP routes and the chain.

use alloy::primitives::{Address, U256};
use std::future::{Future, IntoFuture};

use crate::blockchain::contract::Lottery;
use crate::blockchain::signature::verify_message;
use crate::blockchain::{BlockchainClient, BlockchainResult, TransactionOutcome, TxSender};
use crate::lottery::types::{LotteryInfo, LotteryState};
use crate::observability::metrics;

/// Everything the lottery routes need from the chain.
///
/// Each route calls exactly one write or read operation here, after at
/// most one `verify_signature`.
pub trait LotteryService: Send + Sync + 'static {
    /// Read the lottery snapshot for `account`.
    fn lottery_info(
        &self,
        lottery: Address,
        account: Address,
    ) -> impl Future<Output = BlockchainResult<LotteryInfo>> + Send;

    /// Check a personal-sign `signature` of `message` by `address`.
    fn verify_signature(
        &self,
        address: Address,
        message: &str,
        signature: &str,
    ) -> impl Future<Output = BlockchainResult<bool>> + Send;

    /// Open betting until `closing_time` with `owner` as the lottery owner.
    fn start_lottery(
        &self,
        lottery: Address,
        owner: Address,
        closing_time: U256,
    ) -> impl Future<Output = BlockchainResult<TransactionOutcome>> + Send;

    /// Close betting and settle the lottery.
    fn close_lottery(
        &self,
        lottery: Address,
    ) -> impl Future<Output = BlockchainResult<TransactionOutcome>> + Send;

    /// Whether the backing node is reachable.
    fn is_healthy(&self) -> impl Future<Output = bool> + Send;
}

/// [`LotteryService`] backed by a JSON-RPC node and the backend wallet.
#[derive(Debug, Clone)]
pub struct ChainLotteryService {
    client: BlockchainClient,
    sender: TxSender,
}

impl ChainLotteryService {
    pub fn new(client: BlockchainClient, sender: TxSender) -> Self {
        Self { client, sender }
    }

    async fn confirm(
        &self,
        kind: &'static str,
        pending: alloy::providers::PendingTransactionBuilder<alloy::network::Ethereum>,
    ) -> BlockchainResult<TransactionOutcome> {
        let tx_hash = *pending.tx_hash();
        tracing::info!(kind, tx_hash = %tx_hash, "Transaction broadcast");

        match self.sender.wait_for_confirmation(tx_hash).await {
            Ok(receipt) => {
                metrics::record_transaction(kind, "confirmed");
                tracing::info!(
                    kind,
                    tx_hash = %tx_hash,
                    block_number = ?receipt.block_number,
                    "Transaction confirmed"
                );
                Ok(TransactionOutcome::from(&receipt))
            }
            Err(e) => {
                metrics::record_transaction(kind, "failed");
                Err(e)
            }
        }
    }
}

impl LotteryService for ChainLotteryService {
    async fn lottery_info(&self, lottery: Address, account: Address) -> BlockchainResult<LotteryInfo> {
        let state = self
            .client
            .call_contract("lottery_info", move |provider| async move {
                let contract = Lottery::new(lottery, provider);

                let bet_fee = contract.betFee();
                let bet_price = contract.betPrice();
                let bets_open = contract.betsOpen();
                let bets_closing_time = contract.betsClosingTime();
                let is_owner = contract.isOwner(account);
                let prize_amount = contract.prizeAmount(account);
                let prize_pool = contract.prizePool();
                let owner_pool = contract.ownerPool();
                let token_balance = contract.tokenBalance(account);
                let token_symbol = contract.tokenSymbol();
                let is_winner = contract.isWinner(account);
                let is_lottery_closed = contract.isLotteryClosed();
                let is_past_closing_time = contract.isPastLotteryClosingTime();

                let (
                    bet_fee,
                    bet_price,
                    bets_open,
                    bets_closing_time,
                    is_owner,
                    prize_amount,
                    prize_pool,
                    owner_pool,
                    token_balance,
                    token_symbol,
                    is_winner,
                    is_lottery_closed,
                    is_past_lottery_closing_time,
                ) = tokio::try_join!(
                    bet_fee.call().into_future(),
                    bet_price.call().into_future(),
                    bets_open.call().into_future(),
                    bets_closing_time.call().into_future(),
                    is_owner.call().into_future(),
                    prize_amount.call().into_future(),
                    prize_pool.call().into_future(),
                    owner_pool.call().into_future(),
                    token_balance.call().into_future(),
                    token_symbol.call().into_future(),
                    is_winner.call().into_future(),
                    is_lottery_closed.call().into_future(),
                    is_past_closing_time.call().into_future(),
                )?;

                Ok::<_, alloy::contract::Error>(LotteryState {
                    bet_fee,
                    bet_price,
                    bets_open,
                    bets_closing_time,
                    is_owner,
                    prize_amount,
                    prize_pool,
                    owner_pool,
                    token_balance,
                    token_symbol,
                    is_winner,
                    is_lottery_closed,
                    is_past_lottery_closing_time,
                })
            })
            .await?;

        Ok(state.into())
    }

    async fn verify_signature(
        &self,
        address: Address,
        message: &str,
        signature: &str,
    ) -> BlockchainResult<bool> {
        verify_message(&self.client, address, message, signature).await
    }

    async fn start_lottery(
        &self,
        lottery: Address,
        owner: Address,
        closing_time: U256,
    ) -> BlockchainResult<TransactionOutcome> {
        let contract = Lottery::new(lottery, self.sender.provider().clone());
        let pending = contract.startLottery(closing_time, owner).send().await?;
        self.confirm("start_lottery", pending).await
    }

    async fn close_lottery(&self, lottery: Address) -> BlockchainResult<TransactionOutcome> {
        let contract = Lottery::new(lottery, self.sender.provider().clone());
        let pending = contract.closeLottery().send().await?;
        self.confirm("close_lottery", pending).await
    }

    async fn is_healthy(&self) -> bool {
        self.client.is_healthy().await
    }
}
