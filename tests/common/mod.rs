//! Shared utilities for integration testing.

use alloy::primitives::{Address, TxHash, U256};
use lottery_gateway::blockchain::signature::recover_signer;
use lottery_gateway::blockchain::{BlockchainError, BlockchainResult, TransactionOutcome};
use lottery_gateway::config::GatewayConfig;
use lottery_gateway::lottery::{LotteryInfo, LotteryService, LotteryState};
use lottery_gateway::{HttpServer, Shutdown};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub const LOTTERY: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
pub const OWNER: &str = "0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266";
/// Anvil account #0, matches [`OWNER`].
pub const OWNER_KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
/// Anvil account #1.
pub const OTHER_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub const ETHER: u64 = 1_000_000_000_000_000_000;

/// A service call as seen by the mock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    LotteryInfo { lottery: Address, account: Address },
    VerifySignature { address: Address, message: String, signature: String },
    StartLottery { lottery: Address, owner: Address, closing_time: U256 },
    CloseLottery { lottery: Address },
}

/// How the mock answers `verify_signature`.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Signatures {
    AcceptAll,
    RejectAll,
    /// Real EIP-191 recovery.
    Recover,
}

/// Recording [`LotteryService`] with canned answers.
#[derive(Clone)]
pub struct MockLotteryService {
    pub calls: Arc<Mutex<Vec<Call>>>,
    pub signatures: Signatures,
    pub state: LotteryState,
    pub fail_rpc: bool,
    pub healthy: bool,
}

#[allow(dead_code)]
impl MockLotteryService {
    pub fn new(signatures: Signatures) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            signatures,
            state: sample_state(),
            fail_rpc: false,
            healthy: true,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_rpc: true,
            ..Self::new(Signatures::AcceptAll)
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn outcome(&self) -> BlockchainResult<TransactionOutcome> {
        if self.fail_rpc {
            return Err(BlockchainError::Rpc("All RPC providers failed: eth_sendRawTransaction".into()));
        }
        Ok(TransactionOutcome {
            transaction_hash: TxHash::repeat_byte(0xab),
            block_number: Some(42),
            block_hash: None,
            from: OWNER.parse().unwrap(),
            to: Some(LOTTERY.parse().unwrap()),
            gas_used: "51234".to_string(),
        })
    }
}

impl LotteryService for MockLotteryService {
    async fn lottery_info(&self, lottery: Address, account: Address) -> BlockchainResult<LotteryInfo> {
        self.record(Call::LotteryInfo { lottery, account });
        if self.fail_rpc {
            return Err(BlockchainError::Rpc("All RPC providers failed: eth_call".into()));
        }
        Ok(self.state.clone().into())
    }

    async fn verify_signature(
        &self,
        address: Address,
        message: &str,
        signature: &str,
    ) -> BlockchainResult<bool> {
        self.record(Call::VerifySignature {
            address,
            message: message.to_string(),
            signature: signature.to_string(),
        });
        Ok(match self.signatures {
            Signatures::AcceptAll => true,
            Signatures::RejectAll => false,
            Signatures::Recover => recover_signer(message, signature) == Some(address),
        })
    }

    async fn start_lottery(
        &self,
        lottery: Address,
        owner: Address,
        closing_time: U256,
    ) -> BlockchainResult<TransactionOutcome> {
        self.record(Call::StartLottery {
            lottery,
            owner,
            closing_time,
        });
        self.outcome()
    }

    async fn close_lottery(&self, lottery: Address) -> BlockchainResult<TransactionOutcome> {
        self.record(Call::CloseLottery { lottery });
        self.outcome()
    }

    async fn is_healthy(&self) -> bool {
        self.healthy
    }
}

pub fn sample_state() -> LotteryState {
    LotteryState {
        bet_fee: U256::from(ETHER / 5),
        bet_price: U256::from(ETHER),
        bets_open: true,
        bets_closing_time: U256::from(1_700_000_000u64),
        is_owner: true,
        prize_amount: U256::from(ETHER * 2),
        prize_pool: U256::from(ETHER * 10),
        owner_pool: U256::from(ETHER / 2),
        token_balance: U256::from(1234u64) * U256::from(ETHER / 1000),
        token_symbol: "LT0".to_string(),
        is_winner: false,
        is_lottery_closed: false,
        is_past_lottery_closing_time: false,
    }
}

/// Start the gateway on an ephemeral port.
pub async fn start_gateway(service: MockLotteryService) -> (SocketAddr, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(GatewayConfig::default(), service);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });
    tokio::time::sleep(Duration::from_millis(50)).await;

    (addr, shutdown)
}
