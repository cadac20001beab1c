use serde::{Deserialize, Serialize};

/// Lottery snapshot. Amounts are decimal ether strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LotteryInfo {
    pub bet_fee: String,
    pub bet_price: String,
    pub bets_open: bool,
    pub bets_closing_time: String,
    pub is_owner: bool,
    pub prize_amount: String,
    pub prize_pool: String,
    pub owner_fee_pool: String,
    pub token_balance: String,
    pub token_symbol: String,
    pub is_winner: bool,
    pub is_lottery_closed: bool,
    pub is_past_lottery_closing_time: bool,
}

/// Mined transaction returned by start/close.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionOutcome {
    pub transaction_hash: String,
    pub block_number: Option<u64>,
    pub block_hash: Option<String>,
    pub from: String,
    pub to: Option<String>,
    pub gas_used: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct StartLotteryBody<'a> {
    pub address: &'a str,
    pub closing_time: u64,
    pub signature: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct CloseLotteryBody<'a> {
    pub address: &'a str,
    pub signature: &'a str,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Envelope<T> {
    pub result: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ErrorBody {
    pub message: String,
}
