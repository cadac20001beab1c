//! Lottery request and response shapes.

use alloy::primitives::U256;
use serde::{Deserialize, Serialize};

use crate::lottery::units::format_ether;

/// Raw contract reads for one lottery/account pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LotteryState {
    pub bet_fee: U256,
    pub bet_price: U256,
    pub bets_open: bool,
    pub bets_closing_time: U256,
    pub is_owner: bool,
    pub prize_amount: U256,
    pub prize_pool: U256,
    pub owner_pool: U256,
    pub token_balance: U256,
    pub token_symbol: String,
    pub is_winner: bool,
    pub is_lottery_closed: bool,
    pub is_past_lottery_closing_time: bool,
}

/// Lottery snapshot as served to clients.
///
/// Every `uint256` read, `betsClosingTime` included, is rendered in ether
/// units so existing frontends keep parsing it the same way.
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

impl From<LotteryState> for LotteryInfo {
    fn from(state: LotteryState) -> Self {
        Self {
            bet_fee: format_ether(state.bet_fee),
            bet_price: format_ether(state.bet_price),
            bets_open: state.bets_open,
            bets_closing_time: format_ether(state.bets_closing_time),
            is_owner: state.is_owner,
            prize_amount: format_ether(state.prize_amount),
            prize_pool: format_ether(state.prize_pool),
            owner_fee_pool: format_ether(state.owner_pool),
            token_balance: format_ether(state.token_balance),
            token_symbol: state.token_symbol,
            is_winner: state.is_winner,
            is_lottery_closed: state.is_lottery_closed,
            is_past_lottery_closing_time: state.is_past_lottery_closing_time,
        }
    }
}

/// Body of `POST /api/lottery/{lottery}/start`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartLotteryRequest {
    /// Address that signed the message and becomes the lottery owner.
    pub address: String,
    /// Forwarded verbatim to `startLottery`.
    pub closing_time: u64,
    /// Hex signature over [`START_LOTTERY_MESSAGE`](crate::lottery::START_LOTTERY_MESSAGE).
    pub signature: String,
}

/// Body of `POST /api/lottery/{lottery}/close`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseLotteryRequest {
    pub address: String,
    /// Hex signature over [`CLOSE_LOTTERY_MESSAGE`](crate::lottery::CLOSE_LOTTERY_MESSAGE).
    pub signature: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    const ETHER: u64 = 1_000_000_000_000_000_000;

    #[test]
    fn test_info_renders_amounts_in_ether() {
        let state = LotteryState {
            bet_fee: U256::from(ETHER / 10),
            bet_price: U256::from(ETHER),
            bets_open: true,
            bets_closing_time: U256::from(1_700_000_000u64),
            prize_pool: U256::from(3 * ETHER),
            owner_pool: U256::from(ETHER / 2),
            token_symbol: "LT0".to_string(),
            ..Default::default()
        };

        let info = LotteryInfo::from(state);
        assert_eq!(info.bet_fee, "0.1");
        assert_eq!(info.bet_price, "1");
        assert_eq!(info.bets_closing_time, "0.0000000017");
        assert_eq!(info.prize_pool, "3");
        assert_eq!(info.owner_fee_pool, "0.5");
        assert_eq!(info.prize_amount, "0");
        assert_eq!(info.token_symbol, "LT0");
        assert!(info.bets_open);
    }

    #[test]
    fn test_info_json_has_exactly_documented_keys() {
        let json = serde_json::to_value(LotteryInfo::from(LotteryState::default())).unwrap();
        let mut keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        keys.sort();
        assert_eq!(
            keys,
            vec![
                "betFee",
                "betPrice",
                "betsClosingTime",
                "betsOpen",
                "isLotteryClosed",
                "isOwner",
                "isPastLotteryClosingTime",
                "isWinner",
                "ownerFeePool",
                "prizeAmount",
                "prizePool",
                "tokenBalance",
                "tokenSymbol",
            ]
        );
    }

    #[test]
    fn test_start_request_camel_case() {
        let req: StartLotteryRequest = serde_json::from_str(
            r#"{"address":"0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266","closingTime":1700000000000,"signature":"0x00"}"#,
        )
        .unwrap();
        assert_eq!(req.closing_time, 1_700_000_000_000);
    }
}
