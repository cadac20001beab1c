//! Lottery operations exposed over HTTP.
//!
//! # Data Flow
//! ```text
//! route handler
//!     → LotteryService::verify_signature (write routes only)
//!     → LotteryService::{lottery_info, start_lottery, close_lottery}
//!     → types.rs (raw reads → ether strings)
//! ```

pub mod service;
pub mod types;
pub mod units;

pub use service::{ChainLotteryService, LotteryService};
pub use types::{CloseLotteryRequest, LotteryInfo, LotteryState, StartLotteryRequest};

/// Message the owner signs to start a lottery.
pub const START_LOTTERY_MESSAGE: &str = "start lottery";

/// Message the owner signs to close a lottery.
pub const CLOSE_LOTTERY_MESSAGE: &str = "close lottery";
