//! Typed client for the lottery gateway REST API.

pub mod client;
pub mod types;

pub use client::{LotteryClient, SdkError, DEFAULT_BASE_URL};
pub use types::{HealthStatus, LotteryInfo, TransactionOutcome};
