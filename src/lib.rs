//! Lottery Gateway Library
//!
//! REST façade over a deployed lottery contract: reads contract state for
//! a lottery/account pair and submits owner-signed start/close
//! transactions from the backend wallet.

pub mod blockchain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod lottery;
pub mod net;
pub mod observability;

pub use config::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use lottery::{ChainLotteryService, LotteryService};
