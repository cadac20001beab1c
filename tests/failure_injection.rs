//! Failure injection tests: unreachable node, failing RPC calls.

use lottery_sdk::{LotteryClient, SdkError};

mod common;
use common::{Call, MockLotteryService, Signatures, LOTTERY, OWNER};

#[tokio::test]
async fn test_rpc_failure_on_read_is_internal_error() {
    let service = MockLotteryService::failing();
    let (addr, shutdown) = common::start_gateway(service.clone()).await;

    let err = LotteryClient::new(&format!("http://{}", addr))
        .lottery_info(LOTTERY, OWNER)
        .await
        .unwrap_err();

    match err {
        SdkError::Status { status, message } => {
            assert_eq!(status, 500);
            // Node details must not leak to clients.
            assert_eq!(message, "Internal server error");
        }
        other => panic!("expected status error, got {:?}", other),
    }
    assert_eq!(service.calls().len(), 1);

    shutdown.trigger();
}

#[tokio::test]
async fn test_rpc_failure_on_write_is_internal_error() {
    let service = MockLotteryService::failing();
    let (addr, shutdown) = common::start_gateway(service.clone()).await;

    let err = LotteryClient::new(&format!("http://{}", addr))
        .close_lottery(LOTTERY, OWNER, "0x00")
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(service
        .calls()
        .iter()
        .any(|c| matches!(c, Call::CloseLottery { .. })));

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_reports_unreachable_node() {
    let service = MockLotteryService {
        healthy: false,
        ..MockLotteryService::new(Signatures::AcceptAll)
    };
    let (addr, shutdown) = common::start_gateway(service).await;

    let err = LotteryClient::new(&format!("http://{}", addr))
        .health()
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(503));

    shutdown.trigger();
}

#[tokio::test]
async fn test_health_ok() {
    let service = MockLotteryService::new(Signatures::AcceptAll);
    let (addr, shutdown) = common::start_gateway(service).await;

    let health = LotteryClient::new(&format!("http://{}", addr))
        .health()
        .await
        .unwrap();
    assert_eq!(health.status, "ok");

    shutdown.trigger();
}
