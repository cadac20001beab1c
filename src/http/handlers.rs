//! Route handlers.
//!
//! Each handler parses its inputs, makes one service call (after a
//! signature check on write routes) and wraps the result in
//! [`ApiResponse`].

use alloy::primitives::{Address, U256};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::blockchain::TransactionOutcome;
use crate::http::error::ApiError;
use crate::http::request::parse_address;
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::lottery::{
    CloseLotteryRequest, LotteryInfo, LotteryService, StartLotteryRequest, CLOSE_LOTTERY_MESSAGE,
    START_LOTTERY_MESSAGE,
};
use crate::observability::metrics;

/// `GET /api/lottery/{lottery}/{address}`
pub async fn get_lottery_info<S: LotteryService>(
    State(state): State<AppState<S>>,
    Path((lottery, address)): Path<(String, String)>,
) -> Result<Json<ApiResponse<LotteryInfo>>, ApiError> {
    let lottery = parse_address("lottery", &lottery)?;
    let address = parse_address("address", &address)?;

    let info = state.service.lottery_info(lottery, address).await?;
    Ok(Json(ApiResponse::new(info)))
}

/// `POST /api/lottery/{lottery}/start`
pub async fn start_lottery<S: LotteryService>(
    State(state): State<AppState<S>>,
    Path(lottery): Path<String>,
    body: Result<Json<StartLotteryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TransactionOutcome>>, ApiError> {
    let Json(body) = body?;
    let lottery = parse_address("lottery", &lottery)?;
    let owner = parse_address("address", &body.address)?;

    authorize(state.service.as_ref(), owner, START_LOTTERY_MESSAGE, &body.signature).await?;

    tracing::info!(%lottery, %owner, closing_time = body.closing_time, "Starting lottery");
    let outcome = state
        .service
        .start_lottery(lottery, owner, U256::from(body.closing_time))
        .await?;
    Ok(Json(ApiResponse::new(outcome)))
}

/// `POST /api/lottery/{lottery}/close`
pub async fn close_lottery<S: LotteryService>(
    State(state): State<AppState<S>>,
    Path(lottery): Path<String>,
    body: Result<Json<CloseLotteryRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<TransactionOutcome>>, ApiError> {
    let Json(body) = body?;
    let lottery = parse_address("lottery", &lottery)?;
    let address = parse_address("address", &body.address)?;

    authorize(state.service.as_ref(), address, CLOSE_LOTTERY_MESSAGE, &body.signature).await?;

    tracing::info!(%lottery, %address, "Closing lottery");
    let outcome = state.service.close_lottery(lottery).await?;
    Ok(Json(ApiResponse::new(outcome)))
}

/// `GET /health`
pub async fn health<S: LotteryService>(State(state): State<AppState<S>>) -> impl IntoResponse {
    if state.service.is_healthy().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "status": "rpc_unreachable" })))
    }
}

/// Reject with 403 unless `signature` over `message` belongs to `address`.
async fn authorize<S: LotteryService>(
    service: &S,
    address: Address,
    message: &'static str,
    signature: &str,
) -> Result<(), ApiError> {
    if service.verify_signature(address, message, signature).await? {
        return Ok(());
    }

    tracing::warn!(%address, signed_message = message, "Signature verification failed");
    metrics::record_signature_rejected(message);
    Err(ApiError::Forbidden)
}
