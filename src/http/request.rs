//! Request-side helpers: request IDs and parameter parsing.

use alloy::primitives::Address;

use crate::http::error::ApiError;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Parse a hex address from a path segment or body field.
///
/// Checksums are not enforced; mixed-case input is accepted as is.
pub fn parse_address(field: &str, value: &str) -> Result<Address, ApiError> {
    value
        .trim()
        .parse::<Address>()
        .map_err(|_| ApiError::BadRequest(format!("{} '{}' is not a valid address", field, value)))
}
