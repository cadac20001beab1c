//! Ether-unit rendering of on-chain amounts.

use alloy::primitives::{utils, U256};

/// Render a wei amount as a decimal ether string with trailing fractional
/// zeros removed: `1e18` → `"1"`, `5e17` → `"0.5"`, `0` → `"0"`.
pub fn format_ether(value: U256) -> String {
    let formatted = utils::format_ether(value);
    match formatted.split_once('.') {
        Some((whole, fraction)) => {
            let fraction = fraction.trim_end_matches('0');
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => formatted,
    }
}
