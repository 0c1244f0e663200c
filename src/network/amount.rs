// src/network/amount.rs
//
// Amount Formatting - Raw Chain Units → Display String
// Lamports (10^9) và Wei (10^18) → fixed 6 decimal places

use crate::error::ProviderError;

/// Số decimal places cố định cho display (convention của engine)
const DISPLAY_DECIMALS: u32 = 6;

/// Lamports → SOL display string (÷ 10^9, 6 decimals)
///
/// `1_500_000_000` → `"1.500000"`
pub fn format_lamports(lamports: u64) -> String {
    format_fixed(lamports as u128, 9)
}

/// Hex wei value (`"0x..."`) → ETH display string (÷ 10^18, 6 decimals)
///
/// `"0xde0b6b3a7640000"` → `"1.000000"`
pub fn format_wei_hex(hex_value: &str) -> Result<String, ProviderError> {
    let digits = hex_value.strip_prefix("0x").unwrap_or(hex_value);
    if digits.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "empty wei value".to_string(),
        ));
    }

    let wei = u128::from_str_radix(digits, 16).map_err(|e| {
        ProviderError::MalformedResponse(format!("invalid wei hex '{}': {}", hex_value, e))
    })?;

    Ok(format_fixed(wei, 18))
}

/// Format raw value với `decimals` chain decimals về 6 display decimals.
///
/// Chỉ dùng integer arithmetic — không floats, không mất precision
/// trong 6 chữ số hiển thị.
fn format_fixed(raw: u128, decimals: u32) -> String {
    debug_assert!(decimals >= DISPLAY_DECIMALS);

    let truncated = raw / 10u128.pow(decimals - DISPLAY_DECIMALS);
    let scale = 10u128.pow(DISPLAY_DECIMALS);
    format!("{}.{:06}", truncated / scale, truncated % scale)
}

// =============================================================================
// TESTS
// =============================================================================
