//! # Amount Conversion
//!
//! Conversions between human-readable amount strings and on-chain base units.
//!
//! [`derive_buy_amount`] is display-only: it multiplies the entered amount by
//! the last indicative ratio and renders a fixed-precision estimate. The
//! authoritative exchange amount for execution always comes from the
//! aggregator's trade quote, so the displayed estimate and the executed
//! amount may legitimately differ slightly.

use alloy_primitives::U256;
use lib_core::error::{Result, SwapError};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fractional digits shown for the derived buy amount.
const DISPLAY_PRECISION: usize = 4;

/// Derive the displayed buy amount from the entered sell amount and the
/// current indicative ratio.
///
/// Returns `None` when the input is empty or not a number; the buy field
/// shows nothing rather than a placeholder zero.
///
/// Four fractional digits, further capped at the token's own decimals: a
/// token with fewer than four fractional digits never shows precision it
/// cannot represent on-chain.
pub fn derive_buy_amount(sell_text: &str, ratio: f64, buy_decimals: u8) -> Option<String> {
    let trimmed = sell_text.trim();
    if trimmed.is_empty() {
        return None;
    }

    let sell: f64 = trimmed.parse().ok()?;
    if !sell.is_finite() || sell < 0.0 {
        return None;
    }

    let precision = DISPLAY_PRECISION.min(buy_decimals as usize);
    Some(format!("{:.*}", precision, sell * ratio))
}

/// Scale a human-unit amount string into an integer base-unit amount.
///
/// Fractional dust below the token's precision is truncated, matching what
/// the chain can represent.
pub fn parse_base_units(text: &str, decimals: u8) -> Result<U256> {
    if decimals > 28 {
        return Err(SwapError::Validation(format!(
            "unsupported token precision: {decimals}"
        )));
    }

    let amount = Decimal::from_str(text.trim())
        .map_err(|e| SwapError::Validation(format!("invalid amount '{text}': {e}")))?;

    if amount.is_sign_negative() {
        return Err(SwapError::Validation("amount must be positive".to_string()));
    }

    let scale = Decimal::from_i128_with_scale(10i128.pow(u32::from(decimals)), 0);
    let scaled = amount.checked_mul(scale).ok_or_else(|| {
        SwapError::Validation(format!("amount '{text}' is out of range"))
    })?;

    let integral = scaled.trunc().to_string();
    let digits = integral.split('.').next().unwrap_or(&integral);

    U256::from_str_radix(digits, 10)
        .map_err(|e| SwapError::Validation(format!("amount '{text}' is out of range: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_buy_amount_with_four_digits() {
        assert_eq!(
            derive_buy_amount("1", 3000.0, 6).as_deref(),
            Some("3000.0000")
        );
        assert_eq!(
            derive_buy_amount("0.5", 3000.0, 6).as_deref(),
            Some("1500.0000")
        );
    }

    #[test]
    fn low_decimal_tokens_cap_the_displayed_precision() {
        assert_eq!(
            derive_buy_amount("1", 3000.0, 2).as_deref(),
            Some("3000.00")
        );
        assert_eq!(derive_buy_amount("1", 3000.0, 0).as_deref(), Some("3000"));
    }

    #[test]
    fn empty_or_garbage_input_yields_none() {
        assert_eq!(derive_buy_amount("", 3000.0, 6), None);
        assert_eq!(derive_buy_amount("   ", 3000.0, 6), None);
        assert_eq!(derive_buy_amount("abc", 3000.0, 6), None);
        assert_eq!(derive_buy_amount("-1", 3000.0, 6), None);
    }

    #[test]
    fn display_estimate_tracks_ratio_within_tolerance() {
        // The estimate is an approximation of x * ratio, never asserted equal
        // to an executed amount.
        let shown: f64 = derive_buy_amount("0.123", 2987.65, 18)
            .unwrap()
            .parse()
            .unwrap();
        assert!((shown - 0.123 * 2987.65).abs() < 1e-4);
    }

    #[test]
    fn parses_whole_amounts_into_base_units() {
        assert_eq!(
            parse_base_units("1", 18).unwrap(),
            U256::from(10u64).pow(U256::from(18))
        );
        assert_eq!(parse_base_units("3000", 6).unwrap(), U256::from(3_000_000_000u64));
    }

    #[test]
    fn truncates_sub_precision_dust() {
        // 0.1234567 USDC has 7 fractional digits; the 7th is dropped.
        assert_eq!(parse_base_units("0.1234567", 6).unwrap(), U256::from(123_456u64));
    }

    #[test]
    fn rejects_negative_and_malformed_amounts() {
        assert!(parse_base_units("-1", 18).is_err());
        assert!(parse_base_units("1.2.3", 18).is_err());
        assert!(parse_base_units("", 18).is_err());
    }
}
