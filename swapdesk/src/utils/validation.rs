/// Validation utilities for execution preconditions

use crate::app::state::AttemptPhase;
use lib_evm::{TokenPair, WalletStatus};

pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

/// Check the preconditions for starting an execution attempt.
///
/// Checked in order: no attempt already in flight, wallet connected, a sell
/// amount entered, distinct tokens on the two sides. The first failure wins,
/// so a disconnected wallet is reported even when the amount is also missing.
pub fn validate_execution(
    wallet: &WalletStatus,
    pair: &TokenPair,
    sell_amount: &str,
    attempt: &AttemptPhase,
) -> ValidationResult {
    if attempt.is_in_flight() {
        return ValidationResult::err("A swap is already in progress");
    }

    if !wallet.is_connected() {
        return ValidationResult::err("Connect a wallet first");
    }

    if sell_amount.trim().is_empty() {
        return ValidationResult::err("Enter an amount to swap");
    }

    if pair.is_degenerate() {
        return ValidationResult::err("Cannot swap the same token");
    }

    ValidationResult::ok()
}
