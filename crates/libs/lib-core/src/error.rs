//! # Centralized Error Handling
//!
//! This module defines the application-wide error type [`SwapError`] used
//! consistently across all swapdesk crates. It follows the `thiserror` pattern
//! for ergonomic error handling.
//!
//! ## Error Categories
//!
//! Errors are categorized by the boundary where they occur:
//!
//! 1. **Service Errors** - external HTTP collaborators
//!    - [`PriceUnavailable`](SwapError::PriceUnavailable) - ratio fetch failed;
//!      recoverable, the displayed estimate is cleared
//!    - [`QuoteFailed`](SwapError::QuoteFailed) - trade-quote fetch failed at
//!      execution time, before any on-chain action
//!
//! 2. **User Errors**
//!    - [`Validation`](SwapError::Validation) - duplicate pair, empty amount,
//!      disconnected wallet; rejected before any network call
//!
//! 3. **On-chain Errors** - terminal states of an execution attempt
//!    - [`ApprovalFailed`](SwapError::ApprovalFailed)
//!    - [`SwapFailed`](SwapError::SwapFailed)
//!
//! 4. **Infrastructure Errors**
//!    - [`Config`](SwapError::Config) - startup/environment issues
//!    - [`Wallet`](SwapError::Wallet) - signer transport issues outside an
//!      attempt (connection checks, balance queries)
//!
//! No variant is fatal to the process: every failure is caught at the boundary
//! where it occurs, converted to one of these kinds, and the session remains
//! usable afterwards. Nothing is retried automatically - a retry is always a
//! new user action.

use thiserror::Error;
use tracing::warn;

/// Convenience type alias for `Result<T, SwapError>`.
pub type Result<T> = std::result::Result<T, SwapError>;

/// Application-wide error type covering all failure scenarios.
///
/// Each variant includes a descriptive `String` for context. The `#[error]`
/// attribute from `thiserror` provides the `Display` implementation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SwapError {
    /// The indicative price for the selected pair could not be fetched.
    #[error("price unavailable: {0}")]
    PriceUnavailable(String),

    /// The aggregator refused or failed to produce an executable trade quote.
    #[error("trade quote failed: {0}")]
    QuoteFailed(String),

    /// An execution precondition was violated; no network call was made.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The token-spend approval transaction was rejected or reverted.
    #[error("approval failed: {0}")]
    ApprovalFailed(String),

    /// The swap transaction was rejected or reverted after a confirmed approval.
    #[error("swap failed: {0}")]
    SwapFailed(String),

    /// Configuration error during startup or environment loading.
    #[error("configuration error: {0}")]
    Config(String),

    /// Signer/wallet transport error outside a transaction attempt.
    #[error("wallet error: {0}")]
    Wallet(String),
}

impl SwapError {
    /// Get a user-facing message for this error.
    ///
    /// Service transport details are collapsed to a generic message; everything
    /// the user can act on is passed through.
    pub fn user_message(&self) -> String {
        match self {
            SwapError::Validation(msg) => msg.clone(),
            SwapError::QuoteFailed(msg) => format!("Could not get a trade quote: {msg}"),
            SwapError::ApprovalFailed(msg) => format!("Token approval failed: {msg}"),
            SwapError::SwapFailed(msg) => format!("Swap failed: {msg}"),
            SwapError::PriceUnavailable(_) => "Price temporarily unavailable".to_string(),
            SwapError::Config(msg) | SwapError::Wallet(msg) => {
                warn!("internal error collapsed for display: {}", msg);
                "An internal error occurred".to_string()
            }
        }
    }

    /// Whether this error terminates an in-flight execution attempt.
    pub fn is_attempt_terminal(&self) -> bool {
        matches!(
            self,
            SwapError::QuoteFailed(_) | SwapError::ApprovalFailed(_) | SwapError::SwapFailed(_)
        )
    }
}
