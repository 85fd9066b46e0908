//! # Application Events
//!
//! Event types for async task communication between background tasks and the
//! session loop.

use lib_core::SwapError;
use lib_evm::PriceQuote;

/// User-facing notifications emitted by handlers and tasks.
///
/// These are semantic events; the presentation layer decides how to render
/// them.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    /// An execution request was rejected before any attempt started.
    Rejected(String),
    /// The indicative price could not be fetched; the estimate was cleared.
    PriceUnavailable,
    /// The approval transaction confirmed.
    ApprovalConfirmed { tx_hash: String },
    /// The swap transaction was sent and is awaiting confirmation.
    SwapSubmitted { tx_hash: String },
    /// The swap transaction confirmed.
    SwapConfirmed { tx_hash: String },
    /// The attempt ended in an error.
    AttemptFailed(SwapError),
}

/// Async task results sent back to the session loop.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// A price fetch finished. `seq` identifies the request so superseded
    /// responses can be dropped.
    RatioFetched {
        seq: u64,
        result: Result<PriceQuote, SwapError>,
    },
    /// A user-facing notification.
    Notice(Notice),
}
