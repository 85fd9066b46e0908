//! # Session State
//!
//! The shared state of one swap session: the selected pair, entered amounts,
//! the latest indicative price, and the lifecycle of the current execution
//! attempt. Wrapped in `Arc<RwLock<SessionState>>` by the orchestrator and
//! shared with async tasks; locks are held briefly.

use lib_core::SwapError;
use lib_evm::{PriceQuote, TokenPair, WalletStatus};

/// Which side of the pair a token selection targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Sell,
    Buy,
}

/// Slippage tolerance options offered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlippageTolerance {
    /// 0.5%
    Low,
    /// 2.5%
    #[default]
    Medium,
    /// 5%
    High,
}

impl SlippageTolerance {
    pub const ALL: [SlippageTolerance; 3] = [
        SlippageTolerance::Low,
        SlippageTolerance::Medium,
        SlippageTolerance::High,
    ];

    /// Tolerance as a percentage, for display.
    pub fn as_percent(&self) -> f64 {
        match self {
            SlippageTolerance::Low => 0.5,
            SlippageTolerance::Medium => 2.5,
            SlippageTolerance::High => 5.0,
        }
    }

    /// Tolerance as a fraction, the unit the aggregator expects.
    pub fn as_fraction(&self) -> f64 {
        self.as_percent() / 100.0
    }
}

/// Lifecycle of the current execution attempt.
///
/// A new attempt may only start from `NotStarted`, `SwapConfirmed`, or
/// `Failed`; the three intermediate states mean an attempt is in flight and
/// further execution requests are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AttemptPhase {
    /// No attempt started since the last reset.
    #[default]
    NotStarted,
    /// Quote fetched (or being fetched) and approval submitted, awaiting
    /// confirmation.
    ApprovalPending,
    /// Approval confirmed on-chain; swap not yet submitted.
    ApprovalConfirmed,
    /// Swap transaction submitted, awaiting confirmation.
    SwapPending,
    /// The swap confirmed on-chain.
    SwapConfirmed { tx_hash: String },
    /// The attempt ended in an error; a later request starts a fresh attempt.
    Failed(SwapError),
}

impl AttemptPhase {
    pub fn is_in_flight(&self) -> bool {
        matches!(
            self,
            AttemptPhase::ApprovalPending
                | AttemptPhase::ApprovalConfirmed
                | AttemptPhase::SwapPending
        )
    }
}

/// The two amount fields of the swap form.
///
/// `sell` is whatever the user typed; `buy` is a derived display estimate and
/// never directly editable.
#[derive(Debug, Clone, Default)]
pub struct AmountPair {
    pub sell: String,
    pub buy: String,
}

impl AmountPair {
    pub fn clear(&mut self) {
        self.sell.clear();
        self.buy.clear();
    }
}

/// Full state of one swap session.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Selected trading pair.
    pub pair: TokenPair,
    /// Entered sell amount and derived buy estimate.
    pub amounts: AmountPair,
    /// Selected slippage tolerance.
    pub slippage: SlippageTolerance,
    /// Latest indicative price for `pair`, if any fetch has succeeded.
    pub price_quote: Option<PriceQuote>,
    /// Sequence number of the most recent price request. Responses tagged
    /// with an older number are stale and dropped.
    pub price_seq: u64,
    /// A price fetch is outstanding.
    pub price_loading: bool,
    /// Lifecycle of the current execution attempt.
    pub attempt: AttemptPhase,
    /// Wallet connection status.
    pub wallet: WalletStatus,
}

impl SessionState {
    pub fn new(pair: TokenPair) -> Self {
        Self {
            pair,
            amounts: AmountPair::default(),
            slippage: SlippageTolerance::default(),
            price_quote: None,
            price_seq: 0,
            price_loading: false,
            attempt: AttemptPhase::default(),
            wallet: WalletStatus::Disconnected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_slippage_is_two_and_a_half_percent() {
        assert_eq!(SlippageTolerance::default(), SlippageTolerance::Medium);
        assert_eq!(SlippageTolerance::default().as_percent(), 2.5);
        assert_eq!(SlippageTolerance::default().as_fraction(), 0.025);
    }

    #[test]
    fn intermediate_phases_count_as_in_flight() {
        assert!(!AttemptPhase::NotStarted.is_in_flight());
        assert!(AttemptPhase::ApprovalPending.is_in_flight());
        assert!(AttemptPhase::ApprovalConfirmed.is_in_flight());
        assert!(AttemptPhase::SwapPending.is_in_flight());
        assert!(!AttemptPhase::SwapConfirmed {
            tx_hash: "0xabc".to_string()
        }
        .is_in_flight());
        assert!(!AttemptPhase::Failed(SwapError::SwapFailed("reverted".to_string()))
            .is_in_flight());
    }
}
