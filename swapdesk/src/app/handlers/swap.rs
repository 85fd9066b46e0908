//! # Swap Handlers
//!
//! Handlers for pair selection, side swapping, amount editing, and slippage.
//! All of these are local: the fresh price fetch that follows a pair change
//! is triggered separately by the orchestrator.

use crate::app::state::{SessionState, Side, SlippageTolerance};
use lib_evm::{units, Token};
use parking_lot::RwLock;
use std::sync::Arc;

/// Replace the token on one side of the pair.
///
/// The other side is left untouched, even if both sides now hold the same
/// token; that condition is only rejected at execution time. Both amounts and
/// the cached price are cleared since they referred to the old pair.
pub(crate) fn select_token(state: &Arc<RwLock<SessionState>>, side: Side, token: Token) {
    let mut state = state.write();
    match side {
        Side::Sell => state.pair.sell = token,
        Side::Buy => state.pair.buy = token,
    }
    state.amounts.clear();
    state.price_quote = None;
}

/// Swap the sell and buy sides of the pair.
pub(crate) fn swap_sides(state: &Arc<RwLock<SessionState>>) {
    let mut state = state.write();
    state.pair = state.pair.clone().swapped();
    state.amounts.clear();
    state.price_quote = None;
}

/// Record a new sell amount and rederive the buy estimate.
///
/// Pure local recomputation from the cached ratio; typing never triggers a
/// network request. Without a usable ratio or amount the estimate is cleared.
pub(crate) fn edit_sell_amount(state: &Arc<RwLock<SessionState>>, text: &str) {
    let mut state = state.write();
    state.amounts.sell = text.to_string();
    let estimate = state
        .price_quote
        .as_ref()
        .and_then(|quote| units::derive_buy_amount(text, quote.ratio, state.pair.buy.decimals))
        .unwrap_or_default();
    state.amounts.buy = estimate;
}

/// Change the slippage tolerance for subsequent attempts.
pub(crate) fn set_slippage(state: &Arc<RwLock<SessionState>>, slippage: SlippageTolerance) {
    state.write().slippage = slippage;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use lib_evm::{PriceQuote, TokenCatalog};

    fn session() -> Arc<RwLock<SessionState>> {
        let catalog = TokenCatalog::builtin();
        Arc::new(RwLock::new(SessionState::new(catalog.default_pair())))
    }

    fn with_ratio(state: &Arc<RwLock<SessionState>>, ratio: f64) {
        let mut s = state.write();
        let (sell, buy) = (s.pair.sell.address, s.pair.buy.address);
        s.price_quote = Some(PriceQuote {
            ratio,
            fetched_at: Utc::now(),
            sell_token: sell,
            buy_token: buy,
        });
    }

    #[test]
    fn selecting_a_token_clears_amounts_and_price() {
        let state = session();
        with_ratio(&state, 3000.0);
        edit_sell_amount(&state, "1");
        assert!(!state.read().amounts.buy.is_empty());

        let dai = TokenCatalog::builtin().by_symbol("DAI").unwrap().clone();
        select_token(&state, Side::Buy, dai.clone());

        let s = state.read();
        assert_eq!(s.pair.buy.symbol, "DAI");
        assert!(s.amounts.sell.is_empty());
        assert!(s.amounts.buy.is_empty());
        assert!(s.price_quote.is_none());
    }

    #[test]
    fn same_token_on_both_sides_is_allowed_at_selection() {
        let state = session();
        let sell = state.read().pair.sell.clone();

        select_token(&state, Side::Buy, sell);
        assert!(state.read().pair.is_degenerate());
    }

    #[test]
    fn swapping_sides_twice_restores_the_pair() {
        let state = session();
        let original = state.read().pair.clone();

        swap_sides(&state);
        assert_eq!(state.read().pair.sell.symbol, original.buy.symbol);

        swap_sides(&state);
        assert_eq!(state.read().pair.sell.symbol, original.sell.symbol);
        assert_eq!(state.read().pair.buy.symbol, original.buy.symbol);
    }

    #[test]
    fn editing_the_amount_derives_the_estimate_locally() {
        let state = session();
        with_ratio(&state, 3000.0);

        edit_sell_amount(&state, "1");
        assert_eq!(state.read().amounts.buy, "3000.0000");

        edit_sell_amount(&state, "");
        assert!(state.read().amounts.buy.is_empty());
    }

    #[test]
    fn editing_without_a_ratio_leaves_the_estimate_empty() {
        let state = session();
        edit_sell_amount(&state, "2.5");
        assert_eq!(state.read().amounts.sell, "2.5");
        assert!(state.read().amounts.buy.is_empty());
    }
}
