//! # Swap Tasks
//!
//! Async tasks for price fetching and swap execution.

use crate::app::events::{AppEvent, Notice};
use crate::app::state::{AttemptPhase, SessionState};
use crate::core::service::{AggregatorService, PriceService};
use crate::utils::validation;
use async_channel::Sender;
use lib_evm::{units, Signer, SubmitterEvent, TransactionSubmitter, U256};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::spawn;
use tracing::{info, warn};

/// Trigger an async price fetch for the currently selected pair.
///
/// Bumps the price sequence number under the lock, so any response still in
/// flight for the previous pair arrives with a stale tag and is dropped by
/// the event loop.
pub(crate) fn trigger_ratio_fetch(
    state: Arc<RwLock<SessionState>>,
    price: Arc<dyn PriceService>,
    event_tx: Sender<AppEvent>,
) {
    let (seq, sell_token, buy_token) = {
        let mut state = state.write();
        state.price_seq += 1;
        state.price_loading = true;
        (
            state.price_seq,
            state.pair.sell.address,
            state.pair.buy.address,
        )
    };

    spawn(async move {
        let result = price.fetch_ratio(sell_token, buy_token).await;
        let _ = event_tx.try_send(AppEvent::RatioFetched { seq, result });
    });
}

/// Start one execution attempt for the current session.
///
/// Preconditions are checked synchronously and a failed check rejects the
/// request without touching the network or the attempt phase. On success the
/// attempt moves to `ApprovalPending` before the task is spawned, so a second
/// request cannot start a concurrent attempt.
pub(crate) fn execute_swap(
    state: Arc<RwLock<SessionState>>,
    aggregator: Arc<dyn AggregatorService>,
    signer: Arc<dyn Signer>,
    event_tx: Sender<AppEvent>,
) {
    let (pair, sell_amount, taker, slippage_fraction) = {
        let mut state = state.write();

        let check = validation::validate_execution(
            &state.wallet,
            &state.pair,
            &state.amounts.sell,
            &state.attempt,
        );
        if !check.is_valid {
            let reason = check.error.unwrap_or_else(|| "Invalid request".to_string());
            warn!("execution rejected: {}", reason);
            let _ = event_tx.try_send(AppEvent::Notice(Notice::Rejected(reason)));
            return;
        }

        // Checked by validate_execution above.
        let taker = match state.wallet.address() {
            Some(address) => address,
            None => return,
        };

        let sell_amount =
            match units::parse_base_units(&state.amounts.sell, state.pair.sell.decimals) {
                Ok(amount) if amount > U256::ZERO => amount,
                Ok(_) => {
                    let _ = event_tx.try_send(AppEvent::Notice(Notice::Rejected(
                        "Amount must be greater than zero".to_string(),
                    )));
                    return;
                }
                Err(e) => {
                    warn!("unparseable sell amount: {}", e);
                    let _ = event_tx
                        .try_send(AppEvent::Notice(Notice::Rejected(e.user_message())));
                    return;
                }
            };

        state.attempt = AttemptPhase::ApprovalPending;
        (
            state.pair.clone(),
            sell_amount,
            taker,
            state.slippage.as_fraction(),
        )
    };

    info!(
        "starting attempt: {} {} -> {}",
        sell_amount, pair.sell.symbol, pair.buy.symbol
    );

    spawn(async move {
        // A fresh quote per attempt; quotes are execution-specific and are
        // never cached or reused.
        let quote = match aggregator
            .fetch_trade_quote(
                pair.sell.address,
                pair.buy.address,
                sell_amount,
                taker,
                slippage_fraction,
            )
            .await
        {
            Ok(quote) => quote,
            Err(e) => {
                warn!("trade quote failed: {}", e);
                state.write().attempt = AttemptPhase::Failed(e.clone());
                let _ = event_tx.try_send(AppEvent::Notice(Notice::AttemptFailed(e)));
                return;
            }
        };

        let submitter = TransactionSubmitter::new(signer.as_ref());
        let progress_state = state.clone();
        let progress_tx = event_tx.clone();

        let result = submitter
            .execute(&quote, |event| match event {
                SubmitterEvent::ApprovalConfirmed(receipt) => {
                    progress_state.write().attempt = AttemptPhase::ApprovalConfirmed;
                    let _ = progress_tx.try_send(AppEvent::Notice(Notice::ApprovalConfirmed {
                        tx_hash: receipt.tx_hash,
                    }));
                }
                SubmitterEvent::SwapSubmitted { tx_hash } => {
                    progress_state.write().attempt = AttemptPhase::SwapPending;
                    let _ = progress_tx
                        .try_send(AppEvent::Notice(Notice::SwapSubmitted { tx_hash }));
                }
                SubmitterEvent::SwapConfirmed(_) => {}
            })
            .await;

        match result {
            Ok(receipt) => {
                state.write().attempt = AttemptPhase::SwapConfirmed {
                    tx_hash: receipt.tx_hash.clone(),
                };
                let _ = event_tx.try_send(AppEvent::Notice(Notice::SwapConfirmed {
                    tx_hash: receipt.tx_hash,
                }));
            }
            Err(e) => {
                warn!("attempt failed: {}", e);
                state.write().attempt = AttemptPhase::Failed(e.clone());
                let _ = event_tx.try_send(AppEvent::Notice(Notice::AttemptFailed(e)));
            }
        }
    });
}
