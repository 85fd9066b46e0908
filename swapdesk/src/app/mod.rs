//! # Application Orchestrator
//!
//! The [`App`] struct coordinates the session state machine, the synchronous
//! action handlers, and the async tasks that talk to the network.
//!
//! ## Architecture
//!
//! The application follows an event-driven pattern:
//!
//! - User actions call `App` methods, which mutate state synchronously via
//!   the `handlers` module and spawn network work via the `tasks` module.
//! - Tasks send their results back as [`AppEvent`]s over an unbounded
//!   async channel.
//! - The session loop drains the channel with [`App::on_tick`] (or awaits
//!   with [`App::recv_event`]) and applies each event with
//!   [`App::handle_event`], which returns any user-facing [`Notice`].
//!
//! ## State Management
//!
//! State lives in `Arc<RwLock<SessionState>>`, shared between the session
//! loop and the async tasks. Locks are held briefly and never across an
//! await.
//!
//! ## Price staleness
//!
//! Every price fetch carries a sequence number taken when the fetch starts.
//! [`App::handle_event`] drops any response whose number no longer matches
//! the latest, so a slow response for a superseded pair can never overwrite
//! a newer price (last call wins).

// region: --- Modules
pub mod events;
pub mod handlers;
pub mod state;
pub mod tasks;

pub use events::{AppEvent, Notice};
pub use state::{AttemptPhase, SessionState, Side, SlippageTolerance};
// endregion: --- Modules

use crate::core::service::{AggregatorService, PriceService};
use async_channel::{Receiver, Sender};
use lib_evm::{units, Signer, Token, TokenCatalog, WalletStatus};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::debug;

/// Main application orchestrator.
pub struct App {
    /// Shared session state. Public so the presentation layer can read it
    /// for rendering; mutate only through the methods below.
    pub state: Arc<RwLock<SessionState>>,
    price: Arc<dyn PriceService>,
    aggregator: Arc<dyn AggregatorService>,
    signer: Arc<dyn Signer>,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl App {
    /// Create an app over the given services, starting from the catalog's
    /// default pair. Wallet status is taken from the signer.
    pub fn new(
        catalog: &TokenCatalog,
        price: Arc<dyn PriceService>,
        aggregator: Arc<dyn AggregatorService>,
        signer: Arc<dyn Signer>,
    ) -> Self {
        let (event_tx, event_rx) = async_channel::unbounded();

        let mut session = SessionState::new(catalog.default_pair());
        session.wallet = match signer.address() {
            Some(address) => WalletStatus::Connected(address),
            None => WalletStatus::Disconnected,
        };

        Self {
            state: Arc::new(RwLock::new(session)),
            price,
            aggregator,
            signer,
            event_tx,
            event_rx,
        }
    }

    /// Kick off the initial price fetch for the default pair.
    pub fn start(&self) {
        self.trigger_ratio_fetch();
    }

    /// Replace the token on one side of the pair and fetch a fresh price.
    pub fn select_token(&self, side: Side, token: Token) {
        handlers::swap::select_token(&self.state, side, token);
        self.trigger_ratio_fetch();
    }

    /// Swap the sell and buy sides and fetch a fresh price.
    pub fn swap_sides(&self) {
        handlers::swap::swap_sides(&self.state);
        self.trigger_ratio_fetch();
    }

    /// Record a new sell amount; the buy estimate is rederived locally.
    pub fn edit_sell_amount(&self, text: &str) {
        handlers::swap::edit_sell_amount(&self.state, text);
    }

    /// Change the slippage tolerance for subsequent attempts.
    pub fn set_slippage(&self, slippage: SlippageTolerance) {
        handlers::swap::set_slippage(&self.state, slippage);
    }

    /// Request execution of the current swap form.
    ///
    /// Precondition failures surface as a [`Notice::Rejected`] event; an
    /// accepted request runs the approve-then-swap sequence in the
    /// background and reports progress through the event channel.
    pub fn request_execution(&self) {
        tasks::swap::execute_swap(
            self.state.clone(),
            self.aggregator.clone(),
            self.signer.clone(),
            self.event_tx.clone(),
        );
    }

    /// Drain all pending events, returning the notices to show the user.
    pub fn on_tick(&self) -> Vec<Notice> {
        let mut notices = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            if let Some(notice) = self.handle_event(event) {
                notices.push(notice);
            }
        }
        notices
    }

    /// Await the next event from the background tasks.
    ///
    /// Returns `None` only when all senders are gone.
    pub async fn recv_event(&self) -> Option<AppEvent> {
        self.event_rx.recv().await.ok()
    }

    /// Apply one event to the session, returning any user-facing notice.
    pub fn handle_event(&self, event: AppEvent) -> Option<Notice> {
        match event {
            AppEvent::RatioFetched { seq, result } => {
                let mut state = self.state.write();
                if seq != state.price_seq {
                    debug!("dropping stale price response (seq {})", seq);
                    return None;
                }
                state.price_loading = false;

                match result {
                    Ok(quote) => {
                        let estimate = units::derive_buy_amount(
                            &state.amounts.sell,
                            quote.ratio,
                            state.pair.buy.decimals,
                        )
                        .unwrap_or_default();
                        state.amounts.buy = estimate;
                        state.price_quote = Some(quote);
                        None
                    }
                    Err(_) => {
                        // No stale estimate: without a price there is nothing
                        // to derive the buy amount from.
                        state.price_quote = None;
                        state.amounts.buy.clear();
                        Some(Notice::PriceUnavailable)
                    }
                }
            }
            AppEvent::Notice(notice) => Some(notice),
        }
    }

    fn trigger_ratio_fetch(&self) {
        tasks::swap::trigger_ratio_fetch(
            self.state.clone(),
            self.price.clone(),
            self.event_tx.clone(),
        );
    }
}
