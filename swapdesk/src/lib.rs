//! # Swapdesk - Library Root
//!
//! Client-side orchestrator for ERC-20 token swaps against a liquidity
//! aggregator. This library crate contains all modules used by the binary
//! crate (`main.rs`).
//!
//! ## Architecture
//!
//! The application is event-driven: user actions mutate the shared session
//! state synchronously, network work runs on Tokio tasks, and results come
//! back to the session as [`app::AppEvent`]s over an async channel. State is
//! wrapped in `Arc<RwLock<SessionState>>` and locks are held briefly.
//!
//! ## Module Structure
//!
//! - **app**: Session state machine, events, handlers, and async tasks
//! - **core**: Service traits for dependency injection
//! - **utils**: Input validation

// Re-export main modules for testing and integration
pub mod app;
pub mod core;
pub mod utils;

// Re-export commonly used types for convenience
pub use app::{App, AppEvent, AttemptPhase, Notice, SessionState, Side, SlippageTolerance};
