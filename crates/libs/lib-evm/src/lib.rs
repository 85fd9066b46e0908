//! # EVM Integration Library
//!
//! Everything swapdesk needs to talk to the outside world: the static token
//! catalog, the indicative price service, the liquidity-aggregator quote
//! service, and the JSON-RPC signer used to execute the approve-then-swap
//! sequence.
//!
//! The session state machine lives in the `swapdesk` app crate; this crate is
//! stateless apart from connection pools and safe to share across tasks.

// region: --- Modules
pub mod aggregator;
pub mod catalog;
pub mod pricing;
pub mod submitter;
pub mod types;
pub mod units;
pub mod wallet;
// endregion: --- Modules

// Re-export commonly used types
pub use aggregator::AggregatorClient;
pub use alloy_primitives::{Address, U256};
pub use catalog::TokenCatalog;
pub use pricing::PriceClient;
pub use submitter::{SubmitterEvent, TransactionSubmitter};
pub use types::*;
pub use wallet::{PendingTx, RpcWallet, Signer, WalletError, WalletStatus};
