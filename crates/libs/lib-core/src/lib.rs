//! # Core Library
//!
//! Error taxonomy and configuration shared by every swapdesk crate.

pub mod config;
pub mod error;

// Re-export commonly used types
pub use config::{core_config, init_config, Config};
pub use error::{Result, SwapError};
