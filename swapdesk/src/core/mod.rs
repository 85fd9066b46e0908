//! # Core Module
//!
//! Service traits shared across the application.

pub mod service;

pub use service::{AggregatorService, PriceService};
