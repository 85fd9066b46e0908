//! # Async Tasks
//!
//! Background tasks for network work: price fetching and swap execution.
//! Tasks take a clone of the shared state and an event sender, do their work
//! on the Tokio runtime, and report results as [`crate::app::AppEvent`]s.

pub mod swap;
