//! # Action Handlers
//!
//! Synchronous handlers for user actions. Each mutates the shared session
//! state under a brief write lock; anything needing the network goes through
//! the `tasks` module instead.

pub mod swap;
