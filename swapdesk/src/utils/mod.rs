//! # Utility Functions

pub mod validation;
