//! # EAMCET Library
//!
//! This library exposes the predictor's modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod store;

// Re-export eamcet_core for convenience
pub use eamcet_core;
