//! REST API server for the optcalc calculators
//!
//! This crate exposes the Greeks, implied-volatility, max-pain and scenario
//! calculators of `optcalc_models` over HTTP/JSON.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;

// Re-export calculator crates for integration
pub use optcalc_core;
pub use optcalc_models;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
