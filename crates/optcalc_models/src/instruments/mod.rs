//! Option contract inputs.
//!
//! This module provides:
//! - `OptionParameters`: inputs to the Greeks engine
//! - `ImpliedVolatilityQuery`: inputs to the implied-volatility solver
//! - `DAYS_PER_YEAR`: the calendar-day convention for time to expiry

mod params;

pub use params::{ImpliedVolatilityQuery, OptionParameters, DAYS_PER_YEAR};
