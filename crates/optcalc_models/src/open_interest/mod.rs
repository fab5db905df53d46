//! Open-interest aggregation.
//!
//! This module provides:
//! - `OpenInterestRow` / `MaxPainTable`: a validated open-interest table
//! - `MaxPainConvention`: which extremum of the pain curve is reported
//! - `OpenInterestError`: table validation failures

mod error;
mod max_pain;

pub use error::OpenInterestError;
pub use max_pain::{MaxPainConvention, MaxPainTable, OpenInterestRow, StrikePain};
