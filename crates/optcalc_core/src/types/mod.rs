//! Core option and error types.
//!
//! This module provides:
//! - `option_type`: Call/Put side of a vanilla option
//! - `error`: Structured error types for calculator and solver operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`OptionType`] from `option_type`
//! - [`PricingError`], [`SolverError`] from `error`

pub mod error;
pub mod option_type;

// Re-export commonly used types at module level
pub use error::{PricingError, SolverError};
pub use option_type::{OptionType, OptionTypeParseError};
