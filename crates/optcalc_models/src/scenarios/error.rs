//! Scenario calculation errors.

use optcalc_core::types::PricingError;
use thiserror::Error;

/// Scenario arithmetic errors.
///
/// All variants are input errors; none of them arises from iteration.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::ScenarioError;
///
/// let err = ScenarioError::ZeroDenominator { field: "duration" };
/// assert_eq!(format!("{}", err), "duration must be non-zero");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScenarioError {
    /// An input is NaN or infinite.
    #[error("{field} must be finite, got {value}")]
    NonFinite {
        /// Input name
        field: &'static str,
        /// The offending value
        value: f64,
    },

    /// An input used as a divisor is zero.
    #[error("{field} must be non-zero")]
    ZeroDenominator {
        /// Input name
        field: &'static str,
    },

    /// Standard or downside deviation is zero or negative.
    #[error("Deviation must be positive, got {deviation}")]
    NonPositiveDeviation {
        /// The offending deviation
        deviation: f64,
    },

    /// An input lies outside its admissible range.
    #[error("{field} = {value} is out of range (expected {expected})")]
    OutOfRange {
        /// Input name
        field: &'static str,
        /// The offending value
        value: f64,
        /// Human-readable admissible range
        expected: &'static str,
    },
}

impl From<ScenarioError> for PricingError {
    fn from(err: ScenarioError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
