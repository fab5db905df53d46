//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors from Greeks and implied-volatility calculations

use optcalc_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// # Variants
/// - `InvalidSpot`, `InvalidStrike`, `InvalidExpiry`, `InvalidVolatility`,
///   `InvalidRate`, `InvalidPrice`: an input outside its domain
/// - `NonConvergence`: the implied-volatility iteration ran out of steps
/// - `DegenerateVega`: vega vanished during the implied-volatility iteration
/// - `NumericalInstability`: a NaN or infinite intermediate value
///
/// # Examples
/// ```
/// use optcalc_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Non-positive or non-finite underlying price.
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Non-positive or non-finite strike.
    #[error("Invalid strike price: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Non-positive or non-finite days to expiration.
    #[error("Invalid days to expiration: {days}")]
    InvalidExpiry {
        /// The invalid day count
        days: f64,
    },

    /// Non-positive or non-finite volatility.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Non-finite risk-free rate.
    #[error("Invalid risk-free rate: r = {rate}")]
    InvalidRate {
        /// The invalid rate value
        rate: f64,
    },

    /// Non-positive or non-finite observed option price.
    #[error("Invalid option price: {price}")]
    InvalidPrice {
        /// The invalid price value
        price: f64,
    },

    /// Implied volatility not found within the iteration budget.
    #[error("Implied volatility did not converge after {iterations} iterations")]
    NonConvergence {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Vega too close to zero for a Newton step.
    #[error("Vega vanished at σ = {volatility}")]
    DegenerateVega {
        /// Volatility at which vega vanished
        volatility: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidSpot { .. }
            | AnalyticalError::InvalidStrike { .. }
            | AnalyticalError::InvalidExpiry { .. }
            | AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidRate { .. }
            | AnalyticalError::InvalidPrice { .. } => PricingError::InvalidInput(err.to_string()),
            AnalyticalError::NonConvergence { .. } => PricingError::NonConvergence(err.to_string()),
            AnalyticalError::DegenerateVega { .. } | AnalyticalError::NumericalInstability { .. } => {
                PricingError::NumericDegeneracy(err.to_string())
            }
        }
    }
}
