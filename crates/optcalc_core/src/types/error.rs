//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: The three-way taxonomy every calculator failure maps into
//! - `SolverError`: Errors from root-finding solvers

use std::fmt;
use thiserror::Error;

/// Categorised calculator errors.
///
/// Every failure in the calculators is recovered locally and reported as one
/// of these variants; none of them aborts the caller.
///
/// # Variants
/// - `InvalidInput`: A parameter is non-positive, NaN, or outside its domain
/// - `NonConvergence`: An iterative solver exhausted its iteration budget
/// - `NumericDegeneracy`: A zero derivative or a NaN/infinite intermediate
///
/// # Examples
/// ```
/// use optcalc_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("Negative spot price".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: Negative spot price");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Iterative computation did not converge
    NonConvergence(String),

    /// Numerical degeneracy during computation
    NumericDegeneracy(String),
}

impl PricingError {
    /// Short machine-readable code for the error category.
    ///
    /// # Examples
    /// ```
    /// use optcalc_core::types::PricingError;
    ///
    /// let err = PricingError::NonConvergence("100 iterations".to_string());
    /// assert_eq!(err.code(), "non_convergence");
    /// ```
    pub fn code(&self) -> &'static str {
        match self {
            PricingError::InvalidInput(_) => "invalid_input",
            PricingError::NonConvergence(_) => "non_convergence",
            PricingError::NumericDegeneracy(_) => "numeric_degeneracy",
        }
    }
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::NonConvergence(msg) => write!(f, "Non-convergence: {}", msg),
            PricingError::NumericDegeneracy(msg) => {
                write!(f, "Numeric degeneracy: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Root-finding solver errors.
///
/// Provides structured error handling for root-finding solver operations
/// with descriptive context for each failure mode.
///
/// # Variants
/// - `MaxIterationsExceeded`: Solver failed to converge within iteration limit
/// - `DerivativeNearZero`: Derivative too small for Newton-Raphson
/// - `NoBracket`: Function values at bracket endpoints have same sign
/// - `NumericalInstability`: General numerical instability
///
/// # Examples
/// ```
/// use optcalc_core::types::SolverError;
///
/// let err = SolverError::MaxIterationsExceeded { iterations: 100 };
/// assert!(format!("{}", err).contains("100 iterations"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolverError {
    /// Solver failed to converge within maximum iterations.
    #[error("Failed to converge after {iterations} iterations")]
    MaxIterationsExceeded {
        /// Number of iterations attempted
        iterations: usize,
    },

    /// Derivative near zero (division by zero risk in Newton-Raphson).
    #[error("Derivative near zero at x = {x}")]
    DerivativeNearZero {
        /// The x value where derivative was near zero
        x: f64,
    },

    /// No valid bracket (function values at endpoints have same sign).
    #[error("No bracket: f({a}) and f({b}) have same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),
}

impl From<SolverError> for PricingError {
    fn from(err: SolverError) -> Self {
        match err {
            SolverError::MaxIterationsExceeded { .. } | SolverError::NoBracket { .. } => {
                PricingError::NonConvergence(err.to_string())
            }
            SolverError::DerivativeNearZero { .. } | SolverError::NumericalInstability(_) => {
                PricingError::NumericDegeneracy(err.to_string())
            }
        }
    }
}
