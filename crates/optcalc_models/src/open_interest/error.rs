//! Open-interest table errors.

use optcalc_core::types::PricingError;
use thiserror::Error;

/// Errors raised while building a [`MaxPainTable`](super::MaxPainTable).
///
/// Row indices are zero-based positions in the input table.
///
/// # Examples
/// ```
/// use optcalc_models::open_interest::OpenInterestError;
///
/// let err = OpenInterestError::NegativeOpenInterest { index: 2, value: -5.0 };
/// assert!(format!("{}", err).contains("row 2"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OpenInterestError {
    /// The table has no rows.
    #[error("Open-interest table is empty")]
    EmptyTable,

    /// Strike is non-positive or not finite.
    #[error("Invalid strike in row {index}: K = {strike}")]
    InvalidStrike {
        /// Row position
        index: usize,
        /// The invalid strike value
        strike: f64,
    },

    /// Open interest is NaN or infinite.
    #[error("Non-finite open interest in row {index}")]
    NonFiniteOpenInterest {
        /// Row position
        index: usize,
    },

    /// Open interest is below zero.
    #[error("Negative open interest in row {index}: {value}")]
    NegativeOpenInterest {
        /// Row position
        index: usize,
        /// The negative value
        value: f64,
    },
}

impl From<OpenInterestError> for PricingError {
    fn from(err: OpenInterestError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            format!("{}", OpenInterestError::EmptyTable),
            "Open-interest table is empty"
        );
        assert_eq!(
            format!(
                "{}",
                OpenInterestError::InvalidStrike {
                    index: 0,
                    strike: -1.0
                }
            ),
            "Invalid strike in row 0: K = -1"
        );
    }

    #[test]
    fn test_maps_to_invalid_input() {
        let err: PricingError = OpenInterestError::NonFiniteOpenInterest { index: 3 }.into();
        assert_eq!(err.code(), "invalid_input");
    }
}
