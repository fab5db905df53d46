//! Breakeven price at expiry.

use optcalc_core::types::OptionType;

use super::{finite, ScenarioError};

/// Underlying price at which a long option exactly recovers its premium.
///
/// Call: `strike + premium`; Put: `strike - premium`.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::breakeven_price;
/// use optcalc_core::types::OptionType;
///
/// assert_eq!(breakeven_price(OptionType::Call, 500.0, 5.5).unwrap(), 505.5);
/// assert_eq!(breakeven_price(OptionType::Put, 500.0, 5.5).unwrap(), 494.5);
/// ```
pub fn breakeven_price(
    option_type: OptionType,
    strike: f64,
    premium: f64,
) -> Result<f64, ScenarioError> {
    let strike = finite("strike", strike)?;
    let premium = finite("premium", premium)?;

    Ok(match option_type {
        OptionType::Call => strike + premium,
        OptionType::Put => strike - premium,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_finite() {
        assert!(matches!(
            breakeven_price(OptionType::Call, f64::NAN, 1.0),
            Err(ScenarioError::NonFinite { field: "strike", .. })
        ));
        assert!(matches!(
            breakeven_price(OptionType::Put, 100.0, f64::INFINITY),
            Err(ScenarioError::NonFinite { field: "premium", .. })
        ));
    }

    #[test]
    fn test_zero_premium() {
        assert_eq!(breakeven_price(OptionType::Put, 42.0, 0.0).unwrap(), 42.0);
    }
}
