//! Sharpe and Sortino ratios.
//!
//! Both take annual figures in percent or decimal (the units cancel) and
//! divide the excess return by a deviation that must be strictly positive.

use super::{finite, ScenarioError};

fn excess_over(
    portfolio_return: f64,
    risk_free_rate: f64,
    deviation: f64,
) -> Result<f64, ScenarioError> {
    let rp = finite("portfolio_return", portfolio_return)?;
    let rf = finite("risk_free_rate", risk_free_rate)?;
    let sigma = finite("deviation", deviation)?;

    if sigma <= 0.0 {
        return Err(ScenarioError::NonPositiveDeviation { deviation: sigma });
    }
    Ok((rp - rf) / sigma)
}

/// Sharpe ratio `(Rp - Rf) / σp`.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::sharpe_ratio;
///
/// assert!((sharpe_ratio(12.0, 2.0, 15.0).unwrap() - 0.6667).abs() < 1e-4);
/// assert!(sharpe_ratio(12.0, 2.0, 0.0).is_err());
/// ```
pub fn sharpe_ratio(
    portfolio_return: f64,
    risk_free_rate: f64,
    standard_deviation: f64,
) -> Result<f64, ScenarioError> {
    excess_over(portfolio_return, risk_free_rate, standard_deviation)
}

/// Sortino ratio `(Rp - Rf) / σd`, with σd the downside deviation.
pub fn sortino_ratio(
    portfolio_return: f64,
    risk_free_rate: f64,
    downside_deviation: f64,
) -> Result<f64, ScenarioError> {
    excess_over(portfolio_return, risk_free_rate, downside_deviation)
}

/// Qualitative band for a Sortino ratio.
///
/// | Ratio | Rating |
/// |---|---|
/// | ≥ 2 | Excellent |
/// | ≥ 1 | Good |
/// | ≥ 0.5 | Fair |
/// | ≥ 0 | Poor |
/// | < 0 | VeryPoor |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SortinoRating {
    /// Ratio of 2 or more
    Excellent,
    /// Ratio in [1, 2)
    Good,
    /// Ratio in [0.5, 1)
    Fair,
    /// Ratio in [0, 0.5)
    Poor,
    /// Negative ratio
    VeryPoor,
}

impl SortinoRating {
    /// Bands a ratio.
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 2.0 {
            SortinoRating::Excellent
        } else if ratio >= 1.0 {
            SortinoRating::Good
        } else if ratio >= 0.5 {
            SortinoRating::Fair
        } else if ratio >= 0.0 {
            SortinoRating::Poor
        } else {
            SortinoRating::VeryPoor
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            SortinoRating::Excellent => "Excellent",
            SortinoRating::Good => "Good",
            SortinoRating::Fair => "Fair",
            SortinoRating::Poor => "Poor",
            SortinoRating::VeryPoor => "Very Poor",
        }
    }
}
