//! Return on capital from option premium.

use super::{finite, ScenarioError};
use crate::instruments::DAYS_PER_YEAR;

/// Premium yield over a holding period.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct RoiMetrics {
    /// Premium over capital, percent
    pub roi: f64,
    /// Simple annualisation of `roi`, percent
    pub annualized_roi: f64,
    /// Premium collected per day
    pub premium_per_day: f64,
}

/// Computes ROI, annualised ROI and premium per day.
///
/// - `roi = premium / initial · 100`
/// - `premium_per_day = premium / duration_days`
/// - `annualized_roi = premium_per_day · 365 / initial · 100`
///
/// # Errors
/// `ZeroDenominator` for a zero capital or duration, `NonFinite` otherwise.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::roi_metrics;
///
/// let m = roi_metrics(1000.0, 250.0, 30.0).unwrap();
/// assert!((m.roi - 25.0).abs() < 1e-12);
/// assert!((m.premium_per_day - 8.3333).abs() < 1e-4);
/// assert!((m.annualized_roi - 304.1667).abs() < 1e-4);
/// ```
pub fn roi_metrics(
    initial_investment: f64,
    premium: f64,
    duration_days: f64,
) -> Result<RoiMetrics, ScenarioError> {
    let initial = finite("initial_investment", initial_investment)?;
    let premium = finite("premium", premium)?;
    let duration = finite("duration_days", duration_days)?;

    if initial == 0.0 {
        return Err(ScenarioError::ZeroDenominator {
            field: "initial_investment",
        });
    }
    if duration == 0.0 {
        return Err(ScenarioError::ZeroDenominator {
            field: "duration_days",
        });
    }

    let premium_per_day = premium / duration;
    Ok(RoiMetrics {
        roi: premium / initial * 100.0,
        annualized_roi: premium_per_day * DAYS_PER_YEAR / initial * 100.0,
        premium_per_day,
    })
}
