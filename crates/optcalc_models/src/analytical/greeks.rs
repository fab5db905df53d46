//! Greeks reported in trading conventions.

use super::black_scholes::Greeks;
use crate::instruments::DAYS_PER_YEAR;

/// Option Greeks scaled the way the calculators display them.
///
/// | Field | Scaling |
/// |---|---|
/// | `delta` | raw delta × 100 (percent) |
/// | `gamma` | raw |
/// | `theta` | raw theta ÷ 365 (per calendar day) |
/// | `vega` | raw vega ÷ 100 (per volatility point) |
///
/// # Examples
/// ```
/// use optcalc_models::analytical::{BlackScholes, OptionGreeks};
/// use optcalc_core::types::OptionType;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let greeks = OptionGreeks::from(bs.greeks(OptionType::Call, 100.0, 1.0));
/// assert!((greeks.delta - 63.683).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionGreeks {
    /// Delta in percent
    pub delta: f64,
    /// Gamma per unit of spot
    pub gamma: f64,
    /// Theta per calendar day
    pub theta: f64,
    /// Vega per volatility point
    pub vega: f64,
}

impl OptionGreeks {
    /// Returns true when every field is finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.theta.is_finite()
            && self.vega.is_finite()
    }
}

impl From<Greeks<f64>> for OptionGreeks {
    fn from(raw: Greeks<f64>) -> Self {
        Self {
            delta: raw.delta * 100.0,
            gamma: raw.gamma,
            theta: raw.theta / DAYS_PER_YEAR,
            vega: raw.vega / 100.0,
        }
    }
}
