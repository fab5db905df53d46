//! Margin (leveraged long) scenarios.
//!
//! A position of `capital + loan` is bought, the underlying moves by
//! `price_change_pct`, and simple interest accrues on the loan:
//!
//! - interest = loan · rate% · days / 365
//! - gross (margin) = buying power · Δ%
//! - net (margin) = gross - interest
//! - margin-call value = loan / (1 - maintenance margin)

use super::{finite, ScenarioError};
use crate::instruments::DAYS_PER_YEAR;

/// Default maintenance-margin requirement (30%).
pub const DEFAULT_MAINTENANCE_MARGIN: f64 = 0.30;

/// Price moves, in percent, sampled by [`equity_projection`].
pub const PROJECTION_STEPS: [f64; 11] = [
    -50.0, -40.0, -30.0, -20.0, -10.0, 0.0, 10.0, 20.0, 30.0, 40.0, 50.0,
];

/// Inputs for a margin scenario.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::{MarginScenario, DEFAULT_MAINTENANCE_MARGIN};
///
/// let scenario = MarginScenario {
///     initial_capital: 10_000.0,
///     margin_loan: 10_000.0,
///     annual_interest_rate_pct: 8.0,
///     duration_days: 365.0,
///     price_change_pct: 10.0,
/// };
/// let result = scenario.evaluate(DEFAULT_MAINTENANCE_MARGIN).unwrap();
/// assert!((result.net_profit_with_margin - 1200.0).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MarginScenario {
    /// Own funds invested (> 0)
    pub initial_capital: f64,
    /// Borrowed funds (≥ 0)
    pub margin_loan: f64,
    /// Annual loan interest rate in percent (≥ 0)
    pub annual_interest_rate_pct: f64,
    /// Holding period in days (≥ 0)
    pub duration_days: f64,
    /// Move of the underlying in percent (any sign)
    pub price_change_pct: f64,
}

/// Outcome of a margin scenario, cash-only alongside leveraged.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct MarginResult {
    /// Capital plus loan
    pub buying_power: f64,
    /// Interest accrued on the loan over the holding period
    pub interest_cost: f64,
    /// Profit of the unleveraged position
    pub profit_without_margin: f64,
    /// Value of the unleveraged position at the end
    pub total_value_without_margin: f64,
    /// Percent return of the unleveraged position
    pub roi_without_margin: f64,
    /// Profit of the leveraged position before interest
    pub gross_profit_with_margin: f64,
    /// Profit of the leveraged position after interest
    pub net_profit_with_margin: f64,
    /// Equity of the leveraged position at the end
    pub total_value_with_margin: f64,
    /// Percent return on capital of the leveraged position
    pub roi_with_margin: f64,
    /// `|roi_with / roi_without|`; `None` when the unleveraged ROI is zero
    pub roi_amplification: Option<f64>,
    /// Buying power over capital
    pub leverage_factor: f64,
    /// Portfolio value at which the maintenance requirement is breached
    pub margin_call_value: f64,
    /// Percent fall from buying power to `margin_call_value`
    pub margin_call_drop_pct: f64,
    /// Whether the margin-call value lies below the current buying power
    pub margin_call_below_current: bool,
}

/// One sample of the cash-only versus leveraged equity curve.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ProjectionPoint {
    /// Move of the underlying in percent
    pub price_change_pct: f64,
    /// `capital · (1 + Δ)`, floored at zero
    pub cash_only_value: f64,
    /// `buying_power · (1 + Δ) - loan - interest`, floored at zero
    pub margin_equity_value: f64,
}

impl MarginScenario {
    /// Checks every field against its domain.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        let capital = finite("initial_capital", self.initial_capital)?;
        let loan = finite("margin_loan", self.margin_loan)?;
        let rate = finite("annual_interest_rate_pct", self.annual_interest_rate_pct)?;
        let days = finite("duration_days", self.duration_days)?;
        finite("price_change_pct", self.price_change_pct)?;

        if capital <= 0.0 {
            return Err(ScenarioError::OutOfRange {
                field: "initial_capital",
                value: capital,
                expected: "> 0",
            });
        }
        for (field, value) in [
            ("margin_loan", loan),
            ("annual_interest_rate_pct", rate),
            ("duration_days", days),
        ] {
            if value < 0.0 {
                return Err(ScenarioError::OutOfRange {
                    field,
                    value,
                    expected: ">= 0",
                });
            }
        }
        Ok(())
    }

    /// Capital plus loan.
    #[inline]
    pub fn buying_power(&self) -> f64 {
        self.initial_capital + self.margin_loan
    }

    /// Simple interest on the loan over the holding period.
    #[inline]
    pub fn interest_cost(&self) -> f64 {
        self.margin_loan * (self.annual_interest_rate_pct / 100.0) * self.duration_days
            / DAYS_PER_YEAR
    }

    /// Evaluates the scenario under a maintenance-margin requirement.
    ///
    /// # Errors
    /// Field errors from [`validate`](Self::validate), or `OutOfRange` when
    /// `maintenance_margin` is outside `[0, 1)`.
    pub fn evaluate(&self, maintenance_margin: f64) -> Result<MarginResult, ScenarioError> {
        self.validate()?;
        if !(0.0..1.0).contains(&maintenance_margin) {
            return Err(ScenarioError::OutOfRange {
                field: "maintenance_margin",
                value: maintenance_margin,
                expected: "[0, 1)",
            });
        }

        let capital = self.initial_capital;
        let move_fraction = self.price_change_pct / 100.0;
        let buying_power = self.buying_power();
        let interest_cost = self.interest_cost();

        let profit_without_margin = capital * move_fraction;
        let roi_without_margin = profit_without_margin / capital * 100.0;

        let gross_profit_with_margin = buying_power * move_fraction;
        let net_profit_with_margin = gross_profit_with_margin - interest_cost;
        let roi_with_margin = net_profit_with_margin / capital * 100.0;

        let roi_amplification = if roi_without_margin == 0.0 {
            None
        } else {
            Some((roi_with_margin / roi_without_margin).abs())
        };

        let margin_call_value = self.margin_loan / (1.0 - maintenance_margin);

        Ok(MarginResult {
            buying_power,
            interest_cost,
            profit_without_margin,
            total_value_without_margin: capital + profit_without_margin,
            roi_without_margin,
            gross_profit_with_margin,
            net_profit_with_margin,
            total_value_with_margin: capital + net_profit_with_margin,
            roi_with_margin,
            roi_amplification,
            leverage_factor: buying_power / capital,
            margin_call_value,
            margin_call_drop_pct: (buying_power - margin_call_value) / buying_power * 100.0,
            margin_call_below_current: buying_power > margin_call_value,
        })
    }
}

/// Samples cash-only and leveraged end values at each of [`PROJECTION_STEPS`].
///
/// The scenario's own `price_change_pct` is ignored.
///
/// # Examples
/// ```
/// use optcalc_models::scenarios::{equity_projection, MarginScenario};
///
/// let scenario = MarginScenario {
///     initial_capital: 10_000.0,
///     margin_loan: 10_000.0,
///     annual_interest_rate_pct: 8.0,
///     duration_days: 365.0,
///     price_change_pct: 0.0,
/// };
/// let curve = equity_projection(&scenario).unwrap();
/// assert_eq!(curve.len(), 11);
/// assert_eq!(curve[0].margin_equity_value, 0.0);
/// ```
pub fn equity_projection(scenario: &MarginScenario) -> Result<Vec<ProjectionPoint>, ScenarioError> {
    scenario.validate()?;

    let buying_power = scenario.buying_power();
    let interest_cost = scenario.interest_cost();

    Ok(PROJECTION_STEPS
        .iter()
        .map(|&pct| {
            let growth = 1.0 + pct / 100.0;
            ProjectionPoint {
                price_change_pct: pct,
                cash_only_value: (scenario.initial_capital * growth).max(0.0),
                margin_equity_value: (buying_power * growth
                    - scenario.margin_loan
                    - interest_cost)
                    .max(0.0),
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn example() -> MarginScenario {
        MarginScenario {
            initial_capital: 10_000.0,
            margin_loan: 10_000.0,
            annual_interest_rate_pct: 8.0,
            duration_days: 365.0,
            price_change_pct: 10.0,
        }
    }

    #[test]
    fn test_example_values() {
        let r = example().evaluate(DEFAULT_MAINTENANCE_MARGIN).unwrap();
        assert_relative_eq!(r.buying_power, 20_000.0);
        assert_relative_eq!(r.interest_cost, 800.0, epsilon = 1e-9);
        assert_relative_eq!(r.profit_without_margin, 1000.0, epsilon = 1e-9);
        assert_relative_eq!(r.total_value_without_margin, 11_000.0, epsilon = 1e-9);
        assert_relative_eq!(r.gross_profit_with_margin, 2000.0, epsilon = 1e-9);
        assert_relative_eq!(r.net_profit_with_margin, 1200.0, epsilon = 1e-9);
        assert_relative_eq!(r.total_value_with_margin, 11_200.0, epsilon = 1e-9);
        assert_relative_eq!(r.roi_without_margin, 10.0, epsilon = 1e-9);
        assert_relative_eq!(r.roi_with_margin, 12.0, epsilon = 1e-9);
        assert_relative_eq!(r.roi_amplification.unwrap(), 1.2, epsilon = 1e-9);
        assert_relative_eq!(r.leverage_factor, 2.0);
        assert_relative_eq!(r.margin_call_value, 14_285.714285714286, epsilon = 1e-6);
        assert_relative_eq!(r.margin_call_drop_pct, 28.571428571428573, epsilon = 1e-9);
        assert!(r.margin_call_below_current);
    }

    #[test]
    fn test_flat_market_has_no_amplification() {
        let scenario = MarginScenario {
            price_change_pct: 0.0,
            ..example()
        };
        let r = scenario.evaluate(DEFAULT_MAINTENANCE_MARGIN).unwrap();
        assert_eq!(r.roi_amplification, None);
        assert_relative_eq!(r.net_profit_with_margin, -800.0, epsilon = 1e-9);
    }

    #[test]
    fn test_no_loan() {
        let scenario = MarginScenario {
            margin_loan: 0.0,
            ..example()
        };
        let r = scenario.evaluate(DEFAULT_MAINTENANCE_MARGIN).unwrap();
        assert_eq!(r.interest_cost, 0.0);
        assert_eq!(r.margin_call_value, 0.0);
        assert_relative_eq!(r.margin_call_drop_pct, 100.0);
        assert_relative_eq!(r.roi_with_margin, r.roi_without_margin);
        assert_relative_eq!(r.leverage_factor, 1.0);
    }

    #[test]
    fn test_custom_maintenance_margin() {
        let r = example().evaluate(0.5).unwrap();
        assert_relative_eq!(r.margin_call_value, 20_000.0, epsilon = 1e-9);
        assert_relative_eq!(r.margin_call_drop_pct, 0.0, epsilon = 1e-9);
        assert!(!r.margin_call_below_current);

        let r = example().evaluate(0.0).unwrap();
        assert_relative_eq!(r.margin_call_value, 10_000.0);
    }

    #[test]
    fn test_maintenance_margin_out_of_range() {
        for mm in [1.0, 1.5, -0.1, f64::NAN] {
            assert!(matches!(
                example().evaluate(mm),
                Err(ScenarioError::OutOfRange {
                    field: "maintenance_margin",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_validation() {
        let bad_capital = MarginScenario {
            initial_capital: 0.0,
            ..example()
        };
        assert!(matches!(
            bad_capital.validate(),
            Err(ScenarioError::OutOfRange {
                field: "initial_capital",
                ..
            })
        ));

        let bad_loan = MarginScenario {
            margin_loan: -1.0,
            ..example()
        };
        assert!(matches!(
            bad_loan.validate(),
            Err(ScenarioError::OutOfRange {
                field: "margin_loan",
                ..
            })
        ));

        let nan_move = MarginScenario {
            price_change_pct: f64::NAN,
            ..example()
        };
        assert!(matches!(
            nan_move.validate(),
            Err(ScenarioError::NonFinite { .. })
        ));
    }

    #[test]
    fn test_projection_values() {
        let curve = equity_projection(&example()).unwrap();
        assert_eq!(curve.len(), PROJECTION_STEPS.len());

        // -50%: cash 5000, margin 20000·0.5 - 10000 - 800 < 0
        assert_relative_eq!(curve[0].cash_only_value, 5000.0);
        assert_eq!(curve[0].margin_equity_value, 0.0);

        // 0%: margin equity loses only the interest
        assert_eq!(curve[5].price_change_pct, 0.0);
        assert_relative_eq!(curve[5].cash_only_value, 10_000.0);
        assert_relative_eq!(curve[5].margin_equity_value, 9200.0, epsilon = 1e-9);

        // +50%
        assert_relative_eq!(curve[10].cash_only_value, 15_000.0);
        assert_relative_eq!(curve[10].margin_equity_value, 19_200.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_rejects_invalid() {
        let scenario = MarginScenario {
            duration_days: -3.0,
            ..example()
        };
        assert!(equity_projection(&scenario).is_err());
    }
}
