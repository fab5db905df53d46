//! Calculator facade.
//!
//! [`Calculator`] binds a [`CalculatorConfig`] to every computation. The free
//! `compute_*` functions run the same computations with the default
//! configuration.
//!
//! # Examples
//! ```
//! use optcalc_models::calculators::{compute_greeks, compute_roi_metrics};
//! use optcalc_models::instruments::OptionParameters;
//! use optcalc_core::types::OptionType;
//!
//! let greeks = compute_greeks(OptionParameters {
//!     underlying_price: 100.0,
//!     strike_price: 100.0,
//!     days_to_expiration: 365.0,
//!     volatility: 0.2,
//!     risk_free_rate: 0.05,
//!     option_type: OptionType::Call,
//! })
//! .unwrap();
//! assert!((greeks.delta - 63.683).abs() < 1e-3);
//!
//! let roi = compute_roi_metrics(1000.0, 250.0, 30.0).unwrap();
//! assert!((roi.roi - 25.0).abs() < 1e-12);
//! ```

use optcalc_core::math::solvers::SolverConfig;
use optcalc_core::types::OptionType;

use crate::analytical::{AnalyticalError, BlackScholes, ImpliedVolatilitySolver, OptionGreeks};
use crate::config::{CalculatorConfig, ConfigError};
use crate::instruments::{ImpliedVolatilityQuery, OptionParameters};
use crate::open_interest::{MaxPainTable, StrikePain};
use crate::scenarios::{
    self, equity_projection, MarginResult, MarginScenario, ProjectionPoint, RoiMetrics,
    ScenarioError,
};

/// Configured entry point to every calculator.
#[derive(Debug, Clone)]
pub struct Calculator {
    config: CalculatorConfig,
    iv_solver: ImpliedVolatilitySolver,
}

impl Default for Calculator {
    fn default() -> Self {
        Self::build(CalculatorConfig::default())
    }
}

impl Calculator {
    /// Creates a calculator after validating `config`.
    ///
    /// # Errors
    /// The first invalid setting.
    pub fn new(config: CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: CalculatorConfig) -> Self {
        let iv_solver = ImpliedVolatilitySolver::new(
            SolverConfig {
                tolerance: config.iv_tolerance,
                max_iterations: config.iv_max_iterations,
            },
            config.iv_initial_guess,
        )
        .with_mode(config.iv_solver)
        .with_cdf(config.cdf_approximation);

        Self { config, iv_solver }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Black-Scholes Greeks in trading conventions.
    ///
    /// # Errors
    /// Input errors from [`OptionParameters::validate`], or
    /// `NumericalInstability` if any Greek is not finite.
    pub fn greeks(&self, params: &OptionParameters) -> Result<OptionGreeks, AnalyticalError> {
        params.validate()?;

        let model = BlackScholes::new(
            params.underlying_price,
            params.risk_free_rate,
            params.volatility,
        )?
        .with_cdf(self.config.cdf_approximation);

        let greeks = OptionGreeks::from(model.greeks(
            params.option_type,
            params.strike_price,
            params.time_to_expiry(),
        ));

        if !greeks.is_finite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite Greeks: {:?}", greeks),
            });
        }
        Ok(greeks)
    }

    /// Theoretical option price under the configured CDF.
    pub fn price(&self, params: &OptionParameters) -> Result<f64, AnalyticalError> {
        params.validate()?;
        let price = BlackScholes::new(
            params.underlying_price,
            params.risk_free_rate,
            params.volatility,
        )?
        .with_cdf(self.config.cdf_approximation)
        .price(params.option_type, params.strike_price, params.time_to_expiry());

        if price.is_finite() {
            Ok(price)
        } else {
            Err(AnalyticalError::NumericalInstability {
                message: format!("non-finite price: {}", price),
            })
        }
    }

    /// Volatility implied by an observed option price.
    pub fn implied_volatility(&self, query: &ImpliedVolatilityQuery) -> Result<f64, AnalyticalError> {
        self.iv_solver.solve(query)
    }

    /// Max-pain strike under the configured convention.
    pub fn max_pain(&self, table: &MaxPainTable) -> f64 {
        table.max_pain_strike(self.config.max_pain_convention)
    }

    /// Pain at every listed strike.
    pub fn pain_profile(&self, table: &MaxPainTable) -> Vec<StrikePain> {
        table.pain_profile()
    }

    /// Margin scenario under the configured maintenance margin.
    pub fn margin_scenario(&self, scenario: &MarginScenario) -> Result<MarginResult, ScenarioError> {
        scenario.evaluate(self.config.maintenance_margin)
    }

    /// Cash-only versus leveraged equity curve.
    pub fn equity_projection(
        &self,
        scenario: &MarginScenario,
    ) -> Result<Vec<ProjectionPoint>, ScenarioError> {
        equity_projection(scenario)
    }

    /// See [`scenarios::roi_metrics`].
    pub fn roi_metrics(
        &self,
        initial_investment: f64,
        premium: f64,
        duration_days: f64,
    ) -> Result<RoiMetrics, ScenarioError> {
        scenarios::roi_metrics(initial_investment, premium, duration_days)
    }

    /// See [`scenarios::sharpe_ratio`].
    pub fn sharpe_ratio(
        &self,
        portfolio_return: f64,
        risk_free_rate: f64,
        standard_deviation: f64,
    ) -> Result<f64, ScenarioError> {
        scenarios::sharpe_ratio(portfolio_return, risk_free_rate, standard_deviation)
    }

    /// See [`scenarios::sortino_ratio`].
    pub fn sortino_ratio(
        &self,
        portfolio_return: f64,
        risk_free_rate: f64,
        downside_deviation: f64,
    ) -> Result<f64, ScenarioError> {
        scenarios::sortino_ratio(portfolio_return, risk_free_rate, downside_deviation)
    }

    /// See [`scenarios::breakeven_price`].
    pub fn breakeven(
        &self,
        option_type: OptionType,
        strike: f64,
        premium: f64,
    ) -> Result<f64, ScenarioError> {
        scenarios::breakeven_price(option_type, strike, premium)
    }
}

/// Greeks with the default configuration.
pub fn compute_greeks(params: OptionParameters) -> Result<OptionGreeks, AnalyticalError> {
    Calculator::default().greeks(&params)
}

/// Implied volatility with the default configuration.
pub fn compute_implied_volatility(query: ImpliedVolatilityQuery) -> Result<f64, AnalyticalError> {
    Calculator::default().implied_volatility(&query)
}

/// Max-pain strike with the default (maximum-pain) convention.
pub fn compute_max_pain(table: &MaxPainTable) -> f64 {
    Calculator::default().max_pain(table)
}

/// Margin scenario with the default 30% maintenance margin.
pub fn compute_margin_scenario(scenario: MarginScenario) -> Result<MarginResult, ScenarioError> {
    Calculator::default().margin_scenario(&scenario)
}

/// Sharpe ratio `(Rp - Rf) / σp`.
pub fn compute_sharpe_ratio(
    portfolio_return: f64,
    risk_free_rate: f64,
    standard_deviation: f64,
) -> Result<f64, ScenarioError> {
    scenarios::sharpe_ratio(portfolio_return, risk_free_rate, standard_deviation)
}

/// Sortino ratio `(Rp - Rf) / σd`.
pub fn compute_sortino_ratio(
    portfolio_return: f64,
    risk_free_rate: f64,
    downside_deviation: f64,
) -> Result<f64, ScenarioError> {
    scenarios::sortino_ratio(portfolio_return, risk_free_rate, downside_deviation)
}

/// ROI, annualised ROI and premium per day.
pub fn compute_roi_metrics(
    initial_investment: f64,
    premium: f64,
    duration_days: f64,
) -> Result<RoiMetrics, ScenarioError> {
    scenarios::roi_metrics(initial_investment, premium, duration_days)
}

/// Breakeven price at expiry of a long option.
pub fn compute_breakeven(
    option_type: OptionType,
    strike: f64,
    premium: f64,
) -> Result<f64, ScenarioError> {
    scenarios::breakeven_price(option_type, strike, premium)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::{CdfApproximation, IvSolverMode};
    use crate::open_interest::{MaxPainConvention, OpenInterestRow};
    use approx::assert_relative_eq;

    fn atm_call() -> OptionParameters {
        OptionParameters {
            underlying_price: 100.0,
            strike_price: 100.0,
            days_to_expiration: 365.0,
            volatility: 0.2,
            risk_free_rate: 0.05,
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_new_validates_config() {
        let config = CalculatorConfig {
            maintenance_margin: -0.1,
            ..Default::default()
        };
        assert!(Calculator::new(config).is_err());
        assert!(Calculator::new(CalculatorConfig::default()).is_ok());
    }

    #[test]
    fn test_greeks_reference_case() {
        let greeks = compute_greeks(atm_call()).unwrap();
        assert_relative_eq!(greeks.delta, 63.68306511756191, epsilon = 1e-4);
        assert_relative_eq!(greeks.gamma, 0.018762017345846895, epsilon = 1e-8);
        assert_relative_eq!(greeks.vega, 0.3752403469169379, epsilon = 1e-8);
        assert_relative_eq!(greeks.theta, -6.414027546438197 / 365.0, epsilon = 1e-6);
    }

    #[test]
    fn test_greeks_rejects_invalid_params() {
        let params = OptionParameters {
            volatility: 0.0,
            ..atm_call()
        };
        assert!(matches!(
            compute_greeks(params),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_price_matches_model() {
        let price = Calculator::default().price(&atm_call()).unwrap();
        assert_relative_eq!(price, 10.450583572185565, epsilon = 1e-4);
    }

    #[test]
    fn test_config_flows_into_calculations() {
        let config = CalculatorConfig {
            cdf_approximation: CdfApproximation::Reference,
            iv_solver: IvSolverMode::Safeguarded,
            max_pain_convention: MaxPainConvention::MinimumPayout,
            maintenance_margin: 0.5,
            ..Default::default()
        };
        let calc = Calculator::new(config).unwrap();

        let legacy = calc.greeks(&atm_call()).unwrap();
        let accurate = compute_greeks(atm_call()).unwrap();
        assert!((legacy.delta - accurate.delta).abs() > 0.1);
        assert_eq!(legacy.gamma, accurate.gamma);

        let table = MaxPainTable::new(vec![
            OpenInterestRow::new(100.0, 5000.0, 7000.0),
            OpenInterestRow::new(105.0, 6500.0, 5500.0),
            OpenInterestRow::new(110.0, 8000.0, 3000.0),
            OpenInterestRow::new(115.0, 3500.0, 4500.0),
            OpenInterestRow::new(120.0, 2000.0, 9000.0),
        ])
        .unwrap();
        assert_eq!(calc.max_pain(&table), 110.0);
        assert_eq!(compute_max_pain(&table), 100.0);

        let scenario = MarginScenario {
            initial_capital: 10_000.0,
            margin_loan: 10_000.0,
            annual_interest_rate_pct: 8.0,
            duration_days: 365.0,
            price_change_pct: 10.0,
        };
        assert_relative_eq!(
            calc.margin_scenario(&scenario).unwrap().margin_call_value,
            20_000.0
        );
    }

    #[test]
    fn test_implied_volatility_round_trip() {
        let calc = Calculator::default();
        let observed = calc.price(&atm_call()).unwrap();
        let query = ImpliedVolatilityQuery::from((atm_call(), observed));
        assert_relative_eq!(compute_implied_volatility(query).unwrap(), 0.2, epsilon = 1e-4);
    }
}
