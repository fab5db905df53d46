//! Implied volatility by Newton-Raphson inversion of the Black-Scholes price.
//!
//! The solver finds σ such that `price(σ) = observed`, using Vega as the
//! derivative:
//!
//! σₙ₊₁ = σₙ - (price(σₙ) - observed) / vega(σₙ)
//!
//! Two modes are available:
//! - [`IvSolverMode::Faithful`]: unconstrained Newton from the initial guess,
//!   matching the calculators' historical behaviour.
//! - [`IvSolverMode::Safeguarded`]: every iterate is clamped to
//!   `[MIN_VOLATILITY, MAX_VOLATILITY]`, and Brent's method on the same bracket
//!   takes over when Newton fails.

use optcalc_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
use optcalc_core::types::SolverError;

use super::black_scholes::BlackScholes;
use super::distributions::CdfApproximation;
use super::error::AnalyticalError;
use crate::instruments::ImpliedVolatilityQuery;

/// Default starting volatility (20%).
pub const DEFAULT_INITIAL_GUESS: f64 = 0.20;

/// Default price tolerance.
pub const DEFAULT_TOLERANCE: f64 = 1e-4;

/// Default iteration cap.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Lower volatility bound for the safeguarded mode.
pub const MIN_VOLATILITY: f64 = 1e-4;

/// Upper volatility bound for the safeguarded mode.
pub const MAX_VOLATILITY: f64 = 5.0;

/// Iteration strategy for [`ImpliedVolatilitySolver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum IvSolverMode {
    /// Plain Newton-Raphson, no clamping.
    #[default]
    Faithful,
    /// Clamped Newton-Raphson with a Brent fallback.
    Safeguarded,
}

/// Implied-volatility solver.
///
/// # Examples
/// ```
/// use optcalc_models::analytical::{BlackScholes, ImpliedVolatilitySolver};
/// use optcalc_models::instruments::ImpliedVolatilityQuery;
/// use optcalc_core::types::OptionType;
///
/// let observed = BlackScholes::new(100.0_f64, 0.05, 0.3)
///     .unwrap()
///     .price_call(100.0, 0.5);
///
/// let query = ImpliedVolatilityQuery {
///     underlying_price: 100.0,
///     strike_price: 100.0,
///     days_to_expiration: 182.5,
///     risk_free_rate: 0.05,
///     observed_price: observed,
///     option_type: OptionType::Call,
/// };
///
/// let iv = ImpliedVolatilitySolver::default().solve(&query).unwrap();
/// assert!((iv - 0.3).abs() < 1e-4);
/// ```
#[derive(Debug, Clone)]
pub struct ImpliedVolatilitySolver {
    config: SolverConfig<f64>,
    initial_guess: f64,
    mode: IvSolverMode,
    cdf: CdfApproximation,
}

impl Default for ImpliedVolatilitySolver {
    fn default() -> Self {
        Self::new(
            SolverConfig::new(DEFAULT_TOLERANCE, DEFAULT_MAX_ITERATIONS),
            DEFAULT_INITIAL_GUESS,
        )
    }
}

impl ImpliedVolatilitySolver {
    /// Creates a faithful-mode solver with the accurate CDF.
    ///
    /// `config.tolerance` bounds `|price(σ) - observed|`.
    pub fn new(config: SolverConfig<f64>, initial_guess: f64) -> Self {
        Self {
            config,
            initial_guess,
            mode: IvSolverMode::default(),
            cdf: CdfApproximation::default(),
        }
    }

    /// Returns the solver with a different iteration strategy.
    pub fn with_mode(mut self, mode: IvSolverMode) -> Self {
        self.mode = mode;
        self
    }

    /// Returns the solver pricing with a different normal CDF.
    pub fn with_cdf(mut self, cdf: CdfApproximation) -> Self {
        self.cdf = cdf;
        self
    }

    /// Returns the solver configuration.
    pub fn config(&self) -> &SolverConfig<f64> {
        &self.config
    }

    /// Returns the starting volatility.
    pub fn initial_guess(&self) -> f64 {
        self.initial_guess
    }

    /// Returns the iteration strategy.
    pub fn mode(&self) -> IvSolverMode {
        self.mode
    }

    /// Solves for the volatility reproducing `query.observed_price`.
    ///
    /// # Errors
    /// - Input errors from [`ImpliedVolatilityQuery::validate`]
    /// - `NonConvergence` when the iteration budget runs out (or, in safeguarded
    ///   mode, when the price is not attainable on the volatility bracket)
    /// - `DegenerateVega` when vega vanishes at an iterate
    /// - `NumericalInstability` for NaN/infinite iterates or a non-positive root
    pub fn solve(&self, query: &ImpliedVolatilityQuery) -> Result<f64, AnalyticalError> {
        query.validate()?;

        let strike = query.strike_price;
        let expiry = query.time_to_expiry();
        let model = |sigma: f64| {
            BlackScholes::unchecked(query.underlying_price, query.risk_free_rate, sigma)
                .with_cdf(self.cdf)
        };
        let objective = |sigma: f64| {
            model(sigma).price(query.option_type, strike, expiry) - query.observed_price
        };
        let vega = |sigma: f64| model(sigma).vega(strike, expiry);

        let newton = NewtonRaphsonSolver::new(self.config);
        let result = match self.mode {
            IvSolverMode::Faithful => newton.find_root(objective, vega, self.initial_guess),
            IvSolverMode::Safeguarded => newton
                .find_root_bounded(
                    objective,
                    vega,
                    self.initial_guess,
                    MIN_VOLATILITY,
                    MAX_VOLATILITY,
                )
                .or_else(|_| {
                    BrentSolver::new(self.config).find_root(
                        objective,
                        MIN_VOLATILITY,
                        MAX_VOLATILITY,
                    )
                }),
        };

        let sigma = result.map_err(|err| self.map_solver_error(err))?;
        if sigma.is_nan() || sigma.is_infinite() {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("implied volatility is not finite: {}", sigma),
            });
        }
        if sigma <= 0.0 {
            return Err(AnalyticalError::NumericalInstability {
                message: format!("iteration settled on non-positive volatility {}", sigma),
            });
        }
        Ok(sigma)
    }

    fn map_solver_error(&self, err: SolverError) -> AnalyticalError {
        match err {
            SolverError::MaxIterationsExceeded { iterations } => {
                AnalyticalError::NonConvergence { iterations }
            }
            SolverError::NoBracket { .. } => AnalyticalError::NonConvergence {
                iterations: self.config.max_iterations,
            },
            SolverError::DerivativeNearZero { x } => AnalyticalError::DegenerateVega { volatility: x },
            SolverError::NumericalInstability(message) => {
                AnalyticalError::NumericalInstability { message }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use optcalc_core::types::OptionType;

    fn query_for(
        spot: f64,
        strike: f64,
        days: f64,
        sigma: f64,
        option_type: OptionType,
    ) -> ImpliedVolatilityQuery {
        let bs = BlackScholes::new(spot, 0.05, sigma).unwrap();
        ImpliedVolatilityQuery {
            underlying_price: spot,
            strike_price: strike,
            days_to_expiration: days,
            risk_free_rate: 0.05,
            observed_price: bs.price(option_type, strike, days / 365.0),
            option_type,
        }
    }

    fn far_otm_call() -> ImpliedVolatilityQuery {
        ImpliedVolatilityQuery {
            underlying_price: 100.0,
            strike_price: 300.0,
            days_to_expiration: 30.0,
            risk_free_rate: 0.05,
            observed_price: 0.5,
            option_type: OptionType::Call,
        }
    }

    #[test]
    fn test_defaults() {
        let solver = ImpliedVolatilitySolver::default();
        assert_eq!(solver.initial_guess(), 0.20);
        assert_eq!(solver.config().tolerance, 1e-4);
        assert_eq!(solver.config().max_iterations, 100);
        assert_eq!(solver.mode(), IvSolverMode::Faithful);
    }

    #[test]
    fn test_recovers_call_volatility() {
        let iv = ImpliedVolatilitySolver::default()
            .solve(&query_for(100.0, 100.0, 365.0, 0.2, OptionType::Call))
            .unwrap();
        assert_relative_eq!(iv, 0.2, epsilon = 1e-4);
    }

    #[test]
    fn test_recovers_put_volatility() {
        let iv = ImpliedVolatilitySolver::default()
            .solve(&query_for(95.0, 100.0, 120.0, 0.45, OptionType::Put))
            .unwrap();
        assert_relative_eq!(iv, 0.45, epsilon = 1e-4);
    }

    #[test]
    fn test_recovers_with_reference_cdf() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.3)
            .unwrap()
            .with_cdf(CdfApproximation::Reference);
        let query = ImpliedVolatilityQuery {
            underlying_price: 100.0,
            strike_price: 100.0,
            days_to_expiration: 365.0,
            risk_free_rate: 0.05,
            observed_price: bs.price_call(100.0, 1.0),
            option_type: OptionType::Call,
        };
        let iv = ImpliedVolatilitySolver::default()
            .with_cdf(CdfApproximation::Reference)
            .solve(&query)
            .unwrap();
        assert_relative_eq!(iv, 0.3, epsilon = 1e-4);
    }

    #[test]
    fn test_rejects_invalid_query() {
        let mut query = query_for(100.0, 100.0, 365.0, 0.2, OptionType::Call);
        query.observed_price = -1.0;
        assert!(matches!(
            ImpliedVolatilitySolver::default().solve(&query),
            Err(AnalyticalError::InvalidPrice { .. })
        ));

        query.observed_price = 10.0;
        query.days_to_expiration = 0.0;
        assert!(matches!(
            ImpliedVolatilitySolver::default().solve(&query),
            Err(AnalyticalError::InvalidExpiry { .. })
        ));
    }

    #[test]
    fn test_iteration_budget_exhausted() {
        let solver = ImpliedVolatilitySolver::new(SolverConfig::new(1e-4, 1), 0.2);
        let result = solver.solve(&query_for(100.0, 100.0, 365.0, 0.35, OptionType::Call));
        assert_eq!(
            result,
            Err(AnalyticalError::NonConvergence { iterations: 1 })
        );
    }

    #[test]
    fn test_faithful_reports_vanishing_vega() {
        let result = ImpliedVolatilitySolver::default().solve(&far_otm_call());
        assert!(matches!(result, Err(AnalyticalError::DegenerateVega { .. })));
    }

    #[test]
    fn test_safeguarded_falls_back_to_brent() {
        let query = far_otm_call();
        let iv = ImpliedVolatilitySolver::default()
            .with_mode(IvSolverMode::Safeguarded)
            .solve(&query)
            .unwrap();

        assert!((MIN_VOLATILITY..=MAX_VOLATILITY).contains(&iv));
        let repriced = BlackScholes::new(100.0_f64, 0.05, iv)
            .unwrap()
            .price_call(300.0, 30.0 / 365.0);
        assert_relative_eq!(repriced, 0.5, epsilon = 1e-2);
    }

    #[test]
    fn test_safeguarded_unattainable_price() {
        // A call can never be worth more than the underlying
        let mut query = far_otm_call();
        query.observed_price = 150.0;
        let result = ImpliedVolatilitySolver::default()
            .with_mode(IvSolverMode::Safeguarded)
            .solve(&query);
        assert!(matches!(result, Err(AnalyticalError::NonConvergence { .. })));
    }

    #[test]
    fn test_safeguarded_agrees_with_faithful_on_regular_input() {
        let query = query_for(110.0, 100.0, 200.0, 0.25, OptionType::Call);
        let faithful = ImpliedVolatilitySolver::default().solve(&query).unwrap();
        let safeguarded = ImpliedVolatilitySolver::default()
            .with_mode(IvSolverMode::Safeguarded)
            .solve(&query)
            .unwrap();
        assert_relative_eq!(faithful, safeguarded, epsilon = 1e-6);
    }
}
