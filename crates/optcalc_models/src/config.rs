//! Calculator configuration.
//!
//! Every knob that changes numerical behaviour lives here so that the
//! server can load it from its `[calculator]` TOML table.

use thiserror::Error;

use crate::analytical::implied_volatility::{
    DEFAULT_INITIAL_GUESS, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};
use crate::analytical::{CdfApproximation, IvSolverMode};
use crate::open_interest::MaxPainConvention;
use crate::scenarios::DEFAULT_MAINTENANCE_MARGIN;

/// Invalid calculator configuration.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid calculator configuration: {field} {reason}")]
pub struct ConfigError {
    /// Offending field
    pub field: &'static str,
    /// What is wrong with it
    pub reason: String,
}

/// Numerical settings shared by all calculators.
///
/// Missing fields take their defaults when deserialised.
///
/// # Examples
/// ```
/// use optcalc_models::CalculatorConfig;
/// use optcalc_models::analytical::CdfApproximation;
///
/// let config = CalculatorConfig::default();
/// assert_eq!(config.cdf_approximation, CdfApproximation::AbramowitzStegun);
/// assert_eq!(config.iv_max_iterations, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CalculatorConfig {
    /// Normal CDF used by pricing and implied volatility
    pub cdf_approximation: CdfApproximation,
    /// Implied-volatility iteration strategy
    pub iv_solver: IvSolverMode,
    /// Starting volatility for the implied-volatility iteration
    pub iv_initial_guess: f64,
    /// Price tolerance for the implied-volatility iteration
    pub iv_tolerance: f64,
    /// Iteration cap for the implied-volatility iteration
    pub iv_max_iterations: usize,
    /// Which extremum of the pain curve to report
    pub max_pain_convention: MaxPainConvention,
    /// Maintenance-margin requirement in `[0, 1)`
    pub maintenance_margin: f64,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            cdf_approximation: CdfApproximation::default(),
            iv_solver: IvSolverMode::default(),
            iv_initial_guess: DEFAULT_INITIAL_GUESS,
            iv_tolerance: DEFAULT_TOLERANCE,
            iv_max_iterations: DEFAULT_MAX_ITERATIONS,
            max_pain_convention: MaxPainConvention::default(),
            maintenance_margin: DEFAULT_MAINTENANCE_MARGIN,
        }
    }
}

impl CalculatorConfig {
    /// Checks that every numeric setting is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.iv_tolerance > 0.0) || !self.iv_tolerance.is_finite() {
            return Err(ConfigError {
                field: "iv_tolerance",
                reason: format!("must be positive and finite, got {}", self.iv_tolerance),
            });
        }
        if self.iv_max_iterations == 0 {
            return Err(ConfigError {
                field: "iv_max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(self.iv_initial_guess > 0.0) || !self.iv_initial_guess.is_finite() {
            return Err(ConfigError {
                field: "iv_initial_guess",
                reason: format!("must be positive and finite, got {}", self.iv_initial_guess),
            });
        }
        if !(0.0..1.0).contains(&self.maintenance_margin) {
            return Err(ConfigError {
                field: "maintenance_margin",
                reason: format!("must lie in [0, 1), got {}", self.maintenance_margin),
            });
        }
        Ok(())
    }
}
