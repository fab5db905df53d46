//! Scenario arithmetic for option and leveraged positions.
//!
//! This module provides:
//! - `breakeven`: expiry breakeven price of a long option
//! - `roi`: return on capital from collected premium
//! - `ratios`: Sharpe and Sortino risk-adjusted returns
//! - `margin`: leveraged versus cash-only outcomes, margin-call threshold
//!
//! Every function validates its inputs and returns a [`ScenarioError`]
//! instead of producing NaN or infinity.

mod breakeven;
mod error;
mod margin;
mod ratios;
mod roi;

pub use breakeven::breakeven_price;
pub use error::ScenarioError;
pub use margin::{
    equity_projection, MarginResult, MarginScenario, ProjectionPoint,
    DEFAULT_MAINTENANCE_MARGIN, PROJECTION_STEPS,
};
pub use ratios::{sharpe_ratio, sortino_ratio, SortinoRating};
pub use roi::{roi_metrics, RoiMetrics};

/// Returns `Ok(value)` if finite, else `ScenarioError::NonFinite`.
pub(crate) fn finite(field: &'static str, value: f64) -> Result<f64, ScenarioError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ScenarioError::NonFinite { field, value })
    }
}
