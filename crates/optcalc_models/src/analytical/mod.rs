//! Analytical pricing formulas for European options.
//!
//! This module provides:
//! - Standard normal distribution functions (`distributions`)
//! - Black-Scholes pricing and raw Greeks (`black_scholes`)
//! - Trading-convention Greeks report (`greeks`)
//! - Implied volatility by Newton-Raphson inversion (`implied_volatility`)
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`** for the closed-form formulas
//! - **Selectable CDF**: the accurate erfc approximation or the legacy formula
//! - **Put terms written as `1 - N(x)`** so both CDFs keep put-call parity

pub mod black_scholes;
pub mod distributions;
pub mod error;
pub mod greeks;
pub mod implied_volatility;

// Re-export main types at module level
pub use black_scholes::{BlackScholes, Greeks};
pub use distributions::{norm_cdf, norm_pdf, reference_norm_cdf, CdfApproximation};
pub use error::AnalyticalError;
pub use greeks::OptionGreeks;
pub use implied_volatility::{ImpliedVolatilitySolver, IvSolverMode};
