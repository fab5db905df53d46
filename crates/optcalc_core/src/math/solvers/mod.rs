//! Root-finding solvers for numerical computation.
//!
//! This module provides the root-finding algorithms used to invert pricing
//! formulas, most notably for implied volatility.
//!
//! ## Available Solvers
//!
//! - [`NewtonRaphsonSolver`]: Fast quadratic convergence using derivatives
//! - [`BrentSolver`]: Robust bracketing method without derivative requirement
//!
//! ## Configuration
//!
//! Both solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: Convergence tolerance on `|f(x)|` (default: 1e-10)
//! - `max_iterations`: Maximum iteration count (default: 100)
//!
//! ## Examples
//!
//! ```
//! use optcalc_core::math::solvers::{BrentSolver, NewtonRaphsonSolver, SolverConfig};
//!
//! // Solve x² - 2 = 0 (find √2)
//! let f = |x: f64| x * x - 2.0;
//! let f_prime = |x: f64| 2.0 * x;
//!
//! let newton = NewtonRaphsonSolver::new(SolverConfig::default());
//! let root = newton.find_root(f, f_prime, 1.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
//!
//! let brent = BrentSolver::new(SolverConfig::default());
//! let root = brent.find_root(f, 0.0, 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
//! ```

mod brent;
mod config;
mod newton_raphson;

// Re-export public types at module level
pub use brent::BrentSolver;
pub use config::SolverConfig;
pub use newton_raphson::NewtonRaphsonSolver;
