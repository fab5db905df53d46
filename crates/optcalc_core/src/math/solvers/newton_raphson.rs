//! Newton-Raphson root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Smallest derivative magnitude accepted before a Newton step.
const DERIVATIVE_EPSILON: f64 = 1e-30;

/// Newton-Raphson root finder, `x_{n+1} = x_n - f(x_n) / f'(x_n)`.
///
/// Implied volatility uses it with vega as the derivative. Far from the money
/// vega underflows, which surfaces as [`SolverError::DerivativeNearZero`]
/// rather than a wild step.
///
/// Convergence is checked *before* each update, so the returned value is the
/// first iterate with `|f(x)| < tolerance`.
///
/// # Example
///
/// ```
/// use optcalc_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
///
/// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
///
/// let f = |x: f64| x * x - 2.0;
/// let f_prime = |x: f64| 2.0 * x;
///
/// let root = solver.find_root(f, f_prime, 1.0).unwrap();
/// assert!((root - std::f64::consts::SQRT_2).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct NewtonRaphsonSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> NewtonRaphsonSolver<T> {
    /// Creates a solver.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Find a root of `f` using explicit derivative `f_prime`.
    ///
    /// Iterates are not constrained in any way.
    ///
    /// # Returns
    ///
    /// * `Ok(x)` - Root where `|f(x)| < tolerance`
    /// * `Err(SolverError::MaxIterationsExceeded)` - Failed to converge
    /// * `Err(SolverError::DerivativeNearZero)` - Derivative too small
    /// * `Err(SolverError::NumericalInstability)` - An iterate became NaN or infinite
    ///
    /// # Example
    ///
    /// ```
    /// use optcalc_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // Solve x³ - x - 2 = 0
    /// let f = |x: f64| x * x * x - x - 2.0;
    /// let f_prime = |x: f64| 3.0 * x * x - 1.0;
    ///
    /// let root = solver.find_root(f, f_prime, 1.5).unwrap();
    /// assert!((f(root)).abs() < 1e-10);
    /// ```
    pub fn find_root<F, G>(&self, f: F, f_prime: G, x0: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0, |x| x)
    }

    /// Find a root of `f`, projecting every iterate onto `[lower, upper]`.
    ///
    /// Useful when the function is only meaningful on a bounded domain
    /// (e.g. strictly positive volatility).
    ///
    /// # Example
    ///
    /// ```
    /// use optcalc_core::math::solvers::{NewtonRaphsonSolver, SolverConfig};
    ///
    /// let solver = NewtonRaphsonSolver::new(SolverConfig::default());
    ///
    /// // An unconstrained step from 0.1 would jump to a negative value.
    /// let f = |x: f64| x.ln();
    /// let f_prime = |x: f64| 1.0 / x;
    ///
    /// let root = solver.find_root_bounded(f, f_prime, 0.1, 1e-6, 10.0).unwrap();
    /// assert!((root - 1.0).abs() < 1e-9);
    /// ```
    pub fn find_root_bounded<F, G>(
        &self,
        f: F,
        f_prime: G,
        x0: T,
        lower: T,
        upper: T,
    ) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
    {
        self.iterate(f, f_prime, x0.max(lower).min(upper), |x| {
            x.max(lower).min(upper)
        })
    }

    fn iterate<F, G, P>(&self, f: F, f_prime: G, x0: T, project: P) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
        G: Fn(T) -> T,
        P: Fn(T) -> T,
    {
        let mut x = x0;
        let epsilon = T::from(DERIVATIVE_EPSILON).unwrap();

        for _iteration in 0..self.config.max_iterations {
            let f_val = f(x);

            if f_val.abs() < self.config.tolerance {
                return Ok(x);
            }

            let f_prime_val = f_prime(x);

            if f_prime_val.abs() < epsilon {
                return Err(SolverError::DerivativeNearZero {
                    x: x.to_f64().unwrap_or(f64::NAN),
                });
            }

            #[allow(clippy::assign_op_pattern)]
            {
                x = x - f_val / f_prime_val;
            }

            // NaN must be caught before projection, which would hide it
            if !x.is_finite() {
                return Err(SolverError::NumericalInstability(
                    "Newton iteration produced non-finite value".to_string(),
                ));
            }

            x = project(x);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
