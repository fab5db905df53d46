//! Stopping rules shared by the solvers.

use num_traits::Float;

/// Stopping rule for a root search.
///
/// `tolerance` is compared against `|f(x)|`; for implied volatility that is
/// the pricing error in currency units. `max_iterations` bounds the work done
/// before [`SolverError::MaxIterationsExceeded`](crate::types::SolverError)
/// is returned.
///
/// # Example
///
/// ```
/// use optcalc_core::math::solvers::SolverConfig;
///
/// let tight: SolverConfig<f64> = SolverConfig::default();
/// assert_eq!(tight.max_iterations, 100);
///
/// // One hundredth of a cent on the option price
/// let iv = SolverConfig::new(1e-4, 100);
/// assert!(iv.tolerance > tight.tolerance);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Largest acceptable `|f(x)|`
    pub tolerance: T,
    /// Iteration budget
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// `1e-10` tolerance, 100 iterations.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Creates a stopping rule.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`. Settings read from
    /// user configuration are validated before reaching this point.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }
}
