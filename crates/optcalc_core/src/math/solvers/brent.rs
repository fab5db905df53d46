//! Brent's method.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Bracketing root finder mixing bisection, secant and inverse quadratic
/// interpolation.
///
/// Needs no derivative and cannot leave the bracket, so it is what the
/// implied-volatility solver falls back to when vega vanishes.
///
/// # Example
///
/// ```
/// use optcalc_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // x³ - x - 2 changes sign on [1, 2]
/// let f = |x: f64| x * x * x - x - 2.0;
///
/// let root = solver.find_root(f, 1.0, 2.0).unwrap();
/// assert!((f(root)).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Creates a solver.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }

    /// Finds a root of `f` between `lower` and `upper` (either order).
    ///
    /// Stops when `|f(b)| < tolerance` or the bracket around `b` has shrunk
    /// to the tolerance.
    ///
    /// # Errors
    ///
    /// * `NumericalInstability` - `f` is NaN at an endpoint
    /// * `NoBracket` - `f(lower)` and `f(upper)` share a sign
    /// * `MaxIterationsExceeded` - the iteration budget ran out
    pub fn find_root<F>(&self, f: F, lower: T, upper: T) -> Result<T, SolverError>
    where
        F: Fn(T) -> T,
    {
        let (mut a, mut b) = (lower, upper);
        let (mut fa, mut fb) = (f(a), f(b));

        if fa.is_nan() || fb.is_nan() {
            return Err(SolverError::NumericalInstability(
                "Function is NaN at a bracket endpoint".to_string(),
            ));
        }
        if fa * fb > T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        let two = T::from(2.0).unwrap();
        let half = T::from(0.5).unwrap();

        // c is the contrapoint: f(b) and f(c) straddle zero
        let (mut c, mut fc) = (b, fb);
        let mut step = b - a;
        let mut previous_step = step;

        for _ in 0..self.config.max_iterations {
            if same_sign(fb, fc) {
                c = a;
                fc = fa;
                step = b - a;
                previous_step = step;
            }
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }

            let tol = two * T::epsilon() * b.abs() + half * self.config.tolerance;
            let midpoint = half * (c - b);

            if fb.abs() < self.config.tolerance || midpoint.abs() <= tol || fb == T::zero() {
                return Ok(b);
            }

            let interpolated = if previous_step.abs() >= tol && fa.abs() > fb.abs() {
                interpolation_step(a, b, c, fa, fb, fc, midpoint, tol, previous_step)
            } else {
                None
            };

            match interpolated {
                Some(d) => {
                    previous_step = step;
                    step = d;
                }
                None => {
                    step = midpoint;
                    previous_step = midpoint;
                }
            }

            a = b;
            fa = fb;
            b = if step.abs() > tol {
                b + step
            } else if midpoint > T::zero() {
                b + tol
            } else {
                b - tol
            };
            fb = f(b);
        }

        Err(SolverError::MaxIterationsExceeded {
            iterations: self.config.max_iterations,
        })
    }
}

#[inline]
fn same_sign<T: Float>(x: T, y: T) -> bool {
    (x > T::zero() && y > T::zero()) || (x < T::zero() && y < T::zero())
}

/// Secant (when `a == c`) or inverse quadratic step, or `None` when the step
/// would not shrink the bracket fast enough and bisection should be used.
#[allow(clippy::too_many_arguments)]
#[inline]
fn interpolation_step<T: Float>(
    a: T,
    b: T,
    c: T,
    fa: T,
    fb: T,
    fc: T,
    midpoint: T,
    tol: T,
    previous_step: T,
) -> Option<T> {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let three = T::from(3.0).unwrap();

    let s = fb / fa;
    let (mut p, mut q) = if a == c {
        (two * midpoint * s, one - s)
    } else {
        let q = fa / fc;
        let r = fb / fc;
        (
            s * (two * midpoint * q * (q - r) - (b - a) * (r - one)),
            (q - one) * (r - one) * (s - one),
        )
    };

    if p > T::zero() {
        q = -q;
    }
    p = p.abs();

    let limit = (three * midpoint * q - (tol * q).abs()).min((previous_step * q).abs());
    if two * p < limit {
        Some(p / q)
    } else {
        None
    }
}
