//! Standard normal distribution functions.
//!
//! This module provides:
//! - `norm_cdf`: Cumulative distribution function via the A&S 7.1.26 erfc approximation
//! - `reference_norm_cdf`: The legacy calculator approximation, reproduced exactly
//! - `norm_pdf`: Probability density function (exact)
//! - `CdfApproximation`: Selector between the two CDFs
//!
//! All functions are generic over `T: Float`.

use num_traits::Float;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Abramowitz and Stegun polynomial coefficients (7.1.26).
const A1: f64 = 0.254829592;
const A2: f64 = -0.284496736;
const A3: f64 = 1.421413741;
const A4: f64 = -1.453152027;
const A5: f64 = 1.061405429;
const P: f64 = 0.3275911;

/// Which normal CDF the pricing engine evaluates.
///
/// # Variants
/// - `AbramowitzStegun`: `Φ(x) = erfc(-x/√2)/2` with the 7.1.26 erfc
///   approximation (absolute error below 1.5e-7). This is the default.
/// - `Reference`: the formula used by the earlier web calculators. It applies
///   the erfc polynomial to `x` directly and is only a rough CDF (`Φ(0) ≈ 0.601`,
///   values above 1 for negative `x`); select it to reproduce legacy outputs.
///
/// # Examples
/// ```
/// use optcalc_models::analytical::CdfApproximation;
///
/// let accurate = CdfApproximation::default().cdf(0.0_f64);
/// assert!((accurate - 0.5).abs() < 1e-7);
///
/// let legacy = CdfApproximation::Reference.cdf(0.0_f64);
/// assert!((legacy - 0.601057720).abs() < 1e-8);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum CdfApproximation {
    /// Accurate erfc-based approximation.
    #[default]
    AbramowitzStegun,
    /// Legacy calculator approximation.
    Reference,
}

impl CdfApproximation {
    /// Evaluates the selected CDF at `x`.
    #[inline]
    pub fn cdf<T: Float>(&self, x: T) -> T {
        match self {
            CdfApproximation::AbramowitzStegun => norm_cdf(x),
            CdfApproximation::Reference => reference_norm_cdf(x),
        }
    }
}

/// Degree-5 A&S polynomial `a1·t + a2·t² + a3·t³ + a4·t⁴ + a5·t⁵` in Horner form.
#[inline]
fn as_polynomial<T: Float>(t: T) -> T {
    let a1 = T::from(A1).unwrap();
    let a2 = T::from(A2).unwrap();
    let a3 = T::from(A3).unwrap();
    let a4 = T::from(A4).unwrap();
    let a5 = T::from(A5).unwrap();

    t * (a1 + t * (a2 + t * (a3 + t * (a4 + t * a5))))
}

/// Complementary error function approximation (A&S 7.1.26).
///
/// erfc(x) = 1 - erf(x) = (2/√π) ∫_x^∞ e^(-t²) dt, maximum error 1.5e-7.
#[inline]
fn erfc_approx<T: Float>(x: T) -> T {
    let one = T::one();
    let p = T::from(P).unwrap();

    let abs_x = x.abs();
    let t = one / (one + p * abs_x);

    let erfc_abs = as_polynomial(t) * (-abs_x * abs_x).exp();

    // erfc(-x) = 2 - erfc(x)
    if x < T::zero() {
        T::from(2.0).unwrap() - erfc_abs
    } else {
        erfc_abs
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) as Φ(x) = (1/2) · erfc(-x / √2).
///
/// # Accuracy
/// Accurate to about 1e-7 for all finite x.
///
/// # Examples
/// ```
/// use optcalc_models::analytical::distributions::norm_cdf;
///
/// assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let sqrt_2 = T::from(SQRT_2).unwrap();
    let half = T::from(0.5).unwrap();

    half * erfc_approx(-x / sqrt_2)
}

/// Legacy normal CDF approximation used by the earlier web calculators.
///
/// With `t = 1/(1 + p|x|)` and the A&S 7.1.26 polynomial:
///
/// `cdf(x) = 1 - sign(x) · poly(t) · exp(-x²/2) / √(2π)`, where `sign(x) = 1` if `x ≥ 0`.
///
/// Evaluation order matches the legacy arithmetic so downstream Greeks and
/// implied volatilities reproduce legacy values. Note that
/// `reference_norm_cdf(-x) = 2 - reference_norm_cdf(x)`.
///
/// # Examples
/// ```
/// use optcalc_models::analytical::distributions::reference_norm_cdf;
///
/// let up = reference_norm_cdf(1.0_f64);
/// let down = reference_norm_cdf(-1.0_f64);
/// assert!((up + down - 2.0).abs() < 1e-12);
/// ```
#[inline]
pub fn reference_norm_cdf<T: Float>(x: T) -> T {
    let one = T::one();
    let two = T::from(2.0).unwrap();
    let p = T::from(P).unwrap();
    let pi = T::from(std::f64::consts::PI).unwrap();

    let sign = if x >= T::zero() { one } else { -one };
    let t = one / (one + p * x.abs());
    let poly = T::from(A1).unwrap() * t
        + T::from(A2).unwrap() * t.powi(2)
        + T::from(A3).unwrap() * t.powi(3)
        + T::from(A4).unwrap() * t.powi(4)
        + T::from(A5).unwrap() * t.powi(5);

    one - sign * poly * (-x.powi(2) / two).exp() / (two * pi).sqrt()
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / √(2π)) · exp(-x² / 2)
///
/// # Examples
/// ```
/// use optcalc_models::analytical::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-7);
/// assert!((norm_pdf(1.0_f64) - 0.2419707245).abs() < 1e-7);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let frac_1_sqrt_2pi = T::from(FRAC_1_SQRT_2PI).unwrap();
    let half = T::from(0.5).unwrap();

    frac_1_sqrt_2pi * (-half * x * x).exp()
}
