//! Black-Scholes pricing model for European options.
//!
//! This module provides the Black-Scholes model for pricing European
//! call and put options with analytical Greeks calculations.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·(1 - N(d₂)) - S·(1 - N(d₁))
//!
//! Where:
//! - d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Put terms use `1 - N(x)` rather than `N(-x)`. The two agree for the
//! accurate CDF, and only the former keeps put-call parity under
//! [`CdfApproximation::Reference`].

use num_traits::Float;

use super::distributions::{norm_pdf, CdfApproximation};
use super::error::AnalyticalError;
use optcalc_core::types::OptionType;

/// Raw (unscaled) Black-Scholes price and Greeks.
///
/// Units are per unit of spot, per unit of volatility and per year.
/// See [`OptionGreeks`](super::OptionGreeks) for the trading-convention report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Greeks<T: Float> {
    /// Option price
    pub price: T,
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// ∂V/∂σ
    pub vega: T,
    /// ∂V/∂t (per year)
    pub theta: T,
    /// ∂V/∂r
    pub rho: T,
}

/// Black-Scholes model for European option pricing.
///
/// Provides closed-form pricing and Greeks calculations for European
/// options under lognormal dynamics.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f64`, `f32`)
///
/// # Examples
/// ```
/// use optcalc_models::analytical::BlackScholes;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
/// let call_price = bs.price_call(100.0, 1.0);
/// let put_price = bs.price_put(100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call_price - put_price - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Volatility (σ)
    volatility: T,
    /// Normal CDF used for N(·)
    cdf: CdfApproximation,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model using the accurate CDF.
    ///
    /// # Arguments
    /// * `spot` - Current spot price (must be positive)
    /// * `rate` - Risk-free interest rate (annualised, decimal)
    /// * `volatility` - Volatility (must be positive, decimal)
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0 or not finite
    /// - `AnalyticalError::InvalidRate` if rate is not finite
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0 or not finite
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::analytical::BlackScholes;
    ///
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.2).is_ok());
    /// assert!(BlackScholes::new(-100.0_f64, 0.05, 0.2).is_err());
    /// assert!(BlackScholes::new(100.0_f64, 0.05, 0.0).is_err());
    /// ```
    pub fn new(spot: T, rate: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !(spot > zero) || !spot.is_finite() {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: rate.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !(volatility > zero) || !volatility.is_finite() {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self::unchecked(spot, rate, volatility))
    }

    /// Builds a model without validating the volatility.
    ///
    /// The faithful implied-volatility iteration evaluates price and vega at
    /// whatever iterate Newton produces, including non-positive ones.
    pub(crate) fn unchecked(spot: T, rate: T, volatility: T) -> Self {
        Self {
            spot,
            rate,
            volatility,
            cdf: CdfApproximation::default(),
        }
    }

    /// Returns the model with a different normal CDF.
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::analytical::{BlackScholes, CdfApproximation};
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2)
    ///     .unwrap()
    ///     .with_cdf(CdfApproximation::Reference);
    /// assert_eq!(bs.cdf(), CdfApproximation::Reference);
    /// ```
    #[inline]
    pub fn with_cdf(mut self, cdf: CdfApproximation) -> Self {
        self.cdf = cdf;
        self
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Returns the CDF approximation in use.
    #[inline]
    pub fn cdf(&self) -> CdfApproximation {
        self.cdf
    }

    #[inline]
    fn n(&self, x: T) -> T {
        self.cdf.cdf(x)
    }

    /// Computes the d1 term of the Black-Scholes formula.
    ///
    /// d₁ = (ln(S/K) + (r + σ²/2)T) / (σ√T)
    ///
    /// # Arguments
    /// * `strike` - Strike price (K)
    /// * `expiry` - Time to expiration in years (T)
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();

        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate + half * self.volatility * self.volatility) * expiry;

        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes the d2 term of the Black-Scholes formula.
    ///
    /// d₂ = d₁ - σ√T
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes European call option price.
    ///
    /// C = S·N(d₁) - K·e^(-rT)·N(d₂)
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_call(100.0, 1.0);
    /// assert!((price - 10.4506).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_call(&self, strike: T, expiry: T) -> T {
        let discount = (-self.rate * expiry).exp();
        self.spot * self.n(self.d1(strike, expiry))
            - strike * discount * self.n(self.d2(strike, expiry))
    }

    /// Computes European put option price.
    ///
    /// P = K·e^(-rT)·(1 - N(d₂)) - S·(1 - N(d₁))
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::analytical::BlackScholes;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let price = bs.price_put(100.0, 1.0);
    /// assert!((price - 5.5735).abs() < 1e-3);
    /// ```
    #[inline]
    pub fn price_put(&self, strike: T, expiry: T) -> T {
        let one = T::one();
        let discount = (-self.rate * expiry).exp();
        strike * discount * (one - self.n(self.d2(strike, expiry)))
            - self.spot * (one - self.n(self.d1(strike, expiry)))
    }

    /// Computes the option price for the given side.
    #[inline]
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        match option_type {
            OptionType::Call => self.price_call(strike, expiry),
            OptionType::Put => self.price_put(strike, expiry),
        }
    }

    /// Delta: Call `N(d₁)`, Put `N(d₁) - 1`.
    #[inline]
    pub fn delta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let n_d1 = self.n(self.d1(strike, expiry));
        match option_type {
            OptionType::Call => n_d1,
            OptionType::Put => n_d1 - T::one(),
        }
    }

    /// Gamma: `φ(d₁) / (S·σ·√T)`, identical for calls and puts.
    #[inline]
    pub fn gamma(&self, strike: T, expiry: T) -> T {
        let pdf_d1 = norm_pdf(self.d1(strike, expiry));
        pdf_d1 / (self.spot * self.volatility * expiry.sqrt())
    }

    /// Vega: `S·φ(d₁)·√T`, identical for calls and puts.
    ///
    /// This is the derivative used by the implied-volatility iteration.
    #[inline]
    pub fn vega(&self, strike: T, expiry: T) -> T {
        self.spot * norm_pdf(self.d1(strike, expiry)) * expiry.sqrt()
    }

    /// Theta per year.
    ///
    /// - Call: `-S·φ(d₁)·σ/(2√T) - r·K·e^(-rT)·N(d₂)`
    /// - Put: `-S·φ(d₁)·σ/(2√T) + r·K·e^(-rT)·(1 - N(d₂))`
    #[inline]
    pub fn theta(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let two = T::from(2.0).unwrap();
        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let n_d2 = self.n(d1 - self.volatility * sqrt_t);
        let discount = (-self.rate * expiry).exp();

        let decay = -(self.spot * norm_pdf(d1) * self.volatility) / (two * sqrt_t);
        match option_type {
            OptionType::Call => decay - self.rate * strike * discount * n_d2,
            OptionType::Put => decay + self.rate * strike * discount * (T::one() - n_d2),
        }
    }

    /// Rho: Call `K·T·e^(-rT)·N(d₂)`, Put `-K·T·e^(-rT)·(1 - N(d₂))`.
    #[inline]
    pub fn rho(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let n_d2 = self.n(self.d2(strike, expiry));
        let scale = strike * expiry * (-self.rate * expiry).exp();
        match option_type {
            OptionType::Call => scale * n_d2,
            OptionType::Put => -scale * (T::one() - n_d2),
        }
    }

    /// Computes price and every raw Greek in one pass.
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::analytical::BlackScholes;
    /// use optcalc_core::types::OptionType;
    ///
    /// let bs = BlackScholes::new(100.0_f64, 0.05, 0.2).unwrap();
    /// let call = bs.greeks(OptionType::Call, 100.0, 1.0);
    /// let put = bs.greeks(OptionType::Put, 100.0, 1.0);
    ///
    /// assert!((call.delta - put.delta - 1.0).abs() < 1e-12);
    /// assert_eq!(call.gamma, put.gamma);
    /// ```
    pub fn greeks(&self, option_type: OptionType, strike: T, expiry: T) -> Greeks<T> {
        Greeks {
            price: self.price(option_type, strike, expiry),
            delta: self.delta(option_type, strike, expiry),
            gamma: self.gamma(strike, expiry),
            vega: self.vega(strike, expiry),
            theta: self.theta(option_type, strike, expiry),
            rho: self.rho(option_type, strike, expiry),
        }
    }
}
