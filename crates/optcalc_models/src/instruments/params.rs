//! Validated parameter structures for a single European option.

use optcalc_core::types::OptionType;

use crate::analytical::AnalyticalError;

/// Calendar days per year used to convert days to expiration into years.
pub const DAYS_PER_YEAR: f64 = 365.0;

fn check_positive(
    value: f64,
    err: impl FnOnce(f64) -> AnalyticalError,
) -> Result<(), AnalyticalError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(err(value))
    }
}

/// Inputs for pricing a European option.
///
/// Volatility and rate are decimals (`0.2` for 20%).
///
/// # Examples
/// ```
/// use optcalc_models::instruments::OptionParameters;
/// use optcalc_core::types::OptionType;
///
/// let params = OptionParameters {
///     underlying_price: 100.0,
///     strike_price: 105.0,
///     days_to_expiration: 73.0,
///     volatility: 0.25,
///     risk_free_rate: 0.04,
///     option_type: OptionType::Put,
/// };
/// assert!(params.validate().is_ok());
/// assert!((params.time_to_expiry() - 0.2).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct OptionParameters {
    /// Current price of the underlying (S)
    pub underlying_price: f64,
    /// Strike price (K)
    pub strike_price: f64,
    /// Calendar days until expiration
    pub days_to_expiration: f64,
    /// Annualised volatility (σ, decimal)
    pub volatility: f64,
    /// Annualised risk-free rate (r, decimal)
    pub risk_free_rate: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl OptionParameters {
    /// Checks every field against its domain.
    ///
    /// # Errors
    /// The first failing field, in declaration order:
    /// `InvalidSpot`, `InvalidStrike`, `InvalidExpiry`, `InvalidVolatility`, `InvalidRate`.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        check_positive(self.underlying_price, |spot| AnalyticalError::InvalidSpot { spot })?;
        check_positive(self.strike_price, |strike| AnalyticalError::InvalidStrike { strike })?;
        check_positive(self.days_to_expiration, |days| AnalyticalError::InvalidExpiry { days })?;
        check_positive(self.volatility, |volatility| {
            AnalyticalError::InvalidVolatility { volatility }
        })?;
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: self.risk_free_rate,
            });
        }
        Ok(())
    }

    /// Time to expiry in years (`days / 365`).
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.days_to_expiration / DAYS_PER_YEAR
    }
}

/// Inputs for solving the volatility implied by an observed option price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ImpliedVolatilityQuery {
    /// Current price of the underlying (S)
    pub underlying_price: f64,
    /// Strike price (K)
    pub strike_price: f64,
    /// Calendar days until expiration
    pub days_to_expiration: f64,
    /// Annualised risk-free rate (r, decimal)
    pub risk_free_rate: f64,
    /// Observed market price of the option
    pub observed_price: f64,
    /// Call or put
    pub option_type: OptionType,
}

impl ImpliedVolatilityQuery {
    /// Checks every field against its domain.
    ///
    /// # Errors
    /// `InvalidSpot`, `InvalidStrike`, `InvalidExpiry`, `InvalidRate` or `InvalidPrice`.
    pub fn validate(&self) -> Result<(), AnalyticalError> {
        check_positive(self.underlying_price, |spot| AnalyticalError::InvalidSpot { spot })?;
        check_positive(self.strike_price, |strike| AnalyticalError::InvalidStrike { strike })?;
        check_positive(self.days_to_expiration, |days| AnalyticalError::InvalidExpiry { days })?;
        if !self.risk_free_rate.is_finite() {
            return Err(AnalyticalError::InvalidRate {
                rate: self.risk_free_rate,
            });
        }
        check_positive(self.observed_price, |price| AnalyticalError::InvalidPrice { price })
    }

    /// Time to expiry in years (`days / 365`).
    #[inline]
    pub fn time_to_expiry(&self) -> f64 {
        self.days_to_expiration / DAYS_PER_YEAR
    }

    /// Builds the pricing inputs for a candidate volatility.
    ///
    /// # Examples
    /// ```
    /// use optcalc_models::instruments::ImpliedVolatilityQuery;
    /// use optcalc_core::types::OptionType;
    ///
    /// let query = ImpliedVolatilityQuery {
    ///     underlying_price: 100.0,
    ///     strike_price: 100.0,
    ///     days_to_expiration: 30.0,
    ///     risk_free_rate: 0.05,
    ///     observed_price: 2.5,
    ///     option_type: OptionType::Call,
    /// };
    /// assert_eq!(query.with_volatility(0.3).volatility, 0.3);
    /// ```
    pub fn with_volatility(&self, volatility: f64) -> OptionParameters {
        OptionParameters {
            underlying_price: self.underlying_price,
            strike_price: self.strike_price,
            days_to_expiration: self.days_to_expiration,
            volatility,
            risk_free_rate: self.risk_free_rate,
            option_type: self.option_type,
        }
    }
}

impl From<(OptionParameters, f64)> for ImpliedVolatilityQuery {
    /// Pairs pricing inputs with an observed price, dropping the volatility.
    fn from((params, observed_price): (OptionParameters, f64)) -> Self {
        Self {
            underlying_price: params.underlying_price,
            strike_price: params.strike_price,
            days_to_expiration: params.days_to_expiration,
            risk_free_rate: params.risk_free_rate,
            observed_price,
            option_type: params.option_type,
        }
    }
}
