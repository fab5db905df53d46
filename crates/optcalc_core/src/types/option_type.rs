//! Option side (call or put).

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side of a vanilla European option.
///
/// # Examples
/// ```
/// use optcalc_core::types::OptionType;
///
/// let call: OptionType = "Call".parse().unwrap();
/// assert_eq!(call, OptionType::Call);
/// assert_eq!(call.to_string(), "call");
/// assert!("straddle".parse::<OptionType>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy the underlying at the strike.
    #[default]
    Call,
    /// Right to sell the underlying at the strike.
    Put,
}

impl OptionType {
    /// Returns true for a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns true for a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Lowercase name used on the wire and in logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a recognised option side.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown option type: {0}. Must be one of: call, put")]
pub struct OptionTypeParseError(pub String);

impl FromStr for OptionType {
    type Err = OptionTypeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" | "c" => Ok(OptionType::Call),
            "put" | "p" => Ok(OptionType::Put),
            _ => Err(OptionTypeParseError(s.to_string())),
        }
    }
}
