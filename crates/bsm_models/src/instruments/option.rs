//! Option side and the static-dispatch wrapper over model families.

use std::fmt;

use bsm_core::traits::Priceable;
use bsm_core::types::PricingError;

use crate::analytical::{AnalyticalError, Black76, BlackScholes};
use crate::greeks::{Measure, ModelFamily, Sensitivities};

/// Side of a European option.
///
/// # Examples
/// ```
/// use bsm_models::instruments::OptionType;
///
/// assert_eq!(OptionType::Call.intrinsic(110.0, 100.0), 10.0);
/// assert_eq!(OptionType::Put.intrinsic(110.0, 100.0), 0.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum OptionType {
    /// Right to buy at the strike: max(U - K, 0)
    Call,
    /// Right to sell at the strike: max(K - U, 0)
    Put,
}

impl OptionType {
    /// Returns whether this is a call.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Returns whether this is a put.
    #[inline]
    pub fn is_put(&self) -> bool {
        matches!(self, OptionType::Put)
    }

    /// Payoff at expiry for the given underlying level.
    #[inline]
    pub fn intrinsic(&self, underlying: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (underlying - strike).max(0.0),
            OptionType::Put => (strike - underlying).max(0.0),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// European option of either model family.
///
/// Composites hold their legs through this enum, so a strategy is a plain
/// value with no boxing.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalyticalOption {
    /// Spot option under Black-Scholes-Merton.
    BlackScholes(BlackScholes),
    /// Option on a forward under Black-76.
    Black76(Black76),
}

impl AnalyticalOption {
    /// Call or put.
    pub fn option_type(&self) -> OptionType {
        match self {
            AnalyticalOption::BlackScholes(o) => o.option_type(),
            AnalyticalOption::Black76(o) => o.option_type(),
        }
    }

    /// Strike price.
    pub fn strike(&self) -> f64 {
        match self {
            AnalyticalOption::BlackScholes(o) => o.params().strike(),
            AnalyticalOption::Black76(o) => o.params().strike(),
        }
    }

    /// Spot price for Black-Scholes-Merton, forward price for Black-76.
    pub fn underlying(&self) -> f64 {
        match self {
            AnalyticalOption::BlackScholes(o) => o.params().spot(),
            AnalyticalOption::Black76(o) => o.params().forward(),
        }
    }

    /// Risk-free (discount) rate.
    pub fn rate(&self) -> f64 {
        match self {
            AnalyticalOption::BlackScholes(o) => o.params().rate(),
            AnalyticalOption::Black76(o) => o.params().rate(),
        }
    }

    /// Volatility.
    pub fn volatility(&self) -> f64 {
        match self {
            AnalyticalOption::BlackScholes(o) => o.params().volatility(),
            AnalyticalOption::Black76(o) => o.params().volatility(),
        }
    }

    /// Payoff at expiry for the current underlying level.
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type().intrinsic(self.underlying(), self.strike())
    }
}

impl From<BlackScholes> for AnalyticalOption {
    fn from(option: BlackScholes) -> Self {
        AnalyticalOption::BlackScholes(option)
    }
}

impl From<Black76> for AnalyticalOption {
    fn from(option: Black76) -> Self {
        AnalyticalOption::Black76(option)
    }
}

impl Sensitivities for AnalyticalOption {
    fn family(&self) -> ModelFamily {
        match self {
            AnalyticalOption::BlackScholes(o) => o.family(),
            AnalyticalOption::Black76(o) => o.family(),
        }
    }

    fn expiry(&self) -> f64 {
        match self {
            AnalyticalOption::BlackScholes(o) => Sensitivities::expiry(o),
            AnalyticalOption::Black76(o) => Sensitivities::expiry(o),
        }
    }

    fn measure(&self, measure: Measure) -> Result<f64, AnalyticalError> {
        match self {
            AnalyticalOption::BlackScholes(o) => o.measure(measure),
            AnalyticalOption::Black76(o) => o.measure(measure),
        }
    }
}

impl Priceable for AnalyticalOption {
    fn price(&self) -> Result<f64, PricingError> {
        self.measure(Measure::Price).map_err(PricingError::from)
    }
}
