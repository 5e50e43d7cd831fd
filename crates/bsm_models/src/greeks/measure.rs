//! Closed catalogue of the measures an analytic option can report.

use std::fmt;
use std::str::FromStr;

use crate::analytical::AnalyticalError;

/// A price or sensitivity measure.
///
/// Declaration order is the canonical order used by `Measure::ALL`.
///
/// # First-Order Greeks
///
/// - `Delta`: ∂V/∂S
/// - `DualDelta`: ∂V/∂K
/// - `Vega`: ∂V/∂σ
/// - `Theta`: -∂V/∂T (time decay)
/// - `Epsilon`: ∂V/∂q (also known as psi)
/// - `Rho`: ∂V/∂r
/// - `Lambda`: (∂V/∂S)·S/V (gearing)
///
/// # Higher-Order Greeks
///
/// - `Gamma`: ∂²V/∂S², `DualGamma`: ∂²V/∂K²
/// - `Vanna`: ∂²V/∂S∂σ, `Charm`: ∂²V/∂S∂T, `Vomma`: ∂²V/∂σ², `Veta`: ∂²V/∂σ∂T
/// - `Speed`: ∂³V/∂S³, `Zomma`: ∂³V/∂S²∂σ, `Color`: ∂³V/∂S²∂T, `Ultima`: ∂³V/∂σ³
///
/// # Other
///
/// - `Price`: fair value
/// - `NaiveItm`: risk-neutral probability of finishing in the money
/// - `Phi`: risk-neutral density of the terminal price at the strike
///
/// # Examples
/// ```
/// use bsm_models::greeks::Measure;
///
/// assert_eq!(Measure::NaiveItm.as_str(), "naive_itm");
/// assert_eq!("dual_gamma".parse::<Measure>().unwrap(), Measure::DualGamma);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Measure {
    /// Fair value of the option.
    Price,
    /// Naive probability of finishing in the money.
    NaiveItm,
    /// ∂V/∂S
    Delta,
    /// ∂V/∂K
    DualDelta,
    /// ∂²V/∂S²
    Gamma,
    /// ∂²V/∂K²
    DualGamma,
    /// ∂V/∂σ
    Vega,
    /// Time decay.
    Theta,
    /// ∂V/∂q
    Epsilon,
    /// ∂V/∂r
    Rho,
    /// Percentage price change per percentage move in the underlying.
    Lambda,
    /// ∂Δ/∂σ
    Vanna,
    /// Delta decay.
    Charm,
    /// ∂Vega/∂σ
    Vomma,
    /// ∂Vega/∂T
    Veta,
    /// Terminal density at the strike.
    Phi,
    /// ∂Γ/∂S
    Speed,
    /// ∂Γ/∂σ
    Zomma,
    /// Gamma decay.
    Color,
    /// ∂Vomma/∂σ
    Ultima,
}

impl Measure {
    /// Every measure, in declaration order.
    pub const ALL: [Measure; 20] = [
        Measure::Price,
        Measure::NaiveItm,
        Measure::Delta,
        Measure::DualDelta,
        Measure::Gamma,
        Measure::DualGamma,
        Measure::Vega,
        Measure::Theta,
        Measure::Epsilon,
        Measure::Rho,
        Measure::Lambda,
        Measure::Vanna,
        Measure::Charm,
        Measure::Vomma,
        Measure::Veta,
        Measure::Phi,
        Measure::Speed,
        Measure::Zomma,
        Measure::Color,
        Measure::Ultima,
    ];

    /// Stable snake_case key used in aggregation views.
    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Price => "price",
            Measure::NaiveItm => "naive_itm",
            Measure::Delta => "delta",
            Measure::DualDelta => "dual_delta",
            Measure::Gamma => "gamma",
            Measure::DualGamma => "dual_gamma",
            Measure::Vega => "vega",
            Measure::Theta => "theta",
            Measure::Epsilon => "epsilon",
            Measure::Rho => "rho",
            Measure::Lambda => "lambda",
            Measure::Vanna => "vanna",
            Measure::Charm => "charm",
            Measure::Vomma => "vomma",
            Measure::Veta => "veta",
            Measure::Phi => "phi",
            Measure::Speed => "speed",
            Measure::Zomma => "zomma",
            Measure::Color => "color",
            Measure::Ultima => "ultima",
        }
    }

    /// Returns true for measures that are derivatives of the price.
    #[inline]
    pub fn is_greek(&self) -> bool {
        !matches!(self, Measure::Price | Measure::NaiveItm)
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = AnalyticalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Measure::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| AnalyticalError::UnknownMeasure(s.to_string()))
    }
}
