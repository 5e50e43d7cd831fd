//! Model families and the fixed measure lists of each aggregation view.

use std::fmt;

use super::Measure;

/// Named subset of measures returned together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GreekView {
    /// Delta, gamma, vega, theta, rho.
    Core,
    /// Ways of estimating the probability of finishing in the money.
    ItmProxies,
    /// Every Greek the family defines.
    All,
}

impl fmt::Display for GreekView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            GreekView::Core => "core",
            GreekView::ItmProxies => "itm_proxies",
            GreekView::All => "all",
        })
    }
}

/// Closed-form model family an option is priced under.
///
/// Owns the measure lists so both families' views cannot drift apart
/// silently.
///
/// # Examples
/// ```
/// use bsm_models::greeks::{GreekView, Measure, ModelFamily};
///
/// let all = ModelFamily::Black76.measures(GreekView::All).unwrap();
/// assert_eq!(all.len(), 7);
/// assert!(!ModelFamily::Black76.supports(Measure::Epsilon));
/// assert!(ModelFamily::Black76.measures(GreekView::ItmProxies).is_none());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelFamily {
    /// Black-Scholes-Merton on a spot price with continuous dividend yield.
    BlackScholes,
    /// Black-76 on a futures or forward price.
    Black76,
}

const CORE: [Measure; 5] = [
    Measure::Delta,
    Measure::Gamma,
    Measure::Vega,
    Measure::Theta,
    Measure::Rho,
];

const BLACK_SCHOLES_ITM: [Measure; 2] = [Measure::NaiveItm, Measure::DualDelta];

const BLACK_SCHOLES_ALL: [Measure; 18] = [
    Measure::Delta,
    Measure::Gamma,
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
    Measure::DualDelta,
    Measure::DualGamma,
];

const BLACK76_ALL: [Measure; 7] = [
    Measure::Delta,
    Measure::Gamma,
    Measure::Vega,
    Measure::Theta,
    Measure::Rho,
    Measure::Vanna,
    Measure::Vomma,
];

const BLACK76_SUPPORTED: [Measure; 8] = [
    Measure::Price,
    Measure::Delta,
    Measure::Gamma,
    Measure::Vega,
    Measure::Theta,
    Measure::Rho,
    Measure::Vanna,
    Measure::Vomma,
];

impl ModelFamily {
    /// Measures listed by `view`, in output order.
    ///
    /// Returns `None` when the family has no such view.
    pub fn measures(&self, view: GreekView) -> Option<&'static [Measure]> {
        match (self, view) {
            (_, GreekView::Core) => Some(&CORE),
            (ModelFamily::BlackScholes, GreekView::ItmProxies) => Some(&BLACK_SCHOLES_ITM),
            (ModelFamily::BlackScholes, GreekView::All) => Some(&BLACK_SCHOLES_ALL),
            (ModelFamily::Black76, GreekView::ItmProxies) => None,
            (ModelFamily::Black76, GreekView::All) => Some(&BLACK76_ALL),
        }
    }

    /// Every measure an option of this family can evaluate.
    pub fn supported_measures(&self) -> &'static [Measure] {
        match self {
            ModelFamily::BlackScholes => &Measure::ALL,
            ModelFamily::Black76 => &BLACK76_SUPPORTED,
        }
    }

    /// Returns true if `measure` is defined for this family.
    #[inline]
    pub fn supports(&self, measure: Measure) -> bool {
        self.supported_measures().contains(&measure)
    }

    /// Human-readable model name.
    pub fn name(&self) -> &'static str {
        match self {
            ModelFamily::BlackScholes => "Black-Scholes-Merton",
            ModelFamily::Black76 => "Black-76",
        }
    }
}

impl fmt::Display for ModelFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
