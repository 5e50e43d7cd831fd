//! Measure catalogue, aggregation views and the shared capability trait.
//!
//! This module provides:
//! - [`Measure`]: every price and sensitivity measure by name
//! - [`ModelFamily`] and [`GreekView`]: fixed measure lists per view
//! - [`Greeks`]: ordered measure-to-value mapping
//! - [`Sensitivities`]: capability set shared by options and composites

mod map;
mod measure;
mod views;

pub use map::Greeks;
pub use measure::Measure;
pub use views::{GreekView, ModelFamily};

use crate::analytical::AnalyticalError;

/// Capability set of anything that reports closed-form measures.
///
/// Implementors supply [`measure`](Sensitivities::measure); the aggregation
/// views are provided on top of it and take their key lists from
/// [`ModelFamily::measures`], so every implementor of a family returns
/// exactly the same keys.
///
/// # Examples
/// ```
/// use bsm_models::analytical::Black76;
/// use bsm_models::greeks::{Measure, Sensitivities};
///
/// let call = Black76::call(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
/// let core = call.core_greeks().unwrap();
/// assert_eq!(
///     core.keys().collect::<Vec<_>>(),
///     vec![Measure::Delta, Measure::Gamma, Measure::Vega, Measure::Theta, Measure::Rho]
/// );
/// assert!(call.itm_proxies().is_err());
/// ```
pub trait Sensitivities {
    /// Model family the measures are computed under.
    fn family(&self) -> ModelFamily;

    /// Time to expiry in years.
    fn expiry(&self) -> f64;

    /// Evaluates a single measure.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedMeasure` if the family does not define it
    /// - `AnalyticalError::DegenerateInput` if the formula is undefined for
    ///   the inputs
    fn measure(&self, measure: Measure) -> Result<f64, AnalyticalError>;

    /// Evaluates every measure listed by `view`, in view order.
    ///
    /// # Errors
    /// - `AnalyticalError::UnsupportedView` if the family has no such view
    /// - any error from [`measure`](Sensitivities::measure)
    fn view(&self, view: GreekView) -> Result<Greeks, AnalyticalError> {
        let family = self.family();
        let measures = family
            .measures(view)
            .ok_or(AnalyticalError::UnsupportedView { family, view })?;

        measures
            .iter()
            .map(|&m| self.measure(m).map(|value| (m, value)))
            .collect()
    }

    /// Delta, gamma, vega, theta and rho.
    fn core_greeks(&self) -> Result<Greeks, AnalyticalError> {
        self.view(GreekView::Core)
    }

    /// Naive in-the-money probability and dual delta.
    fn itm_proxies(&self) -> Result<Greeks, AnalyticalError> {
        self.view(GreekView::ItmProxies)
    }

    /// Every Greek the family defines.
    fn all_greeks(&self) -> Result<Greeks, AnalyticalError> {
        self.view(GreekView::All)
    }
}
