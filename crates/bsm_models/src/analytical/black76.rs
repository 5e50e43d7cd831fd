//! Black-76 model for European options on forwards and futures.
//!
//! **Call Price**: C = e^(-rT)·(F·N(d₁) - K·N(d₂))
//! **Put Price**: P = e^(-rT)·(K·N(-d₂) - F·N(-d₁))
//!
//! with d₁ = (ln(F/K) + σ²T/2) / (σ√T) and d₂ = d₁ - σ√T.
//!
//! The family defines price plus delta, gamma, vega, theta, rho, vanna and
//! vomma. Requesting any other measure fails with
//! `AnalyticalError::UnsupportedMeasure`.

use bsm_core::math::distributions::{norm_cdf, norm_pdf};
use bsm_core::traits::Priceable;
use bsm_core::types::PricingError;

use super::error::AnalyticalError;
use super::terms::{checked, finite, non_negative, DTerms, Degeneracy};
use crate::greeks::{Measure, ModelFamily, Sensitivities};
use crate::instruments::OptionType;

/// Validated inputs of the Black-76 model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBlack76Params"))]
pub struct Black76Params {
    forward: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
}

impl Black76Params {
    /// Creates validated Black-76 parameters.
    ///
    /// # Arguments
    /// * `forward` - Forward or futures price (F ≥ 0)
    /// * `strike` - Strike price (K ≥ 0)
    /// * `expiry` - Time to expiry in years (T ≥ 0)
    /// * `rate` - Discount rate (any sign)
    /// * `volatility` - Annualised volatility of the forward (σ ≥ 0)
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` naming the offending input.
    pub fn new(
        forward: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        Ok(Self {
            forward: non_negative("forward", forward)?,
            strike: non_negative("strike", strike)?,
            expiry: non_negative("expiry", expiry)?,
            rate: finite("rate", rate)?,
            volatility: non_negative("volatility", volatility)?,
        })
    }

    /// Forward price (F).
    #[inline]
    pub fn forward(&self) -> f64 {
        self.forward
    }

    /// Strike price (K).
    #[inline]
    pub fn strike(&self) -> f64 {
        self.strike
    }

    /// Time to expiry in years (T).
    #[inline]
    pub fn expiry(&self) -> f64 {
        self.expiry
    }

    /// Discount rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBlack76Params {
    forward: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBlack76Params> for Black76Params {
    type Error = AnalyticalError;

    fn try_from(raw: RawBlack76Params) -> Result<Self, Self::Error> {
        Self::new(raw.forward, raw.strike, raw.expiry, raw.rate, raw.volatility)
    }
}

/// European option on a forward under the Black-76 model.
///
/// # Examples
/// ```
/// use bsm_models::analytical::Black76;
/// use bsm_models::greeks::{Measure, Sensitivities};
///
/// let call = Black76::call(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
/// let put = Black76::put(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
///
/// // C - P = e^(-rT)·(F - K)
/// let parity = call.price().unwrap() - put.price().unwrap()
///     - (-0.0025_f64).exp() * 5.0;
/// assert!(parity.abs() < 1e-10);
///
/// assert!(call.measure(Measure::Charm).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Black76 {
    params: Black76Params,
    option_type: OptionType,
    terms: Result<DTerms, Degeneracy>,
}

impl Black76 {
    /// Binds validated parameters to a call or put.
    pub fn new(params: Black76Params, option_type: OptionType) -> Self {
        let terms = DTerms::compute(
            params.forward,
            params.strike,
            params.expiry,
            0.0,
            params.volatility,
        );
        Self {
            params,
            option_type,
            terms,
        }
    }

    /// Creates a call from raw inputs.
    ///
    /// # Errors
    /// See [`Black76Params::new`].
    pub fn call(
        forward: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        let params = Black76Params::new(forward, strike, expiry, rate, volatility)?;
        Ok(Self::new(params, OptionType::Call))
    }

    /// Creates a put from raw inputs.
    ///
    /// # Errors
    /// See [`Black76Params::new`].
    pub fn put(
        forward: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
    ) -> Result<Self, AnalyticalError> {
        let params = Black76Params::new(forward, strike, expiry, rate, volatility)?;
        Ok(Self::new(params, OptionType::Put))
    }

    /// Model inputs.
    #[inline]
    pub fn params(&self) -> &Black76Params {
        &self.params
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// d₁ = (ln(F/K) + σ²T/2) / (σ√T).
    ///
    /// # Errors
    /// `AnalyticalError::DegenerateInput` if d₁ is undefined. The error is
    /// reported against `Measure::Price`, the measure d₁ feeds, and its
    /// reason names d1 and d2.
    pub fn d1(&self) -> Result<f64, AnalyticalError> {
        self.terms(Measure::Price).map(|d| d.d1)
    }

    /// d₂ = d₁ - σ√T.
    ///
    /// # Errors
    /// Same as [`d1`](Black76::d1).
    pub fn d2(&self) -> Result<f64, AnalyticalError> {
        self.terms(Measure::Price).map(|d| d.d2)
    }

    /// Fair value.
    pub fn price(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Price, |d| self.price_at(d))
    }

    /// ∂V/∂F.
    ///
    /// - Call: e^(-rT)·N(d₁)
    /// - Put: -e^(-rT)·N(-d₁)
    pub fn delta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Delta, |d| {
            let er = self.discount();
            match self.option_type {
                OptionType::Call => er * norm_cdf(d.d1),
                OptionType::Put => -er * norm_cdf(-d.d1),
            }
        })
    }

    /// ∂²V/∂F² = e^(-rT)·φ(d₁) / (F·σ·√T).
    pub fn gamma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Gamma, |d| {
            self.discount() * norm_pdf(d.d1) / (self.params.forward * d.vol_sqrt_t)
        })
    }

    /// ∂V/∂σ = F·e^(-rT)·φ(d₁)·√T.
    pub fn vega(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vega, |d| self.vega_at(d))
    }

    /// Time decay, -∂V/∂T with the forward held fixed.
    pub fn theta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Theta, |d| {
            let Black76Params {
                forward: f,
                strike: k,
                rate: r,
                volatility: sigma,
                ..
            } = self.params;
            let er = self.discount();
            let decay = -f * er * norm_pdf(d.d1) * sigma / (2.0 * d.sqrt_t);

            match self.option_type {
                OptionType::Call => {
                    decay + r * f * er * norm_cdf(d.d1) - r * k * er * norm_cdf(d.d2)
                }
                OptionType::Put => {
                    decay - r * f * er * norm_cdf(-d.d1) + r * k * er * norm_cdf(-d.d2)
                }
            }
        })
    }

    /// ∂V/∂r = -T·V, the forward being independent of the rate.
    pub fn rho(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Rho, |d| -self.params.expiry * self.price_at(d))
    }

    /// ∂Δ/∂σ = -e^(-rT)·φ(d₁)·d₂ / σ.
    pub fn vanna(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vanna, |d| {
            -self.discount() * norm_pdf(d.d1) * d.d2 / self.params.volatility
        })
    }

    /// ∂Vega/∂σ = Vega·d₁·d₂ / σ.
    pub fn vomma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vomma, |d| {
            self.vega_at(d) * d.d1 * d.d2 / self.params.volatility
        })
    }

    fn terms(&self, measure: Measure) -> Result<&DTerms, AnalyticalError> {
        self.terms.as_ref().map_err(|d| d.into_error(measure))
    }

    fn evaluate(
        &self,
        measure: Measure,
        formula: impl FnOnce(&DTerms) -> f64,
    ) -> Result<f64, AnalyticalError> {
        let d = self.terms(measure)?;
        checked(measure, formula(d))
    }

    #[inline]
    fn discount(&self) -> f64 {
        (-self.params.rate * self.params.expiry).exp()
    }

    fn price_at(&self, d: &DTerms) -> f64 {
        let Black76Params {
            forward: f,
            strike: k,
            ..
        } = self.params;
        let er = self.discount();
        match self.option_type {
            OptionType::Call => er * (f * norm_cdf(d.d1) - k * norm_cdf(d.d2)),
            OptionType::Put => er * (k * norm_cdf(-d.d2) - f * norm_cdf(-d.d1)),
        }
    }

    fn vega_at(&self, d: &DTerms) -> f64 {
        self.params.forward * self.discount() * norm_pdf(d.d1) * d.sqrt_t
    }
}

impl Sensitivities for Black76 {
    fn family(&self) -> ModelFamily {
        ModelFamily::Black76
    }

    fn expiry(&self) -> f64 {
        self.params.expiry
    }

    fn measure(&self, measure: Measure) -> Result<f64, AnalyticalError> {
        match measure {
            Measure::Price => self.price(),
            Measure::Delta => self.delta(),
            Measure::Gamma => self.gamma(),
            Measure::Vega => self.vega(),
            Measure::Theta => self.theta(),
            Measure::Rho => self.rho(),
            Measure::Vanna => self.vanna(),
            Measure::Vomma => self.vomma(),
            _ => Err(AnalyticalError::UnsupportedMeasure {
                family: ModelFamily::Black76,
                measure,
            }),
        }
    }
}

impl Priceable for Black76 {
    fn price(&self) -> Result<f64, PricingError> {
        Black76::price(self).map_err(PricingError::from)
    }
}
