//! Black-Scholes-Merton pricing model for European options.
//!
//! This module provides closed-form prices and eighteen analytical Greeks
//! for European calls and puts on a spot underlying paying a continuous
//! dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! ## Degenerate Inputs
//!
//! σ = 0, T = 0, S = 0 or K = 0 leave d₁ undefined. Such options can still be
//! constructed, but every measure returns `AnalyticalError::DegenerateInput`.

use bsm_core::math::distributions::{norm_cdf, norm_pdf};
use bsm_core::traits::Priceable;
use bsm_core::types::PricingError;

use super::error::AnalyticalError;
use super::terms::{checked, finite, non_negative, DTerms, Degeneracy};
use crate::greeks::{Measure, ModelFamily, Sensitivities};
use crate::instruments::OptionType;

/// Validated inputs of the Black-Scholes-Merton model.
///
/// # Examples
/// ```
/// use bsm_models::analytical::BlackScholesParams;
///
/// let params = BlackScholesParams::new(100.0, 95.0, 0.5, 0.03, 0.25, 0.02).unwrap();
/// assert_eq!(params.strike(), 95.0);
///
/// // Negative rates are allowed, negative volatility is not
/// assert!(BlackScholesParams::new(100.0, 95.0, 0.5, -0.01, 0.25, 0.0).is_ok());
/// assert!(BlackScholesParams::new(100.0, 95.0, 0.5, 0.03, -0.25, 0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawBlackScholesParams"))]
pub struct BlackScholesParams {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    dividend_yield: f64,
}

impl BlackScholesParams {
    /// Creates validated Black-Scholes-Merton parameters.
    ///
    /// # Arguments
    /// * `spot` - Price of the underlying asset (S ≥ 0)
    /// * `strike` - Strike price (K ≥ 0)
    /// * `expiry` - Time to expiry in years (T ≥ 0)
    /// * `rate` - Continuously compounded risk-free rate (any sign)
    /// * `volatility` - Annualised volatility (σ ≥ 0)
    /// * `dividend_yield` - Continuous dividend yield (q ≥ 0)
    ///
    /// # Errors
    /// `AnalyticalError::InvalidParameter` naming the first input that is
    /// negative (where a sign is required) or not finite.
    pub fn new(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Result<Self, AnalyticalError> {
        Ok(Self {
            spot: non_negative("spot", spot)?,
            strike: non_negative("strike", strike)?,
            expiry: non_negative("expiry", expiry)?,
            rate: finite("rate", rate)?,
            volatility: non_negative("volatility", volatility)?,
            dividend_yield: non_negative("dividend_yield", dividend_yield)?,
        })
    }

    /// Spot price (S).
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
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

    /// Risk-free rate (r).
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Volatility (σ).
    #[inline]
    pub fn volatility(&self) -> f64 {
        self.volatility
    }

    /// Dividend yield (q).
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Forward price of the underlying: S·e^((r-q)T).
    #[inline]
    pub fn forward(&self) -> f64 {
        self.spot * ((self.rate - self.dividend_yield) * self.expiry).exp()
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawBlackScholesParams {
    spot: f64,
    strike: f64,
    expiry: f64,
    rate: f64,
    volatility: f64,
    #[serde(default)]
    dividend_yield: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RawBlackScholesParams> for BlackScholesParams {
    type Error = AnalyticalError;

    fn try_from(raw: RawBlackScholesParams) -> Result<Self, Self::Error> {
        Self::new(
            raw.spot,
            raw.strike,
            raw.expiry,
            raw.rate,
            raw.volatility,
            raw.dividend_yield,
        )
    }
}

/// European option under the Black-Scholes-Merton model.
///
/// d₁ and d₂ are computed once at construction; the option is immutable
/// afterwards and safe to share between threads.
///
/// # Examples
/// ```
/// use bsm_models::analytical::BlackScholes;
///
/// let call = BlackScholes::call(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
/// let put = BlackScholes::put(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
///
/// // Put-call parity: C - P = S·e^(-qT) - K·e^(-rT)
/// let parity = call.price().unwrap() - put.price().unwrap()
///     - (55.0 - 50.0 * (-0.0025_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholes {
    params: BlackScholesParams,
    option_type: OptionType,
    terms: Result<DTerms, Degeneracy>,
}

impl BlackScholes {
    /// Binds validated parameters to a call or put.
    pub fn new(params: BlackScholesParams, option_type: OptionType) -> Self {
        let terms = DTerms::compute(
            params.spot,
            params.strike,
            params.expiry,
            params.rate - params.dividend_yield,
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
    /// See [`BlackScholesParams::new`].
    pub fn call(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Result<Self, AnalyticalError> {
        let params = BlackScholesParams::new(spot, strike, expiry, rate, volatility, dividend_yield)?;
        Ok(Self::new(params, OptionType::Call))
    }

    /// Creates a put from raw inputs.
    ///
    /// # Errors
    /// See [`BlackScholesParams::new`].
    pub fn put(
        spot: f64,
        strike: f64,
        expiry: f64,
        rate: f64,
        volatility: f64,
        dividend_yield: f64,
    ) -> Result<Self, AnalyticalError> {
        let params = BlackScholesParams::new(spot, strike, expiry, rate, volatility, dividend_yield)?;
        Ok(Self::new(params, OptionType::Put))
    }

    /// Model inputs.
    #[inline]
    pub fn params(&self) -> &BlackScholesParams {
        &self.params
    }

    /// Call or put.
    #[inline]
    pub fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Payoff at expiry for the current spot: max(±(S - K), 0).
    pub fn intrinsic_value(&self) -> f64 {
        self.option_type.intrinsic(self.params.spot, self.params.strike)
    }

    /// d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T).
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
    /// Same as [`d1`](BlackScholes::d1).
    pub fn d2(&self) -> Result<f64, AnalyticalError> {
        self.terms(Measure::Price).map(|d| d.d2)
    }

    // ==========================================================
    // Side-dependent measures
    // ==========================================================

    /// Fair value.
    pub fn price(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Price, |d| self.price_at(d))
    }

    /// Naive risk-neutral probability of finishing in the money.
    ///
    /// - Call: N(d₂)
    /// - Put: N(-d₂)
    pub fn in_the_money(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::NaiveItm, |d| match self.option_type {
            OptionType::Call => norm_cdf(d.d2),
            OptionType::Put => norm_cdf(-d.d2),
        })
    }

    /// ∂V/∂S.
    ///
    /// - Call: e^(-qT)·N(d₁)
    /// - Put: e^(-qT)·(N(d₁) - 1)
    pub fn delta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Delta, |d| self.delta_at(d))
    }

    /// ∂V/∂K.
    ///
    /// - Call: -e^(-rT)·N(d₂)
    /// - Put: e^(-rT)·N(-d₂)
    pub fn dual_delta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::DualDelta, |d| {
            let er = self.rate_discount();
            match self.option_type {
                OptionType::Call => -er * norm_cdf(d.d2),
                OptionType::Put => er * norm_cdf(-d.d2),
            }
        })
    }

    /// Time decay, -∂V/∂T.
    pub fn theta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Theta, |d| {
            let BlackScholesParams {
                spot: s,
                strike: k,
                rate: r,
                volatility: sigma,
                dividend_yield: q,
                ..
            } = self.params;
            let eq = self.dividend_discount();
            let er = self.rate_discount();
            let decay = -eq * s * norm_pdf(d.d1) * sigma / (2.0 * d.sqrt_t);

            match self.option_type {
                OptionType::Call => {
                    decay - r * k * er * norm_cdf(d.d2) + q * s * eq * norm_cdf(d.d1)
                }
                OptionType::Put => {
                    decay + r * k * er * norm_cdf(-d.d2) - q * s * eq * norm_cdf(-d.d1)
                }
            }
        })
    }

    /// ∂V/∂q, also known as psi.
    ///
    /// - Call: -S·T·e^(-qT)·N(d₁)
    /// - Put: S·T·e^(-qT)·N(-d₁)
    pub fn epsilon(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Epsilon, |d| {
            let scale = self.params.spot * self.params.expiry * self.dividend_discount();
            match self.option_type {
                OptionType::Call => -scale * norm_cdf(d.d1),
                OptionType::Put => scale * norm_cdf(-d.d1),
            }
        })
    }

    /// ∂V/∂r.
    ///
    /// - Call: K·T·e^(-rT)·N(d₂)
    /// - Put: -K·T·e^(-rT)·N(-d₂)
    pub fn rho(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Rho, |d| {
            let scale = self.params.strike * self.params.expiry * self.rate_discount();
            match self.option_type {
                OptionType::Call => scale * norm_cdf(d.d2),
                OptionType::Put => -scale * norm_cdf(-d.d2),
            }
        })
    }

    /// Delta decay, -∂Δ/∂T.
    pub fn charm(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Charm, |d| {
            let BlackScholesParams {
                expiry: t,
                rate: r,
                dividend_yield: q,
                ..
            } = self.params;
            let eq = self.dividend_discount();
            let drift_term = eq * norm_pdf(d.d1) * (2.0 * (r - q) * t - d.d2 * d.vol_sqrt_t)
                / (2.0 * t * d.vol_sqrt_t);

            match self.option_type {
                OptionType::Call => q * eq * norm_cdf(d.d1) - drift_term,
                OptionType::Put => -q * eq * norm_cdf(-d.d1) - drift_term,
            }
        })
    }

    // ==========================================================
    // Shared measures
    // ==========================================================

    /// ∂²V/∂S² = e^(-qT)·φ(d₁) / (S·σ·√T).
    pub fn gamma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Gamma, |d| self.gamma_at(d))
    }

    /// ∂²V/∂K² = e^(-rT)·φ(d₂) / (K·σ·√T).
    pub fn dual_gamma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::DualGamma, |d| {
            self.rate_discount() * norm_pdf(d.d2) / (self.params.strike * d.vol_sqrt_t)
        })
    }

    /// ∂V/∂σ = S·e^(-qT)·φ(d₁)·√T.
    ///
    /// Carries the dividend discount e^(-qT). Libraries that drop it agree
    /// only when q = 0.
    pub fn vega(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vega, |d| self.vega_at(d))
    }

    /// Gearing: Δ·S / V.
    ///
    /// # Errors
    /// `AnalyticalError::DegenerateInput` when the price is exactly zero,
    /// which happens deep out of the money with little time or volatility.
    pub fn lambda(&self) -> Result<f64, AnalyticalError> {
        let d = self.terms(Measure::Lambda)?;
        let price = self.price_at(d);
        if price == 0.0 {
            return Err(AnalyticalError::DegenerateInput {
                measure: Measure::Lambda,
                reason: "option price is zero".to_string(),
            });
        }
        checked(Measure::Lambda, self.delta_at(d) * self.params.spot / price)
    }

    /// ∂Δ/∂σ = -e^(-qT)·φ(d₁)·d₂ / σ.
    ///
    /// Carries the dividend discount e^(-qT), like [`vega`](BlackScholes::vega).
    pub fn vanna(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vanna, |d| {
            -self.dividend_discount() * norm_pdf(d.d1) * d.d2 / self.params.volatility
        })
    }

    /// ∂Vega/∂σ = Vega·d₁·d₂ / σ.
    pub fn vomma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Vomma, |d| {
            self.vega_at(d) * d.d1 * d.d2 / self.params.volatility
        })
    }

    /// ∂Vega/∂T.
    pub fn veta(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Veta, |d| {
            let BlackScholesParams {
                spot: s,
                expiry: t,
                rate: r,
                dividend_yield: q,
                ..
            } = self.params;
            -s * self.dividend_discount()
                * norm_pdf(d.d1)
                * d.sqrt_t
                * (q + (r - q) * d.d1 / d.vol_sqrt_t - (1.0 + d.d1 * d.d2) / (2.0 * t))
        })
    }

    /// Risk-neutral density of the terminal price, evaluated at the strike
    /// and discounted.
    pub fn phi(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Phi, |_| {
            let BlackScholesParams {
                spot: s,
                strike: k,
                expiry: t,
                rate: r,
                volatility: sigma,
                dividend_yield: q,
            } = self.params;
            let variance = sigma * sigma * t;
            let exponent = -((k / s).ln() - ((r - q) - 0.5 * sigma * sigma) * t).powi(2)
                / (2.0 * variance);

            self.rate_discount() * (1.0 / k)
                * (1.0 / (2.0 * std::f64::consts::PI * variance).sqrt())
                * exponent.exp()
        })
    }

    /// ∂Γ/∂S = -Γ/S·(d₁/(σ√T) + 1).
    pub fn speed(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Speed, |d| {
            -self.gamma_at(d) / self.params.spot * (d.d1 / d.vol_sqrt_t + 1.0)
        })
    }

    /// ∂Γ/∂σ = Γ·(d₁·d₂ - 1) / σ.
    pub fn zomma(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Zomma, |d| {
            self.gamma_at(d) * (d.d1 * d.d2 - 1.0) / self.params.volatility
        })
    }

    /// ∂Γ/∂T.
    pub fn color(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Color, |d| {
            let BlackScholesParams {
                spot: s,
                expiry: t,
                rate: r,
                dividend_yield: q,
                ..
            } = self.params;
            -self.dividend_discount() * norm_pdf(d.d1) / (2.0 * s * t * d.vol_sqrt_t)
                * (2.0 * q * t
                    + 1.0
                    + (2.0 * (r - q) * t - d.d2 * d.vol_sqrt_t) / d.vol_sqrt_t * d.d1)
        })
    }

    /// ∂Vomma/∂σ = -Vega/σ²·(d₁d₂(1 - d₁d₂) + d₁² + d₂²).
    pub fn ultima(&self) -> Result<f64, AnalyticalError> {
        self.evaluate(Measure::Ultima, |d| {
            let sigma = self.params.volatility;
            let d1d2 = d.d1 * d.d2;
            -self.vega_at(d) / (sigma * sigma)
                * (d1d2 * (1.0 - d1d2) + d.d1 * d.d1 + d.d2 * d.d2)
        })
    }

    // ==========================================================
    // Internals
    // ==========================================================

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
    fn dividend_discount(&self) -> f64 {
        (-self.params.dividend_yield * self.params.expiry).exp()
    }

    #[inline]
    fn rate_discount(&self) -> f64 {
        (-self.params.rate * self.params.expiry).exp()
    }

    fn price_at(&self, d: &DTerms) -> f64 {
        let s = self.params.spot * self.dividend_discount();
        let k = self.params.strike * self.rate_discount();
        match self.option_type {
            OptionType::Call => s * norm_cdf(d.d1) - k * norm_cdf(d.d2),
            OptionType::Put => k * norm_cdf(-d.d2) - s * norm_cdf(-d.d1),
        }
    }

    fn delta_at(&self, d: &DTerms) -> f64 {
        let eq = self.dividend_discount();
        match self.option_type {
            OptionType::Call => eq * norm_cdf(d.d1),
            OptionType::Put => eq * (norm_cdf(d.d1) - 1.0),
        }
    }

    fn gamma_at(&self, d: &DTerms) -> f64 {
        self.dividend_discount() * norm_pdf(d.d1) / (self.params.spot * d.vol_sqrt_t)
    }

    fn vega_at(&self, d: &DTerms) -> f64 {
        self.params.spot * self.dividend_discount() * norm_pdf(d.d1) * d.sqrt_t
    }
}

impl Sensitivities for BlackScholes {
    fn family(&self) -> ModelFamily {
        ModelFamily::BlackScholes
    }

    fn expiry(&self) -> f64 {
        self.params.expiry
    }

    fn measure(&self, measure: Measure) -> Result<f64, AnalyticalError> {
        match measure {
            Measure::Price => self.price(),
            Measure::NaiveItm => self.in_the_money(),
            Measure::Delta => self.delta(),
            Measure::DualDelta => self.dual_delta(),
            Measure::Gamma => self.gamma(),
            Measure::DualGamma => self.dual_gamma(),
            Measure::Vega => self.vega(),
            Measure::Theta => self.theta(),
            Measure::Epsilon => self.epsilon(),
            Measure::Rho => self.rho(),
            Measure::Lambda => self.lambda(),
            Measure::Vanna => self.vanna(),
            Measure::Charm => self.charm(),
            Measure::Vomma => self.vomma(),
            Measure::Veta => self.veta(),
            Measure::Phi => self.phi(),
            Measure::Speed => self.speed(),
            Measure::Zomma => self.zomma(),
            Measure::Color => self.color(),
            Measure::Ultima => self.ultima(),
        }
    }
}

impl Priceable for BlackScholes {
    fn price(&self) -> Result<f64, PricingError> {
        BlackScholes::price(self).map_err(PricingError::from)
    }
}
