//! Probability factors shared by the lognormal model families.
//!
//! d₁ and d₂ are computed once when an option is built and cached next to
//! its parameters, so every measure of one option reads the same snapshot.

use tracing::debug;

use super::error::AnalyticalError;
use crate::greeks::Measure;

/// Cached d₁, d₂ and √T.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DTerms {
    pub(crate) d1: f64,
    pub(crate) d2: f64,
    pub(crate) sqrt_t: f64,
    pub(crate) vol_sqrt_t: f64,
}

/// Why d₁/d₂ could not be formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Degeneracy {
    /// σ√T = 0
    ZeroTotalVolatility,
    /// ln(S/K) is infinite or undefined (zero spot or strike).
    UndefinedMoneyness,
}

impl Degeneracy {
    pub(crate) fn into_error(self, measure: Measure) -> AnalyticalError {
        let reason = match self {
            Degeneracy::ZeroTotalVolatility => "σ√T = 0, so d1 and d2 are undefined",
            Degeneracy::UndefinedMoneyness => {
                "ln(underlying / strike) is not finite, so d1 and d2 are undefined"
            }
        };
        AnalyticalError::DegenerateInput {
            measure,
            reason: reason.to_string(),
        }
    }
}

impl DTerms {
    /// d₁ = (ln(U/K) + drift·T + σ²T/2) / (σ√T), d₂ = d₁ − σ√T.
    ///
    /// `drift` is r − q for a spot underlying and zero for a forward.
    pub(crate) fn compute(
        underlying: f64,
        strike: f64,
        expiry: f64,
        drift: f64,
        volatility: f64,
    ) -> Result<Self, Degeneracy> {
        let sqrt_t = expiry.sqrt();
        let vol_sqrt_t = volatility * sqrt_t;
        if vol_sqrt_t == 0.0 {
            debug!(volatility, expiry, "zero total volatility, d-terms undefined");
            return Err(Degeneracy::ZeroTotalVolatility);
        }

        let log_moneyness = (underlying / strike).ln();
        let d1 = (log_moneyness + (drift + 0.5 * volatility * volatility) * expiry) / vol_sqrt_t;
        if !d1.is_finite() {
            debug!(underlying, strike, "non-finite log-moneyness, d-terms undefined");
            return Err(Degeneracy::UndefinedMoneyness);
        }

        Ok(Self {
            d1,
            d2: d1 - vol_sqrt_t,
            sqrt_t,
            vol_sqrt_t,
        })
    }
}

/// Rejects negative and non-finite inputs.
pub(crate) fn non_negative(name: &'static str, value: f64) -> Result<f64, AnalyticalError> {
    let value = finite(name, value)?;
    if value < 0.0 {
        debug!(name, value, "rejected negative parameter");
        return Err(AnalyticalError::InvalidParameter {
            name,
            value,
            constraint: "must be non-negative",
        });
    }
    Ok(value)
}

/// Rejects NaN and infinite inputs.
pub(crate) fn finite(name: &'static str, value: f64) -> Result<f64, AnalyticalError> {
    if !value.is_finite() {
        debug!(name, value, "rejected non-finite parameter");
        return Err(AnalyticalError::InvalidParameter {
            name,
            value,
            constraint: "must be finite",
        });
    }
    Ok(value)
}

/// Turns a non-finite formula result into `DegenerateInput`.
#[inline]
pub(crate) fn checked(measure: Measure, value: f64) -> Result<f64, AnalyticalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(AnalyticalError::DegenerateInput {
            measure,
            reason: format!("formula evaluated to {}", value),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compute_reference() {
        let d = DTerms::compute(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
        assert_relative_eq!(d.d1, 0.7270678653621663, epsilon = 1e-14);
        assert_relative_eq!(d.d2, 0.5770678653621663, epsilon = 1e-14);
        assert_eq!(d.sqrt_t, 1.0);
        assert_eq!(d.vol_sqrt_t, 0.15);
    }

    #[test]
    fn test_d2_relationship() {
        let d = DTerms::compute(100.0, 105.0, 0.5, 0.03, 0.2).unwrap();
        assert_relative_eq!(d.d2, d.d1 - 0.2 * 0.5_f64.sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn test_zero_volatility_or_expiry() {
        assert_eq!(
            DTerms::compute(100.0, 100.0, 1.0, 0.05, 0.0),
            Err(Degeneracy::ZeroTotalVolatility)
        );
        assert_eq!(
            DTerms::compute(100.0, 100.0, 0.0, 0.05, 0.2),
            Err(Degeneracy::ZeroTotalVolatility)
        );
    }

    #[test]
    fn test_zero_spot_or_strike() {
        assert_eq!(
            DTerms::compute(0.0, 100.0, 1.0, 0.05, 0.2),
            Err(Degeneracy::UndefinedMoneyness)
        );
        assert_eq!(
            DTerms::compute(100.0, 0.0, 1.0, 0.05, 0.2),
            Err(Degeneracy::UndefinedMoneyness)
        );
        assert_eq!(
            DTerms::compute(0.0, 0.0, 1.0, 0.05, 0.2),
            Err(Degeneracy::UndefinedMoneyness)
        );
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(non_negative("spot", 0.0), Ok(0.0));
        assert!(matches!(
            non_negative("spot", -1e-12),
            Err(AnalyticalError::InvalidParameter { name: "spot", .. })
        ));
        assert!(matches!(
            non_negative("strike", f64::NAN),
            Err(AnalyticalError::InvalidParameter {
                constraint: "must be finite",
                ..
            })
        ));
    }

    #[test]
    fn test_checked() {
        assert_eq!(checked(Measure::Gamma, 0.5), Ok(0.5));
        assert!(matches!(
            checked(Measure::Gamma, f64::INFINITY),
            Err(AnalyticalError::DegenerateInput {
                measure: Measure::Gamma,
                ..
            })
        ));
    }
}
