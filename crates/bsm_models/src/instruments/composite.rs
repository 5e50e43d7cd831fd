//! Multi-leg option strategies.
//!
//! A [`Composite`] is an ordered list of signed legs sharing one model
//! family and one expiry. Every measure of the composite is the signed sum
//! of the leg measures, accumulated in leg order.

use std::fmt;

use bsm_core::traits::Priceable;
use bsm_core::types::PricingError;
use tracing::debug;

use super::option::{AnalyticalOption, OptionType};
use crate::analytical::{
    AnalyticalError, Black76, Black76Params, BlackScholes, BlackScholesParams,
};
use crate::greeks::{Measure, ModelFamily, Sensitivities};

/// Direction of a leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Position {
    /// Bought, weight +1.
    Long,
    /// Sold, weight -1.
    Short,
}

impl Position {
    /// Weight applied to the leg's measures.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }

    /// The other direction.
    #[inline]
    pub fn opposite(&self) -> Self {
        match self {
            Position::Long => Position::Short,
            Position::Short => Position::Long,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "Long"),
            Position::Short => write!(f, "Short"),
        }
    }
}

/// One signed option inside a [`Composite`].
#[derive(Debug, Clone, PartialEq)]
pub struct Leg {
    option: AnalyticalOption,
    position: Position,
}

impl Leg {
    /// Creates a leg.
    pub fn new(option: impl Into<AnalyticalOption>, position: Position) -> Self {
        Self {
            option: option.into(),
            position,
        }
    }

    /// Long leg.
    pub fn long(option: impl Into<AnalyticalOption>) -> Self {
        Self::new(option, Position::Long)
    }

    /// Short leg.
    pub fn short(option: impl Into<AnalyticalOption>) -> Self {
        Self::new(option, Position::Short)
    }

    /// The option held.
    #[inline]
    pub fn option(&self) -> &AnalyticalOption {
        &self.option
    }

    /// Long or short.
    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    fn weighted(&self, measure: Measure) -> Result<f64, AnalyticalError> {
        Ok(self.position.sign() * self.option.measure(measure)?)
    }
}

/// Signed combination of options of one family and one expiry.
///
/// # Examples
/// ```
/// use bsm_models::analytical::BlackScholes;
/// use bsm_models::instruments::{Composite, Position};
///
/// let call = BlackScholes::call(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
/// let put = BlackScholes::put(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
///
/// let long = Composite::straddle(call.clone(), put.clone(), Position::Long).unwrap();
/// let short = long.negate();
///
/// assert_eq!(long.vega().unwrap(), call.vega().unwrap() + put.vega().unwrap());
/// assert_eq!(short.vega().unwrap(), -long.vega().unwrap());
///
/// // A put cannot stand in for the call leg
/// assert!(Composite::straddle(put.clone(), put, Position::Long).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Composite {
    legs: Vec<Leg>,
    family: ModelFamily,
    expiry: f64,
}

impl Composite {
    /// Builds a composite from arbitrary legs.
    ///
    /// # Errors
    /// `AnalyticalError::Composition` if `legs` is empty, mixes model
    /// families, or mixes expiries.
    pub fn new(legs: Vec<Leg>) -> Result<Self, AnalyticalError> {
        let first = legs
            .first()
            .ok_or_else(|| rejected("a composite needs at least one leg".to_string()))?;
        let family = first.option.family();
        let expiry = first.option.expiry();

        for (i, leg) in legs.iter().enumerate().skip(1) {
            let leg_family = leg.option.family();
            if leg_family != family {
                return Err(rejected(format!(
                    "leg {} uses the {} model but leg 0 uses {}",
                    i, leg_family, family
                )));
            }
            let leg_expiry = leg.option.expiry();
            if leg_expiry != expiry {
                return Err(rejected(format!(
                    "leg {} expires at {} but leg 0 expires at {}",
                    i, leg_expiry, expiry
                )));
            }
        }

        debug!(legs = legs.len(), %family, expiry, "built composite");
        Ok(Self {
            legs,
            family,
            expiry,
        })
    }

    /// Long or short call plus put on the same strike.
    ///
    /// # Errors
    /// `AnalyticalError::Composition` unless `call` is a call, `put` is a put,
    /// and both share family, underlying, strike and expiry.
    pub fn straddle(
        call: impl Into<AnalyticalOption>,
        put: impl Into<AnalyticalOption>,
        position: Position,
    ) -> Result<Self, AnalyticalError> {
        let call = call.into();
        let put = put.into();

        expect_side("straddle", 0, &call, OptionType::Call)?;
        expect_side("straddle", 1, &put, OptionType::Put)?;
        same_market("straddle", &call, &put)?;
        if call.strike() != put.strike() {
            return Err(rejected(format!(
                "straddle legs have different strikes ({} and {})",
                call.strike(),
                put.strike()
            )));
        }

        Self::new(vec![Leg::new(call, position), Leg::new(put, position)])
    }

    /// Straddle from one set of Black-Scholes-Merton parameters.
    pub fn black_scholes_straddle(
        params: BlackScholesParams,
        position: Position,
    ) -> Result<Self, AnalyticalError> {
        Self::straddle(
            BlackScholes::new(params, OptionType::Call),
            BlackScholes::new(params, OptionType::Put),
            position,
        )
    }

    /// Straddle from one set of Black-76 parameters.
    pub fn black76_straddle(
        params: Black76Params,
        position: Position,
    ) -> Result<Self, AnalyticalError> {
        Self::straddle(
            Black76::new(params, OptionType::Call),
            Black76::new(params, OptionType::Put),
            position,
        )
    }

    /// Out-of-the-money put plus call with a higher strike.
    ///
    /// # Errors
    /// `AnalyticalError::Composition` unless the sides are right, the legs
    /// share family, underlying and expiry, and the put strike is strictly
    /// below the call strike.
    pub fn strangle(
        put: impl Into<AnalyticalOption>,
        call: impl Into<AnalyticalOption>,
        position: Position,
    ) -> Result<Self, AnalyticalError> {
        let put = put.into();
        let call = call.into();

        expect_side("strangle", 0, &put, OptionType::Put)?;
        expect_side("strangle", 1, &call, OptionType::Call)?;
        same_market("strangle", &put, &call)?;
        if put.strike() >= call.strike() {
            return Err(rejected(format!(
                "strangle put strike {} must be below call strike {}",
                put.strike(),
                call.strike()
            )));
        }

        Self::new(vec![Leg::new(put, position), Leg::new(call, position)])
    }

    /// Call butterfly: one `low`, two `mid` on the other side, one `high`.
    ///
    /// A long butterfly buys the wings and sells the body twice.
    ///
    /// # Errors
    /// `AnalyticalError::Composition` unless all three are calls on the same
    /// family, underlying and expiry with strictly increasing strikes.
    pub fn butterfly(
        low: impl Into<AnalyticalOption>,
        mid: impl Into<AnalyticalOption>,
        high: impl Into<AnalyticalOption>,
        position: Position,
    ) -> Result<Self, AnalyticalError> {
        let low = low.into();
        let mid = mid.into();
        let high = high.into();

        for (i, option) in [&low, &mid, &high].into_iter().enumerate() {
            expect_side("butterfly", i, option, OptionType::Call)?;
        }
        same_market("butterfly", &low, &mid)?;
        same_market("butterfly", &mid, &high)?;
        if !(low.strike() < mid.strike() && mid.strike() < high.strike()) {
            return Err(rejected(format!(
                "butterfly strikes {}, {}, {} are not strictly increasing",
                low.strike(),
                mid.strike(),
                high.strike()
            )));
        }

        let body = position.opposite();
        Self::new(vec![
            Leg::new(low, position),
            Leg::new(mid.clone(), body),
            Leg::new(mid, body),
            Leg::new(high, position),
        ])
    }

    /// Legs in order.
    #[inline]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Same legs with every position flipped.
    pub fn negate(&self) -> Self {
        Self {
            legs: self
                .legs
                .iter()
                .map(|leg| Leg::new(leg.option.clone(), leg.position.opposite()))
                .collect(),
            family: self.family,
            expiry: self.expiry,
        }
    }
}

fn rejected(reason: String) -> AnalyticalError {
    debug!(%reason, "rejected composite");
    AnalyticalError::Composition(reason)
}

fn expect_side(
    strategy: &str,
    index: usize,
    option: &AnalyticalOption,
    expected: OptionType,
) -> Result<(), AnalyticalError> {
    if option.option_type() == expected {
        Ok(())
    } else {
        Err(rejected(format!(
            "{} leg {} must be a {}, got a {}",
            strategy,
            index,
            expected,
            option.option_type()
        )))
    }
}

fn same_market(
    strategy: &str,
    a: &AnalyticalOption,
    b: &AnalyticalOption,
) -> Result<(), AnalyticalError> {
    if a.family() != b.family() {
        return Err(rejected(format!(
            "{} mixes the {} and {} models",
            strategy,
            a.family(),
            b.family()
        )));
    }
    if a.underlying() != b.underlying() {
        return Err(rejected(format!(
            "{} legs have different underlying prices ({} and {})",
            strategy,
            a.underlying(),
            b.underlying()
        )));
    }
    if a.expiry() != b.expiry() {
        return Err(rejected(format!(
            "{} legs have different expiries ({} and {})",
            strategy,
            a.expiry(),
            b.expiry()
        )));
    }
    Ok(())
}

impl Sensitivities for Composite {
    fn family(&self) -> ModelFamily {
        self.family
    }

    fn expiry(&self) -> f64 {
        self.expiry
    }

    fn measure(&self, measure: Measure) -> Result<f64, AnalyticalError> {
        if !self.family.supports(measure) {
            return Err(AnalyticalError::UnsupportedMeasure {
                family: self.family,
                measure,
            });
        }
        let (first, rest) = self
            .legs
            .split_first()
            .ok_or_else(|| AnalyticalError::Composition("composite has no legs".to_string()))?;

        rest.iter().try_fold(first.weighted(measure)?, |acc, leg| {
            Ok(acc + leg.weighted(measure)?)
        })
    }
}

impl Priceable for Composite {
    fn price(&self) -> Result<f64, PricingError> {
        self.measure(Measure::Price).map_err(PricingError::from)
    }
}

macro_rules! measure_accessors {
    ($($(#[$doc:meta])* $name:ident => $measure:ident;)*) => {
        impl Composite {
            $(
                $(#[$doc])*
                #[inline]
                pub fn $name(&self) -> Result<f64, AnalyticalError> {
                    self.measure(Measure::$measure)
                }
            )*
        }
    };
}

measure_accessors! {
    /// Net premium.
    price => Price;
    /// Signed sum of naive in-the-money probabilities.
    in_the_money => NaiveItm;
    /// Net delta.
    delta => Delta;
    /// Net dual delta.
    dual_delta => DualDelta;
    /// Net gamma.
    gamma => Gamma;
    /// Net dual gamma.
    dual_gamma => DualGamma;
    /// Net vega.
    vega => Vega;
    /// Net theta.
    theta => Theta;
    /// Net epsilon.
    epsilon => Epsilon;
    /// Net rho.
    rho => Rho;
    /// Signed sum of leg lambdas.
    lambda => Lambda;
    /// Net vanna.
    vanna => Vanna;
    /// Net charm.
    charm => Charm;
    /// Net vomma.
    vomma => Vomma;
    /// Net veta.
    veta => Veta;
    /// Net phi.
    phi => Phi;
    /// Net speed.
    speed => Speed;
    /// Net zomma.
    zomma => Zomma;
    /// Net color.
    color => Color;
    /// Net ultima.
    ultima => Ultima;
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn bs(option_type: OptionType, strike: f64) -> BlackScholes {
        let params = BlackScholesParams::new(55.0, strike, 1.0, 0.0025, 0.15, 0.0).unwrap();
        BlackScholes::new(params, option_type)
    }

    fn b76(option_type: OptionType, strike: f64) -> Black76 {
        let params = Black76Params::new(55.0, strike, 1.0, 0.0025, 0.15).unwrap();
        Black76::new(params, option_type)
    }

    // ==========================================================
    // Position Tests
    // ==========================================================

    #[test]
    fn test_position_sign() {
        assert_eq!(Position::Long.sign(), 1.0);
        assert_eq!(Position::Short.sign(), -1.0);
        assert_eq!(Position::Long.opposite(), Position::Short);
        assert_eq!(format!("{}", Position::Short), "Short");
    }

    // ==========================================================
    // Construction Tests
    // ==========================================================

    #[test]
    fn test_new_rejects_empty() {
        assert!(matches!(
            Composite::new(vec![]),
            Err(AnalyticalError::Composition(_))
        ));
    }

    #[test]
    fn test_new_rejects_mixed_families() {
        let legs = vec![
            Leg::long(bs(OptionType::Call, 50.0)),
            Leg::long(b76(OptionType::Put, 50.0)),
        ];
        match Composite::new(legs) {
            Err(AnalyticalError::Composition(msg)) => assert!(msg.contains("Black-76")),
            other => panic!("Expected Composition, got {:?}", other),
        }
    }

    #[test]
    fn test_new_rejects_mixed_expiries() {
        let short_dated = BlackScholes::put(55.0, 50.0, 0.5, 0.0025, 0.15, 0.0).unwrap();
        let legs = vec![Leg::long(bs(OptionType::Call, 50.0)), Leg::short(short_dated)];
        assert!(matches!(
            Composite::new(legs),
            Err(AnalyticalError::Composition(_))
        ));
    }

    #[test]
    fn test_single_leg_composite() {
        let call = bs(OptionType::Call, 50.0);
        let composite = Composite::new(vec![Leg::short(call.clone())]).unwrap();
        assert_eq!(composite.legs().len(), 1);
        assert_eq!(composite.price().unwrap(), -call.price().unwrap());
    }

    // ==========================================================
    // Straddle Tests
    // ==========================================================

    #[test]
    fn test_straddle_sums_legs() {
        let call = bs(OptionType::Call, 50.0);
        let put = bs(OptionType::Put, 50.0);
        let straddle = Composite::straddle(call.clone(), put.clone(), Position::Long).unwrap();

        assert_eq!(straddle.family(), ModelFamily::BlackScholes);
        assert_eq!(straddle.expiry(), 1.0);
        assert_eq!(
            straddle.price().unwrap(),
            call.price().unwrap() + put.price().unwrap()
        );
        assert_eq!(
            straddle.charm().unwrap(),
            call.charm().unwrap() + put.charm().unwrap()
        );
        assert_relative_eq!(
            straddle.gamma().unwrap(),
            2.0 * 0.03712496688031454,
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_short_straddle_is_negated_long() {
        let long =
            Composite::straddle(bs(OptionType::Call, 50.0), bs(OptionType::Put, 50.0), Position::Long)
                .unwrap();
        let short =
            Composite::straddle(bs(OptionType::Call, 50.0), bs(OptionType::Put, 50.0), Position::Short)
                .unwrap();
        assert_eq!(short, long.negate());
        for m in ModelFamily::BlackScholes.supported_measures() {
            assert_eq!(short.measure(*m).unwrap(), -long.measure(*m).unwrap());
        }
    }

    #[test]
    fn test_straddle_rejects_wrong_sides() {
        let call = bs(OptionType::Call, 50.0);
        let put = bs(OptionType::Put, 50.0);
        assert!(Composite::straddle(put.clone(), call.clone(), Position::Long).is_err());
        assert!(Composite::straddle(call.clone(), call, Position::Long).is_err());
        assert!(Composite::straddle(put.clone(), put, Position::Long).is_err());
    }

    #[test]
    fn test_straddle_rejects_mismatched_terms() {
        let call = bs(OptionType::Call, 50.0);
        assert!(Composite::straddle(call.clone(), bs(OptionType::Put, 55.0), Position::Long).is_err());
        assert!(Composite::straddle(call.clone(), b76(OptionType::Put, 50.0), Position::Long).is_err());

        let other_spot = BlackScholes::put(60.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
        assert!(Composite::straddle(call.clone(), other_spot, Position::Long).is_err());

        let other_expiry = BlackScholes::put(55.0, 50.0, 2.0, 0.0025, 0.15, 0.0).unwrap();
        assert!(Composite::straddle(call, other_expiry, Position::Long).is_err());
    }

    #[test]
    fn test_params_straddles() {
        let bs_params = BlackScholesParams::new(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
        let from_params = Composite::black_scholes_straddle(bs_params, Position::Long).unwrap();
        let from_legs =
            Composite::straddle(bs(OptionType::Call, 50.0), bs(OptionType::Put, 50.0), Position::Long)
                .unwrap();
        assert_eq!(from_params, from_legs);

        let b76_params = Black76Params::new(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
        let b76_straddle = Composite::black76_straddle(b76_params, Position::Short).unwrap();
        assert_eq!(b76_straddle.family(), ModelFamily::Black76);
        assert_relative_eq!(
            b76_straddle.price().unwrap(),
            -(6.234516612704482 + 1.247001000717183),
            max_relative = 1e-9
        );
    }

    #[test]
    fn test_black76_composite_rejects_unsupported_measures() {
        let b76_params = Black76Params::new(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
        let straddle = Composite::black76_straddle(b76_params, Position::Long).unwrap();
        assert!(matches!(
            straddle.epsilon(),
            Err(AnalyticalError::UnsupportedMeasure { .. })
        ));
        assert!(matches!(
            straddle.itm_proxies(),
            Err(AnalyticalError::UnsupportedView { .. })
        ));
        assert_eq!(straddle.all_greeks().unwrap().len(), 7);
    }

    #[test]
    fn test_degenerate_leg_fails_composite() {
        let call = BlackScholes::call(55.0, 50.0, 1.0, 0.0025, 0.0, 0.0).unwrap();
        let put = BlackScholes::put(55.0, 50.0, 1.0, 0.0025, 0.0, 0.0).unwrap();
        let straddle = Composite::straddle(call, put, Position::Long).unwrap();
        assert!(matches!(
            straddle.delta(),
            Err(AnalyticalError::DegenerateInput {
                measure: Measure::Delta,
                ..
            })
        ));
    }

    // ==========================================================
    // Strangle / Butterfly Tests
    // ==========================================================

    #[test]
    fn test_strangle() {
        let put = bs(OptionType::Put, 45.0);
        let call = bs(OptionType::Call, 60.0);
        let strangle = Composite::strangle(put.clone(), call.clone(), Position::Long).unwrap();
        assert_eq!(
            strangle.price().unwrap(),
            put.price().unwrap() + call.price().unwrap()
        );
        assert!(strangle.vega().unwrap() > 0.0);

        // Cheaper than the at-the-strike straddle
        let straddle = Composite::straddle(
            bs(OptionType::Call, 55.0),
            bs(OptionType::Put, 55.0),
            Position::Long,
        )
        .unwrap();
        assert!(strangle.price().unwrap() < straddle.price().unwrap());
    }

    #[test]
    fn test_strangle_rejects_inverted_strikes() {
        let put = bs(OptionType::Put, 60.0);
        let call = bs(OptionType::Call, 45.0);
        assert!(Composite::strangle(put, call, Position::Long).is_err());

        let put = bs(OptionType::Put, 50.0);
        let call = bs(OptionType::Call, 50.0);
        assert!(Composite::strangle(put, call, Position::Long).is_err());
    }

    #[test]
    fn test_butterfly() {
        let low = bs(OptionType::Call, 50.0);
        let mid = bs(OptionType::Call, 55.0);
        let high = bs(OptionType::Call, 60.0);
        let fly = Composite::butterfly(low.clone(), mid.clone(), high.clone(), Position::Long).unwrap();

        let positions: Vec<_> = fly.legs().iter().map(Leg::position).collect();
        assert_eq!(
            positions,
            vec![Position::Long, Position::Short, Position::Short, Position::Long]
        );

        let expected = low.price().unwrap() - mid.price().unwrap() - mid.price().unwrap()
            + high.price().unwrap();
        assert_eq!(fly.price().unwrap(), expected);
        // Long butterfly has positive value and bounded payoff
        assert!(fly.price().unwrap() > 0.0);
        assert!(fly.price().unwrap() < 5.0);
    }

    #[test]
    fn test_butterfly_rejects_bad_legs() {
        let low = bs(OptionType::Call, 50.0);
        let mid = bs(OptionType::Call, 55.0);
        let high = bs(OptionType::Call, 60.0);
        assert!(Composite::butterfly(mid.clone(), low.clone(), high.clone(), Position::Long).is_err());
        assert!(Composite::butterfly(low.clone(), mid.clone(), mid.clone(), Position::Long).is_err());
        assert!(
            Composite::butterfly(low, bs(OptionType::Put, 55.0), high, Position::Long).is_err()
        );
    }

    // ==========================================================
    // Misc
    // ==========================================================

    #[test]
    fn test_priceable() {
        let straddle =
            Composite::straddle(bs(OptionType::Call, 50.0), bs(OptionType::Put, 50.0), Position::Long)
                .unwrap();
        assert_eq!(
            Priceable::price(&straddle).unwrap(),
            straddle.price().unwrap()
        );
    }

    #[test]
    fn test_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Composite>();
        assert_send_sync::<Leg>();
        assert_send_sync::<AnalyticalOption>();
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_position_serde() {
        assert_eq!(serde_json::to_string(&Position::Long).unwrap(), "\"long\"");
    }
}
