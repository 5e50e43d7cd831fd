//! Straddle Linearity Integration Tests
//!
//! A straddle must report, for every measure its family supports, exactly
//! the signed sum of its two legs. Equality is checked bit for bit.

use bsm_models::analytical::{Black76, Black76Params, BlackScholes, BlackScholesParams};
use bsm_models::greeks::{GreekView, Measure, ModelFamily, Sensitivities};
use bsm_models::instruments::{AnalyticalOption, Composite, OptionType, Position};

fn assert_linear(call: AnalyticalOption, put: AnalyticalOption) {
    let family = call.family();
    let long = Composite::straddle(call.clone(), put.clone(), Position::Long).unwrap();
    let short = Composite::straddle(call.clone(), put.clone(), Position::Short).unwrap();

    for &m in family.supported_measures() {
        let c = call.measure(m).unwrap();
        let p = put.measure(m).unwrap();
        assert_eq!(long.measure(m).unwrap(), c + p, "long {} under {}", m, family);
        assert_eq!(short.measure(m).unwrap(), -(c + p), "short {} under {}", m, family);
    }
}

// =============================================================================
// Black-Scholes-Merton
// =============================================================================

#[test]
fn test_black_scholes_straddle_every_measure() {
    for (s, k, t, r, v, q) in [
        (55.0, 50.0, 1.0, 0.0025, 0.15, 0.0),
        (100.0, 95.0, 0.5, 0.03, 0.25, 0.02),
        (100.0, 120.0, 2.0, -0.005, 0.4, 0.01),
    ] {
        let call = BlackScholes::call(s, k, t, r, v, q).unwrap();
        let put = BlackScholes::put(s, k, t, r, v, q).unwrap();
        assert_linear(call.into(), put.into());
    }
}

#[test]
fn test_black_scholes_straddle_includes_price_and_naive_itm() {
    let params = BlackScholesParams::new(55.0, 50.0, 1.0, 0.0025, 0.15, 0.0).unwrap();
    let call = BlackScholes::new(params, OptionType::Call);
    let put = BlackScholes::new(params, OptionType::Put);
    let straddle = Composite::black_scholes_straddle(params, Position::Long).unwrap();

    assert_eq!(
        straddle.price().unwrap(),
        call.price().unwrap() + put.price().unwrap()
    );
    // N(d2) + N(-d2)
    assert_eq!(
        straddle.in_the_money().unwrap(),
        call.in_the_money().unwrap() + put.in_the_money().unwrap()
    );
    assert!((straddle.in_the_money().unwrap() - 1.0).abs() < 1e-15);
}

#[test]
fn test_black_scholes_straddle_views() {
    let params = BlackScholesParams::new(100.0, 95.0, 0.5, 0.03, 0.25, 0.02).unwrap();
    let call = BlackScholes::new(params, OptionType::Call);
    let put = BlackScholes::new(params, OptionType::Put);
    let straddle = Composite::black_scholes_straddle(params, Position::Short).unwrap();

    for view in [GreekView::Core, GreekView::ItmProxies, GreekView::All] {
        let combined = straddle.view(view).unwrap();
        let c = call.view(view).unwrap();
        let p = put.view(view).unwrap();

        assert_eq!(combined.keys().collect::<Vec<_>>(), c.keys().collect::<Vec<_>>());
        for (m, value) in combined.iter() {
            let expected = -(c.get(m).unwrap() + p.get(m).unwrap());
            assert_eq!(value, expected, "{} in {} view", m, view);
        }
    }
}

// =============================================================================
// Black-76
// =============================================================================

#[test]
fn test_black76_straddle_every_measure() {
    for (f, k, t, r, v) in [
        (55.0, 50.0, 1.0, 0.0025, 0.15),
        (80.0, 90.0, 0.25, 0.05, 0.35),
    ] {
        let call = Black76::call(f, k, t, r, v).unwrap();
        let put = Black76::put(f, k, t, r, v).unwrap();
        assert_linear(call.into(), put.into());
    }
}

#[test]
fn test_black76_straddle_rejects_unsupported() {
    let params = Black76Params::new(55.0, 50.0, 1.0, 0.0025, 0.15).unwrap();
    let straddle = Composite::black76_straddle(params, Position::Long).unwrap();

    for m in Measure::ALL {
        if !ModelFamily::Black76.supports(m) {
            assert!(straddle.measure(m).is_err(), "{} should be unsupported", m);
        }
    }
    assert!(straddle.view(GreekView::ItmProxies).is_err());
}
