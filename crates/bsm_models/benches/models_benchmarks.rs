//! Criterion benchmarks for closed-form measures, views and composites.

use bsm_models::analytical::{Black76, BlackScholes};
use bsm_models::greeks::{Measure, Sensitivities};
use bsm_models::instruments::{Composite, Position};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_construction(c: &mut Criterion) {
    c.bench_function("black_scholes_new", |b| {
        b.iter(|| {
            BlackScholes::call(
                black_box(100.0),
                black_box(95.0),
                black_box(0.5),
                black_box(0.03),
                black_box(0.25),
                black_box(0.02),
            )
        });
    });
}

/// Single measures, cheapest to most expensive.
fn bench_measures(c: &mut Criterion) {
    let call = BlackScholes::call(100.0, 95.0, 0.5, 0.03, 0.25, 0.02).unwrap();
    let mut group = c.benchmark_group("black_scholes_measure");

    for m in [
        Measure::Price,
        Measure::Delta,
        Measure::Gamma,
        Measure::Theta,
        Measure::Phi,
        Measure::Ultima,
    ] {
        group.bench_with_input(BenchmarkId::from_parameter(m), &m, |b, &m| {
            b.iter(|| black_box(&call).measure(m));
        });
    }

    group.finish();
}

fn bench_views(c: &mut Criterion) {
    let call = BlackScholes::call(100.0, 95.0, 0.5, 0.03, 0.25, 0.02).unwrap();
    let forward = Black76::call(100.0, 95.0, 0.5, 0.03, 0.25).unwrap();

    c.bench_function("black_scholes_all_greeks", |b| {
        b.iter(|| black_box(&call).all_greeks());
    });
    c.bench_function("black76_all_greeks", |b| {
        b.iter(|| black_box(&forward).all_greeks());
    });
}

/// A 100-strike ladder of straddles, the shape of a typical vol-surface sweep.
fn bench_straddle_ladder(c: &mut Criterion) {
    let straddles: Vec<Composite> = (0..100)
        .filter_map(|i| {
            let strike = 50.0 + i as f64;
            let call = BlackScholes::call(100.0, strike, 0.5, 0.03, 0.25, 0.02).ok()?;
            let put = BlackScholes::put(100.0, strike, 0.5, 0.03, 0.25, 0.02).ok()?;
            Composite::straddle(call, put, Position::Long).ok()
        })
        .collect();

    c.bench_function("straddle_ladder_core_greeks_100", |b| {
        b.iter(|| {
            straddles
                .iter()
                .filter_map(|s| s.core_greeks().ok())
                .count()
        });
    });
}

criterion_group!(
    benches,
    bench_construction,
    bench_measures,
    bench_views,
    bench_straddle_ladder
);
criterion_main!(benches);
