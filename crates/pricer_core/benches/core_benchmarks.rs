//! Criterion benchmarks for pricer_core market data lookups.
//!
//! Measures discount factor and forward rate lookups on interpolated
//! curves, and the conversion of point sensitivities into curve
//! parameter sensitivities.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::curves::{CurveInterpolation, InterpolatedCurve};
use pricer_core::market_data::{ImmutableRatesProvider, OvernightIndexObservation, RatesProvider};
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{Currency, Date, OvernightIndex};

/// Curve with `n` pillars between 3M and 30Y.
fn curve(n: usize, method: CurveInterpolation) -> InterpolatedCurve<f64> {
    let tenors: Vec<f64> = (0..n)
        .map(|i| 0.25 + 29.75 * i as f64 / (n - 1) as f64)
        .collect();
    let rates: Vec<f64> = tenors.iter().map(|t| 0.02 + 0.01 * (1.0 - (-t / 5.0).exp())).collect();
    InterpolatedCurve::new(&tenors, &rates, method, true).unwrap()
}

fn provider(n: usize) -> ImmutableRatesProvider {
    ImmutableRatesProvider::builder(Date::from_ymd(2024, 1, 2).unwrap())
        .discount_curve(Currency::USD, curve(n, CurveInterpolation::Linear))
        .overnight_curve(OvernightIndex::Sofr, curve(n, CurveInterpolation::LogLinear))
        .build()
}

/// Benchmark discount factor lookups by curve size.
fn bench_discount_factor(c: &mut Criterion) {
    let mut group = c.benchmark_group("discount_factor");
    let pay = Date::from_ymd(2031, 6, 17).unwrap();

    for size in [4, 16, 64] {
        let p = provider(size);
        group.bench_with_input(BenchmarkId::new("lookup", size), &p, |b, p| {
            b.iter(|| p.discount_factor(black_box(Currency::USD), black_box(pay)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark a year of daily overnight forwards.
fn bench_overnight_forwards(c: &mut Criterion) {
    let p = provider(16);
    let start = Date::from_ymd(2024, 1, 3).unwrap();

    c.bench_function("overnight_forwards_1y", |b| {
        b.iter(|| {
            let mut date = start;
            let mut sum = 0.0;
            for _ in 0..252 {
                let obs = OvernightIndexObservation::new(OvernightIndex::Sofr, date).unwrap();
                sum += p.overnight_index_rate(&obs).unwrap();
                date = obs.maturity_date();
            }
            black_box(sum)
        });
    });
}

/// Benchmark point to parameter sensitivity conversion.
fn bench_parameter_sensitivity(c: &mut Criterion) {
    let p = provider(16);
    let mut points = PointSensitivities::empty();
    let mut date = Date::from_ymd(2024, 7, 2).unwrap();
    for _ in 0..40 {
        points = points.combined_with(p.discount_factor_sensitivity(Currency::USD, date).unwrap());
        date = date.plus_months(6).unwrap();
    }

    c.bench_function("parameter_sensitivity_40_points", |b| {
        b.iter(|| p.parameter_sensitivity(black_box(&points)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_discount_factor,
    bench_overnight_forwards,
    bench_parameter_sensitivity
);
criterion_main!(benches);
