//! Curve sensitivities against central finite differences.
//!
//! Every point sensitivity is projected onto curve parameters by the
//! provider and compared, parameter by parameter, with a central
//! difference of the value under a 1e-4 bump of that parameter.
//!
//! Rounding in the bumped values grows with their size, so the absolute
//! tolerance carries a term proportional to the unbumped value.

use pricer_core::market_data::curves::{CurveId, CurveInterpolation, InterpolatedCurve};
use pricer_core::market_data::{ImmutableRatesProvider, RatesProvider};
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{Currency, CurrencyPair, Date, DayCountConvention, IborIndex, OvernightIndex};
use pricer_models::instruments::rates::{
    FixedRateCalculation, IborRateCalculation, OvernightRateCalculation, PayReceive, RateCalculation,
    RateCalculationSwapLeg, ResolvedSwap, ResolvedSwapLeg, ValueSchedule,
};
use pricer_models::schedules::{Frequency, Schedule, ScheduleBuilder};
use pricer_pricing::rates::DiscountingSwapProductPricer;

const BUMP: f64 = 1e-4;
const TOLERANCE: f64 = 1e-4;
const VALUE_SCALE: f64 = 1e-6;

// =============================================================================
// Fixtures
// =============================================================================

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn curve(rates: &[f64]) -> InterpolatedCurve<f64> {
    InterpolatedCurve::new(&[0.5, 1.0, 2.0, 3.0, 5.0], rates, CurveInterpolation::Linear, true).unwrap()
}

fn provider() -> ImmutableRatesProvider {
    ImmutableRatesProvider::builder(date(2024, 1, 15))
        .discount_curve(Currency::EUR, curve(&[0.030, 0.029, 0.027, 0.026, 0.026]))
        .ibor_curve(IborIndex::Euribor6M, curve(&[0.036, 0.034, 0.031, 0.030, 0.030]))
        .discount_curve(Currency::USD, curve(&[0.050, 0.048, 0.044, 0.041, 0.039]))
        .overnight_curve(OvernightIndex::Sofr, curve(&[0.052, 0.049, 0.045, 0.042, 0.040]))
        .fx_rate(CurrencyPair::new(Currency::EUR, Currency::USD, 1.10).unwrap())
        .build()
}

fn schedule(frequency: Frequency) -> Schedule {
    ScheduleBuilder::new()
        .start(date(2024, 1, 15))
        .end(date(2027, 1, 15))
        .frequency(frequency)
        .build()
        .unwrap()
}

fn fixed_leg(pay_receive: PayReceive, currency: Currency, rate: f64) -> ResolvedSwapLeg {
    RateCalculationSwapLeg::new(
        pay_receive,
        schedule(Frequency::Annual),
        currency,
        5_000_000.0,
        RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, rate)),
    )
    .resolve()
    .unwrap()
}

fn euribor_leg(spread: f64) -> ResolvedSwapLeg {
    let mut calc = IborRateCalculation::new(IborIndex::Euribor6M);
    calc.spread = Some(ValueSchedule::of(spread));
    RateCalculationSwapLeg::new(
        PayReceive::Receive,
        schedule(Frequency::SemiAnnual),
        Currency::EUR,
        5_000_000.0,
        RateCalculation::Ibor(calc),
    )
    .resolve()
    .unwrap()
}

fn sofr_leg() -> ResolvedSwapLeg {
    RateCalculationSwapLeg::new(
        PayReceive::Pay,
        schedule(Frequency::Annual),
        Currency::USD,
        5_500_000.0,
        RateCalculation::Overnight(OvernightRateCalculation::new(
            OvernightIndex::Sofr,
            DayCountConvention::Act360,
        )),
    )
    .resolve()
    .unwrap()
}

fn eur_swap() -> ResolvedSwap {
    ResolvedSwap::new(vec![fixed_leg(PayReceive::Pay, Currency::EUR, 0.03), euribor_leg(0.001)]).unwrap()
}

fn cross_currency_swap() -> ResolvedSwap {
    ResolvedSwap::new(vec![fixed_leg(PayReceive::Receive, Currency::EUR, 0.028), sofr_leg()]).unwrap()
}

/// Compares the parameter projection of `points` with central differences
/// of `value`, for every parameter of every curve.
fn assert_matches_finite_difference<F>(prov: &ImmutableRatesProvider, points: &PointSensitivities, value: F)
where
    F: Fn(&ImmutableRatesProvider) -> f64,
{
    let analytic = prov.parameter_sensitivity(points).unwrap();
    let scale = VALUE_SCALE * value(prov).abs();
    for id in prov.curve_ids() {
        for k in 0..prov.parameter_count(&id).unwrap() {
            let base = prov.parameter(&id, k).unwrap();
            let up = prov.with_parameter(&id, k, base + BUMP).unwrap();
            let dn = prov.with_parameter(&id, k, base - BUMP).unwrap();
            let fd = (value(&up) - value(&dn)) / (2.0 * BUMP);
            let an: f64 = analytic
                .iter()
                .filter(|s| s.curve == id)
                .map(|s| s.values[k])
                .sum();
            assert!(
                (fd - an).abs() <= TOLERANCE * (1.0 + an.abs() + scale),
                "{id} parameter {k}: analytic {an}, finite difference {fd}"
            );
        }
    }
}

// =============================================================================
// Present and forecast value
// =============================================================================

#[test]
fn test_present_value_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = eur_swap();

    let points = pricer.present_value_sensitivity(&swap, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| {
        pricer.present_value(&swap, p).unwrap().amount_or_zero(Currency::EUR)
    });
}

#[test]
fn test_forecast_value_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = eur_swap();

    let points = pricer.forecast_value_sensitivity(&swap, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| {
        pricer.forecast_value(&swap, p).unwrap().amount_or_zero(Currency::EUR)
    });
}

#[test]
fn test_fixed_leg_depends_on_discount_curve_only() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let leg = fixed_leg(PayReceive::Pay, Currency::EUR, 0.03);

    let points = pricer.leg_pricer().present_value_sensitivity(&leg, &prov).unwrap();
    let sens = prov.parameter_sensitivity(&points).unwrap();
    assert_eq!(sens.len(), 1);
    assert!(sens.iter().all(|s| s.curve == CurveId::Discount(Currency::EUR)));
}

#[test]
fn test_cross_currency_sensitivity_in_single_currency() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = cross_currency_swap();

    let points = pricer
        .present_value_sensitivity_in(&swap, Currency::USD, &prov)
        .unwrap();
    assert!(points.iter().all(|p| p.currency == Currency::USD));
    assert_matches_finite_difference(&prov, &points, |p| {
        pricer.present_value_in(&swap, Currency::USD, p).unwrap().amount()
    });
}

// =============================================================================
// Par rate, par spread and PVBP
// =============================================================================

#[test]
fn test_par_rate_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = eur_swap();

    let points = pricer.par_rate_sensitivity(&swap, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| pricer.par_rate(&swap, p).unwrap());
}

#[test]
fn test_cross_currency_par_rate_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = cross_currency_swap();

    let points = pricer.par_rate_sensitivity(&swap, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| pricer.par_rate(&swap, p).unwrap());
}

#[test]
fn test_par_spread_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let swap = eur_swap();

    let points = pricer.par_spread_sensitivity(&swap, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| pricer.par_spread(&swap, p).unwrap());
}

#[test]
fn test_pvbp_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();

    for leg in [fixed_leg(PayReceive::Pay, Currency::EUR, 0.03), euribor_leg(0.0)] {
        let points = pricer.leg_pricer().pvbp_sensitivity(&leg, &prov).unwrap();
        assert_matches_finite_difference(&prov, &points, |p| pricer.leg_pricer().pvbp(&leg, p).unwrap());
    }
}

#[test]
fn test_overnight_leg_insensitive_to_first_forward_node() {
    // daily forwards telescope to DF(start)/DF(end); periods end on whole years
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let points = pricer.leg_pricer().present_value_sensitivity(&sofr_leg(), &prov).unwrap();
    let sens = prov.parameter_sensitivity(&points).unwrap();
    let sofr = sens
        .get(CurveId::Overnight(OvernightIndex::Sofr), Currency::USD)
        .unwrap();
    assert!(sofr.values[0].abs() < 1e-3, "node 0: {}", sofr.values[0]);
}

#[test]
fn test_overnight_leg_sensitivity() {
    let prov = provider();
    let pricer = DiscountingSwapProductPricer::default();
    let leg = sofr_leg();

    let points = pricer.leg_pricer().present_value_sensitivity(&leg, &prov).unwrap();
    assert_matches_finite_difference(&prov, &points, |p| {
        pricer.leg_pricer().present_value(&leg, p).unwrap().amount()
    });
}
