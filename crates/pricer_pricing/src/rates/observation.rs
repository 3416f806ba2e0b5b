//! Rate observation engine: the rate of one accrual period and its
//! sensitivity to the market.

use pricer_core::market_data::{MarketDataError, OvernightIndexObservation, RatesProvider};
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{Date, PriceIndex, YearMonth};
use pricer_models::instruments::rates::{
    InflationInterpolatedObservation, InflationMonthlyObservation, OvernightRateObservation,
    RateObservation,
};
use tracing::warn;

use super::config::RateCutOffPolicy;
use super::error::SwapPricingError;
use super::explain::{ExplainKey, ExplainMap};

/// Computes observed rates and their point sensitivities.
///
/// Dispatches on the [`RateObservation`] variant. The accrual dates are
/// accepted for every variant; the built-in observations carry their own
/// dates and do not use them.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::ImmutableRatesProvider;
/// use pricer_core::types::{Date, OvernightIndex};
/// use pricer_models::instruments::rates::{OvernightRateObservation, RateObservation};
/// use pricer_pricing::rates::{RateCutOffPolicy, RateObservationFn};
///
/// let valuation = Date::from_ymd(2024, 1, 2).unwrap();
/// let provider = ImmutableRatesProvider::builder(valuation)
///     .overnight_curve(OvernightIndex::Sofr, CurveEnum::flat(0.05))
///     .build();
///
/// let start = Date::from_ymd(2024, 2, 1).unwrap();
/// let end = Date::from_ymd(2024, 3, 1).unwrap();
/// let obs = RateObservation::OvernightCompounded(
///     OvernightRateObservation::new(OvernightIndex::Sofr, start, end, 0).unwrap(),
/// );
///
/// let rate = RateObservationFn::new(RateCutOffPolicy::Reject)
///     .rate(&obs, start, end, &provider)
///     .unwrap();
/// assert!((rate - 0.05).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateObservationFn {
    cut_off_policy: RateCutOffPolicy,
}

/// Daily fixings of an overnight period with the cut-off resolved.
struct DailyFixings {
    observations: Vec<OvernightIndexObservation>,
    /// Accrual of each day within the period.
    accruals: Vec<f64>,
    /// Days after this position reuse its rate.
    cut_off_source: usize,
}

impl DailyFixings {
    fn total_accrual(&self) -> f64 {
        self.accruals.iter().sum()
    }

    /// Position of the fixing whose rate applies to day `i`.
    #[inline]
    fn source(&self, i: usize) -> usize {
        i.min(self.cut_off_source)
    }
}

impl RateObservationFn {
    /// Engine applying `cut_off_policy` to cut-offs longer than the period.
    pub fn new(cut_off_policy: RateCutOffPolicy) -> Self {
        Self { cut_off_policy }
    }

    /// Policy for cut-offs longer than the period.
    pub fn cut_off_policy(&self) -> RateCutOffPolicy {
        self.cut_off_policy
    }

    /// Observed rate.
    ///
    /// # Errors
    ///
    /// - `SwapPricingError::MarketData` for missing fixings, curves or
    ///   price index values
    /// - `SwapPricingError::Precondition` for a rejected rate cut-off
    pub fn rate(
        &self,
        observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
        provider: &dyn RatesProvider,
    ) -> Result<f64, SwapPricingError> {
        match observation {
            RateObservation::Fixed { rate } => Ok(*rate),
            RateObservation::Ibor(obs) => Ok(provider.ibor_index_rate(obs)?),
            RateObservation::OvernightCompounded(obs) => {
                let daily = self.daily_fixings(obs)?;
                let rates = Self::daily_rates(&daily, provider)?;
                let product: f64 = daily
                    .accruals
                    .iter()
                    .zip(rates.iter())
                    .map(|(tau, r)| 1.0 + r * tau)
                    .product();
                Ok((product - 1.0) / daily.total_accrual())
            }
            RateObservation::OvernightAveraged(obs) => {
                let daily = self.daily_fixings(obs)?;
                let rates = Self::daily_rates(&daily, provider)?;
                let weighted: f64 = daily
                    .accruals
                    .iter()
                    .zip(rates.iter())
                    .map(|(tau, r)| r * tau)
                    .sum();
                Ok(weighted / daily.total_accrual())
            }
            RateObservation::InflationMonthly(obs) => {
                let (start, end) = Self::monthly_levels(obs, provider)?;
                Ok(end / start - 1.0)
            }
            RateObservation::InflationInterpolated(obs) => {
                let levels = InterpolatedLevels::observe(obs, provider)?;
                Ok(levels.end() / levels.start() - 1.0)
            }
        }
    }

    /// Sensitivity of [`rate`](RateObservationFn::rate) to the market.
    ///
    /// Points are tagged with the currency of the observed index; the
    /// period pricer retags them to the payment currency.
    ///
    /// # Errors
    ///
    /// Same as [`rate`](RateObservationFn::rate).
    pub fn rate_sensitivity(
        &self,
        observation: &RateObservation,
        _start_date: Date,
        _end_date: Date,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        match observation {
            RateObservation::Fixed { .. } => Ok(PointSensitivities::empty()),
            RateObservation::Ibor(obs) => Ok(provider.ibor_index_rate_sensitivity(obs)?),
            RateObservation::OvernightCompounded(obs) => {
                let daily = self.daily_fixings(obs)?;
                let rates = Self::daily_rates(&daily, provider)?;
                let total = daily.total_accrual();
                let growth: Vec<f64> = daily
                    .accruals
                    .iter()
                    .zip(rates.iter())
                    .map(|(tau, r)| 1.0 + r * tau)
                    .collect();
                let product: f64 = growth.iter().product();
                let derivatives: Vec<f64> = (0..rates.len())
                    .map(|i| product / growth[i] * daily.accruals[i] / total)
                    .collect();
                Self::daily_sensitivity(&daily, &derivatives, provider)
            }
            RateObservation::OvernightAveraged(obs) => {
                let daily = self.daily_fixings(obs)?;
                let total = daily.total_accrual();
                let derivatives: Vec<f64> = daily.accruals.iter().map(|tau| tau / total).collect();
                Self::daily_sensitivity(&daily, &derivatives, provider)
            }
            RateObservation::InflationMonthly(obs) => {
                let (start, end) = Self::monthly_levels(obs, provider)?;
                let start_sens = provider
                    .inflation_index_rate_sensitivity(obs.index(), obs.start_month())?
                    .multiplied_by(-end / (start * start));
                let end_sens = provider
                    .inflation_index_rate_sensitivity(obs.index(), obs.end_month())?
                    .multiplied_by(1.0 / start);
                Ok(start_sens.combined_with(end_sens))
            }
            RateObservation::InflationInterpolated(obs) => {
                let levels = InterpolatedLevels::observe(obs, provider)?;
                let w = obs.weight();
                let den = levels.start();
                let num = levels.end();
                let bar_start = -num / (den * den);
                let bar_end = 1.0 / den;
                let index = obs.index();
                let parts = [
                    (obs.start_month(), bar_start * w),
                    (obs.start_second_month(), bar_start * (1.0 - w)),
                    (obs.end_month(), bar_end * w),
                    (obs.end_second_month(), bar_end * (1.0 - w)),
                ];
                let mut result = PointSensitivities::empty();
                for (month, factor) in parts {
                    result = result.combined_with(
                        provider
                            .inflation_index_rate_sensitivity(index, month)?
                            .multiplied_by(factor),
                    );
                }
                Ok(result)
            }
        }
    }

    /// Observed rate, recording the observation in `explain`.
    ///
    /// # Errors
    ///
    /// Same as [`rate`](RateObservationFn::rate).
    pub fn explain_rate(
        &self,
        observation: &RateObservation,
        start_date: Date,
        end_date: Date,
        provider: &dyn RatesProvider,
        explain: &mut ExplainMap,
    ) -> Result<f64, SwapPricingError> {
        let rate = self.rate(observation, start_date, end_date, provider)?;
        match observation {
            RateObservation::Fixed { rate } => {
                explain.put(ExplainKey::FixedRate, *rate);
            }
            RateObservation::Ibor(obs) => {
                let mut child = ExplainMap::new();
                child
                    .put(ExplainKey::EntryType, "IborIndexObservation")
                    .put(ExplainKey::Index, obs.index().name())
                    .put(ExplainKey::FixingDate, obs.fixing_date())
                    .put(ExplainKey::IndexValue, rate);
                explain.add_list_entry(ExplainKey::Observations, child);
            }
            RateObservation::OvernightCompounded(obs) | RateObservation::OvernightAveraged(obs) => {
                let daily = self.daily_fixings(obs)?;
                let mut child = ExplainMap::new();
                child
                    .put(ExplainKey::EntryType, observation.kind())
                    .put(ExplainKey::Index, obs.index().name())
                    .put(ExplainKey::StartDate, obs.start_date())
                    .put(ExplainKey::EndDate, obs.end_date())
                    .put(ExplainKey::FixingCount, daily.observations.len());
                explain.add_list_entry(ExplainKey::Observations, child);
            }
            RateObservation::InflationMonthly(obs) => {
                for month in [obs.start_month(), obs.end_month()] {
                    explain.add_list_entry(
                        ExplainKey::Observations,
                        price_index_entry(obs.index(), month, provider)?,
                    );
                }
            }
            RateObservation::InflationInterpolated(obs) => {
                for month in [
                    obs.start_month(),
                    obs.start_second_month(),
                    obs.end_month(),
                    obs.end_second_month(),
                ] {
                    explain.add_list_entry(
                        ExplainKey::Observations,
                        price_index_entry(obs.index(), month, provider)?,
                    );
                }
            }
        }
        explain.put(ExplainKey::ObservedRate, rate);
        Ok(rate)
    }

    /// Business days in `[start, end)`, their accruals and the cut-off.
    fn daily_fixings(&self, obs: &OvernightRateObservation) -> Result<DailyFixings, SwapPricingError> {
        let index = obs.index();
        let dates = business_days(obs.start_date(), obs.end_date())?;
        let mut observations = Vec::with_capacity(dates.len());
        let mut accruals = Vec::with_capacity(dates.len());
        for (i, &fixing) in dates.iter().enumerate() {
            let next = dates.get(i + 1).copied().unwrap_or(obs.end_date());
            let daily = OvernightIndexObservation::with_maturity(index, fixing, next);
            accruals.push(daily.year_fraction());
            observations.push(daily);
        }
        let count = observations.len();
        if count == 0 {
            return Err(SwapPricingError::precondition(format!(
                "no business day between {} and {}",
                obs.start_date(),
                obs.end_date()
            )));
        }
        let mut cut_off = obs.rate_cut_off_days() as usize;
        if cut_off > count {
            match self.cut_off_policy {
                RateCutOffPolicy::Reject => {
                    return Err(SwapPricingError::precondition(format!(
                        "rate cut-off of {} days exceeds the {} fixings from {} to {}",
                        cut_off,
                        count,
                        obs.start_date(),
                        obs.end_date()
                    )));
                }
                RateCutOffPolicy::Clamp => {
                    warn!(
                        index = index.name(),
                        cut_off,
                        fixings = count,
                        "rate cut-off clamped to the number of fixings"
                    );
                    cut_off = count;
                }
            }
        }
        let cut_off_source = if cut_off > 1 { count - cut_off } else { count - 1 };
        Ok(DailyFixings {
            observations,
            accruals,
            cut_off_source,
        })
    }

    /// Rate applying to each day, cut-off days reusing the source fixing.
    fn daily_rates(daily: &DailyFixings, provider: &dyn RatesProvider) -> Result<Vec<f64>, SwapPricingError> {
        let observed = daily.observations[..=daily.cut_off_source]
            .iter()
            .map(|obs| provider.overnight_index_rate(obs))
            .collect::<Result<Vec<f64>, MarketDataError>>()?;
        Ok((0..daily.observations.len())
            .map(|i| observed[daily.source(i)])
            .collect())
    }

    /// Chains per-day derivatives through the provider's overnight
    /// sensitivities; cut-off days credit their source fixing.
    fn daily_sensitivity(
        daily: &DailyFixings,
        derivatives: &[f64],
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut credited = vec![0.0; daily.cut_off_source + 1];
        for (i, derivative) in derivatives.iter().enumerate() {
            credited[daily.source(i)] += derivative;
        }
        let mut result = PointSensitivities::empty();
        for (obs, factor) in daily.observations.iter().zip(credited) {
            result = result.combined_with(provider.overnight_index_rate_sensitivity(obs)?.multiplied_by(factor));
        }
        Ok(result)
    }

    fn monthly_levels(
        obs: &InflationMonthlyObservation,
        provider: &dyn RatesProvider,
    ) -> Result<(f64, f64), SwapPricingError> {
        Ok((
            provider.inflation_index_rate(obs.index(), obs.start_month())?,
            provider.inflation_index_rate(obs.index(), obs.end_month())?,
        ))
    }
}

/// The four index levels of an interpolated observation.
struct InterpolatedLevels {
    weight: f64,
    start: f64,
    start_second: f64,
    end: f64,
    end_second: f64,
}

impl InterpolatedLevels {
    fn observe(obs: &InflationInterpolatedObservation, provider: &dyn RatesProvider) -> Result<Self, SwapPricingError> {
        let index = obs.index();
        Ok(Self {
            weight: obs.weight(),
            start: provider.inflation_index_rate(index, obs.start_month())?,
            start_second: provider.inflation_index_rate(index, obs.start_second_month())?,
            end: provider.inflation_index_rate(index, obs.end_month())?,
            end_second: provider.inflation_index_rate(index, obs.end_second_month())?,
        })
    }

    /// Interpolated start reference level.
    fn start(&self) -> f64 {
        self.weight * self.start + (1.0 - self.weight) * self.start_second
    }

    /// Interpolated end reference level.
    fn end(&self) -> f64 {
        self.weight * self.end + (1.0 - self.weight) * self.end_second
    }
}

fn price_index_entry(
    index: PriceIndex,
    month: YearMonth,
    provider: &dyn RatesProvider,
) -> Result<ExplainMap, SwapPricingError> {
    let mut entry = ExplainMap::new();
    entry
        .put(ExplainKey::EntryType, "PriceIndexObservation")
        .put(ExplainKey::Index, index.name())
        .put(ExplainKey::ReferenceMonth, month)
        .put(ExplainKey::IndexValue, provider.inflation_index_rate(index, month)?);
    Ok(entry)
}

/// Business days of the weekend-only calendar in `[start, end)`.
fn business_days(start: Date, end: Date) -> Result<Vec<Date>, MarketDataError> {
    let mut days = Vec::new();
    let mut day = start.next_or_same_business_day()?;
    while day < end {
        days.push(day);
        day = day.next_business_day()?;
    }
    Ok(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rates::explain::ExplainValue;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::{CurveEnum, CurveId};
    use pricer_core::market_data::{DateSeries, ImmutableRatesProvider};
    use pricer_core::sensitivity::SensitivityKey;
    use pricer_core::types::OvernightIndex;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn sonia(start: Date, end: Date, cut_off: u32) -> OvernightRateObservation {
        OvernightRateObservation::new(OvernightIndex::Sonia, start, end, cut_off).unwrap()
    }

    /// SONIA fixed at 1% + 0.1% per business day from 2024-01-02 up to the valuation date.
    fn provider(valuation: Date) -> ImmutableRatesProvider {
        let mut fixings = DateSeries::new();
        let mut day = date(2024, 1, 2);
        let mut k = 0.0;
        while day < valuation {
            fixings.insert(day, 0.01 + 0.001 * k);
            k += 1.0;
            day = day.next_business_day().unwrap();
        }
        ImmutableRatesProvider::builder(valuation)
            .overnight_curve(OvernightIndex::Sonia, CurveEnum::flat(0.02))
            .overnight_fixings(OvernightIndex::Sonia, fixings)
            .build()
    }

    #[test]
    fn test_business_days() {
        // Friday to the following Wednesday
        let days = business_days(date(2024, 1, 5), date(2024, 1, 10)).unwrap();
        assert_eq!(days, vec![date(2024, 1, 5), date(2024, 1, 8), date(2024, 1, 9)]);
    }

    #[test]
    fn test_compounded_past_fixings() {
        let prov = provider(date(2024, 2, 1));
        // Tue 2 Jan to Fri 5 Jan: fixings 1.0%, 1.1%, 1.2%, one day each
        let obs = RateObservation::OvernightCompounded(sonia(date(2024, 1, 2), date(2024, 1, 5), 0));
        let fn_ = RateObservationFn::default();
        let rate = fn_.rate(&obs, date(2024, 1, 2), date(2024, 1, 5), &prov).unwrap();
        let tau = 1.0 / 365.0;
        let expected = ((1.0 + 0.010 * tau) * (1.0 + 0.011 * tau) * (1.0 + 0.012 * tau) - 1.0) / (3.0 * tau);
        assert_relative_eq!(rate, expected, epsilon = 1e-14);
        let sens = fn_.rate_sensitivity(&obs, date(2024, 1, 2), date(2024, 1, 5), &prov).unwrap();
        assert!(sens.normalized().iter().all(|p| p.sensitivity == 0.0));
    }

    #[test]
    fn test_cut_off_zero_and_one_agree() {
        let prov = provider(date(2024, 1, 20));
        let fn_ = RateObservationFn::default();
        let (s, e) = (date(2024, 1, 2), date(2024, 2, 1));
        let r0 = fn_.rate(&RateObservation::OvernightAveraged(sonia(s, e, 0)), s, e, &prov).unwrap();
        let r1 = fn_.rate(&RateObservation::OvernightAveraged(sonia(s, e, 1)), s, e, &prov).unwrap();
        assert_eq!(r0, r1);
    }

    #[test]
    fn test_cut_off_reuses_earlier_fixing() {
        let prov = provider(date(2024, 2, 1));
        let fn_ = RateObservationFn::default();
        // Mon 8 Jan to Thu 11 Jan: fixings 1.4%, 1.5%, 1.6%
        let (s, e) = (date(2024, 1, 8), date(2024, 1, 11));
        let rate = fn_
            .rate(&RateObservation::OvernightAveraged(sonia(s, e, 2)), s, e, &prov)
            .unwrap();
        // last day reuses the 1.5% fixing
        assert_relative_eq!(rate, (0.014 + 0.015 + 0.015) / 3.0, epsilon = 1e-15);
    }

    #[test]
    fn test_cut_off_policy() {
        let prov = provider(date(2024, 2, 1));
        let (s, e) = (date(2024, 1, 8), date(2024, 1, 10));
        let obs = RateObservation::OvernightAveraged(sonia(s, e, 3));
        assert!(matches!(
            RateObservationFn::new(RateCutOffPolicy::Reject).rate(&obs, s, e, &prov),
            Err(SwapPricingError::Precondition { .. })
        ));
        let clamped = RateObservationFn::new(RateCutOffPolicy::Clamp)
            .rate(&obs, s, e, &prov)
            .unwrap();
        // both days use the first fixing, 1.4%
        assert_relative_eq!(clamped, 0.014, epsilon = 1e-15);
    }

    #[test]
    fn test_forward_sensitivity_credits_cut_off_source() {
        let valuation = date(2024, 1, 2);
        let prov = provider(valuation);
        let fn_ = RateObservationFn::default();
        let (s, e) = (date(2024, 3, 4), date(2024, 3, 8));
        let obs = RateObservation::OvernightAveraged(sonia(s, e, 2));
        let sens = fn_.rate_sensitivity(&obs, s, e, &prov).unwrap().normalized();
        // four days, the fourth reusing the third fixing
        assert_eq!(sens.len(), 3);
        let weights: Vec<f64> = sens.iter().map(|p| p.sensitivity).collect();
        assert_relative_eq!(weights[0], 0.25, epsilon = 1e-14);
        assert_relative_eq!(weights[1], 0.25, epsilon = 1e-14);
        assert_relative_eq!(weights[2], 0.5, epsilon = 1e-14);
        assert!(sens.iter().all(|p| matches!(p.key, SensitivityKey::OvernightRate { .. })));
    }

    #[test]
    fn test_compounded_forward_matches_bump() {
        let valuation = date(2024, 1, 2);
        let prov = provider(valuation);
        let fn_ = RateObservationFn::default();
        let (s, e) = (date(2024, 2, 1), date(2024, 5, 1));
        let obs = RateObservation::OvernightCompounded(sonia(s, e, 2));
        let points = fn_.rate_sensitivity(&obs, s, e, &prov).unwrap();
        let analytic = prov.parameter_sensitivity(&points).unwrap();
        let id = CurveId::Overnight(OvernightIndex::Sonia);
        let up = prov.with_parameter(&id, 0, 0.02 + 1e-6).unwrap();
        let dn = prov.with_parameter(&id, 0, 0.02 - 1e-6).unwrap();
        let fd = (fn_.rate(&obs, s, e, &up).unwrap() - fn_.rate(&obs, s, e, &dn).unwrap()) / 2e-6;
        let total: f64 = analytic.iter().map(|p| p.total()).sum();
        assert_relative_eq!(total, fd, epsilon = 1e-6);
    }

    #[test]
    fn test_explain_overnight() {
        let prov = provider(date(2024, 1, 2));
        let (s, e) = (date(2024, 3, 4), date(2024, 3, 11));
        let obs = RateObservation::OvernightCompounded(sonia(s, e, 0));
        let mut explain = ExplainMap::new();
        let rate = RateObservationFn::default()
            .explain_rate(&obs, s, e, &prov, &mut explain)
            .unwrap();
        assert_eq!(explain.get_number(ExplainKey::ObservedRate), Some(rate));
        let observations = explain.get_list(ExplainKey::Observations);
        assert_eq!(observations.len(), 1);
        assert_eq!(
            observations[0].get(ExplainKey::FixingCount),
            Some(&ExplainValue::Integer(5))
        );
    }
}
