//! Swap leg pricer.

use pricer_core::market_data::RatesProvider;
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{CurrencyAmount, MultiCurrencyAmount};
use pricer_models::instruments::rates::{PaymentEvent, PaymentPeriod, ResolvedSwapLeg};
use tracing::trace;

use super::cash_flow::{CashFlow, CashFlows};
use super::config::SwapPricerConfig;
use super::error::SwapPricingError;
use super::event::DiscountingPaymentEventPricer;
use super::explain::{ExplainKey, ExplainMap};
use super::observation::RateObservationFn;
use super::period::{is_unpaid, DiscountingPaymentPeriodPricer};

/// Prices a swap leg as the sum of its unpaid periods and events.
///
/// Flows paid before the valuation date contribute nothing. Precondition
/// failures name the offending period; the product pricer adds the leg.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::ImmutableRatesProvider;
/// use pricer_core::types::{Currency, Date, DayCountConvention};
/// use pricer_models::instruments::rates::{FixedRateCalculation, PayReceive, RateCalculation, RateCalculationSwapLeg};
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_pricing::rates::{DiscountingSwapLegPricer, SwapPricerConfig};
///
/// let start = Date::from_ymd(2024, 1, 15).unwrap();
/// let end = Date::from_ymd(2026, 1, 15).unwrap();
/// let schedule = ScheduleBuilder::new()
///     .start(start)
///     .end(end)
///     .frequency(Frequency::Annual)
///     .build()
///     .unwrap();
/// let leg = RateCalculationSwapLeg::new(
///     PayReceive::Receive,
///     schedule,
///     Currency::USD,
///     1_000_000.0,
///     RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, 0.04)),
/// )
/// .resolve()
/// .unwrap();
///
/// let provider = ImmutableRatesProvider::builder(start)
///     .discount_curve(Currency::USD, CurveEnum::flat(0.04))
///     .build();
/// let pricer = DiscountingSwapLegPricer::new(&SwapPricerConfig::default());
/// let pv = pricer.present_value(&leg, &provider).unwrap();
/// assert_eq!(pv.currency(), Currency::USD);
/// assert!(pv.amount() > 70_000.0 && pv.amount() < 80_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscountingSwapLegPricer {
    period_pricer: DiscountingPaymentPeriodPricer,
    event_pricer: DiscountingPaymentEventPricer,
    explain_periods: bool,
}

impl Default for DiscountingSwapLegPricer {
    fn default() -> Self {
        Self::new(&SwapPricerConfig::default())
    }
}

/// Relocates a period-level precondition failure.
fn at_period<T>(index: usize, result: Result<T, SwapPricingError>) -> Result<T, SwapPricingError> {
    result.map_err(|e| e.in_period(index))
}

impl DiscountingSwapLegPricer {
    /// Pricer configured by `config`.
    pub fn new(config: &SwapPricerConfig) -> Self {
        Self {
            period_pricer: DiscountingPaymentPeriodPricer::new(RateObservationFn::new(config.rate_cut_off_policy)),
            event_pricer: DiscountingPaymentEventPricer::new(),
            explain_periods: config.explain_periods,
        }
    }

    /// Payment period pricer.
    pub fn period_pricer(&self) -> &DiscountingPaymentPeriodPricer {
        &self.period_pricer
    }

    /// Payment event pricer.
    pub fn event_pricer(&self) -> &DiscountingPaymentEventPricer {
        &self.event_pricer
    }

    fn unpaid_periods<'a>(
        leg: &'a ResolvedSwapLeg,
        provider: &'a dyn RatesProvider,
    ) -> impl Iterator<Item = (usize, &'a PaymentPeriod)> + 'a {
        leg.payment_periods()
            .iter()
            .enumerate()
            .filter(move |(_, p)| is_unpaid(p.payment_date(), provider))
    }

    fn unpaid_events<'a>(
        leg: &'a ResolvedSwapLeg,
        provider: &'a dyn RatesProvider,
    ) -> impl Iterator<Item = &'a PaymentEvent> + 'a {
        leg.payment_events()
            .iter()
            .filter(move |e| is_unpaid(e.payment_date(), provider))
    }

    // ========================================
    // Values
    // ========================================

    /// Present value in the leg currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<CurrencyAmount, SwapPricingError> {
        let pv = self.present_value_internal(leg, provider)?;
        trace!(leg_type = %leg.leg_type(), currency = %leg.currency(), pv, "leg present value");
        Ok(CurrencyAmount::new(leg.currency(), pv))
    }

    /// Present value of periods and events, as a number.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_internal(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        Ok(self.present_value_periods_internal(leg, provider)? + self.present_value_events_internal(leg, provider)?)
    }

    /// Present value of the payment periods only.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_periods_internal(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<f64, SwapPricingError> {
        let mut total = 0.0;
        for (i, period) in Self::unpaid_periods(leg, provider) {
            total += at_period(i, self.period_pricer.present_value(period, provider))?;
        }
        Ok(total)
    }

    /// Present value of the payment events only.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` without a discount curve.
    pub fn present_value_events_internal(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<f64, SwapPricingError> {
        let mut total = 0.0;
        for event in Self::unpaid_events(leg, provider) {
            total += self.event_pricer.present_value(event, provider)?;
        }
        Ok(total)
    }

    /// Undiscounted value in the leg currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<CurrencyAmount, SwapPricingError> {
        Ok(CurrencyAmount::new(leg.currency(), self.forecast_value_internal(leg, provider)?))
    }

    /// Undiscounted value of periods and events, as a number.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value_internal(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let mut total = self.forecast_value_events_internal(leg, provider);
        for (i, period) in Self::unpaid_periods(leg, provider) {
            total += at_period(i, self.period_pricer.forecast_value(period, provider))?;
        }
        Ok(total)
    }

    /// Undiscounted value of the payment events only.
    pub fn forecast_value_events_internal(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> f64 {
        Self::unpaid_events(leg, provider)
            .map(|e| self.event_pricer.forecast_value(e))
            .sum()
    }

    /// Interest accrued on the current period up to the valuation date.
    ///
    /// The current period is the one with `start < valuation <= end`;
    /// without one the result is zero.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn accrued_interest(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<CurrencyAmount, SwapPricingError> {
        let valuation = provider.valuation_date();
        let current = leg
            .payment_periods()
            .iter()
            .enumerate()
            .find(|(_, p)| p.start_date() < valuation && valuation <= p.end_date());
        let amount = match current {
            Some((i, period)) => at_period(i, self.period_pricer.accrued_interest(period, provider))?,
            None => 0.0,
        };
        Ok(CurrencyAmount::new(leg.currency(), amount))
    }

    /// Sum of the period PVBPs; events are excluded.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::Precondition` for a period whose PVBP is undefined.
    pub fn pvbp(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let mut total = 0.0;
        for (i, period) in Self::unpaid_periods(leg, provider) {
            total += at_period(i, self.period_pricer.pvbp(period, provider))?;
        }
        Ok(total)
    }

    // ========================================
    // Sensitivities
    // ========================================

    /// Sensitivity of [`present_value`](Self::present_value).
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_sensitivity(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        Ok(self
            .present_value_sensitivity_periods_internal(leg, provider)?
            .combined_with(self.present_value_sensitivity_events_internal(leg, provider)?))
    }

    /// Sensitivity of the present value of the payment periods.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_sensitivity_periods_internal(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, period) in Self::unpaid_periods(leg, provider) {
            result = result.combined_with(at_period(i, self.period_pricer.present_value_sensitivity(period, provider))?);
        }
        Ok(result)
    }

    /// Sensitivity of the present value of the payment events.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` without a discount curve.
    pub fn present_value_sensitivity_events_internal(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for event in Self::unpaid_events(leg, provider) {
            result = result.combined_with(self.event_pricer.present_value_sensitivity(event, provider)?);
        }
        Ok(result)
    }

    /// Sensitivity of [`forecast_value`](Self::forecast_value).
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value_sensitivity(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, period) in Self::unpaid_periods(leg, provider) {
            result = result.combined_with(at_period(i, self.period_pricer.forecast_value_sensitivity(period, provider))?);
        }
        Ok(result)
    }

    /// Sensitivity of [`pvbp`](Self::pvbp).
    ///
    /// # Errors
    ///
    /// Same as [`pvbp`](Self::pvbp).
    pub fn pvbp_sensitivity(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, period) in Self::unpaid_periods(leg, provider) {
            result = result.combined_with(at_period(i, self.period_pricer.pvbp_sensitivity(period, provider))?);
        }
        Ok(result)
    }

    // ========================================
    // Reports
    // ========================================

    /// One cash flow per unpaid period and event, by payment date.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn cash_flows(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<CashFlows, SwapPricingError> {
        let ccy = leg.currency();
        let mut flows = Vec::with_capacity(leg.payment_periods().len() + leg.payment_events().len());
        for (i, period) in Self::unpaid_periods(leg, provider) {
            let forecast = at_period(i, self.period_pricer.forecast_value(period, provider))?;
            let df = provider.discount_factor(ccy, period.payment_date())?;
            flows.push(CashFlow::of_forecast_value(
                period.payment_date(),
                CurrencyAmount::new(ccy, forecast),
                df,
            ));
        }
        for event in Self::unpaid_events(leg, provider) {
            let df = provider.discount_factor(ccy, event.payment_date())?;
            flows.push(CashFlow::of_forecast_value(event.payment_date(), event.payment(), df));
        }
        Ok(CashFlows::of(flows))
    }

    /// Present value as a currency exposure.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn currency_exposure(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
    ) -> Result<MultiCurrencyAmount, SwapPricingError> {
        Ok(self.present_value(leg, provider)?.into())
    }

    /// Amount paid on the valuation date.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn current_cash(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<CurrencyAmount, SwapPricingError> {
        let valuation = provider.valuation_date();
        let mut total = 0.0;
        for (i, period) in leg.payment_periods().iter().enumerate() {
            if period.payment_date() == valuation {
                total += at_period(i, self.period_pricer.forecast_value(period, provider))?;
            }
        }
        total += leg
            .payment_events()
            .iter()
            .filter(|e| e.payment_date() == valuation)
            .map(|e| self.event_pricer.forecast_value(e))
            .sum::<f64>();
        Ok(CurrencyAmount::new(leg.currency(), total))
    }

    /// Explain map of the leg.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn explain_present_value(&self, leg: &ResolvedSwapLeg, provider: &dyn RatesProvider) -> Result<ExplainMap, SwapPricingError> {
        let mut explain = ExplainMap::new();
        self.explain_present_value_internal(leg, provider, &mut explain)?;
        Ok(explain)
    }

    /// Records the leg, and its periods and events when configured, in
    /// `explain`; returns the leg present value.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn explain_present_value_internal(
        &self,
        leg: &ResolvedSwapLeg,
        provider: &dyn RatesProvider,
        explain: &mut ExplainMap,
    ) -> Result<f64, SwapPricingError> {
        let ccy = leg.currency();
        explain
            .put(ExplainKey::EntryType, "Leg")
            .put(ExplainKey::LegType, leg.leg_type().to_string())
            .put(ExplainKey::PayReceive, leg.pay_receive().to_string())
            .put(ExplainKey::Currency, ccy)
            .put(ExplainKey::StartDate, leg.start_date())
            .put(ExplainKey::EndDate, leg.end_date());
        let pv = if self.explain_periods {
            let mut pv = 0.0;
            for (i, period) in leg.payment_periods().iter().enumerate() {
                let mut entry = ExplainMap::new();
                pv += at_period(i, self.period_pricer.explain_present_value(period, provider, &mut entry))?;
                explain.add_list_entry_with_index(ExplainKey::PaymentPeriods, entry);
            }
            for event in leg.payment_events() {
                let mut entry = ExplainMap::new();
                pv += self.event_pricer.explain_present_value(event, provider, &mut entry)?;
                explain.add_list_entry_with_index(ExplainKey::PaymentEvents, entry);
            }
            pv
        } else {
            self.present_value_internal(leg, provider)?
        };
        explain
            .put(ExplainKey::ForecastValue, self.forecast_value(leg, provider)?)
            .put(ExplainKey::PresentValue, CurrencyAmount::new(ccy, pv));
        Ok(pv)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CurveEnum;
    use pricer_core::market_data::ImmutableRatesProvider;
    use pricer_core::types::{Currency, Date, DayCountConvention};
    use pricer_models::instruments::rates::{
        FixedRateCalculation, PayReceive, RateCalculation, RateCalculationSwapLeg,
    };
    use pricer_models::schedules::{Frequency, ScheduleBuilder};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn fixed_leg(pay_receive: PayReceive, exchange: bool) -> ResolvedSwapLeg {
        let schedule = ScheduleBuilder::new()
            .start(date(2023, 7, 17))
            .end(date(2026, 7, 17))
            .frequency(Frequency::SemiAnnual)
            .build()
            .unwrap();
        let mut leg = RateCalculationSwapLeg::new(
            pay_receive,
            schedule,
            Currency::GBP,
            10_000_000.0,
            RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Act365F, 0.05)),
        );
        leg.exchange_notional = exchange;
        leg.resolve().unwrap()
    }

    fn provider(valuation: Date) -> ImmutableRatesProvider {
        ImmutableRatesProvider::builder(valuation)
            .discount_curve(Currency::GBP, CurveEnum::flat(0.045))
            .build()
    }

    #[test]
    fn test_paid_periods_are_excluded() {
        let leg = fixed_leg(PayReceive::Receive, false);
        let pricer = DiscountingSwapLegPricer::default();
        let before = pricer.present_value_internal(&leg, &provider(date(2023, 7, 17))).unwrap();
        let after = pricer.present_value_internal(&leg, &provider(date(2024, 8, 1))).unwrap();
        assert!(after < before);
        let flows = pricer.cash_flows(&leg, &provider(date(2024, 8, 1))).unwrap();
        assert_eq!(flows.len(), 4);
        let pv_from_flows: f64 = flows.iter().map(|f| f.present_value.amount()).sum();
        assert_relative_eq!(pv_from_flows, after, max_relative = 1e-12);
    }

    #[test]
    fn test_events_count_in_value_not_pvbp() {
        let prov = provider(date(2023, 7, 17));
        let pricer = DiscountingSwapLegPricer::default();
        let plain = fixed_leg(PayReceive::Pay, false);
        let exchanged = fixed_leg(PayReceive::Pay, true);
        assert_eq!(pricer.pvbp(&plain, &prov).unwrap(), pricer.pvbp(&exchanged, &prov).unwrap());
        let events = pricer.present_value_events_internal(&exchanged, &prov).unwrap();
        assert_relative_eq!(
            pricer.present_value_internal(&exchanged, &prov).unwrap(),
            pricer.present_value_internal(&plain, &prov).unwrap() + events,
            max_relative = 1e-12
        );
        // a pay leg receives N at the start and pays N at maturity
        assert!(events > 0.0 && events < 10_000_000.0);
        assert_eq!(pricer.forecast_value_events_internal(&exchanged, &prov), 0.0);
        assert_eq!(pricer.current_cash(&exchanged, &prov).unwrap().amount(), 10_000_000.0);
    }

    #[test]
    fn test_accrued_interest() {
        let leg = fixed_leg(PayReceive::Receive, false);
        let pricer = DiscountingSwapLegPricer::default();
        let accrued = pricer.accrued_interest(&leg, &provider(date(2023, 10, 17))).unwrap();
        // 92 days ACT/365F at 5%
        assert_relative_eq!(accrued.amount(), 10_000_000.0 * 0.05 * 92.0 / 365.0, epsilon = 1e-6);
        let at_start = pricer.accrued_interest(&leg, &provider(date(2023, 7, 17))).unwrap();
        assert_eq!(at_start.amount(), 0.0);
    }

    #[test]
    fn test_explain_sums_to_present_value() {
        let prov = provider(date(2024, 8, 1));
        let leg = fixed_leg(PayReceive::Receive, true);
        let pricer = DiscountingSwapLegPricer::default();
        let explain = pricer.explain_present_value(&leg, &prov).unwrap();
        let pv = pricer.present_value(&leg, &prov).unwrap();
        assert_relative_eq!(
            explain.get_amount(ExplainKey::PresentValue).unwrap().amount(),
            pv.amount(),
            max_relative = 1e-12
        );
        assert_eq!(explain.get_list(ExplainKey::PaymentPeriods).len(), 6);
        assert_eq!(explain.get_list(ExplainKey::PaymentEvents).len(), 2);

        let terse = DiscountingSwapLegPricer::new(&SwapPricerConfig::new().with_explain_periods(false))
            .explain_present_value(&leg, &prov)
            .unwrap();
        assert!(terse.get_list(ExplainKey::PaymentPeriods).is_empty());
    }
}
