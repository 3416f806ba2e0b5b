//! Swap product pricer.
//!
//! Aggregates leg values per currency and solves the par rate and par
//! spread in closed form. Sensitivities are computed by a backward sweep
//! over the intermediates of the matching forward computation.

use pricer_core::market_data::RatesProvider;
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{Currency, CurrencyAmount, MultiCurrencyAmount};
use pricer_models::instruments::rates::{PaymentPeriod, ResolvedSwap, ResolvedSwapLeg, SwapLegType};
use tracing::debug;

use super::cash_flow::CashFlows;
use super::config::SwapPricerConfig;
use super::error::SwapPricingError;
use super::explain::{ExplainKey, ExplainMap};
use super::leg::DiscountingSwapLegPricer;

/// Prices a resolved swap by discounting every leg.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::ImmutableRatesProvider;
/// use pricer_core::types::{Currency, Date, DayCountConvention, IborIndex};
/// use pricer_models::instruments::rates::{
///     FixedRateCalculation, IborRateCalculation, PayReceive, RateCalculation, RateCalculationSwapLeg,
///     ResolvedSwap,
/// };
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_pricing::rates::{DiscountingSwapProductPricer, SwapPricerConfig};
///
/// let valuation = Date::from_ymd(2024, 1, 15).unwrap();
/// let schedule = |frequency| {
///     ScheduleBuilder::new()
///         .start(valuation)
///         .end(Date::from_ymd(2029, 1, 15).unwrap())
///         .frequency(frequency)
///         .build()
///         .unwrap()
/// };
/// let fixed = RateCalculationSwapLeg::new(
///     PayReceive::Pay,
///     schedule(Frequency::Annual),
///     Currency::EUR,
///     1_000_000.0,
///     RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, 0.03)),
/// );
/// let float = RateCalculationSwapLeg::new(
///     PayReceive::Receive,
///     schedule(Frequency::Quarterly),
///     Currency::EUR,
///     1_000_000.0,
///     RateCalculation::Ibor(IborRateCalculation::new(IborIndex::Euribor3M)),
/// );
/// let swap = ResolvedSwap::new(vec![fixed.resolve().unwrap(), float.resolve().unwrap()]).unwrap();
///
/// let provider = ImmutableRatesProvider::builder(valuation)
///     .discount_curve(Currency::EUR, CurveEnum::flat(0.03))
///     .ibor_curve(IborIndex::Euribor3M, CurveEnum::flat(0.032))
///     .build();
/// let pricer = DiscountingSwapProductPricer::new(&SwapPricerConfig::default());
///
/// let par = pricer.par_rate(&swap, &provider).unwrap();
/// assert!(par > 0.03 && par < 0.035);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingSwapProductPricer {
    leg_pricer: DiscountingSwapLegPricer,
}

/// Relocates a leg-level precondition failure.
fn at_leg<T>(index: usize, result: Result<T, SwapPricingError>) -> Result<T, SwapPricingError> {
    result.map_err(|e| e.in_leg(index))
}

/// Forward sweep of the par rate by PVBP.
struct ParRateForward {
    /// Fixed leg currency.
    currency: Currency,
    /// Present value of the other legs in the fixed leg currency.
    other_pv: f64,
    /// Present value of the fixed leg events.
    events_pv: f64,
    /// PVBP of the fixed leg.
    pvbp: f64,
}

impl ParRateForward {
    fn par_rate(&self) -> f64 {
        -(self.other_pv + self.events_pv) / self.pvbp
    }
}

/// Fixed leg located within the swap.
struct FixedLeg<'a> {
    index: usize,
    leg: &'a ResolvedSwapLeg,
}

impl<'a> FixedLeg<'a> {
    fn find(swap: &'a ResolvedSwap) -> Result<Self, SwapPricingError> {
        swap.first_leg_of_type(SwapLegType::Fixed)
            .map(|(index, leg)| Self { index, leg })
            .ok_or_else(|| SwapPricingError::precondition("par rate requires a fixed leg"))
    }

    /// Whether the par rate is solved through the leg PVBP rather than
    /// through the compounding of a single period.
    fn solves_by_pvbp(&self) -> bool {
        match self.leg.payment_periods() {
            [PaymentPeriod::Rate(p)] => p.accrual_periods().len() == 1,
            [_] => false,
            _ => true,
        }
    }
}

impl DiscountingSwapProductPricer {
    /// Pricer configured by `config`.
    pub fn new(config: &SwapPricerConfig) -> Self {
        Self {
            leg_pricer: DiscountingSwapLegPricer::new(config),
        }
    }

    /// Leg pricer.
    pub fn leg_pricer(&self) -> &DiscountingSwapLegPricer {
        &self.leg_pricer
    }

    fn sum_by_currency<F>(&self, swap: &ResolvedSwap, mut leg_value: F) -> Result<MultiCurrencyAmount, SwapPricingError>
    where
        F: FnMut(&ResolvedSwapLeg) -> Result<CurrencyAmount, SwapPricingError>,
    {
        let mut total = MultiCurrencyAmount::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            total = total.plus_amount(at_leg(i, leg_value(leg))?);
        }
        Ok(total)
    }

    // ========================================
    // Values
    // ========================================

    /// Present value with one entry per leg currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<MultiCurrencyAmount, SwapPricingError> {
        self.sum_by_currency(swap, |leg| self.leg_pricer.present_value(leg, provider))
    }

    /// Present value converted to `currency` at the provider FX rates.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` when an FX rate is missing.
    pub fn present_value_in(
        &self,
        swap: &ResolvedSwap,
        currency: Currency,
        provider: &dyn RatesProvider,
    ) -> Result<CurrencyAmount, SwapPricingError> {
        let mut total = 0.0;
        for (i, leg) in swap.legs().iter().enumerate() {
            let pv = at_leg(i, self.leg_pricer.present_value_internal(leg, provider))?;
            total += pv * provider.fx_rate(leg.currency(), currency)?;
        }
        Ok(CurrencyAmount::new(currency, total))
    }

    /// Undiscounted value with one entry per leg currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<MultiCurrencyAmount, SwapPricingError> {
        self.sum_by_currency(swap, |leg| self.leg_pricer.forecast_value(leg, provider))
    }

    /// Accrued interest with one entry per leg currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn accrued_interest(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<MultiCurrencyAmount, SwapPricingError> {
        self.sum_by_currency(swap, |leg| self.leg_pricer.accrued_interest(leg, provider))
    }

    /// Fixed rate making the present value zero.
    ///
    /// Solved through the PVBP of the first fixed leg, unless that leg is a
    /// single period compounding several annual sub-periods, in which case
    /// the compounded closed form is used.
    ///
    /// # Errors
    ///
    /// - `SwapPricingError::Precondition` without a fixed leg, or when the
    ///   compounded closed form does not apply
    /// - `SwapPricingError::MarketData` when curves or FX rates are missing
    pub fn par_rate(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let fixed = FixedLeg::find(swap)?;
        if fixed.solves_by_pvbp() {
            debug!(leg = fixed.index, "par rate solved through PVBP");
            return Ok(self.par_rate_forward(swap, &fixed, provider)?.par_rate());
        }
        debug!(leg = fixed.index, "par rate solved by compounding");
        self.compounded_par_rate(swap, &fixed, provider)
    }

    fn other_legs_pv(
        &self,
        swap: &ResolvedSwap,
        fixed: &FixedLeg<'_>,
        provider: &dyn RatesProvider,
    ) -> Result<f64, SwapPricingError> {
        let ccy = fixed.leg.currency();
        let mut total = 0.0;
        for (i, leg) in swap.legs().iter().enumerate() {
            if i == fixed.index {
                continue;
            }
            let pv = at_leg(i, self.leg_pricer.present_value_internal(leg, provider))?;
            total += pv * provider.fx_rate(leg.currency(), ccy)?;
        }
        Ok(total)
    }

    fn par_rate_forward(
        &self,
        swap: &ResolvedSwap,
        fixed: &FixedLeg<'_>,
        provider: &dyn RatesProvider,
    ) -> Result<ParRateForward, SwapPricingError> {
        Ok(ParRateForward {
            currency: fixed.leg.currency(),
            other_pv: self.other_legs_pv(swap, fixed, provider)?,
            events_pv: at_leg(fixed.index, self.leg_pricer.present_value_events_internal(fixed.leg, provider))?,
            pvbp: at_leg(fixed.index, self.leg_pricer.pvbp(fixed.leg, provider))?,
        })
    }

    fn compounded_par_rate(
        &self,
        swap: &ResolvedSwap,
        fixed: &FixedLeg<'_>,
        provider: &dyn RatesProvider,
    ) -> Result<f64, SwapPricingError> {
        let fail = |reason: String| SwapPricingError::precondition(reason).in_leg(fixed.index);
        let period = match fixed.leg.payment_periods() {
            [PaymentPeriod::Rate(p)] => p,
            _ => {
                return Err(fail(
                    "compounded par rate requires a single rate payment period".to_string(),
                ))
            }
        };
        if !period.is_compounding() {
            return Err(fail(format!(
                "compounded par rate requires compounding, found {}",
                period.compounding_method()
            )));
        }
        for accrual in period.accrual_periods() {
            if accrual.year_fraction() != 1.0 || accrual.spread() != 0.0 {
                return Err(fail(format!(
                    "compounded par rate requires annual sub-periods without spread, found year fraction {} and spread {} from {}",
                    accrual.year_fraction(),
                    accrual.spread(),
                    accrual.start_date()
                )));
            }
        }
        let other_pv = self.other_legs_pv(swap, fixed, provider)?;
        let events_pv = at_leg(fixed.index, self.leg_pricer.present_value_events_internal(fixed.leg, provider))?;
        let df = provider.discount_factor(period.currency(), period.payment_date())?;
        let n = period.accrual_periods().len() as f64;
        let growth = -(other_pv + events_pv) / (period.notional() * df) + 1.0;
        Ok(growth.powf(1.0 / n) - 1.0)
    }

    /// Spread over the first leg making the present value zero.
    ///
    /// # Errors
    ///
    /// - `SwapPricingError::Precondition` when the first leg PVBP is undefined
    /// - `SwapPricingError::MarketData` when curves or FX rates are missing
    pub fn par_spread(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let (pv, pvbp) = self.par_spread_forward(swap, provider)?;
        Ok(-pv / pvbp)
    }

    fn reference_leg(swap: &ResolvedSwap) -> Result<&ResolvedSwapLeg, SwapPricingError> {
        swap.leg(0)
            .ok_or_else(|| SwapPricingError::InvalidArgument("swap without legs".to_string()))
    }

    fn par_spread_forward(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<(f64, f64), SwapPricingError> {
        let reference = Self::reference_leg(swap)?;
        let pv = self.present_value_in(swap, reference.currency(), provider)?.amount();
        let pvbp = at_leg(0, self.leg_pricer.pvbp(reference, provider))?;
        Ok((pv, pvbp))
    }

    // ========================================
    // Sensitivities
    // ========================================

    /// Sensitivity of [`present_value`](Self::present_value); each leg
    /// stays in its own currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_sensitivity(
        &self,
        swap: &ResolvedSwap,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            result = result.combined_with(at_leg(i, self.leg_pricer.present_value_sensitivity(leg, provider))?);
        }
        Ok(result)
    }

    /// Sensitivity of [`present_value_in`](Self::present_value_in), every
    /// point expressed in `currency`.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::MarketData` when an FX rate is missing.
    pub fn present_value_sensitivity_in(
        &self,
        swap: &ResolvedSwap,
        currency: Currency,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            let fx = provider.fx_rate(leg.currency(), currency)?;
            let sens = at_leg(i, self.leg_pricer.present_value_sensitivity(leg, provider))?;
            result = result.combined_with(sens.multiplied_by(fx).with_currency(currency));
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
        swap: &ResolvedSwap,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            result = result.combined_with(at_leg(i, self.leg_pricer.forecast_value_sensitivity(leg, provider))?);
        }
        Ok(result)
    }

    /// Sensitivity of [`par_rate`](Self::par_rate), expressed in the fixed
    /// leg currency.
    ///
    /// # Errors
    ///
    /// - `SwapPricingError::Unsupported` when the par rate is solved by
    ///   compounding
    /// - same as [`par_rate`](Self::par_rate) otherwise
    pub fn par_rate_sensitivity(
        &self,
        swap: &ResolvedSwap,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let fixed = FixedLeg::find(swap)?;
        if !fixed.solves_by_pvbp() {
            return Err(SwapPricingError::Unsupported(
                "par rate sensitivity of a compounded single period fixed leg".to_string(),
            ));
        }
        let forward = self.par_rate_forward(swap, &fixed, provider)?;
        let ccy = forward.currency;

        // backward sweep
        let other_bar = -1.0 / forward.pvbp;
        let events_bar = -1.0 / forward.pvbp;
        let pvbp_bar = (forward.other_pv + forward.events_pv) / (forward.pvbp * forward.pvbp);

        let mut other_sens = PointSensitivities::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            if i == fixed.index {
                continue;
            }
            let fx = provider.fx_rate(leg.currency(), ccy)?;
            let sens = at_leg(i, self.leg_pricer.present_value_sensitivity(leg, provider))?;
            other_sens = other_sens.combined_with(sens.multiplied_by(fx).with_currency(ccy));
        }
        let events_sens = at_leg(
            fixed.index,
            self.leg_pricer.present_value_sensitivity_events_internal(fixed.leg, provider),
        )?;
        let pvbp_sens = at_leg(fixed.index, self.leg_pricer.pvbp_sensitivity(fixed.leg, provider))?;

        Ok(other_sens
            .multiplied_by(other_bar)
            .combined_with(events_sens.multiplied_by(events_bar))
            .combined_with(pvbp_sens.multiplied_by(pvbp_bar)))
    }

    /// Sensitivity of [`par_spread`](Self::par_spread), expressed in the
    /// first leg currency.
    ///
    /// # Errors
    ///
    /// Same as [`par_spread`](Self::par_spread).
    pub fn par_spread_sensitivity(
        &self,
        swap: &ResolvedSwap,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let reference = Self::reference_leg(swap)?;
        let ccy = reference.currency();
        let (pv, pvbp) = self.par_spread_forward(swap, provider)?;

        // backward sweep
        let pv_bar = -1.0 / pvbp;
        let pvbp_bar = pv / (pvbp * pvbp);

        let pv_sens = self.present_value_sensitivity_in(swap, ccy, provider)?;
        let pvbp_sens = at_leg(0, self.leg_pricer.pvbp_sensitivity(reference, provider))?;
        Ok(pv_sens
            .multiplied_by(pv_bar)
            .combined_with(pvbp_sens.multiplied_by(pvbp_bar)))
    }

    // ========================================
    // Reports
    // ========================================

    /// Cash flows of every leg, by payment date.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn cash_flows(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<CashFlows, SwapPricingError> {
        let mut flows = CashFlows::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            flows = flows.combined_with(at_leg(i, self.leg_pricer.cash_flows(leg, provider))?);
        }
        Ok(flows)
    }

    /// Explain map with one entry per leg, in leg order.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn explain_present_value(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<ExplainMap, SwapPricingError> {
        let mut explain = ExplainMap::new();
        explain.put(ExplainKey::EntryType, "Swap");
        for (i, leg) in swap.legs().iter().enumerate() {
            let mut entry = ExplainMap::new();
            at_leg(i, self.leg_pricer.explain_present_value_internal(leg, provider, &mut entry))?;
            explain.add_list_entry_with_index(ExplainKey::Legs, entry);
        }
        Ok(explain)
    }

    /// Present value exposure per currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn currency_exposure(
        &self,
        swap: &ResolvedSwap,
        provider: &dyn RatesProvider,
    ) -> Result<MultiCurrencyAmount, SwapPricingError> {
        let mut total = MultiCurrencyAmount::empty();
        for (i, leg) in swap.legs().iter().enumerate() {
            total = total.plus(&at_leg(i, self.leg_pricer.currency_exposure(leg, provider))?);
        }
        Ok(total)
    }

    /// Amounts paid on the valuation date, per currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn current_cash(&self, swap: &ResolvedSwap, provider: &dyn RatesProvider) -> Result<MultiCurrencyAmount, SwapPricingError> {
        self.sum_by_currency(swap, |leg| self.leg_pricer.current_cash(leg, provider))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::market_data::curves::CurveEnum;
    use pricer_core::market_data::ImmutableRatesProvider;
    use pricer_core::types::{Date, DayCountConvention, IborIndex};
    use pricer_models::instruments::rates::{
        CompoundingMethod, FixedRateCalculation, IborRateCalculation, PayReceive, RateCalculation,
        RateCalculationSwapLeg,
    };
    use pricer_models::schedules::{Frequency, Schedule, ScheduleBuilder};

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // 2024-01-15 to 2027-01-15: every annual boundary is a business day
    fn schedule(frequency: Frequency) -> Schedule {
        ScheduleBuilder::new()
            .start(date(2024, 1, 15))
            .end(date(2027, 1, 15))
            .frequency(frequency)
            .build()
            .unwrap()
    }

    fn provider() -> ImmutableRatesProvider {
        ImmutableRatesProvider::builder(date(2024, 1, 15))
            .discount_curve(Currency::EUR, CurveEnum::flat(0.025))
            .ibor_curve(IborIndex::Euribor6M, CurveEnum::flat(0.028))
            .build()
    }

    fn fixed_leg(rate: f64) -> RateCalculationSwapLeg {
        RateCalculationSwapLeg::new(
            PayReceive::Pay,
            schedule(Frequency::Annual),
            Currency::EUR,
            5_000_000.0,
            RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, rate)),
        )
    }

    fn float_leg() -> ResolvedSwapLeg {
        RateCalculationSwapLeg::new(
            PayReceive::Receive,
            schedule(Frequency::SemiAnnual),
            Currency::EUR,
            5_000_000.0,
            RateCalculation::Ibor(IborRateCalculation::new(IborIndex::Euribor6M)),
        )
        .resolve()
        .unwrap()
    }

    fn swap(fixed_rate: f64) -> ResolvedSwap {
        ResolvedSwap::new(vec![fixed_leg(fixed_rate).resolve().unwrap(), float_leg()]).unwrap()
    }

    /// Fixed leg paying once at maturity, compounding three annual periods.
    fn compounded_swap(fixed_rate: f64) -> ResolvedSwap {
        let mut fixed = fixed_leg(fixed_rate);
        fixed.payment_schedule = schedule(Frequency::Term);
        fixed.compounding_method = CompoundingMethod::Straight;
        ResolvedSwap::new(vec![fixed.resolve().unwrap(), float_leg()]).unwrap()
    }

    #[test]
    fn test_par_rate_zeroes_present_value() {
        let prov = provider();
        let pricer = DiscountingSwapProductPricer::default();
        let par = pricer.par_rate(&swap(0.01), &prov).unwrap();
        let pv = pricer.present_value(&swap(par), &prov).unwrap();
        assert_eq!(pv.len(), 1);
        assert!(pv.amount_or_zero(Currency::EUR).abs() < 1e-6);
    }

    #[test]
    fn test_par_spread_of_par_swap_is_zero() {
        let prov = provider();
        let pricer = DiscountingSwapProductPricer::default();
        let par = pricer.par_rate(&swap(0.01), &prov).unwrap();
        assert!(pricer.par_spread(&swap(par), &prov).unwrap().abs() < 1e-12);
        // paying 1% below par needs 1% more on the first leg
        let spread = pricer.par_spread(&swap(par - 0.01), &prov).unwrap();
        assert_relative_eq!(spread, 0.01, epsilon = 1e-10);
    }

    #[test]
    fn test_par_rate_without_fixed_leg() {
        let prov = provider();
        let floats = ResolvedSwap::new(vec![float_leg()]).unwrap();
        assert!(matches!(
            DiscountingSwapProductPricer::default().par_rate(&floats, &prov),
            Err(SwapPricingError::Precondition { .. })
        ));
    }

    #[test]
    fn test_compounded_par_rate() {
        let prov = provider();
        let pricer = DiscountingSwapProductPricer::default();
        let par = pricer.par_rate(&compounded_swap(0.01), &prov).unwrap();
        let pv = pricer.present_value(&compounded_swap(par), &prov).unwrap();
        assert!(pv.amount_or_zero(Currency::EUR).abs() < 1e-6);
        assert!(matches!(
            pricer.par_rate_sensitivity(&compounded_swap(par), &prov),
            Err(SwapPricingError::Unsupported(_))
        ));
    }

    #[test]
    fn test_compounded_par_rate_rejects_no_compounding() {
        let prov = provider();
        let mut fixed = fixed_leg(0.01);
        fixed.payment_schedule = schedule(Frequency::Term);
        let swap = ResolvedSwap::new(vec![float_leg(), fixed.resolve().unwrap()]).unwrap();
        assert!(matches!(
            DiscountingSwapProductPricer::default().par_rate(&swap, &prov),
            Err(SwapPricingError::Precondition { leg: 1, period: 0, .. })
        ));
    }

    #[test]
    fn test_present_value_in_leg_currency_needs_no_fx_quote() {
        let prov = provider();
        let pricer = DiscountingSwapProductPricer::default();
        let s = swap(0.027);
        let pv = pricer.present_value(&s, &prov).unwrap();
        let pv_in = pricer.present_value_in(&s, Currency::EUR, &prov).unwrap();
        assert_relative_eq!(pv_in.amount(), pv.amount_or_zero(Currency::EUR), max_relative = 1e-12);
        assert!(pricer.present_value_sensitivity_in(&s, Currency::EUR, &prov).is_ok());
        assert!(pricer.par_rate_sensitivity(&s, &prov).is_ok());
    }

    #[test]
    fn test_explain_lists_legs_in_order() {
        let prov = provider();
        let explain = DiscountingSwapProductPricer::default()
            .explain_present_value(&swap(0.02), &prov)
            .unwrap();
        assert_eq!(explain.get_text(ExplainKey::EntryType), Some("Swap"));
        let legs = explain.get_list(ExplainKey::Legs);
        assert_eq!(legs.len(), 2);
        assert_eq!(legs[0].get_text(ExplainKey::LegType), Some("Fixed"));
        assert_eq!(legs[1].get_text(ExplainKey::LegType), Some("Ibor"));
    }
}
