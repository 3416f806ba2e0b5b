//! Payment period pricer.
//!
//! A rate period pays `notional × unit accrual` on its payment date. The
//! unit accrual combines the effective rates of the accrual periods
//! according to the compounding method:
//!
//! | Method | Unit accrual |
//! |---|---|
//! | None | `Σ e_i·yf_i` |
//! | Straight | `Π(1 + e_i·yf_i) - 1` |
//! | Flat | `A_i = A_{i-1}(1 + r_i·yf_i) + e_i·yf_i` |
//! | SpreadExclusive | `Π(1 + floor(r_i·g_i)·yf_i) - 1 + Σ s_i·yf_i` |
//!
//! where `r_i` is the observed rate and `e_i` the rate after gearing,
//! spread and floor. Sensitivities run the matching backward sweep over
//! the observed rates.

use pricer_core::market_data::RatesProvider;
use pricer_core::sensitivity::PointSensitivities;
use pricer_core::types::{CurrencyAmount, Date};
use pricer_models::instruments::rates::{
    CompoundingMethod, KnownAmountPaymentPeriod, NegativeRateMethod, PaymentPeriod, RateAccrualPeriod,
    RatePaymentPeriod,
};

use super::error::SwapPricingError;
use super::explain::{ExplainKey, ExplainMap};
use super::observation::RateObservationFn;

/// Prices a single payment period by discounting its forecast amount.
///
/// The pricer does not filter paid periods; the leg pricer does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiscountingPaymentPeriodPricer {
    observation_fn: RateObservationFn,
}

/// Forward sweep of a rate period: observed and effective rate of every
/// accrual period.
struct AccrualSweep<'a> {
    periods: &'a [RateAccrualPeriod],
    raw: Vec<f64>,
    effective: Vec<f64>,
}

impl<'a> AccrualSweep<'a> {
    fn yf(&self, i: usize) -> f64 {
        self.periods[i].year_fraction()
    }

    /// Unit accrual under `method`.
    fn unit_accrual(&self, method: CompoundingMethod) -> f64 {
        let n = self.periods.len();
        if n == 1 {
            return self.effective[0] * self.yf(0);
        }
        match method {
            CompoundingMethod::None => (0..n).map(|i| self.effective[i] * self.yf(i)).sum(),
            CompoundingMethod::Straight => {
                (0..n).map(|i| 1.0 + self.effective[i] * self.yf(i)).product::<f64>() - 1.0
            }
            CompoundingMethod::Flat => self.flat_accumulated()[n],
            CompoundingMethod::SpreadExclusive => {
                let compounded: f64 = (0..n)
                    .map(|i| 1.0 + self.spread_exclusive_rate(i) * self.yf(i))
                    .product();
                let spread: f64 = (0..n).map(|i| self.periods[i].spread() * self.yf(i)).sum();
                compounded - 1.0 + spread
            }
        }
    }

    /// `A_0..=A_n` of flat compounding.
    fn flat_accumulated(&self) -> Vec<f64> {
        let mut acc = Vec::with_capacity(self.periods.len() + 1);
        acc.push(0.0);
        for i in 0..self.periods.len() {
            let previous = acc[i];
            acc.push(previous * (1.0 + self.raw[i] * self.yf(i)) + self.effective[i] * self.yf(i));
        }
        acc
    }

    /// Geared rate, floored but without spread.
    fn spread_exclusive_rate(&self, i: usize) -> f64 {
        let period = &self.periods[i];
        period.negative_rate_method().adjust(self.raw[i] * period.gearing())
    }

    fn spread_exclusive_derivative(&self, i: usize) -> f64 {
        let period = &self.periods[i];
        match period.negative_rate_method() {
            NegativeRateMethod::NotNegative if self.raw[i] * period.gearing() <= 0.0 => 0.0,
            _ => period.gearing(),
        }
    }

    /// Derivative of the unit accrual with respect to each observed rate.
    fn unit_accrual_bar(&self, method: CompoundingMethod) -> Vec<f64> {
        let n = self.periods.len();
        let eff_bar = |i: usize| self.periods[i].effective_rate_derivative(self.raw[i]) * self.yf(i);
        if n == 1 {
            return vec![eff_bar(0)];
        }
        match method {
            CompoundingMethod::None => (0..n).map(eff_bar).collect(),
            CompoundingMethod::Straight => {
                let growth: Vec<f64> = (0..n).map(|i| 1.0 + self.effective[i] * self.yf(i)).collect();
                let product: f64 = growth.iter().product();
                (0..n).map(|i| product / growth[i] * eff_bar(i)).collect()
            }
            CompoundingMethod::Flat => {
                let acc = self.flat_accumulated();
                let mut raw_bar = vec![0.0; n];
                let mut acc_bar = 1.0;
                for i in (0..n).rev() {
                    raw_bar[i] = acc_bar * (acc[i] * self.yf(i) + eff_bar(i));
                    acc_bar *= 1.0 + self.raw[i] * self.yf(i);
                }
                raw_bar
            }
            CompoundingMethod::SpreadExclusive => {
                let growth: Vec<f64> = (0..n)
                    .map(|i| 1.0 + self.spread_exclusive_rate(i) * self.yf(i))
                    .collect();
                let product: f64 = growth.iter().product();
                (0..n)
                    .map(|i| product / growth[i] * self.spread_exclusive_derivative(i) * self.yf(i))
                    .collect()
            }
        }
    }

    /// `D_0..=D_n` with `D_i = D_{i-1}(1 + r_i·yf_i) + yf_i`: the derivative
    /// of the flat accrual with respect to a common spread.
    fn flat_spread_derivative(&self) -> Vec<f64> {
        let mut d = Vec::with_capacity(self.periods.len() + 1);
        d.push(0.0);
        for i in 0..self.periods.len() {
            let previous = d[i];
            d.push(previous * (1.0 + self.raw[i] * self.yf(i)) + self.yf(i));
        }
        d
    }
}

impl DiscountingPaymentPeriodPricer {
    /// Pricer observing rates with `observation_fn`.
    pub fn new(observation_fn: RateObservationFn) -> Self {
        Self { observation_fn }
    }

    /// Rate observation engine.
    pub fn observation_fn(&self) -> &RateObservationFn {
        &self.observation_fn
    }

    /// Present value: forecast times the payment date discount factor.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value(&self, period: &PaymentPeriod, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let df = provider.discount_factor(period.currency(), period.payment_date())?;
        Ok(self.forecast_value(period, provider)? * df)
    }

    /// Undiscounted amount paid on the payment date.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value(&self, period: &PaymentPeriod, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        match period {
            PaymentPeriod::Rate(p) => self.rate_forecast(p, provider),
            PaymentPeriod::KnownAmount(p) => Ok(p.payment().amount()),
        }
    }

    /// Sensitivity of [`present_value`](Self::present_value).
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn present_value_sensitivity(
        &self,
        period: &PaymentPeriod,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let ccy = period.currency();
        let date = period.payment_date();
        let df = provider.discount_factor(ccy, date)?;
        let forecast = self.forecast_value(period, provider)?;
        let forecast_sens = self.forecast_value_sensitivity(period, provider)?.multiplied_by(df);
        let df_sens = provider.discount_factor_sensitivity(ccy, date)?.multiplied_by(forecast);
        Ok(forecast_sens.combined_with(df_sens))
    }

    /// Sensitivity of [`forecast_value`](Self::forecast_value), tagged with
    /// the payment currency.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn forecast_value_sensitivity(
        &self,
        period: &PaymentPeriod,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let p = match period {
            PaymentPeriod::Rate(p) => p,
            PaymentPeriod::KnownAmount(_) => return Ok(PointSensitivities::empty()),
        };
        let sweep = self.sweep(p, provider)?;
        let raw_bar = sweep.unit_accrual_bar(p.compounding_method());
        self.chain_raw_rates(&sweep, &raw_bar, provider)
            .map(|s| s.multiplied_by(p.notional()).with_currency(p.currency()))
    }

    /// Present value of one basis point of spread over the period,
    /// per unit of rate.
    ///
    /// # Errors
    ///
    /// `SwapPricingError::Precondition` for a known amount, or for several
    /// accrual periods under a compounding method other than flat.
    pub fn pvbp(&self, period: &PaymentPeriod, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let p = Self::pvbp_period(period)?;
        let df = provider.discount_factor(p.currency(), p.payment_date())?;
        if let [single] = p.accrual_periods() {
            return Ok(p.notional() * single.year_fraction() * df);
        }
        let sweep = self.sweep(p, provider)?;
        let d = sweep.flat_spread_derivative();
        Ok(p.notional() * df * d[d.len() - 1])
    }

    /// Sensitivity of [`pvbp`](Self::pvbp).
    ///
    /// # Errors
    ///
    /// Same as [`pvbp`](Self::pvbp).
    pub fn pvbp_sensitivity(
        &self,
        period: &PaymentPeriod,
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let p = Self::pvbp_period(period)?;
        let ccy = p.currency();
        let df_sens = provider.discount_factor_sensitivity(ccy, p.payment_date())?;
        if let [single] = p.accrual_periods() {
            return Ok(df_sens.multiplied_by(p.notional() * single.year_fraction()));
        }
        let df = provider.discount_factor(ccy, p.payment_date())?;
        let sweep = self.sweep(p, provider)?;
        let d = sweep.flat_spread_derivative();
        let n = p.accrual_periods().len();
        let mut raw_bar = vec![0.0; n];
        let mut d_bar = 1.0;
        for i in (0..n).rev() {
            raw_bar[i] = d_bar * d[i] * sweep.yf(i);
            d_bar *= 1.0 + sweep.raw[i] * sweep.yf(i);
        }
        let rates_sens = self
            .chain_raw_rates(&sweep, &raw_bar, provider)?
            .with_currency(ccy)
            .multiplied_by(p.notional() * df);
        Ok(df_sens.multiplied_by(p.notional() * d[n]).combined_with(rates_sens))
    }

    /// Interest accrued from the period start to the valuation date,
    /// undiscounted. Accrual periods are truncated at the valuation date
    /// and the last one re-measured with the period day count.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn accrued_interest(&self, period: &PaymentPeriod, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let p = match period {
            PaymentPeriod::Rate(p) => p,
            PaymentPeriod::KnownAmount(_) => return Ok(0.0),
        };
        let valuation = provider.valuation_date();
        let mut truncated = Vec::with_capacity(p.accrual_periods().len());
        for accrual in p.accrual_periods() {
            if accrual.end_date() <= valuation {
                truncated.push(accrual.clone());
            } else {
                if accrual.start_date() < valuation {
                    let yf = p.day_count().year_fraction(accrual.start_date(), valuation);
                    truncated.push(accrual.truncated(valuation, yf)?);
                }
                break;
            }
        }
        if truncated.is_empty() {
            return Ok(0.0);
        }
        self.rate_forecast(&p.with_accrual_periods(truncated)?, provider)
    }

    /// Present value, recording the period and its accruals in `explain`.
    ///
    /// A period paid before the valuation date is marked completed with
    /// zero values.
    ///
    /// # Errors
    ///
    /// Propagates market data and observation failures.
    pub fn explain_present_value(
        &self,
        period: &PaymentPeriod,
        provider: &dyn RatesProvider,
        explain: &mut ExplainMap,
    ) -> Result<f64, SwapPricingError> {
        let ccy = period.currency();
        let payment_date = period.payment_date();
        explain
            .put(ExplainKey::PaymentDate, payment_date)
            .put(ExplainKey::StartDate, period.start_date())
            .put(ExplainKey::EndDate, period.end_date())
            .put(ExplainKey::Currency, ccy);
        if payment_date < provider.valuation_date() {
            explain
                .put(ExplainKey::Completed, true)
                .put(ExplainKey::ForecastValue, CurrencyAmount::zero(ccy))
                .put(ExplainKey::PresentValue, CurrencyAmount::zero(ccy));
            return Ok(0.0);
        }
        let forecast = match period {
            PaymentPeriod::Rate(p) => self.explain_rate_period(p, provider, explain)?,
            PaymentPeriod::KnownAmount(p) => explain_known_amount(p, explain),
        };
        let df = provider.discount_factor(ccy, payment_date)?;
        let pv = forecast * df;
        explain
            .put(ExplainKey::DiscountFactor, df)
            .put(ExplainKey::ForecastValue, CurrencyAmount::new(ccy, forecast))
            .put(ExplainKey::PresentValue, CurrencyAmount::new(ccy, pv));
        Ok(pv)
    }

    fn rate_forecast(&self, p: &RatePaymentPeriod, provider: &dyn RatesProvider) -> Result<f64, SwapPricingError> {
        let sweep = self.sweep(p, provider)?;
        Ok(p.notional() * sweep.unit_accrual(p.compounding_method()))
    }

    fn sweep<'a>(&self, p: &'a RatePaymentPeriod, provider: &dyn RatesProvider) -> Result<AccrualSweep<'a>, SwapPricingError> {
        let periods = p.accrual_periods();
        let raw = periods
            .iter()
            .map(|a| {
                self.observation_fn
                    .rate(a.observation(), a.start_date(), a.end_date(), provider)
            })
            .collect::<Result<Vec<f64>, SwapPricingError>>()?;
        let effective = periods
            .iter()
            .zip(raw.iter())
            .map(|(a, r)| a.effective_rate(*r))
            .collect();
        Ok(AccrualSweep {
            periods,
            raw,
            effective,
        })
    }

    /// `Σ raw_bar_i · ∂r_i`, skipping dead accruals.
    fn chain_raw_rates(
        &self,
        sweep: &AccrualSweep<'_>,
        raw_bar: &[f64],
        provider: &dyn RatesProvider,
    ) -> Result<PointSensitivities, SwapPricingError> {
        let mut result = PointSensitivities::empty();
        for (accrual, bar) in sweep.periods.iter().zip(raw_bar) {
            if *bar == 0.0 {
                continue;
            }
            let sens = self.observation_fn.rate_sensitivity(
                accrual.observation(),
                accrual.start_date(),
                accrual.end_date(),
                provider,
            )?;
            result = result.combined_with(sens.multiplied_by(*bar));
        }
        Ok(result)
    }

    fn pvbp_period(period: &PaymentPeriod) -> Result<&RatePaymentPeriod, SwapPricingError> {
        match period {
            PaymentPeriod::KnownAmount(_) => {
                Err(SwapPricingError::precondition("PVBP is undefined for a known amount period"))
            }
            PaymentPeriod::Rate(p) if p.accrual_periods().len() > 1 && p.compounding_method() != CompoundingMethod::Flat => {
                Err(SwapPricingError::precondition(format!(
                    "PVBP with {} accrual periods requires flat compounding, found {}",
                    p.accrual_periods().len(),
                    p.compounding_method()
                )))
            }
            PaymentPeriod::Rate(p) => Ok(p),
        }
    }

    fn explain_rate_period(
        &self,
        p: &RatePaymentPeriod,
        provider: &dyn RatesProvider,
        explain: &mut ExplainMap,
    ) -> Result<f64, SwapPricingError> {
        explain
            .put(ExplainKey::EntryType, "RatePaymentPeriod")
            .put(ExplainKey::Notional, CurrencyAmount::new(p.currency(), p.notional()))
            .put(ExplainKey::CompoundingMethod, p.compounding_method().to_string());
        for accrual in p.accrual_periods() {
            let mut entry = ExplainMap::new();
            entry
                .put(ExplainKey::EntryType, "AccrualPeriod")
                .put(ExplainKey::StartDate, accrual.start_date())
                .put(ExplainKey::EndDate, accrual.end_date())
                .put(ExplainKey::UnadjustedStartDate, accrual.unadjusted_start_date())
                .put(ExplainKey::UnadjustedEndDate, accrual.unadjusted_end_date())
                .put(ExplainKey::AccrualYearFraction, accrual.year_fraction())
                .put(ExplainKey::Gearing, accrual.gearing())
                .put(ExplainKey::Spread, accrual.spread())
                .put(ExplainKey::NegativeRateMethod, accrual.negative_rate_method().to_string());
            let raw = self.observation_fn.explain_rate(
                accrual.observation(),
                accrual.start_date(),
                accrual.end_date(),
                provider,
                &mut entry,
            )?;
            let rate = accrual.effective_rate(raw);
            entry
                .put(ExplainKey::AccrualRate, rate)
                .put(ExplainKey::UnitAmount, rate * accrual.year_fraction());
            explain.add_list_entry_with_index(ExplainKey::AccrualPeriods, entry);
        }
        self.rate_forecast(p, provider)
    }
}

fn explain_known_amount(p: &KnownAmountPaymentPeriod, explain: &mut ExplainMap) -> f64 {
    explain.put(ExplainKey::EntryType, "KnownAmountPaymentPeriod");
    p.payment().amount()
}

/// Whether a period or event paid on `date` is still to be valued.
#[inline]
pub(crate) fn is_unpaid(date: Date, provider: &dyn RatesProvider) -> bool {
    date >= provider.valuation_date()
}
