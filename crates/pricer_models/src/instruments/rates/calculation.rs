//! Rate calculations: expansion of schedules into accrual periods.
//!
//! This module provides:
//! - [`ValueSchedule`]: a value that steps at given period indices
//! - [`FixedRateCalculation`], [`IborRateCalculation`],
//!   [`OvernightRateCalculation`]: per-leg rate terms
//! - [`RateCalculationSwapLeg`]: schedules plus terms, resolved into a
//!   [`ResolvedSwapLeg`]

use pricer_core::market_data::IborIndexObservation;
use pricer_core::types::{Currency, CurrencyAmount, DayCountConvention, IborIndex, OvernightIndex};

use super::accrual::{NegativeRateMethod, RateAccrualPeriod};
use super::event::{NotionalExchange, PaymentEvent};
use super::leg::{PayReceive, ResolvedSwapLeg, SwapLegType};
use super::observation::{OvernightRateObservation, RateObservation};
use super::payment::{CompoundingMethod, PaymentPeriod, RatePaymentPeriod};
use crate::instruments::error::{ensure_finite, InstrumentError};
use crate::schedules::{Period, Schedule};

/// A value with absolute steps keyed by period index.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::ValueSchedule;
///
/// let spread = ValueSchedule::of(0.0).with_step(1, -0.025).unwrap();
/// assert_eq!(spread.value_at(0), 0.0);
/// assert_eq!(spread.value_at(1), -0.025);
/// assert_eq!(spread.value_at(7), -0.025);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ValueSchedule {
    initial: f64,
    steps: Vec<(usize, f64)>,
}

impl ValueSchedule {
    /// Constant value.
    pub fn of(initial: f64) -> Self {
        Self {
            initial,
            steps: Vec::new(),
        }
    }

    /// Adds a step: from period `index` on, the value is `value`.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFinite` for a NaN or infinite value.
    pub fn with_step(mut self, index: usize, value: f64) -> Result<Self, InstrumentError> {
        ensure_finite("schedule step", value)?;
        self.steps.retain(|(i, _)| *i != index);
        self.steps.push((index, value));
        self.steps.sort_by_key(|(i, _)| *i);
        Ok(self)
    }

    /// Value before any step.
    #[inline]
    pub fn initial(&self) -> f64 {
        self.initial
    }

    /// Value applying to period `index`.
    pub fn value_at(&self, index: usize) -> f64 {
        self.steps
            .iter()
            .take_while(|(i, _)| *i <= index)
            .last()
            .map_or(self.initial, |(_, v)| *v)
    }
}

/// Averaging of daily overnight fixings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OvernightAccrualMethod {
    /// Daily compounding.
    #[default]
    Compounded,
    /// Weighted arithmetic average.
    Averaged,
}

/// Fixed rate terms.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FixedRateCalculation {
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Rate per period.
    pub rate: ValueSchedule,
}

impl FixedRateCalculation {
    /// Constant rate terms.
    pub fn new(day_count: DayCountConvention, rate: f64) -> Self {
        Self {
            day_count,
            rate: ValueSchedule::of(rate),
        }
    }

    /// One fixed accrual period per accrual schedule period.
    ///
    /// # Errors
    ///
    /// Propagates accrual period validation failures.
    pub fn expand(&self, accrual_schedule: &Schedule) -> Result<Vec<RateAccrualPeriod>, InstrumentError> {
        accrual_schedule
            .iter()
            .enumerate()
            .map(|(i, period)| {
                accrual_period(period, self.day_count, RateObservation::fixed(self.rate.value_at(i))?)
            })
            .collect()
    }
}

/// Term index rate terms. The fixing is observed on the accrual start.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IborRateCalculation {
    /// Observed index.
    pub index: IborIndex,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Negative rate method.
    pub negative_rate_method: NegativeRateMethod,
    /// Optional gearing schedule.
    pub gearing: Option<ValueSchedule>,
    /// Optional spread schedule.
    pub spread: Option<ValueSchedule>,
}

impl IborRateCalculation {
    /// Terms using the index day count, no gearing and no spread.
    pub fn new(index: IborIndex) -> Self {
        Self {
            index,
            day_count: index.day_count(),
            negative_rate_method: NegativeRateMethod::AllowNegative,
            gearing: None,
            spread: None,
        }
    }

    /// One index observation per accrual schedule period.
    ///
    /// # Errors
    ///
    /// Propagates date and accrual period validation failures.
    pub fn expand(&self, accrual_schedule: &Schedule) -> Result<Vec<RateAccrualPeriod>, InstrumentError> {
        accrual_schedule
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let observation = RateObservation::Ibor(IborIndexObservation::new(self.index, period.start())?);
                let accrual = accrual_period(period, self.day_count, observation)?;
                apply_terms(
                    accrual,
                    i,
                    self.gearing.as_ref(),
                    self.spread.as_ref(),
                    self.negative_rate_method,
                )
            })
            .collect()
    }
}

/// Overnight index rate terms.
///
/// Defaults: compounded accrual, negative rates allowed, no rate cut-off,
/// no gearing and no spread.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvernightRateCalculation {
    /// Observed index.
    pub index: OvernightIndex,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Compounded or averaged.
    pub accrual_method: OvernightAccrualMethod,
    /// Negative rate method.
    pub negative_rate_method: NegativeRateMethod,
    /// Fixings reusing the cut-off fixing at the end of each payment period.
    pub rate_cut_off_days: u32,
    /// Optional gearing schedule.
    pub gearing: Option<ValueSchedule>,
    /// Optional spread schedule.
    pub spread: Option<ValueSchedule>,
}

impl OvernightRateCalculation {
    /// Terms with the defaults above.
    pub fn new(index: OvernightIndex, day_count: DayCountConvention) -> Self {
        Self {
            index,
            day_count,
            accrual_method: OvernightAccrualMethod::Compounded,
            negative_rate_method: NegativeRateMethod::AllowNegative,
            rate_cut_off_days: 0,
            gearing: None,
            spread: None,
        }
    }

    /// One overnight observation per accrual schedule period.
    ///
    /// The rate cut-off is carried only by accrual periods ending a
    /// payment period; when both schedules are equal every period
    /// carries it.
    ///
    /// # Errors
    ///
    /// Propagates accrual period validation failures.
    ///
    /// # Example
    ///
    /// ```
    /// use pricer_models::instruments::rates::{OvernightRateCalculation, RateObservation};
    /// use pricer_models::schedules::{Period, Schedule};
    /// use pricer_core::types::{Date, DayCountConvention, OvernightIndex};
    ///
    /// let d = |m, day| Date::from_ymd(2014, m, day).unwrap();
    /// let accrual = Schedule::new(vec![
    ///     Period::with_payment_on_end(d(1, 6), d(2, 5)),
    ///     Period::with_payment_on_end(d(2, 5), d(3, 5)),
    /// ])
    /// .unwrap();
    /// let payment = Schedule::of_term(Period::with_payment_on_end(d(1, 6), d(3, 5))).unwrap();
    ///
    /// let mut calc = OvernightRateCalculation::new(OvernightIndex::Sonia, DayCountConvention::Act365F);
    /// calc.rate_cut_off_days = 2;
    /// let periods = calc.expand(&accrual, &payment).unwrap();
    ///
    /// let cut_offs: Vec<u32> = periods
    ///     .iter()
    ///     .map(|p| match p.observation() {
    ///         RateObservation::OvernightCompounded(obs) => obs.rate_cut_off_days(),
    ///         _ => unreachable!(),
    ///     })
    ///     .collect();
    /// assert_eq!(cut_offs, vec![0, 2]);
    /// ```
    pub fn expand(
        &self,
        accrual_schedule: &Schedule,
        payment_schedule: &Schedule,
    ) -> Result<Vec<RateAccrualPeriod>, InstrumentError> {
        accrual_schedule
            .iter()
            .enumerate()
            .map(|(i, period)| {
                let cut_off = if payment_schedule.has_period_ending_on(period.end()) {
                    self.rate_cut_off_days
                } else {
                    0
                };
                let daily = OvernightRateObservation::new(self.index, period.start(), period.end(), cut_off)?;
                let observation = match self.accrual_method {
                    OvernightAccrualMethod::Compounded => RateObservation::OvernightCompounded(daily),
                    OvernightAccrualMethod::Averaged => RateObservation::OvernightAveraged(daily),
                };
                let accrual = accrual_period(period, self.day_count, observation)?;
                apply_terms(
                    accrual,
                    i,
                    self.gearing.as_ref(),
                    self.spread.as_ref(),
                    self.negative_rate_method,
                )
            })
            .collect()
    }
}

fn accrual_period(
    period: &Period,
    day_count: DayCountConvention,
    observation: RateObservation,
) -> Result<RateAccrualPeriod, InstrumentError> {
    RateAccrualPeriod::new(
        period.start(),
        period.end(),
        period.year_fraction(day_count),
        observation,
    )?
    .with_unadjusted(period.unadjusted_start(), period.unadjusted_end())
}

fn apply_terms(
    accrual: RateAccrualPeriod,
    index: usize,
    gearing: Option<&ValueSchedule>,
    spread: Option<&ValueSchedule>,
    negative_rate_method: NegativeRateMethod,
) -> Result<RateAccrualPeriod, InstrumentError> {
    let mut accrual = accrual.with_negative_rate_method(negative_rate_method);
    if let Some(gearing) = gearing {
        accrual = accrual.with_gearing(gearing.value_at(index))?;
    }
    if let Some(spread) = spread {
        accrual = accrual.with_spread(spread.value_at(index))?;
    }
    Ok(accrual)
}

/// Rate terms of a [`RateCalculationSwapLeg`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateCalculation {
    /// Fixed rate.
    Fixed(FixedRateCalculation),
    /// Term index.
    Ibor(IborRateCalculation),
    /// Overnight index.
    Overnight(OvernightRateCalculation),
}

impl RateCalculation {
    /// Leg type produced by the terms.
    pub fn leg_type(&self) -> SwapLegType {
        match self {
            RateCalculation::Fixed(_) => SwapLegType::Fixed,
            RateCalculation::Ibor(_) => SwapLegType::Ibor,
            RateCalculation::Overnight(_) => SwapLegType::Overnight,
        }
    }

    /// Day count of the terms.
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            RateCalculation::Fixed(c) => c.day_count,
            RateCalculation::Ibor(c) => c.day_count,
            RateCalculation::Overnight(c) => c.day_count,
        }
    }

    /// Currency of the observed index, if any.
    pub fn index_currency(&self) -> Option<Currency> {
        match self {
            RateCalculation::Fixed(_) => None,
            RateCalculation::Ibor(c) => Some(c.index.currency()),
            RateCalculation::Overnight(c) => Some(c.index.currency()),
        }
    }

    /// Accrual periods for the schedules.
    ///
    /// # Errors
    ///
    /// Propagates the expansion failures of the terms.
    pub fn expand(
        &self,
        accrual_schedule: &Schedule,
        payment_schedule: &Schedule,
    ) -> Result<Vec<RateAccrualPeriod>, InstrumentError> {
        match self {
            RateCalculation::Fixed(c) => c.expand(accrual_schedule),
            RateCalculation::Ibor(c) => c.expand(accrual_schedule),
            RateCalculation::Overnight(c) => c.expand(accrual_schedule, payment_schedule),
        }
    }
}

/// A leg described by schedules and rate terms.
///
/// The notional is unsigned; [`resolve`](RateCalculationSwapLeg::resolve)
/// signs it from the pay/receive flag.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateCalculationSwapLeg {
    /// Pay or receive.
    pub pay_receive: PayReceive,
    /// Accrual periods.
    pub accrual_schedule: Schedule,
    /// Payment periods; each must cover whole accrual periods.
    pub payment_schedule: Schedule,
    /// Leg currency.
    pub currency: Currency,
    /// Unsigned notional.
    pub notional: f64,
    /// Compounding of accrual periods within a payment period.
    pub compounding_method: CompoundingMethod,
    /// Rate terms.
    pub calculation: RateCalculation,
    /// Whether notional is exchanged at the start and the end.
    pub exchange_notional: bool,
}

impl RateCalculationSwapLeg {
    /// Leg with equal accrual and payment schedules, no compounding and no
    /// notional exchange.
    pub fn new(
        pay_receive: PayReceive,
        schedule: Schedule,
        currency: Currency,
        notional: f64,
        calculation: RateCalculation,
    ) -> Self {
        Self {
            pay_receive,
            accrual_schedule: schedule.clone(),
            payment_schedule: schedule,
            currency,
            notional,
            compounding_method: CompoundingMethod::None,
            calculation,
            exchange_notional: false,
        }
    }

    /// Expands and groups the accrual periods into a validated leg.
    ///
    /// Each payment period takes the accrual periods lying within it and
    /// pays on its payment date.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::CurrencyMismatch` if the index currency is not
    ///   the leg currency
    /// - `InstrumentError::InvalidParameter` for a negative notional or an
    ///   accrual period straddling payment periods
    /// - any failure of expansion or leg validation
    pub fn resolve(&self) -> Result<ResolvedSwapLeg, InstrumentError> {
        if let Some(found) = self.calculation.index_currency() {
            if found != self.currency {
                return Err(InstrumentError::CurrencyMismatch {
                    expected: self.currency,
                    found,
                });
            }
        }
        if ensure_finite("notional", self.notional)? < 0.0 {
            return Err(InstrumentError::InvalidParameter {
                message: format!("notional {} must not be negative", self.notional),
            });
        }
        let notional = self.pay_receive.sign() * self.notional;
        let accruals = self
            .calculation
            .expand(&self.accrual_schedule, &self.payment_schedule)?;

        let mut remaining = accruals.into_iter().peekable();
        let mut periods = Vec::with_capacity(self.payment_schedule.len());
        for payment in self.payment_schedule.iter() {
            let mut group = Vec::new();
            while let Some(accrual) = remaining.next_if(|a| a.end_date() <= payment.end()) {
                if accrual.start_date() < payment.start() {
                    return Err(InstrumentError::InvalidParameter {
                        message: format!(
                            "accrual period {} to {} straddles payment period starting {}",
                            accrual.start_date(),
                            accrual.end_date(),
                            payment.start()
                        ),
                    });
                }
                group.push(accrual);
            }
            let period = RatePaymentPeriod::new(
                payment.payment(),
                group,
                self.calculation.day_count(),
                self.currency,
                notional,
                self.compounding_method,
            )?;
            periods.push(PaymentPeriod::Rate(period));
        }
        if let Some(extra) = remaining.next() {
            return Err(InstrumentError::InvalidParameter {
                message: format!("accrual period ending {} outside payment schedule", extra.end_date()),
            });
        }

        let mut events = Vec::new();
        if self.exchange_notional {
            let start = self.accrual_schedule.start_date();
            let end = self
                .payment_schedule
                .periods()
                .last()
                .map_or(self.payment_schedule.end_date(), Period::payment);
            events.push(PaymentEvent::from(NotionalExchange::new(
                CurrencyAmount::new(self.currency, -notional),
                start,
            )?));
            events.push(PaymentEvent::from(NotionalExchange::new(
                CurrencyAmount::new(self.currency, notional),
                end,
            )?));
        }
        ResolvedSwapLeg::new(self.calculation.leg_type(), self.pay_receive, periods, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Date;

    // ========================================
    // Overnight expansion
    // ========================================

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn accrual_schedule() -> Schedule {
        Schedule::new(vec![
            Period::with_payment_on_end(date(2014, 1, 6), date(2014, 2, 5))
                .with_unadjusted(date(2014, 1, 5), date(2014, 2, 5)),
            Period::with_payment_on_end(date(2014, 2, 5), date(2014, 3, 5)),
            Period::with_payment_on_end(date(2014, 3, 5), date(2014, 4, 7))
                .with_unadjusted(date(2014, 3, 5), date(2014, 4, 5)),
        ])
        .unwrap()
    }

    fn payment_schedule() -> Schedule {
        Schedule::of_term(
            Period::with_payment_on_end(date(2014, 1, 6), date(2014, 4, 7))
                .with_unadjusted(date(2014, 1, 5), date(2014, 4, 5)),
        )
        .unwrap()
    }

    fn sonia() -> OvernightRateCalculation {
        OvernightRateCalculation::new(OvernightIndex::Sonia, DayCountConvention::Act365F)
    }

    fn expected(
        start: Date,
        end: Date,
        unadjusted: (Date, Date),
        cut_off: u32,
        averaged: bool,
    ) -> RateAccrualPeriod {
        let obs = OvernightRateObservation::new(OvernightIndex::Sonia, start, end, cut_off).unwrap();
        let observation = if averaged {
            RateObservation::OvernightAveraged(obs)
        } else {
            RateObservation::OvernightCompounded(obs)
        };
        RateAccrualPeriod::new(start, end, DayCountConvention::Act365F.year_fraction(start, end), observation)
            .unwrap()
            .with_unadjusted(unadjusted.0, unadjusted.1)
            .unwrap()
    }

    #[test]
    fn test_defaults() {
        let calc = sonia();
        assert_eq!(calc.accrual_method, OvernightAccrualMethod::Compounded);
        assert_eq!(calc.negative_rate_method, NegativeRateMethod::AllowNegative);
        assert_eq!(calc.rate_cut_off_days, 0);
        assert!(calc.gearing.is_none());
        assert!(calc.spread.is_none());
    }

    #[test]
    fn test_expand_simple() {
        let periods = sonia().expand(&accrual_schedule(), &accrual_schedule()).unwrap();
        assert_eq!(
            periods,
            vec![
                expected(date(2014, 1, 6), date(2014, 2, 5), (date(2014, 1, 5), date(2014, 2, 5)), 0, false),
                expected(date(2014, 2, 5), date(2014, 3, 5), (date(2014, 2, 5), date(2014, 3, 5)), 0, false),
                expected(date(2014, 3, 5), date(2014, 4, 7), (date(2014, 3, 5), date(2014, 4, 5)), 0, false),
            ]
        );
    }

    #[test]
    fn test_expand_cut_off_every_period_when_schedules_equal() {
        let mut calc = sonia();
        calc.rate_cut_off_days = 2;
        let periods = calc.expand(&accrual_schedule(), &accrual_schedule()).unwrap();
        assert_eq!(
            periods,
            vec![
                expected(date(2014, 1, 6), date(2014, 2, 5), (date(2014, 1, 5), date(2014, 2, 5)), 2, false),
                expected(date(2014, 2, 5), date(2014, 3, 5), (date(2014, 2, 5), date(2014, 3, 5)), 2, false),
                expected(date(2014, 3, 5), date(2014, 4, 7), (date(2014, 3, 5), date(2014, 4, 5)), 2, false),
            ]
        );
    }

    #[test]
    fn test_expand_cut_off_last_accrual_of_payment_period() {
        let mut calc = sonia();
        calc.rate_cut_off_days = 2;
        let periods = calc.expand(&accrual_schedule(), &payment_schedule()).unwrap();
        assert_eq!(
            periods,
            vec![
                expected(date(2014, 1, 6), date(2014, 2, 5), (date(2014, 1, 5), date(2014, 2, 5)), 0, false),
                expected(date(2014, 2, 5), date(2014, 3, 5), (date(2014, 2, 5), date(2014, 3, 5)), 0, false),
                expected(date(2014, 3, 5), date(2014, 4, 7), (date(2014, 3, 5), date(2014, 4, 5)), 2, false),
            ]
        );
    }

    #[test]
    fn test_expand_gearing_spread_and_methods() {
        let mut calc = sonia();
        calc.accrual_method = OvernightAccrualMethod::Averaged;
        calc.negative_rate_method = NegativeRateMethod::NotNegative;
        calc.rate_cut_off_days = 2;
        calc.gearing = Some(ValueSchedule::of(1.0).with_step(2, 2.0).unwrap());
        calc.spread = Some(ValueSchedule::of(0.0).with_step(1, -0.025).unwrap());
        let periods = calc.expand(&accrual_schedule(), &payment_schedule()).unwrap();

        let not_negative = |p: RateAccrualPeriod| p.with_negative_rate_method(NegativeRateMethod::NotNegative);
        assert_eq!(
            periods,
            vec![
                not_negative(expected(
                    date(2014, 1, 6),
                    date(2014, 2, 5),
                    (date(2014, 1, 5), date(2014, 2, 5)),
                    0,
                    true
                ))
                .with_spread(0.0)
                .unwrap(),
                not_negative(expected(
                    date(2014, 2, 5),
                    date(2014, 3, 5),
                    (date(2014, 2, 5), date(2014, 3, 5)),
                    0,
                    true
                ))
                .with_spread(-0.025)
                .unwrap(),
                not_negative(expected(
                    date(2014, 3, 5),
                    date(2014, 4, 7),
                    (date(2014, 3, 5), date(2014, 4, 5)),
                    2,
                    true
                ))
                .with_gearing(2.0)
                .unwrap()
                .with_spread(-0.025)
                .unwrap(),
            ]
        );
    }

    // ========================================
    // ValueSchedule
    // ========================================

    #[test]
    fn test_value_schedule_steps() {
        let schedule = ValueSchedule::of(1.0)
            .with_step(3, 3.0)
            .unwrap()
            .with_step(1, 2.0)
            .unwrap()
            .with_step(3, 4.0)
            .unwrap();
        assert_eq!(schedule.initial(), 1.0);
        assert_eq!(
            (0..5).map(|i| schedule.value_at(i)).collect::<Vec<_>>(),
            vec![1.0, 2.0, 2.0, 4.0, 4.0]
        );
        assert!(ValueSchedule::of(0.0).with_step(1, f64::NAN).is_err());
    }

    // ========================================
    // Leg resolution
    // ========================================

    #[test]
    fn test_resolve_groups_accruals_by_payment_period() {
        let leg = RateCalculationSwapLeg {
            pay_receive: PayReceive::Pay,
            accrual_schedule: accrual_schedule(),
            payment_schedule: payment_schedule(),
            currency: Currency::GBP,
            notional: 1.0e6,
            compounding_method: CompoundingMethod::Straight,
            calculation: RateCalculation::Overnight(sonia()),
            exchange_notional: true,
        };
        let resolved = leg.resolve().unwrap();
        assert_eq!(resolved.leg_type(), SwapLegType::Overnight);
        assert_eq!(resolved.payment_periods().len(), 1);
        match &resolved.payment_periods()[0] {
            PaymentPeriod::Rate(p) => {
                assert_eq!(p.accrual_periods().len(), 3);
                assert_eq!(p.notional(), -1.0e6);
                assert_eq!(p.payment_date(), date(2014, 4, 7));
            }
            other => panic!("unexpected period {:?}", other),
        }
        let events = resolved.payment_events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].payment().amount(), 1.0e6);
        assert_eq!(events[1].payment().amount(), -1.0e6);
    }

    #[test]
    fn test_resolve_rejects_index_currency_mismatch() {
        let leg = RateCalculationSwapLeg::new(
            PayReceive::Receive,
            accrual_schedule(),
            Currency::USD,
            1.0e6,
            RateCalculation::Overnight(sonia()),
        );
        assert!(matches!(
            leg.resolve(),
            Err(InstrumentError::CurrencyMismatch { .. })
        ));
    }

    #[test]
    fn test_resolve_fixed_and_ibor() {
        let fixed = RateCalculationSwapLeg::new(
            PayReceive::Receive,
            accrual_schedule(),
            Currency::EUR,
            1.0e6,
            RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, 0.01)),
        )
        .resolve()
        .unwrap();
        assert_eq!(fixed.payment_periods().len(), 3);
        assert_eq!(fixed.leg_type(), SwapLegType::Fixed);

        let ibor = RateCalculationSwapLeg::new(
            PayReceive::Pay,
            accrual_schedule(),
            Currency::EUR,
            1.0e6,
            RateCalculation::Ibor(IborRateCalculation::new(IborIndex::Euribor3M)),
        )
        .resolve()
        .unwrap();
        match &ibor.payment_periods()[1] {
            PaymentPeriod::Rate(p) => match p.accrual_periods()[0].observation() {
                RateObservation::Ibor(obs) => assert_eq!(obs.fixing_date(), date(2014, 2, 5)),
                other => panic!("unexpected observation {:?}", other),
            },
            other => panic!("unexpected period {:?}", other),
        }
    }

    #[test]
    fn test_resolve_rejects_negative_notional() {
        let leg = RateCalculationSwapLeg::new(
            PayReceive::Receive,
            accrual_schedule(),
            Currency::EUR,
            -1.0,
            RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Act360, 0.01)),
        );
        assert!(matches!(leg.resolve(), Err(InstrumentError::InvalidParameter { .. })));
    }
}
