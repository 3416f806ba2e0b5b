//! Schedule and ScheduleBuilder implementation.

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;
use pricer_core::types::Date;

/// Ordered, contiguous periods.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::Date;
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 1, 15).unwrap())
///     .end(Date::from_ymd(2026, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// assert_eq!(schedule.payment_dates().len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    periods: Vec<Period>,
}

impl Schedule {
    /// Creates a schedule from explicit periods.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::NoPeriods` if `periods` is empty
    /// - `ScheduleError::InvalidDateRange` if a period does not end after it starts
    /// - `ScheduleError::NonContiguous` if a period does not start where the previous ends
    pub fn new(periods: Vec<Period>) -> Result<Self, ScheduleError> {
        if periods.is_empty() {
            return Err(ScheduleError::NoPeriods);
        }
        for (index, period) in periods.iter().enumerate() {
            if period.start() >= period.end() {
                return Err(ScheduleError::InvalidDateRange {
                    start: period.start(),
                    end: period.end(),
                });
            }
            if index > 0 && periods[index - 1].end() != period.start() {
                return Err(ScheduleError::NonContiguous {
                    index,
                    previous_end: periods[index - 1].end(),
                    start: period.start(),
                });
            }
        }
        Ok(Self { periods })
    }

    /// Single period schedule.
    pub fn of_term(period: Period) -> Result<Self, ScheduleError> {
        Self::new(vec![period])
    }

    /// Periods in order.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Payment dates in period order.
    pub fn payment_dates(&self) -> Vec<Date> {
        self.periods.iter().map(|p| p.payment()).collect()
    }

    /// Number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Always false for a constructed schedule.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Adjusted start of the first period.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Adjusted end of the last period.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Iterator over the periods.
    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    /// Period containing the date, if any.
    pub fn period_containing(&self, date: Date) -> Option<&Period> {
        self.periods.iter().find(|p| p.contains(date))
    }

    /// Whether some period ends on `date`.
    pub fn has_period_ending_on(&self, date: Date) -> bool {
        self.periods.iter().any(|p| p.end() == date)
    }
}

/// Builder for regular schedules rolling from the start date.
///
/// Unadjusted boundaries are `start + k * frequency`, with a short final
/// stub when the term is not a whole number of periods. Adjusted
/// boundaries move to the following business day of the weekend-only
/// calendar. Payment happens `payment_lag` business days after the
/// adjusted end.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::{Frequency, ScheduleBuilder};
/// use pricer_core::types::Date;
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2024, 3, 1).unwrap())
///     .end(Date::from_ymd(2025, 3, 1).unwrap())
///     .frequency(Frequency::Quarterly)
///     .payment_lag(2)
///     .build()
///     .unwrap();
///
/// // 2024-06-01 is a Saturday
/// let first = schedule.periods()[0];
/// assert_eq!(first.unadjusted_end(), Date::from_ymd(2024, 6, 1).unwrap());
/// assert_eq!(first.end(), Date::from_ymd(2024, 6, 3).unwrap());
/// assert_eq!(first.payment(), Date::from_ymd(2024, 6, 5).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    business_day_adjust: bool,
    payment_lag: u32,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a builder with business-day adjustment on and no payment lag.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            business_day_adjust: true,
            payment_lag: 0,
        }
    }

    /// Sets the unadjusted start date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the unadjusted end date.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the period frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Enables or disables business-day adjustment of boundaries.
    pub fn business_day_adjust(mut self, adjust: bool) -> Self {
        self.business_day_adjust = adjust;
        self
    }

    /// Sets the payment lag in business days.
    pub fn payment_lag(mut self, days: u32) -> Self {
        self.payment_lag = days;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Start date, end date or frequency is missing
    /// - Start date is not before end date
    /// - Date arithmetic overflows
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let boundaries = Self::unadjusted_boundaries(start, end, frequency)?;
        let mut periods = Vec::with_capacity(boundaries.len() - 1);
        for pair in boundaries.windows(2) {
            let (unadjusted_start, unadjusted_end) = (pair[0], pair[1]);
            let period_start = self.adjust(unadjusted_start)?;
            let period_end = self.adjust(unadjusted_end)?;
            let mut payment = period_end;
            for _ in 0..self.payment_lag {
                payment = payment.next_business_day()?;
            }
            periods.push(
                Period::new(period_start, period_end, payment)
                    .with_unadjusted(unadjusted_start, unadjusted_end),
            );
        }

        Schedule::new(periods)
    }

    fn unadjusted_boundaries(
        start: Date,
        end: Date,
        frequency: Frequency,
    ) -> Result<Vec<Date>, ScheduleError> {
        let Some(months) = frequency.months() else {
            return Ok(vec![start, end]);
        };
        let mut boundaries = vec![start];
        let mut k = 1;
        loop {
            let next = start.plus_months((k * months) as i32)?;
            if next >= end {
                boundaries.push(end);
                return Ok(boundaries);
            }
            boundaries.push(next);
            k += 1;
        }
    }

    fn adjust(&self, date: Date) -> Result<Date, ScheduleError> {
        if self.business_day_adjust {
            Ok(date.next_or_same_business_day()?)
        } else {
            Ok(date)
        }
    }
}
