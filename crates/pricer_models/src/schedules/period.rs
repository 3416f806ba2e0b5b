//! Period definition for scheduled instruments.

use pricer_core::types::{Date, DayCountConvention};
use std::fmt;

/// One period of a schedule.
///
/// Carries the business-day adjusted boundaries used for accrual and
/// observation, the unadjusted boundaries of the regular roll, and the
/// payment date.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Period;
/// use pricer_core::types::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2024, 1, 15).unwrap(),
///     Date::from_ymd(2024, 7, 15).unwrap(),
///     Date::from_ymd(2024, 7, 17).unwrap(),
/// );
///
/// assert!((period.year_fraction(DayCountConvention::Act360) - 182.0 / 360.0).abs() < 1e-12);
/// assert_eq!(period.unadjusted_start(), period.start());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    start: Date,
    end: Date,
    unadjusted_start: Date,
    unadjusted_end: Date,
    payment: Date,
}

impl Period {
    /// Creates a period whose unadjusted boundaries equal the adjusted ones.
    #[inline]
    pub fn new(start: Date, end: Date, payment: Date) -> Self {
        Self {
            start,
            end,
            unadjusted_start: start,
            unadjusted_end: end,
            payment,
        }
    }

    /// Creates a period paid on its end date.
    #[inline]
    pub fn with_payment_on_end(start: Date, end: Date) -> Self {
        Self::new(start, end, end)
    }

    /// Sets the unadjusted boundaries.
    #[inline]
    pub fn with_unadjusted(mut self, unadjusted_start: Date, unadjusted_end: Date) -> Self {
        self.unadjusted_start = unadjusted_start;
        self.unadjusted_end = unadjusted_end;
        self
    }

    /// Adjusted start date.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Adjusted end date.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Start date before business-day adjustment.
    #[inline]
    pub fn unadjusted_start(&self) -> Date {
        self.unadjusted_start
    }

    /// End date before business-day adjustment.
    #[inline]
    pub fn unadjusted_end(&self) -> Date {
        self.unadjusted_end
    }

    /// Payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Year fraction between the adjusted boundaries.
    #[inline]
    pub fn year_fraction(&self, day_count: DayCountConvention) -> f64 {
        day_count.year_fraction(self.start, self.end)
    }

    /// Number of calendar days in the period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }

    /// Whether `start <= date < end`.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        date >= self.start && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Period({} to {}, pay {})", self.start, self.end, self.payment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_period() -> Period {
        Period::new(
            Date::from_ymd(2024, 1, 15).unwrap(),
            Date::from_ymd(2024, 7, 15).unwrap(),
            Date::from_ymd(2024, 7, 17).unwrap(),
        )
    }

    #[test]
    fn test_new() {
        let period = sample_period();
        assert_eq!(period.start(), Date::from_ymd(2024, 1, 15).unwrap());
        assert_eq!(period.end(), Date::from_ymd(2024, 7, 15).unwrap());
        assert_eq!(period.payment(), Date::from_ymd(2024, 7, 17).unwrap());
    }

    #[test]
    fn test_year_fraction_thirty_360() {
        // 6 months = 180/360
        assert!((sample_period().year_fraction(DayCountConvention::Thirty360) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_unadjusted() {
        let period = Period::with_payment_on_end(
            Date::from_ymd(2014, 1, 6).unwrap(),
            Date::from_ymd(2014, 2, 5).unwrap(),
        )
        .with_unadjusted(
            Date::from_ymd(2014, 1, 5).unwrap(),
            Date::from_ymd(2014, 2, 5).unwrap(),
        );
        assert_eq!(period.unadjusted_start(), Date::from_ymd(2014, 1, 5).unwrap());
        assert_eq!(period.days(), 30);
    }

    #[test]
    fn test_contains() {
        let period = sample_period();
        // Start is included
        assert!(period.contains(Date::from_ymd(2024, 1, 15).unwrap()));
        assert!(period.contains(Date::from_ymd(2024, 3, 15).unwrap()));
        // End is excluded
        assert!(!period.contains(Date::from_ymd(2024, 7, 15).unwrap()));
        assert!(!period.contains(Date::from_ymd(2023, 12, 31).unwrap()));
    }

    #[test]
    fn test_display() {
        let display = format!("{}", sample_period());
        assert!(display.contains("2024-01-15"));
        assert!(display.contains("2024-07-17"));
    }
}
