//! Dates, reference months and day count conventions.
//!
//! This module provides:
//! - [`Date`]: calendar date wrapper around `chrono::NaiveDate` with
//!   weekend-only business-day helpers
//! - [`YearMonth`]: reference month used by price indices
//! - [`DayCountConvention`]: year fraction conventions
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::time::{Date, DayCountConvention};
//!
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let yf = DayCountConvention::Act360.year_fraction(start, end);
//! assert!((yf - 182.0 / 360.0).abs() < 1e-12);
//! ```

use chrono::{Datelike, Days, Months, NaiveDate, Weekday};
use std::fmt;
use std::ops::Sub;
use std::str::FromStr;

use super::error::DateError;

/// Calendar date.
///
/// Serialises as ISO 8601 (`YYYY-MM-DD`).
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::Date;
///
/// let date: Date = "2024-06-14".parse().unwrap();
/// assert!(date.is_business_day()); // Friday
/// let next = date.next_business_day().unwrap();
/// assert_eq!(next, Date::from_ymd(2024, 6, 17).unwrap());
/// assert_eq!(next - date, 3);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a date from its components.
    ///
    /// # Errors
    ///
    /// `DateError::InvalidDate` if the components do not form a calendar date.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or(DateError::InvalidDate { year, month, day })
    }

    /// Parses `YYYY-MM-DD`.
    pub fn parse(s: &str) -> Result<Self, DateError> {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Date)
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))
    }

    /// Underlying chrono date.
    #[inline]
    pub fn into_inner(self) -> NaiveDate {
        self.0
    }

    /// Year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Day-of-month component.
    #[inline]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Day of the week.
    #[inline]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Reference month containing this date.
    pub fn year_month(&self) -> YearMonth {
        YearMonth {
            year: self.year(),
            month: self.month(),
        }
    }

    /// Adds (or subtracts, when negative) calendar days.
    pub fn plus_days(self, days: i64) -> Result<Self, DateError> {
        let shifted = if days >= 0 {
            self.0.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.0.checked_sub_days(Days::new(days.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} {:+} days", self, days)))
    }

    /// Adds calendar months, clamping to the end of the target month.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::Date;
    ///
    /// let date = Date::from_ymd(2024, 1, 31).unwrap();
    /// assert_eq!(date.plus_months(1).unwrap(), Date::from_ymd(2024, 2, 29).unwrap());
    /// ```
    pub fn plus_months(self, months: i32) -> Result<Self, DateError> {
        let shifted = if months >= 0 {
            self.0.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.0.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted
            .map(Date)
            .ok_or_else(|| DateError::OutOfRange(format!("{} {:+} months", self, months)))
    }

    /// Whether this is a business day of the weekend-only calendar.
    pub fn is_business_day(&self) -> bool {
        !matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// First business day strictly after this date.
    pub fn next_business_day(self) -> Result<Self, DateError> {
        let mut date = self.plus_days(1)?;
        while !date.is_business_day() {
            date = date.plus_days(1)?;
        }
        Ok(date)
    }

    /// Last business day strictly before this date.
    pub fn previous_business_day(self) -> Result<Self, DateError> {
        let mut date = self.plus_days(-1)?;
        while !date.is_business_day() {
            date = date.plus_days(-1)?;
        }
        Ok(date)
    }

    /// This date if it is a business day, otherwise the next one.
    pub fn next_or_same_business_day(self) -> Result<Self, DateError> {
        if self.is_business_day() {
            Ok(self)
        } else {
            self.next_business_day()
        }
    }
}

impl Sub for Date {
    type Output = i64;

    /// Signed number of days from `other` to `self`.
    fn sub(self, other: Self) -> i64 {
        (self.0 - other.0).num_days()
    }
}

impl FromStr for Date {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, DateError> {
        Date::parse(s)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// A reference month, used to look up monthly price index values.
///
/// # Examples
///
/// ```
/// use pricer_core::types::time::YearMonth;
///
/// let oct = YearMonth::new(2014, 10).unwrap();
/// let next = oct.plus_months(3);
/// assert_eq!(next, YearMonth::new(2015, 1).unwrap());
/// assert_eq!(oct.months_until(next), 3);
/// assert_eq!(next.to_string(), "2015-01");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Creates a reference month.
    ///
    /// # Errors
    ///
    /// `DateError::InvalidDate` if `month` is not in 1..=12.
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        if !(1..=12).contains(&month) {
            return Err(DateError::InvalidDate {
                year,
                month,
                day: 1,
            });
        }
        Ok(Self { year, month })
    }

    /// Year component.
    #[inline]
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Month component (1-12).
    #[inline]
    pub fn month(&self) -> u32 {
        self.month
    }

    /// Months since year 0, used as a linear ordinal.
    #[inline]
    pub fn ordinal(&self) -> i64 {
        self.year as i64 * 12 + (self.month as i64 - 1)
    }

    /// Shifts by a signed number of months.
    pub fn plus_months(self, months: i64) -> Self {
        let ordinal = self.ordinal() + months;
        Self {
            year: ordinal.div_euclid(12) as i32,
            month: (ordinal.rem_euclid(12) + 1) as u32,
        }
    }

    /// Signed number of months from `self` to `other`.
    pub fn months_until(&self, other: YearMonth) -> i64 {
        other.ordinal() - self.ordinal()
    }

    /// First day of the month.
    pub fn first_day(&self) -> Result<Date, DateError> {
        Date::from_ymd(self.year, self.month, 1)
    }
}

impl FromStr for YearMonth {
    type Err = DateError;

    /// Parses `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, DateError> {
        let (y, m) = s
            .split_once('-')
            .ok_or_else(|| DateError::ParseError(format!("expected YYYY-MM: {}", s)))?;
        let year = y
            .parse::<i32>()
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))?;
        let month = m
            .parse::<u32>()
            .map_err(|e| DateError::ParseError(format!("{}: {}", s, e)))?;
        YearMonth::new(year, month)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Day count convention.
///
/// Year fractions are signed: reversing the dates flips the sign.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DayCountConvention {
    /// Actual days / 365, the ACT/365F convention.
    Act365F,
    /// Actual days / 360.
    Act360,
    /// 30/360 US bond basis.
    Thirty360,
}

impl DayCountConvention {
    /// Market name.
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Act365F => "ACT/365F",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Thirty360 => "30/360",
        }
    }

    /// Year fraction from `start` to `end`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::time::{Date, DayCountConvention};
    ///
    /// let start = Date::from_ymd(2024, 1, 31).unwrap();
    /// let end = Date::from_ymd(2024, 3, 31).unwrap();
    /// assert_eq!(DayCountConvention::Thirty360.year_fraction(start, end), 60.0 / 360.0);
    /// assert_eq!(DayCountConvention::Act365F.year_fraction(end, start), -60.0 / 365.0);
    /// ```
    pub fn year_fraction(&self, start: Date, end: Date) -> f64 {
        match self {
            DayCountConvention::Act365F => (end - start) as f64 / 365.0,
            DayCountConvention::Act360 => (end - start) as f64 / 360.0,
            DayCountConvention::Thirty360 => {
                let (a, b, sign) = if start <= end {
                    (start, end, 1.0)
                } else {
                    (end, start, -1.0)
                };
                let d1 = if a.day() == 31 { 30 } else { a.day() };
                let d2 = if b.day() == 31 && d1 == 30 { 30 } else { b.day() };
                let days = 360 * (b.year() - a.year())
                    + 30 * (b.month() as i32 - a.month() as i32)
                    + (d2 as i32 - d1 as i32);
                sign * days as f64 / 360.0
            }
        }
    }
}

impl FromStr for DayCountConvention {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace(['/', ' '], "").as_str() {
            "ACT365F" | "ACT365" | "A365F" => Ok(DayCountConvention::Act365F),
            "ACT360" | "A360" => Ok(DayCountConvention::Act360),
            "30360" | "THIRTY360" => Ok(DayCountConvention::Thirty360),
            _ => Err(DateError::ParseError(format!(
                "Unknown day count convention: {}",
                s
            ))),
        }
    }
}

impl fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::DayCountConvention;
    use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
    use std::str::FromStr;

    impl Serialize for DayCountConvention {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.name())
        }
    }

    impl<'de> Deserialize<'de> for DayCountConvention {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let s = String::deserialize(deserializer)?;
            DayCountConvention::from_str(&s).map_err(de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    // ========================================
    // Date
    // ========================================

    #[test]
    fn test_from_ymd_invalid() {
        assert_eq!(
            Date::from_ymd(2023, 2, 29),
            Err(DateError::InvalidDate {
                year: 2023,
                month: 2,
                day: 29
            })
        );
    }

    #[test]
    fn test_parse_and_display() {
        let d: Date = "2015-10-05".parse().unwrap();
        assert_eq!(d, date(2015, 10, 5));
        assert_eq!(d.to_string(), "2015-10-05");
        assert!(Date::parse("05/10/2015").is_err());
    }

    #[test]
    fn test_plus_days_negative_and_positive() {
        let d = date(2024, 3, 1);
        assert_eq!(d.plus_days(-1).unwrap(), date(2024, 2, 29));
        assert_eq!(d.plus_days(31).unwrap(), date(2024, 4, 1));
        assert_eq!(d.plus_days(0).unwrap(), d);
    }

    #[test]
    fn test_plus_months_clamps_end_of_month() {
        assert_eq!(date(2023, 1, 31).plus_months(1).unwrap(), date(2023, 2, 28));
        assert_eq!(date(2024, 3, 31).plus_months(-1).unwrap(), date(2024, 2, 29));
        assert_eq!(date(2024, 3, 15).plus_months(12).unwrap(), date(2025, 3, 15));
    }

    #[test]
    fn test_business_days_skip_weekends() {
        let friday = date(2024, 6, 14);
        let saturday = date(2024, 6, 15);
        let monday = date(2024, 6, 17);
        assert!(friday.is_business_day());
        assert!(!saturday.is_business_day());
        assert_eq!(friday.next_business_day().unwrap(), monday);
        assert_eq!(monday.previous_business_day().unwrap(), friday);
        assert_eq!(saturday.next_or_same_business_day().unwrap(), monday);
        assert_eq!(friday.next_or_same_business_day().unwrap(), friday);
    }

    #[test]
    fn test_year_month_of_date() {
        assert_eq!(date(2015, 10, 31).year_month(), YearMonth::new(2015, 10).unwrap());
    }

    // ========================================
    // YearMonth
    // ========================================

    #[test]
    fn test_year_month_validation() {
        assert!(YearMonth::new(2014, 0).is_err());
        assert!(YearMonth::new(2014, 13).is_err());
    }

    #[test]
    fn test_year_month_arithmetic_across_years() {
        let ym = YearMonth::new(2014, 11).unwrap();
        assert_eq!(ym.plus_months(2), YearMonth::new(2015, 1).unwrap());
        assert_eq!(ym.plus_months(-11), YearMonth::new(2013, 12).unwrap());
        assert_eq!(ym.months_until(YearMonth::new(2015, 11).unwrap()), 12);
        assert_eq!(ym.first_day().unwrap(), date(2014, 11, 1));
    }

    #[test]
    fn test_year_month_parse() {
        let ym: YearMonth = "2015-03".parse().unwrap();
        assert_eq!(ym, YearMonth::new(2015, 3).unwrap());
        assert!("2015".parse::<YearMonth>().is_err());
        assert!("2015-14".parse::<YearMonth>().is_err());
    }

    // ========================================
    // DayCountConvention
    // ========================================

    #[test]
    fn test_act_conventions() {
        let start = date(2024, 1, 1);
        let end = date(2025, 1, 1);
        assert_relative_eq!(
            DayCountConvention::Act365F.year_fraction(start, end),
            366.0 / 365.0
        );
        assert_relative_eq!(
            DayCountConvention::Act360.year_fraction(start, end),
            366.0 / 360.0
        );
    }

    #[test]
    fn test_thirty_360() {
        let yf = DayCountConvention::Thirty360.year_fraction(date(2024, 1, 15), date(2024, 7, 15));
        assert_relative_eq!(yf, 0.5);
        let yf = DayCountConvention::Thirty360.year_fraction(date(2024, 7, 15), date(2024, 1, 15));
        assert_relative_eq!(yf, -0.5);
    }

    #[test]
    fn test_day_count_parse() {
        assert_eq!(
            "act/365f".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act365F
        );
        assert_eq!(
            "ACT/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert!("BUS/252".parse::<DayCountConvention>().is_err());
        assert_eq!(DayCountConvention::Thirty360.to_string(), "30/360");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_day_count_serde_uses_market_name() {
        let json = serde_json::to_string(&DayCountConvention::Act360).unwrap();
        assert_eq!(json, "\"ACT/360\"");
        let back: DayCountConvention = serde_json::from_str("\"30/360\"").unwrap();
        assert_eq!(back, DayCountConvention::Thirty360);
        assert!(serde_json::from_str::<DayCountConvention>("\"BUS/252\"").is_err());
    }
}
