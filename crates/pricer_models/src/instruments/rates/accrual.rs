//! Accrual periods: one rate observation over one sub-interval of a payment.

use std::fmt;

use pricer_core::types::Date;

use super::observation::RateObservation;
use crate::instruments::error::{ensure_finite, InstrumentError};

/// Treatment of a negative effective rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NegativeRateMethod {
    /// Negative rates accrue as observed.
    #[default]
    AllowNegative,
    /// The geared and spread rate is floored at zero.
    NotNegative,
}

impl NegativeRateMethod {
    /// Applies the method to an effective rate.
    #[inline]
    pub fn adjust(&self, rate: f64) -> f64 {
        match self {
            NegativeRateMethod::AllowNegative => rate,
            NegativeRateMethod::NotNegative => rate.max(0.0),
        }
    }
}

impl fmt::Display for NegativeRateMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NegativeRateMethod::AllowNegative => write!(f, "AllowNegative"),
            NegativeRateMethod::NotNegative => write!(f, "NotNegative"),
        }
    }
}

/// One accrual sub-period of a rate payment.
///
/// The effective rate is `observed * gearing + spread`, floored at zero
/// under [`NegativeRateMethod::NotNegative`].
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::{NegativeRateMethod, RateAccrualPeriod, RateObservation};
/// use pricer_core::types::Date;
///
/// let period = RateAccrualPeriod::new(
///     Date::from_ymd(2024, 1, 2).unwrap(),
///     Date::from_ymd(2024, 7, 2).unwrap(),
///     0.5,
///     RateObservation::fixed(0.03).unwrap(),
/// )
/// .unwrap()
/// .with_spread(0.001)
/// .unwrap();
///
/// assert_eq!(period.gearing(), 1.0);
/// assert_eq!(period.negative_rate_method(), NegativeRateMethod::AllowNegative);
/// assert!((period.effective_rate(0.03) - 0.031).abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RateAccrualPeriod {
    start_date: Date,
    end_date: Date,
    unadjusted_start_date: Date,
    unadjusted_end_date: Date,
    year_fraction: f64,
    observation: RateObservation,
    gearing: f64,
    spread: f64,
    negative_rate_method: NegativeRateMethod,
}

impl RateAccrualPeriod {
    /// Accrual period with unit gearing, no spread and negative rates allowed.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::InvalidPeriod` unless `start_date < end_date`
    /// - `InstrumentError::InvalidYearFraction` for a negative or
    ///   non-finite year fraction
    pub fn new(
        start_date: Date,
        end_date: Date,
        year_fraction: f64,
        observation: RateObservation,
    ) -> Result<Self, InstrumentError> {
        if start_date >= end_date {
            return Err(InstrumentError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        if !year_fraction.is_finite() || year_fraction < 0.0 {
            return Err(InstrumentError::InvalidYearFraction {
                value: year_fraction,
            });
        }
        Ok(Self {
            start_date,
            end_date,
            unadjusted_start_date: start_date,
            unadjusted_end_date: end_date,
            year_fraction,
            observation,
            gearing: 1.0,
            spread: 0.0,
            negative_rate_method: NegativeRateMethod::AllowNegative,
        })
    }

    /// Sets the unadjusted schedule dates.
    ///
    /// # Errors
    ///
    /// `InstrumentError::InvalidPeriod` unless `start < end`.
    pub fn with_unadjusted(mut self, start: Date, end: Date) -> Result<Self, InstrumentError> {
        if start >= end {
            return Err(InstrumentError::InvalidPeriod { start, end });
        }
        self.unadjusted_start_date = start;
        self.unadjusted_end_date = end;
        Ok(self)
    }

    /// Sets the gearing.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFinite` for a NaN or infinite gearing.
    pub fn with_gearing(mut self, gearing: f64) -> Result<Self, InstrumentError> {
        self.gearing = ensure_finite("gearing", gearing)?;
        Ok(self)
    }

    /// Sets the spread.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFinite` for a NaN or infinite spread.
    pub fn with_spread(mut self, spread: f64) -> Result<Self, InstrumentError> {
        self.spread = ensure_finite("spread", spread)?;
        Ok(self)
    }

    /// Sets the negative rate method.
    pub fn with_negative_rate_method(mut self, method: NegativeRateMethod) -> Self {
        self.negative_rate_method = method;
        self
    }

    /// Copy of the period ending on `end_date`, with a new year fraction.
    ///
    /// Used to truncate the period in progress when computing accrued
    /// interest; the unadjusted end moves with it.
    ///
    /// # Errors
    ///
    /// Same as [`new`](RateAccrualPeriod::new).
    pub fn truncated(&self, end_date: Date, year_fraction: f64) -> Result<Self, InstrumentError> {
        let mut period = Self::new(self.start_date, end_date, year_fraction, self.observation)?;
        period.unadjusted_start_date = self.unadjusted_start_date;
        period.gearing = self.gearing;
        period.spread = self.spread;
        period.negative_rate_method = self.negative_rate_method;
        Ok(period)
    }

    /// Adjusted start date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Adjusted end date.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Unadjusted start date.
    #[inline]
    pub fn unadjusted_start_date(&self) -> Date {
        self.unadjusted_start_date
    }

    /// Unadjusted end date.
    #[inline]
    pub fn unadjusted_end_date(&self) -> Date {
        self.unadjusted_end_date
    }

    /// Year fraction of the accrual.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }

    /// Rate observation.
    #[inline]
    pub fn observation(&self) -> &RateObservation {
        &self.observation
    }

    /// Gearing applied to the observed rate.
    #[inline]
    pub fn gearing(&self) -> f64 {
        self.gearing
    }

    /// Spread added after gearing.
    #[inline]
    pub fn spread(&self) -> f64 {
        self.spread
    }

    /// Negative rate method.
    #[inline]
    pub fn negative_rate_method(&self) -> NegativeRateMethod {
        self.negative_rate_method
    }

    /// `observed * gearing + spread`, adjusted by the negative rate method.
    #[inline]
    pub fn effective_rate(&self, observed: f64) -> f64 {
        self.negative_rate_method
            .adjust(observed * self.gearing + self.spread)
    }

    /// Derivative of [`effective_rate`](RateAccrualPeriod::effective_rate)
    /// with respect to the observed rate; zero at or below the floor.
    #[inline]
    pub fn effective_rate_derivative(&self, observed: f64) -> f64 {
        match self.negative_rate_method {
            NegativeRateMethod::AllowNegative => self.gearing,
            NegativeRateMethod::NotNegative => {
                if observed * self.gearing + self.spread > 0.0 {
                    self.gearing
                } else {
                    0.0
                }
            }
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

    fn fixed_period() -> RateAccrualPeriod {
        RateAccrualPeriod::new(
            date(2024, 1, 2),
            date(2024, 4, 2),
            0.25,
            RateObservation::fixed(0.02).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_new_validation() {
        let obs = RateObservation::fixed(0.02).unwrap();
        assert!(matches!(
            RateAccrualPeriod::new(date(2024, 4, 2), date(2024, 1, 2), 0.25, obs),
            Err(InstrumentError::InvalidPeriod { .. })
        ));
        assert!(matches!(
            RateAccrualPeriod::new(date(2024, 1, 2), date(2024, 4, 2), -0.25, obs),
            Err(InstrumentError::InvalidYearFraction { .. })
        ));
        assert!(RateAccrualPeriod::new(date(2024, 1, 2), date(2024, 4, 2), f64::NAN, obs).is_err());
        assert!(fixed_period().with_spread(f64::INFINITY).is_err());
        assert!(fixed_period().with_gearing(f64::NAN).is_err());
    }

    #[test]
    fn test_defaults() {
        let period = fixed_period();
        assert_eq!(period.gearing(), 1.0);
        assert_eq!(period.spread(), 0.0);
        assert_eq!(period.unadjusted_start_date(), date(2024, 1, 2));
        assert_eq!(period.unadjusted_end_date(), date(2024, 4, 2));
    }

    #[test]
    fn test_not_negative_floor_and_dead_zone() {
        let period = fixed_period()
            .with_gearing(2.0)
            .unwrap()
            .with_spread(-0.01)
            .unwrap()
            .with_negative_rate_method(NegativeRateMethod::NotNegative);
        assert_relative_eq!(period.effective_rate(0.02), 0.03);
        assert_eq!(period.effective_rate_derivative(0.02), 2.0);
        assert_eq!(period.effective_rate(0.004), 0.0);
        assert_eq!(period.effective_rate_derivative(0.004), 0.0);
        // exactly at the floor
        assert_eq!(period.effective_rate_derivative(0.005), 0.0);
    }

    #[test]
    fn test_truncated_keeps_terms() {
        let period = fixed_period().with_spread(0.001).unwrap();
        let cut = period.truncated(date(2024, 2, 2), 31.0 / 360.0).unwrap();
        assert_eq!(cut.end_date(), date(2024, 2, 2));
        assert_eq!(cut.spread(), 0.001);
        assert_eq!(cut.observation(), period.observation());
        assert!(period.truncated(date(2024, 1, 2), 0.0).is_err());
    }
}
