//! Rate observations: how the rate of one accrual period is determined.

use pricer_core::market_data::IborIndexObservation;
use pricer_core::types::{Currency, Date, OvernightIndex, PriceIndex, YearMonth};

use crate::instruments::error::{ensure_finite, InstrumentError};

/// Daily overnight fixings over `[start_date, end_date)`.
///
/// The last `rate_cut_off_days` fixings reuse the fixing observed that
/// many business days before the end; 0 and 1 leave every fixing as
/// observed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvernightRateObservation {
    index: OvernightIndex,
    start_date: Date,
    end_date: Date,
    rate_cut_off_days: u32,
}

impl OvernightRateObservation {
    /// Observation of `index` over `[start_date, end_date)`.
    ///
    /// # Errors
    ///
    /// `InstrumentError::InvalidPeriod` unless `start_date < end_date`.
    pub fn new(
        index: OvernightIndex,
        start_date: Date,
        end_date: Date,
        rate_cut_off_days: u32,
    ) -> Result<Self, InstrumentError> {
        if start_date >= end_date {
            return Err(InstrumentError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self {
            index,
            start_date,
            end_date,
            rate_cut_off_days,
        })
    }

    /// Observed index.
    #[inline]
    pub fn index(&self) -> OvernightIndex {
        self.index
    }

    /// First fixing date.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// End of the observation period, exclusive.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }

    /// Number of trailing fixings replaced by the cut-off fixing.
    #[inline]
    pub fn rate_cut_off_days(&self) -> u32 {
        self.rate_cut_off_days
    }
}

/// Price index ratio between two reference months.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InflationMonthlyObservation {
    index: PriceIndex,
    start_month: YearMonth,
    end_month: YearMonth,
}

impl InflationMonthlyObservation {
    /// Observation of `index` from `start_month` to `end_month`.
    ///
    /// # Errors
    ///
    /// `InstrumentError::InvalidParameter` unless `start_month < end_month`.
    pub fn new(index: PriceIndex, start_month: YearMonth, end_month: YearMonth) -> Result<Self, InstrumentError> {
        if start_month >= end_month {
            return Err(InstrumentError::InvalidParameter {
                message: format!("reference month {} not before {}", start_month, end_month),
            });
        }
        Ok(Self {
            index,
            start_month,
            end_month,
        })
    }

    /// Observed index.
    #[inline]
    pub fn index(&self) -> PriceIndex {
        self.index
    }

    /// Start reference month.
    #[inline]
    pub fn start_month(&self) -> YearMonth {
        self.start_month
    }

    /// End reference month.
    #[inline]
    pub fn end_month(&self) -> YearMonth {
        self.end_month
    }
}

/// Price index ratio with each reference level interpolated between a
/// month and the following one.
///
/// The reference level at month `m` is `w * I(m) + (1 - w) * I(m + 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InflationInterpolatedObservation {
    index: PriceIndex,
    start_month: YearMonth,
    end_month: YearMonth,
    weight: f64,
}

impl InflationInterpolatedObservation {
    /// Observation of `index` from `start_month` to `end_month` with
    /// interpolation weight `weight` on the earlier month.
    ///
    /// # Errors
    ///
    /// `InstrumentError::InvalidParameter` unless `start_month < end_month`
    /// and `weight` lies in `[0, 1]`.
    pub fn new(
        index: PriceIndex,
        start_month: YearMonth,
        end_month: YearMonth,
        weight: f64,
    ) -> Result<Self, InstrumentError> {
        if start_month >= end_month {
            return Err(InstrumentError::InvalidParameter {
                message: format!("reference month {} not before {}", start_month, end_month),
            });
        }
        if !(0.0..=1.0).contains(&weight) {
            return Err(InstrumentError::InvalidParameter {
                message: format!("interpolation weight {} outside [0, 1]", weight),
            });
        }
        Ok(Self {
            index,
            start_month,
            end_month,
            weight,
        })
    }

    /// Observed index.
    #[inline]
    pub fn index(&self) -> PriceIndex {
        self.index
    }

    /// Start reference month.
    #[inline]
    pub fn start_month(&self) -> YearMonth {
        self.start_month
    }

    /// Month following the start reference month.
    #[inline]
    pub fn start_second_month(&self) -> YearMonth {
        self.start_month.plus_months(1)
    }

    /// End reference month.
    #[inline]
    pub fn end_month(&self) -> YearMonth {
        self.end_month
    }

    /// Month following the end reference month.
    #[inline]
    pub fn end_second_month(&self) -> YearMonth {
        self.end_month.plus_months(1)
    }

    /// Weight on the earlier month of each pair.
    #[inline]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// How the rate of an accrual period is observed.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::{OvernightRateObservation, RateObservation};
/// use pricer_core::types::{Currency, Date, OvernightIndex};
///
/// let obs = RateObservation::OvernightCompounded(
///     OvernightRateObservation::new(
///         OvernightIndex::Sonia,
///         Date::from_ymd(2014, 1, 6).unwrap(),
///         Date::from_ymd(2014, 2, 5).unwrap(),
///         0,
///     )
///     .unwrap(),
/// );
/// assert_eq!(obs.currency(), Some(Currency::GBP));
/// assert_eq!(RateObservation::fixed(0.02).unwrap().currency(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateObservation {
    /// Known rate.
    Fixed {
        /// The rate
        rate: f64,
    },
    /// Single term index fixing.
    Ibor(IborIndexObservation),
    /// Daily overnight fixings compounded over the period.
    OvernightCompounded(OvernightRateObservation),
    /// Daily overnight fixings averaged over the period.
    OvernightAveraged(OvernightRateObservation),
    /// Price index ratio between two months, less one.
    InflationMonthly(InflationMonthlyObservation),
    /// Interpolated price index ratio, less one.
    InflationInterpolated(InflationInterpolatedObservation),
}

impl RateObservation {
    /// Fixed rate observation.
    ///
    /// # Errors
    ///
    /// `InstrumentError::NonFinite` for a NaN or infinite rate.
    pub fn fixed(rate: f64) -> Result<Self, InstrumentError> {
        Ok(RateObservation::Fixed {
            rate: ensure_finite("rate", rate)?,
        })
    }

    /// Currency of the observed index; `None` for a fixed rate.
    pub fn currency(&self) -> Option<Currency> {
        match self {
            RateObservation::Fixed { .. } => None,
            RateObservation::Ibor(obs) => Some(obs.index().currency()),
            RateObservation::OvernightCompounded(obs) | RateObservation::OvernightAveraged(obs) => {
                Some(obs.index().currency())
            }
            RateObservation::InflationMonthly(obs) => Some(obs.index().currency()),
            RateObservation::InflationInterpolated(obs) => Some(obs.index().currency()),
        }
    }

    /// Short name of the observation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            RateObservation::Fixed { .. } => "Fixed",
            RateObservation::Ibor(_) => "Ibor",
            RateObservation::OvernightCompounded(_) => "OvernightCompounded",
            RateObservation::OvernightAveraged(_) => "OvernightAveraged",
            RateObservation::InflationMonthly(_) => "InflationMonthly",
            RateObservation::InflationInterpolated(_) => "InflationInterpolated",
        }
    }
}
