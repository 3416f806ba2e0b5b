//! Single-fixing index observations.
//!
//! An observation pins an index to a fixing date and the deposit period
//! the fixed rate applies to. Rates providers price observations; rate
//! observations of instruments are built from them.

use crate::types::{Date, DateError, IborIndex, OvernightIndex};

/// Observation of a term index on a fixing date.
///
/// The deposit starts on the fixing date and runs for the index tenor.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::IborIndexObservation;
/// use pricer_core::types::{Date, IborIndex};
///
/// let fixing = Date::from_ymd(2024, 3, 15).unwrap();
/// let obs = IborIndexObservation::new(IborIndex::Euribor3M, fixing).unwrap();
/// assert_eq!(obs.maturity_date(), Date::from_ymd(2024, 6, 15).unwrap());
/// assert!((obs.year_fraction() - 92.0 / 360.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IborIndexObservation {
    index: IborIndex,
    fixing_date: Date,
    maturity_date: Date,
    year_fraction: f64,
}

impl IborIndexObservation {
    /// Observation of `index` fixing on `fixing_date`.
    pub fn new(index: IborIndex, fixing_date: Date) -> Result<Self, DateError> {
        let maturity_date = fixing_date.plus_months(index.tenor_months())?;
        Ok(Self {
            index,
            fixing_date,
            maturity_date,
            year_fraction: index.day_count().year_fraction(fixing_date, maturity_date),
        })
    }

    /// Observed index.
    #[inline]
    pub fn index(&self) -> IborIndex {
        self.index
    }

    /// Fixing date; also the deposit start.
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Deposit start.
    #[inline]
    pub fn effective_date(&self) -> Date {
        self.fixing_date
    }

    /// Deposit end.
    #[inline]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Deposit accrual in the index day count.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }
}

/// Observation of an overnight index on a fixing date.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::OvernightIndexObservation;
/// use pricer_core::types::{Date, OvernightIndex};
///
/// // Friday fixing accrues over the weekend
/// let friday = Date::from_ymd(2024, 6, 14).unwrap();
/// let obs = OvernightIndexObservation::new(OvernightIndex::Sofr, friday).unwrap();
/// assert_eq!(obs.maturity_date(), Date::from_ymd(2024, 6, 17).unwrap());
/// assert!((obs.year_fraction() - 3.0 / 360.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OvernightIndexObservation {
    index: OvernightIndex,
    fixing_date: Date,
    maturity_date: Date,
    year_fraction: f64,
}

impl OvernightIndexObservation {
    /// Observation of `index` fixing on `fixing_date`, accruing to the
    /// next business day.
    pub fn new(index: OvernightIndex, fixing_date: Date) -> Result<Self, DateError> {
        let maturity_date = fixing_date.next_business_day()?;
        Ok(Self::with_maturity(index, fixing_date, maturity_date))
    }

    /// Observation accruing from `fixing_date` to an explicit end.
    pub fn with_maturity(index: OvernightIndex, fixing_date: Date, maturity_date: Date) -> Self {
        Self {
            index,
            fixing_date,
            maturity_date,
            year_fraction: index.day_count().year_fraction(fixing_date, maturity_date),
        }
    }

    /// Observed index.
    #[inline]
    pub fn index(&self) -> OvernightIndex {
        self.index
    }

    /// Fixing date; also the accrual start.
    #[inline]
    pub fn fixing_date(&self) -> Date {
        self.fixing_date
    }

    /// Accrual end.
    #[inline]
    pub fn maturity_date(&self) -> Date {
        self.maturity_date
    }

    /// Accrual in the index day count.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.year_fraction
    }
}
