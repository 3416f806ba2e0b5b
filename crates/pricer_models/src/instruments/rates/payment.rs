//! Payment periods: the coupon flows of a swap leg.

use std::fmt;

use pricer_core::types::{Currency, CurrencyAmount, Date, DayCountConvention};

use super::accrual::RateAccrualPeriod;
use crate::instruments::error::{ensure_finite, InstrumentError};

/// How the accrual periods of one payment period combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CompoundingMethod {
    /// Simple sum of the accruals.
    #[default]
    None,
    /// Compounding of the full effective rate.
    Straight,
    /// Compounding of the raw rate only; spread accrues without compounding.
    Flat,
    /// Compounding excluding spread, which is added separately.
    SpreadExclusive,
}

impl fmt::Display for CompoundingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CompoundingMethod::None => "None",
            CompoundingMethod::Straight => "Straight",
            CompoundingMethod::Flat => "Flat",
            CompoundingMethod::SpreadExclusive => "SpreadExclusive",
        };
        write!(f, "{}", name)
    }
}

/// A payment made of one or more accrual periods of a floating or fixed rate.
///
/// # Example
///
/// ```
/// use pricer_models::instruments::rates::{
///     CompoundingMethod, RateAccrualPeriod, RateObservation, RatePaymentPeriod,
/// };
/// use pricer_core::types::{Currency, Date, DayCountConvention};
///
/// let start = Date::from_ymd(2024, 1, 2).unwrap();
/// let end = Date::from_ymd(2024, 7, 2).unwrap();
/// let accrual = RateAccrualPeriod::new(start, end, 0.5, RateObservation::fixed(0.03).unwrap()).unwrap();
///
/// let period = RatePaymentPeriod::new(
///     end,
///     vec![accrual],
///     DayCountConvention::Act360,
///     Currency::USD,
///     1_000_000.0,
///     CompoundingMethod::None,
/// )
/// .unwrap();
/// assert_eq!(period.start_date(), start);
/// assert_eq!(period.end_date(), end);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RatePaymentPeriod {
    payment_date: Date,
    accrual_periods: Vec<RateAccrualPeriod>,
    day_count: DayCountConvention,
    currency: Currency,
    notional: f64,
    compounding_method: CompoundingMethod,
}

impl RatePaymentPeriod {
    /// Validated rate payment period.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::Empty` without accrual periods
    /// - `InstrumentError::NonContiguousAccrual` when an accrual period does
    ///   not start where the previous one ends
    /// - `InstrumentError::NonFinite` for a NaN or infinite notional
    pub fn new(
        payment_date: Date,
        accrual_periods: Vec<RateAccrualPeriod>,
        day_count: DayCountConvention,
        currency: Currency,
        notional: f64,
        compounding_method: CompoundingMethod,
    ) -> Result<Self, InstrumentError> {
        if accrual_periods.is_empty() {
            return Err(InstrumentError::Empty {
                what: "accrual periods",
            });
        }
        for (index, pair) in accrual_periods.windows(2).enumerate() {
            if pair[1].start_date() != pair[0].end_date() {
                return Err(InstrumentError::NonContiguousAccrual {
                    index: index + 1,
                    previous_end: pair[0].end_date(),
                    start: pair[1].start_date(),
                });
            }
        }
        Ok(Self {
            payment_date,
            accrual_periods,
            day_count,
            currency,
            notional: ensure_finite("notional", notional)?,
            compounding_method,
        })
    }

    /// Payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Accrual periods, in date order.
    #[inline]
    pub fn accrual_periods(&self) -> &[RateAccrualPeriod] {
        &self.accrual_periods
    }

    /// Day count used to re-accrue a truncated period.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Payment currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Signed notional; negative when paid.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Compounding method.
    #[inline]
    pub fn compounding_method(&self) -> CompoundingMethod {
        self.compounding_method
    }

    /// Whether more than one accrual period is compounded.
    #[inline]
    pub fn is_compounding(&self) -> bool {
        self.accrual_periods.len() > 1 && self.compounding_method != CompoundingMethod::None
    }

    /// Start of the first accrual period.
    pub fn start_date(&self) -> Date {
        self.accrual_periods[0].start_date()
    }

    /// End of the last accrual period.
    pub fn end_date(&self) -> Date {
        self.accrual_periods[self.accrual_periods.len() - 1].end_date()
    }

    /// Copy of the period with replaced accrual periods, validated again.
    ///
    /// # Errors
    ///
    /// Same as [`new`](RatePaymentPeriod::new).
    pub fn with_accrual_periods(&self, accrual_periods: Vec<RateAccrualPeriod>) -> Result<Self, InstrumentError> {
        Self::new(
            self.payment_date,
            accrual_periods,
            self.day_count,
            self.currency,
            self.notional,
            self.compounding_method,
        )
    }
}

/// A payment of a known amount for an accrual interval.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KnownAmountPaymentPeriod {
    payment: CurrencyAmount,
    payment_date: Date,
    start_date: Date,
    end_date: Date,
}

impl KnownAmountPaymentPeriod {
    /// Known amount paid on `payment_date` for `[start_date, end_date)`.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::InvalidPeriod` unless `start_date < end_date`
    /// - `InstrumentError::NonFinite` for a NaN or infinite amount
    pub fn new(
        payment: CurrencyAmount,
        payment_date: Date,
        start_date: Date,
        end_date: Date,
    ) -> Result<Self, InstrumentError> {
        if start_date >= end_date {
            return Err(InstrumentError::InvalidPeriod {
                start: start_date,
                end: end_date,
            });
        }
        ensure_finite("amount", payment.amount())?;
        Ok(Self {
            payment,
            payment_date,
            start_date,
            end_date,
        })
    }

    /// Signed amount paid.
    #[inline]
    pub fn payment(&self) -> CurrencyAmount {
        self.payment
    }

    /// Payment date.
    #[inline]
    pub fn payment_date(&self) -> Date {
        self.payment_date
    }

    /// Accrual start.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.start_date
    }

    /// Accrual end.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.end_date
    }
}

/// One coupon flow of a leg.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaymentPeriod {
    /// Amount derived from observed rates.
    Rate(RatePaymentPeriod),
    /// Amount fixed at trade time.
    KnownAmount(KnownAmountPaymentPeriod),
}

impl PaymentPeriod {
    /// Payment date.
    pub fn payment_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.payment_date(),
            PaymentPeriod::KnownAmount(p) => p.payment_date(),
        }
    }

    /// Payment currency.
    pub fn currency(&self) -> Currency {
        match self {
            PaymentPeriod::Rate(p) => p.currency(),
            PaymentPeriod::KnownAmount(p) => p.payment().currency(),
        }
    }

    /// Accrual start.
    pub fn start_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.start_date(),
            PaymentPeriod::KnownAmount(p) => p.start_date(),
        }
    }

    /// Accrual end.
    pub fn end_date(&self) -> Date {
        match self {
            PaymentPeriod::Rate(p) => p.end_date(),
            PaymentPeriod::KnownAmount(p) => p.end_date(),
        }
    }

    /// Signed notional of a rate period or signed amount of a known one.
    pub fn signed_value(&self) -> f64 {
        match self {
            PaymentPeriod::Rate(p) => p.notional(),
            PaymentPeriod::KnownAmount(p) => p.payment().amount(),
        }
    }
}

impl From<RatePaymentPeriod> for PaymentPeriod {
    fn from(period: RatePaymentPeriod) -> Self {
        PaymentPeriod::Rate(period)
    }
}

impl From<KnownAmountPaymentPeriod> for PaymentPeriod {
    fn from(period: KnownAmountPaymentPeriod) -> Self {
        PaymentPeriod::KnownAmount(period)
    }
}
