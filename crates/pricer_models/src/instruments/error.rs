//! Instrument error types.
//!
//! This module provides structured error handling for the validated
//! constructors of periods, legs and swaps.

use pricer_core::types::{Currency, Date, DateError};
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Instrument construction errors.
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::NonFinite { field: "spread", value: f64::NAN };
/// assert!(format!("{}", err).contains("spread"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Period does not end after it starts.
    #[error("Invalid period: start {start} is not before end {end}")]
    InvalidPeriod {
        /// Start date
        start: Date,
        /// End date
        end: Date,
    },

    /// Negative or non-finite year fraction.
    #[error("Invalid year fraction: {value}")]
    InvalidYearFraction {
        /// The invalid year fraction
        value: f64,
    },

    /// A numeric field is NaN or infinite.
    #[error("Non-finite {field}: {value}")]
    NonFinite {
        /// Field name
        field: &'static str,
        /// The invalid value
        value: f64,
    },

    /// Accrual periods are not contiguous.
    #[error("Accrual period {index} starts on {start}, previous ends on {previous_end}")]
    NonContiguousAccrual {
        /// Index of the offending accrual period
        index: usize,
        /// End of the previous accrual period
        previous_end: Date,
        /// Start of the offending accrual period
        start: Date,
    },

    /// A collection that must be non-empty is empty.
    #[error("{what} must not be empty")]
    Empty {
        /// What is empty
        what: &'static str,
    },

    /// Flows of one leg use different currencies.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Leg currency
        expected: Currency,
        /// Offending currency
        found: Currency,
    },

    /// Signed notional or amount disagrees with the pay/receive flag.
    #[error("Sign of {value} does not agree with {direction} leg")]
    SignMismatch {
        /// Pay or receive
        direction: &'static str,
        /// The signed value
        value: f64,
    },

    /// Invalid parameter (general validation failure).
    #[error("Invalid parameter: {message}")]
    InvalidParameter {
        /// Description of the parameter error
        message: String,
    },

    /// Schedule error while resolving a leg.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),

    /// Date arithmetic error while resolving a leg.
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}

/// Fails with [`InstrumentError::NonFinite`] unless `value` is finite.
pub(crate) fn ensure_finite(field: &'static str, value: f64) -> Result<f64, InstrumentError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InstrumentError::NonFinite { field, value })
    }
}
