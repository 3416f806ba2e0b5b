//! Error types for the foundation types.
//!
//! - [`DateError`]: date construction and parsing failures
//! - [`CurrencyError`]: currency parsing and FX pair failures
//! - [`InterpolationError`]: interpolator construction and lookup failures

use thiserror::Error;

use super::currency::Currency;

/// Date construction and parsing errors.
///
/// # Examples
///
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(err.to_string(), "Invalid date: 2024-02-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Year, month and day do not form a calendar date.
    #[error("Invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component
        month: u32,
        /// Day component
        day: u32,
    },

    /// Date arithmetic left the supported range.
    #[error("Date out of range: {0}")]
    OutOfRange(String),

    /// String could not be parsed as an ISO 8601 date or year-month.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Currency and currency-pair errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurrencyError {
    /// Unknown ISO 4217 code.
    #[error("Unknown currency: {0}")]
    UnknownCurrency(String),

    /// A pair was built from a single currency.
    #[error("Currency pair must contain two distinct currencies: {0}")]
    SameCurrency(String),

    /// Arithmetic between amounts in different currencies.
    #[error("Currency mismatch: expected {expected}, found {found}")]
    Mismatch {
        /// Currency of the left operand
        expected: Currency,
        /// Currency of the right operand
        found: Currency,
    },

    /// FX quote is not strictly positive and finite.
    #[error("Invalid FX rate for {pair}: {rate}")]
    InvalidRate {
        /// Pair code, e.g. "EUR/USD"
        pair: String,
        /// Offending quote
        rate: f64,
    },
}

/// Interpolation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InterpolationError {
    /// Query point outside the interpolation domain.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// Query point
        x: f64,
        /// Domain minimum
        min: f64,
        /// Domain maximum
        max: f64,
    },

    /// Fewer data points than the method needs.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Points supplied
        got: usize,
        /// Points required
        need: usize,
    },

    /// x-coordinates not strictly increasing.
    #[error("Non-monotonic data at index {index}")]
    NonMonotonicData {
        /// First offending index
        index: usize,
    },

    /// Any other malformed input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_error_display() {
        let err = DateError::InvalidDate {
            year: 2023,
            month: 2,
            day: 29,
        };
        assert_eq!(format!("{}", err), "Invalid date: 2023-02-29");
        assert_eq!(
            DateError::ParseError("bad".to_string()).to_string(),
            "Date parse error: bad"
        );
    }

    #[test]
    fn test_currency_error_display() {
        let err = CurrencyError::InvalidRate {
            pair: "EUR/USD".to_string(),
            rate: -1.0,
        };
        assert_eq!(err.to_string(), "Invalid FX rate for EUR/USD: -1");
        assert_eq!(
            CurrencyError::UnknownCurrency("XYZ".to_string()).to_string(),
            "Unknown currency: XYZ"
        );
    }

    #[test]
    fn test_interpolation_error_display() {
        let err = InterpolationError::OutOfBounds {
            x: 5.0,
            min: 0.0,
            max: 3.0,
        };
        assert_eq!(err.to_string(), "Out of bounds: 5 not in [0, 3]");
        let err = InterpolationError::NonMonotonicData { index: 2 };
        assert_eq!(err.to_string(), "Non-monotonic data at index 2");
    }
}
