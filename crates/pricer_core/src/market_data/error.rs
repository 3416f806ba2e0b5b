//! Market data error types.
//!
//! Lookups against a rates provider fail with [`MarketDataError`]. The
//! missing-data variants are never defaulted: callers propagate them.

use crate::market_data::curves::CurveId;
use crate::types::{Currency, Date, DateError, InterpolationError, YearMonth};
use thiserror::Error;

/// Market data operation errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
/// use pricer_core::types::Currency;
///
/// let err = MarketDataError::MissingFxRate { from: Currency::EUR, to: Currency::JPY };
/// assert!(err.is_missing_data());
/// assert_eq!(err.to_string(), "FX rate not available: EUR/JPY");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// No curve registered under the identifier.
    #[error("Curve not found: {curve}")]
    CurveNotFound {
        /// Requested curve
        curve: CurveId,
    },

    /// A fixing required for a past date has not been supplied.
    #[error("Fixing not available for {index} on {date}")]
    MissingFixing {
        /// Index name
        index: String,
        /// Fixing date
        date: Date,
    },

    /// No direct, inverse or triangulated FX quote.
    #[error("FX rate not available: {from}/{to}")]
    MissingFxRate {
        /// Source currency
        from: Currency,
        /// Target currency
        to: Currency,
    },

    /// Price index level neither published nor projectable.
    #[error("Price index value not available for {index} in {month}")]
    MissingInflationValue {
        /// Index name
        index: String,
        /// Reference month
        month: YearMonth,
    },

    /// Two providers being combined disagree on the valuation date.
    #[error("Valuation dates differ: {first} and {second}")]
    ValuationDateMismatch {
        /// Valuation date of the first provider
        first: Date,
        /// Valuation date of the second provider
        second: Date,
    },

    /// Negative time to maturity.
    #[error("Invalid maturity: t = {t}")]
    InvalidMaturity {
        /// The invalid maturity value
        t: f64,
    },

    /// Query point outside a curve that does not extrapolate.
    #[error("Out of bounds: {x} not in [{min}, {max}]")]
    OutOfBounds {
        /// The query point that was out of bounds
        x: f64,
        /// Minimum valid value
        min: f64,
        /// Maximum valid value
        max: f64,
    },

    /// Curve parameter index outside the curve.
    #[error("Parameter index {index} out of range for curve with {count} parameters")]
    InvalidParameterIndex {
        /// Requested index
        index: usize,
        /// Number of curve parameters
        count: usize,
    },

    /// Insufficient data for construction.
    #[error("Insufficient data: got {got}, need {need}")]
    InsufficientData {
        /// Number of points provided
        got: usize,
        /// Minimum number of points required
        need: usize,
    },

    /// Interpolation error.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] InterpolationError),

    /// Date arithmetic failure while resolving an observation.
    #[error("Date error: {0}")]
    Date(#[from] DateError),
}

impl MarketDataError {
    /// Whether the error reports data absent from the provider, as
    /// opposed to malformed data. Combined providers fall back only on
    /// missing data.
    pub fn is_missing_data(&self) -> bool {
        matches!(
            self,
            MarketDataError::CurveNotFound { .. }
                | MarketDataError::MissingFixing { .. }
                | MarketDataError::MissingFxRate { .. }
                | MarketDataError::MissingInflationValue { .. }
        )
    }
}
