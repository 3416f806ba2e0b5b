//! Error types for swap valuation.

use pricer_core::market_data::MarketDataError;
use pricer_models::instruments::InstrumentError;
use thiserror::Error;

/// Swap valuation error.
///
/// Market data failures propagate unchanged; nothing is defaulted.
///
/// # Examples
///
/// ```
/// use pricer_pricing::rates::SwapPricingError;
///
/// let err = SwapPricingError::precondition("PVBP of a known amount")
///     .in_period(3)
///     .in_leg(1);
/// assert_eq!(
///     err.to_string(),
///     "Precondition failed on leg 1, period 3: PVBP of a known amount"
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SwapPricingError {
    /// Required market data is missing or invalid.
    #[error("Market data error: {0}")]
    MarketData(#[from] MarketDataError),

    /// The instrument does not satisfy the precondition of the calculation.
    #[error("Precondition failed on leg {leg}, period {period}: {reason}")]
    Precondition {
        /// Index of the leg within the swap
        leg: usize,
        /// Index of the payment period within the leg
        period: usize,
        /// What failed
        reason: String,
    },

    /// Calculation not implemented for the instrument shape.
    #[error("Unsupported: {0}")]
    Unsupported(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Instrument rebuilt during valuation failed validation.
    #[error("Instrument error: {0}")]
    Instrument(#[from] InstrumentError),
}

impl SwapPricingError {
    /// Precondition failure located at leg 0, period 0; callers relocate
    /// it with [`in_leg`](SwapPricingError::in_leg) and
    /// [`in_period`](SwapPricingError::in_period).
    pub fn precondition(reason: impl Into<String>) -> Self {
        SwapPricingError::Precondition {
            leg: 0,
            period: 0,
            reason: reason.into(),
        }
    }

    /// Sets the leg index of a precondition failure.
    pub fn in_leg(self, index: usize) -> Self {
        match self {
            SwapPricingError::Precondition { period, reason, .. } => SwapPricingError::Precondition {
                leg: index,
                period,
                reason,
            },
            other => other,
        }
    }

    /// Sets the period index of a precondition failure.
    pub fn in_period(self, index: usize) -> Self {
        match self {
            SwapPricingError::Precondition { leg, reason, .. } => SwapPricingError::Precondition {
                leg,
                period: index,
                reason,
            },
            other => other,
        }
    }
}
