//! Curve identifiers and static-dispatch curve enum.
//!
//! This module provides:
//! - [`CurveId`]: which market object a curve represents in the
//!   multi-curve framework (discounting per currency, forwarding per index)
//! - [`CurveEnum`]: static dispatch over the concrete zero-rate curves

use std::fmt;

use super::{FlatCurve, InterpolatedCurve, ParameterizedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use crate::types::{Currency, IborIndex, OvernightIndex, PriceIndex};
use num_traits::Float;

/// Identifier of a curve held by a rates provider.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::CurveId;
/// use pricer_core::types::{Currency, OvernightIndex};
///
/// assert_eq!(CurveId::Discount(Currency::USD).to_string(), "USD-DSC");
/// assert_eq!(CurveId::Overnight(OvernightIndex::Sofr).currency(), Currency::USD);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CurveId {
    /// Discount curve for cash flows paid in the currency.
    Discount(Currency),
    /// Forward curve projecting a term index.
    Ibor(IborIndex),
    /// Forward curve projecting an overnight index.
    Overnight(OvernightIndex),
    /// Monthly price index projection.
    PriceIndex(PriceIndex),
}

impl CurveId {
    /// Currency the curve belongs to.
    pub fn currency(&self) -> Currency {
        match self {
            CurveId::Discount(ccy) => *ccy,
            CurveId::Ibor(index) => index.currency(),
            CurveId::Overnight(index) => index.currency(),
            CurveId::PriceIndex(index) => index.currency(),
        }
    }
}

impl fmt::Display for CurveId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CurveId::Discount(ccy) => write!(f, "{}-DSC", ccy),
            CurveId::Ibor(index) => write!(f, "{}", index),
            CurveId::Overnight(index) => write!(f, "{}", index),
            CurveId::PriceIndex(index) => write!(f, "{}", index),
        }
    }
}

/// Static dispatch enum wrapping the concrete zero-rate curves.
#[derive(Debug, Clone)]
pub enum CurveEnum<T: Float> {
    /// Constant zero rate.
    Flat(FlatCurve<T>),
    /// Pillar-interpolated zero rates.
    Interpolated(InterpolatedCurve<T>),
}

impl<T: Float> CurveEnum<T> {
    /// Convenience constructor for a flat curve.
    #[inline]
    pub fn flat(rate: T) -> Self {
        CurveEnum::Flat(FlatCurve::new(rate))
    }
}

impl<T: Float> YieldCurve<T> for CurveEnum<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.discount_factor(t),
            CurveEnum::Interpolated(curve) => curve.discount_factor(t),
        }
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate(t),
        }
    }
}

impl ParameterizedCurve for CurveEnum<f64> {
    fn parameter_count(&self) -> usize {
        match self {
            CurveEnum::Flat(curve) => curve.parameter_count(),
            CurveEnum::Interpolated(curve) => curve.parameter_count(),
        }
    }

    fn parameter(&self, index: usize) -> Result<f64, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.parameter(index),
            CurveEnum::Interpolated(curve) => curve.parameter(index),
        }
    }

    fn with_parameter(&self, index: usize, value: f64) -> Result<Self, MarketDataError> {
        Ok(match self {
            CurveEnum::Flat(curve) => CurveEnum::Flat(curve.with_parameter(index, value)?),
            CurveEnum::Interpolated(curve) => {
                CurveEnum::Interpolated(curve.with_parameter(index, value)?)
            }
        })
    }

    fn zero_rate_parameter_sensitivity(&self, t: f64) -> Result<Vec<f64>, MarketDataError> {
        match self {
            CurveEnum::Flat(curve) => curve.zero_rate_parameter_sensitivity(t),
            CurveEnum::Interpolated(curve) => curve.zero_rate_parameter_sensitivity(t),
        }
    }
}

impl<T: Float> From<FlatCurve<T>> for CurveEnum<T> {
    fn from(curve: FlatCurve<T>) -> Self {
        CurveEnum::Flat(curve)
    }
}

impl<T: Float> From<InterpolatedCurve<T>> for CurveEnum<T> {
    fn from(curve: InterpolatedCurve<T>) -> Self {
        CurveEnum::Interpolated(curve)
    }
}
