//! Flat yield curve implementation.

use super::{ParameterizedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Curve with a single continuously compounded zero rate.
///
/// `D(t) = exp(-r t)`; the rate is the curve's only parameter.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.05_f64);
/// assert!((curve.discount_factor(1.0).unwrap() - 0.951229).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatCurve<T: Float> {
    rate: T,
}

impl<T: Float> FlatCurve<T> {
    /// Creates the curve.
    #[inline]
    pub fn new(rate: T) -> Self {
        Self { rate }
    }

    /// The zero rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }
}

impl<T: Float> YieldCurve<T> for FlatCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok((-self.rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        Ok(self.rate)
    }
}

impl ParameterizedCurve for FlatCurve<f64> {
    fn parameter_count(&self) -> usize {
        1
    }

    fn parameter(&self, index: usize) -> Result<f64, MarketDataError> {
        match index {
            0 => Ok(self.rate),
            _ => Err(MarketDataError::InvalidParameterIndex { index, count: 1 }),
        }
    }

    fn with_parameter(&self, index: usize, value: f64) -> Result<Self, MarketDataError> {
        match index {
            0 => Ok(Self::new(value)),
            _ => Err(MarketDataError::InvalidParameterIndex { index, count: 1 }),
        }
    }

    fn zero_rate_parameter_sensitivity(&self, t: f64) -> Result<Vec<f64>, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        Ok(vec![1.0])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_discount_factor() {
        let curve = FlatCurve::new(0.02_f64);
        assert_eq!(curve.discount_factor(0.0).unwrap(), 1.0);
        assert_relative_eq!(curve.discount_factor(3.0).unwrap(), (-0.06_f64).exp());
        assert!(curve.discount_factor(-0.1).is_err());
    }

    #[test]
    fn test_negative_rate() {
        let curve = FlatCurve::new(-0.005_f64);
        assert!(curve.discount_factor(1.0).unwrap() > 1.0);
        assert_eq!(curve.zero_rate(2.0).unwrap(), -0.005);
    }

    #[test]
    fn test_parameter_access() {
        let curve = FlatCurve::new(0.01);
        assert_eq!(curve.parameter_count(), 1);
        assert_eq!(curve.parameter(0).unwrap(), 0.01);
        assert_eq!(curve.with_parameter(0, 0.02).unwrap().rate(), 0.02);
        assert!(matches!(
            curve.with_parameter(1, 0.02),
            Err(MarketDataError::InvalidParameterIndex { index: 1, count: 1 })
        ));
        assert_eq!(curve.zero_rate_parameter_sensitivity(0.0).unwrap(), vec![1.0]);
    }
}
