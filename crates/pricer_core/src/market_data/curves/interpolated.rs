//! Interpolated yield curve implementation.

use super::{ParameterizedCurve, YieldCurve};
use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use num_traits::Float;

/// Interpolation method for yield curves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveInterpolation {
    /// Linear interpolation on zero rates; `D(t) = exp(-z(t) t)`.
    Linear,

    /// Linear interpolation on `ln D(t)`, i.e. piecewise constant
    /// forward rates between pillars.
    LogLinear,
}

/// Zero-rate curve defined by pillar points.
///
/// The pillar zero rates are the curve parameters. Outside the pillar
/// range the curve extrapolates flat in zero rate when
/// `allow_extrapolation` is set and fails with `OutOfBounds` otherwise.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{
///     CurveInterpolation, InterpolatedCurve, ParameterizedCurve, YieldCurve,
/// };
///
/// let curve = InterpolatedCurve::new(
///     &[0.5_f64, 1.0, 2.0],
///     &[0.02, 0.025, 0.03],
///     CurveInterpolation::Linear,
///     true,
/// )
/// .unwrap();
///
/// assert!((curve.zero_rate(0.75).unwrap() - 0.0225).abs() < 1e-12);
/// let dz = curve.zero_rate_parameter_sensitivity(0.75).unwrap();
/// assert_eq!(dz, vec![0.5, 0.5, 0.0]);
/// ```
#[derive(Debug, Clone)]
pub struct InterpolatedCurve<T: Float> {
    tenors: Vec<T>,
    rates: Vec<T>,
    method: CurveInterpolation,
    allow_extrapolation: bool,
}

impl<T: Float> InterpolatedCurve<T> {
    /// Builds a curve from pillars.
    ///
    /// # Errors
    ///
    /// - `MarketDataError::InsufficientData` with fewer than 2 pillars or
    ///   mismatched lengths
    /// - `MarketDataError::InvalidMaturity` for non-positive or unsorted tenors
    pub fn new(
        tenors: &[T],
        rates: &[T],
        method: CurveInterpolation,
        allow_extrapolation: bool,
    ) -> Result<Self, MarketDataError> {
        if tenors.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: tenors.len(),
                need: 2,
            });
        }
        if tenors.len() != rates.len() {
            return Err(MarketDataError::InsufficientData {
                got: rates.len(),
                need: tenors.len(),
            });
        }
        for i in 0..tenors.len() {
            if tenors[i] <= T::zero() || (i > 0 && tenors[i] <= tenors[i - 1]) {
                return Err(MarketDataError::InvalidMaturity {
                    t: tenors[i].to_f64().unwrap_or(0.0),
                });
            }
        }
        Ok(Self {
            tenors: tenors.to_vec(),
            rates: rates.to_vec(),
            method,
            allow_extrapolation,
        })
    }

    /// Pillar tenors.
    #[inline]
    pub fn tenors(&self) -> &[T] {
        &self.tenors
    }

    /// Pillar zero rates.
    #[inline]
    pub fn rates(&self) -> &[T] {
        &self.rates
    }

    /// `(first tenor, last tenor)`.
    #[inline]
    pub fn domain(&self) -> (T, T) {
        (self.tenors[0], self.tenors[self.tenors.len() - 1])
    }

    /// Interpolation method.
    #[inline]
    pub fn method(&self) -> CurveInterpolation {
        self.method
    }

    /// Whether flat extrapolation is allowed.
    #[inline]
    pub fn allow_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    /// Pillar rate used for flat extrapolation at `t`, or `None` inside
    /// the pillar range.
    fn extrapolated_rate(&self, t: T) -> Result<Option<T>, MarketDataError> {
        let (t_min, t_max) = self.domain();
        if t >= t_min && t <= t_max {
            return Ok(None);
        }
        if !self.allow_extrapolation {
            return Err(MarketDataError::OutOfBounds {
                x: t.to_f64().unwrap_or(0.0),
                min: t_min.to_f64().unwrap_or(0.0),
                max: t_max.to_f64().unwrap_or(0.0),
            });
        }
        Ok(Some(if t < t_min {
            self.rates[0]
        } else {
            self.rates[self.rates.len() - 1]
        }))
    }

    fn log_discount_interpolator(&self) -> Result<LinearInterpolator<T>, MarketDataError> {
        let log_dfs: Vec<T> = self
            .tenors
            .iter()
            .zip(self.rates.iter())
            .map(|(&tenor, &rate)| -rate * tenor)
            .collect();
        Ok(LinearInterpolator::new(&self.tenors, &log_dfs)?)
    }

    fn interpolated_zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if let Some(rate) = self.extrapolated_rate(t)? {
            return Ok(rate);
        }
        match self.method {
            CurveInterpolation::Linear => {
                Ok(LinearInterpolator::new(&self.tenors, &self.rates)?.interpolate(t)?)
            }
            CurveInterpolation::LogLinear => {
                Ok(-self.log_discount_interpolator()?.interpolate(t)? / t)
            }
        }
    }
}

impl<T: Float> YieldCurve<T> for InterpolatedCurve<T> {
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError> {
        if t < T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        if t == T::zero() {
            return Ok(T::one());
        }
        let rate = self.interpolated_zero_rate(t)?;
        Ok((-rate * t).exp())
    }

    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        self.interpolated_zero_rate(t)
    }
}

impl ParameterizedCurve for InterpolatedCurve<f64> {
    fn parameter_count(&self) -> usize {
        self.rates.len()
    }

    fn parameter(&self, index: usize) -> Result<f64, MarketDataError> {
        self.rates
            .get(index)
            .copied()
            .ok_or(MarketDataError::InvalidParameterIndex {
                index,
                count: self.rates.len(),
            })
    }

    fn with_parameter(&self, index: usize, value: f64) -> Result<Self, MarketDataError> {
        let mut bumped = self.clone();
        let count = bumped.rates.len();
        let slot = bumped
            .rates
            .get_mut(index)
            .ok_or(MarketDataError::InvalidParameterIndex { index, count })?;
        *slot = value;
        Ok(bumped)
    }

    fn zero_rate_parameter_sensitivity(&self, t: f64) -> Result<Vec<f64>, MarketDataError> {
        if t < 0.0 {
            return Err(MarketDataError::InvalidMaturity { t });
        }
        let n = self.rates.len();
        let mut sensitivity = vec![0.0; n];
        let (t_min, t_max) = self.domain();
        if t < t_min {
            sensitivity[0] = 1.0;
            return Ok(sensitivity);
        }
        if t > t_max {
            sensitivity[n - 1] = 1.0;
            return Ok(sensitivity);
        }
        let weights = LinearInterpolator::new(&self.tenors, &self.rates)?.node_weights(t)?;
        for (k, w) in weights {
            sensitivity[k] += match self.method {
                CurveInterpolation::Linear => w,
                // z(t) = Σ w_k z_k t_k / t
                CurveInterpolation::LogLinear => w * self.tenors[k] / t,
            };
        }
        Ok(sensitivity)
    }
}
