//! Yield curve traits.

use crate::market_data::error::MarketDataError;
use num_traits::Float;

/// Generic yield curve: discount factors and rates by time in years.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{FlatCurve, YieldCurve};
///
/// let curve = FlatCurve::new(0.03_f64);
/// let fwd = curve.forward_rate(1.0, 2.0).unwrap();
/// assert!((fwd - 0.03).abs() < 1e-12);
/// ```
pub trait YieldCurve<T: Float> {
    /// Discount factor `D(t)` for `t >= 0`.
    fn discount_factor(&self, t: T) -> Result<T, MarketDataError>;

    /// Continuously compounded zero rate, `-ln D(t) / t`.
    fn zero_rate(&self, t: T) -> Result<T, MarketDataError> {
        if t <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: t.to_f64().unwrap_or(0.0),
            });
        }
        let df = self.discount_factor(t)?;
        Ok(-df.ln() / t)
    }

    /// Continuously compounded forward rate between `t1` and `t2`.
    fn forward_rate(&self, t1: T, t2: T) -> Result<T, MarketDataError> {
        let dt = t2 - t1;
        if dt <= T::zero() {
            return Err(MarketDataError::InvalidMaturity {
                t: dt.to_f64().unwrap_or(0.0),
            });
        }
        let df1 = self.discount_factor(t1)?;
        let df2 = self.discount_factor(t2)?;
        Ok(-(df2 / df1).ln() / dt)
    }
}

/// A curve described by a finite parameter vector, whose zero rates can
/// be differentiated with respect to those parameters.
///
/// Point sensitivities expressed against zero rates are projected onto
/// curve parameters through
/// [`zero_rate_parameter_sensitivity`](ParameterizedCurve::zero_rate_parameter_sensitivity).
pub trait ParameterizedCurve: YieldCurve<f64> {
    /// Number of parameters.
    fn parameter_count(&self) -> usize;

    /// Parameter value at `index`.
    fn parameter(&self, index: usize) -> Result<f64, MarketDataError>;

    /// Copy of the curve with one parameter replaced.
    fn with_parameter(&self, index: usize, value: f64) -> Result<Self, MarketDataError>
    where
        Self: Sized;

    /// `∂z(t)/∂p_k` for every parameter `k`, where `z(t)` is the zero rate
    /// implied by the discount factor at `t`. Defined at `t = 0` as the
    /// limit from the right.
    fn zero_rate_parameter_sensitivity(&self, t: f64) -> Result<Vec<f64>, MarketDataError>;
}
