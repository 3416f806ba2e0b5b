//! Piecewise linear interpolation.

use super::Interpolator;
use crate::types::InterpolationError;
use num_traits::Float;

/// Piecewise linear interpolator over strictly increasing nodes.
///
/// Besides the value, it exposes the weight each node carries at a
/// query point ([`node_weights`](LinearInterpolator::node_weights)),
/// which is the derivative of the interpolated value with respect to
/// the node values.
///
/// # Example
///
/// ```
/// use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
///
/// let interp = LinearInterpolator::new(&[0.0, 1.0, 3.0], &[0.0, 2.0, 4.0]).unwrap();
/// assert_eq!(interp.domain(), (0.0, 3.0));
///
/// let w = interp.node_weights(2.0).unwrap();
/// assert_eq!(w, [(1, 0.5), (2, 0.5)]);
/// ```
#[derive(Debug, Clone)]
pub struct LinearInterpolator<T: Float> {
    xs: Vec<T>,
    ys: Vec<T>,
}

impl<T: Float> LinearInterpolator<T> {
    /// Builds an interpolator.
    ///
    /// # Errors
    ///
    /// - `InterpolationError::InvalidInput` on length mismatch
    /// - `InterpolationError::InsufficientData` with fewer than 2 nodes
    /// - `InterpolationError::NonMonotonicData` if `xs` is not strictly increasing
    pub fn new(xs: &[T], ys: &[T]) -> Result<Self, InterpolationError> {
        if xs.len() != ys.len() {
            return Err(InterpolationError::InvalidInput(format!(
                "xs and ys must have same length: got {} and {}",
                xs.len(),
                ys.len()
            )));
        }
        if xs.len() < 2 {
            return Err(InterpolationError::InsufficientData {
                got: xs.len(),
                need: 2,
            });
        }
        if let Some(index) = (1..xs.len()).find(|&i| xs[i] <= xs[i - 1]) {
            return Err(InterpolationError::NonMonotonicData { index });
        }
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }

    /// Node abscissae.
    #[inline]
    pub fn xs(&self) -> &[T] {
        &self.xs
    }

    /// Node values.
    #[inline]
    pub fn ys(&self) -> &[T] {
        &self.ys
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Always false for a constructed interpolator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Index `i` with `xs[i] <= x < xs[i+1]`, clamped to `[0, n-2]`.
    #[inline]
    fn find_segment(&self, x: T) -> usize {
        let pos = self.xs.partition_point(|&xi| xi <= x);
        pos.clamp(1, self.xs.len() - 1) - 1
    }

    fn check_bounds(&self, x: T) -> Result<(), InterpolationError> {
        let (min, max) = self.domain();
        if x < min || x > max {
            return Err(InterpolationError::OutOfBounds {
                x: x.to_f64().unwrap_or(f64::NAN),
                min: min.to_f64().unwrap_or(f64::NAN),
                max: max.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(())
    }

    /// The two nodes bracketing `x` and their weights; the weights sum to one.
    pub fn node_weights(&self, x: T) -> Result<[(usize, T); 2], InterpolationError> {
        self.check_bounds(x)?;
        let i = self.find_segment(x);
        let t = (x - self.xs[i]) / (self.xs[i + 1] - self.xs[i]);
        Ok([(i, T::one() - t), (i + 1, t)])
    }
}

impl<T: Float> Interpolator<T> for LinearInterpolator<T> {
    /// `y = y0 + (y1 - y0) * (x - x0) / (x1 - x0)`
    fn interpolate(&self, x: T) -> Result<T, InterpolationError> {
        let [(i, w0), (j, w1)] = self.node_weights(x)?;
        Ok(self.ys[i] * w0 + self.ys[j] * w1)
    }

    #[inline]
    fn domain(&self) -> (T, T) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }
}
