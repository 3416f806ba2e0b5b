//! Interpolation methods.
//!
//! All interpolators are generic over `T: num_traits::Float`.
//!
//! ## Core Trait
//!
//! 1D interpolators implement [`Interpolator`]:
//! - `interpolate(x: T) -> Result<T, InterpolationError>`
//! - `domain() -> (T, T)`
//!
//! ## Example
//!
//! ```
//! use pricer_core::math::interpolators::{Interpolator, LinearInterpolator};
//!
//! let interp = LinearInterpolator::new(&[0.0_f64, 1.0, 2.0], &[0.0, 1.0, 4.0]).unwrap();
//! assert!((interp.interpolate(1.5).unwrap() - 2.5).abs() < 1e-12);
//! ```

mod linear;

pub use linear::LinearInterpolator;

use crate::types::InterpolationError;
use num_traits::Float;

/// One-dimensional interpolation.
pub trait Interpolator<T: Float> {
    /// Interpolated value at `x`.
    ///
    /// # Errors
    ///
    /// `InterpolationError::OutOfBounds` if `x` lies outside [`domain`](Interpolator::domain).
    fn interpolate(&self, x: T) -> Result<T, InterpolationError>;

    /// Closed interval of valid query points.
    fn domain(&self) -> (T, T);
}
