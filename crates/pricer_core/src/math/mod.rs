//! Numerical building blocks.
//!
//! - [`interpolators`]: piecewise linear interpolation with node weights,
//!   used by curves to map point sensitivities onto curve parameters

pub mod interpolators;
