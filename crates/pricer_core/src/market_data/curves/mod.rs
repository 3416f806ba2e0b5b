//! Curve abstractions for discounting, forwarding and price projection.
//!
//! This module provides:
//! - [`YieldCurve`]: generic discount factor and rate calculations
//! - [`ParameterizedCurve`]: zero-rate sensitivity to curve parameters
//! - [`FlatCurve`]: constant zero rate
//! - [`InterpolatedCurve`]: pillar-based interpolated zero rates
//! - [`CurveInterpolation`]: interpolation method selection
//! - [`CurveId`]: discount and forward curve identifiers
//! - [`CurveEnum`]: static dispatch over concrete curves
//! - [`CurveSet`]: curves keyed by identifier
//! - [`PriceIndexCurve`]: monthly price index projection

mod curve_enum;
mod curve_set;
mod flat;
mod interpolated;
mod price_index;
mod traits;

pub use curve_enum::{CurveEnum, CurveId};
pub use curve_set::CurveSet;
pub use flat::FlatCurve;
pub use interpolated::{CurveInterpolation, InterpolatedCurve};
pub use price_index::PriceIndexCurve;
pub use traits::{ParameterizedCurve, YieldCurve};
