//! Sensitivities of values to market data.
//!
//! Pricers produce [`PointSensitivities`] keyed by market quantity (a zero
//! rate at a date, an index forward at a fixing date, a price index level
//! in a month). A rates provider converts them into
//! [`CurrencyParameterSensitivities`], one vector of derivatives per
//! curve, in the curves' own parameters.

mod parameter;
mod point;

pub use parameter::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
pub use point::{PointSensitivities, PointSensitivity, SensitivityKey};
