//! Financial instrument definitions.
//!
//! Instruments arrive resolved: dates adjusted, year fractions computed and
//! notionals signed. Pricers take them by reference and never mutate them.
//!
//! - [`rates`]: swaps, legs, payment periods and rate observations
//! - [`InstrumentError`]: validation failures of the constructors

mod error;
pub mod rates;

pub use error::InstrumentError;
