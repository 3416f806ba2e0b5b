//! Core financial types.
//!
//! This module provides:
//! - `time`: [`Date`], [`YearMonth`], [`DayCountConvention`]
//! - `currency`: ISO 4217 currency codes
//! - `currency_pair`: FX quotes
//! - `amount`: [`CurrencyAmount`] and [`MultiCurrencyAmount`]
//! - `index`: overnight, term and price index identifiers
//! - `error`: [`DateError`], [`CurrencyError`], [`InterpolationError`]

pub mod amount;
pub mod currency;
pub mod currency_pair;
pub mod error;
pub mod index;
pub mod time;

pub use amount::{CurrencyAmount, MultiCurrencyAmount};
pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, DateError, InterpolationError};
pub use index::{IborIndex, OvernightIndex, PriceIndex};
pub use time::{Date, DayCountConvention, YearMonth};
