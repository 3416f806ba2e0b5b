//! Rates providers: the market environment a valuation runs against.
//!
//! This module provides:
//! - [`RatesProvider`]: discount factors, index rates, price index levels
//!   and FX rates, each with a sensitivity twin
//! - [`ImmutableRatesProvider`]: curves, fixings and FX quotes built once
//!   per valuation
//! - [`CombinedRatesProvider`]: layering of two providers with fallback
//!   on missing data

mod combined;
mod immutable;

pub use combined::CombinedRatesProvider;
pub use immutable::{ImmutableRatesProvider, ImmutableRatesProviderBuilder};

use super::error::MarketDataError;
use super::observation::{IborIndexObservation, OvernightIndexObservation};
use crate::sensitivity::{CurrencyParameterSensitivities, PointSensitivities};
use crate::types::{Currency, Date, PriceIndex, YearMonth};

/// Read-only market environment for one valuation date.
///
/// Every value lookup has a `_sensitivity` twin returning the point
/// sensitivity of the looked-up value; published fixings have none.
/// Lookups that cannot be served fail, they are never defaulted.
pub trait RatesProvider: Send + Sync {
    /// Valuation date.
    fn valuation_date(&self) -> Date;

    /// Discount factor for a flow in `currency` paid on `date`.
    fn discount_factor(&self, currency: Currency, date: Date) -> Result<f64, MarketDataError>;

    /// Sensitivity of [`discount_factor`](RatesProvider::discount_factor) to
    /// the zero rate at `date`, i.e. `-t * df`.
    fn discount_factor_sensitivity(
        &self,
        currency: Currency,
        date: Date,
    ) -> Result<PointSensitivities, MarketDataError>;

    /// Units of `to` per unit of `from`.
    fn fx_rate(&self, from: Currency, to: Currency) -> Result<f64, MarketDataError>;

    /// Term index rate: the fixing when published, the forward otherwise.
    fn ibor_index_rate(&self, observation: &IborIndexObservation) -> Result<f64, MarketDataError>;

    /// Sensitivity of [`ibor_index_rate`](RatesProvider::ibor_index_rate).
    fn ibor_index_rate_sensitivity(
        &self,
        observation: &IborIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError>;

    /// Overnight index rate: the fixing when published, the forward otherwise.
    fn overnight_index_rate(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<f64, MarketDataError>;

    /// Sensitivity of [`overnight_index_rate`](RatesProvider::overnight_index_rate).
    fn overnight_index_rate_sensitivity(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError>;

    /// Price index level for a reference month.
    fn inflation_index_rate(&self, index: PriceIndex, month: YearMonth) -> Result<f64, MarketDataError>;

    /// Sensitivity of [`inflation_index_rate`](RatesProvider::inflation_index_rate).
    fn inflation_index_rate_sensitivity(
        &self,
        index: PriceIndex,
        month: YearMonth,
    ) -> Result<PointSensitivities, MarketDataError>;

    /// Converts point sensitivities into curve parameter sensitivities.
    fn parameter_sensitivity(
        &self,
        points: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities, MarketDataError>;
}
