//! Layering of two rates providers.

use tracing::trace;

use super::RatesProvider;
use crate::market_data::error::MarketDataError;
use crate::market_data::observation::{IborIndexObservation, OvernightIndexObservation};
use crate::sensitivity::{CurrencyParameterSensitivities, PointSensitivities};
use crate::types::{Currency, Date, PriceIndex, YearMonth};

/// Provider that serves every lookup from `first`, falling back to
/// `second` only when `first` reports missing data.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::CurveEnum;
/// use pricer_core::market_data::{CombinedRatesProvider, ImmutableRatesProvider, RatesProvider};
/// use pricer_core::types::{Currency, Date};
///
/// let valuation = Date::from_ymd(2024, 1, 2).unwrap();
/// let usd = ImmutableRatesProvider::builder(valuation)
///     .discount_curve(Currency::USD, CurveEnum::flat(0.05))
///     .build();
/// let eur = ImmutableRatesProvider::builder(valuation)
///     .discount_curve(Currency::EUR, CurveEnum::flat(0.03))
///     .build();
///
/// let both = CombinedRatesProvider::new(usd, eur).unwrap();
/// let pay = Date::from_ymd(2025, 1, 2).unwrap();
/// assert!(both.discount_factor(Currency::EUR, pay).is_ok());
/// assert!(both.discount_factor(Currency::GBP, pay).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CombinedRatesProvider<A, B> {
    first: A,
    second: B,
}

impl<A: RatesProvider, B: RatesProvider> CombinedRatesProvider<A, B> {
    /// Layers `first` over `second`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::ValuationDateMismatch` if the providers value on
    /// different dates.
    pub fn new(first: A, second: B) -> Result<Self, MarketDataError> {
        if first.valuation_date() != second.valuation_date() {
            return Err(MarketDataError::ValuationDateMismatch {
                first: first.valuation_date(),
                second: second.valuation_date(),
            });
        }
        Ok(Self { first, second })
    }

    /// Primary provider.
    pub fn first(&self) -> &A {
        &self.first
    }

    /// Fallback provider.
    pub fn second(&self) -> &B {
        &self.second
    }
}

/// `primary` unless it failed for missing data, then `fallback()`.
fn or_fallback<T>(
    primary: Result<T, MarketDataError>,
    fallback: impl FnOnce() -> Result<T, MarketDataError>,
) -> Result<T, MarketDataError> {
    match primary {
        Err(err) if err.is_missing_data() => {
            trace!(error = %err, "falling back to second provider");
            fallback()
        }
        other => other,
    }
}

impl<A: RatesProvider, B: RatesProvider> RatesProvider for CombinedRatesProvider<A, B> {
    fn valuation_date(&self) -> Date {
        self.first.valuation_date()
    }

    fn discount_factor(&self, currency: Currency, date: Date) -> Result<f64, MarketDataError> {
        or_fallback(self.first.discount_factor(currency, date), || {
            self.second.discount_factor(currency, date)
        })
    }

    fn discount_factor_sensitivity(
        &self,
        currency: Currency,
        date: Date,
    ) -> Result<PointSensitivities, MarketDataError> {
        or_fallback(self.first.discount_factor_sensitivity(currency, date), || {
            self.second.discount_factor_sensitivity(currency, date)
        })
    }

    fn fx_rate(&self, from: Currency, to: Currency) -> Result<f64, MarketDataError> {
        or_fallback(self.first.fx_rate(from, to), || self.second.fx_rate(from, to))
    }

    fn ibor_index_rate(&self, observation: &IborIndexObservation) -> Result<f64, MarketDataError> {
        or_fallback(self.first.ibor_index_rate(observation), || {
            self.second.ibor_index_rate(observation)
        })
    }

    fn ibor_index_rate_sensitivity(
        &self,
        observation: &IborIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError> {
        or_fallback(self.first.ibor_index_rate_sensitivity(observation), || {
            self.second.ibor_index_rate_sensitivity(observation)
        })
    }

    fn overnight_index_rate(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<f64, MarketDataError> {
        or_fallback(self.first.overnight_index_rate(observation), || {
            self.second.overnight_index_rate(observation)
        })
    }

    fn overnight_index_rate_sensitivity(
        &self,
        observation: &OvernightIndexObservation,
    ) -> Result<PointSensitivities, MarketDataError> {
        or_fallback(self.first.overnight_index_rate_sensitivity(observation), || {
            self.second.overnight_index_rate_sensitivity(observation)
        })
    }

    fn inflation_index_rate(&self, index: PriceIndex, month: YearMonth) -> Result<f64, MarketDataError> {
        or_fallback(self.first.inflation_index_rate(index, month), || {
            self.second.inflation_index_rate(index, month)
        })
    }

    fn inflation_index_rate_sensitivity(
        &self,
        index: PriceIndex,
        month: YearMonth,
    ) -> Result<PointSensitivities, MarketDataError> {
        or_fallback(self.first.inflation_index_rate_sensitivity(index, month), || {
            self.second.inflation_index_rate_sensitivity(index, month)
        })
    }

    /// Converts each point with whichever provider holds its curve.
    fn parameter_sensitivity(
        &self,
        points: &PointSensitivities,
    ) -> Result<CurrencyParameterSensitivities, MarketDataError> {
        let mut result = CurrencyParameterSensitivities::empty();
        for point in points.clone().normalized() {
            let single = PointSensitivities::of(point);
            let converted = or_fallback(self.first.parameter_sensitivity(&single), || {
                self.second.parameter_sensitivity(&single)
            })?;
            result = result.combined_with(converted);
        }
        Ok(result)
    }
}
