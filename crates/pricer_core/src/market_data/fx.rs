//! FX quote matrix.

use crate::market_data::error::MarketDataError;
use crate::types::{Currency, CurrencyPair};

/// Spot FX quotes with inverse and one-step cross resolution.
///
/// A rate `from -> to` is the number of units of `to` per unit of `from`.
/// It resolves, in order, to 1 for identical currencies, a direct or
/// inverted quote, or a cross through one currency quoted against both.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::FxMatrix;
/// use pricer_core::types::{Currency, CurrencyPair};
///
/// let fx = FxMatrix::new()
///     .with_pair(CurrencyPair::new(Currency::EUR, Currency::USD, 1.10).unwrap())
///     .with_pair(CurrencyPair::new(Currency::USD, Currency::JPY, 150.0).unwrap());
///
/// assert_eq!(fx.rate(Currency::USD, Currency::USD).unwrap(), 1.0);
/// assert!((fx.rate(Currency::EUR, Currency::JPY).unwrap() - 165.0).abs() < 1e-9);
/// assert!(fx.rate(Currency::GBP, Currency::USD).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FxMatrix {
    pairs: Vec<CurrencyPair<f64>>,
}

impl FxMatrix {
    /// Matrix with no quote.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a quote, replacing any quote on the same two currencies.
    pub fn add_pair(&mut self, pair: CurrencyPair<f64>) {
        self.pairs
            .retain(|existing| !existing.links(pair.base(), pair.quote()));
        self.pairs.push(pair);
    }

    /// Builder-style [`add_pair`](FxMatrix::add_pair).
    pub fn with_pair(mut self, pair: CurrencyPair<f64>) -> Self {
        self.add_pair(pair);
        self
    }

    /// Quoted pairs.
    pub fn pairs(&self) -> &[CurrencyPair<f64>] {
        &self.pairs
    }

    fn quoted(&self, from: Currency, to: Currency) -> Option<f64> {
        self.pairs.iter().find_map(|pair| pair.rate_for(from, to))
    }

    /// Rate converting one unit of `from` into `to`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::MissingFxRate` if no resolution path exists.
    pub fn rate(&self, from: Currency, to: Currency) -> Result<f64, MarketDataError> {
        if from == to {
            return Ok(1.0);
        }
        if let Some(rate) = self.quoted(from, to) {
            return Ok(rate);
        }
        Currency::ALL
            .iter()
            .filter(|&&via| via != from && via != to)
            .find_map(|&via| Some(self.quoted(from, via)? * self.quoted(via, to)?))
            .ok_or(MarketDataError::MissingFxRate { from, to })
    }
}
