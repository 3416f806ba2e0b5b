//! FX quotes as currency pairs.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let gbpusd = CurrencyPair::new(Currency::GBP, Currency::USD, 1.25).unwrap();
//! assert_eq!(gbpusd.code(), "GBP/USD");
//! assert_eq!(gbpusd.rate_for(Currency::USD, Currency::GBP), Some(0.8));
//! ```

use num_traits::Float;
use std::fmt;

use super::currency::Currency;
use super::error::CurrencyError;

/// A quoted FX rate: one unit of `base` is worth `spot` units of `quote`.
///
/// Generic over the float type; the rates provider stores `CurrencyPair<f64>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurrencyPair<T: Float> {
    base: Currency,
    quote: Currency,
    spot: T,
}

impl<T: Float> CurrencyPair<T> {
    /// Creates a quote.
    ///
    /// # Errors
    ///
    /// - `CurrencyError::SameCurrency` if `base == quote`
    /// - `CurrencyError::InvalidRate` if `spot` is not positive and finite
    pub fn new(base: Currency, quote: Currency, spot: T) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        if !spot.is_finite() || spot <= T::zero() {
            return Err(CurrencyError::InvalidRate {
                pair: format!("{}/{}", base.code(), quote.code()),
                rate: spot.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(Self { base, quote, spot })
    }

    /// Base currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Quote currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Units of quote per unit of base.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Market code, `BASE/QUOTE`.
    pub fn code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }

    /// The same quote seen from the other side.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::{Currency, CurrencyPair};
    ///
    /// let eurusd = CurrencyPair::new(Currency::EUR, Currency::USD, 1.10_f64).unwrap();
    /// let usdeur = eurusd.invert();
    /// assert_eq!(usdeur.base(), Currency::USD);
    /// assert!((usdeur.spot() - 1.0 / 1.10).abs() < 1e-12);
    /// ```
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
            spot: T::one() / self.spot,
        }
    }

    /// Whether this quote links the two currencies, in either direction.
    pub fn links(&self, a: Currency, b: Currency) -> bool {
        (self.base == a && self.quote == b) || (self.base == b && self.quote == a)
    }

    /// Multiplier converting an amount in `from` into `to`, if this
    /// quote links them.
    pub fn rate_for(&self, from: Currency, to: Currency) -> Option<T> {
        if self.base == from && self.quote == to {
            Some(self.spot)
        } else if self.base == to && self.quote == from {
            Some(T::one() / self.spot)
        } else {
            None
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for CurrencyPair<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.spot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_new_rejects_same_currency() {
        let err = CurrencyPair::new(Currency::USD, Currency::USD, 1.0).unwrap_err();
        assert_eq!(err, CurrencyError::SameCurrency("USD".to_string()));
    }

    #[test]
    fn test_new_rejects_non_positive_or_nan_spot() {
        assert!(CurrencyPair::new(Currency::EUR, Currency::USD, 0.0).is_err());
        assert!(CurrencyPair::new(Currency::EUR, Currency::USD, -1.1).is_err());
        assert!(CurrencyPair::new(Currency::EUR, Currency::USD, f64::NAN).is_err());
        assert!(CurrencyPair::new(Currency::EUR, Currency::USD, f64::INFINITY).is_err());
    }

    #[test]
    fn test_rate_for_both_directions() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD, 1.10_f64).unwrap();
        assert_relative_eq!(pair.rate_for(Currency::EUR, Currency::USD).unwrap(), 1.10);
        assert_relative_eq!(
            pair.rate_for(Currency::USD, Currency::EUR).unwrap(),
            1.0 / 1.10
        );
        assert!(pair.rate_for(Currency::GBP, Currency::USD).is_none());
        assert!(pair.links(Currency::USD, Currency::EUR));
    }

    #[test]
    fn test_invert_twice_is_identity() {
        let pair = CurrencyPair::new(Currency::USD, Currency::JPY, 150.0).unwrap();
        let back = pair.invert().invert();
        assert_eq!(back.base(), Currency::USD);
        assert_relative_eq!(back.spot(), 150.0, epsilon = 1e-12);
        assert_eq!(format!("{}", pair), "USD/JPY 150");
    }
}
