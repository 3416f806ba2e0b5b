//! ISO 4217 currencies.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::currency::Currency;
//!
//! let gbp: Currency = "gbp".parse().unwrap();
//! assert_eq!(gbp, Currency::GBP);
//! assert_eq!(Currency::JPY.decimal_places(), 0);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::CurrencyError;

/// ISO 4217 currency code.
///
/// Currencies are ordered by code so that currency-keyed maps
/// (amounts, sensitivities) iterate deterministically.
///
/// # Examples
///
/// ```
/// use pricer_core::types::currency::Currency;
///
/// assert_eq!(Currency::EUR.code(), "EUR");
/// assert!(Currency::CHF < Currency::USD);
/// ```
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Currency {
    /// Australian Dollar
    AUD,
    /// Swiss Franc
    CHF,
    /// Euro
    EUR,
    /// British Pound Sterling
    GBP,
    /// Japanese Yen (no minor units)
    JPY,
    /// United States Dollar
    USD,
}

impl Currency {
    /// Every supported currency, in code order.
    pub const ALL: [Currency; 6] = [
        Currency::AUD,
        Currency::CHF,
        Currency::EUR,
        Currency::GBP,
        Currency::JPY,
        Currency::USD,
    ];

    /// Three-letter ISO code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::AUD => "AUD",
            Currency::CHF => "CHF",
            Currency::EUR => "EUR",
            Currency::GBP => "GBP",
            Currency::JPY => "JPY",
            Currency::USD => "USD",
        }
    }

    /// Number of minor-unit digits.
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }

    /// Rounds an amount to the currency's minor unit.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_core::types::currency::Currency;
    ///
    /// assert_eq!(Currency::USD.round(1.005_1), 1.01);
    /// assert_eq!(Currency::JPY.round(1234.6), 1235.0);
    /// ```
    pub fn round(&self, amount: f64) -> f64 {
        let scale = 10f64.powi(self.decimal_places() as i32);
        (amount * scale).round() / scale
    }
}

impl FromStr for Currency {
    type Err = CurrencyError;

    /// Parses an ISO code, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        Currency::ALL
            .iter()
            .copied()
            .find(|c| c.code() == upper)
            .ok_or(CurrencyError::UnknownCurrency(s.to_string()))
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_round_trip_through_parse() {
        for ccy in Currency::ALL {
            assert_eq!(ccy.code().parse::<Currency>().unwrap(), ccy);
            assert_eq!(format!("{}", ccy), ccy.code());
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(" usd ".parse::<Currency>().unwrap(), Currency::USD);
        assert_eq!("Eur".parse::<Currency>().unwrap(), Currency::EUR);
    }

    #[test]
    fn test_parse_unknown() {
        let err = "XXX".parse::<Currency>().unwrap_err();
        assert_eq!(err, CurrencyError::UnknownCurrency("XXX".to_string()));
    }

    #[test]
    fn test_decimal_places_and_rounding() {
        assert_eq!(Currency::GBP.decimal_places(), 2);
        assert_eq!(Currency::JPY.decimal_places(), 0);
        assert_eq!(Currency::EUR.round(-2.344), -2.34);
    }

    #[test]
    fn test_ordering_follows_code() {
        let mut sorted = Currency::ALL.to_vec();
        sorted.sort_by_key(|c| c.code());
        assert_eq!(sorted, Currency::ALL.to_vec());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_uses_code() {
        let json = serde_json::to_string(&Currency::GBP).unwrap();
        assert_eq!(json, "\"GBP\"");
        let back: Currency = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Currency::GBP);
    }
}
