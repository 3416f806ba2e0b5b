//! Currency-tagged amounts.
//!
//! - [`CurrencyAmount`]: a single amount in one currency
//! - [`MultiCurrencyAmount`]: one amount per currency, never converted implicitly
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyAmount, MultiCurrencyAmount};
//!
//! let total: MultiCurrencyAmount = vec![
//!     CurrencyAmount::new(Currency::USD, 100.0),
//!     CurrencyAmount::new(Currency::EUR, 50.0),
//!     CurrencyAmount::new(Currency::USD, -30.0),
//! ]
//! .into_iter()
//! .collect();
//!
//! assert_eq!(total.len(), 2);
//! assert_eq!(total.amount_or_zero(Currency::USD), 70.0);
//! ```

use std::collections::BTreeMap;
use std::fmt;

use super::currency::Currency;
use super::error::CurrencyError;

/// An amount of money in a single currency.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyAmount {
    currency: Currency,
    amount: f64,
}

impl CurrencyAmount {
    /// Creates an amount.
    #[inline]
    pub fn new(currency: Currency, amount: f64) -> Self {
        Self { currency, amount }
    }

    /// Zero in `currency`.
    #[inline]
    pub fn zero(currency: Currency) -> Self {
        Self::new(currency, 0.0)
    }

    /// Currency of the amount.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Numeric value.
    #[inline]
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// Adds an amount in the same currency.
    ///
    /// # Errors
    ///
    /// `CurrencyError::Mismatch` if the currencies differ.
    pub fn plus(&self, other: CurrencyAmount) -> Result<Self, CurrencyError> {
        if other.currency != self.currency {
            return Err(CurrencyError::Mismatch {
                expected: self.currency,
                found: other.currency,
            });
        }
        Ok(Self::new(self.currency, self.amount + other.amount))
    }

    /// Scales the amount.
    #[inline]
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self::new(self.currency, self.amount * factor)
    }

    /// Flips the sign.
    #[inline]
    pub fn negated(&self) -> Self {
        self.multiplied_by(-1.0)
    }

    /// Converts into `target` at `rate` units of target per unit of this currency.
    pub fn convert_to(&self, target: Currency, rate: f64) -> Self {
        if target == self.currency {
            *self
        } else {
            Self::new(target, self.amount * rate)
        }
    }
}

impl fmt::Display for CurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

/// A collection of amounts keyed by currency.
///
/// Each currency appears at most once; adding an amount in a currency
/// already present merges into the existing entry. Iteration is in
/// currency code order.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MultiCurrencyAmount {
    amounts: BTreeMap<Currency, f64>,
}

impl MultiCurrencyAmount {
    /// Empty collection.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Collection with one entry.
    pub fn of(currency: Currency, amount: f64) -> Self {
        let mut amounts = BTreeMap::new();
        amounts.insert(currency, amount);
        Self { amounts }
    }

    /// Number of currencies held.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    /// Whether no currency is held.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Currencies held, in code order.
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        self.amounts.keys().copied()
    }

    /// Entries as currency amounts, in code order.
    pub fn iter(&self) -> impl Iterator<Item = CurrencyAmount> + '_ {
        self.amounts
            .iter()
            .map(|(&ccy, &amount)| CurrencyAmount::new(ccy, amount))
    }

    /// Whether `currency` is held.
    pub fn contains(&self, currency: Currency) -> bool {
        self.amounts.contains_key(&currency)
    }

    /// Amount in `currency`, if held.
    pub fn amount(&self, currency: Currency) -> Option<CurrencyAmount> {
        self.amounts
            .get(&currency)
            .map(|&amount| CurrencyAmount::new(currency, amount))
    }

    /// Amount in `currency`, or zero when absent.
    pub fn amount_or_zero(&self, currency: Currency) -> f64 {
        self.amounts.get(&currency).copied().unwrap_or(0.0)
    }

    /// Adds a single amount, merging on currency.
    pub fn plus_amount(mut self, amount: CurrencyAmount) -> Self {
        *self.amounts.entry(amount.currency()).or_insert(0.0) += amount.amount();
        self
    }

    /// Adds every entry of `other`.
    pub fn plus(self, other: &MultiCurrencyAmount) -> Self {
        other.iter().fold(self, |acc, amount| acc.plus_amount(amount))
    }

    /// Subtracts every entry of `other`.
    pub fn minus(self, other: &MultiCurrencyAmount) -> Self {
        other
            .iter()
            .fold(self, |acc, amount| acc.plus_amount(amount.negated()))
    }

    /// Scales every entry.
    pub fn multiplied_by(&self, factor: f64) -> Self {
        Self {
            amounts: self
                .amounts
                .iter()
                .map(|(&ccy, &amount)| (ccy, amount * factor))
                .collect(),
        }
    }

    /// Converts every entry into `target` and sums them.
    ///
    /// `fx_rate(from, to)` supplies the conversion rate; its error is
    /// propagated unchanged.
    pub fn convert_to<E, F>(&self, target: Currency, fx_rate: F) -> Result<CurrencyAmount, E>
    where
        F: Fn(Currency, Currency) -> Result<f64, E>,
    {
        let mut total = 0.0;
        for (&ccy, &amount) in &self.amounts {
            let rate = if ccy == target { 1.0 } else { fx_rate(ccy, target)? };
            total += amount * rate;
        }
        Ok(CurrencyAmount::new(target, total))
    }
}

impl From<CurrencyAmount> for MultiCurrencyAmount {
    fn from(amount: CurrencyAmount) -> Self {
        Self::of(amount.currency(), amount.amount())
    }
}

impl FromIterator<CurrencyAmount> for MultiCurrencyAmount {
    fn from_iter<I: IntoIterator<Item = CurrencyAmount>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |acc, amount| acc.plus_amount(amount))
    }
}

impl fmt::Display for MultiCurrencyAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|a| a.to_string()).collect();
        write!(f, "[{}]", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_currency_amount_plus_same_currency() {
        let a = CurrencyAmount::new(Currency::GBP, 10.0);
        let b = a.plus(CurrencyAmount::new(Currency::GBP, 2.5)).unwrap();
        assert_eq!(b.amount(), 12.5);
    }

    #[test]
    fn test_currency_amount_plus_mismatch() {
        let a = CurrencyAmount::new(Currency::GBP, 10.0);
        let err = a.plus(CurrencyAmount::new(Currency::USD, 1.0)).unwrap_err();
        assert_eq!(
            err,
            CurrencyError::Mismatch {
                expected: Currency::GBP,
                found: Currency::USD
            }
        );
    }

    #[test]
    fn test_currency_amount_convert() {
        let a = CurrencyAmount::new(Currency::EUR, 100.0);
        let usd = a.convert_to(Currency::USD, 1.1);
        assert_eq!(usd.currency(), Currency::USD);
        assert_relative_eq!(usd.amount(), 110.0);
        assert_eq!(a.convert_to(Currency::EUR, 1.1), a);
        assert_eq!(a.negated().amount(), -100.0);
    }

    #[test]
    fn test_multi_currency_merges_on_currency() {
        let m = MultiCurrencyAmount::of(Currency::USD, 1.0)
            .plus_amount(CurrencyAmount::new(Currency::EUR, 2.0))
            .plus_amount(CurrencyAmount::new(Currency::USD, 3.0));
        assert_eq!(m.len(), 2);
        assert_eq!(m.amount(Currency::USD).unwrap().amount(), 4.0);
        assert!(m.amount(Currency::JPY).is_none());
        assert_eq!(m.amount_or_zero(Currency::JPY), 0.0);
        assert_eq!(m.currencies().collect::<Vec<_>>(), vec![Currency::EUR, Currency::USD]);
    }

    #[test]
    fn test_multi_currency_minus() {
        let a = MultiCurrencyAmount::of(Currency::USD, 5.0);
        let b = MultiCurrencyAmount::of(Currency::USD, 2.0)
            .plus_amount(CurrencyAmount::new(Currency::JPY, 100.0));
        let diff = a.minus(&b);
        assert_eq!(diff.amount_or_zero(Currency::USD), 3.0);
        assert_eq!(diff.amount_or_zero(Currency::JPY), -100.0);
    }

    #[test]
    fn test_multi_currency_convert_to() {
        let m = MultiCurrencyAmount::of(Currency::USD, 100.0)
            .plus_amount(CurrencyAmount::new(Currency::EUR, 10.0));
        let total = m
            .convert_to(Currency::USD, |from, to| -> Result<f64, String> {
                match (from, to) {
                    (Currency::EUR, Currency::USD) => Ok(1.2),
                    _ => Err(format!("{}/{}", from, to)),
                }
            })
            .unwrap();
        assert_relative_eq!(total.amount(), 112.0);

        let err = m
            .convert_to(Currency::GBP, |from, to| -> Result<f64, String> {
                Err(format!("{}/{}", from, to))
            })
            .unwrap_err();
        assert_eq!(err, "EUR/GBP");
    }

    #[test]
    fn test_display() {
        let m = MultiCurrencyAmount::of(Currency::USD, 1.5);
        assert_eq!(m.to_string(), "[USD 1.5]");
    }

    fn currency_strategy() -> impl Strategy<Value = Currency> {
        prop::sample::select(Currency::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn prop_collect_is_order_independent(
            entries in prop::collection::vec((currency_strategy(), -1e6..1e6f64), 0..20)
        ) {
            let forward: MultiCurrencyAmount = entries
                .iter()
                .map(|&(c, a)| CurrencyAmount::new(c, a))
                .collect();
            let backward: MultiCurrencyAmount = entries
                .iter()
                .rev()
                .map(|&(c, a)| CurrencyAmount::new(c, a))
                .collect();
            prop_assert_eq!(forward.len(), backward.len());
            for ccy in forward.currencies() {
                let diff = (forward.amount_or_zero(ccy) - backward.amount_or_zero(ccy)).abs();
                prop_assert!(diff < 1e-6);
            }
        }

        #[test]
        fn prop_plus_matches_per_currency_sum(
            a in prop::collection::vec((currency_strategy(), -1e3..1e3f64), 0..10),
            b in prop::collection::vec((currency_strategy(), -1e3..1e3f64), 0..10),
        ) {
            let ma: MultiCurrencyAmount = a.iter().map(|&(c, x)| CurrencyAmount::new(c, x)).collect();
            let mb: MultiCurrencyAmount = b.iter().map(|&(c, x)| CurrencyAmount::new(c, x)).collect();
            let sum = ma.clone().plus(&mb);
            for ccy in Currency::ALL {
                let expected = ma.amount_or_zero(ccy) + mb.amount_or_zero(ccy);
                prop_assert!((sum.amount_or_zero(ccy) - expected).abs() < 1e-9);
            }
        }
    }
}
