//! Curve parameter sensitivities.

use crate::market_data::curves::CurveId;
use crate::types::Currency;

/// Derivatives of a value in `currency` with respect to each parameter
/// of one curve.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyParameterSensitivity {
    /// Curve
    pub curve: CurveId,
    /// Currency of the differentiated value
    pub currency: Currency,
    /// One derivative per curve parameter
    pub values: Vec<f64>,
}

impl CurrencyParameterSensitivity {
    /// New sensitivity vector.
    pub fn new(curve: CurveId, currency: Currency, values: Vec<f64>) -> Self {
        Self {
            curve,
            currency,
            values,
        }
    }

    /// Sum of the parameter derivatives (parallel shift).
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Parameter sensitivities across curves, one vector per
/// `(curve, currency)`.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::CurveId;
/// use pricer_core::sensitivity::{CurrencyParameterSensitivities, CurrencyParameterSensitivity};
/// use pricer_core::types::Currency;
///
/// let id = CurveId::Discount(Currency::USD);
/// let sens = CurrencyParameterSensitivities::empty()
///     .plus(CurrencyParameterSensitivity::new(id, Currency::USD, vec![1.0, 2.0]))
///     .plus(CurrencyParameterSensitivity::new(id, Currency::USD, vec![0.5, 0.0]));
///
/// assert_eq!(sens.len(), 1);
/// assert_eq!(sens.get(id, Currency::USD).unwrap().values, vec![1.5, 2.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyParameterSensitivities {
    entries: Vec<CurrencyParameterSensitivity>,
}

impl CurrencyParameterSensitivities {
    /// No sensitivity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Adds a vector, summing element-wise into an existing entry for the
    /// same curve and currency. Entries stay sorted by curve then currency.
    pub fn plus(mut self, sensitivity: CurrencyParameterSensitivity) -> Self {
        match self
            .entries
            .binary_search_by(|e| (e.curve, e.currency).cmp(&(sensitivity.curve, sensitivity.currency)))
        {
            Ok(pos) => {
                let existing = &mut self.entries[pos].values;
                if existing.len() < sensitivity.values.len() {
                    existing.resize(sensitivity.values.len(), 0.0);
                }
                for (slot, v) in existing.iter_mut().zip(sensitivity.values) {
                    *slot += v;
                }
            }
            Err(pos) => self.entries.insert(pos, sensitivity),
        }
        self
    }

    /// Merges another collection.
    pub fn combined_with(self, other: CurrencyParameterSensitivities) -> Self {
        other.entries.into_iter().fold(self, Self::plus)
    }

    /// Scales every value.
    pub fn multiplied_by(mut self, factor: f64) -> Self {
        for entry in &mut self.entries {
            entry.values.iter_mut().for_each(|v| *v *= factor);
        }
        self
    }

    /// Entry for a curve and currency.
    pub fn get(&self, curve: CurveId, currency: Currency) -> Option<&CurrencyParameterSensitivity> {
        self.entries
            .iter()
            .find(|e| e.curve == curve && e.currency == currency)
    }

    /// Entries in curve order.
    pub fn iter(&self) -> impl Iterator<Item = &CurrencyParameterSensitivity> + '_ {
        self.entries.iter()
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there is no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether both agree within `tolerance`; a missing entry compares as zeros.
    pub fn equal_with_tolerance(&self, other: &CurrencyParameterSensitivities, tolerance: f64) -> bool {
        let diff = self.clone().combined_with(other.clone().multiplied_by(-1.0));
        let equal = diff
            .iter()
            .all(|e| e.values.iter().all(|v| v.abs() <= tolerance));
        equal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OvernightIndex;

    #[test]
    fn test_entries_sorted_and_merged() {
        let dsc = CurveId::Discount(Currency::GBP);
        let fwd = CurveId::Overnight(OvernightIndex::Sonia);
        let sens = CurrencyParameterSensitivities::empty()
            .plus(CurrencyParameterSensitivity::new(fwd, Currency::GBP, vec![1.0]))
            .plus(CurrencyParameterSensitivity::new(dsc, Currency::GBP, vec![2.0, 3.0]))
            .plus(CurrencyParameterSensitivity::new(dsc, Currency::USD, vec![1.0, 1.0]));
        let curves: Vec<CurveId> = sens.iter().map(|e| e.curve).collect();
        assert_eq!(curves, vec![dsc, dsc, fwd]);
        assert_eq!(sens.get(dsc, Currency::GBP).unwrap().total(), 5.0);
    }

    #[test]
    fn test_equal_with_tolerance() {
        let dsc = CurveId::Discount(Currency::GBP);
        let a = CurrencyParameterSensitivities::empty()
            .plus(CurrencyParameterSensitivity::new(dsc, Currency::GBP, vec![1.0, 2.0]));
        let b = CurrencyParameterSensitivities::empty()
            .plus(CurrencyParameterSensitivity::new(dsc, Currency::GBP, vec![1.0, 2.0 + 1e-7]));
        assert!(a.equal_with_tolerance(&b, 1e-6));
        assert!(!a.equal_with_tolerance(&CurrencyParameterSensitivities::empty(), 1e-6));

        let zeros = CurrencyParameterSensitivities::empty()
            .plus(CurrencyParameterSensitivity::new(dsc, Currency::USD, vec![0.0, 0.0]));
        assert!(zeros.equal_with_tolerance(&CurrencyParameterSensitivities::empty(), 0.0));
    }
}
