//! Multi-curve container.

use super::{CurveEnum, CurveId, ParameterizedCurve};
use crate::market_data::error::MarketDataError;
use num_traits::Float;
use std::collections::HashMap;

/// Zero-rate curves keyed by [`CurveId`].
///
/// Discount curves are keyed per currency and forward curves per index,
/// so a single set carries the whole multi-curve environment.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::{CurveEnum, CurveId, CurveSet, YieldCurve};
/// use pricer_core::types::{Currency, OvernightIndex};
///
/// let mut curves = CurveSet::new();
/// curves.insert(CurveId::Discount(Currency::USD), CurveEnum::flat(0.03));
/// curves.insert(CurveId::Overnight(OvernightIndex::Sofr), CurveEnum::flat(0.031));
///
/// let dsc = curves.get_or_err(&CurveId::Discount(Currency::USD)).unwrap();
/// assert!(dsc.discount_factor(1.0).unwrap() < 1.0);
/// assert!(curves.get_or_err(&CurveId::Discount(Currency::EUR)).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct CurveSet<T: Float> {
    curves: HashMap<CurveId, CurveEnum<T>>,
}

impl<T: Float> Default for CurveSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Float> CurveSet<T> {
    /// Empty set.
    #[inline]
    pub fn new() -> Self {
        Self {
            curves: HashMap::new(),
        }
    }

    /// Inserts or replaces a curve.
    #[inline]
    pub fn insert(&mut self, id: CurveId, curve: CurveEnum<T>) {
        self.curves.insert(id, curve);
    }

    /// Curve for `id`, if present.
    #[inline]
    pub fn get(&self, id: &CurveId) -> Option<&CurveEnum<T>> {
        self.curves.get(id)
    }

    /// Curve for `id`.
    ///
    /// # Errors
    ///
    /// `MarketDataError::CurveNotFound` if absent.
    pub fn get_or_err(&self, id: &CurveId) -> Result<&CurveEnum<T>, MarketDataError> {
        self.curves
            .get(id)
            .ok_or(MarketDataError::CurveNotFound { curve: *id })
    }

    /// Whether a curve is registered for `id`.
    #[inline]
    pub fn contains(&self, id: &CurveId) -> bool {
        self.curves.contains_key(id)
    }

    /// Removes and returns a curve.
    pub fn remove(&mut self, id: &CurveId) -> Option<CurveEnum<T>> {
        self.curves.remove(id)
    }

    /// Number of curves.
    #[inline]
    pub fn len(&self) -> usize {
        self.curves.len()
    }

    /// Whether the set holds no curve.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.curves.is_empty()
    }

    /// Registered identifiers, sorted.
    pub fn ids(&self) -> Vec<CurveId> {
        let mut ids: Vec<CurveId> = self.curves.keys().copied().collect();
        ids.sort();
        ids
    }
}

impl CurveSet<f64> {
    /// Copy of the set with one parameter of one curve replaced.
    pub fn with_parameter(
        &self,
        id: &CurveId,
        index: usize,
        value: f64,
    ) -> Result<Self, MarketDataError> {
        let bumped = self.get_or_err(id)?.with_parameter(index, value)?;
        let mut set = self.clone();
        set.insert(*id, bumped);
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::market_data::curves::YieldCurve;
    use crate::types::{Currency, IborIndex};

    #[test]
    fn test_insert_replace_remove() {
        let mut set = CurveSet::new();
        let id = CurveId::Ibor(IborIndex::Euribor3M);
        set.insert(id, CurveEnum::flat(0.01));
        set.insert(id, CurveEnum::flat(0.02));
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(&id).unwrap().zero_rate(1.0).unwrap(), 0.02);
        assert!(set.remove(&id).is_some());
        assert!(set.is_empty());
    }

    #[test]
    fn test_get_or_err_reports_curve() {
        let set: CurveSet<f64> = CurveSet::new();
        let id = CurveId::Discount(Currency::GBP);
        assert_eq!(
            set.get_or_err(&id).unwrap_err(),
            MarketDataError::CurveNotFound { curve: id }
        );
    }

    #[test]
    fn test_with_parameter_leaves_original_untouched() {
        let mut set = CurveSet::new();
        let id = CurveId::Discount(Currency::USD);
        set.insert(id, CurveEnum::flat(0.01));
        let bumped = set.with_parameter(&id, 0, 0.011).unwrap();
        assert_eq!(set.get(&id).unwrap().zero_rate(1.0).unwrap(), 0.01);
        assert_eq!(bumped.get(&id).unwrap().zero_rate(1.0).unwrap(), 0.011);
        assert_eq!(bumped.ids(), vec![id]);
    }
}
