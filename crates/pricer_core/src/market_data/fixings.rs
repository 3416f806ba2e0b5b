//! Published index fixings.
//!
//! This module provides:
//! - [`TimeSeries`]: ordered observations keyed by date or month
//! - [`DateSeries`]: daily fixings of term and overnight indices
//! - [`MonthlySeries`]: published price index levels

use std::collections::BTreeMap;

use crate::types::{Date, YearMonth};

/// Ordered series of observed values.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::DateSeries;
/// use pricer_core::types::Date;
///
/// let d1 = Date::from_ymd(2024, 1, 2).unwrap();
/// let d2 = Date::from_ymd(2024, 1, 3).unwrap();
/// let series: DateSeries = [(d2, 0.0531), (d1, 0.0530)].into_iter().collect();
///
/// assert_eq!(series.get(d1), Some(0.0530));
/// assert_eq!(series.latest(), Some((d2, 0.0531)));
/// assert_eq!(series.get(Date::from_ymd(2024, 1, 4).unwrap()), None);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimeSeries<K: Ord> {
    points: BTreeMap<K, f64>,
}

/// Daily fixings.
pub type DateSeries = TimeSeries<Date>;

/// Monthly index levels.
pub type MonthlySeries = TimeSeries<YearMonth>;

impl<K: Ord> Default for TimeSeries<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Ord> TimeSeries<K> {
    /// Empty series.
    pub fn new() -> Self {
        Self {
            points: BTreeMap::new(),
        }
    }

    /// Adds or replaces an observation.
    pub fn insert(&mut self, key: K, value: f64) {
        self.points.insert(key, value);
    }

    /// Builder-style [`insert`](TimeSeries::insert).
    pub fn with(mut self, key: K, value: f64) -> Self {
        self.insert(key, value);
        self
    }

    /// Observation at `key`.
    #[inline]
    pub fn get(&self, key: K) -> Option<f64> {
        self.points.get(&key).copied()
    }

    /// Most recent observation.
    pub fn latest(&self) -> Option<(K, f64)>
    where
        K: Copy,
    {
        self.points.iter().next_back().map(|(k, v)| (*k, *v))
    }

    /// Number of observations.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observation.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Observations in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> + '_ {
        self.points.iter().map(|(k, v)| (k, *v))
    }
}

impl<K: Ord> FromIterator<(K, f64)> for TimeSeries<K> {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces() {
        let month = YearMonth::new(2015, 1).unwrap();
        let series = MonthlySeries::new().with(month, 250.0).with(month, 251.0);
        assert_eq!(series.len(), 1);
        assert_eq!(series.get(month), Some(251.0));
    }

    #[test]
    fn test_iter_is_ordered() {
        let months: Vec<YearMonth> = (1..=3).rev().map(|m| YearMonth::new(2015, m).unwrap()).collect();
        let series: MonthlySeries = months.iter().map(|m| (*m, m.month() as f64)).collect();
        let values: Vec<f64> = series.iter().map(|(_, v)| v).collect();
        assert_eq!(values, vec![1.0, 2.0, 3.0]);
        assert!(!series.is_empty());
    }

    #[test]
    fn test_empty_latest() {
        let series = DateSeries::default();
        assert!(series.latest().is_none());
        assert!(series.is_empty());
    }
}
