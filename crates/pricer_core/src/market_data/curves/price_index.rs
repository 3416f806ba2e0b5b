//! Monthly price index projection curve.

use crate::market_data::error::MarketDataError;
use crate::math::interpolators::{Interpolator, LinearInterpolator};
use crate::types::YearMonth;

/// Projected price index levels by reference month.
///
/// Node levels are the curve parameters. Between nodes the level is
/// linear in the month ordinal; outside them it is held flat.
///
/// # Example
///
/// ```
/// use pricer_core::market_data::curves::PriceIndexCurve;
/// use pricer_core::types::YearMonth;
///
/// let curve = PriceIndexCurve::new(vec![
///     (YearMonth::new(2015, 1).unwrap(), 250.0),
///     (YearMonth::new(2015, 3).unwrap(), 254.0),
/// ])
/// .unwrap();
///
/// assert_eq!(curve.value(YearMonth::new(2015, 2).unwrap()).unwrap(), 252.0);
/// assert_eq!(curve.value(YearMonth::new(2016, 1).unwrap()).unwrap(), 254.0);
/// ```
#[derive(Debug, Clone)]
pub struct PriceIndexCurve {
    months: Vec<YearMonth>,
    levels: Vec<f64>,
}

impl PriceIndexCurve {
    /// Builds a curve from `(month, level)` nodes in increasing month order.
    ///
    /// # Errors
    ///
    /// - `MarketDataError::InsufficientData` with fewer than 2 nodes
    /// - `MarketDataError::Interpolation` if months are not strictly increasing
    pub fn new(nodes: Vec<(YearMonth, f64)>) -> Result<Self, MarketDataError> {
        if nodes.len() < 2 {
            return Err(MarketDataError::InsufficientData {
                got: nodes.len(),
                need: 2,
            });
        }
        let (months, levels): (Vec<YearMonth>, Vec<f64>) = nodes.into_iter().unzip();
        let curve = Self { months, levels };
        curve.interpolator()?;
        Ok(curve)
    }

    /// Node months.
    pub fn months(&self) -> &[YearMonth] {
        &self.months
    }

    /// Node levels.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    fn interpolator(&self) -> Result<LinearInterpolator<f64>, MarketDataError> {
        let xs: Vec<f64> = self.months.iter().map(|m| m.ordinal() as f64).collect();
        Ok(LinearInterpolator::new(&xs, &self.levels)?)
    }

    /// Clamps a month into the node range.
    fn clamped(&self, month: YearMonth) -> f64 {
        let first = self.months[0].ordinal();
        let last = self.months[self.months.len() - 1].ordinal();
        month.ordinal().clamp(first, last) as f64
    }

    /// Projected level for `month`.
    pub fn value(&self, month: YearMonth) -> Result<f64, MarketDataError> {
        Ok(self.interpolator()?.interpolate(self.clamped(month))?)
    }

    /// `∂level(month)/∂node_k` for every node.
    pub fn value_parameter_sensitivity(&self, month: YearMonth) -> Result<Vec<f64>, MarketDataError> {
        let mut sensitivity = vec![0.0; self.levels.len()];
        for (k, w) in self.interpolator()?.node_weights(self.clamped(month))? {
            sensitivity[k] += w;
        }
        Ok(sensitivity)
    }

    /// Number of parameters (nodes).
    pub fn parameter_count(&self) -> usize {
        self.levels.len()
    }

    /// Copy of the curve with one node level replaced.
    pub fn with_parameter(&self, index: usize, value: f64) -> Result<Self, MarketDataError> {
        let mut bumped = self.clone();
        let count = bumped.levels.len();
        let slot = bumped
            .levels
            .get_mut(index)
            .ok_or(MarketDataError::InvalidParameterIndex { index, count })?;
        *slot = value;
        Ok(bumped)
    }
}
