//! Point sensitivities: derivatives with respect to market quantities.

use std::collections::BTreeMap;
use std::fmt;

use crate::market_data::curves::CurveId;
use crate::types::{Currency, Date, IborIndex, OvernightIndex, PriceIndex, YearMonth};

/// Market quantity a point sensitivity is taken against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SensitivityKey {
    /// Continuously compounded zero rate of a discount curve at a date.
    ZeroRate {
        /// Currency of the discount curve
        curve_currency: Currency,
        /// Date the zero rate applies to
        date: Date,
    },
    /// Forward rate of a term index.
    IborRate {
        /// Index
        index: IborIndex,
        /// Fixing date
        fixing_date: Date,
    },
    /// Forward rate of an overnight index over `[fixing_date, end_date)`.
    OvernightRate {
        /// Index
        index: OvernightIndex,
        /// Fixing date
        fixing_date: Date,
        /// End of the forward period
        end_date: Date,
    },
    /// Projected price index level.
    InflationRate {
        /// Index
        index: PriceIndex,
        /// Reference month
        reference_month: YearMonth,
    },
}

impl SensitivityKey {
    /// Curve the quantity is read from.
    pub fn curve_id(&self) -> CurveId {
        match self {
            SensitivityKey::ZeroRate { curve_currency, .. } => CurveId::Discount(*curve_currency),
            SensitivityKey::IborRate { index, .. } => CurveId::Ibor(*index),
            SensitivityKey::OvernightRate { index, .. } => CurveId::Overnight(*index),
            SensitivityKey::InflationRate { index, .. } => CurveId::PriceIndex(*index),
        }
    }
}

impl fmt::Display for SensitivityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SensitivityKey::ZeroRate { curve_currency, date } => {
                write!(f, "ZeroRate[{}-DSC {}]", curve_currency, date)
            }
            SensitivityKey::IborRate { index, fixing_date } => {
                write!(f, "IborRate[{} {}]", index, fixing_date)
            }
            SensitivityKey::OvernightRate {
                index,
                fixing_date,
                end_date,
            } => write!(f, "OvernightRate[{} {}..{}]", index, fixing_date, end_date),
            SensitivityKey::InflationRate {
                index,
                reference_month,
            } => write!(f, "InflationRate[{} {}]", index, reference_month),
        }
    }
}

/// Derivative of a value expressed in `currency` with respect to the
/// quantity named by `key`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSensitivity {
    /// Market quantity
    pub key: SensitivityKey,
    /// Currency of the differentiated value
    pub currency: Currency,
    /// Derivative
    pub sensitivity: f64,
}

impl PointSensitivity {
    /// New point.
    pub fn new(key: SensitivityKey, currency: Currency, sensitivity: f64) -> Self {
        Self {
            key,
            currency,
            sensitivity,
        }
    }
}

/// Additive collection of point sensitivities.
///
/// Entries are kept as added until [`normalized`](PointSensitivities::normalized)
/// merges equal `(key, currency)` pairs and sorts them.
///
/// # Example
///
/// ```
/// use pricer_core::sensitivity::{PointSensitivities, PointSensitivity, SensitivityKey};
/// use pricer_core::types::{Currency, Date};
///
/// let key = SensitivityKey::ZeroRate {
///     curve_currency: Currency::USD,
///     date: Date::from_ymd(2025, 1, 2).unwrap(),
/// };
/// let a = PointSensitivities::of(PointSensitivity::new(key, Currency::USD, 2.0));
/// let b = PointSensitivities::of(PointSensitivity::new(key, Currency::USD, 3.0));
///
/// let total = a.combined_with(b).multiplied_by(2.0).normalized();
/// assert_eq!(total.len(), 1);
/// assert_eq!(total.iter().next().unwrap().sensitivity, 10.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PointSensitivities {
    points: Vec<PointSensitivity>,
}

impl PointSensitivities {
    /// No sensitivity.
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Single point.
    pub fn of(point: PointSensitivity) -> Self {
        Self {
            points: vec![point],
        }
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there is no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Entries.
    pub fn iter(&self) -> impl Iterator<Item = &PointSensitivity> + '_ {
        self.points.iter()
    }

    /// Appends the entries of `other`.
    pub fn combined_with(mut self, other: PointSensitivities) -> Self {
        self.points.extend(other.points);
        self
    }

    /// Appends a single entry.
    pub fn plus_point(mut self, point: PointSensitivity) -> Self {
        self.points.push(point);
        self
    }

    /// Scales every entry.
    pub fn multiplied_by(mut self, factor: f64) -> Self {
        for point in &mut self.points {
            point.sensitivity *= factor;
        }
        self
    }

    /// Retags every entry with `currency`.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        for point in &mut self.points {
            point.currency = currency;
        }
        self
    }

    /// Merges entries sharing `(key, currency)` and sorts by them.
    pub fn normalized(self) -> Self {
        let mut merged: BTreeMap<(SensitivityKey, Currency), f64> = BTreeMap::new();
        for point in self.points {
            *merged.entry((point.key, point.currency)).or_insert(0.0) += point.sensitivity;
        }
        Self {
            points: merged
                .into_iter()
                .map(|((key, currency), sensitivity)| PointSensitivity::new(key, currency, sensitivity))
                .collect(),
        }
    }

    /// Whether both collections agree within `tolerance` once normalized.
    ///
    /// An entry missing on one side compares against zero.
    pub fn equal_with_tolerance(&self, other: &PointSensitivities, tolerance: f64) -> bool {
        let mut diff: BTreeMap<(SensitivityKey, Currency), f64> = BTreeMap::new();
        for point in &self.points {
            *diff.entry((point.key, point.currency)).or_insert(0.0) += point.sensitivity;
        }
        for point in &other.points {
            *diff.entry((point.key, point.currency)).or_insert(0.0) -= point.sensitivity;
        }
        diff.values().all(|d| d.abs() <= tolerance)
    }
}

impl FromIterator<PointSensitivity> for PointSensitivities {
    fn from_iter<I: IntoIterator<Item = PointSensitivity>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for PointSensitivities {
    type Item = PointSensitivity;
    type IntoIter = std::vec::IntoIter<PointSensitivity>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.into_iter()
    }
}
