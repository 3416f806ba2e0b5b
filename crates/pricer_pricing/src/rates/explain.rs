//! Explain map: a structured breakdown of a present value calculation.

use std::fmt;

use pricer_core::types::{Currency, CurrencyAmount, Date, YearMonth};

/// Key of an explain entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[derive(serde::Serialize)]
pub enum ExplainKey {
    /// Kind of the explained object.
    EntryType,
    /// Position of the entry within its parent list.
    EntryIndex,
    /// Swap legs.
    Legs,
    /// Leg type.
    LegType,
    /// Pay or receive.
    PayReceive,
    /// Payment periods of a leg.
    PaymentPeriods,
    /// Payment events of a leg.
    PaymentEvents,
    /// Accrual periods of a payment period.
    AccrualPeriods,
    /// Index observations of an accrual period.
    Observations,
    /// Payment date.
    PaymentDate,
    /// Accrual start.
    StartDate,
    /// Accrual end.
    EndDate,
    /// Unadjusted accrual start.
    UnadjustedStartDate,
    /// Unadjusted accrual end.
    UnadjustedEndDate,
    /// Accrual year fraction.
    AccrualYearFraction,
    /// Currency.
    Currency,
    /// Signed notional.
    Notional,
    /// Compounding method.
    CompoundingMethod,
    /// Fixed rate.
    FixedRate,
    /// Observed index.
    Index,
    /// Fixing date of an observation.
    FixingDate,
    /// Reference month of a price index observation.
    ReferenceMonth,
    /// Observed index value.
    IndexValue,
    /// Number of daily fixings.
    FixingCount,
    /// Gearing.
    Gearing,
    /// Spread.
    Spread,
    /// Negative rate method.
    NegativeRateMethod,
    /// Rate returned by the observation.
    ObservedRate,
    /// Rate after gearing, spread and floor.
    AccrualRate,
    /// Accrued amount per unit of notional.
    UnitAmount,
    /// Discount factor to the payment date.
    DiscountFactor,
    /// Undiscounted value.
    ForecastValue,
    /// Discounted value.
    PresentValue,
    /// Whether the flow is already paid.
    Completed,
}

impl ExplainKey {
    /// Name of the key.
    pub fn name(&self) -> &'static str {
        match self {
            ExplainKey::EntryType => "EntryType",
            ExplainKey::EntryIndex => "EntryIndex",
            ExplainKey::Legs => "Legs",
            ExplainKey::LegType => "LegType",
            ExplainKey::PayReceive => "PayReceive",
            ExplainKey::PaymentPeriods => "PaymentPeriods",
            ExplainKey::PaymentEvents => "PaymentEvents",
            ExplainKey::AccrualPeriods => "AccrualPeriods",
            ExplainKey::Observations => "Observations",
            ExplainKey::PaymentDate => "PaymentDate",
            ExplainKey::StartDate => "StartDate",
            ExplainKey::EndDate => "EndDate",
            ExplainKey::UnadjustedStartDate => "UnadjustedStartDate",
            ExplainKey::UnadjustedEndDate => "UnadjustedEndDate",
            ExplainKey::AccrualYearFraction => "AccrualYearFraction",
            ExplainKey::Currency => "Currency",
            ExplainKey::Notional => "Notional",
            ExplainKey::CompoundingMethod => "CompoundingMethod",
            ExplainKey::FixedRate => "FixedRate",
            ExplainKey::Index => "Index",
            ExplainKey::FixingDate => "FixingDate",
            ExplainKey::ReferenceMonth => "ReferenceMonth",
            ExplainKey::IndexValue => "IndexValue",
            ExplainKey::FixingCount => "FixingCount",
            ExplainKey::Gearing => "Gearing",
            ExplainKey::Spread => "Spread",
            ExplainKey::NegativeRateMethod => "NegativeRateMethod",
            ExplainKey::ObservedRate => "ObservedRate",
            ExplainKey::AccrualRate => "AccrualRate",
            ExplainKey::UnitAmount => "UnitAmount",
            ExplainKey::DiscountFactor => "DiscountFactor",
            ExplainKey::ForecastValue => "ForecastValue",
            ExplainKey::PresentValue => "PresentValue",
            ExplainKey::Completed => "Completed",
        }
    }
}

impl fmt::Display for ExplainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Value of an explain entry.
#[derive(Debug, Clone, PartialEq)]
#[derive(serde::Serialize)]
pub enum ExplainValue {
    /// Free text.
    Text(String),
    /// Flag.
    Bool(bool),
    /// Count or index.
    Integer(usize),
    /// Number.
    Number(f64),
    /// Date.
    Date(Date),
    /// Month.
    Month(YearMonth),
    /// Currency.
    Currency(Currency),
    /// Amount in a currency.
    Amount(CurrencyAmount),
    /// Nested entries.
    List(Vec<ExplainMap>),
}

impl From<&str> for ExplainValue {
    fn from(value: &str) -> Self {
        ExplainValue::Text(value.to_string())
    }
}

impl From<String> for ExplainValue {
    fn from(value: String) -> Self {
        ExplainValue::Text(value)
    }
}

impl From<bool> for ExplainValue {
    fn from(value: bool) -> Self {
        ExplainValue::Bool(value)
    }
}

impl From<usize> for ExplainValue {
    fn from(value: usize) -> Self {
        ExplainValue::Integer(value)
    }
}

impl From<f64> for ExplainValue {
    fn from(value: f64) -> Self {
        ExplainValue::Number(value)
    }
}

impl From<Date> for ExplainValue {
    fn from(value: Date) -> Self {
        ExplainValue::Date(value)
    }
}

impl From<YearMonth> for ExplainValue {
    fn from(value: YearMonth) -> Self {
        ExplainValue::Month(value)
    }
}

impl From<Currency> for ExplainValue {
    fn from(value: Currency) -> Self {
        ExplainValue::Currency(value)
    }
}

impl From<CurrencyAmount> for ExplainValue {
    fn from(value: CurrencyAmount) -> Self {
        ExplainValue::Amount(value)
    }
}

/// Ordered key/value breakdown of a calculation.
///
/// Keys are unique within one map; list entries nest further maps.
///
/// # Examples
///
/// ```
/// use pricer_pricing::rates::{ExplainKey, ExplainMap};
///
/// let mut leg = ExplainMap::new();
/// leg.put(ExplainKey::EntryType, "Leg");
///
/// let mut swap = ExplainMap::new();
/// swap.put(ExplainKey::EntryType, "Swap");
/// swap.add_list_entry_with_index(ExplainKey::Legs, leg);
///
/// assert_eq!(swap.get_text(ExplainKey::EntryType), Some("Swap"));
/// assert_eq!(swap.get_list(ExplainKey::Legs).len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(serde::Serialize)]
pub struct ExplainMap {
    entries: Vec<(ExplainKey, ExplainValue)>,
}

impl ExplainMap {
    /// Empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an entry, replacing any previous value for the key.
    pub fn put(&mut self, key: ExplainKey, value: impl Into<ExplainValue>) -> &mut Self {
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Appends a nested map to the list under `key`.
    pub fn add_list_entry(&mut self, key: ExplainKey, child: ExplainMap) -> &mut Self {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, ExplainValue::List(list))) => list.push(child),
            Some(entry) => entry.1 = ExplainValue::List(vec![child]),
            None => self.entries.push((key, ExplainValue::List(vec![child]))),
        }
        self
    }

    /// Appends a nested map tagged with its position in the list.
    pub fn add_list_entry_with_index(&mut self, key: ExplainKey, mut child: ExplainMap) -> &mut Self {
        let index = self.get_list(key).len();
        child.put(ExplainKey::EntryIndex, index);
        self.add_list_entry(key, child)
    }

    /// Value for `key`.
    pub fn get(&self, key: ExplainKey) -> Option<&ExplainValue> {
        self.entries.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    /// Numeric value for `key`.
    pub fn get_number(&self, key: ExplainKey) -> Option<f64> {
        match self.get(key) {
            Some(ExplainValue::Number(v)) => Some(*v),
            _ => None,
        }
    }

    /// Text value for `key`.
    pub fn get_text(&self, key: ExplainKey) -> Option<&str> {
        match self.get(key) {
            Some(ExplainValue::Text(v)) => Some(v.as_str()),
            _ => None,
        }
    }

    /// Amount value for `key`.
    pub fn get_amount(&self, key: ExplainKey) -> Option<CurrencyAmount> {
        match self.get(key) {
            Some(ExplainValue::Amount(v)) => Some(*v),
            _ => None,
        }
    }

    /// Nested maps under `key`; empty when absent.
    pub fn get_list(&self, key: ExplainKey) -> &[ExplainMap] {
        match self.get(key) {
            Some(ExplainValue::List(list)) => list,
            _ => &[],
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entry.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ExplainKey, &ExplainValue)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, v))
    }
}
