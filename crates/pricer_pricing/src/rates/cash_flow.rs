//! Cash flow report.

use pricer_core::types::{CurrencyAmount, Date};

/// One future payment with its value at the valuation date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[derive(serde::Serialize)]
pub struct CashFlow {
    /// Payment date.
    pub payment_date: Date,
    /// Discounted amount.
    pub present_value: CurrencyAmount,
    /// Amount paid.
    pub forecast_value: CurrencyAmount,
    /// Discount factor applied.
    pub discount_factor: f64,
}

impl CashFlow {
    /// Cash flow of `forecast_value` paid on `payment_date`.
    pub fn of_forecast_value(payment_date: Date, forecast_value: CurrencyAmount, discount_factor: f64) -> Self {
        Self {
            payment_date,
            present_value: forecast_value.multiplied_by(discount_factor),
            forecast_value,
            discount_factor,
        }
    }
}

/// Cash flows in chronological order.
///
/// # Examples
///
/// ```
/// use pricer_core::types::{Currency, CurrencyAmount, Date};
/// use pricer_pricing::rates::{CashFlow, CashFlows};
///
/// let jan = Date::from_ymd(2025, 1, 15).unwrap();
/// let jul = Date::from_ymd(2025, 7, 15).unwrap();
/// let a = CashFlows::of(vec![CashFlow::of_forecast_value(jul, CurrencyAmount::new(Currency::EUR, 10.0), 0.98)]);
/// let b = CashFlows::of(vec![CashFlow::of_forecast_value(jan, CurrencyAmount::new(Currency::USD, 5.0), 0.99)]);
///
/// let all = a.combined_with(b);
/// assert_eq!(all.len(), 2);
/// assert_eq!(all.iter().next().unwrap().payment_date, jan);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[derive(serde::Serialize)]
pub struct CashFlows {
    flows: Vec<CashFlow>,
}

impl CashFlows {
    /// No cash flow.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Cash flows sorted by payment date; equal dates keep their order.
    pub fn of(mut flows: Vec<CashFlow>) -> Self {
        flows.sort_by_key(|f| f.payment_date);
        Self { flows }
    }

    /// Merges two collections, keeping chronological order.
    pub fn combined_with(self, other: CashFlows) -> Self {
        let mut flows = self.flows;
        flows.extend(other.flows);
        Self::of(flows)
    }

    /// Number of flows.
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Whether there is no flow.
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// Flows in chronological order.
    pub fn iter(&self) -> impl Iterator<Item = &CashFlow> + '_ {
        self.flows.iter()
    }

    /// Flow at `index`.
    pub fn get(&self, index: usize) -> Option<&CashFlow> {
        self.flows.get(index)
    }
}

impl IntoIterator for CashFlows {
    type Item = CashFlow;
    type IntoIter = std::vec::IntoIter<CashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pricer_core::types::Currency;

    fn flow(day: u32, amount: f64) -> CashFlow {
        CashFlow::of_forecast_value(
            Date::from_ymd(2025, 3, day).unwrap(),
            CurrencyAmount::new(Currency::GBP, amount),
            0.9,
        )
    }

    #[test]
    fn test_present_value_is_discounted() {
        let f = flow(1, 100.0);
        assert_eq!(f.present_value.amount(), 90.0);
        assert_eq!(f.forecast_value.amount(), 100.0);
    }

    #[test]
    fn test_combined_with_is_stable() {
        let a = CashFlows::of(vec![flow(10, 1.0), flow(20, 2.0)]);
        let b = CashFlows::of(vec![flow(10, 3.0), flow(5, 4.0)]);
        let amounts: Vec<f64> = a.combined_with(b).iter().map(|f| f.forecast_value.amount()).collect();
        assert_eq!(amounts, vec![4.0, 1.0, 3.0, 2.0]);
    }
}
