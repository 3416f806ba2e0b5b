//! Resolved swaps.

use pricer_core::types::Currency;

use super::leg::{ResolvedSwapLeg, SwapLegType};
use crate::instruments::error::InstrumentError;

/// A swap: an ordered, non-empty sequence of legs.
///
/// Leg order is preserved; it determines the reference leg for par
/// spread and the order of reported cash flows.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolvedSwap {
    legs: Vec<ResolvedSwapLeg>,
}

impl ResolvedSwap {
    /// Swap from its legs.
    ///
    /// # Errors
    ///
    /// `InstrumentError::Empty` without legs.
    pub fn new(legs: Vec<ResolvedSwapLeg>) -> Result<Self, InstrumentError> {
        if legs.is_empty() {
            return Err(InstrumentError::Empty { what: "swap legs" });
        }
        Ok(Self { legs })
    }

    /// Legs, in insertion order.
    #[inline]
    pub fn legs(&self) -> &[ResolvedSwapLeg] {
        &self.legs
    }

    /// Leg at `index`.
    #[inline]
    pub fn leg(&self, index: usize) -> Option<&ResolvedSwapLeg> {
        self.legs.get(index)
    }

    /// Legs of one type, in order.
    pub fn legs_of_type(&self, leg_type: SwapLegType) -> impl Iterator<Item = &ResolvedSwapLeg> + '_ {
        self.legs.iter().filter(move |leg| leg.leg_type() == leg_type)
    }

    /// Index and leg of the first leg of a type.
    pub fn first_leg_of_type(&self, leg_type: SwapLegType) -> Option<(usize, &ResolvedSwapLeg)> {
        self.legs
            .iter()
            .enumerate()
            .find(|(_, leg)| leg.leg_type() == leg_type)
    }

    /// Distinct leg currencies, sorted.
    pub fn currencies(&self) -> Vec<Currency> {
        let mut currencies: Vec<Currency> = self.legs.iter().map(ResolvedSwapLeg::currency).collect();
        currencies.sort();
        currencies.dedup();
        currencies
    }

    /// Whether the legs use more than one currency.
    pub fn is_cross_currency(&self) -> bool {
        self.currencies().len() > 1
    }
}
