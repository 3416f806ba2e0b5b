//! Rate and price index identifiers.
//!
//! Each index knows its currency and the conventions the observation
//! engine needs: day count for rate indices, tenor for term indices.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, DayCountConvention, IborIndex, OvernightIndex, PriceIndex};
//!
//! assert_eq!(OvernightIndex::Sonia.currency(), Currency::GBP);
//! assert_eq!(OvernightIndex::Sofr.day_count(), DayCountConvention::Act360);
//! assert_eq!(IborIndex::Euribor6M.tenor_months(), 6);
//! assert_eq!(PriceIndex::GbRpix.name(), "GB-RPIX");
//! ```

use std::fmt;

use super::currency::Currency;
use super::time::DayCountConvention;

/// Overnight rate index.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OvernightIndex {
    /// Secured Overnight Financing Rate (USD)
    Sofr,
    /// Sterling Overnight Index Average (GBP)
    Sonia,
    /// Euro Short-Term Rate (EUR)
    Estr,
    /// Tokyo Overnight Average Rate (JPY)
    Tonar,
    /// Swiss Average Rate Overnight (CHF)
    Saron,
}

impl OvernightIndex {
    /// Market name.
    pub fn name(&self) -> &'static str {
        match self {
            OvernightIndex::Sofr => "USD-SOFR",
            OvernightIndex::Sonia => "GBP-SONIA",
            OvernightIndex::Estr => "EUR-ESTR",
            OvernightIndex::Tonar => "JPY-TONAR",
            OvernightIndex::Saron => "CHF-SARON",
        }
    }

    /// Currency of the index.
    pub fn currency(&self) -> Currency {
        match self {
            OvernightIndex::Sofr => Currency::USD,
            OvernightIndex::Sonia => Currency::GBP,
            OvernightIndex::Estr => Currency::EUR,
            OvernightIndex::Tonar => Currency::JPY,
            OvernightIndex::Saron => Currency::CHF,
        }
    }

    /// Day count used to accrue a single overnight fixing.
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            OvernightIndex::Sonia | OvernightIndex::Tonar => DayCountConvention::Act365F,
            _ => DayCountConvention::Act360,
        }
    }
}

impl fmt::Display for OvernightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Term (IBOR-style) rate index.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum IborIndex {
    /// EURIBOR 3 months
    Euribor3M,
    /// EURIBOR 6 months
    Euribor6M,
    /// USD LIBOR 3 months
    UsdLibor3M,
    /// GBP LIBOR 6 months
    GbpLibor6M,
    /// TIBOR 3 months
    Tibor3M,
}

impl IborIndex {
    /// Market name.
    pub fn name(&self) -> &'static str {
        match self {
            IborIndex::Euribor3M => "EUR-EURIBOR-3M",
            IborIndex::Euribor6M => "EUR-EURIBOR-6M",
            IborIndex::UsdLibor3M => "USD-LIBOR-3M",
            IborIndex::GbpLibor6M => "GBP-LIBOR-6M",
            IborIndex::Tibor3M => "JPY-TIBOR-3M",
        }
    }

    /// Currency of the index.
    pub fn currency(&self) -> Currency {
        match self {
            IborIndex::Euribor3M | IborIndex::Euribor6M => Currency::EUR,
            IborIndex::UsdLibor3M => Currency::USD,
            IborIndex::GbpLibor6M => Currency::GBP,
            IborIndex::Tibor3M => Currency::JPY,
        }
    }

    /// Day count of the deposit underlying the index.
    pub fn day_count(&self) -> DayCountConvention {
        match self {
            IborIndex::GbpLibor6M | IborIndex::Tibor3M => DayCountConvention::Act365F,
            _ => DayCountConvention::Act360,
        }
    }

    /// Deposit tenor in months.
    pub fn tenor_months(&self) -> i32 {
        match self {
            IborIndex::Euribor6M | IborIndex::GbpLibor6M => 6,
            _ => 3,
        }
    }
}

impl fmt::Display for IborIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Monthly consumer price index.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PriceIndex {
    /// UK Retail Price Index
    GbRpi,
    /// UK Retail Price Index excluding mortgage interest
    GbRpix,
    /// US CPI for all urban consumers
    UsCpiU,
    /// Eurozone harmonised index ex tobacco
    EuHicp,
}

impl PriceIndex {
    /// Market name.
    pub fn name(&self) -> &'static str {
        match self {
            PriceIndex::GbRpi => "GB-RPI",
            PriceIndex::GbRpix => "GB-RPIX",
            PriceIndex::UsCpiU => "US-CPI-U",
            PriceIndex::EuHicp => "EU-EXT-CPI",
        }
    }

    /// Currency the index is published for.
    pub fn currency(&self) -> Currency {
        match self {
            PriceIndex::GbRpi | PriceIndex::GbRpix => Currency::GBP,
            PriceIndex::UsCpiU => Currency::USD,
            PriceIndex::EuHicp => Currency::EUR,
        }
    }
}

impl fmt::Display for PriceIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overnight_conventions() {
        assert_eq!(OvernightIndex::Sonia.day_count(), DayCountConvention::Act365F);
        assert_eq!(OvernightIndex::Estr.day_count(), DayCountConvention::Act360);
        assert_eq!(OvernightIndex::Saron.currency(), Currency::CHF);
        assert_eq!(OvernightIndex::Tonar.to_string(), "JPY-TONAR");
    }

    #[test]
    fn test_ibor_conventions() {
        assert_eq!(IborIndex::UsdLibor3M.tenor_months(), 3);
        assert_eq!(IborIndex::GbpLibor6M.day_count(), DayCountConvention::Act365F);
        assert_eq!(IborIndex::Euribor3M.currency(), Currency::EUR);
    }

    #[test]
    fn test_price_index_currency() {
        assert_eq!(PriceIndex::UsCpiU.currency(), Currency::USD);
        assert_eq!(PriceIndex::EuHicp.to_string(), "EU-EXT-CPI");
    }
}
