//! Schedule frequency enumeration.

use std::fmt;
use std::str::FromStr;

/// Frequency of accrual or payment periods.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::Frequency;
///
/// let freq = Frequency::Quarterly;
/// assert_eq!(freq.periods_per_year(), Some(4));
/// assert_eq!(freq.months(), Some(3));
/// assert_eq!(Frequency::Term.months(), None);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    /// Every 12 months.
    Annual,
    /// Every 6 months.
    SemiAnnual,
    /// Every 3 months.
    Quarterly,
    /// Every month.
    Monthly,
    /// A single period covering the whole term.
    Term,
}

impl Frequency {
    /// Number of periods per year, `None` for [`Frequency::Term`].
    #[inline]
    pub fn periods_per_year(&self) -> Option<u32> {
        self.months().map(|m| 12 / m)
    }

    /// Months between period boundaries, `None` for [`Frequency::Term`].
    #[inline]
    pub fn months(&self) -> Option<u32> {
        match self {
            Frequency::Annual => Some(12),
            Frequency::SemiAnnual => Some(6),
            Frequency::Quarterly => Some(3),
            Frequency::Monthly => Some(1),
            Frequency::Term => None,
        }
    }

    /// Standard name.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Frequency::Annual => "Annual",
            Frequency::SemiAnnual => "Semi-Annual",
            Frequency::Quarterly => "Quarterly",
            Frequency::Monthly => "Monthly",
            Frequency::Term => "Term",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Frequency {
    type Err = String;

    /// Parses a frequency (case-insensitive): `annual`/`12m`/`1y`,
    /// `semi-annual`/`6m`, `quarterly`/`3m`, `monthly`/`1m`, `term`/`t`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "annual" | "1y" | "yearly" | "12m" => Ok(Frequency::Annual),
            "semiannual" | "6m" => Ok(Frequency::SemiAnnual),
            "quarterly" | "3m" => Ok(Frequency::Quarterly),
            "monthly" | "1m" => Ok(Frequency::Monthly),
            "term" | "t" => Ok(Frequency::Term),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}
