//! # Pricer Models (L2: Instruments)
//!
//! Resolved rate instruments and the schedules they are built from.
//!
//! This crate provides:
//! - Schedules of adjusted and unadjusted periods
//! - Rate observations: fixed, term index, overnight compounded and
//!   averaged, monthly and interpolated inflation
//! - Accrual and payment periods, payment events, swap legs and swaps
//! - Rate calculations expanding schedules into accrual periods
//!
//! ## Design Principles
//!
//! - **Validated constructors**: every period, leg and swap is checked
//!   once when built and immutable afterwards
//! - **Enum-based observations** for static dispatch in the pricers
//! - **Signed notionals**: the pay/receive flag and the sign agree

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod instruments;
pub mod schedules;
