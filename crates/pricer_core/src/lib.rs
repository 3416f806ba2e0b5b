//! # pricer_core: Market Foundation for Rates Valuation
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer of the 3-layer architecture, providing:
//! - Time types: `Date`, `YearMonth`, `DayCountConvention` (`types::time`)
//! - Currency types: `Currency`, `CurrencyPair`, `CurrencyAmount`,
//!   `MultiCurrencyAmount` (`types`)
//! - Index identifiers: `OvernightIndex`, `IborIndex`, `PriceIndex` (`types::index`)
//! - Curves, fixings, FX quotes and the `RatesProvider` environment (`market_data`)
//! - Point and curve parameter sensitivities (`sensitivity`)
//! - Linear interpolation with node weights (`math::interpolators`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error types
//! - tracing: Diagnostics
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_core::market_data::{ImmutableRatesProvider, RatesProvider};
//! use pricer_core::types::{Currency, Date, DayCountConvention};
//!
//! // Date operations
//! let start = Date::from_ymd(2024, 1, 1).unwrap();
//! let end = Date::from_ymd(2024, 7, 1).unwrap();
//! let year_fraction = DayCountConvention::Act365F.year_fraction(start, end);
//! assert!((year_fraction - 182.0 / 365.0).abs() < 1e-12);
//!
//! // Currency information
//! let usd = Currency::USD;
//! assert_eq!(usd.code(), "USD");
//! assert_eq!(usd.decimal_places(), 2);
//!
//! // Discounting
//! let provider = ImmutableRatesProvider::builder(start)
//!     .discount_curve(Currency::USD, CurveEnum::flat(0.05))
//!     .build();
//! let df = provider.discount_factor(Currency::USD, end).unwrap();
//! assert!(df < 1.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for dates, currencies, indices,
//!   amounts and sensitivities

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod sensitivity;
pub mod types;
