//! Market data for rates valuation.
//!
//! # Components
//!
//! - [`curves`]: zero-rate and price index curves keyed by [`CurveId`](curves::CurveId)
//! - [`fixings`]: published index fixings
//! - [`fx`]: spot FX quote matrix
//! - [`observation`]: term and overnight index observations
//! - [`provider`]: the [`RatesProvider`] environment and its implementations
//! - [`error`]: [`MarketDataError`]
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_core::market_data::{ImmutableRatesProvider, OvernightIndexObservation, RatesProvider};
//! use pricer_core::types::{Currency, Date, OvernightIndex};
//!
//! let valuation = Date::from_ymd(2024, 1, 2).unwrap();
//! let provider = ImmutableRatesProvider::builder(valuation)
//!     .discount_curve(Currency::USD, CurveEnum::flat(0.05))
//!     .overnight_curve(OvernightIndex::Sofr, CurveEnum::flat(0.05))
//!     .build();
//!
//! let obs = OvernightIndexObservation::new(OvernightIndex::Sofr, valuation).unwrap();
//! let rate = provider.overnight_index_rate(&obs).unwrap();
//! assert!((rate - 0.05).abs() < 1e-3);
//! ```

pub mod curves;
pub mod error;
pub mod fixings;
pub mod fx;
pub mod observation;
pub mod provider;

pub use error::MarketDataError;
pub use fixings::{DateSeries, MonthlySeries, TimeSeries};
pub use fx::FxMatrix;
pub use observation::{IborIndexObservation, OvernightIndexObservation};
pub use provider::{
    CombinedRatesProvider, ImmutableRatesProvider, ImmutableRatesProviderBuilder, RatesProvider,
};
