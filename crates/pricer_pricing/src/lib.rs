//! # Pricer Pricing (L3: Valuation Engines)
//!
//! ## Layer 3 Role
//!
//! pricer_pricing values the instruments of `pricer_models` against the
//! market data of `pricer_core`:
//! - Rate observation: fixed, term index, overnight and inflation rates
//! - Payment period, event, leg and swap pricers
//! - Present value, forecast value, PVBP, par rate and par spread
//! - Analytic curve sensitivities of every value
//! - Cash flow and explain reports
//! - Parallel portfolio valuation with Rayon
//!
//! ## Layer Integration
//!
//! - Layer 1 (pricer_core): `RatesProvider`, point and parameter sensitivities
//! - Layer 2 (pricer_models): resolved swaps, legs and periods
//!
//! Pricers take the provider as `&dyn RatesProvider` and hold only their
//! configuration, so one pricer can be shared across threads.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rates::{DiscountingSwapProductPricer, RateCutOffPolicy, SwapPricerConfig};
//!
//! let config = SwapPricerConfig::from_toml_str("rate_cut_off_policy = \"clamp\"").unwrap();
//! assert_eq!(config.rate_cut_off_policy, RateCutOffPolicy::Clamp);
//!
//! let pricer = DiscountingSwapProductPricer::new(&config);
//! # let _ = pricer;
//! ```
//!
//! ## Logging
//!
//! The crate emits `tracing` events and never installs a subscriber:
//! `debug` for the par rate method and batch mode, `trace` for leg
//! values, `warn` when a rate cut-off is clamped.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod rates;
