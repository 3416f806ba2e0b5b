//! Discounting valuation of interest rate swaps.
//!
//! This module provides:
//! - [`RateObservationFn`]: observed rates and their point sensitivities
//! - [`DiscountingPaymentPeriodPricer`] and [`DiscountingPaymentEventPricer`]:
//!   single flows
//! - [`DiscountingSwapLegPricer`]: leg values, PVBP and accrued interest
//! - [`DiscountingSwapProductPricer`]: swap values, par rate and par spread
//! - [`SwapBatchPricer`]: portfolios valued in parallel
//! - [`CashFlows`] and [`ExplainMap`]: reports
//! - [`SwapPricerConfig`]: pricer configuration
//!
//! # Sensitivities
//!
//! Every value has a `_sensitivity` twin returning [`PointSensitivities`].
//! They are computed analytically: the value is evaluated once, its
//! intermediates are kept, and a backward sweep multiplies the provider's
//! sensitivities by the derivative of the value with respect to each
//! intermediate. `RatesProvider::parameter_sensitivity` maps the points
//! onto curve nodes.
//!
//! [`PointSensitivities`]: pricer_core::sensitivity::PointSensitivities
//!
//! # Usage
//!
//! ```
//! use pricer_core::market_data::curves::CurveEnum;
//! use pricer_core::market_data::{ImmutableRatesProvider, RatesProvider};
//! use pricer_core::types::{Currency, Date, DayCountConvention, OvernightIndex};
//! use pricer_models::instruments::rates::{
//!     FixedRateCalculation, OvernightRateCalculation, PayReceive, RateCalculation,
//!     RateCalculationSwapLeg, ResolvedSwap,
//! };
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_pricing::rates::{DiscountingSwapProductPricer, SwapPricerConfig};
//!
//! let valuation = Date::from_ymd(2024, 3, 1).unwrap();
//! let schedule = ScheduleBuilder::new()
//!     .start(valuation)
//!     .end(Date::from_ymd(2027, 3, 1).unwrap())
//!     .frequency(Frequency::Annual)
//!     .payment_lag(2)
//!     .build()
//!     .unwrap();
//!
//! let fixed = RateCalculationSwapLeg::new(
//!     PayReceive::Receive,
//!     schedule.clone(),
//!     Currency::USD,
//!     25_000_000.0,
//!     RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Act360, 0.045)),
//! );
//! let sofr = RateCalculationSwapLeg::new(
//!     PayReceive::Pay,
//!     schedule,
//!     Currency::USD,
//!     25_000_000.0,
//!     RateCalculation::Overnight(OvernightRateCalculation::new(OvernightIndex::Sofr, DayCountConvention::Act360)),
//! );
//! let swap = ResolvedSwap::new(vec![fixed.resolve().unwrap(), sofr.resolve().unwrap()]).unwrap();
//!
//! let provider = ImmutableRatesProvider::builder(valuation)
//!     .discount_curve(Currency::USD, CurveEnum::flat(0.043))
//!     .overnight_curve(OvernightIndex::Sofr, CurveEnum::flat(0.043))
//!     .build();
//! let pricer = DiscountingSwapProductPricer::new(&SwapPricerConfig::default());
//!
//! let pv = pricer.present_value(&swap, &provider).unwrap();
//! let points = pricer.present_value_sensitivity(&swap, &provider).unwrap();
//! let curves = provider.parameter_sensitivity(&points).unwrap();
//! assert_eq!(pv.len(), 1);
//! assert_eq!(curves.len(), 2);
//! ```

mod batch;
mod cash_flow;
mod config;
mod error;
mod event;
mod explain;
mod leg;
mod observation;
mod period;
mod product;

pub use batch::SwapBatchPricer;
pub use cash_flow::{CashFlow, CashFlows};
pub use config::{ConfigError, RateCutOffPolicy, SwapPricerConfig};
pub use error::SwapPricingError;
pub use event::DiscountingPaymentEventPricer;
pub use explain::{ExplainKey, ExplainMap, ExplainValue};
pub use leg::DiscountingSwapLegPricer;
pub use observation::RateObservationFn;
pub use period::DiscountingPaymentPeriodPricer;
pub use product::DiscountingSwapProductPricer;
