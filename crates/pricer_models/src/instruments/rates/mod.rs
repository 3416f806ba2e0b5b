//! Interest rate swap instruments.
//!
//! This module provides the resolved form of swaps, ready for valuation:
//! - [`RateObservation`]: how the rate of an accrual period is observed
//! - [`RateAccrualPeriod`]: observation, year fraction, gearing and spread
//! - [`PaymentPeriod`]: rate or known amount payment
//! - [`PaymentEvent`]: notional exchange
//! - [`ResolvedSwapLeg`] and [`ResolvedSwap`]
//!
//! and the rate calculations expanding schedules into accrual periods.
//!
//! # Example
//!
//! ```
//! use pricer_models::instruments::rates::{
//!     FixedRateCalculation, PayReceive, RateCalculation, RateCalculationSwapLeg, ResolvedSwap,
//! };
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::{Currency, Date, DayCountConvention};
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::Annual)
//!     .build()
//!     .unwrap();
//!
//! let leg = RateCalculationSwapLeg::new(
//!     PayReceive::Pay,
//!     schedule,
//!     Currency::USD,
//!     10_000_000.0,
//!     RateCalculation::Fixed(FixedRateCalculation::new(DayCountConvention::Thirty360, 0.04)),
//! )
//! .resolve()
//! .unwrap();
//!
//! let swap = ResolvedSwap::new(vec![leg]).unwrap();
//! assert!(!swap.is_cross_currency());
//! assert_eq!(swap.legs()[0].payment_periods().len(), 2);
//! ```

mod accrual;
mod calculation;
mod event;
mod leg;
mod observation;
mod payment;
mod swap;

pub use accrual::{NegativeRateMethod, RateAccrualPeriod};
pub use calculation::{
    FixedRateCalculation, IborRateCalculation, OvernightAccrualMethod, OvernightRateCalculation,
    RateCalculation, RateCalculationSwapLeg, ValueSchedule,
};
pub use event::{NotionalExchange, PaymentEvent};
pub use leg::{PayReceive, ResolvedSwapLeg, SwapLegType};
pub use observation::{
    InflationInterpolatedObservation, InflationMonthlyObservation, OvernightRateObservation,
    RateObservation,
};
pub use payment::{CompoundingMethod, KnownAmountPaymentPeriod, PaymentPeriod, RatePaymentPeriod};
pub use swap::ResolvedSwap;
