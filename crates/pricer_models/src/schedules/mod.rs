//! Schedule generation for swap legs.
//!
//! This module provides:
//! - [`Schedule`]: ordered, contiguous periods
//! - [`Period`]: adjusted and unadjusted boundaries with a payment date
//! - [`Frequency`]: period frequency
//! - [`ScheduleBuilder`]: regular schedules from start, end and frequency
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{Frequency, ScheduleBuilder};
//! use pricer_core::types::Date;
//!
//! let schedule = ScheduleBuilder::new()
//!     .start(Date::from_ymd(2024, 1, 15).unwrap())
//!     .end(Date::from_ymd(2026, 1, 15).unwrap())
//!     .frequency(Frequency::SemiAnnual)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(schedule.periods().len(), 4);
//! ```

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};
