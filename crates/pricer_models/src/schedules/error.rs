//! Schedule generation error types.

use pricer_core::types::{Date, DateError};
use thiserror::Error;

/// Errors that can occur during schedule generation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// A schedule needs at least one period.
    #[error("Schedule has no periods")]
    NoPeriods,

    /// Consecutive periods do not share a boundary.
    #[error("Period {index} starts on {start}, previous period ends on {previous_end}")]
    NonContiguous {
        /// Index of the offending period.
        index: usize,
        /// End of the previous period.
        previous_end: Date,
        /// Start of the offending period.
        start: Date,
    },

    /// Date arithmetic overflow.
    #[error("Date arithmetic failed: {0}")]
    Date(#[from] DateError),
}
