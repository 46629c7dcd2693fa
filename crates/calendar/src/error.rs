//! Error types for the hwmid-calendar crate.

/// Error type for all fallible operations in the hwmid-calendar crate.
///
/// Covers day-of-year and date validation in the 365-day calendar, window
/// construction, time-axis decoding and the alignment checks applied when a
/// daily series is built.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CalendarError {
    /// Returned when a day-of-year value is outside the valid range 1..=365.
    #[error("invalid day of year: {doy} (must be 1..=365)")]
    InvalidDoy {
        /// The invalid day-of-year value that was provided.
        doy: u16,
    },

    /// Returned when a month number is outside the valid range 1..=12.
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth {
        /// The invalid month number that was provided.
        month: u8,
    },

    /// Returned when a day number exceeds the number of days in the given month.
    #[error("invalid day: {day} for month {month} (max {max_day})")]
    InvalidDay {
        /// The invalid day number that was provided.
        day: u8,
        /// The month for which the day is invalid.
        month: u8,
        /// The maximum valid day for the given month.
        max_day: u8,
    },

    /// Returned when a day-of-year window would contain repeated days.
    #[error("invalid window radius: {radius} (2*radius+1 must not exceed 365)")]
    InvalidRadius {
        /// The rejected radius.
        radius: u16,
    },

    /// Returned when a time axis cannot be mapped onto 365 unique day-of-year
    /// slots.
    #[error("unsupported calendar: {reason}")]
    UnsupportedCalendar {
        /// Why the calendar could not be normalized.
        reason: String,
    },

    /// Returned when a CF `units` string cannot be parsed.
    #[error("invalid time units '{units}': {reason}")]
    InvalidTimeUnits {
        /// The offending units string.
        units: String,
        /// Description of the parsing failure.
        reason: String,
    },

    /// Returned when dates are not contiguous, repeat, or go backwards.
    #[error("input alignment error at position {position}: {reason}")]
    InputAlignment {
        /// Index (after leap-day removal) where the problem was found.
        position: usize,
        /// Description of the misalignment.
        reason: String,
    },

    /// Returned when a date vector and a value vector differ in length.
    #[error("length mismatch: {dates} dates but {values} values")]
    LengthMismatch {
        /// Number of dates.
        dates: usize,
        /// Number of values.
        values: usize,
    },
}
