//! Error types for the hwmid-climatology crate.

use hwmid_calendar::CalendarError;
use hwmid_stats::StatsError;

/// Error type for all fallible operations in the hwmid-climatology crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ClimatologyError {
    /// A calendar year with fewer than 365 normalized days.
    ///
    /// Recoverable: the year is left out of the annual maximum series.
    #[error("year {year} is incomplete: {days} of 365 days present")]
    IncompleteYear {
        /// The excluded year.
        year: i32,
        /// Days of that year present in the series.
        days: usize,
    },

    /// A complete year whose every value is missing. Recoverable, like
    /// [`IncompleteYear`](Self::IncompleteYear).
    #[error("year {year} has no non-missing values")]
    AllMissingYear {
        /// The excluded year.
        year: i32,
    },

    /// No year survived to form an annual maximum series.
    #[error("no complete years in the reference period")]
    NoCompleteYears,

    /// The pooled window for a day held no non-missing value.
    #[error("empty window pool for day of year {doy}")]
    EmptyWindow {
        /// Center day of the empty window.
        doy: u16,
    },

    /// A day-of-year threshold array did not have 365 entries.
    #[error("threshold array has {got} entries, expected {expected}")]
    ThresholdLength {
        /// Required length.
        expected: usize,
        /// Provided length.
        got: usize,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },

    #[error(transparent)]
    Calendar(#[from] CalendarError),

    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl ClimatologyError {
    /// Whether the error only excludes a year rather than failing the cell.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IncompleteYear { .. } | Self::AllMissingYear { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_incomplete_year() {
        let e = ClimatologyError::IncompleteYear {
            year: 1981,
            days: 200,
        };
        assert_eq!(e.to_string(), "year 1981 is incomplete: 200 of 365 days present");
        assert!(e.is_recoverable());
    }

    #[test]
    fn display_empty_window() {
        let e = ClimatologyError::EmptyWindow { doy: 17 };
        assert_eq!(e.to_string(), "empty window pool for day of year 17");
        assert!(!e.is_recoverable());
    }

    #[test]
    fn stats_error_is_transparent() {
        let e: ClimatologyError = StatsError::EmptySample.into();
        assert_eq!(e.to_string(), StatsError::EmptySample.to_string());
    }
}
