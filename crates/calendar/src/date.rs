//! No-leap date with year context.

use crate::doy::{DAYS_PER_YEAR, Doy};
use crate::error::CalendarError;

/// A date in the 365-day no-leap calendar with year context.
///
/// Ordering is chronological: by year, then by day-of-year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NoLeapDate {
    year: i32,
    doy: Doy,
}

impl NoLeapDate {
    /// Creates a new `NoLeapDate` from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError`] if the month or day is invalid for the
    /// 365-day no-leap calendar (February 29 included).
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, CalendarError> {
        let doy = Doy::from_month_day(month, day)?;
        Ok(Self { year, doy })
    }

    /// Creates a `NoLeapDate` from a year and an already-validated [`Doy`].
    pub fn from_year_doy(year: i32, doy: Doy) -> Self {
        Self { year, doy }
    }

    /// Creates a date from a serial day number (see [`day_number`](Self::day_number)).
    pub fn from_day_number(n: i64) -> Self {
        let per_year = i64::from(DAYS_PER_YEAR);
        let year = n.div_euclid(per_year) as i32;
        Self {
            year,
            doy: Doy::from_index_wrapping(n.rem_euclid(per_year)),
        }
    }

    /// Returns the year.
    pub fn year(self) -> i32 {
        self.year
    }

    /// Returns the month (1..=12).
    pub fn month(self) -> u8 {
        self.doy.month()
    }

    /// Returns the day within the month (1..=31).
    pub fn day(self) -> u8 {
        self.doy.day()
    }

    /// Returns the day-of-year.
    pub fn doy(self) -> Doy {
        self.doy
    }

    /// Serial day count where day 0 is January 1 of year 0.
    ///
    /// Consecutive dates differ by exactly 1, across year boundaries too.
    pub fn day_number(self) -> i64 {
        i64::from(self.year) * i64::from(DAYS_PER_YEAR) + self.doy.index() as i64
    }

    /// Returns the next date in the no-leap calendar.
    ///
    /// December 31 wraps to January 1 of the following year.
    pub fn next(self) -> Self {
        if self.doy == Doy::LAST {
            Self::from_year_doy(self.year + 1, Doy::FIRST)
        } else {
            Self::from_year_doy(self.year, self.doy.offset(1))
        }
    }

    /// Returns the date `days` days after this one (negative moves backwards).
    pub fn add_days(self, days: i64) -> Self {
        Self::from_day_number(self.day_number() + days)
    }
}

impl std::fmt::Display for NoLeapDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month(), self.day())
    }
}
