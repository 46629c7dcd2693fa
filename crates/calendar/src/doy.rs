//! Day-of-year newtype for the 365-day no-leap calendar.

use crate::error::CalendarError;

/// Number of days in every year of the normalized calendar.
pub const DAYS_PER_YEAR: u16 = 365;

/// Day-of-year in the 365-day no-leap calendar (1..=365).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Doy(u16);

/// Number of days in each month (index 0 unused, index 1 = January, ..., index 12 = December).
pub(crate) const DAYS_PER_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Day-of-year on which each month starts (index 0 unused, index 1 = January starts at DOY 1, ...).
pub(crate) const MONTH_START_DOY: [u16; 13] =
    [0, 1, 32, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335];

impl Doy {
    /// First day of the year.
    pub const FIRST: Doy = Doy(1);

    /// Last day of the year.
    pub const LAST: Doy = Doy(DAYS_PER_YEAR);

    /// Creates a new `Doy` from a day-of-year value.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidDoy`] if `doy` is not in 1..=365.
    pub fn new(doy: u16) -> Result<Self, CalendarError> {
        if !(1..=DAYS_PER_YEAR).contains(&doy) {
            return Err(CalendarError::InvalidDoy { doy });
        }
        Ok(Self(doy))
    }

    /// Creates a `Doy` from a 0-based index, wrapping modulo 365.
    pub fn from_index_wrapping(index: i64) -> Self {
        // rem_euclid keeps negative offsets inside 0..365.
        let idx = index.rem_euclid(i64::from(DAYS_PER_YEAR));
        Self(idx as u16 + 1)
    }

    /// Creates a new `Doy` from a (month, day) pair.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidMonth`] if `month` is not in 1..=12.
    /// Returns [`CalendarError::InvalidDay`] if `day` is not valid for the given
    /// month. February 29 is always rejected.
    pub fn from_month_day(month: u8, day: u8) -> Result<Self, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let max_day = DAYS_PER_MONTH[month as usize];
        if !(1..=max_day).contains(&day) {
            return Err(CalendarError::InvalidDay {
                day,
                month,
                max_day,
            });
        }
        Ok(Self(MONTH_START_DOY[month as usize] + u16::from(day) - 1))
    }

    /// Returns the inner day-of-year value (1..=365).
    pub fn get(self) -> u16 {
        self.0
    }

    /// Returns the 0-based index suitable for array indexing (0..=364).
    pub fn index(self) -> usize {
        (self.0 - 1) as usize
    }

    /// Returns the day `delta` days away, wrapping around the year boundary.
    pub fn offset(self, delta: i64) -> Self {
        Self::from_index_wrapping(self.index() as i64 + delta)
    }

    /// Returns the `(month, day)` pair for this day-of-year.
    pub fn month_day(self) -> (u8, u8) {
        let month = (1..=12usize)
            .rev()
            .find(|&m| MONTH_START_DOY[m] <= self.0)
            .unwrap_or(1);
        let day = self.0 - MONTH_START_DOY[month] + 1;
        (month as u8, day as u8)
    }

    /// Returns the month (1..=12) for this day-of-year.
    pub fn month(self) -> u8 {
        self.month_day().0
    }

    /// Returns the day within the month (1..=31) for this day-of-year.
    pub fn day(self) -> u8 {
        self.month_day().1
    }

    /// Iterates over every day of the year in order.
    pub fn all() -> impl Iterator<Item = Doy> {
        (1..=DAYS_PER_YEAR).map(Doy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bounds() {
        assert_eq!(Doy::new(1).unwrap(), Doy::FIRST);
        assert_eq!(Doy::new(365).unwrap(), Doy::LAST);
        assert_eq!(
            Doy::new(0).unwrap_err(),
            CalendarError::InvalidDoy { doy: 0 }
        );
        assert_eq!(
            Doy::new(366).unwrap_err(),
            CalendarError::InvalidDoy { doy: 366 }
        );
    }

    #[test]
    fn from_month_day_valid() {
        assert_eq!(Doy::from_month_day(1, 1).unwrap().get(), 1);
        assert_eq!(Doy::from_month_day(2, 28).unwrap().get(), 59);
        assert_eq!(Doy::from_month_day(3, 1).unwrap().get(), 60);
        assert_eq!(Doy::from_month_day(12, 31).unwrap().get(), 365);
    }

    #[test]
    fn from_month_day_rejects_feb_29() {
        assert_eq!(
            Doy::from_month_day(2, 29).unwrap_err(),
            CalendarError::InvalidDay {
                day: 29,
                month: 2,
                max_day: 28,
            }
        );
    }

    #[test]
    fn from_month_day_invalid_month() {
        assert_eq!(
            Doy::from_month_day(13, 1).unwrap_err(),
            CalendarError::InvalidMonth { month: 13 }
        );
    }

    #[test]
    fn roundtrip_all_365() {
        for doy in Doy::all() {
            let (m, d) = doy.month_day();
            assert_eq!(Doy::from_month_day(m, d).unwrap(), doy, "doy {}", doy.get());
        }
    }

    #[test]
    fn offset_wraps_both_directions() {
        assert_eq!(Doy::FIRST.offset(-1), Doy::LAST);
        assert_eq!(Doy::LAST.offset(1), Doy::FIRST);
        assert_eq!(Doy::new(10).unwrap().offset(-15).get(), 360);
        assert_eq!(Doy::new(360).unwrap().offset(20).get(), 15);
        assert_eq!(Doy::new(100).unwrap().offset(365), Doy::new(100).unwrap());
    }

    #[test]
    fn from_index_wrapping_handles_large_negatives() {
        assert_eq!(Doy::from_index_wrapping(-365 * 3), Doy::FIRST);
        assert_eq!(Doy::from_index_wrapping(-1), Doy::LAST);
    }

    #[test]
    fn table_integrity_month_start() {
        for m in 1..12usize {
            assert_eq!(
                MONTH_START_DOY[m] + DAYS_PER_MONTH[m] as u16,
                MONTH_START_DOY[m + 1],
                "MONTH_START_DOY mismatch at month {m}"
            );
        }
        assert_eq!(MONTH_START_DOY[12] + 30, DAYS_PER_YEAR);
    }

    #[test]
    fn all_yields_365_days() {
        assert_eq!(Doy::all().count(), 365);
    }
}
