//! CF calendar kinds and calendar-specific day arithmetic.

use chrono::{Datelike, NaiveDate};

use crate::date::NoLeapDate;
use crate::error::CalendarError;

/// Month start day-of-year for a 366-day year (index 0 unused).
const ALL_LEAP_MONTH_START: [u16; 13] = [0, 1, 32, 61, 92, 122, 153, 183, 214, 245, 275, 306, 336];

/// Calendar declared on a CF time axis.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CalendarKind {
    /// `standard`, `gregorian` or `proleptic_gregorian`. Treated as
    /// proleptic Gregorian throughout.
    #[default]
    Gregorian,
    /// `noleap` / `365_day`.
    NoLeap,
    /// `all_leap` / `366_day`.
    AllLeap,
    /// `julian`: leap year every fourth year.
    Julian,
    /// `360_day`: twelve 30-day months. Cannot be normalized.
    Day360,
    /// Any other name found in the file.
    Other(String),
}

impl CalendarKind {
    /// Parses a CF `calendar` attribute value (case-insensitive).
    pub fn parse(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "standard" | "gregorian" | "proleptic_gregorian" => Self::Gregorian,
            "noleap" | "no_leap" | "365_day" => Self::NoLeap,
            "all_leap" | "366_day" => Self::AllLeap,
            "julian" => Self::Julian,
            "360_day" => Self::Day360,
            _ => Self::Other(name.to_string()),
        }
    }

    /// Canonical CF name.
    pub fn name(&self) -> &str {
        match self {
            Self::Gregorian => "standard",
            Self::NoLeap => "noleap",
            Self::AllLeap => "all_leap",
            Self::Julian => "julian",
            Self::Day360 => "360_day",
            Self::Other(name) => name,
        }
    }

    fn unsupported(&self) -> CalendarError {
        CalendarError::UnsupportedCalendar {
            reason: format!(
                "calendar '{}' cannot be mapped onto 365 unique day-of-year slots",
                self.name()
            ),
        }
    }

    /// Number of days in `month` of `year` under this calendar.
    fn days_in_month(&self, year: i32, month: u8) -> Result<u8, CalendarError> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::InvalidMonth { month });
        }
        let leap = match self {
            Self::Gregorian => (year % 4 == 0 && year % 100 != 0) || year % 400 == 0,
            Self::Julian => year.rem_euclid(4) == 0,
            Self::AllLeap => true,
            Self::NoLeap => false,
            Self::Day360 | Self::Other(_) => return Err(self.unsupported()),
        };
        Ok(match month {
            2 if leap => 29,
            2 => 28,
            4 | 6 | 9 | 11 => 30,
            _ => 31,
        })
    }

    /// Serial day number of `date` in this calendar.
    ///
    /// Only differences between serial numbers are meaningful; the epoch
    /// differs per calendar.
    pub(crate) fn serial_day(&self, date: CalendarDate) -> Result<i64, CalendarError> {
        let max_day = self.days_in_month(date.year, date.month)?;
        if !(1..=max_day).contains(&date.day) {
            return Err(CalendarError::InvalidDay {
                day: date.day,
                month: date.month,
                max_day,
            });
        }
        match self {
            Self::Gregorian => NaiveDate::from_ymd_opt(date.year, date.month.into(), date.day.into())
                .map(|d| i64::from(d.num_days_from_ce()))
                .ok_or_else(|| out_of_range(date)),
            Self::NoLeap => Ok(NoLeapDate::new(date.year, date.month, date.day)?.day_number()),
            Self::AllLeap => {
                let doy = ALL_LEAP_MONTH_START[date.month as usize] + u16::from(date.day) - 1;
                Ok(i64::from(date.year) * 366 + i64::from(doy) - 1)
            }
            Self::Julian => Ok(julian_day_number(date)),
            Self::Day360 | Self::Other(_) => Err(self.unsupported()),
        }
    }

    /// Inverse of [`serial_day`](Self::serial_day).
    pub(crate) fn date_from_serial(&self, serial: i64) -> Result<CalendarDate, CalendarError> {
        match self {
            Self::Gregorian => i32::try_from(serial)
                .ok()
                .and_then(NaiveDate::from_num_days_from_ce_opt)
                .map(|d| CalendarDate {
                    year: d.year(),
                    month: d.month() as u8,
                    day: d.day() as u8,
                })
                .ok_or_else(|| CalendarError::UnsupportedCalendar {
                    reason: format!("serial day {serial} is outside the supported date range"),
                }),
            Self::NoLeap => {
                let d = NoLeapDate::from_day_number(serial);
                Ok(CalendarDate::from(d))
            }
            Self::AllLeap => {
                let year = serial.div_euclid(366) as i32;
                let doy = serial.rem_euclid(366) as u16 + 1;
                let month = (1..=12usize)
                    .rev()
                    .find(|&m| ALL_LEAP_MONTH_START[m] <= doy)
                    .unwrap_or(1);
                Ok(CalendarDate {
                    year,
                    month: month as u8,
                    day: (doy - ALL_LEAP_MONTH_START[month] + 1) as u8,
                })
            }
            Self::Julian => Ok(julian_from_day_number(serial)),
            Self::Day360 | Self::Other(_) => Err(self.unsupported()),
        }
    }
}

fn out_of_range(date: CalendarDate) -> CalendarError {
    CalendarError::UnsupportedCalendar {
        reason: format!("date {date} is outside the supported date range"),
    }
}

/// Julian day number of a Julian-calendar date.
fn julian_day_number(date: CalendarDate) -> i64 {
    let month = i64::from(date.month);
    let a = (14 - month) / 12;
    let y = i64::from(date.year) + 4800 - a;
    let m = month + 12 * a - 3;
    i64::from(date.day) + (153 * m + 2) / 5 + 365 * y + y.div_euclid(4) - 32083
}

/// Julian-calendar date of a Julian day number.
fn julian_from_day_number(jdn: i64) -> CalendarDate {
    let c = jdn + 32082;
    let d = (4 * c + 3).div_euclid(1461);
    let e = c - (1461 * d).div_euclid(4);
    let m = (5 * e + 2) / 153;
    let day = e - (153 * m + 2) / 5 + 1;
    let month = m + 3 - 12 * (m / 10);
    let year = d - 4800 + m / 10;
    CalendarDate {
        year: year as i32,
        month: month as u8,
        day: day as u8,
    }
}

/// A calendar date in whatever calendar a source declares.
///
/// Unlike [`NoLeapDate`] this may be February 29.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate {
    /// Year (astronomical numbering).
    pub year: i32,
    /// Month (1..=12).
    pub month: u8,
    /// Day of month (1..=31).
    pub day: u8,
}

impl CalendarDate {
    /// Creates a date without calendar-specific validation.
    pub fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Whether this is February 29.
    pub fn is_leap_day(self) -> bool {
        self.month == 2 && self.day == 29
    }

    /// Converts to the no-leap calendar, returning `None` for February 29.
    pub fn to_noleap(self) -> Option<NoLeapDate> {
        if self.is_leap_day() {
            return None;
        }
        NoLeapDate::new(self.year, self.month, self.day).ok()
    }
}

impl From<NoLeapDate> for CalendarDate {
    fn from(d: NoLeapDate) -> Self {
        Self::new(d.year(), d.month(), d.day())
    }
}

impl std::fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip(kind: &CalendarKind, date: CalendarDate) {
        let serial = kind.serial_day(date).unwrap();
        assert_eq!(kind.date_from_serial(serial).unwrap(), date, "{kind:?} {date}");
    }

    #[test]
    fn parse_aliases() {
        assert_eq!(CalendarKind::parse("proleptic_gregorian"), CalendarKind::Gregorian);
        assert_eq!(CalendarKind::parse("Standard"), CalendarKind::Gregorian);
        assert_eq!(CalendarKind::parse("365_day"), CalendarKind::NoLeap);
        assert_eq!(CalendarKind::parse("366_day"), CalendarKind::AllLeap);
        assert_eq!(CalendarKind::parse("360_day"), CalendarKind::Day360);
        assert_eq!(
            CalendarKind::parse("lunar"),
            CalendarKind::Other("lunar".to_string())
        );
    }

    #[test]
    fn gregorian_leap_rules() {
        let g = CalendarKind::Gregorian;
        assert_eq!(g.days_in_month(2000, 2).unwrap(), 29);
        assert_eq!(g.days_in_month(1900, 2).unwrap(), 28);
        assert_eq!(g.days_in_month(2004, 2).unwrap(), 29);
        assert_eq!(CalendarKind::Julian.days_in_month(1900, 2).unwrap(), 29);
    }

    #[test]
    fn serial_roundtrips_per_calendar() {
        for kind in [
            CalendarKind::Gregorian,
            CalendarKind::NoLeap,
            CalendarKind::AllLeap,
            CalendarKind::Julian,
        ] {
            roundtrip(&kind, CalendarDate::new(1850, 1, 1));
            roundtrip(&kind, CalendarDate::new(1999, 12, 31));
            roundtrip(&kind, CalendarDate::new(2100, 3, 1));
        }
        roundtrip(&CalendarKind::AllLeap, CalendarDate::new(2001, 2, 29));
        roundtrip(&CalendarKind::Julian, CalendarDate::new(1900, 2, 29));
    }

    #[test]
    fn consecutive_serials_across_leap_day() {
        let g = CalendarKind::Gregorian;
        let feb28 = g.serial_day(CalendarDate::new(2004, 2, 28)).unwrap();
        assert_eq!(
            g.date_from_serial(feb28 + 1).unwrap(),
            CalendarDate::new(2004, 2, 29)
        );
        assert_eq!(
            g.date_from_serial(feb28 + 2).unwrap(),
            CalendarDate::new(2004, 3, 1)
        );
    }

    #[test]
    fn day360_is_unsupported() {
        let err = CalendarKind::Day360
            .serial_day(CalendarDate::new(2000, 1, 1))
            .unwrap_err();
        assert!(matches!(err, CalendarError::UnsupportedCalendar { .. }));
    }

    #[test]
    fn feb_29_rejected_in_noleap() {
        let err = CalendarKind::NoLeap
            .serial_day(CalendarDate::new(2000, 2, 29))
            .unwrap_err();
        assert!(matches!(err, CalendarError::InvalidDay { .. }));
    }

    #[test]
    fn to_noleap_drops_leap_day() {
        assert!(CalendarDate::new(2000, 2, 29).to_noleap().is_none());
        assert_eq!(
            CalendarDate::new(2000, 3, 1).to_noleap().unwrap().doy().get(),
            60
        );
    }
}
