//! CF time-axis decoding and normalization onto the 365-day calendar.

use crate::error::CalendarError;
use crate::kind::{CalendarDate, CalendarKind};
use crate::series::DailySeries;

/// Unit of a CF time offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeUnit {
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl TimeUnit {
    fn per_day(self) -> f64 {
        match self {
            Self::Days => 1.0,
            Self::Hours => 24.0,
            Self::Minutes => 1_440.0,
            Self::Seconds => 86_400.0,
        }
    }
}

/// Parsed CF `units` attribute such as `"days since 1850-01-01 00:00:00"`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeUnits {
    unit: TimeUnit,
    base: CalendarDate,
    /// Time of day of the reference instant, as a fraction of a day.
    base_fraction: f64,
}

impl TimeUnits {
    /// Creates units directly from parts, with a midnight reference time.
    pub fn new(unit: TimeUnit, base: CalendarDate) -> Self {
        Self {
            unit,
            base,
            base_fraction: 0.0,
        }
    }

    /// Parses `"<unit> since YYYY-M-D[ hh:mm[:ss]]"`.
    ///
    /// A trailing `T` separator, fractional seconds and a `Z` suffix are
    /// accepted. Time-zone offsets other than UTC are not.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidTimeUnits`] on any malformed component.
    pub fn parse(units: &str) -> Result<Self, CalendarError> {
        let bad = |reason: &str| CalendarError::InvalidTimeUnits {
            units: units.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = units.split_whitespace();
        let unit = match parts.next().map(str::to_lowercase).as_deref() {
            Some("days" | "day" | "d") => TimeUnit::Days,
            Some("hours" | "hour" | "h" | "hr") => TimeUnit::Hours,
            Some("minutes" | "minute" | "min") => TimeUnit::Minutes,
            Some("seconds" | "second" | "s" | "sec") => TimeUnit::Seconds,
            Some(_) => return Err(bad("unsupported time unit")),
            None => return Err(bad("empty units string")),
        };
        if !parts.next().is_some_and(|s| s.eq_ignore_ascii_case("since")) {
            return Err(bad("expected '<unit> since <date>'"));
        }
        let date_part = parts.next().ok_or_else(|| bad("missing reference date"))?;
        let (date_str, inline_time) = match date_part.split_once('T') {
            Some((d, t)) => (d, Some(t)),
            None => (date_part, None),
        };
        let time_str = inline_time.or_else(|| parts.next());

        let fields: Vec<&str> = date_str.split('-').collect();
        // Leading '-' marks a negative year.
        let (sign, fields) = if date_str.starts_with('-') {
            (-1, &fields[1..])
        } else {
            (1, &fields[..])
        };
        let [y, m, d] = fields else {
            return Err(bad("reference date must be YYYY-MM-DD"));
        };
        let year: i32 = y.parse().map_err(|_| bad("invalid year"))?;
        let month: u8 = m.parse().map_err(|_| bad("invalid month"))?;
        let day: u8 = d.parse().map_err(|_| bad("invalid day"))?;
        if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
            return Err(bad("reference date out of range"));
        }

        let base_fraction = match time_str {
            Some(t) => parse_time_of_day(t.trim_end_matches('Z')).ok_or_else(|| bad("invalid time of day"))?,
            None => 0.0,
        };

        Ok(Self {
            unit,
            base: CalendarDate::new(sign * year, month, day),
            base_fraction,
        })
    }

    /// The offset unit.
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// The reference date.
    pub fn base(&self) -> CalendarDate {
        self.base
    }
}

fn parse_time_of_day(t: &str) -> Option<f64> {
    let mut it = t.split(':');
    let h: f64 = it.next()?.parse().ok()?;
    let m: f64 = it.next().map_or(Some(0.0), |s| s.parse().ok())?;
    let s: f64 = it.next().map_or(Some(0.0), |s| s.parse().ok())?;
    if it.next().is_some() || !(0.0..24.0).contains(&h) || !(0.0..60.0).contains(&m) {
        return None;
    }
    Some((h * 3600.0 + m * 60.0 + s) / 86_400.0)
}

/// Decoded calendar dates of a source's time axis.
///
/// Decoding failures are kept rather than raised so that a grid can still be
/// opened and the failure reported against every cell that needs the axis.
#[derive(Debug, Clone)]
pub struct TimeAxis {
    calendar: CalendarKind,
    len: usize,
    dates: Result<Vec<CalendarDate>, CalendarError>,
}

impl TimeAxis {
    /// Decodes numeric offsets against `units` in `calendar`.
    ///
    /// Each offset is floored to a whole day. Two samples on the same day
    /// mean the axis is sub-daily, which is reported as
    /// [`CalendarError::UnsupportedCalendar`].
    pub fn from_offsets(offsets: &[f64], units: &TimeUnits, calendar: CalendarKind) -> Self {
        let len = offsets.len();
        let dates = decode_offsets(offsets, units, &calendar);
        Self {
            calendar,
            len,
            dates,
        }
    }

    /// A daily axis of `n_days` consecutive dates from `start`.
    pub fn daily(start: CalendarDate, n_days: usize, calendar: CalendarKind) -> Self {
        let dates = calendar.serial_day(start).and_then(|first| {
            (0..n_days as i64)
                .map(|i| calendar.date_from_serial(first + i))
                .collect()
        });
        Self {
            calendar,
            len: n_days,
            dates,
        }
    }

    /// An axis from already-decoded dates.
    pub fn from_dates(dates: Vec<CalendarDate>, calendar: CalendarKind) -> Self {
        Self {
            calendar,
            len: dates.len(),
            dates: Ok(dates),
        }
    }

    /// An axis of `len` timestamps that could not be decoded.
    pub fn undecodable(len: usize, calendar: CalendarKind, error: CalendarError) -> Self {
        Self {
            calendar,
            len,
            dates: Err(error),
        }
    }

    /// Concatenates axes of consecutive files. The first decoding error wins.
    pub fn concat(axes: Vec<TimeAxis>) -> Self {
        let calendar = axes
            .first()
            .map(|a| a.calendar.clone())
            .unwrap_or_default();
        let len = axes.iter().map(|a| a.len).sum();
        let dates = axes
            .into_iter()
            .try_fold(Vec::with_capacity(len), |mut acc: Vec<CalendarDate>, axis| {
                acc.extend(axis.dates?);
                Ok(acc)
            });
        Self {
            calendar,
            len,
            dates,
        }
    }

    /// Declared calendar.
    pub fn calendar(&self) -> &CalendarKind {
        &self.calendar
    }

    /// Number of timestamps (whether or not decoding succeeded).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Decoded dates, or the decoding error.
    pub fn dates(&self) -> Result<&[CalendarDate], CalendarError> {
        self.dates.as_deref().map_err(Clone::clone)
    }

    /// Projects `values` onto the 365-day calendar.
    ///
    /// February 29 entries are dropped along with their values. The
    /// remaining dates must be strictly consecutive.
    ///
    /// # Errors
    ///
    /// - The axis failed to decode (error passed through).
    /// - [`CalendarError::LengthMismatch`] if `values` does not match the axis.
    /// - [`CalendarError::InputAlignment`] for gaps, repeats or reversals.
    pub fn normalize(&self, values: &[f64]) -> Result<DailySeries, CalendarError> {
        let dates = self.dates()?;
        if dates.len() != values.len() {
            return Err(CalendarError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        let (kept_dates, kept_values): (Vec<_>, Vec<_>) = dates
            .iter()
            .zip(values)
            .filter_map(|(date, &v)| date.to_noleap().map(|d| (d, v)))
            .unzip();
        DailySeries::from_dates(&kept_dates, kept_values)
    }
}

fn decode_offsets(
    offsets: &[f64],
    units: &TimeUnits,
    calendar: &CalendarKind,
) -> Result<Vec<CalendarDate>, CalendarError> {
    let base = calendar.serial_day(units.base)?;
    let per_day = units.unit.per_day();
    let mut dates = Vec::with_capacity(offsets.len());
    let mut previous: Option<i64> = None;
    for (position, &offset) in offsets.iter().enumerate() {
        if !offset.is_finite() {
            return Err(CalendarError::InputAlignment {
                position,
                reason: format!("non-finite time offset {offset}"),
            });
        }
        let serial = base + (offset / per_day + units.base_fraction).floor() as i64;
        if previous == Some(serial) {
            return Err(CalendarError::UnsupportedCalendar {
                reason: format!(
                    "multiple timestamps fall on one day at position {position}; only daily data is supported"
                ),
            });
        }
        previous = Some(serial);
        dates.push(calendar.date_from_serial(serial)?);
    }
    Ok(dates)
}
