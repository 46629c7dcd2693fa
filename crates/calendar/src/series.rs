//! Contiguous daily series on the 365-day calendar.

use crate::date::NoLeapDate;
use crate::doy::{DAYS_PER_YEAR, Doy};
use crate::error::CalendarError;

/// A daily series on the 365-day calendar with no gaps.
///
/// Value `i` belongs to `start + i` days. Missing observations are `NaN`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    start: NoLeapDate,
    values: Vec<f64>,
}

impl DailySeries {
    /// Creates a series starting at `start`. Contiguous by construction.
    pub fn new(start: NoLeapDate, values: Vec<f64>) -> Self {
        Self { start, values }
    }

    /// Builds a series from explicit dates, checking they advance by exactly
    /// one day at each step.
    ///
    /// # Errors
    ///
    /// - [`CalendarError::LengthMismatch`] if the lengths differ.
    /// - [`CalendarError::InputAlignment`] if `dates` is empty, repeats a
    ///   date, goes backwards, or skips days.
    pub fn from_dates(dates: &[NoLeapDate], values: Vec<f64>) -> Result<Self, CalendarError> {
        if dates.len() != values.len() {
            return Err(CalendarError::LengthMismatch {
                dates: dates.len(),
                values: values.len(),
            });
        }
        let Some(&start) = dates.first() else {
            return Err(CalendarError::InputAlignment {
                position: 0,
                reason: "series contains no dates".to_string(),
            });
        };
        for (i, pair) in dates.windows(2).enumerate() {
            let step = pair[1].day_number() - pair[0].day_number();
            let reason = match step {
                1 => continue,
                0 => format!("duplicate date {}", pair[1]),
                s if s < 0 => format!("date {} precedes {}", pair[1], pair[0]),
                s => format!("gap of {} days between {} and {}", s - 1, pair[0], pair[1]),
            };
            return Err(CalendarError::InputAlignment {
                position: i + 1,
                reason,
            });
        }
        Ok(Self { start, values })
    }

    /// First date.
    pub fn start(&self) -> NoLeapDate {
        self.start
    }

    /// Last date, or `None` for an empty series.
    pub fn end(&self) -> Option<NoLeapDate> {
        (!self.values.is_empty()).then(|| self.start.add_days(self.values.len() as i64 - 1))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Date of the value at `index`.
    pub fn date_at(&self, index: usize) -> NoLeapDate {
        self.start.add_days(index as i64)
    }

    /// Iterates `(date, value)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (NoLeapDate, f64)> + '_ {
        std::iter::successors(Some(self.start), |d| Some(d.next())).zip(self.values.iter().copied())
    }

    /// Iterates `(year, values)` chunks, one per calendar year touched.
    ///
    /// The first and last chunks may be partial.
    pub fn year_chunks(&self) -> impl Iterator<Item = (i32, &[f64])> + '_ {
        let first_len = usize::from(DAYS_PER_YEAR) - self.start.doy().index();
        let mut rest = self.values.as_slice();
        let mut year = self.start.year();
        let mut take = first_len;
        std::iter::from_fn(move || {
            if rest.is_empty() {
                return None;
            }
            let n = take.min(rest.len());
            let (chunk, tail) = rest.split_at(n);
            rest = tail;
            let out = (year, chunk);
            year += 1;
            take = usize::from(DAYS_PER_YEAR);
            Some(out)
        })
    }

    /// Sub-series covering `first..=last` years (either bound optional).
    pub fn restrict_years(&self, first: Option<i32>, last: Option<i32>) -> DailySeries {
        let Some(end) = self.end() else {
            return self.clone();
        };
        let from = match first {
            Some(y) if y > self.start.year() => NoLeapDate::from_year_doy(y, Doy::FIRST),
            _ => self.start,
        };
        let to = match last {
            Some(y) if y < end.year() => NoLeapDate::from_year_doy(y, Doy::LAST),
            _ => end,
        };
        if to < from {
            return DailySeries::new(from, Vec::new());
        }
        let lo = (from.day_number() - self.start.day_number()) as usize;
        let hi = (to.day_number() - self.start.day_number()) as usize;
        DailySeries::new(from, self.values[lo..=hi].to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> NoLeapDate {
        NoLeapDate::new(y, m, d).unwrap()
    }

    #[test]
    fn from_dates_accepts_contiguous() {
        let dates = [date(2000, 12, 31), date(2001, 1, 1)];
        let s = DailySeries::from_dates(&dates, vec![1.0, 2.0]).unwrap();
        assert_eq!(s.end(), Some(date(2001, 1, 1)));
    }

    #[test]
    fn from_dates_rejects_gap_and_repeat() {
        let gap = [date(2000, 1, 1), date(2000, 1, 3)];
        assert!(matches!(
            DailySeries::from_dates(&gap, vec![1.0, 2.0]),
            Err(CalendarError::InputAlignment { position: 1, .. })
        ));
        let repeat = [date(2000, 1, 1), date(2000, 1, 2), date(2000, 1, 2)];
        assert!(matches!(
            DailySeries::from_dates(&repeat, vec![1.0; 3]),
            Err(CalendarError::InputAlignment { position: 2, .. })
        ));
        let backwards = [date(2000, 1, 2), date(2000, 1, 1)];
        assert!(DailySeries::from_dates(&backwards, vec![1.0; 2]).is_err());
    }

    #[test]
    fn from_dates_rejects_length_mismatch() {
        assert_eq!(
            DailySeries::from_dates(&[date(2000, 1, 1)], vec![1.0, 2.0]).unwrap_err(),
            CalendarError::LengthMismatch {
                dates: 1,
                values: 2
            }
        );
    }

    #[test]
    fn year_chunks_split_partial_years() {
        let s = DailySeries::new(date(2000, 12, 30), vec![0.0; 2 + 365 + 3]);
        let chunks: Vec<(i32, usize)> = s.year_chunks().map(|(y, c)| (y, c.len())).collect();
        assert_eq!(chunks, vec![(2000, 2), (2001, 365), (2002, 3)]);
    }

    #[test]
    fn restrict_years_trims_both_ends() {
        let s = DailySeries::new(date(2000, 1, 1), (0..365 * 3).map(f64::from).collect());
        let mid = s.restrict_years(Some(2001), Some(2001));
        assert_eq!(mid.start(), date(2001, 1, 1));
        assert_eq!(mid.len(), 365);
        assert_eq!(mid.values()[0], 365.0);
        assert!(s.restrict_years(Some(2003), None).is_empty());
        assert_eq!(s.restrict_years(None, None), s);
    }

    #[test]
    fn iter_pairs_dates_and_values() {
        let s = DailySeries::new(date(2000, 12, 31), vec![1.0, 2.0]);
        let pairs: Vec<_> = s.iter().collect();
        assert_eq!(pairs[1], (date(2001, 1, 1), 2.0));
    }
}
