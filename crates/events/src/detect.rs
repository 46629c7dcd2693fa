//! Run-length detection of hot periods.

use std::ops::Range;

use hwmid_calendar::{DAYS_PER_YEAR, DailySeries, NoLeapDate};
use tracing::trace;

use crate::config::EventConfig;
use crate::error::EventError;

/// Scanner state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Not inside an exceedance run.
    Outside,
    /// Inside a run that began at `start` and has lasted `length` days.
    Inside { start: usize, length: usize },
}

/// Step-wise run detector over a boolean exceedance stream.
///
/// Feed observations in order with [`step`](Self::step); call
/// [`finish`](Self::finish) after the last one so a run reaching the end of
/// the series is not lost.
#[derive(Debug, Clone)]
pub struct RunDetector {
    state: RunState,
    min_run_length: usize,
}

impl RunDetector {
    pub fn new(min_run_length: usize) -> Self {
        Self {
            state: RunState::Outside,
            min_run_length,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Advances by one observation at position `index`.
    ///
    /// Returns the index range of a run that just ended, if it is at least
    /// `min_run_length` long.
    pub fn step(&mut self, index: usize, exceeds: bool) -> Option<Range<usize>> {
        let (next, emitted) = match (self.state, exceeds) {
            (RunState::Outside, false) => (RunState::Outside, None),
            (RunState::Outside, true) => (
                RunState::Inside {
                    start: index,
                    length: 1,
                },
                None,
            ),
            (RunState::Inside { start, length }, true) => (
                RunState::Inside {
                    start,
                    length: length + 1,
                },
                None,
            ),
            (RunState::Inside { start, length }, false) => {
                (RunState::Outside, self.qualifying(start, length))
            }
        };
        self.state = next;
        emitted
    }

    /// Ends the stream, emitting a qualifying run still open.
    pub fn finish(self) -> Option<Range<usize>> {
        match self.state {
            RunState::Inside { start, length } => self.qualifying(start, length),
            RunState::Outside => None,
        }
    }

    fn qualifying(&self, start: usize, length: usize) -> Option<Range<usize>> {
        (length >= self.min_run_length).then_some(start..start + length)
    }
}

/// A maximal run of consecutive days strictly above the daily threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HotPeriod {
    start: NoLeapDate,
    end: NoLeapDate,
    values: Vec<f64>,
}

impl HotPeriod {
    /// Creates a period starting at `start` with one value per day.
    ///
    /// `values` must not be empty.
    pub fn new(start: NoLeapDate, values: Vec<f64>) -> Self {
        let end = start.add_days(values.len().saturating_sub(1) as i64);
        Self { start, end, values }
    }

    pub fn start(&self) -> NoLeapDate {
        self.start
    }

    /// Final day of the period.
    pub fn end(&self) -> NoLeapDate {
        self.end
    }

    /// Daily values in date order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Year the period counts toward: the year of its final day.
    pub fn year(&self) -> i32 {
        self.end.year()
    }
}

/// Finds every hot period in `series`.
///
/// A day exceeds when its value is finite and strictly greater than
/// `p90` for its day of year. Missing or infinite values end a run and
/// never belong to one.
///
/// # Errors
///
/// - [`EventError::ThresholdLength`] unless `p90` has 365 entries.
/// - [`EventError::InvalidConfig`] for an invalid `config`.
pub fn detect_hot_periods(
    series: &DailySeries,
    p90: &[f64],
    config: &EventConfig,
) -> Result<Vec<HotPeriod>, EventError> {
    config.validate()?;
    if p90.len() != usize::from(DAYS_PER_YEAR) {
        return Err(EventError::ThresholdLength {
            expected: usize::from(DAYS_PER_YEAR),
            got: p90.len(),
        });
    }

    let values = series.values();
    let to_period = |r: Range<usize>| HotPeriod::new(series.date_at(r.start), values[r].to_vec());

    let mut detector = RunDetector::new(config.min_run_length());
    let mut periods = Vec::new();
    for (i, (date, v)) in series.iter().enumerate() {
        let exceeds = v.is_finite() && v > p90[date.doy().index()];
        if let Some(run) = detector.step(i, exceeds) {
            periods.push(to_period(run));
        }
    }
    if let Some(run) = detector.finish() {
        periods.push(to_period(run));
    }

    trace!(n_events = periods.len(), "hot periods detected");
    Ok(periods)
}
