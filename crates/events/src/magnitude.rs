//! Event magnitudes and per-year HWMId.

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use hwmid_calendar::NoLeapDate;
use serde::Serialize;

use crate::detect::HotPeriod;
use crate::error::EventError;

/// HWMId of one year: the largest event magnitude, or an explicit marker
/// that no event ended in that year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum YearMagnitude {
    Event { magnitude: f64, n_events: u32 },
    NoEvent,
}

impl YearMagnitude {
    /// The magnitude, or `None` for [`YearMagnitude::NoEvent`].
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            Self::Event { magnitude, .. } => Some(*magnitude),
            Self::NoEvent => None,
        }
    }

    /// Number of events that ended in the year.
    pub fn n_events(&self) -> u32 {
        match self {
            Self::Event { n_events, .. } => *n_events,
            Self::NoEvent => 0,
        }
    }

    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

/// Checks that `(p25, p75)` can normalize a magnitude.
///
/// # Errors
///
/// [`EventError::DegenerateDistribution`] unless both are finite and
/// `p75 > p25`.
pub fn check_distribution(p25: f64, p75: f64) -> Result<(), EventError> {
    if p25.is_finite() && p75.is_finite() && p75 > p25 {
        Ok(())
    } else {
        Err(EventError::DegenerateDistribution { p25, p75 })
    }
}

/// Normalized contribution of one day: `(v - p25) / (p75 - p25)` when
/// `v > p25`, otherwise zero.
///
/// Assumes [`check_distribution`] passed.
pub fn daily_contribution(v: f64, p25: f64, p75: f64) -> f64 {
    if v > p25 { (v - p25) / (p75 - p25) } else { 0.0 }
}

/// Sum of the daily contributions of `event`.
///
/// # Errors
///
/// [`EventError::DegenerateDistribution`] (see [`check_distribution`]).
pub fn event_magnitude(event: &HotPeriod, p25: f64, p75: f64) -> Result<f64, EventError> {
    check_distribution(p25, p75)?;
    Ok(event
        .values()
        .iter()
        .map(|&v| daily_contribution(v, p25, p75))
        .sum())
}

/// Per-year HWMId over `years`.
///
/// Each event counts toward the year of its final day. Every year in
/// `years` gets an entry; years without events get
/// [`YearMagnitude::NoEvent`].
///
/// # Errors
///
/// [`EventError::DegenerateDistribution`] (checked even when there are no
/// events).
pub fn annual_hwmid(
    events: &[HotPeriod],
    p25: f64,
    p75: f64,
    years: RangeInclusive<i32>,
) -> Result<BTreeMap<i32, YearMagnitude>, EventError> {
    check_distribution(p25, p75)?;
    let mut out: BTreeMap<i32, YearMagnitude> =
        years.map(|y| (y, YearMagnitude::NoEvent)).collect();
    for event in events {
        let m = event_magnitude(event, p25, p75)?;
        let slot = out.entry(event.year()).or_insert(YearMagnitude::NoEvent);
        *slot = match *slot {
            YearMagnitude::NoEvent => YearMagnitude::Event {
                magnitude: m,
                n_events: 1,
            },
            YearMagnitude::Event {
                magnitude,
                n_events,
            } => YearMagnitude::Event {
                magnitude: magnitude.max(m),
                n_events: n_events + 1,
            },
        };
    }
    Ok(out)
}

/// Description of one detected event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub start: NoLeapDate,
    pub end: NoLeapDate,
    pub length: usize,
    pub magnitude: f64,
    /// Year the event counts toward.
    pub year: i32,
}

/// Summaries of `events` in order.
pub fn summarize_events(
    events: &[HotPeriod],
    p25: f64,
    p75: f64,
) -> Result<Vec<EventSummary>, EventError> {
    events
        .iter()
        .map(|e| {
            Ok(EventSummary {
                start: e.start(),
                end: e.end(),
                length: e.len(),
                magnitude: event_magnitude(e, p25, p75)?,
                year: e.year(),
            })
        })
        .collect()
}
