//! # hwmid-events
//!
//! Hot-period detection and HWMId magnitudes.
//!
//! A hot period is a run of at least three consecutive days whose value is
//! strictly above the day-of-year threshold `p90`. Each day of a period
//! contributes `(v - p25) / (p75 - p25)` when above `p25`; a period's
//! magnitude is the sum, and a year's HWMId is the largest magnitude among
//! the periods ending in it.
//!
//! ```ignore
//! use hwmid_events::{EventConfig, annual_hwmid, detect_hot_periods};
//!
//! let periods = detect_hot_periods(&target, thresholds.p90(), &EventConfig::new())?;
//! let per_year = annual_hwmid(&periods, thresholds.p25(), thresholds.p75(), 2071..=2100)?;
//! ```

mod config;
mod detect;
mod error;
mod magnitude;

pub use config::EventConfig;
pub use detect::{HotPeriod, RunDetector, RunState, detect_hot_periods};
pub use error::EventError;
pub use magnitude::{
    EventSummary, YearMagnitude, annual_hwmid, check_distribution, daily_contribution,
    event_magnitude, summarize_events,
};
