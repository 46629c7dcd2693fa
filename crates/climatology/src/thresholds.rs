//! Per-cell threshold set.

use hwmid_calendar::DAYS_PER_YEAR;
use serde::{Deserialize, Serialize};

use crate::error::ClimatologyError;

/// Thresholds derived from a cell's reference period.
///
/// `p25` and `p75` are quantiles of the annual maxima and normalize event
/// magnitudes; `p90` holds one detection threshold per day of year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    p25: f64,
    p75: f64,
    p90: Vec<f64>,
}

impl Thresholds {
    /// # Errors
    ///
    /// [`ClimatologyError::ThresholdLength`] unless `p90` has 365 entries.
    pub fn new(p25: f64, p75: f64, p90: Vec<f64>) -> Result<Self, ClimatologyError> {
        if p90.len() != usize::from(DAYS_PER_YEAR) {
            return Err(ClimatologyError::ThresholdLength {
                expected: usize::from(DAYS_PER_YEAR),
                got: p90.len(),
            });
        }
        Ok(Self { p25, p75, p90 })
    }

    pub fn p25(&self) -> f64 {
        self.p25
    }

    pub fn p75(&self) -> f64 {
        self.p75
    }

    /// Daily thresholds indexed by `Doy::index()`.
    pub fn p90(&self) -> &[f64] {
        &self.p90
    }
}
