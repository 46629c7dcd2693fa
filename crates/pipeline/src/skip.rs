//! Per-cell failure records.

use std::fmt;

use hwmid_io::GridCell;
use serde::Serialize;

/// Step at which a cell failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Calendar normalization of the cell's series.
    Normalize,
    /// Threshold estimation from the reference series.
    Climatology,
    /// No thresholds were available for the cell.
    Thresholds,
    /// Hot-period detection.
    Detect,
    /// Magnitude normalization and yearly aggregation.
    Magnitude,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normalize => "normalize",
            Self::Climatology => "climatology",
            Self::Thresholds => "thresholds",
            Self::Detect => "detect",
            Self::Magnitude => "magnitude",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cell left out of a run, with the step that failed and why.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedCell {
    pub cell: GridCell,
    pub stage: Stage,
    pub reason: String,
}

impl SkippedCell {
    pub fn new(cell: GridCell, stage: Stage, reason: impl fmt::Display) -> Self {
        Self {
            cell,
            stage,
            reason: reason.to_string(),
        }
    }
}

impl fmt::Display for SkippedCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.stage, self.reason)
    }
}
