//! JSON run report.

use std::path::{Path, PathBuf};

use hwmid_io::ThresholdBundle;
use serde::Serialize;
use tracing::info;

use crate::error::PipelineError;
use crate::hwmid::GridHwmid;
use crate::skip::{SkippedCell, Stage};
use crate::thresholds::ThresholdOrigin;

/// What a run produced: which cells succeeded, which were skipped and why.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub command: String,
    pub reference_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    pub thresholds_origin: ThresholdOrigin,
    pub n_cells: usize,
    /// Indices of cells with results.
    pub succeeded: Vec<usize>,
    pub skipped: Vec<SkippedCell>,
    /// Output files written by the run.
    pub outputs: Vec<PathBuf>,
}

impl RunReport {
    /// Report of a threshold run.
    pub fn for_thresholds(bundle: &ThresholdBundle, origin: ThresholdOrigin) -> Self {
        let skipped: Vec<SkippedCell> = bundle
            .skipped()
            .iter()
            .map(|(cell, reason)| SkippedCell::new(*cell, Stage::Thresholds, reason))
            .collect();
        Self {
            command: "thresholds".into(),
            reference_id: bundle.reference_id().to_string(),
            target_id: None,
            thresholds_origin: origin,
            n_cells: bundle.cells().len() + skipped.len(),
            succeeded: bundle.cells().iter().map(|c| c.cell.index).collect(),
            skipped,
            outputs: Vec::new(),
        }
    }

    /// Report of an HWMId run on `target_id`.
    pub fn for_hwmid(target_id: &str, result: &GridHwmid, origin: ThresholdOrigin) -> Self {
        Self {
            command: "compute".into(),
            reference_id: result.reference_id().to_string(),
            target_id: Some(target_id.to_string()),
            thresholds_origin: origin,
            n_cells: result.cells().len() + result.skipped().len(),
            succeeded: result.cells().iter().map(|c| c.cell.index).collect(),
            skipped: result.skipped().to_vec(),
            outputs: Vec::new(),
        }
    }

    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.push(path.into());
        self
    }

    /// Writes the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// [`PipelineError::Report`] if encoding or writing fails.
    pub fn write_json(&self, path: &Path) -> Result<(), PipelineError> {
        let report_err = |reason: String| PipelineError::Report {
            path: path.to_path_buf(),
            reason,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| report_err(e.to_string()))?;
        std::fs::write(path, json).map_err(|e| report_err(e.to_string()))?;
        info!(
            path = %path.display(),
            succeeded = self.succeeded.len(),
            skipped = self.skipped.len(),
            "run report written"
        );
        Ok(())
    }
}
