//! Error types for hwmid-pipeline.

use std::path::PathBuf;

use hwmid_climatology::ClimatologyError;
use hwmid_events::EventError;
use hwmid_io::IoError;

/// Failures that stop a whole grid run.
///
/// Problems confined to one cell never surface here; they are collected as
/// [`SkippedCell`](crate::SkippedCell)s instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Invalid climatology settings.
    #[error("invalid climatology configuration: {0}")]
    Climatology(#[from] ClimatologyError),

    /// Invalid event settings.
    #[error("invalid event configuration: {0}")]
    Events(#[from] EventError),

    /// Reading, caching or writing failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// Target grid does not match the grid the thresholds were computed on.
    #[error("target grid does not match thresholds of '{reference_id}': {reason}")]
    GridMismatch {
        /// Reference identifier of the threshold bundle.
        reference_id: String,
        /// What differs.
        reason: String,
    },

    /// The run report could not be written.
    #[error("failed to write report {}: {reason}", path.display())]
    Report {
        /// Destination path.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_grid_mismatch() {
        let err = PipelineError::GridMismatch {
            reference_id: "MIROC5".into(),
            reason: "4 cells vs 6".into(),
        };
        assert_eq!(
            err.to_string(),
            "target grid does not match thresholds of 'MIROC5': 4 cells vs 6"
        );
    }

    #[test]
    fn io_errors_are_transparent() {
        let err = PipelineError::from(IoError::MissingCacheEntry { id: "x".into() });
        assert_eq!(err.to_string(), "no cached thresholds for 'x'");
    }

    #[test]
    fn display_config_error() {
        let err = PipelineError::from(EventError::InvalidConfig {
            reason: "min_run_length must be at least 1".into(),
        });
        assert!(err.to_string().starts_with("invalid event configuration:"));
    }
}
