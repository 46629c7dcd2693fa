//! Error types for hwmid-io.

use std::path::PathBuf;

use hwmid_calendar::CalendarError;

/// Error type for all fallible operations in the hwmid-io crate.
///
/// Covers I/O failures, format-specific errors from NetCDF, Parquet and
/// bincode, calendar decoding issues and data-model mismatches encountered
/// when reading grids or persisting thresholds.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    /// Returned when a required file does not exist on disk.
    #[error("file not found: {}", path.display())]
    FileNotFound {
        /// Path that could not be found.
        path: PathBuf,
    },

    /// Returned when discovery finds no input files for an identifier.
    #[error("no input files matching '{pattern}' in {}", dir.display())]
    NoInputFiles {
        /// Directory that was searched.
        dir: PathBuf,
        /// File-name pattern that was applied.
        pattern: String,
    },

    /// Plain filesystem failure.
    #[error("i/o error on {}: {reason}", path.display())]
    Fs {
        /// Path involved.
        path: PathBuf,
        /// Description of the failure.
        reason: String,
    },

    /// Wraps an error originating from the NetCDF library.
    #[error("netcdf error: {reason}")]
    Netcdf {
        /// Description of the underlying NetCDF failure.
        reason: String,
    },

    /// Wraps an error originating from the Parquet or Arrow libraries.
    #[error("parquet error: {reason}")]
    Parquet {
        /// Description of the underlying Parquet failure.
        reason: String,
    },

    /// Wraps an error from the hwmid-calendar crate, keeping its kind.
    #[error("calendar error: {0}")]
    Calendar(#[from] CalendarError),

    /// Returned when one or more validation checks fail.
    #[error("{count} validation error(s): {details}")]
    Validation {
        /// Number of accumulated validation failures.
        count: usize,
        /// Human-readable summary of the failures.
        details: String,
    },

    /// Returned when a required variable is not present in a file.
    #[error("variable '{name}' not found in {}", path.display())]
    MissingVariable {
        /// Name of the missing variable.
        name: String,
        /// Path to the file that was inspected.
        path: PathBuf,
    },

    /// Returned when a dimension has an unexpected size.
    #[error("dimension '{name}' mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Name of the dimension.
        name: String,
        /// Expected size.
        expected: usize,
        /// Actual size.
        got: usize,
    },

    /// Returned when time metadata cannot be read.
    #[error("invalid time: {reason}")]
    InvalidTime {
        /// Description of the time parsing issue.
        reason: String,
    },

    /// No cached thresholds exist for a reference identifier.
    ///
    /// Recoverable: the caller recomputes and stores them.
    #[error("no cached thresholds for '{id}'")]
    MissingCacheEntry {
        /// Reference identifier used as the cache key.
        id: String,
    },

    /// A cache entry exists but could not be read or written.
    #[error("threshold cache error: {reason}")]
    Cache {
        /// Description of the failure.
        reason: String,
    },
}

impl From<netcdf::Error> for IoError {
    fn from(e: netcdf::Error) -> Self {
        IoError::Netcdf {
            reason: e.to_string(),
        }
    }
}

impl From<parquet::errors::ParquetError> for IoError {
    fn from(e: parquet::errors::ParquetError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<arrow::error::ArrowError> for IoError {
    fn from(e: arrow::error::ArrowError) -> Self {
        IoError::Parquet {
            reason: e.to_string(),
        }
    }
}

impl From<bincode::Error> for IoError {
    fn from(e: bincode::Error) -> Self {
        IoError::Cache {
            reason: e.to_string(),
        }
    }
}

impl IoError {
    /// Builds an [`IoError::Fs`] from a `std::io::Error` on `path`.
    pub(crate) fn fs(path: impl Into<PathBuf>, e: std::io::Error) -> Self {
        IoError::Fs {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_file_not_found() {
        let err = IoError::FileNotFound {
            path: PathBuf::from("/tmp/missing.nc"),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/missing.nc");
    }

    #[test]
    fn display_no_input_files() {
        let err = IoError::NoInputFiles {
            dir: PathBuf::from("/data/MIROC5"),
            pattern: "*tasmax_*.nc4".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "no input files matching '*tasmax_*.nc4' in /data/MIROC5"
        );
    }

    #[test]
    fn display_missing_variable() {
        let err = IoError::MissingVariable {
            name: "tasmax".to_string(),
            path: PathBuf::from("/data/pic.nc4"),
        };
        assert_eq!(err.to_string(), "variable 'tasmax' not found in /data/pic.nc4");
    }

    #[test]
    fn display_dimension_mismatch() {
        let err = IoError::DimensionMismatch {
            name: "time".to_string(),
            expected: 365,
            got: 366,
        };
        assert_eq!(
            err.to_string(),
            "dimension 'time' mismatch: expected 365, got 366"
        );
    }

    #[test]
    fn display_missing_cache_entry() {
        let err = IoError::MissingCacheEntry {
            id: "MIROC5".to_string(),
        };
        assert_eq!(err.to_string(), "no cached thresholds for 'MIROC5'");
    }

    #[test]
    fn from_netcdf_error() {
        let nc_err = netcdf::Error::Str("test nc error".to_string());
        let err: IoError = nc_err.into();
        assert!(matches!(err, IoError::Netcdf { .. }));
        assert!(err.to_string().contains("test nc error"));
    }

    #[test]
    fn from_parquet_error() {
        let pq_err = parquet::errors::ParquetError::General("test pq error".to_string());
        let err: IoError = pq_err.into();
        assert!(matches!(err, IoError::Parquet { .. }));
        assert!(err.to_string().contains("test pq error"));
    }

    #[test]
    fn from_calendar_error_keeps_kind() {
        let cal_err = CalendarError::UnsupportedCalendar {
            reason: "360_day".to_string(),
        };
        let err: IoError = cal_err.into();
        assert!(matches!(
            err,
            IoError::Calendar(CalendarError::UnsupportedCalendar { .. })
        ));
        assert!(err.to_string().starts_with("calendar error"));
    }

    #[test]
    fn error_is_send_sync_and_std_error() {
        fn assert_bounds<T: Send + Sync + std::error::Error>() {}
        assert_bounds::<IoError>();
    }
}
