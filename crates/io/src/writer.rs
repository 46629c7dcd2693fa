//! High-level Parquet writer configuration and orchestration.

use std::path::Path;
use std::sync::Arc;

use parquet::file::properties::WriterProperties;
use tracing::info;

use crate::bundle::{CellHwmid, ThresholdBundle};
use crate::error::IoError;
use crate::parquet_write;

/// Compression algorithm for Parquet output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Compression {
    /// No compression.
    None,
    /// Snappy compression (fast, moderate ratio).
    #[default]
    Snappy,
    /// Zstd compression (slower, better ratio).
    Zstd,
}

impl Compression {
    /// Parses `none`, `snappy` or `zstd` (case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "none" | "uncompressed" => Some(Self::None),
            "snappy" => Some(Self::Snappy),
            "zstd" => Some(Self::Zstd),
            _ => None,
        }
    }

    fn to_parquet(self) -> Result<parquet::basic::Compression, IoError> {
        Ok(match self {
            Self::None => parquet::basic::Compression::UNCOMPRESSED,
            Self::Snappy => parquet::basic::Compression::SNAPPY,
            Self::Zstd => {
                let level = parquet::basic::ZstdLevel::try_new(3)?;
                parquet::basic::Compression::ZSTD(level)
            }
        })
    }
}

/// Configuration for Parquet output tables.
#[derive(Debug, Clone)]
pub struct WriterConfig {
    compression: Compression,
    /// Maximum number of rows per row group.
    row_group_size: usize,
    /// Cells converted per record batch.
    cells_per_batch: usize,
}

impl Default for WriterConfig {
    fn default() -> Self {
        Self {
            compression: Compression::default(),
            row_group_size: 1_000_000,
            cells_per_batch: 1024,
        }
    }
}

impl WriterConfig {
    pub fn with_compression(mut self, comp: Compression) -> Self {
        self.compression = comp;
        self
    }

    pub fn with_row_group_size(mut self, size: usize) -> Self {
        self.row_group_size = size;
        self
    }

    pub fn with_cells_per_batch(mut self, n: usize) -> Self {
        self.cells_per_batch = n;
        self
    }

    pub fn compression(&self) -> Compression {
        self.compression
    }

    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if `row_group_size` or
    /// `cells_per_batch` is zero.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.row_group_size == 0 {
            problems.push("row_group_size must be greater than 0");
        }
        if self.cells_per_batch == 0 {
            problems.push("cells_per_batch must be greater than 0");
        }
        if problems.is_empty() {
            Ok(())
        } else {
            Err(IoError::Validation {
                count: problems.len(),
                details: problems.join("; "),
            })
        }
    }

    fn properties(&self) -> Result<WriterProperties, IoError> {
        Ok(WriterProperties::builder()
            .set_compression(self.compression.to_parquet()?)
            .set_max_row_group_size(self.row_group_size)
            .build())
    }
}

/// Write every cell's thresholds as a long table
/// (`cell, lat, lon, day_of_year, p90, p25, p75`).
///
/// Skipped cells have no rows.
///
/// # Errors
///
/// [`IoError::Validation`] for an invalid configuration, [`IoError::Fs`] or
/// [`IoError::Parquet`] if writing fails.
pub fn write_thresholds(
    path: &Path,
    bundle: &ThresholdBundle,
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let schema = Arc::new(parquet_write::thresholds_schema());
    let batches = bundle
        .cells()
        .chunks(config.cells_per_batch)
        .map(|chunk| parquet_write::thresholds_to_record_batch(chunk, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, schema, config.properties()?)?;
    info!(
        path = %path.display(),
        id = bundle.reference_id(),
        n_cells = bundle.cells().len(),
        "wrote thresholds table"
    );
    Ok(())
}

/// Write per-year HWMId
/// (`cell, lat, lon, year, hwmid, n_events, status`).
///
/// # Errors
///
/// [`IoError::Validation`] for an invalid configuration, [`IoError::Fs`] or
/// [`IoError::Parquet`] if writing fails.
pub fn write_hwmid(path: &Path, cells: &[CellHwmid], config: &WriterConfig) -> Result<(), IoError> {
    config.validate()?;
    let schema = Arc::new(parquet_write::hwmid_schema());
    let batches = cells
        .chunks(config.cells_per_batch)
        .map(|chunk| parquet_write::hwmid_to_record_batch(chunk, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, schema, config.properties()?)?;
    info!(path = %path.display(), n_cells = cells.len(), "wrote hwmid table");
    Ok(())
}

/// Write one row per detected event
/// (`cell, lat, lon, year, start, end, length, magnitude`).
///
/// # Errors
///
/// [`IoError::Validation`] for an invalid configuration, [`IoError::Fs`] or
/// [`IoError::Parquet`] if writing fails.
pub fn write_events(
    path: &Path,
    cells: &[CellHwmid],
    config: &WriterConfig,
) -> Result<(), IoError> {
    config.validate()?;
    let schema = Arc::new(parquet_write::events_schema());
    let batches = cells
        .chunks(config.cells_per_batch)
        .map(|chunk| parquet_write::events_to_record_batch(chunk, &schema))
        .collect::<Result<Vec<_>, _>>()?;
    parquet_write::write_batches(path, &batches, schema, config.properties()?)?;
    let n_events: usize = cells.iter().map(|c| c.events.len()).sum();
    info!(path = %path.display(), n_events, "wrote events table");
    Ok(())
}
