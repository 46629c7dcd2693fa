//! Locating and reading a dataset's daily grid.

use std::path::{Path, PathBuf};

use hwmid_io::{DailyGrid, ReaderConfig, discover_files, read_daily_grid};
use hwmid_pipeline::PipelineError;
use tracing::info;

/// Reads every `<dir>/<id>/*<variable>_*` file starting no later than
/// `max_start_year` into one grid.
pub fn load_grid(
    dir: &Path,
    id: &str,
    reader: &ReaderConfig,
    max_start_year: Option<i32>,
) -> Result<DailyGrid, PipelineError> {
    let files = discover_files(dir, id, reader.variable(), max_start_year)?;
    info!(
        id,
        n_files = files.len(),
        first_year = files.first().map(|f| f.start_year),
        last_year = files.last().map(|f| f.end_year),
        "input files found"
    );
    let paths: Vec<PathBuf> = files.into_iter().map(|f| f.path).collect();
    Ok(read_daily_grid(&paths, reader)?)
}
