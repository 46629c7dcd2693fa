//! Grid-wide threshold estimation and cache resolution.

use hwmid_climatology::estimate_thresholds;
use hwmid_io::{CellThresholds, GridCell, GridSource, IoError, ThresholdBundle, ThresholdCache};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::skip::{SkippedCell, Stage};

/// Where a run's thresholds came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdOrigin {
    Cache,
    Computed,
}

fn cell_thresholds<S: GridSource + ?Sized>(
    source: &S,
    cell: &GridCell,
    config: &PipelineConfig,
) -> Result<CellThresholds, SkippedCell> {
    let series = source
        .cell_series(cell.index)
        .map_err(|e| SkippedCell::new(*cell, Stage::Normalize, e))?;
    let companion = source.annual_maxima(cell.index);
    let result = estimate_thresholds(&series, companion.as_ref(), config.climatology())
        .map_err(|e| SkippedCell::new(*cell, Stage::Climatology, e))?;
    if !result.excluded_years().is_empty() {
        debug!(
            cell = cell.index,
            excluded = result.excluded_years().len(),
            "years left out of annual maxima"
        );
    }
    Ok(CellThresholds {
        cell: *cell,
        thresholds: result.into_thresholds(),
    })
}

/// Estimates thresholds for every cell of `source` in parallel.
///
/// A cell whose series cannot be normalized or whose climatology cannot be
/// estimated is recorded in the bundle's skipped list; it never stops the
/// other cells.
///
/// # Errors
///
/// Only an invalid `config`.
pub fn compute_grid_thresholds<S: GridSource + ?Sized>(
    source: &S,
    reference_id: &str,
    config: &PipelineConfig,
) -> Result<ThresholdBundle, PipelineError> {
    config.validate()?;
    let _span = info_span!("thresholds", id = reference_id).entered();

    let outcomes: Vec<Result<CellThresholds, SkippedCell>> = source
        .cells()
        .par_iter()
        .map(|cell| cell_thresholds(source, cell, config))
        .collect();

    let mut cells = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(c) => cells.push(c),
            Err(s) => {
                warn!(cell = s.cell.index, stage = %s.stage, reason = %s.reason, "cell skipped");
                skipped.push((s.cell, s.to_string()));
            }
        }
    }

    info!(n_cells = cells.len(), n_skipped = skipped.len(), "thresholds computed");
    Ok(ThresholdBundle::new(reference_id, cells, skipped))
}

/// Returns the thresholds for `reference_id`, from `cache` when possible.
///
/// The reference grid is only loaded (through `load_source`) when the
/// thresholds have to be computed: on a cache miss, on an unreadable entry,
/// or when the config forces recomputation. Freshly computed bundles are
/// stored back, replacing any previous entry.
///
/// # Errors
///
/// Failures of `load_source`, an invalid config, or a failed cache store.
pub fn resolve_thresholds<S, F>(
    reference_id: &str,
    cache: &dyn ThresholdCache,
    config: &PipelineConfig,
    load_source: F,
) -> Result<(ThresholdBundle, ThresholdOrigin), PipelineError>
where
    S: GridSource,
    F: FnOnce() -> Result<S, PipelineError>,
{
    if config.force_recompute() {
        info!(id = reference_id, "recomputing thresholds (forced)");
    } else {
        match cache.load(reference_id) {
            Ok(bundle) => {
                info!(id = reference_id, n_cells = bundle.cells().len(), "using cached thresholds");
                return Ok((bundle, ThresholdOrigin::Cache));
            }
            Err(IoError::MissingCacheEntry { .. }) => {
                info!(id = reference_id, "no cached thresholds, computing");
            }
            Err(e) => {
                warn!(id = reference_id, error = %e, "unusable cached thresholds, recomputing");
            }
        }
    }

    let source = load_source()?;
    let bundle = compute_grid_thresholds(&source, reference_id, config)?;
    cache.store(&bundle)?;
    Ok((bundle, ThresholdOrigin::Computed))
}
