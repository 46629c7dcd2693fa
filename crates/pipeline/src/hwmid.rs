//! Grid-wide HWMId computation against precomputed thresholds.

use hwmid_events::{EventError, annual_hwmid, detect_hot_periods, summarize_events};
use hwmid_io::{CellHwmid, GridCell, GridSource, ThresholdBundle};
use rayon::prelude::*;
use tracing::{info, info_span, warn};

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use crate::skip::{SkippedCell, Stage};

/// Coordinates closer than this are the same grid point.
const COORD_TOLERANCE: f64 = 1e-6;

/// Per-year HWMId of every cell that could be processed, plus the ones
/// that could not.
#[derive(Debug, Clone)]
pub struct GridHwmid {
    reference_id: String,
    cells: Vec<CellHwmid>,
    skipped: Vec<SkippedCell>,
}

impl GridHwmid {
    /// Identifier of the thresholds used.
    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    /// Successful cells, ordered by index.
    pub fn cells(&self) -> &[CellHwmid] {
        &self.cells
    }

    pub fn skipped(&self) -> &[SkippedCell] {
        &self.skipped
    }
}

fn check_grid(target: &[GridCell], bundle: &ThresholdBundle) -> Result<(), PipelineError> {
    let mismatch = |reason: String| PipelineError::GridMismatch {
        reference_id: bundle.reference_id().to_string(),
        reason,
    };
    let n_reference = bundle.cells().len() + bundle.skipped().len();
    if n_reference != target.len() {
        return Err(mismatch(format!(
            "thresholds cover {n_reference} cells, target has {}",
            target.len()
        )));
    }
    let reference_cells = bundle
        .cells()
        .iter()
        .map(|c| &c.cell)
        .chain(bundle.skipped().iter().map(|(c, _)| c));
    for r in reference_cells {
        let Some(t) = target.get(r.index) else {
            return Err(mismatch(format!("cell index {} not in target", r.index)));
        };
        if (t.lat - r.lat).abs() > COORD_TOLERANCE || (t.lon - r.lon).abs() > COORD_TOLERANCE {
            return Err(mismatch(format!(
                "cell {} is at ({}, {}) in the target but ({}, {}) in the thresholds",
                r.index, t.lat, t.lon, r.lat, r.lon
            )));
        }
    }
    Ok(())
}

fn cell_hwmid<S: GridSource + ?Sized>(
    target: &S,
    cell: &GridCell,
    bundle: &ThresholdBundle,
    config: &PipelineConfig,
) -> Result<CellHwmid, SkippedCell> {
    let Some(thresholds) = bundle.get(cell.index) else {
        let reason = bundle
            .skipped()
            .iter()
            .find(|(c, _)| c.index == cell.index)
            .map_or("no thresholds for cell", |(_, r)| r.as_str());
        return Err(SkippedCell::new(*cell, Stage::Thresholds, reason));
    };

    let series = target
        .cell_series(cell.index)
        .map_err(|e| SkippedCell::new(*cell, Stage::Normalize, e))?;
    let periods = detect_hot_periods(&series, thresholds.p90(), config.events())
        .map_err(|e| SkippedCell::new(*cell, Stage::Detect, e))?;

    let (p25, p75) = (thresholds.p25(), thresholds.p75());
    let first_year = series.start().year();
    let last_year = series.end().map_or(first_year, |d| d.year());
    let magnitude_err = |e: EventError| SkippedCell::new(*cell, Stage::Magnitude, e);
    let years = annual_hwmid(&periods, p25, p75, first_year..=last_year).map_err(magnitude_err)?;
    let events = summarize_events(&periods, p25, p75).map_err(magnitude_err)?;

    Ok(CellHwmid {
        cell: *cell,
        years,
        events,
    })
}

/// Computes per-year HWMId for every cell of `target` using `bundle`.
///
/// Cells are processed in parallel. A cell without thresholds, with an
/// undecodable series or with a degenerate p25/p75 pair is skipped and
/// reported; the rest continue.
///
/// # Errors
///
/// - [`PipelineError::GridMismatch`] if `target` is not the grid the
///   thresholds were computed on.
/// - An invalid `config`.
pub fn compute_grid_hwmid<S: GridSource + ?Sized>(
    target: &S,
    bundle: &ThresholdBundle,
    config: &PipelineConfig,
) -> Result<GridHwmid, PipelineError> {
    config.validate()?;
    check_grid(target.cells(), bundle)?;
    let _span = info_span!("hwmid", id = bundle.reference_id()).entered();

    let outcomes: Vec<Result<CellHwmid, SkippedCell>> = target
        .cells()
        .par_iter()
        .map(|cell| cell_hwmid(target, cell, bundle, config))
        .collect();

    let mut cells = Vec::with_capacity(outcomes.len());
    let mut skipped = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(c) => cells.push(c),
            Err(s) => {
                warn!(cell = s.cell.index, stage = %s.stage, reason = %s.reason, "cell skipped");
                skipped.push(s);
            }
        }
    }

    info!(n_cells = cells.len(), n_skipped = skipped.len(), "hwmid computed");
    Ok(GridHwmid {
        reference_id: bundle.reference_id().to_string(),
        cells,
        skipped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use hwmid_climatology::Thresholds;
    use hwmid_io::CellThresholds;

    fn cell(index: usize, lat: f64) -> GridCell {
        GridCell {
            index,
            lat,
            lon: 0.0,
        }
    }

    fn bundle(cells: &[GridCell]) -> ThresholdBundle {
        let entries = cells
            .iter()
            .map(|c| CellThresholds {
                cell: *c,
                thresholds: Thresholds::new(1.0, 2.0, vec![3.0; 365]).unwrap(),
            })
            .collect();
        ThresholdBundle::new("ref", entries, Vec::new())
    }

    #[test]
    fn grid_size_must_match() {
        let target = [cell(0, 0.0), cell(1, 1.0)];
        let b = bundle(&target[..1]);
        assert!(matches!(
            check_grid(&target, &b),
            Err(PipelineError::GridMismatch { .. })
        ));
    }

    #[test]
    fn coordinates_must_match() {
        let target = [cell(0, 0.0), cell(1, 1.0)];
        let b = bundle(&[cell(0, 0.0), cell(1, 1.5)]);
        assert!(check_grid(&target, &b).is_err());
        let b = bundle(&[cell(0, 0.0), cell(1, 1.0 + 1e-9)]);
        assert!(check_grid(&target, &b).is_ok());
    }
}
