//! In-memory daily grid and the source abstraction the pipeline reads from.

use hwmid_calendar::{DailySeries, TimeAxis};
use hwmid_climatology::AnnualMaxima;
use serde::{Deserialize, Serialize};

use crate::error::IoError;

/// One grid cell: a stable row-major index over the lat x lon axes plus
/// its coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridCell {
    pub index: usize,
    pub lat: f64,
    pub lon: f64,
}

/// A labeled source of per-cell daily series.
///
/// `cell_series` is where calendar normalization happens, so decoding and
/// alignment problems surface per cell rather than per grid.
pub trait GridSource: Sync {
    /// Every cell, ordered by index.
    fn cells(&self) -> &[GridCell];

    /// Normalized daily series of one cell.
    fn cell_series(&self, cell: usize) -> Result<DailySeries, IoError>;

    /// Precomputed annual maxima for a cell, when the source carries them.
    fn annual_maxima(&self, _cell: usize) -> Option<AnnualMaxima> {
        None
    }
}

/// Daily values on a regular lat x lon grid, stored time-major:
/// `data[t * n_cells + cell]`.
#[derive(Debug, Clone)]
pub struct DailyGrid {
    lats: Vec<f64>,
    lons: Vec<f64>,
    cells: Vec<GridCell>,
    time: TimeAxis,
    data: Vec<f64>,
}

impl DailyGrid {
    /// # Errors
    ///
    /// [`IoError::DimensionMismatch`] if `data` is not
    /// `time.len() * lats.len() * lons.len()` long.
    pub fn new(
        lats: Vec<f64>,
        lons: Vec<f64>,
        time: TimeAxis,
        data: Vec<f64>,
    ) -> Result<Self, IoError> {
        let expected = time.len() * lats.len() * lons.len();
        if data.len() != expected {
            return Err(IoError::DimensionMismatch {
                name: "data".into(),
                expected,
                got: data.len(),
            });
        }
        let cells = lats
            .iter()
            .flat_map(|&lat| lons.iter().map(move |&lon| (lat, lon)))
            .enumerate()
            .map(|(index, (lat, lon))| GridCell { index, lat, lon })
            .collect();
        Ok(Self {
            lats,
            lons,
            cells,
            time,
            data,
        })
    }

    pub fn lats(&self) -> &[f64] {
        &self.lats
    }

    pub fn lons(&self) -> &[f64] {
        &self.lons
    }

    pub fn time(&self) -> &TimeAxis {
        &self.time
    }

    pub fn n_cells(&self) -> usize {
        self.cells.len()
    }

    /// Raw (not normalized) values of one cell in time order.
    pub fn raw_values(&self, cell: usize) -> Vec<f64> {
        let n_cells = self.cells.len();
        (0..self.time.len())
            .map(|t| self.data[t * n_cells + cell])
            .collect()
    }
}

impl GridSource for DailyGrid {
    fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    fn cell_series(&self, cell: usize) -> Result<DailySeries, IoError> {
        if cell >= self.cells.len() {
            return Err(IoError::Validation {
                count: 1,
                details: format!("cell {cell} out of range (grid has {})", self.cells.len()),
            });
        }
        Ok(self.time.normalize(&self.raw_values(cell))?)
    }
}
