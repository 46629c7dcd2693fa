//! Per-grid result containers shared by the cache and the writers.

use std::collections::BTreeMap;

use hwmid_climatology::Thresholds;
use hwmid_events::{EventSummary, YearMagnitude};
use serde::{Deserialize, Serialize};

use crate::grid::GridCell;

/// Thresholds of one grid cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellThresholds {
    pub cell: GridCell,
    pub thresholds: Thresholds,
}

/// Every cell's thresholds for one reference identifier, plus the cells
/// that produced none.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdBundle {
    reference_id: String,
    cells: Vec<CellThresholds>,
    skipped: Vec<(GridCell, String)>,
}

impl ThresholdBundle {
    /// Cells are kept sorted by index.
    pub fn new(
        reference_id: impl Into<String>,
        mut cells: Vec<CellThresholds>,
        skipped: Vec<(GridCell, String)>,
    ) -> Self {
        cells.sort_by_key(|c| c.cell.index);
        Self {
            reference_id: reference_id.into(),
            cells,
            skipped,
        }
    }

    pub fn reference_id(&self) -> &str {
        &self.reference_id
    }

    pub fn cells(&self) -> &[CellThresholds] {
        &self.cells
    }

    /// Cells for which no thresholds could be estimated, with the reason.
    pub fn skipped(&self) -> &[(GridCell, String)] {
        &self.skipped
    }

    /// Thresholds of the cell with `index`, if it has any.
    pub fn get(&self, index: usize) -> Option<&Thresholds> {
        self.cells
            .binary_search_by_key(&index, |c| c.cell.index)
            .ok()
            .map(|i| &self.cells[i].thresholds)
    }
}

/// Per-year HWMId of one grid cell and the events behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct CellHwmid {
    pub cell: GridCell,
    pub years: BTreeMap<i32, YearMagnitude>,
    /// Every detected event in date order.
    pub events: Vec<EventSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(index: usize) -> GridCell {
        GridCell {
            index,
            lat: 0.0,
            lon: index as f64,
        }
    }

    fn thresholds(p25: f64) -> Thresholds {
        Thresholds::new(p25, p25 + 1.0, vec![p25 + 2.0; 365]).unwrap()
    }

    #[test]
    fn get_finds_by_index_in_any_input_order() {
        let bundle = ThresholdBundle::new(
            "MIROC5",
            vec![
                CellThresholds {
                    cell: cell(7),
                    thresholds: thresholds(7.0),
                },
                CellThresholds {
                    cell: cell(2),
                    thresholds: thresholds(2.0),
                },
            ],
            vec![(cell(4), "no complete years".into())],
        );
        assert_eq!(bundle.reference_id(), "MIROC5");
        assert_eq!(bundle.get(2).map(Thresholds::p25), Some(2.0));
        assert_eq!(bundle.get(7).map(Thresholds::p25), Some(7.0));
        assert!(bundle.get(4).is_none());
        assert_eq!(bundle.skipped().len(), 1);
    }
}
