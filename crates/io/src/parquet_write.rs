//! Low-level Parquet column building.

use std::path::Path;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Float64Array, Int32Array, RecordBatch, StringArray, UInt16Array, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use parquet::arrow::ArrowWriter;
use parquet::file::properties::WriterProperties;

use crate::bundle::{CellHwmid, CellThresholds};
use crate::error::IoError;

/// Schema of the thresholds long table: one row per cell and day of year.
pub(crate) fn thresholds_schema() -> Schema {
    Schema::new(vec![
        Field::new("cell", DataType::UInt32, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("day_of_year", DataType::UInt16, false),
        Field::new("p90", DataType::Float64, false),
        Field::new("p25", DataType::Float64, false),
        Field::new("p75", DataType::Float64, false),
    ])
}

/// Schema of the HWMId table: one row per cell and year.
///
/// `hwmid` is null for years without an event.
pub(crate) fn hwmid_schema() -> Schema {
    Schema::new(vec![
        Field::new("cell", DataType::UInt32, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("year", DataType::Int32, false),
        Field::new("hwmid", DataType::Float64, true),
        Field::new("n_events", DataType::UInt32, false),
        Field::new("status", DataType::Utf8, false),
    ])
}

/// Schema of the events table: one row per detected hot period.
pub(crate) fn events_schema() -> Schema {
    Schema::new(vec![
        Field::new("cell", DataType::UInt32, false),
        Field::new("lat", DataType::Float64, false),
        Field::new("lon", DataType::Float64, false),
        Field::new("year", DataType::Int32, false),
        Field::new("start", DataType::Utf8, false),
        Field::new("end", DataType::Utf8, false),
        Field::new("length", DataType::UInt32, false),
        Field::new("magnitude", DataType::Float64, false),
    ])
}

fn cell_index(index: usize) -> Result<u32, IoError> {
    u32::try_from(index).map_err(|_| IoError::Parquet {
        reason: format!("cell index {index} does not fit in u32"),
    })
}

/// Converts a chunk of cells' thresholds into one [`RecordBatch`].
pub(crate) fn thresholds_to_record_batch(
    cells: &[CellThresholds],
    schema: &Arc<Schema>,
) -> Result<RecordBatch, IoError> {
    let n = cells.len() * 365;
    let mut cell_col = Vec::with_capacity(n);
    let mut lat_col = Vec::with_capacity(n);
    let mut lon_col = Vec::with_capacity(n);
    let mut doy_col = Vec::with_capacity(n);
    let mut p90_col = Vec::with_capacity(n);
    let mut p25_col = Vec::with_capacity(n);
    let mut p75_col = Vec::with_capacity(n);

    for entry in cells {
        let index = cell_index(entry.cell.index)?;
        let t = &entry.thresholds;
        for (doy, &p90) in (1u16..).zip(t.p90()) {
            cell_col.push(index);
            lat_col.push(entry.cell.lat);
            lon_col.push(entry.cell.lon);
            doy_col.push(doy);
            p90_col.push(p90);
            p25_col.push(t.p25());
            p75_col.push(t.p75());
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(cell_col)),
        Arc::new(Float64Array::from(lat_col)),
        Arc::new(Float64Array::from(lon_col)),
        Arc::new(UInt16Array::from(doy_col)),
        Arc::new(Float64Array::from(p90_col)),
        Arc::new(Float64Array::from(p25_col)),
        Arc::new(Float64Array::from(p75_col)),
    ];
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Converts a chunk of cells' yearly HWMId into one [`RecordBatch`].
pub(crate) fn hwmid_to_record_batch(
    cells: &[CellHwmid],
    schema: &Arc<Schema>,
) -> Result<RecordBatch, IoError> {
    let n: usize = cells.iter().map(|c| c.years.len()).sum();
    let mut cell_col = Vec::with_capacity(n);
    let mut lat_col = Vec::with_capacity(n);
    let mut lon_col = Vec::with_capacity(n);
    let mut year_col = Vec::with_capacity(n);
    let mut hwmid_col: Vec<Option<f64>> = Vec::with_capacity(n);
    let mut n_events_col = Vec::with_capacity(n);
    let mut status_col = Vec::with_capacity(n);

    for entry in cells {
        let index = cell_index(entry.cell.index)?;
        for (&year, value) in &entry.years {
            cell_col.push(index);
            lat_col.push(entry.cell.lat);
            lon_col.push(entry.cell.lon);
            year_col.push(year);
            hwmid_col.push(value.magnitude());
            n_events_col.push(value.n_events());
            status_col.push(if value.is_event() { "event" } else { "no_event" });
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(cell_col)),
        Arc::new(Float64Array::from(lat_col)),
        Arc::new(Float64Array::from(lon_col)),
        Arc::new(Int32Array::from(year_col)),
        Arc::new(Float64Array::from(hwmid_col)),
        Arc::new(UInt32Array::from(n_events_col)),
        Arc::new(StringArray::from(status_col)),
    ];
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Converts a chunk of cells' events into one [`RecordBatch`].
pub(crate) fn events_to_record_batch(
    cells: &[CellHwmid],
    schema: &Arc<Schema>,
) -> Result<RecordBatch, IoError> {
    let n: usize = cells.iter().map(|c| c.events.len()).sum();
    let mut cell_col = Vec::with_capacity(n);
    let mut lat_col = Vec::with_capacity(n);
    let mut lon_col = Vec::with_capacity(n);
    let mut year_col = Vec::with_capacity(n);
    let mut start_col = Vec::with_capacity(n);
    let mut end_col = Vec::with_capacity(n);
    let mut length_col = Vec::with_capacity(n);
    let mut magnitude_col = Vec::with_capacity(n);

    for entry in cells {
        let index = cell_index(entry.cell.index)?;
        for event in &entry.events {
            let length = u32::try_from(event.length).map_err(|_| IoError::Parquet {
                reason: format!("event length {} does not fit in u32", event.length),
            })?;
            cell_col.push(index);
            lat_col.push(entry.cell.lat);
            lon_col.push(entry.cell.lon);
            year_col.push(event.year);
            start_col.push(event.start.to_string());
            end_col.push(event.end.to_string());
            length_col.push(length);
            magnitude_col.push(event.magnitude);
        }
    }

    let columns: Vec<ArrayRef> = vec![
        Arc::new(UInt32Array::from(cell_col)),
        Arc::new(Float64Array::from(lat_col)),
        Arc::new(Float64Array::from(lon_col)),
        Arc::new(Int32Array::from(year_col)),
        Arc::new(StringArray::from(start_col)),
        Arc::new(StringArray::from(end_col)),
        Arc::new(UInt32Array::from(length_col)),
        Arc::new(Float64Array::from(magnitude_col)),
    ];
    Ok(RecordBatch::try_new(Arc::clone(schema), columns)?)
}

/// Writes a sequence of [`RecordBatch`]es to a Parquet file at `path`.
///
/// # Errors
///
/// Returns [`IoError::Fs`] if the file cannot be created, or
/// [`IoError::Parquet`] if batch writing or file finalisation fails.
pub(crate) fn write_batches(
    path: &Path,
    batches: &[RecordBatch],
    schema: Arc<Schema>,
    props: WriterProperties,
) -> Result<(), IoError> {
    let file = std::fs::File::create(path).map_err(|e| IoError::fs(path, e))?;
    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;

    for batch in batches {
        writer.write(batch)?;
    }

    writer.close()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    use arrow::array::{Array, AsArray};
    use arrow::datatypes::{Float64Type, UInt16Type};
    use hwmid_calendar::NoLeapDate;
    use hwmid_climatology::Thresholds;
    use hwmid_events::{EventSummary, YearMagnitude};

    use crate::grid::GridCell;

    const CELL: GridCell = GridCell {
        index: 3,
        lat: 45.5,
        lon: 7.25,
    };

    #[test]
    fn thresholds_schema_columns() {
        let schema = thresholds_schema();
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(
            names,
            ["cell", "lat", "lon", "day_of_year", "p90", "p25", "p75"]
        );
    }

    #[test]
    fn thresholds_batch_has_365_rows_per_cell() {
        let p90: Vec<f64> = (0..365).map(f64::from).collect();
        let cells = [CellThresholds {
            cell: CELL,
            thresholds: Thresholds::new(20.0, 30.0, p90).unwrap(),
        }];
        let schema = Arc::new(thresholds_schema());
        let batch = thresholds_to_record_batch(&cells, &schema).unwrap();

        assert_eq!(batch.num_rows(), 365);
        let doy = batch.column(3).as_primitive::<UInt16Type>();
        assert_eq!(doy.value(0), 1);
        assert_eq!(doy.value(364), 365);
        let p90 = batch.column(4).as_primitive::<Float64Type>();
        assert_eq!(p90.value(364), 364.0);
    }

    #[test]
    fn no_event_years_are_null() {
        let mut years = BTreeMap::new();
        years.insert(
            2001,
            YearMagnitude::Event {
                magnitude: 4.2,
                n_events: 2,
            },
        );
        years.insert(2002, YearMagnitude::NoEvent);
        let cells = [CellHwmid {
            cell: CELL,
            years,
            events: Vec::new(),
        }];
        let schema = Arc::new(hwmid_schema());
        let batch = hwmid_to_record_batch(&cells, &schema).unwrap();

        assert_eq!(batch.num_rows(), 2);
        let hwmid = batch.column(4).as_primitive::<Float64Type>();
        assert!(hwmid.is_valid(0));
        assert!(hwmid.is_null(1));
        let status = batch.column(6).as_string::<i32>();
        assert_eq!(status.value(0), "event");
        assert_eq!(status.value(1), "no_event");
    }

    #[test]
    fn events_batch_one_row_per_event() {
        let event = |m: u8, d: u8, magnitude: f64| EventSummary {
            start: NoLeapDate::new(2003, m, d).unwrap(),
            end: NoLeapDate::new(2003, m, d + 3).unwrap(),
            length: 4,
            magnitude,
            year: 2003,
        };
        let cells = [CellHwmid {
            cell: CELL,
            years: BTreeMap::new(),
            events: vec![event(6, 10, 3.5), event(8, 1, 9.25)],
        }];
        let schema = Arc::new(events_schema());
        let batch = events_to_record_batch(&cells, &schema).unwrap();

        assert_eq!(batch.num_rows(), 2);
        let start = batch.column(4).as_string::<i32>();
        assert_eq!(start.value(0), "2003-06-10");
        let end = batch.column(5).as_string::<i32>();
        assert_eq!(end.value(1), "2003-08-04");
        let magnitude = batch.column(7).as_primitive::<Float64Type>();
        assert_eq!(magnitude.value(1), 9.25);
    }
}
