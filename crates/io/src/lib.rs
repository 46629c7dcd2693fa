//! # hwmid-io
//!
//! Read daily temperature grids from NetCDF files, persist per-cell
//! thresholds and write results to Parquet. Calendar normalization happens
//! per cell when a [`GridSource`] hands out a series, so a bad time axis
//! fails the cells it touches rather than the read.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     F["<dir>/<id>/*tasmax_*.nc4"] -->|"discover_files()"| P["Vec&lt;SourceFile&gt;"]
//!     P -->|"read_daily_grid()"| G["DailyGrid"]
//!     G -->|"cell_series()"| S["DailySeries"]
//!     B["ThresholdBundle"] -->|"FileCache::store()"| C["<id>.thresholds.bin"]
//!     B -->|"write_thresholds()"| Q["thresholds.parquet"]
//!     H["Vec&lt;CellHwmid&gt;"] -->|"write_hwmid()"| R["hwmid.parquet"]
//!     H -->|"write_events()"| E["events.parquet"]
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `discover` | Input file discovery and file-name year spans |
//! | `layout` | Where a file stores its data variable |
//! | `netcdf_read` | Low-level NetCDF variable and time-axis reading |
//! | `reader` | Multi-file grid reading and its configuration |
//! | `grid` | In-memory daily grid and the `GridSource` trait |
//! | `bundle` | Per-cell threshold and HWMId containers |
//! | `cache` | bincode threshold cache |
//! | `parquet_write` | Arrow schemas and record batches |
//! | `writer` | Parquet output configuration |
//! | `error` | Error types |

mod bundle;
mod cache;
mod discover;
mod error;
mod grid;
mod layout;
mod netcdf_read;
mod parquet_write;
mod reader;
mod writer;

pub use bundle::{CellHwmid, CellThresholds, ThresholdBundle};
pub use cache::{FileCache, ThresholdCache};
pub use discover::{SourceFile, discover_files, parse_year_span};
pub use error::IoError;
pub use grid::{DailyGrid, GridCell, GridSource};
pub use layout::{SourceLayout, detect_layout};
pub use reader::{ReaderConfig, TimeDecoding, read_daily_grid};
pub use writer::{Compression, WriterConfig, write_events, write_hwmid, write_thresholds};
