//! High-level NetCDF reader configuration and orchestration.

use std::path::{Path, PathBuf};

use hwmid_calendar::{CalendarDate, CalendarKind, TimeAxis};
use tracing::{debug, info};

use crate::discover::parse_year_span;
use crate::error::IoError;
use crate::grid::DailyGrid;
use crate::layout::detect_layout;
use crate::netcdf_read;

/// How timestamps are obtained for each file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeDecoding {
    /// Decode the CF `units`/`calendar` attributes of the time variable.
    #[default]
    Units,
    /// Ignore stored offsets and build a daily `standard`-calendar axis
    /// starting on January 1 of the first year in the file name.
    Filename,
}

/// Configuration for reading daily grids from NetCDF files.
///
/// Use the builder methods (`with_*`) to customise the variable name,
/// coordinate aliases and time decoding. The [`Default`] implementation
/// supplies CF-convention names for daily maximum temperature.
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Variable holding the daily values.
    variable: String,
    /// Aliases to try when looking up longitude coordinates.
    lon_aliases: Vec<String>,
    /// Aliases to try when looking up latitude coordinates.
    lat_aliases: Vec<String>,
    /// NetCDF variable name for the time axis.
    time_var: String,
    time_decoding: TimeDecoding,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            variable: "tasmax".into(),
            lon_aliases: vec!["lon".into(), "longitude".into(), "x".into()],
            lat_aliases: vec!["lat".into(), "latitude".into(), "y".into()],
            time_var: "time".into(),
            time_decoding: TimeDecoding::Units,
        }
    }
}

impl ReaderConfig {
    /// Set the data variable name.
    pub fn with_variable(mut self, name: impl Into<String>) -> Self {
        self.variable = name.into();
        self
    }

    /// Set the time variable name.
    pub fn with_time_var(mut self, name: impl Into<String>) -> Self {
        self.time_var = name.into();
        self
    }

    /// Set how timestamps are decoded.
    pub fn with_time_decoding(mut self, mode: TimeDecoding) -> Self {
        self.time_decoding = mode;
        self
    }

    pub fn variable(&self) -> &str {
        &self.variable
    }

    pub fn time_decoding(&self) -> TimeDecoding {
        self.time_decoding
    }

    /// Validate that the configuration is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns [`IoError::Validation`] if the variable or time name is empty.
    pub fn validate(&self) -> Result<(), IoError> {
        let mut problems = Vec::new();
        if self.variable.trim().is_empty() {
            problems.push("variable must not be empty".to_string());
        }
        if self.time_var.trim().is_empty() {
            problems.push("time_var must not be empty".to_string());
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
}

/// One file's contribution before concatenation.
struct FilePart {
    lats: Vec<f64>,
    lons: Vec<f64>,
    time: TimeAxis,
    data: Vec<f64>,
}

fn read_file(path: &Path, config: &ReaderConfig) -> Result<FilePart, IoError> {
    let file = netcdf_read::open_file(path)?;
    let layout = detect_layout(&file, &config.variable, path)?;
    debug!(path = %path.display(), ?layout, "reading file");

    let lon_alias_refs: Vec<&str> = config.lon_aliases.iter().map(String::as_str).collect();
    let lat_alias_refs: Vec<&str> = config.lat_aliases.iter().map(String::as_str).collect();
    let lons = netcdf_read::read_1d_f64(&file, &lon_alias_refs, path)?;
    let lats = netcdf_read::read_1d_f64(&file, &lat_alias_refs, path)?;

    let (data, [nt, ny, nx]) = netcdf_read::read_3d_f64(&file, layout.variable(), path)?;
    if ny != lats.len() || nx != lons.len() {
        return Err(IoError::DimensionMismatch {
            name: format!("{} spatial shape", layout.variable()),
            expected: lats.len() * lons.len(),
            got: ny * nx,
        });
    }

    let time = match config.time_decoding {
        TimeDecoding::Units => netcdf_read::read_time_axis(&file, &config.time_var, path)?,
        TimeDecoding::Filename => {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let (start_year, _) = parse_year_span(&name).ok_or_else(|| IoError::InvalidTime {
                reason: format!("no year span in file name '{name}'"),
            })?;
            TimeAxis::daily(CalendarDate::new(start_year, 1, 1), nt, CalendarKind::Gregorian)
        }
    };
    if time.len() != nt {
        return Err(IoError::DimensionMismatch {
            name: config.time_var.clone(),
            expected: nt,
            got: time.len(),
        });
    }

    Ok(FilePart {
        lats,
        lons,
        time,
        data,
    })
}

/// Read and concatenate daily NetCDF files along time.
///
/// Every file must share the same lat/lon axes. Files are taken in the
/// order given.
///
/// # Errors
///
/// Returns [`IoError`] on an empty file list, missing variables,
/// mismatched grids or unreadable files. Time-axis decoding problems are
/// not errors here; they surface when a cell's series is requested.
pub fn read_daily_grid(paths: &[PathBuf], config: &ReaderConfig) -> Result<DailyGrid, IoError> {
    config.validate()?;
    let Some((first_path, rest)) = paths.split_first() else {
        return Err(IoError::Validation {
            count: 1,
            details: "no input files given".to_string(),
        });
    };

    let first = read_file(first_path, config)?;
    let mut data = first.data;
    let mut axes = vec![first.time];
    for path in rest {
        let part = read_file(path, config)?;
        if part.lats != first.lats || part.lons != first.lons {
            return Err(IoError::DimensionMismatch {
                name: format!("grid of {}", path.display()),
                expected: first.lats.len() * first.lons.len(),
                got: part.lats.len() * part.lons.len(),
            });
        }
        data.extend(part.data);
        axes.push(part.time);
    }

    let time = TimeAxis::concat(axes);
    info!(
        n_files = paths.len(),
        n_times = time.len(),
        n_lat = first.lats.len(),
        n_lon = first.lons.len(),
        calendar = time.calendar().name(),
        "read daily grid"
    );
    DailyGrid::new(first.lats, first.lons, time, data)
}
