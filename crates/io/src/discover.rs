//! Input file discovery by identifier, variable and year span.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::IoError;

/// A discovered input file and the years its name says it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub start_year: i32,
    pub end_year: i32,
}

const EXTENSIONS: [&str; 2] = [".nc4", ".nc"];

fn strip_extension(name: &str) -> Option<&str> {
    EXTENSIONS.iter().find_map(|ext| name.strip_suffix(ext))
}

fn parse_year(s: &str) -> Option<i32> {
    (s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()))
        .then(|| s.parse().ok())
        .flatten()
}

/// Parses the trailing year span of a file name.
///
/// Accepts `..._YYYY_YYYY.nc4` and `..._YYYYMMDD-YYYYMMDD.nc4` (either
/// extension `.nc4` or `.nc`).
pub fn parse_year_span(file_name: &str) -> Option<(i32, i32)> {
    let stem = strip_extension(file_name)?;
    let mut parts = stem.rsplit('_');
    let last = parts.next()?;
    if let Some((from, to)) = last.split_once('-') {
        if from.len() == 8 && to.len() == 8 && from.is_ascii() && to.is_ascii() {
            return Some((parse_year(&from[..4])?, parse_year(&to[..4])?));
        }
        return None;
    }
    let end = parse_year(last)?;
    let start = parse_year(parts.next()?)?;
    Some((start, end))
}

/// Lists `<dir>/<id>/*<variable>_*.nc4` (or `.nc`) files sorted by name.
///
/// Files whose span starts after `max_start_year` are dropped. Files whose
/// names carry no parsable span are skipped with a warning.
///
/// # Errors
///
/// - [`IoError::Fs`] if the directory cannot be read.
/// - [`IoError::NoInputFiles`] if nothing matches.
pub fn discover_files(
    dir: &Path,
    id: &str,
    variable: &str,
    max_start_year: Option<i32>,
) -> Result<Vec<SourceFile>, IoError> {
    let search_dir = dir.join(id);
    let marker = format!("{variable}_");
    let entries = std::fs::read_dir(&search_dir).map_err(|e| IoError::fs(&search_dir, e))?;

    let mut names: Vec<String> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| IoError::fs(&search_dir, e))?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.contains(&marker) && strip_extension(&name).is_some() {
            names.push(name);
        }
    }
    names.sort();

    let mut files = Vec::with_capacity(names.len());
    for name in names {
        let Some((start_year, end_year)) = parse_year_span(&name) else {
            warn!(file = %name, "skipping file without a year span in its name");
            continue;
        };
        if max_start_year.is_some_and(|max| start_year > max) {
            debug!(file = %name, start_year, "skipping file after year cutoff");
            continue;
        }
        files.push(SourceFile {
            path: search_dir.join(&name),
            start_year,
            end_year,
        });
    }

    if files.is_empty() {
        return Err(IoError::NoInputFiles {
            dir: search_dir,
            pattern: format!("*{marker}*.nc4|*.nc"),
        });
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_pair_span() {
        assert_eq!(
            parse_year_span("miroc5_r1i1p1_ewembi_picontrol_tasmax_global_daily_2091_2099.nc4"),
            Some((2091, 2099))
        );
        assert_eq!(parse_year_span("x_tasmax_1861_1870.nc"), Some((1861, 1870)));
    }

    #[test]
    fn date_range_span() {
        assert_eq!(
            parse_year_span("gswp3-w5e5_obsclim_tasmax_global_daily_19010101-19101231.nc4"),
            Some((1901, 1910))
        );
    }

    #[test]
    fn unparsable_names() {
        assert_eq!(parse_year_span("tasmax_global.nc4"), None);
        assert_eq!(parse_year_span("tasmax_1861_1870.txt"), None);
        assert_eq!(parse_year_span("tasmax_18610101-1870.nc4"), None);
        assert_eq!(parse_year_span("tasmax_abcd_1870.nc"), None);
    }
}
