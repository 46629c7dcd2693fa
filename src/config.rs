use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Top-level HWMId configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HwmidConfig {
    /// Worker threads; 0 or absent means one per core.
    #[serde(default)]
    pub threads: Option<usize>,

    /// How input files are read.
    #[serde(default)]
    pub input: InputToml,

    /// Reference (control) datasets thresholds are computed from.
    pub references: ReferencesToml,

    /// Datasets HWMId is computed for.
    #[serde(default)]
    pub targets: Vec<TargetToml>,

    #[serde(default)]
    pub climatology: ClimatologyToml,

    #[serde(default)]
    pub events: EventsToml,

    #[serde(default)]
    pub cache: CacheToml,

    #[serde(default)]
    pub output: OutputToml,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputToml {
    #[serde(default = "default_variable")]
    pub variable: String,
    #[serde(default = "default_time_var")]
    pub time_var: String,
    /// `units` (CF offsets) or `filename` (daily axis from the file name).
    #[serde(default = "default_time_decoding")]
    pub time_decoding: String,
}

impl Default for InputToml {
    fn default() -> Self {
        Self {
            variable: default_variable(),
            time_var: default_time_var(),
            time_decoding: default_time_decoding(),
        }
    }
}

fn default_variable() -> String {
    "tasmax".to_string()
}
fn default_time_var() -> String {
    "time".to_string()
}
fn default_time_decoding() -> String {
    "units".to_string()
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferencesToml {
    /// Directory holding one sub-directory per identifier.
    pub dir: PathBuf,
    /// Reference identifiers, e.g. climate model names.
    pub ids: Vec<String>,
    /// Files whose year span starts after this year are ignored.
    #[serde(default)]
    pub max_start_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetToml {
    pub id: String,
    /// Directory holding a sub-directory named after `id`.
    pub dir: PathBuf,
    /// References to evaluate against; all configured ones when absent.
    #[serde(default)]
    pub references: Option<Vec<String>>,
    #[serde(default)]
    pub max_start_year: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimatologyToml {
    #[serde(default = "default_window_radius")]
    pub window_radius: u16,
    #[serde(default = "default_daily_quantile")]
    pub daily_quantile: f64,
    #[serde(default = "default_low_quantile")]
    pub low_quantile: f64,
    #[serde(default = "default_high_quantile")]
    pub high_quantile: f64,
    #[serde(default)]
    pub first_year: Option<i32>,
    #[serde(default)]
    pub last_year: Option<i32>,
}

impl Default for ClimatologyToml {
    fn default() -> Self {
        Self {
            window_radius: default_window_radius(),
            daily_quantile: default_daily_quantile(),
            low_quantile: default_low_quantile(),
            high_quantile: default_high_quantile(),
            first_year: None,
            last_year: None,
        }
    }
}

fn default_window_radius() -> u16 {
    15
}
fn default_daily_quantile() -> f64 {
    0.90
}
fn default_low_quantile() -> f64 {
    0.25
}
fn default_high_quantile() -> f64 {
    0.75
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventsToml {
    #[serde(default = "default_min_run_length")]
    pub min_run_length: usize,
}

impl Default for EventsToml {
    fn default() -> Self {
        Self {
            min_run_length: default_min_run_length(),
        }
    }
}

fn default_min_run_length() -> usize {
    3
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheToml {
    #[serde(default = "default_cache_dir")]
    pub dir: PathBuf,
}

impl Default for CacheToml {
    fn default() -> Self {
        Self {
            dir: default_cache_dir(),
        }
    }
}

fn default_cache_dir() -> PathBuf {
    PathBuf::from("thresholds")
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_compression")]
    pub compression: String,
    #[serde(default = "default_row_group_size")]
    pub row_group_size: usize,
}

impl Default for OutputToml {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
            compression: default_compression(),
            row_group_size: default_row_group_size(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}
fn default_compression() -> String {
    "snappy".to_string()
}
fn default_row_group_size() -> usize {
    1_000_000
}

/// Read and parse a TOML configuration file.
pub fn load(path: &Path) -> Result<HwmidConfig> {
    let toml_str = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;
    toml::from_str(&toml_str)
        .with_context(|| format!("failed to parse TOML config: {}", path.display()))
}
