//! # hwmid-climatology
//!
//! Reference-period thresholds for heat-wave detection and normalization.
//!
//! ```mermaid
//! graph LR
//!     S["reference DailySeries"] -->|"annual_maxima()"| M["AnnualMaxima"]
//!     M -->|"annual_quantiles()"| Q["(p25, p75)"]
//!     S -->|"dayofyear_quantile_array()"| P["p90 per day of year"]
//!     Q --> T["Thresholds"]
//!     P --> T
//! ```
//!
//! All quantiles are inverted-CDF order statistics (see `hwmid-stats`).
//!
//! ## Quick Start
//!
//! ```ignore
//! use hwmid_climatology::{ClimatologyConfig, estimate_thresholds};
//!
//! let config = ClimatologyConfig::new().with_reference_years(Some(1981), Some(2010));
//! let result = estimate_thresholds(&series, None, &config)?;
//! let t = result.thresholds();
//! println!("p25={} p75={} p90[1]={}", t.p25(), t.p75(), t.p90()[0]);
//! ```

mod config;
mod doy_quantile;
mod error;
mod estimate;
mod maxima;
mod thresholds;

pub use config::ClimatologyConfig;
pub use doy_quantile::dayofyear_quantile_array;
pub use error::ClimatologyError;
pub use estimate::{ClimatologyResult, estimate_thresholds};
pub use maxima::{AnnualMaxima, annual_maxima, annual_quantiles};
pub use thresholds::Thresholds;
