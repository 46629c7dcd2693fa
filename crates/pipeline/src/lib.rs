//! # hwmid-pipeline
//!
//! Runs the per-cell HWMId steps over a whole grid. Cells are independent
//! and processed in parallel with rayon; a failure on one cell is recorded
//! as a [`SkippedCell`] and never stops the others.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph TD
//!     R["reference GridSource"] -->|"compute_grid_thresholds()"| B["ThresholdBundle"]
//!     C["ThresholdCache"] -->|"resolve_thresholds()"| B
//!     B --> H["compute_grid_hwmid()"]
//!     T["target GridSource"] --> H
//!     H --> G["GridHwmid"]
//!     G --> P["RunReport (JSON)"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hwmid_io::FileCache;
//! use hwmid_pipeline::{PipelineConfig, compute_grid_hwmid, resolve_thresholds};
//!
//! let config = PipelineConfig::new();
//! let cache = FileCache::new("data/thresholds");
//! let (bundle, _) = resolve_thresholds("MIROC5", &cache, &config, || load_reference())?;
//! let result = compute_grid_hwmid(&target_grid, &bundle, &config)?;
//! ```

mod config;
mod error;
mod hwmid;
mod report;
mod skip;
mod thresholds;

pub use config::PipelineConfig;
pub use error::PipelineError;
pub use hwmid::{GridHwmid, compute_grid_hwmid};
pub use report::RunReport;
pub use skip::{SkippedCell, Stage};
pub use thresholds::{ThresholdOrigin, compute_grid_thresholds, resolve_thresholds};
