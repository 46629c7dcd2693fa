//! # hwmid-calendar
//!
//! Date arithmetic for the 365-day no-leap calendar, CF time-axis decoding
//! and normalization of daily series onto 365 day-of-year slots.
//!
//! ## Architecture
//!
//! ```mermaid
//! graph LR
//!     U["units + calendar attrs"] -->|"TimeUnits::parse()"| A["TimeAxis"]
//!     A -->|".normalize(values)"| S["DailySeries"]
//!     S -->|".iter()"| C["(NoLeapDate, f64)"]
//!     C -->|".doy()"| D["Doy (1..=365)"]
//!     D -->|"DoyWindow::new()"| W["wrap-around window"]
//! ```
//!
//! ## Quick Start
//!
//! ```ignore
//! use hwmid_calendar::{CalendarKind, Doy, DoyWindow, TimeAxis, TimeUnits};
//!
//! let units = TimeUnits::parse("days since 1850-01-01")?;
//! let axis = TimeAxis::from_offsets(&offsets, &units, CalendarKind::parse("standard"));
//! let series = axis.normalize(&values)?; // Feb 29 dropped
//!
//! let window = DoyWindow::new(Doy::FIRST, 15)?; // 351..=365 and 1..=16
//! assert_eq!(window.len(), 31);
//! ```
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `doy` | Day-of-year newtype and conversion tables |
//! | `date` | No-leap date with year context |
//! | `kind` | CF calendar kinds and per-calendar day arithmetic |
//! | `axis` | Time-unit parsing and time-axis decoding |
//! | `series` | Contiguous daily series |
//! | `sequence` | Date sequence generation |
//! | `window` | Wrap-around day-of-year windows |
//! | `error` | Error types |

mod axis;
mod date;
mod doy;
mod error;
mod kind;
mod sequence;
mod series;
mod window;

pub use axis::{TimeAxis, TimeUnit, TimeUnits};
pub use date::NoLeapDate;
pub use doy::{DAYS_PER_YEAR, Doy};
pub use error::CalendarError;
pub use kind::{CalendarDate, CalendarKind};
pub use sequence::noleap_sequence;
pub use series::DailySeries;
pub use window::DoyWindow;
