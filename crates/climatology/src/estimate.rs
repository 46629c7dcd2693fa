//! Threshold estimation for one cell.

use hwmid_calendar::DailySeries;
use tracing::debug;

use crate::config::ClimatologyConfig;
use crate::doy_quantile::dayofyear_quantile_array;
use crate::error::ClimatologyError;
use crate::maxima::{AnnualMaxima, annual_maxima, annual_quantiles};
use crate::thresholds::Thresholds;

/// Output of [`estimate_thresholds`].
#[derive(Debug, Clone)]
pub struct ClimatologyResult {
    thresholds: Thresholds,
    maxima: AnnualMaxima,
}

impl ClimatologyResult {
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    pub fn into_thresholds(self) -> Thresholds {
        self.thresholds
    }

    /// Annual maxima the low/high quantiles were taken from.
    pub fn maxima(&self) -> &AnnualMaxima {
        &self.maxima
    }

    /// Years left out of the annual maxima, with the reason.
    pub fn excluded_years(&self) -> &[ClimatologyError] {
        self.maxima.excluded()
    }
}

/// Estimates all thresholds of one cell from its normalized reference series.
///
/// The series is first restricted to the configured reference years. When
/// `companion` is given its annual maxima are used (restricted to the same
/// years) instead of being derived from the series.
///
/// # Errors
///
/// - [`ClimatologyError::InvalidConfig`] for an invalid `config`.
/// - [`ClimatologyError::NoCompleteYears`] if no annual maximum remains.
/// - [`ClimatologyError::EmptyWindow`] if some day-of-year window has no data.
pub fn estimate_thresholds(
    series: &DailySeries,
    companion: Option<&AnnualMaxima>,
    config: &ClimatologyConfig,
) -> Result<ClimatologyResult, ClimatologyError> {
    config.validate()?;

    let reference = series.restrict_years(config.first_year(), config.last_year());
    if reference.is_empty() {
        return Err(ClimatologyError::NoCompleteYears);
    }

    let maxima = match companion {
        Some(precomputed) => {
            let mut m = precomputed.clone();
            m.retain_years(|y| config.includes_year(y));
            m
        }
        None => annual_maxima(&reference),
    };
    let (p25, p75) = annual_quantiles(&maxima, config)?;
    let p90 = dayofyear_quantile_array(&reference, config.window_radius(), config.daily_quantile())?;

    debug!(
        years = maxima.len(),
        excluded = maxima.excluded().len(),
        p25,
        p75,
        "thresholds estimated"
    );

    Ok(ClimatologyResult {
        thresholds: Thresholds::new(p25, p75, p90.to_vec())?,
        maxima,
    })
}
