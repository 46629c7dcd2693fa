//! Annual maximum series and their quantiles.

use hwmid_calendar::{DAYS_PER_YEAR, DailySeries};
use hwmid_stats::{empirical_quantile, max_finite};
use tracing::warn;

use crate::config::ClimatologyConfig;
use crate::error::ClimatologyError;

/// One maximum per complete reference year, plus the years that were left out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnualMaxima {
    values: Vec<(i32, f64)>,
    excluded: Vec<ClimatologyError>,
}

impl AnnualMaxima {
    /// Wraps an externally supplied annual-maximum series.
    ///
    /// Entries without a finite value are moved to the exclusions as
    /// [`ClimatologyError::AllMissingYear`].
    pub fn from_precomputed(values: Vec<(i32, f64)>) -> Self {
        let (values, missing): (Vec<_>, Vec<_>) =
            values.into_iter().partition(|(_, v)| v.is_finite());
        let excluded = missing
            .into_iter()
            .map(|(year, _)| ClimatologyError::AllMissingYear { year })
            .collect();
        Self { values, excluded }
    }

    /// `(year, maximum)` pairs in year order.
    pub fn values(&self) -> &[(i32, f64)] {
        &self.values
    }

    /// Recoverable exclusions, one per year left out.
    pub fn excluded(&self) -> &[ClimatologyError] {
        &self.excluded
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Keeps only the years for which `keep` returns true.
    pub fn retain_years(&mut self, mut keep: impl FnMut(i32) -> bool) {
        self.values.retain(|&(year, _)| keep(year));
    }
}

/// Maximum of every complete calendar year in `series`.
///
/// A year is complete when all 365 normalized days are present. Missing
/// values inside a complete year are skipped; a complete year with no
/// non-missing value at all is excluded too. Each exclusion is logged and
/// recorded rather than failing the call.
pub fn annual_maxima(series: &DailySeries) -> AnnualMaxima {
    let mut out = AnnualMaxima::default();
    for (year, chunk) in series.year_chunks() {
        let excluded = if chunk.len() < usize::from(DAYS_PER_YEAR) {
            ClimatologyError::IncompleteYear {
                year,
                days: chunk.len(),
            }
        } else if let Some(max) = max_finite(chunk) {
            out.values.push((year, max));
            continue;
        } else {
            ClimatologyError::AllMissingYear { year }
        };
        warn!(year, reason = %excluded, "year excluded from annual maxima");
        out.excluded.push(excluded);
    }
    out
}

/// Lower and upper quantiles of the annual maxima, `(p25, p75)` by default.
///
/// # Errors
///
/// [`ClimatologyError::NoCompleteYears`] if `maxima` is empty.
pub fn annual_quantiles(
    maxima: &AnnualMaxima,
    config: &ClimatologyConfig,
) -> Result<(f64, f64), ClimatologyError> {
    if maxima.is_empty() {
        return Err(ClimatologyError::NoCompleteYears);
    }
    let values: Vec<f64> = maxima.values.iter().map(|&(_, v)| v).collect();
    let low = empirical_quantile(&values, config.low_quantile())?;
    let high = empirical_quantile(&values, config.high_quantile())?;
    Ok((low, high))
}
