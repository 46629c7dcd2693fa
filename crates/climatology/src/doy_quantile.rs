//! Windowed day-of-year quantiles.

use hwmid_calendar::{DAYS_PER_YEAR, DailySeries, Doy, DoyWindow};
use hwmid_stats::select_quantile;

use crate::error::ClimatologyError;

/// For every day of year, the `q` quantile of all finite values whose
/// day of year lies within `radius` days of it (wrapping across years).
///
/// Values are first bucketed by day of year; each window pool is then
/// assembled into a single reused buffer and dropped once its quantile is
/// taken.
///
/// # Errors
///
/// - [`ClimatologyError::Calendar`] if `radius` is too large.
/// - [`ClimatologyError::EmptyWindow`] if some window has no data.
/// - [`ClimatologyError::Stats`] if `q` is not in `(0, 1]`.
pub fn dayofyear_quantile_array(
    series: &DailySeries,
    radius: u16,
    q: f64,
) -> Result<[f64; DAYS_PER_YEAR as usize], ClimatologyError> {
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); usize::from(DAYS_PER_YEAR)];
    for (date, v) in series.iter() {
        if v.is_finite() {
            buckets[date.doy().index()].push(v);
        }
    }

    let mut out = [f64::NAN; DAYS_PER_YEAR as usize];
    let mut pool: Vec<f64> = Vec::new();
    for doy in Doy::all() {
        let window = DoyWindow::new(doy, radius)?;
        pool.clear();
        for member in window.days() {
            pool.extend_from_slice(&buckets[member.index()]);
        }
        if pool.is_empty() {
            return Err(ClimatologyError::EmptyWindow { doy: doy.get() });
        }
        out[doy.index()] = select_quantile(&mut pool, q)?;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use hwmid_calendar::{CalendarError, NoLeapDate};

    fn start() -> NoLeapDate {
        NoLeapDate::new(1981, 1, 1).unwrap()
    }

    #[test]
    fn constant_series_gives_constant_thresholds() {
        let s = DailySeries::new(start(), vec![21.5; 365 * 3]);
        let p90 = dayofyear_quantile_array(&s, 15, 0.9).unwrap();
        assert!(p90.iter().all(|&v| v == 21.5));
    }

    #[test]
    fn infinities_left_out_of_pools() {
        let mut values = vec![21.5; 365 * 3];
        values[10] = f64::INFINITY;
        values[365 + 10] = f64::NEG_INFINITY;
        let s = DailySeries::new(start(), values);
        let p90 = dayofyear_quantile_array(&s, 0, 1.0).unwrap();
        assert_eq!(p90[10], 21.5);
    }

    #[test]
    fn radius_zero_pools_same_day_across_years() {
        // Day-of-year value equals year index: pools are {0, 1, ..., 9}.
        let values: Vec<f64> = (0..10).flat_map(|y| vec![f64::from(y); 365]).collect();
        let s = DailySeries::new(start(), values);
        let p90 = dayofyear_quantile_array(&s, 0, 0.9).unwrap();
        // N=10, rank 9 -> value 8.
        assert_relative_eq!(p90[0], 8.0);
        assert_relative_eq!(p90[364], 8.0);
    }

    #[test]
    fn window_wraps_year_boundary() {
        // One year; day-of-year d carries value d. Day 1 with radius 2 pools
        // {364, 365, 1, 2, 3}; the max of that pool is 365.
        let values: Vec<f64> = (1..=365).map(f64::from).collect();
        let s = DailySeries::new(start(), values);
        let p100 = dayofyear_quantile_array(&s, 2, 1.0).unwrap();
        assert_relative_eq!(p100[0], 365.0);
        assert_relative_eq!(p100[100], 103.0);
        let p_low = dayofyear_quantile_array(&s, 2, 0.2).unwrap();
        assert_relative_eq!(p_low[364], 1.0);
    }

    #[test]
    fn missing_values_excluded_from_pool() {
        let mut values = vec![f64::NAN; 365];
        values[0] = 5.0;
        let s = DailySeries::new(start(), values);
        let p90 = dayofyear_quantile_array(&s, 182, 0.9).unwrap();
        assert!(p90.iter().all(|&v| v == 5.0));
    }

    #[test]
    fn empty_window_reported() {
        let s = DailySeries::new(start(), vec![1.0; 10]);
        let err = dayofyear_quantile_array(&s, 15, 0.9).unwrap_err();
        // First window without days 1..=10 nearby is centered on day 26.
        assert_eq!(err, ClimatologyError::EmptyWindow { doy: 26 });
    }

    #[test]
    fn oversized_radius_rejected() {
        let s = DailySeries::new(start(), vec![1.0; 365]);
        assert_eq!(
            dayofyear_quantile_array(&s, 200, 0.9).unwrap_err(),
            ClimatologyError::Calendar(CalendarError::InvalidRadius { radius: 200 })
        );
    }
}
