//! Order-statistic helpers for HWMId climatology.
//!
//! Quantiles here are inverted-CDF order statistics: the value at rank
//! `ceil(q * N)` of the ascending sample, with no interpolation between
//! neighbours.

mod error;

pub use error::StatsError;

/// Tolerance for treating `q * N` as an exact integer rank.
///
/// Decimal probabilities are not exact in binary (`0.7 * 10.0` is
/// `7.000000000000001`), which would otherwise bump the rank by one.
const RANK_TOLERANCE: f64 = 1e-9;

fn check_probability(q: f64) -> Result<(), StatsError> {
    if q.is_finite() && q > 0.0 && q <= 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidProbability { q })
    }
}

/// 0-based index of the inverted-CDF quantile `q` in a sorted sample of
/// length `n`: `ceil(q * n) - 1`.
///
/// Caller guarantees `n >= 1` and `q` in `(0, 1]`.
pub fn quantile_index(n: usize, q: f64) -> usize {
    let qn = q * n as f64;
    let nearest = qn.round();
    let rank = if (qn - nearest).abs() < RANK_TOLERANCE {
        nearest
    } else {
        qn.ceil()
    };
    (rank as usize).clamp(1, n) - 1
}

/// Inverted-CDF quantile of `values`, ignoring `NaN` and infinities.
///
/// # Errors
///
/// - [`StatsError::InvalidProbability`] if `q` is not in `(0, 1]`.
/// - [`StatsError::EmptySample`] if no finite value remains.
pub fn empirical_quantile(values: &[f64], q: f64) -> Result<f64, StatsError> {
    let mut buf: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    select_quantile(&mut buf, q)
}

/// Inverted-CDF quantile of `buf` in place.
///
/// `buf` must hold finite values only; its order is scrambled afterwards.
/// Uses selection rather than a full sort.
///
/// # Errors
///
/// Same as [`empirical_quantile`].
pub fn select_quantile(buf: &mut [f64], q: f64) -> Result<f64, StatsError> {
    check_probability(q)?;
    if buf.is_empty() {
        return Err(StatsError::EmptySample);
    }
    let k = quantile_index(buf.len(), q);
    let (_, kth, _) = buf.select_nth_unstable_by(k, f64::total_cmp);
    Ok(*kth)
}

/// Largest finite value, or `None` if there is none.
pub fn max_finite(values: &[f64]) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .max_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Expected 0-based rank computed with integer arithmetic:
    /// `ceil(num * n / den) - 1`.
    fn expected_index(n: usize, num: usize, den: usize) -> usize {
        (num * n).div_ceil(den) - 1
    }

    #[test]
    fn quantile_grid_matches_integer_rank() {
        let probs = [(1, 10), (1, 4), (1, 2), (7, 10), (3, 4), (9, 10), (1, 1)];
        for n in [1usize, 4, 5, 10, 100] {
            let sample: Vec<f64> = (1..=n).rev().map(|v| v as f64).collect();
            for &(num, den) in &probs {
                let q = num as f64 / den as f64;
                let got = empirical_quantile(&sample, q).unwrap();
                let want = (expected_index(n, num, den) + 1) as f64;
                assert_eq!(got, want, "n={n} q={q}");
            }
        }
    }

    #[test]
    fn decimal_probability_does_not_overshoot() {
        let sample: Vec<f64> = (1..=10).map(f64::from).collect();
        assert_relative_eq!(empirical_quantile(&sample, 0.7).unwrap(), 7.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.9).unwrap(), 9.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.3).unwrap(), 3.0);
    }

    #[test]
    fn no_interpolation() {
        let sample = [1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(empirical_quantile(&sample, 0.25).unwrap(), 1.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.26).unwrap(), 2.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.5).unwrap(), 2.0);
    }

    #[test]
    fn nan_ignored() {
        let sample = [f64::NAN, 5.0, 1.0, f64::NAN, 3.0];
        assert_relative_eq!(empirical_quantile(&sample, 1.0).unwrap(), 5.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.1).unwrap(), 1.0);
    }

    #[test]
    fn infinities_ignored() {
        let sample = [f64::INFINITY, 2.0, f64::NEG_INFINITY, 4.0, 6.0];
        assert_relative_eq!(empirical_quantile(&sample, 1.0).unwrap(), 6.0);
        assert_relative_eq!(empirical_quantile(&sample, 0.1).unwrap(), 2.0);
        assert_eq!(
            empirical_quantile(&[f64::INFINITY, f64::NAN], 0.9),
            Err(StatsError::EmptySample)
        );
    }

    #[test]
    fn empty_and_all_nan_rejected() {
        assert_eq!(empirical_quantile(&[], 0.5), Err(StatsError::EmptySample));
        assert_eq!(
            empirical_quantile(&[f64::NAN], 0.5),
            Err(StatsError::EmptySample)
        );
    }

    #[test]
    fn probability_bounds() {
        let sample = [1.0];
        for q in [0.0, -0.1, 1.5, f64::NAN] {
            assert!(matches!(
                empirical_quantile(&sample, q),
                Err(StatsError::InvalidProbability { .. })
            ));
        }
    }

    #[test]
    fn max_finite_skips_nan() {
        assert_eq!(max_finite(&[1.0, f64::NAN, 3.0, 2.0]), Some(3.0));
        assert_eq!(max_finite(&[f64::NAN]), None);
        assert_eq!(max_finite(&[]), None);
        assert_eq!(max_finite(&[-5.0, f64::NEG_INFINITY]), Some(-5.0));
    }
}
