//! Error types for the hwmid-events crate.

/// Error type for all fallible operations in the hwmid-events crate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EventError {
    /// The day-of-year threshold array did not have 365 entries.
    #[error("threshold array has {got} entries, expected {expected}")]
    ThresholdLength {
        /// Required length.
        expected: usize,
        /// Provided length.
        got: usize,
    },

    /// `p75 - p25` is zero, negative or not finite, so magnitudes cannot be
    /// normalized.
    #[error("degenerate distribution: p25={p25}, p75={p75}")]
    DegenerateDistribution {
        /// Lower annual-maximum quantile.
        p25: f64,
        /// Upper annual-maximum quantile.
        p75: f64,
    },

    /// Returned when a configuration parameter is invalid.
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the problem.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_degenerate() {
        let e = EventError::DegenerateDistribution {
            p25: 30.0,
            p75: 30.0,
        };
        assert_eq!(e.to_string(), "degenerate distribution: p25=30, p75=30");
    }

    #[test]
    fn display_threshold_length() {
        let e = EventError::ThresholdLength {
            expected: 365,
            got: 12,
        };
        assert_eq!(e.to_string(), "threshold array has 12 entries, expected 365");
    }
}
