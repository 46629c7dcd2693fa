/// Errors from quantile computation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StatsError {
    /// No non-missing values to take a quantile of.
    #[error("empty sample: no non-missing values")]
    EmptySample,

    /// Probability outside `(0, 1]`.
    #[error("invalid probability: {q} (must be in (0, 1])")]
    InvalidProbability {
        /// The rejected probability.
        q: f64,
    },
}
