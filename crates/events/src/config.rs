//! Event detection configuration.

use crate::error::EventError;

/// Configuration for hot-period detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventConfig {
    min_run_length: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl EventConfig {
    /// Creates a configuration with `min_run_length = 3`.
    pub fn new() -> Self {
        Self { min_run_length: 3 }
    }

    /// Sets the minimum number of consecutive exceedance days forming an event.
    pub fn with_min_run_length(mut self, n: usize) -> Self {
        self.min_run_length = n;
        self
    }

    pub fn min_run_length(&self) -> usize {
        self.min_run_length
    }

    /// Validates this configuration (`min_run_length >= 1`).
    pub fn validate(&self) -> Result<(), EventError> {
        if self.min_run_length < 1 {
            return Err(EventError::InvalidConfig {
                reason: format!("min_run_length must be >= 1, got {}", self.min_run_length),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_three() {
        assert_eq!(EventConfig::default().min_run_length(), 3);
        assert!(EventConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_rejected() {
        assert!(EventConfig::new().with_min_run_length(0).validate().is_err());
    }
}
