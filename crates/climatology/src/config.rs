//! Configuration for threshold estimation.

use hwmid_calendar::DoyWindow;

use crate::error::ClimatologyError;

/// Configuration for reference-period threshold estimation.
///
/// # Example
///
/// ```
/// use hwmid_climatology::ClimatologyConfig;
///
/// let config = ClimatologyConfig::new()
///     .with_window_radius(15)
///     .with_reference_years(Some(1981), Some(2010));
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct ClimatologyConfig {
    window_radius: u16,
    daily_quantile: f64,
    low_quantile: f64,
    high_quantile: f64,
    first_year: Option<i32>,
    last_year: Option<i32>,
}

impl Default for ClimatologyConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ClimatologyConfig {
    /// Creates a configuration with defaults.
    ///
    /// Defaults: `window_radius = 15`, `daily_quantile = 0.90`,
    /// `low_quantile = 0.25`, `high_quantile = 0.75`, no year bounds.
    pub fn new() -> Self {
        Self {
            window_radius: 15,
            daily_quantile: 0.90,
            low_quantile: 0.25,
            high_quantile: 0.75,
            first_year: None,
            last_year: None,
        }
    }

    /// Sets the half-width of the day-of-year window.
    pub fn with_window_radius(mut self, r: u16) -> Self {
        self.window_radius = r;
        self
    }

    /// Sets the probability of the daily threshold.
    pub fn with_daily_quantile(mut self, q: f64) -> Self {
        self.daily_quantile = q;
        self
    }

    /// Sets the probability of the lower annual-maximum quantile.
    pub fn with_low_quantile(mut self, q: f64) -> Self {
        self.low_quantile = q;
        self
    }

    /// Sets the probability of the upper annual-maximum quantile.
    pub fn with_high_quantile(mut self, q: f64) -> Self {
        self.high_quantile = q;
        self
    }

    /// Restricts the reference period to `first..=last` (inclusive).
    pub fn with_reference_years(mut self, first: Option<i32>, last: Option<i32>) -> Self {
        self.first_year = first;
        self.last_year = last;
        self
    }

    pub fn window_radius(&self) -> u16 {
        self.window_radius
    }

    pub fn daily_quantile(&self) -> f64 {
        self.daily_quantile
    }

    pub fn low_quantile(&self) -> f64 {
        self.low_quantile
    }

    pub fn high_quantile(&self) -> f64 {
        self.high_quantile
    }

    pub fn first_year(&self) -> Option<i32> {
        self.first_year
    }

    pub fn last_year(&self) -> Option<i32> {
        self.last_year
    }

    /// Whether `year` lies inside the configured reference period.
    pub fn includes_year(&self, year: i32) -> bool {
        self.first_year.is_none_or(|f| year >= f) && self.last_year.is_none_or(|l| year <= l)
    }

    /// Validates this configuration.
    ///
    /// Checks that the window has distinct members, every probability is in
    /// `(0, 1]`, the low quantile is below the high one and the year bounds
    /// are ordered.
    pub fn validate(&self) -> Result<(), ClimatologyError> {
        if self.window_radius > DoyWindow::MAX_RADIUS {
            return Err(ClimatologyError::InvalidConfig {
                reason: format!(
                    "window_radius must be <= {}, got {}",
                    DoyWindow::MAX_RADIUS,
                    self.window_radius
                ),
            });
        }
        for (name, q) in [
            ("daily_quantile", self.daily_quantile),
            ("low_quantile", self.low_quantile),
            ("high_quantile", self.high_quantile),
        ] {
            if !q.is_finite() || q <= 0.0 || q > 1.0 {
                return Err(ClimatologyError::InvalidConfig {
                    reason: format!("{name} must be in (0, 1], got {q}"),
                });
            }
        }
        if self.low_quantile >= self.high_quantile {
            return Err(ClimatologyError::InvalidConfig {
                reason: format!(
                    "low_quantile ({}) must be below high_quantile ({})",
                    self.low_quantile, self.high_quantile
                ),
            });
        }
        if let (Some(f), Some(l)) = (self.first_year, self.last_year) {
            if f > l {
                return Err(ClimatologyError::InvalidConfig {
                    reason: format!("first_year ({f}) is after last_year ({l})"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        let c = ClimatologyConfig::default();
        assert_eq!(c.window_radius(), 15);
        assert_eq!(c.daily_quantile(), 0.90);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn radius_too_large() {
        let c = ClimatologyConfig::new().with_window_radius(183);
        assert!(matches!(
            c.validate(),
            Err(ClimatologyError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn quantiles_out_of_range_or_inverted() {
        assert!(ClimatologyConfig::new().with_daily_quantile(0.0).validate().is_err());
        assert!(ClimatologyConfig::new().with_high_quantile(1.2).validate().is_err());
        assert!(
            ClimatologyConfig::new()
                .with_low_quantile(0.8)
                .with_high_quantile(0.7)
                .validate()
                .is_err()
        );
    }

    #[test]
    fn reference_years() {
        let c = ClimatologyConfig::new().with_reference_years(Some(1981), Some(2010));
        assert!(c.includes_year(1981));
        assert!(c.includes_year(2010));
        assert!(!c.includes_year(1980));
        assert!(!c.includes_year(2011));
        assert!(
            ClimatologyConfig::new()
                .with_reference_years(Some(2000), Some(1999))
                .validate()
                .is_err()
        );
    }
}
