//! Pipeline configuration.

use hwmid_climatology::ClimatologyConfig;
use hwmid_events::EventConfig;

use crate::error::PipelineError;

/// Settings for a threshold or HWMId run over a grid.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    climatology: ClimatologyConfig,
    events: EventConfig,
    /// Ignore cached thresholds and recompute them.
    force_recompute: bool,
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_climatology(mut self, config: ClimatologyConfig) -> Self {
        self.climatology = config;
        self
    }

    pub fn with_events(mut self, config: EventConfig) -> Self {
        self.events = config;
        self
    }

    pub fn with_force_recompute(mut self, force: bool) -> Self {
        self.force_recompute = force;
        self
    }

    pub fn climatology(&self) -> &ClimatologyConfig {
        &self.climatology
    }

    pub fn events(&self) -> &EventConfig {
        &self.events
    }

    pub fn force_recompute(&self) -> bool {
        self.force_recompute
    }

    /// # Errors
    ///
    /// The first invalid sub-configuration.
    pub fn validate(&self) -> Result<(), PipelineError> {
        self.climatology.validate()?;
        self.events.validate()?;
        Ok(())
    }
}
