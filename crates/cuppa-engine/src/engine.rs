//! Coffee analysis engine

use crate::{brew, greenbean, roast, AnalysisConfig, EngineError};
use cuppa_domain::{AnalysisReport, BrewInputs, GreenBeanInputs, RoastInputs};

/// Entry point for brew, roast and green bean analyses
///
/// Every call allocates its own ledger; nothing is shared between calls.
#[derive(Debug, Clone, Default)]
pub struct CoffeeEngine {
    config: AnalysisConfig,
}

impl CoffeeEngine {
    /// Create an engine with the given configuration
    pub fn new(config: AnalysisConfig) -> Self {
        Self { config }
    }

    /// Create an engine with default thresholds
    pub fn default_config() -> Self {
        Self::new(AnalysisConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze a brew
    ///
    /// Returns a refusal report when a required input is missing.
    ///
    /// # Errors
    ///
    /// [`EngineError::Physics`] if a supplied dose or beverage mass is not positive.
    pub fn analyze_brew(&self, inputs: &BrewInputs) -> Result<AnalysisReport, EngineError> {
        brew::analyze(inputs)
    }

    /// Analyze a roast batch
    ///
    /// # Errors
    ///
    /// [`EngineError::Physics`] if the total roast time is not positive.
    pub fn analyze_roast(&self, inputs: &RoastInputs) -> Result<AnalysisReport, EngineError> {
        roast::analyze(inputs)
    }

    /// Analyze a green bean lot against the configured thresholds
    pub fn analyze_green_bean(&self, inputs: &GreenBeanInputs) -> Result<AnalysisReport, EngineError> {
        greenbean::analyze(inputs, &self.config)
    }
}
