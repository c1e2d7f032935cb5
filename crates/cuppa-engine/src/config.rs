//! Analysis configuration
//!
//! Groups the green-bean classification thresholds.

use crate::EngineError;
use cuppa_physics::greenbean::{AwThresholds, MoistureThresholds};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the analysis engines
///
/// # Examples
///
/// ```
/// use cuppa_engine::AnalysisConfig;
///
/// // Default thresholds (common roaster reference windows)
/// let config = AnalysisConfig::default();
/// assert_eq!(config.aw.sweet_high, 0.57);
///
/// // Tighter windows
/// let config = AnalysisConfig::strict();
/// assert!(config.aw.danger_over < AnalysisConfig::default().aw.danger_over);
///
/// // Loaded from TOML, missing sections fall back to defaults
/// let config = AnalysisConfig::from_toml_str("[moisture]\nlow = 8.5\ngood_low = 9.0\ngood_high = 11.5\nhigh = 12.5\n").unwrap();
/// assert_eq!(config.moisture.low, 8.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Water activity thresholds
    #[serde(default)]
    pub aw: AwThresholds,

    /// Moisture content thresholds (%)
    #[serde(default)]
    pub moisture: MoistureThresholds,
}

impl AnalysisConfig {
    /// Tighter windows for long storage or humid climates
    ///
    /// - aW sweet spot: 0.50-0.55, danger above 0.60
    /// - Moisture ok: 9.5-11.0%, too wet above 12.0%
    pub fn strict() -> Self {
        Self {
            aw: AwThresholds {
                sweet_low: 0.50,
                sweet_high: 0.55,
                caution_low: 0.56,
                caution_high: 0.60,
                danger_over: 0.60,
                too_low_under: 0.45,
            },
            moisture: MoistureThresholds {
                low: 9.0,
                good_low: 9.5,
                good_high: 11.0,
                high: 12.0,
            },
        }
    }

    /// Wider windows for fast-turnover stock
    ///
    /// - aW sweet spot: 0.48-0.58, danger above 0.64
    /// - Moisture ok: 9.0-12.0%, too wet above 13.0%
    pub fn lenient() -> Self {
        Self {
            aw: AwThresholds {
                sweet_low: 0.48,
                sweet_high: 0.58,
                caution_low: 0.59,
                caution_high: 0.64,
                danger_over: 0.64,
                too_low_under: 0.42,
            },
            moisture: MoistureThresholds {
                low: 8.5,
                good_low: 9.0,
                good_high: 12.0,
                high: 13.0,
            },
        }
    }

    /// Parse from TOML text and validate
    pub fn from_toml_str(text: &str) -> Result<Self, EngineError> {
        let config: Self = toml::from_str(text).map_err(|e| EngineError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file and validate
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check that every threshold window is ordered and in range
    pub fn validate(&self) -> Result<(), EngineError> {
        let aw = &self.aw;
        let aw_order = [
            aw.too_low_under,
            aw.sweet_low,
            aw.sweet_high,
            aw.caution_low,
            aw.caution_high,
        ];
        if aw_order.iter().chain([&aw.danger_over]).any(|v| !(0.0..=1.0).contains(v)) {
            return Err(EngineError::Config("aw thresholds must lie in [0, 1]".to_string()));
        }
        if !is_non_decreasing(&aw_order) || aw.danger_over < aw.caution_low {
            return Err(EngineError::Config(
                "aw thresholds must satisfy too_low_under <= sweet_low <= sweet_high <= caution_low <= caution_high".to_string(),
            ));
        }

        let mc = &self.moisture;
        let mc_order = [mc.low, mc.good_low, mc.good_high, mc.high];
        if mc_order.iter().any(|v| !(0.0..=100.0).contains(v)) {
            return Err(EngineError::Config("moisture thresholds must lie in [0, 100]".to_string()));
        }
        if !is_non_decreasing(&mc_order) {
            return Err(EngineError::Config(
                "moisture thresholds must satisfy low <= good_low <= good_high <= high".to_string(),
            ));
        }

        Ok(())
    }
}

fn is_non_decreasing(values: &[f64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}
