//! Roasting proxies

use crate::error::{positive, PhysicsError};

/// Momentum above which a long development risks a baked, flat cup
pub const HIGH_MOMENTUM: f64 = 1.2;
/// Momentum below which a short development risks underdevelopment
pub const LOW_MOMENTUM: f64 = 0.6;
/// Development ratio above which high momentum bakes
pub const LONG_DEVELOPMENT_RATIO: f64 = 0.22;
/// Development ratio below which low momentum underdevelops
pub const SHORT_DEVELOPMENT_RATIO: f64 = 0.16;

/// Thermal momentum: rate of energy accumulation
///
/// `ror * (batch_g / 1000)`. High momentum late in the roast means overshoot risk.
pub fn thermal_momentum(ror_c_per_min: f64, batch_g: f64) -> f64 {
    ror_c_per_min * (batch_g / 1000.0)
}

/// Development time as a share of total roast time
///
/// # Errors
///
/// [`PhysicsError::InvalidArgument`] if `total_time_s <= 0`.
pub fn development_ratio(dev_time_s: f64, total_time_s: f64) -> Result<f64, PhysicsError> {
    let total_time_s = positive("total_time_s", total_time_s)?;
    Ok(dev_time_s / total_time_s)
}

/// Roast risk from momentum and development ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoastRisk {
    /// Neither extreme
    Stable,
    /// High momentum carried through a long development
    BakedFlat,
    /// Low momentum with a short development
    Underdeveloped,
}

impl RoastRisk {
    /// Get the risk tag
    pub fn as_str(&self) -> &'static str {
        match self {
            RoastRisk::Stable => "stable",
            RoastRisk::BakedFlat => "baked_flat_risk",
            RoastRisk::Underdeveloped => "underdeveloped_risk",
        }
    }

    /// Parse a risk tag written by [`RoastRisk::as_str`]
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "stable" => Some(RoastRisk::Stable),
            "baked_flat_risk" => Some(RoastRisk::BakedFlat),
            "underdeveloped_risk" => Some(RoastRisk::Underdeveloped),
            _ => None,
        }
    }
}

/// Classify roast risk
pub fn roast_risk(momentum: f64, development_ratio: f64) -> RoastRisk {
    if momentum > HIGH_MOMENTUM && development_ratio > LONG_DEVELOPMENT_RATIO {
        RoastRisk::BakedFlat
    } else if momentum < LOW_MOMENTUM && development_ratio < SHORT_DEVELOPMENT_RATIO {
        RoastRisk::Underdeveloped
    } else {
        RoastRisk::Stable
    }
}

/// Roast stability index in [0, 1]: 1 = stable, 0 = chaotic
pub fn roast_stability_index(ror_variance: f64, airflow_changes: u32) -> f64 {
    let penalty = ror_variance * 0.6 + f64::from(airflow_changes) * 0.4;
    (1.0 - penalty).max(0.0)
}

/// Population variance of rate-of-rise samples, `None` for an empty curve
pub fn ror_variance(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    Some(samples.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: stability index stays within [0, 1]
        #[test]
        fn test_stability_index_range(variance in 0.0f64..10.0, changes in 0u32..20) {
            let rsi = roast_stability_index(variance, changes);
            prop_assert!((0.0..=1.0).contains(&rsi));
        }

        /// Property: development ratio is defined for every positive total time
        #[test]
        fn test_development_ratio_positive_total(dev in 0.0f64..300.0, total in 1.0f64..1200.0) {
            let ratio = development_ratio(dev, total).unwrap();
            prop_assert!((ratio * total - dev).abs() < 1e-6);
        }
    }
}
