//! Confidence table
//!
//! Every recommendation confidence comes from this one declarative table,
//! keyed by (domain, topic, evidence quality). The ordering
//! measured >= estimated >= assumed for the same (domain, topic) is checked by
//! [`validate_table`].

use crate::recommendation::AssemblyError;
use serde::Serialize;
use thiserror::Error;

/// Analysis domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    /// Brewing
    Brew,
    /// Roasting
    Roast,
    /// Green bean storage
    GreenBean,
    /// Farm processing
    Farm,
}

/// What a recommendation is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Topic {
    /// Missing-input refusal
    Refusal,
    /// Brew temperature strategy
    Temperature,
    /// Brew contact time strategy
    ContactTime,
    /// Extraction yield metric
    ExtractionYield,
    /// Roast development window
    Development,
    /// Roast thermal momentum control
    Momentum,
    /// Roast stability index
    Stability,
    /// Green bean moisture and water activity
    MoistureActivity,
    /// Green bean storage system
    Storage,
    /// Farm refusal at raw-material triage
    RawMaterialRefusal,
    /// Farm refusal at fermentation planning
    FermentationRefusal,
    /// Completed farm plan on a high ceiling
    ProcessPlan,
    /// Completed farm plan on a medium or low ceiling
    ProcessPlanCapped,
}

/// Quality of the evidence a recommendation rests on
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceQuality {
    /// Heuristic default, nothing measured
    Assumed,
    /// Proxy computed from related measurements
    Estimated,
    /// Directly measured
    Measured,
}

/// One row of the confidence table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEntry {
    /// Domain
    pub domain: Domain,
    /// Topic
    pub topic: Topic,
    /// Evidence quality
    pub quality: EvidenceQuality,
    /// Confidence in [0, 1]
    pub value: f64,
}

const fn entry(domain: Domain, topic: Topic, quality: EvidenceQuality, value: f64) -> ConfidenceEntry {
    ConfidenceEntry {
        domain,
        topic,
        quality,
        value,
    }
}

use Domain::*;
use EvidenceQuality::*;

/// The confidence table
pub const CONFIDENCE_TABLE: &[ConfidenceEntry] = &[
    entry(Brew, Topic::Refusal, Measured, 0.92),
    entry(Brew, Topic::Temperature, Measured, 0.90),
    entry(Brew, Topic::Temperature, Estimated, 0.78),
    entry(Brew, Topic::ContactTime, Measured, 0.72),
    entry(Brew, Topic::ExtractionYield, Measured, 0.93),
    entry(Roast, Topic::Refusal, Measured, 0.92),
    entry(Roast, Topic::Development, Measured, 0.80),
    entry(Roast, Topic::Momentum, Measured, 0.74),
    entry(Roast, Topic::Momentum, Estimated, 0.62),
    entry(Roast, Topic::Stability, Measured, 0.76),
    entry(GreenBean, Topic::Refusal, Measured, 0.92),
    entry(GreenBean, Topic::MoistureActivity, Measured, 0.88),
    entry(GreenBean, Topic::Storage, Measured, 0.80),
    entry(GreenBean, Topic::Storage, Assumed, 0.50),
    entry(Farm, Topic::RawMaterialRefusal, Measured, 0.90),
    entry(Farm, Topic::FermentationRefusal, Measured, 0.86),
    entry(Farm, Topic::ProcessPlan, Measured, 0.90),
    entry(Farm, Topic::ProcessPlanCapped, Measured, 0.82),
];

/// Look up the confidence for a (domain, topic, quality) key
pub fn confidence_for(domain: Domain, topic: Topic, quality: EvidenceQuality) -> Option<f64> {
    CONFIDENCE_TABLE
        .iter()
        .find(|e| e.domain == domain && e.topic == topic && e.quality == quality)
        .map(|e| e.value)
}

/// Look up a confidence that must exist in the table
pub fn require_confidence(domain: Domain, topic: Topic, quality: EvidenceQuality) -> Result<f64, AssemblyError> {
    confidence_for(domain, topic, quality).ok_or(AssemblyError::MissingConfidence {
        domain,
        topic,
        quality,
    })
}

/// A broken confidence table invariant
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfidenceTableError {
    /// A value lies outside [0, 1]
    #[error("{domain:?}/{topic:?}/{quality:?} confidence {value} is outside [0, 1]")]
    OutOfRange {
        /// Domain
        domain: Domain,
        /// Topic
        topic: Topic,
        /// Evidence quality
        quality: EvidenceQuality,
        /// Offending value
        value: f64,
    },

    /// The same key appears twice
    #[error("{domain:?}/{topic:?}/{quality:?} appears twice")]
    Duplicate {
        /// Domain
        domain: Domain,
        /// Topic
        topic: Topic,
        /// Evidence quality
        quality: EvidenceQuality,
    },

    /// Better evidence carries a lower confidence
    #[error("{domain:?}/{topic:?}: {better:?} ({better_value}) ranks below {worse:?} ({worse_value})")]
    Inverted {
        /// Domain
        domain: Domain,
        /// Topic
        topic: Topic,
        /// Higher evidence quality
        better: EvidenceQuality,
        /// Its confidence
        better_value: f64,
        /// Lower evidence quality
        worse: EvidenceQuality,
        /// Its confidence
        worse_value: f64,
    },
}

/// Check the table invariants
///
/// - every value lies in [0, 1]
/// - no key appears twice
/// - for a fixed (domain, topic), higher evidence quality never has lower confidence
pub fn validate_table(table: &[ConfidenceEntry]) -> Result<(), ConfidenceTableError> {
    for (i, a) in table.iter().enumerate() {
        if !(0.0..=1.0).contains(&a.value) {
            return Err(ConfidenceTableError::OutOfRange {
                domain: a.domain,
                topic: a.topic,
                quality: a.quality,
                value: a.value,
            });
        }
        for b in &table[i + 1..] {
            if a.domain != b.domain || a.topic != b.topic {
                continue;
            }
            if a.quality == b.quality {
                return Err(ConfidenceTableError::Duplicate {
                    domain: a.domain,
                    topic: a.topic,
                    quality: a.quality,
                });
            }
            let (better, worse) = if a.quality > b.quality { (a, b) } else { (b, a) };
            if better.value < worse.value {
                return Err(ConfidenceTableError::Inverted {
                    domain: a.domain,
                    topic: a.topic,
                    better: better.quality,
                    better_value: better.value,
                    worse: worse.quality,
                    worse_value: worse.value,
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_valid() {
        assert_eq!(validate_table(CONFIDENCE_TABLE), Ok(()));
    }

    #[test]
    fn test_measured_beats_estimated_for_brew_temperature() {
        let measured = confidence_for(Brew, Topic::Temperature, Measured).unwrap();
        let estimated = confidence_for(Brew, Topic::Temperature, Estimated).unwrap();
        assert!(measured >= estimated);
    }

    #[test]
    fn test_missing_key() {
        assert!(confidence_for(Farm, Topic::Temperature, Assumed).is_none());
        assert!(matches!(
            require_confidence(Farm, Topic::Temperature, Assumed),
            Err(AssemblyError::MissingConfidence { domain: Farm, .. })
        ));
        assert_eq!(require_confidence(Farm, Topic::ProcessPlan, Measured), Ok(0.90));
    }

    #[test]
    fn test_validation_rejects_inverted_ordering() {
        let table = [
            entry(Brew, Topic::Temperature, Measured, 0.5),
            entry(Brew, Topic::Temperature, Assumed, 0.6),
        ];
        let err = validate_table(&table).unwrap_err();
        assert!(matches!(
            err,
            ConfidenceTableError::Inverted {
                better: Measured,
                worse: Assumed,
                ..
            }
        ));
        assert!(err.to_string().contains("ranks below"));
    }

    #[test]
    fn test_validation_rejects_duplicates_and_range() {
        let duplicated = [
            entry(Roast, Topic::Development, Measured, 0.8),
            entry(Roast, Topic::Development, Measured, 0.7),
        ];
        assert!(matches!(
            validate_table(&duplicated),
            Err(ConfidenceTableError::Duplicate { .. })
        ));

        let out_of_range = [entry(Roast, Topic::Development, Measured, 1.2)];
        assert!(matches!(
            validate_table(&out_of_range),
            Err(ConfidenceTableError::OutOfRange { value, .. }) if value == 1.2
        ));
    }
}
