//! Recommendations and the report shapes that carry them

use crate::confidence::{Domain, EvidenceQuality, Topic};
use crate::proof::{LedgerSnapshot, ProofId, ProofLedger};
use serde::Serialize;
use thiserror::Error;

/// Human-facing guidance backed by proofs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Short title
    pub title: String,
    /// Ordered steps to take
    pub steps: Vec<String>,
    /// Ordered reasons
    pub why: Vec<String>,
    /// What to measure to improve the next analysis
    pub what_to_measure: Vec<String>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Proofs this recommendation was built from (never empty)
    pub proof_refs: Vec<ProofId>,
}

impl Recommendation {
    /// Start building a recommendation
    pub fn builder(title: impl Into<String>) -> RecommendationBuilder {
        RecommendationBuilder::new(title)
    }
}

/// Errors raised when a recommendation would break the proof invariants
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssemblyError {
    /// A recommendation cites no proof
    #[error("Recommendation '{title}' cites no proof")]
    EmptyProofRefs {
        /// Recommendation title
        title: String,
    },

    /// A recommendation cites an id missing from the run's ledger
    #[error("Recommendation '{title}' cites unknown proof {id}")]
    UnknownProof {
        /// Recommendation title
        title: String,
        /// The unknown id
        id: ProofId,
    },

    /// Confidence outside [0, 1]
    #[error("Recommendation '{title}' has confidence {value} outside [0, 1]")]
    ConfidenceOutOfRange {
        /// Recommendation title
        title: String,
        /// The offending value
        value: f64,
    },

    /// The confidence table has no row for this key
    #[error("No confidence entry for {domain:?}/{topic:?}/{quality:?}")]
    MissingConfidence {
        /// Domain
        domain: Domain,
        /// Topic
        topic: Topic,
        /// Evidence quality
        quality: EvidenceQuality,
    },
}

/// Builder that validates proof references against a ledger
#[derive(Debug, Clone, Default)]
pub struct RecommendationBuilder {
    title: String,
    steps: Vec<String>,
    why: Vec<String>,
    what_to_measure: Vec<String>,
    proof_refs: Vec<ProofId>,
}

impl RecommendationBuilder {
    /// Create a builder with a title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Title of the recommendation being built
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Append a step
    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Append several steps
    pub fn steps<I, S>(mut self, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.steps.extend(steps.into_iter().map(Into::into));
        self
    }

    /// Append a reason
    pub fn why(mut self, reason: impl Into<String>) -> Self {
        self.why.push(reason.into());
        self
    }

    /// Append several reasons
    pub fn reasons<I, S>(mut self, reasons: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.why.extend(reasons.into_iter().map(Into::into));
        self
    }

    /// Append several items to measure
    pub fn measure<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.what_to_measure.extend(items.into_iter().map(Into::into));
        self
    }

    /// Cite a proof this recommendation reads
    pub fn cite(mut self, id: ProofId) -> Self {
        self.proof_refs.push(id);
        self
    }

    /// Cite several proofs, in order
    pub fn cite_all(mut self, ids: impl IntoIterator<Item = ProofId>) -> Self {
        self.proof_refs.extend(ids);
        self
    }

    /// Validate and build
    ///
    /// Fails if no proof is cited, if any cited id is absent from `ledger`, or
    /// if `confidence` is outside [0, 1].
    pub fn build(self, confidence: f64, ledger: &ProofLedger) -> Result<Recommendation, AssemblyError> {
        if self.proof_refs.is_empty() {
            return Err(AssemblyError::EmptyProofRefs { title: self.title });
        }
        if let Some(id) = self.proof_refs.iter().find(|id| !ledger.contains(**id)) {
            return Err(AssemblyError::UnknownProof {
                title: self.title,
                id: *id,
            });
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(AssemblyError::ConfidenceOutOfRange {
                title: self.title,
                value: confidence,
            });
        }

        Ok(Recommendation {
            title: self.title,
            steps: self.steps,
            why: self.why,
            what_to_measure: self.what_to_measure,
            confidence,
            proof_refs: self.proof_refs,
        })
    }
}

/// Result of one brew, roast or green bean analysis
///
/// Refusals and full analyses share this shape; a refusal has non-empty
/// `missing_inputs` and exactly one recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    /// Fixed-format overview
    pub summary: String,
    /// Recommendations in domain order
    pub recommendations: Vec<Recommendation>,
    /// Required inputs that were absent
    pub missing_inputs: Vec<String>,
    /// Every proof recorded during the run
    pub proof_ledger: LedgerSnapshot,
}

impl AnalysisReport {
    /// Whether the analysis was refused for missing inputs
    pub fn is_refusal(&self) -> bool {
        !self.missing_inputs.is_empty()
    }
}

/// Farm pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FarmStage {
    /// Cherry triage
    RawMaterial,
    /// Fermentation plan check
    Fermentation,
    /// Drying SOP
    Drying,
}

impl FarmStage {
    /// Get the stage name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            FarmStage::RawMaterial => "raw_material",
            FarmStage::Fermentation => "fermentation",
            FarmStage::Drying => "drying",
        }
    }
}

/// Result of one farm pipeline run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FarmerReport {
    /// Fixed-format overview
    pub summary: String,
    /// Actions to take now, in stage order
    pub action_now: Vec<String>,
    /// Risks, in stage order
    pub risks: Vec<String>,
    /// What to measure next
    pub what_to_measure_next: Vec<String>,
    /// Standard operating procedure lines
    pub sop: Vec<String>,
    /// Confidence in [0, 1]
    pub confidence: f64,
    /// Proofs the report was built from
    pub proof_refs: Vec<ProofId>,
    /// Stage that refused, if any
    pub halted_at: Option<FarmStage>,
    /// Every proof recorded during the run
    pub proof_ledger: LedgerSnapshot,
}

impl FarmerReport {
    /// Whether a stage refused for missing measurements
    pub fn is_refusal(&self) -> bool {
        self.halted_at.is_some()
    }
}
