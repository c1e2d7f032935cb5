//! Stage outcomes

use cuppa_domain::ProofId;

/// What a gated stage produced
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    /// Inputs were complete; the stage produced its data
    Accepted(T),
    /// Inputs were incomplete; nothing past the axiom was recorded
    NeedsMeasurement {
        /// Missing keys, in declaration order
        missing: Vec<String>,
    },
}

impl<T> StageOutcome<T> {
    /// Whether the stage accepted its inputs
    pub fn is_accepted(&self) -> bool {
        matches!(self, StageOutcome::Accepted(_))
    }
}

/// A stage's outcome together with the axiom it opened with
#[derive(Debug, Clone, PartialEq)]
pub struct Stage<T> {
    /// Stage axiom proof
    pub axiom: ProofId,
    /// Outcome
    pub outcome: StageOutcome<T>,
}
