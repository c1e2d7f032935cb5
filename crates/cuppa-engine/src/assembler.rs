//! Recommendation assembler
//!
//! Reads values back from the run's ledger and turns builders into validated
//! recommendations, with confidence looked up from the table.

use crate::EngineError;
use cuppa_domain::{
    require_confidence, Domain, EvidenceQuality, ProofId, ProofLedger, Recommendation, RecommendationBuilder, Topic,
};

/// Collects recommendations for one analysis, in push order
#[derive(Debug)]
pub struct Assembler<'l> {
    domain: Domain,
    ledger: &'l ProofLedger,
    recommendations: Vec<Recommendation>,
}

impl<'l> Assembler<'l> {
    /// Start assembling against a finished ledger
    pub fn new(domain: Domain, ledger: &'l ProofLedger) -> Self {
        Self {
            domain,
            ledger,
            recommendations: Vec::new(),
        }
    }

    /// Numeric output of a recorded proof
    pub fn output_f64(&self, id: ProofId) -> Result<f64, EngineError> {
        self.ledger
            .get(id)?
            .output
            .as_f64()
            .ok_or(EngineError::ProofOutput { id, expected: "a number" })
    }

    /// Numeric field of a recorded proof's object output
    pub fn output_field_f64(&self, id: ProofId, field: &'static str) -> Result<f64, EngineError> {
        self.ledger
            .get(id)?
            .output
            .get(field)
            .and_then(|value| value.as_f64())
            .ok_or(EngineError::ProofOutput { id, expected: field })
    }

    /// Text output of a recorded proof
    pub fn output_str(&self, id: ProofId) -> Result<&'l str, EngineError> {
        self.ledger
            .get(id)?
            .output
            .as_str()
            .ok_or(EngineError::ProofOutput { id, expected: "a string" })
    }

    /// Validate and append a recommendation
    pub fn push(
        &mut self,
        builder: RecommendationBuilder,
        topic: Topic,
        quality: EvidenceQuality,
    ) -> Result<(), EngineError> {
        let confidence = require_confidence(self.domain, topic, quality)?;
        let recommendation = builder.build(confidence, self.ledger)?;
        tracing::debug!(
            title = %recommendation.title,
            confidence,
            refs = recommendation.proof_refs.len(),
            "assembled recommendation"
        );
        self.recommendations.push(recommendation);
        Ok(())
    }

    /// Recommendations in push order
    pub fn finish(self) -> Vec<Recommendation> {
        self.recommendations
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuppa_domain::{ProofDraft, ProofKind};

    #[test]
    fn test_reads_outputs_back() {
        let mut ledger = ProofLedger::new();
        let number = ledger.add(ProofDraft::new(ProofKind::Equation, "n", "n").output(96.4));
        let tag = ledger.add(ProofDraft::new(ProofKind::Equation, "t", "t").output("stable"));
        let loss = ledger.add(
            ProofDraft::new(ProofKind::Equation, "l", "l").output(serde_json::json!({ "loss_c": 3.5 })),
        );

        let assembler = Assembler::new(Domain::Roast, &ledger);
        assert_eq!(assembler.output_f64(number).unwrap(), 96.4);
        assert_eq!(assembler.output_str(tag).unwrap(), "stable");
        assert_eq!(assembler.output_field_f64(loss, "loss_c").unwrap(), 3.5);
        assert!(matches!(
            assembler.output_f64(tag),
            Err(EngineError::ProofOutput { expected: "a number", .. })
        ));
        assert!(matches!(
            assembler.output_field_f64(number, "loss_c"),
            Err(EngineError::ProofOutput { expected: "loss_c", .. })
        ));
        assert!(matches!(
            assembler.output_f64(ProofId::from_sequence(9)),
            Err(EngineError::Ledger(_))
        ));
    }

    #[test]
    fn test_push_uses_table_confidence() {
        let mut ledger = ProofLedger::new();
        let id = ledger.add(ProofDraft::new(ProofKind::Equation, "x", "x"));

        let mut assembler = Assembler::new(Domain::Brew, &ledger);
        assembler
            .push(
                Recommendation::builder("EY").cite(id),
                Topic::ExtractionYield,
                EvidenceQuality::Measured,
            )
            .unwrap();
        let recs = assembler.finish();
        assert_eq!(recs[0].confidence, 0.93);
    }

    #[test]
    fn test_missing_table_row() {
        let mut ledger = ProofLedger::new();
        let id = ledger.add(ProofDraft::new(ProofKind::Equation, "x", "x"));

        let mut assembler = Assembler::new(Domain::Brew, &ledger);
        let err = assembler
            .push(Recommendation::builder("dev").cite(id), Topic::Development, EvidenceQuality::Assumed)
            .unwrap_err();
        assert!(matches!(
            err,
            EngineError::Assembly(cuppa_domain::AssemblyError::MissingConfidence { .. })
        ));
    }
}
