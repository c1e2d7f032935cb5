//! Refusal report builder

use cuppa_domain::{AnalysisReport, AssemblyError, ProofId, ProofLedger, Recommendation};

/// Domain-specific wording for a refusal
#[derive(Debug, Clone, Copy)]
pub struct RefusalGuidance {
    /// Report summary
    pub summary: &'static str,
    /// Recommendation title
    pub title: &'static str,
    /// Steps, before the missing list is appended to `what_to_measure`
    pub steps: &'static [&'static str],
    /// Reasons
    pub why: &'static [&'static str],
}

/// Build the single-recommendation report for a refused analysis
///
/// The recommendation cites only `axiom_id`, and both `what_to_measure` and
/// `missing_inputs` carry the missing list.
pub fn refusal_report(
    ledger: ProofLedger,
    axiom_id: ProofId,
    missing: Vec<String>,
    guidance: &RefusalGuidance,
    confidence: f64,
) -> Result<AnalysisReport, AssemblyError> {
    let recommendation = Recommendation::builder(guidance.title)
        .steps(guidance.steps.iter().copied())
        .reasons(guidance.why.iter().copied())
        .measure(missing.iter().cloned())
        .cite(axiom_id)
        .build(confidence, &ledger)?;

    Ok(AnalysisReport {
        summary: guidance.summary.to_string(),
        recommendations: vec![recommendation],
        missing_inputs: missing,
        proof_ledger: ledger.into_snapshot(),
    })
}
