//! Drying SOP
//!
//! Drying is mass transfer: slow enough to keep aromatics, fast enough to
//! avoid mold. No measurement gate beyond the plan itself.

use cuppa_domain::{AxiomKey, DryingPlan, ProofId, ProofLedger};
use cuppa_physics::farm::{drying_sop, DRYING_MEASURE_NEXT};
use serde_json::Map;

/// Accepted drying advice
#[derive(Debug, Clone, PartialEq)]
pub struct DryingAdvice {
    /// Procedure lines
    pub sop: Vec<String>,
    /// Readings to take next
    pub measure_next: Vec<String>,
}

/// The drying stage: always produces advice
#[derive(Debug, Clone, PartialEq)]
pub struct DryingStage {
    /// Stage axiom proof
    pub axiom: ProofId,
    /// The SOP for the plan
    pub advice: DryingAdvice,
}

/// Build the drying SOP for a plan
pub fn plan_drying(plan: &DryingPlan, ledger: &mut ProofLedger) -> DryingStage {
    let mut inputs = Map::new();
    inputs.insert("method".to_string(), plan.method.clone().into());
    inputs.insert(
        "target_moisture_percent".to_string(),
        plan.target_moisture_percent.into(),
    );
    let axiom = ledger.cite_axiom(
        AxiomKey::EnergyTransfer,
        "Drying is mass transfer; rate must balance aroma preservation and mold risk.",
        inputs,
    );

    DryingStage {
        axiom,
        advice: DryingAdvice {
            sop: drying_sop(plan),
            measure_next: DRYING_MEASURE_NEXT.iter().map(|m| m.to_string()).collect(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drying_always_advises() {
        let mut ledger = ProofLedger::new();
        let stage = plan_drying(&DryingPlan::default(), &mut ledger);
        assert!(!stage.advice.sop.is_empty());
        assert_eq!(stage.advice.measure_next.len(), DRYING_MEASURE_NEXT.len());
        assert_eq!(ledger.get(stage.axiom).unwrap().basis, "energy_transfer");
    }
}
