//! Raw-material triage
//!
//! Raw material sets the ceiling. A low ceiling turns fermentation into a
//! risk amplifier.

use crate::stage::{Stage, StageOutcome};
use crate::FarmError;
use cuppa_domain::{AxiomKey, CherryLot, FarmContext, ProofDraft, ProofId, ProofKind, ProofLedger};
use cuppa_gatekeeper::{requirements, GateVerdict};
use cuppa_physics::farm::{classify_ceiling, Ceiling};
use serde_json::Map;

/// Accepted triage result
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triage {
    /// Quality ceiling
    pub ceiling: Ceiling,
    /// Ceiling classification proof
    pub proof: ProofId,
}

/// Gate the lot measurements and classify the ceiling
pub fn assess_raw_material(
    farm: &FarmContext,
    lot: &CherryLot,
    ledger: &mut ProofLedger,
) -> Result<Stage<Triage>, FarmError> {
    let mut inputs = Map::new();
    inputs.insert("brix".to_string(), lot.brix.into());
    inputs.insert("ripeness_percent".to_string(), lot.ripeness_percent.into());
    inputs.insert("floaters_percent".to_string(), lot.floaters_percent.into());
    let axiom = ledger.cite_axiom(
        AxiomKey::Constraints,
        "Raw material quality sets the ceiling; process cannot exceed raw constraints.",
        inputs,
    );

    if let GateVerdict::Refuse { missing } = requirements::raw_material().evaluate(lot) {
        return Ok(Stage {
            axiom,
            outcome: StageOutcome::NeedsMeasurement { missing },
        });
    }
    let brix = lot.brix.ok_or(FarmError::UngatedInput("brix"))?;
    let ripeness = lot.ripeness_percent.ok_or(FarmError::UngatedInput("ripeness_percent"))?;
    let floaters = lot.floaters_percent.ok_or(FarmError::UngatedInput("floaters_percent"))?;

    let ceiling = classify_ceiling(brix, ripeness, floaters);
    let proof = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "Ceiling classification from Brix/ripeness/floaters (conservative triage).",
            "classify_ceiling",
        )
        .input("brix", brix)
        .input("ripeness_percent", ripeness)
        .input("floaters_percent", floaters)
        .output(ceiling.as_str())
        .uncertainty("field proxy (not lab cupping)"),
    );
    tracing::debug!(farm = %farm.farm_name, lot = %lot.lot_id, ceiling = ceiling.as_str(), "triage accepted");

    Ok(Stage {
        axiom,
        outcome: StageOutcome::Accepted(Triage { ceiling, proof }),
    })
}
