//! Farmer agent: three gated stages in sequence

use crate::drying::plan_drying;
use crate::fermentation::check_plan;
use crate::stage::StageOutcome;
use crate::triage::assess_raw_material;
use crate::FarmError;
use cuppa_domain::{
    require_confidence, AssemblyError, AxiomKey, CherryLot, Domain, DryingPlan, EvidenceQuality, FarmContext,
    FarmStage, FarmerReport, FermentationLog, FermentationPlan, ProofId, ProofLedger, Topic,
};
use cuppa_physics::farm::Ceiling;
use serde_json::{json, Map};
use std::collections::BTreeSet;

/// Fixed wording for a stage that needs measurements
struct HaltGuidance {
    stage: FarmStage,
    topic: Topic,
    actions: &'static [&'static str],
    risks: &'static [&'static str],
    sop: &'static [&'static str],
}

const RAW_MATERIAL_HALT: HaltGuidance = HaltGuidance {
    stage: FarmStage::RawMaterial,
    topic: Topic::RawMaterialRefusal,
    actions: &[
        "Measure Brix, % ripe and % floaters for this lot",
        "Photograph cherry sorting and ripeness as a baseline",
    ],
    risks: &["Skipping this step lets fermentation amplify defects instead of building fruit aromatics"],
    sop: &["Run a raw-material checklist before every process so the process becomes a long-term asset"],
};

const FERMENTATION_HALT: HaltGuidance = HaltGuidance {
    stage: FarmStage::Fermentation,
    topic: Topic::FermentationRefusal,
    actions: &[
        "Set target_temp_c and target_hours before filling the tank",
        "Prepare temperature control: cool room, ice, cover or a new tank position",
    ],
    risks: &["Fermenting without constraints risks sharp, vinegar or solvent notes"],
    sop: &["Set up a log every 6 h (temperature, smell, photo)"],
};

/// Runs raw-material triage, fermentation check and drying SOP
///
/// Stops at the first stage that needs measurements; the report then covers
/// only that stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct FarmerAgent;

impl FarmerAgent {
    /// Create an agent
    pub fn new() -> Self {
        Self
    }

    /// Run the pipeline for one lot
    pub fn run(
        &self,
        farm: &FarmContext,
        lot: &CherryLot,
        fermentation: &FermentationPlan,
        logs: &[FermentationLog],
        drying: &DryingPlan,
    ) -> Result<FarmerReport, FarmError> {
        let mut ledger = ProofLedger::new();
        let mut run_inputs = Map::new();
        run_inputs.insert("lot_id".to_string(), json!(lot.lot_id));
        let no_guessing = ledger.cite_axiom(
            AxiomKey::NoGuessing,
            AxiomKey::NoGuessing.axiom().statement,
            run_inputs,
        );

        let triage = assess_raw_material(farm, lot, &mut ledger)?;
        let triaged = match triage.outcome {
            StageOutcome::Accepted(triaged) => triaged,
            StageOutcome::NeedsMeasurement { missing } => {
                let summary = "Not enough to plan a no-guess process: measure the raw material first";
                return halt(ledger, [no_guessing, triage.axiom], summary.to_string(), missing, &RAW_MATERIAL_HALT);
            }
        };
        let ceiling = triaged.ceiling.as_str();

        let ferm = check_plan(lot, fermentation, logs, &mut ledger)?;
        let advice = match ferm.outcome {
            StageOutcome::Accepted(advice) => advice,
            StageOutcome::NeedsMeasurement { missing } => {
                let summary = format!("Raw material ceiling {ceiling}, but key fermentation variables are missing");
                return halt(ledger, [no_guessing, ferm.axiom], summary, missing, &FERMENTATION_HALT);
            }
        };

        let dry = plan_drying(drying, &mut ledger);
        let dried = dry.advice;

        let summary = format!(
            "Farmer mode: raw material ceiling = {ceiling}\n\
             This mode does not guess: every recommendation stands on measurements and constraints\n\
             The goal is a process you can repeat and teach"
        );

        let mut action_now = advice.actions;
        action_now.push("Start drying per the SOP; dew and airflow control come first".to_string());
        action_now.push(
            "Keep 200-300 g per group for cupping after rest (builds the farm's own database)".to_string(),
        );

        let mut risks = advice.risks;
        risks.push("Drying too hard lets fruit aromatics evaporate before quality is locked in".to_string());

        let what_to_measure_next: Vec<String> = advice
            .monitor
            .into_iter()
            .chain(dried.measure_next)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut sop = vec!["== Fermentation Stop Rules ==".to_string()];
        sop.extend(advice.stop_rules);
        sop.push("== Drying SOP ==".to_string());
        sop.extend(dried.sop);

        let topic = if triaged.ceiling == Ceiling::High {
            Topic::ProcessPlan
        } else {
            Topic::ProcessPlanCapped
        };
        let proof_refs = vec![
            no_guessing,
            triage.axiom,
            triaged.proof,
            ferm.axiom,
            advice.proof,
            dry.axiom,
        ];
        let confidence = confidence(topic)?;
        resolve(&ledger, &proof_refs)?;

        tracing::info!(
            lot = %lot.lot_id,
            ceiling,
            proofs = ledger.len(),
            "farm plan complete"
        );

        Ok(FarmerReport {
            summary,
            action_now,
            risks,
            what_to_measure_next,
            sop,
            confidence,
            proof_refs,
            halted_at: None,
            proof_ledger: ledger.into_snapshot(),
        })
    }
}

fn halt(
    ledger: ProofLedger,
    proof_refs: [ProofId; 2],
    summary: String,
    missing: Vec<String>,
    guidance: &HaltGuidance,
) -> Result<FarmerReport, FarmError> {
    let confidence = confidence(guidance.topic)?;
    resolve(&ledger, &proof_refs)?;
    tracing::warn!(stage = guidance.stage.as_str(), ?missing, "farm run halted");

    Ok(FarmerReport {
        summary,
        action_now: to_strings(guidance.actions),
        risks: to_strings(guidance.risks),
        what_to_measure_next: missing,
        sop: to_strings(guidance.sop),
        confidence,
        proof_refs: proof_refs.to_vec(),
        halted_at: Some(guidance.stage),
        proof_ledger: ledger.into_snapshot(),
    })
}

fn to_strings(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}

fn confidence(topic: Topic) -> Result<f64, AssemblyError> {
    require_confidence(Domain::Farm, topic, EvidenceQuality::Measured)
}

/// Every cited id must exist in the run's ledger
fn resolve(ledger: &ProofLedger, refs: &[ProofId]) -> Result<(), FarmError> {
    for id in refs {
        ledger.get(*id)?;
    }
    Ok(())
}
