//! Fermentation plan check (anaerobic natural, red-berry target)
//!
//! Aims for an ester-friendly window while keeping acetic risk down.

use crate::stage::{Stage, StageOutcome};
use crate::FarmError;
use cuppa_domain::{AxiomKey, CherryLot, FermentationLog, FermentationPlan, ProofDraft, ProofId, ProofKind, ProofLedger};
use cuppa_gatekeeper::{requirements, FermentationCheck, GateVerdict};
use cuppa_physics::farm::{
    fermentation_risks, monitoring_plan, FERMENTATION_COLD_UNDER_C, FERMENTATION_HOT_OVER_C, RED_BERRY_WINDOW_C,
    STOP_RULES,
};
use serde_json::{json, Map};

/// Accepted fermentation advice
#[derive(Debug, Clone, PartialEq)]
pub struct FermentationAdvice {
    /// Actions to take now
    pub actions: Vec<String>,
    /// Fields to log during fermentation
    pub monitor: Vec<String>,
    /// Conditions that end fermentation early
    pub stop_rules: Vec<String>,
    /// Temperature risks of the plan
    pub risks: Vec<String>,
    /// Temperature window proof
    pub proof: ProofId,
}

/// Gate the plan and derive actions, monitoring and stop rules
pub fn check_plan(
    lot: &CherryLot,
    plan: &FermentationPlan,
    logs: &[FermentationLog],
    ledger: &mut ProofLedger,
) -> Result<Stage<FermentationAdvice>, FarmError> {
    let mut inputs = Map::new();
    inputs.insert("brix".to_string(), lot.brix.into());
    inputs.insert("target_temp_c".to_string(), plan.target_temp_c.into());
    inputs.insert("target_hours".to_string(), plan.target_hours.into());
    let axiom = ledger.cite_axiom(
        AxiomKey::Measurement,
        "Fermentation is controlled biology under constraints; missing constraints => no safe prediction.",
        inputs,
    );

    let check = FermentationCheck { lot, plan };
    if let GateVerdict::Refuse { missing } = requirements::fermentation().evaluate(&check) {
        return Ok(Stage {
            axiom,
            outcome: StageOutcome::NeedsMeasurement { missing },
        });
    }
    let target_temp = plan.target_temp_c.ok_or(FarmError::UngatedInput("target_temp_c"))?;
    let target_hours = plan.target_hours.ok_or(FarmError::UngatedInput("target_hours"))?;

    let (window_low, window_high) = RED_BERRY_WINDOW_C;
    let proof = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "Safe temp window heuristic for ester vs acetic risk.",
            "fermentation_temp_window",
        )
        .input("target_temp_c", target_temp)
        .output(json!({
            "target_window": format!("{window_low}-{window_high}C"),
            "risk_high_temp": format!(">{FERMENTATION_HOT_OVER_C}C"),
            "risk_low_temp": format!("<{FERMENTATION_COLD_UNDER_C}C"),
        }))
        .uncertainty("depends on microbes, vessel, oxygen control"),
    );

    let actions = vec![
        format!(
            "Set the tank target to {target_temp:.1}C (hold {window_low}-{window_high}C for a clear red-berry profile)"
        ),
        format!("Plan {target_hours:.0} h, but stop on signals, not on the clock alone"),
        oxygen_action(&plan.oxygen_control),
        "Log every 6 h (temperature, smell, photo) so the process becomes your own asset".to_string(),
    ];

    Ok(Stage {
        axiom,
        outcome: StageOutcome::Accepted(FermentationAdvice {
            actions,
            monitor: monitoring_plan(logs).into_iter().map(str::to_string).collect(),
            stop_rules: STOP_RULES.iter().map(|rule| rule.to_string()).collect(),
            risks: fermentation_risks(target_temp)
                .iter()
                .map(|risk| risk.describe().to_string())
                .collect(),
            proof,
        }),
    })
}

/// Oxygen handling, worded by how tightly the vessel is controlled
fn oxygen_action(control: &str) -> String {
    match control.trim().to_ascii_lowercase().as_str() {
        "sealed" | "airlock" => {
            format!("Use a closed system ({control}) to limit oxygen and keep acetic bacteria in check")
        }
        "semi" => format!(
            "Oxygen control is partial ({control}): cover the tank and keep headspace small, acetic risk grows with exposure"
        ),
        _ => format!(
            "Oxygen is not controlled ({control}): move to a sealed tank or airlock, or shorten the run to limit acetic build-up"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lot() -> CherryLot {
        CherryLot {
            lot_id: "L1".to_string(),
            brix: Some(21.0),
            ..Default::default()
        }
    }

    fn plan(target_temp_c: Option<f64>) -> FermentationPlan {
        FermentationPlan {
            target_temp_c,
            target_hours: Some(72.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_accepted_plan_in_window() {
        let mut ledger = ProofLedger::new();
        let stage = check_plan(&lot(), &plan(Some(22.0)), &[], &mut ledger).unwrap();
        let StageOutcome::Accepted(advice) = stage.outcome else {
            panic!("expected acceptance");
        };
        assert!(advice.risks.is_empty());
        assert_eq!(advice.actions.len(), 4);
        assert_eq!(advice.stop_rules.len(), 3);
        assert_eq!(advice.monitor, vec!["temp_c", "smell_notes"]);
        assert_eq!(
            ledger.get(advice.proof).unwrap().output["target_window"],
            json!("20-24C")
        );
    }

    #[test]
    fn test_oxygen_action_follows_control_level() {
        let mut ledger = ProofLedger::new();
        let semi = FermentationPlan {
            oxygen_control: "semi".to_string(),
            ..plan(Some(22.0))
        };
        let StageOutcome::Accepted(advice) = check_plan(&lot(), &semi, &[], &mut ledger).unwrap().outcome else {
            panic!("expected acceptance");
        };
        assert!(advice.actions[2].starts_with("Oxygen control is partial (semi)"));
        assert!(!advice.actions.iter().any(|action| action.contains("closed system")));

        assert!(oxygen_action("sealed").starts_with("Use a closed system (sealed)"));
        assert!(oxygen_action("Airlock").contains("closed system"));
        assert!(oxygen_action("open").starts_with("Oxygen is not controlled (open)"));
    }

    #[test]
    fn test_hot_plan_flags_risk() {
        let mut ledger = ProofLedger::new();
        let stage = check_plan(&lot(), &plan(Some(30.0)), &[], &mut ledger).unwrap();
        let StageOutcome::Accepted(advice) = stage.outcome else {
            panic!("expected acceptance");
        };
        assert_eq!(advice.risks.len(), 1);
        assert!(advice.risks[0].contains("acetic"));
    }

    #[test]
    fn test_logs_extend_monitoring() {
        let logs = vec![FermentationLog {
            time_h: 12.0,
            temp_c: Some(22.5),
            ph: Some(4.6),
            ..Default::default()
        }];
        let mut ledger = ProofLedger::new();
        let stage = check_plan(&lot(), &plan(Some(22.0)), &logs, &mut ledger).unwrap();
        let StageOutcome::Accepted(advice) = stage.outcome else {
            panic!("expected acceptance");
        };
        assert_eq!(advice.monitor, vec!["temp_c", "smell_notes", "ph"]);
    }

    #[test]
    fn test_missing_target_temp() {
        let mut ledger = ProofLedger::new();
        let stage = check_plan(&lot(), &plan(None), &[], &mut ledger).unwrap();
        assert!(!stage.outcome.is_accepted());
        assert_eq!(
            stage.outcome,
            StageOutcome::NeedsMeasurement {
                missing: vec!["target_temp_c".to_string()]
            }
        );
        assert_eq!(ledger.len(), 1);
    }
}
