//! Integration tests for cuppa-farm
//!
//! These tests run the full three-stage pipeline through FarmerAgent.

use cuppa_domain::{
    CherryLot, DryingPlan, FarmContext, FarmStage, FermentationLog, FermentationPlan, ProofKind,
};
use cuppa_farm::FarmerAgent;

fn farm() -> FarmContext {
    FarmContext {
        farm_name: "Doi Chang Demo".to_string(),
        ..Default::default()
    }
}

fn lot(brix: Option<f64>, ripeness: Option<f64>, floaters: Option<f64>) -> CherryLot {
    CherryLot {
        lot_id: "L-2026-01".to_string(),
        harvest_date: "2026-01-15".to_string(),
        brix,
        ripeness_percent: ripeness,
        floaters_percent: floaters,
        ..Default::default()
    }
}

fn plan(target_temp_c: Option<f64>, target_hours: Option<f64>) -> FermentationPlan {
    FermentationPlan {
        target_temp_c,
        target_hours,
        ..Default::default()
    }
}

#[test]
fn test_triage_refusal_short_circuits() {
    let report = FarmerAgent::new()
        .run(
            &farm(),
            &lot(None, Some(85.0), None),
            &plan(Some(22.0), Some(72.0)),
            &[],
            &DryingPlan::default(),
        )
        .unwrap();

    assert_eq!(report.halted_at, Some(FarmStage::RawMaterial));
    assert_eq!(report.what_to_measure_next, vec!["brix", "floaters_percent"]);
    assert_eq!(report.confidence, 0.90);
    assert!(!report.sop.iter().any(|line| line.contains("Drying SOP")));
    assert!(!report.proof_ledger.has_basis("measurement"));
    assert!(!report.proof_ledger.has_basis("energy_transfer"));

    let cited: Vec<_> = report
        .proof_refs
        .iter()
        .map(|id| report.proof_ledger.get(*id).unwrap())
        .collect();
    assert_eq!(cited.len(), 2);
    assert!(cited.iter().all(|proof| proof.kind == ProofKind::Axiom));
    assert_eq!(cited[0].basis, "no_guessing");
    assert_eq!(cited[1].basis, "constraints");
}

#[test]
fn test_fermentation_refusal() {
    let report = FarmerAgent::new()
        .run(
            &farm(),
            &lot(Some(19.0), Some(85.0), Some(4.0)),
            &plan(None, None),
            &[],
            &DryingPlan::default(),
        )
        .unwrap();

    assert_eq!(report.halted_at, Some(FarmStage::Fermentation));
    assert_eq!(report.what_to_measure_next, vec!["target_temp_c", "target_hours"]);
    assert_eq!(report.confidence, 0.86);
    assert!(report.summary.contains("ceiling high"));
    assert!(!report.proof_ledger.has_basis("energy_transfer"));
    let bases: Vec<_> = report
        .proof_refs
        .iter()
        .map(|id| report.proof_ledger.get(*id).unwrap().basis.as_str())
        .collect();
    assert_eq!(bases, vec!["no_guessing", "measurement"]);
}

#[test]
fn test_full_run_high_ceiling() {
    let logs = vec![
        FermentationLog {
            time_h: 0.0,
            temp_c: Some(21.5),
            brix: Some(20.0),
            ..Default::default()
        },
        FermentationLog {
            time_h: 6.0,
            temp_c: Some(22.4),
            ..Default::default()
        },
    ];
    let report = FarmerAgent::new()
        .run(
            &farm(),
            &lot(Some(20.0), Some(90.0), Some(2.0)),
            &plan(Some(22.0), Some(72.0)),
            &logs,
            &DryingPlan::default(),
        )
        .unwrap();

    assert!(!report.is_refusal());
    assert_eq!(report.confidence, 0.90);
    assert_eq!(report.action_now.len(), 6);
    assert_eq!(report.risks.len(), 1);
    assert_eq!(
        report.what_to_measure_next,
        vec!["bean_temp", "brix", "humidity_percent", "moisture_percent", "smell_notes", "temp_c"]
    );
    assert_eq!(report.sop[0], "== Fermentation Stop Rules ==");
    assert_eq!(report.sop[4], "== Drying SOP ==");
    assert_eq!(report.sop.len(), 12);

    for id in &report.proof_refs {
        assert!(report.proof_ledger.get(*id).is_some());
    }
    assert_eq!(report.proof_ledger.proofs()[0].basis, "no_guessing");
    assert_eq!(report.proof_refs.len(), 6);
    assert_eq!(report.proof_refs[0], report.proof_ledger.proofs()[0].id);
}

#[test]
fn test_capped_plan_has_lower_confidence() {
    let report = FarmerAgent::new()
        .run(
            &farm(),
            &lot(Some(15.0), Some(50.0), Some(20.0)),
            &plan(Some(30.0), Some(48.0)),
            &[],
            &DryingPlan {
                method: "patio".to_string(),
                ..Default::default()
            },
        )
        .unwrap();

    assert_eq!(report.confidence, 0.82);
    assert!(report.summary.contains("ceiling = low"));
    assert_eq!(report.risks.len(), 2);
}
