//! Roast analysis

use crate::assembler::Assembler;
use crate::brew::required;
use crate::EngineError;
use cuppa_domain::{
    AnalysisReport, AxiomKey, Domain, EvidenceQuality, ProofDraft, ProofKind, ProofLedger, Recommendation,
    RoastInputs, require_confidence, Topic,
};
use cuppa_gatekeeper::{refusal_report, requirements, GateVerdict, RefusalGuidance};
use cuppa_physics::roast::{
    development_ratio, roast_risk, roast_stability_index, thermal_momentum, RoastRisk, HIGH_MOMENTUM,
    LONG_DEVELOPMENT_RATIO, LOW_MOMENTUM, SHORT_DEVELOPMENT_RATIO,
};
use serde_json::{json, Map};

const REFUSAL: RefusalGuidance = RefusalGuidance {
    summary: "Not enough roast data for a responsible physical conclusion (the system will not guess).",
    title: "More data needed for a no-guess roast analysis",
    steps: &[
        "Log the inputs listed under missing inputs",
        "Export the Artisan curve to derive total time, end RoR and RoR variance",
    ],
    why: &["Roasting is energy transfer into a changing mass; without the curve every conclusion is a guess"],
};

const SUMMARY: &str = "Roast analysis:\n\
- The system does not guess when data is missing\n\
- Momentum and development are read together, never alone\n\
- Core: roasting = energy accumulation into a changing mass";

/// Analyze one roast batch
pub(crate) fn analyze(inputs: &RoastInputs) -> Result<AnalysisReport, EngineError> {
    let mut ledger = ProofLedger::new();
    let axiom = ledger.cite_axiom(
        AxiomKey::NoGuessing,
        AxiomKey::NoGuessing.axiom().statement,
        Map::new(),
    );

    if let GateVerdict::Refuse { missing } = requirements::roast().evaluate(inputs) {
        let confidence = require_confidence(Domain::Roast, Topic::Refusal, EvidenceQuality::Measured)?;
        return Ok(refusal_report(ledger, axiom, missing, &REFUSAL, confidence)?);
    }

    let batch = required(inputs.batch_g, "batch_g")?;
    let ror = required(inputs.ror_c_per_min, "ror_c_per_min")?;
    let dev = required(inputs.dev_time_s, "dev_time_s")?;
    let total = required(inputs.total_time_s, "total_time_s")?;

    let momentum = thermal_momentum(ror, batch);
    let momentum_quality = if inputs.density_g_ml.is_some() {
        EvidenceQuality::Measured
    } else {
        EvidenceQuality::Estimated
    };
    let p_momentum = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "thermal momentum is the rate of energy accumulation; high late momentum means overshoot risk",
            "thermal_momentum",
        )
        .input("ror_c_per_min", ror)
        .input("batch_g", batch)
        .input("density_g_ml", inputs.density_g_ml)
        .output(momentum)
        .uncertainty_if(
            inputs
                .density_g_ml
                .is_none()
                .then_some("density not supplied; bean-specific heat uptake not accounted for"),
        ),
    );

    let ratio = development_ratio(dev, total)?;
    let p_ratio = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "development time as a share of total roast time",
            "development_ratio",
        )
        .input("dev_time_s", dev)
        .input("total_time_s", total)
        .output(ratio),
    );

    let p_risk = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "momentum and development ratio together flag baked or underdeveloped roasts",
            "roast_risk",
        )
        .input("thermal_momentum", momentum)
        .input("development_ratio", ratio)
        .output(roast_risk(momentum, ratio).as_str())
        .notes(format!(
            "baked_flat: momentum > {HIGH_MOMENTUM} and ratio > {LONG_DEVELOPMENT_RATIO}; \
             underdeveloped: momentum < {LOW_MOMENTUM} and ratio < {SHORT_DEVELOPMENT_RATIO}"
        ))
        .uncertainty("heuristic thresholds"),
    );

    let p_rsi = match (inputs.ror_variance, inputs.airflow_changes) {
        (Some(variance), Some(changes)) => Some(
            ledger.add(
                ProofDraft::new(
                    ProofKind::Equation,
                    "erratic RoR and frequent airflow changes lower roast stability",
                    "roast_stability_index",
                )
                .input("ror_variance", variance)
                .input("airflow_changes", changes)
                .output(roast_stability_index(variance, changes)),
            ),
        ),
        _ => None,
    };

    let mut assembler = Assembler::new(Domain::Roast, &ledger);

    let ratio = assembler.output_f64(p_ratio)?;
    let risk = RoastRisk::from_tag(assembler.output_str(p_risk)?).ok_or(EngineError::ProofOutput {
        id: p_risk,
        expected: "a roast risk tag",
    })?;
    let development = Recommendation::builder("Development window: read the ratio with the momentum")
        .step(format!(
            "Development ratio ~{:.1}% ({dev:.0}s of {total:.0}s)",
            ratio * 100.0
        ));
    let development = match risk {
        RoastRisk::BakedFlat => development
            .step("Shorten development: drop earlier or cut heat before first crack")
            .step("Lower the RoR into first crack so momentum does not carry the roast")
            .why("High momentum through a long development bakes out sweetness and acidity"),
        RoastRisk::Underdeveloped => development
            .step("Extend development slightly after first crack")
            .step("Carry a little more energy into first crack")
            .why("Low momentum with a short development leaves grassy, sour notes"),
        RoastRisk::Stable => development
            .step("Keep the profile and change one variable at a time")
            .why("Momentum and development are balanced; tasting decides the next move"),
    };
    assembler.push(
        development
            .measure(["dev_time_s", "total_time_s", "first crack time"])
            .cite_all([p_ratio, p_risk]),
        Topic::Development,
        EvidenceQuality::Measured,
    )?;

    let momentum = assembler.output_f64(p_momentum)?;
    let control_step = if momentum > HIGH_MOMENTUM {
        "Ease the heat before first crack to avoid overshoot"
    } else if momentum < LOW_MOMENTUM {
        "Hold more energy into the late roast; the batch may stall"
    } else {
        "Momentum is in the working band; keep the energy curve smooth"
    };
    assembler.push(
        Recommendation::builder("Momentum control: steer energy, not just temperature")
            .step(format!(
                "Thermal momentum ~{momentum:.2} (RoR {ror:.1}C/min x {:.2} kg)",
                batch / 1000.0
            ))
            .step(control_step)
            .why("Momentum is the rate of energy accumulation; high momentum late in the roast means overshoot risk")
            .measure(["ror_c_per_min", "batch_g", "density_g_ml"])
            .cite(p_momentum),
        Topic::Momentum,
        momentum_quality,
    )?;

    if let Some(p_rsi) = p_rsi {
        let rsi = assembler.output_f64(p_rsi)?;
        let next = if rsi < 0.5 {
            "Reduce airflow changes and smooth the RoR curve before judging the profile"
        } else {
            "The curve is stable enough to compare against cupping results"
        };
        assembler.push(
            Recommendation::builder("Stability: a calm curve makes every change readable")
                .step(format!("Roast stability index {rsi:.2} (1 = stable, 0 = chaotic)"))
                .step(next)
                .why("Erratic RoR and frequent airflow changes hide the effect of any single adjustment")
                .measure(["ror_variance", "airflow_changes"])
                .cite(p_rsi),
            Topic::Stability,
            EvidenceQuality::Measured,
        )?;
    }

    let recommendations = assembler.finish();
    tracing::info!(
        bean = %inputs.bean,
        risk = risk.as_str(),
        proofs = ledger.len(),
        recommendations = recommendations.len(),
        "roast analysis complete"
    );

    Ok(AnalysisReport {
        summary: SUMMARY.to_string(),
        recommendations,
        missing_inputs: Vec::new(),
        proof_ledger: ledger.into_snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_roast() -> RoastInputs {
        RoastInputs {
            bean: "Ethiopia Guji".to_string(),
            batch_g: Some(150.0),
            ror_c_per_min: Some(10.0),
            dev_time_s: Some(150.0),
            total_time_s: Some(600.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_baked_flat_roast() {
        let report = analyze(&logged_roast()).unwrap();
        assert!(report.missing_inputs.is_empty());
        assert_eq!(report.recommendations.len(), 2);
        assert!(report.proof_ledger.proofs()[3].output == json!("baked_flat_risk"));
        assert!(report.recommendations[0].steps[1].starts_with("Shorten development"));
    }

    #[test]
    fn test_development_steps_follow_recorded_risk() {
        let report = analyze(&RoastInputs {
            batch_g: Some(100.0),
            ror_c_per_min: Some(4.0),
            dev_time_s: Some(60.0),
            total_time_s: Some(600.0),
            ..logged_roast()
        })
        .unwrap();
        let risk = &report.proof_ledger.proofs()[3];
        assert_eq!(risk.output, json!("underdeveloped_risk"));
        assert!(report.recommendations[0].proof_refs.contains(&risk.id));
        assert!(report.recommendations[0].steps[1].starts_with("Extend development"));
    }

    #[test]
    fn test_momentum_confidence_depends_on_density() {
        let estimated = analyze(&logged_roast()).unwrap();
        let measured = analyze(&RoastInputs {
            density_g_ml: Some(0.72),
            ..logged_roast()
        })
        .unwrap();
        assert_eq!(estimated.recommendations[1].confidence, 0.62);
        assert_eq!(measured.recommendations[1].confidence, 0.74);
    }

    #[test]
    fn test_stability_only_with_both_inputs() {
        let partial = analyze(&RoastInputs {
            ror_variance: Some(0.3),
            ..logged_roast()
        })
        .unwrap();
        assert_eq!(partial.recommendations.len(), 2);

        let full = analyze(&RoastInputs {
            ror_variance: Some(0.3),
            airflow_changes: Some(1),
            ..logged_roast()
        })
        .unwrap();
        assert_eq!(full.recommendations.len(), 3);
        assert_eq!(full.recommendations[2].proof_refs.len(), 1);
    }

    #[test]
    fn test_zero_total_time_is_an_error() {
        let err = analyze(&RoastInputs {
            total_time_s: Some(0.0),
            ..logged_roast()
        })
        .unwrap_err();
        assert!(matches!(err, EngineError::Physics(_)));
    }

    #[test]
    fn test_refusal() {
        let report = analyze(&RoastInputs::default()).unwrap();
        assert_eq!(report.missing_inputs.len(), 4);
        assert_eq!(report.recommendations.len(), 1);
        assert_eq!(report.proof_ledger.len(), 1);
    }
}
