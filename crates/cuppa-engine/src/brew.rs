//! Brew analysis

use crate::assembler::Assembler;
use crate::EngineError;
use cuppa_domain::{
    AnalysisReport, AxiomKey, BrewInputs, Domain, EvidenceQuality, ProofDraft, ProofKind, ProofLedger,
    Recommendation, require_confidence, Topic,
};
use cuppa_gatekeeper::{refusal_report, requirements, GateVerdict, RefusalGuidance};
use cuppa_physics::brew::{
    boiling_point_c_at_altitude, contact_time_hint, extraction_yield_percent, thermal_loss_estimate_c, ContactTime,
    SEA_LEVEL_BOILING_POINT_C,
};
use serde_json::{json, Map};

const REFUSAL: RefusalGuidance = RefusalGuidance {
    summary: "Not enough data for a responsible physical conclusion (the system will not guess).",
    title: "More data needed for a no-guess analysis",
    steps: &[
        "Measure or enter the inputs listed under missing inputs",
        "With a refractometer, add TDS% and beverage weight to compute EY%",
        "With a probe, measure the slurry temperature to confirm the thermal loss",
    ],
    why: &[
        "Brewing is an energy and mass transfer problem; guessing the main variables leaves physics behind",
        "A system that does not guess builds skills that carry over to every bean and every environment",
    ],
};

const SUMMARY: &str = "Brew analysis:\n\
- The system does not guess when data is missing\n\
- Measurements (slurry, TDS) raise accuracy sharply\n\
- Core: brewing = energy + mass transfer under constraints";

const BP_UNCERTAINTY: &str = "rule-of-thumb; pressure/humidity not included";

/// Analyze one brew
pub(crate) fn analyze(inputs: &BrewInputs) -> Result<AnalysisReport, EngineError> {
    let mut ledger = ProofLedger::new();
    let axiom = ledger.cite_axiom(
        AxiomKey::NoGuessing,
        AxiomKey::NoGuessing.axiom().statement,
        Map::new(),
    );

    if let GateVerdict::Refuse { missing } = requirements::brew().evaluate(inputs) {
        let confidence = require_confidence(Domain::Brew, Topic::Refusal, EvidenceQuality::Measured)?;
        return Ok(refusal_report(ledger, axiom, missing, &REFUSAL, confidence)?);
    }

    let kettle = required(inputs.kettle_temp_c, "kettle_temp_c")?;
    let room = required(inputs.room_temp_c, "room_temp_c")?;
    let preheated = inputs.brewer_preheated.ok_or(EngineError::UngatedInput("brewer_preheated"))?;
    let method = inputs.method.as_str();

    // Boiling point
    let (bp, bp_kind, bp_uncertainty) = match inputs.altitude_m {
        Some(altitude) => (boiling_point_c_at_altitude(altitude), ProofKind::Equation, Some(BP_UNCERTAINTY)),
        None => (
            SEA_LEVEL_BOILING_POINT_C,
            ProofKind::Assumption,
            Some("altitude not supplied; sea level assumed"),
        ),
    };
    let p_bp = ledger.add(
        ProofDraft::new(
            bp_kind,
            "boiling point changes with altitude, shifting the max brew temperature ceiling",
            "boiling_point_c_at_altitude",
        )
        .input("altitude_m", inputs.altitude_m)
        .output(bp)
        .uncertainty_if(bp_uncertainty),
    );

    // Thermal loss
    let loss = thermal_loss_estimate_c(kettle, room, preheated, &inputs.method);
    let p_loss = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "slurry temperature is typically lower than kettle temperature due to thermal loss",
            "thermal_loss_estimate_c",
        )
        .input("kettle_temp_c", kettle)
        .input("room_temp_c", room)
        .input("brewer_preheated", preheated)
        .input("method", method)
        .output(json!({ "loss_c": loss.loss_c, "slurry_peak_est_c": loss.slurry_peak_c }))
        .notes("This is a proxy. Use a slurry probe to turn the proxy into a measurement.")
        .uncertainty("heuristic model"),
    );

    // Slurry temperature: measured beats estimated
    let (slurry_kind, slurry_c, slurry_quality) = match inputs.slurry_temp_c {
        Some(measured) => (ProofKind::Measurement, measured, EvidenceQuality::Measured),
        None => (ProofKind::Assumption, loss.slurry_peak_c, EvidenceQuality::Estimated),
    };
    let p_slurry = ledger.add(
        ProofDraft::new(slurry_kind, "slurry temperature used for reasoning", "slurry_temp_c")
            .input("slurry_temp_c", inputs.slurry_temp_c)
            .input("slurry_peak_est_c", loss.slurry_peak_c)
            .output(slurry_c)
            .notes("Measured beats estimated.")
            .uncertainty_if(inputs.slurry_temp_c.is_none().then_some("estimated")),
    );

    // Contact time
    let contact = contact_time_hint(&inputs.method, inputs.total_time_s);
    let p_time = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "contact time category influences extraction tendency",
            "contact_time_hint",
        )
        .input("method", method)
        .input("total_time_s", inputs.total_time_s)
        .output(contact.as_str()),
    );

    // Extraction yield, only when every term was measured
    let p_ey = match (inputs.tds_percent, inputs.beverage_g, inputs.dose_g) {
        (Some(tds), Some(beverage), Some(dose)) => {
            let ey = extraction_yield_percent(tds, beverage, dose)?;
            Some(
                ledger.add(
                    ProofDraft::new(
                        ProofKind::Equation,
                        "Extraction Yield can be computed from TDS, beverage mass, and dose",
                        "extraction_yield_percent",
                    )
                    .input("tds_percent", tds)
                    .input("beverage_g", beverage)
                    .input("dose_g", dose)
                    .output(ey),
                ),
            )
        }
        _ => None,
    };

    // Kettle ceiling
    let p_cap = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "kettle temperature cannot exceed local boiling point ceiling",
            "min(kettle, boiling_point)",
        )
        .input("kettle_temp_c", kettle)
        .input("boiling_point_c", bp)
        .output(kettle.min(bp))
        .uncertainty_if(bp_uncertainty),
    );

    let mut assembler = Assembler::new(Domain::Brew, &ledger);

    let boiling = assembler.output_f64(p_bp)?;
    let ceiling = assembler.output_f64(p_cap)?;
    let loss_c = assembler.output_field_f64(p_loss, "loss_c")?;
    let slurry = assembler.output_f64(p_slurry)?;
    let slurry_step = match inputs.slurry_temp_c {
        Some(_) => format!(
            "Slurry measured at {slurry:.1}C (model loss ~{loss_c:.1}C): adjust the kettle until the slurry sits at your target"
        ),
        None => format!(
            "Expected slurry peak ~{slurry:.1}C (estimated loss ~{loss_c:.1}C); to stop guessing, probe the slurry and adjust the kettle until it hits target"
        ),
    };
    assembler.push(
        Recommendation::builder("Temperature: tune by the slurry, not the kettle display")
            .step(format!(
                "Set the kettle close to the reachable ceiling: ~{ceiling:.1}C (boiling point ~{boiling:.1}C at this altitude)"
            ))
            .step(slurry_step)
            .why("Physically, the slurry temperature works on the grounds, not the number on the kettle")
            .why("Tuning by slurry compensates the thermal loss of your actual setup")
            .measure([
                "slurry_temp_c (if you have a probe)",
                "kettle_temp_c (measured)",
                "room_temp_c / preheat state",
            ])
            .cite_all([p_bp, p_loss, p_slurry, p_cap]),
        Topic::Temperature,
        slurry_quality,
    )?;

    let (steps, why) = match contact {
        ContactTime::Short => (
            vec![
                "If the cup is thin, sharply sour or lacks sweetness: extend contact time a little (slow the pour or grind slightly finer)",
                "Change one variable at a time to see cause and effect",
            ],
            vec!["Short contact raises under-extraction risk, especially for dense beans"],
        ),
        ContactTime::Long => (
            vec![
                "If the cup is astringent, bitter or dry: shorten contact time a little (faster flow or slightly coarser grind)",
                "Check for channeling or pours that over-extract some areas",
            ],
            vec!["Long contact raises over-extraction risk (depends on temperature and grind size)"],
        ),
        ContactTime::Normal => (
            vec!["If the taste is still off: adjust one variable (grind, temperature, ratio) at a time and log the result"],
            vec!["With time in the normal zone, other variables usually decide the cup"],
        ),
        ContactTime::NoTimeMeasurement => (
            vec![
                "Time the brew from first water to end of drawdown and enter total_time_s",
                "Until then, keep grind and pour fixed so the next timed brew is comparable",
            ],
            vec!["Without a measured time there is no contact category to steer from"],
        ),
        ContactTime::UnknownMethod => (
            vec![
                "Log total time per brew for this method and note how the cup tastes",
                "Build your own short/normal/long band from those logs before steering by time",
            ],
            vec!["No reference contact band is known for this method, so time cannot be classified yet"],
        ),
    };
    assembler.push(
        Recommendation::builder("Contact time: the visible lever (small, precise adjustments)")
            .steps(steps)
            .reasons(why)
            .measure(["total_time_s", "dose_g", "water_g", "pour / flow consistency"])
            .cite(p_time),
        Topic::ContactTime,
        EvidenceQuality::Measured,
    )?;

    if let Some(p_ey) = p_ey {
        let ey = assembler.output_f64(p_ey)?;
        assembler.push(
            Recommendation::builder("Extraction yield: a compass against guessing")
                .step(format!("Current EY ~{ey:.1}%"))
                .step("Set your own target EY range per bean and profile, then steer with grind, time and slurry")
                .step("Never use EY alone: always taste alongside it (EY just removes guessing)")
                .why("EY grounds extraction discussions in data rather than belief")
                .measure(["tds_percent", "beverage_g", "dose_g"])
                .cite(p_ey),
            Topic::ExtractionYield,
            EvidenceQuality::Measured,
        )?;
    }

    let recommendations = assembler.finish();
    tracing::info!(
        method,
        contact = contact.as_str(),
        proofs = ledger.len(),
        recommendations = recommendations.len(),
        "brew analysis complete"
    );

    Ok(AnalysisReport {
        summary: SUMMARY.to_string(),
        recommendations,
        missing_inputs: Vec::new(),
        proof_ledger: ledger.into_snapshot(),
    })
}

/// A gated value, present by construction
pub(crate) fn required(value: Option<f64>, field: &'static str) -> Result<f64, EngineError> {
    value.ok_or(EngineError::UngatedInput(field))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_complete_inputs_cite_only_recorded_proofs(
            dose in 5.0f64..40.0,
            water in 30.0f64..600.0,
            kettle in 80.0f64..100.0,
            room in 5.0f64..40.0,
            preheated: bool,
            time in 10.0f64..600.0,
            altitude in proptest::option::of(0.0f64..3000.0),
            tds in proptest::option::of(0.5f64..12.0),
            slurry in proptest::option::of(70.0f64..98.0),
        ) {
            let inputs = BrewInputs {
                dose_g: Some(dose),
                water_g: Some(water),
                beverage_g: Some(water * 0.9),
                kettle_temp_c: Some(kettle),
                room_temp_c: Some(room),
                brewer_preheated: Some(preheated),
                total_time_s: Some(time),
                altitude_m: altitude,
                tds_percent: tds,
                slurry_temp_c: slurry,
                ..Default::default()
            };
            let report = analyze(&inputs).unwrap();

            prop_assert!(report.missing_inputs.is_empty());
            prop_assert_eq!(report.recommendations.len(), if tds.is_some() { 3 } else { 2 });
            for rec in &report.recommendations {
                prop_assert!(!rec.proof_refs.is_empty());
                for id in &rec.proof_refs {
                    prop_assert!(report.proof_ledger.get(*id).is_some());
                }
            }
        }
    }
}
