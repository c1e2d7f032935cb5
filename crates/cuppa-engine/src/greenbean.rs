//! Green bean analysis

use crate::assembler::Assembler;
use crate::brew::required;
use crate::{AnalysisConfig, EngineError};
use cuppa_domain::{
    AnalysisReport, AxiomKey, Domain, EvidenceQuality, GreenBeanInputs, ProofDraft, ProofKind, ProofLedger,
    Recommendation, require_confidence, Topic,
};
use cuppa_gatekeeper::{refusal_report, requirements, GateVerdict, RefusalGuidance};
use cuppa_physics::greenbean::{classify_aw, classify_moisture, storage_risk, AwClass, StorageRisk};
use serde_json::{json, Map};

const REFUSAL: RefusalGuidance = RefusalGuidance {
    summary: "Not enough green bean data for a responsible stability assessment (the system will not guess).",
    title: "More data needed for a no-guess green bean assessment",
    steps: &[
        "Measure moisture with a meter and water activity with an aW meter",
        "Record storage RH, bag placement and ventilation if you can",
    ],
    why: &["Moisture and water activity decide stability; appearance does not"],
};

const SUMMARY: &str = "Green bean analysis:\n\
- Moisture says how much water; water activity says how free it is\n\
- Storage decides how fast a good lot stops being good\n\
- Core: green stability = water under environmental constraints";

/// Analyze one green bean lot
pub(crate) fn analyze(inputs: &GreenBeanInputs, config: &AnalysisConfig) -> Result<AnalysisReport, EngineError> {
    let mut ledger = ProofLedger::new();
    let axiom = ledger.cite_axiom(
        AxiomKey::NoGuessing,
        AxiomKey::NoGuessing.axiom().statement,
        Map::new(),
    );

    if let GateVerdict::Refuse { missing } = requirements::green_bean().evaluate(inputs) {
        let confidence = require_confidence(Domain::GreenBean, Topic::Refusal, EvidenceQuality::Measured)?;
        return Ok(refusal_report(ledger, axiom, missing, &REFUSAL, confidence)?);
    }

    let moisture = required(inputs.moisture_percent, "moisture_percent")?;
    let aw = required(inputs.aw, "aw")?;

    let p_moisture = ledger.add(
        ProofDraft::new(ProofKind::Measurement, "moisture content as read by the meter", "moisture_percent")
            .input("moisture_percent", moisture)
            .output(moisture),
    );
    let p_aw = ledger.add(
        ProofDraft::new(ProofKind::Measurement, "water activity as read by the meter", "aw")
            .input("aw", aw)
            .output(aw),
    );

    let aw_class = classify_aw(aw, &config.aw);
    let p_aw_class = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "water activity bucket sets storage and aging risk",
            "classify_aw",
        )
        .input("aw", aw)
        .input("thresholds", json!(config.aw))
        .output(json!({
            "tag": aw_class.tag(),
            "meaning": aw_class.meaning(),
            "risk_vector": aw_class.risk_vector(),
        }))
        .uncertainty("reference windows, not absolute truth"),
    );

    let mc_class = classify_moisture(moisture, &config.moisture);
    let p_mc_class = ledger.add(
        ProofDraft::new(
            ProofKind::Equation,
            "moisture bucket against the common roaster working window",
            "classify_moisture",
        )
        .input("moisture_percent", moisture)
        .input("thresholds", json!(config.moisture))
        .output(json!({ "tag": mc_class.tag(), "meaning": mc_class.meaning() }))
        .uncertainty("reference windows, not absolute truth"),
    );

    let storage = storage_risk(inputs.storage_rh_percent, inputs.bag_on_floor, inputs.ventilation_ok);
    let (storage_kind, storage_quality) = if storage.has_data() {
        (ProofKind::Equation, EvidenceQuality::Measured)
    } else {
        (ProofKind::Assumption, EvidenceQuality::Assumed)
    };
    let p_storage = ledger.add(
        ProofDraft::new(
            storage_kind,
            "storage humidity and handling drive moisture uptake after drying",
            "storage_risk",
        )
        .input("storage_rh_percent", inputs.storage_rh_percent)
        .input("bag_on_floor", inputs.bag_on_floor)
        .input("ventilation_ok", inputs.ventilation_ok)
        .output(json!({ "risk": storage.risk.as_str(), "notes": storage.notes }))
        .uncertainty("rough heuristics"),
    );

    let mut assembler = Assembler::new(Domain::GreenBean, &ledger);

    let stability = Recommendation::builder("Moisture and water activity: stability before flavor")
        .step(format!("aW {aw:.2} -> {}: {}", aw_class.tag(), aw_class.meaning()))
        .step(format!(
            "Moisture {moisture:.1}% -> {}: {}",
            mc_class.tag(),
            mc_class.meaning()
        ));
    let stability = match aw_class {
        AwClass::Danger | AwClass::Caution => stability
            .step("Roast this lot first and do not hold it in long-term storage")
            .why("High water activity speeds aging and mold even when moisture looks fine"),
        AwClass::TooLow => stability
            .step("Expect faster heat uptake; start with a gentler charge")
            .why("Over-dried beans take heat quickly and can taste thin"),
        AwClass::SweetSpot | AwClass::Transition => stability
            .step("Re-measure aW monthly to catch drift early")
            .why("Water activity, not moisture alone, predicts shelf life"),
    };
    assembler.push(
        stability
            .reasons(aw_class.risk_vector().iter().map(|risk| format!("Risk vector: {risk}")))
            .measure(["moisture_percent", "aw", "density_g_ml"])
            .cite_all([p_moisture, p_aw, p_aw_class, p_mc_class]),
        Topic::MoistureActivity,
        EvidenceQuality::Measured,
    )?;

    let storage_steps = match storage.risk {
        StorageRisk::High => vec!["Move bags onto pallets, away from walls, and fix ventilation before anything else"],
        StorageRisk::Medium => vec!["Tighten airflow and bag placement; check RH weekly"],
        StorageRisk::Low if inputs.storage_rh_percent.is_none() => vec![
            "Keep the current storage routine and guard against container sweating",
            "Add a hygrometer reading of storage RH to confirm the low risk",
        ],
        StorageRisk::Low => vec!["Keep the current storage routine and guard against container sweating"],
        StorageRisk::Unknown => vec!["Log storage RH, bag placement and ventilation to assess the storage system"],
    };
    assembler.push(
        Recommendation::builder(format!("Storage system: risk {}", storage.risk.as_str()))
            .steps(storage_steps)
            .reasons(storage.notes.iter().cloned())
            .measure(["storage_rh_percent", "bag_on_floor", "ventilation_ok"])
            .cite(p_storage),
        Topic::Storage,
        storage_quality,
    )?;

    let recommendations = assembler.finish();
    tracing::info!(
        bean = %inputs.bean,
        aw_class = aw_class.tag(),
        moisture_class = mc_class.tag(),
        storage = storage.risk.as_str(),
        "green bean analysis complete"
    );

    Ok(AnalysisReport {
        summary: SUMMARY.to_string(),
        recommendations,
        missing_inputs: Vec::new(),
        proof_ledger: ledger.into_snapshot(),
    })
}
