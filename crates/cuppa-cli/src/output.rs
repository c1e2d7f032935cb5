//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use cuppa_domain::{AnalysisReport, Axiom, FarmerReport, LedgerSnapshot, ProofId, Recommendation};
use cuppa_farm::experiment::Experiment;
use serde_json::Value;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

#[derive(Debug, Clone, Copy)]
enum Tone {
    Heading,
    Good,
    Caution,
    Alert,
    Muted,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self { format, color_enabled }
    }

    /// Format a brew, roast or green bean report.
    pub fn format_analysis(&self, report: &AnalysisReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => Ok(self.analysis_text(report)),
            OutputFormat::Table => Ok(self.analysis_table(report)),
        }
    }

    /// Format a farmer mode report.
    pub fn format_farm(&self, report: &FarmerReport) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            OutputFormat::Text => Ok(self.farm_text(report)),
            OutputFormat::Table => Ok(self.farm_table(report)),
        }
    }

    /// Format the axiom codex.
    pub fn format_codex(&self, axioms: &[Axiom]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(axioms)?),
            OutputFormat::Text => Ok(axioms
                .iter()
                .map(|axiom| format!("{}: {}", self.colorize(axiom.key, Tone::Heading), axiom.statement))
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Key", "Statement", "Notes"]);
                for axiom in axioms {
                    builder.push_record([axiom.key, axiom.statement, axiom.notes]);
                }
                Ok(render(builder))
            }
        }
    }

    /// Format a field experiment design.
    pub fn format_experiment(&self, experiment: &Experiment) -> Result<String> {
        if let OutputFormat::Json = self.format {
            return Ok(serde_json::to_string_pretty(experiment)?);
        }

        let mut out = vec![
            self.colorize(experiment.name, Tone::Heading),
            format!("Hypothesis: {}", experiment.hypothesis),
        ];
        let sections: [(&str, &[&str]); 4] = [
            ("Controlled", &experiment.variables_controlled),
            ("Changed", &experiment.variables_changed),
            ("Measurement plan", &experiment.measurement_plan),
            ("Success criteria", &experiment.success_criteria),
        ];

        match self.format {
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Section", "Items"]);
                for (name, items) in sections {
                    builder.push_record([name.to_string(), items.join("\n")]);
                }
                out.push(render(builder));

                let mut groups = Builder::default();
                groups.push_record(["Group", "Condition"]);
                for group in &experiment.sample_groups {
                    groups.push_record([group.code, group.condition]);
                }
                out.push(render(groups));
            }
            _ => {
                for (name, items) in sections {
                    out.push(String::new());
                    out.push(self.section(name, items.iter()));
                }
                out.push(String::new());
                out.push(self.section(
                    "Sample groups",
                    experiment
                        .sample_groups
                        .iter()
                        .map(|group| format!("{}: {}", group.code, group.condition)),
                ));
            }
        }

        Ok(out.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), Tone::Good)
    }

    fn analysis_text(&self, report: &AnalysisReport) -> String {
        let mut out = vec![report.summary.clone()];

        if report.is_refusal() {
            out.push(String::new());
            out.push(self.section_with_tone("Missing inputs", report.missing_inputs.iter(), Tone::Caution));
        }

        out.push(String::new());
        out.push(self.colorize("Recommendations:", Tone::Heading));
        for (i, rec) in report.recommendations.iter().enumerate() {
            out.push(String::new());
            out.push(self.recommendation_text(i + 1, rec));
        }

        out.join("\n")
    }

    fn recommendation_text(&self, number: usize, rec: &Recommendation) -> String {
        let confidence = self.colorize(&format!("confidence={:.2}", rec.confidence), confidence_tone(rec.confidence));
        let mut lines = vec![format!("{number}) {} ({confidence})", rec.title)];
        lines.extend(rec.steps.iter().map(|step| format!("   - {step}")));
        if !rec.why.is_empty() {
            lines.push("   why:".to_string());
            lines.extend(rec.why.iter().map(|reason| format!("     - {reason}")));
        }
        if !rec.what_to_measure.is_empty() {
            lines.push("   measure:".to_string());
            lines.extend(rec.what_to_measure.iter().map(|item| format!("     • {item}")));
        }
        lines.push(self.colorize(&format!("   proofs: {}", join_ids(&rec.proof_refs)), Tone::Muted));
        lines.join("\n")
    }

    fn analysis_table(&self, report: &AnalysisReport) -> String {
        let mut out = vec![report.summary.clone()];

        if report.is_refusal() {
            out.push(self.section_with_tone("Missing inputs", report.missing_inputs.iter(), Tone::Caution));
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Recommendation", "Steps", "Confidence", "Proofs"]);
        for (i, rec) in report.recommendations.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                rec.title.clone(),
                rec.steps.join("\n"),
                format!("{:.2}", rec.confidence),
                join_ids(&rec.proof_refs),
            ]);
        }
        out.push(render(builder));
        out.push(ledger_table(&report.proof_ledger));

        out.join("\n")
    }

    fn farm_text(&self, report: &FarmerReport) -> String {
        let mut out = vec![report.summary.clone(), String::new()];

        let confidence = self.colorize(&format!("{:.2}", report.confidence), confidence_tone(report.confidence));
        match report.halted_at {
            Some(stage) => out.push(format!(
                "Confidence: {confidence}  {}",
                self.colorize(&format!("halted at {}", stage.as_str()), Tone::Caution)
            )),
            None => out.push(format!("Confidence: {confidence}")),
        }

        for (name, items) in [
            ("ACTION NOW", &report.action_now),
            ("RISKS", &report.risks),
            ("MEASURE NEXT", &report.what_to_measure_next),
            ("SOP", &report.sop),
        ] {
            out.push(String::new());
            out.push(self.section(name, items.iter()));
        }

        out.push(String::new());
        out.push(self.colorize(&format!("proofs: {}", join_ids(&report.proof_refs)), Tone::Muted));
        out.join("\n")
    }

    fn farm_table(&self, report: &FarmerReport) -> String {
        let mut builder = Builder::default();
        builder.push_record(["Section", "Items"]);
        builder.push_record(["Confidence".to_string(), format!("{:.2}", report.confidence)]);
        if let Some(stage) = report.halted_at {
            builder.push_record(["Halted at", stage.as_str()]);
        }
        for (name, items) in [
            ("Action now", &report.action_now),
            ("Risks", &report.risks),
            ("Measure next", &report.what_to_measure_next),
            ("SOP", &report.sop),
        ] {
            builder.push_record([name.to_string(), items.join("\n")]);
        }
        builder.push_record(["Proofs".to_string(), join_ids(&report.proof_refs)]);

        [report.summary.clone(), render(builder), ledger_table(&report.proof_ledger)].join("\n")
    }

    fn section<I, S>(&self, name: &str, items: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        self.section_with_tone(name, items, Tone::Heading)
    }

    fn section_with_tone<I, S>(&self, name: &str, items: I, tone: Tone) -> String
    where
        I: IntoIterator<Item = S>,
        S: std::fmt::Display,
    {
        let mut lines = vec![self.colorize(&format!("{name}:"), tone)];
        lines.extend(items.into_iter().map(|item| format!("- {item}")));
        if lines.len() == 1 {
            lines.push(self.colorize("- (none)", Tone::Muted));
        }
        lines.join("\n")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, tone: Tone) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match tone {
            Tone::Heading => text.cyan().bold().to_string(),
            Tone::Good => text.green().to_string(),
            Tone::Caution => text.yellow().to_string(),
            Tone::Alert => text.red().to_string(),
            Tone::Muted => text.dimmed().to_string(),
        }
    }
}

fn confidence_tone(confidence: f64) -> Tone {
    if confidence >= 0.85 {
        Tone::Good
    } else if confidence >= 0.70 {
        Tone::Caution
    } else {
        Tone::Alert
    }
}

fn ledger_table(ledger: &LedgerSnapshot) -> String {
    let mut builder = Builder::default();
    builder.push_record(["ID", "Kind", "Basis", "Output", "Uncertainty"]);
    for proof in ledger.proofs() {
        builder.push_record([
            proof.id.to_string(),
            proof.kind.as_str().to_string(),
            proof.basis.clone(),
            display_value(&proof.output),
            proof.uncertainty.clone().unwrap_or_default(),
        ]);
    }
    render(builder)
}

fn render(builder: Builder) -> String {
    let mut table = builder.build();
    table
        .with(Style::rounded())
        .with(Modify::new(Rows::first()).with(Alignment::center()));
    table.to_string()
}

fn join_ids(ids: &[ProofId]) -> String {
    ids.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

/// Strings unquoted, numbers trimmed to 3 decimals, objects as compact JSON
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() => format!("{}", (f * 1000.0).round() / 1000.0),
            _ => n.to_string(),
        },
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cuppa_domain::{AxiomRegistry, BrewInputs, CherryLot, DryingPlan, FarmContext, FermentationPlan};
    use cuppa_engine::CoffeeEngine;
    use cuppa_farm::FarmerAgent;
    use serde_json::json;

    fn brew_report(kettle: Option<f64>) -> AnalysisReport {
        CoffeeEngine::default_config()
            .analyze_brew(&BrewInputs {
                dose_g: Some(18.0),
                water_g: Some(300.0),
                kettle_temp_c: kettle,
                room_temp_c: Some(26.0),
                brewer_preheated: Some(true),
                total_time_s: Some(210.0),
                ..Default::default()
            })
            .unwrap()
    }

    fn farm_report(brix: Option<f64>) -> FarmerReport {
        FarmerAgent::new()
            .run(
                &FarmContext::default(),
                &CherryLot {
                    lot_id: "L1".to_string(),
                    brix,
                    ripeness_percent: Some(90.0),
                    floaters_percent: Some(2.0),
                    ..Default::default()
                },
                &FermentationPlan {
                    target_temp_c: Some(22.0),
                    target_hours: Some(72.0),
                    ..Default::default()
                },
                &[],
                &DryingPlan::default(),
            )
            .unwrap()
    }

    #[test]
    fn test_analysis_text() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_analysis(&brew_report(Some(96.0))).unwrap();
        assert!(output.contains("1) Temperature"));
        assert!(output.contains("proofs: P0002, P0003, P0004, P0006"));
        assert!(!output.contains("Missing inputs"));
    }

    #[test]
    fn test_refusal_text_lists_missing_inputs() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_analysis(&brew_report(None)).unwrap();
        assert!(output.contains("Missing inputs:\n- kettle_temp_c"));
        assert!(output.contains("proofs: P0001"));
    }

    #[test]
    fn test_analysis_table() {
        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = formatter.format_analysis(&brew_report(Some(96.0))).unwrap();
        assert!(output.contains("Recommendation"));
        assert!(output.contains("Uncertainty"));
        assert!(output.contains("no_guessing"));
    }

    #[test]
    fn test_analysis_json_is_the_report() {
        let formatter = Formatter::new(OutputFormat::Json, false);
        let value: Value = serde_json::from_str(&formatter.format_analysis(&brew_report(Some(96.0))).unwrap()).unwrap();
        assert_eq!(value["missing_inputs"], json!([]));
        assert_eq!(value["proof_ledger"]["P0001"]["kind"], "axiom");
        assert_eq!(value["recommendations"].as_array().map(Vec::len), Some(2));
    }

    #[test]
    fn test_farm_text_sections() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_farm(&farm_report(Some(20.0))).unwrap();
        for heading in ["ACTION NOW:", "RISKS:", "MEASURE NEXT:", "SOP:"] {
            assert!(output.contains(heading), "missing {heading}");
        }
        assert!(!output.contains("halted at"));
    }

    #[test]
    fn test_farm_halt_is_shown() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        let output = formatter.format_farm(&farm_report(None)).unwrap();
        assert!(output.contains("halted at raw_material"));

        let table = Formatter::new(OutputFormat::Table, false)
            .format_farm(&farm_report(None))
            .unwrap();
        assert!(table.contains("Halted at"));
    }

    #[test]
    fn test_codex_formats() {
        let axioms = AxiomRegistry::global().axioms();
        let text = Formatter::new(OutputFormat::Text, false).format_codex(axioms).unwrap();
        assert_eq!(text.lines().count(), axioms.len());
        assert!(text.contains("no_guessing: "));

        let json: Value = serde_json::from_str(
            &Formatter::new(OutputFormat::Json, false).format_codex(axioms).unwrap(),
        )
        .unwrap();
        assert_eq!(json.as_array().map(Vec::len), Some(axioms.len()));
    }

    #[test]
    fn test_experiment_text() {
        let experiment = cuppa_farm::experiment::red_fruit_anaerobic();
        let output = Formatter::new(OutputFormat::Text, false)
            .format_experiment(&experiment)
            .unwrap();
        assert!(output.starts_with("CUPPA-AN-RED-001"));
        assert!(output.contains("Sample groups:"));
    }

    #[test]
    fn test_display_value() {
        assert_eq!(display_value(&json!("medium")), "medium");
        assert_eq!(display_value(&json!(96.123456)), "96.123");
        assert_eq!(display_value(&json!(3)), "3");
        assert_eq!(display_value(&json!(null)), "null");
    }

    #[test]
    fn test_colorize_disabled() {
        let formatter = Formatter::new(OutputFormat::Text, false);
        assert_eq!(formatter.success("test"), "✓ test");
    }
}
