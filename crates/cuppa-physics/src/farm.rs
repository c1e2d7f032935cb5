//! Farm-side heuristics: raw-material ceiling, fermentation window, drying SOP
//!
//! These are conservative field triage rules, not lab results.

use cuppa_domain::{DryingPlan, FermentationLog};

/// Quality ceiling a cherry lot can reach
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Ceiling {
    /// Process is a risk amplifier
    Low,
    /// Process must be conservative
    Medium,
    /// Raw material supports an ambitious process
    High,
}

impl Ceiling {
    /// Ceiling tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Ceiling::Low => "low",
            Ceiling::Medium => "medium",
            Ceiling::High => "high",
        }
    }
}

/// Classify the raw-material ceiling
///
/// Starts at high. Any of `brix < 18`, `ripeness < 75`, `floaters > 8` drops
/// it to medium; any of `brix < 16`, `ripeness < 60`, `floaters > 15` drops
/// it to low.
pub fn classify_ceiling(brix: f64, ripeness_percent: f64, floaters_percent: f64) -> Ceiling {
    if brix < 16.0 || ripeness_percent < 60.0 || floaters_percent > 15.0 {
        Ceiling::Low
    } else if brix < 18.0 || ripeness_percent < 75.0 || floaters_percent > 8.0 {
        Ceiling::Medium
    } else {
        Ceiling::High
    }
}

/// Tank temperature above which volatile acidity risk rises (C)
pub const FERMENTATION_HOT_OVER_C: f64 = 28.0;
/// Tank temperature below which the fruit profile stalls (C)
pub const FERMENTATION_COLD_UNDER_C: f64 = 18.0;
/// Ester-friendly target window for a red-berry profile (C)
pub const RED_BERRY_WINDOW_C: (f64, f64) = (20.0, 24.0);

/// Fermentation temperature risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FermentationRisk {
    /// Above the hot threshold
    TooHot,
    /// Below the cold threshold
    TooCold,
}

impl FermentationRisk {
    /// Human-readable description
    pub fn describe(&self) -> &'static str {
        match self {
            FermentationRisk::TooHot => "High tank temperature: acetic, vinegar or sharp solvent notes are likely",
            FermentationRisk::TooCold => "Low tank temperature: fruit aromatics may not develop and the profile stays flat",
        }
    }
}

/// Temperature risks for a target tank temperature
pub fn fermentation_risks(target_temp_c: f64) -> Vec<FermentationRisk> {
    let mut risks = Vec::new();
    if target_temp_c > FERMENTATION_HOT_OVER_C {
        risks.push(FermentationRisk::TooHot);
    }
    if target_temp_c < FERMENTATION_COLD_UNDER_C {
        risks.push(FermentationRisk::TooCold);
    }
    risks
}

/// Fields to monitor during fermentation
///
/// Temperature and smell always; pH and Brix once any log carries them.
pub fn monitoring_plan(logs: &[FermentationLog]) -> Vec<&'static str> {
    let mut monitor = vec!["temp_c", "smell_notes"];
    if logs.iter().any(|l| l.ph.is_some()) {
        monitor.push("ph");
    }
    if logs.iter().any(|l| l.brix.is_some()) {
        monitor.push("brix");
    }
    monitor
}

/// Conservative stop rules for an anaerobic fermentation
pub const STOP_RULES: [&str; 3] = [
    "If the smell turns sharp like vinegar or thinner, stop and move to drying immediately",
    "If tank temperature spikes out of control, vent, reduce the load or move the tank somewhere cooler",
    "If pH (when measured) drops unusually fast, over-fermentation is likely; stop earlier",
];

/// Readings to take next during drying
pub const DRYING_MEASURE_NEXT: [&str; 3] = ["moisture_percent", "humidity_percent", "bean_temp"];

/// Drying SOP for a plan
///
/// Raised beds get the four-step bed routine; other methods get the shared
/// principle. Every plan ends with the moisture target and the two airflow
/// checks.
pub fn drying_sop(plan: &DryingPlan) -> Vec<String> {
    let mut sop: Vec<String> = if plan.method == "raised_bed" {
        vec![
            "Raise the beds so air moves above and below".to_string(),
            "Keep layers at 2-4 cm, thinner at first to avoid heat build-up".to_string(),
            "Turn regularly, at least 6-10 times a day for the first 3 days".to_string(),
            "Shade-dry at midday so strong sun does not strip aromatics".to_string(),
        ]
    } else {
        vec!["Same principles: control layer depth and turning, and protect from rain and dew".to_string()]
    };

    sop.push(format!(
        "Target moisture ~{:.1}% (with a real meter reading)",
        plan.target_moisture_percent
    ));
    sop.push("Separate day and night handling; dew protection matters".to_string());
    sop.push("Any musty or moldy smell means airflow is still not enough".to_string());
    sop
}
