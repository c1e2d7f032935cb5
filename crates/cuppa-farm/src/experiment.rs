//! Field experiment template
//!
//! Same cherry lot, split into three temperature conditions, measured with
//! simple signals. Meant for farms partnering with schools or universities.

use serde::Serialize;

/// A controlled field experiment design
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Experiment {
    /// Experiment code
    pub name: &'static str,
    /// What the experiment tests
    pub hypothesis: &'static str,
    /// Held constant across groups
    pub variables_controlled: Vec<&'static str>,
    /// Varied between groups
    pub variables_changed: Vec<&'static str>,
    /// Readings to take
    pub measurement_plan: Vec<&'static str>,
    /// What counts as success
    pub success_criteria: Vec<&'static str>,
    /// Group code and condition, in group order
    pub sample_groups: Vec<SampleGroup>,
}

/// One experimental group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleGroup {
    /// Group code
    pub code: &'static str,
    /// Condition
    pub condition: &'static str,
}

/// Red-fruit anaerobic natural temperature experiment
pub fn red_fruit_anaerobic() -> Experiment {
    Experiment {
        name: "CUPPA-AN-RED-001",
        hypothesis: "Temperature control in anaerobic natural shifts ester expression toward red berry \
                     while reducing volatile acidity risk.",
        variables_controlled: vec![
            "same_lot",
            "same_vessel_type",
            "same_fill_ratio",
            "same_sealing_method",
            "same_drying_method",
        ],
        variables_changed: vec!["target_temp_c"],
        measurement_plan: vec![
            "temp log every 6h",
            "smell notes (structured: fruity/floral/solvent/vinegar)",
            "pH every 12h (if possible)",
            "brix start & end (if possible)",
            "cupping notes after resting (internal panel)",
        ],
        success_criteria: vec![
            "red berry aroma up",
            "no vinegar/solvent notes",
            "clean finish",
            "stable drying (no mold/off notes)",
        ],
        sample_groups: vec![
            SampleGroup {
                code: "G1",
                condition: "18-19C (cool control)",
            },
            SampleGroup {
                code: "G2",
                condition: "21-23C (target window)",
            },
            SampleGroup {
                code: "G3",
                condition: "26-27C (warm edge)",
            },
        ],
    }
}
