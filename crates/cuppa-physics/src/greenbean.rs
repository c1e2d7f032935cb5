//! Green bean stability proxies
//!
//! Thresholds are reference windows used by many roasters, not absolute
//! truth, so they are configurable.

use serde::{Deserialize, Serialize};

/// Water activity thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AwThresholds {
    /// Lower edge of the sweet spot
    pub sweet_low: f64,
    /// Upper edge of the sweet spot
    pub sweet_high: f64,
    /// Lower edge of the caution band
    pub caution_low: f64,
    /// Upper edge of the caution band
    pub caution_high: f64,
    /// Above this is the danger zone
    pub danger_over: f64,
    /// Below this the bean is too dry
    pub too_low_under: f64,
}

impl Default for AwThresholds {
    fn default() -> Self {
        Self {
            sweet_low: 0.50,
            sweet_high: 0.57,
            caution_low: 0.58,
            caution_high: 0.62,
            danger_over: 0.62,
            too_low_under: 0.45,
        }
    }
}

/// Moisture content thresholds (%)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MoistureThresholds {
    /// Below this the bean is too dry
    pub low: f64,
    /// Lower edge of the working window
    pub good_low: f64,
    /// Upper edge of the working window
    pub good_high: f64,
    /// Above this the bean is too wet
    pub high: f64,
}

impl Default for MoistureThresholds {
    fn default() -> Self {
        Self {
            low: 9.0,
            good_low: 9.5,
            good_high: 11.5,
            high: 12.5,
        }
    }
}

/// Water activity class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AwClass {
    /// Over-dried
    TooLow,
    /// Stable storage window
    SweetSpot,
    /// Ages faster than it looks
    Caution,
    /// Mold and safety risk
    Danger,
    /// Between the sweet spot and caution
    Transition,
}

impl AwClass {
    /// Class tag
    pub fn tag(&self) -> &'static str {
        match self {
            AwClass::TooLow => "too_low",
            AwClass::SweetSpot => "sweet_spot",
            AwClass::Caution => "caution",
            AwClass::Danger => "danger",
            AwClass::Transition => "transition",
        }
    }

    /// What the class means for the lot
    pub fn meaning(&self) -> &'static str {
        match self {
            AwClass::TooLow => "Possibly over-dried; cell structure and vigor may be degraded",
            AwClass::SweetSpot => "High stability: water activity is low enough to slow aging and mold",
            AwClass::Caution => "Ages faster than it looks: still fine on the table, declining in the bag",
            AwClass::Danger => "High risk zone (mold / defects / food safety); act on storage now",
            AwClass::Transition => "Borderline: not bad, but increasingly sensitive to the environment",
        }
    }

    /// Risks the class points at
    pub fn risk_vector(&self) -> &'static [&'static str] {
        match self {
            AwClass::TooLow => &["thin cup", "reduced sweetness", "light body"],
            AwClass::SweetSpot => &["stable", "longer shelf life", "predictable roasting"],
            AwClass::Caution => &["aroma drop", "acidity drop", "short shelf life"],
            AwClass::Danger => &["mold", "baggy", "food safety"],
            AwClass::Transition => &["control the warehouse", "do not store long"],
        }
    }
}

/// Classify water activity
pub fn classify_aw(aw: f64, th: &AwThresholds) -> AwClass {
    if aw < th.too_low_under {
        AwClass::TooLow
    } else if (th.sweet_low..=th.sweet_high).contains(&aw) {
        AwClass::SweetSpot
    } else if (th.caution_low..=th.caution_high).contains(&aw) {
        AwClass::Caution
    } else if aw > th.danger_over {
        AwClass::Danger
    } else {
        AwClass::Transition
    }
}

/// Moisture class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoistureClass {
    /// Below the low threshold
    TooDry,
    /// Inside the working window
    Ok,
    /// Above the high threshold
    TooWet,
    /// Between a threshold and the working window
    Border,
}

impl MoistureClass {
    /// Class tag
    pub fn tag(&self) -> &'static str {
        match self {
            MoistureClass::TooDry => "too_dry",
            MoistureClass::Ok => "ok",
            MoistureClass::TooWet => "too_wet",
            MoistureClass::Border => "border",
        }
    }

    /// What the class means for the lot
    pub fn meaning(&self) -> &'static str {
        match self {
            MoistureClass::TooDry => "Very dry: risk of a thin cup and reduced vigor",
            MoistureClass::Ok => "Inside the working range of most roasteries",
            MoistureClass::TooWet => "Wet: mold risk and fast aging",
            MoistureClass::Border => "Borderline: read together with aW and storage",
        }
    }
}

/// Classify moisture content
pub fn classify_moisture(moisture_percent: f64, th: &MoistureThresholds) -> MoistureClass {
    if moisture_percent < th.low {
        MoistureClass::TooDry
    } else if (th.good_low..=th.good_high).contains(&moisture_percent) {
        MoistureClass::Ok
    } else if moisture_percent > th.high {
        MoistureClass::TooWet
    } else {
        MoistureClass::Border
    }
}

/// Storage risk level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StorageRisk {
    /// Not enough storage data
    Unknown,
    /// Low
    Low,
    /// Medium
    Medium,
    /// High
    High,
}

impl StorageRisk {
    /// Risk tag
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageRisk::Unknown => "unknown",
            StorageRisk::Low => "low",
            StorageRisk::Medium => "medium",
            StorageRisk::High => "high",
        }
    }
}

/// Storage assessment: level plus the notes that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct StorageAssessment {
    /// Overall risk
    pub risk: StorageRisk,
    /// Observations, in evaluation order
    pub notes: Vec<String>,
    /// Whether RH, bag placement or ventilation was supplied
    pub data_supplied: bool,
}

impl StorageAssessment {
    /// Whether any storage data was supplied
    pub fn has_data(&self) -> bool {
        self.data_supplied
    }
}

/// Assess storage conditions
///
/// A bag on the floor or poor ventilation escalates a known risk to high, or
/// an unknown one to medium. Placement and ventilation data that flag nothing
/// give a low risk.
pub fn storage_risk(
    storage_rh_percent: Option<f64>,
    bag_on_floor: Option<bool>,
    ventilation_ok: Option<bool>,
) -> StorageAssessment {
    if storage_rh_percent.is_none() && bag_on_floor.is_none() && ventilation_ok.is_none() {
        return StorageAssessment {
            risk: StorageRisk::Unknown,
            notes: vec!["No warehouse or air humidity data: the storage system cannot be assessed".to_string()],
            data_supplied: false,
        };
    }

    let mut risk = StorageRisk::Unknown;
    let mut notes = Vec::new();

    if let Some(rh) = storage_rh_percent {
        if rh >= 70.0 {
            notes.push("High RH: beans take up moisture from the air quickly, especially in rainy season or closed rooms".to_string());
            risk = StorageRisk::High;
        } else if rh >= 60.0 {
            notes.push("Medium-high RH: control airflow, floor and wall contact, and bag placement".to_string());
            risk = StorageRisk::Medium;
        } else {
            notes.push("Fairly low RH: moisture uptake risk is lower, but container sweating still needs guarding".to_string());
            risk = StorageRisk::Low;
        }
    }

    let escalate = |risk: StorageRisk| {
        if risk == StorageRisk::Unknown {
            StorageRisk::Medium
        } else {
            StorageRisk::High
        }
    };

    if bag_on_floor == Some(true) {
        notes.push("Bags on the floor: more moisture uptake and transfer from floor and walls".to_string());
        risk = escalate(risk);
    }

    if ventilation_ok == Some(false) {
        notes.push("Poor ventilation: container sweating, bag odor and moisture build-up become likely".to_string());
        risk = escalate(risk);
    }

    if risk == StorageRisk::Unknown {
        notes.push("No storage risk found in the supplied data (storage RH not logged)".to_string());
        risk = StorageRisk::Low;
    }

    StorageAssessment {
        risk,
        notes,
        data_supplied: true,
    }
}
