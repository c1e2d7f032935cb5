//! Farm input records: context, cherry lot, fermentation and drying plans

use serde::Serialize;

/// Where and how the coffee is grown
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FarmContext {
    /// Farm name
    pub farm_name: String,
    /// Location
    pub location: String,
    /// Altitude (m)
    pub altitude_m: Option<f64>,
    /// Average temperature (C)
    pub avg_temp_c: Option<f64>,
    /// Relative humidity (%)
    pub humidity_percent: Option<f64>,
    /// Rainfall (mm/week)
    pub rainfall_mm_week: Option<f64>,
    /// Shade cover (%)
    pub shade_percent: Option<f64>,
    /// Soil notes
    pub soil_notes: String,
    /// Variety
    pub variety: String,
    /// Harvest month
    pub harvest_month: String,
    /// Free-form notes
    pub notes: String,
}

/// A harvested cherry lot
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CherryLot {
    /// Lot identifier
    pub lot_id: String,
    /// Harvest date (YYYY-MM-DD)
    pub harvest_date: String,
    /// Share of fully ripe cherries (%)
    pub ripeness_percent: Option<f64>,
    /// Cherry Brix
    pub brix: Option<f64>,
    /// Share of floaters (%)
    pub floaters_percent: Option<f64>,
    /// Defect notes
    pub defects_notes: String,
    /// Lot weight (kg)
    pub weight_kg: Option<f64>,
}

/// Planned fermentation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FermentationPlan {
    /// Process name (anaerobic_natural, anaerobic_washed, honey, ...)
    pub process: String,
    /// Target cup profile
    pub target_profile: String,
    /// Vessel (tank, barrel, bag)
    pub vessel: String,
    /// Inoculation (wild, yeast, lacto, mixed)
    pub inoculation: String,
    /// Target tank temperature (C)
    pub target_temp_c: Option<f64>,
    /// Target duration (h)
    pub target_hours: Option<f64>,
    /// Oxygen control (sealed, airlock, semi)
    pub oxygen_control: String,
    /// Agitation (none, gentle, periodic)
    pub agitation: String,
    /// Free-form notes
    pub notes: String,
}

impl Default for FermentationPlan {
    fn default() -> Self {
        Self {
            process: "anaerobic_natural".to_string(),
            target_profile: "red_berry".to_string(),
            vessel: "tank".to_string(),
            inoculation: "wild".to_string(),
            target_temp_c: None,
            target_hours: None,
            oxygen_control: "sealed".to_string(),
            agitation: "none".to_string(),
            notes: String::new(),
        }
    }
}

/// One fermentation log reading
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FermentationLog {
    /// Hours since the tank was closed
    pub time_h: f64,
    /// Tank temperature (C)
    pub temp_c: Option<f64>,
    /// pH
    pub ph: Option<f64>,
    /// Brix
    pub brix: Option<f64>,
    /// Smell notes
    pub smell_notes: String,
    /// Visual notes
    pub visual_notes: String,
}

/// Planned drying
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DryingPlan {
    /// Method (raised_bed, patio, solar_dome)
    pub method: String,
    /// Target moisture (%)
    pub target_moisture_percent: f64,
    /// Target water activity
    pub target_aw: Option<f64>,
    /// Layer depth (cm)
    pub layer_cm: Option<f64>,
    /// Turns per day
    pub turn_per_day: Option<u32>,
    /// Whether shade drying is used
    pub shade_dry: bool,
    /// Free-form notes
    pub notes: String,
}

impl Default for DryingPlan {
    fn default() -> Self {
        Self {
            method: "raised_bed".to_string(),
            target_moisture_percent: 11.0,
            target_aw: None,
            layer_cm: None,
            turn_per_day: None,
            shade_dry: true,
            notes: String::new(),
        }
    }
}
