//! Input records for brew, roast and green bean analysis
//!
//! Records are immutable values built once by the caller. Every quantity is an
//! `Option`: `None` means "not measured" and is never treated as zero.

use serde::{Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Brewing method
///
/// Parsing never fails: unrecognized names are kept as [`BrewMethod::Other`]
/// so downstream classification can report `unknown_method` instead of guessing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum BrewMethod {
    /// Pour-over / filter
    #[default]
    Pourover,
    /// Full immersion (French press, cupping)
    Immersion,
    /// Espresso
    Espresso,
    /// Anything else, lowercased
    Other(String),
}

impl BrewMethod {
    /// Get the method name as a string
    pub fn as_str(&self) -> &str {
        match self {
            BrewMethod::Pourover => "pourover",
            BrewMethod::Immersion => "immersion",
            BrewMethod::Espresso => "espresso",
            BrewMethod::Other(name) => name,
        }
    }
}

impl FromStr for BrewMethod {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Ok(match name.as_str() {
            "pourover" => BrewMethod::Pourover,
            "immersion" => BrewMethod::Immersion,
            "espresso" => BrewMethod::Espresso,
            _ => BrewMethod::Other(name),
        })
    }
}

impl fmt::Display for BrewMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for BrewMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// One brew, as measured
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BrewInputs {
    /// Brewing method
    pub method: BrewMethod,
    /// Coffee dose (g)
    pub dose_g: Option<f64>,
    /// Brew water (g)
    pub water_g: Option<f64>,
    /// Beverage mass (g)
    pub beverage_g: Option<f64>,
    /// Descriptive grind setting
    pub grind_setting: Option<String>,
    /// Water temperature used (C)
    pub kettle_temp_c: Option<f64>,
    /// Room temperature (C)
    pub room_temp_c: Option<f64>,
    /// Whether the brewer was pre-heated
    pub brewer_preheated: Option<bool>,
    /// Whether a bloom phase was used
    pub bloom: Option<bool>,
    /// Total contact time (s)
    pub total_time_s: Option<f64>,
    /// Altitude (m)
    pub altitude_m: Option<f64>,
    /// Beverage TDS (%), e.g. 1.35
    pub tds_percent: Option<f64>,
    /// Measured slurry temperature (C)
    pub slurry_temp_c: Option<f64>,
    /// Free-form notes
    pub notes: String,
}

/// One roast batch, as logged
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RoastInputs {
    /// Bean name
    pub bean: String,
    /// Batch size (g)
    pub batch_g: Option<f64>,
    /// Green density proxy (g/ml)
    pub density_g_ml: Option<f64>,
    /// Charge temperature (C)
    pub charge_temp_c: Option<f64>,
    /// Drop bean temperature (C)
    pub end_temp_c: Option<f64>,
    /// Development time after first crack (s)
    pub dev_time_s: Option<f64>,
    /// Total roast time (s)
    pub total_time_s: Option<f64>,
    /// Rate of rise at the end of the roast (C/min)
    pub ror_c_per_min: Option<f64>,
    /// Variance of the rate-of-rise curve
    pub ror_variance: Option<f64>,
    /// Number of airflow changes during the roast
    pub airflow_changes: Option<u32>,
    /// Environment notes
    pub environment: String,
    /// Free-form notes
    pub notes: String,
}

/// One green bean lot and its storage
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GreenBeanInputs {
    /// Bean name
    pub bean: String,
    /// Origin
    pub origin: String,
    /// Processing (washed / natural / honey / anaerobic)
    pub process: String,
    /// Moisture content (%)
    pub moisture_percent: Option<f64>,
    /// Water activity (aW)
    pub aw: Option<f64>,
    /// Density (g/ml)
    pub density_g_ml: Option<f64>,
    /// Screen size
    pub screen: Option<u32>,
    /// Storage temperature (C)
    pub storage_temp_c: Option<f64>,
    /// Storage relative humidity (%)
    pub storage_rh_percent: Option<f64>,
    /// Whether bags sit directly on the floor
    pub bag_on_floor: Option<bool>,
    /// Whether the store room is ventilated
    pub ventilation_ok: Option<bool>,
    /// Free-form notes
    pub notes: String,
}
