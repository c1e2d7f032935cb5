//! Brewing proxies

use crate::error::{positive, PhysicsError};
use cuppa_domain::BrewMethod;

/// Reference room temperature for the thermal loss correction (C)
pub const REFERENCE_ROOM_TEMP_C: f64 = 25.0;

/// Boiling point at sea level (C)
pub const SEA_LEVEL_BOILING_POINT_C: f64 = 100.0;

/// Boiling point drop per metre of altitude (C/m)
const BOILING_POINT_LAPSE_C_PER_M: f64 = 0.003;

/// Extra loss when the brewer was not pre-heated (C)
const NO_PREHEAT_PENALTY_C: f64 = 3.0;

/// Room correction slope (C of loss per C below reference)
const ROOM_CORRECTION_SLOPE: f64 = 0.08;

/// Bounds of the room correction (C)
const ROOM_CORRECTION_RANGE: (f64, f64) = (-1.0, 2.0);

/// Approximate boiling point at altitude
///
/// Rule of thumb: about -0.003 C per metre. Negative altitudes are treated as
/// sea level. Pressure and humidity are not modelled.
///
/// # Examples
///
/// ```
/// use cuppa_physics::brew::boiling_point_c_at_altitude;
///
/// assert_eq!(boiling_point_c_at_altitude(0.0), 100.0);
/// assert!(boiling_point_c_at_altitude(1200.0) < 100.0);
/// ```
pub fn boiling_point_c_at_altitude(altitude_m: f64) -> f64 {
    SEA_LEVEL_BOILING_POINT_C - BOILING_POINT_LAPSE_C_PER_M * altitude_m.max(0.0)
}

/// Estimated heat lost between kettle and slurry
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalLoss {
    /// Estimated loss (C)
    pub loss_c: f64,
    /// Kettle temperature minus the loss (C)
    pub slurry_peak_c: f64,
}

/// Base loss by method class (C): more surface and air exposure loses more
pub fn base_loss_c(method: &BrewMethod) -> f64 {
    match method {
        BrewMethod::Pourover => 6.5,
        BrewMethod::Immersion => 4.5,
        BrewMethod::Espresso | BrewMethod::Other(_) => 3.5,
    }
}

/// Heuristic thermal loss from kettle to slurry
///
/// `base(method) + 3.0 if not pre-heated + clamp((25 - room) * 0.08, -1, 2)`.
/// This is a proxy, not a measurement; a slurry probe replaces it.
pub fn thermal_loss_estimate_c(
    kettle_temp_c: f64,
    room_temp_c: f64,
    brewer_preheated: bool,
    method: &BrewMethod,
) -> ThermalLoss {
    let preheat_penalty = if brewer_preheated { 0.0 } else { NO_PREHEAT_PENALTY_C };
    let (low, high) = ROOM_CORRECTION_RANGE;
    let room_penalty = ((REFERENCE_ROOM_TEMP_C - room_temp_c) * ROOM_CORRECTION_SLOPE).clamp(low, high);
    let loss_c = base_loss_c(method) + preheat_penalty + room_penalty;

    ThermalLoss {
        loss_c,
        slurry_peak_c: kettle_temp_c - loss_c,
    }
}

/// Contact time category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactTime {
    /// Below the method's band
    Short,
    /// Inside the band
    Normal,
    /// Above the band
    Long,
    /// No time was supplied
    NoTimeMeasurement,
    /// No band is known for the method
    UnknownMethod,
}

impl ContactTime {
    /// Get the category tag
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactTime::Short => "short_contact",
            ContactTime::Normal => "normal_contact",
            ContactTime::Long => "long_contact",
            ContactTime::NoTimeMeasurement => "no_time_measurement",
            ContactTime::UnknownMethod => "unknown_method",
        }
    }
}

/// Inclusive normal-contact band (s)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactBand {
    /// Shortest normal time
    pub min_s: f64,
    /// Longest normal time
    pub max_s: f64,
}

/// Normal-contact band for a method
pub fn contact_band(method: &BrewMethod) -> Option<ContactBand> {
    let (min_s, max_s) = match method {
        BrewMethod::Pourover => (150.0, 270.0),
        BrewMethod::Immersion => (180.0, 360.0),
        BrewMethod::Espresso => (20.0, 35.0),
        BrewMethod::Other(_) => return None,
    };
    Some(ContactBand { min_s, max_s })
}

/// Classify total contact time against the method's band
pub fn contact_time_hint(method: &BrewMethod, total_time_s: Option<f64>) -> ContactTime {
    let Some(time_s) = total_time_s else {
        return ContactTime::NoTimeMeasurement;
    };
    let Some(band) = contact_band(method) else {
        return ContactTime::UnknownMethod;
    };

    if time_s < band.min_s {
        ContactTime::Short
    } else if time_s > band.max_s {
        ContactTime::Long
    } else {
        ContactTime::Normal
    }
}

/// Extraction yield (%)
///
/// `EY% = (tds% / 100) * (beverage_g / dose_g) * 100`
///
/// # Errors
///
/// [`PhysicsError::InvalidArgument`] if `dose_g <= 0` or `beverage_g <= 0`.
///
/// # Examples
///
/// ```
/// use cuppa_physics::brew::extraction_yield_percent;
///
/// let ey = extraction_yield_percent(1.35, 300.0, 18.0).unwrap();
/// assert!((ey - 22.5).abs() < 1e-9);
/// assert!(extraction_yield_percent(1.35, 300.0, 0.0).is_err());
/// ```
pub fn extraction_yield_percent(tds_percent: f64, beverage_g: f64, dose_g: f64) -> Result<f64, PhysicsError> {
    let dose_g = positive("dose_g", dose_g)?;
    let beverage_g = positive("beverage_g", beverage_g)?;
    Ok((tds_percent / 100.0) * (beverage_g / dose_g) * 100.0)
}
