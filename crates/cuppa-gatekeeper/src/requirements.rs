//! Declared required-field sets, one per domain
//!
//! Optional measurements (slurry probe, TDS, RoR variance, storage data) are
//! never gated; they only raise evidence quality when present.

use crate::MissingnessGate;
use cuppa_domain::{BrewInputs, CherryLot, FermentationPlan, GreenBeanInputs, RoastInputs};

/// Brew: dose, a mass, kettle, time, room and preheat state
pub fn brew() -> MissingnessGate<BrewInputs> {
    MissingnessGate::<BrewInputs>::new("brew")
        .require("dose_g", "dose_g (coffee dose in grams)", |b| b.dose_g.is_some())
        .require(
            "water_g|beverage_g",
            "water_g or beverage_g (brew water or beverage mass)",
            |b| b.water_g.is_some() || b.beverage_g.is_some(),
        )
        .require(
            "kettle_temp_c",
            "kettle_temp_c (actual water temperature used)",
            |b| b.kettle_temp_c.is_some(),
        )
        .require("total_time_s", "total_time_s (total extraction time)", |b| {
            b.total_time_s.is_some()
        })
        .require("room_temp_c", "room_temp_c (room temperature)", |b| b.room_temp_c.is_some())
        .require(
            "brewer_preheated",
            "brewer_preheated (was the brewer pre-heated, true/false)",
            |b| b.brewer_preheated.is_some(),
        )
}

/// Roast: batch, end RoR, development and total time
pub fn roast() -> MissingnessGate<RoastInputs> {
    MissingnessGate::<RoastInputs>::new("roast")
        .require("batch_g", "batch_g (batch size in grams)", |r| r.batch_g.is_some())
        .require("ror_c_per_min", "ror_c_per_min (rate of rise at drop)", |r| {
            r.ror_c_per_min.is_some()
        })
        .require("dev_time_s", "dev_time_s (development time after first crack)", |r| {
            r.dev_time_s.is_some()
        })
        .require("total_time_s", "total_time_s (total roast time)", |r| r.total_time_s.is_some())
}

/// Green bean: moisture and water activity
pub fn green_bean() -> MissingnessGate<GreenBeanInputs> {
    MissingnessGate::<GreenBeanInputs>::new("green_bean")
        .require("moisture_percent", "moisture_percent (moisture meter reading)", |g| {
            g.moisture_percent.is_some()
        })
        .require("aw", "aw (water activity meter reading)", |g| g.aw.is_some())
}

/// Farm raw material: Brix, ripeness, floaters
pub fn raw_material() -> MissingnessGate<CherryLot> {
    MissingnessGate::<CherryLot>::new("farm_raw_material")
        .require("brix", "brix", |l| l.brix.is_some())
        .require("ripeness_percent", "ripeness_percent", |l| l.ripeness_percent.is_some())
        .require("floaters_percent", "floaters_percent", |l| l.floaters_percent.is_some())
}

/// Lot and plan checked together by the fermentation gate
#[derive(Debug, Clone, Copy)]
pub struct FermentationCheck<'a> {
    /// The cherry lot
    pub lot: &'a CherryLot,
    /// The fermentation plan
    pub plan: &'a FermentationPlan,
}

/// Farm fermentation: lot Brix, target temperature and duration
pub fn fermentation<'a>() -> MissingnessGate<FermentationCheck<'a>> {
    MissingnessGate::<FermentationCheck<'a>>::new("farm_fermentation")
        .require("brix", "brix", |c| c.lot.brix.is_some())
        .require("target_temp_c", "target_temp_c", |c| c.plan.target_temp_c.is_some())
        .require("target_hours", "target_hours", |c| c.plan.target_hours.is_some())
}
