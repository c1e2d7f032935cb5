//! Farm command implementation.

use super::finite;
use crate::cli::FarmArgs;
use crate::error::Result;
use crate::ingest::read_fermentation_log;
use crate::output::Formatter;
use cuppa_domain::{CherryLot, DryingPlan, FarmContext, FermentationLog, FermentationPlan};
use cuppa_farm::FarmerAgent;

/// Everything one farmer mode run needs
#[derive(Debug, Clone, PartialEq)]
pub struct FarmRun {
    pub farm: FarmContext,
    pub lot: CherryLot,
    /// Profile, vessel and oxygen control keep their red-berry defaults
    pub fermentation: FermentationPlan,
    pub drying: DryingPlan,
}

/// Execute the farm command.
pub fn execute_farm(args: FarmArgs, formatter: &Formatter) -> Result<()> {
    let run = farm_run(&args)?;
    let logs: Vec<FermentationLog> = match &args.ferment_log {
        Some(path) => read_fermentation_log(path)?,
        None => Vec::new(),
    };

    let report = FarmerAgent::new().run(&run.farm, &run.lot, &run.fermentation, &logs, &run.drying)?;

    println!("{}", formatter.format_farm(&report)?);

    Ok(())
}

/// Build the farm records from flags.
pub fn farm_run(args: &FarmArgs) -> Result<FarmRun> {
    Ok(FarmRun {
        farm: FarmContext {
            farm_name: args.farm.clone(),
            ..Default::default()
        },
        lot: CherryLot {
            lot_id: args.lot.clone(),
            harvest_date: args.harvest_date.clone(),
            brix: finite("brix", args.brix)?,
            ripeness_percent: finite("ripeness", args.ripeness)?,
            floaters_percent: finite("floaters", args.floaters)?,
            ..Default::default()
        },
        fermentation: FermentationPlan {
            process: args.process.clone(),
            target_temp_c: finite("target-temp", args.target_temp)?,
            target_hours: finite("target-hours", args.target_hours)?,
            ..Default::default()
        },
        drying: DryingPlan {
            method: args.dry.clone(),
            ..Default::default()
        },
    })
}
