//! Green command implementation.

use super::finite;
use crate::cli::GreenArgs;
use crate::error::Result;
use crate::output::Formatter;
use cuppa_domain::GreenBeanInputs;
use cuppa_engine::CoffeeEngine;

/// Execute the green command.
pub fn execute_green(args: GreenArgs, engine: &CoffeeEngine, formatter: &Formatter) -> Result<()> {
    let inputs = green_inputs(&args)?;
    let report = engine.analyze_green_bean(&inputs)?;

    println!("{}", formatter.format_analysis(&report)?);

    Ok(())
}

/// Build the green bean record from flags.
pub fn green_inputs(args: &GreenArgs) -> Result<GreenBeanInputs> {
    Ok(GreenBeanInputs {
        bean: args.bean.clone(),
        origin: args.origin.clone(),
        process: args.process.clone(),
        moisture_percent: finite("moisture", args.moisture)?,
        aw: finite("aw", args.aw)?,
        density_g_ml: finite("density", args.density)?,
        screen: args.screen,
        storage_temp_c: finite("storage-temp", args.storage_temp)?,
        storage_rh_percent: finite("storage-rh", args.storage_rh)?,
        bag_on_floor: args.bag_on_floor,
        ventilation_ok: args.ventilation_ok,
        ..Default::default()
    })
}
