//! Roast command implementation.

use super::finite;
use crate::cli::RoastArgs;
use crate::error::Result;
use crate::ingest::RoastCurve;
use crate::output::Formatter;
use cuppa_domain::RoastInputs;
use cuppa_engine::CoffeeEngine;

/// Execute the roast command.
pub fn execute_roast(args: RoastArgs, engine: &CoffeeEngine, formatter: &Formatter) -> Result<()> {
    let curve = args.artisan.as_deref().map(RoastCurve::from_file).transpose()?;
    let inputs = roast_inputs(&args, curve.as_ref())?;
    let report = engine.analyze_roast(&inputs)?;

    println!("{}", formatter.format_analysis(&report)?);

    Ok(())
}

/// Build the roast record from flags, then fill gaps from the Artisan curve.
pub fn roast_inputs(args: &RoastArgs, curve: Option<&RoastCurve>) -> Result<RoastInputs> {
    let mut inputs = RoastInputs {
        bean: args.bean.clone(),
        batch_g: finite("batch", args.batch)?,
        density_g_ml: finite("density", args.density)?,
        charge_temp_c: finite("charge", args.charge)?,
        end_temp_c: finite("end", args.end)?,
        dev_time_s: finite("dev", args.dev)?,
        total_time_s: finite("time", args.time)?,
        ror_c_per_min: finite("ror", args.ror)?,
        ror_variance: finite("ror-variance", args.ror_variance)?,
        airflow_changes: args.airflow_changes,
        ..Default::default()
    };

    if let Some(curve) = curve {
        curve.apply(&mut inputs);
    }

    Ok(inputs)
}
