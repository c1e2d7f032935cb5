//! Brew command implementation.

use super::finite;
use crate::cli::BrewArgs;
use crate::error::Result;
use crate::ingest::SensorReadings;
use crate::output::Formatter;
use cuppa_domain::{BrewInputs, BrewMethod};
use cuppa_engine::CoffeeEngine;

/// Execute the brew command.
pub fn execute_brew(args: BrewArgs, engine: &CoffeeEngine, formatter: &Formatter) -> Result<()> {
    let inputs = brew_inputs(&args)?;
    let report = engine.analyze_brew(&inputs)?;

    println!("{}", formatter.format_analysis(&report)?);

    Ok(())
}

/// Build the brew record from flags, then fill gaps from instrument readings.
pub fn brew_inputs(args: &BrewArgs) -> Result<BrewInputs> {
    let Ok(method) = args.method.parse::<BrewMethod>();

    let mut inputs = BrewInputs {
        method,
        dose_g: finite("dose", args.dose)?,
        water_g: finite("water", args.water)?,
        beverage_g: finite("beverage", args.beverage)?,
        grind_setting: args.grind.clone(),
        kettle_temp_c: finite("kettle", args.kettle)?,
        room_temp_c: finite("room", args.room)?,
        brewer_preheated: args.preheat,
        total_time_s: finite("time", args.time)?,
        altitude_m: finite("alt", args.alt)?,
        tds_percent: finite("tds", args.tds)?,
        slurry_temp_c: finite("slurry", args.slurry)?,
        ..Default::default()
    };

    let mut readings = SensorReadings::default();
    if let Some(temp_c) = args.probe_reading {
        readings.ingest_ble_temp(temp_c)?;
    }
    if let Some(tds) = args.refractometer {
        readings.ingest_refractometer(tds)?;
    }
    if !readings.is_empty() {
        readings.apply(&mut inputs);
    }

    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Command};
    use crate::error::CliError;
    use clap::Parser;

    fn parse(extra: &[&str]) -> BrewArgs {
        let argv = ["cuppa", "brew"].into_iter().chain(extra.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Brew(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_flags_map_to_inputs() {
        let inputs = brew_inputs(&parse(&[
            "--method", "Espresso", "--dose", "18", "--beverage", "36", "--preheat", "no",
        ]))
        .unwrap();
        assert_eq!(inputs.method, BrewMethod::Espresso);
        assert_eq!(inputs.dose_g, Some(18.0));
        assert_eq!(inputs.beverage_g, Some(36.0));
        assert_eq!(inputs.brewer_preheated, Some(false));
        assert_eq!(inputs.kettle_temp_c, None);
    }

    #[test]
    fn test_unknown_method_is_kept() {
        let inputs = brew_inputs(&parse(&["--method", "siphon"])).unwrap();
        assert_eq!(inputs.method, BrewMethod::Other("siphon".to_string()));
    }

    #[test]
    fn test_instrument_readings_fill_gaps() {
        let inputs = brew_inputs(&parse(&["--probe-reading", "91.5", "--refractometer", "1.4"])).unwrap();
        assert_eq!(inputs.slurry_temp_c, Some(91.5));
        assert_eq!(inputs.tds_percent, Some(1.4));
    }

    #[test]
    fn test_explicit_flags_win_over_instruments() {
        let inputs = brew_inputs(&parse(&["--slurry", "93", "--probe-reading", "91.5"])).unwrap();
        assert_eq!(inputs.slurry_temp_c, Some(93.0));
    }

    #[test]
    fn test_implausible_probe_reading() {
        let err = brew_inputs(&parse(&["--probe-reading", "250"])).unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }

    #[test]
    fn test_nan_flag_rejected() {
        assert!(brew_inputs(&parse(&["--dose", "NaN"])).is_err());
    }
}
