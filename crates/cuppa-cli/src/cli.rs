//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Cuppa - physics-first, proof-gated coffee advisor.
#[derive(Debug, Parser)]
#[command(name = "cuppa")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path (default: ~/.cuppa/config.toml)
    #[arg(short, long, global = true, env = "CUPPA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log proofs and gate decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Plain text (default)
    Text,
    /// Table format
    Table,
    /// Full JSON report
    Json,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze one brew
    Brew(BrewArgs),

    /// Analyze one roast batch
    Roast(RoastArgs),

    /// Assess green bean stability and storage
    Green(GreenArgs),

    /// Run farmer mode: triage, fermentation, drying
    Farm(FarmArgs),

    /// Print the axiom codex
    Codex,

    /// Print the red-fruit anaerobic field experiment template
    Experiment,

    /// Show or initialize the configuration file
    Config(ConfigArgs),
}

/// Arguments for the brew command.
#[derive(Debug, Parser)]
pub struct BrewArgs {
    /// Brewing method (pourover, immersion, espresso, ...)
    #[arg(long, default_value = "pourover")]
    pub method: String,

    /// Coffee dose (g)
    #[arg(long)]
    pub dose: Option<f64>,

    /// Brew water (g)
    #[arg(long)]
    pub water: Option<f64>,

    /// Beverage mass (g)
    #[arg(long)]
    pub beverage: Option<f64>,

    /// Actual water temperature (C)
    #[arg(long)]
    pub kettle: Option<f64>,

    /// Room temperature (C)
    #[arg(long)]
    pub room: Option<f64>,

    /// Was the brewer pre-heated (true/false)
    #[arg(long, value_parser = parse_flag)]
    pub preheat: Option<bool>,

    /// Total contact time (s)
    #[arg(long)]
    pub time: Option<f64>,

    /// Altitude (m)
    #[arg(long)]
    pub alt: Option<f64>,

    /// Beverage TDS (%)
    #[arg(long)]
    pub tds: Option<f64>,

    /// Measured slurry temperature (C)
    #[arg(long)]
    pub slurry: Option<f64>,

    /// Slurry temperature reported by a BLE probe (C); --slurry wins
    #[arg(long)]
    pub probe_reading: Option<f64>,

    /// TDS reported by a refractometer (%); --tds wins
    #[arg(long)]
    pub refractometer: Option<f64>,

    /// Grind setting, for the record
    #[arg(long)]
    pub grind: Option<String>,
}

/// Arguments for the roast command.
#[derive(Debug, Parser)]
pub struct RoastArgs {
    /// Bean name
    #[arg(long, default_value = "")]
    pub bean: String,

    /// Batch size (g)
    #[arg(long)]
    pub batch: Option<f64>,

    /// Green density (g/ml)
    #[arg(long)]
    pub density: Option<f64>,

    /// Charge temperature (C)
    #[arg(long)]
    pub charge: Option<f64>,

    /// Drop bean temperature (C)
    #[arg(long)]
    pub end: Option<f64>,

    /// Development time after first crack (s)
    #[arg(long)]
    pub dev: Option<f64>,

    /// Total roast time (s)
    #[arg(long)]
    pub time: Option<f64>,

    /// Rate of rise at the end of the roast (C/min)
    #[arg(long)]
    pub ror: Option<f64>,

    /// Variance of the rate-of-rise curve
    #[arg(long)]
    pub ror_variance: Option<f64>,

    /// Artisan CSV export (Time,BT,ET[,ROR]); explicit flags win
    #[arg(long)]
    pub artisan: Option<PathBuf>,

    /// Number of airflow changes during the roast
    #[arg(long)]
    pub airflow_changes: Option<u32>,
}

/// Arguments for the green command.
#[derive(Debug, Parser)]
pub struct GreenArgs {
    /// Bean name
    #[arg(long, default_value = "")]
    pub bean: String,

    /// Origin
    #[arg(long, default_value = "")]
    pub origin: String,

    /// Processing (washed, natural, honey, anaerobic)
    #[arg(long, default_value = "")]
    pub process: String,

    /// Moisture meter reading (%)
    #[arg(long)]
    pub moisture: Option<f64>,

    /// Water activity meter reading
    #[arg(long)]
    pub aw: Option<f64>,

    /// Density (g/ml)
    #[arg(long)]
    pub density: Option<f64>,

    /// Screen size
    #[arg(long)]
    pub screen: Option<u32>,

    /// Storage temperature (C)
    #[arg(long)]
    pub storage_temp: Option<f64>,

    /// Storage relative humidity (%)
    #[arg(long)]
    pub storage_rh: Option<f64>,

    /// Bags sit directly on the floor (true/false)
    #[arg(long, value_parser = parse_flag)]
    pub bag_on_floor: Option<bool>,

    /// Store room is ventilated (true/false)
    #[arg(long, value_parser = parse_flag)]
    pub ventilation_ok: Option<bool>,
}

/// Arguments for the farm command.
#[derive(Debug, Parser)]
pub struct FarmArgs {
    /// Farm name
    #[arg(long, default_value = "")]
    pub farm: String,

    /// Cherry lot id
    #[arg(long)]
    pub lot: String,

    /// Harvest date (YYYY-MM-DD)
    #[arg(long)]
    pub harvest_date: String,

    /// Cherry Brix
    #[arg(long)]
    pub brix: Option<f64>,

    /// Ripe cherries (%)
    #[arg(long)]
    pub ripeness: Option<f64>,

    /// Floaters (%)
    #[arg(long)]
    pub floaters: Option<f64>,

    /// Target fermentation temperature (C)
    #[arg(long)]
    pub target_temp: Option<f64>,

    /// Target fermentation duration (h)
    #[arg(long)]
    pub target_hours: Option<f64>,

    /// Fermentation process
    #[arg(long, default_value = "anaerobic_natural")]
    pub process: String,

    /// Drying method (raised_bed, patio, solar_dome)
    #[arg(long, default_value = "raised_bed")]
    pub dry: String,

    /// Fermentation log CSV (time_h,temp_c,ph,brix)
    #[arg(long)]
    pub ferment_log: Option<PathBuf>,
}

/// Arguments for the config command.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Config actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,

    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Text => crate::config::OutputFormat::Text,
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
        }
    }
}

/// Parse a yes/no style flag value.
pub fn parse_flag(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Ok(true),
        "0" | "false" | "no" | "n" => Ok(false),
        other => Err(format!("expected true/false, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("Yes"), Ok(true));
        assert_eq!(parse_flag("0"), Ok(false));
        assert!(parse_flag("maybe").is_err());
    }

    #[test]
    fn test_brew_flags() {
        let cli = Cli::try_parse_from([
            "cuppa", "--format", "json", "brew", "--dose", "18", "--preheat", "yes", "--probe-reading", "91.5",
        ])
        .unwrap();
        assert!(matches!(cli.format, Some(CliFormat::Json)));
        let Command::Brew(args) = cli.command else {
            panic!("expected brew");
        };
        assert_eq!(args.method, "pourover");
        assert_eq!(args.dose, Some(18.0));
        assert_eq!(args.preheat, Some(true));
        assert_eq!(args.probe_reading, Some(91.5));
        assert_eq!(args.water, None);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["cuppa", "codex", "--no-color", "-v"]).unwrap();
        assert!(cli.no_color);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Codex));
    }

    #[test]
    fn test_farm_requires_lot() {
        assert!(Cli::try_parse_from(["cuppa", "farm", "--harvest-date", "2026-01-15"]).is_err());
    }
}
