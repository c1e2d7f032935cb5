//! Cuppa CLI - physics-first, proof-gated coffee advisor.

use clap::Parser;
use cuppa_cli::commands;
use cuppa_cli::{Cli, Command, Config, Formatter};
use cuppa_engine::CoffeeEngine;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> cuppa_cli::Result<()> {
    // Load config, missing file means defaults
    let config_path = match cli.config {
        Some(path) => path,
        None => Config::default_path()?,
    };
    let config = Config::load_from(&config_path)?;

    // Determine output format
    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);

    // Determine color setting
    let color_enabled = !cli.no_color && config.settings.color;

    let formatter = Formatter::new(format, color_enabled);
    let engine = CoffeeEngine::new(config.analysis);

    match cli.command {
        Command::Brew(args) => commands::execute_brew(args, &engine, &formatter),
        Command::Roast(args) => commands::execute_roast(args, &engine, &formatter),
        Command::Green(args) => commands::execute_green(args, &engine, &formatter),
        Command::Farm(args) => commands::execute_farm(args, &formatter),
        Command::Codex => commands::execute_codex(&formatter),
        Command::Experiment => commands::execute_experiment(&formatter),
        Command::Config(args) => commands::execute_config(args, &config, &config_path, &formatter),
    }
}
