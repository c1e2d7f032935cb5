//! Cuppa CLI library.
//!
//! Command-line front end for the brew, roast, green bean and farm advisors:
//! argument parsing, configuration, sensor ingestion and output formatting.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod ingest;
pub mod output;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
