//! Error types for the CLI application.

use cuppa_engine::EngineError;
use cuppa_farm::FarmError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Malformed sensor CSV
    #[error("CSV format error in {origin} line {line}: {message}")]
    CsvFormat {
        /// File or stream the rows came from
        origin: String,
        /// 1-based line number, header is line 1
        line: usize,
        /// What was wrong
        message: String,
    },

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Brew, roast or green bean analysis failed
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// Farm pipeline failed
    #[error(transparent)]
    Farm(#[from] FarmError),
}
