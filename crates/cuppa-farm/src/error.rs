//! Farm pipeline error types

use cuppa_domain::{AssemblyError, LedgerError};
use thiserror::Error;

/// Errors that abort a farm run
#[derive(Error, Debug)]
pub enum FarmError {
    /// A report cited a proof missing from the run's ledger
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// The report could not be assembled (missing confidence row)
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// A gated field was absent after the gate passed
    #[error("Required input '{0}' missing after the gate passed")]
    UngatedInput(&'static str),
}
