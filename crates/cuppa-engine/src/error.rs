//! Engine error types

use cuppa_domain::{AssemblyError, LedgerError, ProofId};
use cuppa_physics::PhysicsError;
use thiserror::Error;

/// Errors that abort an analysis
///
/// A refusal for missing inputs is not an error; these are invariant
/// violations and configuration problems.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A proxy computation received an invalid argument
    #[error("Physics error: {0}")]
    Physics(#[from] PhysicsError),

    /// A proof lookup failed
    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// A recommendation broke the proof invariants
    #[error("Assembly error: {0}")]
    Assembly(#[from] AssemblyError),

    /// A proof output had an unexpected shape
    #[error("Proof {id} output is not {expected}")]
    ProofOutput {
        /// Proof id
        id: ProofId,
        /// Expected shape
        expected: &'static str,
    },

    /// A gated field was absent after the gate passed
    #[error("Required input '{0}' missing after the gate passed")]
    UngatedInput(&'static str),

    /// Invalid analysis configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
