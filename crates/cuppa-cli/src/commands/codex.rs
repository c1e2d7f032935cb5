//! Codex command implementation.

use crate::error::Result;
use crate::output::Formatter;
use cuppa_domain::AxiomRegistry;

/// Execute the codex command.
pub fn execute_codex(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_codex(AxiomRegistry::global().axioms())?);
    Ok(())
}
