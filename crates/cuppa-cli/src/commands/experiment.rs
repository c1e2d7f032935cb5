//! Experiment command implementation.

use crate::error::Result;
use crate::output::Formatter;
use cuppa_farm::experiment::red_fruit_anaerobic;

/// Execute the experiment command.
pub fn execute_experiment(formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_experiment(&red_fruit_anaerobic())?);
    Ok(())
}
