//! Fermentation tank log
//!
//! Columns `time_h,temp_c,ph,brix`, plus optional `smell_notes` and
//! `visual_notes`. Only `time_h` is required; a blank reading is unknown.

use super::CsvTable;
use crate::error::Result;
use cuppa_domain::FermentationLog;
use std::fs;
use std::path::Path;

/// Read a fermentation log CSV file.
pub fn read_fermentation_log(path: &Path) -> Result<Vec<FermentationLog>> {
    let text = fs::read_to_string(path)?;
    parse_fermentation_log(&text, &path.display().to_string())
}

/// Parse fermentation log CSV text.
pub fn parse_fermentation_log(text: &str, origin: &str) -> Result<Vec<FermentationLog>> {
    let table = CsvTable::parse(text, origin)?;
    let time = table.require_column("time_h")?;
    let temp = table.column("temp_c");
    let ph = table.column("ph");
    let brix = table.column("brix");
    let smell = table.column("smell_notes");
    let visual = table.column("visual_notes");

    let logs = table
        .rows()
        .iter()
        .map(|row| {
            Ok(FermentationLog {
                time_h: table.required_number(row, time)?,
                temp_c: table.number(row, temp)?,
                ph: table.number(row, ph)?,
                brix: table.number(row, brix)?,
                smell_notes: table.text(row, smell),
                visual_notes: table.text(row, visual),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(origin, readings = logs.len(), "fermentation log loaded");
    Ok(logs)
}
