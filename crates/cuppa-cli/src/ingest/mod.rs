//! Sensor ingestion
//!
//! Turns roaster exports, fermentation logs and handheld instrument readings
//! into the `Option` scalars the analysis records expect. Nothing here fills a
//! gap with a default: a blank cell stays `None`.

pub mod artisan;
pub mod fermentation_log;
pub mod probe;

pub use artisan::{CurvePoint, RoastCurve};
pub use fermentation_log::read_fermentation_log;
pub use probe::SensorReadings;

use crate::error::{CliError, Result};

/// A comma-separated table with a header row.
///
/// Cells are trimmed. Quoting is not supported, so cells must not contain commas.
#[derive(Debug)]
pub(crate) struct CsvTable {
    origin: String,
    header: Vec<String>,
    rows: Vec<CsvRow>,
}

/// One data row and its 1-based line number.
#[derive(Debug)]
pub(crate) struct CsvRow {
    pub line: usize,
    cells: Vec<String>,
}

impl CsvTable {
    /// Parse `text`; `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty());

        let (_, header_line) = lines.next().ok_or_else(|| CliError::CsvFormat {
            origin: origin.to_string(),
            line: 1,
            message: "empty file, expected a header row".to_string(),
        })?;
        let header: Vec<String> = split_cells(header_line.trim_start_matches('\u{feff}'));

        let mut rows = Vec::new();
        for (line, text) in lines {
            let cells = split_cells(text);
            if cells.len() > header.len() {
                return Err(CliError::CsvFormat {
                    origin: origin.to_string(),
                    line,
                    message: format!("{} cells for {} columns", cells.len(), header.len()),
                });
            }
            rows.push(CsvRow { line, cells });
        }

        Ok(Self {
            origin: origin.to_string(),
            header,
            rows,
        })
    }

    /// Index of a column, matched case-insensitively.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|h| h.eq_ignore_ascii_case(name))
    }

    /// Index of a column that must exist.
    pub fn require_column(&self, name: &str) -> Result<usize> {
        self.column(name).ok_or_else(|| CliError::CsvFormat {
            origin: self.origin.clone(),
            line: 1,
            message: format!("missing column '{name}'"),
        })
    }

    pub fn rows(&self) -> &[CsvRow] {
        &self.rows
    }

    /// Numeric cell; blank or absent is `None`.
    pub fn number(&self, row: &CsvRow, column: Option<usize>) -> Result<Option<f64>> {
        let Some(cell) = column.and_then(|c| row.cells.get(c)).map(String::as_str) else {
            return Ok(None);
        };
        if cell.is_empty() {
            return Ok(None);
        }
        match cell.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(Some(value)),
            _ => Err(self.bad_cell(row, column, cell)),
        }
    }

    /// Numeric cell that must be present.
    pub fn required_number(&self, row: &CsvRow, column: usize) -> Result<f64> {
        self.number(row, Some(column))?
            .ok_or_else(|| self.bad_cell(row, Some(column), ""))
    }

    /// Text cell; absent is empty.
    pub fn text(&self, row: &CsvRow, column: Option<usize>) -> String {
        column
            .and_then(|c| row.cells.get(c))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn bad_cell(&self, row: &CsvRow, column: Option<usize>, cell: &str) -> CliError {
        let name = column
            .and_then(|c| self.header.get(c))
            .map(String::as_str)
            .unwrap_or("?");
        CliError::CsvFormat {
            origin: self.origin.clone(),
            line: row.line,
            message: format!("bad value '{cell}' in column '{name}'"),
        }
    }
}

/// Fill `slot` from a sensor value unless the caller already supplied one.
pub(crate) fn fill_missing<T: Copy + std::fmt::Debug>(slot: &mut Option<T>, sensor: Option<T>, field: &str) {
    match (*slot, sensor) {
        (None, Some(value)) => {
            tracing::debug!(field, ?value, "filled from sensor");
            *slot = Some(value);
        }
        (Some(explicit), Some(value)) => {
            tracing::debug!(field, ?explicit, ?value, "explicit value kept over sensor");
        }
        _ => {}
    }
}

fn split_cells(line: &str) -> Vec<String> {
    line.split(',').map(|cell| cell.trim().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let table = CsvTable::parse("Time,BT\n0,200\n", "t.csv").unwrap();
        assert_eq!(table.column("time"), Some(0));
        assert_eq!(table.column("bt"), Some(1));
        assert_eq!(table.column("ET"), None);
    }

    #[test]
    fn test_blank_cells_are_none() {
        let table = CsvTable::parse("a,b\n1,\n", "t.csv").unwrap();
        let row = &table.rows()[0];
        assert_eq!(table.number(row, Some(0)).unwrap(), Some(1.0));
        assert_eq!(table.number(row, Some(1)).unwrap(), None);
        assert_eq!(table.number(row, None).unwrap(), None);
    }

    #[test]
    fn test_short_rows_are_padded_with_none() {
        let table = CsvTable::parse("a,b,c\n1\n", "t.csv").unwrap();
        assert_eq!(table.number(&table.rows()[0], Some(2)).unwrap(), None);
    }

    #[test]
    fn test_bad_number_reports_line() {
        let table = CsvTable::parse("a\n\n1\nabc\n", "t.csv").unwrap();
        let err = table.number(&table.rows()[1], Some(0)).unwrap_err();
        assert!(matches!(err, CliError::CsvFormat { line: 4, .. }));
    }

    #[test]
    fn test_too_many_cells() {
        assert!(CsvTable::parse("a\n1,2\n", "t.csv").is_err());
    }

    #[test]
    fn test_fill_missing_keeps_explicit() {
        let mut explicit = Some(1.0);
        fill_missing(&mut explicit, Some(2.0), "x");
        assert_eq!(explicit, Some(1.0));

        let mut empty = None;
        fill_missing(&mut empty, Some(2.0), "x");
        assert_eq!(empty, Some(2.0));

        fill_missing(&mut empty, None, "x");
        assert_eq!(empty, Some(2.0));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(
            CsvTable::parse("\n\n", "t.csv"),
            Err(CliError::CsvFormat { line: 1, .. })
        ));
    }
}
