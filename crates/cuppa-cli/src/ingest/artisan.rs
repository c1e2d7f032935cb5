//! Artisan roast curve export
//!
//! Reads the `Time,BT,ET[,ROR]` columns. Time is seconds or `mm:ss`. When the
//! export has no RoR column the rate of rise is derived from consecutive BT
//! samples.

use super::{fill_missing, CsvTable};
use crate::error::{CliError, Result};
use cuppa_domain::RoastInputs;
use cuppa_physics::roast::ror_variance;
use std::fs;
use std::path::Path;

/// One curve sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Seconds since charge
    pub time_s: f64,
    /// Bean temperature (C)
    pub bt_c: f64,
    /// Environment temperature (C)
    pub et_c: f64,
    /// Rate of rise (C/min), when exported
    pub ror: Option<f64>,
}

/// A parsed roast curve, at least one sample, time non-decreasing
#[derive(Debug, Clone, PartialEq)]
pub struct RoastCurve {
    points: Vec<CurvePoint>,
}

impl RoastCurve {
    /// Read an Artisan CSV export.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text, &path.display().to_string())
    }

    /// Parse CSV text; `origin` names the source in error messages.
    pub fn parse(text: &str, origin: &str) -> Result<Self> {
        let table = CsvTable::parse(text, origin)?;
        let time = table.require_column("Time")?;
        let bt = table.require_column("BT")?;
        let et = table.require_column("ET")?;
        let ror = table.column("ROR");

        let mut points: Vec<CurvePoint> = Vec::with_capacity(table.rows().len());
        for row in table.rows() {
            let cell = table.text(row, Some(time));
            let time_s = parse_time(&cell).ok_or_else(|| table.bad_cell(row, Some(time), &cell))?;
            if points.last().is_some_and(|prev| time_s < prev.time_s) {
                return Err(CliError::CsvFormat {
                    origin: origin.to_string(),
                    line: row.line,
                    message: format!("time {cell} goes backwards"),
                });
            }
            points.push(CurvePoint {
                time_s,
                bt_c: table.required_number(row, bt)?,
                et_c: table.required_number(row, et)?,
                ror: table.number(row, ror)?,
            });
        }

        if points.is_empty() {
            return Err(CliError::CsvFormat {
                origin: origin.to_string(),
                line: 1,
                message: "no curve samples".to_string(),
            });
        }

        tracing::debug!(origin, samples = points.len(), "artisan curve loaded");
        Ok(Self { points })
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    /// Elapsed time from first to last sample, `None` for a zero-length curve
    pub fn total_time_s(&self) -> Option<f64> {
        let (first, last) = (self.points.first()?, self.points.last()?);
        let total = last.time_s - first.time_s;
        (total > 0.0).then_some(total)
    }

    /// Bean temperature at the last sample
    pub fn end_temp_c(&self) -> Option<f64> {
        self.points.last().map(|p| p.bt_c)
    }

    /// Rate of rise at the end of the curve
    pub fn last_ror(&self) -> Option<f64> {
        self.ror_series().last().copied()
    }

    /// Population variance of the rate-of-rise series
    pub fn ror_variance(&self) -> Option<f64> {
        ror_variance(&self.ror_series())
    }

    /// Fill the roast fields the caller left empty.
    pub fn apply(&self, inputs: &mut RoastInputs) {
        fill_missing(&mut inputs.total_time_s, self.total_time_s(), "total_time_s");
        fill_missing(&mut inputs.end_temp_c, self.end_temp_c(), "end_temp_c");
        fill_missing(&mut inputs.ror_c_per_min, self.last_ror(), "ror_c_per_min");
        fill_missing(&mut inputs.ror_variance, self.ror_variance(), "ror_variance");
    }

    fn ror_series(&self) -> Vec<f64> {
        let exported: Vec<f64> = self.points.iter().filter_map(|p| p.ror).collect();
        if !exported.is_empty() {
            return exported;
        }
        self.points
            .windows(2)
            .filter(|pair| pair[1].time_s > pair[0].time_s)
            .map(|pair| (pair[1].bt_c - pair[0].bt_c) * 60.0 / (pair[1].time_s - pair[0].time_s))
            .collect()
    }
}

/// Seconds, or `mm:ss`
fn parse_time(cell: &str) -> Option<f64> {
    let seconds = match cell.split_once(':') {
        Some((minutes, seconds)) => {
            let minutes: u32 = minutes.trim().parse().ok()?;
            let seconds: f64 = seconds.trim().parse().ok()?;
            (0.0..60.0).contains(&seconds).then_some(f64::from(minutes) * 60.0 + seconds)?
        }
        None => cell.parse().ok()?,
    };
    (seconds.is_finite() && seconds >= 0.0).then_some(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Time,BT,ET,ROR\n\
        0,200.0,230.0,\n\
        60,100.0,220.0,20.0\n\
        300,160.0,235.0,12.0\n\
        540,195.0,245.0,8.0\n";

    #[test]
    fn test_derived_values() {
        let curve = RoastCurve::parse(EXPORT, "roast.csv").unwrap();
        assert_eq!(curve.points().len(), 4);
        assert_eq!(curve.total_time_s(), Some(540.0));
        assert_eq!(curve.end_temp_c(), Some(195.0));
        assert_eq!(curve.last_ror(), Some(8.0));

        // RoR samples 20, 12, 8: mean 40/3
        let expected = ((20.0f64 - 40.0 / 3.0).powi(2) + (12.0f64 - 40.0 / 3.0).powi(2) + (8.0f64 - 40.0 / 3.0).powi(2)) / 3.0;
        assert!((curve.ror_variance().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_ror_derived_without_column() {
        let curve = RoastCurve::parse("Time,BT,ET\n0:00,150,200\n1:00,160,210\n2:00,166,215\n", "roast.csv").unwrap();
        assert_eq!(curve.total_time_s(), Some(120.0));
        assert_eq!(curve.last_ror(), Some(6.0));
        assert_eq!(curve.ror_variance(), Some(4.0));
    }

    #[test]
    fn test_apply_keeps_explicit_flags() {
        let curve = RoastCurve::parse(EXPORT, "roast.csv").unwrap();
        let mut inputs = RoastInputs {
            total_time_s: Some(600.0),
            ..Default::default()
        };
        curve.apply(&mut inputs);
        assert_eq!(inputs.total_time_s, Some(600.0));
        assert_eq!(inputs.ror_c_per_min, Some(8.0));
        assert_eq!(inputs.end_temp_c, Some(195.0));
        assert!(inputs.ror_variance.is_some());
        assert_eq!(inputs.dev_time_s, None);
    }

    #[test]
    fn test_single_sample_has_no_total_time() {
        let curve = RoastCurve::parse("Time,BT,ET\n0,200,230\n", "roast.csv").unwrap();
        assert_eq!(curve.total_time_s(), None);
        assert_eq!(curve.last_ror(), None);
        assert_eq!(curve.ror_variance(), None);
    }

    #[test]
    fn test_missing_column() {
        let err = RoastCurve::parse("Time,BT\n0,200\n", "roast.csv").unwrap_err();
        assert!(err.to_string().contains("missing column 'ET'"));
    }

    #[test]
    fn test_time_going_backwards() {
        let err = RoastCurve::parse("Time,BT,ET\n60,150,200\n30,160,210\n", "roast.csv").unwrap_err();
        assert!(matches!(err, CliError::CsvFormat { line: 3, .. }));
    }

    #[test]
    fn test_blank_bean_temperature_is_an_error() {
        assert!(RoastCurve::parse("Time,BT,ET\n0,,200\n", "roast.csv").is_err());
    }

    #[test]
    fn test_parse_time() {
        assert_eq!(parse_time("90"), Some(90.0));
        assert_eq!(parse_time("1:30"), Some(90.0));
        assert_eq!(parse_time("1:75"), None);
        assert_eq!(parse_time("-5"), None);
        assert_eq!(parse_time(""), None);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roast.csv");
        std::fs::write(&path, EXPORT).unwrap();
        assert_eq!(RoastCurve::from_file(&path).unwrap().points().len(), 4);
    }
}
