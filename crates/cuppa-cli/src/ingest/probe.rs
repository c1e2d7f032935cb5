//! Handheld instrument readings: BLE slurry probe and refractometer

use super::fill_missing;
use crate::error::{CliError, Result};
use cuppa_domain::BrewInputs;
use std::ops::RangeInclusive;

/// Plausible slurry temperatures (C)
const PROBE_RANGE_C: RangeInclusive<f64> = 0.0..=105.0;

/// Plausible beverage TDS (%)
const TDS_RANGE_PERCENT: RangeInclusive<f64> = 0.0..=25.0;

/// Readings collected from instruments during one brew
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorReadings {
    /// Slurry temperature from the BLE probe (C)
    pub slurry_temp_c: Option<f64>,
    /// Beverage TDS from the refractometer (%)
    pub tds_percent: Option<f64>,
}

impl SensorReadings {
    /// Record a BLE probe slurry temperature.
    pub fn ingest_ble_temp(&mut self, temp_c: f64) -> Result<()> {
        self.slurry_temp_c = Some(checked("probe reading", temp_c, &PROBE_RANGE_C)?);
        Ok(())
    }

    /// Record a refractometer TDS reading.
    pub fn ingest_refractometer(&mut self, tds_percent: f64) -> Result<()> {
        self.tds_percent = Some(checked("refractometer reading", tds_percent, &TDS_RANGE_PERCENT)?);
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.slurry_temp_c.is_none() && self.tds_percent.is_none()
    }

    /// Fill the brew fields the caller left empty.
    pub fn apply(&self, inputs: &mut BrewInputs) {
        fill_missing(&mut inputs.slurry_temp_c, self.slurry_temp_c, "slurry_temp_c");
        fill_missing(&mut inputs.tds_percent, self.tds_percent, "tds_percent");
    }
}

fn checked(what: &str, value: f64, range: &RangeInclusive<f64>) -> Result<f64> {
    if value.is_finite() && range.contains(&value) {
        Ok(value)
    } else {
        Err(CliError::InvalidInput(format!(
            "{what} {value} outside {}..={}",
            range.start(),
            range.end()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readings_fill_empty_fields() {
        let mut readings = SensorReadings::default();
        assert!(readings.is_empty());
        readings.ingest_ble_temp(91.5).unwrap();
        readings.ingest_refractometer(1.38).unwrap();

        let mut inputs = BrewInputs::default();
        readings.apply(&mut inputs);
        assert_eq!(inputs.slurry_temp_c, Some(91.5));
        assert_eq!(inputs.tds_percent, Some(1.38));
    }

    #[test]
    fn test_explicit_values_win() {
        let mut readings = SensorReadings::default();
        readings.ingest_ble_temp(91.5).unwrap();

        let mut inputs = BrewInputs {
            slurry_temp_c: Some(93.0),
            ..Default::default()
        };
        readings.apply(&mut inputs);
        assert_eq!(inputs.slurry_temp_c, Some(93.0));
        assert_eq!(inputs.tds_percent, None);
    }

    #[test]
    fn test_implausible_readings_rejected() {
        let mut readings = SensorReadings::default();
        assert!(matches!(readings.ingest_ble_temp(180.0), Err(CliError::InvalidInput(_))));
        assert!(readings.ingest_refractometer(f64::NAN).is_err());
        assert!(readings.ingest_refractometer(-1.0).is_err());
        assert!(readings.is_empty());
    }
}
