//! Command implementations.

pub mod brew;
pub mod codex;
pub mod config;
pub mod experiment;
pub mod farm;
pub mod green;
pub mod roast;

pub use self::brew::execute_brew;
pub use self::codex::execute_codex;
pub use self::config::execute_config;
pub use self::experiment::execute_experiment;
pub use self::farm::execute_farm;
pub use self::green::execute_green;
pub use self::roast::execute_roast;

use crate::error::{CliError, Result};

/// Reject NaN and infinite flag values; `None` passes through.
pub(crate) fn finite(flag: &str, value: Option<f64>) -> Result<Option<f64>> {
    match value {
        Some(v) if !v.is_finite() => Err(CliError::InvalidInput(format!("--{flag} must be a finite number"))),
        other => Ok(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finite() {
        assert_eq!(finite("dose", Some(18.0)).unwrap(), Some(18.0));
        assert_eq!(finite("dose", None).unwrap(), None);
        assert!(matches!(finite("dose", Some(f64::NAN)), Err(CliError::InvalidInput(_))));
        assert!(finite("dose", Some(f64::INFINITY)).is_err());
    }
}
