//! Physics error types

use thiserror::Error;

/// Errors raised by proxy computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// An argument the missingness gate should have excluded
    #[error("Invalid argument: {name} must be > 0 (got {value})")]
    InvalidArgument {
        /// Argument name
        name: &'static str,
        /// Offending value
        value: f64,
    },
}

/// Require `value > 0`
pub(crate) fn positive(name: &'static str, value: f64) -> Result<f64, PhysicsError> {
    // NaN fails this check too
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::InvalidArgument { name, value })
    }
}
