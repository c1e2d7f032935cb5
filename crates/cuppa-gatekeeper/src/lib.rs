//! Cuppa Gatekeeper
//!
//! Decides whether an analysis may run at all.
//!
//! The Gatekeeper provides:
//! - Declared, ordered required-field sets per domain
//! - A missingness check that never guesses a default
//! - The refusal report every domain returns when inputs are absent
//!
//! # Examples
//!
//! ```
//! use cuppa_domain::BrewInputs;
//! use cuppa_gatekeeper::{requirements, GateVerdict};
//!
//! let gate = requirements::brew();
//! let verdict = gate.evaluate(&BrewInputs::default());
//! assert!(matches!(verdict, GateVerdict::Refuse { .. }));
//! ```

#![warn(missing_docs)]

mod gate;
mod refusal;
pub mod requirements;

pub use gate::{GateVerdict, MissingnessGate, RequiredField};
pub use refusal::{refusal_report, RefusalGuidance};
pub use requirements::FermentationCheck;
