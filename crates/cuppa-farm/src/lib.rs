//! Cuppa Farm
//!
//! Proof-gated farm processing advice: raw-material triage, fermentation plan
//! check and drying SOP, run in sequence by [`FarmerAgent`].
//!
//! A stage that lacks measurements halts the run. The report then covers only
//! that stage, with `what_to_measure_next` set to its missing list.
//!
//! # Examples
//!
//! ```
//! use cuppa_domain::{CherryLot, DryingPlan, FarmContext, FarmStage, FermentationPlan};
//! use cuppa_farm::FarmerAgent;
//!
//! let lot = CherryLot { lot_id: "L-07".into(), ..Default::default() };
//! let report = FarmerAgent::new()
//!     .run(&FarmContext::default(), &lot, &FermentationPlan::default(), &[], &DryingPlan::default())
//!     .unwrap();
//! assert_eq!(report.halted_at, Some(FarmStage::RawMaterial));
//! ```

#![warn(missing_docs)]

mod agent;
pub mod drying;
mod error;
pub mod experiment;
pub mod fermentation;
mod stage;
pub mod triage;

pub use agent::FarmerAgent;
pub use error::FarmError;
pub use stage::{Stage, StageOutcome};
