//! Cuppa Engine
//!
//! Orchestrates brew, roast and green bean analyses.
//!
//! Every analysis follows the same path:
//! - Record the `no_guessing` axiom
//! - Run the missingness gate; refuse with a single recommendation if it fails
//! - Run the proxy computations, recording each result as a proof
//! - Assemble recommendations in a fixed order, each citing the proofs it read
//!
//! # Examples
//!
//! ```
//! use cuppa_domain::BrewInputs;
//! use cuppa_engine::CoffeeEngine;
//!
//! let engine = CoffeeEngine::default_config();
//! let report = engine.analyze_brew(&BrewInputs::default()).unwrap();
//! assert!(report.is_refusal());
//! ```

#![warn(missing_docs)]

pub mod assembler;
mod brew;
mod config;
mod engine;
mod error;
mod greenbean;
mod roast;

pub use assembler::Assembler;
pub use config::AnalysisConfig;
pub use engine::CoffeeEngine;
pub use error::EngineError;
