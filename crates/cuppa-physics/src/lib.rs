//! Cuppa Physics
//!
//! Pure, deterministic proxy computations used by the analysis engines.
//! Nothing here touches a ledger: callers record every result as a proof
//! before a recommendation reads it.
//!
//! - [`brew`]: boiling point, thermal loss, contact time, extraction yield
//! - [`roast`]: thermal momentum, development ratio, stability index
//! - [`greenbean`]: water activity, moisture and storage classification
//! - [`farm`]: raw-material ceiling, fermentation window, drying SOP
//!
//! Functions that can receive values the gate should have excluded (a
//! non-positive dose or roast time) return [`PhysicsError::InvalidArgument`].

#![warn(missing_docs)]

pub mod brew;
pub mod farm;
pub mod greenbean;
pub mod roast;
mod error;

pub use error::PhysicsError;
