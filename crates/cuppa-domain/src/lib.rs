//! Cuppa Domain Layer
//!
//! This crate contains the core model for Cuppa's proof-gated coffee advisor.
//! It defines the evidence ledger, the axiom codex, the report shapes and the
//! immutable input records that every other crate depends upon.
//!
//! ## Key Concepts
//!
//! - **Proof**: A recorded unit of evidence (measurement, equation, axiom or assumption)
//! - **ProofLedger**: Append-only, per-run store of proofs with monotonic ids
//! - **Axiom**: A named background rule, cited by proofs for provenance only
//! - **Recommendation**: Human-facing guidance that must cite the proofs it used
//! - **Confidence table**: One declarative place where confidence values live
//!
//! ## Architecture
//!
//! - Pure data and bookkeeping only, no I/O
//! - Input records carry `Option` for every quantity: "not measured" is never 0
//! - A ledger lives for exactly one analysis call and is never shared

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codex;
pub mod confidence;
pub mod farm;
pub mod inputs;
pub mod proof;
pub mod recommendation;

// Re-exports for convenience
pub use codex::{Axiom, AxiomKey, AxiomRegistry};
pub use confidence::{confidence_for, require_confidence, ConfidenceTableError, Domain, EvidenceQuality, Topic};
pub use farm::{CherryLot, DryingPlan, FarmContext, FermentationLog, FermentationPlan};
pub use inputs::{BrewInputs, BrewMethod, GreenBeanInputs, RoastInputs};
pub use proof::{LedgerError, LedgerSnapshot, Proof, ProofDraft, ProofId, ProofKind, ProofLedger};
pub use recommendation::{
    AnalysisReport, AssemblyError, FarmStage, FarmerReport, Recommendation, RecommendationBuilder,
};
