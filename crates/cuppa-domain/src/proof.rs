//! Proof ledger - the evidence backbone of every analysis
//!
//! Anything the engine asserts must reference a [`ProofId`] recorded in the
//! ledger of the same run. Ledgers are append-only and never shared between
//! analysis calls.

use crate::codex::AxiomKey;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// Opaque, monotonic proof identifier
///
/// Internally the n-th proof of a run; rendered as a zero-padded counter
/// (`P0001`) only for display and serialization. Ordering is numeric, so
/// `P10000` sorts after `P9999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProofId(u32);

impl ProofId {
    /// Create a ProofId from its sequence number (1-based)
    pub fn from_sequence(n: u32) -> Self {
        Self(n)
    }

    /// Sequence number of this proof within its ledger
    pub fn sequence(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for ProofId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{:04}", self.0)
    }
}

impl Serialize for ProofId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// What kind of evidence a proof records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProofKind {
    /// Deterministic formula result
    Equation,
    /// Directly measured value
    Measurement,
    /// Declared background rule from the codex
    Axiom,
    /// Explicit heuristic fallback standing in for a measurement
    Assumption,
}

impl ProofKind {
    /// Get the kind name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofKind::Equation => "equation",
            ProofKind::Measurement => "measurement",
            ProofKind::Axiom => "axiom",
            ProofKind::Assumption => "assumption",
        }
    }
}

/// A recorded unit of evidence. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Proof {
    /// Identifier, unique within one ledger
    pub id: ProofId,

    /// Kind of evidence
    pub kind: ProofKind,

    /// What this proof supports
    pub claim: String,

    /// Equation name, measurement key or axiom key
    pub basis: String,

    /// Inputs in the order they were recorded
    pub inputs: Map<String, Value>,

    /// Result value
    pub output: Value,

    /// Free-form notes
    pub notes: String,

    /// Stated uncertainty, `None` when the value is exact or measured
    pub uncertainty: Option<String>,
}

/// Builder for a proof that has not been recorded yet
#[derive(Debug, Clone)]
pub struct ProofDraft {
    kind: ProofKind,
    claim: String,
    basis: String,
    inputs: Map<String, Value>,
    output: Value,
    notes: String,
    uncertainty: Option<String>,
}

impl ProofDraft {
    /// Start a draft with its kind, claim and basis
    pub fn new(kind: ProofKind, claim: impl Into<String>, basis: impl Into<String>) -> Self {
        Self {
            kind,
            claim: claim.into(),
            basis: basis.into(),
            inputs: Map::new(),
            output: Value::Null,
            notes: String::new(),
            uncertainty: None,
        }
    }

    /// Record a named input (`None` renders as `null`, never as 0)
    pub fn input(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.inputs.insert(key.to_string(), value.into());
        self
    }

    /// Set the output value
    pub fn output(mut self, value: impl Into<Value>) -> Self {
        self.output = value.into();
        self
    }

    /// Attach notes
    pub fn notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Attach a stated uncertainty
    pub fn uncertainty(mut self, uncertainty: impl Into<String>) -> Self {
        self.uncertainty = Some(uncertainty.into());
        self
    }

    /// Attach an uncertainty only when one applies
    pub fn uncertainty_if(mut self, uncertainty: Option<&str>) -> Self {
        self.uncertainty = uncertainty.map(str::to_string);
        self
    }
}

/// Errors raised by ledger lookups
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    /// The id was never issued by this ledger. Signals a programming defect.
    #[error("Proof {0} not found in this ledger")]
    NotFound(ProofId),
}

/// Append-only, per-run evidence store
///
/// Not `Clone`: a ledger belongs to exactly one analysis invocation.
/// Use [`ProofLedger::export`] or [`ProofLedger::into_snapshot`] to hand the
/// evidence to a report.
#[derive(Debug, Default)]
pub struct ProofLedger {
    proofs: Vec<Proof>,
}

impl ProofLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new proof and return its id
    pub fn add(&mut self, draft: ProofDraft) -> ProofId {
        let id = ProofId(self.proofs.len() as u32 + 1);
        tracing::debug!(
            proof = %id,
            kind = draft.kind.as_str(),
            basis = %draft.basis,
            "recorded proof"
        );
        self.proofs.push(Proof {
            id,
            kind: draft.kind,
            claim: draft.claim,
            basis: draft.basis,
            inputs: draft.inputs,
            output: draft.output,
            notes: draft.notes,
            uncertainty: draft.uncertainty,
        });
        id
    }

    /// Record an axiom proof citing a codex entry
    pub fn cite_axiom(
        &mut self,
        key: AxiomKey,
        claim: impl Into<String>,
        inputs: Map<String, Value>,
    ) -> ProofId {
        let axiom = key.axiom();
        let mut draft = ProofDraft::new(ProofKind::Axiom, claim, axiom.key)
            .output(true)
            .notes(axiom.notes);
        draft.inputs = inputs;
        self.add(draft)
    }

    /// Look up a proof by id
    pub fn get(&self, id: ProofId) -> Result<&Proof, LedgerError> {
        (id.0 as usize)
            .checked_sub(1)
            .and_then(|idx| self.proofs.get(idx))
            .filter(|proof| proof.id == id)
            .ok_or(LedgerError::NotFound(id))
    }

    /// Whether the id was issued by this ledger
    pub fn contains(&self, id: ProofId) -> bool {
        self.get(id).is_ok()
    }

    /// Number of proofs recorded so far
    pub fn len(&self) -> usize {
        self.proofs.len()
    }

    /// Whether no proof has been recorded
    pub fn is_empty(&self) -> bool {
        self.proofs.is_empty()
    }

    /// Snapshot of all proofs in insertion order
    pub fn export(&self) -> LedgerSnapshot {
        LedgerSnapshot(self.proofs.clone())
    }

    /// Consume the ledger into its snapshot
    pub fn into_snapshot(self) -> LedgerSnapshot {
        LedgerSnapshot(self.proofs)
    }
}

/// Frozen copy of a ledger, carried by reports
///
/// Serializes as an insertion-ordered map `{"P0001": {...}, ...}`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot(Vec<Proof>);

impl LedgerSnapshot {
    /// Proofs in insertion order
    pub fn proofs(&self) -> &[Proof] {
        &self.0
    }

    /// Look up a proof by id
    pub fn get(&self, id: ProofId) -> Option<&Proof> {
        self.0.iter().find(|proof| proof.id == id)
    }

    /// Whether any proof was recorded under this basis
    pub fn has_basis(&self, basis: &str) -> bool {
        self.0.iter().any(|proof| proof.basis == basis)
    }

    /// Ids in insertion order
    pub fn ids(&self) -> Vec<ProofId> {
        self.0.iter().map(|proof| proof.id).collect()
    }

    /// Number of proofs
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the snapshot holds no proofs
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for LedgerSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for proof in &self.0 {
            map.serialize_entry(&proof.id, proof)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn equation(claim: &str) -> ProofDraft {
        ProofDraft::new(ProofKind::Equation, claim, "test_basis")
    }

    #[test]
    fn test_ids_are_sequential_from_one() {
        let mut ledger = ProofLedger::new();
        let a = ledger.add(equation("a"));
        let b = ledger.add(equation("b"));

        assert_eq!(a.to_string(), "P0001");
        assert_eq!(b.to_string(), "P0002");
        assert!(a < b);
    }

    #[test]
    fn test_id_rendering_past_four_digits() {
        let small = ProofId::from_sequence(9999);
        let large = ProofId::from_sequence(10000);

        assert_eq!(large.to_string(), "P10000");
        // Numeric ordering, not lexicographic
        assert!(small < large);
    }

    #[test]
    fn test_get_unknown_id() {
        let mut ledger = ProofLedger::new();
        ledger.add(equation("only"));

        let missing = ProofId::from_sequence(7);
        assert_eq!(ledger.get(missing), Err(LedgerError::NotFound(missing)));
        assert!(ledger.get(ProofId::from_sequence(0)).is_err());
    }

    #[test]
    fn test_draft_fields_are_kept() {
        let mut ledger = ProofLedger::new();
        let id = ledger.add(
            ProofDraft::new(ProofKind::Assumption, "slurry estimate", "slurry_temp_c")
                .input("slurry_temp_c", Option::<f64>::None)
                .input("slurry_peak_est_c", 91.5)
                .output(91.5)
                .notes("Measured beats estimated.")
                .uncertainty("estimated"),
        );

        let proof = ledger.get(id).unwrap();
        assert_eq!(proof.kind, ProofKind::Assumption);
        assert_eq!(proof.inputs["slurry_temp_c"], Value::Null);
        assert_eq!(proof.output, serde_json::json!(91.5));
        assert_eq!(proof.uncertainty.as_deref(), Some("estimated"));
        let keys: Vec<&String> = proof.inputs.keys().collect();
        assert_eq!(keys, ["slurry_temp_c", "slurry_peak_est_c"]);
    }

    #[test]
    fn test_cite_axiom_uses_codex_key() {
        let mut ledger = ProofLedger::new();
        let id = ledger.cite_axiom(AxiomKey::NoGuessing, "refuse", Map::new());

        let proof = ledger.get(id).unwrap();
        assert_eq!(proof.kind, ProofKind::Axiom);
        assert_eq!(proof.basis, "no_guessing");
        assert_eq!(proof.output, Value::Bool(true));
    }

    #[test]
    fn test_snapshot_serializes_as_ordered_map() {
        let mut ledger = ProofLedger::new();
        ledger.add(equation("first"));
        ledger.add(equation("second"));

        let json = serde_json::to_value(ledger.export()).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["P0001", "P0002"]);
        assert_eq!(json["P0002"]["claim"], "second");
        assert_eq!(json["P0001"]["kind"], "equation");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ids are strictly increasing and all resolvable
        #[test]
        fn test_ids_strictly_increasing(n in 1usize..200) {
            let mut ledger = ProofLedger::new();
            let ids: Vec<ProofId> = (0..n)
                .map(|i| ledger.add(ProofDraft::new(ProofKind::Measurement, format!("m{}", i), "m")))
                .collect();

            for pair in ids.windows(2) {
                prop_assert!(pair[0] < pair[1]);
            }
            for id in &ids {
                prop_assert!(ledger.contains(*id));
            }
            prop_assert_eq!(ledger.export().ids(), ids);
        }

        /// Property: two ledgers fed the same drafts are identical
        #[test]
        fn test_ledger_determinism(claims in proptest::collection::vec("[a-z]{1,8}", 1..20)) {
            let build = || {
                let mut ledger = ProofLedger::new();
                for claim in &claims {
                    ledger.add(ProofDraft::new(ProofKind::Equation, claim.clone(), "eq"));
                }
                ledger.into_snapshot()
            };

            prop_assert_eq!(build(), build());
        }
    }
}
