//! Axiom codex - the background rules proofs may cite
//!
//! The table is a process-wide static, read-only after compilation. Axioms are
//! declarative: proofs cite them for provenance and nothing evaluates them
//! against input values.

use serde::Serialize;

/// A named background rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Axiom {
    /// Lookup key, also used as the `basis` of axiom proofs
    pub key: &'static str,
    /// The rule itself
    pub statement: &'static str,
    /// Why the rule is in the codex
    pub notes: &'static str,
}

/// Typed handle for citing a codex entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AxiomKey {
    /// Reality is bounded by energy, time and material
    Constraints,
    /// Extraction and drying are energy plus mass transfer
    EnergyTransfer,
    /// Unmeasured means uncertain
    Measurement,
    /// Effects trace to interacting root causes
    Causation,
    /// Quality drifts without directed control
    Entropy,
    /// Missing inputs are requested, never fabricated
    NoGuessing,
}

impl AxiomKey {
    /// All keys in codex order
    pub const ALL: [AxiomKey; 6] = [
        AxiomKey::Constraints,
        AxiomKey::EnergyTransfer,
        AxiomKey::Measurement,
        AxiomKey::Causation,
        AxiomKey::Entropy,
        AxiomKey::NoGuessing,
    ];

    /// The codex entry for this key
    pub fn axiom(self) -> &'static Axiom {
        &CODEX[self as usize]
    }

    /// Get the key as a string
    pub fn as_str(self) -> &'static str {
        self.axiom().key
    }
}

// Indexed by `AxiomKey as usize`; keep both in the same order.
static CODEX: [Axiom; 6] = [
    Axiom {
        key: "constraints",
        statement: "Reality is bounded by constraints (energy/time/material).",
        notes: "Kill magical thinking.",
    },
    Axiom {
        key: "energy_transfer",
        statement: "Extraction is an energy + mass transfer problem.",
        notes: "Temperature & contact govern rate.",
    },
    Axiom {
        key: "measurement",
        statement: "If you cannot measure/proxy it, treat it as uncertain.",
        notes: "Uncertainty must be stated, not hidden.",
    },
    Axiom {
        key: "causation",
        statement: "Effects trace to root causes; avoid single-cause stories.",
        notes: "Use system interactions.",
    },
    Axiom {
        key: "entropy",
        statement: "Without directed control, quality drifts.",
        notes: "Stability requires process control.",
    },
    Axiom {
        key: "no_guessing",
        statement: "If inputs are missing, request them; do not fabricate.",
        notes: "Refusing drives fabricated answers to zero.",
    },
];

/// Read-only view over the static codex
#[derive(Debug, Clone, Copy)]
pub struct AxiomRegistry {
    axioms: &'static [Axiom],
}

static REGISTRY: AxiomRegistry = AxiomRegistry { axioms: &CODEX };

impl AxiomRegistry {
    /// The process-wide registry
    pub fn global() -> &'static AxiomRegistry {
        &REGISTRY
    }

    /// Look up an axiom by key
    pub fn get(&self, key: &str) -> Option<&'static Axiom> {
        self.axioms.iter().find(|axiom| axiom.key == key)
    }

    /// All axioms in codex order
    pub fn axioms(&self) -> &'static [Axiom] {
        self.axioms
    }

    /// `key: statement` lines for display
    pub fn rules(&self) -> Vec<String> {
        self.axioms
            .iter()
            .map(|axiom| format!("{}: {}", axiom.key, axiom.statement))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_match_table_order() {
        for key in AxiomKey::ALL {
            let axiom = key.axiom();
            assert_eq!(AxiomRegistry::global().get(axiom.key), Some(axiom));
        }
    }

    #[test]
    fn test_no_guessing_statement() {
        let axiom = AxiomRegistry::global().get("no_guessing").unwrap();
        assert_eq!(
            axiom.statement,
            "If inputs are missing, request them; do not fabricate."
        );
    }

    #[test]
    fn test_unknown_key() {
        assert!(AxiomRegistry::global().get("magic").is_none());
    }

    #[test]
    fn test_rules_rendering() {
        let rules = AxiomRegistry::global().rules();
        assert_eq!(rules.len(), 6);
        assert!(rules[0].starts_with("constraints: "));
    }
}
