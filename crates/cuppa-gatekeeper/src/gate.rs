//! Missingness gate

use std::fmt;

/// One required field of an input record
pub struct RequiredField<T> {
    /// Field key
    pub key: &'static str,
    /// Text reported when the field is absent
    pub description: &'static str,
    present: fn(&T) -> bool,
}

impl<T> RequiredField<T> {
    /// Declare a required field
    pub fn new(key: &'static str, description: &'static str, present: fn(&T) -> bool) -> Self {
        Self {
            key,
            description,
            present,
        }
    }

    /// Whether the field is present on `input`
    pub fn is_present(&self, input: &T) -> bool {
        (self.present)(input)
    }
}

impl<T> fmt::Debug for RequiredField<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequiredField")
            .field("key", &self.key)
            .field("description", &self.description)
            .finish()
    }
}

/// Outcome of a gate check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateVerdict {
    /// Every required field is present
    Pass,
    /// At least one required field is absent
    Refuse {
        /// Missing-field descriptions, in declaration order
        missing: Vec<String>,
    },
}

impl GateVerdict {
    /// Whether the gate passed
    pub fn is_pass(&self) -> bool {
        matches!(self, GateVerdict::Pass)
    }
}

/// Ordered required-field set for one input record type
#[derive(Debug)]
pub struct MissingnessGate<T> {
    domain: &'static str,
    fields: Vec<RequiredField<T>>,
}

impl<T> MissingnessGate<T> {
    /// Create an empty gate for a domain
    pub fn new(domain: &'static str) -> Self {
        Self {
            domain,
            fields: Vec::new(),
        }
    }

    /// Append a required field
    pub fn require(mut self, key: &'static str, description: &'static str, present: fn(&T) -> bool) -> Self {
        self.fields.push(RequiredField::new(key, description, present));
        self
    }

    /// Domain name used in logs
    pub fn domain(&self) -> &'static str {
        self.domain
    }

    /// Declared fields, in order
    pub fn fields(&self) -> &[RequiredField<T>] {
        &self.fields
    }

    /// Descriptions of the absent fields, in declaration order
    pub fn check(&self, input: &T) -> Vec<String> {
        self.fields
            .iter()
            .filter(|field| !field.is_present(input))
            .map(|field| field.description.to_string())
            .collect()
    }

    /// Check and wrap the result in a verdict
    pub fn evaluate(&self, input: &T) -> GateVerdict {
        let missing = self.check(input);
        if missing.is_empty() {
            GateVerdict::Pass
        } else {
            tracing::warn!(domain = self.domain, ?missing, "required inputs missing");
            GateVerdict::Refuse { missing }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Sample {
        a: Option<f64>,
        b: Option<f64>,
        c: Option<bool>,
    }

    fn gate() -> MissingnessGate<Sample> {
        MissingnessGate::<Sample>::new("sample")
            .require("a", "a (first)", |s| s.a.is_some())
            .require("b", "b (second)", |s| s.b.is_some())
            .require("c", "c (third)", |s| s.c.is_some())
    }

    #[test]
    fn test_all_missing_in_declaration_order() {
        assert_eq!(
            gate().check(&Sample::default()),
            vec!["a (first)", "b (second)", "c (third)"]
        );
    }

    #[test]
    fn test_pass_when_complete() {
        let sample = Sample {
            a: Some(1.0),
            b: Some(0.0),
            c: Some(false),
        };
        assert_eq!(gate().evaluate(&sample), GateVerdict::Pass);
    }

    #[test]
    fn test_zero_and_false_count_as_present() {
        let sample = Sample {
            a: Some(0.0),
            b: None,
            c: Some(false),
        };
        assert_eq!(
            gate().evaluate(&sample),
            GateVerdict::Refuse {
                missing: vec!["b (second)".to_string()]
            }
        );
    }

    #[test]
    fn test_fields_are_exposed() {
        let keys: Vec<_> = gate().fields().iter().map(|f| f.key).collect();
        assert_eq!(keys, vec!["a", "b", "c"]);
        assert_eq!(gate().domain(), "sample");
    }
}
