//! Evidence store: the caller-owned asserted facts for one inference session.
//!
//! Evidence maps conditions to the certainty the user asserted for them.
//! Assertions are validated at the boundary — an out-of-range certainty is
//! rejected and never stored. The store is mutable; any mutation invalidates
//! previously derived hypothesis certainties, so the caller re-runs inference
//! after changing it.

use std::collections::HashMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cf::Cf;
use crate::error::EvidenceError;
use crate::rule::{CertaintySource, Condition};

/// Asserted facts for one session, in assertion order.
#[derive(Debug, Clone, Default)]
pub struct EvidenceStore {
    asserted: HashMap<Condition, Cf>,
    /// First-assertion order, for reproducible listing.
    order: Vec<Condition>,
}

impl EvidenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assert a condition with an already-validated certainty. Re-asserting
    /// overwrites the value but keeps the condition's original position.
    pub fn insert(&mut self, condition: Condition, cf: Cf) {
        if !self.asserted.contains_key(&condition) {
            self.order.push(condition.clone());
        }
        self.asserted.insert(condition, cf);
    }

    /// Assert a condition from a raw value, rejecting values outside `[-1, 1]`.
    pub fn insert_value(
        &mut self,
        subject: &str,
        state: &str,
        value: f64,
    ) -> Result<(), EvidenceError> {
        let cf = Cf::new(value).ok_or_else(|| EvidenceError::InvalidCertainty {
            subject: subject.to_string(),
            state: state.to_string(),
            value,
        })?;
        self.insert(Condition::new(subject, state), cf);
        Ok(())
    }

    /// Apply a parsed [`Assertion`].
    pub fn apply(&mut self, assertion: &Assertion) -> Result<(), EvidenceError> {
        self.insert_value(&assertion.subject, &assertion.state, assertion.cf)
    }

    /// The asserted certainty for a condition, if any.
    pub fn get(&self, condition: &Condition) -> Option<Cf> {
        self.asserted.get(condition).copied()
    }

    /// Withdraw an assertion, returning its certainty if it was present.
    pub fn retract(&mut self, condition: &Condition) -> Option<Cf> {
        let removed = self.asserted.remove(condition);
        if removed.is_some() {
            self.order.retain(|c| c != condition);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.asserted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asserted.is_empty()
    }

    /// Iterate assertions in first-assertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Condition, Cf)> {
        self.order
            .iter()
            .filter_map(|c| self.asserted.get(c).map(|&cf| (c, cf)))
    }
}

impl CertaintySource for EvidenceStore {
    fn certainty(&self, condition: &Condition) -> Option<Cf> {
        self.get(condition)
    }
}

/// One `(subject, state, cf)` assertion, as supplied by the caller.
///
/// Deserializable from JSON evidence files and parseable from the CLI's
/// `<subject> is <state> = <cf>` syntax. The certainty is range-checked when
/// the assertion is applied to a store, not at parse time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assertion {
    pub subject: String,
    pub state: String,
    pub cf: f64,
}

impl FromStr for Assertion {
    type Err = EvidenceError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let malformed = || EvidenceError::MalformedAssertion {
            input: input.to_string(),
        };

        let (clause, value) = input.rsplit_once('=').ok_or_else(malformed)?;
        let cf: f64 = value.trim().parse().map_err(|_| malformed())?;

        let words: Vec<&str> = clause.split_whitespace().collect();
        let is_pos = words.iter().position(|w| *w == "is").ok_or_else(malformed)?;
        let (subject_words, state_words) = words.split_at(is_pos);
        let state_words = &state_words[1..];
        if subject_words.is_empty() || state_words.is_empty() {
            return Err(malformed());
        }

        Ok(Assertion {
            subject: subject_words.join(" "),
            state: state_words.join(" "),
            cf,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get() {
        let mut evidence = EvidenceStore::new();
        evidence.insert_value("today", "rain", 1.0).unwrap();
        assert_eq!(
            evidence.get(&Condition::new("today", "rain")).unwrap().get(),
            1.0
        );
        assert!(evidence.get(&Condition::new("today", "dry")).is_none());
    }

    #[test]
    fn out_of_range_assertion_rejected_and_not_stored() {
        let mut evidence = EvidenceStore::new();
        let err = evidence.insert_value("today", "rain", 1.5).unwrap_err();
        assert!(matches!(err, EvidenceError::InvalidCertainty { value, .. } if value == 1.5));
        assert!(evidence.is_empty());
    }

    #[test]
    fn reassertion_overwrites_but_keeps_position() {
        let mut evidence = EvidenceStore::new();
        evidence.insert_value("a", "x", 0.2).unwrap();
        evidence.insert_value("b", "y", 0.4).unwrap();
        evidence.insert_value("a", "x", 0.9).unwrap();

        let listed: Vec<(String, f64)> = evidence
            .iter()
            .map(|(c, cf)| (c.to_string(), cf.get()))
            .collect();
        assert_eq!(listed, vec![("a is x".into(), 0.9), ("b is y".into(), 0.4)]);
    }

    #[test]
    fn retract_removes_the_assertion() {
        let mut evidence = EvidenceStore::new();
        evidence.insert_value("a", "x", 0.2).unwrap();
        assert_eq!(evidence.retract(&Condition::new("a", "x")).unwrap().get(), 0.2);
        assert!(evidence.is_empty());
        assert!(evidence.retract(&Condition::new("a", "x")).is_none());
    }

    #[test]
    fn assertion_from_str() {
        let assertion: Assertion = "today is rain = 1.0".parse().unwrap();
        assert_eq!(assertion.subject, "today");
        assert_eq!(assertion.state, "rain");
        assert_eq!(assertion.cf, 1.0);

        let multi: Assertion = "the sky is very dark = -0.25".parse().unwrap();
        assert_eq!(multi.subject, "the sky");
        assert_eq!(multi.state, "very dark");
    }

    #[test]
    fn malformed_assertions_rejected() {
        assert!("today is rain".parse::<Assertion>().is_err()); // no `=`
        assert!("today rain = 1.0".parse::<Assertion>().is_err()); // no `is`
        assert!("is rain = 1.0".parse::<Assertion>().is_err()); // empty subject
        assert!("today is = 1.0".parse::<Assertion>().is_err()); // empty state
        assert!("today is rain = wet".parse::<Assertion>().is_err()); // non-numeric
    }

    #[test]
    fn assertions_deserialize_from_json() {
        let parsed: Vec<Assertion> = serde_json::from_str(
            r#"[{"subject": "today", "state": "rain", "cf": 1.0}]"#,
        )
        .unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].subject, "today");
    }
}
