//! Rule data model: conditions, compound antecedents, and rules.
//!
//! A [`Condition`] is a leaf assertion (`today is rain`). An [`Antecedent`] is
//! an expression tree over conditions; the surface grammar only produces flat
//! uniform conjunctions or disjunctions, but the tree is general so rules can
//! be built programmatically. A [`Rule`] pairs an antecedent with the single
//! condition it concludes and the rule author's stated certainty.
//!
//! Antecedent evaluation is pure: conjunction takes the minimum of its clause
//! certainties (a conjunction is no more certain than its weakest clause),
//! disjunction the maximum.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cf::Cf;

/// A leaf assertion: a subject in a state, e.g. `today is rain`.
///
/// Used both as an evidence key and as an antecedent/consequent operand.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Condition {
    pub subject: String,
    pub state: String,
}

impl Condition {
    /// Create a condition from a subject and a state.
    pub fn new(subject: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            state: state.into(),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.subject, self.state)
    }
}

/// A source of current certainties for conditions.
///
/// Returns `None` for a condition with no asserted or derived value, keeping
/// "unknown" distinguishable from an explicit certainty of 0 — evaluation
/// treats both as [`Cf::UNKNOWN`], but diagnostics can tell them apart.
pub trait CertaintySource {
    fn certainty(&self, condition: &Condition) -> Option<Cf>;
}

impl CertaintySource for HashMap<Condition, Cf> {
    fn certainty(&self, condition: &Condition) -> Option<Cf> {
        self.get(condition).copied()
    }
}

/// The evidence-side expression of a rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Antecedent {
    /// A single condition, looked up directly in the certainty source.
    Fact(Condition),
    /// Conjunction: certainty is the minimum over the clauses.
    All(Vec<Antecedent>),
    /// Disjunction: certainty is the maximum over the clauses.
    Any(Vec<Antecedent>),
}

impl Antecedent {
    /// Evaluate this antecedent against a certainty source.
    ///
    /// Pure and referentially transparent: repeated calls with the same
    /// inputs return identical output. Unknown leaves evaluate to
    /// [`Cf::UNKNOWN`]; negative certainties participate in min/max like any
    /// other value, so a disconfirmed clause drags a conjunction negative.
    pub fn eval<S: CertaintySource + ?Sized>(&self, source: &S) -> Cf {
        match self {
            Antecedent::Fact(condition) => source.certainty(condition).unwrap_or(Cf::UNKNOWN),
            Antecedent::All(clauses) => fold_eval(clauses, source, f64::min),
            Antecedent::Any(clauses) => fold_eval(clauses, source, f64::max),
        }
    }

    /// Collect every leaf condition in this antecedent, in clause order.
    pub fn facts(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        self.collect_facts(&mut out);
        out
    }

    fn collect_facts<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Antecedent::Fact(condition) => out.push(condition),
            Antecedent::All(clauses) | Antecedent::Any(clauses) => {
                for clause in clauses {
                    clause.collect_facts(out);
                }
            }
        }
    }
}

fn fold_eval<S: CertaintySource + ?Sized>(
    clauses: &[Antecedent],
    source: &S,
    pick: fn(f64, f64) -> f64,
) -> Cf {
    let mut folded: Option<f64> = None;
    for clause in clauses {
        let value = clause.eval(source).get();
        folded = Some(match folded {
            None => value,
            Some(acc) => pick(acc, value),
        });
    }
    // min/max of in-range values stays in range; an empty clause list (which
    // the parser never produces) evaluates to unknown.
    folded.and_then(Cf::new).unwrap_or(Cf::UNKNOWN)
}

impl fmt::Display for Antecedent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Antecedent::Fact(condition) => write!(f, "{condition}"),
            Antecedent::All(clauses) => write_joined(f, clauses, "AND"),
            Antecedent::Any(clauses) => write_joined(f, clauses, "OR"),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, clauses: &[Antecedent], connective: &str) -> fmt::Result {
    for (i, clause) in clauses.iter().enumerate() {
        if i > 0 {
            write!(f, " {connective} ")?;
        }
        match clause {
            Antecedent::Fact(condition) => write!(f, "{condition}")?,
            nested => write!(f, "({nested})")?,
        }
    }
    Ok(())
}

/// A single if-then rule with its stated certainty.
///
/// Immutable once parsed. Duplicate rules for the same consequent are allowed
/// and all contribute to the combined certainty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub antecedent: Antecedent,
    pub consequent: Condition,
    pub cf: Cf,
}

impl Rule {
    /// Create a rule.
    pub fn new(antecedent: Antecedent, consequent: Condition, cf: Cf) -> Self {
        Self {
            antecedent,
            consequent,
            cf,
        }
    }

    /// The certainty this rule contributes toward its consequent, given the
    /// current certainty of its antecedent.
    ///
    /// A non-positive antecedent certainty still contributes: the product may
    /// be zero (no effect under combination) or negative (degrading or
    /// reversing the conclusion).
    pub fn fired_cf(&self, antecedent_cf: Cf) -> Cf {
        antecedent_cf.scale(self.cf)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} then {} \\cf {}", self.antecedent, self.consequent, self.cf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cf(value: f64) -> Cf {
        Cf::new(value).unwrap()
    }

    fn source(entries: &[(&str, &str, f64)]) -> HashMap<Condition, Cf> {
        entries
            .iter()
            .map(|&(subject, state, value)| (Condition::new(subject, state), cf(value)))
            .collect()
    }

    #[test]
    fn fact_reads_the_source() {
        let src = source(&[("today", "rain", 0.8)]);
        let fact = Antecedent::Fact(Condition::new("today", "rain"));
        assert_eq!(fact.eval(&src).get(), 0.8);
    }

    #[test]
    fn unknown_fact_evaluates_to_zero() {
        let src = source(&[]);
        let fact = Antecedent::Fact(Condition::new("today", "rain"));
        assert_eq!(fact.eval(&src).get(), 0.0);
    }

    #[test]
    fn single_operand_conjunction_and_disjunction() {
        let src = source(&[("today", "rain", 0.7)]);
        let fact = Antecedent::Fact(Condition::new("today", "rain"));
        assert_eq!(Antecedent::All(vec![fact.clone()]).eval(&src).get(), 0.7);
        assert_eq!(Antecedent::Any(vec![fact]).eval(&src).get(), 0.7);
    }

    #[test]
    fn conjunction_is_the_minimum() {
        let src = source(&[("a", "x", 0.9), ("b", "y", 0.3), ("c", "z", 0.6)]);
        let all = Antecedent::All(vec![
            Antecedent::Fact(Condition::new("a", "x")),
            Antecedent::Fact(Condition::new("b", "y")),
            Antecedent::Fact(Condition::new("c", "z")),
        ]);
        assert_eq!(all.eval(&src).get(), 0.3);
    }

    #[test]
    fn disjunction_is_the_maximum() {
        let src = source(&[("a", "x", -0.9), ("b", "y", 0.3), ("c", "z", 0.6)]);
        let any = Antecedent::Any(vec![
            Antecedent::Fact(Condition::new("a", "x")),
            Antecedent::Fact(Condition::new("b", "y")),
            Antecedent::Fact(Condition::new("c", "z")),
        ]);
        assert_eq!(any.eval(&src).get(), 0.6);
    }

    #[test]
    fn mixed_sign_conjunction_goes_negative() {
        let src = source(&[("a", "x", 0.9), ("b", "y", -0.4)]);
        let all = Antecedent::All(vec![
            Antecedent::Fact(Condition::new("a", "x")),
            Antecedent::Fact(Condition::new("b", "y")),
        ]);
        assert_eq!(all.eval(&src).get(), -0.4);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let src = source(&[("a", "x", 0.9), ("b", "y", 0.2)]);
        let all = Antecedent::All(vec![
            Antecedent::Fact(Condition::new("a", "x")),
            Antecedent::Fact(Condition::new("b", "y")),
        ]);
        let first = all.eval(&src);
        let second = all.eval(&src);
        assert_eq!(first, second);
    }

    #[test]
    fn fired_cf_scales_and_preserves_sign() {
        let rule = Rule::new(
            Antecedent::Fact(Condition::new("today", "rain")),
            Condition::new("tomorrow", "dry"),
            cf(0.6),
        );
        assert_eq!(rule.fired_cf(cf(1.0)).get(), 0.6);
        assert_eq!(rule.fired_cf(cf(0.0)).get(), 0.0);
        assert_eq!(rule.fired_cf(cf(-0.5)).get(), -0.3);
    }

    #[test]
    fn facts_collects_leaves_in_order() {
        let all = Antecedent::All(vec![
            Antecedent::Fact(Condition::new("a", "x")),
            Antecedent::Fact(Condition::new("b", "y")),
        ]);
        let facts = all.facts();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].subject, "a");
        assert_eq!(facts[1].subject, "b");
    }

    #[test]
    fn rule_display_round_trips_the_grammar_shape() {
        let rule = Rule::new(
            Antecedent::All(vec![
                Antecedent::Fact(Condition::new("today", "rain")),
                Antecedent::Fact(Condition::new("rainfall", "low")),
            ]),
            Condition::new("tomorrow", "dry"),
            cf(0.6),
        );
        assert_eq!(
            rule.to_string(),
            "today is rain AND rainfall is low then tomorrow is dry \\cf 0.6"
        );
    }
}
