//! Knowledge base: the immutable, consequent-indexed collection of parsed rules.
//!
//! Built once at load time and read-only thereafter, so it can be shared
//! across concurrent inference sessions without locking. Rules keep their
//! file order; duplicate rules for the same hypothesis are kept and all
//! contribute to combination.

use std::collections::{HashMap, HashSet};

use crate::error::RuleError;
use crate::grammar;
use crate::rule::{Condition, Rule};

/// The parsed rule set, indexed by hypothesis (consequent condition).
#[derive(Debug, Clone, Default)]
pub struct KnowledgeBase {
    /// All rules in file order.
    rules: Vec<Rule>,
    /// Hypothesis → indices into `rules`, preserving file order.
    by_consequent: HashMap<Condition, Vec<usize>>,
    /// Hypotheses in first-seen order, for deterministic iteration.
    hypotheses: Vec<Condition>,
}

impl KnowledgeBase {
    /// Load a rule-definition text, aborting on the first malformed line.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        Ok(Self::from_rules(grammar::parse_document(text)?))
    }

    /// Load a rule-definition text, skipping malformed lines.
    ///
    /// Returns the knowledge base built from the lines that parsed, plus the
    /// errors for the lines that were skipped.
    pub fn parse_lossy(text: &str) -> (Self, Vec<RuleError>) {
        let (rules, errors) = grammar::parse_document_lossy(text);
        (Self::from_rules(rules), errors)
    }

    /// Build a knowledge base from already-constructed rules, preserving order.
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        let mut by_consequent: HashMap<Condition, Vec<usize>> = HashMap::new();
        let mut hypotheses = Vec::new();

        for (index, rule) in rules.iter().enumerate() {
            let entry = by_consequent.entry(rule.consequent.clone()).or_default();
            if entry.is_empty() {
                hypotheses.push(rule.consequent.clone());
            }
            entry.push(index);
        }

        Self {
            rules,
            by_consequent,
            hypotheses,
        }
    }

    /// All rules in file order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Every hypothesis the rule base can conclude, in first-seen order.
    pub fn hypotheses(&self) -> &[Condition] {
        &self.hypotheses
    }

    /// Whether a condition is concluded by at least one rule.
    pub fn is_hypothesis(&self, condition: &Condition) -> bool {
        self.by_consequent.contains_key(condition)
    }

    /// The rules concluding a hypothesis, with their indices, in file order.
    pub fn rules_for<'a>(
        &'a self,
        hypothesis: &Condition,
    ) -> impl Iterator<Item = (usize, &'a Rule)> + 'a {
        self.by_consequent
            .get(hypothesis)
            .into_iter()
            .flatten()
            .map(|&index| (index, &self.rules[index]))
    }

    /// Every distinct condition appearing in an antecedent, in first-seen
    /// order — the evidence the rule base can consume. Conditions that are
    /// also hypotheses appear here too (they chain between passes).
    pub fn antecedent_conditions(&self) -> Vec<&Condition> {
        let mut seen = HashSet::new();
        let mut out = Vec::new();
        for rule in &self.rules {
            for condition in rule.antecedent.facts() {
                if seen.insert(condition) {
                    out.push(condition);
                }
            }
        }
        out
    }
}
