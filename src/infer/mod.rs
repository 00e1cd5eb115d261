//! Fixpoint forward-inference over the knowledge base.
//!
//! One inference run derives a certainty for every hypothesis in the
//! knowledge base from an evidence snapshot, iterating full evaluation passes
//! until no derived certainty moves (fixpoint) or a pass bound is hit. The
//! result carries the derived mapping plus the firing trace from the final
//! pass, so callers can explain how each certainty came about.

pub mod engine;

pub use engine::InferEngine;

use serde::Serialize;

use crate::cf::Cf;
use crate::rule::Condition;

/// One rule evaluation from the final inference pass.
///
/// `antecedent_cf` is the evaluated certainty of the rule's antecedent;
/// `fired_cf` is the contribution passed into cross-rule combination
/// (`antecedent_cf` scaled by the rule's stated certainty). A rule with an
/// unknown antecedent still appears here with a contribution of 0 — the trace
/// distinguishes unfired rules from rules fired at an explicit zero via
/// `antecedent_known`.
#[derive(Debug, Clone, Serialize)]
pub struct Firing {
    /// Index of the rule in the knowledge base (file order).
    pub rule_index: usize,
    /// The hypothesis the rule concludes.
    pub consequent: Condition,
    /// Evaluated antecedent certainty.
    pub antecedent_cf: Cf,
    /// Contribution toward the consequent.
    pub fired_cf: Cf,
    /// Whether every leaf of the antecedent had an asserted or derived value.
    pub antecedent_known: bool,
}

/// Result of one inference run.
#[derive(Debug, Clone, Serialize)]
pub struct Inference {
    /// Derived certainty per hypothesis, in the knowledge base's hypothesis
    /// order. Hypotheses whose rules never fired stay at [`Cf::UNKNOWN`].
    pub certainties: Vec<(Condition, Cf)>,
    /// Every rule evaluation from the final pass, in rule order per
    /// hypothesis.
    pub firings: Vec<Firing>,
    /// Number of passes executed.
    pub passes: usize,
    /// Whether a fixpoint was reached within the pass bound. `false` means
    /// the result is best-effort and may be unstable.
    pub converged: bool,
}

impl Inference {
    /// The derived certainty for a hypothesis, if the knowledge base
    /// concludes it at all.
    pub fn certainty(&self, hypothesis: &Condition) -> Option<Cf> {
        self.certainties
            .iter()
            .find(|(condition, _)| condition == hypothesis)
            .map(|&(_, cf)| cf)
    }

    /// The firings that contributed a non-zero certainty — the rules that
    /// actually moved a hypothesis, for explanation output.
    pub fn fired(&self) -> impl Iterator<Item = &Firing> {
        self.firings.iter().filter(|f| f.fired_cf.get() != 0.0)
    }
}
