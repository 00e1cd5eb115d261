//! Inference engine: repeated full passes to a fixpoint.
//!
//! Each pass recomputes every hypothesis from scratch against the evidence
//! overlaid on the *previous* pass's derived snapshot (Jacobi iteration), so
//! hypothesis order never affects the outcome and identical inputs reproduce
//! identical results bit-for-bit. The loop stops when no derived certainty
//! moves by more than the tolerance, or at the pass bound — the latter is
//! reported on the result, never raised as an error.

use std::collections::HashMap;

use crate::cf::{Cf, combine_all};
use crate::evidence::EvidenceStore;
use crate::kb::KnowledgeBase;
use crate::rule::{CertaintySource, Condition};

use super::{Firing, Inference};

/// Stateless inference engine — per-run state lives on the stack of [`run`].
///
/// [`run`]: InferEngine::run
pub struct InferEngine<'a> {
    kb: &'a KnowledgeBase,
    max_passes: usize,
    tolerance: f64,
}

/// Evidence overlaid on the previous pass's derived snapshot.
///
/// An explicit assertion takes precedence over a derived value for the same
/// condition; hypotheses not asserted as evidence chain through their derived
/// certainty from the prior pass.
struct PassSource<'a> {
    evidence: &'a EvidenceStore,
    derived: &'a HashMap<Condition, Cf>,
}

impl CertaintySource for PassSource<'_> {
    fn certainty(&self, condition: &Condition) -> Option<Cf> {
        self.evidence
            .get(condition)
            .or_else(|| self.derived.get(condition).copied())
    }
}

impl<'a> InferEngine<'a> {
    /// Create an engine over a knowledge base with the given fixpoint
    /// parameters.
    pub fn new(kb: &'a KnowledgeBase, max_passes: usize, tolerance: f64) -> Self {
        Self {
            kb,
            max_passes,
            tolerance,
        }
    }

    /// Run inference to a fixpoint over an evidence snapshot.
    ///
    /// Pure with respect to its inputs: the evidence and knowledge base are
    /// untouched, and re-running with the same inputs yields the same result.
    pub fn run(&self, evidence: &EvidenceStore) -> Inference {
        // Every hypothesis starts unknown and is available to antecedents of
        // later passes through the snapshot.
        let mut derived: HashMap<Condition, Cf> = self
            .kb
            .hypotheses()
            .iter()
            .map(|h| (h.clone(), Cf::UNKNOWN))
            .collect();

        let mut firings: Vec<Firing> = Vec::new();
        let mut passes = 0;
        let mut converged = false;

        while passes < self.max_passes {
            passes += 1;
            let snapshot = derived.clone();
            let source = PassSource {
                evidence,
                derived: &snapshot,
            };

            firings.clear();
            let mut delta = 0.0_f64;

            for hypothesis in self.kb.hypotheses() {
                let mut contributions: Vec<Cf> = Vec::new();

                for (rule_index, rule) in self.kb.rules_for(hypothesis) {
                    let antecedent_cf = rule.antecedent.eval(&source);
                    let fired_cf = rule.fired_cf(antecedent_cf);
                    let antecedent_known = rule
                        .antecedent
                        .facts()
                        .iter()
                        .all(|condition| source.certainty(condition).is_some());

                    contributions.push(fired_cf);
                    firings.push(Firing {
                        rule_index,
                        consequent: hypothesis.clone(),
                        antecedent_cf,
                        fired_cf,
                        antecedent_known,
                    });
                }

                let value = combine_all(contributions).unwrap_or(Cf::UNKNOWN);
                let previous = snapshot.get(hypothesis).copied().unwrap_or(Cf::UNKNOWN);
                delta = delta.max((value.get() - previous.get()).abs());
                derived.insert(hypothesis.clone(), value);
            }

            tracing::debug!(pass = passes, delta, "inference pass complete");

            if delta <= self.tolerance {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(
                passes,
                "inference did not reach a fixpoint within the pass bound; result may be unstable"
            );
        }

        let certainties = self
            .kb
            .hypotheses()
            .iter()
            .map(|h| (h.clone(), derived.get(h).copied().unwrap_or(Cf::UNKNOWN)))
            .collect();

        Inference {
            certainties,
            firings,
            passes,
            converged,
        }
    }
}
