//! Certainty factors and the MYCIN combination algebra.
//!
//! A certainty factor (CF) is a value in `[-1, 1]` expressing belief strength:
//! positive favors truth, negative favors falsity, 0 is neutral/unknown. The
//! algebra combines independent contributions to the same hypothesis:
//!
//! - both non-negative: `cf1 + cf2·(1 − cf1)` — reinforcement toward 1
//! - both non-positive: `cf1 + cf2·(1 + cf1)` — reinforcement toward −1
//! - opposite signs: `(cf1 + cf2) / (1 − min(|cf1|, |cf2|))`, defined as 0
//!   when the denominator vanishes (total cancellation of ±1)
//!
//! Combination is commutative and has no prior value as its identity, so a
//! left fold over any ordering of contributions yields the same result.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A certainty factor: a belief strength in `[-1, 1]`.
///
/// The range invariant is enforced at every entry point: [`Cf::new`] refuses
/// out-of-range values, deserialization validates, and the combination
/// operations cannot leave the range.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Cf(f64);

impl Cf {
    /// The neutral/unknown certainty. Conditions with no asserted or derived
    /// value evaluate to this.
    pub const UNKNOWN: Cf = Cf(0.0);

    /// Create a certainty factor, refusing values outside `[-1, 1]` (including
    /// NaN). Out-of-range values are never clamped.
    pub fn new(value: f64) -> Option<Cf> {
        if (-1.0..=1.0).contains(&value) {
            Some(Cf(value))
        } else {
            None
        }
    }

    /// The underlying value.
    pub fn get(self) -> f64 {
        self.0
    }

    /// Scale this certainty by another — a rule's stated CF scaled by how
    /// certain its antecedent currently is. The product of two in-range values
    /// is in range.
    pub fn scale(self, other: Cf) -> Cf {
        Cf(self.0 * other.0)
    }

    /// Combine two independent contributions to the same hypothesis.
    ///
    /// Commutative; 0 is a fixed point of both same-sign branches, so a
    /// contribution of 0 never moves the result.
    pub fn combine(self, other: Cf) -> Cf {
        let (a, b) = (self.0, other.0);
        let combined = if a >= 0.0 && b >= 0.0 {
            a + b * (1.0 - a)
        } else if a <= 0.0 && b <= 0.0 {
            a + b * (1.0 + a)
        } else {
            let denominator = 1.0 - a.abs().min(b.abs());
            if denominator == 0.0 {
                // |a| == |b| == 1 with opposite signs: total cancellation.
                0.0
            } else {
                (a + b) / denominator
            }
        };
        // Guard against floating-point overshoot at the range edges.
        Cf(combined.clamp(-1.0, 1.0))
    }
}

/// Fold a sequence of fired contributions into a single certainty.
///
/// Returns `None` for an empty sequence (no rule fired — the hypothesis stays
/// unknown); the first contribution passes through unchanged.
pub fn combine_all<I: IntoIterator<Item = Cf>>(contributions: I) -> Option<Cf> {
    contributions
        .into_iter()
        .fold(None, |acc, cf| match acc {
            None => Some(cf),
            Some(prev) => Some(prev.combine(cf)),
        })
}

impl fmt::Display for Cf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Cf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Cf {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Cf::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!("certainty factor {value} is outside [-1, 1]"))
        })
    }
}
