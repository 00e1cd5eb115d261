//! # augur
//!
//! A certainty-factor expert system engine: textual if-then rules annotated
//! with certainty factors (CFs), user-asserted evidence, and a deterministic
//! forward pass iterated to a fixpoint that derives a combined certainty for
//! every hypothesis the rule base can conclude.
//!
//! ## Architecture
//!
//! - **Rule grammar** (`grammar`): line-oriented lexer + parser for
//!   `<antecedent> then <consequent> \cf <number>` rules
//! - **Knowledge base** (`kb`): immutable parsed rules, indexed by hypothesis
//! - **Evidence** (`evidence`): caller-owned asserted facts, one per session
//! - **Certainty algebra** (`cf`): MYCIN-style combination of independent
//!   contributions; conjunction = min, disjunction = max
//! - **Inference** (`infer`): Jacobi fixpoint driver with a firing trace
//! - **Engine facade** (`engine`): configuration + the public `infer` entry
//!   point
//! - **Banding** (`banding`): presentation-only CF → label lookup
//!
//! ## Library usage
//!
//! ```
//! use augur::engine::{Engine, EngineConfig};
//! use augur::evidence::EvidenceStore;
//! use augur::kb::KnowledgeBase;
//! use augur::rule::Condition;
//!
//! let kb = KnowledgeBase::parse("today is rain then tomorrow is wet \\cf 0.8").unwrap();
//! let engine = Engine::new(kb, EngineConfig::default()).unwrap();
//!
//! let mut evidence = EvidenceStore::new();
//! evidence.insert_value("today", "rain", 1.0).unwrap();
//!
//! let inference = engine.infer(&evidence);
//! assert_eq!(
//!     inference.certainty(&Condition::new("tomorrow", "wet")).unwrap().get(),
//!     0.8
//! );
//! ```

pub mod banding;
pub mod cf;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod grammar;
pub mod infer;
pub mod kb;
pub mod rule;
pub mod seeds;
