//! Rich diagnostic error types for the augur engine.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes and help text so users know exactly what went wrong in
//! a rules file or an evidence assertion and how to fix it.

use miette::Diagnostic;
use thiserror::Error;

/// Top-level error type for the augur engine.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum AugurError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Rule(#[from] RuleError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Evidence(#[from] EvidenceError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),
}

// ---------------------------------------------------------------------------
// Rule parsing errors
// ---------------------------------------------------------------------------

/// Errors produced while parsing a rule-definition line.
///
/// Every variant carries the 1-based line number of the offending line so the
/// strict loader can point at it and the lenient loader can report what it
/// skipped.
#[derive(Debug, Error, Diagnostic)]
pub enum RuleError {
    #[error("line {line}: missing `then` keyword in \"{content}\"")]
    #[diagnostic(
        code(augur::rule::missing_then),
        help(
            "Every rule has the form `<antecedent> then <consequent> \\cf <number>`. \
             The `then` keyword is matched exactly (lowercase)."
        )
    )]
    MissingThen { line: usize, content: String },

    #[error("line {line}: missing `\\cf` marker in \"{content}\"")]
    #[diagnostic(
        code(augur::rule::missing_cf),
        help(
            "Every rule ends with a certainty factor: `... then <consequent> \\cf <number>`. \
             Append `\\cf` followed by a value in [-1, 1]."
        )
    )]
    MissingCertainty { line: usize, content: String },

    #[error("line {line}: `\\cf` marker with no value")]
    #[diagnostic(
        code(augur::rule::missing_cf_value),
        help("Follow the `\\cf` marker with a number in [-1, 1], e.g. `\\cf 0.6`.")
    )]
    MissingCertaintyValue { line: usize },

    #[error("line {line}: certainty factor \"{literal}\" is not a number")]
    #[diagnostic(
        code(augur::rule::invalid_cf),
        help("The certainty factor must be a real number in [-1, 1], e.g. `0.6` or `-0.4`.")
    )]
    InvalidCertainty { line: usize, literal: String },

    #[error("line {line}: certainty factor {value} is outside [-1, 1]")]
    #[diagnostic(
        code(augur::rule::cf_out_of_range),
        help(
            "Certainty factors express belief strength between -1 (definitely false) \
             and 1 (definitely true). Out-of-range values are rejected, never clamped."
        )
    )]
    CertaintyOutOfRange { line: usize, value: f64 },

    #[error("line {line}: malformed clause \"{fragment}\"")]
    #[diagnostic(
        code(augur::rule::malformed_clause),
        help(
            "A clause has the form `<subject> is <state>`, with at least one word on \
             each side of the `is` keyword and no other reserved keyword inside it."
        )
    )]
    MalformedClause { line: usize, fragment: String },

    #[error("line {line}: rule mixes AND and OR connectives")]
    #[diagnostic(
        code(augur::rule::mixed_connectives),
        help(
            "A single rule joins its clauses uniformly: either all AND or all OR. \
             Split the rule into two rules with the same consequent to express a mix."
        )
    )]
    MixedConnectives { line: usize },

    #[error("line {line}: unexpected trailing input \"{token}\" after the certainty factor")]
    #[diagnostic(
        code(augur::rule::trailing_input),
        help("Nothing may follow the certainty factor. Remove the extra tokens.")
    )]
    TrailingInput { line: usize, token: String },
}

// ---------------------------------------------------------------------------
// Evidence errors
// ---------------------------------------------------------------------------

/// Errors produced when asserting evidence.
#[derive(Debug, Error, Diagnostic)]
pub enum EvidenceError {
    #[error("certainty factor {value} for \"{subject} is {state}\" is outside [-1, 1]")]
    #[diagnostic(
        code(augur::evidence::cf_out_of_range),
        help(
            "Asserted certainty factors must lie in [-1, 1]. \
             Use 1 for certainly true, -1 for certainly false, 0 for unknown."
        )
    )]
    InvalidCertainty {
        subject: String,
        state: String,
        value: f64,
    },

    #[error("malformed assertion \"{input}\"")]
    #[diagnostic(
        code(augur::evidence::malformed_assertion),
        help(
            "Assertions have the form `<subject> is <state> = <number>`, \
             e.g. `today is rain = 1.0`."
        )
    )]
    MalformedAssertion { input: String },
}

// ---------------------------------------------------------------------------
// Engine errors
// ---------------------------------------------------------------------------

/// Errors produced by engine construction and configuration loading.
#[derive(Debug, Error, Diagnostic)]
pub enum EngineError {
    #[error("invalid configuration: {message}")]
    #[diagnostic(
        code(augur::engine::invalid_config),
        help("Check the EngineConfig fields. {message}")
    )]
    InvalidConfig { message: String },

    #[error("failed to read configuration file: {path}")]
    #[diagnostic(
        code(augur::engine::config_io),
        help("Ensure the file exists and is readable.")
    )]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse configuration file {path}: {message}")]
    #[diagnostic(
        code(augur::engine::config_parse),
        help("The configuration is TOML with optional `max_passes` and `tolerance` keys.")
    )]
    ConfigParse { path: String, message: String },
}

/// Convenience alias for functions returning augur results.
pub type AugurResult<T> = std::result::Result<T, AugurError>;
