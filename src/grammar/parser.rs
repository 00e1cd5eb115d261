//! Parser: token stream → rules, plus document-level strict and lossy loaders.
//!
//! `parse_line` turns one tokenized line into a [`Rule`], reporting the first
//! grammar violation with the 1-based line number. The document loaders skip
//! comments and blank lines and differ only in malformed-line policy:
//! [`parse_document`] aborts on the first bad line, [`parse_document_lossy`]
//! skips bad lines and returns them alongside the rules that did parse.

use crate::cf::Cf;
use crate::error::RuleError;
use crate::rule::{Antecedent, Condition, Rule};

use super::lexer::{Token, TokenKind, tokenize};

/// Parse one rule line.
///
/// `line_no` is 1-based and only used for error reporting. The caller is
/// expected to have filtered comments and blank lines already.
pub fn parse_line(line: &str, line_no: usize) -> Result<Rule, RuleError> {
    let tokens = tokenize(line);

    let then_pos = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Then)
        .ok_or_else(|| RuleError::MissingThen {
            line: line_no,
            content: line.trim().to_string(),
        })?;
    let (antecedent_tokens, rest) = tokens.split_at(then_pos);
    let rest = &rest[1..];

    let cf_pos = rest
        .iter()
        .position(|t| t.kind == TokenKind::CfMarker)
        .ok_or_else(|| RuleError::MissingCertainty {
            line: line_no,
            content: line.trim().to_string(),
        })?;
    let (consequent_tokens, cf_tokens) = rest.split_at(cf_pos);
    let cf_tokens = &cf_tokens[1..];

    let cf = parse_certainty(cf_tokens, line_no)?;
    let consequent = parse_clause(consequent_tokens, line, line_no)?;
    let antecedent = parse_antecedent(antecedent_tokens, line, line_no)?;

    Ok(Rule::new(antecedent, consequent, cf))
}

/// Parse a full rule-definition text, aborting on the first malformed line.
pub fn parse_document(text: &str) -> Result<Vec<Rule>, RuleError> {
    let mut rules = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        rules.push(parse_line(raw, index + 1)?);
    }
    Ok(rules)
}

/// Parse a full rule-definition text, skipping malformed lines.
///
/// Returns the rules that parsed (in file order) and the errors for the lines
/// that did not. A malformed line never affects the surviving rules.
pub fn parse_document_lossy(text: &str) -> (Vec<Rule>, Vec<RuleError>) {
    let mut rules = Vec::new();
    let mut errors = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        match parse_line(raw, index + 1) {
            Ok(rule) => rules.push(rule),
            Err(error) => errors.push(error),
        }
    }
    (rules, errors)
}

fn parse_certainty(tokens: &[Token], line_no: usize) -> Result<Cf, RuleError> {
    let literal = tokens
        .first()
        .ok_or(RuleError::MissingCertaintyValue { line: line_no })?;

    let value: f64 = literal
        .text
        .parse()
        .map_err(|_| RuleError::InvalidCertainty {
            line: line_no,
            literal: literal.text.clone(),
        })?;

    let cf = Cf::new(value).ok_or(RuleError::CertaintyOutOfRange {
        line: line_no,
        value,
    })?;

    if let Some(extra) = tokens.get(1) {
        return Err(RuleError::TrailingInput {
            line: line_no,
            token: extra.text.clone(),
        });
    }

    Ok(cf)
}

/// Parse a `subject is state` clause from a token slice.
///
/// Exactly one `is` keyword with at least one plain word on each side; any
/// other keyword inside the clause is malformed.
fn parse_clause(tokens: &[Token], line: &str, line_no: usize) -> Result<Condition, RuleError> {
    let malformed = || RuleError::MalformedClause {
        line: line_no,
        fragment: fragment_of(line, tokens),
    };

    let is_pos = tokens
        .iter()
        .position(|t| t.kind == TokenKind::Is)
        .ok_or_else(malformed)?;
    let (subject_tokens, state_tokens) = tokens.split_at(is_pos);
    let state_tokens = &state_tokens[1..];

    let subject = join_words(subject_tokens).ok_or_else(malformed)?;
    let state = join_words(state_tokens).ok_or_else(malformed)?;

    Ok(Condition::new(subject, state))
}

/// Parse the antecedent token slice: clauses joined uniformly by AND or OR.
fn parse_antecedent(tokens: &[Token], line: &str, line_no: usize) -> Result<Antecedent, RuleError> {
    let has_and = tokens.iter().any(|t| t.kind == TokenKind::And);
    let has_or = tokens.iter().any(|t| t.kind == TokenKind::Or);
    if has_and && has_or {
        return Err(RuleError::MixedConnectives { line: line_no });
    }

    let mut clauses = Vec::new();
    for segment in tokens.split(|t| matches!(t.kind, TokenKind::And | TokenKind::Or)) {
        clauses.push(Antecedent::Fact(parse_clause(segment, line, line_no)?));
    }

    // `split` always yields at least one segment; a lone segment is a leaf.
    Ok(if clauses.len() == 1 {
        clauses.remove(0)
    } else if has_and {
        Antecedent::All(clauses)
    } else {
        Antecedent::Any(clauses)
    })
}

/// Rebuild a word sequence, rejecting embedded keywords and empty sequences.
fn join_words(tokens: &[Token]) -> Option<String> {
    if tokens.is_empty() || tokens.iter().any(|t| t.kind != TokenKind::Word) {
        return None;
    }
    Some(
        tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" "),
    )
}

/// Quote the original line fragment covered by a token slice.
fn fragment_of(line: &str, tokens: &[Token]) -> String {
    match (tokens.first(), tokens.last()) {
        (Some(first), Some(last)) => line[first.span.start..last.span.end].to_string(),
        _ => line.trim().to_string(),
    }
}
