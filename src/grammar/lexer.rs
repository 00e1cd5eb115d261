//! Lexer: span-tracked whitespace tokenization and keyword classification.
//!
//! A rule line is split on whitespace; each token records its byte span in the
//! original line (so errors can quote fragments verbatim) and whether it is
//! one of the reserved keywords. Keyword matching is exact: `and` or `THEN`
//! are ordinary words, never connectives.

/// Byte-level source span for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

/// Classification of a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Any non-keyword token: a subject/state word or a number literal.
    Word,
    /// The `AND` connective.
    And,
    /// The `OR` connective.
    Or,
    /// The `then` separator between antecedent and consequent.
    Then,
    /// The `is` separator inside a clause.
    Is,
    /// The `\cf` marker introducing the certainty literal.
    CfMarker,
}

/// A single lexical token.
#[derive(Debug, Clone)]
pub struct Token {
    /// The surface text, exactly as written.
    pub text: String,
    /// Keyword classification.
    pub kind: TokenKind,
    /// Source position in the line.
    pub span: Span,
}

fn classify(word: &str) -> TokenKind {
    match word {
        "AND" => TokenKind::And,
        "OR" => TokenKind::Or,
        "then" => TokenKind::Then,
        "is" => TokenKind::Is,
        "\\cf" => TokenKind::CfMarker,
        _ => TokenKind::Word,
    }
}

/// Tokenize one rule line into span-tracked, keyword-classified tokens.
///
/// Whitespace around and between tokens is insignificant; an empty or
/// all-whitespace line yields no tokens.
pub fn tokenize(line: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut pos = 0;

    for word in line.split_whitespace() {
        let start = line[pos..].find(word).map(|i| i + pos).unwrap_or(pos);
        let end = start + word.len();

        tokens.push(Token {
            text: word.to_string(),
            kind: classify(word),
            span: Span { start, end },
        });

        pos = end;
    }

    tokens
}
