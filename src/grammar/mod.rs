//! Rule grammar: a line-oriented lexer and parser for the rule-definition text.
//!
//! One rule per non-comment, non-blank line:
//!
//! ```text
//! rule   := clause (AND clause)* "then" clause "\cf" number
//!         | clause (OR clause)*  "then" clause "\cf" number
//! clause := word+ "is" word+
//! ```
//!
//! Keywords (`AND`, `OR`, `then`, `is`, `\cf`) are matched exactly, case
//! included; a rule joins its clauses uniformly with AND or with OR, never a
//! mix. Lines starting with `#` and blank lines are skipped. The certainty
//! literal must be a real number in `[-1, 1]` — never clamped.
//!
//! The lexer tracks byte spans so parse errors can quote the exact offending
//! fragment of a line.

pub mod lexer;
pub mod parser;

pub use lexer::{Span, Token, TokenKind, tokenize};
pub use parser::{parse_document, parse_document_lossy, parse_line};
