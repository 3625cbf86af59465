//! Error types for query parsing.
//!
//! Every syntax problem surfaces as a [`ParseError`]: the kind of problem, the byte offset where
//! it was detected, and the original query so the error can be shown with a pointer.

use std::{error::Error, fmt};

/// The specific kind of syntax problem.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A quote was opened and never closed.
    #[error("unclosed quote")]
    UnclosedQuote,

    /// A quoted phrase contains no words.
    #[error("empty phrase")]
    EmptyPhrase,

    /// A parenthesis was opened and never closed.
    #[error("expected closing parenthesis")]
    UnclosedParen,

    /// A closing parenthesis has no matching opening one.
    #[error("unexpected closing parenthesis")]
    UnexpectedCloseParen,

    /// A pair of parentheses encloses nothing.
    #[error("empty group")]
    EmptyGroup,

    /// A boolean operator is missing an operand.
    #[error("{operator} needs an expression on both sides")]
    MissingOperand {
        /// The operator as written in the query.
        operator: String,
    },

    /// A `+`, `-` or `NOT` modifier is not followed by a clause.
    #[error("'{modifier}' must be followed by a term, phrase, or group")]
    DanglingModifier {
        /// The modifier as written in the query.
        modifier: String,
    },

    /// A clause carries more than one modifier.
    #[error("'{modifier}' cannot follow another modifier")]
    StackedModifier {
        /// The second modifier as written in the query.
        modifier: String,
    },

    /// Nothing in the query can be matched.
    #[error("query contains nothing to search for")]
    EmptyQuery,

    /// The query exceeds the configured length limit.
    #[error("query is {length} bytes long, the limit is {limit}")]
    TooLong {
        /// Length of the query in bytes.
        length: usize,
        /// The configured limit in bytes.
        limit: usize,
    },
}

/// A malformed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What went wrong.
    pub kind: ParseErrorKind,
    /// Byte offset in the query where the problem was detected, if it has one.
    pub position: Option<usize>,
    /// The original query string.
    pub query: String,
}

impl ParseError {
    /// Creates a parse error.
    pub fn new(kind: ParseErrorKind, position: Option<usize>, query: impl Into<String>) -> Self {
        Self {
            kind,
            position,
            query: query.into(),
        }
    }

    /// Returns the error message without context.
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        match &self.kind {
            ParseErrorKind::UnclosedQuote => {
                Some("Add a closing quote (\") to complete the phrase")
            }
            ParseErrorKind::EmptyPhrase => Some("Put at least one word between the quotes"),
            ParseErrorKind::UnclosedParen => {
                Some("Add a closing parenthesis ) to match the opening one")
            }
            ParseErrorKind::UnexpectedCloseParen => {
                Some("Remove the ) or add a matching ( before it")
            }
            ParseErrorKind::MissingOperand { operator } if operator == "OR" || operator == "||" => {
                Some("OR requires expressions on both sides, e.g., 'rust OR golang'")
            }
            ParseErrorKind::MissingOperand { .. } => {
                Some("AND requires expressions on both sides, e.g., 'rust AND async'")
            }
            ParseErrorKind::DanglingModifier { .. } => Some(
                "Attach the modifier directly to a clause, e.g., '-deprecated' or '+\"exact phrase\"'",
            ),
            ParseErrorKind::StackedModifier { .. } => Some("Use a single +, - or NOT per clause"),
            ParseErrorKind::EmptyGroup
            | ParseErrorKind::EmptyQuery
            | ParseErrorKind::TooLong { .. } => None,
        }
    }

    /// Formats the error with the query and a pointer at the error position.
    pub fn format_with_context(&self) -> String {
        let mut result = format!("query syntax error: {}\n", self.kind);
        result.push_str(&format!("  {}", self.query));
        if let Some(pos) = self.position {
            let column = self
                .query
                .char_indices()
                .take_while(|&(offset, _)| offset < pos)
                .count();
            result.push_str(&format!("\n  {}^", " ".repeat(column)));
        }
        result
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_with_context())?;
        if let Some(suggestion) = self.suggestion() {
            write!(f, "\nhint: {suggestion}")?;
        }
        Ok(())
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&self.kind)
    }
}
