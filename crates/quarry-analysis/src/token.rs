//! Positioned tokens.

use serde::Serialize;

/// A unit of text produced by splitting a field.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Token {
    /// The token text, exactly as it appears in the field.
    pub text: String,
    /// Ordinal position within the field, starting at 0.
    pub position: usize,
    /// Byte offset of the first character in the field text.
    pub start: usize,
    /// Byte offset one past the last character in the field text.
    pub end: usize,
    /// Whether this token follows the previous one with only punctuation in between.
    ///
    /// `foo-bar` produces `foo` (not joined) and `bar` (joined). The query parser binds runs of
    /// joined tokens into a single phrase.
    pub joined: bool,
}

impl Token {
    /// Length of the token text in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true for a zero-length token. The tokenizer never produces one.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}
