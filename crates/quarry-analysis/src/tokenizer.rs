//! The field tokenizer.
//!
//! Words are found with the Unicode word-boundary rules (UAX #29), the same segmentation
//! Lucene's standard tokenizer uses. Segments holding at least one alphanumeric character
//! become tokens; everything else only decides whether the next token is joined to the
//! previous one. The stream is lazy and a fresh call to [`tokenize`] re-scans from the start.

use std::{fmt, iter::FusedIterator};

use unicode_segmentation::{UWordBoundIndices, UnicodeSegmentation};

use crate::Token;

/// Lazy stream of tokens over one field.
#[derive(Clone)]
pub struct Tokens<'a> {
    /// Name of the field being tokenized.
    field: &'a str,
    /// Word-boundary segments of the field text with their byte offsets.
    segments: UWordBoundIndices<'a>,
    /// Position assigned to the next emitted token.
    position: usize,
}

impl<'a> Tokens<'a> {
    /// Creates a token stream over `text`.
    fn new(field: &'a str, text: &'a str) -> Self {
        Self {
            field,
            segments: text.split_word_bound_indices(),
            position: 0,
        }
    }

    /// The field name this stream was created for.
    pub fn field(&self) -> &'a str {
        self.field
    }
}

impl fmt::Debug for Tokens<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tokens")
            .field("field", &self.field)
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

impl Iterator for Tokens<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let mut crossed_space = false;
        for (start, segment) in self.segments.by_ref() {
            if !is_word(segment) {
                crossed_space |= segment.chars().any(char::is_whitespace);
                continue;
            }

            let token = Token {
                text: segment.to_string(),
                position: self.position,
                start,
                end: start + segment.len(),
                joined: self.position > 0 && !crossed_space,
            };
            self.position += 1;
            return Some(token);
        }
        None
    }
}

impl FusedIterator for Tokens<'_> {}

/// Tokenizes the text of a field.
///
/// The field name is carried along for the caller's benefit; every field is split with the
/// same rules. Tokenization never fails: empty or punctuation-only text yields no tokens.
pub fn tokenize<'a>(field: &'a str, text: &'a str) -> Tokens<'a> {
    Tokens::new(field, text)
}

/// Whether a word-boundary segment is a word rather than spacing or punctuation.
fn is_word(segment: &str) -> bool {
    segment.chars().any(char::is_alphanumeric)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(text: &str) -> Vec<String> {
        tokenize("text", text).map(|t| t.text).collect()
    }

    #[test]
    fn sentence_with_trailing_period_and_decimal() {
        let tokens: Vec<Token> = tokenize("field", "word1 word2 word3. word4 5.6").collect();

        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, ["word1", "word2", "word3", "word4", "5.6"]);

        let base = tokens[0].position;
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.position, base + i);
        }
    }

    #[test]
    fn empty_input() {
        assert!(texts("").is_empty());
        assert!(texts("   \t\n").is_empty());
    }

    #[test]
    fn punctuation_only() {
        assert!(texts("... -- !?").is_empty());
    }

    #[test]
    fn decimal_kept_whole() {
        assert_eq!(texts("word4 5.6"), ["word4", "5.6"]);
        assert_eq!(texts("pi is 3.14159."), ["pi", "is", "3.14159"]);
        assert_eq!(texts("1,000.25 dollars"), ["1,000.25", "dollars"]);
    }

    #[test]
    fn period_splits_number_from_letter() {
        assert_eq!(texts("5.x"), ["5", "x"]);
        assert_eq!(texts("end. start"), ["end", "start"]);
    }

    #[test]
    fn apostrophes_stay_inside_words() {
        assert_eq!(texts("can't O'Brien"), ["can't", "O'Brien"]);
        let tokens: Vec<Token> = tokenize("text", "don't-stop").collect();
        assert_eq!(tokens[0].text, "don't");
        assert!(tokens[1].joined);
    }

    #[test]
    fn letters_around_a_period_form_one_word() {
        assert_eq!(texts("see e.g here"), ["see", "e.g", "here"]);
    }

    #[test]
    fn symbols_are_separators() {
        let tokens: Vec<Token> = tokenize("text", "c++ & rust!").collect();
        let words: Vec<&str> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(words, ["c", "rust"]);
        assert!(!tokens[1].joined);
    }

    #[test]
    fn hyphen_compound_splits_and_joins() {
        let tokens: Vec<Token> = tokenize("text", "foo-bar").collect();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "foo");
        assert_eq!(tokens[1].text, "bar");
        assert_eq!(tokens[1].position, tokens[0].position + 1);
        assert!(!tokens[0].joined);
        assert!(tokens[1].joined);
    }

    #[test]
    fn whitespace_breaks_join() {
        let tokens: Vec<Token> = tokenize("text", "foo - bar").collect();
        assert_eq!(tokens.len(), 2);
        assert!(!tokens[1].joined);

        let tokens: Vec<Token> = tokenize("text", "word3. word4").collect();
        assert!(!tokens[1].joined);
    }

    #[test]
    fn first_token_never_joined() {
        let tokens: Vec<Token> = tokenize("text", "-leading").collect();
        assert_eq!(tokens[0].text, "leading");
        assert!(!tokens[0].joined);
    }

    #[test]
    fn offsets_point_into_source() {
        let text = "  héllo, wörld-42";
        for token in tokenize("text", text) {
            assert_eq!(&text[token.start..token.end], token.text);
            assert_eq!(token.len(), token.text.len());
        }
        assert_eq!(texts(text), ["héllo", "wörld", "42"]);
    }

    #[test]
    fn positions_are_consecutive() {
        let tokens: Vec<Token> = tokenize("text", "a-b c.d, e 1.5 f!g").collect();
        for pair in tokens.windows(2) {
            assert_eq!(pair[1].position, pair[0].position + 1);
        }
    }

    #[test]
    fn repeated_calls_are_identical() {
        let text = "The quick-brown fox, 2.5 times.";
        let first: Vec<Token> = tokenize("text", text).collect();
        let second: Vec<Token> = tokenize("text", text).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn field_name_does_not_change_rules() {
        let a: Vec<Token> = tokenize("title", "foo-bar 5.6").collect();
        let b: Vec<Token> = tokenize("body", "foo-bar 5.6").collect();
        assert_eq!(a, b);
        assert_eq!(tokenize("title", "").field(), "title");
    }

    #[test]
    fn stream_is_fused() {
        let mut tokens = tokenize("text", "one");
        assert!(tokens.next().is_some());
        assert!(tokens.next().is_none());
        assert!(tokens.next().is_none());
    }

    #[test]
    fn cloned_stream_resumes_independently() {
        let mut tokens = tokenize("text", "one two three");
        tokens.next();
        let rest: Vec<String> = tokens.clone().map(|t| t.text).collect();
        assert_eq!(rest, ["two", "three"]);
        assert_eq!(tokens.next().unwrap().text, "two");
    }

    #[test]
    fn token_serializes_to_json() {
        let token = tokenize("text", "5.6").next().unwrap();
        let json = serde_json::to_value(&token).unwrap();
        assert_eq!(json["text"], "5.6");
        assert_eq!(json["position"], 0);
        assert_eq!(json["joined"], false);
    }
}
