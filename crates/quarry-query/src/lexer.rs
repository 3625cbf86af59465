//! Query lexer.
//!
//! Converts a query string into a stream of lexemes for the parser. Words are kept raw; the
//! parser runs them through the field tokenizer so that query words split the same way
//! indexed text does.

use std::{iter::Peekable, str::CharIndices};

use crate::error::{ParseError, ParseErrorKind};

/// A lexeme in the query language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lexeme {
    /// An unquoted word, exactly as written.
    Word(String),

    /// The content of a quoted phrase, quotes stripped.
    Phrase(String),

    /// The AND keyword (`AND` or `&&`).
    And,

    /// The OR keyword (`OR` or `||`).
    Or,

    /// The NOT keyword.
    Not,

    /// Required prefix (`+`).
    Plus,

    /// Prohibited prefix (`-`).
    Minus,

    /// Left parenthesis.
    LParen,

    /// Right parenthesis.
    RParen,
}

impl Lexeme {
    /// The lexeme as it is written in a query, for error messages.
    pub fn spelling(&self) -> &str {
        match self {
            Self::Word(text) | Self::Phrase(text) => text,
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::LParen => "(",
            Self::RParen => ")",
        }
    }
}

/// A lexeme with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    /// The lexeme.
    pub lexeme: Lexeme,
    /// Byte offset of the lexeme in the query.
    pub offset: usize,
}

/// Splits a query string into lexemes.
struct Lexer<'a> {
    /// The original input string.
    input: &'a str,
    /// Character iterator with one-character lookahead.
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.char_indices().peekable(),
        }
    }

    /// Creates an error at a specific position.
    fn error_at(&self, kind: ParseErrorKind, position: usize) -> ParseError {
        ParseError::new(kind, Some(position), self.input)
    }

    /// Lexes the entire input, returning all lexemes or an error.
    fn lex(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut lexemes = Vec::new();

        while let Some(lexeme) = self.next_lexeme()? {
            lexemes.push(lexeme);
        }

        Ok(lexemes)
    }

    /// Returns the next lexeme, or None at end of input.
    fn next_lexeme(&mut self) -> Result<Option<Spanned>, ParseError> {
        self.skip_whitespace();

        let Some(&(offset, ch)) = self.chars.peek() else {
            return Ok(None);
        };

        let lexeme = match ch {
            '"' => self.read_phrase(offset)?,
            '(' => {
                self.chars.next();
                Lexeme::LParen
            }
            ')' => {
                self.chars.next();
                Lexeme::RParen
            }
            '+' | '-' => self.read_modifier(offset, ch)?,
            _ => self.read_word_or_keyword(offset),
        };

        Ok(Some(Spanned { lexeme, offset }))
    }

    /// Reads a quoted phrase starting at the opening quote.
    fn read_phrase(&mut self, start: usize) -> Result<Lexeme, ParseError> {
        self.chars.next(); // opening quote

        let content_start = start + 1;
        for (offset, ch) in self.chars.by_ref() {
            if ch == '"' {
                return Ok(Lexeme::Phrase(self.input[content_start..offset].to_string()));
            }
        }

        Err(self.error_at(ParseErrorKind::UnclosedQuote, start))
    }

    /// Reads a `+` or `-` prefix, which must be attached to the clause it modifies.
    fn read_modifier(&mut self, offset: usize, ch: char) -> Result<Lexeme, ParseError> {
        self.chars.next();

        match self.chars.peek() {
            Some(&(_, next)) if !next.is_whitespace() && next != ')' => {}
            _ => {
                return Err(self.error_at(
                    ParseErrorKind::DanglingModifier {
                        modifier: ch.to_string(),
                    },
                    offset,
                ));
            }
        }

        Ok(if ch == '+' {
            Lexeme::Plus
        } else {
            Lexeme::Minus
        })
    }

    /// Reads a word or a keyword.
    fn read_word_or_keyword(&mut self, start: usize) -> Lexeme {
        let mut end = self.input.len();

        while let Some(&(offset, ch)) = self.chars.peek() {
            if ch.is_whitespace() || ch == '(' || ch == ')' || ch == '"' {
                end = offset;
                break;
            }
            self.chars.next();
        }

        match &self.input[start..end] {
            "AND" | "&&" => Lexeme::And,
            "OR" | "||" => Lexeme::Or,
            "NOT" => Lexeme::Not,
            word => Lexeme::Word(word.to_string()),
        }
    }

    /// Skips whitespace characters.
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|&(_, ch)| ch.is_whitespace()).is_some() {}
    }
}

/// Splits a query string into lexemes.
pub fn lex(input: &str) -> Result<Vec<Spanned>, ParseError> {
    Lexer::new(input).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lexemes(input: &str) -> Vec<Lexeme> {
        lex(input).unwrap().into_iter().map(|s| s.lexeme).collect()
    }

    fn word(s: &str) -> Lexeme {
        Lexeme::Word(s.into())
    }

    #[test]
    fn empty_input() {
        assert_eq!(lexemes(""), vec![]);
        assert_eq!(lexemes("   "), vec![]);
    }

    #[test]
    fn multiple_words() {
        assert_eq!(lexemes("rust  async"), vec![word("rust"), word("async")]);
    }

    #[test]
    fn quoted_phrase() {
        assert_eq!(
            lexemes("\"hello world\""),
            vec![Lexeme::Phrase("hello world".into())]
        );
    }

    #[test]
    fn empty_quotes_lex_as_empty_phrase() {
        assert_eq!(lexemes("\"\""), vec![Lexeme::Phrase(String::new())]);
    }

    #[test]
    fn unclosed_quote_error() {
        let err = lex("foo \"hello world").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
        assert_eq!(err.position, Some(4));
    }

    #[test]
    fn lone_quote_error() {
        let err = lex("\"").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
    }

    #[test]
    fn keywords_are_upper_case_only() {
        assert_eq!(
            lexemes("a AND b OR c NOT d"),
            vec![
                word("a"),
                Lexeme::And,
                word("b"),
                Lexeme::Or,
                word("c"),
                Lexeme::Not,
                word("d")
            ]
        );
        assert_eq!(
            lexemes("a and b or c"),
            vec![word("a"), word("and"), word("b"), word("or"), word("c")]
        );
    }

    #[test]
    fn symbolic_operators() {
        assert_eq!(
            lexemes("a && b || c"),
            vec![word("a"), Lexeme::And, word("b"), Lexeme::Or, word("c")]
        );
    }

    #[test]
    fn prefix_modifiers() {
        assert_eq!(
            lexemes("-deprecated +\"exact\" -(a)"),
            vec![
                Lexeme::Minus,
                word("deprecated"),
                Lexeme::Plus,
                Lexeme::Phrase("exact".into()),
                Lexeme::Minus,
                Lexeme::LParen,
                word("a"),
                Lexeme::RParen
            ]
        );
    }

    #[test]
    fn hyphen_inside_word_is_not_a_modifier() {
        assert_eq!(lexemes("foo-bar"), vec![word("foo-bar")]);
        assert_eq!(lexemes("c++"), vec![word("c++")]);
    }

    #[test]
    fn dangling_modifier_error() {
        let err = lex("foo - bar").unwrap_err();
        assert_eq!(
            err.kind,
            ParseErrorKind::DanglingModifier {
                modifier: "-".into()
            }
        );
        assert_eq!(err.position, Some(4));

        assert!(lex("foo +").is_err());
        assert!(lex("(foo -)").is_err());
    }

    #[test]
    fn parentheses_and_offsets() {
        let spanned = lex("(a b)").unwrap();
        let offsets: Vec<usize> = spanned.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 1, 3, 4]);
        assert_eq!(spanned[0].lexeme, Lexeme::LParen);
        assert_eq!(spanned[3].lexeme, Lexeme::RParen);
    }

    #[test]
    fn phrase_adjacent_to_word() {
        assert_eq!(
            lexemes("foo\"bar baz\"qux"),
            vec![word("foo"), Lexeme::Phrase("bar baz".into()), word("qux")]
        );
    }

    #[test]
    fn decimal_word_stays_whole() {
        assert_eq!(lexemes("5.6"), vec![word("5.6")]);
    }

    #[test]
    fn spelling_of_operators() {
        assert_eq!(Lexeme::And.spelling(), "AND");
        assert_eq!(Lexeme::Minus.spelling(), "-");
        assert_eq!(word("x").spelling(), "x");
    }
}
