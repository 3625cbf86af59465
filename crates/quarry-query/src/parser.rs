//! Query parser.
//!
//! Compiles a lexeme stream into a [`QueryNode`] tree.
//!
//! # Grammar
//!
//! ```text
//! query       → disjunction
//! disjunction → conjunction (["OR"] conjunction)*
//! conjunction → unary ("AND" unary)*
//! unary       → ("+" | "-" | "NOT") primary | primary
//! primary     → WORD | PHRASE | "(" disjunction ")"
//! ```
//!
//! # Precedence (highest to lowest)
//!
//! 1. Grouping: `(...)` and quotes
//! 2. Modifiers: `+`, `-`, `NOT` (one per clause)
//! 3. AND (explicit keyword, also `&&`)
//! 4. OR (explicit keyword, also `||`, or implicit between adjacent clauses)
//!
//! Groups are tracked on an explicit stack rather than by recursion, so nesting depth is
//! limited only by memory.

use std::mem;

use quarry_analysis::{Tokens, compounds, tokenize};

use crate::{
    error::{ParseError, ParseErrorKind},
    lexer::{Lexeme, Spanned, lex},
    node::QueryNode,
};

/// Field used to tokenize query words when none is configured.
pub const DEFAULT_FIELD: &str = "text";

/// A clause prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    /// `+`: the clause is required.
    Required,
    /// `-` or `NOT`: the clause is prohibited.
    Prohibited,
}

impl Modifier {
    /// Applies the modifier to a compiled clause.
    fn apply(self, node: QueryNode) -> QueryNode {
        match self {
            Self::Required => QueryNode::required(node),
            Self::Prohibited => QueryNode::not(node),
        }
    }
}

/// The binary operator waiting for its right-hand operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Joiner {
    /// Adjacent clauses, or the start of a group.
    Adjacent,
    /// An explicit AND at the given offset.
    And(usize),
    /// An explicit OR at the given offset.
    Or(usize),
}

/// One open group: the whole query, or a parenthesized sub-expression.
#[derive(Debug)]
struct Group {
    /// Byte offset of the opening parenthesis; `None` for the top level.
    open: Option<usize>,
    /// Finished alternatives of this group.
    alternatives: Vec<QueryNode>,
    /// Operands of the AND chain under construction.
    chain: Vec<QueryNode>,
    /// Modifier waiting for its clause, with the lexeme it came from.
    modifier: Option<(Modifier, Spanned)>,
    /// The operator that will attach the next clause.
    joiner: Joiner,
    /// Whether the last thing read was a clause (kept or dropped).
    after_clause: bool,
    /// Whether any clause has been read in this group.
    seen_clause: bool,
}

impl Group {
    /// Opens a group.
    fn new(open: Option<usize>) -> Self {
        Self {
            open,
            alternatives: Vec::new(),
            chain: Vec::new(),
            modifier: None,
            joiner: Joiner::Adjacent,
            after_clause: false,
            seen_clause: false,
        }
    }

    /// Moves the current AND chain into the alternatives.
    fn flush_chain(&mut self) {
        if !self.chain.is_empty() {
            let chain = mem::take(&mut self.chain);
            self.alternatives.push(QueryNode::and(chain));
        }
    }

    /// Attaches a compiled clause. `None` is a clause that produced no terms; it satisfies
    /// operators but adds nothing to the tree.
    fn push_clause(&mut self, node: Option<QueryNode>) {
        let modifier = self.modifier.take();
        self.after_clause = true;
        self.seen_clause = true;

        let Some(node) = node else {
            // The dropped clause consumed any pending AND; what follows is adjacent.
            self.joiner = Joiner::Adjacent;
            return;
        };
        let node = match modifier {
            Some((modifier, _)) => modifier.apply(node),
            None => node,
        };

        if !matches!(self.joiner, Joiner::And(_)) {
            self.flush_chain();
        }
        self.chain.push(node);
        self.joiner = Joiner::Adjacent;
    }
}

/// Compiles a lexeme stream into a query tree.
struct Parser<'a> {
    /// The original query, for error reporting.
    query: &'a str,
    /// Field name handed to the tokenizer for query words.
    field: &'a str,
    /// The top-level group.
    root: Group,
    /// Open parenthesized groups, innermost last.
    nested: Vec<Group>,
}

impl<'a> Parser<'a> {
    /// Creates a parser for one query.
    fn new(query: &'a str, field: &'a str) -> Self {
        Self {
            query,
            field,
            root: Group::new(None),
            nested: Vec::new(),
        }
    }

    /// Creates an error at a position in the query.
    fn error(&self, kind: ParseErrorKind, position: Option<usize>) -> ParseError {
        ParseError::new(kind, position, self.query)
    }

    /// Creates the error for a modifier with nothing after it.
    fn dangling(&self, spanned: &Spanned) -> ParseError {
        let kind = ParseErrorKind::DanglingModifier {
            modifier: spanned.lexeme.spelling().to_string(),
        };
        self.error(kind, Some(spanned.offset))
    }

    /// The innermost open group.
    fn group(&self) -> &Group {
        self.nested.last().unwrap_or(&self.root)
    }

    /// The innermost open group, mutably.
    fn group_mut(&mut self) -> &mut Group {
        self.nested.last_mut().unwrap_or(&mut self.root)
    }

    /// Parses the lexeme stream into a query tree.
    fn parse(mut self, lexemes: Vec<Spanned>) -> Result<QueryNode, ParseError> {
        for spanned in lexemes {
            self.step(spanned)?;
        }

        if let Some(group) = self.nested.last() {
            return Err(self.error(ParseErrorKind::UnclosedParen, group.open));
        }

        let root = mem::replace(&mut self.root, Group::new(None));
        self.close(root)?
            .ok_or_else(|| self.error(ParseErrorKind::EmptyQuery, None))
    }

    /// Handles one lexeme.
    fn step(&mut self, spanned: Spanned) -> Result<(), ParseError> {
        let offset = spanned.offset;
        match &spanned.lexeme {
            Lexeme::Word(word) => {
                let node = self.compile_word(word);
                self.group_mut().push_clause(node);
            }
            Lexeme::Phrase(content) => {
                let node = self.compile_phrase(content, offset)?;
                self.group_mut().push_clause(Some(node));
            }
            Lexeme::Plus | Lexeme::Minus | Lexeme::Not => self.set_modifier(&spanned)?,
            Lexeme::And | Lexeme::Or => self.join(&spanned)?,
            Lexeme::LParen => self.nested.push(Group::new(Some(offset))),
            Lexeme::RParen => {
                let Some(group) = self.nested.pop() else {
                    return Err(self.error(ParseErrorKind::UnexpectedCloseParen, Some(offset)));
                };
                let node = self.close(group)?;
                self.group_mut().push_clause(node);
            }
        }
        Ok(())
    }

    /// Records a modifier for the next clause.
    fn set_modifier(&mut self, spanned: &Spanned) -> Result<(), ParseError> {
        if self.group().modifier.is_some() {
            let modifier = spanned.lexeme.spelling().to_string();
            return Err(self.error(
                ParseErrorKind::StackedModifier { modifier },
                Some(spanned.offset),
            ));
        }

        let modifier = match spanned.lexeme {
            Lexeme::Plus => Modifier::Required,
            _ => Modifier::Prohibited,
        };
        self.group_mut().modifier = Some((modifier, spanned.clone()));
        Ok(())
    }

    /// Handles an AND or OR operator.
    fn join(&mut self, spanned: &Spanned) -> Result<(), ParseError> {
        if let Some((_, pending)) = &self.group().modifier {
            return Err(self.dangling(pending));
        }
        if !self.group().after_clause {
            let operator = spanned.lexeme.spelling().to_string();
            return Err(self.error(
                ParseErrorKind::MissingOperand { operator },
                Some(spanned.offset),
            ));
        }

        let group = self.group_mut();
        group.after_clause = false;
        if spanned.lexeme == Lexeme::Or {
            group.flush_chain();
            group.joiner = Joiner::Or(spanned.offset);
        } else {
            group.joiner = Joiner::And(spanned.offset);
        }
        Ok(())
    }

    /// Finishes a group, returning its tree or `None` when every clause was dropped.
    fn close(&self, mut group: Group) -> Result<Option<QueryNode>, ParseError> {
        if let Some((_, pending)) = &group.modifier {
            return Err(self.dangling(pending));
        }

        if !group.after_clause {
            let missing = match group.joiner {
                Joiner::And(offset) => Some(("AND", offset)),
                Joiner::Or(offset) => Some(("OR", offset)),
                Joiner::Adjacent => None,
            };
            if let Some((operator, offset)) = missing {
                let kind = ParseErrorKind::MissingOperand {
                    operator: operator.into(),
                };
                return Err(self.error(kind, Some(offset)));
            }
        }

        if !group.seen_clause && group.open.is_some() {
            return Err(self.error(ParseErrorKind::EmptyGroup, group.open));
        }

        group.flush_chain();
        if group.alternatives.is_empty() {
            return Ok(None);
        }
        Ok(Some(QueryNode::or(group.alternatives)))
    }

    /// Compiles an unquoted word.
    ///
    /// Each run of joined tokens becomes one phrase, so `foo-bar` must match as the adjacent
    /// pair `foo bar` rather than as two independent terms. Returns `None` when the word holds
    /// no tokens at all.
    fn compile_word(&self, word: &str) -> Option<QueryNode> {
        let nodes: Vec<QueryNode> = compounds(tokenize(self.field, word))
            .into_iter()
            .filter_map(|compound| QueryNode::phrase(compound.into_texts()))
            .collect();

        if nodes.is_empty() {
            return None;
        }
        Some(QueryNode::or(nodes))
    }

    /// Compiles the content of a quoted phrase.
    fn compile_phrase(&self, content: &str, offset: usize) -> Result<QueryNode, ParseError> {
        let words: Vec<String> = tokenize(self.field, content).map(|t| t.text).collect();
        QueryNode::phrase(words)
            .ok_or_else(|| self.error(ParseErrorKind::EmptyPhrase, Some(offset)))
    }
}

/// Parses query strings into query trees.
///
/// Holds the settings that apply to every query: the field that unqualified terms target and
/// an optional length limit. Parsing itself keeps no state between calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParser {
    /// Field that unqualified terms target.
    default_field: String,
    /// Maximum accepted query length in bytes.
    max_length: Option<usize>,
}

impl Default for QueryParser {
    fn default() -> Self {
        Self::new(DEFAULT_FIELD)
    }
}

impl QueryParser {
    /// Creates a parser whose terms target `default_field`.
    pub fn new(default_field: impl Into<String>) -> Self {
        Self {
            default_field: default_field.into(),
            max_length: None,
        }
    }

    /// Rejects queries longer than `limit` bytes. A limit of 0 disables the check.
    pub fn with_max_length(mut self, limit: usize) -> Self {
        self.max_length = (limit > 0).then_some(limit);
        self
    }

    /// The field that unqualified terms target.
    pub fn default_field(&self) -> &str {
        &self.default_field
    }

    /// The maximum accepted query length in bytes, if any.
    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    /// Parses a query string into a query tree.
    pub fn parse_query(&self, query: &str) -> Result<QueryNode, ParseError> {
        if let Some(limit) = self.max_length
            && query.len() > limit
        {
            let kind = ParseErrorKind::TooLong {
                length: query.len(),
                limit,
            };
            return Err(ParseError::new(kind, Some(limit), query));
        }

        let lexemes = lex(query)?;
        Parser::new(query, &self.default_field).parse(lexemes)
    }

    /// Tokenizes a document field with the same rules used for query words.
    pub fn parse_document_field<'a>(&self, field: &'a str, text: &'a str) -> Tokens<'a> {
        tokenize(field, text)
    }
}

/// Parses a query string with the default settings.
pub fn parse_query(query: &str) -> Result<QueryNode, ParseError> {
    QueryParser::default().parse_query(query)
}
