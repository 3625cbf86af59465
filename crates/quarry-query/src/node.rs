//! Executable query trees.
//!
//! A [`QueryNode`] is what the parser hands to the index-execution layer. The set of node
//! kinds is closed; executors are expected to `match` on it exhaustively.

use std::fmt;

use serde::Serialize;

/// Positional slop of every phrase: terms must sit at consecutive positions.
pub const PHRASE_SLOP: u32 = 0;

/// Words that the parser treats as operators when they appear unquoted.
const KEYWORDS: &[&str] = &["AND", "OR", "NOT", "&&", "||"];

/// A compiled query.
///
/// Boolean groups follow the usual search-engine clause semantics:
///
/// - Inside an [`Or`](Self::Or), [`Required`](Self::Required) children must match,
///   [`Not`](Self::Not) children must not, and when there is no required child at least one
///   of the remaining children must match.
/// - Inside an [`And`](Self::And), every child except the prohibited ones must match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum QueryNode {
    /// Documents containing this exact token.
    Term(String),

    /// Documents where these tokens occur in order at consecutive positions. Holds at least
    /// two terms.
    Phrase(Vec<String>),

    /// Every child must match.
    And(Vec<Self>),

    /// At least one child must match, subject to required and prohibited children.
    Or(Vec<Self>),

    /// Documents matching the child are excluded.
    Not(Box<Self>),

    /// The child must match in every result of the enclosing group.
    Required(Box<Self>),
}

/// Where a node is being rendered, for deciding when parentheses are needed.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Context {
    /// Top of the tree.
    Root,
    /// Operand of an AND chain.
    And,
    /// Alternative of an OR group.
    Or,
    /// Operand of a `+` or `-` modifier.
    Modifier,
}

impl QueryNode {
    /// Creates a term node.
    pub fn term(text: impl Into<String>) -> Self {
        Self::Term(text.into())
    }

    /// Creates a phrase node, collapsing a single word to a term.
    ///
    /// Returns `None` when there are no words.
    pub fn phrase(words: Vec<String>) -> Option<Self> {
        match words.len() {
            0 => None,
            1 => words.into_iter().next().map(Self::Term),
            _ => Some(Self::Phrase(words)),
        }
    }

    /// Creates an And node, flattening nested Ands and unwrapping a single child.
    pub fn and(nodes: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = nodes
            .into_iter()
            .flat_map(|n| match n {
                Self::And(inner) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1 {
            return flattened.remove(0);
        }
        Self::And(flattened)
    }

    /// Creates an Or node, unwrapping a single child.
    ///
    /// Nested Ors are flattened only when they hold no required or prohibited children; those
    /// clauses are scoped to their own group and would change meaning if hoisted.
    pub fn or(nodes: Vec<Self>) -> Self {
        let mut flattened: Vec<Self> = nodes
            .into_iter()
            .flat_map(|n| match n {
                Self::Or(inner) if !inner.iter().any(Self::is_modified) => inner,
                other => vec![other],
            })
            .collect();

        if flattened.len() == 1 {
            return flattened.remove(0);
        }
        Self::Or(flattened)
    }

    /// Wraps a node in a prohibition.
    pub fn not(node: Self) -> Self {
        Self::Not(Box::new(node))
    }

    /// Wraps a node in a requirement.
    pub fn required(node: Self) -> Self {
        Self::Required(Box::new(node))
    }

    /// True for `Not` and `Required` nodes.
    pub fn is_modified(&self) -> bool {
        matches!(self, Self::Not(_) | Self::Required(_))
    }

    /// Returns every term text that can contribute to a match, in tree order.
    ///
    /// Words under a `Not` are skipped. Phrase words are listed individually.
    pub fn terms(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_terms(&mut out);
        out
    }

    /// Recursive helper for [`terms`](Self::terms).
    fn collect_terms<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Term(text) => out.push(text),
            Self::Phrase(words) => out.extend(words.iter().map(String::as_str)),
            Self::And(nodes) | Self::Or(nodes) => {
                for node in nodes {
                    node.collect_terms(out);
                }
            }
            Self::Required(inner) => inner.collect_terms(out),
            Self::Not(_) => {}
        }
    }

    /// Formats the node as a tree structure with the given indentation level.
    fn fmt_tree(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let prefix = "  ".repeat(indent);
        match self {
            Self::Term(s) => writeln!(f, "{prefix}Term({s:?})"),
            Self::Phrase(words) => writeln!(f, "{prefix}Phrase({words:?})"),
            Self::Not(inner) => {
                writeln!(f, "{prefix}Not")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::Required(inner) => {
                writeln!(f, "{prefix}Required")?;
                inner.fmt_tree(f, indent + 1)
            }
            Self::And(nodes) => {
                writeln!(f, "{prefix}And")?;
                for node in nodes {
                    node.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
            Self::Or(nodes) => {
                writeln!(f, "{prefix}Or")?;
                for node in nodes {
                    node.fmt_tree(f, indent + 1)?;
                }
                Ok(())
            }
        }
    }

    /// Formats the node as query syntax that parses back to the same tree.
    ///
    /// `foo bar AND (foobar OR barfoo)` renders as `foo bar AND (foobar barfoo)`.
    pub fn to_query_string(&self) -> String {
        self.render(Context::Root)
    }

    /// Renders the node for the given context.
    fn render(&self, ctx: Context) -> String {
        match self {
            Self::Term(text) => {
                if KEYWORDS.contains(&text.as_str()) {
                    format!("\"{text}\"")
                } else {
                    text.clone()
                }
            }
            Self::Phrase(words) => format!("\"{}\"", words.join(" ")),
            Self::Not(inner) => format!("-{}", inner.render(Context::Modifier)),
            Self::Required(inner) => format!("+{}", inner.render(Context::Modifier)),
            Self::And(nodes) => {
                let parts: Vec<String> = nodes.iter().map(|n| n.render(Context::And)).collect();
                let joined = parts.join(" AND ");
                if matches!(ctx, Context::And | Context::Modifier) {
                    format!("({joined})")
                } else {
                    joined
                }
            }
            Self::Or(nodes) => {
                let parts: Vec<String> = nodes.iter().map(|n| n.render(Context::Or)).collect();
                let joined = parts.join(" ");
                if ctx == Context::Root {
                    joined
                } else {
                    format!("({joined})")
                }
            }
        }
    }
}

impl fmt::Display for QueryNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_tree(f, 0)
    }
}
