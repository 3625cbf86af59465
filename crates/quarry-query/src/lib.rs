//! Query parsing and query trees for quarry.
//!
//! This crate turns a search box string into a [`QueryNode`] tree:
//!
//! - **Terms**: `rust` - a single token
//! - **Phrases**: `"error handling"` - tokens at consecutive positions
//! - **Compounds**: `foo-bar` - matched as the phrase `"foo bar"`
//! - **Required**: `+async` - must appear
//! - **Prohibited**: `-deprecated` or `NOT deprecated` - must not appear
//! - **AND**: `rust AND async` (also `&&`) - both sides must match
//! - **OR**: `rust OR golang` (also `||`, or plain adjacency) - alternatives
//! - **Grouping**: `(a b) AND c` - precedence control
//!
//! Query words are segmented with the same tokenizer used for document fields, see
//! [`quarry_analysis`].
//!
//! # Example
//!
//! ```
//! use quarry_query::{QueryNode, parse_query};
//!
//! let node = parse_query("rust AND (async OR tokio) -deprecated").unwrap();
//! assert!(matches!(node, QueryNode::Or(_)));
//! assert_eq!(node.terms(), ["rust", "async", "tokio"]);
//! ```

#![warn(missing_docs)]

mod error;
mod lexer;
mod node;
mod parser;

pub use error::{ParseError, ParseErrorKind};
pub use lexer::{Lexeme, Spanned, lex};
pub use node::{PHRASE_SLOP, QueryNode};
pub use parser::{DEFAULT_FIELD, QueryParser, parse_query};
pub use quarry_analysis::{Token, Tokens};
