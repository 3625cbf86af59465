//! Field tokenization for quarry.
//!
//! Turns the text of a document field into an ordered stream of positioned tokens. The same
//! segmentation rules are used at indexing time and by the query parser, so a word in a query
//! splits exactly the way it was split when the document was indexed:
//!
//! - **Words**: Unicode word-boundary segments (UAX #29) holding an alphanumeric, so `can't`
//!   stays whole
//! - **Decimals**: `5.6` and `1,000.25` stay whole when a digit sits on both sides of the separator
//! - **Compounds**: `foo-bar` yields `foo` and `bar` at consecutive positions, the second one
//!   marked as [`Token::joined`]
//! - **Punctuation**: trailing sentence punctuation (`word3.`) is dropped
//!
//! # Example
//!
//! ```
//! use quarry_analysis::tokenize;
//!
//! let texts: Vec<String> = tokenize("body", "word3. word4 5.6").map(|t| t.text).collect();
//! assert_eq!(texts, ["word3", "word4", "5.6"]);
//! ```

#![warn(missing_docs)]

mod compound;
mod token;
mod tokenizer;

pub use compound::{Compound, compounds};
pub use token::Token;
pub use tokenizer::{Tokens, tokenize};
