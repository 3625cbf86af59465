//! quarry: query front end and field tokenizer for full-text search.
//!
//! The `quarry` binary exposes the tokenizer and the query parser on the command line, so
//! that segmentation and query compilation can be inspected without an index. Settings come
//! from `.quarry.toml` files discovered from the working directory upwards.

#![warn(missing_docs)]

pub mod cli;
