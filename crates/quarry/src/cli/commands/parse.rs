//! Implementation of `quarry parse`.

use std::process::ExitCode;

use quarry_config::OutputFormat;
use quarry_query::QueryNode;
use serde::Serialize;
use tracing::debug;

use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{error, print_json},
};

/// JSON output for `quarry parse --json`.
#[derive(Serialize)]
struct JsonParse<'a> {
    /// The query as given.
    query: &'a str,
    /// Field that unqualified terms target.
    default_field: &'a str,
    /// Terms that can contribute to a match.
    terms: Vec<&'a str>,
    /// The compiled tree.
    tree: &'a QueryNode,
}

/// Parses a query and prints the compiled tree.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let parser = ctx.query_parser();
    debug!(
        default_field = parser.default_field(),
        max_length = ?parser.max_length(),
        "parsing query"
    );

    let node = match parser.parse_query(&cmd.query) {
        Ok(node) => node,
        Err(e) => {
            eprintln!("{}: {e}", error("error"));
            return ExitCode::FAILURE;
        }
    };

    match output_format(ctx, cmd) {
        OutputFormat::Tree => {
            print!("{node}");
            ExitCode::SUCCESS
        }
        OutputFormat::String => {
            println!("{}", node.to_query_string());
            ExitCode::SUCCESS
        }
        OutputFormat::Json => print_json(&JsonParse {
            query: &cmd.query,
            default_field: parser.default_field(),
            terms: node.terms(),
            tree: &node,
        }),
    }
}

/// Picks the output format: command-line flags first, then configuration.
fn output_format(ctx: &CommandContext, cmd: &ParseCommand) -> OutputFormat {
    if let Some(format) = cmd.format {
        format
    } else if cmd.json {
        OutputFormat::Json
    } else if cmd.string {
        OutputFormat::String
    } else {
        ctx.config.output.format
    }
}
