//! Implementation of `quarry tokenize`.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use quarry_analysis::{Token, tokenize};
use serde::Serialize;
use tracing::debug;

use crate::cli::{
    args::TokenizeCommand,
    context::CommandContext,
    output::{dim, print_json},
};

/// JSON output for `quarry tokenize --json`.
#[derive(Serialize)]
struct JsonTokens<'a> {
    /// Field name the text was tokenized for.
    field: &'a str,
    /// The tokenized text.
    text: &'a str,
    /// Tokens in position order.
    tokens: &'a [Token],
}

/// Tokenizes the given text and prints one row per token.
pub fn run(ctx: &CommandContext, cmd: &TokenizeCommand) -> ExitCode {
    let field = cmd
        .field
        .as_deref()
        .unwrap_or(&ctx.config.query.default_field);
    let text = cmd.text.join(" ");
    let tokens: Vec<Token> = tokenize(field, &text).collect();
    debug!(field, count = tokens.len(), "tokenized text");

    if cmd.json {
        return print_json(&JsonTokens {
            field,
            text: &text,
            tokens: &tokens,
        });
    }

    if tokens.is_empty() {
        println!("{}", dim("No tokens."));
        return ExitCode::SUCCESS;
    }

    println!("{}", token_table(&tokens));
    ExitCode::SUCCESS
}

/// Builds the token table shown in text mode.
fn token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Pos", "Token", "Bytes", "Joined"]);
    for token in tokens {
        table.add_row(vec![
            Cell::new(token.position),
            Cell::new(&token.text),
            Cell::new(format!("{}..{}", token.start, token.end)),
            Cell::new(if token.joined { "yes" } else { "" }),
        ]);
    }
    table
}
