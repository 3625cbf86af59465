//! Implementation of `quarry config`.

use std::process::ExitCode;

use crate::cli::{
    context::CommandContext,
    output::{TomlHighlighter, error},
};

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    match ctx.config.settings_to_toml() {
        Ok(toml) => {
            print!("{}", TomlHighlighter::new().highlight(&toml));
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: {e}", error("error"));
            ExitCode::FAILURE
        }
    }
}
