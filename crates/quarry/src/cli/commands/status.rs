//! Implementation of `quarry status`.

use std::process::ExitCode;

use quarry_config::{ConfigWarning, is_global_config};

use crate::cli::{
    context::CommandContext,
    output::{dim, subheader, warning},
};

/// Shows configuration files and validation warnings.
///
/// Exits with failure when the configuration has warnings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.sources.is_empty() {
        println!("{}", dim("No configuration files found, using defaults."));
        println!();
        println!(
            "Run {} to create a configuration file.",
            subheader("quarry init")
        );
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader("Config files (highest precedence first):"));
    for path in &config.sources {
        let display = ctx.display_path(path).display();
        if is_global_config(path) {
            println!("   {display} {}", dim("(global)"));
        } else {
            println!("   {display}");
        }
    }
    println!();

    println!("{}", subheader("Query:"));
    println!("   default field  {}", config.query.default_field);
    println!("   max length     {}", format_max_length(config.query.max_length));
    println!();

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("{}", subheader(&format!("Warnings ({}):", warnings.len())));
    for w in &warnings {
        println!("   {}", warning(&w.to_string()));
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Formats the length limit for display.
fn format_max_length(max_length: usize) -> String {
    if max_length == 0 {
        "unlimited".to_string()
    } else {
        format!("{max_length} bytes")
    }
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        let hint = match w {
            ConfigWarning::EmptyDefaultField => {
                "Hint: set [query] default_field to the field queries should search"
            }
            ConfigWarning::UnboundedQueryLength => {
                "Hint: set [query] max_length to a positive byte count"
            }
        };
        println!("{}", dim(hint));
    }
}
