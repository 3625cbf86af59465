//! Clap argument definitions for the `quarry` CLI.

use std::{env, process::exit, str::FromStr};

use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand, error::ErrorKind};
use quarry_config::OutputFormat;

/// Top-level CLI options.
#[derive(Parser)]
#[command(name = "quarry")]
#[command(about = "Query front end and field tokenizer for full-text search")]
#[command(version)]
pub struct Cli {
    /// Log verbosity (-v for debug, -vv for trace)
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Arguments for `quarry tokenize`.
#[derive(Args, Debug, Clone)]
pub struct TokenizeCommand {
    /// Text to tokenize; multiple arguments are joined with spaces
    #[arg(required = true, allow_hyphen_values = true)]
    pub text: Vec<String>,

    /// Field name passed to the tokenizer [default: query.default_field]
    #[arg(short = 'f', long)]
    pub field: Option<String>,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Arguments for `quarry parse`.
#[derive(Args, Debug, Clone)]
pub struct ParseCommand {
    /// Query to parse
    #[arg(allow_hyphen_values = true)]
    pub query: String,

    /// Output the tree as JSON
    #[arg(long, conflicts_with = "string")]
    pub json: bool,

    /// Output the tree as query syntax
    #[arg(long)]
    pub string: bool,

    /// Output format: tree, string or json [default: output.format]
    #[arg(
        long,
        value_name = "FORMAT",
        value_parser = OutputFormat::from_str,
        conflicts_with_all = ["json", "string"]
    )]
    pub format: Option<OutputFormat>,
}

/// Arguments for `quarry init`.
#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Create global ~/.quarry.toml instead
    #[arg(long)]
    pub global: bool,

    /// Overwrite existing configuration file
    #[arg(long)]
    pub force: bool,
}

/// Supported `quarry` subcommands.
#[derive(Subcommand)]
pub enum Commands {
    /// Split text into positioned tokens
    #[command(after_help = "\
EXAMPLES:
  quarry tokenize 'word1 word2 word3. word4 5.6'
  quarry tokenize -f title state-of-the-art
  quarry tokenize --json 'e-mail 1,000.25'")]
    Tokenize(TokenizeCommand),

    /// Parse a query and print the compiled tree
    #[command(after_help = "\
QUERY SYNTAX:
  term              Term must appear
  term1 term2       Either term (implicit OR)
  \"phrase\"          Terms at consecutive positions
  foo-bar           Same as \"foo bar\"
  +term             Term is required
  -term, NOT term   Term must NOT appear
  a AND b, a && b   Both sides must match
  a OR b, a || b    Either side
  (expr)            Grouping

  AND binds tighter than OR: 'a b AND c' means a OR (b AND c).

EXAMPLES:
  quarry parse 'rust async'
  quarry parse '\"error handling\" -deprecated'
  quarry parse --string 'foo bar AND (foobar OR barfoo)'
  quarry parse --json '+rust (tokio OR smol)'
  quarry parse --format string 'a && (b || c)'")]
    Parse(ParseCommand),

    /// Initialize quarry configuration in current directory
    Init(InitCommand),

    /// Show configuration files and validation warnings
    Status,

    /// Show effective configuration settings
    Config,
}

/// Parses CLI arguments, printing a compact command list for top-level `--help`.
pub fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            if e.kind() == ErrorKind::DisplayHelp && env::args().len() <= 2 {
                print_command_help();
                exit(0);
            }
            e.exit();
        }
    }
}

/// Prints the top-level help with one line per subcommand.
fn print_command_help() {
    let cmd = Cli::command();
    let about = cmd.get_about().map(|s| s.to_string()).unwrap_or_default();

    println!("{about}");
    println!();
    println!("Usage: quarry [OPTIONS] <COMMAND>");
    println!();
    println!("Commands:");

    for sub in cmd.get_subcommands() {
        let name = sub.get_name();
        if name == "help" {
            continue;
        }
        let about = sub.get_about().map(|s| s.to_string()).unwrap_or_default();
        println!("  {name:10} {about}");
    }

    println!(
        "  {:<10} Print this message or the help of the given subcommand(s)",
        "help"
    );
    println!();
    println!("Options:");
    println!("  -v, --verbose...  Log verbosity (-v for debug, -vv for trace)");
    println!("  -h, --help        Print help");
    println!("  -V, --version     Print version");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn hyphenated_query_is_a_value() {
        let cli = Cli::try_parse_from(["quarry", "parse", "-deprecated rust"]).unwrap();
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.query, "-deprecated rust");
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["quarry", "-vv", "status"]).unwrap();
        assert_eq!(cli.verbose, 2);
        let cli = Cli::try_parse_from(["quarry", "config", "-v"]).unwrap();
        assert_eq!(cli.verbose, 1);
    }

    #[test]
    fn json_and_string_conflict() {
        assert!(Cli::try_parse_from(["quarry", "parse", "--json", "--string", "x"]).is_err());
    }

    #[test]
    fn format_flag_parses_names() {
        let cli = Cli::try_parse_from(["quarry", "parse", "--format", "json", "x"]).unwrap();
        let Commands::Parse(cmd) = cli.command else {
            panic!("expected parse command");
        };
        assert_eq!(cmd.format, Some(OutputFormat::Json));

        assert!(Cli::try_parse_from(["quarry", "parse", "--format", "xml", "x"]).is_err());
        assert!(Cli::try_parse_from(["quarry", "parse", "--format", "tree", "--json", "x"]).is_err());
    }

    #[test]
    fn tokenize_joins_arguments() {
        let cli = Cli::try_parse_from(["quarry", "tokenize", "-f", "title", "a", "b"]).unwrap();
        let Commands::Tokenize(cmd) = cli.command else {
            panic!("expected tokenize command");
        };
        assert_eq!(cmd.text, ["a", "b"]);
        assert_eq!(cmd.field.as_deref(), Some("title"));
    }
}
