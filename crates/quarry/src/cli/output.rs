//! Terminal styling, syntax highlighting and JSON output.

use std::process::ExitCode;

use serde::Serialize;
use syntect::{
    easy::HighlightLines,
    highlighting::Style,
    parsing::SyntaxSet,
    util::{LinesWithEndings, as_24_bit_terminal_escaped},
};
use two_face::{
    syntax::extra_newlines as extra_syntaxes,
    theme::{EmbeddedLazyThemeSet, EmbeddedThemeName, extra as extra_themes},
};

/// SGR sequence that clears every attribute.
const RESET: &str = "\x1b[0m";

/// The handful of text styles the CLI uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    /// Section headings.
    Heading,
    /// Secondary detail and hints.
    Muted,
    /// Non-fatal problems.
    Caution,
    /// Fatal problems.
    Failure,
}

impl Tone {
    /// The SGR sequence that switches this style on.
    const fn sgr(self) -> &'static str {
        match self {
            Self::Heading => "\x1b[1m",
            Self::Muted => "\x1b[2m",
            Self::Caution => "\x1b[33m",
            Self::Failure => "\x1b[31m",
        }
    }

    /// Wraps `text` in this style.
    fn paint(self, text: &str) -> String {
        format!("{}{text}{RESET}", self.sgr())
    }
}

/// Bold heading text.
pub fn subheader(text: &str) -> String {
    Tone::Heading.paint(text)
}

/// Dimmed secondary text.
pub fn dim(text: &str) -> String {
    Tone::Muted.paint(text)
}

/// Yellow warning text.
pub fn warning(text: &str) -> String {
    Tone::Caution.paint(text)
}

/// Red error text.
pub fn error(text: &str) -> String {
    Tone::Failure.paint(text)
}

/// Indents every line of `content` by two spaces.
pub fn indent(content: &str) -> String {
    content
        .lines()
        .map(|line| format!("  {line}\n"))
        .collect()
}

/// Highlights TOML for terminal output.
pub struct TomlHighlighter {
    /// Syntax definitions, including TOML.
    syntax_set: SyntaxSet,
    /// Color themes.
    theme_set: EmbeddedLazyThemeSet,
}

impl Default for TomlHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl TomlHighlighter {
    /// Theme used for all highlighted output.
    const THEME: EmbeddedThemeName = EmbeddedThemeName::Dracula;

    /// Creates a highlighter.
    pub fn new() -> Self {
        Self {
            syntax_set: extra_syntaxes(),
            theme_set: extra_themes(),
        }
    }

    /// Highlights TOML content. Falls back to plain text if the syntax is unavailable.
    pub fn highlight(&self, content: &str) -> String {
        let syntax = self
            .syntax_set
            .find_syntax_by_extension("toml")
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
        let mut highlighter = HighlightLines::new(syntax, self.theme_set.get(Self::THEME));

        let mut output = String::new();
        for line in LinesWithEndings::from(content) {
            let ranges: Vec<(Style, &str)> = highlighter
                .highlight_line(line, &self.syntax_set)
                .unwrap_or_else(|_| vec![(Style::default(), line)]);
            output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false));
        }
        output.push_str(RESET);
        output
    }
}

/// Prints a value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}: failed to serialize JSON: {e}", error("error"));
            ExitCode::FAILURE
        }
    }
}
