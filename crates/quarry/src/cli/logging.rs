//! Log output for the CLI.

use std::io;

use tracing_subscriber::{EnvFilter, fmt};

/// Builds the log filter for a verbosity count.
///
/// Without `-v` the filter comes from `RUST_LOG`, falling back to `warn`.
pub fn filter_for(verbose: u8) -> EnvFilter {
    match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Installs the global subscriber, writing to stderr so stdout stays machine-readable.
pub fn init(verbose: u8) {
    fmt()
        .with_env_filter(filter_for(verbose))
        .with_target(verbose > 1)
        .with_writer(io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_levels() {
        assert_eq!(filter_for(1).to_string(), "debug");
        assert_eq!(filter_for(2).to_string(), "trace");
        assert_eq!(filter_for(5).to_string(), "trace");
    }
}
