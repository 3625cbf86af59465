//! Per-invocation state: where quarry runs and which settings apply.

use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
    process::ExitCode,
};

use quarry_config::Config;
use quarry_query::QueryParser;
use tracing::{debug, warn};

/// Everything a subcommand needs from its environment.
pub struct CommandContext {
    /// Directory quarry was started in.
    pub cwd: PathBuf,
    /// Merged settings; defaults when no `.quarry.toml` applies.
    pub config: Config,
}

impl CommandContext {
    /// Resolves the working directory and merges every applicable config file.
    ///
    /// Validation warnings are logged but do not stop the command.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = working_dir()?;
        let ctx = Self::in_dir(cwd)?;
        for warning in ctx.config.validate() {
            warn!("configuration: {warning}");
        }
        Ok(ctx)
    }

    /// Resolves the working directory but keeps default settings.
    ///
    /// `init` uses this so a broken config file can be replaced.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        Ok(Self {
            cwd: working_dir()?,
            config: Config::default(),
        })
    }

    /// Loads the configuration that applies in `cwd`.
    fn in_dir(cwd: PathBuf) -> Result<Self, ExitCode> {
        let config = Config::load(&cwd).map_err(|e| fail("failed to load configuration", e))?;
        debug!(
            cwd = %cwd.display(),
            sources = config.sources.len(),
            "configuration loaded"
        );
        Ok(Self { cwd, config })
    }

    /// Builds a query parser from the configured query settings.
    pub fn query_parser(&self) -> QueryParser {
        let query = &self.config.query;
        QueryParser::new(query.default_field.as_str()).with_max_length(query.max_length)
    }

    /// Where `path` should be shown from: relative to the working directory when possible.
    pub fn display_path<'a>(&self, path: &'a Path) -> &'a Path {
        path.strip_prefix(&self.cwd).unwrap_or(path)
    }
}

/// The process working directory.
fn working_dir() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| fail("could not determine current directory", e))
}

/// Reports a fatal setup problem and yields the failing exit code.
fn fail(what: &str, e: impl Display) -> ExitCode {
    eprintln!("error: {what}: {e}");
    ExitCode::FAILURE
}
