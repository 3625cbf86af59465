//! Configuration system for quarry.
//!
//! quarry uses TOML configuration files named `.quarry.toml`. Configuration is resolved by
//! walking up the directory tree from the current working directory, collecting any
//! `.quarry.toml` files found, then loading `~/.quarry.toml` as the global config with lowest
//! precedence.

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawConfig, RawOutputSettings, RawQuerySettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default field that unqualified query terms target.
pub const DEFAULT_FIELD: &str = "text";

/// Default maximum query length in bytes.
pub const DEFAULT_MAX_LENGTH: usize = 8192;

/// Top-level merged configuration for quarry.
///
/// This represents the fully resolved configuration after merging all discovered
/// `.quarry.toml` files according to precedence rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Query parsing settings.
    pub query: QuerySettings,
    /// Output settings.
    pub output: OutputSettings,
    /// Config files that contributed, highest precedence first.
    pub sources: Vec<PathBuf>,
    /// Directory containing the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration by discovering and merging all relevant `.quarry.toml` files.
    ///
    /// This is the main entry point for loading configuration. It:
    /// 1. Discovers all `.quarry.toml` files from `cwd` up to the filesystem root
    /// 2. Appends `~/.quarry.toml` if it exists
    /// 3. Parses each file
    /// 4. Merges them according to precedence rules (closest to `cwd` wins)
    ///
    /// Returns `Ok(Config::default())` if no configuration files are found.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        let config_files = discover_config_files(cwd);
        Self::load_from_files(&config_files)
    }

    /// Loads configuration from a specific list of config file paths.
    ///
    /// Files should be provided in precedence order: highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed: Vec<ParsedConfig> = files
            .iter()
            .map(|path| {
                let config = parse_config_file(path)?;
                Ok(ParsedConfig {
                    path: path.clone(),
                    config,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Validates the configuration and returns any warnings.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Serializes the effective settings to TOML format.
    ///
    /// The output has the same layout as a `.quarry.toml` file.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let serializable = SerializableSettings {
            query: &self.query,
            output: &self.output,
        };
        Ok(toml::to_string_pretty(&serializable)?)
    }
}

/// Query parsing settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct QuerySettings {
    /// Field that unqualified query terms target.
    pub default_field: String,
    /// Maximum query length in bytes; 0 disables the limit.
    pub max_length: usize,
}

impl Default for QuerySettings {
    fn default() -> Self {
        Self {
            default_field: DEFAULT_FIELD.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
        }
    }
}

/// Output settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Default rendering for `quarry parse`.
    pub format: OutputFormat,
}

/// How a parsed query is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Indented node tree.
    #[default]
    Tree,
    /// Query syntax that parses back to the same tree.
    String,
    /// JSON document.
    Json,
}

impl OutputFormat {
    /// The name used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tree => "tree",
            Self::String => "string",
            Self::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tree" => Ok(Self::Tree),
            "string" => Ok(Self::String),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::UnknownFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Borrowed view of the settings for TOML serialization.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Query parsing settings.
    query: &'a QuerySettings,
    /// Output settings.
    output: &'a OutputSettings,
}
