//! Configuration merging.
//!
//! Merges multiple `RawConfig` files into a single resolved `Config`.

use std::path::PathBuf;

use tracing::debug;

use crate::{
    Config, OutputSettings, QuerySettings,
    parse::{RawConfig, RawOutputSettings, RawQuerySettings},
};

/// A parsed config file with its source path.
#[derive(Debug, Clone)]
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed raw configuration.
    pub config: RawConfig,
}

/// Merges multiple configuration files into a single resolved `Config`.
///
/// Configs should be provided in precedence order: highest precedence first (closest to the
/// working directory), lowest precedence last (global config). For every key the first
/// defined value wins; keys no file defines keep their defaults.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut query = QuerySettings::default();
    let mut output = OutputSettings::default();

    // Lowest precedence first, so higher precedence overwrites.
    for parsed in configs.iter().rev() {
        debug!(path = %parsed.path.display(), "applying config file");
        if let Some(raw) = &parsed.config.query {
            apply_raw_query(&mut query, raw);
        }
        if let Some(raw) = &parsed.config.output {
            apply_raw_output(&mut output, raw);
        }
    }

    Config {
        query,
        output,
        sources: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(|dir| dir.to_path_buf()),
    }
}

/// Applies raw query settings to result, overwriting any present values.
fn apply_raw_query(result: &mut QuerySettings, raw: &RawQuerySettings) {
    if let Some(v) = &raw.default_field {
        result.default_field.clone_from(v);
    }
    if let Some(v) = raw.max_length {
        result.max_length = v;
    }
}

/// Applies raw output settings to result.
fn apply_raw_output(result: &mut OutputSettings, raw: &RawOutputSettings) {
    if let Some(v) = raw.format {
        result.format = v;
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{OutputFormat, parse::parse_config_str};

    fn parsed(path: &str, toml: &str) -> ParsedConfig {
        ParsedConfig {
            path: PathBuf::from(path),
            config: parse_config_str(toml, Path::new(path)).unwrap(),
        }
    }

    #[test]
    fn test_merge_empty() {
        assert_eq!(merge_configs(&[]), Config::default());
    }

    #[test]
    fn test_first_defined_value_wins() {
        let configs = [
            parsed("/work/project/.quarry.toml", "[query]\ndefault_field = \"body\"\n"),
            parsed(
                "/work/.quarry.toml",
                "[query]\ndefault_field = \"title\"\nmax_length = 100\n",
            ),
            parsed("/home/user/.quarry.toml", "[output]\nformat = \"string\"\n"),
        ];

        let config = merge_configs(&configs);

        assert_eq!(config.query.default_field, "body");
        assert_eq!(config.query.max_length, 100);
        assert_eq!(config.output.format, OutputFormat::String);
    }

    #[test]
    fn test_undefined_keys_keep_defaults() {
        let config = merge_configs(&[parsed("/a/.quarry.toml", "root = true\n")]);
        assert_eq!(config.query, QuerySettings::default());
        assert_eq!(config.output, OutputSettings::default());
    }

    #[test]
    fn test_sources_and_root() {
        let configs = [
            parsed("/a/b/.quarry.toml", ""),
            parsed("/a/.quarry.toml", ""),
        ];

        let config = merge_configs(&configs);

        assert_eq!(
            config.sources,
            [
                PathBuf::from("/a/b/.quarry.toml"),
                PathBuf::from("/a/.quarry.toml")
            ]
        );
        assert_eq!(config.config_root, Some(PathBuf::from("/a/b")));
    }
}
