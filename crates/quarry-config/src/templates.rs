//! Configuration templates for `quarry init`.
//!
//! Templates are stored as valid TOML files and returned as commented-out
//! example configurations.

/// Default local configuration template (valid TOML).
const LOCAL_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Global configuration template (valid TOML).
const GLOBAL_TEMPLATE: &str = include_str!("../templates/config-global.toml");

/// Returns the local configuration template as a commented-out example.
pub fn local_template() -> String {
    comment_template(LOCAL_TEMPLATE)
}

/// Returns the global configuration template as a commented-out example.
pub fn global_template() -> String {
    comment_template(GLOBAL_TEMPLATE)
}

/// Comments out every setting line of a template.
///
/// Comment lines and empty lines are kept as they are.
fn comment_template(template: &str) -> String {
    template
        .lines()
        .map(|line| {
            if line.is_empty() || line.starts_with('#') {
                format!("{line}\n")
            } else {
                format!("# {line}\n")
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::{QuerySettings, parse::parse_config_str};

    #[test]
    fn local_template_matches_defaults() {
        let raw = parse_config_str(LOCAL_TEMPLATE, Path::new("config.toml")).unwrap();
        let defaults = QuerySettings::default();
        let query = raw.query.unwrap();
        assert_eq!(query.default_field, Some(defaults.default_field));
        assert_eq!(query.max_length, Some(defaults.max_length));
        assert_eq!(raw.root, Some(false));
    }

    #[test]
    fn global_template_parses_without_root() {
        let raw = parse_config_str(GLOBAL_TEMPLATE, Path::new("config-global.toml")).unwrap();
        assert!(raw.root.is_none());
        assert!(raw.output.is_some());
    }

    #[test]
    fn rendered_templates_define_nothing() {
        for template in [local_template(), global_template()] {
            let raw = parse_config_str(&template, Path::new("rendered.toml")).unwrap();
            assert!(raw.root.is_none());
            assert!(raw.query.is_none());
            assert!(raw.output.is_none());
        }
    }

    #[test]
    fn comment_template_prefixes_settings_only() {
        let input = "# heading\n[section]\n\nkey = \"value\"\n";
        assert_eq!(
            comment_template(input),
            "# heading\n# [section]\n\n# key = \"value\"\n"
        );
    }
}
