//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `query.default_field` is empty, so unqualified terms target no field.
    EmptyDefaultField,
    /// `query.max_length` is 0, so queries of any size are accepted.
    UnboundedQueryLength,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDefaultField => {
                write!(f, "query.default_field is empty")
            }
            Self::UnboundedQueryLength => {
                write!(f, "query.max_length is 0, query length is not limited")
            }
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.query.default_field.trim().is_empty() {
        warnings.push(ConfigWarning::EmptyDefaultField);
    }
    if config.query.max_length == 0 {
        warnings.push(ConfigWarning::UnboundedQueryLength);
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_clean() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn test_empty_default_field() {
        let mut config = Config::default();
        config.query.default_field = "  ".into();
        assert_eq!(
            validate_config(&config),
            [ConfigWarning::EmptyDefaultField]
        );
    }

    #[test]
    fn test_unbounded_length() {
        let mut config = Config::default();
        config.query.max_length = 0;
        let warnings = validate_config(&config);
        assert_eq!(warnings, [ConfigWarning::UnboundedQueryLength]);
        assert!(warnings[0].to_string().contains("max_length"));
    }
}
