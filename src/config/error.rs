//! Configuration errors.

use thiserror::Error;

/// A single configuration rule that was broken
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("instance_count must be between 1 and {max} (got {found})")]
    InstanceCount { found: usize, max: usize },

    #[error("base_name must not be empty")]
    EmptyBaseName,

    #[error("base_name '{name}' contains '{found}'; use ASCII letters, digits, '_' or '-'")]
    BaseNameCharacter { name: String, found: char },

    #[error("history_depth must be at most {max} (got {found})")]
    HistoryDepth { found: usize, max: usize },

    #[error("lock_poll_interval_ms must be between 1 and {max} (got {found})")]
    LockPollInterval { found: u64, max: u64 },
}

/// Errors that can occur when loading or checking a configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration could not be parsed: {0}")]
    Parse(String),

    #[error("Configuration rejected: {}", join(.0))]
    Invalid(Vec<ConfigViolation>),
}

impl ConfigError {
    /// Every violated rule, empty for parse errors.
    pub fn violations(&self) -> &[ConfigViolation] {
        match self {
            Self::Invalid(violations) => violations,
            Self::Parse(_) => &[],
        }
    }
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_lists_every_violation() {
        let err = ConfigError::Invalid(vec![
            ConfigViolation::EmptyBaseName,
            ConfigViolation::HistoryDepth {
                found: 9000,
                max: 4096,
            },
        ]);
        assert_eq!(
            err.to_string(),
            "Configuration rejected: base_name must not be empty; \
             history_depth must be at most 4096 (got 9000)"
        );
        assert_eq!(err.violations().len(), 2);
    }

    #[test]
    fn parse_errors_have_no_violations() {
        let err = ConfigError::Parse("expected value".to_string());
        assert!(err.violations().is_empty());
    }
}
