// File: rusty-validator/src/error.rs
// Purpose: Error types for attachment, rule evaluation and configuration

use thiserror::Error;

/// Why a validator refused to attach to a container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AttachError {
    #[error("container is not a form")]
    NotAForm,

    #[error("form contains no fields")]
    NoFields,
}

/// A fault raised while evaluating a rule.
///
/// Faults are not validation failures: a failing rule reports its message
/// through the `error` hook, while a fault aborts the pass for that field.
#[derive(Debug, Clone, Error)]
pub enum RuleError {
    #[error("invalid pattern `{pattern}`: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("unsupported selector `{0}`")]
    InvalidSelector(String),

    #[error("{0}")]
    Custom(String),
}

impl RuleError {
    /// Shorthand for faults raised by caller-supplied rules
    pub fn custom(message: impl Into<String>) -> Self {
        RuleError::Custom(message.into())
    }
}

/// Configuration could not be assembled
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("format `{name}` has an invalid pattern: {source}")]
    InvalidFormat {
        name: String,
        #[source]
        source: regex::Error,
    },
}
