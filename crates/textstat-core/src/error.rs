//! Error types for textstat-core.

use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// A configuration value is outside its accepted range.
    #[error("invalid value for `{field}`: {reason}")]
    Invalid {
        /// The offending configuration key.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur during text analysis.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The input text is empty or contains only whitespace.
    #[error("text cannot be empty")]
    EmptyInput,
}

/// Result type alias using [`AnalysisError`].
pub type AnalysisResult<T> = Result<T, AnalysisError>;
