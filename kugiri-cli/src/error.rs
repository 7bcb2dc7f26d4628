//! Error types for CLI operations

use thiserror::Error;

/// CLI-specific errors
#[derive(Debug, Error)]
pub enum CliError {
    /// No input file matched any of the supplied patterns
    #[error("No files found matching the provided patterns: {0}")]
    NoMatches(String),

    /// Glob pattern could not be parsed
    #[error("Invalid file pattern: {0}")]
    InvalidPattern(String),

    /// CLI configuration file is unreadable or malformed
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
