//! Error types for sentence segmentation

use thiserror::Error;

/// Errors surfaced by the segmentation engine
///
/// Segmentation itself never fails once a rule set is resolved and the input
/// is valid text. Every variant here is raised before any output is produced.
#[derive(Error, Debug)]
pub enum Error {
    /// Language code is unknown, malformed, or could not be resolved
    #[error("language '{code}' not supported")]
    UnsupportedLanguage {
        /// The offending language code as supplied by the caller
        code: String,
    },

    /// Input is not valid text
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// Why the input was rejected
        reason: String,
    },

    /// A language configuration document failed to parse or validate
    #[error("invalid language configuration '{source_name}': {reason}")]
    Config {
        /// Where the document came from (language code or file path)
        source_name: String,
        /// The parse or validation failure
        reason: String,
    },

    /// An HTML document could not be parsed
    #[cfg(feature = "html")]
    #[error("HTML parsing failed: {reason}")]
    Html {
        /// Why parsing failed
        reason: String,
    },

    /// Reading input failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn unsupported(code: impl Into<String>) -> Self {
        Error::UnsupportedLanguage { code: code.into() }
    }

    pub(crate) fn config(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Config {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for segmentation operations
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_names_code() {
        let err = Error::unsupported("xx-yy");
        assert_eq!(err.to_string(), "language 'xx-yy' not supported");
    }

    #[test]
    fn test_config_error_display() {
        let err = Error::config("custom.toml", "missing field `code`");
        assert_eq!(
            err.to_string(),
            "invalid language configuration 'custom.toml': missing field `code`"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("gone"));
    }
}
