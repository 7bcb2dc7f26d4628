//! Output formatting module

use anyhow::Result;
use kugiri_core::Boundary;
use std::io::Write;

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single sentence
    ///
    /// `source` names the input document when more than one is processed.
    fn format_sentence(&mut self, boundary: &Boundary<'_>, source: Option<&str>) -> Result<()>;

    /// Finalize output (e.g., close JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Plain text with one sentence per line
    Text,
    /// JSON array of sentences with offsets
    Json,
    /// Markdown numbered list
    Markdown,
}

impl OutputFormat {
    /// Build a formatter writing to `writer`
    pub fn formatter(
        self,
        writer: Box<dyn Write + Send + Sync>,
        pretty_json: bool,
    ) -> Box<dyn OutputFormatter> {
        match self {
            OutputFormat::Text => Box::new(TextFormatter::new(writer)),
            OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
            OutputFormat::Markdown => Box::new(MarkdownFormatter::new(writer)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_format_names_parse_case_insensitively() {
        assert_eq!(
            OutputFormat::from_str("JSON", true).unwrap(),
            OutputFormat::Json
        );
        assert_eq!(
            OutputFormat::from_str("markdown", false).unwrap(),
            OutputFormat::Markdown
        );
        assert!(OutputFormat::from_str("yaml", true).is_err());
    }

    #[test]
    fn test_every_format_has_help() {
        for format in OutputFormat::value_variants() {
            let value = format.to_possible_value().unwrap();
            assert!(value.get_help().is_some(), "{}", value.get_name());
        }
    }
}
