//! Configuration structures and validation
//!
//! This module defines the TOML schema for language rule sets.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

/// Maximum number of enclosure pairs per language
pub const MAX_ENCLOSURE_PAIRS: usize = 255;

/// Root language configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    pub metadata: Metadata,
    #[serde(default)]
    pub terminators: Terminators,
    #[serde(default)]
    pub ellipsis: Ellipsis,
    #[serde(default)]
    pub enclosures: Enclosures,
    #[serde(default)]
    pub abbreviations: Abbreviations,
    #[serde(default)]
    pub sentence_starters: SentenceStarters,
    #[serde(default)]
    pub continuation: Continuation,
    #[serde(default)]
    pub exclamations: Exclamations,
}

/// Language metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub code: String,
    pub name: String,
    /// Embedded languages whose word lists are merged into this one
    #[serde(default)]
    pub inherits: Vec<String>,
}

/// Adjustments to the global terminal punctuation table
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Terminators {
    #[serde(default)]
    pub extra: Vec<TerminatorEntry>,
    #[serde(default)]
    pub exclude: Vec<char>,
    /// Terminators of scripts written without inter-sentence spaces
    #[serde(default)]
    pub unspaced: Vec<char>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TerminatorEntry {
    pub char: char,
    #[serde(default)]
    pub class: TerminatorClass,
}

/// Role a terminator plays in a punctuation run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TerminatorClass {
    #[default]
    FullStop,
    Question,
    Exclamation,
}

/// Ellipsis configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ellipsis {
    #[serde(default = "default_ellipsis_glyphs")]
    pub glyphs: Vec<char>,
    /// Whether an ellipsis before an uncased letter ends the sentence
    #[serde(default = "default_true")]
    pub break_before_uncased: bool,
}

impl Default for Ellipsis {
    fn default() -> Self {
        Self {
            glyphs: default_ellipsis_glyphs(),
            break_before_uncased: true,
        }
    }
}

/// Enclosure configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enclosures {
    /// Start from the shared quote and bracket pairs
    #[serde(default = "default_true")]
    pub defaults: bool,
    #[serde(default)]
    pub pairs: Vec<EnclosurePair>,
}

impl Default for Enclosures {
    fn default() -> Self {
        Self {
            defaults: true,
            pairs: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnclosurePair {
    pub open: char,
    pub close: char,
    #[serde(default)]
    pub symmetric: bool,
}

/// Abbreviation configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Abbreviations {
    /// Abbreviations that may also end a sentence before a capitalized word
    #[serde(default)]
    pub sentence_final: Vec<String>,
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

/// Sentence starters configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentenceStarters {
    #[serde(flatten)]
    pub categories: HashMap<String, Vec<String>>,
}

/// Tokens after a terminator that continue the current sentence
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Continuation {
    /// A following lowercase letter or digit continues the sentence
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default)]
    pub words: Vec<String>,
    /// Prefixes that continue a sentence right after a closing quote
    #[serde(default)]
    pub after_closer: Vec<String>,
}

impl Default for Continuation {
    fn default() -> Self {
        Self {
            lowercase: true,
            words: Vec::new(),
            after_closer: Vec::new(),
        }
    }
}

/// Words whose trailing `!` belongs to the word
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Exclamations {
    #[serde(default)]
    pub words: Vec<String>,
}

fn default_true() -> bool {
    true
}

fn default_ellipsis_glyphs() -> Vec<char> {
    vec!['…', '⋯']
}

/// Whether a language code is well formed
pub(crate) fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= 32
        && code.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

impl LanguageConfig {
    /// Validate configuration
    pub(crate) fn validate(&self) -> Result<(), String> {
        if !is_well_formed_code(&self.metadata.code) {
            return Err(format!(
                "Invalid language code '{}' (expected ASCII letters, digits and '-')",
                self.metadata.code
            ));
        }

        if self.metadata.name.trim().is_empty() {
            return Err("Language name must not be empty".to_string());
        }

        // Check enclosure pairs limit
        if self.enclosures.pairs.len() > MAX_ENCLOSURE_PAIRS {
            return Err(format!(
                "Too many enclosure pairs (max {MAX_ENCLOSURE_PAIRS})"
            ));
        }

        let mut claimed = HashSet::new();
        for pair in &self.enclosures.pairs {
            if pair.symmetric && pair.open != pair.close {
                return Err(format!(
                    "Symmetric enclosure must use one character, got '{}' and '{}'",
                    pair.open, pair.close
                ));
            }
            if !pair.symmetric && pair.open == pair.close {
                return Err(format!(
                    "Enclosure '{}' opens and closes itself; mark it symmetric",
                    pair.open
                ));
            }
            let chars = if pair.symmetric {
                vec![pair.open]
            } else {
                vec![pair.open, pair.close]
            };
            for ch in chars {
                if !claimed.insert(ch) {
                    return Err(format!("Enclosure character '{ch}' is defined twice"));
                }
            }
        }

        for entry in &self.terminators.extra {
            if entry.char.is_whitespace() || entry.char.is_alphanumeric() {
                return Err(format!(
                    "Terminator '{}' must be punctuation",
                    entry.char.escape_default()
                ));
            }
        }

        if self.metadata.inherits.iter().any(|c| c == &self.metadata.code) {
            return Err(format!(
                "Language '{}' cannot inherit from itself",
                self.metadata.code
            ));
        }

        Ok(())
    }

    /// Template document used by `generate-config`
    pub fn template(code: &str, name: &str) -> String {
        format!(
            r#"# Kugiri language configuration

[metadata]
code = "{code}"
name = "{name}"
# Embedded languages whose word lists are merged in
inherits = []

[terminators]
# extra = [{{ char = ";", class = "question" }}]
extra = []
exclude = []

[ellipsis]
glyphs = ["…"]
break_before_uncased = true

[enclosures]
defaults = true
pairs = []

[abbreviations]
sentence_final = []
titles = ["Dr", "Mr", "Mrs"]

[sentence_starters]
pronouns = ["He", "She", "They"]

[continuation]
lowercase = true
words = []

[exclamations]
words = []
"#
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(doc: &str) -> LanguageConfig {
        toml::from_str(doc).unwrap()
    }

    #[test]
    fn test_minimal_document_uses_defaults() {
        let config = parse(
            r#"
[metadata]
code = "xx"
name = "Minimal"
"#,
        );
        assert!(config.validate().is_ok());
        assert!(config.enclosures.defaults);
        assert!(config.continuation.lowercase);
        assert!(config.ellipsis.break_before_uncased);
        assert_eq!(config.ellipsis.glyphs, vec!['…', '⋯']);
        assert!(config.abbreviations.categories.is_empty());
    }

    #[test]
    fn test_abbreviation_categories_flatten() {
        let config = parse(
            r#"
[metadata]
code = "xx"
name = "Test"

[abbreviations]
sentence_final = ["etc"]
titles = ["Dr", "Mr"]
months = ["Jan"]
"#,
        );
        assert_eq!(config.abbreviations.sentence_final, vec!["etc"]);
        assert_eq!(config.abbreviations.categories.len(), 2);
        assert_eq!(config.abbreviations.categories["titles"], vec!["Dr", "Mr"]);
    }

    #[test]
    fn test_terminator_class_parsing() {
        let config = parse(
            r#"
[metadata]
code = "el"
name = "Greek"

[terminators]
extra = [{ char = ";", class = "question" }, { char = "၏" }]
"#,
        );
        assert_eq!(config.terminators.extra[0].class, TerminatorClass::Question);
        assert_eq!(config.terminators.extra[1].class, TerminatorClass::FullStop);
    }

    #[test]
    fn test_validate_rejects_bad_code() {
        let mut config = parse(
            r#"
[metadata]
code = "en"
name = "English"
"#,
        );
        config.metadata.code = String::new();
        assert!(config.validate().is_err());
        config.metadata.code = "en us".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_duplicate_enclosure() {
        let config = parse(
            r#"
[metadata]
code = "xx"
name = "Test"

[enclosures]
pairs = [{ open = "(", close = ")" }, { open = "[", close = ")" }]
"#,
        );
        let err = config.validate().unwrap_err();
        assert!(err.contains("defined twice"));
    }

    #[test]
    fn test_validate_rejects_self_inheritance() {
        let config = parse(
            r#"
[metadata]
code = "xx"
name = "Test"
inherits = ["xx"]
"#,
        );
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_template_round_trips_through_validation() {
        let config = parse(&LanguageConfig::template("tl", "Tagalog"));
        assert!(config.validate().is_ok());
        assert_eq!(config.metadata.code, "tl");
    }
}
