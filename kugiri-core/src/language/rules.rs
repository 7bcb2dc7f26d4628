//! Compiled, immutable per-language rule sets
//!
//! This module bridges the TOML configuration and the lookups the scanner
//! and classifier perform on the hot path.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::language::{
    config::{LanguageConfig, TerminatorClass},
    registry,
    tables::{EncTable, EnclosureInfo, TermTable, WordTable},
};

/// Words that keep their trailing `!` in every language
const GLOBAL_EXCLAMATION_WORDS: &[&str] = &["Yahoo", "Yum"];

/// Immutable rule set for one language
#[derive(Debug, Clone)]
pub struct RuleSet {
    code: String,
    name: String,

    /// Runtime tables
    terminators: TermTable,
    ellipsis_glyphs: HashSet<char>,
    break_before_uncased: bool,
    enclosures: EncTable,
    abbreviations: WordTable,
    sentence_final: WordTable,
    sentence_starters: WordTable,
    continuation_words: WordTable,
    after_closer: Vec<String>,
    lowercase_continuation: bool,
    exclamation_words: WordTable,
}

/// Table sizes reported by `validate`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSetStats {
    pub terminators: usize,
    pub enclosure_pairs: usize,
    pub abbreviations: usize,
    pub sentence_starters: usize,
    pub continuation_words: usize,
}

impl RuleSet {
    /// Compile a validated configuration, merging word lists from `parents`
    pub(crate) fn compile(config: &LanguageConfig, parents: &[Arc<RuleSet>]) -> Result<Self> {
        config
            .validate()
            .map_err(|reason| Error::config(&config.metadata.code, reason))?;

        let terminators = TermTable::new(
            config
                .terminators
                .extra
                .iter()
                .map(|entry| (entry.char, entry.class)),
            &config.terminators.exclude,
            config.terminators.unspaced.iter().copied(),
        );

        let enclosures = EncTable::new(config.enclosures.defaults, &config.enclosures.pairs);

        let mut abbreviations = WordTable::new(config.abbreviations.categories.values().flatten());
        abbreviations.extend(&config.abbreviations.sentence_final);
        let mut sentence_final = WordTable::new(&config.abbreviations.sentence_final);
        let mut sentence_starters =
            WordTable::new(config.sentence_starters.categories.values().flatten());
        let mut continuation_words = WordTable::new(&config.continuation.words);
        let mut exclamation_words = WordTable::new(GLOBAL_EXCLAMATION_WORDS);
        exclamation_words.extend(&config.exclamations.words);

        for parent in parents {
            abbreviations.extend(parent.abbreviations.iter());
            sentence_final.extend(parent.sentence_final.iter());
            sentence_starters.extend(parent.sentence_starters.iter());
            continuation_words.extend(parent.continuation_words.iter());
            exclamation_words.extend(parent.exclamation_words.iter());
        }

        Ok(Self {
            code: config.metadata.code.clone(),
            name: config.metadata.name.clone(),
            terminators,
            ellipsis_glyphs: config.ellipsis.glyphs.iter().copied().collect(),
            break_before_uncased: config.ellipsis.break_before_uncased,
            enclosures,
            abbreviations,
            sentence_final,
            sentence_starters,
            continuation_words,
            after_closer: config.continuation.after_closer.clone(),
            lowercase_continuation: config.continuation.lowercase,
            exclamation_words,
        })
    }

    /// Compile a user-supplied TOML document
    ///
    /// `inherits` entries are resolved against the embedded languages.
    pub fn from_toml_str(document: &str) -> Result<Self> {
        Self::from_toml_named(document, "<inline>")
    }

    /// Compile a TOML document from a file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_named(&document, &path.display().to_string())
    }

    fn from_toml_named(document: &str, source_name: &str) -> Result<Self> {
        let config: LanguageConfig =
            toml::from_str(document).map_err(|e| Error::config(source_name, e.to_string()))?;

        let parents = config
            .metadata
            .inherits
            .iter()
            .map(|code| registry::lookup(code))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "compiled external rule set '{}' from {source_name}",
            config.metadata.code
        );
        Self::compile(&config, &parents)
    }

    /// Language code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Table sizes
    pub fn stats(&self) -> RuleSetStats {
        RuleSetStats {
            terminators: self.terminators.len(),
            enclosure_pairs: self.enclosures.pair_count(),
            abbreviations: self.abbreviations.len(),
            sentence_starters: self.sentence_starters.len(),
            continuation_words: self.continuation_words.len(),
        }
    }

    #[inline]
    pub fn terminator_class(&self, ch: char) -> Option<TerminatorClass> {
        self.terminators.class(ch)
    }

    #[inline]
    pub fn is_ellipsis_glyph(&self, ch: char) -> bool {
        self.ellipsis_glyphs.contains(&ch)
    }

    /// Whether the character belongs in a terminal punctuation run
    #[inline]
    pub fn is_terminal(&self, ch: char) -> bool {
        self.terminators.is_terminator(ch) || self.is_ellipsis_glyph(ch)
    }

    #[inline]
    pub fn is_unspaced(&self, ch: char) -> bool {
        self.terminators.is_unspaced(ch)
    }

    #[inline]
    pub fn enclosure(&self, ch: char) -> Option<EnclosureInfo> {
        self.enclosures.get(ch)
    }

    #[inline]
    pub fn can_close_enclosure(&self, ch: char) -> bool {
        self.enclosures.can_close(ch)
    }

    #[inline]
    pub fn can_open_enclosure(&self, ch: char) -> bool {
        self.enclosures.can_open(ch)
    }

    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations.contains(word)
    }

    pub fn is_sentence_final(&self, word: &str) -> bool {
        self.sentence_final.contains(word)
    }

    pub fn is_sentence_starter(&self, word: &str) -> bool {
        self.sentence_starters.contains(word)
    }

    /// Month names and similar words that continue a sentence
    pub fn is_continuation_word(&self, word: &str) -> bool {
        self.continuation_words.contains_titlecased(word)
    }

    /// Whether text right after a closing quote continues the sentence
    pub fn continues_after_closer(&self, rest: &str) -> bool {
        self.after_closer.iter().any(|p| rest.starts_with(p.as_str()))
    }

    pub fn lowercase_continuation(&self) -> bool {
        self.lowercase_continuation
    }

    pub fn break_before_uncased(&self) -> bool {
        self.break_before_uncased
    }

    pub fn is_exclamation_word(&self, word: &str) -> bool {
        self.exclamation_words.contains(word)
    }
}
