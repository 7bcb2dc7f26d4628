//! Word lists with O(1) membership checks
//!
//! Backs abbreviations, sentence starters, continuation words and
//! exclamation words. Lookups are exact and case-sensitive.

use std::collections::HashSet;

/// Word lookup table
#[derive(Debug, Clone, Default)]
pub struct WordTable {
    words: HashSet<String>,
    /// Minimum word length in bytes (optimization)
    min_length: usize,
    /// Maximum word length in bytes (optimization)
    max_length: usize,
}

impl WordTable {
    /// Build from words, dropping one trailing period from each entry
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut table = Self::default();
        table.extend(words);
        table
    }

    /// Add more words to the table
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            let word = word.as_ref().trim();
            let word = word.strip_suffix('.').unwrap_or(word);
            if word.is_empty() {
                continue;
            }
            if self.words.is_empty() {
                self.min_length = word.len();
                self.max_length = word.len();
            } else {
                self.min_length = self.min_length.min(word.len());
                self.max_length = self.max_length.max(word.len());
            }
            self.words.insert(word.to_string());
        }
    }

    /// Check if a word is in the table
    #[inline]
    pub fn contains(&self, word: &str) -> bool {
        // Quick length check
        if word.len() < self.min_length || word.len() > self.max_length {
            return false;
        }
        self.words.contains(word)
    }

    /// Check the word as written, then with its first letter uppercased
    pub fn contains_titlecased(&self, word: &str) -> bool {
        if self.contains(word) {
            return true;
        }
        let mut chars = word.chars();
        match chars.next() {
            Some(first) if first.is_lowercase() => {
                let titled: String = first.to_uppercase().chain(chars).collect();
                self.contains(&titled)
            }
            _ => false,
        }
    }

    /// Number of words in the table
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Iterate over the words in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }
}
