//! Enclosure (bracket/quote) mapping with O(1) lookup
//!
//! Handles paired delimiters with support for symmetric quotes.

use std::collections::HashMap;

use crate::language::config::{EnclosurePair, MAX_ENCLOSURE_PAIRS};

/// Quote and bracket pairs every language starts from
pub const DEFAULT_PAIRS: &[(char, char, bool)] = &[
    ('(', ')', false),
    ('[', ']', false),
    ('{', '}', false),
    ('"', '"', true),
    ('\'', '\'', true),
    ('“', '”', false),
    ('‘', '’', false),
    ('«', '»', false),
    ('‹', '›', false),
    ('《', '》', false),
    ('〈', '〉', false),
    ('「', '」', false),
    ('『', '』', false),
    ('（', '）', false),
    ('【', '】', false),
    ('〔', '〕', false),
];

/// How a delimiter participates in its pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Open,
    Close,
    /// Same character opens and closes; context decides
    Symmetric,
}

/// Lookup result for a delimiter character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnclosureInfo {
    /// Pair identifier, unique per table
    pub pair: u8,
    pub role: Role,
}

/// Enclosure character mapping table
#[derive(Debug, Clone)]
pub struct EncTable {
    /// Direct character -> EnclosureInfo mapping
    map: HashMap<char, EnclosureInfo>,
    pairs: Vec<EnclosurePair>,
}

impl EncTable {
    /// Create from pairs configuration
    ///
    /// Language pairs replace any default pair that claims one of their
    /// characters, so `„“` can take over `“` from the English-style default.
    pub fn new(use_defaults: bool, language_pairs: &[EnclosurePair]) -> Self {
        let mut pairs: Vec<EnclosurePair> = Vec::new();

        if use_defaults {
            for &(open, close, symmetric) in DEFAULT_PAIRS {
                let claimed = language_pairs
                    .iter()
                    .any(|p| [p.open, p.close].iter().any(|c| *c == open || *c == close));
                if !claimed {
                    pairs.push(EnclosurePair {
                        open,
                        close,
                        symmetric,
                    });
                }
            }
        }
        pairs.extend(language_pairs.iter().cloned());
        pairs.truncate(MAX_ENCLOSURE_PAIRS);

        let mut map = HashMap::new();
        for (pair, p) in pairs.iter().enumerate() {
            let pair = pair as u8;
            if p.symmetric {
                map.insert(
                    p.open,
                    EnclosureInfo {
                        pair,
                        role: Role::Symmetric,
                    },
                );
            } else {
                map.insert(
                    p.open,
                    EnclosureInfo {
                        pair,
                        role: Role::Open,
                    },
                );
                map.insert(
                    p.close,
                    EnclosureInfo {
                        pair,
                        role: Role::Close,
                    },
                );
            }
        }

        Self { map, pairs }
    }

    /// Look up enclosure info for character
    #[inline]
    pub fn get(&self, ch: char) -> Option<EnclosureInfo> {
        self.map.get(&ch).copied()
    }

    /// Whether the character can close an enclosure
    #[inline]
    pub fn can_close(&self, ch: char) -> bool {
        matches!(
            self.get(ch),
            Some(EnclosureInfo {
                role: Role::Close | Role::Symmetric,
                ..
            })
        )
    }

    /// Whether the character can open an enclosure
    #[inline]
    pub fn can_open(&self, ch: char) -> bool {
        matches!(
            self.get(ch),
            Some(EnclosureInfo {
                role: Role::Open | Role::Symmetric,
                ..
            })
        )
    }

    /// Number of pairs in the table
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }
}
