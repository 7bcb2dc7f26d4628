//! Terminator character detection with O(1) lookup
//!
//! Optimized for hot-path performance with ASCII fast-path.

use std::collections::{HashMap, HashSet};

use crate::language::config::TerminatorClass;

/// Sentence terminal punctuation shared by every language.
///
/// Drawn from the Unicode `STerm` and `ATerm` sentence-break classes, plus the
/// CJK ideographic and halfwidth full stops.
pub const GLOBAL_TERMINATORS: &[(char, TerminatorClass)] = &[
    ('.', TerminatorClass::FullStop),
    ('!', TerminatorClass::Exclamation),
    ('?', TerminatorClass::Question),
    ('։', TerminatorClass::FullStop),
    ('؝', TerminatorClass::FullStop),
    ('؞', TerminatorClass::FullStop),
    ('؟', TerminatorClass::Question),
    ('۔', TerminatorClass::FullStop),
    ('܀', TerminatorClass::FullStop),
    ('܁', TerminatorClass::FullStop),
    ('܂', TerminatorClass::FullStop),
    ('߹', TerminatorClass::Exclamation),
    ('।', TerminatorClass::FullStop),
    ('॥', TerminatorClass::FullStop),
    ('၊', TerminatorClass::FullStop),
    ('။', TerminatorClass::FullStop),
    ('።', TerminatorClass::FullStop),
    ('፧', TerminatorClass::Question),
    ('፨', TerminatorClass::FullStop),
    ('᙮', TerminatorClass::FullStop),
    ('᜵', TerminatorClass::FullStop),
    ('᜶', TerminatorClass::FullStop),
    ('᠃', TerminatorClass::FullStop),
    ('᠉', TerminatorClass::FullStop),
    ('᥄', TerminatorClass::Exclamation),
    ('᥅', TerminatorClass::Question),
    ('᪨', TerminatorClass::FullStop),
    ('᪩', TerminatorClass::FullStop),
    ('᪪', TerminatorClass::FullStop),
    ('᪫', TerminatorClass::FullStop),
    ('᭚', TerminatorClass::FullStop),
    ('᭛', TerminatorClass::FullStop),
    ('᭞', TerminatorClass::FullStop),
    ('᭟', TerminatorClass::FullStop),
    ('᰻', TerminatorClass::FullStop),
    ('᰼', TerminatorClass::FullStop),
    ('᱾', TerminatorClass::FullStop),
    ('᱿', TerminatorClass::FullStop),
    ('‼', TerminatorClass::Exclamation),
    ('‽', TerminatorClass::Question),
    ('⁇', TerminatorClass::Question),
    ('⁈', TerminatorClass::Question),
    ('⁉', TerminatorClass::Question),
    ('⸮', TerminatorClass::Question),
    ('⸼', TerminatorClass::FullStop),
    ('。', TerminatorClass::FullStop),
    ('꓿', TerminatorClass::FullStop),
    ('꘎', TerminatorClass::FullStop),
    ('꘏', TerminatorClass::FullStop),
    ('꛳', TerminatorClass::FullStop),
    ('꛷', TerminatorClass::Question),
    ('꡶', TerminatorClass::FullStop),
    ('꡷', TerminatorClass::FullStop),
    ('꣎', TerminatorClass::FullStop),
    ('꣏', TerminatorClass::FullStop),
    ('꤯', TerminatorClass::FullStop),
    ('꧈', TerminatorClass::FullStop),
    ('꧉', TerminatorClass::FullStop),
    ('꩝', TerminatorClass::FullStop),
    ('꩞', TerminatorClass::FullStop),
    ('꩟', TerminatorClass::FullStop),
    ('꫰', TerminatorClass::FullStop),
    ('꫱', TerminatorClass::FullStop),
    ('꯫', TerminatorClass::FullStop),
    ('﹒', TerminatorClass::FullStop),
    ('﹖', TerminatorClass::Question),
    ('﹗', TerminatorClass::Exclamation),
    ('！', TerminatorClass::Exclamation),
    ('．', TerminatorClass::FullStop),
    ('？', TerminatorClass::Question),
    ('｡', TerminatorClass::FullStop),
];

/// Terminators of scripts that do not put spaces between sentences
pub const UNSPACED_TERMINATORS: &[char] = &['。', '｡', '！', '？', '．'];

/// Fast terminator lookup table
#[derive(Debug, Clone)]
pub struct TermTable {
    /// ASCII lookup table for chars 0-127
    ascii_table: [Option<TerminatorClass>; 128],
    /// Map for non-ASCII terminators
    non_ascii: HashMap<char, TerminatorClass>,
    /// Terminators exempt from the spacing rules
    unspaced: HashSet<char>,
}

impl TermTable {
    /// Build from the global table, applying additions and removals
    pub fn new(
        extra: impl IntoIterator<Item = (char, TerminatorClass)>,
        exclude: &[char],
        unspaced: impl IntoIterator<Item = char>,
    ) -> Self {
        let mut table = Self {
            ascii_table: [None; 128],
            non_ascii: HashMap::new(),
            unspaced: UNSPACED_TERMINATORS.iter().copied().collect(),
        };

        for &(ch, class) in GLOBAL_TERMINATORS {
            table.insert(ch, class);
        }
        for (ch, class) in extra {
            table.insert(ch, class);
        }
        for &ch in exclude {
            table.remove(ch);
        }
        table.unspaced.extend(unspaced);

        table
    }

    fn insert(&mut self, ch: char, class: TerminatorClass) {
        if ch.is_ascii() {
            self.ascii_table[ch as usize] = Some(class);
        } else {
            self.non_ascii.insert(ch, class);
        }
    }

    fn remove(&mut self, ch: char) {
        if ch.is_ascii() {
            self.ascii_table[ch as usize] = None;
        } else {
            self.non_ascii.remove(&ch);
        }
    }

    /// Class of a terminator character - hot path
    #[inline]
    pub fn class(&self, ch: char) -> Option<TerminatorClass> {
        if ch.is_ascii() {
            // Fast path: direct array lookup
            self.ascii_table[ch as usize]
        } else {
            self.non_ascii.get(&ch).copied()
        }
    }

    /// Check if character is a terminator
    #[inline]
    pub fn is_terminator(&self, ch: char) -> bool {
        self.class(ch).is_some()
    }

    /// Check if a terminator belongs to an unspaced script
    #[inline]
    pub fn is_unspaced(&self, ch: char) -> bool {
        self.unspaced.contains(&ch)
    }

    /// Number of terminator characters in the table
    pub fn len(&self) -> usize {
        self.ascii_table.iter().filter(|c| c.is_some()).count() + self.non_ascii.len()
    }

    /// Whether the table is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
