//! Core types for sentence boundary detection

use core::fmt;
use serde::Serialize;

/// What ended a sentence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryKind {
    /// A single ASCII period
    Period,
    /// Any other full stop or run of full stops (`。`, `।`, `..`)
    FullStop,
    /// A run containing a question mark (`?`, `?!`, `？`)
    Question,
    /// A run containing an exclamation mark but no question mark
    Exclamation,
    /// Three or more periods, or an ellipsis glyph
    Ellipsis,
    /// Two or more consecutive line breaks
    ParagraphBreak,
    /// The text ran out without terminal punctuation
    EndOfText,
}

impl BoundaryKind {
    /// Whether this kind comes from terminal punctuation
    pub fn is_punctuation(self) -> bool {
        !matches!(self, BoundaryKind::ParagraphBreak | BoundaryKind::EndOfText)
    }
}

impl fmt::Display for BoundaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BoundaryKind::Period => "period",
            BoundaryKind::FullStop => "full_stop",
            BoundaryKind::Question => "question",
            BoundaryKind::Exclamation => "exclamation",
            BoundaryKind::Ellipsis => "ellipsis",
            BoundaryKind::ParagraphBreak => "paragraph_break",
            BoundaryKind::EndOfText => "end_of_text",
        };
        f.write_str(name)
    }
}

/// A position in the text, tracked in both bytes and codepoints
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Byte offset
    pub byte: usize,
    /// Codepoint offset
    pub char: usize,
}

impl Position {
    /// Create a new position
    pub fn new(byte: usize, char: usize) -> Self {
        Self { byte, char }
    }

    /// Advance past one character
    #[inline]
    pub fn step(self, ch: char) -> Self {
        Self {
            byte: self.byte + ch.len_utf8(),
            char: self.char + 1,
        }
    }
}

/// A provisional sentence break produced by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    /// Punctuation class that triggered the candidate
    pub kind: BoundaryKind,
    /// First character of the terminal run (or line-break run)
    pub run_start: Position,
    /// One past the last character of the run
    pub run_end: Position,
    /// One past any closing delimiters and numbered references after the run
    pub end: Position,
    /// The end was moved past at least one closing quote or bracket
    pub closes_enclosure: bool,
    /// The run ends in punctuation of a script written without spaces
    pub unspaced: bool,
}

impl Candidate {
    /// The punctuation run that triggered this candidate
    pub fn symbol<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.kind.is_punctuation() {
            text.get(self.run_start.byte..self.run_end.byte)
        } else {
            None
        }
    }
}

/// One sentence span in the original text
///
/// `start_index` and `end_index` are codepoint offsets; `byte_start` and
/// `byte_end` address the same span in bytes. `text` is the exact, untrimmed
/// slice of the input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Boundary<'a> {
    /// Codepoint offset of the first character
    pub start_index: usize,
    /// Codepoint offset one past the last character
    pub end_index: usize,
    /// Byte offset of the first character
    pub byte_start: usize,
    /// Byte offset one past the last character
    pub byte_end: usize,
    /// The exact source slice
    pub text: &'a str,
    /// What ended the sentence
    pub kind: BoundaryKind,
    /// The terminal punctuation run, if punctuation ended the sentence
    pub symbol: Option<&'a str>,
}

impl<'a> Boundary<'a> {
    /// The whitespace-trimmed sentence
    pub fn sentence(&self) -> &'a str {
        self.text.trim()
    }

    /// Length in codepoints
    pub fn char_len(&self) -> usize {
        self.end_index - self.start_index
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_step_counts_bytes_and_chars() {
        let pos = Position::default().step('a').step('。');
        assert_eq!(pos, Position::new(4, 2));
    }

    #[test]
    fn test_kind_display_matches_serde_name() {
        for kind in [
            BoundaryKind::Period,
            BoundaryKind::FullStop,
            BoundaryKind::Question,
            BoundaryKind::Exclamation,
            BoundaryKind::Ellipsis,
            BoundaryKind::ParagraphBreak,
            BoundaryKind::EndOfText,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{kind}\""));
        }
    }

    #[test]
    fn test_candidate_symbol() {
        let text = "Hi?! There";
        let candidate = Candidate {
            kind: BoundaryKind::Question,
            run_start: Position::new(2, 2),
            run_end: Position::new(4, 4),
            end: Position::new(4, 4),
            closes_enclosure: false,
            unspaced: false,
        };
        assert_eq!(candidate.symbol(text), Some("?!"));

        let paragraph = Candidate {
            kind: BoundaryKind::ParagraphBreak,
            ..candidate
        };
        assert_eq!(paragraph.symbol(text), None);
    }

    #[test]
    fn test_boundary_sentence_trims() {
        let boundary = Boundary {
            start_index: 0,
            end_index: 9,
            byte_start: 0,
            byte_end: 9,
            text: "  Hello. ",
            kind: BoundaryKind::Period,
            symbol: Some("."),
        };
        assert_eq!(boundary.sentence(), "Hello.");
        assert_eq!(boundary.char_len(), 9);
    }
}
