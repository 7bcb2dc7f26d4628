//! Character window for bounded context access
//!
//! The scanner reads its local context through this window instead of
//! re-slicing the text, keeping every step O(1).

use crate::types::Position;

/// Sliding window of characters
///
/// Maintains a 5-character window: [prev_prev, prev, current, next, next_next]
/// together with the position just past `current`.
#[derive(Debug, Clone, Default)]
pub struct CharacterWindow {
    chars: [Option<char>; 5],
    /// Position one past the current character
    end: Position,
}

impl CharacterWindow {
    /// Create new character window at the beginning of text
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance window by one character with lookahead
    pub fn advance(&mut self, current: char, next: Option<char>, next_next: Option<char>) {
        self.chars[0] = self.chars[1];
        self.chars[1] = self.chars[2];
        self.chars[2] = Some(current);
        self.chars[3] = next;
        self.chars[4] = next_next;

        self.end = self.end.step(current);
    }

    /// Get previous character (position - 1)
    pub fn prev_char(&self) -> Option<char> {
        self.chars[1]
    }

    /// Get current character
    pub fn current_char(&self) -> Option<char> {
        self.chars[2]
    }

    /// Get next character (position + 1)
    pub fn next_char(&self) -> Option<char> {
        self.chars[3]
    }

    /// Get character after next (position + 2)
    pub fn next_next_char(&self) -> Option<char> {
        self.chars[4]
    }

    /// Position of the current character
    pub fn current_position(&self) -> Position {
        match self.current_char() {
            Some(ch) => Position::new(self.end.byte - ch.len_utf8(), self.end.char - 1),
            None => self.end,
        }
    }

    /// Position one past the current character
    pub fn end_position(&self) -> Position {
        self.end
    }

    /// Check if the current character starts a line
    pub fn is_at_line_start(&self) -> bool {
        matches!(self.prev_char(), None | Some('\n') | Some('\r'))
    }
}
