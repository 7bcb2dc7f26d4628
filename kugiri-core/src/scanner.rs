//! Single-pass scanner producing boundary candidates
//!
//! The scanner walks the text once and emits two kinds of events: candidate
//! break positions (terminal punctuation runs and paragraph breaks) and
//! enclosure marks for quotes and brackets. It keeps no state between calls.

use crate::character_window::CharacterWindow;
use crate::language::{
    tables::{EnclosureInfo, Role},
    RuleSet, TerminatorClass,
};
use crate::types::{BoundaryKind, Candidate, Position};

/// A quote or bracket seen by the scanner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// Pair identifier from the rule set's enclosure table
    pub pair: u8,
    /// Position of the delimiter
    pub at: Position,
    pub can_open: bool,
    pub can_close: bool,
}

/// Scanner output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    Candidate(Candidate),
    Enclosure(Mark),
}

/// Lazy scanner over one text
pub struct Scanner<'a> {
    text: &'a str,
    rules: &'a RuleSet,
    window: CharacterWindow,
}

impl<'a> Scanner<'a> {
    /// Create a scanner at the start of `text`
    pub fn new(text: &'a str, rules: &'a RuleSet) -> Self {
        Self {
            text,
            rules,
            window: CharacterWindow::new(),
        }
    }

    fn rest(&self) -> &'a str {
        self.text
            .get(self.window.end_position().byte..)
            .unwrap_or_default()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consume one character into the window
    fn bump(&mut self) -> Option<char> {
        let mut ahead = self.rest().chars();
        let ch = ahead.next()?;
        let next = ahead.next();
        let next_next = ahead.next();
        self.window.advance(ch, next, next_next);
        Some(ch)
    }

    fn terminal_run(&mut self, first: char) -> Candidate {
        let run_start = self.window.current_position();
        let mut shape = RunShape::default();
        shape.add(first, self.rules);
        let mut last = first;

        loop {
            match self.peek() {
                Some(next) if self.rules.is_terminal(next) => {
                    self.bump();
                    shape.add(next, self.rules);
                    last = next;
                }
                // Spaced ellipsis ". . ."
                Some(' ')
                    if last == '.'
                        && shape.only_dots()
                        && self.window.next_next_char() == Some('.') =>
                {
                    self.bump();
                    self.bump();
                    shape.add('.', self.rules);
                }
                _ => break,
            }
        }

        let run_end = self.window.end_position();
        let (end, closes_enclosure) = self.extend_end(run_end);

        Candidate {
            kind: shape.kind(),
            run_start,
            run_end,
            end,
            closes_enclosure,
            unspaced: self.rules.is_unspaced(last),
        }
    }

    /// Move a run end past closing delimiters and numbered references
    ///
    /// Looks ahead without consuming so the delimiters still produce marks.
    fn extend_end(&self, run_end: Position) -> (Position, bool) {
        let mut end = run_end;
        let mut closes = false;
        let rest = self.text.get(run_end.byte..).unwrap_or_default();

        loop {
            let tail = &rest[end.byte - run_end.byte..];
            let closer = tail
                .chars()
                .next()
                .filter(|&c| self.rules.can_close_enclosure(c));
            if let Some(c) = closer {
                end = end.step(c);
                closes = true;
                continue;
            }
            if let Some(len) = numbered_reference_len(tail) {
                let consumed = &tail[..len];
                end = Position::new(end.byte + len, end.char + consumed.chars().count());
                continue;
            }
            break;
        }

        (end, closes)
    }

    /// Consume a whitespace run containing line breaks
    fn line_break_run(&mut self, first: char) -> Option<Candidate> {
        let run_start = self.window.current_position();
        let mut breaks = line_break_weight(first, self.window.next_char());

        while let Some(next) = self.peek() {
            if !next.is_whitespace() {
                break;
            }
            self.bump();
            breaks += line_break_weight(next, self.window.next_char());
        }

        let run_end = self.window.end_position();
        (breaks >= 2).then_some(Candidate {
            kind: BoundaryKind::ParagraphBreak,
            run_start,
            run_end,
            end: run_end,
            closes_enclosure: false,
            unspaced: false,
        })
    }

    fn mark(&self, ch: char, info: EnclosureInfo) -> Option<Mark> {
        let prev = self.window.prev_char();
        let next = self.window.next_char();

        let (can_open, can_close) = match info.role {
            Role::Open => (true, false),
            Role::Close => (false, !(is_apostrophe(ch) && is_word_internal(prev, next))),
            Role::Symmetric if is_apostrophe(ch) => {
                let after_space = self.window.is_at_line_start()
                    || prev.is_some_and(|p| p.is_whitespace() || self.rules.can_open_enclosure(p));
                (
                    after_space && next.is_some_and(|n| !n.is_whitespace()),
                    prev.is_some_and(|p| !p.is_whitespace())
                        && !next.is_some_and(char::is_alphanumeric),
                )
            }
            Role::Symmetric => (
                next.is_some_and(|n| !n.is_whitespace()),
                prev.is_some_and(|p| !p.is_whitespace()),
            ),
        };

        (can_open || can_close).then_some(Mark {
            pair: info.pair,
            at: self.window.current_position(),
            can_open,
            can_close,
        })
    }
}

impl Iterator for Scanner<'_> {
    type Item = Event;

    fn next(&mut self) -> Option<Event> {
        while let Some(ch) = self.bump() {
            if self.rules.is_terminal(ch) {
                return Some(Event::Candidate(self.terminal_run(ch)));
            }
            if is_line_break(ch) {
                if let Some(candidate) = self.line_break_run(ch) {
                    return Some(Event::Candidate(candidate));
                }
                continue;
            }
            if let Some(info) = self.rules.enclosure(ch) {
                if let Some(mark) = self.mark(ch, info) {
                    return Some(Event::Enclosure(mark));
                }
            }
        }
        None
    }
}

/// Scan `text` into events
pub fn scan<'a>(text: &'a str, rules: &'a RuleSet) -> Scanner<'a> {
    Scanner::new(text, rules)
}

/// Shape of a terminal punctuation run
#[derive(Debug, Default)]
struct RunShape {
    dots: usize,
    glyphs: usize,
    other_stops: usize,
    questions: usize,
    exclamations: usize,
}

impl RunShape {
    fn add(&mut self, ch: char, rules: &RuleSet) {
        if ch == '.' {
            self.dots += 1;
            return;
        }
        match rules.terminator_class(ch) {
            Some(TerminatorClass::Question) => self.questions += 1,
            Some(TerminatorClass::Exclamation) => self.exclamations += 1,
            Some(TerminatorClass::FullStop) => self.other_stops += 1,
            None => self.glyphs += 1,
        }
    }

    fn only_dots(&self) -> bool {
        self.glyphs + self.other_stops + self.questions + self.exclamations == 0
    }

    fn kind(&self) -> BoundaryKind {
        if self.questions > 0 {
            BoundaryKind::Question
        } else if self.exclamations > 0 {
            BoundaryKind::Exclamation
        } else if self.other_stops > 0 {
            BoundaryKind::FullStop
        } else if self.glyphs > 0 || self.dots >= 3 {
            BoundaryKind::Ellipsis
        } else if self.dots == 1 {
            BoundaryKind::Period
        } else {
            BoundaryKind::FullStop
        }
    }
}

fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0B}' | '\u{0C}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// How many line breaks a character contributes
///
/// `\r\n` counts once; a paragraph separator counts as a full break.
fn line_break_weight(ch: char, next: Option<char>) -> usize {
    match ch {
        '\r' if next == Some('\n') => 0,
        '\u{2029}' => 2,
        c if is_line_break(c) => 1,
        _ => 0,
    }
}

fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '’')
}

fn is_word_internal(prev: Option<char>, next: Option<char>) -> bool {
    prev.is_some_and(char::is_alphanumeric) && next.is_some_and(char::is_alphanumeric)
}

/// Byte length of a `[12]`-style reference, optionally preceded by spaces
fn numbered_reference_len(text: &str) -> Option<usize> {
    let trimmed = text.trim_start_matches([' ', '\t']);
    let spaces = text.len() - trimmed.len();
    let inner = trimmed.strip_prefix('[')?;
    let digits = inner.len() - inner.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 || !inner[digits..].starts_with(']') {
        return None;
    }
    Some(spaces + 1 + digits + 1)
}
