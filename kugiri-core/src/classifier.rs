//! Boundary classifier
//!
//! Decides whether a candidate is a true sentence break. Every rule is local:
//! it reads at most [`LOOKAROUND`] characters on either side of the
//! candidate, so classification stays linear in the input length.

use crate::language::RuleSet;
use crate::types::{BoundaryKind, Candidate};

/// Maximum characters read before or after a candidate
pub const LOOKAROUND: usize = 64;

/// Roman numerals accepted as list markers
const ROMAN_NUMERALS: &[&str] = &[
    "i", "ii", "iii", "iv", "v", "vi", "vii", "viii", "ix", "x", "xi", "xii", "xiii", "xiv", "xv",
    "xvi", "xvii", "xviii", "xix", "xx",
];

/// Why a candidate was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// Punctuation inside a token: `3.14`, `example.com`
    TokenInternal,
    /// A comma, semicolon or colon follows
    ClauseContinues,
    /// The `!` belongs to a word such as `Yahoo!`
    ExclamationWord,
    /// `1.` or `iv.` at the start of a line
    ListMarker,
    Abbreviation,
    /// `J.` in `J. Smith`
    Initial,
    /// `[...]` marking omitted text
    Elision,
    /// An ellipsis followed by a lowercase word
    EllipsisContinuation,
    /// The next word starts lowercase or with a digit
    LowercaseContinuation,
    /// The next word is a listed continuation word
    ContinuationWord,
}

/// Classification result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Accept,
    Reject(RejectReason),
}

impl Decision {
    pub fn is_accept(self) -> bool {
        self == Decision::Accept
    }
}

/// Bounded view of the text around candidates
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    text: &'a str,
}

impl<'a> Context<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Text from `byte` to the end
    pub fn after(&self, byte: usize) -> &'a str {
        self.text.get(byte..).unwrap_or_default()
    }

    /// The non-whitespace token ending at `byte`, with its start offset
    pub fn word_before(&self, byte: usize) -> (usize, &'a str) {
        let head = self.text.get(..byte).unwrap_or_default();
        let start = head
            .char_indices()
            .rev()
            .take(LOOKAROUND)
            .take_while(|(_, c)| !c.is_whitespace())
            .last()
            .map_or(byte, |(i, _)| i);
        (start, &head[start..])
    }

    /// Whether only horizontal whitespace precedes `byte` on its line
    pub fn starts_line(&self, byte: usize) -> bool {
        let head = self.text.get(..byte).unwrap_or_default();
        for c in head.chars().rev().take(LOOKAROUND) {
            if c == '\n' || c == '\r' {
                return true;
            }
            if !c.is_whitespace() {
                return false;
            }
        }
        head.chars().rev().nth(LOOKAROUND).is_none()
    }

    /// Whether the next token is another initial, an uppercase letter
    /// directly followed by `.`
    pub fn initial_follows(&self, byte: usize) -> bool {
        let mut chars = self.after(byte).trim_start().chars();
        matches!((chars.next(), chars.next()), (Some(c), Some('.')) if c.is_uppercase())
    }

    /// Whether the run between `start` and `end` is wrapped in square
    /// brackets with nothing in between
    pub fn bracketed(&self, start: usize, end: usize) -> bool {
        self.text
            .get(..start)
            .is_some_and(|head| head.ends_with('['))
            && self.after(end).starts_with(']')
    }

    /// The next word after `byte`
    ///
    /// Skips whitespace and leading punctuation such as opening quotes, then
    /// takes characters up to the next whitespace and drops trailing
    /// punctuation.
    pub fn next_word(&self, byte: usize) -> Option<&'a str> {
        let rest = self.after(byte);
        let start = rest
            .char_indices()
            .take(LOOKAROUND)
            .find(|(_, c)| c.is_alphanumeric())
            .map(|(i, _)| i)?;
        let word = &rest[start..];
        let len = word
            .char_indices()
            .take(LOOKAROUND)
            .find(|(_, c)| c.is_whitespace())
            .map_or_else(
                || word.char_indices().nth(LOOKAROUND).map_or(word.len(), |(i, _)| i),
                |(i, _)| i,
            );
        let word = word[..len].trim_end_matches(|c: char| !c.is_alphanumeric());
        (!word.is_empty()).then_some(word)
    }
}

/// Classify one candidate
pub fn classify(candidate: &Candidate, context: &Context<'_>, rules: &RuleSet) -> Decision {
    let decision = decide(candidate, context, rules);
    log::trace!(
        "candidate {:?} at {}: {:?}",
        candidate.kind,
        candidate.run_start.char,
        decision
    );
    decision
}

fn decide(candidate: &Candidate, context: &Context<'_>, rules: &RuleSet) -> Decision {
    use Decision::{Accept, Reject};

    if candidate.kind == BoundaryKind::ParagraphBreak {
        return Accept;
    }
    if candidate.kind == BoundaryKind::Ellipsis
        && context.bracketed(candidate.run_start.byte, candidate.run_end.byte)
    {
        return Reject(RejectReason::Elision);
    }

    let rest = context.after(candidate.end.byte);
    if rest.trim_start().is_empty() {
        return Accept;
    }
    let directly_after = rest.chars().next();

    if directly_after.is_some_and(is_clause_punctuation) {
        return Reject(RejectReason::ClauseContinues);
    }
    if !candidate.unspaced
        && candidate.kind != BoundaryKind::Ellipsis
        && directly_after.is_some_and(char::is_alphanumeric)
    {
        return Reject(RejectReason::TokenInternal);
    }

    let (word_start, word) = context.word_before(candidate.run_start.byte);
    let next_word = context.next_word(candidate.end.byte);

    if candidate.kind == BoundaryKind::Exclamation && rules.is_exclamation_word(trim_word(word)) {
        return Reject(RejectReason::ExclamationWord);
    }

    if candidate.kind == BoundaryKind::Period {
        if is_list_marker(word) && context.starts_line(word_start) {
            return Reject(RejectReason::ListMarker);
        }
        if let Some(abbreviation) = abbreviation_of(word, rules) {
            let capitalized = next_word.is_some_and(starts_uppercase);
            return if capitalized && rules.is_sentence_final(abbreviation) {
                Accept
            } else {
                Reject(RejectReason::Abbreviation)
            };
        }
        // A listed starter ends a lone initial (`plan B. Then`), but never
        // inside a run of initials (`J. A. Smith`)
        if is_initial(trim_word(word))
            && (context.initial_follows(candidate.end.byte)
                || !next_word.is_some_and(|w| rules.is_sentence_starter(w)))
        {
            return Reject(RejectReason::Initial);
        }
    }

    if candidate.kind == BoundaryKind::Ellipsis {
        let Some(first) = next_word.and_then(|w| w.chars().next()) else {
            return Accept;
        };
        let uncased = first.is_alphabetic() && !first.is_lowercase() && !first.is_uppercase();
        return if first.is_uppercase() || (uncased && rules.break_before_uncased()) {
            Accept
        } else {
            Reject(RejectReason::EllipsisContinuation)
        };
    }

    if let Some(word) = next_word {
        if rules.lowercase_continuation()
            && word
                .chars()
                .next()
                .is_some_and(|c| c.is_lowercase() || c.is_numeric())
        {
            return Reject(RejectReason::LowercaseContinuation);
        }
        if rules.is_continuation_word(word) {
            return Reject(RejectReason::ContinuationWord);
        }
    }

    if candidate.closes_enclosure && rules.continues_after_closer(rest.trim_start()) {
        return Reject(RejectReason::ContinuationWord);
    }

    Accept
}

fn is_clause_punctuation(c: char) -> bool {
    matches!(c, ',' | ';' | ':' | '、' | '，' | '；' | '：')
}

fn starts_uppercase(word: &str) -> bool {
    word.chars().next().is_some_and(char::is_uppercase)
}

/// Strip leading punctuation such as an opening bracket or quote
fn trim_word(word: &str) -> &str {
    word.trim_start_matches(|c: char| !c.is_alphanumeric())
}

/// The abbreviation a word ends with, if any
///
/// Tries the whole word, then the part after an elision apostrophe
/// (`dell'art` gives `art`).
fn abbreviation_of<'w>(word: &'w str, rules: &RuleSet) -> Option<&'w str> {
    let word = trim_word(word);
    if word.is_empty() {
        return None;
    }
    if rules.is_abbreviation(word) {
        return Some(word);
    }
    let (index, apostrophe) = word.char_indices().rfind(|(_, c)| matches!(c, '\'' | '’'))?;
    let tail = &word[index + apostrophe.len_utf8()..];
    rules.is_abbreviation(tail).then_some(tail)
}

/// Digits, a roman numeral, or a single letter
fn is_list_marker(word: &str) -> bool {
    let word = trim_word(word);
    if word.is_empty() {
        return false;
    }
    if word.len() <= 3 && word.bytes().all(|b| b.is_ascii_digit()) {
        return true;
    }
    let mut chars = word.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return c.is_alphabetic();
    }
    let upper = word.bytes().all(|b| b.is_ascii_uppercase());
    ROMAN_NUMERALS
        .iter()
        .any(|numeral| *numeral == word || (upper && numeral.eq_ignore_ascii_case(word)))
}

/// A single uppercase letter, or dotted single letters starting uppercase
fn is_initial(word: &str) -> bool {
    !word.is_empty()
        && word.chars().next().is_some_and(char::is_uppercase)
        && word.split('.').all(|part| {
            let mut chars = part.chars();
            matches!((chars.next(), chars.next()), (Some(c), None) if c.is_alphabetic())
        })
}
