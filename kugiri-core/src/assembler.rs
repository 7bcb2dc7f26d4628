//! Turns accepted candidates into sentence spans
//!
//! Each cut lands after the candidate's punctuation, closing delimiters and
//! the whitespace that follows, so consecutive spans tile the input exactly.

use crate::types::{Boundary, BoundaryKind, Candidate};

/// Build sentence spans from accepted candidates in text order
pub fn assemble<'a>(text: &'a str, accepted: &[Candidate]) -> Vec<Boundary<'a>> {
    let mut boundaries = Vec::with_capacity(accepted.len() + 1);
    let mut start_byte = 0;
    let mut start_char = 0;

    for candidate in accepted {
        let (cut_byte, cut_char) = skip_whitespace(text, candidate.end.byte, candidate.end.char);
        if cut_byte <= start_byte {
            continue;
        }

        let span = &text[start_byte..cut_byte];
        if !span.trim().is_empty() {
            boundaries.push(Boundary {
                start_index: start_char,
                end_index: cut_char,
                byte_start: start_byte,
                byte_end: cut_byte,
                text: span,
                kind: candidate.kind,
                symbol: candidate.symbol(text),
            });
        } else if let Some(last) = boundaries.last_mut() {
            // Fold stray whitespace into the previous span
            last.end_index = cut_char;
            last.byte_end = cut_byte;
            last.text = &text[last.byte_start..cut_byte];
        }

        start_byte = cut_byte;
        start_char = cut_char;
    }

    if start_byte < text.len() {
        let span = &text[start_byte..];
        let end_char = start_char + span.chars().count();
        if !span.trim().is_empty() {
            boundaries.push(Boundary {
                start_index: start_char,
                end_index: end_char,
                byte_start: start_byte,
                byte_end: text.len(),
                text: span,
                kind: BoundaryKind::EndOfText,
                symbol: None,
            });
        } else if let Some(last) = boundaries.last_mut() {
            last.end_index = end_char;
            last.byte_end = text.len();
            last.text = &text[last.byte_start..];
        }
    }

    boundaries
}

fn skip_whitespace(text: &str, byte: usize, char: usize) -> (usize, usize) {
    let rest = text.get(byte..).unwrap_or_default();
    let mut cut = (byte, char);
    for c in rest.chars().take_while(|c| c.is_whitespace()) {
        cut = (cut.0 + c.len_utf8(), cut.1 + 1);
    }
    cut
}
