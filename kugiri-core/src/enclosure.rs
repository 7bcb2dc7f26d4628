//! Deferral of candidates inside quotes and brackets
//!
//! While an enclosure is open, candidates are held back. When it closes,
//! the held candidates inside it are dropped, except one whose punctuation
//! run sits directly against the closing delimiter (its end already lies past
//! the delimiter). When a paragraph or the text ends with enclosures still
//! open, held candidates are released unchanged.

use smallvec::SmallVec;

use crate::scanner::{Event, Mark};
use crate::types::{BoundaryKind, Candidate};

/// Maximum tracked nesting depth; deeper openers are ignored
pub const MAX_DEPTH: usize = 16;

#[derive(Debug, Clone, Copy)]
struct Frame {
    pair: u8,
    /// Index into `pending` where this frame's candidates start
    pending_from: usize,
}

/// Stack of open enclosures and the candidates they hold
#[derive(Debug, Default)]
pub struct EnclosureTracker {
    stack: SmallVec<[Frame; MAX_DEPTH]>,
    pending: Vec<Candidate>,
}

impl EnclosureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    /// Feed one scanner event; candidates ready for classification are
    /// appended to `ready` in text order
    pub fn observe(&mut self, event: Event, ready: &mut Vec<Candidate>) {
        match event {
            Event::Candidate(candidate) if candidate.kind == BoundaryKind::ParagraphBreak => {
                self.release(ready);
                ready.push(candidate);
            }
            Event::Candidate(candidate) => {
                if self.stack.is_empty() {
                    ready.push(candidate);
                } else {
                    self.pending.push(candidate);
                }
            }
            Event::Enclosure(mark) => self.on_mark(mark, ready),
        }
    }

    /// Release everything still held; call at end of text
    pub fn finish(&mut self, ready: &mut Vec<Candidate>) {
        self.release(ready);
    }

    fn on_mark(&mut self, mark: Mark, ready: &mut Vec<Candidate>) {
        let open_frame = if mark.can_close {
            self.stack.iter().rposition(|frame| frame.pair == mark.pair)
        } else {
            None
        };

        if let Some(index) = open_frame {
            let from = self.stack[index].pending_from;
            self.stack.truncate(index);

            let closer = mark.at.byte;
            let mut kept = 0;
            for i in from..self.pending.len() {
                if self.pending[i].end.byte > closer {
                    self.pending[from + kept] = self.pending[i];
                    kept += 1;
                }
            }
            self.pending.truncate(from + kept);

            if self.stack.is_empty() {
                ready.append(&mut self.pending);
            }
        } else if mark.can_open && self.stack.len() < MAX_DEPTH {
            self.stack.push(Frame {
                pair: mark.pair,
                pending_from: self.pending.len(),
            });
        }
    }

    fn release(&mut self, ready: &mut Vec<Candidate>) {
        if !self.stack.is_empty() {
            log::trace!(
                "releasing {} candidates from {} unclosed enclosures",
                self.pending.len(),
                self.stack.len()
            );
        }
        self.stack.clear();
        ready.append(&mut self.pending);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn candidate(byte: usize, end: usize) -> Candidate {
        Candidate {
            kind: BoundaryKind::Period,
            run_start: Position::new(byte, byte),
            run_end: Position::new(byte + 1, byte + 1),
            end: Position::new(end, end),
            closes_enclosure: end > byte + 1,
            unspaced: false,
        }
    }

    fn mark(pair: u8, at: usize, can_open: bool, can_close: bool) -> Event {
        Event::Enclosure(Mark {
            pair,
            at: Position::new(at, at),
            can_open,
            can_close,
        })
    }

    #[test]
    fn test_candidates_outside_enclosures_pass_through() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(Event::Candidate(candidate(5, 6)), &mut ready);
        assert_eq!(ready.len(), 1);
    }

    #[test]
    fn test_inner_candidates_dropped_on_close() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready);
        tracker.observe(Event::Candidate(candidate(5, 6)), &mut ready);
        assert!(ready.is_empty());
        assert_eq!(tracker.depth(), 1);

        tracker.observe(mark(0, 10, false, true), &mut ready);
        assert!(ready.is_empty());
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_candidate_against_closer_survives() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready);
        tracker.observe(Event::Candidate(candidate(5, 6)), &mut ready);
        tracker.observe(Event::Candidate(candidate(9, 11)), &mut ready);
        tracker.observe(mark(0, 10, false, true), &mut ready);
        assert_eq!(ready, vec![candidate(9, 11)]);
    }

    #[test]
    fn test_nested_close_keeps_outer_frame_pending() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready); // (
        tracker.observe(mark(1, 1, true, true), &mut ready); // "
        tracker.observe(Event::Candidate(candidate(5, 7)), &mut ready);
        tracker.observe(mark(1, 6, true, true), &mut ready); // "
        assert!(ready.is_empty());
        assert_eq!(tracker.depth(), 1);

        tracker.observe(mark(0, 12, false, true), &mut ready); // )
        assert!(ready.is_empty());
    }

    #[test]
    fn test_symmetric_mark_closes_when_open() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(3, 0, true, true), &mut ready);
        assert_eq!(tracker.depth(), 1);
        tracker.observe(mark(3, 4, true, true), &mut ready);
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_unmatched_closer_is_ignored() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, false, true), &mut ready);
        assert_eq!(tracker.depth(), 0);
        tracker.observe(Event::Candidate(candidate(3, 4)), &mut ready);
        assert_eq!(ready.len(), 1);
    }

    #[test]
    fn test_closing_outer_pops_unclosed_inner() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready);
        tracker.observe(mark(1, 1, true, false), &mut ready);
        tracker.observe(Event::Candidate(candidate(4, 5)), &mut ready);
        tracker.observe(mark(0, 8, false, true), &mut ready);
        assert_eq!(tracker.depth(), 0);
        assert!(ready.is_empty());
    }

    #[test]
    fn test_paragraph_break_releases_pending() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready);
        tracker.observe(Event::Candidate(candidate(5, 6)), &mut ready);

        let paragraph = Candidate {
            kind: BoundaryKind::ParagraphBreak,
            ..candidate(8, 10)
        };
        tracker.observe(Event::Candidate(paragraph), &mut ready);
        assert_eq!(ready, vec![candidate(5, 6), paragraph]);
        assert_eq!(tracker.depth(), 0);
    }

    #[test]
    fn test_finish_releases_pending() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        tracker.observe(mark(0, 0, true, false), &mut ready);
        tracker.observe(Event::Candidate(candidate(5, 6)), &mut ready);
        tracker.finish(&mut ready);
        assert_eq!(ready, vec![candidate(5, 6)]);
    }

    #[test]
    fn test_depth_is_capped() {
        let mut tracker = EnclosureTracker::new();
        let mut ready = Vec::new();
        for i in 0..(MAX_DEPTH + 4) {
            tracker.observe(mark(0, i, true, false), &mut ready);
        }
        assert_eq!(tracker.depth(), MAX_DEPTH);
    }
}
