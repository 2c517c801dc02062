use std::iter::FusedIterator;

use super::scanner::{find_byte, find_either};
use super::term::SearchTerm;

/// Progress of the cursor against the term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    /// No term bytes matched; the next step scans for the term's first byte.
    Seeking,
    /// This many leading term bytes matched, ending just before the cursor.
    Matching(usize),
}

/// Lazy, ordered sequence of match offsets for one pass over a buffer.
///
/// Matches are reported greedily and never overlap: after a match the
/// search restarts at the byte following it, so `"aa"` in `"aaa"` yields
/// only offset 0. A mismatching byte is re-examined as a fresh start.
#[derive(Debug, Clone)]
pub struct Matches<'a> {
    term: &'a SearchTerm,
    haystack: &'a [u8],
    cursor: usize,
    state: MatchState,
}

impl<'a> Matches<'a> {
    pub(crate) fn new(term: &'a SearchTerm, haystack: &'a [u8]) -> Self {
        Self {
            term,
            haystack,
            cursor: 0,
            state: MatchState::Seeking,
        }
    }

    pub fn state(&self) -> MatchState {
        self.state
    }

    /// Byte offset of the next byte the cursor will examine.
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Finds the next candidate start at or after the cursor.
    fn seek(&self) -> Option<usize> {
        let rest = &self.haystack[self.cursor..];
        let first = self.term.as_bytes()[0];
        match self.term.folded() {
            Some(folded) => find_either(rest, first, folded[0]),
            None => find_byte(rest, first),
        }
    }

    /// Consumes one matched byte; returns the match start once the term completes.
    #[inline]
    fn advance(&mut self, partial: usize) -> Option<usize> {
        self.cursor += 1;
        let partial = partial + 1;
        if partial == self.term.len() {
            self.state = MatchState::Seeking;
            Some(self.cursor - partial)
        } else {
            self.state = MatchState::Matching(partial);
            None
        }
    }
}

impl Iterator for Matches<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            let emitted = match self.state {
                MatchState::Seeking => match self.seek() {
                    Some(skip) => {
                        self.cursor += skip;
                        self.advance(0)
                    }
                    None => {
                        self.cursor = self.haystack.len();
                        return None;
                    }
                },
                MatchState::Matching(partial) => {
                    // A partial match cut off by the end of the buffer is dropped.
                    let &byte = self.haystack.get(self.cursor)?;
                    if self.term.accepts(partial, byte) {
                        self.advance(partial)
                    } else {
                        self.state = MatchState::Seeking;
                        None
                    }
                }
            };

            if emitted.is_some() {
                return emitted;
            }
        }
    }
}

impl FusedIterator for Matches<'_> {}
