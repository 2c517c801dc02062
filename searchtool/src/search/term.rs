use std::fmt;

use super::matcher::Matches;
use crate::errors::{SearchError, SearchResult};

/// Bit that distinguishes ASCII upper and lower case letters.
pub const CASE_BIT: u8 = 0x20;

/// Flips the case of an ASCII letter; every other byte is returned unchanged.
#[inline]
pub const fn fold_byte(byte: u8) -> u8 {
    if byte.is_ascii_alphabetic() {
        byte ^ CASE_BIT
    } else {
        byte
    }
}

/// An immutable, non-empty search term.
///
/// In case-insensitive mode the term also owns its folded counterpart, built
/// once up front so matching never has to fold bytes on the fly.
#[derive(Clone, PartialEq, Eq)]
pub struct SearchTerm {
    bytes: Box<[u8]>,
    folded: Option<Box<[u8]>>,
}

#[allow(clippy::len_without_is_empty)]
impl SearchTerm {
    pub fn new(bytes: impl Into<Vec<u8>>, case_insensitive: bool) -> SearchResult<Self> {
        let bytes = bytes.into().into_boxed_slice();
        if bytes.is_empty() {
            return Err(SearchError::EmptyTerm);
        }

        let folded = case_insensitive.then(|| bytes.iter().map(|&b| fold_byte(b)).collect());
        Ok(Self { bytes, folded })
    }

    pub fn case_sensitive(bytes: impl Into<Vec<u8>>) -> SearchResult<Self> {
        Self::new(bytes, false)
    }

    pub fn case_insensitive(bytes: impl Into<Vec<u8>>) -> SearchResult<Self> {
        Self::new(bytes, true)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The case-inverted term, present only in case-insensitive mode.
    pub fn folded(&self) -> Option<&[u8]> {
        self.folded.as_deref()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.folded.is_some()
    }

    /// Whether `byte` can stand at position `index` of a match.
    #[inline]
    pub(crate) fn accepts(&self, index: usize, byte: u8) -> bool {
        self.bytes[index] == byte
            || self
                .folded
                .as_deref()
                .is_some_and(|folded| folded[index] == byte)
    }

    /// Starts a fresh pass over `haystack`.
    pub fn find_iter<'a>(&'a self, haystack: &'a [u8]) -> Matches<'a> {
        Matches::new(self, haystack)
    }
}

impl fmt::Debug for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchTerm")
            .field("bytes", &String::from_utf8_lossy(&self.bytes))
            .field("case_insensitive", &self.is_case_insensitive())
            .finish()
    }
}
