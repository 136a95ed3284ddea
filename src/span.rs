use std::fmt;

use serde::{Serialize, Serializer};

/// Marker for "no position". `Span::undefined()` uses it for both ends.
pub const NOT_FOUND: usize = usize::MAX;

/// Inclusive range of token positions `[start, end]` in the input sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        debug_assert!(start <= end, "span [{start},{end}] is reversed");
        Self { start, end }
    }

    /// The span of the initial state, before any token has been consumed.
    pub fn undefined() -> Self { Self { start: NOT_FOUND, end: NOT_FOUND } }

    pub fn is_undefined(&self) -> bool { self.start == NOT_FOUND && self.end == NOT_FOUND }

    /// Number of tokens covered. Zero for the undefined span.
    pub fn num_words(&self) -> usize {
        if self.is_undefined() {
            0
        } else {
            self.end - self.start + 1
        }
    }

    pub fn contains(&self, pos: usize) -> bool {
        !self.is_undefined() && self.start <= pos && pos <= self.end
    }

    pub fn overlaps(&self, other: &Span) -> bool {
        if self.is_undefined() || other.is_undefined() {
            return false;
        }
        self.start <= other.end && other.start <= self.end
    }

    /// True if `other` starts right after `self` ends, or the other way round.
    pub fn is_adjacent(&self, other: &Span) -> bool {
        if self.is_undefined() || other.is_undefined() {
            return false;
        }
        self.end + 1 == other.start || other.end + 1 == self.start
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_undefined() {
            f.write_str("[undef]")
        } else {
            write!(f, "[{},{}]", self.start, self.end)
        }
    }
}

impl Serialize for Span {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_undefined() {
            serializer.serialize_none()
        } else {
            [self.start, self.end].serialize(serializer)
        }
    }
}
