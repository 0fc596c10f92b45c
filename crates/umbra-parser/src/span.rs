//! Byte spans into notation source text.

use std::ops::Range;

/// A half-open byte range `start..end` into the parsed text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Creates a span from a byte range.
    pub fn new(range: Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end.max(range.start),
        }
    }

    /// Returns the first byte offset.
    pub fn start(self) -> usize {
        self.start
    }

    /// Returns the offset one past the last byte.
    pub fn end(self) -> usize {
        self.end
    }

    /// Returns the length in bytes.
    pub fn len(self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for zero-width spans.
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Moves the span forward by `offset` bytes.
    pub fn shift(self, offset: usize) -> Self {
        Self {
            start: self.start + offset,
            end: self.end + offset,
        }
    }

    /// Returns the span as a range.
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range)
    }
}
