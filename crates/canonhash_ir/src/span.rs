//! Source spans for callable text.
//!
//! Spans only exist while a callable is being lexed and parsed; they feed
//! error messages and are never part of the structural AST.

use std::fmt;

/// Byte range into a callable's source text.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Create a new span.
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Create from a byte range, saturating offsets past `u32::MAX`.
    #[inline]
    pub fn from_range(range: std::ops::Range<usize>) -> Self {
        let clamp = |offset: usize| u32::try_from(offset).unwrap_or(u32::MAX);
        Span {
            start: clamp(range.start),
            end: clamp(range.end),
        }
    }

}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// 1-based line and column of a byte offset.
///
/// Columns count characters, not bytes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Location {
    pub line: u32,
    pub column: u32,
}

impl Location {
    /// Resolve `offset` within `source`.
    ///
    /// Offsets past the end resolve to the position just after the last character.
    pub fn of(source: &str, offset: u32) -> Self {
        let end = (offset as usize).min(source.len());
        let mut line = 1u32;
        let mut column = 1u32;
        for (idx, ch) in source.char_indices() {
            if idx >= end {
                break;
            }
            if matches!(ch, '\n' | '\u{2028}' | '\u{2029}') {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        Location { line, column }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests;
