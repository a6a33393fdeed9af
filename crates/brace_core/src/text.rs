//! Source locations, ranges and the line map that derives them.
//!
//! The scanner works on byte offsets (`TextPos`). Everything handed to
//! consumers is expressed as 1-based line/column pairs, with columns counted
//! in Unicode scalar values.

use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// A position in source text, measured as a byte offset from the start.
pub type TextPos = u32;

/// A byte range with start and end positions.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct TextRange {
    /// The byte offset where this range starts (inclusive).
    pub pos: TextPos,
    /// The byte offset where this range ends (exclusive).
    pub end: TextPos,
}

impl TextRange {
    /// Create a new text range.
    #[inline]
    pub fn new(pos: TextPos, end: TextPos) -> Self {
        debug_assert!(end >= pos);
        Self { pos, end }
    }

    /// Create an empty range at a position.
    #[inline]
    pub fn empty(pos: TextPos) -> Self {
        Self { pos, end: pos }
    }

    /// The length of this range in bytes.
    #[inline]
    pub fn len(&self) -> TextPos {
        self.end - self.pos
    }

    /// Whether this range is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos == self.end
    }

    /// Convert to a byte range.
    #[inline]
    pub fn to_range(&self) -> Range<usize> {
        self.pos as usize..self.end as usize
    }
}

impl fmt::Debug for TextRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.pos, self.end)
    }
}

/// A 1-based line/column point in a source unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl SourceLocation {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The location of the first character of any source unit.
    pub const START: SourceLocation = SourceLocation { line: 1, column: 1 };
}

impl fmt::Debug for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// The extent of a node.
///
/// `start` is the first character consumed and `end` is the point just past
/// the last character consumed, so `end.column - start.column` is the width
/// of a single-line node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize)]
pub struct SourceRange {
    pub start: SourceLocation,
    pub end: SourceLocation,
}

impl SourceRange {
    #[inline]
    pub const fn new(start: SourceLocation, end: SourceLocation) -> Self {
        Self { start, end }
    }

    /// Shorthand used heavily by tests.
    pub const fn from_coordinates(
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        Self {
            start: SourceLocation::new(start_line, start_column),
            end: SourceLocation::new(end_line, end_column),
        }
    }

    /// A zero-width range at a point.
    #[inline]
    pub const fn collapsed(at: SourceLocation) -> Self {
        Self { start: at, end: at }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }

    /// A range covering both this range and `other`.
    pub fn cover(&self, other: &SourceRange) -> SourceRange {
        SourceRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Whether a location falls inside this range (end exclusive).
    pub fn contains(&self, location: SourceLocation) -> bool {
        location >= self.start && location < self.end
    }
}

impl fmt::Debug for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}-{:?}", self.start, self.end)
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A map from byte offsets to line/column locations, built from source text.
#[derive(Debug, Clone)]
pub struct LineMap<'s> {
    text: &'s str,
    /// Byte offsets of the start of each line.
    line_starts: Vec<TextPos>,
}

impl<'s> LineMap<'s> {
    /// Build a line map from source text.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn new(text: &'s str) -> Self {
        let bytes = text.as_bytes();
        let mut line_starts = vec![0u32];
        for i in memchr::memchr2_iter(b'\n', b'\r', bytes) {
            if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
                continue;
            }
            line_starts.push((i + 1) as TextPos);
        }
        Self { text, line_starts }
    }

    /// Get the line index (0-based) for a byte offset.
    pub fn line_of(&self, pos: TextPos) -> usize {
        match self.line_starts.binary_search(&pos) {
            Ok(line) => line,
            Err(line) => line - 1,
        }
    }

    /// Get the 1-based location of a byte offset.
    pub fn location_of(&self, pos: TextPos) -> SourceLocation {
        let pos = pos.min(self.text.len() as TextPos);
        let line = self.line_of(pos);
        let line_start = self.line_starts[line] as usize;
        let prefix = &self.text[line_start..pos as usize];
        let column = if prefix.is_ascii() {
            prefix.len()
        } else {
            prefix.chars().count()
        };
        SourceLocation::new(line as u32 + 1, column as u32 + 1)
    }

    /// Convert a byte range into a source range.
    pub fn range_of(&self, range: TextRange) -> SourceRange {
        SourceRange::new(self.location_of(range.pos), self.location_of(range.end))
    }

    /// Byte offset of a 1-based location, clamped to the text.
    pub fn offset_of(&self, location: SourceLocation) -> TextPos {
        let line = (location.line.max(1) as usize - 1).min(self.line_starts.len() - 1);
        let line_start = self.line_starts[line] as usize;
        let skip = location.column.saturating_sub(1) as usize;
        let offset = self.text[line_start..]
            .char_indices()
            .nth(skip)
            .map_or(self.text.len(), |(i, _)| line_start + i);
        offset as TextPos
    }

    /// Get the byte offset of the start of a line (0-based index).
    pub fn line_start(&self, line: usize) -> TextPos {
        self.line_starts[line]
    }

    /// Get the total number of lines.
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_range() {
        let range = TextRange::new(5, 15);
        assert_eq!(range.len(), 10);
        assert!(!range.is_empty());
        assert_eq!(range.to_range(), 5..15);
        assert!(TextRange::empty(3).is_empty());
    }

    #[test]
    fn test_line_map() {
        let text = "line1\nline2\nline3";
        let map = LineMap::new(text);
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.line_of(0), 0);
        assert_eq!(map.line_of(5), 0); // newline char
        assert_eq!(map.line_of(6), 1); // start of line2
        assert_eq!(map.line_of(12), 2);

        assert_eq!(map.location_of(8), SourceLocation::new(2, 3));
        assert_eq!(map.location_of(17), SourceLocation::new(3, 6));
    }

    #[test]
    fn test_line_map_crlf() {
        let map = LineMap::new("a\r\nb\rc");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.location_of(3), SourceLocation::new(2, 1));
        assert_eq!(map.location_of(5), SourceLocation::new(3, 1));
    }

    #[test]
    fn test_columns_count_scalar_values() {
        // "é" is two bytes but one column
        let map = LineMap::new("é + b");
        assert_eq!(map.location_of(3), SourceLocation::new(1, 3));
    }

    #[test]
    fn test_offset_of_inverts_location_of() {
        let text = "é = 1\nfoo()";
        let map = LineMap::new(text);
        for pos in [0, 3, 7, 10, text.len() as TextPos] {
            assert_eq!(map.offset_of(map.location_of(pos)), pos);
        }
        assert_eq!(map.offset_of(SourceLocation::new(9, 9)), text.len() as TextPos);
    }

    #[test]
    fn test_range_of_end_is_exclusive() {
        let text = "import A\nimport B";
        let map = LineMap::new(text);
        let range = map.range_of(TextRange::new(0, text.len() as TextPos));
        assert_eq!(range, SourceRange::from_coordinates(1, 1, 2, 9));
    }

    #[test]
    fn test_cover_and_contains() {
        let a = SourceRange::from_coordinates(1, 1, 1, 4);
        let b = SourceRange::from_coordinates(1, 6, 2, 2);
        let both = a.cover(&b);
        assert_eq!(both, SourceRange::from_coordinates(1, 1, 2, 2));
        assert!(both.contains(SourceLocation::new(1, 20)));
        assert!(!both.contains(SourceLocation::new(2, 2)));
        assert!(SourceRange::collapsed(SourceLocation::START).is_collapsed());
    }
}
