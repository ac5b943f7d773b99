use serde::{Deserialize, Serialize};

/// A source span.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Span {
    /// The start byte offset.
    pub start_offset: usize,
    /// The end byte offset.
    pub end_offset: usize,
}

impl Span {
    /// Construct a span from its byte offsets.
    pub fn new(start_offset: usize, end_offset: usize) -> Self {
        Self {
            start_offset,
            end_offset,
        }
    }

    /// A zero-width span at `offset`.
    pub fn empty(offset: usize) -> Self {
        Self::new(offset, offset)
    }

    /// Merge two spans, returning a new [Span] spanning `self` and `other`.
    #[must_use]
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            start_offset: self.start_offset.min(other.start_offset),
            end_offset: self.end_offset.max(other.end_offset),
        }
    }

    /// Number of bytes covered.
    pub fn len(&self) -> usize {
        self.end_offset.saturating_sub(self.start_offset)
    }

    /// Does this span cover zero bytes?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start_offset, span.len()).into()
    }
}

/// A zero-based row and byte column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Point {
    /// Zero-based line number.
    pub row: usize,
    /// Zero-based byte offset within the line.
    pub column: usize,
}

impl Point {
    /// Compute the position of a byte `offset` in `source`.
    ///
    /// Offsets past the end of `source` are clamped.
    pub fn at_offset(source: &str, offset: usize) -> Self {
        let offset = offset.min(source.len());
        let before = &source.as_bytes()[..offset];
        let row = before.iter().filter(|byte| **byte == b'\n').count();
        let line_start = before
            .iter()
            .rposition(|byte| *byte == b'\n')
            .map_or(0, |newline| newline + 1);
        Self {
            row,
            column: offset - line_start,
        }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.row + 1, self.column + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::{Point, Span};

    #[test]
    fn it_merges_spans() {
        let merged = Span::new(4, 6).merge(&Span::new(1, 5));
        assert_eq!(merged, Span::new(1, 6));
        assert_eq!(merged.len(), 5);
        assert!(Span::empty(3).is_empty());
    }

    #[test]
    fn it_computes_points() {
        let source = "type\nfoo bar\n";
        assert_eq!(Point::at_offset(source, 0), Point { row: 0, column: 0 });
        assert_eq!(Point::at_offset(source, 5), Point { row: 1, column: 0 });
        assert_eq!(Point::at_offset(source, 9), Point { row: 1, column: 4 });
        assert_eq!(Point::at_offset(source, 100), Point { row: 2, column: 0 });
        assert_eq!(Point::at_offset(source, 9).to_string(), "2:5");
    }
}
