//! Source position ranges.
//!
//! The grammar matcher reports every matched production as
//! `[start_line, start_column, end_line, end_column]`. A [`Span`] stores that
//! range; lines and columns are 1-indexed and the end column is exclusive.
//!
//! ```
//! use pgsl_syntax::span::Span;
//!
//! let left = Span::new(1, 1, 1, 8);
//! let right = Span::new(2, 3, 2, 9);
//! let merged = Span::merge(left, right);
//!
//! assert_eq!(merged, Span::new(1, 1, 2, 9));
//! ```

use std::fmt;

/// A line/column range in the PGSL source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Line of the first character (1-indexed)
    pub start_line: usize,

    /// Column of the first character (1-indexed)
    pub start_col: usize,

    /// Line of the last character (1-indexed)
    pub end_line: usize,

    /// Column after the last character (1-indexed, exclusive)
    pub end_col: usize,
}

impl Span {
    /// Creates a span from its four coordinates.
    #[must_use]
    pub const fn new(start_line: usize, start_col: usize, end_line: usize, end_col: usize) -> Self {
        Self {
            start_line,
            start_col,
            end_line,
            end_col,
        }
    }

    /// Creates a span from the `[start_line, start_col, end_line, end_col]`
    /// array the grammar matcher emits.
    ///
    /// ```
    /// use pgsl_syntax::span::Span;
    ///
    /// assert_eq!(Span::from_range([3, 5, 3, 12]), Span::new(3, 5, 3, 12));
    /// ```
    #[must_use]
    pub const fn from_range(range: [usize; 4]) -> Self {
        Self::new(range[0], range[1], range[2], range[3])
    }

    /// Span covering `left` through `right`.
    #[must_use]
    pub const fn merge(left: Span, right: Span) -> Self {
        Self {
            start_line: left.start_line,
            start_col: left.start_col,
            end_line: right.end_line,
            end_col: right.end_col,
        }
    }

    /// Zero-width span at a single position.
    #[must_use]
    pub const fn point(line: usize, col: usize) -> Self {
        Self::new(line, col, line, col)
    }

    /// Start position.
    #[must_use]
    pub const fn start(&self) -> LineCol {
        LineCol::new(self.start_line, self.start_col)
    }

    /// End position.
    #[must_use]
    pub const fn end(&self) -> LineCol {
        LineCol::new(self.end_line, self.end_col)
    }

    /// Whether the span is zero-width.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start_line == self.end_line && self.start_col == self.end_col
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start_line, self.start_col)
    }
}

/// A line and column position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LineCol {
    /// Line number (1-indexed)
    pub line: usize,

    /// Column number (1-indexed)
    pub col: usize,
}

impl LineCol {
    /// Creates a new position.
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Anything that carries a source span.
pub trait Spanned {
    /// Returns the source span of this item.
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_new() {
        let span = Span::new(2, 4, 3, 1);
        assert_eq!(span.start(), LineCol::new(2, 4));
        assert_eq!(span.end(), LineCol::new(3, 1));
    }

    #[test]
    fn test_span_merge() {
        let merged = Span::merge(Span::new(1, 1, 1, 5), Span::new(4, 2, 4, 9));
        assert_eq!(merged.start_line, 1);
        assert_eq!(merged.start_col, 1);
        assert_eq!(merged.end_line, 4);
        assert_eq!(merged.end_col, 9);
    }

    #[test]
    fn test_span_point_is_empty() {
        assert!(Span::point(5, 10).is_empty());
        assert!(!Span::new(5, 10, 5, 11).is_empty());
    }

    #[test]
    fn test_span_display() {
        assert_eq!(Span::new(5, 10, 5, 20).to_string(), "5:10");
        assert_eq!(LineCol::new(7, 3).to_string(), "7:3");
    }
}
