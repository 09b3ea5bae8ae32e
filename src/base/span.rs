//! Offsets, ranges and line/column conversion.
//!
//! Diagnostics travel as byte offsets (what the host expects); line/column
//! positions are only computed when rendering them for people.

use std::fmt;

pub use text_size::{TextRange, TextSize};

/// A 0-indexed line and column, displayed 1-indexed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default, Debug)]
pub struct LineCol {
    pub line: u32,
    /// Column in UTF-8 bytes from the start of the line.
    pub col: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, col: u32) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.col + 1)
    }
}

/// Start offsets of every line in a text.
#[derive(Clone, Debug)]
pub struct LineIndex {
    line_starts: Vec<TextSize>,
    len: TextSize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let line_starts = std::iter::once(TextSize::from(0))
            .chain(
                text.match_indices('\n')
                    .map(|(offset, _)| TextSize::from((offset + 1) as u32)),
            )
            .collect();

        Self {
            line_starts,
            len: TextSize::of(text),
        }
    }

    /// Convert an offset to a line/column position.
    ///
    /// Offsets past the end of the text are clamped to the end.
    pub fn line_col(&self, offset: TextSize) -> LineCol {
        let offset = offset.min(self.len);
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);

        LineCol {
            line: line as u32,
            col: (offset - self.line_starts[line]).into(),
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
