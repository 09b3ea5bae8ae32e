//! Comment ranges in source trivia.
//!
//! Comments are not nodes; they live in the trivia between tokens. The oracle
//! reports them as ranges, and [`leading_comment_ranges`] is the scanner an
//! oracle implementation can use to produce them.

use text_size::{TextRange, TextSize};

/// A comment in the source text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CommentRange {
    pub range: TextRange,
    /// `/* ... */` (and `/** ... */`) rather than `// ...`.
    pub is_multi_line: bool,
}

impl CommentRange {
    pub fn new(range: TextRange, is_multi_line: bool) -> Self {
        Self { range, is_multi_line }
    }

    /// Slice the comment out of its file's text.
    ///
    /// Returns `""` when the range does not fit the text.
    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        source
            .get(usize::from(self.range.start())..usize::from(self.range.end()))
            .unwrap_or("")
    }

    /// A doc-comment block: `/** ... */`.
    pub fn is_doc_block(&self, source: &str) -> bool {
        let text = self.text(source);
        self.is_multi_line && text.starts_with("/**") && !text.starts_with("/**/")
    }
}

/// Scan the trivia starting at `pos` and return every comment in it.
///
/// Scanning stops at the first character that is neither whitespace nor part
/// of a comment, so the result is "all comments between the previous token and
/// the next one". Comments separated from the node by blank lines are included.
pub fn leading_comment_ranges(text: &str, pos: TextSize) -> Vec<CommentRange> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut at = usize::from(pos);
    let mut comments = Vec::new();

    while at < len {
        match bytes[at] {
            b' ' | b'\t' | b'\r' | b'\n' => at += 1,
            b'/' if at + 1 < len && bytes[at + 1] == b'/' => {
                let start = at;
                while at < len && bytes[at] != b'\n' && bytes[at] != b'\r' {
                    at += 1;
                }
                comments.push(CommentRange::new(span(start, at), false));
            }
            b'/' if at + 1 < len && bytes[at + 1] == b'*' => {
                let start = at;
                at += 2;
                let mut closed = false;
                while at + 1 < len {
                    if bytes[at] == b'*' && bytes[at + 1] == b'/' {
                        at += 2;
                        closed = true;
                        break;
                    }
                    at += 1;
                }
                if !closed {
                    at = len; // unterminated comment runs to EOF
                }
                comments.push(CommentRange::new(span(start, at), true));
            }
            _ => break,
        }
    }

    comments
}

fn span(start: usize, end: usize) -> TextRange {
    TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32))
}
