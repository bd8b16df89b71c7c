//! Line splitter for the block parser.
//!
//! The lexer treats `\n`, `\r\n` and a lone `\r` as the same line break, so
//! the parser only ever sees normalized lines while spans still point into
//! the untouched input.
//!
//! Line production matches splitting the normalized text on `\n`: an empty
//! input is a single empty line, and a trailing break yields one final empty
//! line. Fenced code that runs to end of input depends on this.

use crate::span::Span;
use memchr::memchr2;

/// Whitespace for line classification: Unicode white space plus U+FEFF
/// (byte-order mark), minus U+0085 (next line).
#[inline]
pub fn is_space(c: char) -> bool {
    c == '\u{feff}' || (c.is_whitespace() && c != '\u{85}')
}

/// `text` without leading or trailing [`is_space`] characters.
#[inline]
pub fn trim_space(text: &str) -> &str {
    text.trim_matches(is_space)
}

/// A single line from the input with its source span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    /// The line text without its terminator.
    pub text: &'a str,
    /// Byte span of `text` in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// True when the line holds nothing but whitespace.
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }

    /// The line with leading and trailing [`is_space`] characters removed.
    #[inline]
    pub fn trimmed(&self) -> &'a str {
        trim_space(self.text)
    }

    /// Span of the trimmed text inside the original input.
    pub fn trimmed_span(&self) -> Span {
        let trimmed = self.trimmed();
        if trimmed.is_empty() {
            return Span::empty_at(self.span.start);
        }
        let lead = self.text.len() - self.text.trim_start_matches(is_space).len();
        let start = self.span.start + lead as u32;
        Span::new(start, start + trimmed.len() as u32)
    }
}

/// Iterator over the lines of a document.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    offset: usize,
    /// Whether the final (possibly empty) line has yet to be produced.
    tail_pending: bool,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            tail_pending: true,
        }
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        !self.tail_pending && self.offset >= self.bytes.len()
    }

    /// Consume and return the next line.
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            if !self.tail_pending {
                return None;
            }
            self.tail_pending = false;
            let at = self.bytes.len() as u32;
            return Some(Line {
                text: "",
                span: Span::empty_at(at),
            });
        }

        let start = self.offset;
        let end = match memchr2(b'\n', b'\r', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => {
                self.offset = self.bytes.len();
                self.tail_pending = false;
                return Some(self.make_line(start, self.bytes.len()));
            }
        };

        self.offset = if self.bytes[end] == b'\r' && self.bytes.get(end + 1) == Some(&b'\n') {
            end + 2
        } else {
            end + 1
        };

        Some(self.make_line(start, end))
    }

    #[inline]
    fn make_line(&self, start: usize, end: usize) -> Line<'a> {
        // Line breaks are ASCII, so both ends sit on char boundaries.
        Line {
            text: &self.input[start..end],
            span: Span::new(start as u32, end as u32),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Line<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.next_line()
    }
}
