//! Byte ranges into the caller's original input.
//!
//! Spans always refer to the text handed to the parser, before line endings
//! are folded, so a diagnostic can point an editor at the exact bytes.

/// A half-open byte range `[start, end)` in the source text.
///
/// # Example
///
/// ```rust
/// use mdlite_core::span::Span;
///
/// let heading = Span::new(0, 7);
/// let body = Span::new(8, 20);
/// assert_eq!(heading.merge(body), Span::new(0, 20));
/// assert_eq!(body.len(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    /// First byte covered.
    pub start: u32,
    /// One past the last byte covered.
    pub end: u32,
}

impl Span {
    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `offset`, used for end-of-input positions.
    #[inline]
    pub const fn empty_at(offset: u32) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}
