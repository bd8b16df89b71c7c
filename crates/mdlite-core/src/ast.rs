//! Block structure produced by the parser.
//!
//! The tree is flat: a document is a sequence of blocks and only lists own
//! children. Every text field borrows from the input and holds the RAW
//! source text; escaping and inline formatting happen at render time.

use crate::span::Span;

/// A parsed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document<'a> {
    /// Blocks in document order.
    pub blocks: Vec<Block<'a>>,
    /// Span covering the whole input.
    pub span: Span,
}

/// A top-level structural unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block<'a> {
    Heading(Heading<'a>),
    Paragraph(Paragraph<'a>),
    List(List<'a>),
    CodeBlock(CodeBlock<'a>),
}

impl<'a> Block<'a> {
    pub fn span(&self) -> Span {
        match self {
            Block::Heading(h) => h.span,
            Block::Paragraph(p) => p.span,
            Block::List(l) => l.span,
            Block::CodeBlock(c) => c.span,
        }
    }
}

/// Deepest heading level the dialect knows.
pub const MAX_HEADING_LEVEL: u8 = 3;

/// `#`, `##` or `###` followed by text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    /// 1 to [`MAX_HEADING_LEVEL`].
    pub level: u8,
    /// Heading text, trimmed.
    pub text: &'a str,
    pub span: Span,
}

/// Consecutive non-blank text lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph<'a> {
    /// Source lines as written, untrimmed. Rendering joins them with a space.
    pub lines: Vec<&'a str>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    /// `1.`, `2.`, ... markers.
    Ordered,
    /// `-` or `*` markers.
    Unordered,
}

impl ListKind {
    /// Container element name.
    pub const fn tag(self) -> &'static str {
        match self {
            ListKind::Ordered => "ol",
            ListKind::Unordered => "ul",
        }
    }
}

/// A run of list items of the same kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List<'a> {
    pub kind: ListKind,
    pub items: Vec<ListItem<'a>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    /// Text after the marker and its whitespace.
    pub text: &'a str,
    pub span: Span,
}

/// A fenced code block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock<'a> {
    /// Whatever followed the opening fence (`rust` in ```` ```rust ````).
    /// Kept for inspection only; never rendered.
    pub info: &'a str,
    /// Lines between the fences, verbatim.
    pub lines: Vec<&'a str>,
    /// False when the input ended before a closing fence.
    pub closed: bool,
    pub span: Span,
}

impl<'a> CodeBlock<'a> {
    /// The block content with lines joined by `\n`.
    pub fn content(&self) -> String {
        self.lines.join("\n")
    }
}
