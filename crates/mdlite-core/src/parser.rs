//! Line-driven block parser.
//!
//! The parser is a two-state machine (`Normal` / `InCodeBlock`) with two
//! accumulators: the pending paragraph lines and the open list. Every event
//! that ends a block goes through [`BlockBuilder::flush_paragraph`] and
//! [`BlockBuilder::close_list`], so the flush rules live in one place.
//!
//! Line classification, tried in order on the trimmed line:
//!
//! 1. a line starting with ```` ``` ```` toggles the code block
//! 2. inside a code block every line is content, verbatim
//! 3. `#`..`###` + whitespace is a heading
//! 4. `-`/`*` + whitespace or digits + `.` + whitespace is a list item
//! 5. a blank line ends the paragraph and the list
//! 6. anything else is paragraph text

use log::{debug, trace};

use crate::ast::{
    Block, CodeBlock, Document, Heading, List, ListItem, ListKind, Paragraph, MAX_HEADING_LEVEL,
};
use crate::error::{Diagnostic, Diagnostics};
use crate::lexer::{is_space, trim_space, Lexer, Line};
use crate::span::Span;

/// Opening and closing code fence.
pub const FENCE: &str = "```";

/// A parsed document together with what the parser had to tolerate.
#[derive(Debug)]
pub struct ParseResult<'a> {
    pub document: Document<'a>,
    pub diagnostics: Diagnostics,
}

impl<'a> ParseResult<'a> {
    /// True when nothing had to be tolerated.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Block parser. Holds no state between calls to [`Parser::parse`].
#[derive(Debug, Clone, Copy)]
pub struct Parser {
    collect_diagnostics: bool,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    pub fn new() -> Self {
        Self {
            collect_diagnostics: true,
        }
    }

    /// Enable or disable diagnostic collection (enabled by default).
    ///
    /// The parsed document is identical either way.
    pub fn with_diagnostics(mut self, collect: bool) -> Self {
        self.collect_diagnostics = collect;
        self
    }

    pub fn parse<'a>(&self, input: &'a str) -> ParseResult<'a> {
        let mut builder = BlockBuilder::new(self.collect_diagnostics);

        for line in Lexer::new(input) {
            builder.push_line(line);
        }

        let (blocks, diagnostics) = builder.finish(input.len() as u32);
        debug!(
            "parsed {} bytes into {} blocks ({} diagnostics)",
            input.len(),
            blocks.len(),
            diagnostics.len()
        );

        ParseResult {
            document: Document {
                blocks,
                span: Span::new(0, input.len() as u32),
            },
            diagnostics,
        }
    }
}

/// How a line outside a code block reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind<'a> {
    Fence { info: &'a str },
    Heading { level: u8, text: &'a str },
    Item { kind: ListKind, text: &'a str },
    Blank,
    Text,
}

fn classify(trimmed: &str) -> LineKind<'_> {
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if let Some(info) = trimmed.strip_prefix(FENCE) {
        return LineKind::Fence {
            info: trim_space(info),
        };
    }

    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if (1..=MAX_HEADING_LEVEL as usize).contains(&hashes) {
        if let Some(text) = after_whitespace(&trimmed[hashes..]) {
            return LineKind::Heading {
                level: hashes as u8,
                text: trim_space(text),
            };
        }
    }

    if let Some(rest) = trimmed.strip_prefix(['-', '*']) {
        if let Some(text) = after_whitespace(rest) {
            return LineKind::Item {
                kind: ListKind::Unordered,
                text,
            };
        }
    }

    let digits = trimmed.bytes().take_while(u8::is_ascii_digit).count();
    if digits > 0 {
        if let Some(rest) = trimmed[digits..].strip_prefix('.') {
            if let Some(text) = after_whitespace(rest) {
                return LineKind::Item {
                    kind: ListKind::Ordered,
                    text,
                };
            }
        }
    }

    LineKind::Text
}

/// `rest` with its leading whitespace removed, provided there was some.
///
/// Marker text is a single logical line, so text holding a Unicode line or
/// paragraph separator does not qualify.
#[inline]
fn after_whitespace(rest: &str) -> Option<&str> {
    if !rest.starts_with(is_space) {
        return None;
    }
    let text = rest.trim_start_matches(is_space);
    if text.contains(is_line_separator) {
        None
    } else {
        Some(text)
    }
}

#[inline]
fn is_line_separator(c: char) -> bool {
    c == '\u{2028}' || c == '\u{2029}'
}

/// Heading depth of a `####... text` line that is too deep to be a heading.
fn excess_heading_level(trimmed: &str) -> Option<u8> {
    let hashes = trimmed.bytes().take_while(|&b| b == b'#').count();
    if hashes > MAX_HEADING_LEVEL as usize && trimmed[hashes..].starts_with(is_space) {
        Some(hashes.min(u8::MAX as usize) as u8)
    } else {
        None
    }
}

/// A marker that would open a heading or list item if text followed it.
fn is_bare_marker(trimmed: &str) -> bool {
    match trimmed {
        "-" | "*" => true,
        _ if trimmed.bytes().all(|b| b == b'#') => trimmed.len() <= MAX_HEADING_LEVEL as usize,
        _ => trimmed
            .strip_suffix('.')
            .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit())),
    }
}

enum State<'a> {
    Normal,
    InCodeBlock(OpenFence<'a>),
}

struct OpenFence<'a> {
    info: &'a str,
    lines: Vec<&'a str>,
    span: Span,
}

impl<'a> OpenFence<'a> {
    fn into_block(self, closed: bool) -> CodeBlock<'a> {
        CodeBlock {
            info: self.info,
            lines: self.lines,
            closed,
            span: self.span,
        }
    }
}

/// Per-call parser state.
struct BlockBuilder<'a> {
    blocks: Vec<Block<'a>>,
    state: State<'a>,
    paragraph: Vec<Line<'a>>,
    list: Option<List<'a>>,
    diagnostics: Diagnostics,
    collect_diagnostics: bool,
}

impl<'a> BlockBuilder<'a> {
    fn new(collect_diagnostics: bool) -> Self {
        Self {
            blocks: Vec::with_capacity(16),
            state: State::Normal,
            paragraph: Vec::new(),
            list: None,
            diagnostics: Diagnostics::new(),
            collect_diagnostics,
        }
    }

    fn push_line(&mut self, line: Line<'a>) {
        let trimmed = line.trimmed();

        if let State::InCodeBlock(fence) = &mut self.state {
            fence.span = fence.span.merge(line.span);
            if trimmed.starts_with(FENCE) {
                self.close_code_block(true);
            } else {
                fence.lines.push(line.text);
            }
            return;
        }

        let kind = classify(trimmed);
        trace!("{:?} -> {:?}", line.span, kind);

        match kind {
            LineKind::Fence { info } => {
                self.flush_paragraph();
                self.close_list();
                debug!("code fence opened at byte {}", line.span.start);
                self.state = State::InCodeBlock(OpenFence {
                    info,
                    lines: Vec::new(),
                    span: line.span,
                });
            }
            LineKind::Heading { level, text } => {
                self.flush_paragraph();
                self.close_list();
                self.blocks.push(Block::Heading(Heading {
                    level,
                    text,
                    span: line.span,
                }));
            }
            LineKind::Item { kind, text } => {
                self.flush_paragraph();
                if self.list.as_ref().map(|l| l.kind) != Some(kind) {
                    self.close_list();
                    self.list = Some(List {
                        kind,
                        items: Vec::new(),
                        span: line.span,
                    });
                }
                if let Some(list) = self.list.as_mut() {
                    list.span = list.span.merge(line.span);
                    list.items.push(ListItem {
                        text,
                        span: line.span,
                    });
                }
            }
            LineKind::Blank => {
                self.flush_paragraph();
                self.close_list();
            }
            LineKind::Text => {
                // A paragraph is a non-list block: it ends the open list.
                self.close_list();
                if let Some(level) = excess_heading_level(trimmed) {
                    self.report(Diagnostic::heading_too_deep(level, line.trimmed_span()));
                } else if is_bare_marker(trimmed) {
                    self.report(Diagnostic::empty_marker(line.trimmed_span()));
                }
                self.paragraph.push(line);
            }
        }
    }

    fn finish(mut self, input_len: u32) -> (Vec<Block<'a>>, Diagnostics) {
        if matches!(self.state, State::InCodeBlock(_)) {
            debug!("input ended inside a code fence; keeping its content");
            if let State::InCodeBlock(fence) = &self.state {
                let at = Span::new(fence.span.start, input_len);
                self.report(Diagnostic::unclosed_code_fence(at));
            }
            self.close_code_block(false);
        }
        self.flush_paragraph();
        self.close_list();
        (self.blocks, self.diagnostics)
    }

    fn close_code_block(&mut self, closed: bool) {
        if let State::InCodeBlock(fence) = std::mem::replace(&mut self.state, State::Normal) {
            self.blocks.push(Block::CodeBlock(fence.into_block(closed)));
        }
    }

    /// Emit the pending paragraph, if it has any non-blank content.
    fn flush_paragraph(&mut self) {
        if self.paragraph.is_empty() {
            return;
        }
        let lines = std::mem::take(&mut self.paragraph);
        if lines.iter().all(Line::is_blank) {
            return;
        }

        let span = lines[0].span.merge(lines[lines.len() - 1].span);
        self.blocks.push(Block::Paragraph(Paragraph {
            lines: lines.into_iter().map(|l| l.text).collect(),
            span,
        }));
    }

    /// Emit the open list, if any.
    fn close_list(&mut self) {
        if let Some(list) = self.list.take() {
            self.blocks.push(Block::List(list));
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        if self.collect_diagnostics {
            debug!("{}", diagnostic);
            self.diagnostics.push(diagnostic);
        }
    }
}
