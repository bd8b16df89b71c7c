//! Diagnostics for tolerated malformed input.
//!
//! Rendering never fails. When the parser meets something it has to guess
//! about, such as a code fence that is never closed, it renders a best-effort
//! block and records a [`Diagnostic`] so editors and the CLI can point at it.

use thiserror::Error;

use crate::span::Span;

/// What was tolerated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    /// Input ended inside a fenced code block.
    #[error("unclosed code fence")]
    UnclosedCodeFence,
    /// Four or more `#` before the text; rendered as a paragraph.
    #[error("heading level {0} is deeper than the supported maximum of 3")]
    HeadingTooDeep(u8),
    /// A heading or list marker with nothing after it; rendered as text.
    #[error("block marker without content")]
    EmptyMarker,
}

/// A located diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at bytes {}..{}", .span.start, .span.end)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Where in the original input the problem starts.
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn unclosed_code_fence(span: Span) -> Self {
        Self::new(DiagnosticKind::UnclosedCodeFence, span)
    }

    pub fn heading_too_deep(level: u8, span: Span) -> Self {
        Self::new(DiagnosticKind::HeadingTooDeep(level), span)
    }

    pub fn empty_marker(span: Span) -> Self {
        Self::new(DiagnosticKind::EmptyMarker, span)
    }
}

/// Diagnostics collected during one parse, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.items.push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.items.iter()
    }

    /// Number of diagnostics of the given kind.
    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }
}

impl IntoIterator for Diagnostics {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'d> IntoIterator for &'d Diagnostics {
    type Item = &'d Diagnostic;
    type IntoIter = std::slice::Iter<'d, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A profile name that is neither `safe` nor `compat`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown profile '{0}' (expected 'safe' or 'compat')")]
pub struct UnknownProfile(pub String);
