//! Python bindings for the mdlite renderer.

use mdlite_core::{
    error::{Diagnostic as CoreDiagnostic, DiagnosticKind as CoreDiagnosticKind},
    span::Span as CoreSpan,
    Profile as CoreProfile, RenderResult as CoreRenderResult, Renderer as CoreRenderer,
};
use pyo3::prelude::*;

// ============================================================================
// Span
// ============================================================================

/// Source location in the input text (byte offsets).
#[pyclass(frozen, get_all, name = "Span")]
#[derive(Clone)]
pub struct PySpan {
    pub start: u32,
    pub end: u32,
}

#[pymethods]
impl PySpan {
    fn __repr__(&self) -> String {
        format!("Span({}, {})", self.start, self.end)
    }

    #[getter]
    fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

impl From<CoreSpan> for PySpan {
    fn from(s: CoreSpan) -> Self {
        PySpan {
            start: s.start,
            end: s.end,
        }
    }
}

// ============================================================================
// Enums
// ============================================================================

/// Escaping profile.
///
/// `Safe` output can be inserted into a page as-is. `Compat` reproduces the
/// legacy escaping and leaves heading and list item markup unescaped.
#[pyclass(frozen, eq, eq_int, name = "Profile")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyProfile {
    Safe,
    Compat,
}

impl From<CoreProfile> for PyProfile {
    fn from(p: CoreProfile) -> Self {
        match p {
            CoreProfile::Safe => PyProfile::Safe,
            CoreProfile::Compat => PyProfile::Compat,
        }
    }
}

impl From<PyProfile> for CoreProfile {
    fn from(p: PyProfile) -> Self {
        match p {
            PyProfile::Safe => CoreProfile::Safe,
            PyProfile::Compat => CoreProfile::Compat,
        }
    }
}

/// What the parser had to tolerate.
#[pyclass(frozen, eq, eq_int, name = "DiagnosticKind")]
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PyDiagnosticKind {
    UnclosedCodeFence,
    HeadingTooDeep,
    EmptyMarker,
}

impl From<CoreDiagnosticKind> for PyDiagnosticKind {
    fn from(k: CoreDiagnosticKind) -> Self {
        match k {
            CoreDiagnosticKind::UnclosedCodeFence => PyDiagnosticKind::UnclosedCodeFence,
            CoreDiagnosticKind::HeadingTooDeep(_) => PyDiagnosticKind::HeadingTooDeep,
            CoreDiagnosticKind::EmptyMarker => PyDiagnosticKind::EmptyMarker,
        }
    }
}

/// A located, non-fatal note about malformed input.
#[pyclass(frozen, get_all, name = "Diagnostic")]
#[derive(Clone)]
pub struct PyDiagnostic {
    pub kind: PyDiagnosticKind,
    pub message: String,
    pub span: PySpan,
    /// Heading depth for `HeadingTooDeep`, otherwise None.
    pub level: Option<u8>,
}

#[pymethods]
impl PyDiagnostic {
    fn __repr__(&self) -> String {
        format!("Diagnostic({:?}, {:?})", self.kind, self.message)
    }

    fn __str__(&self) -> String {
        format!(
            "{} at bytes {}..{}",
            self.message, self.span.start, self.span.end
        )
    }
}

impl From<CoreDiagnostic> for PyDiagnostic {
    fn from(d: CoreDiagnostic) -> Self {
        let level = match d.kind {
            CoreDiagnosticKind::HeadingTooDeep(level) => Some(level),
            _ => None,
        };
        PyDiagnostic {
            kind: d.kind.into(),
            message: d.kind.to_string(),
            span: d.span.into(),
            level,
        }
    }
}

// ============================================================================
// RenderResult
// ============================================================================

/// Rendered HTML plus diagnostics.
#[pyclass(frozen, get_all, name = "RenderResult")]
pub struct PyRenderResult {
    pub html: String,
    pub diagnostics: Vec<PyDiagnostic>,
}

#[pymethods]
impl PyRenderResult {
    #[getter]
    fn ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    fn __repr__(&self) -> String {
        format!(
            "RenderResult(html_len={}, diagnostics={})",
            self.html.len(),
            self.diagnostics.len()
        )
    }
}

impl From<CoreRenderResult> for PyRenderResult {
    fn from(r: CoreRenderResult) -> Self {
        PyRenderResult {
            html: r.html,
            diagnostics: r.diagnostics.into_iter().map(PyDiagnostic::from).collect(),
        }
    }
}

// ============================================================================
// Renderer
// ============================================================================

/// mdlite renderer.
///
/// Args:
///     profile: Profile.Safe (default) or Profile.Compat
#[pyclass(frozen, name = "Renderer")]
pub struct PyRenderer {
    inner: CoreRenderer,
}

#[pymethods]
impl PyRenderer {
    #[new]
    #[pyo3(signature = (profile=None), text_signature = "(profile=None)")]
    fn new(profile: Option<PyProfile>) -> Self {
        PyRenderer {
            inner: CoreRenderer::new(profile.unwrap_or(PyProfile::Safe).into()),
        }
    }

    #[getter]
    fn profile(&self) -> PyProfile {
        self.inner.profile().into()
    }

    /// Render text to HTML. None renders as an empty string.
    #[pyo3(text_signature = "(self, text)")]
    fn render(&self, py: Python<'_>, text: Option<&str>) -> String {
        let text = text.unwrap_or_default();
        py.allow_threads(|| self.inner.render(text))
    }

    /// Render text and report tolerated malformed input.
    #[pyo3(text_signature = "(self, text)")]
    fn render_with_diagnostics(&self, py: Python<'_>, text: Option<&str>) -> PyRenderResult {
        let text = text.unwrap_or_default();
        py.allow_threads(|| self.inner.render_with_diagnostics(text))
            .into()
    }

    fn __repr__(&self) -> String {
        format!("Renderer(profile={:?})", PyProfile::from(self.inner.profile()))
    }
}

// ============================================================================
// Module functions
// ============================================================================

/// Render text to HTML.
///
/// Args:
///     text: Note text, or None
///     profile: Escaping profile (default: Profile.Safe)
///
/// Returns:
///     str: HTML fragment
#[pyfunction]
#[pyo3(signature = (text, profile=None), text_signature = "(text, profile=None)")]
fn render(py: Python<'_>, text: Option<&str>, profile: Option<PyProfile>) -> String {
    PyRenderer::new(profile).render(py, text)
}

/// Render text and report tolerated malformed input.
///
/// Args:
///     text: Note text, or None
///     profile: Escaping profile (default: Profile.Safe)
///
/// Returns:
///     RenderResult: HTML and diagnostics
#[pyfunction]
#[pyo3(signature = (text, profile=None), text_signature = "(text, profile=None)")]
fn render_with_diagnostics(
    py: Python<'_>,
    text: Option<&str>,
    profile: Option<PyProfile>,
) -> PyRenderResult {
    PyRenderer::new(profile).render_with_diagnostics(py, text)
}

/// Escape `&`, `<`, `>` and `"` for HTML.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn escape(text: &str) -> String {
    mdlite_core::escape(text).into_owned()
}

/// Apply the inline passes (links, bold, italic, code) to one line of raw
/// text. Text outside the patterns is not escaped.
#[pyfunction]
#[pyo3(text_signature = "(text)")]
fn format_inline(text: &str) -> String {
    mdlite_core::format_inline(text)
}

// ============================================================================
// Module
// ============================================================================

/// mdlite - Safe renderer for a small Markdown-like note dialect.
#[pymodule]
fn pymdlite(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PySpan>()?;
    m.add_class::<PyProfile>()?;
    m.add_class::<PyDiagnosticKind>()?;
    m.add_class::<PyDiagnostic>()?;
    m.add_class::<PyRenderResult>()?;
    m.add_class::<PyRenderer>()?;
    m.add_function(wrap_pyfunction!(render, m)?)?;
    m.add_function(wrap_pyfunction!(render_with_diagnostics, m)?)?;
    m.add_function(wrap_pyfunction!(escape, m)?)?;
    m.add_function(wrap_pyfunction!(format_inline, m)?)?;
    Ok(())
}
