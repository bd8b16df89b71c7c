//! # mdlite core
//!
//! A small, line-oriented renderer from a note-taking markup dialect to HTML
//! that is safe to inject into a page as-is.
//!
//! The dialect is deliberately tiny: `#`/`##`/`###` headings, `-`/`*` and
//! `1.` lists, fenced code blocks, paragraphs, and four inline patterns
//! (links, `**bold**`, `_italic_`, `` `code` ``). No nesting, no tables, no
//! raw HTML.
//!
//! ## Quick Start
//!
//! ```rust
//! let html = mdlite_core::render("# Notes\n\n- **buy** milk\n- call <Bob>");
//! assert_eq!(
//!     html,
//!     "<h1>Notes</h1>\n<ul>\n<li><b>buy</b> milk</li>\n<li>call &lt;Bob&gt;</li>\n</ul>"
//! );
//! ```
//!
//! ## Diagnostics
//!
//! Rendering never fails. Malformed input degrades to text or a best-effort
//! block, and [`Renderer::render_with_diagnostics`] reports what was
//! tolerated:
//!
//! ```rust
//! use mdlite_core::{DiagnosticKind, Renderer};
//!
//! let result = Renderer::default().render_with_diagnostics("```\nlet x = 1;");
//! assert_eq!(result.html, "<pre><code>let x = 1;</code></pre>");
//! assert_eq!(result.diagnostics.count(DiagnosticKind::UnclosedCodeFence), 1);
//! ```
//!
//! ## Output is not a fixed point
//!
//! Rendering the renderer's own output does not reproduce it: entities get
//! escaped a second time. Do not store rendered HTML and feed it back in.

pub mod ast;
pub mod error;
pub mod escape;
pub mod html;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod renderer;
pub mod span;

pub use ast::{Block, Document, ListKind};
pub use error::{Diagnostic, DiagnosticKind, Diagnostics, UnknownProfile};
pub use escape::escape;
pub use html::{HtmlRenderer, Profile};
pub use inline::format_inline;
pub use parser::{ParseResult, Parser};
pub use renderer::{render, render_opt, RenderResult, Renderer};
