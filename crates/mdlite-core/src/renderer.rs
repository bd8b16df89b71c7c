//! One-call rendering facade.

use crate::error::Diagnostics;
use crate::html::{HtmlRenderer, Profile};
use crate::parser::Parser;

/// Rendered HTML plus what the parser had to tolerate on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderResult {
    pub html: String,
    pub diagnostics: Diagnostics,
}

/// Text-to-HTML renderer.
///
/// Holds only configuration; every call parses from a fresh state, so one
/// `Renderer` can be shared freely across threads.
///
/// ```rust
/// use mdlite_core::{Profile, Renderer};
///
/// let renderer = Renderer::new(Profile::Safe);
/// assert_eq!(renderer.render("# Hi <there>"), "<h1>Hi &lt;there&gt;</h1>");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Renderer {
    profile: Profile,
}

impl Renderer {
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> Profile {
        self.profile
    }

    pub fn render(&self, input: &str) -> String {
        let parsed = Parser::new().with_diagnostics(false).parse(input);
        HtmlRenderer::new(self.profile).render(&parsed.document)
    }

    pub fn render_with_diagnostics(&self, input: &str) -> RenderResult {
        let parsed = Parser::new().parse(input);
        RenderResult {
            html: HtmlRenderer::new(self.profile).render(&parsed.document),
            diagnostics: parsed.diagnostics,
        }
    }
}

/// Render `input` with the default [`Profile::Safe`].
pub fn render(input: &str) -> String {
    Renderer::default().render(input)
}

/// Render optional input; `None` renders like the empty string.
pub fn render_opt(input: Option<&str>) -> String {
    render(input.unwrap_or_default())
}
