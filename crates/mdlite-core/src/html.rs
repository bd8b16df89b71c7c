//! HTML emission for a parsed [`Document`].
//!
//! Output uses a fixed element vocabulary: `h1`-`h3`, `p`, `ul`, `ol`, `li`,
//! `pre`, `code`, `b`, `i` and `a`. Each rendered piece is one output line and
//! the lines are joined with `\n`:
//!
//! ```text
//! <h2>Title</h2>
//! <ul>
//! <li>one</li>
//! <li>two</li>
//! </ul>
//! <pre><code>raw &lt;code&gt;</code></pre>
//! ```

use std::fmt;
use std::str::FromStr;

use crate::ast::{Block, CodeBlock, Document, Heading, List, Paragraph};
use crate::error::UnknownProfile;
use crate::escape::{escape, escape_into};
use crate::inline::{Captures, InlineFormatter};
use crate::lexer::trim_space;

/// Escaping discipline for textual blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Headings, list items and paragraphs are all escaped exactly once
    /// before inline formatting. Output honors the safety contract.
    #[default]
    Safe,
    /// Legacy escaping timing, reproduced byte for byte: paragraphs are
    /// escaped and then their captured groups escaped again, while headings
    /// and list items are inline-formatted without escaping the surrounding
    /// text. Markup in a heading or list item outside an inline pattern
    /// reaches the output unescaped, so this output is NOT safe to inject.
    Compat,
}

impl Profile {
    pub const fn name(self) -> &'static str {
        match self {
            Profile::Safe => "safe",
            Profile::Compat => "compat",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Profile {
    type Err = UnknownProfile;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "safe" => Ok(Profile::Safe),
            "compat" => Ok(Profile::Compat),
            other => Err(UnknownProfile(other.to_string())),
        }
    }
}

/// Renders documents to HTML under a [`Profile`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HtmlRenderer {
    profile: Profile,
}

impl HtmlRenderer {
    pub const fn new(profile: Profile) -> Self {
        Self { profile }
    }

    pub const fn profile(&self) -> Profile {
        self.profile
    }

    pub fn render(&self, doc: &Document<'_>) -> String {
        let mut lines = Vec::with_capacity(doc.blocks.len() * 2);
        for block in &doc.blocks {
            self.render_block(block, &mut lines);
        }
        lines.join("\n")
    }

    fn render_block(&self, block: &Block<'_>, lines: &mut Vec<String>) {
        match block {
            Block::Heading(heading) => lines.push(self.heading(heading)),
            Block::Paragraph(paragraph) => {
                if let Some(line) = self.paragraph(paragraph) {
                    lines.push(line);
                }
            }
            Block::List(list) => self.list(list, lines),
            Block::CodeBlock(code) => lines.push(code_block(code)),
        }
    }

    fn heading(&self, heading: &Heading<'_>) -> String {
        format!(
            "<h{level}>{}</h{level}>",
            self.line_text(heading.text),
            level = heading.level
        )
    }

    fn list(&self, list: &List<'_>, lines: &mut Vec<String>) {
        let tag = list.kind.tag();
        lines.push(format!("<{tag}>"));
        for item in &list.items {
            lines.push(format!("<li>{}</li>", self.line_text(item.text)));
        }
        lines.push(format!("</{tag}>"));
    }

    fn paragraph(&self, paragraph: &Paragraph<'_>) -> Option<String> {
        let mut joined = String::new();
        for (i, line) in paragraph.lines.iter().enumerate() {
            if i > 0 {
                joined.push(' ');
            }
            escape_into(line, &mut joined);
        }

        let text = trim_space(&joined);
        if text.is_empty() {
            return None;
        }

        let captures = match self.profile {
            Profile::Safe => Captures::Escaped,
            Profile::Compat => Captures::Raw,
        };
        Some(format!("<p>{}</p>", InlineFormatter::new(captures).format(text)))
    }

    /// Inline markup for single-line heading and list item text.
    fn line_text(&self, text: &str) -> String {
        match self.profile {
            Profile::Safe => InlineFormatter::new(Captures::Escaped).format(&escape(text)),
            Profile::Compat => InlineFormatter::new(Captures::Raw).format(text),
        }
    }
}

fn code_block(code: &CodeBlock<'_>) -> String {
    let mut out = String::from("<pre><code>");
    escape_into(&code.content(), &mut out);
    out.push_str("</code></pre>");
    out
}
