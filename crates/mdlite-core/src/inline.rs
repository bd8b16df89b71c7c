//! Inline formatting as an ordered list of rewrite passes.
//!
//! Each [`Pass`] scans its whole input once, left to right, replacing every
//! leftmost non-overlapping match and copying everything else through
//! untouched. Passes run in [`PASSES`] order and each one consumes the
//! previous pass's output, so markup written by an earlier pass is visible to
//! later ones. A link URL containing `_x_` therefore gets an `<i>` inside its
//! `href`; the order is part of the observable output and must not change.
//!
//! Text outside a match is never escaped here. Whether the captured groups
//! are escaped is selected with [`Captures`].

use std::borrow::Cow;

use memchr::memchr;

use crate::escape::escape_into;
use crate::lexer::is_space;

/// URL prefixes accepted by the link pass. Anything else stays literal text.
pub const LINK_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Browsing context every generated anchor opens in.
pub const LINK_TARGET: &str = "_blank";

/// Relationship that keeps the opened page from reaching back to the opener.
pub const LINK_REL: &str = "noopener";

/// The fixed pass order.
pub const PASSES: [Pass; 4] = [Pass::Link, Pass::Bold, Pass::Italic, Pass::Code];

/// How captured groups (link label and URL, emphasized text, code) are
/// written into the replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Captures {
    /// The input is raw text: escape each captured group.
    Raw,
    /// The caller escaped the whole input already: copy groups as they are.
    Escaped,
}

/// One matcher+replacer step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// `[label](http://...)` or `[label](https://...)`
    Link,
    /// `**text**`, text without `*`
    Bold,
    /// `_text_`, text without `_`
    Italic,
    /// `` `text` ``, text without a backtick
    Code,
}

/// A single match found by a pass, in byte offsets of the pass input.
struct Found<'t> {
    start: usize,
    end: usize,
    text: &'t str,
    url: Option<&'t str>,
}

impl Pass {
    /// Element written around the captured text.
    pub const fn tag(self) -> &'static str {
        match self {
            Pass::Link => "a",
            Pass::Bold => "b",
            Pass::Italic => "i",
            Pass::Code => "code",
        }
    }

    /// Run this pass over `text`.
    ///
    /// Returns the input borrowed when nothing matched.
    pub fn apply(self, text: &str, captures: Captures) -> Cow<'_, str> {
        let mut out: Option<String> = None;
        let mut copied = 0;

        while let Some(found) = self.find(text, copied) {
            let buf = out.get_or_insert_with(|| String::with_capacity(text.len() + 32));
            buf.push_str(&text[copied..found.start]);
            self.write(&found, captures, buf);
            copied = found.end;
        }

        match out {
            None => Cow::Borrowed(text),
            Some(mut buf) => {
                buf.push_str(&text[copied..]);
                Cow::Owned(buf)
            }
        }
    }

    fn find<'t>(self, text: &'t str, from: usize) -> Option<Found<'t>> {
        match self {
            Pass::Link => find_link(text, from),
            Pass::Bold => find_delimited(text, from, "**", b'*'),
            Pass::Italic => find_delimited(text, from, "_", b'_'),
            Pass::Code => find_delimited(text, from, "`", b'`'),
        }
    }

    fn write(self, found: &Found<'_>, captures: Captures, out: &mut String) {
        let tag = self.tag();
        out.push('<');
        out.push_str(tag);
        if let Some(url) = found.url {
            out.push_str(" href=\"");
            push_capture(url, captures, out);
            out.push_str("\" target=\"");
            out.push_str(LINK_TARGET);
            out.push_str("\" rel=\"");
            out.push_str(LINK_REL);
            out.push('"');
        }
        out.push('>');
        push_capture(found.text, captures, out);
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}

#[inline]
fn push_capture(text: &str, captures: Captures, out: &mut String) {
    match captures {
        Captures::Raw => escape_into(text, out),
        Captures::Escaped => out.push_str(text),
    }
}

/// `delim` + one or more bytes other than `stop` + `delim`.
///
/// `stop` is the delimiter's own character, so the content ends at the first
/// occurrence of it and the only question is whether a full closing
/// delimiter starts there.
fn find_delimited<'t>(text: &'t str, from: usize, delim: &str, stop: u8) -> Option<Found<'t>> {
    let bytes = text.as_bytes();
    let marker = delim.as_bytes();
    let mut pos = from;

    while let Some(offset) = memchr(marker[0], &bytes[pos..]) {
        let start = pos + offset;
        pos = start + 1;

        if !bytes[start..].starts_with(marker) {
            continue;
        }

        let inner = start + marker.len();
        // No stop byte after this opener means none after any later opener.
        let len = memchr(stop, &bytes[inner..])?;
        let close = inner + len;

        if len > 0 && bytes[close..].starts_with(marker) {
            return Some(Found {
                start,
                end: close + marker.len(),
                text: &text[inner..close],
                url: None,
            });
        }
    }

    None
}

/// `[` + label without `]` + `](` + allowed scheme + URL body + `)`.
fn find_link(text: &str, from: usize) -> Option<Found<'_>> {
    let bytes = text.as_bytes();
    let mut pos = from;

    while let Some(offset) = memchr(b'[', &bytes[pos..]) {
        let start = pos + offset;
        pos = start + 1;

        let label_start = start + 1;
        let len = memchr(b']', &bytes[label_start..])?;
        let label_end = label_start + len;
        if len == 0 {
            continue;
        }

        if let Some((url, end)) = link_destination(text, label_end + 1) {
            return Some(Found {
                start,
                end,
                text: &text[label_start..label_end],
                url: Some(url),
            });
        }
    }

    None
}

/// Parse `(URL)` at byte `at`, returning the URL and the offset after `)`.
fn link_destination(text: &str, at: usize) -> Option<(&str, usize)> {
    let rest = text.get(at..)?.strip_prefix('(')?;
    let scheme = LINK_SCHEMES.iter().find(|s| rest.starts_with(*s))?;

    let body = &rest[scheme.len()..];
    let body_len = body.find(ends_url).unwrap_or(body.len());
    if body_len == 0 {
        return None;
    }

    let url_start = at + 1;
    let url_end = url_start + scheme.len() + body_len;
    if text.as_bytes().get(url_end) != Some(&b')') {
        return None;
    }

    Some((&text[url_start..url_end], url_end + 1))
}

#[inline]
fn ends_url(c: char) -> bool {
    c == ')' || is_space(c)
}

/// Applies [`PASSES`] in order with a fixed capture discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InlineFormatter {
    captures: Captures,
}

impl InlineFormatter {
    pub const fn new(captures: Captures) -> Self {
        Self { captures }
    }

    pub const fn captures(&self) -> Captures {
        self.captures
    }

    pub fn format(&self, text: &str) -> String {
        let mut current = text.to_owned();
        for pass in PASSES {
            let rewritten = match pass.apply(&current, self.captures) {
                Cow::Borrowed(_) => None,
                Cow::Owned(next) => Some(next),
            };
            if let Some(next) = rewritten {
                current = next;
            }
        }
        current
    }
}

/// Format raw text: captured groups are escaped, everything else is copied.
///
/// ```rust
/// use mdlite_core::format_inline;
///
/// assert_eq!(format_inline("a **b<c** d"), "a <b>b&lt;c</b> d");
/// assert_eq!(format_inline("[x](javascript:alert(1))"), "[x](javascript:alert(1))");
/// ```
pub fn format_inline(text: &str) -> String {
    InlineFormatter::new(Captures::Raw).format(text)
}
