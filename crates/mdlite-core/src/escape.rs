//! HTML escaping for text and attribute values.
//!
//! Only `&`, `<`, `>` and `"` are replaced. Every attribute the renderer
//! writes is double-quoted, so a single quote never needs an entity.

use std::borrow::Cow;

use memchr::{memchr, memchr3};

/// Escape `text` for inclusion in HTML content or a double-quoted attribute.
///
/// Returns the input unchanged (borrowed) when it contains nothing to
/// replace. The function is not idempotent: escaping `&amp;` again yields
/// `&amp;amp;`, so each piece of input must pass through here exactly once.
///
/// ```rust
/// use mdlite_core::escape;
///
/// assert_eq!(escape("a < b && \"c\""), "a &lt; b &amp;&amp; &quot;c&quot;");
/// assert_eq!(escape("plain"), "plain");
/// ```
pub fn escape(text: &str) -> Cow<'_, str> {
    match find_special(text.as_bytes(), 0) {
        None => Cow::Borrowed(text),
        Some(_) => {
            let mut out = String::with_capacity(text.len() + text.len() / 4);
            escape_into(text, &mut out);
            Cow::Owned(out)
        }
    }
}

/// Append the escaped form of `text` to `out`.
pub fn escape_into(text: &str, out: &mut String) {
    let bytes = text.as_bytes();
    let mut copied = 0;

    while let Some(pos) = find_special(bytes, copied) {
        out.push_str(&text[copied..pos]);
        out.push_str(entity(bytes[pos]));
        copied = pos + 1;
    }

    out.push_str(&text[copied..]);
}

#[inline]
fn entity(byte: u8) -> &'static str {
    match byte {
        b'&' => "&amp;",
        b'<' => "&lt;",
        b'>' => "&gt;",
        b'"' => "&quot;",
        _ => unreachable!("not an escapable byte"),
    }
}

/// Position of the next byte needing an entity at or after `from`.
#[inline]
fn find_special(bytes: &[u8], from: usize) -> Option<usize> {
    let rest = &bytes[from..];
    let markup = memchr3(b'&', b'<', b'>', rest);
    let quote = memchr(b'"', rest);

    let pos = match (markup, quote) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some(from + pos)
}
