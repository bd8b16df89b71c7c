//! Tests for the escaper and the inline rewrite passes.

use std::borrow::Cow;

use mdlite_core::escape::escape_into;
use mdlite_core::inline::{Captures, InlineFormatter, Pass, PASSES};
use mdlite_core::{escape, format_inline};

// ============================================================================
// Escaper
// ============================================================================

#[test]
fn test_escape_replaces_the_four_characters() {
    assert_eq!(escape("&<>\""), "&amp;&lt;&gt;&quot;");
}

#[test]
fn test_escape_leaves_other_text_alone() {
    assert_eq!(escape("it's a 'quote' – ünïcödé ✓"), "it's a 'quote' – ünïcödé ✓");
    assert!(matches!(escape("nothing here"), Cow::Borrowed(_)));
    assert_eq!(escape(""), "");
}

#[test]
fn test_escape_is_not_idempotent() {
    assert_eq!(escape(&escape("a&b")), "a&amp;amp;b");
}

#[test]
fn test_escape_into_appends() {
    let mut out = String::from("<p>");
    escape_into("x<y", &mut out);
    assert_eq!(out, "<p>x&lt;y");
}

// ============================================================================
// Individual Passes
// ============================================================================

#[test]
fn test_pass_order_is_fixed() {
    assert_eq!(PASSES, [Pass::Link, Pass::Bold, Pass::Italic, Pass::Code]);
}

#[test]
fn test_pass_without_match_borrows() {
    for pass in PASSES {
        assert!(matches!(pass.apply("plain", Captures::Raw), Cow::Borrowed("plain")));
    }
}

#[test]
fn test_bold_pass() {
    let bold = |s| Pass::Bold.apply(s, Captures::Raw).into_owned();

    assert_eq!(bold("**a** and **b**"), "<b>a</b> and <b>b</b>");
    assert_eq!(bold("***a**"), "*<b>a</b>");
    assert_eq!(bold("**a*b**"), "**a*b**");
    assert_eq!(bold("****"), "****");
    assert_eq!(bold("**unclosed"), "**unclosed");
}

#[test]
fn test_italic_pass() {
    let italic = |s| Pass::Italic.apply(s, Captures::Raw).into_owned();

    assert_eq!(italic("_a_ _b_"), "<i>a</i> <i>b</i>");
    assert_eq!(italic("snake_case_name"), "snake<i>case</i>name");
    assert_eq!(italic("__"), "__");
    assert_eq!(italic("_a_b_"), "<i>a</i>b_");
}

#[test]
fn test_code_pass() {
    let code = |s| Pass::Code.apply(s, Captures::Raw).into_owned();

    assert_eq!(code("`a` and `b`"), "<code>a</code> and <code>b</code>");
    assert_eq!(code("``"), "``");
    assert_eq!(code("`<x>`"), "<code>&lt;x&gt;</code>");
}

#[test]
fn test_link_pass_accepts_http_and_https() {
    let link = |s| Pass::Link.apply(s, Captures::Raw).into_owned();

    assert_eq!(
        link("[a](http://a.io) [b](https://b.io/p?q=1)"),
        "<a href=\"http://a.io\" target=\"_blank\" rel=\"noopener\">a</a> \
         <a href=\"https://b.io/p?q=1\" target=\"_blank\" rel=\"noopener\">b</a>"
    );
}

#[test]
fn test_link_pass_rejects_other_destinations() {
    let link = |s| Pass::Link.apply(s, Captures::Raw).into_owned();

    for input in [
        "[x](javascript:alert(1))",
        "[x](ftp://host/file)",
        "[x](HTTPS://upper.case)",
        "[x](https://)",
        "[x](https://has space)",
        "[](https://empty.label)",
        "[x] (https://gap.before)",
        "[x](https://never-closed",
    ] {
        assert_eq!(link(input), input);
    }
}

#[test]
fn test_link_label_runs_to_first_closing_bracket() {
    assert_eq!(
        Pass::Link.apply("[a [b](https://c.io)", Captures::Raw),
        "<a href=\"https://c.io\" target=\"_blank\" rel=\"noopener\">a [b</a>"
    );
}

#[test]
fn test_link_url_stops_at_first_paren() {
    assert_eq!(
        Pass::Link.apply("[f](https://x.io/f(1))", Captures::Raw),
        "<a href=\"https://x.io/f(1\" target=\"_blank\" rel=\"noopener\">f</a>)"
    );
}

#[test]
fn test_captures_escaped_mode_copies_groups() {
    assert_eq!(
        Pass::Bold.apply("**a &amp; b**", Captures::Escaped),
        "<b>a &amp; b</b>"
    );
    assert_eq!(
        Pass::Bold.apply("**a &amp; b**", Captures::Raw),
        "<b>a &amp;amp; b</b>"
    );
}

// ============================================================================
// Full Formatter
// ============================================================================

#[test]
fn test_format_inline_applies_all_passes() {
    assert_eq!(
        format_inline("_a_ **b** `c` [d](http://e)"),
        "<i>a</i> <b>b</b> <code>c</code> \
         <a href=\"http://e\" target=\"_blank\" rel=\"noopener\">d</a>"
    );
}

#[test]
fn test_format_inline_does_not_escape_unmatched_text() {
    assert_eq!(format_inline("<u>a & b</u>"), "<u>a & b</u>");
}

#[test]
fn test_later_passes_see_earlier_replacements() {
    // The italic pass pairs the `_` of `target="_blank"` with the one in the
    // label.
    assert_eq!(
        format_inline("[my_file](https://x.io)"),
        "<a href=\"https://x.io\" target=\"<i>blank&quot; rel=&quot;noopener&quot;&gt;my</i>file</a>"
    );
}

#[test]
fn test_code_inside_bold_is_formatted_after_bold() {
    assert_eq!(format_inline("**`x`**"), "<b><code>x</code></b>");
}

#[test]
fn test_formatter_reports_its_capture_mode() {
    assert_eq!(
        InlineFormatter::new(Captures::Escaped).captures(),
        Captures::Escaped
    );
}
