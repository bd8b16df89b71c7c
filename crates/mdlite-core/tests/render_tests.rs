//! End-to-end rendering tests: text in, HTML out.

use mdlite_core::{render, render_opt, DiagnosticKind, Profile, Renderer};
use pretty_assertions::assert_eq;

fn compat(input: &str) -> String {
    Renderer::new(Profile::Compat).render(input)
}

// ============================================================================
// Block Output
// ============================================================================

#[test]
fn test_render_heading() {
    assert_eq!(render("# Title"), "<h1>Title</h1>");
    assert_eq!(render("### Small"), "<h3>Small</h3>");
}

#[test]
fn test_render_level_four_as_paragraph() {
    assert_eq!(render("#### Title"), "<p>#### Title</p>");
}

#[test]
fn test_render_list_then_paragraph() {
    assert_eq!(
        render("- a\n- b\n\ntext"),
        "<ul>\n<li>a</li>\n<li>b</li>\n</ul>\n<p>text</p>"
    );
}

#[test]
fn test_render_list_kind_switch() {
    assert_eq!(
        render("- a\n1. b"),
        "<ul>\n<li>a</li>\n</ul>\n<ol>\n<li>b</li>\n</ol>"
    );
}

#[test]
fn test_render_paragraph_between_list_items() {
    assert_eq!(
        render("- a\ntext\n- b"),
        "<ul>\n<li>a</li>\n</ul>\n<p>text</p>\n<ul>\n<li>b</li>\n</ul>"
    );
}

#[test]
fn test_render_paragraph_joins_lines_with_space() {
    assert_eq!(render("one\n  two  \nthree"), "<p>one   two   three</p>");
}

#[test]
fn test_render_code_block_is_not_inline_formatted() {
    assert_eq!(render("```\n**x**\n```"), "<pre><code>**x**</code></pre>");
}

#[test]
fn test_render_code_block_escapes_content() {
    assert_eq!(
        render("```html\n<b class=\"x\">&</b>\n# heading\n```"),
        "<pre><code>&lt;b class=&quot;x&quot;&gt;&amp;&lt;/b&gt;\n# heading</code></pre>"
    );
}

#[test]
fn test_render_unclosed_code_block() {
    assert_eq!(
        render("intro\n```\nfn x() {}\n"),
        "<p>intro</p>\n<pre><code>fn x() {}\n</code></pre>"
    );
}

#[test]
fn test_render_mixed_document() {
    let input = "# Kern\n\
                 Lusi lernt Emotionen als **Entscheidungsmaschine**.\n\
                 \n\
                 ## Notizen\n\
                 - Was glaubt _Exir_?\n\
                 - Siehe [Wiki](https://example.org/wiki)\n\
                 \n\
                 ```\n\
                 raw <text>\n\
                 ```";

    assert_eq!(
        render(input),
        "<h1>Kern</h1>\n\
         <p>Lusi lernt Emotionen als <b>Entscheidungsmaschine</b>.</p>\n\
         <h2>Notizen</h2>\n\
         <ul>\n\
         <li>Was glaubt <i>Exir</i>?</li>\n\
         <li>Siehe <a href=\"https://example.org/wiki\" target=\"_blank\" rel=\"noopener\">Wiki</a></li>\n\
         </ul>\n\
         <pre><code>raw &lt;text&gt;</code></pre>"
    );
}

#[test]
fn test_render_line_endings_are_normalized() {
    assert_eq!(render("# A\r\nb\rc"), "<h1>A</h1>\n<p>b c</p>");
}

#[test]
fn test_render_empty_and_absent_input() {
    assert_eq!(render(""), "");
    assert_eq!(render("\n \n"), "");
    assert_eq!(render_opt(None), "");
    assert_eq!(render_opt(Some("plain")), "<p>plain</p>");
}

#[test]
fn test_render_byte_order_mark_document() {
    assert_eq!(
        render("\u{feff}# Title\n- item"),
        "<h1>Title</h1>\n<ul>\n<li>item</li>\n</ul>"
    );
    assert_eq!(render("a\n\u{feff}\nb"), "<p>a</p>\n<p>b</p>");
    assert_eq!(render("x\u{feff}"), "<p>x</p>");
}

#[test]
fn test_render_unicode_separators_follow_line_rules() {
    assert_eq!(render("#\u{85}Title"), "<p>#\u{85}Title</p>");
    assert_eq!(render("# a\u{2028}b"), "<p># a\u{2028}b</p>");
}

#[test]
fn test_render_byte_order_mark_ends_link_url() {
    assert_eq!(
        render("[x](https://a.io\u{feff})"),
        "<p>[x](https://a.io\u{feff})</p>"
    );
}

// ============================================================================
// Links
// ============================================================================

#[test]
fn test_render_https_link() {
    assert_eq!(
        render("[go](https://example.com)"),
        "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"noopener\">go</a></p>"
    );
}

#[test]
fn test_render_javascript_link_stays_literal() {
    assert_eq!(
        render("[x](javascript:alert(1))"),
        "<p>[x](javascript:alert(1))</p>"
    );
}

#[test]
fn test_render_link_url_is_escaped_once() {
    assert_eq!(
        render("[q](https://x.io/?a=1&b=2)"),
        "<p><a href=\"https://x.io/?a=1&amp;b=2\" target=\"_blank\" rel=\"noopener\">q</a></p>"
    );
}

#[test]
fn test_render_link_in_heading_and_item() {
    assert_eq!(
        render("## See [docs](http://d.io)\n- [a&b](https://x.io)"),
        "<h2>See <a href=\"http://d.io\" target=\"_blank\" rel=\"noopener\">docs</a></h2>\n\
         <ul>\n\
         <li><a href=\"https://x.io\" target=\"_blank\" rel=\"noopener\">a&amp;b</a></li>\n\
         </ul>"
    );
}

// ============================================================================
// Injection Safety
// ============================================================================

#[test]
fn test_paragraph_markup_is_escaped() {
    assert_eq!(
        render("<img src=x onerror=\"alert(1)\">"),
        "<p>&lt;img src=x onerror=&quot;alert(1)&quot;&gt;</p>"
    );
}

#[test]
fn test_heading_markup_is_escaped() {
    assert_eq!(
        render("# <script>alert(1)</script>"),
        "<h1>&lt;script&gt;alert(1)&lt;/script&gt;</h1>"
    );
}

#[test]
fn test_list_item_markup_is_escaped() {
    assert_eq!(
        render("- <b onclick=\"x\">hi</b>\n1. a & b"),
        "<ul>\n<li>&lt;b onclick=&quot;x&quot;&gt;hi&lt;/b&gt;</li>\n</ul>\n<ol>\n<li>a &amp; b</li>\n</ol>"
    );
}

#[test]
fn test_quote_in_link_url_cannot_break_attribute() {
    assert_eq!(
        render("[x](https://a.io/\"onmouseover=\"alert(1))"),
        "<p><a href=\"https://a.io/&quot;onmouseover=&quot;alert(1\" target=\"_blank\" rel=\"noopener\">x</a>)</p>"
    );
}

#[test]
fn test_emphasis_content_is_escaped_once() {
    assert_eq!(render("**a & b**"), "<p><b>a &amp; b</b></p>");
    assert_eq!(render("# `<tag>`"), "<h1><code>&lt;tag&gt;</code></h1>");
}

#[test]
fn test_rendering_is_not_idempotent() {
    let once = render("a & b");
    let twice = render(&once);

    assert_eq!(once, "<p>a &amp; b</p>");
    assert_eq!(twice, "<p>&lt;p&gt;a &amp;amp; b&lt;/p&gt;</p>");
}

// ============================================================================
// Compat Profile
// ============================================================================

#[test]
fn test_compat_double_escapes_paragraph_captures() {
    assert_eq!(compat("**a & b**"), "<p><b>a &amp;amp; b</b></p>");
    assert_eq!(compat("plain & simple"), "<p>plain &amp; simple</p>");
}

#[test]
fn test_compat_leaves_heading_and_item_text_unescaped() {
    assert_eq!(compat("# <u>x</u>"), "<h1><u>x</u></h1>");
    assert_eq!(compat("- a & **<b>**"), "<ul>\n<li>a & <b>&lt;b&gt;</b></li>\n</ul>");
}

#[test]
fn test_compat_matches_safe_for_plain_text() {
    let input = "# Title\n\nSome **bold** and _italic_ text.\n\n- one\n- two\n\n```\n<code>\n```";
    assert_eq!(compat(input), render(input));
}

#[test]
fn test_profile_parses_from_name() {
    assert_eq!("safe".parse::<Profile>().unwrap(), Profile::Safe);
    assert_eq!(" compat ".parse::<Profile>().unwrap(), Profile::Compat);
    assert_eq!(
        "strict".parse::<Profile>().unwrap_err().to_string(),
        "unknown profile 'strict' (expected 'safe' or 'compat')"
    );
    assert_eq!(Profile::default(), Profile::Safe);
    assert_eq!(Profile::Compat.to_string(), "compat");
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn test_render_with_diagnostics_matches_render() {
    let input = "#### deep\n-\n```\nopen";
    let renderer = Renderer::default();
    let result = renderer.render_with_diagnostics(input);

    assert_eq!(result.html, renderer.render(input));
    assert_eq!(result.diagnostics.len(), 3);
    assert_eq!(result.diagnostics.count(DiagnosticKind::HeadingTooDeep(4)), 1);
    assert_eq!(result.diagnostics.count(DiagnosticKind::EmptyMarker), 1);
    assert_eq!(result.diagnostics.count(DiagnosticKind::UnclosedCodeFence), 1);
}

#[test]
fn test_renderer_is_reusable() {
    let renderer = Renderer::new(Profile::Safe);
    assert_eq!(renderer.render("```\nopen"), "<pre><code>open</code></pre>");
    assert_eq!(renderer.render("- a"), "<ul>\n<li>a</li>\n</ul>");
}
