//! HTML preprocessing
//!
//! [`preprocess`] is total and idempotent: the rewrite pipeline is repeated
//! until its output stops changing.

use regex_lite::{Captures, Regex};
use std::sync::OnceLock;

/// Tag name of the canonical page-break token
pub const PAGE_BREAK_TAG: &str = "page-break";

/// Canonical page-break token recognized by the parser
pub const PAGE_BREAK_TOKEN: &str = "<page-break></page-break>";

/// Block and void elements whose style may carry a forced page break
const BREAKABLE_TAGS: &str = "div|p|section|article|header|footer|span|h[1-6]|hr|br";

fn cached(cell: &'static OnceLock<Option<Regex>>, pattern: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| Regex::new(pattern).ok()).as_ref()
}

fn comment_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r"(?s)<!--.*?-->")
}

fn executable_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(
        &RE,
        r"(?is)<script\b[^>]*>.*?</script\s*>|<style\b[^>]*>.*?</style\s*>",
    )
}

fn void_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(
        &RE,
        r"(?i)<(br|hr|img|input|meta|link|area|base|col|embed|source|track|wbr)\b([^>]*?)\s*/>",
    )
}

fn breakable_open_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, &format!(r"(?i)<({})\b([^>]*)>", BREAKABLE_TAGS))
}

fn style_attr_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(&RE, r#"(?i)\s*\bstyle\s*=\s*("[^"]*"|'[^']*')"#)
}

fn break_directive_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    cached(
        &RE,
        r"(?i)page-break-(before|after)\s*:\s*always|break-(before|after)\s*:\s*page",
    )
}

/// Upper bound on whole-pipeline passes; real input settles after one
const MAX_PASSES: usize = 8;

/// Normalize raw HTML (or plain text) for parsing.
///
/// - removes comments and `script`/`style` blocks
/// - collapses whitespace runs to a single space and trims
/// - wraps markup-free text in a paragraph
/// - rewrites self-closing void tags (`<br/>`) to their plain form
/// - replaces forced page breaks with [`PAGE_BREAK_TOKEN`]
pub fn preprocess(raw: &str) -> String {
    let mut html = single_pass(raw);
    for _ in 1..MAX_PASSES {
        let next = single_pass(&html);
        if next == html {
            break;
        }
        html = next;
    }
    html
}

fn single_pass(raw: &str) -> String {
    let mut html = raw.to_string();
    loop {
        let mut next = html.clone();
        if let Some(re) = comment_re() {
            next = re.replace_all(&next, "").into_owned();
        }
        if let Some(re) = executable_re() {
            next = re.replace_all(&next, "").into_owned();
        }
        if next == html {
            break;
        }
        html = next;
    }

    let html = collapse_whitespace(&html);
    if html.is_empty() {
        return html;
    }
    if !html.contains('<') {
        return format!("<p>{}</p>", html);
    }

    let html = match void_re() {
        Some(re) => replace_until_stable(re, html, |caps| {
            format!("<{}{}>", &caps[1], &caps[2])
        }),
        None => html,
    };

    rewrite_page_breaks(&html)
}

/// Collapse all whitespace runs into single spaces and trim the ends
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn replace_until_stable<F>(re: &Regex, mut html: String, mut rep: F) -> String
where
    F: FnMut(&Captures<'_>) -> String,
{
    loop {
        let next = re.replace_all(&html, |caps: &Captures<'_>| rep(caps)).into_owned();
        if next == html {
            return html;
        }
        html = next;
    }
}

/// A pending edit against the source string
struct Edit {
    start: usize,
    end: usize,
    text: String,
}

fn rewrite_page_breaks(html: &str) -> String {
    let (Some(open_re), Some(style_re), Some(directive_re)) =
        (breakable_open_re(), style_attr_re(), break_directive_re())
    else {
        return html.to_string();
    };

    let mut edits = Vec::new();
    for caps in open_re.captures_iter(html) {
        let (Some(whole), Some(tag), Some(attrs)) = (caps.get(0), caps.get(1), caps.get(2)) else {
            continue;
        };

        let mut before = false;
        let mut after = false;
        for style in style_re.captures_iter(attrs.as_str()) {
            for directive in directive_re.captures_iter(&style[1]) {
                let side = directive
                    .get(1)
                    .or_else(|| directive.get(2))
                    .map(|m| m.as_str().to_ascii_lowercase());
                match side.as_deref() {
                    Some("before") => before = true,
                    Some("after") => after = true,
                    _ => {}
                }
            }
        }
        if !before && !after {
            continue;
        }

        let tag_name = tag.as_str();
        let is_void = tag_name.eq_ignore_ascii_case("hr") || tag_name.eq_ignore_ascii_case("br");
        if is_void {
            edits.push(Edit {
                start: whole.start(),
                end: whole.end(),
                text: PAGE_BREAK_TOKEN.to_string(),
            });
            continue;
        }

        let remaining = style_re.replace_all(attrs.as_str(), "");
        let remaining = remaining.trim_end();
        let mut replacement = String::new();
        if before {
            replacement.push_str(PAGE_BREAK_TOKEN);
        }
        replacement.push_str(&format!("<{}{}>", tag_name, remaining));
        edits.push(Edit {
            start: whole.start(),
            end: whole.end(),
            text: replacement,
        });

        if after {
            let at = find_close_tag(html, whole.end(), tag_name).unwrap_or(whole.end());
            edits.push(Edit {
                start: at,
                end: at,
                text: PAGE_BREAK_TOKEN.to_string(),
            });
        }
    }

    if edits.is_empty() {
        return html.to_string();
    }
    // Stable sort keeps an open-tag rewrite ahead of an insertion at its end.
    edits.sort_by_key(|e| e.start);

    let mut out = String::with_capacity(html.len() + edits.len() * PAGE_BREAK_TOKEN.len());
    let mut cursor = 0;
    for edit in edits {
        if edit.start < cursor {
            continue;
        }
        out.push_str(&html[cursor..edit.start]);
        out.push_str(&edit.text);
        cursor = edit.end;
    }
    out.push_str(&html[cursor..]);
    out
}

/// Byte offset just past the first `</tag>` at or after `from`
fn find_close_tag(html: &str, from: usize, tag: &str) -> Option<usize> {
    let lower = html[from..].to_ascii_lowercase();
    let needle = format!("</{}", tag.to_ascii_lowercase());
    let mut search = 0;
    while let Some(pos) = lower[search..].find(&needle) {
        let start = search + pos;
        let after_name = start + needle.len();
        let rest = &lower[after_name..];
        let trimmed = rest.trim_start();
        if trimmed.starts_with('>') {
            let close = after_name + (rest.len() - trimmed.len()) + 1;
            return Some(from + close);
        }
        search = after_name;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(preprocess(""), "");
        assert_eq!(preprocess("   \n\t "), "");
    }

    #[test]
    fn test_plain_text_wrapped() {
        assert_eq!(preprocess("hello"), "<p>hello</p>");
        assert_eq!(preprocess("  hello \n  world "), "<p>hello world</p>");
    }

    #[test]
    fn test_script_and_style_removed() {
        let html = "<p>a</p><script type=\"text/javascript\">alert('x')</script><STYLE>p{}</STYLE><p>b</p>";
        assert_eq!(preprocess(html), "<p>a</p><p>b</p>");
    }

    #[test]
    fn test_nested_script_reassembly_removed() {
        let html = "<p>x</p><scr<script></script>ipt>alert(1)</script>";
        assert_eq!(preprocess(html), "<p>x</p>");
    }

    #[test]
    fn test_comments_removed() {
        assert_eq!(preprocess("<p>a<!-- hidden --></p>"), "<p>a</p>");
    }

    #[test]
    fn test_void_tags_normalized() {
        assert_eq!(preprocess("<p>a<br/>b<br />c</p>"), "<p>a<br>b<br>c</p>");
        assert_eq!(
            preprocess(r#"<img src="a.png" alt="A" />"#),
            r#"<img src="a.png" alt="A">"#
        );
    }

    #[test]
    fn test_page_break_before() {
        let html = r#"<p>a</p><div style="page-break-before: always;"></div><h2>b</h2>"#;
        assert_eq!(
            preprocess(html),
            "<p>a</p><page-break></page-break><div></div><h2>b</h2>"
        );
    }

    #[test]
    fn test_page_break_after_follows_element() {
        let html = r#"<p style="page-break-after:always" class="x">end</p><p>next</p>"#;
        assert_eq!(
            preprocess(html),
            r#"<p class="x">end</p><page-break></page-break><p>next</p>"#
        );
    }

    #[test]
    fn test_page_break_on_hr() {
        let html = r#"<p>a</p><hr style="break-after: page" /><p>b</p>"#;
        assert_eq!(
            preprocess(html),
            "<p>a</p><page-break></page-break><p>b</p>"
        );
    }

    #[test]
    fn test_page_break_outside_style_ignored() {
        let html = r#"<div data-note="page-break-before: always">x</div>"#;
        assert_eq!(preprocess(html), html);
    }

    #[test]
    fn test_idempotent_samples() {
        let samples = [
            "",
            "hello",
            "<h1>Report</h1><p>Intro text.</p><ul><li>One</li><li>Two</li></ul><div style=\"page-break-before: always;\"></div><h2>Next</h2>",
            "<br//>",
            "<div style='page-break-after: always'>x</div>",
            "<scr<script>x</script>ipt>y</script>",
            "a < b and c > d",
        ];
        for sample in samples {
            let once = preprocess(sample);
            assert_eq!(preprocess(&once), once, "not idempotent for {:?}", sample);
        }
    }

    fn html_fragment() -> impl Strategy<Value = String> {
        prop_oneof![
            "[a-zA-Z ]{0,12}",
            Just("<p>".to_string()),
            Just("</p>".to_string()),
            Just("<br/>".to_string()),
            Just("<br />".to_string()),
            Just("<div style=\"page-break-before: always;\">".to_string()),
            Just("<div style=\"page-break-after: always\">".to_string()),
            Just("</div>".to_string()),
            Just("<script>".to_string()),
            Just("</script>".to_string()),
            Just("<!--".to_string()),
            Just("-->".to_string()),
            Just("<ul><li>".to_string()),
            Just("</li></ul>".to_string()),
            Just("<img src=\"x.png\"/>".to_string()),
            Just("\n\t  ".to_string()),
        ]
    }

    proptest! {
        #[test]
        fn prop_preprocess_idempotent(parts in prop::collection::vec(html_fragment(), 0..16)) {
            let input = parts.concat();
            let once = preprocess(&input);
            prop_assert_eq!(preprocess(&once), once);
        }

        #[test]
        fn prop_preprocess_idempotent_arbitrary(input in "\\PC{0,64}") {
            let once = preprocess(&input);
            prop_assert_eq!(preprocess(&once), once);
        }
    }
}
