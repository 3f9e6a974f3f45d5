//! Structural parser for the legacy markup dialect.
//!
//! Converts a blob mixing `<tag>...</tag>` pairs, bracketed `[Label: ...]`
//! sections, and trailing prose into a nested [`MarkupNode`] tree. The parse
//! is total: every input yields some node, never an error.
//!
//! Tag spans are located by an explicit left-to-right scan (open-tag regex
//! plus a case-insensitive search for the matching close tag) instead of a
//! backreference regex, so termination and duplicate-tag behavior are
//! explicit: each recursion works on a body strictly smaller than its
//! enclosing span, and duplicate tag names at one level overwrite (last
//! occurrence wins).

use lazy_static::lazy_static;
use regex::Regex;
use std::ops::Range;

use super::cleaner::clean_text;
use super::sections::{extract_sections, has_bracket_label, has_bracket_sections};
use crate::models::MarkupNode;

lazy_static! {
    /// Opening tag. Names may contain spaces and hyphens (`<scratchpad flow>`).
    static ref OPEN_TAG_RE: Regex = Regex::new(r"<(\w[\w \t-]*)>").unwrap();
    /// Horizontal rules and other dash separators left between tags.
    static ref DASH_RULE_RE: Regex = Regex::new(r"-{3,}").unwrap();
}

/// Minimum body size for a bracket-label body to count as a fill-in template
/// rather than an incidental bracket in prose.
const TEMPLATE_MIN_LEN: usize = 80;

/// One top-level `<tag>body</tag>` span inside a blob.
#[derive(Debug, Clone, PartialEq)]
struct TagSpan {
    name: String,
    body: Range<usize>,
    full: Range<usize>,
}

/// Find the first ASCII-case-insensitive occurrence of `needle` in
/// `haystack` at or after `from`, returning its byte offset.
fn find_ci(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || from + n.len() > h.len() {
        return None;
    }
    (from..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

/// Locate all top-level, non-overlapping tag spans, scanning left to right.
///
/// An opening tag without a matching close tag is skipped; scanning resumes
/// right after it, so the scan always terminates. Matching is first-close
/// wins: a nested same-name tag does not extend the span.
fn find_tag_spans(text: &str) -> Vec<TagSpan> {
    let mut spans = Vec::new();
    let mut pos = 0;

    while pos < text.len() {
        let Some(caps) = OPEN_TAG_RE.captures_at(text, pos) else {
            break;
        };
        let open = caps.get(0).unwrap();
        let name = caps.get(1).unwrap().as_str().trim().to_string();
        let close = format!("</{}>", name);

        match find_ci(text, &close, open.end()) {
            Some(close_start) => {
                spans.push(TagSpan {
                    name,
                    body: open.end()..close_start,
                    full: open.start()..close_start + close.len(),
                });
                pos = close_start + close.len();
            }
            None => {
                pos = open.end();
            }
        }
    }

    spans
}

/// Normalize a tag name into a mapping key: trim, lowercase, and join
/// internal spaces/hyphens with underscores.
fn normalize_tag(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .replace([' ', '\t', '-'], "_")
}

/// Prose preceding the first code fence, used as a template's usage preamble.
fn leading_usage(body: &str) -> Option<String> {
    let fence = body.find("```")?;
    let prose = clean_text(&body[..fence]);
    (!prose.is_empty()).then_some(prose)
}

/// Classify one tag body: nested markup, bracketed template, or plain leaf.
fn classify_body(body: &str) -> MarkupNode {
    if !find_tag_spans(body).is_empty() {
        return parse_markup(body);
    }

    if has_bracket_label(body) && body.len() >= TEMPLATE_MIN_LEN {
        return MarkupNode::Template {
            sections: extract_sections(body),
            usage: leading_usage(body),
            template: clean_text(body),
        };
    }

    MarkupNode::Leaf(clean_text(body))
}

/// Parse a legacy markup blob into a [`MarkupNode`] tree.
///
/// With no tag spans at all, the blob is either a standalone bracket-section
/// listing or a plain `{content: ...}` leaf. With spans, each span becomes a
/// mapping entry keyed by its normalized tag name; residual text outside the
/// spans (minus dash rules) lands under the reserved `instructions` key.
pub fn parse_markup(text: &str) -> MarkupNode {
    let spans = find_tag_spans(text);

    if spans.is_empty() {
        if has_bracket_sections(text) {
            return MarkupNode::Sections {
                sections: extract_sections(text),
                raw_format: clean_text(text),
            };
        }
        return MarkupNode::content_leaf(clean_text(text));
    }

    let mut entries: Vec<(String, MarkupNode)> = Vec::new();
    for span in &spans {
        let key = normalize_tag(&span.name);
        let body = text[span.body.clone()].trim();
        MarkupNode::upsert(&mut entries, key, classify_body(body));
    }

    // Prose outside the matched spans survives under `instructions`.
    let mut rest = String::new();
    let mut cursor = 0;
    for span in &spans {
        rest.push_str(&text[cursor..span.full.start]);
        cursor = span.full.end;
    }
    rest.push_str(&text[cursor..]);

    let rest = clean_text(&DASH_RULE_RE.replace_all(&rest, ""));
    if !rest.is_empty() {
        MarkupNode::upsert(&mut entries, "instructions".to_string(), MarkupNode::Leaf(rest));
    }

    MarkupNode::Map(entries)
}

/// True when a raw content blob looks like the legacy dialect at all:
/// at least one complete tag pair, or a bracket label followed by a colon.
pub fn looks_like_legacy(content: &str) -> bool {
    !find_tag_spans(content).is_empty() || has_bracket_label(content)
}
