//! Individual compliance fixers.
//!
//! Each fixer is a pure `text -> text` transformation and individually
//! idempotent: its precondition is exactly "the defect is present", so a
//! second pass finds nothing to do. The remediator composes them in a fixed
//! order (see [`super::Remediator`]).
//!
//! These fixers deliberately work on the serialized text rather than a
//! parsed tree so that human formatting elsewhere in the file survives.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

/// Three-character document start marker required by the grammar.
pub const DOC_START_MARKER: &str = "---";

/// Bare tokens a lenient parser would coerce to boolean or null.
pub const AMBIGUOUS_SCALARS: &[&str] = &[
    "YES", "Yes", "yes", "NO", "No", "no", "ON", "On", "on", "OFF", "Off", "off", "TRUE", "True",
    "true", "FALSE", "False", "false", "Y", "y", "N", "n", "~", "null", "NULL", "Null",
];

lazy_static! {
    /// Whole-line `key: "value"` assignment with a double-quoted scalar.
    static ref QUOTED_ASSIGNMENT_RE: Regex =
        Regex::new(r#"(?m)^([ \t]*)([A-Za-z0-9_]+):[ \t]*"((?:[^"\n\\]|\\.)*)"[ \t]*$"#).unwrap();
    /// Plain `key: value` line.
    static ref PLAIN_ASSIGNMENT_RE: Regex =
        Regex::new(r"^([ \t]*)([A-Za-z0-9_-]+):[ \t]+(\S.*?)[ \t]*$").unwrap();
    /// `key: |` / `key: >` block scalar opener (with optional chomping).
    static ref BLOCK_OPEN_RE: Regex =
        Regex::new(r"^[ \t]*[A-Za-z0-9_-]+:[ \t]*[|>][+-]?[ \t]*$").unwrap();
    /// Version-like scalar: digits joined by dots.
    static ref NUMERIC_VERSION_RE: Regex = Regex::new(r"^\d+(\.\d+)*$").unwrap();
}

/// Replace every non-breaking space (U+00A0) with an ordinary space.
///
/// Must run before the other fixers: a stray NBSP inside a key or indent
/// breaks the assignment regexes they rely on.
pub fn strip_nbsp(text: &str) -> String {
    text.replace('\u{00A0}', " ")
}

/// Prepend the document start marker when the trimmed text lacks one.
/// The remainder of the text is left byte-identical; an existing marker is
/// never duplicated.
pub fn ensure_doc_marker(text: &str) -> String {
    if text.trim_start().starts_with(DOC_START_MARKER) {
        return text.to_string();
    }
    format!("{}\n{}", DOC_START_MARKER, text)
}

/// Convert `key: "value"` assignments whose value carries `\n`/`\t` escapes
/// into literal block scalars, unescaping the value and reindenting it one
/// level deeper. Quoted values without escape sequences and fields already
/// stored as block literals are left alone. Returns the rewritten text and
/// the number of assignments converted.
pub fn unescape_to_block_literals(text: &str) -> (String, usize) {
    let mut fixed = 0usize;

    let result = QUOTED_ASSIGNMENT_RE.replace_all(text, |caps: &Captures| {
        let indent = &caps[1];
        let key = &caps[2];
        let value = &caps[3];

        if !value.contains("\\n") && !value.contains("\\t") {
            return caps[0].to_string();
        }

        fixed += 1;
        let mut lines = vec![format!("{}{}: |", indent, key)];
        for line in unescape(value).split('\n') {
            if line.is_empty() {
                lines.push(String::new());
            } else {
                lines.push(format!("{}  {}", indent, line));
            }
        }
        lines.join("\n")
    });

    (result.into_owned(), fixed)
}

/// Unescape the control sequences a double-quoted scalar may carry.
/// Unknown escapes are kept verbatim rather than guessed at.
fn unescape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Double-quote bare scalars a YAML 1.1 parser would coerce away from
/// string: the ambiguous boolean/null tokens anywhere, and numeric-looking
/// values of `version` keys. Lines inside block scalars are skipped so
/// literal content is never rewritten. Returns the rewritten text and the
/// number of values quoted.
pub fn quote_ambiguous_scalars(text: &str) -> (String, usize) {
    let mut quoted = 0usize;
    let mut out: Vec<String> = Vec::new();
    // Indent of the key line that opened the current block scalar, if any.
    let mut block_indent: Option<usize> = None;

    for line in text.lines() {
        if let Some(opened_at) = block_indent {
            let indent = line.len() - line.trim_start().len();
            if line.trim().is_empty() || indent > opened_at {
                out.push(line.to_string());
                continue;
            }
            block_indent = None;
        }

        if BLOCK_OPEN_RE.is_match(line) {
            block_indent = Some(line.len() - line.trim_start().len());
            out.push(line.to_string());
            continue;
        }

        let Some(caps) = PLAIN_ASSIGNMENT_RE.captures(line) else {
            out.push(line.to_string());
            continue;
        };

        let (indent, key, value) = (&caps[1], &caps[2], &caps[3]);
        if needs_quoting(key, value) {
            quoted += 1;
            out.push(format!("{}{}: \"{}\"", indent, key, value));
        } else {
            out.push(line.to_string());
        }
    }

    let mut result = out.join("\n");
    if text.ends_with('\n') {
        result.push('\n');
    }
    (result, quoted)
}

fn needs_quoting(key: &str, value: &str) -> bool {
    if value.starts_with('"') || value.starts_with('\'') {
        return false;
    }
    if AMBIGUOUS_SCALARS.contains(&value) {
        return true;
    }
    // Numeric quoting is gated to version fields so counts stay numbers.
    key == "version" && NUMERIC_VERSION_RE.is_match(value)
}
