//! Bracketed `[Label: ...]` section extraction.
//!
//! A small sub-dialect that appears both standalone (a whole blob made of
//! labeled sections) and inside tag bodies as a fill-in template.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `[Label: arbitrary non-bracket content]`
    static ref SECTION_RE: Regex =
        Regex::new(r"\[\s*([^\[\]:]+?)\s*:[^\[\]]*\]").unwrap();
    /// A bracket label followed by a colon, without requiring the closing
    /// bracket. Used to decide whether a blob is in the dialect at all.
    static ref LABEL_RE: Regex = Regex::new(r"\[\s*[^\[\]:]+\s*:").unwrap();
}

/// Extract section labels in order of first appearance, trimmed.
///
/// Text without any bracketed sections yields an empty list, never an error.
pub fn extract_sections(text: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for cap in SECTION_RE.captures_iter(text) {
        let label = cap[1].trim().to_string();
        if !labels.contains(&label) {
            labels.push(label);
        }
    }
    labels
}

/// True when the text contains a bracket label followed by a colon.
pub fn has_bracket_label(text: &str) -> bool {
    LABEL_RE.is_match(text)
}

/// True when the text carries the full section dialect: a bracket label
/// plus a closing bracket somewhere.
pub fn has_bracket_sections(text: &str) -> bool {
    has_bracket_label(text) && text.contains(']')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_ordered_labels() {
        let text = "[AttentionFocus: primary goal] [Rules: be terse]";
        assert_eq!(extract_sections(text), vec!["AttentionFocus", "Rules"]);
    }

    #[test]
    fn test_labels_are_trimmed() {
        let text = "[  RevisionQuery : restate the question ]";
        assert_eq!(extract_sections(text), vec!["RevisionQuery"]);
    }

    #[test]
    fn test_repeated_label_reported_once() {
        let text = "[Rules: one] middle [Rules: two]";
        assert_eq!(extract_sections(text), vec!["Rules"]);
    }

    #[test]
    fn test_plain_prose_yields_empty() {
        assert!(extract_sections("no sections here").is_empty());
        assert!(extract_sections("").is_empty());
    }

    #[test]
    fn test_multiline_section_bodies() {
        let text = "[TheoryOfMind: perspective one,\nperspective two]\n[Exploration: questions]";
        assert_eq!(extract_sections(text), vec!["TheoryOfMind", "Exploration"]);
    }

    #[test]
    fn test_bracket_detection() {
        assert!(has_bracket_sections("[Focus: goal]"));
        assert!(!has_bracket_sections("[just a citation]"));
        assert!(!has_bracket_sections("plain text"));
        assert!(has_bracket_label("[Focus: unclosed"));
    }
}
