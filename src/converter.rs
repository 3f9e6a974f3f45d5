//! Document conversion driver.
//!
//! Per-document orchestration for turning a legacy `framework.content` blob
//! into a structured tree. The driver operates on a fully round-tripped
//! in-memory YAML tree and re-serializes the whole document; it never patches
//! serialized text. The original blob is always kept verbatim under
//! `framework.legacy_content`.

use anyhow::Context;
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::parser::{looks_like_legacy, parse_markup};
use crate::Result;

/// Outcome of a conversion attempt on one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvertOutcome {
    /// Structure was built and the document rewritten.
    Converted,
    /// Document already carries `framework.structure`; re-runs are no-ops.
    AlreadyStructured,
    /// No `framework.content` string to convert (or no mapping shape at all).
    NotApplicable,
    /// Content is plain prose, not the legacy dialect. Left untouched.
    PlainContent,
}

impl ConvertOutcome {
    pub fn converted(self) -> bool {
        self == ConvertOutcome::Converted
    }
}

/// Convert a parsed document envelope in place.
///
/// Preconditions for conversion: a `framework` mapping with a `content`
/// string and no `structure` key. Documents missing that shape are skipped,
/// not errors — much of a live corpus legitimately lacks the legacy dialect.
/// On success, `structure` holds the parse tree, `legacy_content` the
/// original string verbatim, and `content` is removed (order preserved).
/// Every other `framework` field is left untouched.
pub fn convert_document(doc: &mut Value) -> ConvertOutcome {
    let Some(framework) = doc
        .as_mapping_mut()
        .and_then(|map| map.get_mut("framework"))
        .and_then(Value::as_mapping_mut)
    else {
        return ConvertOutcome::NotApplicable;
    };

    if framework.contains_key("structure") {
        return ConvertOutcome::AlreadyStructured;
    }

    let Some(content) = framework.get("content").and_then(Value::as_str) else {
        return ConvertOutcome::NotApplicable;
    };

    if !looks_like_legacy(content) {
        return ConvertOutcome::PlainContent;
    }

    let content = content.to_string();
    let structure = parse_markup(&content).to_value();

    framework.insert(Value::String("structure".to_string()), structure);
    framework.insert(
        Value::String("legacy_content".to_string()),
        Value::String(content),
    );
    // shift_remove keeps the remaining keys in their original order.
    framework.shift_remove("content");

    ConvertOutcome::Converted
}

/// Convert a single document file on disk.
///
/// Storage that cannot be parsed as YAML at all is a fatal error for this
/// document (reported by the caller; the batch continues). A top-level shape
/// other than a mapping is treated as not applicable.
pub fn convert_file(path: &Path) -> Result<ConvertOutcome> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let mut doc: Value = serde_yaml::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;

    if !doc.is_mapping() {
        return Ok(ConvertOutcome::NotApplicable);
    }

    let outcome = convert_document(&mut doc);
    if outcome.converted() {
        write_document(path, &doc)?;
    }

    Ok(outcome)
}

/// Serialize a document envelope back to its file, with the document start
/// marker the compliance grammar requires.
pub fn write_document(path: &Path, doc: &Value) -> Result<()> {
    let yaml = serde_yaml::to_string(doc)
        .with_context(|| format!("Failed to serialize {}", path.display()))?;
    std::fs::write(path, format!("---\n{}", yaml))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Helper for tests and callers that need the framework mapping.
pub fn framework_of(doc: &Value) -> Option<&Mapping> {
    doc.get("framework").and_then(Value::as_mapping)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn envelope(content: &str) -> Value {
        let mut framework = Mapping::new();
        framework.insert(
            Value::String("content".to_string()),
            Value::String(content.to_string()),
        );
        let mut doc = Mapping::new();
        doc.insert(
            Value::String("name".to_string()),
            Value::String("test".to_string()),
        );
        doc.insert(
            Value::String("framework".to_string()),
            Value::Mapping(framework),
        );
        Value::Mapping(doc)
    }

    #[test]
    fn test_convert_builds_structure_and_keeps_original() {
        let content = "<role>Helper</role><rules>Be concise</rules>";
        let mut doc = envelope(content);

        assert_eq!(convert_document(&mut doc), ConvertOutcome::Converted);

        let framework = framework_of(&doc).unwrap();
        assert!(framework.get("content").is_none());
        assert_eq!(
            framework.get("legacy_content").and_then(Value::as_str),
            Some(content)
        );

        let structure = framework.get("structure").unwrap();
        assert_eq!(
            structure.get("role").and_then(Value::as_str),
            Some("Helper")
        );
        assert_eq!(
            structure.get("rules").and_then(Value::as_str),
            Some("Be concise")
        );
    }

    #[test]
    fn test_convert_preserves_sibling_framework_fields() {
        let mut doc = envelope("<role>Helper</role>");
        doc.as_mapping_mut()
            .unwrap()
            .get_mut("framework")
            .unwrap()
            .as_mapping_mut()
            .unwrap()
            .insert(
                Value::String("notes".to_string()),
                Value::String("keep me".to_string()),
            );

        assert_eq!(convert_document(&mut doc), ConvertOutcome::Converted);
        let framework = framework_of(&doc).unwrap();
        assert_eq!(
            framework.get("notes").and_then(Value::as_str),
            Some("keep me")
        );
    }

    #[test]
    fn test_already_structured_is_noop() {
        let mut doc = envelope("<role>Helper</role>");
        convert_document(&mut doc);
        let before = doc.clone();

        assert_eq!(convert_document(&mut doc), ConvertOutcome::AlreadyStructured);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_plain_prose_is_left_untouched() {
        let mut doc = envelope("Nothing but ordinary prose here.");
        let before = doc.clone();

        assert_eq!(convert_document(&mut doc), ConvertOutcome::PlainContent);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_missing_framework_is_not_applicable() {
        let mut doc: Value = serde_yaml::from_str("name: bare\n").unwrap();
        assert_eq!(convert_document(&mut doc), ConvertOutcome::NotApplicable);
    }

    #[test]
    fn test_non_mapping_is_not_applicable() {
        let mut doc = Value::String("just a scalar".to_string());
        assert_eq!(convert_document(&mut doc), ConvertOutcome::NotApplicable);
    }

    #[test]
    fn test_round_trip_preserves_legacy_content_bytes() {
        let content = "<role>Helper</role>\n\nTrailing prose with  spacing.";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.yml");

        write_document(&path, &envelope(content)).unwrap();
        assert_eq!(convert_file(&path).unwrap(), ConvertOutcome::Converted);

        let reread: Value =
            serde_yaml::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        let legacy = framework_of(&reread)
            .unwrap()
            .get("legacy_content")
            .and_then(Value::as_str)
            .unwrap();
        assert_eq!(legacy, content);
    }

    #[test]
    fn test_convert_file_reports_broken_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.yml");
        std::fs::write(&path, "name: test\n{invalid_yaml:").unwrap();

        assert!(convert_file(&path).is_err());
    }
}
