//! Metadata catalog collaborator.
//!
//! Supplies a `{purpose, use_case, version}` template for a document
//! identifier. Modeled as an explicit, immutable lookup table passed in as
//! configuration; the parser and remediator cores never depend on it.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

use crate::Result;

/// Metadata triple applied to documents that are missing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataTemplate {
    pub purpose: String,
    pub use_case: String,
    pub version: String,
}

/// Immutable lookup table of document-stem patterns to metadata templates.
///
/// Lookup is first-match substring search over the file stem, so
/// `scratchpad-2.6-comet.yml` still matches a `scratchpad-2.6` entry.
#[derive(Debug, Clone, Default)]
pub struct MetadataCatalog {
    entries: Vec<(String, MetadataTemplate)>,
}

impl MetadataCatalog {
    /// Catalog shipped with the tool, covering well-known framework stems.
    pub fn builtin() -> Self {
        let entry = |key: &str, purpose: &str, use_case: &str, version: &str| {
            (
                key.to_string(),
                MetadataTemplate {
                    purpose: purpose.to_string(),
                    use_case: use_case.to_string(),
                    version: version.to_string(),
                },
            )
        };

        Self {
            entries: vec![
                entry(
                    "scratchpad-2.5",
                    "Structured reasoning framework with comprehensive cognitive operations",
                    "Complex reasoning tasks requiring detailed analysis and synthesis",
                    "2.5",
                ),
                entry(
                    "scratchpad-lite",
                    "Lightweight reasoning framework for character-constrained environments",
                    "Quick tasks on character-limited platforms",
                    "1.0",
                ),
                entry(
                    "deep-researcher",
                    "Systematic research framework for thorough investigation and source analysis",
                    "Academic research, literature reviews, comprehensive topic exploration",
                    "1.0",
                ),
                entry(
                    "planning-13",
                    "Structured planning framework with a 13-step systematic approach",
                    "Project planning, strategic initiatives, complex task decomposition",
                    "1.3",
                ),
                entry(
                    "saganpad",
                    "Science communication framework in an accessible explanatory style",
                    "Explaining complex scientific concepts to general audiences",
                    "1.0",
                ),
            ],
        }
    }

    /// Load a catalog from a YAML mapping of stem pattern to template.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        let parsed: Vec<(String, MetadataTemplate)> =
            serde_yaml::from_str::<std::collections::BTreeMap<String, MetadataTemplate>>(&raw)
                .with_context(|| format!("Failed to parse catalog {}", path.display()))?
                .into_iter()
                .collect();
        Ok(Self { entries: parsed })
    }

    /// First catalog entry whose key occurs in the stem.
    pub fn lookup(&self, stem: &str) -> Option<&MetadataTemplate> {
        self.entries
            .iter()
            .find(|(key, _)| stem.contains(key.as_str()))
            .map(|(_, template)| template)
    }

    /// Resolve a template for a stem, falling back to generic metadata
    /// derived from the stem and category when nothing matches.
    pub fn resolve(&self, stem: &str, category: &str) -> MetadataTemplate {
        if let Some(template) = self.lookup(stem) {
            return template.clone();
        }
        MetadataTemplate {
            purpose: format!("{} framework for specialized reasoning", title_case(stem)),
            use_case: format!(
                "{} tasks requiring a structured cognitive approach",
                title_case(category)
            ),
            version: "1.0".to_string(),
        }
    }
}

fn title_case(text: &str) -> String {
    text.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Fill missing metadata on a document envelope. Only absent or blank fields
/// are written; anything an author already supplied stays as is. Returns
/// true when the document was changed.
pub fn apply_metadata(doc: &mut Value, template: &MetadataTemplate) -> bool {
    let Some(map) = doc.as_mapping_mut() else {
        return false;
    };
    let mut changed = false;

    let blank = |value: Option<&Value>| match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    };

    if blank(map.get("version")) {
        map.insert(
            Value::String("version".to_string()),
            Value::String(template.version.clone()),
        );
        changed = true;
    }

    if !map.contains_key("documentation") {
        map.insert(
            Value::String("documentation".to_string()),
            Value::Mapping(serde_yaml::Mapping::new()),
        );
    }
    let Some(doc_map) = map
        .get_mut("documentation")
        .and_then(Value::as_mapping_mut)
    else {
        return changed;
    };

    if blank(doc_map.get("purpose")) {
        doc_map.insert(
            Value::String("purpose".to_string()),
            Value::String(template.purpose.clone()),
        );
        changed = true;
    }
    if blank(doc_map.get("use_case")) {
        doc_map.insert(
            Value::String("use_case".to_string()),
            Value::String(template.use_case.clone()),
        );
        changed = true;
    }

    changed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_matches_substring() {
        let catalog = MetadataCatalog::builtin();
        let template = catalog.lookup("scratchpad-2.5-comet").unwrap();
        assert_eq!(template.version, "2.5");
    }

    #[test]
    fn test_resolve_falls_back_to_generic() {
        let catalog = MetadataCatalog::builtin();
        let template = catalog.resolve("novel-critic", "purpose-built");
        assert!(template.purpose.starts_with("Novel Critic"));
        assert!(template.use_case.starts_with("Purpose Built"));
        assert_eq!(template.version, "1.0");
    }

    #[test]
    fn test_apply_fills_only_missing_fields() {
        let mut doc: Value = serde_yaml::from_str(
            "name: x\ndocumentation:\n  purpose: Existing purpose\n",
        )
        .unwrap();
        let template = MetadataCatalog::builtin().resolve("x", "core");

        assert!(apply_metadata(&mut doc, &template));
        let documentation = doc.get("documentation").unwrap();
        assert_eq!(
            documentation.get("purpose").and_then(Value::as_str),
            Some("Existing purpose")
        );
        assert!(documentation.get("use_case").is_some());
        assert_eq!(
            doc.get("version").and_then(Value::as_str),
            Some("1.0")
        );
    }

    #[test]
    fn test_apply_is_idempotent() {
        let mut doc: Value = serde_yaml::from_str("name: x\n").unwrap();
        let template = MetadataCatalog::builtin().resolve("x", "core");

        assert!(apply_metadata(&mut doc, &template));
        assert!(!apply_metadata(&mut doc, &template));
    }

    #[test]
    fn test_blank_version_is_replaced() {
        let mut doc: Value = serde_yaml::from_str("name: x\nversion: \"\"\n").unwrap();
        let template = MetadataCatalog::builtin().resolve("x", "core");

        assert!(apply_metadata(&mut doc, &template));
        assert_eq!(doc.get("version").and_then(Value::as_str), Some("1.0"));
    }
}
