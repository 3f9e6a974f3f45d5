use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::Path;

/// Optional documentation block carried by a framework document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Documentation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_case: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub character_count: Option<u64>,
}

/// A summarized view of one corpus document, consumed by the docs renderer.
///
/// Built leniently: missing fields fall back to the filename and the parent
/// directory so a half-migrated corpus can still be reported on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub name: String,
    pub version: String,
    pub category: String,
    pub file: String,
    #[serde(default)]
    pub documentation: Documentation,
}

impl DocumentRecord {
    /// Build a record from a parsed document envelope.
    ///
    /// `version` is stringified whatever its scalar type, since files that
    /// have not been remediated yet may still carry a numeric version.
    pub fn from_value(value: &Value, path: &Path, category: &str) -> Self {
        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        let name = value
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| stem.clone());

        let version = match value.get("version") {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "N/A".to_string(),
        };

        let documentation = value
            .get("documentation")
            .and_then(|doc| serde_yaml::from_value(doc.clone()).ok())
            .unwrap_or_default();

        DocumentRecord {
            name,
            version,
            category: category.to_string(),
            file,
            documentation,
        }
    }
}
