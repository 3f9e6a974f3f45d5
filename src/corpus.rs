//! Corpus enumeration.
//!
//! Documents live one per file, grouped under category subdirectories. The
//! category is just the parent directory's name; the core treats it as an
//! opaque string.

use anyhow::Context;
use serde_yaml::Value;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::models::DocumentRecord;
use crate::Result;

/// Find every `.yml`/`.yaml` document under a directory, sorted by path so
/// batch runs are deterministic.
pub fn find_documents(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| {
            matches!(
                path.extension().and_then(|e| e.to_str()),
                Some("yml") | Some("yaml")
            )
        })
        .collect();
    files.sort();
    files
}

/// Category of a document: the name of its parent directory.
pub fn category_of(path: &Path) -> String {
    path.parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Parse a document file into its envelope value.
pub fn load_document(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_yaml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load a lenient summary record for one document.
pub fn load_record(path: &Path) -> Result<DocumentRecord> {
    let value = load_document(path)?;
    Ok(DocumentRecord::from_value(
        &value,
        path,
        &category_of(path),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_documents_filters_and_sorts() {
        let dir = tempfile::tempdir().unwrap();
        let core = dir.path().join("core");
        std::fs::create_dir_all(&core).unwrap();
        std::fs::write(core.join("b.yml"), "name: b\n").unwrap();
        std::fs::write(core.join("a.yaml"), "name: a\n").unwrap();
        std::fs::write(core.join("notes.txt"), "not yaml").unwrap();

        let files = find_documents(dir.path());
        assert_eq!(files.len(), 2);
        assert!(files[0].ends_with("core/a.yaml"));
        assert!(files[1].ends_with("core/b.yml"));
    }

    #[test]
    fn test_category_is_parent_directory() {
        let path = Path::new("frameworks/purpose-built/deep-researcher.yml");
        assert_eq!(category_of(path), "purpose-built");
    }

    #[test]
    fn test_load_record_uses_category() {
        let dir = tempfile::tempdir().unwrap();
        let personas = dir.path().join("personas");
        std::fs::create_dir_all(&personas).unwrap();
        let path = personas.join("saganpad.yml");
        std::fs::write(&path, "name: saganpad\nversion: \"1.0\"\n").unwrap();

        let record = load_record(&path).unwrap();
        assert_eq!(record.category, "personas");
        assert_eq!(record.name, "saganpad");
    }
}
