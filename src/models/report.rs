use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::Result;

/// Counters accumulated over one remediation run.
///
/// Created fresh per run and persisted once as a JSON artifact; never carried
/// across runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemediationReport {
    pub generated_at: DateTime<Utc>,
    pub files_processed: usize,
    pub files_fixed: usize,
    pub doc_markers_added: usize,
    pub escapes_fixed: usize,
    pub values_quoted: usize,
    pub nbsp_removed: usize,
    /// Per-file failure messages. A failed file never aborts the batch.
    pub errors: Vec<String>,
}

impl Default for RemediationReport {
    fn default() -> Self {
        Self {
            generated_at: Utc::now(),
            files_processed: 0,
            files_fixed: 0,
            doc_markers_added: 0,
            escapes_fixed: 0,
            values_quoted: 0,
            nbsp_removed: 0,
            errors: Vec::new(),
        }
    }
}

impl RemediationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when any per-file failure was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Percentage of files processed without error.
    pub fn success_rate(&self) -> f64 {
        let processed = self.files_processed.max(1) as f64;
        (self.files_processed.saturating_sub(self.errors.len()) as f64) / processed * 100.0
    }

    /// Persist the report as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_rate_with_no_files() {
        let report = RemediationReport::new();
        assert_eq!(report.success_rate(), 0.0);
    }

    #[test]
    fn test_success_rate_counts_errors() {
        let mut report = RemediationReport::new();
        report.files_processed = 4;
        report.errors.push("broken.yml: unreadable".to_string());
        assert_eq!(report.success_rate(), 75.0);
    }

    #[test]
    fn test_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("docs/remediation-report.json");

        let mut report = RemediationReport::new();
        report.files_processed = 2;
        report.files_fixed = 1;
        report.save(&path).unwrap();

        let loaded: RemediationReport =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(loaded.files_processed, 2);
        assert_eq!(loaded.files_fixed, 1);
    }
}
