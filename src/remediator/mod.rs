//! Compliance remediation pipeline.
//!
//! Applies an ordered sequence of idempotent text fixers to raw document
//! files and accumulates per-fixer statistics into a
//! [`RemediationReport`]. Applying the full pipeline twice yields the same
//! text as applying it once; a fixed file is never re-damaged on re-runs.

pub mod fixers;

use colored::Colorize;
use std::path::Path;

use crate::corpus;
use crate::models::RemediationReport;
use crate::Result;

/// Driver that walks a corpus and remediates each file in place.
pub struct Remediator {
    verbose: bool,
    pub report: RemediationReport,
}

impl Remediator {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            report: RemediationReport::new(),
        }
    }

    fn log(&self, message: &str) {
        if self.verbose {
            println!("{}", message);
        }
    }

    /// Run the full fixer pipeline over one text blob.
    ///
    /// Ordering is load-bearing: NBSP stripping must precede the marker and
    /// escape fixers, whose regexes a stray NBSP would break.
    pub fn remediate_text(&mut self, input: &str) -> String {
        let mut text = fixers::strip_nbsp(input);
        if text != input {
            self.report.nbsp_removed += 1;
        }

        let marked = fixers::ensure_doc_marker(&text);
        if marked != text {
            self.report.doc_markers_added += 1;
            text = marked;
        }

        let (converted, escapes) = fixers::unescape_to_block_literals(&text);
        if escapes > 0 {
            self.report.escapes_fixed += escapes;
            text = converted;
        }

        let (quoted, values) = fixers::quote_ambiguous_scalars(&text);
        if values > 0 {
            self.report.values_quoted += values;
            text = quoted;
        }

        text
    }

    /// Remediate one file in place. Returns true when the file was modified.
    ///
    /// The write happens only when something changed, and only for this file:
    /// a crash mid-batch leaves every already-written file in a fixed state.
    /// Failures are recorded in the report and never abort the batch.
    pub fn fix_file(&mut self, path: &Path) -> bool {
        self.log(&format!("Processing: {}", path.display()));
        self.report.files_processed += 1;

        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                let message = format!("Error processing {}: {}", path.display(), e);
                self.log(&format!("  {} {}", "⚠".yellow(), message));
                self.report.errors.push(message);
                return false;
            }
        };

        let fixed = self.remediate_text(&content);
        if fixed == content {
            self.log(&format!("  {} no changes needed", "→".bright_black()));
            return false;
        }

        if let Err(e) = std::fs::write(path, &fixed) {
            let message = format!("Error writing {}: {}", path.display(), e);
            self.log(&format!("  {} {}", "⚠".yellow(), message));
            self.report.errors.push(message);
            return false;
        }

        self.report.files_fixed += 1;
        self.log(&format!("  {} fixed", "✓".green()));
        true
    }

    /// Remediate every document under a directory, in sorted order.
    pub fn process_directory(&mut self, dir: &Path) -> Result<()> {
        let files = corpus::find_documents(dir);
        self.log(&format!(
            "Found {} document files under {}\n",
            files.len(),
            dir.display()
        ));

        for file in &files {
            self.fix_file(file);
        }

        Ok(())
    }

    /// Print the run summary in the same shape the report persists.
    pub fn print_summary(&self) {
        println!("\n{}", "Remediation Summary".bold());
        println!("  Files processed:  {}", self.report.files_processed);
        println!("  Files fixed:      {}", self.report.files_fixed);
        println!("  Markers added:    {}", self.report.doc_markers_added);
        println!("  Escapes fixed:    {}", self.report.escapes_fixed);
        println!("  Values quoted:    {}", self.report.values_quoted);
        println!("  NBSP stripped:    {}", self.report.nbsp_removed);

        if self.report.has_errors() {
            println!(
                "\n{} {} error(s):",
                "⚠".yellow(),
                self.report.errors.len()
            );
            for error in &self.report.errors {
                println!("  - {}", error);
            }
        }

        println!("\nSuccess rate: {:.1}%", self.report.success_rate());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_fixes_all_defects_in_order() {
        let input = "name:\u{00A0}X\nversion: 1.0\nframework:\n  content: \"a\\nb\"\n";
        let mut remediator = Remediator::new(false);
        let fixed = remediator.remediate_text(input);

        assert!(fixed.starts_with("---\n"));
        assert!(!fixed.contains('\u{00A0}'));
        assert!(fixed.contains("version: \"1.0\""));
        assert!(fixed.contains("content: |"));
        assert!(!fixed.contains("\\n"));

        assert_eq!(remediator.report.nbsp_removed, 1);
        assert_eq!(remediator.report.doc_markers_added, 1);
        assert_eq!(remediator.report.escapes_fixed, 1);
        assert_eq!(remediator.report.values_quoted, 1);
    }

    #[test]
    fn test_pipeline_is_globally_idempotent() {
        let inputs = [
            "name: X\nversion: 1.0\n",
            "framework:\n  content: \"line\\nline\"\n",
            "---\nalready: \"clean\"\n",
            "enabled: yes\n",
            "",
        ];

        for input in inputs {
            let mut first = Remediator::new(false);
            let once = first.remediate_text(input);

            let mut second = Remediator::new(false);
            let twice = second.remediate_text(&once);

            assert_eq!(once, twice, "pipeline not idempotent for {:?}", input);
            assert_eq!(second.report.doc_markers_added, 0);
            assert_eq!(second.report.escapes_fixed, 0);
            assert_eq!(second.report.values_quoted, 0);
        }
    }

    #[test]
    fn test_marker_scenario_leaves_remainder_intact() {
        let input = "name: X\nversion: \"2.0\"\n";
        let mut remediator = Remediator::new(false);
        let fixed = remediator.remediate_text(input);
        assert_eq!(fixed, format!("---\n{}", input));
    }

    #[test]
    fn test_unreadable_file_is_recorded_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.yml");

        let mut remediator = Remediator::new(false);
        assert!(!remediator.fix_file(&missing));
        assert_eq!(remediator.report.files_processed, 1);
        assert_eq!(remediator.report.errors.len(), 1);
    }

    #[test]
    fn test_clean_file_is_not_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clean.yml");
        std::fs::write(&path, "---\nname: X\nversion: \"1.0\"\n").unwrap();
        let before = std::fs::metadata(&path).unwrap().modified().unwrap();

        let mut remediator = Remediator::new(false);
        assert!(!remediator.fix_file(&path));
        assert_eq!(remediator.report.files_fixed, 0);

        let after = std::fs::metadata(&path).unwrap().modified().unwrap();
        assert_eq!(before, after);
    }
}
