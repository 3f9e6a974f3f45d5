use colored::Colorize;
use std::path::Path;

use crate::converter::{convert_file, ConvertOutcome};
use crate::corpus;
use crate::Result;

/// Convert every legacy-markup document under `dir` to structured form.
///
/// One bad document never aborts the batch: parse failures are reported by
/// name and counted, and the exit status reflects whether any occurred.
pub fn run(dir: &Path) -> Result<()> {
    let files = corpus::find_documents(dir);
    println!(
        "{}",
        format!("Converting {} documents under {}...", files.len(), dir.display()).cyan()
    );

    let mut converted = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for file in &files {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match convert_file(file) {
            Ok(ConvertOutcome::Converted) => {
                converted += 1;
                println!("   {} {}: converted", "✓".green(), name);
            }
            Ok(ConvertOutcome::AlreadyStructured) => {
                skipped += 1;
                println!("   {} {}: already structured", "→".bright_black(), name);
            }
            Ok(ConvertOutcome::PlainContent) | Ok(ConvertOutcome::NotApplicable) => {
                skipped += 1;
                println!("   {} {}: no legacy markup", "→".bright_black(), name);
            }
            Err(e) => {
                errors += 1;
                eprintln!("   {} {}: {:#}", "⚠".yellow(), name, e);
            }
        }
    }

    println!(
        "\n{}",
        format!(
            "✓ Converted {} documents ({} skipped, {} errors)",
            converted, skipped, errors
        )
        .green()
    );

    if errors > 0 {
        anyhow::bail!("{} document(s) failed to convert", errors);
    }
    Ok(())
}
