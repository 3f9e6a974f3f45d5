use colored::Colorize;
use std::path::Path;

use crate::corpus;
use crate::docsgen;
use crate::models::DocumentRecord;
use crate::Result;

/// Generate the markdown reference and comparison table for a corpus.
pub fn run(dir: &Path, output_dir: &Path) -> Result<()> {
    let mut records: Vec<DocumentRecord> = Vec::new();
    for file in corpus::find_documents(dir) {
        match corpus::load_record(&file) {
            Ok(record) => records.push(record),
            Err(e) => eprintln!("   {} {:#}", "⚠".yellow(), e),
        }
    }

    std::fs::create_dir_all(output_dir)?;

    let reference_path = output_dir.join("FRAMEWORK_REFERENCE.md");
    std::fs::write(&reference_path, docsgen::generate_reference(&records))?;
    println!("   {} Generated {}", "✓".green(), reference_path.display());

    let comparison_path = output_dir.join("FRAMEWORK_COMPARISON.md");
    std::fs::write(&comparison_path, docsgen::generate_comparison(&records))?;
    println!("   {} Generated {}", "✓".green(), comparison_path.display());

    println!(
        "\n{}",
        format!("✓ Documented {} frameworks", records.len()).green()
    );
    Ok(())
}
