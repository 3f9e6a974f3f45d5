use colored::Colorize;
use std::path::Path;

use crate::converter::write_document;
use crate::corpus;
use crate::metadata::{apply_metadata, MetadataCatalog};
use crate::Result;

/// Fill missing `documentation.purpose`, `documentation.use_case`, and
/// `version` metadata from the catalog. Re-runs change nothing once every
/// field is populated.
pub fn run(dir: &Path, catalog_path: Option<&Path>) -> Result<()> {
    let catalog = match catalog_path {
        Some(path) => MetadataCatalog::from_file(path)?,
        None => MetadataCatalog::builtin(),
    };

    let mut updated = 0usize;
    let mut skipped = 0usize;
    let mut errors = 0usize;

    for file in corpus::find_documents(dir) {
        let name = file
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = file
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let mut doc = match corpus::load_document(&file) {
            Ok(doc) => doc,
            Err(e) => {
                errors += 1;
                eprintln!("   {} {}: {:#}", "⚠".yellow(), name, e);
                continue;
            }
        };

        let template = catalog.resolve(&stem, &corpus::category_of(&file));
        if apply_metadata(&mut doc, &template) {
            write_document(&file, &doc)?;
            updated += 1;
            println!("   {} {}: metadata added", "✓".green(), name);
        } else {
            skipped += 1;
            println!("   {} {}: already complete", "→".bright_black(), name);
        }
    }

    println!(
        "\n{}",
        format!("✓ Updated {} files ({} skipped)", updated, skipped).green()
    );

    if errors > 0 {
        anyhow::bail!("{} document(s) could not be read", errors);
    }
    Ok(())
}
