use colored::Colorize;
use serde_yaml::Value;
use std::path::Path;

use crate::corpus;
use crate::Result;

/// Parse-check every document under `dir` against the serialization grammar.
/// Prints one line per file; the exit status reflects any failure.
pub fn run(dir: &Path) -> Result<()> {
    let files = corpus::find_documents(dir);
    if files.is_empty() {
        anyhow::bail!("No document files found under {}", dir.display());
    }

    let mut failures = 0usize;
    for file in &files {
        match std::fs::read_to_string(file)
            .map_err(anyhow::Error::from)
            .and_then(|raw| serde_yaml::from_str::<Value>(&raw).map_err(anyhow::Error::from))
        {
            Ok(_) => println!("   {} {}", "[OK]".green(), file.display()),
            Err(e) => {
                failures += 1;
                eprintln!("   {} {}: {:#}", "[FAIL]".red(), file.display(), e);
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{} of {} files failed to parse", failures, files.len());
    }
    println!("\n{}", format!("✓ All {} files parse cleanly", files.len()).green());
    Ok(())
}
