use std::path::Path;

use crate::Remediator;
use crate::Result;

/// Remediate every document under `dir`, printing a summary and optionally
/// persisting the JSON report artifact.
pub fn run(dir: &Path, report_path: Option<&Path>, quiet: bool) -> Result<()> {
    let mut remediator = Remediator::new(!quiet);
    remediator.process_directory(dir)?;
    remediator.print_summary();

    if let Some(path) = report_path {
        remediator.report.save(path)?;
        println!("\nReport saved to {}", path.display());
    }

    if remediator.report.has_errors() {
        anyhow::bail!(
            "{} file(s) could not be remediated",
            remediator.report.errors.len()
        );
    }
    Ok(())
}
