//! Whitespace normalization for markup blobs.
//!
//! Pure and total: every input yields a cleaned string, and cleaning an
//! already-clean string changes nothing.

/// Normalize whitespace in a text blob.
///
/// - Replaces non-breaking spaces (U+00A0) with ordinary spaces
/// - Right-trims every line
/// - Collapses runs of two or more blank lines down to a single blank line
/// - Trims leading/trailing whitespace from the whole blob
pub fn clean_text(text: &str) -> String {
    let text = text.replace('\u{00A0}', " ");

    let mut lines: Vec<&str> = Vec::new();
    let mut blank_run = 0usize;

    for line in text.lines() {
        let trimmed = line.trim_end();
        if trimmed.is_empty() {
            blank_run += 1;
            if blank_run > 1 {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(trimmed);
    }

    lines.join("\n").trim().to_string()
}
