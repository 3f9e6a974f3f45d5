//! Markdown rendering of corpus summaries.
//!
//! Consumes document records and emits two human-readable artifacts: a
//! category-grouped reference guide and a comparison table.

use chrono::Utc;
use std::collections::BTreeMap;

use crate::models::DocumentRecord;

/// Render the detailed reference guide, grouped by category and sorted by
/// name within each group.
pub fn generate_reference(records: &[DocumentRecord]) -> String {
    let mut categories: BTreeMap<&str, Vec<&DocumentRecord>> = BTreeMap::new();
    for record in records {
        categories
            .entry(record.category.as_str())
            .or_default()
            .push(record);
    }
    for group in categories.values_mut() {
        group.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let mut md = String::new();
    md.push_str("# Framework Quick Reference\n\n");
    md.push_str(&format!(
        "_This document was auto-generated on: {} UTC_\n\n---\n\n",
        Utc::now().format("%Y-%m-%d %H:%M:%S")
    ));

    md.push_str("## Table of Contents\n\n");
    for category in categories.keys() {
        md.push_str(&format!(
            "- [{}](#{})\n",
            title(category),
            category.to_lowercase().replace(' ', "-")
        ));
    }
    md.push_str("\n---\n\n");

    for (category, group) in &categories {
        md.push_str(&format!("## {}\n\n", title(category)));
        for record in group {
            let size = record
                .documentation
                .character_count
                .map(|n| n.to_string())
                .unwrap_or_else(|| "?".to_string());
            md.push_str(&format!("### {}\n\n", record.name));
            md.push_str(&format!(
                "**File**: `{}` | **Version**: `{}` | **Size**: ~{} chars\n\n",
                record.file, record.version, size
            ));
            md.push_str(&format!(
                "**Purpose**: {}\n\n",
                record
                    .documentation
                    .purpose
                    .as_deref()
                    .unwrap_or("No description available.")
            ));
            md.push_str(&format!(
                "**Use Cases**: {}\n\n---\n\n",
                record
                    .documentation
                    .use_case
                    .as_deref()
                    .unwrap_or("No use case specified.")
            ));
        }
    }

    md
}

/// Render the comparison table, sorted by category then name.
pub fn generate_comparison(records: &[DocumentRecord]) -> String {
    let mut sorted: Vec<&DocumentRecord> = records.iter().collect();
    sorted.sort_by(|a, b| (&a.category, &a.name).cmp(&(&b.category, &b.name)));

    let mut md = String::new();
    md.push_str("# Framework Comparison Table\n\n");
    md.push_str("| Framework | Category | Version | Size (chars) |\n");
    md.push_str("|:----------|:---------|:--------|:-------------|\n");

    for record in sorted {
        let size = record
            .documentation
            .character_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        md.push_str(&format!(
            "| {} | {} | `{}` | {} |\n",
            record.name,
            title(&record.category),
            record.version,
            size
        ));
    }

    md
}

fn title(text: &str) -> String {
    text.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Documentation;

    fn record(name: &str, category: &str, version: &str) -> DocumentRecord {
        DocumentRecord {
            name: name.to_string(),
            version: version.to_string(),
            category: category.to_string(),
            file: format!("{}.yml", name),
            documentation: Documentation {
                purpose: Some(format!("{} purpose", name)),
                use_case: None,
                character_count: Some(512),
            },
        }
    }

    #[test]
    fn test_reference_groups_by_category() {
        let records = vec![
            record("zeta", "personas", "1.0"),
            record("alpha", "core", "2.6"),
        ];
        let md = generate_reference(&records);

        let core_pos = md.find("## Core").unwrap();
        let personas_pos = md.find("## Personas").unwrap();
        assert!(core_pos < personas_pos);
        assert!(md.contains("**Version**: `2.6`"));
        assert!(md.contains("**Use Cases**: No use case specified."));
    }

    #[test]
    fn test_comparison_sorted_by_category_then_name() {
        let records = vec![
            record("beta", "core", "1.0"),
            record("alpha", "core", "1.0"),
            record("omega", "personas", "1.0"),
        ];
        let md = generate_comparison(&records);

        let alpha = md.find("| alpha |").unwrap();
        let beta = md.find("| beta |").unwrap();
        let omega = md.find("| omega |").unwrap();
        assert!(alpha < beta && beta < omega);
    }

    #[test]
    fn test_timestamp_is_iso_formatted() {
        let md = generate_reference(&[]);
        // YYYY-MM-DD HH:MM:SS, never a raw epoch float
        let re = regex::Regex::new(r"auto-generated on: \d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2} UTC")
            .unwrap();
        assert!(re.is_match(&md));
    }
}
