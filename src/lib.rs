// Framectl - Framework Corpus Normalizer
// Converts legacy markup embedded in YAML framework files into structured
// trees and remediates serialization compliance across a corpus.

pub mod cli;
pub mod converter;
pub mod corpus;
pub mod docsgen;
pub mod metadata;
pub mod models;
pub mod parser;
pub mod remediator;

pub use anyhow::{Context, Result};
pub use colored::Colorize;

// Re-export commonly used types
pub use models::{DocumentRecord, MarkupNode, RemediationReport};
pub use remediator::Remediator;
