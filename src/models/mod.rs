pub mod document;
pub mod node;
pub mod report;

pub use document::{Documentation, DocumentRecord};
pub use node::MarkupNode;
pub use report::RemediationReport;
