pub mod cleaner;
pub mod markup;
pub mod sections;

pub use cleaner::clean_text;
pub use markup::{looks_like_legacy, parse_markup};
pub use sections::extract_sections;
