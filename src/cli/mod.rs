pub mod convert;
pub mod docs;
pub mod fix_meta;
pub mod remediate;
pub mod validate;
