pub mod announce;
pub mod format;
