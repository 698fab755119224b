//! # langpack-catalog
//!
//! The backing store for the langpack engine: per-language key/value maps
//! loaded from `{package}_{abbreviation}.toml` files, with pool entries,
//! default-language fallback, and full placeholder expansion on lookup.

mod catalog;
mod file;

pub use catalog::{lines, LanguageCatalog};
pub use file::LanguageFile;
