//! # langpack-core
//!
//! Core types, configuration, and error handling for the langpack
//! localization engine.

pub mod config;
pub mod error;
pub mod field;
pub mod language;

pub use error::LangpackError;
pub use field::{Field, FieldValue};
pub use language::Language;
