use langpack_core::Language;
use std::collections::HashMap;

/// The backing store the resolver pulls raw templates from.
///
/// Keys are matched case-insensitively by implementations. Pool-backed keys
/// roll a fresh candidate on each call, so `raw` takes `&self` but is not a
/// pure read.
pub trait TemplateSource {
    /// The raw (unexpanded) template bound to `key` in `language`, if any.
    fn raw(&self, key: &str, language: Language) -> Option<String>;
}

/// A flat, language-agnostic store. Useful for tests and for callers that
/// keep their strings in memory; keys are stored lowercased.
impl TemplateSource for HashMap<String, String> {
    fn raw(&self, key: &str, _language: Language) -> Option<String> {
        self.get(&key.to_lowercase()).cloned()
    }
}
