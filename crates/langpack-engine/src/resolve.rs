//! Recursive `{{placeholder}}` expansion.
//!
//! A placeholder is either a plain key or a conditional directive
//! (`{{if: condition: thenKey}}` / `{{if: condition: thenKey: elseKey}}`).
//! Keys resolve against caller fields first, then the backing store; a key
//! nobody answers for is echoed verbatim so missing data degrades visibly
//! instead of failing.

use std::collections::{HashMap, HashSet};

use langpack_core::{Field, Language};
use tracing::warn;

use crate::condition;
use crate::source::TemplateSource;

/// Expand every `{{...}}` placeholder in `template`.
///
/// Results are memoized per call: a key referenced twice yields the same
/// text both times, even when the store backs it with a rotating pool.
pub fn expand(
    template: &str,
    source: &dyn TemplateSource,
    language: Language,
    fields: &[Field],
) -> String {
    Expansion::new(source, language, fields).run(template)
}

/// State for one top-level expansion: the memo cache plus the set of keys
/// currently being resolved (the recursion guard for cyclic key graphs).
pub(crate) struct Expansion<'a> {
    source: &'a dyn TemplateSource,
    language: Language,
    pub(crate) fields: &'a [Field],
    cache: HashMap<String, String>,
    in_flight: HashSet<String>,
}

impl<'a> Expansion<'a> {
    pub(crate) fn new(
        source: &'a dyn TemplateSource,
        language: Language,
        fields: &'a [Field],
    ) -> Self {
        Self {
            source,
            language,
            fields,
            cache: HashMap::new(),
            in_flight: HashSet::new(),
        }
    }

    /// One left-to-right scan. `{{` opens a placeholder, `}}` closes it;
    /// everything outside passes through unchanged.
    fn run(&mut self, template: &str) -> String {
        let chars: Vec<char> = template.chars().collect();
        let mut out = String::with_capacity(template.len());
        let mut key = String::new();
        let mut in_placeholder = false;
        let mut index = 0;
        while index < chars.len() {
            let current = chars[index];
            let next = chars.get(index + 1).copied();
            if in_placeholder {
                if current == '}' && next == Some('}') {
                    in_placeholder = false;
                    index += 1;
                    let trimmed = key.trim().to_string();
                    self.close_placeholder(&trimmed, &mut out);
                    key.clear();
                } else {
                    key.push(current);
                }
            } else if current == '{' && next == Some('{') {
                in_placeholder = true;
                index += 1;
                key.clear();
            } else {
                out.push(current);
            }
            index += 1;
        }
        out
    }

    /// Handle one closed placeholder: conditional rewriting, then key
    /// resolution, then output (value or literal-key fallback).
    fn close_placeholder(&mut self, key: &str, out: &mut String) {
        let mut effective = key;
        if key.starts_with("if") {
            let parts: Vec<&str> = key.splitn(4, ':').collect();
            if parts.len() < 3 {
                return;
            }
            // Unknown condition: the whole placeholder is skipped.
            let Some(result) = condition::evaluate(parts[1], self) else {
                return;
            };
            if parts.len() == 4 {
                effective = if result { parts[2] } else { parts[3] };
            } else if result {
                effective = parts[2];
            } else {
                return;
            }
        }
        match self.resolve_key(effective) {
            Some(value) => out.push_str(&value),
            None => out.push_str(effective),
        }
    }

    /// Resolve a key: memo cache, then fields, then the store. Hits are
    /// memoized; `None` means nobody answered.
    fn resolve_key(&mut self, key: &str) -> Option<String> {
        if let Some(hit) = self.cache.get(key) {
            return Some(hit.clone());
        }
        for field in self.fields {
            if field.is_key(key) {
                if let Some(text) = field.value().as_text() {
                    self.cache.insert(key.to_string(), text.clone());
                    return Some(text);
                }
                // A field with no value cannot render; keep looking.
            }
        }
        let value = self.lookup_store(key)?;
        self.cache.insert(key.to_string(), value.clone());
        Some(value)
    }

    /// Fetch a key's template from the store and expand it in place.
    /// Uncached — callers decide whether to memoize.
    pub(crate) fn lookup_store(&mut self, key: &str) -> Option<String> {
        if self.in_flight.contains(key) {
            warn!("placeholder cycle detected at key '{key}', leaving it unresolved");
            return None;
        }
        let raw = self.source.raw(key, self.language)?;
        self.in_flight.insert(key.to_string());
        let expanded = self.run(&raw);
        self.in_flight.remove(key);
        Some(expanded)
    }
}
