//! One language's entries, parsed from a TOML file.
//!
//! An entry value is either a scalar (stored as a string), a bare array
//! (a sequential pool), or a table with `pool` and an optional `policy`
//! name. Keys are lowercased on insert and on lookup.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use langpack_core::{Language, LangpackError};
use langpack_engine::{PoolPolicy, StringPool};
use rand::RngCore;
use tracing::warn;

enum Entry {
    Text(String),
    Pool(Mutex<StringPool>),
}

/// The entries of a single language within a catalog.
pub struct LanguageFile {
    language: Language,
    entries: HashMap<String, Entry>,
}

impl LanguageFile {
    pub fn new(language: Language) -> Self {
        Self {
            language,
            entries: HashMap::new(),
        }
    }

    /// Load a language file from disk.
    pub fn load(path: &Path, language: Language) -> Result<Self, LangpackError> {
        let mut file = Self::new(language);
        file.append(path)?;
        Ok(file)
    }

    /// Merge another file's entries into this one. Later entries replace
    /// earlier ones under the same key.
    pub fn append(&mut self, path: &Path) -> Result<(), LangpackError> {
        let content = std::fs::read_to_string(path)?;
        let table: toml::Table = toml::from_str(&content)?;
        for (key, value) in table {
            let entry = parse_entry(&key, value);
            self.entries.insert(key.to_lowercase(), entry);
        }
        Ok(())
    }

    /// Register a scalar entry programmatically.
    pub fn add(&mut self, key: &str, value: impl Into<String>) {
        self.entries
            .insert(key.to_lowercase(), Entry::Text(value.into()));
    }

    /// Register a pool entry programmatically.
    pub fn add_pool(&mut self, key: &str, pool: StringPool) {
        self.entries
            .insert(key.to_lowercase(), Entry::Pool(Mutex::new(pool)));
    }

    /// Look up an entry. Pool-backed entries roll a candidate with `rng`.
    pub fn get(&self, key: &str, rng: &mut dyn RngCore) -> Option<String> {
        match self.entries.get(&key.to_lowercase())? {
            Entry::Text(value) => Some(value.clone()),
            Entry::Pool(pool) => {
                let mut pool = match pool.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                pool.roll(rng).map(str::to_string)
            }
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(&key.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn language(&self) -> Language {
        self.language
    }
}

/// Map one TOML value onto an entry.
fn parse_entry(key: &str, value: toml::Value) -> Entry {
    match value {
        toml::Value::Array(candidates) => {
            Entry::Pool(Mutex::new(build_pool(key, PoolPolicy::Sequential, candidates)))
        }
        toml::Value::Table(table) => {
            let policy = match table.get("policy").and_then(toml::Value::as_str) {
                Some(name) => PoolPolicy::parse(name).unwrap_or_else(|| {
                    warn!(
                        "[{key}] invalid pool policy '{name}', using {} instead",
                        PoolPolicy::Sequential.name()
                    );
                    PoolPolicy::Sequential
                }),
                None => PoolPolicy::Sequential,
            };
            let candidates = match table.get("pool").and_then(toml::Value::as_array) {
                Some(candidates) => candidates.clone(),
                None => {
                    warn!("[{key}] pool table has no 'pool' list");
                    Vec::new()
                }
            };
            Entry::Pool(Mutex::new(build_pool(key, policy, candidates)))
        }
        scalar => Entry::Text(value_to_string(&scalar)),
    }
}

fn build_pool(key: &str, policy: PoolPolicy, candidates: Vec<toml::Value>) -> StringPool {
    let mut pool = StringPool::new(policy);
    if candidates.is_empty() {
        warn!("[{key}] pool is empty");
    }
    for candidate in &candidates {
        pool.add(value_to_string(candidate));
    }
    pool
}

/// Render any TOML value as entry text. Nested arrays join with newlines,
/// one element per chat line.
fn value_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(n) => n.to_string(),
        toml::Value::Float(n) => n.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(values) => values
            .iter()
            .map(value_to_string)
            .collect::<Vec<_>>()
            .join("\n"),
        toml::Value::Table(table) => toml::Value::Table(table.clone()).to_string(),
    }
}
