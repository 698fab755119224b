//! The language catalog: every language file for one package, plus the
//! lookup and expansion entry points callers use.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

use langpack_core::config::CatalogConfig;
use langpack_core::{Field, Language, LangpackError};
use langpack_engine::{expand, segment, Segment, TemplateSource};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use crate::file::LanguageFile;

/// Per-language key/value store for one package, loaded from
/// `{package}_{abbreviation}.toml` files in a directory.
pub struct LanguageCatalog {
    directory: PathBuf,
    package: String,
    default_language: Language,
    files: HashMap<Language, LanguageFile>,
    rng: Mutex<StdRng>,
}

impl LanguageCatalog {
    /// Load the catalog named by `config`, scanning its directory for
    /// language files.
    pub fn load(config: &CatalogConfig) -> Result<Self, LangpackError> {
        let mut catalog = Self {
            directory: PathBuf::from(&config.directory),
            package: config.package.clone(),
            default_language: config.default_language,
            files: HashMap::new(),
            rng: Mutex::new(StdRng::from_entropy()),
        };
        let package = catalog.package.clone();
        catalog.scan(&package)?;
        Ok(catalog)
    }

    /// Merge another package's files from the same directory into this
    /// catalog. Overlapping keys take the appended package's value.
    pub fn append_package(&mut self, package: &str) -> Result<(), LangpackError> {
        self.scan(package)
    }

    fn scan(&mut self, package: &str) -> Result<(), LangpackError> {
        let prefix = format!("{}_", package.to_lowercase());
        let entries = std::fs::read_dir(&self.directory).map_err(|e| {
            LangpackError::Catalog(format!(
                "failed to read language directory {}: {e}",
                self.directory.display()
            ))
        })?;
        for dir_entry in entries {
            let dir_entry = dir_entry?;
            let name = dir_entry.file_name().to_string_lossy().to_lowercase();
            let Some(abbrev) = name
                .strip_prefix(&prefix)
                .and_then(|rest| rest.strip_suffix(".toml"))
            else {
                continue;
            };
            match Language::from_abbreviation(abbrev) {
                Some(language) => {
                    let file = self
                        .files
                        .entry(language)
                        .or_insert_with(|| LanguageFile::new(language));
                    file.append(&dir_entry.path())?;
                    info!("loaded {} entries for {language} from {name}", file.len());
                }
                None => {
                    warn!("skipping {name}: unknown language abbreviation '{abbrev}'");
                }
            }
        }
        Ok(())
    }

    /// Resolve a key to a fully expanded string.
    ///
    /// The raw template comes from the requested language (falling back to
    /// the default language), then every placeholder in it is expanded with
    /// `fields` taking precedence over further catalog lookups. `None` when
    /// the key exists in no consulted language.
    pub fn get(&self, key: &str, language: Language, fields: &[Field]) -> Option<String> {
        let raw = self.raw(key, language)?;
        Some(expand(&raw, self, language, fields))
    }

    /// Resolve a key in any language: the default language first, then the
    /// rest in declaration order.
    pub fn get_any(&self, key: &str, fields: &[Field]) -> Option<String> {
        if let Some(value) = self.get(key, self.default_language, fields) {
            return Some(value);
        }
        Language::ALL
            .into_iter()
            .filter(|lang| *lang != self.default_language)
            .find_map(|lang| self.get(key, lang, fields))
    }

    /// Resolve a key and split the result into chat lines.
    pub fn get_lines(
        &self,
        key: &str,
        language: Language,
        fields: &[Field],
    ) -> Option<Vec<String>> {
        self.get(key, language, fields).map(|value| lines(&value))
    }

    /// Resolve a key and decompose the result into rich-text segments.
    /// `Ok(None)` when the key is missing; `Err` on malformed markup.
    pub fn get_segments(
        &self,
        key: &str,
        language: Language,
        fields: &[Field],
    ) -> Result<Option<Vec<Segment>>, LangpackError> {
        match self.get(key, language, fields) {
            Some(value) => Ok(Some(segment(&value)?)),
            None => Ok(None),
        }
    }

    /// Languages with at least one loaded entry, in declaration order.
    pub fn languages(&self) -> Vec<Language> {
        Language::ALL
            .into_iter()
            .filter(|lang| self.files.contains_key(lang))
            .collect()
    }

    pub fn entry_count(&self, language: Language) -> usize {
        self.files.get(&language).map(LanguageFile::len).unwrap_or(0)
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn directory(&self) -> &std::path::Path {
        &self.directory
    }

    pub fn default_language(&self) -> Language {
        self.default_language
    }

    #[cfg(test)]
    pub(crate) fn file_mut(&mut self, language: Language) -> &mut LanguageFile {
        self.files
            .entry(language)
            .or_insert_with(|| LanguageFile::new(language))
    }
}

impl TemplateSource for LanguageCatalog {
    /// Raw template lookup: the requested language's file first, then the
    /// default language's. Pool entries roll under the catalog's rng lock.
    fn raw(&self, key: &str, language: Language) -> Option<String> {
        let mut rng = match self.rng.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(file) = self.files.get(&language) {
            if let Some(value) = file.get(key, &mut *rng) {
                return Some(value);
            }
        }
        if language != self.default_language {
            if let Some(file) = self.files.get(&self.default_language) {
                return file.get(key, &mut *rng);
            }
        }
        None
    }
}

/// Split an expanded value into chat lines.
pub fn lines(value: &str) -> Vec<String> {
    value.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use langpack_engine::{PoolPolicy, SegmentAction, StringPool};

    fn temp_catalog_dir(name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = std::env::temp_dir().join(name);
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        for (file_name, content) in files {
            std::fs::write(dir.join(file_name), content).unwrap();
        }
        dir
    }

    fn config_for(dir: &std::path::Path, package: &str) -> CatalogConfig {
        CatalogConfig {
            directory: dir.to_string_lossy().into_owned(),
            package: package.to_string(),
            default_language: Language::English,
        }
    }

    #[test]
    fn test_load_scans_package_files() {
        let dir = temp_catalog_dir(
            "__langpack_test_scan__",
            &[
                ("messages_en.toml", r#"greeting = "Hello""#),
                ("messages_es.toml", r#"greeting = "Hola""#),
                ("messages_xx.toml", r#"greeting = "???""#),
                ("other_en.toml", r#"greeting = "ignored""#),
                ("notes.txt", "not a language file"),
            ],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        assert_eq!(catalog.languages(), vec![Language::English, Language::Spanish]);
        assert_eq!(
            catalog.get("greeting", Language::Spanish, &[]).as_deref(),
            Some("Hola")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let cfg = config_for(std::path::Path::new("/nonexistent/langpack"), "messages");
        assert!(LanguageCatalog::load(&cfg).is_err());
    }

    #[test]
    fn test_default_language_fallback() {
        let dir = temp_catalog_dir(
            "__langpack_test_fallback__",
            &[
                ("messages_en.toml", "greeting = \"Hello\"\nfarewell = \"Bye\""),
                ("messages_es.toml", r#"greeting = "Hola""#),
            ],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        // Key missing from Spanish falls back to English.
        assert_eq!(
            catalog.get("farewell", Language::Spanish, &[]).as_deref(),
            Some("Bye")
        );
        // Key missing everywhere stays missing.
        assert_eq!(catalog.get("missing", Language::Spanish, &[]), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        let dir = temp_catalog_dir(
            "__langpack_test_case__",
            &[("messages_en.toml", r#"Greeting = "Hello""#)],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        assert_eq!(
            catalog.get("GREETING", Language::English, &[]).as_deref(),
            Some("Hello")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_expands_placeholders_and_fields() {
        let dir = temp_catalog_dir(
            "__langpack_test_expand__",
            &[(
                "messages_en.toml",
                r#"
                welcome = "Welcome {{player}} to {{server}}!"
                server = "Skyblock"
            "#,
            )],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        let fields = [Field::new("player", "Jab")];
        assert_eq!(
            catalog.get("welcome", Language::English, &fields).as_deref(),
            Some("Welcome Jab to Skyblock!")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_pool_rolls_once_per_call_for_repeated_key() {
        let mut catalog = LanguageCatalog {
            directory: PathBuf::new(),
            package: "test".into(),
            default_language: Language::English,
            files: HashMap::new(),
            rng: Mutex::new(StdRng::seed_from_u64(1)),
        };
        let mut pool = StringPool::new(PoolPolicy::Sequential);
        pool.add("first");
        pool.add("second");
        let file = catalog.file_mut(Language::English);
        file.add_pool("motd", pool);
        file.add("twice", "{{motd}} / {{motd}}");

        // Within one resolution the memo cache pins a single candidate.
        assert_eq!(
            catalog.get("twice", Language::English, &[]).as_deref(),
            Some("first / first")
        );
        // The next resolution rolls the pool onward.
        assert_eq!(
            catalog.get("twice", Language::English, &[]).as_deref(),
            Some("second / second")
        );
    }

    #[test]
    fn test_append_package_merges_and_overrides() {
        let dir = temp_catalog_dir(
            "__langpack_test_append__",
            &[
                ("messages_en.toml", "a = \"base\"\nb = \"keep\""),
                ("extra_en.toml", r#"a = "patched""#),
                ("extra_fr.toml", r#"c = "nouveau""#),
            ],
        );
        let mut catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        catalog.append_package("extra").unwrap();
        assert_eq!(
            catalog.get("a", Language::English, &[]).as_deref(),
            Some("patched")
        );
        assert_eq!(
            catalog.get("b", Language::English, &[]).as_deref(),
            Some("keep")
        );
        // The appended package introduced a language of its own.
        assert_eq!(
            catalog.get("c", Language::French, &[]).as_deref(),
            Some("nouveau")
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_any_searches_other_languages() {
        let dir = temp_catalog_dir(
            "__langpack_test_any__",
            &[
                ("messages_en.toml", r#"a = "english only""#),
                ("messages_ru.toml", r#"b = "russian only""#),
            ],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        assert_eq!(catalog.get_any("a", &[]).as_deref(), Some("english only"));
        assert_eq!(catalog.get_any("b", &[]).as_deref(), Some("russian only"));
        assert_eq!(catalog.get_any("c", &[]), None);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_lines_splits_on_newlines() {
        let dir = temp_catalog_dir(
            "__langpack_test_lines__",
            &[("messages_en.toml", r#"rules = ["no griefing", "be kind"]"#)],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        // A bare array is a pool; each roll yields one candidate.
        assert_eq!(
            catalog.get_lines("rules", Language::English, &[]).unwrap(),
            vec!["no griefing"]
        );
        assert_eq!(
            catalog.get_lines("rules", Language::English, &[]).unwrap(),
            vec!["be kind"]
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_get_segments() {
        let dir = temp_catalog_dir(
            "__langpack_test_segments__",
            &[(
                "messages_en.toml",
                r#"prompt = "Ready? [@command: /start: begin]""#,
            )],
        );
        let catalog = LanguageCatalog::load(&config_for(&dir, "messages")).unwrap();
        let segments = catalog
            .get_segments("prompt", Language::English, &[])
            .unwrap()
            .unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].text, "Ready? ");
        assert_eq!(
            segments[1].action,
            Some(SegmentAction::RunCommand {
                command: "/start".into()
            })
        );
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_lines_helper() {
        assert_eq!(lines("a\nb"), vec!["a", "b"]);
        assert_eq!(lines("solo"), vec!["solo"]);
    }
}
