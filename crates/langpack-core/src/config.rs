use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LangpackError;
use crate::language::Language;

/// Top-level langpack configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Where language files live and how they are named.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Directory scanned for language files.
    #[serde(default = "default_directory")]
    pub directory: String,
    /// Package name — files are `{package}_{abbreviation}.toml`.
    #[serde(default = "default_package")]
    pub package: String,
    /// Fallback language for keys missing from the requested language.
    #[serde(default)]
    pub default_language: Language,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            package: default_package(),
            default_language: Language::default(),
        }
    }
}

// --- Default value functions ---

fn default_directory() -> String {
    "lang".to_string()
}
fn default_package() -> String {
    "messages".to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, LangpackError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| LangpackError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| LangpackError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
