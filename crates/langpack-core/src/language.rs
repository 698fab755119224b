use serde::{Deserialize, Serialize};

/// Supported languages for catalog lookups.
///
/// Language files are named `{package}_{abbreviation}.toml`, e.g.
/// `messages_en.toml`. English is the default and the fallback for keys
/// missing from other languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Spanish,
    Portuguese,
    French,
    German,
    Italian,
    Dutch,
    Russian,
}

impl Language {
    /// All languages, English first (lookup and fallback order).
    pub const ALL: [Language; 8] = [
        Language::English,
        Language::Spanish,
        Language::Portuguese,
        Language::French,
        Language::German,
        Language::Italian,
        Language::Dutch,
        Language::Russian,
    ];

    /// The file-name abbreviation for this language.
    pub fn abbreviation(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::Portuguese => "pt",
            Language::French => "fr",
            Language::German => "de",
            Language::Italian => "it",
            Language::Dutch => "nl",
            Language::Russian => "ru",
        }
    }

    /// Look up a language by its file-name abbreviation, case-insensitively.
    pub fn from_abbreviation(abbrev: &str) -> Option<Self> {
        let abbrev = abbrev.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|lang| lang.abbreviation() == abbrev)
    }

    /// Human-readable name for display (e.g. in `status`).
    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Spanish",
            Language::Portuguese => "Portuguese",
            Language::French => "French",
            Language::German => "German",
            Language::Italian => "Italian",
            Language::Dutch => "Dutch",
            Language::Russian => "Russian",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_abbreviation_round_trip() {
        for lang in Language::ALL {
            assert_eq!(Language::from_abbreviation(lang.abbreviation()), Some(lang));
        }
    }

    #[test]
    fn test_from_abbreviation_case_insensitive() {
        assert_eq!(Language::from_abbreviation("EN"), Some(Language::English));
        assert_eq!(Language::from_abbreviation(" Pt "), Some(Language::Portuguese));
    }

    #[test]
    fn test_from_abbreviation_unknown() {
        assert_eq!(Language::from_abbreviation("xx"), None);
        assert_eq!(Language::from_abbreviation(""), None);
    }

    #[test]
    fn test_default_is_english() {
        assert_eq!(Language::default(), Language::English);
    }
}
