use thiserror::Error;

/// Top-level error type for langpack.
#[derive(Debug, Error)]
pub enum LangpackError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Catalog loading or lookup error.
    #[error("catalog error: {0}")]
    Catalog(String),

    /// Malformed rich-text markup in source data.
    #[error("markup error: {0}")]
    Markup(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parse error.
    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
