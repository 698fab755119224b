use clap::{Parser, Subcommand};
use langpack_catalog::LanguageCatalog;
use langpack_core::{config, Field, FieldValue, Language};
use langpack_engine::SegmentAction;

#[derive(Parser)]
#[command(
    name = "langpack",
    version,
    about = "Langpack — localization catalog preview and debugging"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a key to its fully expanded string.
    Resolve {
        /// The catalog key to resolve.
        key: String,
        /// Language abbreviation (e.g. "en", "es"). Defaults to the
        /// configured default language.
        #[arg(short, long)]
        lang: Option<String>,
        /// Field overrides as key=value. Values parse as JSON scalars
        /// (true, 3, "text"); anything unparseable is plain text.
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
    /// Resolve a key and print its rich-text segments.
    Segments {
        /// The catalog key to resolve.
        key: String,
        #[arg(short, long)]
        lang: Option<String>,
        #[arg(short, long = "field")]
        fields: Vec<String>,
    },
    /// Show loaded languages and entry counts.
    Status,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cfg = config::load(&cli.config)?;
    let catalog = LanguageCatalog::load(&cfg.catalog)?;

    match cli.command {
        Commands::Resolve { key, lang, fields } => {
            let language = parse_language(lang.as_deref(), catalog.default_language())?;
            let fields = parse_fields(&fields)?;
            match catalog.get(&key, language, &fields) {
                Some(value) => println!("{value}"),
                None => anyhow::bail!("key '{key}' not found for {language} or its fallback"),
            }
        }
        Commands::Segments { key, lang, fields } => {
            let language = parse_language(lang.as_deref(), catalog.default_language())?;
            let fields = parse_fields(&fields)?;
            match catalog.get_segments(&key, language, &fields)? {
                Some(segments) => {
                    for segment in segments {
                        match segment.action {
                            Some(SegmentAction::RunCommand { command }) => {
                                println!("{:?}  [click -> run {command}]", segment.text);
                            }
                            Some(SegmentAction::HoverText { text }) => {
                                println!("{:?}  [hover -> {text}]", segment.text);
                            }
                            None => println!("{:?}", segment.text),
                        }
                    }
                }
                None => anyhow::bail!("key '{key}' not found for {language} or its fallback"),
            }
        }
        Commands::Status => {
            println!("Langpack — Catalog Status\n");
            println!("Config: {}", cli.config);
            println!("Directory: {}", catalog.directory().display());
            println!("Package: {}", catalog.package());
            println!("Default language: {}", catalog.default_language());
            println!();
            let languages = catalog.languages();
            if languages.is_empty() {
                println!("  no language files loaded");
            }
            for language in languages {
                println!(
                    "  {} ({}): {} entries",
                    language,
                    language.abbreviation(),
                    catalog.entry_count(language)
                );
            }
        }
    }

    Ok(())
}

fn parse_language(abbrev: Option<&str>, default: Language) -> anyhow::Result<Language> {
    match abbrev {
        None => Ok(default),
        Some(a) => Language::from_abbreviation(a)
            .ok_or_else(|| anyhow::anyhow!("unknown language abbreviation '{a}'")),
    }
}

fn parse_fields(specs: &[String]) -> anyhow::Result<Vec<Field>> {
    specs
        .iter()
        .map(|spec| {
            let (key, value) = spec
                .split_once('=')
                .ok_or_else(|| anyhow::anyhow!("field '{spec}' is not key=value"))?;
            let value = serde_json::from_str::<serde_json::Value>(value)
                .map(FieldValue::from)
                .unwrap_or_else(|_| FieldValue::Text(value.to_string()));
            Ok(Field::new(key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fields_json_scalars() {
        let fields =
            parse_fields(&["flag=true".into(), "count=3".into(), "name=\"Jab\"".into()]).unwrap();
        assert_eq!(fields[0], Field::new("flag", true));
        assert_eq!(fields[1], Field::new("count", 3i64));
        assert_eq!(fields[2], Field::new("name", "Jab"));
    }

    #[test]
    fn test_parse_fields_plain_text_fallback() {
        let fields = parse_fields(&["name=Jab".into()]).unwrap();
        assert_eq!(fields[0], Field::new("name", "Jab"));
    }

    #[test]
    fn test_parse_fields_rejects_missing_equals() {
        assert!(parse_fields(&["oops".into()]).is_err());
    }

    #[test]
    fn test_parse_language() {
        assert_eq!(
            parse_language(None, Language::German).unwrap(),
            Language::German
        );
        assert_eq!(
            parse_language(Some("es"), Language::English).unwrap(),
            Language::Spanish
        );
        assert!(parse_language(Some("xx"), Language::English).is_err());
    }
}
