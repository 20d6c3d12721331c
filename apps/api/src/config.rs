use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable is optional; missing ones fall back to defaults.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// JSON rubric file. `None` uses the built-in rubric.
    pub rubric_path: Option<PathBuf>,
    pub max_document_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            rubric_path: None,
            max_document_chars: 100_000,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Config::default();
        Ok(Config {
            port: parse_or("PORT", &lookup, defaults.port)?,
            rust_log: lookup("RUST_LOG").unwrap_or(defaults.rust_log),
            rubric_path: lookup("RUBRIC_PATH")
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            max_document_chars: parse_or(
                "MAX_DOCUMENT_CHARS",
                &lookup,
                defaults.max_document_chars,
            )?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &str,
    lookup: &impl Fn(&str) -> Option<String>,
    default: T,
) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Invalid value for '{key}': {raw}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
        assert!(config.rubric_path.is_none());
        assert_eq!(config.max_document_chars, 100_000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            ("PORT", "3000"),
            ("RUBRIC_PATH", "/etc/rubric.json"),
            ("MAX_DOCUMENT_CHARS", "5000"),
        ]))
        .unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.rubric_path, Some(PathBuf::from("/etc/rubric.json")));
        assert_eq!(config.max_document_chars, 5000);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        assert!(Config::from_lookup(lookup(&[("PORT", "eighty")])).is_err());
    }
}
