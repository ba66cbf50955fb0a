//! Runtime configuration from environment variables
//!
//! | Variable           | Default                            |
//! |--------------------|------------------------------------|
//! | `DEFAULT_LANGUAGE` | `en`                               |
//! | `LANGUAGE_PREFS`   | `.agri_advisor/preferences.json`   |
//! | `LOCALES_DIR`      | unset (embedded dictionaries only) |
//! | `PORT`             | `3000`                             |

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;

use crate::i18n::{
    DictionaryStore, FilePreferences, I18nError, LanguageCode, TranslationContext,
    DEFAULT_LANGUAGE,
};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PREFERENCES_PATH: &str = ".agri_advisor/preferences.json";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("DEFAULT_LANGUAGE '{0}' is not a supported language")]
    UnsupportedLanguage(String),

    #[error("PORT '{0}' is not a valid port number")]
    InvalidPort(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub default_language: LanguageCode,
    pub preferences_path: PathBuf,
    pub locales_dir: Option<PathBuf>,
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE,
            preferences_path: PathBuf::from(DEFAULT_PREFERENCES_PATH),
            locales_dir: None,
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let mut config = Self::default();

        if let Some(raw) = get("DEFAULT_LANGUAGE") {
            config.default_language =
                LanguageCode::parse(&raw).ok_or(ConfigError::UnsupportedLanguage(raw))?;
        }
        if let Some(path) = get("LANGUAGE_PREFS") {
            config.preferences_path = PathBuf::from(path);
        }
        config.locales_dir = get("LOCALES_DIR").map(PathBuf::from);
        if let Some(raw) = get("PORT") {
            config.port = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(raw.clone()))?;
        }

        Ok(config)
    }

    /// Embedded dictionaries with any `LOCALES_DIR` overrides applied.
    pub fn dictionary_store(&self) -> Result<DictionaryStore, I18nError> {
        let store = DictionaryStore::embedded()?;
        match &self.locales_dir {
            Some(dir) => store.with_overrides_dir(dir),
            None => Ok(store),
        }
    }

    /// Context whose Active Language is restored from, and saved to,
    /// `preferences_path`.
    pub fn translation_context(&self) -> Result<TranslationContext, I18nError> {
        TranslationContext::builder()
            .store(Arc::new(self.dictionary_store()?))
            .preferences(FilePreferences::new(&self.preferences_path))
            .default_language(self.default_language)
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: FxHashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3000);
        assert_eq!(config.default_language, LanguageCode::En);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("DEFAULT_LANGUAGE", "MR"),
            ("LANGUAGE_PREFS", "/tmp/prefs.json"),
            ("LOCALES_DIR", "/srv/locales"),
            ("PORT", "8080"),
        ]))
        .unwrap();
        assert_eq!(config.default_language, LanguageCode::Mr);
        assert_eq!(config.preferences_path, PathBuf::from("/tmp/prefs.json"));
        assert_eq!(config.locales_dir, Some(PathBuf::from("/srv/locales")));
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("DEFAULT_LANGUAGE", "fr")])),
            Err(ConfigError::UnsupportedLanguage("fr".into()))
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[("PORT", "99999")])),
            Err(ConfigError::InvalidPort("99999".into()))
        );
        // blank counts as unset
        let config = AppConfig::from_lookup(lookup(&[("PORT", " ")])).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
    }

    #[test]
    fn test_translation_context_uses_preferences_path() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig {
            default_language: LanguageCode::Hi,
            preferences_path: dir.path().join("prefs.json"),
            ..AppConfig::default()
        };

        let first = config.translation_context().unwrap();
        assert_eq!(first.language(), LanguageCode::Hi);
        let stored = std::fs::read_to_string(&config.preferences_path).unwrap();
        assert!(stored.contains("\"hi\""));

        first.change_language("gu").unwrap();
        let second = config.translation_context().unwrap();
        assert_eq!(second.language(), LanguageCode::Gu);
    }
}
