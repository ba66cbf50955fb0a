//! Dictionary store
//!
//! One flat `key → template` map per language, loaded eagerly and never
//! mutated afterwards. The compiled-in dictionaries live in `locales/*.json`;
//! a host may layer override files from a directory at load time.
//!
//! # Invariants
//!
//! 1. Every language has a dictionary (possibly empty), so typed access by
//!    [`LanguageCode`] cannot miss.
//! 2. The default language's dictionary is the superset: a key present in
//!    any other dictionary must also exist there. [`DictionaryStore::coverage_report`]
//!    lists violations as orphan keys.

use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Serialize;

use super::language::LanguageCode;
use super::I18nError;

/// Templates for a single language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dictionary {
    entries: FxHashMap<String, String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a flat JSON object of string values.
    pub fn from_json_str(language: LanguageCode, json: &str) -> Result<Self, I18nError> {
        let entries: FxHashMap<String, String> =
            serde_json::from_str(json).map_err(|e| I18nError::Parse {
                language,
                message: e.to_string(),
            })?;
        Ok(Self { entries })
    }

    /// Template for `key`, if this language defines it.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Sorted copy of the entries, for stable serialization.
    pub fn to_sorted_map(&self) -> std::collections::BTreeMap<&str, &str> {
        self.iter().collect()
    }

    /// Overlay `other` onto this dictionary; `other` wins on conflicts.
    fn merge(&mut self, other: Dictionary) {
        self.entries.extend(other.entries);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Dictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

// ============================================================================
// EMBEDDED DICTIONARIES
// ============================================================================

static EMBEDDED: [(LanguageCode, &str); 8] = [
    (LanguageCode::En, include_str!("locales/en.json")),
    (LanguageCode::Hi, include_str!("locales/hi.json")),
    (LanguageCode::Mr, include_str!("locales/mr.json")),
    (LanguageCode::Kn, include_str!("locales/kn.json")),
    (LanguageCode::Ta, include_str!("locales/ta.json")),
    (LanguageCode::Te, include_str!("locales/te.json")),
    (LanguageCode::Bn, include_str!("locales/bn.json")),
    (LanguageCode::Gu, include_str!("locales/gu.json")),
];

/// All dictionaries, indexed by language.
#[derive(Debug, Clone, Default)]
pub struct DictionaryStore {
    dictionaries: [Dictionary; 8],
}

impl DictionaryStore {
    /// Parse the compiled-in dictionaries for every supported language.
    pub fn embedded() -> Result<Self, I18nError> {
        let mut store = Self::default();
        for (language, json) in EMBEDDED.iter() {
            store.dictionaries[slot(*language)] = Dictionary::from_json_str(*language, json)?;
        }
        tracing::debug!(
            "Loaded {} embedded dictionaries ({} default keys)",
            EMBEDDED.len(),
            store.dictionary(LanguageCode::En).len()
        );
        Ok(store)
    }

    /// Build a store from explicit dictionaries; languages not supplied get
    /// an empty dictionary.
    pub fn from_dictionaries<I>(dictionaries: I) -> Self
    where
        I: IntoIterator<Item = (LanguageCode, Dictionary)>,
    {
        let mut store = Self::default();
        for (language, dictionary) in dictionaries {
            store.dictionaries[slot(language)] = dictionary;
        }
        store
    }

    /// Overlay `<code>.json` files from `dir` onto the loaded dictionaries.
    ///
    /// Languages without a file keep their current dictionary.
    pub fn with_overrides_dir(mut self, dir: &Path) -> Result<Self, I18nError> {
        for language in LanguageCode::ALL {
            let path = dir.join(format!("{}.json", language.code()));
            if !path.is_file() {
                continue;
            }
            let contents = std::fs::read_to_string(&path).map_err(|source| I18nError::Io {
                path: path.clone(),
                source,
            })?;
            let overrides = Dictionary::from_json_str(language, &contents)?;
            tracing::info!(
                "Applied {} override entries for '{}' from {}",
                overrides.len(),
                language,
                path.display()
            );
            self.dictionaries[slot(language)].merge(overrides);
        }
        Ok(self)
    }

    /// Dictionary for a raw code; `None` when the code is not supported.
    pub fn get_dictionary(&self, code: &str) -> Option<&Dictionary> {
        LanguageCode::from_code(code).map(|language| self.dictionary(language))
    }

    pub fn dictionary(&self, language: LanguageCode) -> &Dictionary {
        &self.dictionaries[slot(language)]
    }

    /// Per-language coverage measured against the `default` dictionary.
    pub fn coverage_report(&self, default: LanguageCode) -> CoverageReport {
        let reference = self.dictionary(default);
        let total = reference.len();

        let languages = LanguageCode::ALL
            .into_iter()
            .map(|language| {
                let dictionary = self.dictionary(language);

                let mut missing: Vec<String> = reference
                    .keys()
                    .filter(|key| !dictionary.contains(key))
                    .map(String::from)
                    .collect();
                missing.sort_unstable();

                let mut orphans: Vec<String> = dictionary
                    .keys()
                    .filter(|key| !reference.contains(key))
                    .map(String::from)
                    .collect();
                orphans.sort_unstable();

                let present = total.saturating_sub(missing.len());
                let coverage_percent = if total == 0 {
                    100.0
                } else {
                    (present as f32 / total as f32) * 100.0
                };

                LanguageCoverage {
                    language,
                    present,
                    missing,
                    orphans,
                    coverage_percent,
                }
            })
            .collect();

        CoverageReport {
            default_language: default,
            total_keys: total,
            languages,
        }
    }
}

fn slot(language: LanguageCode) -> usize {
    language as usize
}

/// How completely each language covers the default dictionary.
#[derive(Debug, Clone, Serialize)]
pub struct CoverageReport {
    pub default_language: LanguageCode,
    /// Number of keys in the default dictionary.
    pub total_keys: usize,
    pub languages: Vec<LanguageCoverage>,
}

impl CoverageReport {
    /// True when some dictionary defines a key the default lacks.
    pub fn has_orphans(&self) -> bool {
        self.languages.iter().any(|l| !l.orphans.is_empty())
    }

    pub fn for_language(&self, language: LanguageCode) -> Option<&LanguageCoverage> {
        self.languages.iter().find(|l| l.language == language)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LanguageCoverage {
    pub language: LanguageCode,
    /// Default-dictionary keys this language translates.
    pub present: usize,
    /// Default-dictionary keys that will fall back to the default language.
    pub missing: Vec<String>,
    /// Keys only this language defines.
    pub orphans: Vec<String>,
    pub coverage_percent: f32,
}
