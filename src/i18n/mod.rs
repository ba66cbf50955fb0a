//! Key-based translation layer
//!
//! Leaf to root:
//! - `language`: closed set of supported language codes
//! - `dictionary`: immutable key → template maps, one per language
//! - `preferences`: persisted language preference
//! - `diagnostics`: injected sink for missing-key / bad-language events
//! - `resolver`: lookup, English fallback, `{name}` interpolation, plurals
//! - `format`: locale-aware date and number display
//! - `context`: the Active Language cell tying everything together

pub mod context;
pub mod diagnostics;
pub mod dictionary;
pub mod format;
pub mod language;
pub mod preferences;
pub mod resolver;

use std::path::PathBuf;

pub use context::{TranslationContext, TranslationContextBuilder};
pub use diagnostics::{Diagnostic, DiagnosticSink, NullSink, RecordingSink, TracingSink};
pub use dictionary::{CoverageReport, Dictionary, DictionaryStore, LanguageCoverage};
pub use format::{
    DateFormatOptions, DateInput, DateStyle, NumberFormatOptions, NumberInput, NumberStyle,
    TimeStyle,
};
pub use language::{available_languages, LanguageCode, LanguageInfo, DEFAULT_LANGUAGE};
pub use preferences::{FilePreferences, MemoryPreferences, PreferenceError, PreferenceStore};
pub use resolver::{interpolate, Lookup, Params, Resolver};

/// Errors raised while loading dictionaries or selecting a language.
///
/// Resolution itself never fails; these only surface at load time and from
/// explicit language changes.
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("language '{0}' is not available")]
    UnknownLanguage(String),

    #[error("dictionary for '{language}' could not be parsed: {message}")]
    Parse { language: LanguageCode, message: String },

    #[error("failed to read dictionary file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
