//! Active Language lifecycle
//!
//! A [`TranslationContext`] owns the single "currently displayed language"
//! cell and binds the [`Resolver`] to it. Independent UI trees or test
//! harnesses each build their own context; nothing is process-global.
//!
//! Lifecycle: initialized once (persisted preference, else default),
//! read many times, updated only through [`TranslationContext::change_language`],
//! persisted on every successful update.

use std::sync::{Arc, PoisonError, RwLock};

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::dictionary::{Dictionary, DictionaryStore};
use super::format::{DateFormatOptions, DateInput, NumberFormatOptions, NumberInput};
use super::language::{available_languages, LanguageCode, LanguageInfo, DEFAULT_LANGUAGE};
use super::preferences::{MemoryPreferences, PreferenceStore};
use super::resolver::{Params, Resolver};
use super::I18nError;

pub struct TranslationContext {
    resolver: Resolver,
    preferences: Box<dyn PreferenceStore>,
    active: RwLock<LanguageCode>,
}

impl std::fmt::Debug for TranslationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationContext")
            .field("language", &self.language())
            .field("resolver", &self.resolver)
            .finish_non_exhaustive()
    }
}

/// Assembles a [`TranslationContext`]; unset parts get sensible defaults.
pub struct TranslationContextBuilder {
    store: Option<Arc<DictionaryStore>>,
    preferences: Option<Box<dyn PreferenceStore>>,
    sink: Option<Arc<dyn DiagnosticSink>>,
    default_language: LanguageCode,
}

impl Default for TranslationContextBuilder {
    fn default() -> Self {
        Self {
            store: None,
            preferences: None,
            sink: None,
            default_language: DEFAULT_LANGUAGE,
        }
    }
}

impl TranslationContextBuilder {
    pub fn store(mut self, store: Arc<DictionaryStore>) -> Self {
        self.store = Some(store);
        self
    }

    pub fn preferences(mut self, preferences: impl PreferenceStore + 'static) -> Self {
        self.preferences = Some(Box::new(preferences));
        self
    }

    pub fn diagnostics(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn default_language(mut self, language: LanguageCode) -> Self {
        self.default_language = language;
        self
    }

    /// Build the context and run [`TranslationContext::initialize`].
    ///
    /// Fails only when no store was given and the embedded dictionaries do
    /// not parse.
    pub fn build(self) -> Result<TranslationContext, I18nError> {
        let store = match self.store {
            Some(store) => store,
            None => Arc::new(DictionaryStore::embedded()?),
        };
        let sink = self.sink.unwrap_or_else(|| Arc::new(TracingSink));
        let resolver = Resolver::new(store)
            .with_default_language(self.default_language)
            .with_sink(sink);

        let context = TranslationContext {
            resolver,
            preferences: self
                .preferences
                .unwrap_or_else(|| Box::new(MemoryPreferences::new())),
            active: RwLock::new(self.default_language),
        };
        let language = context.initialize(self.default_language);
        *context.active.write().unwrap_or_else(PoisonError::into_inner) = language;
        Ok(context)
    }
}

impl TranslationContext {
    pub fn builder() -> TranslationContextBuilder {
        TranslationContextBuilder::default()
    }

    /// Language to start with: the persisted preference when it names a
    /// supported language, otherwise `default`.
    ///
    /// Unreadable storage counts as "nothing stored". When no valid value
    /// was stored, `default` is written back.
    pub fn initialize(&self, default: LanguageCode) -> LanguageCode {
        let stored = match self.preferences.load() {
            Ok(value) => value,
            Err(e) => {
                self.resolver.emit(Diagnostic::PreferenceUnavailable {
                    operation: "read",
                    reason: e.to_string(),
                });
                None
            }
        };

        if let Some(raw) = stored {
            match LanguageCode::from_code(&raw) {
                Some(language) => {
                    tracing::debug!("Restored language preference '{}'", language);
                    return language;
                }
                None => self.resolver.emit(Diagnostic::UnknownLanguage { requested: raw }),
            }
        }

        self.persist(default);
        default
    }

    /// Switch the Active Language.
    ///
    /// Unsupported codes are rejected with a diagnostic and leave the Active
    /// Language untouched. A failed persistence write is reported but does
    /// not undo the switch.
    pub fn change_language(&self, code: &str) -> Result<LanguageCode, I18nError> {
        let Some(language) = LanguageCode::from_code(code) else {
            self.resolver.emit(Diagnostic::UnknownLanguage {
                requested: code.to_string(),
            });
            return Err(I18nError::UnknownLanguage(code.to_string()));
        };

        *self.active.write().unwrap_or_else(PoisonError::into_inner) = language;
        self.persist(language);
        tracing::info!("Active language set to '{}'", language);
        Ok(language)
    }

    fn persist(&self, language: LanguageCode) {
        if let Err(e) = self.preferences.save(language.code()) {
            self.resolver.emit(Diagnostic::PreferenceUnavailable {
                operation: "write",
                reason: e.to_string(),
            });
        }
    }

    /// The Active Language.
    pub fn language(&self) -> LanguageCode {
        *self.active.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn resolver(&self) -> &Resolver {
        &self.resolver
    }

    pub fn available_languages(&self) -> Vec<LanguageInfo> {
        available_languages()
    }

    /// Dictionary of the Active Language.
    pub fn translations(&self) -> &Dictionary {
        self.resolver.store().dictionary(self.language())
    }

    pub fn t(&self, key: &str, params: &Params) -> String {
        self.resolver.resolve(self.language(), key, params)
    }

    /// [`TranslationContext::t`] with display text for unresolved keys.
    pub fn t_or(&self, key: &str, params: &Params, fallback: &str) -> String {
        self.resolver
            .resolve_or(self.language(), key, params, Some(fallback))
    }

    pub fn has_translation(&self, key: &str) -> bool {
        self.resolver.has_translation(self.language(), key)
    }

    pub fn t_plural(&self, base_key: &str, count: i64, params: &Params) -> String {
        self.resolver
            .resolve_plural(self.language(), base_key, count, params)
    }

    /// Raw template from another language; does not touch the Active Language.
    pub fn t_for_language(&self, key: &str, code: &str) -> String {
        self.resolver.resolve_for_language(code, key)
    }

    pub fn t_with_context(&self, key: &str, show_key: bool, show_language: bool) -> String {
        self.resolver
            .resolve_with_context(self.language(), key, show_key, show_language)
    }

    pub fn format_date(&self, value: impl Into<DateInput>, options: &DateFormatOptions) -> String {
        self.resolver.format_date(self.language(), value, options)
    }

    pub fn format_number(
        &self,
        value: impl Into<NumberInput>,
        options: &NumberFormatOptions,
    ) -> String {
        self.resolver.format_number(self.language(), value, options)
    }
}
