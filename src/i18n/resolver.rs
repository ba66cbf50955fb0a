//! Translation resolver
//!
//! Turns `(language, key, params)` into display text.
//!
//! # Resolution order
//!
//! 1. Template from the requested language's dictionary.
//! 2. Otherwise, when the requested language is not the default, the
//!    default language's template (text shows in the wrong language but is
//!    never empty when avoidable).
//! 3. Otherwise the key itself, verbatim, or the caller's fallback text when
//!    one was given. A [`Diagnostic::MissingKey`] is emitted.
//! 4. `{name}` placeholders in the chosen template are replaced from the
//!    parameter set; unknown names are left untouched.
//!
//! # Failure Modes
//!
//! | Failure | Behavior |
//! |---------|----------|
//! | Missing key | Default-language text, else key / fallback, plus diagnostic |
//! | Unknown language code | Key verbatim, plus diagnostic |
//! | Placeholder without param | Token left as-is |
//! | Unclosed or empty braces | Emitted literally |

use std::fmt::Display;
use std::sync::Arc;

use super::diagnostics::{Diagnostic, DiagnosticSink, TracingSink};
use super::dictionary::DictionaryStore;
use super::format::{self, DateFormatOptions, DateInput, NumberFormatOptions, NumberInput};
use super::language::{LanguageCode, DEFAULT_LANGUAGE};

// ============================================================================
// Parameters
// ============================================================================

/// Placeholder values for one call, in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    values: Vec<(String, String)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`Params::set`].
    pub fn with(mut self, name: impl Into<String>, value: impl Display) -> Self {
        self.set(name, value);
        self
    }

    /// Set `name`, replacing any earlier value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Display) {
        let name = name.into();
        let value = value.to_string();
        match self.values.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.values.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Copy every entry of `other` over this set.
    pub fn extend_from(&mut self, other: &Params) {
        for (name, value) in &other.values {
            self.set(name.clone(), value);
        }
    }
}

impl<K: Into<String>, V: Display> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.set(name, value);
        }
        params
    }
}

/// JSON strings are used raw; every other value uses its JSON text.
impl From<&serde_json::Map<String, serde_json::Value>> for Params {
    fn from(map: &serde_json::Map<String, serde_json::Value>) -> Self {
        map.iter()
            .map(|(name, value)| match value {
                serde_json::Value::String(s) => (name.clone(), s.clone()),
                other => (name.clone(), other.to_string()),
            })
            .collect()
    }
}

// ============================================================================
// Interpolation
// ============================================================================

/// Replace `{name}` tokens (ASCII word characters only) in a single pass.
///
/// Substituted values are not scanned again, so the output is stable under
/// re-interpolation with the same params once no tokens remain.
pub fn interpolate(template: &str, params: &Params) -> String {
    if params.is_empty() || !template.contains('{') {
        return template.to_string();
    }

    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        result.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let name_len = after
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map(|(i, _)| i)
            .unwrap_or(after.len());

        let closes = after[name_len..].starts_with('}');
        if name_len > 0 && closes {
            let name = &after[..name_len];
            match params.get(name) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('{');
                    result.push_str(name);
                    result.push('}');
                }
            }
            rest = &after[name_len + 1..];
        } else {
            // Not a token: keep the brace and rescan right after it
            result.push('{');
            rest = after;
        }
    }

    result.push_str(rest);
    result
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ============================================================================
// Resolver
// ============================================================================

/// Where a template came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup<'a> {
    /// Requested language defines the key.
    Active(&'a str),
    /// Borrowed from the default language.
    Default(&'a str),
    Missing,
}

impl<'a> Lookup<'a> {
    pub fn template(self) -> Option<&'a str> {
        match self {
            Lookup::Active(t) | Lookup::Default(t) => Some(t),
            Lookup::Missing => None,
        }
    }

    /// Short tag for API responses.
    pub fn source(self) -> &'static str {
        match self {
            Lookup::Active(_) => "active",
            Lookup::Default(_) => "default",
            Lookup::Missing => "key",
        }
    }
}

/// Stateless resolution engine; the language is always explicit.
///
/// [`TranslationContext`](super::TranslationContext) binds it to the Active
/// Language. Servers use it directly with a per-request language.
#[derive(Clone)]
pub struct Resolver {
    store: Arc<DictionaryStore>,
    default_language: LanguageCode,
    sink: Arc<dyn DiagnosticSink>,
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("default_language", &self.default_language)
            .finish_non_exhaustive()
    }
}

impl Resolver {
    /// Resolver over `store` with English fallback, logging through `tracing`.
    pub fn new(store: Arc<DictionaryStore>) -> Self {
        Self {
            store,
            default_language: DEFAULT_LANGUAGE,
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_default_language(mut self, language: LanguageCode) -> Self {
        self.default_language = language;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn DiagnosticSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn store(&self) -> &DictionaryStore {
        &self.store
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub(crate) fn emit(&self, diagnostic: Diagnostic) {
        self.sink.emit(&diagnostic);
    }

    /// Steps 1-2 of resolution, without diagnostics or interpolation.
    ///
    /// Empty templates count as absent.
    pub fn lookup(&self, language: LanguageCode, key: &str) -> Lookup<'_> {
        let key = key.trim();
        if let Some(template) = self.non_empty(language, key) {
            return Lookup::Active(template);
        }
        if language != self.default_language {
            if let Some(template) = self.non_empty(self.default_language, key) {
                return Lookup::Default(template);
            }
        }
        Lookup::Missing
    }

    fn non_empty(&self, language: LanguageCode, key: &str) -> Option<&str> {
        self.store
            .dictionary(language)
            .get(key)
            .filter(|t| !t.is_empty())
    }

    pub fn resolve(&self, language: LanguageCode, key: &str, params: &Params) -> String {
        self.resolve_or(language, key, params, None)
    }

    /// [`Resolver::resolve`] with display text for wholly unresolved keys.
    ///
    /// The fallback is shown as-is, never interpolated. An empty fallback is
    /// ignored.
    pub fn resolve_or(
        &self,
        language: LanguageCode,
        key: &str,
        params: &Params,
        fallback: Option<&str>,
    ) -> String {
        match self.lookup(language, key) {
            Lookup::Active(template) | Lookup::Default(template) => interpolate(template, params),
            Lookup::Missing => {
                let key = key.trim();
                self.emit(Diagnostic::MissingKey {
                    key: key.to_string(),
                    language,
                });
                match fallback.filter(|f| !f.is_empty()) {
                    Some(text) => text.to_string(),
                    None => key.to_string(),
                }
            }
        }
    }

    /// Whether `language` itself defines `key`; the default-language
    /// fallback does not count.
    pub fn has_translation(&self, language: LanguageCode, key: &str) -> bool {
        self.store.dictionary(language).contains(key.trim())
    }

    /// Pick `<base>.singular` for a count of one and `<base>.plural`
    /// otherwise, falling back to `base` itself when the selected form is not
    /// defined in `language`.
    ///
    /// `{count}` is always available to the template; an explicit `count`
    /// entry in `params` takes precedence.
    pub fn resolve_plural(
        &self,
        language: LanguageCode,
        base_key: &str,
        count: i64,
        params: &Params,
    ) -> String {
        let base_key = base_key.trim();
        let suffix = if count == 1 { "singular" } else { "plural" };
        let derived = format!("{base_key}.{suffix}");

        let key = if self.has_translation(language, &derived) {
            derived.as_str()
        } else {
            base_key
        };

        let mut merged = Params::new().with("count", count);
        merged.extend_from(params);
        self.resolve(language, key, &merged)
    }

    /// Template for `key` in an explicitly named language, with no
    /// cross-language fallback; the key itself when absent.
    pub fn resolve_for_language(&self, code: &str, key: &str) -> String {
        let key = key.trim();
        let Some(language) = LanguageCode::from_code(code) else {
            self.emit(Diagnostic::UnknownLanguage {
                requested: code.to_string(),
            });
            return key.to_string();
        };

        match self.non_empty(language, key) {
            Some(template) => template.to_string(),
            None => {
                self.emit(Diagnostic::MissingKey {
                    key: key.to_string(),
                    language,
                });
                key.to_string()
            }
        }
    }

    /// Resolved text annotated with its key and/or language, e.g.
    /// `"Home (navbar.home) [en]"`.
    pub fn resolve_with_context(
        &self,
        language: LanguageCode,
        key: &str,
        show_key: bool,
        show_language: bool,
    ) -> String {
        let mut text = self.resolve(language, key, &Params::new());
        if show_key {
            text.push_str(&format!(" ({})", key.trim()));
        }
        if show_language {
            text.push_str(&format!(" [{language}]"));
        }
        text
    }

    /// Locale-aware date; the raw input's text form on failure.
    pub fn format_date(
        &self,
        language: LanguageCode,
        value: impl Into<DateInput>,
        options: &DateFormatOptions,
    ) -> String {
        let value = value.into();
        format::try_format_date(language, &value, options).unwrap_or_else(|e| {
            self.emit(Diagnostic::FormatFailed {
                kind: "date",
                input: value.to_string(),
                reason: e.to_string(),
            });
            value.to_string()
        })
    }

    /// Locale-aware number; the raw input's text form on failure.
    pub fn format_number(
        &self,
        language: LanguageCode,
        value: impl Into<NumberInput>,
        options: &NumberFormatOptions,
    ) -> String {
        let value = value.into();
        format::try_format_number(language, &value, options).unwrap_or_else(|e| {
            self.emit(Diagnostic::FormatFailed {
                kind: "number",
                input: value.to_string(),
                reason: e.to_string(),
            });
            value.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::diagnostics::RecordingSink;
    use crate::i18n::dictionary::Dictionary;

    fn resolver_with_sink() -> (Resolver, Arc<RecordingSink>) {
        let store = DictionaryStore::from_dictionaries([
            (
                LanguageCode::En,
                Dictionary::from_iter([
                    ("greeting.welcome", "Welcome back, {name}!"),
                    ("navbar.home", "Home"),
                    ("items.singular", "You have {count} item"),
                    ("items.plural", "You have {count} items"),
                    ("files", "{count} file(s)"),
                    ("empty.value", ""),
                ]),
            ),
            (
                LanguageCode::Hi,
                Dictionary::from_iter([("navbar.home", "होम"), ("empty.value", "")]),
            ),
        ]);
        let sink = Arc::new(RecordingSink::new());
        let resolver = Resolver::new(Arc::new(store)).with_sink(sink.clone());
        (resolver, sink)
    }

    #[test]
    fn test_interpolate_replaces_known_params() {
        let params = Params::new().with("name", "Asha").with("n", 3);
        assert_eq!(
            interpolate("Hi {name}, {n} new", &params),
            "Hi Asha, 3 new"
        );
    }

    #[test]
    fn test_interpolate_edge_cases() {
        let params = Params::new().with("x", "A");
        assert_eq!(interpolate("{x} and {x}", &params), "A and A");
        assert_eq!(interpolate("{missing} {x}", &params), "{missing} A");
        assert_eq!(interpolate("Hello {world", &params), "Hello {world");
        assert_eq!(interpolate("Hello {}", &params), "Hello {}");
        assert_eq!(interpolate("{{x}}", &params), "{A}");
        assert_eq!(interpolate("{x y}", &params), "{x y}");
        assert_eq!(interpolate("{x-y}", &params), "{x-y}");
        assert_eq!(interpolate("no braces", &params), "no braces");
    }

    #[test]
    fn test_interpolate_is_single_pass() {
        let params = Params::new().with("a", "{b}").with("b", "B");
        assert_eq!(interpolate("{a}", &params), "{b}");
    }

    #[test]
    fn test_interpolate_idempotent_on_substituted_output() {
        let params = Params::new().with("name", "Ramesh");
        let once = interpolate("Welcome back, {name}!", &params);
        assert_eq!(interpolate(&once, &params), once);
        assert_eq!(interpolate(&once, &Params::new()), once);
    }

    #[test]
    fn test_params_set_replaces() {
        let mut params = Params::new().with("count", 1);
        params.set("count", 5);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("count"), Some("5"));
    }

    #[test]
    fn test_params_from_json_map() {
        let value = serde_json::json!({"name": "Ravi", "count": 2, "ok": true});
        let params = Params::from(value.as_object().unwrap());
        assert_eq!(params.get("name"), Some("Ravi"));
        assert_eq!(params.get("count"), Some("2"));
        assert_eq!(params.get("ok"), Some("true"));
    }

    #[test]
    fn test_resolve_active_language() {
        let (r, sink) = resolver_with_sink();
        assert_eq!(r.resolve(LanguageCode::Hi, "navbar.home", &Params::new()), "होम");
        assert!(sink.is_empty());
    }

    #[test]
    fn test_resolve_falls_back_to_default_with_interpolation() {
        let (r, sink) = resolver_with_sink();
        let params = Params::new().with("name", "Ramesh");
        assert_eq!(
            r.resolve(LanguageCode::Hi, "greeting.welcome", &params),
            "Welcome back, Ramesh!"
        );
        assert!(sink.is_empty());
    }

    #[test]
    fn test_resolve_missing_key_echoes_and_reports() {
        let (r, sink) = resolver_with_sink();
        assert_eq!(
            r.resolve(LanguageCode::En, "nonexistent.key", &Params::new()),
            "nonexistent.key"
        );
        assert_eq!(
            sink.take(),
            vec![Diagnostic::MissingKey {
                key: "nonexistent.key".into(),
                language: LanguageCode::En,
            }]
        );
    }

    #[test]
    fn test_resolve_or_uses_fallback_only_when_missing() {
        let (r, _) = resolver_with_sink();
        let params = Params::new().with("name", "X");
        assert_eq!(
            r.resolve_or(LanguageCode::Hi, "nope", &params, Some("Hello {name}")),
            "Hello {name}"
        );
        assert_eq!(
            r.resolve_or(LanguageCode::Hi, "navbar.home", &params, Some("Home!")),
            "होम"
        );
        assert_eq!(r.resolve_or(LanguageCode::Hi, "nope", &params, Some("")), "nope");
    }

    #[test]
    fn test_empty_template_counts_as_missing() {
        let (r, _) = resolver_with_sink();
        assert_eq!(
            r.resolve(LanguageCode::Hi, "empty.value", &Params::new()),
            "empty.value"
        );
        // ...but the key still exists for has_translation
        assert!(r.has_translation(LanguageCode::Hi, "empty.value"));
    }

    #[test]
    fn test_has_translation_ignores_fallback() {
        let (r, _) = resolver_with_sink();
        assert!(r.has_translation(LanguageCode::En, "greeting.welcome"));
        assert!(!r.has_translation(LanguageCode::Hi, "greeting.welcome"));
    }

    #[test]
    fn test_resolve_trims_key() {
        let (r, _) = resolver_with_sink();
        assert_eq!(r.resolve(LanguageCode::En, "  navbar.home ", &Params::new()), "Home");
    }

    #[test]
    fn test_plural_selects_suffixed_keys() {
        let (r, _) = resolver_with_sink();
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "items", 1, &Params::new()),
            "You have 1 item"
        );
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "items", 2, &Params::new()),
            "You have 2 items"
        );
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "items", 0, &Params::new()),
            "You have 0 items"
        );
    }

    #[test]
    fn test_plural_falls_back_to_base_key() {
        let (r, _) = resolver_with_sink();
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "files", 1, &Params::new()),
            "1 file(s)"
        );
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "files", 7, &Params::new()),
            "7 file(s)"
        );
    }

    #[test]
    fn test_plural_existence_is_language_specific() {
        // Hindi lacks items.plural, so the base key is resolved (and is missing)
        let (r, sink) = resolver_with_sink();
        assert_eq!(
            r.resolve_plural(LanguageCode::Hi, "items", 2, &Params::new()),
            "items"
        );
        assert_eq!(sink.take().len(), 1);
    }

    #[test]
    fn test_plural_caller_count_wins() {
        let (r, _) = resolver_with_sink();
        let params = Params::new().with("count", "two");
        assert_eq!(
            r.resolve_plural(LanguageCode::En, "items", 2, &params),
            "You have two items"
        );
    }

    #[test]
    fn test_resolve_for_language_has_no_fallback() {
        let (r, sink) = resolver_with_sink();
        assert_eq!(r.resolve_for_language("hi", "navbar.home"), "होम");
        assert_eq!(r.resolve_for_language("hi", "greeting.welcome"), "greeting.welcome");
        assert_eq!(r.resolve_for_language("fr", "navbar.home"), "navbar.home");
        // Template is returned raw
        assert_eq!(
            r.resolve_for_language("en", "greeting.welcome"),
            "Welcome back, {name}!"
        );
        let kinds: Vec<_> = sink.take();
        assert!(matches!(kinds[0], Diagnostic::MissingKey { .. }));
        assert!(matches!(kinds[1], Diagnostic::UnknownLanguage { .. }));
    }

    #[test]
    fn test_resolve_with_context() {
        let (r, _) = resolver_with_sink();
        assert_eq!(
            r.resolve_with_context(LanguageCode::En, "navbar.home", true, true),
            "Home (navbar.home) [en]"
        );
        assert_eq!(
            r.resolve_with_context(LanguageCode::Hi, "navbar.home", false, true),
            "होम [hi]"
        );
    }

    #[test]
    fn test_non_english_default_language() {
        let (r, _) = resolver_with_sink();
        let r = r.with_default_language(LanguageCode::Hi);
        // English no longer falls back anywhere
        assert_eq!(r.resolve(LanguageCode::Mr, "navbar.home", &Params::new()), "होम");
        assert_eq!(
            r.lookup(LanguageCode::Mr, "greeting.welcome"),
            Lookup::Missing
        );
    }

    #[test]
    fn test_unformattable_number_shows_raw_value() {
        let (r, sink) = resolver_with_sink();
        let shown = r.format_number(LanguageCode::En, f64::MAX, &NumberFormatOptions::default());

        assert_eq!(shown, f64::MAX.to_string());
        assert!(!shown.contains("inf"));
        assert!(matches!(
            sink.take().as_slice(),
            [Diagnostic::FormatFailed { kind: "number", .. }]
        ));
    }
}
