//! Non-fatal translation diagnostics
//!
//! Missing keys, rejected language codes, storage hiccups and formatter
//! failures never reach the caller as errors. They are reported here instead,
//! through whatever sink the host injected.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use serde::Serialize;

use super::language::LanguageCode;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Diagnostic {
    /// Key absent from both the requested and the default dictionary.
    MissingKey { key: String, language: LanguageCode },
    /// Language change or stored preference named an unsupported code.
    UnknownLanguage { requested: String },
    /// Reading or writing the persisted preference failed.
    PreferenceUnavailable { operation: &'static str, reason: String },
    /// A date or number could not be formatted; the raw input was shown.
    FormatFailed {
        kind: &'static str,
        input: String,
        reason: String,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingKey { key, language } => {
                write!(f, "translation key not found: {key} (language '{language}')")
            }
            Diagnostic::UnknownLanguage { requested } => {
                let available: Vec<&str> = LanguageCode::ALL.iter().map(|l| l.code()).collect();
                write!(
                    f,
                    "language '{requested}' is not available; available languages: {}",
                    available.join(", ")
                )
            }
            Diagnostic::PreferenceUnavailable { operation, reason } => {
                write!(f, "could not {operation} language preference: {reason}")
            }
            Diagnostic::FormatFailed {
                kind,
                input,
                reason,
            } => write!(f, "error formatting {kind} '{input}': {reason}"),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, diagnostic: &Diagnostic);
}

/// Forwards every diagnostic to `tracing` at WARN level.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        match diagnostic {
            Diagnostic::MissingKey { key, language } => {
                tracing::warn!(key = %key, language = %language, "{}", diagnostic)
            }
            Diagnostic::UnknownLanguage { requested } => {
                tracing::warn!(requested = %requested, "{}", diagnostic)
            }
            Diagnostic::PreferenceUnavailable { operation, .. } => {
                tracing::warn!(operation = *operation, "{}", diagnostic)
            }
            Diagnostic::FormatFailed { kind, .. } => {
                tracing::warn!(kind = *kind, "{}", diagnostic)
            }
        }
    }
}

/// Drops everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn emit(&self, _diagnostic: &Diagnostic) {}
}

/// Keeps diagnostics in memory so tests can assert on them.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    pub fn snapshot(&self) -> Vec<Diagnostic> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Drain recorded diagnostics.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn is_empty(&self) -> bool {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }
}

impl DiagnosticSink for RecordingSink {
    fn emit(&self, diagnostic: &Diagnostic) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(diagnostic.clone());
    }
}
