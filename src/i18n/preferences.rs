//! Persisted language preference
//!
//! A single string under the well-known `"language"` key. Storage is
//! treated as always-available-but-fallible: callers report failures as
//! diagnostics and carry on with in-memory state.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use serde_json::{Map, Value};

/// Storage key holding the last selected language code.
pub const LANGUAGE_KEY: &str = "language";

#[derive(Debug, thiserror::Error)]
pub enum PreferenceError {
    #[error("preference storage unavailable: {0}")]
    Unavailable(String),

    #[error("preference file {path} is unreadable: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is malformed: {message}")]
    Malformed { path: PathBuf, message: String },
}

/// Where the selected language survives between runs.
pub trait PreferenceStore: Send + Sync {
    /// Stored language code, `None` when nothing was saved yet.
    fn load(&self) -> Result<Option<String>, PreferenceError>;

    fn save(&self, code: &str) -> Result<(), PreferenceError>;
}

/// Shared stores, so a host can keep a handle to what the context persists.
impl<T: PreferenceStore + ?Sized> PreferenceStore for Arc<T> {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        (**self).load()
    }

    fn save(&self, code: &str) -> Result<(), PreferenceError> {
        (**self).save(code)
    }
}

// ============================================================================
// In-memory store
// ============================================================================

/// Process-local store; handy for tests and for hosts without persistence.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    value: Mutex<Option<String>>,
    failing: bool,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with `code`.
    pub fn with_value(code: impl Into<String>) -> Self {
        Self {
            value: Mutex::new(Some(code.into())),
            failing: false,
        }
    }

    /// Store whose every operation fails, simulating blocked storage.
    pub fn unavailable() -> Self {
        Self {
            value: Mutex::new(None),
            failing: true,
        }
    }

    /// Current stored value, bypassing the failure switch.
    pub fn stored(&self) -> Option<String> {
        self.value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        if self.failing {
            return Err(PreferenceError::Unavailable("storage disabled".into()));
        }
        Ok(self.stored())
    }

    fn save(&self, code: &str) -> Result<(), PreferenceError> {
        if self.failing {
            return Err(PreferenceError::Unavailable("storage disabled".into()));
        }
        *self.value.lock().unwrap_or_else(PoisonError::into_inner) = Some(code.to_string());
        Ok(())
    }
}

// ============================================================================
// JSON file store
// ============================================================================

/// Preference file holding a JSON object, e.g. `{"language": "hi"}`.
///
/// Unrelated keys already in the file are preserved on save.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_object(&self) -> Result<Option<Map<String, Value>>, PreferenceError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PreferenceError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(Some(map)),
            Ok(_) => Err(PreferenceError::Malformed {
                path: self.path.clone(),
                message: "expected a JSON object".into(),
            }),
            Err(e) => Err(PreferenceError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            }),
        }
    }
}

impl PreferenceStore for FilePreferences {
    fn load(&self) -> Result<Option<String>, PreferenceError> {
        Ok(self
            .read_object()?
            .and_then(|map| map.get(LANGUAGE_KEY).and_then(Value::as_str).map(String::from)))
    }

    fn save(&self, code: &str) -> Result<(), PreferenceError> {
        // A malformed file is replaced rather than blocking every future save
        let mut map = self.read_object().ok().flatten().unwrap_or_default();
        map.insert(LANGUAGE_KEY.to_string(), Value::String(code.to_string()));

        let io_err = |source| PreferenceError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let body = serde_json::to_string_pretty(&Value::Object(map)).map_err(|e| {
            PreferenceError::Malformed {
                path: self.path.clone(),
                message: e.to_string(),
            }
        })?;
        std::fs::write(&self.path, body).map_err(io_err)
    }
}
