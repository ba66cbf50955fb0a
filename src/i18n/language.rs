//! Supported display languages
//!
//! The set is closed and known at build time. Every code maps to exactly one
//! dictionary in the [`DictionaryStore`](super::DictionaryStore) and to one
//! chrono locale for date formatting.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::I18nError;

/// Language every other dictionary falls back to.
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::En;

/// Language identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    En, // English
    Hi, // Hindi
    Mr, // Marathi
    Kn, // Kannada
    Ta, // Tamil
    Te, // Telugu
    Bn, // Bengali
    Gu, // Gujarati
}

impl LanguageCode {
    /// All supported languages, in language-selector order.
    pub const ALL: [LanguageCode; 8] = [
        LanguageCode::En,
        LanguageCode::Hi,
        LanguageCode::Mr,
        LanguageCode::Kn,
        LanguageCode::Ta,
        LanguageCode::Te,
        LanguageCode::Bn,
        LanguageCode::Gu,
    ];

    /// Short code, e.g. `"hi"`.
    pub fn code(self) -> &'static str {
        match self {
            LanguageCode::En => "en",
            LanguageCode::Hi => "hi",
            LanguageCode::Mr => "mr",
            LanguageCode::Kn => "kn",
            LanguageCode::Ta => "ta",
            LanguageCode::Te => "te",
            LanguageCode::Bn => "bn",
            LanguageCode::Gu => "gu",
        }
    }

    pub fn english_name(self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Hi => "Hindi",
            LanguageCode::Mr => "Marathi",
            LanguageCode::Kn => "Kannada",
            LanguageCode::Ta => "Tamil",
            LanguageCode::Te => "Telugu",
            LanguageCode::Bn => "Bengali",
            LanguageCode::Gu => "Gujarati",
        }
    }

    /// Name of the language written in its own script.
    pub fn native_name(self) -> &'static str {
        match self {
            LanguageCode::En => "English",
            LanguageCode::Hi => "हिंदी",
            LanguageCode::Mr => "मराठी",
            LanguageCode::Kn => "ಕನ್ನಡ",
            LanguageCode::Ta => "தமிழ்",
            LanguageCode::Te => "తెలుగు",
            LanguageCode::Bn => "বাংলা",
            LanguageCode::Gu => "ગુજરાતી",
        }
    }

    /// Exact code lookup: `"hi"` matches, `"HI"` and `" hi"` do not.
    ///
    /// Used wherever a code selects a dictionary or the Active Language.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|lang| lang.code() == code)
    }

    /// Lenient parse for user input, ignoring surrounding whitespace and
    /// ASCII case.
    ///
    /// Returns `None` for anything outside the supported set.
    pub fn parse(raw: &str) -> Option<Self> {
        let needle = raw.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.code().eq_ignore_ascii_case(needle))
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for LanguageCode {
    type Err = I18nError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| I18nError::UnknownLanguage(s.to_string()))
    }
}

/// Entry of the language selector list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageInfo {
    pub code: LanguageCode,
    pub name: &'static str,
    #[serde(rename = "nativeName")]
    pub native_name: &'static str,
}

impl From<LanguageCode> for LanguageInfo {
    fn from(code: LanguageCode) -> Self {
        Self {
            code,
            name: code.english_name(),
            native_name: code.native_name(),
        }
    }
}

/// Every supported language with its display names.
pub fn available_languages() -> Vec<LanguageInfo> {
    LanguageCode::ALL.into_iter().map(LanguageInfo::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_codes() {
        for lang in LanguageCode::ALL {
            assert_eq!(LanguageCode::parse(lang.code()), Some(lang));
        }
        assert_eq!(LanguageCode::parse(" HI "), Some(LanguageCode::Hi));
    }

    #[test]
    fn test_from_code_is_exact() {
        assert_eq!(LanguageCode::from_code("ta"), Some(LanguageCode::Ta));
        assert_eq!(LanguageCode::from_code("HI"), None);
        assert_eq!(LanguageCode::from_code(" ta "), None);
        assert_eq!(LanguageCode::from_code("fr"), None);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!(LanguageCode::parse("fr"), None);
        assert_eq!(LanguageCode::parse(""), None);
        assert!("xx".parse::<LanguageCode>().is_err());
    }

    #[test]
    fn test_serde_uses_short_code() {
        let json = serde_json::to_string(&LanguageCode::Mr).unwrap();
        assert_eq!(json, "\"mr\"");
        let back: LanguageCode = serde_json::from_str("\"gu\"").unwrap();
        assert_eq!(back, LanguageCode::Gu);
    }

    #[test]
    fn test_available_languages_order() {
        let langs = available_languages();
        assert_eq!(langs.len(), 8);
        assert_eq!(langs[0].code, LanguageCode::En);
        assert_eq!(langs[1].native_name, "हिंदी");
    }
}
