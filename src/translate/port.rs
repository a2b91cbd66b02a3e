//! The translation capability the document pipeline and the HTTP layer depend on.

use super::error::Result;
use serde::Serialize;

/// A language identified by a backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectedLanguage {
    /// Language code such as `en` or `zh-CN`
    pub code: String,
    /// Display name, e.g. `English`
    pub name: String,
}

/// A synchronous text translation backend.
///
/// Calls block the current thread; async callers run them on a blocking
/// worker. Implementations make exactly one attempt per call and report
/// failures as errors, leaving fallback decisions to the caller.
pub trait TranslationPort: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &str;

    /// Translate `text` into `target`. `source` of `None` (or `"auto"`) asks the
    /// backend to detect the source language.
    fn translate(&self, text: &str, source: Option<&str>, target: &str) -> Result<String>;

    /// Identify the language of `text`.
    fn detect_language(&self, text: &str) -> Result<DetectedLanguage>;
}

/// Normalize a user-supplied source language: empty and `auto` mean detection.
pub fn source_or_auto(source: Option<&str>) -> Option<&str> {
    source
        .map(str::trim)
        .filter(|code| !code.is_empty() && !code.eq_ignore_ascii_case("auto"))
}
