//! Translation of a single paragraph or cell text with fallback.

use tracing::warn;

use crate::translate::TranslationPort;

/// What happened to one unit of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextOutcome {
    /// Empty input; the backend was not called
    Skipped,
    Translated(String),
    /// The backend failed; carries the original text
    Fallback(String),
}

impl TextOutcome {
    pub fn into_text(self) -> String {
        match self {
            TextOutcome::Skipped => String::new(),
            TextOutcome::Translated(text) | TextOutcome::Fallback(text) => text,
        }
    }

    #[inline]
    pub fn is_fallback(&self) -> bool {
        matches!(self, TextOutcome::Fallback(_))
    }
}

/// Translate `text` into `target` with source detection, keeping the original
/// text if the backend fails.
pub fn translate_text(port: &dyn TranslationPort, text: &str, target: &str) -> TextOutcome {
    if text.is_empty() {
        return TextOutcome::Skipped;
    }
    match port.translate(text, None, target) {
        Ok(translated) => TextOutcome::Translated(translated),
        Err(err) => {
            warn!(backend = port.name(), language = target, error = %err, "translation failed, keeping original text");
            TextOutcome::Fallback(text.to_string())
        },
    }
}

/// Like [`translate_text`], returning only the resulting string.
pub fn translate_text_with_fallback(port: &dyn TranslationPort, text: &str, target: &str) -> String {
    translate_text(port, text, target).into_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::translate::{DetectedLanguage, TranslateError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct Upper {
        calls: AtomicUsize,
    }

    impl TranslationPort for Upper {
        fn name(&self) -> &str {
            "upper"
        }

        fn translate(&self, text: &str, _source: Option<&str>, _target: &str) -> crate::translate::error::Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(text.to_uppercase())
        }

        fn detect_language(&self, _text: &str) -> crate::translate::error::Result<DetectedLanguage> {
            Err(TranslateError::Other("unused".into()))
        }
    }

    struct Broken;

    impl TranslationPort for Broken {
        fn name(&self) -> &str {
            "broken"
        }

        fn translate(&self, _text: &str, _source: Option<&str>, _target: &str) -> crate::translate::error::Result<String> {
            Err(TranslateError::Status(429))
        }

        fn detect_language(&self, _text: &str) -> crate::translate::error::Result<DetectedLanguage> {
            Err(TranslateError::Status(429))
        }
    }

    #[test]
    fn test_empty_text_skips_backend() {
        let port = Upper::default();
        assert_eq!(translate_text(&port, "", "fr"), TextOutcome::Skipped);
        assert_eq!(translate_text_with_fallback(&port, "", "fr"), "");
        assert_eq!(port.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_translated() {
        let port = Upper::default();
        assert_eq!(translate_text_with_fallback(&port, "abc", "fr"), "ABC");
        assert_eq!(port.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_failure_keeps_original() {
        let outcome = translate_text(&Broken, "Hello", "fr");
        assert!(outcome.is_fallback());
        assert_eq!(outcome.into_text(), "Hello");
    }
}
