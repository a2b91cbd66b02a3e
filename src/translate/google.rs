//! Client for the public Google Translate web endpoint (`translate_a/single`).
//!
//! The endpoint answers with a nested JSON array rather than an object:
//!
//! ```text
//! [[["Bonjour","Hello",null,null,10],[" le monde"," world",...]],null,"en",...]
//! ```
//!
//! Element `[0]` holds translated segments (segment `[0]` is the translated
//! piece) and element `[2]` is the detected source language.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::debug;

use super::error::{Result, TranslateError};
use super::languages::LanguageCatalog;
use super::port::{DetectedLanguage, TranslationPort, source_or_auto};

pub const DEFAULT_BASE_URL: &str = "https://translate.googleapis.com";

const SINGLE_PATH: &str = "/translate_a/single";

/// Blocking Google Translate client.
///
/// Holds a `reqwest::blocking::Client`, which owns its own runtime thread; build
/// this outside of any async context.
pub struct GoogleTranslator {
    client: Client,
    endpoint: Url,
    catalog: Arc<LanguageCatalog>,
}

impl GoogleTranslator {
    /// Create a client against `base_url`. A `timeout` of `None` leaves
    /// requests unbounded.
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        catalog: Arc<LanguageCatalog>,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("doctrans/", env!("CARGO_PKG_VERSION")))
            .build()?;
        let endpoint = Url::parse(base_url.trim_end_matches('/'))
            .and_then(|base| base.join(SINGLE_PATH))
            .map_err(|e| TranslateError::Other(format!("invalid backend URL {base_url}: {e}")))?;

        Ok(Self {
            client,
            endpoint,
            catalog,
        })
    }

    fn request(&self, text: &str, source: &str, target: &str) -> Result<Value> {
        let url = Url::parse_with_params(
            self.endpoint.as_str(),
            &[
                ("client", "gtx"),
                ("sl", source),
                ("tl", target),
                ("dt", "t"),
                ("q", text),
            ],
        )
        .map_err(|e| TranslateError::Other(e.to_string()))?;

        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(TranslateError::Status(status.as_u16()));
        }
        Ok(response.json::<Value>()?)
    }
}

impl TranslationPort for GoogleTranslator {
    fn name(&self) -> &str {
        "google"
    }

    fn translate(&self, text: &str, source: Option<&str>, target: &str) -> Result<String> {
        let target = target.trim();
        if target.is_empty() {
            return Err(TranslateError::UnsupportedLanguage(String::new()));
        }
        if !self.catalog.is_supported(target) {
            return Err(TranslateError::UnsupportedLanguage(target.to_string()));
        }
        let source = source_or_auto(source).unwrap_or("auto");

        debug!(chars = text.len(), source, language = target, "translating text");
        let body = self.request(text, source, target)?;
        let translated = translated_text(&body)?;
        if translated.is_empty() && !text.trim().is_empty() {
            return Err(TranslateError::EmptyResponse);
        }
        Ok(translated)
    }

    fn detect_language(&self, text: &str) -> Result<DetectedLanguage> {
        // Detection piggybacks on a translation request; the source is read back.
        let body = self.request(text, "auto", "en")?;
        let code = detected_source(&body)?;
        let name = self
            .catalog
            .name_for(&code)
            .map(str::to_string)
            .unwrap_or_else(|| code.clone());
        debug!(code = %code, "detected language");
        Ok(DetectedLanguage { code, name })
    }
}

/// Concatenate the translated pieces of a `translate_a/single` response.
pub(crate) fn translated_text(body: &Value) -> Result<String> {
    let segments = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| TranslateError::Parse("missing translation segments".into()))?;

    let mut out = String::new();
    for segment in segments {
        if let Some(piece) = segment.get(0).and_then(Value::as_str) {
            out.push_str(piece);
        }
    }
    Ok(out)
}

/// Read the detected source language from a `translate_a/single` response.
pub(crate) fn detected_source(body: &Value) -> Result<String> {
    body.get(2)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| TranslateError::Parse("missing detected language".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_translated_text_joins_segments() {
        let body = json!([
            [["Bonjour", "Hello", null, null, 10], [" le monde", " world", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(translated_text(&body).unwrap(), "Bonjour le monde");
        assert_eq!(detected_source(&body).unwrap(), "en");
    }

    #[test]
    fn test_malformed_response() {
        let body = json!({"error": "nope"});
        assert!(matches!(translated_text(&body), Err(TranslateError::Parse(_))));
        assert!(matches!(detected_source(&json!([[], null])), Err(TranslateError::Parse(_))));
    }

    #[test]
    fn test_segments_without_text_are_skipped() {
        let body = json!([[[null, "x"], ["Hallo", "Hello"]], null, "en"]);
        assert_eq!(translated_text(&body).unwrap(), "Hallo");
    }
}
