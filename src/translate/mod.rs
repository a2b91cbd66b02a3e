//! Translation backends.
//!
//! Everything that talks to an external translation service sits behind
//! [`TranslationPort`], so the document pipeline and the HTTP layer can be
//! driven by any backend (or a test double).

pub mod error;
pub mod google;
pub mod languages;
pub mod port;

pub use error::TranslateError;
pub use google::GoogleTranslator;
pub use languages::{Language, LanguageCatalog};
pub use port::{DetectedLanguage, TranslationPort};
