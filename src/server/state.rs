//! Shared application state.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::pipeline::{DocumentTranslator, TranslatorOptions};
use crate::translate::{LanguageCatalog, TranslationPort};

/// Handles passed to every request; cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    port: Arc<dyn TranslationPort>,
    catalog: Arc<LanguageCatalog>,
    translator: DocumentTranslator,
    output_dir: PathBuf,
}

impl AppState {
    pub fn new(
        port: Arc<dyn TranslationPort>,
        catalog: Arc<LanguageCatalog>,
        options: TranslatorOptions,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let translator = DocumentTranslator::new(Arc::clone(&port), options);
        Self {
            inner: Arc::new(AppStateInner {
                port,
                catalog,
                translator,
                output_dir: output_dir.into(),
            }),
        }
    }

    /// The translation backend.
    pub fn port(&self) -> Arc<dyn TranslationPort> {
        Arc::clone(&self.inner.port)
    }

    pub fn catalog(&self) -> &LanguageCatalog {
        &self.inner.catalog
    }

    pub fn translator(&self) -> &DocumentTranslator {
        &self.inner.translator
    }

    /// Directory translated documents are saved to.
    pub fn output_dir(&self) -> &Path {
        &self.inner.output_dir
    }
}
