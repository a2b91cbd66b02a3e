//! Doctrans - structure-preserving translation of Word documents
//!
//! This library reads a `.docx` package, translates the text of its body
//! paragraphs and tables through a pluggable translation backend, and writes a
//! new package that keeps paragraph styles, run formatting, table shape and
//! embedded pictures.
//!
//! # Features
//!
//! - **OPC layer**: ZIP-based package container with content types and relationships
//! - **DOCX reader**: paragraphs, runs with tri-state formatting, tables and image references
//! - **DOCX writer**: append-only output document serialized back to a package
//! - **Pipeline**: per-node translation with fallback to the original text
//! - **HTTP server**: language list, language detection, text and document translation
//!
//! # Example - Translating a document
//!
//! ```no_run
//! use std::sync::Arc;
//! use doctrans::pipeline::{DocumentTranslator, TranslatorOptions};
//! use doctrans::translate::{GoogleTranslator, LanguageCatalog};
//! use doctrans::translate::google::DEFAULT_BASE_URL;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let catalog = Arc::new(LanguageCatalog::embedded());
//! let backend = Arc::new(GoogleTranslator::new(DEFAULT_BASE_URL, None, catalog)?);
//! let translator = DocumentTranslator::new(backend, TranslatorOptions::default());
//!
//! let input = std::fs::read("report.docx")?;
//! translator.translate_bytes(&input, "es")?.save("report.es.docx")?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Reading a DOCX file
//!
//! ```no_run
//! use doctrans::ooxml::docx::{ContentNode, Package};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let pkg = Package::open("document.docx")?;
//! let doc = pkg.document()?;
//!
//! for node in doc.content_nodes() {
//!     match *node {
//!         ContentNode::Paragraph(i) => println!("{}", doc.paragraphs()[i].text()),
//!         ContentNode::Table(i) => println!("<table {}x{}>", doc.tables()[i].row_count(), doc.tables()[i].column_count()),
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod ooxml;
pub mod pipeline;
pub mod server;
pub mod translate;

pub use pipeline::{DocumentTranslator, PipelineError, TransformReport, TranslatorOptions};
pub use translate::{TranslateError, TranslationPort};
