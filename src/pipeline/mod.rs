//! The document translation pipeline.
//!
//! A source package is read once through [`crate::ooxml::docx::Package`]; a
//! fresh [`crate::ooxml::docx::writer::MutableDocument`] is grown node by node
//! with translated text, carried-over formatting and re-inserted pictures.

pub mod error;
pub mod images;
pub mod style;
pub mod text;
pub mod walker;

pub use error::PipelineError;
pub use images::{ImageScope, scale_to_box, transfer_images};
pub use style::{copy_paragraph_style, copy_run_formatting, copy_table_style};
pub use text::{TextOutcome, translate_text, translate_text_with_fallback};
pub use walker::{DocumentTranslator, TransformReport, TranslatorOptions};
