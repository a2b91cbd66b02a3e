//! Office Open XML support for Word documents.
//!
//! Two layers:
//!
//! 1. **OPC Layer** (`opc`): zip container, parts, content types and relationships
//! 2. **WordprocessingML** (`docx`): a read-only body view and a writer for new documents
//!
//! # Example
//!
//! ```rust,no_run
//! use doctrans::ooxml::docx::Package;
//!
//! let pkg = Package::open("document.docx")?;
//! let doc = pkg.document()?;
//! println!("{} paragraphs, {} tables", doc.paragraphs().len(), doc.tables().len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
pub mod docx;
pub mod error;
pub mod opc;

pub use error::{OoxmlError, Result};
