//! Writer API for building a new Word document.
//!
//! The output is append-only: paragraphs and tables are added at the end of
//! the body and the whole document is serialized once.

pub mod doc;
pub mod image;
pub mod paragraph;
pub(crate) mod relmap;
pub mod run;
pub mod styles;
pub mod table;

pub use doc::{BodyElement, MutableDocument};
pub use image::{EMU_PER_INCH, EMU_PER_PX, MutableInlineImage};
pub use paragraph::MutableParagraph;
pub use run::MutableRun;
pub use table::{Border, BorderStyle, CellBorders, MutableCell, MutableRow, MutableTable};
