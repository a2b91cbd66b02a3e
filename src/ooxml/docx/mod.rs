/// Word document (.docx) support.
///
/// Reading produces a read-only view of the body: paragraphs with their runs
/// and run formatting, one level of tables, and image relationships. Writing
/// builds a fresh document from scratch through [`writer::MutableDocument`].
///
/// # Example
///
/// ```rust,no_run
/// use doctrans::ooxml::docx::{ContentNode, Package};
///
/// let pkg = Package::open("report.docx")?;
/// let doc = pkg.document()?;
/// for node in doc.content_nodes() {
///     match *node {
///         ContentNode::Paragraph(i) => println!("{}", doc.paragraphs()[i].text()),
///         ContentNode::Table(i) => println!("table with {} rows", doc.tables()[i].row_count()),
///     }
/// }
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub mod document;
pub mod format;
pub mod image;
pub mod package;
pub mod paragraph;
pub mod table;
pub mod writer;

pub use document::{ContentNode, Document};
pub use format::{ImageFormat, ParagraphAlignment, RgbColor, RunFormatting};
pub use image::ImageRelation;
pub use package::Package;
pub use paragraph::{Paragraph, Run};
pub use table::{Cell, Row, Table};
