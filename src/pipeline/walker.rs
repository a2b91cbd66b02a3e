//! Rebuilds a translated copy of a document, node by node.

use std::sync::Arc;

use tracing::{debug, info};

use super::error::{PipelineError, Result};
use super::images::{ImageScope, transfer_images};
use super::style::{copy_paragraph_style, copy_run_formatting, copy_table_style};
use super::text::translate_text;
use crate::ooxml::docx::writer::MutableDocument;
use crate::ooxml::docx::{ContentNode, Package, Paragraph, Table};
use crate::ooxml::opc::ReadLimits;
use crate::translate::TranslationPort;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TranslatorOptions {
    pub image_scope: ImageScope,
    /// Bounds on how far an uploaded package may expand while it is opened
    pub read_limits: ReadLimits,
}

/// Counters collected while transforming one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TransformReport {
    pub paragraphs: usize,
    pub tables: usize,
    pub images: usize,
    /// Text units kept untranslated because the backend failed
    pub fallbacks: usize,
}

/// Translates whole documents through a [`TranslationPort`].
///
/// The output keeps the source's top-level order of paragraphs and tables.
/// Each paragraph becomes a single run carrying the formatting of the
/// source's first run; tables keep their shape and get uniform borders.
///
/// ```no_run
/// use std::sync::Arc;
/// use doctrans::pipeline::{DocumentTranslator, TranslatorOptions};
/// # fn run(port: Arc<dyn doctrans::translate::TranslationPort>) -> Result<(), Box<dyn std::error::Error>> {
/// let translator = DocumentTranslator::new(port, TranslatorOptions::default());
/// let input = std::fs::read("report.docx")?;
/// let output = translator.translate_bytes(&input, "fr")?;
/// output.save("report.fr.docx")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct DocumentTranslator {
    port: Arc<dyn TranslationPort>,
    options: TranslatorOptions,
}

impl DocumentTranslator {
    pub fn new(port: Arc<dyn TranslationPort>, options: TranslatorOptions) -> Self {
        Self { port, options }
    }

    #[inline]
    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Open `data` as a Word package and translate it into `target`.
    pub fn translate_bytes(&self, data: &[u8], target: &str) -> Result<MutableDocument> {
        let package = Package::from_bytes_with_limits(data, self.options.read_limits)
            .map_err(|e| PipelineError::UnsupportedFileKind(e.to_string()))?;
        self.transform(&package, target)
    }

    /// Translate an opened package into `target`.
    pub fn transform(&self, package: &Package, target: &str) -> Result<MutableDocument> {
        self.transform_with_report(package, target)
            .map(|(document, _)| document)
    }

    /// Like [`transform`](Self::transform), also returning what was done.
    pub fn transform_with_report(
        &self,
        package: &Package,
        target: &str,
    ) -> Result<(MutableDocument, TransformReport)> {
        let source = package
            .document()
            .map_err(|e| PipelineError::UnsupportedFileKind(e.to_string()))?;

        let mut output = MutableDocument::new();
        if let Some(styles) = package.styles_xml() {
            output.set_styles_xml(styles.to_vec());
        }

        let mut report = TransformReport::default();
        let mut pass = Pass {
            port: self.port.as_ref(),
            package,
            target,
            scope: self.options.image_scope,
            report: &mut report,
        };

        for node in source.content_nodes() {
            match *node {
                ContentNode::Paragraph(index) => {
                    if let Some(paragraph) = source.paragraph(index) {
                        pass.paragraph(paragraph, &mut output);
                    }
                },
                ContentNode::Table(index) => {
                    if let Some(table) = source.table(index) {
                        pass.table(table, &mut output);
                    }
                },
            }
        }

        info!(
            backend = self.port.name(),
            language = target,
            paragraphs = report.paragraphs,
            tables = report.tables,
            images = report.images,
            fallbacks = report.fallbacks,
            "document translated"
        );
        Ok((output, report))
    }
}

/// State of a single transformation.
struct Pass<'a> {
    port: &'a dyn TranslationPort,
    package: &'a Package,
    target: &'a str,
    scope: ImageScope,
    report: &'a mut TransformReport,
}

impl Pass<'_> {
    fn text(&mut self, text: &str) -> String {
        let outcome = translate_text(self.port, text, self.target);
        if outcome.is_fallback() {
            self.report.fallbacks += 1;
        }
        outcome.into_text()
    }

    fn paragraph(&mut self, source: &Paragraph, output: &mut MutableDocument) {
        self.report.paragraphs += 1;
        let paragraph = output.add_paragraph();
        copy_paragraph_style(source, paragraph);

        let Some(first_run) = source.runs().first() else {
            return;
        };

        let translated = self.text(&source.text());
        let run = paragraph.add_run_with_text(&translated);
        copy_run_formatting(first_run, run);

        self.report.images += transfer_images(self.package, source.runs(), self.scope, paragraph);
    }

    fn table(&mut self, source: &Table, output: &mut MutableDocument) {
        self.report.tables += 1;
        let columns = source.column_count();
        let table = output.add_table(columns);
        debug!(rows = source.row_count(), columns, "translating table");

        for row in source.rows() {
            let out_row = table.add_row();
            // A merged cell lands in the grid column it starts at; the columns it spans stay empty.
            for (column, cell) in row.cells_by_column() {
                let Some(out_cell) = out_row.cells_mut().get_mut(column) else {
                    break;
                };
                let translated = self.text(&cell.text());
                out_cell.set_text(&translated);

                let first_paragraph = out_cell.first_paragraph_mut();
                if let Some(alignment) = cell.paragraphs().first().and_then(Paragraph::alignment) {
                    first_paragraph.set_alignment(Some(alignment));
                }
                for paragraph in cell.paragraphs() {
                    self.report.images +=
                        transfer_images(self.package, paragraph.runs(), self.scope, first_paragraph);
                }
            }
        }

        copy_table_style(source, table);
    }
}

impl std::fmt::Debug for DocumentTranslator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentTranslator")
            .field("backend", &self.port.name())
            .field("options", &self.options)
            .finish()
    }
}
