//! Carrying formatting from the source document onto the output.

use crate::ooxml::docx::writer::{CellBorders, MutableParagraph, MutableRun, MutableTable};
use crate::ooxml::docx::{Paragraph, Run, Table};

/// Copy direct run formatting. Attributes the source inherits stay unset.
pub fn copy_run_formatting(source: &Run, dest: &mut MutableRun) {
    let formatting = source.formatting();
    dest.bold(formatting.bold)
        .italic(formatting.italic)
        .underline(formatting.underline)
        .font_name(formatting.font_name.as_deref())
        .font_size(formatting.font_size)
        .color(formatting.color);
}

/// Copy the paragraph style id.
pub fn copy_paragraph_style(source: &Paragraph, dest: &mut MutableParagraph) {
    dest.set_style(source.style_id());
}

/// Give every cell of `dest` a single-line border and copy the table style id.
///
/// The source's own cell borders are not consulted. Call this after the rows
/// of `dest` have been added.
pub fn copy_table_style(source: &Table, dest: &mut MutableTable) {
    for cell in dest.cells_mut() {
        cell.set_borders(CellBorders::uniform_single());
    }
    if let Some(style_id) = source.style_id() {
        dest.set_style(Some(style_id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::docx::RgbColor;
    use crate::ooxml::docx::writer::{BorderStyle, MutableDocument};

    const W: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

    #[test]
    fn test_copy_run_formatting() {
        let xml = format!(
            r#"<w:p {W}><w:pPr><w:pStyle w:val="Heading1"/></w:pPr><w:r><w:rPr><w:rFonts w:ascii="Arial"/><w:b/><w:i w:val="0"/><w:color w:val="FF0000"/><w:sz w:val="28"/></w:rPr><w:t>Hi</w:t></w:r></w:p>"#
        );
        let source = Paragraph::from_xml(xml.as_bytes()).unwrap();

        let mut doc = MutableDocument::new();
        let paragraph = doc.add_paragraph();
        copy_paragraph_style(&source, paragraph);
        let run = paragraph.add_run_with_text("Salut");
        copy_run_formatting(&source.runs()[0], run);

        let formatting = run.formatting();
        assert_eq!(formatting.bold, Some(true));
        assert_eq!(formatting.italic, Some(false));
        assert_eq!(formatting.underline, None);
        assert_eq!(formatting.font_name.as_deref(), Some("Arial"));
        assert_eq!(formatting.font_size, Some(28));
        assert_eq!(formatting.color, Some(RgbColor(0xFF, 0, 0)));
        assert_eq!(paragraph.style(), Some("Heading1"));
    }

    #[test]
    fn test_unset_formatting_stays_unset() {
        let xml = format!(r#"<w:p {W}><w:r><w:t>plain</w:t></w:r></w:p>"#);
        let source = Paragraph::from_xml(xml.as_bytes()).unwrap();

        let mut doc = MutableDocument::new();
        let paragraph = doc.add_paragraph();
        copy_paragraph_style(&source, paragraph);
        let run = paragraph.add_run_with_text("simple");
        copy_run_formatting(&source.runs()[0], run);

        assert!(run.formatting().is_empty());
        assert_eq!(paragraph.style(), None);
    }

    #[test]
    fn test_copy_table_style() {
        let xml = format!(
            r#"<w:tbl {W}><w:tblPr><w:tblStyle w:val="LightGrid"/></w:tblPr><w:tblGrid><w:gridCol/><w:gridCol/></w:tblGrid><w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc></w:tr></w:tbl>"#
        );
        let source = Table::from_xml(xml.as_bytes()).unwrap();

        let mut doc = MutableDocument::new();
        let table = doc.add_table(source.column_count());
        table.add_row();
        table.add_row();
        copy_table_style(&source, table);

        assert_eq!(table.style(), Some("LightGrid"));
        for row in table.rows() {
            for cell in row.cells() {
                let borders = cell.borders().unwrap();
                assert_eq!(borders.top.as_ref().unwrap().style, BorderStyle::Single);
                assert_eq!(borders.right.as_ref().unwrap().color, "auto");
            }
        }
    }
}
