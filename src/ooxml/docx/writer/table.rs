/// Tables for the document writer.
use super::paragraph::MutableParagraph;
use super::relmap::RelationshipMapper;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// Text width of a Letter page with one-inch margins, in twentieths of a point.
const TEXT_WIDTH_DXA: u32 = 9360;

/// Line style of a border edge (`ST_Border`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderStyle {
    Single,
    Double,
    Dotted,
    Dashed,
    Nil,
}

impl BorderStyle {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Dotted => "dotted",
            Self::Dashed => "dashed",
            Self::Nil => "nil",
        }
    }
}

/// One border edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Border {
    pub style: BorderStyle,
    /// Width in eighths of a point (4 = half a point)
    pub size: u32,
    /// Distance from the text in points
    pub space: u32,
    /// `RRGGBB` or `auto`
    pub color: String,
}

impl Default for Border {
    fn default() -> Self {
        Self {
            style: BorderStyle::Single,
            size: 4,
            space: 0,
            color: "auto".to_string(),
        }
    }
}

/// Borders of a single cell (`w:tcBorders`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CellBorders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
}

impl CellBorders {
    /// A thin single line in the automatic color on all four edges.
    pub fn uniform_single() -> Self {
        Self {
            top: Some(Border::default()),
            left: Some(Border::default()),
            bottom: Some(Border::default()),
            right: Some(Border::default()),
        }
    }

    fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }

    fn to_xml(&self, xml: &mut String) -> Result<()> {
        xml.push_str("<w:tcBorders>");
        let edges = [
            ("top", &self.top),
            ("left", &self.left),
            ("bottom", &self.bottom),
            ("right", &self.right),
        ];
        for (name, border) in edges {
            if let Some(border) = border {
                write!(
                    xml,
                    r#"<w:{} w:val="{}" w:sz="{}" w:space="{}" w:color="{}"/>"#,
                    name,
                    border.style.as_str(),
                    border.size,
                    border.space,
                    quick_xml::escape::escape(border.color.as_str())
                )?;
            }
        }
        xml.push_str("</w:tcBorders>");
        Ok(())
    }
}

/// A table with a fixed number of columns.
#[derive(Debug, Clone)]
pub struct MutableTable {
    /// Table style ID
    style: Option<String>,
    column_count: usize,
    rows: Vec<MutableRow>,
}

impl MutableTable {
    pub(crate) fn new(column_count: usize) -> Self {
        Self {
            style: None,
            column_count,
            rows: Vec::new(),
        }
    }

    /// Append a row with exactly `column_count` empty cells.
    pub fn add_row(&mut self) -> &mut MutableRow {
        let index = self.rows.len();
        self.rows.push(MutableRow {
            cells: (0..self.column_count).map(|_| MutableCell::new()).collect(),
        });
        &mut self.rows[index]
    }

    pub fn set_style(&mut self, style_id: Option<&str>) -> &mut Self {
        self.style = style_id.map(str::to_string);
        self
    }

    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    #[inline]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    #[inline]
    pub fn rows(&self) -> &[MutableRow] {
        &self.rows
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&MutableCell> {
        self.rows.get(row)?.cells.get(col)
    }

    pub fn cell_mut(&mut self, row: usize, col: usize) -> Option<&mut MutableCell> {
        self.rows.get_mut(row)?.cells.get_mut(col)
    }

    /// Cells of all rows, row by row.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut MutableCell> {
        self.rows.iter_mut().flat_map(|row| row.cells.iter_mut())
    }

    pub(crate) fn paragraphs(&self) -> impl Iterator<Item = &MutableParagraph> {
        self.rows
            .iter()
            .flat_map(|row| row.cells.iter())
            .flat_map(|cell| cell.paragraphs.iter())
    }

    fn column_width(&self) -> u32 {
        TEXT_WIDTH_DXA / self.column_count.max(1) as u32
    }

    pub(crate) fn to_xml(&self, xml: &mut String, rels: &mut RelationshipMapper) -> Result<()> {
        xml.push_str("<w:tbl><w:tblPr>");
        if let Some(style) = &self.style {
            write!(xml, r#"<w:tblStyle w:val="{}"/>"#, quick_xml::escape::escape(style.as_str()))?;
        }
        xml.push_str(r#"<w:tblW w:w="0" w:type="auto"/><w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/></w:tblPr>"#);

        let width = self.column_width();
        xml.push_str("<w:tblGrid>");
        for _ in 0..self.column_count {
            write!(xml, r#"<w:gridCol w:w="{}"/>"#, width)?;
        }
        xml.push_str("</w:tblGrid>");

        for row in &self.rows {
            xml.push_str("<w:tr>");
            for cell in &row.cells {
                cell.to_xml(xml, rels, width)?;
            }
            xml.push_str("</w:tr>");
        }

        xml.push_str("</w:tbl>");
        Ok(())
    }
}

/// A table row.
#[derive(Debug, Clone)]
pub struct MutableRow {
    cells: Vec<MutableCell>,
}

impl MutableRow {
    #[inline]
    pub fn cells(&self) -> &[MutableCell] {
        &self.cells
    }

    #[inline]
    pub fn cells_mut(&mut self) -> &mut [MutableCell] {
        &mut self.cells
    }
}

/// A table cell; it always holds at least one paragraph.
#[derive(Debug, Clone)]
pub struct MutableCell {
    paragraphs: Vec<MutableParagraph>,
    borders: Option<CellBorders>,
}

impl MutableCell {
    fn new() -> Self {
        Self {
            paragraphs: vec![MutableParagraph::new()],
            borders: None,
        }
    }

    /// Replace the content of the first paragraph with a single run of `text`.
    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.first_paragraph_mut().clear_runs().add_run_with_text(text);
        self
    }

    /// Concatenated text of all paragraphs, separated by newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(MutableParagraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn first_paragraph_mut(&mut self) -> &mut MutableParagraph {
        &mut self.paragraphs[0]
    }

    #[inline]
    pub fn paragraphs(&self) -> &[MutableParagraph] {
        &self.paragraphs
    }

    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        let index = self.paragraphs.len();
        self.paragraphs.push(MutableParagraph::new());
        &mut self.paragraphs[index]
    }

    pub fn set_borders(&mut self, borders: CellBorders) -> &mut Self {
        self.borders = Some(borders);
        self
    }

    #[inline]
    pub fn borders(&self) -> Option<&CellBorders> {
        self.borders.as_ref()
    }

    fn to_xml(&self, xml: &mut String, rels: &mut RelationshipMapper, width: u32) -> Result<()> {
        write!(xml, r#"<w:tc><w:tcPr><w:tcW w:w="{}" w:type="dxa"/>"#, width)?;
        if let Some(borders) = &self.borders
            && !borders.is_empty()
        {
            borders.to_xml(xml)?;
        }
        xml.push_str("</w:tcPr>");
        for paragraph in &self.paragraphs {
            paragraph.to_xml(xml, rels)?;
        }
        xml.push_str("</w:tc>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_have_fixed_column_count() {
        let mut table = MutableTable::new(3);
        table.add_row();
        table.add_row();
        assert_eq!(table.rows().len(), 2);
        assert!(table.rows().iter().all(|row| row.cells().len() == 3));
        assert!(table.cell(1, 2).is_some());
        assert!(table.cell(1, 3).is_none());
    }

    #[test]
    fn test_cell_set_text_replaces_first_paragraph() {
        let mut table = MutableTable::new(1);
        table.add_row();
        let cell = table.cell_mut(0, 0).unwrap();
        cell.set_text("first");
        cell.set_text("second");
        assert_eq!(cell.paragraphs().len(), 1);
        assert_eq!(cell.paragraphs()[0].runs().len(), 1);
        assert_eq!(cell.text(), "second");
    }

    #[test]
    fn test_uniform_borders_xml() {
        let mut table = MutableTable::new(2);
        table.set_style(Some("TableGrid"));
        table.add_row();
        for cell in table.cells_mut() {
            cell.set_borders(CellBorders::uniform_single());
        }

        let mut xml = String::new();
        table.to_xml(&mut xml, &mut RelationshipMapper::new()).unwrap();

        assert!(xml.contains(r#"<w:tblStyle w:val="TableGrid"/>"#));
        assert_eq!(xml.matches(r#"<w:gridCol w:w="4680"/>"#).count(), 2);
        assert_eq!(xml.matches("<w:tcBorders>").count(), 2);
        assert_eq!(
            xml.matches(r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#).count(),
            2
        );
        // every cell keeps a paragraph, as the schema requires
        assert_eq!(xml.matches("<w:p>").count(), 2);
    }
}
