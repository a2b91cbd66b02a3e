/// The main document part: body content in document order.
use crate::ooxml::docx::paragraph::Paragraph;
use crate::ooxml::docx::table::Table;
use crate::ooxml::error::{OoxmlError, Result};
use quick_xml::Reader;
use quick_xml::events::Event;

/// A top-level body element, tagged with its position among elements of the same kind.
///
/// `Table(k)` is the k-th top-level table of the body, so a node is resolved
/// with [`Document::table`] rather than by matching markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentNode {
    Paragraph(usize),
    Table(usize),
}

/// Parsed `w:body` of a Word document.
#[derive(Debug, Clone, Default)]
pub struct Document {
    nodes: Vec<ContentNode>,
    paragraphs: Vec<Paragraph>,
    tables: Vec<Table>,
}

impl Document {
    /// Parse the XML of a main document part.
    ///
    /// Body children other than paragraphs and tables (section properties,
    /// content controls, bookmarks) are skipped.
    pub fn from_xml(xml: &[u8]) -> Result<Self> {
        let mut reader = Reader::from_reader(xml);
        let mut document = Self::default();

        loop {
            match reader.read_event()? {
                Event::Start(e) if e.local_name().as_ref() == b"body" => break,
                Event::Empty(e) if e.local_name().as_ref() == b"body" => return Ok(document),
                Event::Eof => return Err(OoxmlError::Xml("document part has no w:body".to_string())),
                _ => {},
            }
        }

        loop {
            match reader.read_event()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"p" => {
                        let paragraph = Paragraph::parse(&mut reader)?;
                        document.push_paragraph(paragraph);
                    },
                    b"tbl" => {
                        let table = Table::parse(&mut reader)?;
                        document.nodes.push(ContentNode::Table(document.tables.len()));
                        document.tables.push(table);
                    },
                    _ => {
                        reader.read_to_end(e.name())?;
                    },
                },
                Event::Empty(e) if e.local_name().as_ref() == b"p" => document.push_paragraph(Paragraph::default()),
                Event::End(e) if e.local_name().as_ref() == b"body" => break,
                Event::Eof => return Err(OoxmlError::Xml("unexpected end of part inside w:body".to_string())),
                _ => {},
            }
        }

        Ok(document)
    }

    fn push_paragraph(&mut self, paragraph: Paragraph) {
        self.nodes.push(ContentNode::Paragraph(self.paragraphs.len()));
        self.paragraphs.push(paragraph);
    }

    /// Top-level nodes in document order.
    #[inline]
    pub fn content_nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Top-level paragraphs in document order.
    #[inline]
    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    /// Top-level tables in document order.
    #[inline]
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    #[inline]
    pub fn paragraph(&self, index: usize) -> Option<&Paragraph> {
        self.paragraphs.get(index)
    }

    #[inline]
    pub fn table(&self, index: usize) -> Option<&Table> {
        self.tables.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_order() {
        let xml = br#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Intro</w:t></w:r></w:p>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>T1</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:p/>
    <w:bookmarkStart w:id="0" w:name="x"/>
    <w:sdt><w:sdtContent><w:p><w:r><w:t>hidden in control</w:t></w:r></w:p></w:sdtContent></w:sdt>
    <w:tbl><w:tr><w:tc><w:p><w:r><w:t>T2</w:t></w:r></w:p></w:tc></w:tr></w:tbl>
    <w:sectPr><w:pgSz w:w="12240" w:h="15840"/></w:sectPr>
  </w:body>
</w:document>"#;

        let doc = Document::from_xml(xml).unwrap();
        assert_eq!(
            doc.content_nodes(),
            [
                ContentNode::Paragraph(0),
                ContentNode::Table(0),
                ContentNode::Paragraph(1),
                ContentNode::Table(1),
            ]
        );
        assert_eq!(doc.paragraph(0).unwrap().text(), "Intro");
        assert_eq!(doc.table(1).unwrap().rows()[0].cells()[0].text(), "T2");
        assert!(doc.table(2).is_none());
    }

    #[test]
    fn test_missing_body() {
        let xml = br#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"/>"#;
        assert!(Document::from_xml(xml).is_err());
    }
}
