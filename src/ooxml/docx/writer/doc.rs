/// The output document and its serialization to a .docx package.
use super::image::MutableInlineImage;
use super::paragraph::MutableParagraph;
use super::relmap::RelationshipMapper;
use super::styles::DEFAULT_STYLES_XML;
use super::table::MutableTable;
use crate::ooxml::error::Result;
use crate::ooxml::opc::constants::{content_type as ct, namespace as ns, relationship_type as rt};
use crate::ooxml::opc::{OpcPackage, PackURI, Part, Relationships};
use std::fmt::Write as FmtWrite;
use std::path::Path;

const DOCUMENT_PARTNAME: &str = "/word/document.xml";
const STYLES_PARTNAME: &str = "/word/styles.xml";

/// A top-level body element of the output.
#[derive(Debug, Clone)]
pub enum BodyElement {
    Paragraph(MutableParagraph),
    Table(MutableTable),
}

/// A Word document built by appending paragraphs and tables.
///
/// # Examples
///
/// ```
/// use doctrans::ooxml::docx::writer::MutableDocument;
///
/// let mut doc = MutableDocument::new();
/// doc.add_paragraph().add_run_with_text("Bonjour").bold(Some(true));
/// let table = doc.add_table(2);
/// table.add_row().cells_mut()[0].set_text("A1");
///
/// let bytes = doc.to_bytes()?;
/// assert!(bytes.starts_with(b"PK"));
/// # Ok::<(), doctrans::ooxml::error::OoxmlError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct MutableDocument {
    elements: Vec<BodyElement>,
    /// Style registry copied from a source document
    styles_xml: Option<Vec<u8>>,
}

impl MutableDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty paragraph.
    pub fn add_paragraph(&mut self) -> &mut MutableParagraph {
        let index = self.elements.len();
        self.elements.push(BodyElement::Paragraph(MutableParagraph::new()));
        match &mut self.elements[index] {
            BodyElement::Paragraph(paragraph) => paragraph,
            BodyElement::Table(_) => unreachable!("a paragraph was just appended"),
        }
    }

    /// Append a table with `column_count` columns and no rows.
    pub fn add_table(&mut self, column_count: usize) -> &mut MutableTable {
        let index = self.elements.len();
        self.elements.push(BodyElement::Table(MutableTable::new(column_count)));
        match &mut self.elements[index] {
            BodyElement::Table(table) => table,
            BodyElement::Paragraph(_) => unreachable!("a table was just appended"),
        }
    }

    /// Use `xml` as the style registry of the output.
    pub fn set_styles_xml(&mut self, xml: Vec<u8>) -> &mut Self {
        self.styles_xml = Some(xml);
        self
    }

    #[inline]
    pub fn styles_xml(&self) -> Option<&[u8]> {
        self.styles_xml.as_deref()
    }

    #[inline]
    pub fn elements(&self) -> &[BodyElement] {
        &self.elements
    }

    /// Top-level paragraphs in order.
    pub fn paragraphs(&self) -> impl Iterator<Item = &MutableParagraph> {
        self.elements.iter().filter_map(|element| match element {
            BodyElement::Paragraph(paragraph) => Some(paragraph),
            BodyElement::Table(_) => None,
        })
    }

    /// Tables in order.
    pub fn tables(&self) -> impl Iterator<Item = &MutableTable> {
        self.elements.iter().filter_map(|element| match element {
            BodyElement::Table(table) => Some(table),
            BodyElement::Paragraph(_) => None,
        })
    }

    /// Every inline image, in the order the body serializer emits them.
    pub fn images(&self) -> Vec<&MutableInlineImage> {
        let mut images = Vec::new();
        for element in &self.elements {
            match element {
                BodyElement::Paragraph(paragraph) => images.extend(paragraph.images()),
                BodyElement::Table(table) => {
                    images.extend(table.paragraphs().flat_map(MutableParagraph::images));
                },
            }
        }
        images
    }

    /// XML of the main document part.
    pub(crate) fn to_xml(&self, rels: &mut RelationshipMapper) -> Result<String> {
        let mut xml = String::with_capacity(4096);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        write!(
            xml,
            r#"<w:document xmlns:w="{}" xmlns:r="{}" xmlns:wp="{}" xmlns:a="{}" xmlns:pic="{}"><w:body>"#,
            ns::WML_MAIN,
            ns::OFC_RELATIONSHIPS,
            ns::DML_WORDPROCESSING_DRAWING,
            ns::DML_MAIN,
            ns::DML_PICTURE
        )?;

        for element in &self.elements {
            match element {
                BodyElement::Paragraph(paragraph) => paragraph.to_xml(&mut xml, rels)?,
                BodyElement::Table(table) => table.to_xml(&mut xml, rels)?,
            }
        }

        // US Letter with one-inch margins
        xml.push_str(r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/><w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/></w:sectPr>"#);
        xml.push_str("</w:body></w:document>");
        Ok(xml)
    }

    /// Assemble the OPC package: document, styles and one media part per image.
    pub fn to_package(&self) -> Result<OpcPackage> {
        let document_uri = PackURI::from_membername(&DOCUMENT_PARTNAME[1..]);
        let styles_uri = PackURI::from_membername(&STYLES_PARTNAME[1..]);

        let mut package = OpcPackage::new();
        package.relate_to(&document_uri, rt::OFFICE_DOCUMENT);

        let mut document_rels = Relationships::new(document_uri.base_uri());
        document_rels.get_or_add(rt::STYLES, &styles_uri.relative_ref(document_uri.base_uri()));

        let mut mapper = RelationshipMapper::new();
        for (index, image) in self.images().into_iter().enumerate() {
            let media_uri =
                PackURI::from_membername(&format!("word/media/image{}.{}", index + 1, image.format().extension()));
            let r_id = document_rels.get_or_add(rt::IMAGE, &media_uri.relative_ref(document_uri.base_uri()));
            mapper.add_image(r_id);
            package.add_part(Part::new(media_uri, image.format().mime_type(), image.data().to_vec()));
        }

        let document_xml = self.to_xml(&mut mapper)?;
        package.add_part(
            Part::new(document_uri, ct::WML_DOCUMENT_MAIN, document_xml.into_bytes()).with_rels(document_rels),
        );

        let styles = self
            .styles_xml
            .clone()
            .unwrap_or_else(|| DEFAULT_STYLES_XML.as_bytes().to_vec());
        package.add_part(Part::new(styles_uri, ct::WML_STYLES, styles));

        Ok(package)
    }

    /// Serialize to .docx bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_package()?.to_bytes()?)
    }

    /// Serialize and write to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.to_bytes()?)?;
        Ok(())
    }
}
