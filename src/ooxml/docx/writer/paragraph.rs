/// Paragraphs for the document writer.
use super::image::MutableInlineImage;
use super::relmap::RelationshipMapper;
use super::run::MutableRun;
use crate::ooxml::docx::format::ParagraphAlignment;
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// A paragraph under construction.
#[derive(Debug, Clone, Default)]
pub struct MutableParagraph {
    /// Paragraph style ID
    style: Option<String>,
    alignment: Option<ParagraphAlignment>,
    runs: Vec<MutableRun>,
}

impl MutableParagraph {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Append an empty run.
    pub fn add_run(&mut self) -> &mut MutableRun {
        self.push_run(MutableRun::new())
    }

    /// Append a run holding `text`.
    pub fn add_run_with_text(&mut self, text: &str) -> &mut MutableRun {
        let run = self.add_run();
        run.set_text(text);
        run
    }

    /// Append a run holding an inline picture of the given display size.
    ///
    /// Fails if the image format cannot be recognized from its bytes.
    pub fn add_picture(&mut self, data: Vec<u8>, width_emu: i64, height_emu: i64) -> Result<&mut MutableRun> {
        let image = MutableInlineImage::from_bytes(data, width_emu, height_emu)?;
        Ok(self.push_run(MutableRun::with_image(image)))
    }

    fn push_run(&mut self, run: MutableRun) -> &mut MutableRun {
        let index = self.runs.len();
        self.runs.push(run);
        &mut self.runs[index]
    }

    /// Drop all runs, keeping paragraph properties.
    pub fn clear_runs(&mut self) -> &mut Self {
        self.runs.clear();
        self
    }

    pub fn set_style(&mut self, style_id: Option<&str>) -> &mut Self {
        self.style = style_id.map(str::to_string);
        self
    }

    pub fn set_alignment(&mut self, alignment: Option<ParagraphAlignment>) -> &mut Self {
        self.alignment = alignment;
        self
    }

    #[inline]
    pub fn style(&self) -> Option<&str> {
        self.style.as_deref()
    }

    #[inline]
    pub fn alignment(&self) -> Option<ParagraphAlignment> {
        self.alignment
    }

    #[inline]
    pub fn runs(&self) -> &[MutableRun] {
        &self.runs
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(MutableRun::text).collect()
    }

    /// Inline pictures in run order.
    pub fn images(&self) -> impl Iterator<Item = &MutableInlineImage> {
        self.runs.iter().filter_map(MutableRun::image)
    }

    pub(crate) fn to_xml(&self, xml: &mut String, rels: &mut RelationshipMapper) -> Result<()> {
        xml.push_str("<w:p>");

        if self.style.is_some() || self.alignment.is_some() {
            xml.push_str("<w:pPr>");
            if let Some(style) = &self.style {
                write!(xml, r#"<w:pStyle w:val="{}"/>"#, quick_xml::escape::escape(style.as_str()))?;
            }
            if let Some(alignment) = self.alignment {
                write!(xml, r#"<w:jc w:val="{}"/>"#, alignment.as_str())?;
            }
            xml.push_str("</w:pPr>");
        }

        for run in &self.runs {
            run.to_xml(xml, rels)?;
        }

        xml.push_str("</w:p>");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paragraph_properties() {
        let mut para = MutableParagraph::new();
        para.set_style(Some("Heading1"))
            .set_alignment(Some(ParagraphAlignment::Justify))
            .add_run_with_text("Title");

        let mut xml = String::new();
        para.to_xml(&mut xml, &mut RelationshipMapper::new()).unwrap();
        assert!(xml.starts_with(r#"<w:p><w:pPr><w:pStyle w:val="Heading1"/><w:jc w:val="both"/></w:pPr>"#));
        assert_eq!(para.text(), "Title");
    }

    #[test]
    fn test_empty_paragraph_xml() {
        let para = MutableParagraph::new();
        let mut xml = String::new();
        para.to_xml(&mut xml, &mut RelationshipMapper::new()).unwrap();
        assert_eq!(xml, "<w:p></w:p>");
    }

    #[test]
    fn test_picture_run_uses_registered_relationship() {
        let png = vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        let mut para = MutableParagraph::new();
        para.add_picture(png, 9525, 9525).unwrap();
        assert_eq!(para.images().count(), 1);

        let mut rels = RelationshipMapper::new();
        rels.add_image("rId7".to_string());
        let mut xml = String::new();
        para.to_xml(&mut xml, &mut rels).unwrap();
        assert!(xml.contains(r#"r:embed="rId7""#));
    }
}
