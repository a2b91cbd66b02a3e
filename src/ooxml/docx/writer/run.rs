/// Runs for the document writer.
use super::image::MutableInlineImage;
use super::relmap::RelationshipMapper;
use crate::ooxml::docx::format::{RgbColor, RunFormatting};
use crate::ooxml::error::Result;
use std::fmt::Write as FmtWrite;

/// A run of text or an inline picture with direct formatting.
#[derive(Debug, Clone, Default)]
pub struct MutableRun {
    text: String,
    formatting: RunFormatting,
    image: Option<MutableInlineImage>,
}

impl MutableRun {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_image(image: MutableInlineImage) -> Self {
        Self {
            image: Some(image),
            ..Self::default()
        }
    }

    pub fn set_text(&mut self, text: &str) -> &mut Self {
        self.text = text.to_string();
        self
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn formatting(&self) -> &RunFormatting {
        &self.formatting
    }

    /// Replace all direct formatting.
    pub fn set_formatting(&mut self, formatting: RunFormatting) -> &mut Self {
        self.formatting = formatting;
        self
    }

    /// `None` leaves boldness to the style.
    pub fn bold(&mut self, bold: Option<bool>) -> &mut Self {
        self.formatting.bold = bold;
        self
    }

    pub fn italic(&mut self, italic: Option<bool>) -> &mut Self {
        self.formatting.italic = italic;
        self
    }

    pub fn underline(&mut self, underline: Option<bool>) -> &mut Self {
        self.formatting.underline = underline;
        self
    }

    /// Font size in half-points.
    pub fn font_size(&mut self, half_points: Option<u32>) -> &mut Self {
        self.formatting.font_size = half_points;
        self
    }

    pub fn font_name(&mut self, name: Option<&str>) -> &mut Self {
        self.formatting.font_name = name.map(str::to_string);
        self
    }

    pub fn color(&mut self, color: Option<RgbColor>) -> &mut Self {
        self.formatting.color = color;
        self
    }

    #[inline]
    pub fn image(&self) -> Option<&MutableInlineImage> {
        self.image.as_ref()
    }

    pub fn image_mut(&mut self) -> Option<&mut MutableInlineImage> {
        self.image.as_mut()
    }

    pub(crate) fn to_xml(&self, xml: &mut String, rels: &mut RelationshipMapper) -> Result<()> {
        xml.push_str("<w:r>");
        self.write_properties(xml)?;

        if let Some(image) = &self.image {
            let (r_id, doc_pr_id) = rels.next_image()?;
            image.to_xml(xml, r_id, doc_pr_id)?;
        }

        write_text(xml, &self.text)?;
        xml.push_str("</w:r>");
        Ok(())
    }

    /// `w:rPr`, with children in schema order. Unset values are not written.
    fn write_properties(&self, xml: &mut String) -> Result<()> {
        let fmt = &self.formatting;
        if fmt.is_empty() {
            return Ok(());
        }

        xml.push_str("<w:rPr>");
        if let Some(name) = &fmt.font_name {
            let name = quick_xml::escape::escape(name.as_str());
            write!(
                xml,
                r#"<w:rFonts w:ascii="{name}" w:hAnsi="{name}" w:eastAsia="{name}" w:cs="{name}"/>"#
            )?;
        }
        write_toggle(xml, "b", fmt.bold);
        write_toggle(xml, "i", fmt.italic);
        if let Some(color) = fmt.color {
            write!(xml, r#"<w:color w:val="{}"/>"#, color)?;
        }
        if let Some(size) = fmt.font_size {
            let mut buf = itoa::Buffer::new();
            let size = buf.format(size);
            write!(xml, r#"<w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#)?;
        }
        match fmt.underline {
            Some(true) => xml.push_str(r#"<w:u w:val="single"/>"#),
            Some(false) => xml.push_str(r#"<w:u w:val="none"/>"#),
            None => {},
        }
        xml.push_str("</w:rPr>");
        Ok(())
    }
}

fn write_toggle(xml: &mut String, name: &str, value: Option<bool>) {
    match value {
        Some(true) => {
            xml.push_str("<w:");
            xml.push_str(name);
            xml.push_str("/>");
        },
        Some(false) => {
            xml.push_str("<w:");
            xml.push_str(name);
            xml.push_str(r#" w:val="0"/>"#);
        },
        None => {},
    }
}

/// Write text as `w:t` segments, turning tabs and newlines into `w:tab` and `w:br`.
fn write_text(xml: &mut String, text: &str) -> Result<()> {
    let mut segment_start = 0;
    for (pos, ch) in text.char_indices() {
        let element = match ch {
            '\t' => "<w:tab/>",
            '\n' => "<w:br/>",
            _ => continue,
        };
        write_segment(xml, &text[segment_start..pos])?;
        xml.push_str(element);
        segment_start = pos + ch.len_utf8();
    }
    write_segment(xml, &text[segment_start..])
}

fn write_segment(xml: &mut String, segment: &str) -> Result<()> {
    let segment = segment.trim_end_matches('\r');
    if !segment.is_empty() {
        write!(
            xml,
            r#"<w:t xml:space="preserve">{}</w:t>"#,
            quick_xml::escape::escape(segment)
        )?;
    }
    Ok(())
}
