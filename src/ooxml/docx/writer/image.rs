/// Inline pictures for the document writer.
use crate::ooxml::docx::format::ImageFormat;
use crate::ooxml::error::{OoxmlError, Result};
use std::fmt::Write as FmtWrite;

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per pixel at 96 dpi.
pub const EMU_PER_PX: i64 = EMU_PER_INCH / 96;

/// An inline picture owned by a run.
#[derive(Debug, Clone)]
pub struct MutableInlineImage {
    data: Vec<u8>,
    format: ImageFormat,
    /// Display width in EMUs (1 inch = 914400 EMUs)
    width_emu: i64,
    /// Display height in EMUs
    height_emu: i64,
    description: String,
}

impl MutableInlineImage {
    /// Wrap image bytes; fails if the format is not recognized.
    pub fn from_bytes(data: Vec<u8>, width_emu: i64, height_emu: i64) -> Result<Self> {
        let format = ImageFormat::detect_from_bytes(&data)
            .ok_or_else(|| OoxmlError::InvalidFormat("Unknown image format".to_string()))?;

        Ok(Self {
            data,
            format,
            width_emu,
            height_emu,
            description: String::new(),
        })
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> &mut Self {
        self.description = description.into();
        self
    }

    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    #[inline]
    pub fn format(&self) -> ImageFormat {
        self.format
    }

    #[inline]
    pub fn width_emu(&self) -> i64 {
        self.width_emu
    }

    #[inline]
    pub fn height_emu(&self) -> i64 {
        self.height_emu
    }

    /// Convert pixels at 96 dpi to EMUs.
    pub fn px_to_emu(px: f64) -> i64 {
        (px * EMU_PER_PX as f64).round() as i64
    }

    /// Serialize as a `w:drawing` element referencing `r_id`.
    ///
    /// `doc_pr_id` must be unique among drawings in the document.
    pub(crate) fn to_xml(&self, xml: &mut String, r_id: &str, doc_pr_id: usize) -> Result<()> {
        let desc = quick_xml::escape::escape(self.description.as_str());
        let mut cx = itoa::Buffer::new();
        let cx = cx.format(self.width_emu);
        let mut cy = itoa::Buffer::new();
        let cy = cy.format(self.height_emu);

        write!(
            xml,
            r#"<w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0"><wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/><wp:docPr id="{id}" name="Picture {id}" descr="{desc}"/><wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr><a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture"><pic:pic><pic:nvPicPr><pic:cNvPr id="{id}" name="image{id}.{ext}" descr="{desc}"/><pic:cNvPicPr/></pic:nvPicPr><pic:blipFill><a:blip r:embed="{r_id}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill><pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic></a:graphicData></a:graphic></wp:inline></w:drawing>"#,
            id = doc_pr_id,
            ext = self.format.extension(),
        )?;

        Ok(())
    }
}
