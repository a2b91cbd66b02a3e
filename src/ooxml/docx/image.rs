/// Embedded images reachable from the main document part.
///
/// An image is linked to the body by a relationship id (`r:embed` on a
/// DrawingML blip, `r:id` on VML image data) that resolves to a media part.
use crate::ooxml::docx::format::ImageFormat;
use std::io::Cursor;

/// An image relationship of the main document part and the bytes it points to.
#[derive(Debug, Clone, Copy)]
pub struct ImageRelation<'a> {
    r_id: &'a str,
    target_ref: &'a str,
    data: &'a [u8],
}

impl<'a> ImageRelation<'a> {
    pub(crate) fn new(r_id: &'a str, target_ref: &'a str, data: &'a [u8]) -> Self {
        Self { r_id, target_ref, data }
    }

    #[inline]
    pub fn r_id(&self) -> &'a str {
        self.r_id
    }

    /// Target reference as written in the relationships part, e.g. `media/image1.png`.
    #[inline]
    pub fn target_ref(&self) -> &'a str {
        self.target_ref
    }

    /// The raw image blob.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Format sniffed from the blob's magic bytes.
    pub fn format(&self) -> Option<ImageFormat> {
        ImageFormat::detect_from_bytes(self.data)
    }

    /// Intrinsic pixel size, read from the image header without decoding pixels.
    pub fn pixel_dimensions(&self) -> image::ImageResult<(u32, u32)> {
        image::ImageReader::new(Cursor::new(self.data))
            .with_guessed_format()?
            .into_dimensions()
    }
}
