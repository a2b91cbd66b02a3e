//! Moving embedded pictures from the source package into the output.
//!
//! Pictures are re-inserted as new inline runs appended to the target
//! paragraph; their position relative to the surrounding text is not kept.

use tracing::{debug, warn};

use crate::ooxml::docx::writer::{MutableInlineImage, MutableParagraph};
use crate::ooxml::docx::{ImageRelation, Package, Run};

/// Assumed screen resolution for pixel-sized images.
pub const DPI: f64 = 96.0;
/// Widest display size, in pixels (6 inches).
pub const MAX_WIDTH_PX: f64 = 6.0 * DPI;
/// Tallest display size, in pixels (8 inches).
pub const MAX_HEIGHT_PX: f64 = 8.0 * DPI;

/// Which images a run that references pictures pulls into the output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageScope {
    /// Only the images whose relationship ids the run references.
    #[default]
    Referenced,
    /// Every image relationship of the source document, once per referencing
    /// run. Images can then be duplicated across nodes.
    DocumentWide,
}

impl std::str::FromStr for ImageScope {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "referenced" | "run" => Ok(ImageScope::Referenced),
            "document" | "document-wide" => Ok(ImageScope::DocumentWide),
            other => Err(format!("unknown image scope: {other}")),
        }
    }
}

/// Fit a picture into the 6x8 inch display box, keeping its aspect ratio.
///
/// Width is limited first; the height limit is then applied to the result.
pub fn scale_to_box(width_px: u32, height_px: u32) -> (f64, f64) {
    let (mut width, mut height) = (f64::from(width_px), f64::from(height_px));
    if width_px == 0 || height_px == 0 {
        return (width, height);
    }
    let aspect = width / height;

    if width > MAX_WIDTH_PX {
        width = MAX_WIDTH_PX;
        height = width / aspect;
    }
    if height > MAX_HEIGHT_PX {
        height = MAX_HEIGHT_PX;
        width = height * aspect;
    }
    (width, height)
}

/// Append the pictures referenced by `runs` to `target`.
///
/// Returns the number of pictures inserted. Unknown relationship ids and
/// images that cannot be decoded are skipped with a warning.
pub fn transfer_images(
    package: &Package,
    runs: &[Run],
    scope: ImageScope,
    target: &mut MutableParagraph,
) -> usize {
    let mut referencing = runs.iter().filter(|run| run.has_image()).peekable();
    if referencing.peek().is_none() {
        return 0;
    }

    let mut inserted = 0;
    match scope {
        ImageScope::Referenced => {
            for run in referencing {
                for r_id in run.image_rel_ids() {
                    match package.image(r_id) {
                        Some(image) => inserted += usize::from(insert_image(image, target)),
                        None => warn!(r_id = %r_id, "image relationship not found, skipping"),
                    }
                }
            }
        },
        ImageScope::DocumentWide => {
            let images = package.images();
            for _ in referencing {
                for image in &images {
                    inserted += usize::from(insert_image(*image, target));
                }
            }
        },
    }
    inserted
}

fn insert_image(image: ImageRelation<'_>, target: &mut MutableParagraph) -> bool {
    let (width_px, height_px) = match image.pixel_dimensions() {
        Ok(dimensions) => dimensions,
        Err(err) => {
            warn!(r_id = image.r_id(), media = image.target_ref(), error = %err, "cannot decode image, skipping");
            return false;
        },
    };

    let (width, height) = scale_to_box(width_px, height_px);
    let width_emu = MutableInlineImage::px_to_emu(width);
    let height_emu = MutableInlineImage::px_to_emu(height);

    match target.add_picture(image.data().to_vec(), width_emu, height_emu) {
        Ok(run) => {
            if let (Some(picture), Some(name)) = (run.image_mut(), image.target_ref().rsplit('/').next()) {
                picture.set_description(name);
            }
            debug!(r_id = image.r_id(), width_px, height_px, width_emu, height_emu, "image transferred");
            true
        },
        Err(err) => {
            warn!(r_id = image.r_id(), error = %err, "unsupported image format, skipping");
            false
        },
    }
}
