//! Pixel-buffer operations: applying calculated geometry to images.
//!
//! The geometry itself comes from [`super::calculations`]; these functions
//! only execute it. All of them take the image by value and hand back a
//! new one, so intermediate buffers are dropped as the pipeline moves
//! forward.

use image::imageops::FilterType;
use image::DynamicImage;

use super::calculations::{centered_aspect_rect, CropRect};

/// Crop an image to the given rect, clamping to the image bounds first.
///
/// `None` when nothing of the rect lies inside the image.
pub fn crop_to_rect(image: DynamicImage, rect: CropRect) -> Option<DynamicImage> {
    let rect = rect.clamped_to(image.width(), image.height())?;
    Some(image.crop_imm(rect.x, rect.y, rect.width, rect.height))
}

/// Center-crop an image to a target aspect ratio.
///
/// Exact-ratio inputs pass through without a buffer copy.
pub fn aspect_crop(image: DynamicImage, aspect: (u32, u32)) -> DynamicImage {
    let rect = centered_aspect_rect((image.width(), image.height()), aspect);
    if rect.width == image.width() && rect.height == image.height() {
        return image;
    }
    image.crop_imm(rect.x, rect.y, rect.width, rect.height)
}

/// Resize to exact dimensions, ignoring the source aspect ratio.
///
/// Lanczos3 throughout; deterministic output matters more here than
/// resampling speed.
pub fn resize_exact(image: DynamicImage, width: u32, height: u32) -> DynamicImage {
    if image.width() == width && image.height() == height {
        return image;
    }
    image.resize_exact(width, height, FilterType::Lanczos3)
}
