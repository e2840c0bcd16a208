//! Budget-driven JPEG compression.
//!
//! Two phases, in order: walk the quality ladder down from 100 in steps of
//! 10, and if even the floor quality is over budget, downscale once by the
//! square root of the size ratio and re-encode. Worst case that is eleven
//! encoder runs and one resize per photo. The result always carries real
//! bytes; a photo that cannot be brought under budget is flagged, never
//! silently oversized.

use image::DynamicImage;
use tracing::debug;

use super::backend::{CodecError, ImageCodec};
use super::calculations::{budget_scale, scaled_dimensions};
use super::operations::resize_exact;

const QUALITY_START: u8 = 100;
const QUALITY_STEP: u8 = 10;
const QUALITY_FLOOR: u8 = 10;

/// Quality for the single re-encode after the downscale fallback. Going
/// lower than this trades too much visual quality for bytes the resize
/// already recovered.
const RESCALE_QUALITY: u8 = 80;

/// A finished JPEG and how it was produced.
#[derive(Debug, Clone)]
pub struct EncodedPhoto {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    /// False when even the downscale fallback could not reach the budget;
    /// `data` then holds the best attempt.
    pub budget_met: bool,
}

enum Phase {
    QualityLadder { quality: u8 },
    Downscale { floor_size: usize },
}

/// Encode `image` as JPEG, aiming for at most `budget_bytes`.
///
/// Codec failures abort; a missed budget does not.
pub fn compress_to_budget(
    codec: &impl ImageCodec,
    image: DynamicImage,
    budget_bytes: usize,
) -> Result<EncodedPhoto, CodecError> {
    let mut image = image;
    let (mut width, mut height) = (image.width(), image.height());
    let mut phase = Phase::QualityLadder {
        quality: QUALITY_START,
    };

    loop {
        match phase {
            Phase::QualityLadder { quality } => {
                let data = codec.encode_jpeg(&image, quality)?;
                debug!(quality, size = data.len(), budget = budget_bytes, "encode attempt");
                if data.len() <= budget_bytes {
                    return Ok(EncodedPhoto {
                        data,
                        width,
                        height,
                        quality,
                        budget_met: true,
                    });
                }
                if quality <= QUALITY_FLOOR {
                    phase = Phase::Downscale {
                        floor_size: data.len(),
                    };
                } else {
                    phase = Phase::QualityLadder {
                        quality: quality - QUALITY_STEP,
                    };
                }
            }
            Phase::Downscale { floor_size } => {
                // Quality alone was not enough; shrink the pixel count so
                // the size ratio lands near the budget, then encode once.
                let ratio = budget_scale(floor_size, budget_bytes);
                let (new_w, new_h) = scaled_dimensions((width, height), ratio);
                debug!(ratio, new_w, new_h, "downscale fallback");

                image = resize_exact(image, new_w, new_h);
                (width, height) = (new_w, new_h);
                let data = codec.encode_jpeg(&image, RESCALE_QUALITY)?;
                let budget_met = data.len() <= budget_bytes;
                return Ok(EncodedPhoto {
                    data,
                    width,
                    height,
                    quality: RESCALE_QUALITY,
                    budget_met,
                });
            }
        }
    }
}
