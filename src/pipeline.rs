//! The single-photo pipeline: decode, normalize, crop, resize, compress.
//!
//! Fixed stage order — orientation is baked in before any crop rect is
//! applied, so committed rects and centered crops always work in upright
//! coordinates. The main listing photo additionally gets the exact-size
//! resize; gallery photos keep their cropped dimensions.

use thiserror::Error;
use tracing::debug;

use crate::imaging::{
    aspect_crop, compress_to_budget, crop_to_rect, read_orientation, resize_exact, CodecError,
    CropRect, EncodedPhoto, ImageCodec,
};

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("could not decode photo: {0}")]
    Decode(String),

    #[error("crop selection covers none of the photo")]
    DegenerateCrop,

    #[error("could not encode photo: {0}")]
    Encode(String),
}

impl From<CodecError> for PrepError {
    fn from(e: CodecError) -> Self {
        match e {
            CodecError::Decode(msg) => PrepError::Decode(msg),
            CodecError::Encode(msg) => PrepError::Encode(msg),
        }
    }
}

/// Output geometry and budget for a pipeline run.
#[derive(Debug, Clone, Copy)]
pub struct PipelineSettings {
    pub budget_bytes: usize,
    pub crop_aspect: (u32, u32),
    /// Exact dimensions for the main listing photo.
    pub main_size: (u32, u32),
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            budget_bytes: 1_048_576, // 1 MiB
            crop_aspect: (4, 3),
            main_size: (400, 300),
        }
    }
}

/// Runs photos through the preparation stages against a codec.
pub struct PhotoPipeline<C> {
    codec: C,
    settings: PipelineSettings,
}

impl<C: ImageCodec> PhotoPipeline<C> {
    pub fn new(codec: C, settings: PipelineSettings) -> Self {
        PhotoPipeline { codec, settings }
    }

    pub fn settings(&self) -> &PipelineSettings {
        &self.settings
    }

    /// Prepare one photo for upload.
    ///
    /// `crop` is a committed interactive selection in upright source
    /// coordinates; `None` keeps the full frame. `is_main` selects the
    /// exact-size main-photo treatment.
    pub fn prepare(
        &self,
        raw: &[u8],
        crop: Option<CropRect>,
        is_main: bool,
    ) -> Result<EncodedPhoto, PrepError> {
        let image = self.codec.decode(raw)?;
        if image.width() == 0 || image.height() == 0 {
            return Err(PrepError::Decode("image has zero dimensions".into()));
        }

        let orientation = read_orientation(raw);
        let image = orientation.apply(image);
        debug!(
            width = image.width(),
            height = image.height(),
            ?orientation,
            "normalized"
        );

        let image = match crop {
            Some(rect) => crop_to_rect(image, rect).ok_or(PrepError::DegenerateCrop)?,
            None => image,
        };

        let image = aspect_crop(image, self.settings.crop_aspect);
        let image = if is_main {
            let (w, h) = self.settings.main_size;
            resize_exact(image, w, h)
        } else {
            image
        };

        let photo = compress_to_budget(&self.codec, image, self.settings.budget_bytes)?;
        debug!(
            bytes = photo.data.len(),
            quality = photo.quality,
            budget_met = photo.budget_met,
            "prepared"
        );
        Ok(photo)
    }
}
