//! Production [`ImageCodec`] built on the `image` crate.

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;

use super::backend::{CodecError, ImageCodec};

/// Pure-Rust codec: `image` crate decoders for JPEG/PNG/WebP input,
/// `JpegEncoder` for output.
#[derive(Debug, Default, Clone, Copy)]
pub struct RustBackend;

impl ImageCodec for RustBackend {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, CodecError> {
        image::load_from_memory(data).map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn encode_jpeg(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
        // JPEG has no alpha channel; flatten before encoding.
        image
            .to_rgb8()
            .write_with_encoder(encoder)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(buffer)
    }
}
