//! The codec seam: decoding source bytes and encoding JPEG output.
//!
//! Everything above this trait works in terms of decoded `DynamicImage`
//! buffers and encoded byte vectors, so the compressor and pipeline can be
//! tested against a recording mock with scripted encode sizes instead of a
//! real JPEG encoder.

use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("decode failed: {0}")]
    Decode(String),

    #[error("encode failed: {0}")]
    Encode(String),
}

/// Decode and encode capability used by the compressor and pipeline.
///
/// `Sync` bound because batches run photos in parallel against a shared
/// codec.
pub trait ImageCodec: Sync {
    /// Decode encoded image bytes (JPEG, PNG, WebP) into a pixel buffer.
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, CodecError>;

    /// Encode a pixel buffer as JPEG at the given quality (1-100).
    fn encode_jpeg(&self, image: &DynamicImage, quality: u8) -> Result<Vec<u8>, CodecError>;
}
