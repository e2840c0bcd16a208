//! Shared helpers for unit tests: synthetic images and encoded fixtures.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Rgb, RgbImage};

/// A smooth RGB gradient; compresses well and makes resampled pixels easy
/// to reason about.
pub(crate) fn gradient_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

/// Deterministic pseudo-random noise; resists JPEG compression, for tests
/// that need to exceed small byte budgets.
pub(crate) fn noise_image(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x9E37_79B9;
    RgbImage::from_fn(width, height, |_, _| {
        // xorshift32
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        let b = state.to_le_bytes();
        Rgb([b[0], b[1], b[2]])
    })
}

/// Encode a gradient as a plain JPEG (no EXIF).
pub(crate) fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(gradient_image(width, height))
        .write_to(&mut buffer, ImageFormat::Jpeg)
        .unwrap();
    buffer.into_inner()
}

/// Encode a gradient as a PNG.
pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(gradient_image(width, height))
        .write_to(&mut buffer, ImageFormat::Png)
        .unwrap();
    buffer.into_inner()
}

/// A JPEG carrying an EXIF APP1 segment with the given orientation value.
///
/// The segment is spliced in after SOI: a minimal little-endian TIFF with
/// a single IFD entry for tag 0x0112.
pub(crate) fn jpeg_bytes_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let tiff: [u8; 26] = [
        0x49, 0x49, 0x2A, 0x00, // "II" byte order, magic 42
        0x08, 0x00, 0x00, 0x00, // offset of IFD0
        0x01, 0x00, // one entry
        0x12, 0x01, // tag 0x0112 Orientation
        0x03, 0x00, // type SHORT
        0x01, 0x00, 0x00, 0x00, // count 1
        orientation as u8,
        (orientation >> 8) as u8,
        0x00,
        0x00, // value, padded
        0x00, 0x00, 0x00, 0x00, // no next IFD
    ];

    let mut app1 = Vec::with_capacity(4 + 6 + tiff.len());
    app1.extend_from_slice(&[0xFF, 0xE1]);
    let len = (2 + 6 + tiff.len()) as u16;
    app1.extend_from_slice(&len.to_be_bytes());
    app1.extend_from_slice(b"Exif\0\0");
    app1.extend_from_slice(&tiff);

    let jpeg = jpeg_bytes(width, height);
    let mut out = Vec::with_capacity(jpeg.len() + app1.len());
    out.extend_from_slice(&jpeg[..2]); // SOI
    out.extend_from_slice(&app1);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradient_has_requested_dimensions() {
        let img = gradient_image(10, 20);
        assert_eq!((img.width(), img.height()), (10, 20));
    }

    #[test]
    fn jpeg_bytes_start_with_soi() {
        let data = jpeg_bytes(8, 8);
        assert_eq!(&data[..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn png_bytes_start_with_signature() {
        let data = png_bytes(8, 8);
        assert_eq!(&data[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn orientation_fixture_still_decodes() {
        let data = jpeg_bytes_with_orientation(8, 6, 6);
        let img = image::load_from_memory(&data).unwrap();
        assert_eq!((img.width(), img.height()), (8, 6));
    }

    #[test]
    fn noise_is_deterministic() {
        assert_eq!(noise_image(16, 16), noise_image(16, 16));
    }
}
