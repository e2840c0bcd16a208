//! EXIF orientation: reading the tag and normalizing pixels.
//!
//! Cameras frequently store pixels unrotated and record how the device was
//! held in EXIF tag 274. Every pipeline run bakes that correction into the
//! pixel data first, so all later geometry works on upright images.

use std::io::Cursor;

use image::DynamicImage;
use tracing::debug;

/// The eight EXIF orientation values (tag 274).
///
/// Variant names describe the stored pixels relative to the upright scene;
/// [`Orientation::apply`] performs the inverse so the result is upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal,
    MirrorHorizontal,
    Rotate180,
    MirrorVertical,
    MirrorHorizontalRotate270,
    Rotate90,
    MirrorHorizontalRotate90,
    Rotate270,
}

impl Orientation {
    /// Map a raw tag value to an orientation. Out-of-range values are
    /// treated as `Normal`.
    pub fn from_exif_value(value: u32) -> Orientation {
        match value {
            2 => Orientation::MirrorHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::MirrorVertical,
            5 => Orientation::MirrorHorizontalRotate270,
            6 => Orientation::Rotate90,
            7 => Orientation::MirrorHorizontalRotate90,
            8 => Orientation::Rotate270,
            _ => Orientation::Normal,
        }
    }

    /// Correction to bake in, as (clockwise rotation degrees, horizontal
    /// flip, vertical flip). Rotation is applied before flips — the
    /// mirrored tags 5 and 7 are transpose and transverse in this order,
    /// so their rotation is the opposite of the one named in the EXIF
    /// wording (which mirrors first).
    fn correction(self) -> (Option<u16>, bool, bool) {
        match self {
            Orientation::Normal => (None, false, false),
            Orientation::MirrorHorizontal => (None, true, false),
            Orientation::Rotate180 => (Some(180), false, false),
            Orientation::MirrorVertical => (None, false, true),
            Orientation::MirrorHorizontalRotate270 => (Some(90), true, false),
            Orientation::Rotate90 => (Some(90), false, false),
            Orientation::MirrorHorizontalRotate90 => (Some(270), true, false),
            Orientation::Rotate270 => (Some(270), false, false),
        }
    }

    /// Whether normalization swaps width and height.
    pub fn swaps_dimensions(self) -> bool {
        matches!(self.correction().0, Some(90) | Some(270))
    }

    /// Bake the orientation correction into the pixel data.
    pub fn apply(self, image: DynamicImage) -> DynamicImage {
        let (rotation, flip_h, flip_v) = self.correction();

        let image = match rotation {
            Some(90) => image.rotate90(),
            Some(180) => image.rotate180(),
            Some(270) => image.rotate270(),
            _ => image,
        };
        let image = if flip_h { image.fliph() } else { image };
        if flip_v { image.flipv() } else { image }
    }
}

/// Read the EXIF orientation from encoded image bytes.
///
/// Absent EXIF data, a missing tag, or a malformed segment all mean the
/// same thing downstream: the pixels are taken as already upright.
pub fn read_orientation(data: &[u8]) -> Orientation {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => exif,
        Err(_) => return Orientation::Normal,
    };

    let value = exif
        .get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    match value {
        Some(v) => {
            let orientation = Orientation::from_exif_value(v);
            debug!(tag = v, ?orientation, "exif orientation");
            orientation
        }
        None => Orientation::Normal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{jpeg_bytes, jpeg_bytes_with_orientation, png_bytes};
    use image::{GenericImageView, Rgb, RgbImage};

    /// 2x1 image: red on the left, blue on the right.
    fn red_blue() -> DynamicImage {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([255, 0, 0]));
        img.put_pixel(1, 0, Rgb([0, 0, 255]));
        DynamicImage::ImageRgb8(img)
    }

    #[test]
    fn from_exif_value_maps_all_eight() {
        assert_eq!(Orientation::from_exif_value(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif_value(2), Orientation::MirrorHorizontal);
        assert_eq!(Orientation::from_exif_value(3), Orientation::Rotate180);
        assert_eq!(Orientation::from_exif_value(4), Orientation::MirrorVertical);
        assert_eq!(
            Orientation::from_exif_value(5),
            Orientation::MirrorHorizontalRotate270
        );
        assert_eq!(Orientation::from_exif_value(6), Orientation::Rotate90);
        assert_eq!(
            Orientation::from_exif_value(7),
            Orientation::MirrorHorizontalRotate90
        );
        assert_eq!(Orientation::from_exif_value(8), Orientation::Rotate270);
    }

    #[test]
    fn unknown_values_default_to_normal() {
        assert_eq!(Orientation::from_exif_value(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif_value(9), Orientation::Normal);
        assert_eq!(Orientation::from_exif_value(999), Orientation::Normal);
    }

    #[test]
    fn normal_is_identity() {
        let img = red_blue();
        let out = Orientation::Normal.apply(img);
        assert_eq!(out.get_pixel(0, 0).0[0], 255);
        assert_eq!(out.get_pixel(1, 0).0[2], 255);
    }

    #[test]
    fn mirror_horizontal_swaps_left_right() {
        let out = Orientation::MirrorHorizontal.apply(red_blue());
        // Blue now on the left
        assert_eq!(out.get_pixel(0, 0).0[2], 255);
        assert_eq!(out.get_pixel(1, 0).0[0], 255);
    }

    #[test]
    fn rotate90_swaps_dimensions() {
        let out = Orientation::Rotate90.apply(red_blue());
        assert_eq!((out.width(), out.height()), (1, 2));
        // Clockwise: left pixel (red) moves to the top
        assert_eq!(out.get_pixel(0, 0).0[0], 255);
        assert_eq!(out.get_pixel(0, 1).0[2], 255);
    }

    #[test]
    fn rotate270_swaps_dimensions_the_other_way() {
        let out = Orientation::Rotate270.apply(red_blue());
        assert_eq!((out.width(), out.height()), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0[2], 255);
        assert_eq!(out.get_pixel(0, 1).0[0], 255);
    }

    #[test]
    fn transposed_tag_five_keeps_the_stored_top_left() {
        // Tag 5 stores the transpose: row 0 is the upright left edge, so
        // the left pixel (red) must land at the upright top.
        let out = Orientation::MirrorHorizontalRotate270.apply(red_blue());
        assert_eq!((out.width(), out.height()), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0[0], 255);
        assert_eq!(out.get_pixel(0, 1).0[2], 255);
    }

    #[test]
    fn transverse_tag_seven_reverses_both_axes() {
        // Tag 7 stores the transverse: row 0 is the upright right edge,
        // so the right pixel (blue) must land at the upright top.
        let out = Orientation::MirrorHorizontalRotate90.apply(red_blue());
        assert_eq!((out.width(), out.height()), (1, 2));
        assert_eq!(out.get_pixel(0, 0).0[2], 255);
        assert_eq!(out.get_pixel(0, 1).0[0], 255);
    }

    #[test]
    fn swaps_dimensions_only_for_quarter_turns() {
        assert!(!Orientation::Normal.swaps_dimensions());
        assert!(!Orientation::Rotate180.swaps_dimensions());
        assert!(!Orientation::MirrorVertical.swaps_dimensions());
        assert!(Orientation::Rotate90.swaps_dimensions());
        assert!(Orientation::Rotate270.swaps_dimensions());
        assert!(Orientation::MirrorHorizontalRotate270.swaps_dimensions());
    }

    #[test]
    fn read_orientation_from_tagged_jpeg() {
        let data = jpeg_bytes_with_orientation(8, 6, 6);
        assert_eq!(read_orientation(&data), Orientation::Rotate90);

        let data = jpeg_bytes_with_orientation(8, 6, 3);
        assert_eq!(read_orientation(&data), Orientation::Rotate180);
    }

    #[test]
    fn missing_exif_defaults_to_normal() {
        assert_eq!(read_orientation(&jpeg_bytes(8, 6)), Orientation::Normal);
        assert_eq!(read_orientation(&png_bytes(8, 6)), Orientation::Normal);
    }

    #[test]
    fn garbage_bytes_default_to_normal() {
        assert_eq!(read_orientation(b"\xFF\xD8garbage"), Orientation::Normal);
        assert_eq!(read_orientation(&[]), Orientation::Normal);
    }
}
