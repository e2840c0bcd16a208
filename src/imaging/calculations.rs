//! Pure calculation functions for crop and compression geometry.
//!
//! All functions here are pure and testable without any I/O or images.

/// A crop region in source-pixel coordinates.
///
/// Invariant once produced by [`centered_aspect_rect`] or
/// [`CropRect::clamped_to`]: `width`/`height` are non-zero and the region
/// lies fully inside the source it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRect {
    /// Intersect this rect with a source of the given dimensions.
    ///
    /// Returns `None` when nothing of the rect remains inside the source
    /// (degenerate selection). Clamping can shrink the region; it never
    /// repositions more of the source into view.
    pub fn clamped_to(self, source_width: u32, source_height: u32) -> Option<CropRect> {
        let x = self.x.min(source_width);
        let y = self.y.min(source_height);
        let width = self.width.min(source_width - x);
        let height = self.height.min(source_height - y);

        if width == 0 || height == 0 {
            return None;
        }

        Some(CropRect {
            x,
            y,
            width,
            height,
        })
    }
}

/// Calculate the centered crop rect that trims a source to a target aspect
/// ratio.
///
/// If the source is relatively wider than the target, width is trimmed
/// symmetrically and height kept; otherwise height is trimmed and width
/// kept. Dimensions are truncated to integers and never drop below 1×1.
/// An exact-ratio source yields the full-frame rect.
///
/// # Examples
/// ```
/// # use photoprep::imaging::centered_aspect_rect;
/// // 16:9 source to 4:3 target — width trimmed, height kept
/// let rect = centered_aspect_rect((1920, 1080), (4, 3));
/// assert_eq!((rect.width, rect.height), (1440, 1080));
/// assert_eq!(rect.x, 240);
///
/// // Already 4:3 — dimensional no-op
/// let rect = centered_aspect_rect((800, 600), (4, 3));
/// assert_eq!((rect.x, rect.y, rect.width, rect.height), (0, 0, 800, 600));
/// ```
pub fn centered_aspect_rect(source: (u32, u32), aspect: (u32, u32)) -> CropRect {
    let (src_w, src_h) = source;
    let (aspect_w, aspect_h) = aspect;

    let src_ratio = src_w as f64 / src_h as f64;
    let target_ratio = aspect_w as f64 / aspect_h as f64;

    let (width, height) = if src_ratio > target_ratio {
        // Source relatively wider — trim width, keep height
        let w = ((src_h as f64 * target_ratio) as u32).max(1);
        (w, src_h)
    } else {
        // Source relatively taller (or exact) — trim height, keep width
        let h = ((src_w as f64 / target_ratio) as u32).max(1);
        (src_w, h)
    };

    // Equal trim from opposite edges; integer halving keeps symmetry
    // within one pixel.
    CropRect {
        x: (src_w - width) / 2,
        y: (src_h - height) / 2,
        width,
        height,
    }
}

/// Fit a window of the given aspect ratio inside an available area.
///
/// Shrinks whichever dimension overflows; the other fills the area.
/// Used to size the on-screen crop window inside the viewport.
pub fn fit_window(avail_width: f32, avail_height: f32, aspect: f32) -> (f32, f32) {
    if avail_width / avail_height > aspect {
        // Area relatively wider than the window — height is the constraint
        (avail_height * aspect, avail_height)
    } else {
        (avail_width, avail_width / aspect)
    }
}

/// Linear scale factor that brings an encoded size down toward a byte
/// budget: `sqrt(budget / current)`.
///
/// Byte size tracks pixel count, so scaling both dimensions by the square
/// root of the size ratio aims the re-encode at the budget.
pub fn budget_scale(current_bytes: usize, budget_bytes: usize) -> f64 {
    (budget_bytes as f64 / current_bytes as f64).sqrt()
}

/// Apply a linear scale factor to dimensions, truncating to integers and
/// never dropping below 1×1.
pub fn scaled_dimensions(dims: (u32, u32), ratio: f64) -> (u32, u32) {
    let (w, h) = dims;
    (
        ((w as f64 * ratio) as u32).max(1),
        ((h as f64 * ratio) as u32).max(1),
    )
}
