//! Interactive crop: viewport transform state and the mapping back to
//! source pixels.
//!
//! The preview draws the source aspect-fit into the viewport, scales it
//! about the viewport center, then translates it by the pan offset. A
//! fixed-aspect crop window sits centered in the viewport. Committing a
//! session inverts that drawing chain to find which source pixels the
//! window covers — the math lives in [`ViewportTransform::crop_rect`] and
//! is pure, so it is testable without any UI.

use tracing::debug;

use super::calculations::{fit_window, CropRect};

pub const MIN_ZOOM: f32 = 1.0;
pub const MAX_ZOOM: f32 = 3.0;

/// Margin between the viewport edge and the crop window, in viewport
/// points.
const CROP_WINDOW_INSET: f32 = 16.0;

/// Zoom and pan state for the crop preview.
///
/// `scale` is clamped to [`MIN_ZOOM`]..=[`MAX_ZOOM`] on every update. The
/// offset is deliberately unclamped — panning far off-frame is allowed,
/// and the commit-time rect clamp shrinks whatever falls outside the
/// source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportTransform {
    scale: f32,
    offset: (f32, f32),
}

impl Default for ViewportTransform {
    fn default() -> Self {
        ViewportTransform {
            scale: MIN_ZOOM,
            offset: (0.0, 0.0),
        }
    }
}

impl ViewportTransform {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }

    /// Multiply the current scale by `factor`, clamping to the zoom range.
    pub fn apply_zoom(&mut self, factor: f32) {
        self.scale = (self.scale * factor).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Translate the image by (dx, dy) viewport points.
    pub fn apply_pan(&mut self, dx: f32, dy: f32) {
        self.offset.0 += dx;
        self.offset.1 += dy;
    }

    /// Map the crop window back to source pixels under this transform.
    ///
    /// `viewport` is the preview size in points, `crop_aspect` the
    /// window's width/height ratio, `source` the image dimensions. The
    /// resulting rect is clamped to the source and truncated to whole
    /// pixels; `None` means nothing of the source is inside the window.
    pub fn crop_rect(
        &self,
        viewport: (f32, f32),
        crop_aspect: f32,
        source: (u32, u32),
    ) -> Option<CropRect> {
        let (view_w, view_h) = viewport;
        let (src_w, src_h) = (source.0 as f32, source.1 as f32);
        if view_w <= 0.0 || view_h <= 0.0 || src_w <= 0.0 || src_h <= 0.0 {
            return None;
        }

        // Where the image lands on screen: aspect-fit, scale about the
        // viewport center, translate by the pan offset.
        let fit = (view_w / src_w).min(view_h / src_h);
        let disp_w = src_w * fit * self.scale;
        let disp_h = src_h * fit * self.scale;
        let image_left = view_w / 2.0 + self.offset.0 - disp_w / 2.0;
        let image_top = view_h / 2.0 + self.offset.1 - disp_h / 2.0;

        // The centered crop window.
        let (win_w, win_h) = fit_window(
            view_w - 2.0 * CROP_WINDOW_INSET,
            view_h - 2.0 * CROP_WINDOW_INSET,
            crop_aspect,
        );
        if win_w <= 0.0 || win_h <= 0.0 {
            return None;
        }
        let win_left = (view_w - win_w) / 2.0;
        let win_top = (view_h - win_h) / 2.0;

        // Back to source pixels.
        let to_source = 1.0 / (fit * self.scale);
        let x = (win_left - image_left) * to_source;
        let y = (win_top - image_top) * to_source;
        let w = win_w * to_source;
        let h = win_h * to_source;

        // Intersect with the source frame before truncating.
        let x0 = x.max(0.0);
        let y0 = y.max(0.0);
        let x1 = (x + w).min(src_w);
        let y1 = (y + h).min(src_h);

        let rect = CropRect {
            x: x0 as u32,
            y: y0 as u32,
            width: (x1 - x0).max(0.0) as u32,
            height: (y1 - y0).max(0.0) as u32,
        };
        if rect.width == 0 || rect.height == 0 {
            return None;
        }
        Some(rect)
    }
}

/// A pan or zoom gesture from the preview surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    Pan { dx: f32, dy: f32 },
    Zoom { factor: f32 },
}

/// One interactive crop interaction, from open to commit or cancel.
///
/// Gestures mutate the transform only; source pixels are untouched until
/// [`CropSession::commit`], and [`CropSession::cancel`] consumes the
/// session without producing anything.
#[derive(Debug, Clone)]
pub struct CropSession {
    transform: ViewportTransform,
    viewport: (f32, f32),
    crop_aspect: f32,
    source: (u32, u32),
}

impl CropSession {
    pub fn new(viewport: (f32, f32), crop_aspect: (u32, u32), source: (u32, u32)) -> Self {
        CropSession {
            transform: ViewportTransform::default(),
            viewport,
            crop_aspect: crop_aspect.0 as f32 / crop_aspect.1 as f32,
            source,
        }
    }

    pub fn transform(&self) -> &ViewportTransform {
        &self.transform
    }

    pub fn handle(&mut self, event: GestureEvent) {
        match event {
            GestureEvent::Pan { dx, dy } => self.transform.apply_pan(dx, dy),
            GestureEvent::Zoom { factor } => self.transform.apply_zoom(factor),
        }
    }

    /// Resolve the session into a source-pixel crop rect.
    pub fn commit(self) -> Option<CropRect> {
        let rect = self
            .transform
            .crop_rect(self.viewport, self.crop_aspect, self.source);
        debug!(
            scale = self.transform.scale,
            offset_x = self.transform.offset.0,
            offset_y = self.transform.offset.1,
            ?rect,
            "crop session committed"
        );
        rect
    }

    /// Discard the session; the source is left as-is.
    pub fn cancel(self) {}
}
