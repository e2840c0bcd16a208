//! Image processing for listing photos.
//!
//! Split the way the rest of the crate expects to test it:
//!
//! - [`calculations`] — pure geometry, no pixels touched
//! - [`backend`] — the [`ImageCodec`] trait and its recording mock
//! - [`rust_backend`] — the production codec on the `image` crate
//! - [`orientation`] — EXIF tag 274 reading and normalization
//! - [`viewport`] — interactive crop state and the source-rect mapping
//! - [`operations`] — crop/resize execution on pixel buffers
//! - [`compressor`] — byte-budget JPEG encoding

pub mod backend;
pub mod calculations;
pub mod compressor;
pub mod operations;
pub mod orientation;
pub mod rust_backend;
pub mod viewport;

pub use backend::{CodecError, ImageCodec};
pub use calculations::{centered_aspect_rect, CropRect};
pub use compressor::{compress_to_budget, EncodedPhoto};
pub use operations::{aspect_crop, crop_to_rect, resize_exact};
pub use orientation::{read_orientation, Orientation};
pub use rust_backend::RustBackend;
pub use viewport::{CropSession, GestureEvent, ViewportTransform, MAX_ZOOM, MIN_ZOOM};
