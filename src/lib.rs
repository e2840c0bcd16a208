//! # photoprep
//!
//! Prepares listing photos for upload: orientation fix, interactive crop,
//! aspect-ratio crop, main-photo resize, and byte-budgeted JPEG output.
//!
//! # Architecture: One Pipeline, Fixed Stage Order
//!
//! Every photo runs the same stages, in the same order:
//!
//! ```text
//! 1. Decode      bytes          →  pixels        (JPEG/PNG/WebP)
//! 2. Normalize   EXIF tag 274   →  upright pixels
//! 3. Crop        committed rect →  user's selection (optional)
//! 4. Aspect crop centered       →  4:3 (configurable)
//! 5. Resize      main photo     →  exactly 400x300 (main only)
//! 6. Compress    quality ladder →  JPEG under the byte budget
//! ```
//!
//! The order is load-bearing: orientation is baked in before any crop, so
//! crop rects always live in upright coordinates, and the aspect crop runs
//! after the user's rect so the output ratio has a single source of truth.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Runs one photo through all stages; the error taxonomy lives here |
//! | [`batch`] | Parallel preparation of photo sets with per-photo failure scoping |
//! | [`imaging`] | Geometry, codec seam, orientation, viewport crop, compression |
//! | [`config`] | `photoprep.toml` loading and validation |
//! | [`output`] | CLI output formatting — batch reports and inspect display |
//!
//! # Design Decisions
//!
//! ## The Codec Is a Trait
//!
//! Decoding and JPEG encoding go through [`imaging::ImageCodec`]. The
//! production implementation ([`imaging::RustBackend`]) sits on the `image`
//! crate; tests use a recording mock with scripted encode sizes, so the
//! compression ladder and pipeline logic are tested without encoding a
//! single real JPEG.
//!
//! ## Budget Misses Are Flagged, Not Fatal
//!
//! The compressor walks quality 100 down to 10, then downscales once and
//! re-encodes. If the result is still over budget, the best attempt is
//! returned with `budget_met = false`. One stubborn photo should not abort
//! a listing; the caller decides what to do with the flag.
//!
//! ## Crop Math Is Pure
//!
//! The interactive crop never touches pixels while the user pans and
//! zooms. [`imaging::ViewportTransform`] holds two numbers and a pair;
//! mapping the on-screen window back to source pixels is a pure function,
//! tested against hand-computed rectangles.
//!
//! ## Pure-Rust Imaging
//!
//! Decode and encode use the `image` crate, EXIF parsing uses
//! `kamadak-exif` — no ImageMagick, no libjpeg, no system dependencies.
//! The binary is fully self-contained.

pub mod batch;
pub mod config;
pub mod imaging;
pub mod output;
pub mod pipeline;

#[cfg(test)]
pub(crate) mod test_helpers;
