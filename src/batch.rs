//! Batch preparation: independent photos in parallel, failures scoped per
//! photo.
//!
//! A listing upload is a set of photos; one corrupt file must not take the
//! rest down with it. Results come back in input order regardless of which
//! worker finished first.

use rayon::prelude::*;
use serde::Serialize;

use crate::imaging::{CropRect, EncodedPhoto, ImageCodec};
use crate::pipeline::PhotoPipeline;

/// One photo queued for preparation.
#[derive(Debug, Clone)]
pub struct PhotoInput {
    /// Caller-chosen identifier, typically the file name.
    pub id: String,
    pub bytes: Vec<u8>,
    /// Exactly one input per listing should carry this.
    pub is_main: bool,
    /// Committed interactive crop, if the user made one.
    pub crop: Option<CropRect>,
}

/// A successfully prepared photo with its output bytes.
#[derive(Debug)]
pub struct PreparedPhoto {
    pub id: String,
    pub is_main: bool,
    pub photo: EncodedPhoto,
}

#[derive(Debug, Clone, Serialize)]
pub struct PreparedEntry {
    pub id: String,
    pub main: bool,
    pub bytes: usize,
    pub width: u32,
    pub height: u32,
    pub quality: u8,
    pub budget_met: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailedEntry {
    pub id: String,
    pub error: String,
}

/// Machine-readable batch summary, written next to the output files.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub prepared: Vec<PreparedEntry>,
    pub failed: Vec<FailedEntry>,
}

/// Everything a batch run produced: output photos plus per-photo failures.
#[derive(Debug)]
pub struct BatchResult {
    pub photos: Vec<PreparedPhoto>,
    pub failures: Vec<FailedEntry>,
}

impl BatchResult {
    pub fn report(&self) -> BatchReport {
        BatchReport {
            prepared: self
                .photos
                .iter()
                .map(|p| PreparedEntry {
                    id: p.id.clone(),
                    main: p.is_main,
                    bytes: p.photo.data.len(),
                    width: p.photo.width,
                    height: p.photo.height,
                    quality: p.photo.quality,
                    budget_met: p.photo.budget_met,
                })
                .collect(),
            failed: self.failures.clone(),
        }
    }
}

/// Prepare a batch of photos in parallel.
///
/// Each photo runs the full pipeline independently; a failure is recorded
/// against its id and the batch continues.
pub fn prepare_batch<C: ImageCodec>(
    pipeline: &PhotoPipeline<C>,
    inputs: Vec<PhotoInput>,
) -> BatchResult {
    let outcomes: Vec<_> = inputs
        .into_par_iter()
        .map(|input| {
            let result = pipeline.prepare(&input.bytes, input.crop, input.is_main);
            (input.id, input.is_main, result)
        })
        .collect();

    let mut photos = Vec::new();
    let mut failures = Vec::new();
    for (id, is_main, result) in outcomes {
        match result {
            Ok(photo) => photos.push(PreparedPhoto { id, is_main, photo }),
            Err(e) => failures.push(FailedEntry {
                id,
                error: e.to_string(),
            }),
        }
    }

    BatchResult { photos, failures }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockCodec;
    use crate::pipeline::PipelineSettings;

    fn input(id: &str, is_main: bool) -> PhotoInput {
        PhotoInput {
            id: id.into(),
            bytes: vec![1, 2, 3],
            is_main,
            crop: None,
        }
    }

    #[test]
    fn all_photos_prepared_in_input_order() {
        let codec = MockCodec::new()
            .with_decode_dims(&[(800, 600), (800, 600), (800, 600)])
            .with_encode_sizes(&[10_000, 10_000, 10_000]);
        let pipeline = PhotoPipeline::new(codec, PipelineSettings::default());

        let result = prepare_batch(
            &pipeline,
            vec![input("a.jpg", true), input("b.jpg", false), input("c.jpg", false)],
        );

        assert_eq!(result.failures.len(), 0);
        let ids: Vec<_> = result.photos.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a.jpg", "b.jpg", "c.jpg"]);
        assert!(result.photos[0].is_main);
    }

    #[test]
    fn one_failure_does_not_sink_the_batch() {
        // Two decodes scripted for three photos: one photo fails
        let codec = MockCodec::new()
            .with_decode_dims(&[(800, 600), (800, 600)])
            .with_encode_sizes(&[10_000, 10_000]);
        let pipeline = PhotoPipeline::new(codec, PipelineSettings::default());

        let result = prepare_batch(
            &pipeline,
            vec![input("a.jpg", false), input("b.jpg", false), input("c.jpg", false)],
        );

        assert_eq!(result.photos.len(), 2);
        assert_eq!(result.failures.len(), 1);
        assert!(result.failures[0].error.contains("decode"));
    }

    #[test]
    fn report_mirrors_the_result() {
        let codec = MockCodec::new()
            .with_decode_dims(&[(800, 600)])
            .with_encode_sizes(&[10_000]);
        let pipeline = PhotoPipeline::new(codec, PipelineSettings::default());

        let result = prepare_batch(&pipeline, vec![input("a.jpg", true)]);
        let report = result.report();

        assert_eq!(report.prepared.len(), 1);
        assert_eq!(report.prepared[0].id, "a.jpg");
        assert_eq!(report.prepared[0].bytes, 10_000);
        assert!(report.prepared[0].main);
        assert!(report.prepared[0].budget_met);
        assert!(report.failed.is_empty());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"budget_met\":true"));
    }

    #[test]
    fn empty_batch_is_fine() {
        let codec = MockCodec::new();
        let pipeline = PhotoPipeline::new(codec, PipelineSettings::default());
        let result = prepare_batch(&pipeline, Vec::new());
        assert!(result.photos.is_empty());
        assert!(result.failures.is_empty());
    }
}
