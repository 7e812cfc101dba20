use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::GrayImage;

use crate::detection::DetectionParams;
use crate::error::TryOnError;
use crate::face_detector::{FaceBox, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The SeetaFace model is not bundled; load it from disk with
/// [`RustfaceDetector::open`] or from any reader with
/// [`RustfaceDetector::from_reader`].
pub struct RustfaceDetector {
    model: rustface::Model,
}

impl RustfaceDetector {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, TryOnError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| TryOnError::AssetLoad {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, TryOnError> {
        let model = rustface::read_model(reader).map_err(|e| TryOnError::AssetLoad {
            path: "<seetaface model>".to_string(),
            message: e.to_string(),
        })?;
        Ok(Self { model })
    }
}

/// SeetaFace has no neighbour count; map it onto the score threshold so the
/// stricter tiers reject weaker candidates.
fn score_threshold(min_neighbors: u32) -> f64 {
    1.0 + 0.5 * min_neighbors as f64
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &GrayImage, params: &DetectionParams) -> Vec<FaceBox> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(params.min_size.0.max(params.min_size.1).max(20));
        detector.set_score_thresh(score_threshold(params.min_neighbors));
        detector.set_pyramid_scale_factor((1.0 / params.scale_factor).clamp(0.01, 0.99));
        detector.set_slide_window_step(4, 4);

        let mut faces = detector.detect(&rustface::ImageData::new(
            gray.as_raw(),
            gray.width(),
            gray.height(),
        ));

        // Best face first; the pipeline only looks at the head of the list.
        faces.sort_by(|a, b| {
            b.score()
                .partial_cmp(&a.score())
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                let x = bbox.x().max(0) as u32;
                let y = bbox.y().max(0) as u32;
                FaceBox {
                    x,
                    y,
                    width: bbox.width().min(gray.width().saturating_sub(x)),
                    height: bbox.height().min(gray.height().saturating_sub(y)),
                }
            })
            .filter(|face| face.width > 0 && face.height > 0)
            .collect()
    }
}
