//! Virtual try-on: overlay garment images onto a camera frame, anchored to a
//! detected face.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tryon::{GarmentCatalog, PantStyle, ShirtStyle, SimulatedFaceDetector, StillFrame, TryOn};
//!
//! let catalog = Arc::new(GarmentCatalog::load("garments"));
//! let tryon = TryOn::new(catalog, Arc::new(SimulatedFaceDetector));
//!
//! let mut camera = StillFrame::open("frame.jpg").unwrap();
//! let output = tryon
//!     .capture_and_render(&mut camera, ShirtStyle::B, PantStyle::A)
//!     .unwrap();
//! output.frame.save("output_2_1.jpg").unwrap();
//! ```

use std::sync::Arc;

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;

mod catalog;
mod composite;
mod detection;
mod encode;
mod error;
/// Face detection trait and face bounding-box type.
pub mod face_detector;
mod frame_source;
mod mask;
mod placement;
#[cfg(feature = "rustface")]
/// SeetaFace-based face detector backend.
pub mod rustface_backend;
mod soften;
mod variant;

pub use catalog::{load_image, GarmentAsset, GarmentCatalog};
pub use composite::{blend_masked, composite};
pub use detection::{DetectionParams, DetectionTier};
pub use encode::{encode_frame, output_file_name, OutputFormat};
pub use error::{SkipReason, TryOnError};
pub use face_detector::{FaceBox, FaceDetector, SimulatedFaceDetector};
pub use frame_source::{FrameSource, StillFrame};
pub use mask::{build_masks, MASK_ON};
pub use placement::{
    compute_anchor, estimate_footprint, normalize, AnchorRect, Footprint, GarmentRect,
};
#[cfg(feature = "rustface")]
pub use rustface_backend::RustfaceDetector;
pub use soften::{bands, soften, Band, BlurBands};
pub use variant::{OffsetRatios, PantStyle, Polarity, ShirtStyle, Variant, VariantPolicy};

/// How many frames [`TryOn::capture_and_render`] reads looking for a face.
pub const DEFAULT_CAPTURE_ATTEMPTS: u32 = 100;

const FACE_MARK_COLOR: Rgb<u8> = Rgb([0, 0, 255]);

/// What happened to one garment during a render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GarmentOutcome {
    /// Composited at `rect`. `estimate` is the aspect-preserving size guess
    /// the final rectangle replaced.
    Applied {
        rect: GarmentRect,
        estimate: Footprint,
    },
    Skipped(SkipReason),
}

impl GarmentOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, GarmentOutcome::Applied { .. })
    }
}

/// Summary of one [`TryOn::render`] call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderReport {
    /// The face the garments were anchored to.
    pub face: FaceBox,
    pub shirt: GarmentOutcome,
    pub pant: GarmentOutcome,
    /// Background bands blurred; 0 when softening is off.
    pub softened_bands: usize,
}

impl RenderReport {
    pub fn applied_count(&self) -> usize {
        [self.shirt, self.pant]
            .iter()
            .filter(|outcome| outcome.is_applied())
            .count()
    }
}

/// A composed frame ready for the caller to persist or send.
#[derive(Debug, Clone)]
pub struct TryOnOutput {
    pub frame: RgbImage,
    pub report: RenderReport,
    /// Frames captured before one contained a face.
    pub attempts: u32,
}

impl TryOnOutput {
    pub fn encode(&self, format: OutputFormat, quality: f32) -> Result<Vec<u8>, TryOnError> {
        encode_frame(&self.frame, format, quality)
    }
}

/// The try-on pipeline: a read-only garment catalog, a face detector, and
/// render settings.
///
/// `TryOn` is `Send + Sync` and [`TryOn::render`] takes `&self`, so one
/// instance can serve concurrent requests.
pub struct TryOn {
    catalog: Arc<GarmentCatalog>,
    detector: Arc<dyn FaceDetector>,
    tier: DetectionTier,
    soften_background: bool,
    blur_bands: BlurBands,
    capture_attempts: u32,
    mark_face: bool,
}

impl TryOn {
    /// Create a pipeline with the strict detection tier, background softening
    /// on, and up to [`DEFAULT_CAPTURE_ATTEMPTS`] capture attempts.
    pub fn new(catalog: Arc<GarmentCatalog>, detector: Arc<dyn FaceDetector>) -> Self {
        Self {
            catalog,
            detector,
            tier: DetectionTier::Strict,
            soften_background: true,
            blur_bands: BlurBands::default(),
            capture_attempts: DEFAULT_CAPTURE_ATTEMPTS,
            mark_face: false,
        }
    }

    /// Set the detector sensitivity preset (default: `DetectionTier::Strict`).
    pub fn detection_tier(mut self, tier: DetectionTier) -> Self {
        self.tier = tier;
        self
    }

    /// Enable or disable blurring around the face (default: true).
    pub fn soften_background(mut self, enable: bool) -> Self {
        self.soften_background = enable;
        self
    }

    pub fn blur_bands(mut self, bands: BlurBands) -> Self {
        self.blur_bands = bands;
        self
    }

    /// Maximum frames to capture while waiting for a face. Clamped to at least 1.
    pub fn capture_attempts(mut self, attempts: u32) -> Self {
        self.capture_attempts = attempts.max(1);
        self
    }

    /// Outline the detected face on the output (default: false).
    pub fn mark_face(mut self, enable: bool) -> Self {
        self.mark_face = enable;
        self
    }

    pub fn catalog(&self) -> &GarmentCatalog {
        &self.catalog
    }

    pub fn detection_params(&self) -> DetectionParams {
        self.tier.params()
    }

    /// Run the detector on a grayscale copy of `frame`.
    pub fn detect(&self, frame: &RgbImage) -> Vec<FaceBox> {
        let gray = image::imageops::grayscale(frame);
        self.detector.detect(&gray, &self.detection_params())
    }

    /// Composite `shirt` and `pant` onto `frame`, anchored to the first face.
    ///
    /// The face outline (if enabled) goes down first, then soften, then the
    /// pant and the shirt, so garments cover both. A garment whose rectangle
    /// clips to nothing or whose asset is unavailable is skipped and reported;
    /// only an empty `faces` fails the whole call.
    pub fn render(
        &self,
        frame: &mut RgbImage,
        faces: &[FaceBox],
        shirt: ShirtStyle,
        pant: PantStyle,
    ) -> Result<RenderReport, SkipReason> {
        let Some(face) = faces.first().copied() else {
            return Err(SkipReason::NoFaceDetected);
        };
        if faces.len() > 1 {
            tracing::debug!(faces = faces.len(), "using first detected face");
        }

        if self.mark_face && face.width > 0 && face.height > 0 {
            let rect = Rect::at(face.x as i32, face.y as i32).of_size(face.width, face.height);
            draw_hollow_rect_mut(frame, rect, FACE_MARK_COLOR);
        }

        let softened_bands = if self.soften_background {
            soften(frame, &face, &self.blur_bands)
        } else {
            0
        };

        let pant = self.place_garment(frame, &face, Variant::Pant(pant));
        let shirt = self.place_garment(frame, &face, Variant::Shirt(shirt));

        Ok(RenderReport {
            face,
            shirt,
            pant,
            softened_bands,
        })
    }

    fn place_garment(
        &self,
        frame: &mut RgbImage,
        face: &FaceBox,
        variant: Variant,
    ) -> GarmentOutcome {
        let asset = match self.catalog.get(variant) {
            Ok(asset) => asset,
            Err(e) => {
                tracing::warn!(%variant, "skipping garment: {e}");
                return GarmentOutcome::Skipped(SkipReason::InvalidAsset);
            }
        };

        let estimate = estimate_footprint(face, variant, asset.dimensions());
        let anchor = compute_anchor(face, variant);
        match normalize(&anchor, frame.width(), frame.height()) {
            Ok(rect) => {
                tracing::debug!(
                    %variant,
                    x1 = rect.x1,
                    y1 = rect.y1,
                    width = rect.width(),
                    height = rect.height(),
                    estimated_height = estimate.height,
                    "compositing garment"
                );
                composite(frame, &rect, asset);
                GarmentOutcome::Applied { rect, estimate }
            }
            Err(reason) => {
                tracing::debug!(%variant, ?anchor, "skipping garment: {reason}");
                GarmentOutcome::Skipped(reason)
            }
        }
    }

    /// Capture frames until one contains a face, then render onto it.
    ///
    /// A capture failure aborts immediately. If no frame within the attempt
    /// limit has a face, returns [`TryOnError::NoFaceDetected`].
    pub fn capture_and_render(
        &self,
        source: &mut dyn FrameSource,
        shirt: ShirtStyle,
        pant: PantStyle,
    ) -> Result<TryOnOutput, TryOnError> {
        for attempt in 1..=self.capture_attempts {
            let mut frame = source.capture()?;
            let faces = self.detect(&frame);
            if faces.is_empty() {
                tracing::trace!(attempt, "no face in frame");
                continue;
            }

            let report = self
                .render(&mut frame, &faces, shirt, pant)
                .map_err(|_| TryOnError::NoFaceDetected)?;
            tracing::info!(
                attempt,
                tier = %self.tier,
                garments = report.applied_count(),
                "rendered try-on"
            );
            return Ok(TryOnOutput {
                frame,
                report,
                attempts: attempt,
            });
        }

        tracing::warn!(
            attempts = self.capture_attempts,
            tier = %self.tier,
            "no face detected"
        );
        Err(TryOnError::NoFaceDetected)
    }
}
