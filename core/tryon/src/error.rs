use thiserror::Error;

use crate::variant::Variant;

#[derive(Debug, Error)]
pub enum TryOnError {
    #[error("garment image for {0} is empty or has zero dimensions")]
    InvalidAsset(Variant),

    #[error("failed to load garment image {path}: {message}")]
    AssetLoad { path: String, message: String },

    #[error("no garment asset loaded for {0}")]
    AssetUnavailable(Variant),

    #[error("failed to capture frame: {0}")]
    Capture(String),

    #[error("no face detected")]
    NoFaceDetected,

    #[error("unknown {kind} number {number}, expected 1-{max}")]
    UnknownVariant {
        kind: &'static str,
        number: u32,
        max: u32,
    },

    #[error("unknown detection tier: {0}")]
    UnknownTier(String),

    #[error("quality must be between 0.0 and 1.0, got {0}")]
    InvalidQuality(f32),

    #[error("failed to encode image: {0}")]
    EncodeError(String),
}

/// Why a garment (or a whole request) produced no overlay.
///
/// These are outcomes the caller branches on, not failures of the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipReason {
    #[error("no face detected")]
    NoFaceDetected,

    #[error("garment rectangle has zero width or height after clipping")]
    DegenerateGarmentRect,

    #[error("garment asset is missing or invalid")]
    InvalidAsset,
}
