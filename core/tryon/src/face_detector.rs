use image::GrayImage;

use crate::detection::DetectionParams;

/// Bounding box of a detected face, in frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaceBox {
    /// X coordinate of the top-left corner.
    pub x: u32,
    /// Y coordinate of the top-left corner.
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl FaceBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to plug a detector (Haar cascade, SeetaFace, ONNX, ...)
/// into [`crate::TryOn`]. Only the first returned face is used, so backends
/// should order their results by preference.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a grayscale frame using the given sensitivity preset.
    fn detect(&self, gray: &GrayImage, params: &DetectionParams) -> Vec<FaceBox>;
}

/// Detector that always reports one face at a fixed spot: a quarter of the
/// frame in each dimension, centred horizontally, one sixth of the way down.
///
/// Useful for checking overlay output without a camera subject.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedFaceDetector;

impl SimulatedFaceDetector {
    pub fn face_for(width: u32, height: u32) -> FaceBox {
        let face_w = width / 4;
        let face_h = height / 4;
        FaceBox {
            x: (width / 2).saturating_sub(face_w / 2),
            y: height / 6,
            width: face_w,
            height: face_h,
        }
    }
}

impl FaceDetector for SimulatedFaceDetector {
    fn detect(&self, gray: &GrayImage, _params: &DetectionParams) -> Vec<FaceBox> {
        let face = Self::face_for(gray.width(), gray.height());
        if face.width == 0 || face.height == 0 {
            return Vec::new();
        }
        vec![face]
    }
}
