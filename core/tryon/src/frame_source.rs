use std::path::Path;

use image::RgbImage;

use crate::catalog::load_image;
use crate::error::TryOnError;

/// Supplier of camera frames.
///
/// Camera backends implement this; a failed read is reported as
/// [`TryOnError::Capture`].
pub trait FrameSource {
    fn capture(&mut self) -> Result<RgbImage, TryOnError>;
}

/// Frame source that hands out copies of one still image.
#[derive(Debug, Clone)]
pub struct StillFrame {
    frame: RgbImage,
}

impl StillFrame {
    pub fn new(frame: RgbImage) -> Self {
        Self { frame }
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, TryOnError> {
        let frame = load_image(path).map_err(|e| TryOnError::Capture(e.to_string()))?;
        Ok(Self::new(frame))
    }
}

impl FrameSource for StillFrame {
    fn capture(&mut self) -> Result<RgbImage, TryOnError> {
        if self.frame.width() == 0 || self.frame.height() == 0 {
            return Err(TryOnError::Capture("still frame is empty".to_string()));
        }
        Ok(self.frame.clone())
    }
}

impl<F> FrameSource for F
where
    F: FnMut() -> Result<RgbImage, TryOnError>,
{
    fn capture(&mut self) -> Result<RgbImage, TryOnError> {
        self()
    }
}
