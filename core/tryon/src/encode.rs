use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ImageEncoder, RgbImage};

use crate::error::TryOnError;
use crate::variant::{PantStyle, ShirtStyle};

/// Encoding for a composed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum OutputFormat {
    /// JPEG at the requested quality.
    #[default]
    Jpeg,

    /// Lossless PNG; quality is ignored.
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Encode a frame for the caller to save or send. `quality` is 0.0–1.0.
pub fn encode_frame(
    frame: &RgbImage,
    format: OutputFormat,
    quality: f32,
) -> Result<Vec<u8>, TryOnError> {
    if !(0.0..=1.0).contains(&quality) {
        return Err(TryOnError::InvalidQuality(quality));
    }

    let mut buffer = Vec::new();
    match format {
        OutputFormat::Jpeg => {
            let quality_percent = ((quality * 100.0).round() as u8).max(1);
            JpegEncoder::new_with_quality(&mut buffer, quality_percent)
                .write_image(
                    frame.as_raw(),
                    frame.width(),
                    frame.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| TryOnError::EncodeError(e.to_string()))?;
        }
        OutputFormat::Png => {
            PngEncoder::new(&mut buffer)
                .write_image(
                    frame.as_raw(),
                    frame.width(),
                    frame.height(),
                    image::ExtendedColorType::Rgb8,
                )
                .map_err(|e| TryOnError::EncodeError(e.to_string()))?;
        }
    }

    Ok(buffer)
}

/// File name for a try-on result, e.g. `output_2_1.jpg`.
pub fn output_file_name(shirt: ShirtStyle, pant: PantStyle, format: OutputFormat) -> String {
    format!(
        "output_{}_{}.{}",
        shirt.number(),
        pant.number(),
        format.extension()
    )
}
