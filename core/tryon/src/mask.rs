//! Foreground/background masks for garment images.

use image::{GrayImage, RgbImage};
use imageproc::contrast::{threshold, ThresholdType};

use crate::error::TryOnError;
use crate::variant::{Polarity, Variant};

/// Mask value for "pixel belongs to this mask".
pub const MASK_ON: u8 = 255;

/// Build the `(foreground, background)` mask pair for a garment image.
///
/// The image is reduced to luma and thresholded with the variant's cutoff and
/// polarity. Both masks hold only `0` or `255` and are exact complements.
pub fn build_masks(
    image: &RgbImage,
    variant: Variant,
) -> Result<(GrayImage, GrayImage), TryOnError> {
    if image.width() == 0 || image.height() == 0 {
        return Err(TryOnError::InvalidAsset(variant));
    }

    let policy = variant.policy();
    let luma = image::imageops::grayscale(image);
    let threshold_type = match policy.polarity {
        Polarity::Brighter => ThresholdType::Binary,
        Polarity::Darker => ThresholdType::BinaryInverted,
    };
    let foreground = threshold(&luma, policy.threshold, threshold_type);

    let mut background = foreground.clone();
    image::imageops::invert(&mut background);

    Ok((foreground, background))
}
