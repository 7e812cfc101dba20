//! Masked compositing of a garment into a frame region.

use image::imageops::{self, FilterType};
use image::{GrayImage, Rgb, RgbImage};

use crate::catalog::GarmentAsset;
use crate::placement::GarmentRect;

/// Resampled mask values at or above this count as set.
const MASK_CUTOFF: u8 = 128;

/// Paste `asset` into `frame` over `rect`.
///
/// The garment and its foreground mask are resized to the rectangle. Garment
/// pixels are taken where the resized mask is set and frame pixels everywhere
/// else. The region is written back in one step once the blend is complete.
pub fn composite(frame: &mut RgbImage, rect: &GarmentRect, asset: &GarmentAsset) {
    let (width, height) = (rect.width(), rect.height());

    let garment = imageops::resize(asset.image(), width, height, FilterType::Triangle);
    let foreground = imageops::resize(asset.foreground(), width, height, FilterType::Triangle);

    let roi = imageops::crop_imm(&*frame, rect.x1, rect.y1, width, height).to_image();
    assert_eq!(
        roi.dimensions(),
        garment.dimensions(),
        "garment region {rect:?} does not fit a {}x{} frame",
        frame.width(),
        frame.height()
    );

    let blended = blend_masked(&roi, &garment, &foreground);
    imageops::replace(frame, &blended, rect.x1 as i64, rect.y1 as i64);
}

/// `(roi AND NOT fg) + (garment AND fg)` per channel, where `fg` is the
/// foreground mask binarized at `MASK_CUTOFF`.
///
/// The background bit is the complement of the foreground bit, so every
/// output pixel comes from exactly one of `roi` and `garment`. All three
/// inputs must share dimensions.
pub fn blend_masked(roi: &RgbImage, garment: &RgbImage, foreground: &GrayImage) -> RgbImage {
    RgbImage::from_fn(roi.width(), roi.height(), |x, y| {
        let keep_garment = mask_bits(foreground.get_pixel(x, y).0[0]);
        let keep_roi = !keep_garment;
        let frame_px = roi.get_pixel(x, y).0;
        let garment_px = garment.get_pixel(x, y).0;
        Rgb(std::array::from_fn(|c| {
            (frame_px[c] & keep_roi).saturating_add(garment_px[c] & keep_garment)
        }))
    })
}

fn mask_bits(value: u8) -> u8 {
    if value >= MASK_CUTOFF {
        0xFF
    } else {
        0x00
    }
}
