//! Background softening around the face.

use image::imageops;
use image::RgbImage;
use imageproc::filter::gaussian_blur_f32;

use crate::face_detector::FaceBox;

/// Settings for the background blur bands.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BlurBands {
    /// The softened region extends to `margin_scale` × the frame size, clamped
    /// to the frame.
    pub margin_scale: f32,
    /// Gaussian sigma; 1.1 matches a 5×5 kernel.
    pub sigma: f32,
}

impl Default for BlurBands {
    fn default() -> Self {
        Self {
            margin_scale: 1.5,
            sigma: 1.1,
        }
    }
}

/// Axis-aligned frame region, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Band {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// The non-empty top, bottom, left and right bands around `face`.
///
/// Top and bottom span the full margin width above and below the face rows;
/// left and right cover the face rows on either side of the face.
pub fn bands(face: &FaceBox, frame_width: u32, frame_height: u32, config: &BlurBands) -> Vec<Band> {
    let margin_w = ((frame_width as f32 * config.margin_scale).floor() as u32).min(frame_width);
    let margin_h = ((frame_height as f32 * config.margin_scale).floor() as u32).min(frame_height);

    let x = face.x.min(frame_width);
    let y = face.y.min(frame_height);
    let y_end = y.saturating_add(face.height).min(margin_h);
    let x_end = x.saturating_add(face.width).min(margin_w);
    let face_rows = y_end.saturating_sub(y);

    let candidates = [
        Band {
            x: 0,
            y: 0,
            width: margin_w,
            height: y,
        },
        Band {
            x: 0,
            y: y_end,
            width: margin_w,
            height: margin_h.saturating_sub(y_end),
        },
        Band {
            x: 0,
            y,
            width: x,
            height: face_rows,
        },
        Band {
            x: x_end,
            y,
            width: margin_w.saturating_sub(x_end),
            height: face_rows,
        },
    ];

    candidates
        .into_iter()
        .filter(|band| band.width > 0 && band.height > 0)
        .collect()
}

/// Blur the bands around `face` in place. Returns how many bands were blurred.
pub fn soften(frame: &mut RgbImage, face: &FaceBox, config: &BlurBands) -> usize {
    if config.sigma.is_nan() || config.sigma <= 0.0 {
        tracing::debug!(sigma = config.sigma, "blur disabled");
        return 0;
    }

    let bands = bands(face, frame.width(), frame.height(), config);
    for band in &bands {
        let region = imageops::crop_imm(&*frame, band.x, band.y, band.width, band.height).to_image();
        let blurred = gaussian_blur_f32(&region, config.sigma);
        imageops::replace(frame, &blurred, band.x as i64, band.y as i64);
    }
    bands.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn checkerboard(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn bands_surround_face_on_vga() {
        let face = FaceBox::new(100, 100, 50, 50);
        let bands = bands(&face, 640, 480, &BlurBands::default());
        assert_eq!(
            bands,
            vec![
                Band { x: 0, y: 0, width: 640, height: 100 },
                Band { x: 0, y: 150, width: 640, height: 330 },
                Band { x: 0, y: 100, width: 100, height: 50 },
                Band { x: 150, y: 100, width: 490, height: 50 },
            ]
        );
        let area: u32 = bands.iter().map(|b| b.width * b.height).sum();
        assert_eq!(area, 640 * 480 - 50 * 50);
    }

    #[test]
    fn face_in_corner_drops_empty_bands() {
        let face = FaceBox::new(0, 0, 40, 30);
        let bands = bands(&face, 200, 100, &BlurBands::default());
        assert_eq!(bands.len(), 2);
        assert!(bands.iter().all(|b| b.y == 0 || b.y == 30));
    }

    #[test]
    fn face_filling_frame_has_no_bands() {
        let face = FaceBox::new(0, 0, 64, 48);
        assert!(bands(&face, 64, 48, &BlurBands::default()).is_empty());

        let mut frame = checkerboard(64, 48);
        let original = frame.clone();
        assert_eq!(soften(&mut frame, &face, &BlurBands::default()), 0);
        assert_eq!(frame, original);
    }

    #[test]
    fn soften_blurs_around_face_only() {
        let face = FaceBox::new(20, 20, 16, 16);
        let mut frame = checkerboard(64, 64);
        let original = frame.clone();

        let blurred = soften(&mut frame, &face, &BlurBands::default());
        assert_eq!(blurred, 4);

        for y in 20..36 {
            for x in 20..36 {
                assert_eq!(frame.get_pixel(x, y), original.get_pixel(x, y));
            }
        }
        assert_ne!(frame.get_pixel(5, 5), original.get_pixel(5, 5));
        assert_ne!(frame.get_pixel(50, 28), original.get_pixel(50, 28));
    }

    #[test]
    fn zero_sigma_disables_blur() {
        let mut frame = checkerboard(16, 16);
        let original = frame.clone();
        let config = BlurBands {
            sigma: 0.0,
            ..BlurBands::default()
        };
        assert_eq!(soften(&mut frame, &FaceBox::new(4, 4, 4, 4), &config), 0);
        assert_eq!(frame, original);
    }

    #[test]
    fn nan_or_negative_sigma_disables_blur() {
        let mut frame = checkerboard(16, 16);
        let original = frame.clone();
        for sigma in [f32::NAN, -1.0] {
            let config = BlurBands {
                sigma,
                ..BlurBands::default()
            };
            assert_eq!(soften(&mut frame, &FaceBox::new(4, 4, 4, 4), &config), 0);
        }
        assert_eq!(frame, original);
    }

    #[test]
    fn smaller_margin_limits_region() {
        let face = FaceBox::new(10, 10, 10, 10);
        let config = BlurBands {
            margin_scale: 0.5,
            ..BlurBands::default()
        };
        for band in bands(&face, 100, 100, &config) {
            assert!(band.x + band.width <= 50);
            assert!(band.y + band.height <= 50);
        }
    }
}
