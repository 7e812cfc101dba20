use crate::error::SkipReason;
use crate::face_detector::FaceBox;
use crate::variant::Variant;

/// Garment rectangle in frame coordinates before clipping. May extend past
/// the frame on any side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnchorRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Clipped garment rectangle: inside the frame, `x1 < x2`, `y1 < y2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GarmentRect {
    pub x1: u32,
    pub y1: u32,
    pub x2: u32,
    pub y2: u32,
}

impl GarmentRect {
    pub fn width(&self) -> u32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> u32 {
        self.y2 - self.y1
    }
}

/// Aspect-preserving size guess for a garment, before the anchor rectangle
/// and frame clipping decide the real footprint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f64,
    pub height: f64,
}

/// Place the garment relative to the face using the variant's offset ratios.
pub fn compute_anchor(face: &FaceBox, variant: Variant) -> AnchorRect {
    let offsets = variant.policy().offsets;
    let (x, y) = (face.x as f64, face.y as f64);
    let (w, h) = (face.width as f64, face.height as f64);

    let x1 = x + offsets.left * w;
    AnchorRect {
        x1,
        y1: y + offsets.top * h,
        x2: x1 + offsets.span * w,
        y2: y + offsets.bottom * h,
    }
}

/// Garment width follows the face width; height keeps the asset's aspect.
///
/// Only an estimate: [`normalize`] decides the size actually drawn, and the
/// asset is stretched to whatever that rectangle is.
pub fn estimate_footprint(face: &FaceBox, variant: Variant, asset_dims: (u32, u32)) -> Footprint {
    let width = variant.policy().offsets.span * face.width as f64;
    let (asset_w, asset_h) = asset_dims;
    let height = if asset_w == 0 {
        0.0
    } else {
        width * asset_h as f64 / asset_w as f64
    };
    Footprint { width, height }
}

/// Clip an anchor rectangle to a `frame_width` × `frame_height` frame.
///
/// Coordinates are floored to whole pixels, then:
/// clamp `x1 >= 0`, `x2 <= W`, `y2 <= H`, `y1 <= H`; if `y1 == y2` reset
/// `y1` to 0; swap `y1`/`y2` if inverted. A rectangle left with zero width or
/// height is skipped.
///
/// The `y1 == y2` reset turns a rectangle pushed entirely below the frame
/// into one spanning the full frame height above it.
pub fn normalize(
    anchor: &AnchorRect,
    frame_width: u32,
    frame_height: u32,
) -> Result<GarmentRect, SkipReason> {
    let (fw, fh) = (frame_width as i64, frame_height as i64);
    let mut x1 = anchor.x1.floor() as i64;
    let mut x2 = anchor.x2.floor() as i64;
    let mut y1 = anchor.y1.floor() as i64;
    let mut y2 = anchor.y2.floor() as i64;

    x1 = x1.clamp(0, fw);
    x2 = x2.clamp(0, fw);
    y2 = y2.clamp(0, fh);
    y1 = y1.clamp(0, fh);

    if y1 == y2 {
        y1 = 0;
    }
    if y1 > y2 {
        std::mem::swap(&mut y1, &mut y2);
    }
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
    }

    if x2 - x1 == 0 || y2 - y1 == 0 {
        return Err(SkipReason::DegenerateGarmentRect);
    }

    Ok(GarmentRect {
        x1: x1 as u32,
        y1: y1 as u32,
        x2: x2 as u32,
        y2: y2 as u32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::variant::{PantStyle, ShirtStyle};

    const PANT_A: Variant = Variant::Pant(PantStyle::A);
    const PANT_B: Variant = Variant::Pant(PantStyle::B);
    const SHIRT: Variant = Variant::Shirt(ShirtStyle::A);

    #[test]
    fn pant_a_anchor_and_clip_on_vga() {
        let face = FaceBox::new(100, 100, 50, 50);
        let anchor = compute_anchor(&face, PANT_A);
        assert_eq!(
            anchor,
            AnchorRect {
                x1: 50.0,
                y1: 350.0,
                x2: 200.0,
                y2: 600.0,
            }
        );

        let rect = normalize(&anchor, 640, 480).unwrap();
        assert_eq!(
            rect,
            GarmentRect {
                x1: 50,
                y1: 350,
                x2: 200,
                y2: 480,
            }
        );
        assert_eq!((rect.width(), rect.height()), (150, 130));
    }

    #[test]
    fn shirt_sits_below_face() {
        let face = FaceBox::new(200, 60, 80, 90);
        let anchor = compute_anchor(&face, SHIRT);
        assert_eq!(anchor.x1, 120.0);
        assert_eq!(anchor.x2, 360.0);
        assert_eq!(anchor.y1, 150.0);
        assert_eq!(anchor.y2, 510.0);
    }

    #[test]
    fn pant_b_uses_half_face_offset() {
        let face = FaceBox::new(101, 10, 21, 10);
        let anchor = compute_anchor(&face, PANT_B);
        assert_eq!(anchor.x1, 90.5);
        assert_eq!(anchor.x2, 132.5);
        assert_eq!(anchor.y1, 50.0);
        assert_eq!(anchor.y2, 100.0);

        let rect = normalize(&anchor, 640, 480).unwrap();
        assert_eq!((rect.x1, rect.x2), (90, 132));
        assert_eq!(rect.width(), 42);
    }

    #[test]
    fn rectangle_below_frame_resets_to_full_height() {
        // Face near the bottom: both y1 and y2 land past the frame and clamp to 480.
        let face = FaceBox::new(300, 440, 40, 40);
        let anchor = compute_anchor(&face, PANT_A);
        assert!(anchor.y1 > 480.0);

        let rect = normalize(&anchor, 640, 480).unwrap();
        assert_eq!(rect.y1, 0);
        assert_eq!(rect.y2, 480);
        assert_eq!(rect.height(), 480);
    }

    #[test]
    fn inverted_rectangle_is_swapped() {
        let anchor = AnchorRect {
            x1: 10.0,
            y1: 90.0,
            x2: 50.0,
            y2: 20.0,
        };
        let rect = normalize(&anchor, 100, 100).unwrap();
        assert_eq!((rect.y1, rect.y2), (20, 90));
    }

    #[test]
    fn left_overhang_is_clipped() {
        let face = FaceBox::new(10, 10, 40, 20);
        let rect = normalize(&compute_anchor(&face, SHIRT), 640, 480).unwrap();
        assert_eq!(rect.x1, 0);
        assert_eq!(rect.x2, 90);
    }

    #[test]
    fn zero_width_face_is_skipped() {
        let face = FaceBox::new(100, 100, 0, 50);
        let result = normalize(&compute_anchor(&face, PANT_A), 640, 480);
        assert_eq!(result, Err(SkipReason::DegenerateGarmentRect));
    }

    #[test]
    fn face_past_right_edge_is_skipped() {
        let face = FaceBox::new(900, 10, 20, 20);
        let result = normalize(&compute_anchor(&face, SHIRT), 640, 480);
        assert_eq!(result, Err(SkipReason::DegenerateGarmentRect));
    }

    #[test]
    fn normalized_rects_stay_inside_frame() {
        let (fw, fh) = (320, 240);
        for x in (0..400).step_by(37) {
            for y in (0..300).step_by(29) {
                for size in [1, 7, 30, 64, 200] {
                    let face = FaceBox::new(x, y, size, size);
                    for variant in Variant::all() {
                        if let Ok(rect) = normalize(&compute_anchor(&face, variant), fw, fh) {
                            assert!(rect.x1 < rect.x2 && rect.x2 <= fw, "{variant} {rect:?}");
                            assert!(rect.y1 < rect.y2 && rect.y2 <= fh, "{variant} {rect:?}");
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn footprint_estimate_keeps_asset_aspect() {
        let face = FaceBox::new(0, 0, 50, 50);
        let estimate = estimate_footprint(&face, PANT_A, (300, 600));
        assert_eq!(estimate.width, 150.0);
        assert_eq!(estimate.height, 300.0);

        // The clipped rectangle does not keep that aspect.
        let rect = normalize(&compute_anchor(&face, PANT_A), 640, 480).unwrap();
        assert_ne!(rect.height() as f64, estimate.height);
    }

    #[test]
    fn footprint_of_empty_asset_is_flat() {
        let estimate = estimate_footprint(&FaceBox::new(0, 0, 10, 10), SHIRT, (0, 0));
        assert_eq!(estimate.height, 0.0);
    }
}
