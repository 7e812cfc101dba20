use std::fmt;

use crate::error::TryOnError;

/// Shirt styles offered by the catalog, numbered 1-4 in the order the
/// storefront lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum ShirtStyle {
    A,
    B,
    C,
    D,
}

/// Pant styles offered by the catalog, numbered 1-2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum PantStyle {
    A,
    B,
}

/// A garment style. Selects both the catalog image and the mask/placement
/// policy applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub enum Variant {
    Shirt(ShirtStyle),
    Pant(PantStyle),
}

/// Which side of the threshold counts as garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Foreground is every pixel with luma strictly above the cutoff.
    Brighter,
    /// Foreground is every pixel with luma at or below the cutoff.
    Darker,
}

/// Offsets of the garment rectangle relative to the face's top-left corner,
/// in multiples of the face width (`left`, `span`) and height (`top`, `bottom`).
///
/// `x1 = x + left*w`, `x2 = x1 + span*w`, `y1 = y + top*h`, `y2 = y + bottom*h`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OffsetRatios {
    pub left: f64,
    pub span: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Fixed per-variant calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VariantPolicy {
    pub threshold: u8,
    pub polarity: Polarity,
    pub offsets: OffsetRatios,
    /// Catalog file name of the garment image.
    pub file_name: &'static str,
}

const SHIRT_OFFSETS: OffsetRatios = OffsetRatios {
    left: -1.0,
    span: 3.0,
    top: 1.0,
    bottom: 5.0,
};

const fn shirt(threshold: u8, polarity: Polarity, file_name: &'static str) -> VariantPolicy {
    VariantPolicy {
        threshold,
        polarity,
        offsets: SHIRT_OFFSETS,
        file_name,
    }
}

const SHIRT_A: VariantPolicy = shirt(0, Polarity::Brighter, "shirt1.png");
const SHIRT_B: VariantPolicy = shirt(0, Polarity::Brighter, "shirt2.png");
// Light backdrop photo: the garment is whatever is not near-white.
const SHIRT_C: VariantPolicy = shirt(200, Polarity::Darker, "shirt51.jpg");
const SHIRT_D: VariantPolicy = shirt(0, Polarity::Brighter, "shirt6.png");

const PANT_A: VariantPolicy = VariantPolicy {
    threshold: 100,
    polarity: Polarity::Brighter,
    offsets: OffsetRatios {
        left: -1.0,
        span: 3.0,
        top: 5.0,
        bottom: 10.0,
    },
    file_name: "pant7.jpg",
};

const PANT_B: VariantPolicy = VariantPolicy {
    threshold: 50,
    polarity: Polarity::Brighter,
    offsets: OffsetRatios {
        left: -0.5,
        span: 2.0,
        top: 4.0,
        bottom: 9.0,
    },
    file_name: "pant21.png",
};

impl ShirtStyle {
    pub const ALL: [ShirtStyle; 4] = [ShirtStyle::A, ShirtStyle::B, ShirtStyle::C, ShirtStyle::D];

    /// Map the 1-based catalog number to a style.
    pub fn from_number(number: u32) -> Result<Self, TryOnError> {
        match number {
            1 => Ok(ShirtStyle::A),
            2 => Ok(ShirtStyle::B),
            3 => Ok(ShirtStyle::C),
            4 => Ok(ShirtStyle::D),
            _ => Err(TryOnError::UnknownVariant {
                kind: "shirt",
                number,
                max: 4,
            }),
        }
    }

    pub fn number(self) -> u32 {
        match self {
            ShirtStyle::A => 1,
            ShirtStyle::B => 2,
            ShirtStyle::C => 3,
            ShirtStyle::D => 4,
        }
    }
}

impl PantStyle {
    pub const ALL: [PantStyle; 2] = [PantStyle::A, PantStyle::B];

    /// Map the 1-based catalog number to a style.
    pub fn from_number(number: u32) -> Result<Self, TryOnError> {
        match number {
            1 => Ok(PantStyle::A),
            2 => Ok(PantStyle::B),
            _ => Err(TryOnError::UnknownVariant {
                kind: "pant",
                number,
                max: 2,
            }),
        }
    }

    pub fn number(self) -> u32 {
        match self {
            PantStyle::A => 1,
            PantStyle::B => 2,
        }
    }
}

impl Variant {
    /// Every variant the catalog knows about, shirts first.
    pub fn all() -> impl Iterator<Item = Variant> {
        ShirtStyle::ALL
            .into_iter()
            .map(Variant::Shirt)
            .chain(PantStyle::ALL.into_iter().map(Variant::Pant))
    }

    pub fn policy(self) -> &'static VariantPolicy {
        match self {
            Variant::Shirt(ShirtStyle::A) => &SHIRT_A,
            Variant::Shirt(ShirtStyle::B) => &SHIRT_B,
            Variant::Shirt(ShirtStyle::C) => &SHIRT_C,
            Variant::Shirt(ShirtStyle::D) => &SHIRT_D,
            Variant::Pant(PantStyle::A) => &PANT_A,
            Variant::Pant(PantStyle::B) => &PANT_B,
        }
    }
}

impl From<ShirtStyle> for Variant {
    fn from(style: ShirtStyle) -> Self {
        Variant::Shirt(style)
    }
}

impl From<PantStyle> for Variant {
    fn from(style: PantStyle) -> Self {
        Variant::Pant(style)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Shirt(style) => write!(f, "shirt {}", style.number()),
            Variant::Pant(style) => write!(f, "pant {}", style.number()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_round_trip_through_styles() {
        for style in ShirtStyle::ALL {
            assert_eq!(ShirtStyle::from_number(style.number()).unwrap(), style);
        }
        for style in PantStyle::ALL {
            assert_eq!(PantStyle::from_number(style.number()).unwrap(), style);
        }
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert!(matches!(
            ShirtStyle::from_number(0),
            Err(TryOnError::UnknownVariant { kind: "shirt", .. })
        ));
        assert!(ShirtStyle::from_number(5).is_err());
        assert!(matches!(
            PantStyle::from_number(3),
            Err(TryOnError::UnknownVariant { max: 2, .. })
        ));
    }

    #[test]
    fn only_shirt_c_uses_dark_foreground() {
        for variant in Variant::all() {
            let expected = if variant == Variant::Shirt(ShirtStyle::C) {
                Polarity::Darker
            } else {
                Polarity::Brighter
            };
            assert_eq!(variant.policy().polarity, expected, "{variant}");
        }
    }

    #[test]
    fn all_shirts_share_offsets() {
        for style in ShirtStyle::ALL {
            assert_eq!(Variant::Shirt(style).policy().offsets, SHIRT_OFFSETS);
        }
    }

    #[test]
    fn catalog_file_names_are_unique() {
        let names: std::collections::HashSet<_> =
            Variant::all().map(|v| v.policy().file_name).collect();
        assert_eq!(names.len(), 6);
    }

    #[test]
    fn display_uses_catalog_numbers() {
        assert_eq!(Variant::Shirt(ShirtStyle::C).to_string(), "shirt 3");
        assert_eq!(Variant::Pant(PantStyle::B).to_string(), "pant 2");
    }
}
