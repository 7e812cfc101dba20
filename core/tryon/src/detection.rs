//! Face detector sensitivity presets.

use std::fmt;
use std::str::FromStr;

use crate::error::TryOnError;

/// Named sensitivity preset for the face detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum DetectionTier {
    /// Finds small and partially occluded faces at the cost of false positives.
    Lenient,
    /// Balanced settings for a well-lit webcam.
    #[default]
    Normal,
    /// Few false positives; needs a large, frontal face.
    Strict,
}

/// Parameters handed to the external detector. The core never interprets
/// them beyond choosing a preset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectionParams {
    /// Pyramid step between detection scales (> 1.0).
    pub scale_factor: f32,
    /// Overlapping candidate hits required to accept a face.
    pub min_neighbors: u32,
    /// Smallest face considered, `(width, height)` in pixels.
    pub min_size: (u32, u32),
}

impl DetectionParams {
    pub fn for_tier(tier: DetectionTier) -> Self {
        match tier {
            DetectionTier::Lenient => DetectionParams {
                scale_factor: 1.05,
                min_neighbors: 2,
                min_size: (20, 20),
            },
            DetectionTier::Normal => DetectionParams {
                scale_factor: 1.1,
                min_neighbors: 3,
                min_size: (30, 30),
            },
            DetectionTier::Strict => DetectionParams {
                scale_factor: 1.3,
                min_neighbors: 5,
                min_size: (50, 50),
            },
        }
    }
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self::for_tier(DetectionTier::default())
    }
}

impl DetectionTier {
    pub const ALL: [DetectionTier; 3] = [
        DetectionTier::Lenient,
        DetectionTier::Normal,
        DetectionTier::Strict,
    ];

    pub fn params(self) -> DetectionParams {
        DetectionParams::for_tier(self)
    }

    pub fn name(self) -> &'static str {
        match self {
            DetectionTier::Lenient => "lenient",
            DetectionTier::Normal => "normal",
            DetectionTier::Strict => "strict",
        }
    }

    /// Parse a tier name, falling back to [`DetectionTier::Normal`] for
    /// anything unrecognised.
    pub fn from_name_or_default(name: &str) -> Self {
        match name.parse() {
            Ok(tier) => tier,
            Err(_) => {
                tracing::warn!(tier = name, "unknown detection tier, using normal");
                DetectionTier::Normal
            }
        }
    }

    /// Map the debug viewer's numeric mode keys (1 = lenient, 2 = normal,
    /// 3 = strict). Any other number selects normal.
    pub fn from_mode(mode: u8) -> Self {
        match mode {
            1 => DetectionTier::Lenient,
            2 => DetectionTier::Normal,
            3 => DetectionTier::Strict,
            _ => DetectionTier::Normal,
        }
    }
}

impl FromStr for DetectionTier {
    type Err = TryOnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "lenient" => Ok(DetectionTier::Lenient),
            "normal" => Ok(DetectionTier::Normal),
            "strict" => Ok(DetectionTier::Strict),
            _ => Err(TryOnError::UnknownTier(s.to_string())),
        }
    }
}

impl fmt::Display for DetectionTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strict_tier_matches_preset() {
        let params = DetectionParams::for_tier(DetectionTier::Strict);
        assert_eq!(params.scale_factor, 1.3);
        assert_eq!(params.min_neighbors, 5);
        assert_eq!(params.min_size, (50, 50));
    }

    #[test]
    fn lenient_and_normal_presets() {
        assert_eq!(
            DetectionTier::Lenient.params(),
            DetectionParams {
                scale_factor: 1.05,
                min_neighbors: 2,
                min_size: (20, 20),
            }
        );
        assert_eq!(
            DetectionTier::Normal.params(),
            DetectionParams {
                scale_factor: 1.1,
                min_neighbors: 3,
                min_size: (30, 30),
            }
        );
    }

    #[test]
    fn tiers_get_stricter() {
        let [lenient, normal, strict] = DetectionTier::ALL.map(DetectionTier::params);
        assert!(lenient.min_neighbors < normal.min_neighbors);
        assert!(normal.min_neighbors < strict.min_neighbors);
        assert!(lenient.min_size.0 < normal.min_size.0);
        assert!(normal.min_size.0 < strict.min_size.0);
    }

    #[test]
    fn unknown_name_defaults_to_normal() {
        assert_eq!(
            DetectionTier::from_name_or_default("paranoid"),
            DetectionTier::Normal
        );
        assert_eq!(
            DetectionTier::from_name_or_default(" Strict "),
            DetectionTier::Strict
        );
    }

    #[test]
    fn from_str_rejects_unknown_names() {
        assert!(matches!(
            "extreme".parse::<DetectionTier>(),
            Err(TryOnError::UnknownTier(name)) if name == "extreme"
        ));
        for tier in DetectionTier::ALL {
            assert_eq!(tier.name().parse::<DetectionTier>().unwrap(), tier);
        }
    }

    #[test]
    fn numeric_modes() {
        assert_eq!(DetectionTier::from_mode(1), DetectionTier::Lenient);
        assert_eq!(DetectionTier::from_mode(2), DetectionTier::Normal);
        assert_eq!(DetectionTier::from_mode(3), DetectionTier::Strict);
        assert_eq!(DetectionTier::from_mode(9), DetectionTier::Normal);
    }
}
