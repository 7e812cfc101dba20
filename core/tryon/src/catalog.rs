use std::collections::HashMap;
use std::path::Path;

use image::{DynamicImage, GrayImage, RgbImage, RgbaImage};

use crate::error::TryOnError;
use crate::mask::build_masks;
use crate::variant::Variant;

/// A garment image with its prebuilt foreground/background masks.
///
/// Immutable once built, so one catalog can serve concurrent requests.
#[derive(Debug, Clone)]
pub struct GarmentAsset {
    variant: Variant,
    image: RgbImage,
    foreground: GrayImage,
    background: GrayImage,
}

impl GarmentAsset {
    /// Build the masks for `image` using the variant's threshold policy.
    pub fn new(variant: Variant, image: RgbImage) -> Result<Self, TryOnError> {
        let (foreground, background) = build_masks(&image, variant)?;
        Ok(Self {
            variant,
            image,
            foreground,
            background,
        })
    }

    /// Decode an encoded image (PNG, JPEG) and build the asset from it.
    pub fn from_bytes(variant: Variant, bytes: &[u8]) -> Result<Self, TryOnError> {
        let decoded = image::load_from_memory(bytes).map_err(|e| TryOnError::AssetLoad {
            path: format!("<{variant} bytes>"),
            message: e.to_string(),
        })?;
        Self::new(variant, flatten_alpha(&decoded))
    }

    pub fn variant(&self) -> Variant {
        self.variant
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn foreground(&self) -> &GrayImage {
        &self.foreground
    }

    pub fn background(&self) -> &GrayImage {
        &self.background
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Load a garment image from disk as RGB.
pub fn load_image(path: impl AsRef<Path>) -> Result<RgbImage, TryOnError> {
    let path = path.as_ref();
    let decoded = image::open(path).map_err(|e| TryOnError::AssetLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(flatten_alpha(&decoded))
}

/// Flatten any alpha channel by compositing onto black, so transparent
/// cut-out areas land on the dark side of the mask threshold.
pub(crate) fn flatten_alpha(image: &DynamicImage) -> RgbImage {
    if !image.color().has_alpha() {
        return image.to_rgb8();
    }

    let rgba: RgbaImage = image.to_rgba8();
    RgbImage::from_fn(rgba.width(), rgba.height(), |x, y| {
        let [r, g, b, a] = rgba.get_pixel(x, y).0;
        let alpha = a as f32 / 255.0;
        image::Rgb([
            (r as f32 * alpha).round() as u8,
            (g as f32 * alpha).round() as u8,
            (b as f32 * alpha).round() as u8,
        ])
    })
}

/// Process-wide set of garment assets, keyed by variant.
#[derive(Debug, Default)]
pub struct GarmentCatalog {
    assets: HashMap<Variant, GarmentAsset>,
}

impl GarmentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load every known variant from `dir` by its catalog file name.
    ///
    /// Variants whose file is missing or unusable are logged and left out;
    /// requests for them skip that garment instead of failing.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let mut catalog = Self::new();

        for variant in Variant::all() {
            let path = dir.join(variant.policy().file_name);
            match load_image(&path).and_then(|image| GarmentAsset::new(variant, image)) {
                Ok(asset) => {
                    tracing::debug!(
                        %variant,
                        path = %path.display(),
                        width = asset.image.width(),
                        height = asset.image.height(),
                        "loaded garment"
                    );
                    catalog.insert(asset);
                }
                Err(e) => tracing::warn!(%variant, "garment unavailable: {e}"),
            }
        }

        tracing::info!(
            loaded = catalog.len(),
            dir = %dir.display(),
            "garment catalog ready"
        );
        catalog
    }

    pub fn from_assets(assets: impl IntoIterator<Item = GarmentAsset>) -> Self {
        let mut catalog = Self::new();
        for asset in assets {
            catalog.insert(asset);
        }
        catalog
    }

    /// Add or replace the asset for its variant.
    pub fn insert(&mut self, asset: GarmentAsset) {
        self.assets.insert(asset.variant, asset);
    }

    pub fn get(&self, variant: Variant) -> Result<&GarmentAsset, TryOnError> {
        self.assets
            .get(&variant)
            .ok_or(TryOnError::AssetUnavailable(variant))
    }

    pub fn contains(&self, variant: Variant) -> bool {
        self.assets.contains_key(&variant)
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
