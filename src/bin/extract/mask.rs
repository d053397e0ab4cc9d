// mask.rs - Mask loading and pixel classification
//
// Masks are painted with two flat colors: red for blocking obstacles and
// green for trigger-only zones. Anything else is background. A per-channel
// tolerance absorbs compression and resampling artifacts.

use std::path::Path;

use image::{DynamicImage, GenericImageView, RgbImage, imageops::FilterType};
use tracing::info;

use crate::ExtractError;

const TOLERANCE: i16 = 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Class {
    /// #ed1c23
    Blocking,
    /// #21b04c
    TriggerOnly,
}

impl Class {
    pub fn target(self) -> [u8; 3] {
        match self {
            Class::Blocking => [237, 28, 35],
            Class::TriggerOnly => [33, 176, 76],
        }
    }

    pub fn matches(self, px: [u8; 3]) -> bool {
        px.iter()
            .zip(self.target())
            .all(|(&p, t)| (p as i16 - t as i16).abs() < TOLERANCE)
    }
}

/// RGB mask at the target resolution
pub struct Mask {
    pixels: RgbImage,
    /// Dimensions before resampling
    pub source: (u32, u32),
}

impl Mask {
    pub fn open(path: &Path, width: u32, height: u32) -> Result<Self, ExtractError> {
        let img = image::open(path).map_err(|source| ExtractError::Open {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_image(img, width, height))
    }

    /// Nearest-neighbour resample to `width` x `height` if the sizes differ.
    /// Any smoothing filter would blend the region edges into colors that
    /// match neither class.
    pub fn from_image(img: DynamicImage, width: u32, height: u32) -> Self {
        let source = img.dimensions();
        let pixels = if source != (width, height) {
            info!(from = ?source, to = ?(width, height), "resampling mask");
            img.resize_exact(width, height, FilterType::Nearest).to_rgb8()
        } else {
            img.to_rgb8()
        };
        Self { pixels, source }
    }

    pub fn width(&self) -> u32 { self.pixels.width() }
    pub fn height(&self) -> u32 { self.pixels.height() }

    pub fn is(&self, x: u32, y: u32, class: Class) -> bool {
        class.matches(self.pixels.get_pixel(x, y).0)
    }

    pub fn count(&self, class: Class) -> usize {
        self.pixels.pixels().filter(|p| class.matches(p.0)).count()
    }
}
