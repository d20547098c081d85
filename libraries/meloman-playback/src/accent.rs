//! Accent colour derived from cover art
//!
//! The average colour of a downscaled cover, sampled on a grid, plus a
//! readable foreground picked from its luminance.

use crate::error::{PlaybackError, Result};
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};

/// Largest edge the artwork is scaled to before sampling
const MAX_SAMPLE_EDGE: u32 = 200;

const DARK_FOREGROUND: &str = "#111827";
const LIGHT_FOREGROUND: &str = "#ffffff";

/// Theme colour for the currently playing track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Accent {
    /// Background colour as `#rrggbb`
    pub color: String,

    /// Text colour readable on top of `color`
    pub foreground: String,

    pub rgb: (u8, u8, u8),
}

impl Accent {
    pub fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        let luminance = (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0;
        let foreground = if luminance > 0.5 {
            DARK_FOREGROUND
        } else {
            LIGHT_FOREGROUND
        };

        Self {
            color: format!("#{:02x}{:02x}{:02x}", r, g, b),
            foreground: foreground.to_string(),
            rgb: (r, g, b),
        }
    }

    /// Average colour of encoded artwork
    ///
    /// The image is scaled so neither edge exceeds 200 px, then every
    /// `step`-th pixel on both axes is sampled.
    pub fn from_image_bytes(bytes: &[u8], step: u32) -> Result<Self> {
        let image =
            image::load_from_memory(bytes).map_err(|e| PlaybackError::Artwork(e.to_string()))?;

        let width = image.width().min(MAX_SAMPLE_EDGE);
        let height = image.height().min(MAX_SAMPLE_EDGE);
        let pixels = image
            .resize_exact(width, height, FilterType::Triangle)
            .into_rgb8();

        let step = step.max(1) as usize;
        let (mut r, mut g, mut b, mut count) = (0u64, 0u64, 0u64, 0u64);
        for y in (0..height).step_by(step) {
            for x in (0..width).step_by(step) {
                let [pr, pg, pb] = pixels.get_pixel(x, y).0;
                r += u64::from(pr);
                g += u64::from(pg);
                b += u64::from(pb);
                count += 1;
            }
        }

        if count == 0 {
            return Err(PlaybackError::Artwork("no pixels sampled".to_string()));
        }

        let average = |sum: u64| ((sum as f64 / count as f64).round()) as u8;
        Ok(Self::from_rgb(average(r), average(g), average(b)))
    }
}

impl Default for Accent {
    fn default() -> Self {
        Self::from_rgb(0x3b, 0x82, 0xf6)
    }
}
