//! Threshold chroma key used for background removal.
//!
//! A pixel is background when *every* color channel is strictly above its
//! floor. Alpha is ignored. Matching pixels become fully transparent white;
//! everything else is left untouched.
//!
//! There is no tolerance band, no edge feathering and no connectivity check:
//! an isolated interior pixel that matches is cleared just like the border.

use image::{Rgba, RgbaImage};

/// Replacement written over every keyed-out pixel.
pub const TRANSPARENT_WHITE: Rgba<u8> = Rgba([255, 255, 255, 0]);

/// Stock per-channel floor `[r, g, b]`. Targets the light green/white
/// background of the source artwork.
pub const DEFAULT_FLOOR: [u8; 3] = [100, 200, 150];

/// Per-channel strict lower bound for background pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChromaKey {
    pub floor: [u8; 3],
}

impl ChromaKey {
    pub fn new(floor: [u8; 3]) -> Self {
        Self { floor }
    }

    /// Whether `pixel` counts as background.
    #[inline]
    pub fn matches(&self, pixel: &Rgba<u8>) -> bool {
        let [r, g, b, _] = pixel.0;
        r > self.floor[0] && g > self.floor[1] && b > self.floor[2]
    }

    /// Key out every matching pixel in place. Returns how many were cleared.
    pub fn apply(&self, img: &mut RgbaImage) -> u64 {
        let mut cleared = 0;
        for pixel in img.pixels_mut() {
            if self.matches(pixel) {
                *pixel = TRANSPARENT_WHITE;
                cleared += 1;
            }
        }
        cleared
    }
}

impl Default for ChromaKey {
    fn default() -> Self {
        Self::new(DEFAULT_FLOOR)
    }
}
