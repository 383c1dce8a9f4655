//! Straight-alpha RGBA output image.

use image::RgbaImage;

use crate::error::ConvertError;

use super::PIXEL_BYTES;

/// A region converted to straight-alpha RGBA, one byte per channel.
///
/// The pixel plane is row-major and always exactly `width * height * 4`
/// bytes long.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaRegion {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl RgbaRegion {
    /// Pair a pixel plane with its dimensions.
    ///
    /// # Errors
    ///
    /// Returns [`ConvertError::DimensionMismatch`] if `pixels.len()` is not
    /// `width * height * 4`.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, ConvertError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(PIXEL_BYTES));
        if expected != Some(pixels.len()) {
            return Err(ConvertError::DimensionMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The RGBA pixel plane.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    /// Take ownership of the RGBA pixel plane.
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }

    /// The `[R, G, B, A]` value at `(x, y)`, or `None` outside the region.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * PIXEL_BYTES;
        let p = &self.pixels[offset..offset + PIXEL_BYTES];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Convert into an [`image::RgbaImage`] for downstream processing.
    pub fn into_image(self) -> Result<RgbaImage, ConvertError> {
        let (width, height, len) = (self.width, self.height, self.pixels.len());
        RgbaImage::from_raw(width, height, self.pixels).ok_or(ConvertError::DimensionMismatch {
            width,
            height,
            len,
        })
    }
}
