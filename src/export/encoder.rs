//! PNG/JPEG region encoder.
//!
//! # Design Decisions
//!
//! - **PNG keeps alpha**: the straight RGBA plane is written as-is.
//! - **JPEG drops alpha**: JPEG has no alpha channel, so the color channels
//!   are written and alpha discarded.
//! - **Quality control**: JPEG quality is clamped to 1-100.

use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};

use crate::error::ExportError;
use crate::pixel::RgbaRegion;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 80;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Output Format
// =============================================================================

/// Image container to encode a region into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Png,
    Jpeg,
}

impl OutputFormat {
    /// Pick the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExportError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpg" | "jpeg" => Ok(Self::Jpeg),
            _ => Err(ExportError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

// =============================================================================
// Region Encoder
// =============================================================================

/// Encoder for converted regions.
///
/// # Example
///
/// ```ignore
/// use wsi_region::export::{OutputFormat, RegionEncoder};
///
/// let encoder = RegionEncoder::new();
/// let region = slide.read_rgba_region(0, 0, 0, 256, 256)?;
///
/// let png = encoder.encode(&region, OutputFormat::Png)?;
/// ```
#[derive(Debug, Clone)]
pub struct RegionEncoder {
    jpeg_quality: u8,
}

impl Default for RegionEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionEncoder {
    /// Create an encoder with the default JPEG quality.
    pub fn new() -> Self {
        Self {
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Create an encoder with the given JPEG quality (clamped to 1-100).
    pub fn with_jpeg_quality(quality: u8) -> Self {
        Self {
            jpeg_quality: clamp_quality(quality),
        }
    }

    /// The JPEG quality in use.
    pub fn jpeg_quality(&self) -> u8 {
        self.jpeg_quality
    }

    /// Encode a region into the given format.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Encode`] if the underlying encoder fails.
    pub fn encode(&self, region: &RgbaRegion, format: OutputFormat) -> Result<Vec<u8>, ExportError> {
        let mut output = Vec::new();
        let encode_error = |e: image::ImageError| ExportError::Encode {
            message: e.to_string(),
        };

        match format {
            OutputFormat::Png => {
                PngEncoder::new(&mut output)
                    .write_image(
                        region.as_bytes(),
                        region.width(),
                        region.height(),
                        ExtendedColorType::Rgba8,
                    )
                    .map_err(encode_error)?;
            }
            OutputFormat::Jpeg => {
                let img = region.clone().into_image().map_err(|e| ExportError::Encode {
                    message: e.to_string(),
                })?;
                let rgb = DynamicImage::ImageRgba8(img).to_rgb8();

                JpegEncoder::new_with_quality(&mut output, self.jpeg_quality)
                    .encode_image(&rgb)
                    .map_err(encode_error)?;
            }
        }

        Ok(output)
    }

    /// Encode a region and write it to `path`, choosing the format from the
    /// file extension.
    pub fn write_to_file(&self, region: &RgbaRegion, path: &Path) -> Result<usize, ExportError> {
        let format = OutputFormat::from_path(path)?;
        let bytes = self.encode(region, format)?;
        std::fs::write(path, &bytes).map_err(|e| ExportError::Io(e.to_string()))?;
        Ok(bytes.len())
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Validate JPEG quality parameter.
///
/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    (MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality)
}

/// Clamp quality to valid range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================
