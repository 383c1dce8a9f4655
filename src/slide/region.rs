//! Raw region reads.
//!
//! A region read allocates a fresh destination buffer sized exactly for the
//! requested rectangle, lends it to the engine for the duration of the
//! native call, then checks its length before handing the bytes on. There is
//! no caching: every call goes back to the engine.

use tracing::debug;

use crate::error::SlideError;
use crate::native::SlideBackend;
use crate::pixel::{convert_exact, RgbaRegion, PIXEL_BYTES};

use super::Slide;

// =============================================================================
// Raw Region
// =============================================================================

/// A region exactly as the engine produced it.
///
/// Holds `width * height` packed pixels as premultiplied `[B, G, R, A]`
/// bytes; the length is always exactly `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRegion {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RawRegion {
    /// Wrap raw BGRA bytes for a `width x height` region.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::BufferSizeMismatch`] if `data` is not exactly
    /// `width * height * 4` bytes.
    pub fn from_bytes(width: u32, height: u32, data: Vec<u8>) -> Result<Self, SlideError> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(PIXEL_BYTES))
            .ok_or_else(|| SlideError::InvalidRegion {
                width: width.into(),
                height: height.into(),
                reason: "region size overflows".to_string(),
            })?;

        if data.len() != expected {
            return Err(SlideError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
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

    /// The premultiplied BGRA bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the premultiplied BGRA bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Convert to straight-alpha RGBA.
    pub fn to_rgba(&self) -> Result<RgbaRegion, SlideError> {
        let pixels = convert_exact(&self.data)?;
        Ok(RgbaRegion::new(self.width, self.height, pixels)?)
    }
}

/// Validate a requested size and return it as `(width, height, pixel_count)`.
fn region_size(width: i64, height: i64) -> Result<(u32, u32, usize), SlideError> {
    let invalid = |reason: &str| SlideError::InvalidRegion {
        width,
        height,
        reason: reason.to_string(),
    };

    if width <= 0 || height <= 0 {
        return Err(invalid("width and height must be positive"));
    }

    let w = u32::try_from(width).map_err(|_| invalid("width exceeds u32"))?;
    let h = u32::try_from(height).map_err(|_| invalid("height exceeds u32"))?;

    let pixel_count = (w as usize)
        .checked_mul(h as usize)
        .filter(|n| n.checked_mul(PIXEL_BYTES).is_some())
        .ok_or_else(|| invalid("region size overflows"))?;

    Ok((w, h, pixel_count))
}

fn alloc_failed(width: i64, height: i64) -> SlideError {
    SlideError::InvalidRegion {
        width,
        height,
        reason: "region buffer cannot be allocated".to_string(),
    }
}

/// Allocate `len` zeroed elements, reporting allocation failure as an error
/// instead of aborting.
fn alloc_zeroed<T: Copy + Default>(
    len: usize,
    width: i64,
    height: i64,
) -> Result<Vec<T>, SlideError> {
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| alloc_failed(width, height))?;
    buf.resize(len, T::default());
    Ok(buf)
}

// =============================================================================
// Region Reads
// =============================================================================

impl<B: SlideBackend> Slide<B> {
    /// Read the rectangle `[x, x + width) x [y, y + height)` of a level.
    ///
    /// `x` and `y` are the top-left corner in the level's own pixel
    /// coordinates.
    ///
    /// # Errors
    ///
    /// - [`SlideError::InvalidLevel`] if `level` is out of range
    /// - [`SlideError::InvalidRegion`] if `width` or `height` is not positive,
    ///   the buffer size would overflow, or the buffer cannot be allocated
    /// - [`SlideError::Read`] if the engine reports a failure
    pub fn read_region(
        &self,
        level: i32,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<RawRegion, SlideError> {
        self.check_level(level)?;
        let (w, h, pixel_count) = region_size(width, height)?;

        debug!(
            slide = self.identifier(),
            level, x, y, width, height, "Reading region"
        );

        let mut pixels = alloc_zeroed::<u32>(pixel_count, width, height)?;

        // `pixels` is lent as a fixed-length slice, so the engine cannot
        // resize it; the backend checks the slice against the requested
        // geometry before writing.
        self.backend()
            .read_region(&mut pixels, x, y, level, width, height)
            .map_err(|reason| SlideError::Read {
                level,
                x,
                y,
                width,
                height,
                reason,
            })?;

        // Packed ARGB words laid out little-endian are B, G, R, A bytes.
        let mut data = Vec::new();
        data.try_reserve_exact(pixel_count * PIXEL_BYTES)
            .map_err(|_| alloc_failed(width, height))?;
        data.extend(pixels.iter().flat_map(|p| p.to_le_bytes()));
        drop(pixels);

        RawRegion::from_bytes(w, h, data)
    }

    /// Read a region and convert it to straight-alpha RGBA.
    ///
    /// Same arguments and errors as [`Slide::read_region`], plus
    /// [`SlideError::Convert`] if the raw buffer is malformed.
    pub fn read_rgba_region(
        &self,
        level: i32,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<RgbaRegion, SlideError> {
        self.read_region(level, x, y, width, height)?.to_rgba()
    }
}

// =============================================================================
// Tests
// =============================================================================
