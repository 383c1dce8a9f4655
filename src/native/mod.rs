//! Native slide-decoding engine seam.
//!
//! The slide layer talks to the decoding engine only through the
//! [`SlideBackend`] trait, which mirrors the narrow C API exposed by
//! OpenSlide:
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │               Slide<B>                  │
//! │  (level checks, region sizing, convert) │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │          SlideBackend Trait             │
//! │  (level geometry, read into buffer)     │
//! └────────────────────┬────────────────────┘
//!                      │
//!                      ▼
//! ┌─────────────────────────────────────────┐
//! │           OpenSlideBackend              │
//! │  (FFI to libopenslide, feature-gated)   │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Backends own their native resource and release it in `Drop`, so every
//! opened slide is closed exactly once regardless of how the owning
//! [`crate::slide::Slide`] goes out of scope.

#[cfg(feature = "openslide")]
mod openslide;

#[cfg(feature = "openslide")]
pub use openslide::OpenSlideBackend;

/// Low-level access to an opened slide in the native engine.
///
/// Level indices passed to these methods have already been bounds-checked
/// by the caller; implementations may assume `0 <= level < level_count()`.
pub trait SlideBackend {
    /// Number of pyramid levels. At least 1 for a successfully opened slide.
    fn level_count(&self) -> i32;

    /// Full pixel extent `(width, height)` of a level.
    fn level_dimensions(&self, level: i32) -> (i64, i64);

    /// Downsample factor of a level relative to level 0.
    fn level_downsample(&self, level: i32) -> f64;

    /// Read the rectangle at `(x, y)` of size `width x height` into `dest`.
    ///
    /// `x` and `y` are the top-left corner in the level's own pixel
    /// coordinates. `dest` holds exactly `width * height` packed
    /// premultiplied ARGB pixels and is written in place; its length is
    /// fixed for the duration of the call.
    ///
    /// Returns the engine's error message on failure.
    fn read_region(
        &self,
        dest: &mut [u32],
        x: i64,
        y: i64,
        level: i32,
        width: i64,
        height: i64,
    ) -> Result<(), String>;

    /// A human-readable identifier for log output (typically the path).
    fn identifier(&self) -> &str;
}

/// Translate a level-pixel coordinate into level-0 coordinates.
///
/// OpenSlide addresses every region by its level-0 top-left corner, while
/// callers of this crate address regions in the level's own pixels. The
/// product is rounded so that slightly non-integer downsamples (e.g.
/// `4.000234`) still land on the expected level-0 pixel.
#[inline]
pub fn level0_offset(coord: i64, downsample: f64) -> i64 {
    (coord as f64 * downsample).round() as i64
}
