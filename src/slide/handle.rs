//! Slide handle and level geometry.

use serde::Serialize;
use tracing::debug;

use crate::error::SlideError;
use crate::native::SlideBackend;

#[cfg(feature = "openslide")]
use crate::native::OpenSlideBackend;
#[cfg(feature = "openslide")]
use std::path::Path;

// =============================================================================
// Level Information
// =============================================================================

/// Geometry of a single pyramid level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelInfo {
    /// Level index (0 = highest resolution)
    pub level: i32,

    /// Width of this level in pixels
    pub width: i64,

    /// Height of this level in pixels
    pub height: i64,

    /// Downsample factor relative to level 0
    pub downsample: f64,
}

// =============================================================================
// Slide
// =============================================================================

/// An open pyramidal slide.
///
/// The slide exclusively owns its native resource. It is released exactly
/// once, either by [`Slide::close`] or when the slide is dropped, so early
/// returns through `?` never leak a handle.
///
/// Level indices are bounds-checked on every call and out-of-range levels
/// fail with [`SlideError::InvalidLevel`] before reaching the engine.
///
/// No locking is added here: sharing one slide across threads needs
/// external serialization unless the backend's reads are thread-safe.
pub struct Slide<B: SlideBackend> {
    backend: B,
}

#[cfg(feature = "openslide")]
impl Slide<OpenSlideBackend> {
    /// Open the slide at `path` with OpenSlide.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::Open`] if the file is missing, unreadable, or
    /// not a format OpenSlide recognizes.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, SlideError> {
        OpenSlideBackend::open(path.as_ref()).map(Self::from_backend)
    }
}

impl<B: SlideBackend> Slide<B> {
    /// Wrap an already opened backend.
    pub fn from_backend(backend: B) -> Self {
        debug!(
            slide = backend.identifier(),
            levels = backend.level_count(),
            "Slide ready"
        );
        Self { backend }
    }

    /// Identifier of the underlying resource (usually its path).
    pub fn identifier(&self) -> &str {
        self.backend.identifier()
    }

    /// Number of pyramid levels.
    pub fn level_count(&self) -> i32 {
        self.backend.level_count()
    }

    pub(crate) fn backend(&self) -> &B {
        &self.backend
    }

    pub(crate) fn check_level(&self, level: i32) -> Result<(), SlideError> {
        let level_count = self.level_count();
        if level < 0 || level >= level_count {
            return Err(SlideError::InvalidLevel { level, level_count });
        }
        Ok(())
    }

    /// Full pixel extent `(width, height)` of a level.
    pub fn level_dimensions(&self, level: i32) -> Result<(i64, i64), SlideError> {
        self.check_level(level)?;
        Ok(self.backend.level_dimensions(level))
    }

    /// Pixel extent of level 0.
    pub fn dimensions(&self) -> Result<(i64, i64), SlideError> {
        self.level_dimensions(0)
    }

    /// Downsample factor of a level relative to level 0.
    pub fn level_downsample(&self, level: i32) -> Result<f64, SlideError> {
        self.check_level(level)?;
        Ok(self.backend.level_downsample(level))
    }

    /// Complete geometry of a level.
    pub fn level_info(&self, level: i32) -> Result<LevelInfo, SlideError> {
        let (width, height) = self.level_dimensions(level)?;
        Ok(LevelInfo {
            level,
            width,
            height,
            downsample: self.backend.level_downsample(level),
        })
    }

    /// Geometry of every level, from highest resolution down.
    pub fn levels(&self) -> Result<Vec<LevelInfo>, SlideError> {
        (0..self.level_count()).map(|level| self.level_info(level)).collect()
    }

    /// Find the level to read for a given downsample factor.
    ///
    /// Returns the lowest-resolution level whose downsample does not exceed
    /// `downsample`, so reading from it never loses detail relative to the
    /// request. Falls back to level 0 when every level is coarser.
    pub fn best_level_for_downsample(&self, downsample: f64) -> i32 {
        let mut best = 0;
        for level in 0..self.level_count() {
            if self.backend.level_downsample(level) <= downsample {
                best = level;
            } else {
                break;
            }
        }
        best
    }

    /// Whether `[x, x + width) x [y, y + height)` lies entirely inside a level.
    ///
    /// Reads outside the level are not rejected; OpenSlide fills the
    /// uncovered area with transparent pixels.
    pub fn level_contains(
        &self,
        level: i32,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
    ) -> Result<bool, SlideError> {
        let (level_width, level_height) = self.level_dimensions(level)?;
        let inside = |start: i64, len: i64, extent: i64| {
            start >= 0 && len > 0 && start.checked_add(len).is_some_and(|end| end <= extent)
        };
        Ok(inside(x, width, level_width) && inside(y, height, level_height))
    }

    /// Release the native resource now.
    pub fn close(self) {
        debug!(slide = self.identifier(), "Slide closed");
    }
}

// =============================================================================
// Tests
// =============================================================================
