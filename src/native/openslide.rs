//! FFI binding to the system `libopenslide`.

use std::ffi::{c_char, CStr, CString};
use std::path::Path;
use std::ptr::NonNull;

use tracing::debug;

use crate::error::SlideError;

use super::{level0_offset, SlideBackend};

/// Opaque `openslide_t` from `openslide.h`.
#[repr(C)]
struct OpenSlideT {
    _private: [u8; 0],
}

#[link(name = "openslide")]
extern "C" {
    fn openslide_open(filename: *const c_char) -> *mut OpenSlideT;
    fn openslide_close(osr: *mut OpenSlideT);
    fn openslide_get_error(osr: *mut OpenSlideT) -> *const c_char;
    fn openslide_get_level_count(osr: *mut OpenSlideT) -> i32;
    fn openslide_get_level_dimensions(osr: *mut OpenSlideT, level: i32, w: *mut i64, h: *mut i64);
    fn openslide_get_level_downsample(osr: *mut OpenSlideT, level: i32) -> f64;
    fn openslide_read_region(
        osr: *mut OpenSlideT,
        dest: *mut u32,
        x: i64,
        y: i64,
        level: i32,
        w: i64,
        h: i64,
    );
}

/// A slide opened through OpenSlide.
///
/// The handle is never null and is closed exactly once, in `Drop`.
/// OpenSlide errors are sticky: once `openslide_get_error` reports a
/// message, every later call on the handle fails with the same message.
pub struct OpenSlideBackend {
    osr: NonNull<OpenSlideT>,
    identifier: String,
}

// The handle may move between threads; shared access still needs external
// serialization, hence no `Sync`.
unsafe impl Send for OpenSlideBackend {}

impl OpenSlideBackend {
    /// Open the slide at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`SlideError::Open`] if the path does not exist, cannot be
    /// passed to C, is not a format OpenSlide recognizes, or OpenSlide
    /// reports an error while opening it.
    pub fn open(path: &Path) -> Result<Self, SlideError> {
        let open_error = |reason: String| SlideError::Open {
            path: path.to_path_buf(),
            reason,
        };

        if !path.exists() {
            return Err(open_error("file not found".to_string()));
        }

        let path_str = path
            .to_str()
            .ok_or_else(|| open_error("path is not valid UTF-8".to_string()))?;
        let c_path = CString::new(path_str)
            .map_err(|_| open_error("path contains a NUL byte".to_string()))?;

        // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
        let raw = unsafe { openslide_open(c_path.as_ptr()) };
        let osr = NonNull::new(raw)
            .ok_or_else(|| open_error("unrecognized or unreadable slide format".to_string()))?;

        let backend = Self {
            osr,
            identifier: path_str.to_string(),
        };

        // A non-null handle can still be in the error state; dropping
        // `backend` here closes it.
        if let Some(message) = backend.last_error() {
            return Err(open_error(message));
        }

        debug!(slide = %backend.identifier, "Opened slide with OpenSlide");
        Ok(backend)
    }

    /// The engine's sticky error message, if any.
    fn last_error(&self) -> Option<String> {
        // SAFETY: osr is a live handle; the returned string is owned by OpenSlide.
        let ptr = unsafe { openslide_get_error(self.osr.as_ptr()) };
        if ptr.is_null() {
            return None;
        }
        // SAFETY: non-null pointers from openslide_get_error are NUL-terminated.
        let message = unsafe { CStr::from_ptr(ptr) };
        Some(message.to_string_lossy().into_owned())
    }
}

impl SlideBackend for OpenSlideBackend {
    fn level_count(&self) -> i32 {
        // SAFETY: osr is a live handle.
        unsafe { openslide_get_level_count(self.osr.as_ptr()) }
    }

    fn level_dimensions(&self, level: i32) -> (i64, i64) {
        let mut width: i64 = -1;
        let mut height: i64 = -1;
        // SAFETY: osr is live and both out-pointers refer to initialized locals.
        unsafe { openslide_get_level_dimensions(self.osr.as_ptr(), level, &mut width, &mut height) };
        (width, height)
    }

    fn level_downsample(&self, level: i32) -> f64 {
        // SAFETY: osr is a live handle.
        unsafe { openslide_get_level_downsample(self.osr.as_ptr(), level) }
    }

    fn read_region(
        &self,
        dest: &mut [u32],
        x: i64,
        y: i64,
        level: i32,
        width: i64,
        height: i64,
    ) -> Result<(), String> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| usize::try_from(n).ok())
            .ok_or_else(|| format!("region {}x{} is not addressable", width, height))?;
        if dest.len() != expected {
            return Err(format!(
                "destination holds {} pixels, region needs {}",
                dest.len(),
                expected
            ));
        }

        let downsample = self.level_downsample(level);
        let x0 = level0_offset(x, downsample);
        let y0 = level0_offset(y, downsample);

        // SAFETY: dest is an exclusive borrow of exactly width*height u32s,
        // which is the amount OpenSlide writes; it cannot move or be resized
        // while borrowed.
        unsafe {
            openslide_read_region(
                self.osr.as_ptr(),
                dest.as_mut_ptr(),
                x0,
                y0,
                level,
                width,
                height,
            )
        };

        match self.last_error() {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }

    fn identifier(&self) -> &str {
        &self.identifier
    }
}

impl Drop for OpenSlideBackend {
    fn drop(&mut self) {
        debug!(slide = %self.identifier, "Closing slide");
        // SAFETY: osr came from openslide_open and Drop runs once.
        unsafe { openslide_close(self.osr.as_ptr()) };
    }
}
