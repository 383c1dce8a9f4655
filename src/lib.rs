//! # WSI Region
//!
//! Region extraction for pyramidal Whole Slide Images (WSI).
//!
//! Slides are decoded by OpenSlide; this crate opens a slide handle, answers
//! level geometry queries, and reads rectangular regions, converting
//! OpenSlide's premultiplied BGRA pixels into straight-alpha RGBA that
//! generic image code can consume.
//!
//! ## Architecture
//!
//! - [`native`] - The engine seam ([`SlideBackend`]) and the OpenSlide FFI backend
//! - [`slide`] - [`Slide`] handle, level geometry, raw region reads
//! - [`pixel`] - Premultiplied BGRA to straight RGBA conversion
//! - [`export`] - PNG/JPEG encoding for the command line tool
//! - [`config`] - CLI types
//!
//! All operations are synchronous and run on the caller's thread.
//!
//! ## Example
//!
//! ```rust,ignore
//! use wsi_region::Slide;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let slide = Slide::open("sample.svs")?;
//!
//!     for level in slide.levels()? {
//!         println!("level {}: {}x{}", level.level, level.width, level.height);
//!     }
//!
//!     let region = slide.read_rgba_region(0, 1000, 1000, 256, 256)?;
//!     region.into_image()?.save("region.png")?;
//!     Ok(())
//! }
//! ```
//!
//! `Slide::open` requires the `openslide` feature; without it, wrap any
//! [`SlideBackend`] with [`Slide::from_backend`].

pub mod config;
pub mod error;
pub mod export;
pub mod native;
pub mod pixel;
pub mod slide;

// Re-export commonly used types
pub use error::{ConvertError, ExportError, SlideError};
pub use export::{OutputFormat, RegionEncoder};
#[cfg(feature = "openslide")]
pub use native::OpenSlideBackend;
pub use native::{level0_offset, SlideBackend};
pub use pixel::{convert, convert_exact, unpremultiply_bgra, RgbaRegion};
pub use slide::{LevelInfo, RawRegion, Slide};
