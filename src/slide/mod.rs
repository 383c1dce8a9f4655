//! Slide handle and region reads.
//!
//! ```text
//! Slide::level_dimensions ──► Slide::read_region ──► RawRegion::to_rgba
//!      (geometry)              (BGRA, premultiplied)    (straight RGBA)
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use wsi_region::Slide;
//!
//! let slide = Slide::open("sample.svs")?;
//! let (width, height) = slide.level_dimensions(0)?;
//!
//! // Read the top-left 512x512 corner as straight RGBA
//! let region = slide.read_rgba_region(0, 0, 0, 512.min(width), 512.min(height))?;
//! let img = region.into_image()?;
//! ```

mod handle;
mod region;

pub use handle::{LevelInfo, Slide};
pub use region::RawRegion;
