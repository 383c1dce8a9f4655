//! Pixel format conversion.
//!
//! - [`convert`] / [`convert_exact`]: premultiplied BGRA bytes to straight RGBA
//! - [`RgbaRegion`]: a converted pixel plane paired with its width and height

mod convert;
mod region;

pub use convert::{convert, convert_exact, premultiply, unpremultiply_bgra, PIXEL_BYTES};
pub use region::RgbaRegion;
