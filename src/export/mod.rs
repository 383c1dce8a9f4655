//! Encoding converted regions to image files.
//!
//! This is glue for the command line tool; library users usually hand the
//! [`crate::pixel::RgbaRegion`] to their own encoder instead.

mod encoder;

pub use encoder::{
    clamp_quality, is_valid_quality, OutputFormat, RegionEncoder, DEFAULT_JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
