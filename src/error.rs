use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while opening a slide or reading from it.
#[derive(Debug, Clone, Error)]
pub enum SlideError {
    /// Slide file missing, unreadable, or not recognized by the engine
    #[error("Failed to open slide {}: {reason}", path.display())]
    Open { path: PathBuf, reason: String },

    /// Level index outside `[0, level_count)`
    #[error("Invalid level {level}: slide has {level_count} level(s)")]
    InvalidLevel { level: i32, level_count: i32 },

    /// Requested rectangle cannot be read (non-positive or oversized)
    #[error("Invalid region {width}x{height}: {reason}")]
    InvalidRegion {
        width: i64,
        height: i64,
        reason: String,
    },

    /// The native engine signalled a decode failure
    #[error("Failed to read {width}x{height} region at ({x}, {y}) on level {level}: {reason}")]
    Read {
        level: i32,
        x: i64,
        y: i64,
        width: i64,
        height: i64,
        reason: String,
    },

    /// Raw buffer length disagrees with the requested geometry
    #[error("Region buffer size mismatch: expected {expected} bytes, got {actual}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    /// Pixel conversion failed
    #[error("Conversion error: {0}")]
    Convert(#[from] ConvertError),
}

/// Errors from the premultiplied BGRA to straight RGBA conversion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConvertError {
    /// Input ends with a partial pixel (strict conversion only)
    #[error("Buffer of {len} bytes has {trailing} trailing byte(s) after the last pixel")]
    TrailingBytes { len: usize, trailing: usize },

    /// Pixel plane length does not match `width * height * 4`
    #[error("Pixel plane of {len} bytes does not match {width}x{height} RGBA")]
    DimensionMismatch { width: u32, height: u32, len: usize },
}

/// Errors from encoding a converted region to an image file format.
#[derive(Debug, Clone, Error)]
pub enum ExportError {
    /// Output extension is not one we can encode
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// The image encoder failed
    #[error("Encode error: {message}")]
    Encode { message: String },

    /// Writing the encoded bytes failed
    #[error("I/O error: {0}")]
    Io(String),
}
