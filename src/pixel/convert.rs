//! Premultiplied BGRA to straight-alpha RGBA conversion.
//!
//! OpenSlide returns pixels as native-endian 32-bit premultiplied ARGB. Laid
//! out as little-endian bytes each pixel reads `B, G, R, A`. Generic image
//! code expects byte-per-channel `R, G, B, A` with straight alpha, so each
//! pixel is reordered and, when partially transparent, divided by alpha.
//!
//! # Rounding
//!
//! Un-premultiplication truncates (`c * 255 / a`). Premultiplying the result
//! again with the same truncating rule recovers the original channel to
//! within 1, never exactly in general: `[50, 50, 50, 100]` converts to
//! `127`, and `127 * 100 / 255` is `49`.
//!
//! # Malformed input
//!
//! Valid premultiplied data has every channel `<= a`. Channels above alpha
//! still convert without panicking; the intermediate is computed in `u16`
//! and the quotient truncated to its low byte, so `c = 200, a = 100` yields
//! `510 as u8 == 254`.

use tracing::trace;

use crate::error::ConvertError;

/// Bytes per packed pixel, both in and out.
pub const PIXEL_BYTES: usize = 4;

/// Un-premultiply one color channel.
#[inline]
fn unpremultiply(channel: u8, alpha: u8) -> u8 {
    (u16::from(channel) * 255 / u16::from(alpha)) as u8
}

/// Convert one premultiplied `[B, G, R, A]` pixel to straight `[R, G, B, A]`.
///
/// Fully transparent and fully opaque pixels are already in straight form
/// and are only reordered.
#[inline]
pub fn unpremultiply_bgra(pixel: [u8; 4]) -> [u8; 4] {
    let [b, g, r, a] = pixel;
    match a {
        0 | 255 => [r, g, b, a],
        _ => [
            unpremultiply(r, a),
            unpremultiply(g, a),
            unpremultiply(b, a),
            a,
        ],
    }
}

/// Convert a raw premultiplied BGRA buffer into straight RGBA.
///
/// Pixels are consumed in order and each produces exactly one output pixel.
/// The pass stops at the last complete 4-byte group: trailing bytes are the
/// end of input, not an error, so the output length is
/// `raw.len() / 4 * 4`. Use [`convert_exact`] to reject such input.
pub fn convert(raw: &[u8]) -> Vec<u8> {
    let chunks = raw.chunks_exact(PIXEL_BYTES);
    let mut out = Vec::with_capacity(raw.len() - chunks.remainder().len());

    for chunk in chunks {
        out.extend_from_slice(&unpremultiply_bgra([chunk[0], chunk[1], chunk[2], chunk[3]]));
    }

    trace!(input = raw.len(), output = out.len(), "Converted BGRA to RGBA");
    out
}

/// Convert a raw premultiplied BGRA buffer, rejecting partial pixels.
///
/// A correctly sized region read always has a length that is a multiple of
/// 4, so anything else is a contract violation upstream.
///
/// # Errors
///
/// Returns [`ConvertError::TrailingBytes`] if `raw.len()` is not a multiple
/// of 4.
pub fn convert_exact(raw: &[u8]) -> Result<Vec<u8>, ConvertError> {
    let trailing = raw.len() % PIXEL_BYTES;
    if trailing != 0 {
        return Err(ConvertError::TrailingBytes {
            len: raw.len(),
            trailing,
        });
    }
    Ok(convert(raw))
}

/// Premultiply one straight channel with the same truncating rule.
///
/// Inverse of the conversion up to rounding drift; used to check it.
#[inline]
pub fn premultiply(channel: u8, alpha: u8) -> u8 {
    (u16::from(channel) * u16::from(alpha) / 255) as u8
}

// =============================================================================
// Tests
// =============================================================================
