//! Softimage PIC encoder (internal).
//!
//! A PIC file is a 32-byte header, two channel packets (RGB chained to
//! alpha), then `height` scanlines. Each scanline holds the run-length
//! encoded RGB tuples followed by the run-length encoded alpha bytes,
//! with no padding or length prefix between them.
//!
//! Use top-level [`crate::encode_pic`], [`crate::EncodeRequest`] or
//! [`crate::PicEncoder`].

pub(crate) mod encode;
pub(crate) mod header;
mod rle;

use crate::error::PicError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::sink::ByteSink;
use alloc::vec::Vec;
use enough::Stop;
use encode::PicEncoder;

/// Encode a whole image buffer into `sink`.
///
/// Rows are `width * layout.bytes_per_pixel()` bytes, tightly packed,
/// top row first.
pub(crate) fn encode_into<S: ByteSink>(
    sink: S,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<S, PicError> {
    encode::validate_dimensions(width, height, 1)?;
    let row_len = width as usize * layout.bytes_per_pixel();
    let expected = row_len
        .checked_mul(height as usize)
        .ok_or_else(|| {
            PicError::LimitExceeded(alloc::format!("{width}x{height} image overflows usize"))
        })?;
    if pixels.len() < expected {
        return Err(PicError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    stop.check()?;

    let default_limits = Limits::default();
    let limits = limits.unwrap_or(&default_limits);
    let mut encoder = PicEncoder::open_with_limits(sink, width, height, 1, limits)?;
    for (y, row) in pixels[..expected].chunks_exact(row_len).enumerate() {
        if y % 16 == 0 {
            stop.check()?;
        }
        encoder.write_scanline(y as u32, row, layout)?;
    }
    encoder.close()
}

/// Encode a whole image buffer to a new `Vec`.
pub(crate) fn encode(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, PicError> {
    let preamble = header::HEADER_LEN + 2 * header::PACKET_LEN;
    let out = Vec::with_capacity(preamble + pixels.len() / 2);
    encode_into(out, pixels, width, height, layout, limits, stop)
}
