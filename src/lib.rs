//! # zenpic
//!
//! Softimage PIC image encoder.
//!
//! Writes the classic mixed run-length PIC variant: a fixed big-endian
//! header, an RGB channel packet chained to an alpha packet, then one
//! run-length encoded scanline after another. Output is byte-exact with
//! what long-standing PIC readers expect.
//!
//! ## Scanline Encoding
//!
//! Each scanline is encoded twice: once as a stream of RGB triplets and
//! once as a stream of alpha bytes. Both streams share one grammar of
//! control bytes: literal runs of up to 128 tuples, short repeats of up
//! to 128, and long repeats up to 65535 with a 16-bit count.
//!
//! ## Input
//!
//! Rows in any [`PixelLayout`] are normalized to packed RGBA before
//! encoding. Layouts without alpha encode as fully opaque.
//!
//! ## Non-Goals
//!
//! - Decoding
//! - Volume images (depth > 1)
//! - Channel layouts other than RGB + alpha
//!
//! ## Usage
//!
//! ```
//! use zenpic::{EncodeRequest, PixelLayout};
//! use enough::Unstoppable;
//!
//! let pixels = [255u8, 0, 0, 255, 255, 0, 0, 255]; // 2x1 red RGBA
//! let encoded = EncodeRequest::new()
//!     .encode(&pixels, 2, 1, PixelLayout::Rgba8, Unstoppable)?;
//! assert_eq!(&encoded[40..], &[129, 255, 0, 0, 129, 255]);
//! # Ok::<(), zenpic::PicError>(())
//! ```
//!
//! Streaming, one scanline at a time:
//!
//! ```
//! use zenpic::{PicEncoder, PixelLayout};
//!
//! let mut encoder = PicEncoder::open(Vec::new(), 3, 2, 1)?;
//! encoder.write_scanline(0, &[1, 2, 3, 4, 5, 6, 7, 8, 9], PixelLayout::Rgb8)?;
//! encoder.write_scanline(1, &[0; 9], PixelLayout::Rgb8)?;
//! let bytes: Vec<u8> = encoder.close()?;
//! # assert_eq!(&bytes[16..20], b"PICT");
//! # Ok::<(), zenpic::PicError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod encode;
mod error;
mod limits;
mod pic;
mod pixel;
mod sink;

use alloc::vec::Vec;

// Re-exports
pub use encode::EncodeRequest;
pub use enough::{Stop, Unstoppable};
pub use error::PicError;
pub use limits::Limits;
pub use pic::encode::{MAX_DIMENSION, PicEncoder};
pub use pic::header::{ChannelPacket, FileHeader, HEADER_LEN, PACKET_LEN, PIC_MAGIC};
pub use pixel::PixelLayout;
#[cfg(feature = "std")]
pub use sink::IoSink;
pub use sink::ByteSink;

/// Encode tightly packed `layout` rows as a PIC file.
pub fn encode_pic(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<Vec<u8>, PicError> {
    pic::encode(pixels, width, height, layout, None, &stop)
}

/// Encode and write a PIC file to `path`.
///
/// Bad dimensions are rejected before the file is created.
#[cfg(feature = "std")]
pub fn write_pic_file<P: AsRef<std::path::Path>>(
    path: P,
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    stop: impl Stop,
) -> Result<(), PicError> {
    let path = path.as_ref();
    pic::encode::validate_dimensions(width, height, 1)?;
    let sink = sink::create_file(path)?;
    pic::encode_into(sink, pixels, width, height, layout, None, &stop)?;
    Ok(())
}
