//! Streaming PIC encoder: header at open, then one call per scanline.

use alloc::vec::Vec;

use super::header::{FileHeader, write_preamble};
use super::rle::encode_scanline;
use crate::error::PicError;
use crate::limits::Limits;
use crate::pixel::{PixelLayout, pack_row};
use crate::sink::{ByteSink, CountingSink};

/// Largest width or height the 16-bit header fields can describe.
pub const MAX_DIMENSION: u32 = u16::MAX as u32;

/// Validate image dimensions against the format's bounds.
///
/// Width and height must be in `1..=65535` and depth exactly 1.
pub(crate) fn validate_dimensions(
    width: u32,
    height: u32,
    depth: u32,
) -> Result<FileHeader, PicError> {
    let in_range = |v: u32| (1..=MAX_DIMENSION).contains(&v);
    if !in_range(width) || !in_range(height) || depth != 1 {
        return Err(PicError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }
    Ok(FileHeader::new(width as u16, height as u16))
}

/// Writes a PIC file to a [`ByteSink`], one scanline at a time.
///
/// Scanlines must arrive in order, `y = 0, 1, ..`, exactly `height` of
/// them. The encoder owns the sink until [`close`](Self::close) hands it
/// back. A sink failure during a scanline poisons the encoder: every later
/// write and [`close`](Self::close) return [`PicError::Poisoned`], since
/// whatever reached the sink is not a valid file.
#[derive(Debug)]
pub struct PicEncoder<S: ByteSink> {
    sink: S,
    header: FileHeader,
    scratch: Vec<u32>,
    next_row: u32,
    failed: bool,
}

impl<S: ByteSink> PicEncoder<S> {
    /// Validate dimensions and write the header and channel packets.
    ///
    /// On failure nothing is kept: the sink is dropped with the error.
    pub fn open(sink: S, width: u32, height: u32, depth: u32) -> Result<Self, PicError> {
        Self::open_with_limits(sink, width, height, depth, &Limits::default())
    }

    /// Like [`open`](Self::open), also enforcing caller limits.
    pub fn open_with_limits(
        mut sink: S,
        width: u32,
        height: u32,
        depth: u32,
        limits: &Limits,
    ) -> Result<Self, PicError> {
        let header = validate_dimensions(width, height, depth)?;
        limits.check(width, height)?;
        let scratch_bytes = width as usize * core::mem::size_of::<u32>();
        limits.check_memory(scratch_bytes)?;

        write_preamble(&mut sink, &header)?;
        log::debug!("pic: opened {width}x{height} image");

        Ok(Self {
            sink,
            header,
            scratch: alloc::vec![0u32; width as usize],
            next_row: 0,
            failed: false,
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.header.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.header.height)
    }

    /// Number of scanlines written so far.
    pub fn rows_written(&self) -> u32 {
        self.next_row
    }

    /// Normalize a row of `layout` pixels and encode it as scanline `y`.
    pub fn write_scanline(
        &mut self,
        y: u32,
        row: &[u8],
        layout: PixelLayout,
    ) -> Result<(), PicError> {
        self.expect_row(y)?;
        pack_row(row, layout, &mut self.scratch)?;
        self.emit_scratch(y)
    }

    /// Encode an already packed row (red in the low byte, alpha in the high byte).
    pub fn write_packed_scanline(&mut self, y: u32, line: &[u32]) -> Result<(), PicError> {
        self.expect_row(y)?;
        let w = self.scratch.len();
        let src = line.get(..w).ok_or(PicError::BufferTooSmall {
            needed: w * 4,
            actual: line.len() * 4,
        })?;
        self.scratch.copy_from_slice(src);
        self.emit_scratch(y)
    }

    /// Encode a row of typed RGBA pixels.
    #[cfg(feature = "rgb")]
    pub fn write_rgba8_scanline(&mut self, y: u32, row: &[rgb::RGBA8]) -> Result<(), PicError> {
        self.expect_row(y)?;
        let w = self.scratch.len();
        if row.len() < w {
            return Err(PicError::BufferTooSmall {
                needed: w * 4,
                actual: row.len() * 4,
            });
        }
        for (dst, px) in self.scratch.iter_mut().zip(row) {
            *dst = crate::pixel::pack(px.r, px.g, px.b, px.a);
        }
        self.emit_scratch(y)
    }

    /// Flush and hand back the sink.
    ///
    /// Fails with [`PicError::Poisoned`] if an earlier scanline failed; the
    /// sink is dropped with the partial output.
    pub fn close(mut self) -> Result<S, PicError> {
        if self.failed {
            log::warn!("pic: discarding output after failed scanline {}", self.next_row);
            return Err(PicError::Poisoned);
        }
        if self.next_row < self.height() {
            log::warn!(
                "pic: closing after {} of {} scanlines",
                self.next_row,
                self.height()
            );
        }
        self.sink.flush()?;
        log::debug!("pic: closed after {} scanlines", self.next_row);
        Ok(self.sink)
    }

    fn expect_row(&self, y: u32) -> Result<(), PicError> {
        if self.failed {
            return Err(PicError::Poisoned);
        }
        if y != self.next_row || y >= self.height() {
            return Err(PicError::ScanlineOutOfOrder {
                expected: self.next_row,
                actual: y,
            });
        }
        Ok(())
    }

    fn emit_scratch(&mut self, y: u32) -> Result<(), PicError> {
        let mut counted = CountingSink::new(&mut self.sink);
        if let Err(e) = encode_scanline(&mut counted, &self.scratch) {
            self.failed = true;
            return Err(e);
        }
        log::trace!("pic: scanline {y} packed into {} bytes", counted.written);
        self.next_row += 1;
        Ok(())
    }
}

#[cfg(feature = "std")]
impl PicEncoder<crate::sink::IoSink<std::io::BufWriter<std::fs::File>>> {
    /// Create (or truncate) a file at `path` and open an encoder on it.
    pub fn create<P: AsRef<std::path::Path>>(
        path: P,
        width: u32,
        height: u32,
        depth: u32,
    ) -> Result<Self, PicError> {
        let path = path.as_ref();
        // Reject bad dimensions before touching the filesystem.
        validate_dimensions(width, height, depth)?;
        let sink = crate::sink::create_file(path)?;
        Self::open(sink, width, height, depth)
    }
}
