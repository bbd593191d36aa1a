use alloc::vec::Vec;
use enough::Stop;

use crate::error::PicError;
use crate::limits::Limits;
use crate::pixel::PixelLayout;
use crate::sink::ByteSink;

/// Builder for one-shot PIC encoding of a whole image buffer.
#[derive(Clone, Debug, Default)]
pub struct EncodeRequest<'a> {
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enforce resource limits before anything is written.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Encode tightly packed rows of `layout` pixels, top row first.
    pub fn encode(
        &self,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PicError> {
        crate::pic::encode(pixels, width, height, layout, self.limits, &stop)
    }

    /// Encode into a caller-supplied sink, returning it on success.
    ///
    /// On error the sink may hold a partial file.
    pub fn encode_into<S: ByteSink>(
        &self,
        sink: S,
        pixels: &[u8],
        width: u32,
        height: u32,
        layout: PixelLayout,
        stop: impl Stop,
    ) -> Result<S, PicError> {
        crate::pic::encode_into(sink, pixels, width, height, layout, self.limits, &stop)
    }

    /// Encode typed RGBA pixels, tightly packed.
    #[cfg(feature = "rgb")]
    pub fn encode_rgba8(
        &self,
        pixels: &[rgb::RGBA8],
        width: u32,
        height: u32,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PicError> {
        let w = width as usize;
        let needed = w.saturating_mul(height as usize);
        if pixels.len() < needed {
            return Err(PicError::BufferTooSmall {
                needed: needed.saturating_mul(4),
                actual: pixels.len() * 4,
            });
        }
        let rows = pixels[..needed].chunks_exact(w.max(1));
        self.encode_rows(rows, width, height, &stop)
    }

    /// Encode a (possibly strided) `ImgRef` of RGBA pixels.
    #[cfg(feature = "imgref")]
    pub fn encode_img(
        &self,
        img: imgref::ImgRef<'_, rgb::RGBA8>,
        stop: impl Stop,
    ) -> Result<Vec<u8>, PicError> {
        let (width, height) = img_dimensions(img.width(), img.height())?;
        self.encode_rows(img.rows(), width, height, &stop)
    }

    #[cfg(feature = "rgb")]
    fn encode_rows<'p>(
        &self,
        rows: impl Iterator<Item = &'p [rgb::RGBA8]>,
        width: u32,
        height: u32,
        stop: &dyn Stop,
    ) -> Result<Vec<u8>, PicError> {
        let default_limits = Limits::default();
        let limits = self.limits.unwrap_or(&default_limits);
        stop.check()?;
        let mut encoder =
            crate::PicEncoder::open_with_limits(Vec::new(), width, height, 1, limits)?;
        for (y, row) in rows.enumerate() {
            if y % 16 == 0 {
                stop.check()?;
            }
            encoder.write_rgba8_scanline(y as u32, row)?;
        }
        encoder.close()
    }
}

/// Narrow `ImgRef` dimensions to `u32` without wrapping.
#[cfg(feature = "imgref")]
fn img_dimensions(width: usize, height: usize) -> Result<(u32, u32), PicError> {
    match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        (w, h) => Err(PicError::InvalidDimensions {
            width: w.unwrap_or(u32::MAX),
            height: h.unwrap_or(u32::MAX),
            depth: 1,
        }),
    }
}
