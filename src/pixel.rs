use crate::error::PicError;

/// Pixel memory layout of caller-supplied rows.
///
/// Every layout is normalized to packed RGBA before run-length encoding.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelLayout {
    /// Single channel, 8-bit grayscale (opaque).
    Gray8,
    /// 2 channels, 8-bit gray + alpha.
    GrayAlpha8,
    /// 3 channels, 8-bit RGB (opaque).
    Rgb8,
    /// 4 channels, 8-bit RGBA.
    Rgba8,
    /// 3 channels, 8-bit BGR (opaque).
    Bgr8,
    /// 4 channels, 8-bit BGRA.
    Bgra8,
    /// 4 channels, 8-bit BGRX (opaque; 4th byte is padding, not alpha).
    Bgrx8,
    /// Single channel, 16-bit grayscale (native endian, opaque).
    Gray16,
    /// 4 channels, 16-bit RGBA (native endian).
    Rgba16,
    /// Single channel, 32-bit float grayscale in `[0, 1]` (native endian, opaque).
    GrayF32,
    /// 3 channels, 32-bit float RGB in `[0, 1]` (native endian, opaque).
    RgbF32,
}

impl PixelLayout {
    /// Bytes per pixel for this layout.
    pub fn bytes_per_pixel(&self) -> usize {
        match self {
            Self::Gray8 => 1,
            Self::GrayAlpha8 | Self::Gray16 => 2,
            Self::Rgb8 | Self::Bgr8 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 | Self::GrayF32 => 4,
            Self::Rgba16 => 8,
            Self::RgbF32 => 12,
        }
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 | Self::GrayF32 => 1,
            Self::GrayAlpha8 => 2,
            Self::Rgb8 | Self::Bgr8 | Self::RgbF32 => 3,
            Self::Rgba8 | Self::Bgra8 | Self::Bgrx8 | Self::Rgba16 => 4,
        }
    }

    /// Whether the layout carries a real alpha channel.
    ///
    /// Layouts without one encode alpha as 255.
    pub fn has_alpha(&self) -> bool {
        matches!(
            self,
            Self::GrayAlpha8 | Self::Rgba8 | Self::Bgra8 | Self::Rgba16
        )
    }
}

/// Pack RGBA components into one word: red in the low byte, alpha in the high byte.
#[inline]
pub(crate) fn pack(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_le_bytes([r, g, b, a])
}

/// Scale a `[0, 1]` float to 8 bits, rounding to nearest. NaN maps to 0.
#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0 + 0.5) as u8
}

/// Reduce one native-endian component of 1, 2 or 4 bytes to 8 bits.
#[inline]
fn component(raw: &[u8]) -> u8 {
    match *raw {
        [v] => v,
        // High byte of the 16-bit value
        [a, b] => (u16::from_ne_bytes([a, b]) >> 8) as u8,
        [a, b, c, d] => unit_to_u8(f32::from_ne_bytes([a, b, c, d])),
        _ => 0,
    }
}

/// Normalize one row of `layout` pixels into `out.len()` packed words.
pub(crate) fn pack_row(row: &[u8], layout: PixelLayout, out: &mut [u32]) -> Result<(), PicError> {
    let bpp = layout.bytes_per_pixel();
    let needed = out.len() * bpp;
    if row.len() < needed {
        return Err(PicError::BufferTooSmall {
            needed,
            actual: row.len(),
        });
    }

    let component_size = bpp / layout.channels();
    let opaque = !layout.has_alpha();
    for (dst, px) in out.iter_mut().zip(row[..needed].chunks_exact(bpp)) {
        let mut c = [0u8; 4];
        for (v, raw) in c.iter_mut().zip(px.chunks_exact(component_size)) {
            *v = component(raw);
        }
        let [r, g, b, a] = match layout {
            PixelLayout::Gray8 | PixelLayout::Gray16 | PixelLayout::GrayF32 => {
                [c[0], c[0], c[0], 0]
            }
            PixelLayout::GrayAlpha8 => [c[0], c[0], c[0], c[1]],
            PixelLayout::Bgr8 | PixelLayout::Bgra8 | PixelLayout::Bgrx8 => [c[2], c[1], c[0], c[3]],
            PixelLayout::Rgb8
            | PixelLayout::Rgba8
            | PixelLayout::Rgba16
            | PixelLayout::RgbF32 => c,
        };
        *dst = pack(r, g, b, if opaque { 255 } else { a });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn pack_puts_red_low_and_alpha_high() {
        assert_eq!(pack(0x11, 0x22, 0x33, 0x44), 0x4433_2211);
    }

    #[test]
    fn bgrx_padding_becomes_opaque() {
        let mut out = [0u32; 2];
        pack_row(&[1, 2, 3, 0, 4, 5, 6, 7], PixelLayout::Bgrx8, &mut out).unwrap();
        assert_eq!(out, [pack(3, 2, 1, 255), pack(6, 5, 4, 255)]);
    }

    #[test]
    fn gray_alpha_replicates_luma() {
        let mut out = [0u32; 1];
        pack_row(&[9, 100], PixelLayout::GrayAlpha8, &mut out).unwrap();
        assert_eq!(out, [pack(9, 9, 9, 100)]);
    }

    #[test]
    fn rgb_family_keeps_component_order() {
        let mut out = [0u32; 1];
        pack_row(&[1, 2, 3], PixelLayout::Rgb8, &mut out).unwrap();
        assert_eq!(out, [pack(1, 2, 3, 255)]);
        pack_row(&[1, 2, 3], PixelLayout::Bgr8, &mut out).unwrap();
        assert_eq!(out, [pack(3, 2, 1, 255)]);
        pack_row(&[1, 2, 3, 4], PixelLayout::Bgra8, &mut out).unwrap();
        assert_eq!(out, [pack(3, 2, 1, 4)]);
    }

    #[test]
    fn sixteen_bit_keeps_high_byte() {
        let row: Vec<u8> = [0x12ffu16, 0x3400, 0x56aa, 0x7801]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let mut out = [0u32; 1];
        pack_row(&row, PixelLayout::Rgba16, &mut out).unwrap();
        assert_eq!(out, [pack(0x12, 0x34, 0x56, 0x78)]);

        let mut out = [0u32; 2];
        pack_row(&row[..4], PixelLayout::Gray16, &mut out).unwrap();
        assert_eq!(out, [pack(0x12, 0x12, 0x12, 255), pack(0x34, 0x34, 0x34, 255)]);
    }

    #[test]
    fn float_is_clamped_and_rounded() {
        let row: Vec<u8> = [0.0f32, 0.5, 1.0, -0.25, 7.0, f32::NAN, 0.1]
            .iter()
            .flat_map(|v| v.to_ne_bytes())
            .collect();
        let mut out = [0u32; 7];
        pack_row(&row, PixelLayout::GrayF32, &mut out).unwrap();
        let gray: Vec<u8> = out.iter().map(|p| *p as u8).collect();
        assert_eq!(gray, [0, 128, 255, 0, 255, 0, 26]);
        assert!(out.iter().all(|p| p >> 24 == 255));

        let mut out = [0u32; 2];
        pack_row(&row[..24], PixelLayout::RgbF32, &mut out).unwrap();
        assert_eq!(out, [pack(0, 128, 255, 255), pack(0, 255, 0, 255)]);
    }

    #[test]
    fn only_alpha_layouts_carry_alpha() {
        for layout in [
            PixelLayout::GrayAlpha8,
            PixelLayout::Rgba8,
            PixelLayout::Bgra8,
            PixelLayout::Rgba16,
        ] {
            assert!(layout.has_alpha(), "{layout:?}");
        }
        assert!(!PixelLayout::Bgrx8.has_alpha());
        assert_eq!(PixelLayout::RgbF32.channels(), 3);
        assert_eq!(PixelLayout::RgbF32.bytes_per_pixel(), 12);
    }

    #[test]
    fn short_row_is_rejected() {
        let mut out = [0u32; 3];
        let err = pack_row(&[0u8; 8], PixelLayout::Rgb8, &mut out).unwrap_err();
        assert!(matches!(
            err,
            PicError::BufferTooSmall {
                needed: 9,
                actual: 8
            }
        ));
    }
}
