//! File header and channel packet layout.
//!
//! All multi-byte fields are big-endian.

use crate::error::PicError;
use crate::sink::ByteSink;

/// Softimage PIC magic number.
pub const PIC_MAGIC: u32 = 0x5380_F634;
/// Format version written to every file.
const PIC_VERSION: f32 = 3.5;
/// Pixel aspect ratio (square pixels, not the image aspect).
const PIC_RATIO: f32 = 1.0;
/// Fields flag: full frame, non-interlaced.
const PIC_FIELDS_FULL_FRAME: u16 = 3;

/// Serialized header size in bytes.
pub const HEADER_LEN: usize = 32;
/// Serialized channel packet size in bytes.
pub const PACKET_LEN: usize = 4;

// Channel code bits of a packet's `channel_code` mask.
const CHANNEL_RED: u8 = 0x80;
const CHANNEL_GREEN: u8 = 0x40;
const CHANNEL_BLUE: u8 = 0x20;
const CHANNEL_ALPHA: u8 = 0x10;

/// Packet type code for run-length encoded 8-bit integer channels.
const PACKET_TYPE_MIXED_RUN_LENGTH: u8 = 2;

/// Fixed-layout file header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FileHeader {
    pub width: u16,
    pub height: u16,
}

impl FileHeader {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        out[0..4].copy_from_slice(&PIC_MAGIC.to_be_bytes());
        out[4..8].copy_from_slice(&PIC_VERSION.to_be_bytes());
        // 8..16: comment, zero-filled
        out[16..20].copy_from_slice(b"PICT");
        out[20..22].copy_from_slice(&self.width.to_be_bytes());
        out[22..24].copy_from_slice(&self.height.to_be_bytes());
        out[24..28].copy_from_slice(&PIC_RATIO.to_be_bytes());
        out[28..30].copy_from_slice(&PIC_FIELDS_FULL_FRAME.to_be_bytes());
        // 30..32: padding
        out
    }
}

/// Describes one group of channels that follows in each scanline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelPacket {
    /// Another packet follows this one.
    pub chained: bool,
    /// Bits per component.
    pub size: u8,
    pub type_code: u8,
    pub channel_code: u8,
}

impl ChannelPacket {
    /// Red, green and blue, chained to the alpha packet.
    pub const RGB: Self = Self {
        chained: true,
        size: 8,
        type_code: PACKET_TYPE_MIXED_RUN_LENGTH,
        channel_code: CHANNEL_RED | CHANNEL_GREEN | CHANNEL_BLUE,
    };

    /// Alpha, terminating the packet chain.
    pub const ALPHA: Self = Self {
        chained: false,
        size: 8,
        type_code: PACKET_TYPE_MIXED_RUN_LENGTH,
        channel_code: CHANNEL_ALPHA,
    };

    pub fn to_bytes(&self) -> [u8; PACKET_LEN] {
        [
            u8::from(self.chained),
            self.size,
            self.type_code,
            self.channel_code,
        ]
    }
}

/// Write the header followed by the RGB and alpha packets.
pub(crate) fn write_preamble<S: ByteSink + ?Sized>(
    sink: &mut S,
    header: &FileHeader,
) -> Result<(), PicError> {
    sink.write_all(&header.to_bytes())?;
    sink.write_all(&ChannelPacket::RGB.to_bytes())?;
    sink.write_all(&ChannelPacket::ALPHA.to_bytes())?;
    Ok(())
}
