#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpic::*;

/// Expand one channel group back into `width` tuples.
fn unpack(data: &[u8], pos: &mut usize, width: usize, w: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(width * w);
    while out.len() < width * w {
        let c = data[*pos];
        *pos += 1;
        let (n, literal) = match c {
            0..=127 => (c as usize + 1, true),
            128 => {
                let n = u16::from_be_bytes([data[*pos], data[*pos + 1]]) as usize;
                *pos += 2;
                (n, false)
            }
            _ => (c as usize - 127, false),
        };
        if literal {
            out.extend_from_slice(&data[*pos..*pos + n * w]);
            *pos += n * w;
        } else {
            for _ in 0..n {
                out.extend_from_slice(&data[*pos..*pos + w]);
            }
            *pos += w;
        }
    }
    assert_eq!(out.len(), width * w, "run crossed scanline boundary");
    out
}

fuzz_target!(|data: &[u8]| {
    // Treat input as RGBA rows of a small image; decoding must give it back
    if data.len() < 5 {
        return;
    }
    let width = (data[0] as usize % 200) + 1;
    let pixels = &data[1..];
    let height = (pixels.len() / (width * 4)).min(64);
    if height == 0 {
        return;
    }
    let pixels = &pixels[..width * height * 4];

    let encoded = encode_pic(
        pixels, width as u32, height as u32,
        PixelLayout::Rgba8, enough::Unstoppable,
    )
    .expect("valid image must encode");

    let mut pos = HEADER_LEN + 2 * PACKET_LEN;
    let mut decoded = Vec::with_capacity(pixels.len());
    for _ in 0..height {
        let rgb = unpack(&encoded, &mut pos, width, 3);
        let alpha = unpack(&encoded, &mut pos, width, 1);
        for (px, a) in rgb.chunks_exact(3).zip(alpha) {
            decoded.extend_from_slice(px);
            decoded.push(a);
        }
    }
    assert_eq!(pos, encoded.len());
    assert_eq!(decoded, pixels, "roundtrip pixel mismatch");
});
