#![no_main]
use libfuzzer_sys::fuzz_target;
use zenpic::*;

fuzz_target!(|data: &[u8]| {
    // Arbitrary dimensions, layout and pixel bytes: must never panic
    if data.len() < 5 {
        return;
    }
    let width = u16::from_le_bytes([data[0], data[1]]) as u32 % 300;
    let height = data[2] as u32 % 8;
    let layout = match data[3] % 11 {
        0 => PixelLayout::Gray8,
        1 => PixelLayout::GrayAlpha8,
        2 => PixelLayout::Rgb8,
        3 => PixelLayout::Rgba8,
        4 => PixelLayout::Bgr8,
        5 => PixelLayout::Bgra8,
        6 => PixelLayout::Bgrx8,
        7 => PixelLayout::Gray16,
        8 => PixelLayout::Rgba16,
        9 => PixelLayout::GrayF32,
        _ => PixelLayout::RgbF32,
    };
    let _ = encode_pic(&data[4..], width, height, layout, enough::Unstoppable);
});
