use crate::error::PicError;

/// Caller-imposed resource limits, checked when an encoder opens.
///
/// All fields default to `None` (no limit). The format's own bounds
/// (1..=65535 per side, depth 1) are enforced regardless of these.
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum bytes for the per-encoder scanline scratch buffer.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check image dimensions and the scratch size they imply.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PicError> {
        let pixels = u64::from(width) * u64::from(height);
        ensure_within("width", u64::from(width), self.max_width)?;
        ensure_within("height", u64::from(height), self.max_height)?;
        ensure_within("pixel count", pixels, self.max_pixels)?;
        Ok(())
    }

    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), PicError> {
        ensure_within("scratch buffer bytes", bytes as u64, self.max_memory_bytes)
    }
}

fn ensure_within(what: &str, value: u64, limit: Option<u64>) -> Result<(), PicError> {
    match limit {
        Some(max) if value > max => Err(PicError::LimitExceeded(alloc::format!(
            "{what} {value} exceeds limit {max}"
        ))),
        _ => Ok(()),
    }
}
