use alloc::string::String;
use enough::StopReason;

/// Errors from PIC encoding.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PicError {
    #[error("invalid dimensions {width}x{height}x{depth} (need 1..=65535 x 1..=65535 x 1)")]
    InvalidDimensions { width: u32, height: u32, depth: u32 },

    #[error("cannot open output: {0}")]
    SinkOpenFailure(String),

    #[error("write failed: {0}")]
    SinkWriteFailure(String),

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} bytes, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("scanline out of order: expected row {expected}, got {actual}")]
    ScanlineOutOfOrder { expected: u32, actual: u32 },

    #[error("encoder unusable after an earlier write failure")]
    Poisoned,

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for PicError {
    fn from(r: StopReason) -> Self {
        PicError::Cancelled(r)
    }
}

#[cfg(feature = "std")]
impl From<std::io::Error> for PicError {
    fn from(e: std::io::Error) -> Self {
        use alloc::string::ToString;
        PicError::SinkWriteFailure(e.to_string())
    }
}
