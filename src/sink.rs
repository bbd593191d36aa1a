//! Output destinations for encoded bytes.

use alloc::vec::Vec;

use crate::error::PicError;

/// A destination that accepts encoded bytes.
///
/// Each call either accepts the whole slice or reports
/// [`PicError::SinkWriteFailure`]. Nothing is retried.
pub trait ByteSink {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PicError>;

    /// Flush buffered bytes to the underlying destination.
    fn flush(&mut self) -> Result<(), PicError> {
        Ok(())
    }
}

impl ByteSink for Vec<u8> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PicError> {
        self.extend_from_slice(bytes);
        Ok(())
    }
}

impl<S: ByteSink + ?Sized> ByteSink for &mut S {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PicError> {
        (**self).write_all(bytes)
    }

    fn flush(&mut self) -> Result<(), PicError> {
        (**self).flush()
    }
}

/// Adapts any [`std::io::Write`] into a [`ByteSink`].
#[cfg(feature = "std")]
#[derive(Debug)]
pub struct IoSink<W: std::io::Write>(pub W);

#[cfg(feature = "std")]
impl<W: std::io::Write> IoSink<W> {
    pub fn into_inner(self) -> W {
        self.0
    }
}

#[cfg(feature = "std")]
impl<W: std::io::Write> ByteSink for IoSink<W> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PicError> {
        std::io::Write::write_all(&mut self.0, bytes)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PicError> {
        std::io::Write::flush(&mut self.0)?;
        Ok(())
    }
}

/// Create (or truncate) the file at `path` as a buffered sink.
#[cfg(feature = "std")]
pub(crate) fn create_file(
    path: &std::path::Path,
) -> Result<IoSink<std::io::BufWriter<std::fs::File>>, PicError> {
    let file = std::fs::File::create(path)
        .map_err(|e| PicError::SinkOpenFailure(alloc::format!("{}: {e}", path.display())))?;
    Ok(IoSink(std::io::BufWriter::new(file)))
}

/// Counts bytes passing through to an inner sink.
pub(crate) struct CountingSink<'a, S: ?Sized> {
    inner: &'a mut S,
    pub(crate) written: usize,
}

impl<'a, S: ByteSink + ?Sized> CountingSink<'a, S> {
    pub(crate) fn new(inner: &'a mut S) -> Self {
        Self { inner, written: 0 }
    }
}

impl<S: ByteSink + ?Sized> ByteSink for CountingSink<'_, S> {
    fn write_all(&mut self, bytes: &[u8]) -> Result<(), PicError> {
        self.inner.write_all(bytes)?;
        self.written += bytes.len();
        Ok(())
    }

    fn flush(&mut self) -> Result<(), PicError> {
        self.inner.flush()
    }
}
