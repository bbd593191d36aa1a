//! Scanline run-length encoding.
//!
//! Each channel group of a scanline is a stream of `W`-byte tuples
//! (`W = 3` for color, `W = 1` for alpha). Runs are classified greedily
//! left to right and packed behind a control byte `c`:
//!
//! - `0..=127`: literal run, `c + 1` tuples follow verbatim.
//! - `129..=255`: short repeat, one tuple follows, repeated `c - 127` times.
//! - `128`: long repeat, a big-endian `u16` count then one tuple.
//!
//! A repeat of length 1 is never written; lone tuples go out as a
//! literal of length 1.

use crate::error::PicError;
use crate::sink::ByteSink;

/// Longest literal run a control byte can describe.
pub(crate) const MAX_LITERAL: usize = 128;
/// Longest repeat run with a one-byte control.
pub(crate) const MAX_SHORT_REPEAT: usize = 128;
/// Longest repeat run the 16-bit long-form count can hold.
pub(crate) const MAX_LONG_REPEAT: usize = u16::MAX as usize;
/// Control byte introducing a long repeat.
pub(crate) const LONG_REPEAT: u8 = 128;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Run<const W: usize> {
    Empty,
    /// `len` distinct-so-far tuples held in the literal buffer.
    Literal { len: usize },
    /// `count >= 2` copies of `value`.
    Repeat { value: [u8; W], count: usize },
}

/// Greedy run classifier and byte packer for one channel group.
pub(crate) struct RunEncoder<const W: usize> {
    literal: [[u8; W]; MAX_LITERAL],
    run: Run<W>,
}

impl<const W: usize> RunEncoder<W> {
    pub(crate) fn new() -> Self {
        Self {
            literal: [[0u8; W]; MAX_LITERAL],
            run: Run::Empty,
        }
    }

    /// Feed the next tuple, writing any run it completes.
    pub(crate) fn push<S: ByteSink + ?Sized>(
        &mut self,
        tuple: [u8; W],
        sink: &mut S,
    ) -> Result<(), PicError> {
        self.run = match self.run {
            Run::Empty => {
                self.literal[0] = tuple;
                Run::Literal { len: 1 }
            }
            Run::Literal { len } if self.literal[len - 1] == tuple => {
                // The last buffered tuple seeds the repeat.
                if len > 1 {
                    write_literal(sink, &self.literal[..len - 1])?;
                }
                Run::Repeat {
                    value: tuple,
                    count: 2,
                }
            }
            Run::Literal { len } => {
                self.literal[len] = tuple;
                let len = len + 1;
                if len == MAX_LITERAL {
                    write_literal(sink, &self.literal[..])?;
                    Run::Empty
                } else {
                    Run::Literal { len }
                }
            }
            Run::Repeat { value, count } if value == tuple => {
                let count = count + 1;
                if count == MAX_LONG_REPEAT {
                    write_repeat(sink, &value, count)?;
                    Run::Empty
                } else {
                    Run::Repeat { value, count }
                }
            }
            Run::Repeat { value, count } => {
                write_repeat(sink, &value, count)?;
                self.literal[0] = tuple;
                Run::Literal { len: 1 }
            }
        };
        Ok(())
    }

    /// Write whatever run is still buffered and reset.
    pub(crate) fn finish<S: ByteSink + ?Sized>(&mut self, sink: &mut S) -> Result<(), PicError> {
        match core::mem::replace(&mut self.run, Run::Empty) {
            Run::Empty => Ok(()),
            Run::Literal { len } => write_literal(sink, &self.literal[..len]),
            Run::Repeat { value, count } => write_repeat(sink, &value, count),
        }
    }
}

fn write_literal<S: ByteSink + ?Sized, const W: usize>(
    sink: &mut S,
    tuples: &[[u8; W]],
) -> Result<(), PicError> {
    debug_assert!((1..=MAX_LITERAL).contains(&tuples.len()));
    sink.write_all(&[(tuples.len() - 1) as u8])?;
    sink.write_all(tuples.as_flattened())
}

fn write_repeat<S: ByteSink + ?Sized, const W: usize>(
    sink: &mut S,
    value: &[u8; W],
    count: usize,
) -> Result<(), PicError> {
    debug_assert!((2..=MAX_LONG_REPEAT).contains(&count));
    if count <= MAX_SHORT_REPEAT {
        sink.write_all(&[(count + 127) as u8])?;
    } else {
        let [hi, lo] = (count as u16).to_be_bytes();
        sink.write_all(&[LONG_REPEAT, hi, lo])?;
    }
    sink.write_all(value)
}

/// Encode one scanline of packed pixels: the color group, then alpha.
pub(crate) fn encode_scanline<S: ByteSink + ?Sized>(
    sink: &mut S,
    line: &[u32],
) -> Result<(), PicError> {
    let mut color = RunEncoder::<3>::new();
    for &px in line {
        let [r, g, b, _] = px.to_le_bytes();
        color.push([r, g, b], sink)?;
    }
    color.finish(sink)?;

    let mut alpha = RunEncoder::<1>::new();
    for &px in line {
        alpha.push([(px >> 24) as u8], sink)?;
    }
    alpha.finish(sink)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    fn encode_gray(values: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        let mut enc = RunEncoder::<1>::new();
        for &v in values {
            enc.push([v], &mut out).unwrap();
        }
        enc.finish(&mut out).unwrap();
        out
    }

    #[test]
    fn single_tuple_is_a_literal() {
        assert_eq!(encode_gray(&[7]), [0, 7]);
    }

    #[test]
    fn pair_is_a_short_repeat() {
        assert_eq!(encode_gray(&[7, 7]), [129, 7]);
    }

    #[test]
    fn literal_breaks_into_repeat() {
        assert_eq!(encode_gray(&[1, 2, 2]), [0, 1, 129, 2]);
        assert_eq!(encode_gray(&[1, 2, 3, 3, 3, 4]), [1, 1, 2, 130, 3, 0, 4]);
    }

    #[test]
    fn repeat_breaks_into_literal() {
        assert_eq!(encode_gray(&[5, 5, 5, 6, 7]), [130, 5, 1, 6, 7]);
    }

    #[test]
    fn constant_128_is_short_form() {
        assert_eq!(encode_gray(&[9; 128]), [255, 9]);
    }

    #[test]
    fn constant_129_is_long_form() {
        assert_eq!(encode_gray(&[9; 129]), [LONG_REPEAT, 0, 129, 9]);
    }

    #[test]
    fn distinct_runs_cap_at_128() {
        let values: Vec<u8> = (0..300u32).map(|i| (i % 251) as u8).collect();
        let out = encode_gray(&values);
        assert_eq!(out[0], 127);
        assert_eq!(&out[1..129], &values[..128]);
        assert_eq!(out[129], 127);
        assert_eq!(&out[130..258], &values[128..256]);
        assert_eq!(out[258], 43);
        assert_eq!(&out[259..], &values[256..]);
    }

    #[test]
    fn full_literal_resets_before_repeat_detection() {
        // The 128th distinct value closes the literal; the next equal
        // value cannot reach back into it.
        let mut values: Vec<u8> = (0..128u8).collect();
        values.push(127);
        let out = encode_gray(&values);
        assert_eq!(out.len(), 1 + 128 + 2);
        assert_eq!(&out[129..], &[0, 127]);
    }

    #[test]
    fn longest_repeat_flushes_at_u16_max() {
        let out = encode_gray(&vec![3u8; MAX_LONG_REPEAT]);
        assert_eq!(out, [LONG_REPEAT, 0xFF, 0xFF, 3]);

        let out = encode_gray(&vec![3u8; MAX_LONG_REPEAT + 2]);
        assert_eq!(out, [LONG_REPEAT, 0xFF, 0xFF, 3, 129, 3]);
    }

    #[test]
    fn color_group_writes_three_bytes_per_tuple() {
        let mut out = Vec::new();
        let mut enc = RunEncoder::<3>::new();
        for t in [[1, 2, 3], [4, 5, 6], [4, 5, 6]] {
            enc.push(t, &mut out).unwrap();
        }
        enc.finish(&mut out).unwrap();
        assert_eq!(out, [0, 1, 2, 3, 129, 4, 5, 6]);
    }

    #[test]
    fn scanline_writes_color_then_alpha() {
        let px = u32::from_le_bytes([10, 20, 30, 255]);
        let mut out = Vec::new();
        encode_scanline(&mut out, &[px, px]).unwrap();
        assert_eq!(out, [129, 10, 20, 30, 129, 255]);
    }

    #[test]
    fn color_repeat_then_literal_alpha_repeat() {
        let a = u32::from_le_bytes([1, 1, 1, 0]);
        let b = u32::from_le_bytes([2, 2, 2, 0]);
        let mut out = Vec::new();
        encode_scanline(&mut out, &[a, a, b]).unwrap();
        assert_eq!(out, [129, 1, 1, 1, 0, 2, 2, 2, 130, 0]);
    }

    struct FailAfter(usize);

    impl ByteSink for FailAfter {
        fn write_all(&mut self, _bytes: &[u8]) -> Result<(), PicError> {
            if self.0 == 0 {
                return Err(PicError::SinkWriteFailure("full".into()));
            }
            self.0 -= 1;
            Ok(())
        }
    }

    #[test]
    fn first_write_error_aborts_the_scanline() {
        let line = [0u32, 1, 2, 3];
        let err = encode_scanline(&mut FailAfter(1), &line).unwrap_err();
        assert!(matches!(err, PicError::SinkWriteFailure(_)));
    }
}
