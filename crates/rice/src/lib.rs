//! # Rice - Golomb-Rice coding over a bitstream
//!
//! Encodes non-negative integers as a unary quotient followed by a
//! fixed-width binary remainder. The divisor `P` must be a power of two, so
//! the remainder occupies exactly `b = log2(P)` bits.
//!
//! ## Code layout
//!
//! ```text
//! v = q * P + r
//!
//! [1 1 ... 1 0][r: b bits]
//!  `- q ones -'
//! ```
//!
//! With `P = 4` the value `9` (q = 2, r = 1) is written as `110 01`.
//!
//! The code is optimal for geometrically distributed inputs with success
//! probability `1/P`, which is the distribution of gaps between `N` values
//! drawn uniformly from `[0, N * P)`.
//!
//! ## End of stream
//!
//! [`RiceDecoder::decode`] returns `Ok(None)` once the source runs dry.
//! This is the normal way a stream ends: the bitstream pads its last byte with
//! set bits, so the decoder is always inside a unary prefix when that happens.

use bitstream::{BitReader, BitWriter, MAX_BITS};
use std::io::{self, Read, Write};
use thiserror::Error;

/// Errors produced by the Rice codec.
#[derive(Debug, Error)]
pub enum RiceError {
    /// The divisor is zero or not a power of two.
    #[error("rice divisor must be a power of two, got {0}")]
    InvalidDivisor(u32),

    /// A decoded quotient or value does not fit in a `u64`.
    #[error("decoded value overflows u64 (corrupt stream)")]
    Overflow,

    /// An underlying I/O error.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Returns `log2(p)` if `p` is a power of two.
///
/// # Errors
///
/// [`RiceError::InvalidDivisor`] for zero or any non-power-of-two.
pub fn remainder_bits(p: u32) -> Result<u32, RiceError> {
    if !p.is_power_of_two() {
        return Err(RiceError::InvalidDivisor(p));
    }
    Ok(p.trailing_zeros())
}

/// Streams Rice-coded values into a [`BitWriter`].
pub struct RiceEncoder<W: Write> {
    bits: BitWriter<W>,
    log2_p: u32,
}

impl<W: Write> RiceEncoder<W> {
    /// Creates an encoder writing to `sink` with divisor `p`.
    pub fn new(sink: W, p: u32) -> Result<Self, RiceError> {
        let log2_p = remainder_bits(p)?;
        Ok(Self {
            bits: BitWriter::new(sink),
            log2_p,
        })
    }

    /// Appends the code for `value`.
    pub fn encode(&mut self, value: u64) -> Result<(), RiceError> {
        let q = value >> self.log2_p;
        let r = value & ((1u64 << self.log2_p) - 1);

        // Long unary runs are emitted in MAX_BITS chunks of ones; the final
        // chunk carries the terminating zero: 2^(k+1) - 2 in k + 1 bits.
        let mut ones = q;
        while ones >= u64::from(MAX_BITS) {
            self.bits.write(MAX_BITS, u64::MAX)?;
            ones -= u64::from(MAX_BITS);
        }
        let tail = ones as u32 + 1;
        self.bits.write(tail, (1u64 << tail) - 2)?;

        self.bits.write(self.log2_p, r)?;
        Ok(())
    }

    /// Bytes the encoded stream occupies once finished (padding included).
    #[must_use]
    pub fn padded_len(&self) -> u64 {
        self.bits.padded_len()
    }

    /// Pads the final byte, flushes, and returns the sink.
    pub fn finish(self) -> Result<W, RiceError> {
        Ok(self.bits.finish()?)
    }
}

/// Pulls Rice-coded values out of a [`BitReader`].
///
/// Also usable as an [`Iterator`] of `Result<u64, RiceError>` that stops at
/// end of stream.
pub struct RiceDecoder<R: Read> {
    bits: BitReader<R>,
    log2_p: u32,
}

impl<R: Read> RiceDecoder<R> {
    /// Creates a decoder reading from `source` with divisor `p`.
    pub fn new(source: R, p: u32) -> Result<Self, RiceError> {
        let log2_p = remainder_bits(p)?;
        Ok(Self {
            bits: BitReader::new(source),
            log2_p,
        })
    }

    /// Decodes the next value, or `Ok(None)` at end of stream.
    ///
    /// Running out of input inside the remainder field also ends the stream;
    /// only a truncated source can cause that.
    pub fn decode(&mut self) -> Result<Option<u64>, RiceError> {
        let mut q: u64 = 0;
        loop {
            match self.bits.read_bit()? {
                Some(true) => q = q.checked_add(1).ok_or(RiceError::Overflow)?,
                Some(false) => break,
                None => return Ok(None),
            }
        }

        let r = match self.bits.read(self.log2_p)? {
            Some(r) => r,
            None => return Ok(None),
        };

        if self.log2_p > 0 && q > (u64::MAX >> self.log2_p) {
            return Err(RiceError::Overflow);
        }
        Ok(Some((q << self.log2_p) | r))
    }

    /// Unwraps the decoder, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.bits.into_inner()
    }
}

impl<R: Read> Iterator for RiceDecoder<R> {
    type Item = Result<u64, RiceError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.decode().transpose()
    }
}
