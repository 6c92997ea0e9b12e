//! # Bitstream - MSB-first bit packing
//!
//! Packs and unpacks fixed-width bit fields into a byte-oriented stream.
//!
//! Fields are laid out **most-significant bit first**: writing `(3, 0b101)`
//! followed by `(5, 0b00011)` produces the single byte `0b1010_0011`.
//!
//! ## Padding
//!
//! [`BitWriter::finish`] pads a trailing partial byte with **set bits** in its
//! low positions. A Rice decoder that runs into the padding is always scanning
//! a unary prefix when the source runs dry, so the padding never decodes as a
//! value.
//!
//! ```text
//! bits written: 1 0 1            (3 pending bits)
//! on finish:    1 0 1 1 1 1 1 1  (0xBF)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use bitstream::{BitReader, BitWriter};
//!
//! let mut w = BitWriter::new(Vec::new());
//! w.write(3, 0b101).unwrap();
//! w.write(13, 0x1234).unwrap();
//! let bytes = w.finish().unwrap();
//!
//! let mut r = BitReader::new(&bytes[..]);
//! assert_eq!(r.read(3).unwrap(), Some(0b101));
//! assert_eq!(r.read(13).unwrap(), Some(0x1234));
//! assert_eq!(r.read(1).unwrap(), None);
//! ```

use std::io::{self, Read, Write};

/// Widest field accepted by a single [`BitWriter::write`] or
/// [`BitReader::read`] call.
///
/// The 64-bit accumulator holds up to 7 leftover bits plus one field.
pub const MAX_BITS: u32 = 56;

/// Returns a mask covering the `n` low bits.
#[inline]
fn low_mask(n: u32) -> u64 {
    if n >= 64 {
        u64::MAX
    } else {
        (1u64 << n) - 1
    }
}

fn check_width(nbits: u32) -> io::Result<()> {
    if nbits > MAX_BITS {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("bit field too wide: {} > {}", nbits, MAX_BITS),
        ));
    }
    Ok(())
}

/// Appends bit fields to a [`Write`] sink.
///
/// Every byte is handed to the sink as soon as its eighth bit is known.
/// Wrap the sink in a `BufWriter` when it is a file.
pub struct BitWriter<W: Write> {
    inner: W,
    /// Pending bits, right-aligned. Always fewer than 8 between calls.
    accum: u64,
    nbits: u32,
    bytes_written: u64,
}

impl<W: Write> BitWriter<W> {
    pub fn new(inner: W) -> Self {
        Self {
            inner,
            accum: 0,
            nbits: 0,
            bytes_written: 0,
        }
    }

    /// Appends the `nbits` least-significant bits of `value`, MSB first.
    ///
    /// Bits of `value` above `nbits` are ignored. `nbits == 0` is a no-op.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `nbits > MAX_BITS`, or any error from the sink.
    pub fn write(&mut self, nbits: u32, value: u64) -> io::Result<()> {
        if nbits == 0 {
            return Ok(());
        }
        check_width(nbits)?;

        self.accum = (self.accum << nbits) | (value & low_mask(nbits));
        self.nbits += nbits;

        while self.nbits >= 8 {
            let byte = (self.accum >> (self.nbits - 8)) as u8;
            self.inner.write_all(&[byte])?;
            self.bytes_written += 1;
            self.nbits -= 8;
        }
        self.accum &= low_mask(self.nbits);
        Ok(())
    }

    /// Appends a single bit.
    pub fn write_bit(&mut self, bit: bool) -> io::Result<()> {
        self.write(1, u64::from(bit))
    }

    /// Number of bits waiting for a complete byte (0..=7).
    #[must_use]
    pub fn pending_bits(&self) -> u32 {
        self.nbits
    }

    /// Number of complete bytes handed to the sink so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Number of bytes the stream will occupy once [`finish`](Self::finish)
    /// pads the pending bits.
    #[must_use]
    pub fn padded_len(&self) -> u64 {
        self.bytes_written + u64::from(self.nbits > 0)
    }

    /// Returns a reference to the underlying sink.
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Pads any partial byte with set bits, flushes the sink and returns it.
    pub fn finish(mut self) -> io::Result<W> {
        if self.nbits > 0 {
            let pad = 8 - self.nbits;
            let byte = ((self.accum << pad) | low_mask(pad)) as u8;
            self.inner.write_all(&[byte])?;
            self.bytes_written += 1;
            self.nbits = 0;
            self.accum = 0;
        }
        self.inner.flush()?;
        Ok(self.inner)
    }
}

impl<W: Write> std::fmt::Debug for BitWriter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitWriter")
            .field("pending_bits", &self.nbits)
            .field("bytes_written", &self.bytes_written)
            .finish()
    }
}

/// Consumes bit fields from a [`Read`] source.
///
/// The source is pulled one byte at a time and only when the accumulator
/// cannot satisfy a request, so nothing past the current partially consumed
/// byte is ever taken from the source.
pub struct BitReader<R: Read> {
    inner: R,
    /// Unconsumed bits, right-aligned.
    accum: u64,
    nbits: u32,
}

impl<R: Read> BitReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            accum: 0,
            nbits: 0,
        }
    }

    /// Reads the next `nbits` bits as an unsigned integer, MSB first.
    ///
    /// Returns `Ok(None)` when the source is exhausted before `nbits` bits are
    /// available. A truncated value is never returned. `nbits == 0` always
    /// yields `Some(0)`.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if `nbits > MAX_BITS`, or any error from the source.
    pub fn read(&mut self, nbits: u32) -> io::Result<Option<u64>> {
        if nbits == 0 {
            return Ok(Some(0));
        }
        check_width(nbits)?;

        while self.nbits < nbits {
            match self.next_byte()? {
                Some(byte) => {
                    self.accum = (self.accum << 8) | u64::from(byte);
                    self.nbits += 8;
                }
                None => return Ok(None),
            }
        }

        let value = (self.accum >> (self.nbits - nbits)) & low_mask(nbits);
        self.nbits -= nbits;
        self.accum &= low_mask(self.nbits);
        Ok(Some(value))
    }

    /// Reads a single bit. `Ok(None)` at end of stream.
    pub fn read_bit(&mut self) -> io::Result<Option<bool>> {
        Ok(self.read(1)?.map(|b| b == 1))
    }

    /// Number of bits already pulled from the source but not yet consumed.
    #[must_use]
    pub fn buffered_bits(&self) -> u32 {
        self.nbits
    }

    /// Unwraps the reader, discarding any buffered bits.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_byte(&mut self) -> io::Result<Option<u8>> {
        let mut buf = [0u8; 1];
        loop {
            match self.inner.read(&mut buf) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(buf[0])),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
    }
}

impl<R: Read> std::fmt::Debug for BitReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitReader")
            .field("buffered_bits", &self.nbits)
            .finish()
    }
}

#[cfg(test)]
mod tests;
