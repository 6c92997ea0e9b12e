//! GCS file header and layout constants.
//!
//! ```text
//! [n: u32 BE][p: u32 BE][rice-coded deltas ... padded with 1-bits]
//! ```

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

use crate::error::GcsError;

/// Size of the fixed header in bytes: 4 (`n`) + 4 (`p`).
pub const HEADER_BYTES: u64 = 4 + 4;

/// Parameters stored at the start of every GCS file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
    /// Declared number of items.
    pub n: u32,
    /// Reciprocal of the target false-positive probability. A power of two.
    pub p: u32,
}

impl Header {
    /// Validates `p` and builds a header.
    ///
    /// # Errors
    ///
    /// [`GcsError::InvalidDivisor`] if `p` is zero or not a power of two.
    pub fn new(n: u32, p: u32) -> Result<Self, GcsError> {
        if !p.is_power_of_two() {
            return Err(GcsError::InvalidDivisor(p));
        }
        Ok(Self { n, p })
    }

    /// Size of the fingerprint domain, `n * p`.
    #[must_use]
    pub fn domain(&self) -> u64 {
        u64::from(self.n) * u64::from(self.p)
    }

    /// Target false-positive probability, `1 / p`.
    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        1.0 / f64::from(self.p)
    }
}

/// Writes `header` to `w` in big-endian order.
pub fn write_header<W: Write>(w: &mut W, header: &Header) -> io::Result<()> {
    w.write_u32::<BigEndian>(header.n)?;
    w.write_u32::<BigEndian>(header.p)?;
    Ok(())
}

/// Reads and validates a header from the current position of `r`.
///
/// # Errors
///
/// - [`GcsError::TruncatedHeader`] if fewer than 8 bytes are available.
/// - [`GcsError::InvalidDivisor`] if the stored `p` is not a power of two.
/// - [`GcsError::Io`] on read failure.
pub fn read_header<R: Read>(r: &mut R) -> Result<Header, GcsError> {
    let mut buf = [0u8; HEADER_BYTES as usize];
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(k) => filled += k,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    if filled < buf.len() {
        return Err(GcsError::TruncatedHeader { len: filled });
    }

    let mut cur = &buf[..];
    let n = cur.read_u32::<BigEndian>()?;
    let p = cur.read_u32::<BigEndian>()?;
    Header::new(n, p)
}
