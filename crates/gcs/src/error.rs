//! Error type for building and querying Golomb-coded sets.

use rice::RiceError;
use std::io;
use thiserror::Error;

/// Errors returned by [`GcsBuilder`](crate::GcsBuilder) and
/// [`GcsQuery`](crate::GcsQuery).
#[derive(Debug, Error)]
pub enum GcsError {
    /// An underlying I/O error on the sink or source.
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    /// Failure inside the Rice codec.
    #[error("rice codec error: {0}")]
    Rice(#[from] RiceError),

    /// The source ended before a full 8-byte header was read.
    #[error("truncated header: {len} of 8 bytes")]
    TruncatedHeader {
        /// Bytes actually available.
        len: usize,
    },

    /// `P` is zero or not a power of two.
    #[error("false-positive divisor must be a power of two, got {0}")]
    InvalidDivisor(u32),

    /// Items cannot be fingerprinted into an empty domain (`N * P == 0`).
    #[error("cannot add items to a set declared with N = 0")]
    EmptyDomain,
}
