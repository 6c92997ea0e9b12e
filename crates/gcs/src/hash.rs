//! Item fingerprints.
//!
//! SHA-256 of the raw item bytes; the last 8 digest bytes are read as a
//! big-endian `u64` and reduced modulo `n * p`. Builder and query must agree
//! on this exactly, so it is part of the file format.

use sha2::{Digest, Sha256};

/// Maps `item` to a fingerprint in `[0, n * p)`.
///
/// Returns `None` when the domain is empty (`n == 0` or `p == 0`).
#[must_use]
pub fn fingerprint(item: &[u8], n: u32, p: u32) -> Option<u64> {
    let domain = u64::from(n) * u64::from(p);
    if domain == 0 {
        return None;
    }
    let digest = Sha256::digest(item);
    let mut tail = [0u8; 8];
    tail.copy_from_slice(&digest[24..32]);
    Some(u64::from_be_bytes(tail) % domain)
}
