//! # GCS - Golomb-Coded Sets
//!
//! A compact, immutable, on-disk probabilistic set. A GCS answers "is this
//! item a member?" with no false negatives and a false-positive probability
//! of `1/P`, using close to `log2(P) + 1.5` bits per item.
//!
//! ## How it works
//!
//! ```text
//! items ──► fingerprint ∈ [0, N·P) ──► sort ──► deltas (zeros dropped)
//!                                                   │
//!                                                   ▼
//!                        file = header + Rice-coded delta stream
//! ```
//!
//! A query fingerprints its item the same way and walks the delta stream,
//! summing as it goes. Because the stored values are sorted, the scan stops
//! as soon as the running sum reaches or passes the target.
//!
//! ## File layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │ HEADER (8 bytes)                                         │
//! │ n (u32 BE) | p (u32 BE, power of two)                    │
//! ├──────────────────────────────────────────────────────────┤
//! │ DELTA STREAM                                             │
//! │ Rice(delta_1) Rice(delta_2) ... MSB-first bit packing    │
//! │ last partial byte padded with 1-bits                     │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Fingerprints are `SHA-256(item)[24..32]` read as a big-endian `u64`,
//! reduced modulo `n * p`.
//!
//! Two distinct items with the same fingerprint are stored once; both test
//! positive. This is the same ambiguity every probabilistic set carries.
//!
//! ## Example
//!
//! ```rust
//! use gcs::{GcsBuilder, GcsQuery};
//! use std::io::Cursor;
//!
//! let words = ["apple", "banana", "cherry"];
//! let mut builder = GcsBuilder::new(words.len() as u32, 1024).unwrap();
//! for w in &words {
//!     builder.add(w).unwrap();
//! }
//! let (bytes, _summary) = builder.finalize_to_vec().unwrap();
//!
//! let mut set = GcsQuery::from_reader(Cursor::new(bytes)).unwrap();
//! assert!(set.query("apple").unwrap());
//! ```

mod builder;
mod error;
mod format;
mod hash;
mod query;

pub use builder::{BuildSummary, GcsBuilder};
pub use error::GcsError;
pub use format::{read_header, write_header, Header, HEADER_BYTES};
pub use hash::fingerprint;
pub use query::GcsQuery;

#[cfg(test)]
mod tests;
