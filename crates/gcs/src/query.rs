use rice::{RiceDecoder, RiceError};
use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use tracing::{debug, trace};

use crate::error::GcsError;
use crate::format::{read_header, Header, HEADER_BYTES};
use crate::hash::fingerprint;

/// Answers membership queries against a finalized GCS.
///
/// Only the header is kept in memory. Every query seeks back to the start of
/// the delta stream and scans forward, stopping as soon as the running sum
/// reaches or passes the target fingerprint. Queries are independent and
/// leave no state behind between calls.
///
/// The anchor `0` the builder seeds its list with counts as stored: an item
/// whose fingerprint is `0` is reported as a member of any non-empty set.
#[derive(Debug)]
pub struct GcsQuery<R> {
    source: R,
    header: Header,
}

impl GcsQuery<BufReader<File>> {
    /// Opens a GCS file and validates its header.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, GcsError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }
}

impl<R: Read + Seek> GcsQuery<R> {
    /// Reads and validates the header from the start of `source`.
    ///
    /// # Errors
    ///
    /// [`GcsError::TruncatedHeader`] or [`GcsError::InvalidDivisor`] for a
    /// malformed header, [`GcsError::Io`] on read failure.
    pub fn from_reader(mut source: R) -> Result<Self, GcsError> {
        source.seek(SeekFrom::Start(0))?;
        let header = read_header(&mut source)?;
        debug!(n = header.n, p = header.p, "gcs header loaded");
        Ok(Self { source, header })
    }

    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    #[must_use]
    pub fn false_positive_rate(&self) -> f64 {
        self.header.false_positive_rate()
    }

    /// Returns `true` if `item` may be in the set, `false` if it is
    /// definitely not.
    pub fn query(&mut self, item: impl AsRef<[u8]>) -> Result<bool, GcsError> {
        let target = match fingerprint(item.as_ref(), self.header.n, self.header.p) {
            Some(t) => t,
            None => return Ok(false),
        };
        let mut deltas = self.deltas()?;
        if target == 0 {
            // The anchor counts only when the stream holds at least one delta.
            return Ok(deltas.decode()?.is_some());
        }

        let mut sum = 0u64;
        let mut scanned = 0usize;
        while let Some(delta) = deltas.decode()? {
            sum = sum.checked_add(delta).ok_or(RiceError::Overflow)?;
            scanned += 1;
            if sum >= target {
                let hit = sum == target;
                trace!(fingerprint = target, scanned, hit, "query scan");
                return Ok(hit);
            }
        }
        trace!(fingerprint = target, scanned, "query scan reached end of stream");
        Ok(false)
    }

    /// Answers several queries with a single pass over the delta stream.
    ///
    /// Results are in input order and identical to calling
    /// [`query`](Self::query) on each item.
    pub fn query_many<I: AsRef<[u8]>>(&mut self, items: &[I]) -> Result<Vec<bool>, GcsError> {
        let mut results = vec![false; items.len()];

        let mut targets: Vec<(u64, usize)> = Vec::with_capacity(items.len());
        let mut zeros = Vec::new();
        for (i, item) in items.iter().enumerate() {
            match fingerprint(item.as_ref(), self.header.n, self.header.p) {
                Some(0) => zeros.push(i),
                Some(t) => targets.push((t, i)),
                None => {}
            }
        }
        if targets.is_empty() && zeros.is_empty() {
            return Ok(results);
        }
        targets.sort_unstable();

        let mut deltas = self.deltas()?;
        let mut pending = deltas.decode()?;
        if pending.is_some() {
            for i in zeros {
                results[i] = true;
            }
        }

        let mut sum = 0u64;
        let mut next = 0usize;
        while next < targets.len() {
            let delta = match pending {
                Some(d) => d,
                None => break,
            };
            sum = sum.checked_add(delta).ok_or(RiceError::Overflow)?;

            // Targets below `sum` were skipped over and stay false.
            while next < targets.len() && targets[next].0 <= sum {
                if targets[next].0 == sum {
                    results[targets[next].1] = true;
                }
                next += 1;
            }
            if next < targets.len() {
                pending = deltas.decode()?;
            }
        }
        Ok(results)
    }

    /// Decodes every stored fingerprint, in ascending order.
    ///
    /// The anchor `0` is not included; every returned value is at least 1
    /// and strictly greater than the previous one.
    pub fn fingerprints(&mut self) -> Result<Vec<u64>, GcsError> {
        let mut out = Vec::new();
        let mut sum = 0u64;
        for delta in self.deltas()? {
            let delta = delta?;
            if delta == 0 {
                continue;
            }
            sum = sum.checked_add(delta).ok_or(RiceError::Overflow)?;
            out.push(sum);
        }
        Ok(out)
    }

    /// Unwraps the query, returning the underlying source.
    pub fn into_inner(self) -> R {
        self.source
    }

    fn deltas(&mut self) -> Result<RiceDecoder<&mut R>, GcsError> {
        self.source.seek(SeekFrom::Start(HEADER_BYTES))?;
        Ok(RiceDecoder::new(&mut self.source, self.header.p)?)
    }
}
