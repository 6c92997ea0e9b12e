use rice::RiceEncoder;
use std::fs::{rename, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

use crate::error::GcsError;
use crate::format::{write_header, Header, HEADER_BYTES};
use crate::hash::fingerprint;

/// Upper bound on fingerprints reserved up front from the declared `n`.
const RESERVE_CAP: u32 = 1 << 20;

/// Outcome of [`GcsBuilder::finalize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildSummary {
    /// Declared item count written to the header.
    pub n: u32,
    /// Divisor written to the header.
    pub p: u32,
    /// Number of `add` calls.
    pub added: usize,
    /// Distinct nonzero fingerprints actually encoded.
    pub stored: usize,
    /// Total bytes written, header included.
    pub bytes: u64,
}

impl BuildSummary {
    /// Average bits of output per declared item, or `None` when `n == 0`.
    #[must_use]
    pub fn bits_per_item(&self) -> Option<f64> {
        if self.n == 0 {
            return None;
        }
        Some(self.bytes as f64 * 8.0 / f64::from(self.n))
    }
}

/// Collects item fingerprints and writes them out as a Golomb-coded set.
///
/// The fingerprint list is seeded with an anchor `0`, so the first real
/// fingerprint is delta-coded against zero. [`finalize`](Self::finalize)
/// consumes the builder; a finished set cannot be extended.
///
/// The declared `n` is not checked against the number of `add` calls. The
/// file stays correct either way, but the false-positive rate is only `1/p`
/// when the two agree.
#[derive(Debug)]
pub struct GcsBuilder {
    header: Header,
    values: Vec<u64>,
}

impl GcsBuilder {
    /// Creates a builder for `n` items with false-positive rate `1/p`.
    ///
    /// # Errors
    ///
    /// [`GcsError::InvalidDivisor`] if `p` is not a power of two.
    pub fn new(n: u32, p: u32) -> Result<Self, GcsError> {
        let header = Header::new(n, p)?;
        // `n` is only a header field; reserve from it with a ceiling.
        let mut values = Vec::with_capacity(n.min(RESERVE_CAP) as usize + 1);
        values.push(0);
        Ok(Self { header, values })
    }

    /// Fingerprints `item` and records it.
    ///
    /// # Errors
    ///
    /// [`GcsError::EmptyDomain`] if the builder was declared with `n == 0`.
    pub fn add(&mut self, item: impl AsRef<[u8]>) -> Result<(), GcsError> {
        let h = fingerprint(item.as_ref(), self.header.n, self.header.p)
            .ok_or(GcsError::EmptyDomain)?;
        self.values.push(h);
        Ok(())
    }

    /// Number of items added so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn header(&self) -> Header {
        self.header
    }

    /// Sorts the fingerprints and writes header + delta stream to `sink`.
    ///
    /// Zero deltas (duplicate fingerprints) are skipped, so the stored stream
    /// is strictly increasing once prefix-summed. The one exception: when
    /// every added item fingerprints to `0`, a single zero delta is written
    /// so the stream is not empty and queries can tell the set holds `0`.
    pub fn finalize<W: Write>(self, mut sink: W) -> Result<BuildSummary, GcsError> {
        let Self { header, mut values } = self;
        let added = values.len() - 1;
        if added != header.n as usize {
            warn!(
                declared = header.n,
                added, "item count differs from declared n; false-positive rate will drift"
            );
        }

        values.sort_unstable();

        write_header(&mut sink, &header)?;

        let mut encoder = RiceEncoder::new(&mut sink, header.p)?;
        let mut stored = 0usize;
        for pair in values.windows(2) {
            let delta = pair[1] - pair[0];
            if delta == 0 {
                continue;
            }
            encoder.encode(delta)?;
            stored += 1;
        }
        if stored == 0 && added > 0 {
            encoder.encode(0)?;
        }
        let body_bytes = encoder.padded_len();
        encoder.finish()?;
        sink.flush()?;

        let summary = BuildSummary {
            n: header.n,
            p: header.p,
            added,
            stored,
            bytes: HEADER_BYTES + body_bytes,
        };
        debug!(?summary, "gcs finalized");
        Ok(summary)
    }

    /// Finalizes into an in-memory buffer.
    pub fn finalize_to_vec(self) -> Result<(Vec<u8>, BuildSummary), GcsError> {
        let mut buf = Vec::new();
        let summary = self.finalize(&mut buf)?;
        Ok((buf, summary))
    }

    /// Finalizes into the file at `path`.
    ///
    /// # Crash Safety
    ///
    /// Writes to `<path>.tmp`, calls `sync_all()`, then atomically renames
    /// over `path`. On failure the temp file is removed and `path` is left
    /// untouched.
    pub fn write_to_path<P: AsRef<Path>>(self, path: P) -> Result<BuildSummary, GcsError> {
        let path = path.as_ref();
        let mut tmp_name = path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = Path::new(&tmp_name).to_path_buf();

        let raw_file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&tmp_path)?;
        let mut file = BufWriter::new(raw_file);

        let result = self.finalize(&mut file).and_then(|summary| {
            let raw = file.into_inner().map_err(|e| e.into_error())?;
            raw.sync_all()?;
            Ok(summary)
        });

        let summary = match result {
            Ok(summary) => summary,
            Err(e) => {
                let _ = std::fs::remove_file(&tmp_path);
                return Err(e);
            }
        };

        rename(&tmp_path, path)?;

        // Fsync the parent directory so the rename survives a crash.
        if let Some(parent) = path.parent() {
            if let Ok(dir) = std::fs::File::open(parent) {
                let _ = dir.sync_all();
            }
        }

        debug!(path = %path.display(), bytes = summary.bytes, "gcs written");
        Ok(summary)
    }
}
