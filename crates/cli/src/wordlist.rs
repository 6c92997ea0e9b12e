//! Newline-separated word lists.
//!
//! Items are raw bytes; no text encoding is assumed. Each line loses its
//! trailing whitespace (so `\r\n` files behave like `\n` files). A trailing
//! newline at the end of the file does not produce an extra empty item.

use anyhow::{Context, Result};
use std::path::Path;

/// Reads `path` and splits it into items.
pub fn read_items<P: AsRef<Path>>(path: P) -> Result<Vec<Vec<u8>>> {
    let path = path.as_ref();
    let data = std::fs::read(path)
        .with_context(|| format!("cannot open word list {}", path.display()))?;
    Ok(split_items(&data))
}

/// Splits a buffer into items.
pub fn split_items(data: &[u8]) -> Vec<Vec<u8>> {
    if data.is_empty() {
        return Vec::new();
    }
    let body = data.strip_suffix(b"\n").unwrap_or(data);
    body.split(|&b| b == b'\n')
        .map(|line| trim_end(line).to_vec())
        .collect()
}

fn trim_end(line: &[u8]) -> &[u8] {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map_or(0, |i| i + 1);
    &line[..end]
}
