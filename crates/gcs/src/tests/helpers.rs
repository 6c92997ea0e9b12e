use crate::*;
use std::io::Cursor;

/// Builds a set from `items` with `n = items.len()` and returns its bytes.
pub fn build_bytes<S: AsRef<[u8]>>(items: &[S], p: u32) -> Vec<u8> {
    let mut b = GcsBuilder::new(items.len() as u32, p).unwrap();
    for item in items {
        b.add(item).unwrap();
    }
    b.finalize_to_vec().unwrap().0
}

/// Builds a set and opens it for querying from memory.
pub fn build_set<S: AsRef<[u8]>>(items: &[S], p: u32) -> GcsQuery<Cursor<Vec<u8>>> {
    GcsQuery::from_reader(Cursor::new(build_bytes(items, p))).unwrap()
}

/// `count` distinct items of the form `"{prefix}{i}"`.
pub fn numbered(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{}{}", prefix, i)).collect()
}

/// Two distinct items that share a nonzero fingerprint for `(n, p)`.
pub fn colliding_pair(n: u32, p: u32) -> (String, String) {
    let mut seen = std::collections::HashMap::new();
    for i in 0.. {
        let item = format!("item{}", i);
        let h = fingerprint(item.as_bytes(), n, p).unwrap();
        if h == 0 {
            continue;
        }
        if let Some(prev) = seen.insert(h, item.clone()) {
            return (prev, item);
        }
    }
    unreachable!()
}

/// An item whose fingerprint for `(n, p)` is `0`.
pub fn zero_item(n: u32, p: u32) -> String {
    (0..)
        .map(|i| format!("z{}", i))
        .find(|s| fingerprint(s.as_bytes(), n, p) == Some(0))
        .unwrap()
}
