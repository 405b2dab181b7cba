//! Cached object representation.

use bytes::Bytes;

/// One cached origin response.
///
/// The body is immutable once stored. Entries are owned exclusively by the
/// cache; lookups hand out a refcounted view, never the entry itself.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    body: Bytes,
}

impl CacheEntry {
    pub fn new(body: Bytes) -> Self {
        Self { body }
    }

    /// Refcounted view of the stored body.
    pub fn body(&self) -> Bytes {
        self.body.clone()
    }

    /// Size in bytes charged against the cache capacity.
    pub fn size(&self) -> usize {
        self.body.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_matches_body_length() {
        let entry = CacheEntry::new(Bytes::from_static(b"hello"));
        assert_eq!(entry.size(), 5);
        assert_eq!(entry.body(), Bytes::from_static(b"hello"));
    }

    #[test]
    fn body_views_share_storage() {
        let entry = CacheEntry::new(Bytes::from(vec![7u8; 64]));
        let a = entry.body();
        let b = entry.body();
        assert_eq!(a.as_ptr(), b.as_ptr());
    }
}
