//! Artifact storage boundary
//!
//! Persistence of generated rendering content is the embedder's concern;
//! the workflow only needs put/get/list. The in-memory store is the default
//! for a single interactive session.

use tracing::debug;

/// Where generated rendering content is kept
pub trait ArtifactStore: Send + Sync {
    /// Store content under a key, replacing any previous value
    fn put(&mut self, key: &str, bytes: Vec<u8>);

    /// Fetch content by key
    fn get(&self, key: &str) -> Option<&[u8]>;

    /// Drop content by key; missing keys are a no-op
    fn remove(&mut self, key: &str);

    /// All known keys, in insertion order
    fn list(&self) -> Vec<String>;
}

/// Session-lifetime artifact store
#[derive(Debug, Default)]
pub struct MemoryArtifactStore {
    entries: Vec<(String, Vec<u8>)>,
}

impl MemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ArtifactStore for MemoryArtifactStore {
    fn put(&mut self, key: &str, bytes: Vec<u8>) {
        debug!(%key, byte_len = %bytes.len(), "MemoryArtifactStore::put: called");
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| k == key) {
            entry.1 = bytes;
        } else {
            self.entries.push((key.to_string(), bytes));
        }
    }

    fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, bytes)| bytes.as_slice())
    }

    fn remove(&mut self, key: &str) {
        debug!(%key, "MemoryArtifactStore::remove: called");
        self.entries.retain(|(k, _)| k != key);
    }

    fn list(&self) -> Vec<String> {
        self.entries.iter().map(|(k, _)| k.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_list() {
        let mut store = MemoryArtifactStore::new();
        assert!(store.list().is_empty());

        store.put("kitchen-v1", b"one".to_vec());
        store.put("kitchen-v2", b"two".to_vec());
        assert_eq!(store.get("kitchen-v1"), Some(b"one".as_slice()));
        assert_eq!(store.list(), vec!["kitchen-v1", "kitchen-v2"]);
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_put_replaces_existing_key() {
        let mut store = MemoryArtifactStore::new();
        store.put("k", b"old".to_vec());
        store.put("k", b"new".to_vec());
        assert_eq!(store.get("k"), Some(b"new".as_slice()));
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn test_remove_drops_only_named_key() {
        let mut store = MemoryArtifactStore::new();
        store.put("a", b"1".to_vec());
        store.put("b", b"2".to_vec());

        store.remove("a");
        assert!(store.get("a").is_none());
        assert_eq!(store.list(), vec!["b"]);

        // Removing a missing key is a no-op
        store.remove("missing");
        assert_eq!(store.list(), vec!["b"]);
    }
}
