//! Secure key-value storage boundary.
//!
//! Independent of the query pipeline; nothing in the pipeline calls into
//! this. Platform keystores live behind the trait in app targets.

use crate::core::Result;
use dashmap::DashMap;

/// Byte-oriented secure storage
pub trait SecureStore: Send + Sync {
    /// Store a value under the key, replacing any previous value
    fn set(&self, key: &str, value: &[u8]) -> Result<()>;

    /// Fetch the value for the key, `None` when absent
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Delete the key; removing an absent key is not an error
    fn remove(&self, key: &str) -> Result<()>;
}

/// In-memory store for tests and platforms without a system keystore
#[derive(Debug, Default)]
pub struct MemorySecureStore {
    entries: DashMap<String, Vec<u8>>,
}

impl MemorySecureStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStore for MemorySecureStore {
    fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.entries.get(key).map(|entry| entry.value().clone()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
