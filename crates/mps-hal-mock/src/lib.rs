//! Mock key-value store for testing Model Port Storage
//!
//! This provides an in-memory implementation of the `KeyValueStore` trait that
//! can be used for unit testing the storage bridge without a browser.

#![no_std]
extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use mps_hal::{KeyValueStore, StoreError};

/// A storage call observed by the mock
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreOp {
    /// `get(key)`
    Get(String),
    /// `set(key, value)`
    Set(String, String),
}

/// In-memory key-value store for unit testing
///
/// Provides simulated browser storage with injectable failures, an optional
/// quota, and a log of every call made against it.
pub struct MemoryStore {
    /// Stored entries (key -> value)
    entries: RefCell<BTreeMap<String, String>>,
    /// Error returned by every `get` while set
    read_failure: Cell<Option<StoreError>>,
    /// Error returned by every `set` while set
    write_failure: Cell<Option<StoreError>>,
    /// Maximum total size of keys plus values, in bytes
    quota: Cell<Option<usize>>,
    /// Captured calls, in order
    ops: RefCell<Vec<StoreOp>>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            entries: RefCell::new(BTreeMap::new()),
            read_failure: Cell::new(None),
            write_failure: Cell::new(None),
            quota: Cell::new(None),
            ops: RefCell::new(Vec::new()),
        }
    }

    /// Create a store with a single pre-existing entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .borrow_mut()
            .insert(String::from(key), String::from(value));
        store
    }

    /// Create a store whose reads and writes all fail with `err`
    ///
    /// Models a browser with storage disabled.
    pub fn disabled(err: StoreError) -> Self {
        let store = Self::new();
        store.fail_reads(Some(err));
        store.fail_writes(Some(err));
        store
    }

    /// Make every subsequent `get` fail (`None` restores normal reads)
    pub fn fail_reads(&self, err: Option<StoreError>) {
        self.read_failure.set(err);
    }

    /// Make every subsequent `set` fail (`None` restores normal writes)
    pub fn fail_writes(&self, err: Option<StoreError>) {
        self.write_failure.set(err);
    }

    /// Limit the total bytes of keys plus values the store will hold
    pub fn set_quota(&self, bytes: Option<usize>) {
        self.quota.set(bytes);
    }

    /// Read an entry directly, bypassing failure injection and the op log
    pub fn peek(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    /// Modify an entry directly, as another tab sharing the scope would
    pub fn external_write(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(String::from(key), String::from(value));
    }

    /// Number of stored entries
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// True when nothing is stored
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Get all captured calls
    pub fn ops(&self) -> Vec<StoreOp> {
        self.ops.borrow().clone()
    }

    /// Clear the call log
    pub fn clear_ops(&self) {
        self.ops.borrow_mut().clear();
    }

    /// Bytes in use if `key` were set to `value`
    fn usage_after(&self, key: &str, value: &str) -> usize {
        let entries = self.entries.borrow();
        let others: usize = entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum();
        others + key.len() + value.len()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        self.ops.borrow_mut().push(StoreOp::Get(String::from(key)));

        if let Some(err) = self.read_failure.get() {
            return Err(err);
        }
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.ops
            .borrow_mut()
            .push(StoreOp::Set(String::from(key), String::from(value)));

        if let Some(err) = self.write_failure.get() {
            return Err(err);
        }
        if let Some(limit) = self.quota.get() {
            if self.usage_after(key, value) > limit {
                return Err(StoreError::QuotaExceeded);
            }
        }

        self.entries
            .borrow_mut()
            .insert(String::from(key), String::from(value));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn test_memory_store_get_unset() {
        let store = MemoryStore::new();
        assert_eq!(store.get("model"), Ok(None));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_set_get() {
        let store = MemoryStore::new();

        store.set("model", "hello").unwrap();
        assert_eq!(store.get("model"), Ok(Some(String::from("hello"))));

        store.set("model", "world").unwrap();
        assert_eq!(store.get("model"), Ok(Some(String::from("world"))));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_read_failure() {
        let store = MemoryStore::with_entry("model", "kept");

        store.fail_reads(Some(StoreError::AccessDenied));
        assert_eq!(store.get("model"), Err(StoreError::AccessDenied));

        store.fail_reads(None);
        assert_eq!(store.get("model"), Ok(Some(String::from("kept"))));
    }

    #[test]
    fn test_memory_store_write_failure_keeps_old_value() {
        let store = MemoryStore::with_entry("model", "old");

        store.fail_writes(Some(StoreError::Rejected));
        assert_eq!(store.set("model", "new"), Err(StoreError::Rejected));
        assert_eq!(store.peek("model"), Some(String::from("old")));
    }

    #[test]
    fn test_memory_store_quota() {
        let store = MemoryStore::new();
        store.set_quota(Some(10));

        // "model" + "abcde" = 10 bytes
        store.set("model", "abcde").unwrap();
        assert_eq!(store.set("model", "abcdef"), Err(StoreError::QuotaExceeded));
        assert_eq!(store.peek("model"), Some(String::from("abcde")));

        // Replacing with a smaller value is measured without the old one
        store.set("model", "a").unwrap();
    }

    #[test]
    fn test_memory_store_disabled() {
        let store = MemoryStore::disabled(StoreError::Unavailable);
        assert_eq!(store.get("model"), Err(StoreError::Unavailable));
        assert_eq!(store.set("model", "x"), Err(StoreError::Unavailable));
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_ops_log() {
        let store = MemoryStore::new();

        store.set("model", "a").unwrap();
        let _ = store.get("model");
        // peek and external writes are not recorded
        store.external_write("model", "b");
        let _ = store.peek("model");

        assert_eq!(
            store.ops(),
            vec![
                StoreOp::Set(String::from("model"), String::from("a")),
                StoreOp::Get(String::from("model")),
            ]
        );

        store.clear_ops();
        assert!(store.ops().is_empty());
    }
}
