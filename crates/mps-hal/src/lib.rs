//! Storage abstraction for Model Port Storage
//!
//! This crate defines the `KeyValueStore` trait that lets the storage bridge
//! run against different backends by abstracting the host's synchronous
//! key-value facility.
//!
//! # Backend Implementations
//!
//! - **WASM**: `window.localStorage` via `web_sys::Storage` (see `mps-bridge`)
//! - **Tests**: `MemoryStore` with fault injection (see `mps-hal-mock`)

#![no_std]

extern crate alloc;

use alloc::string::String;
use core::fmt;

/// The single key under which the application's model is persisted.
pub const MODEL_KEY: &str = "model";

/// Synchronous string key-value store
///
/// The store is ambient shared state owned by the host: implementations hold
/// no cache, so every call round-trips to the backing facility.
///
/// Methods take `&self`; backends that need mutation use interior mutability,
/// matching how browser storage handles behave.
pub trait KeyValueStore {
    /// Read the value stored under `key`
    ///
    /// # Returns
    /// * `Ok(Some(value))` - Key is set
    /// * `Ok(None)` - Key has never been set (the host's absence marker)
    /// * `Err(StoreError)` - Storage is unavailable or refused the read
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Write `value` under `key`, replacing any previous value
    ///
    /// # Returns
    /// * `Ok(())` - Value written
    /// * `Err(StoreError)` - Storage is unavailable or refused the write
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &S {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Storage errors
///
/// All variants belong to one class, "storage unavailable or operation
/// rejected by host". The variant only records which way the host said no.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// No storage facility (no window, storage disabled by the user agent)
    Unavailable,
    /// Write would exceed the origin's storage quota
    QuotaExceeded,
    /// Host denied access (sandboxed frame, privacy settings)
    AccessDenied,
    /// Host rejected the operation for another reason
    Rejected,
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable => write!(f, "storage unavailable"),
            StoreError::QuotaExceeded => write!(f, "storage quota exceeded"),
            StoreError::AccessDenied => write!(f, "storage access denied"),
            StoreError::Rejected => write!(f, "storage operation rejected"),
        }
    }
}

impl StoreError {
    /// Classify a browser `DOMException` name.
    ///
    /// Unknown names fall back to `Rejected`.
    pub fn from_exception_name(name: &str) -> Self {
        match name {
            "QuotaExceededError" | "NS_ERROR_DOM_QUOTA_REACHED" => StoreError::QuotaExceeded,
            "SecurityError" => StoreError::AccessDenied,
            "InvalidStateError" => StoreError::Unavailable,
            _ => StoreError::Rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn test_model_key_is_fixed() {
        assert_eq!(MODEL_KEY, "model");
    }

    #[test]
    fn test_exception_names() {
        assert_eq!(
            StoreError::from_exception_name("QuotaExceededError"),
            StoreError::QuotaExceeded
        );
        // Older Firefox name for the same condition
        assert_eq!(
            StoreError::from_exception_name("NS_ERROR_DOM_QUOTA_REACHED"),
            StoreError::QuotaExceeded
        );
        assert_eq!(
            StoreError::from_exception_name("SecurityError"),
            StoreError::AccessDenied
        );
        assert_eq!(
            StoreError::from_exception_name("TypeError"),
            StoreError::Rejected
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(StoreError::QuotaExceeded.to_string(), "storage quota exceeded");
        assert_eq!(StoreError::Unavailable.to_string(), "storage unavailable");
    }
}
