//! localStorage backend
//!
//! The storage handle is looked up on every call. Accessing
//! `window.localStorage` itself throws when storage is disabled, and that
//! failure has to surface per operation like any other.

use mps_hal::{KeyValueStore, StoreError};
use wasm_bindgen::{JsCast, JsValue};

/// `KeyValueStore` backed by the page origin's `window.localStorage`
#[derive(Clone, Copy, Debug, Default)]
pub struct WebStorage;

impl WebStorage {
    pub fn new() -> Self {
        Self
    }

    fn local_storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window().ok_or(StoreError::Unavailable)?;
        window
            .local_storage()
            .map_err(classify)?
            .ok_or(StoreError::Unavailable)
    }
}

impl KeyValueStore for WebStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::local_storage()?.get_item(key).map_err(classify)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::local_storage()?.set_item(key, value).map_err(classify)
    }
}

/// Map a thrown JS value onto a `StoreError`
fn classify(err: JsValue) -> StoreError {
    err.dyn_ref::<web_sys::DomException>()
        .map(|e| StoreError::from_exception_name(&e.name()))
        .unwrap_or(StoreError::Rejected)
}
