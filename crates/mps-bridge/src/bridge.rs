//! Store/load translation between application messages and a key-value store

use mps_hal::{KeyValueStore, MODEL_KEY};

/// Inbound command from the application
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Persist the payload under the model key
    Store(String),
    /// Request the currently stored value
    Load,
}

/// Outbound event answering a `Load`
///
/// Carries one of three things:
/// - the stored string,
/// - the host's absence marker (`None`) when the key was never set,
/// - an empty string when the read failed.
///
/// A failed read and a stored empty string look the same. Absence stays
/// distinguishable only through [`Loaded::is_absent`]; the application side
/// receives it as `null`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Loaded {
    value: Option<String>,
}

impl Loaded {
    /// Event carrying a stored value
    pub fn value(text: impl Into<String>) -> Self {
        Self {
            value: Some(text.into()),
        }
    }

    /// Event carrying the absence marker
    pub fn absent() -> Self {
        Self { value: None }
    }

    /// Event sent when the read failed
    pub fn empty() -> Self {
        Self::value(String::new())
    }

    /// True when the key had never been set
    pub fn is_absent(&self) -> bool {
        self.value.is_none()
    }

    /// The payload, `None` being the absence marker
    pub fn as_option(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// The payload as text, reading absence as an empty string
    pub fn text(&self) -> &str {
        self.value.as_deref().unwrap_or("")
    }

    /// Consume the event, returning the raw payload
    pub fn into_option(self) -> Option<String> {
        self.value
    }
}

/// Bridge between the application's store/load commands and a `KeyValueStore`
///
/// Stateless: every call goes straight to the store under [`MODEL_KEY`], and
/// nothing is remembered between calls. Storage errors never escape.
#[derive(Clone, Debug, Default)]
pub struct StorageBridge<S> {
    store: S,
}

impl<S: KeyValueStore> StorageBridge<S> {
    /// Create a bridge over `store`
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Persist `text` under the model key, replacing any previous value.
    ///
    /// Best-effort: a rejected write is discarded. Nothing is retried, logged
    /// or reported back to the application.
    pub fn store(&self, text: &str) {
        let _ = self.store.set(MODEL_KEY, text);
    }

    /// Read the model key.
    ///
    /// Returns the stored string, the absence marker if the key was never set,
    /// or an empty string if the read failed.
    pub fn load(&self) -> Loaded {
        match self.store.get(MODEL_KEY) {
            Ok(value) => Loaded { value },
            Err(_) => Loaded::empty(),
        }
    }

    /// Handle one inbound command.
    ///
    /// Returns the event to send back: `Some` exactly once per `Load`, `None`
    /// for `Store`.
    pub fn dispatch(&self, command: Command) -> Option<Loaded> {
        match command {
            Command::Store(text) => {
                self.store(&text);
                None
            }
            Command::Load => Some(self.load()),
        }
    }

    /// The underlying store
    pub fn backend(&self) -> &S {
        &self.store
    }

    /// Consume the bridge, returning the store
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mps_hal::StoreError;
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Minimal store for checking the bridge in isolation
    #[derive(Default)]
    struct MapStore {
        map: RefCell<HashMap<String, String>>,
        fail: Option<StoreError>,
    }

    impl KeyValueStore for MapStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            match self.fail {
                Some(err) => Err(err),
                None => Ok(self.map.borrow().get(key).cloned()),
            }
        }

        fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
            match self.fail {
                Some(err) => Err(err),
                None => {
                    self.map.borrow_mut().insert(key.to_string(), value.to_string());
                    Ok(())
                }
            }
        }
    }

    #[test]
    fn test_store_uses_model_key() {
        let bridge = StorageBridge::new(MapStore::default());
        bridge.store("hello");

        let map = bridge.backend().map.borrow();
        assert_eq!(map.get("model").map(String::as_str), Some("hello"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_load_round_trip() {
        let bridge = StorageBridge::new(MapStore::default());
        bridge.store("hello");
        assert_eq!(bridge.load(), Loaded::value("hello"));
    }

    #[test]
    fn test_load_unset_is_absent() {
        let bridge = StorageBridge::new(MapStore::default());
        let loaded = bridge.load();

        assert!(loaded.is_absent());
        assert_eq!(loaded.as_option(), None);
        assert_eq!(loaded.text(), "");
    }

    #[test]
    fn test_stored_empty_string_is_not_absent() {
        let bridge = StorageBridge::new(MapStore::default());
        bridge.store("");

        let loaded = bridge.load();
        assert!(!loaded.is_absent());
        assert_eq!(loaded.as_option(), Some(""));
    }

    #[test]
    fn test_failed_read_loads_empty() {
        let bridge = StorageBridge::new(MapStore {
            fail: Some(StoreError::AccessDenied),
            ..Default::default()
        });
        assert_eq!(bridge.load(), Loaded::empty());
    }

    #[test]
    fn test_failed_write_is_silent() {
        let bridge = StorageBridge::new(MapStore {
            fail: Some(StoreError::QuotaExceeded),
            ..Default::default()
        });
        bridge.store("dropped");
        assert!(bridge.into_inner().map.borrow().is_empty());
    }

    #[test]
    fn test_dispatch() {
        let bridge = StorageBridge::new(MapStore::default());

        assert_eq!(bridge.dispatch(Command::Store("a".into())), None);
        assert_eq!(bridge.dispatch(Command::Load), Some(Loaded::value("a")));
    }
}
