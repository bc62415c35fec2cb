//! Port configuration
//!
//! Names of the three Elm ports the bridge attaches to. The defaults match
//! the port declarations the application is expected to carry:
//!
//! ```elm
//! port localstorage_store : String -> Cmd msg
//! port localstorage_load : {} -> Cmd msg
//! port localstorage_loaded : (String -> msg) -> Sub msg
//! ```

use core::fmt;
use serde::Deserialize;

/// Default outbound port carrying the text to persist
pub const DEFAULT_STORE_PORT: &str = "localstorage_store";
/// Default outbound port requesting a load
pub const DEFAULT_LOAD_PORT: &str = "localstorage_load";
/// Default inbound port receiving the loaded text
pub const DEFAULT_LOADED_PORT: &str = "localstorage_loaded";

/// Port names used when wiring the bridge to an application
///
/// Deserialized from a JSON object; omitted fields keep their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PortConfig {
    pub store_port: String,
    pub load_port: String,
    pub loaded_port: String,
}

impl Default for PortConfig {
    fn default() -> Self {
        Self {
            store_port: DEFAULT_STORE_PORT.to_string(),
            load_port: DEFAULT_LOAD_PORT.to_string(),
            loaded_port: DEFAULT_LOADED_PORT.to_string(),
        }
    }
}

impl PortConfig {
    /// Parse a config from JSON
    pub fn from_json(json: &str) -> Result<Self, PortError> {
        let config: PortConfig =
            serde_json::from_str(json).map_err(|e| PortError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty port names
    pub fn validate(&self) -> Result<(), PortError> {
        for (field, name) in [
            ("store_port", &self.store_port),
            ("load_port", &self.load_port),
            ("loaded_port", &self.loaded_port),
        ] {
            if name.is_empty() {
                return Err(PortError::InvalidConfig(format!("{} is empty", field)));
            }
        }
        Ok(())
    }
}

/// Errors raised while attaching to the application's ports
///
/// These only occur during setup. Store and load never produce them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PortError {
    /// `app.ports` or the named port does not exist
    MissingPort(String),
    /// The port lacks a callable `subscribe`/`send`
    NotAFunction(String),
    /// `subscribe` threw when registering a handler
    SubscribeFailed(String),
    /// Port config could not be parsed
    InvalidConfig(String),
}

impl fmt::Display for PortError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortError::MissingPort(name) => write!(f, "port not found: {}", name),
            PortError::NotAFunction(name) => write!(f, "not a function: {}", name),
            PortError::SubscribeFailed(name) => write!(f, "failed to subscribe to port: {}", name),
            PortError::InvalidConfig(msg) => write!(f, "invalid port config: {}", msg),
        }
    }
}
