//! Storage bridge between Elm ports and browser localStorage
//!
//! The application persists its model by sending a string out of one port and
//! asks for it back through a second port; the stored value comes back on a
//! third, inbound port.
//!
//! ## Module Structure
//!
//! - `bridge` - `StorageBridge`, the store/load translation (target independent)
//! - `config` - Port names and wiring errors
//! - `util` - Console logging
//! - `wasm` - `WebStorage` backend and the `PortBridge` export (wasm32 only)
//!
//! ## Failure policy
//!
//! Storage is best-effort. A failed store is dropped without a trace, and a
//! failed load answers with an empty string. Neither reaches the application
//! as an error.

// =============================================================================
// Module declarations
// =============================================================================

mod bridge;
mod config;
pub(crate) mod util;

#[cfg(target_arch = "wasm32")]
mod wasm;

// =============================================================================
// Public re-exports
// =============================================================================

pub use bridge::{Command, Loaded, StorageBridge};
pub use config::{PortConfig, PortError};
pub use mps_hal::{KeyValueStore, StoreError, MODEL_KEY};

#[cfg(target_arch = "wasm32")]
pub use wasm::{PortBridge, WebStorage};
