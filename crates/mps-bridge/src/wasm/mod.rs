//! Browser side of the bridge
//!
//! - `storage` - `KeyValueStore` over `window.localStorage`
//! - `ports` - `PortBridge`, the wasm-bindgen export wired to Elm ports

mod ports;
mod storage;

pub use ports::PortBridge;
pub use storage::WebStorage;
