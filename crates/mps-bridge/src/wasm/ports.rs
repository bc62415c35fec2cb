//! Elm port wiring
//!
//! `PortBridge` subscribes to the application's store and load ports and
//! answers loads on the loaded port. JS glue only has to hand over the app:
//!
//! ```js
//! exports.init = async function (app) {
//!     bridge = PortBridge.init(app);
//! };
//! ```
//!
//! Freeing the `PortBridge` unsubscribes both handlers.

use js_sys::{Function, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use super::WebStorage;
use crate::bridge::StorageBridge;
use crate::config::{PortConfig, PortError};
use crate::util::log;

#[wasm_bindgen]
extern "C" {
    /// Global `String()`, the conversion `localStorage.setItem` applies to its value
    #[wasm_bindgen(catch, js_name = String)]
    fn js_string(value: &JsValue) -> Result<JsValue, JsValue>;
}

type PortHandler = Closure<dyn FnMut(JsValue)>;

/// Storage bridge attached to an Elm application's ports
#[wasm_bindgen]
pub struct PortBridge {
    store_port: JsValue,
    load_port: JsValue,
    on_store: PortHandler,
    on_load: PortHandler,
}

/// wasm_bindgen methods (exposed to JS)
#[wasm_bindgen]
impl PortBridge {
    /// Attach to `app.ports` using the default port names.
    pub fn init(app: &JsValue) -> Result<PortBridge, JsValue> {
        Self::attach(app, PortConfig::default())
    }

    /// Attach to `app.ports` using port names from a JSON object.
    ///
    /// Fields left out of the JSON keep their default names.
    pub fn init_with_config(app: &JsValue, config_json: &str) -> Result<PortBridge, JsValue> {
        let config = PortConfig::from_json(config_json).map_err(|e| {
            log(&format!("[storage-bridge] {}", e));
            JsValue::from_str(&e.to_string())
        })?;
        Self::attach(app, config)
    }
}

/// Internal wiring (not exposed to JS)
impl PortBridge {
    fn attach(app: &JsValue, config: PortConfig) -> Result<PortBridge, JsValue> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        Self::wire(app, &config).map_err(|e| {
            log(&format!("[storage-bridge] Failed to attach: {}", e));
            JsValue::from_str(&e.to_string())
        })
    }

    fn wire(app: &JsValue, config: &PortConfig) -> Result<PortBridge, PortError> {
        let ports = lookup(app, "ports")?;
        let store_port = lookup(&ports, &config.store_port)?;
        let load_port = lookup(&ports, &config.load_port)?;
        let loaded_port = lookup(&ports, &config.loaded_port)?;

        let store_subscribe = method(&store_port, &config.store_port, "subscribe")?;
        let load_subscribe = method(&load_port, &config.load_port, "subscribe")?;
        let send = method(&loaded_port, &config.loaded_port, "send")?;

        let bridge = StorageBridge::new(WebStorage::new());

        let store_bridge = bridge.clone();
        let on_store = Closure::wrap(Box::new(move |payload: JsValue| {
            // A payload setItem cannot convert would have thrown there too
            if let Some(text) = payload_text(&payload) {
                store_bridge.store(&text);
            }
        }) as Box<dyn FnMut(JsValue)>);

        // The load payload ({}) carries nothing
        let on_load = Closure::wrap(Box::new(move |_payload: JsValue| {
            let arg = match bridge.load().into_option() {
                Some(text) => JsValue::from_str(&text),
                None => JsValue::NULL,
            };
            // Elm's String port throws on null; the reply then falls back to ""
            if send.call1(&loaded_port, &arg).is_err() {
                let _ = send.call1(&loaded_port, &JsValue::from_str(""));
            }
        }) as Box<dyn FnMut(JsValue)>);

        store_subscribe
            .call1(&store_port, on_store.as_ref())
            .map_err(|_| PortError::SubscribeFailed(config.store_port.clone()))?;

        if load_subscribe.call1(&load_port, on_load.as_ref()).is_err() {
            unsubscribe(&store_port, &on_store);
            return Err(PortError::SubscribeFailed(config.load_port.clone()));
        }

        log(&format!(
            "[storage-bridge] Attached: store={}, load={}, loaded={}",
            config.store_port, config.load_port, config.loaded_port
        ));

        Ok(PortBridge {
            store_port,
            load_port,
            on_store,
            on_load,
        })
    }
}

impl Drop for PortBridge {
    fn drop(&mut self) {
        unsubscribe(&self.store_port, &self.on_store);
        unsubscribe(&self.load_port, &self.on_load);
    }
}

/// Read a property that must be present
fn lookup(target: &JsValue, name: &str) -> Result<JsValue, PortError> {
    Reflect::get(target, &JsValue::from_str(name))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
        .ok_or_else(|| PortError::MissingPort(name.to_string()))
}

/// Read a callable property of a port
fn method(port: &JsValue, port_name: &str, name: &str) -> Result<Function, PortError> {
    Reflect::get(port, &JsValue::from_str(name))
        .ok()
        .and_then(|f| f.dyn_into::<Function>().ok())
        .ok_or_else(|| PortError::NotAFunction(format!("{}.{}", port_name, name)))
}

fn unsubscribe(port: &JsValue, handler: &PortHandler) {
    if let Ok(f) = method(port, "", "unsubscribe") {
        let _ = f.call1(port, handler.as_ref());
    }
}

/// Text a store payload would become under `localStorage.setItem`
///
/// `None` where `setItem` would throw: symbols, and values whose `String()`
/// conversion throws.
fn payload_text(payload: &JsValue) -> Option<String> {
    if payload.is_symbol() {
        return None;
    }
    payload
        .as_string()
        .or_else(|| js_string(payload).ok().and_then(|s| s.as_string()))
}
