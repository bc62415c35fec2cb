//! Console logging for the bridge
//!
//! Messages go to the browser console on wasm32 and are dropped elsewhere, so
//! the same call sites work under native unit tests.

#[cfg(target_arch = "wasm32")]
mod console {
    use wasm_bindgen::prelude::*;

    #[wasm_bindgen]
    extern "C" {
        /// Console.log binding for WASM
        #[wasm_bindgen(js_namespace = console)]
        pub fn log(s: &str);
    }
}

/// Write a line to the browser console
#[cfg(target_arch = "wasm32")]
pub fn log(s: &str) {
    console::log(s);
}

#[cfg(not(target_arch = "wasm32"))]
#[allow(dead_code)]
pub fn log(_s: &str) {
    // No-op for non-WASM
}
