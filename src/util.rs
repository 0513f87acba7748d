// Console logging helpers

use std::cell::Cell;

thread_local! {
    static DEBUG_LOG: Cell<bool> = const { Cell::new(false) };
}

pub fn set_debug_logging(enabled: bool) {
    DEBUG_LOG.with(|flag| flag.set(enabled));
}

pub fn debug_logging() -> bool {
    DEBUG_LOG.with(|flag| flag.get())
}

/// Debug log, only emitted when `debug_log` is switched on in the config.
pub fn clog(msg: &str) {
    if !debug_logging() {
        return;
    }
    #[cfg(target_arch = "wasm32")]
    web_sys::console::debug_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}

pub fn cwarn(msg: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::warn_1(&wasm_bindgen::JsValue::from_str(msg));
    #[cfg(not(target_arch = "wasm32"))]
    let _ = msg;
}
