use js_sys::Reflect;
use wasm_bindgen::JsValue;

/// Sets the global `app_dirty` flag the page's unload guard reads.
pub fn set_window_dirty_flag(dirty: bool) {
    if let Some(window) = web_sys::window() {
        let _ = Reflect::set(
            &window,
            &JsValue::from_str("app_dirty"),
            &JsValue::from_bool(dirty),
        );
    }
}
