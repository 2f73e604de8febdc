//! Raw bindings to the global `confetti` function from canvas-confetti.

use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    /// Fire one burst on the page-wide canvas. Returns a promise, or null
    /// when reduced motion suppresses the burst.
    #[wasm_bindgen(catch, js_name = confetti)]
    pub fn fire(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_namespace = confetti, js_name = reset)]
    pub fn reset();

    /// Returns a fire function bound to `canvas`; it also carries `reset`.
    #[wasm_bindgen(catch, js_namespace = confetti, js_name = create)]
    pub fn create(canvas: &web::HtmlCanvasElement, options: &JsValue)
        -> Result<js_sys::Function, JsValue>;

    #[wasm_bindgen(catch, js_namespace = confetti, js_name = shapeFromText)]
    pub fn shape_from_text(options: &JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = confetti, js_name = shapeFromPath)]
    pub fn shape_from_path(options: &JsValue) -> Result<JsValue, JsValue>;
}
