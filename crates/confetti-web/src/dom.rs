use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Accepts a canvas element, the id of one, or null/undefined for "none".
pub fn canvas_from(value: JsValue) -> anyhow::Result<Option<web::HtmlCanvasElement>> {
    if value.is_null() || value.is_undefined() {
        return Ok(None);
    }
    let element: JsValue = match value.as_string() {
        Some(id) => {
            let document = window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
            document
                .get_element_by_id(&id)
                .ok_or_else(|| anyhow::anyhow!("missing #{id}"))?
                .into()
        }
        None => value,
    };
    element
        .dyn_into::<web::HtmlCanvasElement>()
        .map(Some)
        .map_err(|e| anyhow::anyhow!("not a canvas: {:?}", e))
}
