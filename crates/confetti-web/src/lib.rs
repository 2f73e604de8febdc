#![cfg(target_arch = "wasm32")]
use confetti_core::{BurstConfig, Confetti, Effect, ResetConfig, ResetMode};
use wasm_bindgen::prelude::*;

mod bindings;
mod dom;
mod options;
mod renderer;
mod scheduler;

pub use renderer::{BoundCanvas, CanvasConfetti};
pub use scheduler::BrowserScheduler;

use options::{from_js, overrides};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("confetti-web starting");
    Ok(())
}

fn js_err(e: anyhow::Error) -> JsValue {
    JsValue::from_str(&format!("{e:#}"))
}

/// JS-facing orchestrator. Every effect method accepts `(options?)` or
/// `(colors, options?)`.
#[wasm_bindgen]
pub struct ConfettiManager {
    confetti: Confetti<CanvasConfetti, BrowserScheduler>,
}

#[wasm_bindgen]
impl ConfettiManager {
    #[wasm_bindgen(constructor)]
    pub fn new(defaults: JsValue) -> Result<ConfettiManager, JsValue> {
        let defaults: BurstConfig = from_js(&defaults).map_err(js_err)?;
        let scheduler = BrowserScheduler::new().map_err(js_err)?;
        Ok(ConfettiManager {
            confetti: Confetti::new(CanvasConfetti::new(), scheduler, defaults),
        })
    }

    pub fn custom(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .custom(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn cannon(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .cannon(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    #[wasm_bindgen(js_name = randomDirection)]
    pub fn random_direction(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .random_direction(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn realistic(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .realistic(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn fireworks(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .fireworks(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn stars(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .stars(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn circles(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .circles(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn squares(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .squares(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn snow(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .snow(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn fall(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .fall(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    pub fn pride(&self, first: JsValue, second: JsValue) -> Result<(), JsValue> {
        self.confetti
            .pride(overrides(&first, &second).map_err(js_err)?);
        Ok(())
    }

    /// `shapes` is an array of shape names, text/emoji, or SVG markup.
    #[wasm_bindgen(js_name = customShape)]
    pub fn custom_shape(&self, shapes: JsValue, options: JsValue) -> Result<(), JsValue> {
        let shapes: Vec<String> = from_js(&shapes).map_err(js_err)?;
        let options: BurstConfig = from_js(&options).map_err(js_err)?;
        self.confetti.custom_shape(shapes, options);
        Ok(())
    }

    #[wasm_bindgen(js_name = customShapeFromSVG)]
    pub fn custom_shape_from_svg(&self, svgs: JsValue, options: JsValue) -> Result<(), JsValue> {
        let svgs: Vec<String> = from_js(&svgs).map_err(js_err)?;
        let options: BurstConfig = from_js(&options).map_err(js_err)?;
        self.confetti.custom_shape_from_svg(svgs, options);
        Ok(())
    }

    /// Repeat the named effect every `interval` ms for `duration` ms.
    pub fn infinite(
        &self,
        effect: String,
        interval: Option<f64>,
        duration: Option<f64>,
        options: JsValue,
    ) -> Result<(), JsValue> {
        let effect: Effect = effect.parse().map_err(|e| {
            log::warn!("infinite: {e}");
            JsValue::from_str(&e.to_string())
        })?;
        let options: BurstConfig = from_js(&options).map_err(js_err)?;
        self.confetti.infinite(effect, interval, duration, options);
        Ok(())
    }

    /// `mode` is "smooth" (default) or "instant"; anything else runs
    /// instant.
    pub fn reset(&self, mode: Option<String>, options: JsValue) -> Result<(), JsValue> {
        let mode = mode
            .map(|m| ResetMode::parse_or_instant(&m))
            .unwrap_or_default();
        let options: ResetConfig = from_js(&options).map_err(js_err)?;
        self.confetti.reset(mode, options);
        Ok(())
    }

    /// Route later bursts to a canvas (element or id); null reverts to the
    /// page-wide canvas.
    #[wasm_bindgen(js_name = customCanvas)]
    pub fn custom_canvas(&self, canvas: JsValue) -> Result<(), JsValue> {
        let canvas = dom::canvas_from(canvas).map_err(js_err)?;
        self.confetti.custom_canvas(canvas);
        Ok(())
    }
}
