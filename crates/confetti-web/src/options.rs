//! JS option objects to core configs.
//!
//! Objects go through `JSON.stringify` and `serde_json`, so they use the
//! same camelCase names canvas-confetti does.

use confetti_core::{BurstConfig, FireworksConfig, PrideConfig, ResetConfig, SnowConfig};
use serde::de::DeserializeOwned;
use wasm_bindgen::JsValue;

pub trait Overrides: DeserializeOwned + Default {
    fn colors_mut(&mut self) -> &mut Option<Vec<String>>;
}

impl Overrides for BurstConfig {
    fn colors_mut(&mut self) -> &mut Option<Vec<String>> {
        &mut self.colors
    }
}

macro_rules! timed_overrides {
    ($($ty:ty),*) => {
        $(
            impl Overrides for $ty {
                fn colors_mut(&mut self) -> &mut Option<Vec<String>> {
                    &mut self.burst.colors
                }
            }
        )*
    };
}

timed_overrides!(FireworksConfig, SnowConfig, PrideConfig, ResetConfig);

/// null and undefined read as `T::default()`.
pub fn from_js<T: DeserializeOwned + Default>(value: &JsValue) -> anyhow::Result<T> {
    if value.is_null() || value.is_undefined() {
        return Ok(T::default());
    }
    let json: String = js_sys::JSON::stringify(value)
        .map_err(|e| anyhow::anyhow!("unserializable options: {:?}", e))?
        .into();
    Ok(serde_json::from_str(&json)?)
}

/// Effect methods take `(options?)` or `(colors, options?)`.
pub fn overrides<T: Overrides>(first: &JsValue, second: &JsValue) -> anyhow::Result<T> {
    if !js_sys::Array::is_array(first) {
        return from_js(first);
    }
    let colors: Vec<String> = from_js(first)?;
    let mut options: T = from_js(second)?;
    *options.colors_mut() = Some(colors);
    Ok(options)
}
