use crate::bindings;
use confetti_core::{
    BindOptions, BoundRenderer, BurstConfig, Renderer, Shape, ShapeDescriptor, ShapeKind,
};
use fnv::FnvHashMap;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

type ShapeTable = Rc<RefCell<FnvHashMap<u64, JsValue>>>;
/// Live `confetti.create` instances, so `clear_all` can reset them.
type BoundTable = Rc<RefCell<FnvHashMap<u64, js_sys::Function>>>;

/// [`Renderer`] backed by canvas-confetti. Shape objects it creates stay on
/// the JS side; the core only ever sees their ids.
#[derive(Default)]
pub struct CanvasConfetti {
    shapes: ShapeTable,
    next_shape: Cell<u64>,
    bound: BoundTable,
    next_bound: Cell<u64>,
}

/// One bound canvas. Dropping it (on rebind or unbind) forgets the instance.
pub struct BoundCanvas {
    key: u64,
    fire: js_sys::Function,
    shapes: ShapeTable,
    bound: BoundTable,
}

impl Drop for BoundCanvas {
    fn drop(&mut self) {
        self.bound.borrow_mut().remove(&self.key);
    }
}

impl CanvasConfetti {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&self, kind: ShapeKind, shape: Result<JsValue, JsValue>) -> ShapeDescriptor {
        let id = self.next_shape.get() + 1;
        self.next_shape.set(id);
        match shape {
            Ok(v) => {
                self.shapes.borrow_mut().insert(id, v);
            }
            Err(e) => log::error!("shape creation failed: {:?}", e),
        }
        ShapeDescriptor { id, kind }
    }
}

/// Serialize a merged config into the options object canvas-confetti reads.
/// Custom shapes are swapped for the JS objects they stand for.
fn to_js_options(config: &BurstConfig, shapes: &ShapeTable) -> anyhow::Result<JsValue> {
    let mut config = config.clone();
    let wanted = config.shapes.take();
    let json = serde_json::to_string(&config)?;
    let options = js_sys::JSON::parse(&json).map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if let Some(wanted) = wanted {
        let table = shapes.borrow();
        let list = js_sys::Array::new();
        for shape in &wanted {
            match shape {
                Shape::Custom(d) => match table.get(&d.id) {
                    Some(v) => {
                        list.push(v);
                    }
                    None => log::debug!("no shape object for {shape}"),
                },
                Shape::Text(_) | Shape::Svg(_) => {}
                builtin => {
                    list.push(&JsValue::from_str(&builtin.to_string()));
                }
            }
        }
        if list.length() > 0 {
            js_sys::Reflect::set(&options, &"shapes".into(), &list)
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
    }
    Ok(options)
}

fn fire_with(fire: impl FnOnce(&JsValue) -> Result<JsValue, JsValue>, options: anyhow::Result<JsValue>) {
    match options {
        Ok(o) => {
            if let Err(e) = fire(&o) {
                log::error!("confetti error: {:?}", e);
            }
        }
        Err(e) => log::error!("bad burst options: {e}"),
    }
}

impl BoundRenderer for BoundCanvas {
    fn render(&self, config: &BurstConfig) {
        fire_with(
            |o| self.fire.call1(&JsValue::NULL, o),
            to_js_options(config, &self.shapes),
        );
    }
}

impl Renderer for CanvasConfetti {
    type Surface = web::HtmlCanvasElement;
    type Bound = BoundCanvas;

    fn render(&self, config: &BurstConfig) {
        fire_with(bindings::fire, to_js_options(config, &self.shapes));
    }

    fn bind(&self, surface: web::HtmlCanvasElement, options: BindOptions) -> BoundCanvas {
        let create_options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(
            &create_options,
            &"resize".into(),
            &JsValue::from_bool(options.resize),
        );
        let key = self.next_bound.get() + 1;
        self.next_bound.set(key);
        let fire = match bindings::create(&surface, &create_options) {
            Ok(f) => {
                self.bound.borrow_mut().insert(key, f.clone());
                f
            }
            Err(e) => {
                log::error!("confetti.create failed: {:?}", e);
                js_sys::Function::new_no_args("")
            }
        };
        BoundCanvas {
            key,
            fire,
            shapes: self.shapes.clone(),
            bound: self.bound.clone(),
        }
    }

    fn shape_from_text(&self, text: &str, scalar: f64) -> ShapeDescriptor {
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &"text".into(), &JsValue::from_str(text));
        let _ = js_sys::Reflect::set(&options, &"scalar".into(), &JsValue::from_f64(scalar));
        self.store(ShapeKind::Bitmap, bindings::shape_from_text(&options))
    }

    fn shape_from_path(&self, path: &str, matrix: Option<[f64; 6]>) -> ShapeDescriptor {
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &"path".into(), &JsValue::from_str(path));
        if let Some(m) = matrix {
            let values: js_sys::Array = m.iter().map(|v| JsValue::from_f64(*v)).collect();
            let _ = js_sys::Reflect::set(&options, &"matrix".into(), &values);
        }
        self.store(ShapeKind::Path, bindings::shape_from_path(&options))
    }

    fn clear_all(&self) {
        bindings::reset();
        for fire in self.bound.borrow().values() {
            let reset = js_sys::Reflect::get(fire, &"reset".into())
                .ok()
                .and_then(|r| r.dyn_into::<js_sys::Function>().ok());
            if let Some(reset) = reset {
                let _ = reset.call0(fire);
            }
        }
    }
}
