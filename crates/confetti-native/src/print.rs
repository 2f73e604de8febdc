//! A [`Renderer`] that prints each burst instead of drawing it.

use confetti_core::{
    BindOptions, BoundRenderer, BurstConfig, ManualScheduler, Renderer, Scheduler,
    ShapeDescriptor, ShapeKind,
};
use std::cell::Cell;
use std::rc::Rc;

pub const DEFAULT_SURFACE: &str = "page";

#[derive(Clone)]
pub struct PrintRenderer {
    clock: ManualScheduler,
    json: bool,
    bursts: Rc<Cell<usize>>,
    next_shape: Rc<Cell<u64>>,
}

pub struct BoundPrinter {
    surface: String,
    out: PrintRenderer,
}

impl PrintRenderer {
    pub fn new(clock: ManualScheduler, json: bool) -> Self {
        Self {
            clock,
            json,
            bursts: Rc::new(Cell::new(0)),
            next_shape: Rc::new(Cell::new(0)),
        }
    }

    pub fn bursts(&self) -> usize {
        self.bursts.get()
    }

    fn emit(&self, surface: &str, config: &BurstConfig) {
        self.bursts.set(self.bursts.get() + 1);
        match format_burst(self.clock.now(), surface, config, self.json) {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("could not print burst: {e}"),
        }
    }

    fn descriptor(&self, kind: ShapeKind) -> ShapeDescriptor {
        let id = self.next_shape.get() + 1;
        self.next_shape.set(id);
        ShapeDescriptor { id, kind }
    }
}

pub fn format_burst(
    at: f64,
    surface: &str,
    config: &BurstConfig,
    json: bool,
) -> serde_json::Result<String> {
    if json {
        serde_json::to_string(&serde_json::json!({
            "at": at,
            "surface": surface,
            "config": config,
        }))
    } else {
        Ok(format!(
            "{at:>8.0}ms  {surface:<8}  {}",
            serde_json::to_string(config)?
        ))
    }
}

impl BoundRenderer for BoundPrinter {
    fn render(&self, config: &BurstConfig) {
        self.out.emit(&self.surface, config);
    }
}

impl Renderer for PrintRenderer {
    type Surface = String;
    type Bound = BoundPrinter;

    fn render(&self, config: &BurstConfig) {
        self.emit(DEFAULT_SURFACE, config);
    }

    fn bind(&self, surface: String, options: BindOptions) -> BoundPrinter {
        log::info!("bound surface {surface} (resize: {})", options.resize);
        BoundPrinter {
            surface,
            out: self.clone(),
        }
    }

    fn shape_from_text(&self, text: &str, scalar: f64) -> ShapeDescriptor {
        let d = self.descriptor(ShapeKind::Bitmap);
        log::debug!("text shape {:?} at scalar {scalar} -> #{}", text, d.id);
        d
    }

    fn shape_from_path(&self, path: &str, matrix: Option<[f64; 6]>) -> ShapeDescriptor {
        let d = self.descriptor(ShapeKind::Path);
        log::debug!("path shape {:?} matrix {:?} -> #{}", path, matrix, d.id);
        d
    }

    fn clear_all(&self) {
        let at = self.clock.now();
        if self.json {
            println!("{}", serde_json::json!({ "at": at, "clear": true }));
        } else {
            println!("{at:>8.0}ms  -- clear --");
        }
    }
}
