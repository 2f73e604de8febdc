// Shared recording renderer for host-side orchestrator tests.

#![allow(dead_code)]

use confetti_core::{
    BindOptions, BoundRenderer, BurstConfig, Confetti, ManualScheduler, Renderer, Scheduler,
    ShapeDescriptor, ShapeKind,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Debug)]
pub struct Burst {
    pub at: f64,
    pub surface: Option<String>,
    pub config: BurstConfig,
}

#[derive(Default)]
pub struct Log {
    pub bursts: Vec<Burst>,
    pub clears: Vec<f64>,
    pub binds: Vec<(String, BindOptions)>,
    /// Surfaces whose binding has not been dropped yet.
    pub live: Vec<String>,
    pub texts: Vec<(String, f64)>,
    pub paths: Vec<(String, Option<[f64; 6]>)>,
}

#[derive(Clone)]
pub struct Recorder {
    pub log: Rc<RefCell<Log>>,
    clock: ManualScheduler,
    next_id: Rc<Cell<u64>>,
}

impl Recorder {
    pub fn new(clock: ManualScheduler) -> Self {
        Self {
            log: Rc::new(RefCell::new(Log::default())),
            clock,
            next_id: Rc::new(Cell::new(0)),
        }
    }

    pub fn bursts(&self) -> Vec<Burst> {
        self.log.borrow().bursts.clone()
    }

    pub fn burst_count(&self) -> usize {
        self.log.borrow().bursts.len()
    }

    pub fn clears(&self) -> usize {
        self.log.borrow().clears.len()
    }

    fn descriptor(&self, kind: ShapeKind) -> ShapeDescriptor {
        let id = self.next_id.get() + 1;
        self.next_id.set(id);
        ShapeDescriptor { id, kind }
    }
}

pub struct BoundRecorder {
    name: String,
    log: Rc<RefCell<Log>>,
    clock: ManualScheduler,
}

impl Drop for BoundRecorder {
    fn drop(&mut self) {
        let mut log = self.log.borrow_mut();
        if let Some(i) = log.live.iter().position(|n| *n == self.name) {
            log.live.remove(i);
        }
    }
}

impl BoundRenderer for BoundRecorder {
    fn render(&self, config: &BurstConfig) {
        self.log.borrow_mut().bursts.push(Burst {
            at: self.clock.now(),
            surface: Some(self.name.clone()),
            config: config.clone(),
        });
    }
}

impl Renderer for Recorder {
    type Surface = String;
    type Bound = BoundRecorder;

    fn render(&self, config: &BurstConfig) {
        self.log.borrow_mut().bursts.push(Burst {
            at: self.clock.now(),
            surface: None,
            config: config.clone(),
        });
    }

    fn bind(&self, surface: String, options: BindOptions) -> BoundRecorder {
        let mut log = self.log.borrow_mut();
        log.binds.push((surface.clone(), options));
        log.live.push(surface.clone());
        drop(log);
        BoundRecorder {
            name: surface,
            log: self.log.clone(),
            clock: self.clock.clone(),
        }
    }

    fn shape_from_text(&self, text: &str, scalar: f64) -> ShapeDescriptor {
        self.log.borrow_mut().texts.push((text.to_string(), scalar));
        self.descriptor(ShapeKind::Bitmap)
    }

    fn shape_from_path(&self, path: &str, matrix: Option<[f64; 6]>) -> ShapeDescriptor {
        self.log.borrow_mut().paths.push((path.to_string(), matrix));
        self.descriptor(ShapeKind::Path)
    }

    fn clear_all(&self) {
        let now = self.clock.now();
        self.log.borrow_mut().clears.push(now);
    }
}

pub type TestConfetti = Confetti<Recorder, ManualScheduler>;

pub fn setup_with(defaults: BurstConfig) -> (TestConfetti, Recorder, ManualScheduler) {
    let clock = ManualScheduler::new();
    let recorder = Recorder::new(clock.clone());
    let confetti = Confetti::with_seed(recorder.clone(), clock.clone(), defaults, 42);
    (confetti, recorder, clock)
}

pub fn setup() -> (TestConfetti, Recorder, ManualScheduler) {
    setup_with(BurstConfig::default())
}
