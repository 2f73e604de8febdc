use confetti_core::{FrameId, Scheduler, TimerId};
use fnv::FnvHashMap;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
    Timeout,
    Interval,
    Frame,
}

struct Task {
    kind: Kind,
    handle: i32,
    closure: Closure<dyn FnMut()>,
}

#[derive(Default)]
struct State {
    next_id: u64,
    live: FnvHashMap<u64, Task>,
    /// Closures that may still be on the JS stack. Dropped at the start of
    /// the next callback.
    retired: Vec<Closure<dyn FnMut()>>,
}

impl State {
    /// Forget a task, keeping its closure alive until the next callback.
    fn retire(&mut self, id: u64) -> Option<(Kind, i32)> {
        let task = self.live.remove(&id)?;
        self.retired.push(task.closure);
        Some((task.kind, task.handle))
    }
}

/// Runs at the top of every callback: nothing retired earlier can still be
/// executing.
fn enter(state: &Weak<RefCell<State>>, own: Option<u64>) -> bool {
    let Some(state) = state.upgrade() else {
        return false;
    };
    let mut s = state.borrow_mut();
    s.retired.clear();
    if let Some(id) = own {
        s.retire(id);
    }
    true
}

/// Browser [`Scheduler`] on `window` timers and `requestAnimationFrame`.
pub struct BrowserScheduler {
    window: web::Window,
    state: Rc<RefCell<State>>,
}

impl BrowserScheduler {
    pub fn new() -> anyhow::Result<Self> {
        let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
        Ok(Self {
            window,
            state: Rc::new(RefCell::new(State::default())),
        })
    }

    fn next_id(&self) -> u64 {
        let mut s = self.state.borrow_mut();
        s.next_id += 1;
        s.next_id
    }

    fn arm(
        &self,
        id: u64,
        kind: Kind,
        closure: Closure<dyn FnMut()>,
        arm: impl FnOnce(&web::Window, &js_sys::Function) -> Result<i32, JsValue>,
    ) {
        match arm(&self.window, closure.as_ref().unchecked_ref()) {
            Ok(handle) => {
                self.state.borrow_mut().live.insert(
                    id,
                    Task {
                        kind,
                        handle,
                        closure,
                    },
                );
            }
            Err(e) => log::error!("{kind:?} scheduling failed: {:?}", e),
        }
    }

    fn cancel(&self, id: u64) {
        let Some((kind, handle)) = self.state.borrow_mut().retire(id) else {
            return;
        };
        match kind {
            Kind::Timeout => self.window.clear_timeout_with_handle(handle),
            Kind::Interval => self.window.clear_interval_with_handle(handle),
            Kind::Frame => {
                let _ = self.window.cancel_animation_frame(handle);
            }
        }
    }

    fn once(&self, id: u64, callback: Box<dyn FnOnce()>) -> Closure<dyn FnMut()> {
        let state = Rc::downgrade(&self.state);
        let mut callback = Some(callback);
        Closure::wrap(Box::new(move || {
            if !enter(&state, Some(id)) {
                return;
            }
            if let Some(cb) = callback.take() {
                cb();
            }
        }) as Box<dyn FnMut()>)
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        instant::now()
    }

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let id = self.next_id();
        let closure = self.once(id, callback);
        self.arm(id, Kind::Timeout, closure, |w, f| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(f, delay_ms.max(0.0) as i32)
        });
        TimerId(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.cancel(id.0);
    }

    fn set_interval(&self, period_ms: f64, mut callback: Box<dyn FnMut()>) -> TimerId {
        let id = self.next_id();
        let state = Rc::downgrade(&self.state);
        let closure = Closure::wrap(Box::new(move || {
            if enter(&state, None) {
                callback();
            }
        }) as Box<dyn FnMut()>);
        self.arm(id, Kind::Interval, closure, |w, f| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(f, period_ms.max(1.0) as i32)
        });
        TimerId(id)
    }

    fn clear_interval(&self, id: TimerId) {
        self.cancel(id.0);
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId {
        let id = self.next_id();
        let closure = self.once(id, callback);
        self.arm(id, Kind::Frame, closure, |w, f| w.request_animation_frame(f));
        FrameId(id)
    }

    fn cancel_frame(&self, id: FrameId) {
        self.cancel(id.0);
    }
}

impl Drop for BrowserScheduler {
    fn drop(&mut self) {
        let ids: Vec<u64> = self.state.borrow().live.keys().copied().collect();
        for id in ids {
            self.cancel(id);
        }
    }
}
