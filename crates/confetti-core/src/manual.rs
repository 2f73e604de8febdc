//! Deterministic virtual-clock [`Scheduler`].
//!
//! Nothing runs until [`ManualScheduler::advance`] moves the clock. Timers
//! fire in due-time order (ties in scheduling order) and animation frames
//! land on fixed frame boundaries. Used by the tests and by the native
//! replay CLI.

use crate::scheduler::{FrameId, Scheduler, TimerId};
use std::cell::RefCell;
use std::rc::Rc;

pub const DEFAULT_FRAME_MS: f64 = 16.0;

enum Task {
    Timeout(Box<dyn FnOnce()>),
    Interval {
        period: f64,
        callback: Box<dyn FnMut()>,
    },
    Frame(Box<dyn FnOnce()>),
}

struct Entry {
    id: u64,
    due: f64,
    seq: u64,
    task: Task,
}

#[derive(Default)]
struct State {
    now: f64,
    frame_ms: f64,
    next_id: u64,
    next_seq: u64,
    entries: Vec<Entry>,
    /// Interval currently executing, and whether it cleared itself.
    running: Option<u64>,
    running_cleared: bool,
}

impl State {
    fn push(&mut self, due: f64, task: Task) -> u64 {
        self.next_id += 1;
        self.next_seq += 1;
        let id = self.next_id;
        self.entries.push(Entry {
            id,
            due,
            seq: self.next_seq,
            task,
        });
        id
    }

    fn remove(&mut self, id: u64) {
        self.entries.retain(|e| e.id != id);
        if self.running == Some(id) {
            self.running_cleared = true;
        }
    }

    /// Index of the earliest entry due at or before `limit`.
    fn next_due(&self, limit: f64) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= limit)
            .min_by(|(_, a), (_, b)| a.due.total_cmp(&b.due).then(a.seq.cmp(&b.seq)))
            .map(|(i, _)| i)
    }

    fn next_frame_boundary(&self) -> f64 {
        let next = ((self.now / self.frame_ms).floor() + 1.0) * self.frame_ms;
        if next <= self.now {
            next + self.frame_ms
        } else {
            next
        }
    }

    fn count(&self, pred: impl Fn(&Task) -> bool) -> usize {
        self.entries.iter().filter(|e| pred(&e.task)).count()
    }
}

/// Cloning shares the same clock and queue.
#[derive(Clone)]
pub struct ManualScheduler {
    state: Rc<RefCell<State>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::with_frame_ms(DEFAULT_FRAME_MS)
    }

    pub fn with_frame_ms(frame_ms: f64) -> Self {
        Self {
            state: Rc::new(RefCell::new(State {
                frame_ms: frame_ms.max(1.0),
                ..Default::default()
            })),
        }
    }

    /// Move the clock forward by `ms`, running everything that comes due.
    pub fn advance(&self, ms: f64) {
        let target = self.state.borrow().now + ms.max(0.0);
        self.run_until(target);
    }

    /// Advance in frame-sized steps until nothing is queued, giving up after
    /// `limit_ms`. Returns true if the queue drained.
    pub fn run_until_idle(&self, limit_ms: f64) -> bool {
        let limit = self.state.borrow().now + limit_ms.max(0.0);
        loop {
            let next = {
                let s = self.state.borrow();
                if s.entries.is_empty() {
                    return true;
                }
                s.entries
                    .iter()
                    .map(|e| e.due)
                    .fold(f64::INFINITY, f64::min)
            };
            if next > limit {
                self.run_until(limit);
                return self.state.borrow().entries.is_empty();
            }
            self.run_until(next);
        }
    }

    fn run_until(&self, target: f64) {
        loop {
            let entry = {
                let mut s = self.state.borrow_mut();
                let Some(idx) = s.next_due(target) else {
                    s.now = s.now.max(target);
                    return;
                };
                let entry = s.entries.swap_remove(idx);
                s.now = s.now.max(entry.due);
                entry
            };
            match entry.task {
                Task::Timeout(cb) | Task::Frame(cb) => cb(),
                Task::Interval {
                    period,
                    mut callback,
                } => {
                    {
                        let mut s = self.state.borrow_mut();
                        s.running = Some(entry.id);
                        s.running_cleared = false;
                    }
                    callback();
                    let mut s = self.state.borrow_mut();
                    let cleared = s.running_cleared;
                    s.running = None;
                    s.running_cleared = false;
                    if !cleared {
                        s.next_seq += 1;
                        let seq = s.next_seq;
                        s.entries.push(Entry {
                            id: entry.id,
                            due: entry.due + period,
                            seq,
                            task: Task::Interval { period, callback },
                        });
                    }
                }
            }
        }
    }

    pub fn pending(&self) -> usize {
        self.state.borrow().entries.len()
    }

    pub fn pending_timeouts(&self) -> usize {
        self.state
            .borrow()
            .count(|t| matches!(t, Task::Timeout(_)))
    }

    pub fn pending_intervals(&self) -> usize {
        self.state
            .borrow()
            .count(|t| matches!(t, Task::Interval { .. }))
    }

    pub fn pending_frames(&self) -> usize {
        self.state.borrow().count(|t| matches!(t, Task::Frame(_)))
    }
}

impl Scheduler for ManualScheduler {
    fn now(&self) -> f64 {
        self.state.borrow().now
    }

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId {
        let mut s = self.state.borrow_mut();
        let due = s.now + delay_ms.max(0.0);
        TimerId(s.push(due, Task::Timeout(callback)))
    }

    fn clear_timeout(&self, id: TimerId) {
        self.state.borrow_mut().remove(id.0);
    }

    fn set_interval(&self, period_ms: f64, callback: Box<dyn FnMut()>) -> TimerId {
        let mut s = self.state.borrow_mut();
        let period = period_ms.max(1.0);
        let due = s.now + period;
        TimerId(s.push(due, Task::Interval { period, callback }))
    }

    fn clear_interval(&self, id: TimerId) {
        self.state.borrow_mut().remove(id.0);
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId {
        let mut s = self.state.borrow_mut();
        let due = s.next_frame_boundary();
        FrameId(s.push(due, Task::Frame(callback)))
    }

    fn cancel_frame(&self, id: FrameId) {
        self.state.borrow_mut().remove(id.0);
    }
}
