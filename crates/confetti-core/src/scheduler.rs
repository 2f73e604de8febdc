//! Cooperative timer seam: one-shot delays, intervals and animation frames.
//!
//! Implementations run every callback on the caller's thread. Clearing a
//! handle from inside its own callback must be allowed.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameId(pub u64);

pub trait Scheduler {
    /// Monotonic clock in milliseconds.
    fn now(&self) -> f64;

    fn set_timeout(&self, delay_ms: f64, callback: Box<dyn FnOnce()>) -> TimerId;

    fn clear_timeout(&self, id: TimerId);

    fn set_interval(&self, period_ms: f64, callback: Box<dyn FnMut()>) -> TimerId;

    fn clear_interval(&self, id: TimerId);

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> FrameId;

    fn cancel_frame(&self, id: FrameId);
}
