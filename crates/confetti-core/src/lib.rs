//! Preset confetti effects orchestrated over an external particle renderer.
//!
//! The crate is platform-free: drawing goes through [`Renderer`] and timing
//! through [`Scheduler`]. The web front-end binds both to the browser; tests
//! and the native CLI use [`ManualScheduler`].

pub mod config;
pub mod constants;
pub mod effect;
pub mod manual;
pub mod orchestrator;
pub mod presets;
pub mod renderer;
pub mod scheduler;
pub mod shape;

pub use config::*;
pub use effect::{Effect, EffectError};
pub use manual::ManualScheduler;
pub use orchestrator::{ActiveLoops, Confetti};
pub use renderer::{BindOptions, BoundRenderer, Renderer};
pub use scheduler::{FrameId, Scheduler, TimerId};
pub use shape::{Shape, ShapeDescriptor, ShapeKind};
