//! Seam to the particle rendering primitive.
//!
//! The orchestrator never draws anything itself; it hands fully merged
//! [`BurstConfig`]s to a [`Renderer`], which animates each burst to
//! completion on its own.

use crate::config::BurstConfig;
use crate::shape::ShapeDescriptor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BindOptions {
    /// Keep the bound surface's backing size in sync with its layout size.
    pub resize: bool,
}

impl Default for BindOptions {
    fn default() -> Self {
        Self { resize: true }
    }
}

/// A renderer scoped to one caller-supplied surface.
pub trait BoundRenderer {
    fn render(&self, config: &BurstConfig);
}

pub trait Renderer {
    type Surface;
    type Bound: BoundRenderer;

    /// Fire one burst on the default (whole viewport) surface.
    fn render(&self, config: &BurstConfig);

    fn bind(&self, surface: Self::Surface, options: BindOptions) -> Self::Bound;

    fn shape_from_text(&self, text: &str, scalar: f64) -> ShapeDescriptor;

    fn shape_from_path(&self, path: &str, matrix: Option<[f64; 6]>) -> ShapeDescriptor;

    /// Stop and remove every animating particle on every surface.
    fn clear_all(&self);
}
