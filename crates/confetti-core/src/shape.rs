//! Particle shapes and their resolution into renderer descriptors.
//!
//! Callers describe shapes loosely: a built-in name, arbitrary text or emoji,
//! or raw SVG markup. Before a burst is dispatched every shape is resolved to
//! something the rendering primitive understands directly: one of the
//! built-ins or an opaque [`ShapeDescriptor`] issued by the renderer.

use crate::constants::SVG_TARGET_SIZE;
use crate::renderer::Renderer;
use fnv::FnvHashMap;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// What kind of drawable a renderer-issued descriptor stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Path,
    Bitmap,
}

/// Opaque handle to a shape the renderer built from text or path data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeDescriptor {
    pub id: u64,
    pub kind: ShapeKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Shape {
    Square,
    Circle,
    Star,
    /// Text or emoji, or a name that still has to be checked.
    Text(String),
    /// Raw SVG markup; only the first `<path>` is used.
    Svg(String),
    Custom(ShapeDescriptor),
}

impl Shape {
    pub fn builtin(name: &str) -> Option<Shape> {
        match name {
            "square" => Some(Shape::Square),
            "circle" => Some(Shape::Circle),
            "star" => Some(Shape::Star),
            _ => None,
        }
    }

    /// True once the shape can be handed to a renderer as-is.
    pub fn is_resolved(&self) -> bool {
        matches!(
            self,
            Shape::Square | Shape::Circle | Shape::Star | Shape::Custom(_)
        )
    }
}

impl From<&str> for Shape {
    fn from(s: &str) -> Self {
        if let Some(b) = Shape::builtin(s) {
            return b;
        }
        if s.trim_start().starts_with('<') {
            Shape::Svg(s.to_string())
        } else {
            Shape::Text(s.to_string())
        }
    }
}

impl From<String> for Shape {
    fn from(s: String) -> Self {
        Shape::from(s.as_str())
    }
}

impl From<Shape> for String {
    fn from(s: Shape) -> Self {
        s.to_string()
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Square => f.write_str("square"),
            Shape::Circle => f.write_str("circle"),
            Shape::Star => f.write_str("star"),
            Shape::Text(t) => f.write_str(t),
            Shape::Svg(s) => f.write_str(s),
            Shape::Custom(d) => {
                let kind = match d.kind {
                    ShapeKind::Path => "path",
                    ShapeKind::Bitmap => "bitmap",
                };
                write!(f, "{kind}#{}", d.id)
            }
        }
    }
}

/// Text that looks like a shape name rather than something to draw.
#[inline]
fn is_shape_name(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum CacheKey {
    /// Unknown name that fell back to a built-in.
    Name(String),
    /// Text drawn at a scalar, keyed by the scalar's bits.
    Text(String, u64),
    Svg(String),
}

/// What each text and SVG shape resolved to, so the renderer builds every
/// distinct shape once per orchestrator.
#[derive(Debug, Default)]
pub struct ShapeCache {
    resolved: FnvHashMap<CacheKey, Option<Shape>>,
}

impl ShapeCache {
    /// Resolve one configured shape. `None` means it is dropped from the
    /// burst.
    pub fn resolve<R: Renderer>(&mut self, renderer: &R, shape: &Shape, scalar: f64) -> Option<Shape> {
        match shape {
            Shape::Text(text) if text.is_empty() || is_shape_name(text) => self
                .resolved
                .entry(CacheKey::Name(text.clone()))
                .or_insert_with(|| {
                    log::warn!("unknown shape {:?}, falling back to circle", text);
                    Some(Shape::Circle)
                })
                .clone(),
            Shape::Text(text) => Some(self.text(renderer, text, scalar)),
            Shape::Svg(markup) => self
                .resolved
                .entry(CacheKey::Svg(markup.clone()))
                .or_insert_with(|| match first_path_data(markup) {
                    Some(d) => {
                        let matrix = view_box_matrix(markup);
                        Some(Shape::Custom(renderer.shape_from_path(&d, matrix)))
                    }
                    None => {
                        log::debug!("svg shape has no <path d=...>, dropping it");
                        None
                    }
                })
                .clone(),
            other => Some(other.clone()),
        }
    }

    /// Draw `text` as-is, even when it reads like a shape name.
    pub fn text<R: Renderer>(&mut self, renderer: &R, text: &str, scalar: f64) -> Shape {
        self.resolved
            .entry(CacheKey::Text(text.to_string(), scalar.to_bits()))
            .or_insert_with(|| Some(Shape::Custom(renderer.shape_from_text(text, scalar))))
            .clone()
            .unwrap_or(Shape::Circle)
    }

    pub fn resolve_all<R: Renderer>(&mut self, renderer: &R, shapes: &[Shape], scalar: f64) -> Vec<Shape> {
        shapes
            .iter()
            .filter_map(|s| self.resolve(renderer, s, scalar))
            .collect()
    }
}

fn path_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?is)<path\b[^>]*>").expect("valid regex"))
}

fn d_attr_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)\sd\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("valid regex")
    })
}

fn view_box_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?is)<svg\b[^>]*\sviewBox\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
            .expect("valid regex")
    })
}

/// The `d` attribute of the first `<path>` element, if it has one.
pub fn first_path_data(svg: &str) -> Option<String> {
    let tag = path_tag_re().find(svg)?;
    let caps = d_attr_re().captures(tag.as_str())?;
    let d = caps.get(1).or_else(|| caps.get(2))?.as_str().trim();
    if d.is_empty() {
        None
    } else {
        Some(d.to_string())
    }
}

/// Scale matrix `[a, b, c, d, e, f]` fitting the `viewBox` into
/// [`SVG_TARGET_SIZE`] units. `None` lets the renderer derive its own.
pub fn view_box_matrix(svg: &str) -> Option<[f64; 6]> {
    let caps = view_box_re().captures(svg)?;
    let raw = caps.get(1).or_else(|| caps.get(2))?.as_str();
    let nums: Vec<f64> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|p| !p.is_empty())
        .filter_map(|p| p.parse().ok())
        .collect();
    let [min_x, min_y, w, h] = nums[..] else {
        return None;
    };
    let extent = w.max(h);
    if extent.is_nan() || extent <= 0.0 {
        return None;
    }
    let s = SVG_TARGET_SIZE / extent;
    Some([s, 0.0, 0.0, s, -min_x * s, -min_y * s])
}
