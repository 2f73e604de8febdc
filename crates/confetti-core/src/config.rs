//! Burst configuration and its per-effect extensions.
//!
//! Every field is optional; `None` means "unset, fall through to the next
//! layer". Layers are merged field by field, lowest first:
//! built-in profile, instance defaults, effect presets, call-site overrides.
//! Nothing here validates ranges. Values are passed through to the renderer.

use crate::constants::*;
use crate::shape::Shape;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Launch point as fractions of the surface (0,0 is top-left).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
}

impl Origin {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
        }
    }

    pub fn x(x: f64) -> Self {
        Self {
            x: Some(x),
            y: None,
        }
    }

    pub fn y(y: f64) -> Self {
        Self {
            x: None,
            y: Some(y),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BurstConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shapes: Option<Vec<Shape>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_velocity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drift: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flat: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scalar: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i32>,
    /// Milliseconds to wait before the burst fires. Consumed by the
    /// orchestrator; the renderer ignores it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_for_reduced_motion: Option<bool>,
}

impl BurstConfig {
    /// The built-in profile every orchestrator starts from.
    pub fn builtin() -> Self {
        Self {
            colors: Some(DEFAULT_COLORS.iter().map(|c| c.to_string()).collect()),
            shapes: Some(vec![Shape::Square, Shape::Circle]),
            particle_count: Some(DEFAULT_PARTICLE_COUNT),
            angle: Some(DEFAULT_ANGLE),
            spread: Some(DEFAULT_SPREAD),
            start_velocity: Some(DEFAULT_START_VELOCITY),
            decay: Some(DEFAULT_DECAY),
            gravity: Some(DEFAULT_GRAVITY),
            drift: Some(DEFAULT_DRIFT),
            flat: None,
            ticks: Some(DEFAULT_TICKS),
            origin: Some(Origin::new(DEFAULT_ORIGIN[0], DEFAULT_ORIGIN[1])),
            scalar: Some(DEFAULT_SCALAR),
            z_index: Some(DEFAULT_Z_INDEX),
            delay: None,
            disable_for_reduced_motion: None,
        }
    }

    /// Shallow field-by-field merge; fields set in `over` win.
    pub fn merge(&self, over: &BurstConfig) -> BurstConfig {
        BurstConfig {
            colors: over.colors.clone().or_else(|| self.colors.clone()),
            shapes: over.shapes.clone().or_else(|| self.shapes.clone()),
            particle_count: over.particle_count.or(self.particle_count),
            angle: over.angle.or(self.angle),
            spread: over.spread.or(self.spread),
            start_velocity: over.start_velocity.or(self.start_velocity),
            decay: over.decay.or(self.decay),
            gravity: over.gravity.or(self.gravity),
            drift: over.drift.or(self.drift),
            flat: over.flat.or(self.flat),
            ticks: over.ticks.or(self.ticks),
            origin: over.origin.or(self.origin),
            scalar: over.scalar.or(self.scalar),
            z_index: over.z_index.or(self.z_index),
            delay: over.delay.or(self.delay),
            disable_for_reduced_motion: over
                .disable_for_reduced_motion
                .or(self.disable_for_reduced_motion),
        }
    }

    /// Floor and clamp the particle count so the renderer never sees a
    /// negative or fractional value.
    pub fn clamp_particle_count(&mut self) {
        if let Some(n) = self.particle_count {
            self.particle_count = Some(if n.is_finite() { n.floor().max(0.0) } else { 0.0 });
        }
    }

    pub fn with_colors<I, S>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.colors = Some(colors.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_shapes<I, S>(mut self, shapes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Shape>,
    {
        self.shapes = Some(shapes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_particle_count(mut self, n: f64) -> Self {
        self.particle_count = Some(n);
        self
    }

    pub fn with_delay(mut self, ms: f64) -> Self {
        self.delay = Some(ms);
        self
    }
}

macro_rules! timed_config {
    ($(#[$meta:meta])* $name:ident, $default_ms:expr) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
        #[serde(rename_all = "camelCase", default)]
        pub struct $name {
            #[serde(flatten)]
            pub burst: BurstConfig,
            /// Total run time in milliseconds.
            #[serde(skip_serializing_if = "Option::is_none")]
            pub duration: Option<f64>,
        }

        impl $name {
            pub const DEFAULT_DURATION_MS: f64 = $default_ms;

            pub fn duration_ms(&self) -> f64 {
                self.duration.unwrap_or(Self::DEFAULT_DURATION_MS)
            }

            pub fn with_duration(mut self, ms: f64) -> Self {
                self.duration = Some(ms);
                self
            }
        }

        impl From<BurstConfig> for $name {
            fn from(burst: BurstConfig) -> Self {
                Self {
                    burst,
                    duration: None,
                }
            }
        }
    };
}

timed_config!(FireworksConfig, FIREWORKS_DURATION_MS);
timed_config!(SnowConfig, SNOW_DURATION_MS);
timed_config!(PrideConfig, PRIDE_DURATION_MS);
timed_config!(
    /// Options for the smooth fade-out. Only `particle_count`, `ticks`,
    /// `gravity`, `colors` and `shapes` are read from `burst`.
    ResetConfig,
    RESET_DURATION_MS
);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetMode {
    #[default]
    Smooth,
    Instant,
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown reset mode `{0}`")]
pub struct UnknownResetMode(pub String);

impl FromStr for ResetMode {
    type Err = UnknownResetMode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "smooth" => Ok(ResetMode::Smooth),
            "instant" => Ok(ResetMode::Instant),
            other => Err(UnknownResetMode(other.to_string())),
        }
    }
}

impl ResetMode {
    /// Parse a caller-supplied mode; anything unrecognised warns and
    /// degrades to [`ResetMode::Instant`].
    pub fn parse_or_instant(s: &str) -> ResetMode {
        s.parse().unwrap_or_else(|e: UnknownResetMode| {
            log::warn!("{e}, resetting instantly");
            ResetMode::Instant
        })
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResetMode::Smooth => "smooth",
            ResetMode::Instant => "instant",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_floors_and_zeroes() {
        let mut c = BurstConfig::default().with_particle_count(12.9);
        c.clamp_particle_count();
        assert_eq!(c.particle_count, Some(12.0));

        let mut c = BurstConfig::default().with_particle_count(-3.2);
        c.clamp_particle_count();
        assert_eq!(c.particle_count, Some(0.0));

        let mut c = BurstConfig::default();
        c.clamp_particle_count();
        assert_eq!(c.particle_count, None);
    }

    #[test]
    fn reset_mode_parsing() {
        assert_eq!("smooth".parse::<ResetMode>(), Ok(ResetMode::Smooth));
        assert_eq!("instant".parse::<ResetMode>(), Ok(ResetMode::Instant));
        assert!("fade".parse::<ResetMode>().is_err());
        assert_eq!(ResetMode::parse_or_instant("fade"), ResetMode::Instant);
        assert_eq!(ResetMode::default(), ResetMode::Smooth);
    }

    #[test]
    fn timed_defaults() {
        assert_eq!(FireworksConfig::default().duration_ms(), 15_000.0);
        assert_eq!(ResetConfig::default().duration_ms(), 2000.0);
        assert_eq!(
            PrideConfig::default().with_duration(300.0).duration_ms(),
            300.0
        );
    }
}
