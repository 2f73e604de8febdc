//! Effect-specific burst presets.
//!
//! Pure functions: given the caller's overrides (and an RNG or timing state
//! where the effect needs one) they return the burst configs an effect fires.
//! Orchestrator defaults are merged in later, at fire time.

use crate::config::{BurstConfig, Origin, ResetConfig};
use crate::constants::*;
use crate::shape::Shape;
use rand::Rng;
use smallvec::SmallVec;

#[inline]
fn in_range<G: Rng>(rng: &mut G, range: [f64; 2]) -> f64 {
    rng.gen_range(range[0]..range[1])
}

fn palette(colors: &[&str]) -> Option<Vec<String>> {
    Some(colors.iter().map(|c| c.to_string()).collect())
}

pub fn cannon(overrides: &BurstConfig) -> BurstConfig {
    BurstConfig {
        particle_count: Some(CANNON_PARTICLE_COUNT),
        ..Default::default()
    }
    .merge(overrides)
}

pub fn random_direction<G: Rng>(rng: &mut G, overrides: &BurstConfig) -> BurstConfig {
    BurstConfig {
        particle_count: Some(rng.gen_range(0.0..RANDOM_COUNT_MAX).floor()),
        spread: Some(rng.gen_range(0.0..RANDOM_SPREAD_MAX).floor()),
        angle: Some(rng.gen_range(0.0..RANDOM_ANGLE_MAX).floor()),
        ..Default::default()
    }
    .merge(overrides)
}

/// (share of the budget, spread, start velocity, decay, scalar)
const REALISTIC_LAYERS: [(f64, f64, Option<f64>, Option<f64>, Option<f64>); 5] = [
    (0.25, 26.0, Some(55.0), None, None),
    (0.2, 60.0, None, None, None),
    (0.35, 100.0, None, Some(0.91), Some(0.8)),
    (0.1, 120.0, Some(25.0), Some(0.92), Some(1.2)),
    (0.1, 120.0, Some(45.0), None, None),
];

/// Five layered bursts sharing one particle budget. A `particle_count`
/// override sets the budget instead of a per-burst count.
pub fn realistic(overrides: &BurstConfig) -> SmallVec<[BurstConfig; 5]> {
    let budget = overrides.particle_count.unwrap_or(REALISTIC_BUDGET);
    let rest = BurstConfig {
        particle_count: None,
        ..overrides.clone()
    };
    REALISTIC_LAYERS
        .iter()
        .map(|&(ratio, spread, velocity, decay, scalar)| {
            BurstConfig {
                origin: Some(Origin::y(REALISTIC_ORIGIN_Y)),
                spread: Some(spread),
                start_velocity: velocity,
                decay,
                scalar,
                ..Default::default()
            }
            .merge(&rest)
            .with_particle_count((budget * ratio).floor())
        })
        .collect()
}

/// One fireworks tick: a burst from the left third and one from the right,
/// both thinning out linearly as the remaining time runs down.
pub fn fireworks_pair<G: Rng>(
    rng: &mut G,
    time_left: f64,
    duration: f64,
    overrides: &BurstConfig,
) -> [BurstConfig; 2] {
    let peak = overrides.particle_count.unwrap_or(FIREWORKS_PEAK_COUNT);
    let fraction = if duration > 0.0 { time_left / duration } else { 0.0 };
    let count = (peak * fraction).floor();
    let rest = BurstConfig {
        particle_count: None,
        ..overrides.clone()
    };
    let mut side = |x_range: [f64; 2]| {
        BurstConfig {
            start_velocity: Some(FIREWORKS_START_VELOCITY),
            spread: Some(FIREWORKS_SPREAD),
            ticks: Some(FIREWORKS_TICKS),
            z_index: Some(FIREWORKS_Z_INDEX),
            origin: Some(Origin::new(
                in_range(rng, x_range),
                rng.gen::<f64>() - FIREWORKS_Y_LIFT,
            )),
            ..Default::default()
        }
        .merge(&rest)
        .with_particle_count(count)
    };
    [side(FIREWORKS_LEFT_X), side(FIREWORKS_RIGHT_X)]
}

pub fn stars(overrides: &BurstConfig) -> BurstConfig {
    BurstConfig {
        shapes: Some(vec![Shape::Star]),
        colors: palette(&STARS_COLORS),
        particle_count: Some(STARS_PARTICLE_COUNT),
        scalar: Some(STARS_SCALAR),
        spread: Some(STARS_SPREAD),
        ticks: Some(STARS_TICKS),
        gravity: Some(STARS_GRAVITY),
        decay: Some(STARS_DECAY),
        start_velocity: Some(STARS_START_VELOCITY),
        ..Default::default()
    }
    .merge(overrides)
}

/// Single-shape shortcut; the shape always wins over any override.
pub fn shape_shortcut(shape: Shape, overrides: &BurstConfig) -> BurstConfig {
    let mut config = BurstConfig {
        particle_count: Some(SHAPE_SHORTCUT_PARTICLE_COUNT),
        ..Default::default()
    }
    .merge(overrides);
    config.shapes = Some(vec![shape]);
    config
}

/// Per-frame state of the snow loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Snowfall {
    pub skew: f64,
}

impl Default for Snowfall {
    fn default() -> Self {
        Self {
            skew: SNOW_SKEW_START,
        }
    }
}

impl Snowfall {
    /// One flake. Lifetime shortens and the launch band narrows as time runs
    /// out.
    pub fn next_flake<G: Rng>(
        &mut self,
        rng: &mut G,
        time_left: f64,
        duration: f64,
        overrides: &BurstConfig,
    ) -> BurstConfig {
        let fraction = if duration > 0.0 { time_left / duration } else { 0.0 };
        let ticks = SNOW_TICKS_MIN.max(SNOW_TICKS_MAX * fraction);
        self.skew = SNOW_SKEW_MIN.max(self.skew - SNOW_SKEW_STEP);
        BurstConfig {
            particle_count: Some(1.0),
            start_velocity: Some(0.0),
            ticks: Some(ticks),
            origin: Some(Origin::new(
                rng.gen::<f64>(),
                rng.gen::<f64>() * self.skew - SNOW_Y_LIFT,
            )),
            colors: palette(&[SNOW_COLOR]),
            shapes: Some(vec![Shape::Circle]),
            gravity: Some(in_range(rng, SNOW_GRAVITY)),
            scalar: Some(in_range(rng, SNOW_SCALAR)),
            drift: Some(in_range(rng, SNOW_DRIFT)),
            ..Default::default()
        }
        .merge(overrides)
    }
}

/// Ten bursts dropping from the top edge, each from its own random column.
pub fn fall<G: Rng>(rng: &mut G, overrides: &BurstConfig) -> Vec<BurstConfig> {
    (0..FALL_BURSTS)
        .map(|_| {
            BurstConfig {
                particle_count: Some(FALL_PARTICLE_COUNT),
                gravity: Some(FALL_GRAVITY),
                ticks: Some(FALL_TICKS),
                decay: Some(FALL_DECAY),
                start_velocity: Some(FALL_START_VELOCITY),
                scalar: Some(FALL_SCALAR),
                angle: Some(FALL_ANGLE),
                spread: Some(FALL_SPREAD),
                origin: Some(Origin::new(rng.gen::<f64>(), 0.0)),
                drift: Some(in_range(rng, FALL_DRIFT)),
                shapes: Some(FALL_SHAPES.iter().map(|s| Shape::from(*s)).collect()),
                ..Default::default()
            }
            .merge(overrides)
        })
        .collect()
}

/// One pride frame: two small mirrored bursts from the side edges.
pub fn pride_pair(overrides: &BurstConfig) -> [BurstConfig; 2] {
    let side = |angle: f64, x: f64| {
        BurstConfig {
            particle_count: Some(PRIDE_PARTICLE_COUNT),
            angle: Some(angle),
            spread: Some(PRIDE_SPREAD),
            origin: Some(Origin::x(x)),
            colors: palette(&PRIDE_COLORS),
            ..Default::default()
        }
        .merge(overrides)
    };
    [side(PRIDE_LEFT_ANGLE, 0.0), side(PRIDE_RIGHT_ANGLE, 1.0)]
}

/// Number of fade ticks for a smooth reset of `duration` milliseconds.
pub fn fade_steps(duration: f64) -> u32 {
    (duration / RESET_STEP_MS).ceil().max(1.0) as u32
}

/// Fade tick `step` (1-based) of `steps`: particles shrink linearly to zero.
pub fn fade_step(options: &ResetConfig, step: u32, steps: u32) -> BurstConfig {
    let o = &options.burst;
    BurstConfig {
        particle_count: Some(o.particle_count.unwrap_or(RESET_PARTICLE_COUNT)),
        ticks: Some(o.ticks.unwrap_or(RESET_TICKS)),
        gravity: Some(o.gravity.unwrap_or(RESET_GRAVITY)),
        colors: o.colors.clone(),
        shapes: o.shapes.clone(),
        scalar: Some(1.0 - step as f64 / steps as f64),
        ..Default::default()
    }
}
