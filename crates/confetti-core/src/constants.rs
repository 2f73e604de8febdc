// Shared effect tuning constants used by the orchestrator and both front-ends.

// Built-in burst profile (mirrors canvas-confetti's own defaults)
pub const DEFAULT_PARTICLE_COUNT: f64 = 50.0;
pub const DEFAULT_ANGLE: f64 = 90.0;
pub const DEFAULT_SPREAD: f64 = 45.0;
pub const DEFAULT_START_VELOCITY: f64 = 45.0;
pub const DEFAULT_DECAY: f64 = 0.9;
pub const DEFAULT_GRAVITY: f64 = 1.0;
pub const DEFAULT_DRIFT: f64 = 0.0;
pub const DEFAULT_TICKS: f64 = 200.0;
pub const DEFAULT_SCALAR: f64 = 1.0;
pub const DEFAULT_Z_INDEX: i32 = 100;
pub const DEFAULT_ORIGIN: [f64; 2] = [0.5, 0.5];

pub const DEFAULT_COLORS: [&str; 7] = [
    "#26ccff", "#a25afd", "#ff5e7e", "#88ff5a", "#fcff42", "#ffa62d", "#ff36ff",
];

// Cannon
pub const CANNON_PARTICLE_COUNT: f64 = 100.0;

// Random direction (upper bounds are exclusive)
pub const RANDOM_COUNT_MAX: f64 = 300.0;
pub const RANDOM_SPREAD_MAX: f64 = 360.0;
pub const RANDOM_ANGLE_MAX: f64 = 360.0;

// Realistic: total particle budget split across five bursts
pub const REALISTIC_BUDGET: f64 = 200.0;
pub const REALISTIC_ORIGIN_Y: f64 = 0.7;

// Fireworks
pub const FIREWORKS_DURATION_MS: f64 = 15_000.0;
pub const FIREWORKS_INTERVAL_MS: f64 = 250.0;
pub const FIREWORKS_PEAK_COUNT: f64 = 50.0;
pub const FIREWORKS_START_VELOCITY: f64 = 30.0;
pub const FIREWORKS_SPREAD: f64 = 360.0;
pub const FIREWORKS_TICKS: f64 = 60.0;
pub const FIREWORKS_Z_INDEX: i32 = 0;
pub const FIREWORKS_LEFT_X: [f64; 2] = [0.1, 0.3];
pub const FIREWORKS_RIGHT_X: [f64; 2] = [0.7, 0.9];
pub const FIREWORKS_Y_LIFT: f64 = 0.2; // origin y = rand - lift, i.e. above center

// Stars
pub const STARS_PARTICLE_COUNT: f64 = 40.0;
pub const STARS_SCALAR: f64 = 1.2;
pub const STARS_SPREAD: f64 = 360.0;
pub const STARS_TICKS: f64 = 50.0;
pub const STARS_GRAVITY: f64 = 0.0;
pub const STARS_DECAY: f64 = 0.94;
pub const STARS_START_VELOCITY: f64 = 30.0;
pub const STARS_COLORS: [&str; 6] = [
    "#ffe400", "#ffbd00", "#e89400", "#ffca6c", "#fdffb8", "#ffffff",
];

// Circles / squares shortcuts
pub const SHAPE_SHORTCUT_PARTICLE_COUNT: f64 = 40.0;

// Snow
pub const SNOW_DURATION_MS: f64 = 15_000.0;
pub const SNOW_TICKS_MIN: f64 = 200.0;
pub const SNOW_TICKS_MAX: f64 = 500.0;
pub const SNOW_SKEW_START: f64 = 1.0;
pub const SNOW_SKEW_MIN: f64 = 0.8;
pub const SNOW_SKEW_STEP: f64 = 0.001;
pub const SNOW_Y_LIFT: f64 = 0.2;
pub const SNOW_GRAVITY: [f64; 2] = [0.4, 0.6];
pub const SNOW_SCALAR: [f64; 2] = [0.4, 1.0];
pub const SNOW_DRIFT: [f64; 2] = [-0.4, 0.4];
pub const SNOW_COLOR: &str = "#ffffff";

// Fall
pub const FALL_BURSTS: usize = 10;
pub const FALL_PARTICLE_COUNT: f64 = 10.0;
pub const FALL_GRAVITY: f64 = 0.8;
pub const FALL_TICKS: f64 = 1200.0;
pub const FALL_DECAY: f64 = 0.93;
pub const FALL_START_VELOCITY: f64 = 20.0;
pub const FALL_SCALAR: f64 = 1.1;
pub const FALL_ANGLE: f64 = 270.0; // straight down
pub const FALL_SPREAD: f64 = 30.0;
pub const FALL_DRIFT: [f64; 2] = [-0.5, 0.5];
pub const FALL_SHAPES: [&str; 5] = ["circle", "square", "star", "🍂", "🍁"];

// Pride
pub const PRIDE_DURATION_MS: f64 = 15_000.0;
pub const PRIDE_PARTICLE_COUNT: f64 = 2.0;
pub const PRIDE_SPREAD: f64 = 55.0;
pub const PRIDE_LEFT_ANGLE: f64 = 60.0;
pub const PRIDE_RIGHT_ANGLE: f64 = 120.0;
pub const PRIDE_COLORS: [&str; 6] = [
    "#e40303", "#ff8c00", "#ffed00", "#008026", "#004dff", "#750787",
];

// Infinite
pub const INFINITE_INTERVAL_MS: f64 = 1000.0;
pub const INFINITE_DURATION_MS: f64 = 5000.0;

// Smooth reset fade-out
pub const RESET_DURATION_MS: f64 = 2000.0;
pub const RESET_STEP_MS: f64 = 50.0;
pub const RESET_PARTICLE_COUNT: f64 = 3.0;
pub const RESET_TICKS: f64 = 50.0;
pub const RESET_GRAVITY: f64 = 0.5;

// Custom shapes
pub const SVG_TARGET_SIZE: f64 = 10.0; // path units after the auto-computed scale
pub const TEXT_SHAPE_SCALAR: f64 = 1.0;
