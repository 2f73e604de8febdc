//! The effect orchestrator.
//!
//! [`Confetti`] owns the merged defaults, the optional surface binding and
//! every scheduling handle it creates. All methods return immediately; the
//! visual work happens in scheduler callbacks. Callbacks hold a `Weak`
//! reference, so dropping the orchestrator cancels everything it scheduled.

use crate::config::{
    BurstConfig, FireworksConfig, PrideConfig, ResetConfig, ResetMode, SnowConfig,
};
use crate::constants::{
    FIREWORKS_INTERVAL_MS, INFINITE_DURATION_MS, INFINITE_INTERVAL_MS, RESET_STEP_MS,
    TEXT_SHAPE_SCALAR,
};
use crate::effect::Effect;
use crate::presets;
use crate::renderer::{BindOptions, BoundRenderer, Renderer};
use crate::scheduler::{FrameId, Scheduler, TimerId};
use crate::shape::{Shape, ShapeCache};
use fnv::FnvHashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

type FrameStep<R, S> = Rc<RefCell<dyn FnMut(&Rc<Inner<R, S>>) -> bool>>;

#[derive(Clone, Copy)]
enum IntervalSlot {
    Repeat,
    Effect,
}

/// Which loops and timers are currently live.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ActiveLoops {
    /// Interval driving `infinite`.
    pub repeat: bool,
    /// Interval owned by an effect (fireworks, smooth reset fade).
    pub interval: bool,
    /// Frame-driven loop (snow, pride).
    pub frame: bool,
    /// Delayed one-shot bursts not yet fired.
    pub pending_bursts: usize,
}

impl ActiveLoops {
    pub fn is_idle(&self) -> bool {
        !self.repeat && !self.interval && !self.frame && self.pending_bursts == 0
    }
}

pub struct Confetti<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    inner: Rc<Inner<R, S>>,
}

/// Handles share one orchestrator.
impl<R, S> Clone for Confetti<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

struct Inner<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    renderer: R,
    scheduler: S,
    defaults: BurstConfig,
    shapes: RefCell<ShapeCache>,
    surface: RefCell<Option<R::Bound>>,
    repeat: Cell<Option<TimerId>>,
    interval: Cell<Option<TimerId>>,
    frame: Cell<Option<FrameId>>,
    frame_generation: Cell<u64>,
    timers: RefCell<FnvHashMap<u64, TimerId>>,
    next_timer_key: Cell<u64>,
    rng: RefCell<StdRng>,
}

impl<R, S> Confetti<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    /// Builds an orchestrator whose defaults are the built-in profile
    /// overlaid with `defaults`.
    pub fn new(renderer: R, scheduler: S, defaults: BurstConfig) -> Self {
        Self::with_rng(renderer, scheduler, defaults, StdRng::from_entropy())
    }

    /// Like [`Confetti::new`] but with a reproducible random sequence.
    pub fn with_seed(renderer: R, scheduler: S, defaults: BurstConfig, seed: u64) -> Self {
        Self::with_rng(renderer, scheduler, defaults, StdRng::seed_from_u64(seed))
    }

    fn with_rng(renderer: R, scheduler: S, defaults: BurstConfig, rng: StdRng) -> Self {
        let defaults = BurstConfig::builtin().merge(&defaults);
        Self {
            inner: Rc::new(Inner {
                renderer,
                scheduler,
                defaults,
                shapes: RefCell::new(ShapeCache::default()),
                surface: RefCell::new(None),
                repeat: Cell::new(None),
                interval: Cell::new(None),
                frame: Cell::new(None),
                frame_generation: Cell::new(0),
                timers: RefCell::new(FnvHashMap::default()),
                next_timer_key: Cell::new(0),
                rng: RefCell::new(rng),
            }),
        }
    }

    pub fn defaults(&self) -> &BurstConfig {
        &self.inner.defaults
    }

    pub fn active_loops(&self) -> ActiveLoops {
        let inner = &self.inner;
        ActiveLoops {
            repeat: inner.repeat.get().is_some(),
            interval: inner.interval.get().is_some(),
            frame: inner.frame.get().is_some(),
            pending_bursts: inner.timers.borrow().len(),
        }
    }

    pub fn has_surface(&self) -> bool {
        self.inner.surface.borrow().is_some()
    }

    pub fn custom(&self, config: BurstConfig) {
        self.inner.fire_one_delayed(config);
    }

    pub fn cannon(&self, overrides: BurstConfig) {
        self.inner.fire_one_delayed(presets::cannon(&overrides));
    }

    pub fn random_direction(&self, overrides: BurstConfig) {
        let config = presets::random_direction(&mut *self.inner.rng.borrow_mut(), &overrides);
        self.inner.fire_one_delayed(config);
    }

    pub fn realistic(&self, overrides: BurstConfig) {
        for burst in presets::realistic(&overrides) {
            self.inner.fire_one_delayed(burst);
        }
    }

    pub fn fireworks(&self, options: FireworksConfig) {
        let duration = options.duration_ms();
        let end = self.inner.scheduler.now() + duration;
        let overrides = options.burst;
        log::debug!("fireworks for {duration}ms");
        self.inner.start_interval(FIREWORKS_INTERVAL_MS, move |inner| {
            let time_left = end - inner.scheduler.now();
            if time_left <= 0.0 {
                return false;
            }
            let pair = presets::fireworks_pair(
                &mut *inner.rng.borrow_mut(),
                time_left,
                duration,
                &overrides,
            );
            for burst in &pair {
                inner.fire_one(burst);
            }
            true
        });
    }

    pub fn stars(&self, overrides: BurstConfig) {
        self.inner.fire_one_delayed(presets::stars(&overrides));
    }

    pub fn circles(&self, overrides: BurstConfig) {
        self.inner
            .fire_one_delayed(presets::shape_shortcut(Shape::Circle, &overrides));
    }

    pub fn squares(&self, overrides: BurstConfig) {
        self.inner
            .fire_one_delayed(presets::shape_shortcut(Shape::Square, &overrides));
    }

    /// One flake per frame, starting after `delay`. The duration is counted
    /// from the first frame.
    pub fn snow(&self, options: SnowConfig) {
        let delay = options.burst.delay.unwrap_or(0.0);
        let duration = options.duration_ms();
        let overrides = BurstConfig {
            delay: None,
            ..options.burst
        };
        log::debug!("snow for {duration}ms after {delay}ms");
        self.inner.after(delay, move |inner| {
            let end = inner.scheduler.now() + duration;
            let mut snowfall = presets::Snowfall::default();
            inner.start_frame_loop(move |inner| {
                let time_left = end - inner.scheduler.now();
                let flake = snowfall.next_flake(
                    &mut *inner.rng.borrow_mut(),
                    time_left,
                    duration,
                    &overrides,
                );
                inner.fire_one(&flake);
                time_left > 0.0
            });
        });
    }

    pub fn fall(&self, overrides: BurstConfig) {
        let bursts = presets::fall(&mut *self.inner.rng.borrow_mut(), &overrides);
        for burst in bursts {
            self.inner.fire_one_delayed(burst);
        }
    }

    pub fn pride(&self, options: PrideConfig) {
        let duration = options.duration_ms();
        let end = self.inner.scheduler.now() + duration;
        let pair = presets::pride_pair(&options.burst);
        log::debug!("pride for {duration}ms");
        self.inner.start_frame_loop(move |inner| {
            for burst in &pair {
                inner.fire_one(burst);
            }
            inner.scheduler.now() < end
        });
    }

    /// Fire one burst drawn with `shapes`: built-in names, SVG markup, or
    /// any other text, which is drawn as-is. Shapes are resolved before the
    /// burst is scheduled.
    pub fn custom_shape<I, T>(&self, shapes: I, overrides: BurstConfig)
    where
        I: IntoIterator<Item = T>,
        T: Into<Shape>,
    {
        let scalar = self.text_scalar(&overrides);
        let resolved: Vec<Shape> = {
            let mut cache = self.inner.shapes.borrow_mut();
            shapes
                .into_iter()
                .map(Into::into)
                .filter_map(|shape| match shape {
                    Shape::Text(text) if !text.is_empty() => {
                        Some(cache.text(&self.inner.renderer, &text, scalar))
                    }
                    other => cache.resolve(&self.inner.renderer, &other, scalar),
                })
                .collect()
        };
        self.fire_resolved(resolved, overrides);
    }

    /// Like [`Confetti::custom_shape`] but every input is treated as SVG.
    /// Inputs without a `<path d=...>` are dropped.
    pub fn custom_shape_from_svg<I, T>(&self, svgs: I, overrides: BurstConfig)
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        let shapes: Vec<Shape> = svgs.into_iter().map(|s| Shape::Svg(s.into())).collect();
        let scalar = self.text_scalar(&overrides);
        let resolved =
            self.inner
                .shapes
                .borrow_mut()
                .resolve_all(&self.inner.renderer, &shapes, scalar);
        self.fire_resolved(resolved, overrides);
    }

    fn text_scalar(&self, overrides: &BurstConfig) -> f64 {
        overrides
            .scalar
            .or(self.inner.defaults.scalar)
            .unwrap_or(TEXT_SHAPE_SCALAR)
    }

    fn fire_resolved(&self, resolved: Vec<Shape>, overrides: BurstConfig) {
        let shapes = if resolved.is_empty() {
            None
        } else {
            Some(resolved)
        };
        self.inner.fire_one_delayed(BurstConfig {
            shapes,
            ..overrides
        });
    }

    /// Invoke one named effect with `options`.
    pub fn run(&self, effect: Effect, options: BurstConfig) {
        self.inner.run(effect, options);
    }

    /// Re-run `effect` every `interval` ms until `duration` ms have elapsed.
    /// Replaces any earlier `infinite` loop.
    pub fn infinite(
        &self,
        effect: Effect,
        interval: Option<f64>,
        duration: Option<f64>,
        options: BurstConfig,
    ) {
        let interval = interval.unwrap_or(INFINITE_INTERVAL_MS);
        let duration = duration.unwrap_or(INFINITE_DURATION_MS);
        let start = self.inner.scheduler.now();
        log::debug!("infinite {effect} every {interval}ms for {duration}ms");
        self.inner.start_repeat(interval, move |inner| {
            if inner.scheduler.now() - start > duration {
                return false;
            }
            inner.run(effect, options.clone());
            true
        });
    }

    pub fn reset(&self, mode: ResetMode, options: ResetConfig) {
        self.inner.reset(mode, options);
    }

    /// Route later bursts to `surface`, or back to the default surface
    /// with `None`. A new binding replaces the previous one.
    pub fn custom_canvas(&self, surface: Option<R::Surface>) {
        let bound = surface.map(|s| self.inner.renderer.bind(s, BindOptions { resize: true }));
        log::debug!(
            "surface binding {}",
            if bound.is_some() { "set" } else { "cleared" }
        );
        *self.inner.surface.borrow_mut() = bound;
    }
}

impl<R, S> Inner<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    fn fire_one(&self, config: &BurstConfig) {
        let mut merged = self.defaults.merge(config);
        merged.delay = None;
        if let Some(shapes) = merged.shapes.take() {
            let shapes = if shapes.iter().all(Shape::is_resolved) {
                shapes
            } else {
                let scalar = merged.scalar.unwrap_or(TEXT_SHAPE_SCALAR);
                self.shapes
                    .borrow_mut()
                    .resolve_all(&self.renderer, &shapes, scalar)
            };
            merged.shapes = (!shapes.is_empty()).then_some(shapes);
        }
        merged.clamp_particle_count();
        match self.surface.borrow().as_ref() {
            Some(bound) => bound.render(&merged),
            None => self.renderer.render(&merged),
        }
    }

    fn fire_one_delayed(self: &Rc<Self>, config: BurstConfig) {
        let delay = config.delay.unwrap_or(0.0);
        self.after(delay, move |inner| inner.fire_one(&config));
    }

    /// Tracked one-shot timer; `reset` cancels whatever has not fired yet.
    fn after(self: &Rc<Self>, delay_ms: f64, f: impl FnOnce(&Rc<Self>) + 'static) {
        let key = self.next_timer_key.get();
        self.next_timer_key.set(key.wrapping_add(1));
        let weak = Rc::downgrade(self);
        let id = self.scheduler.set_timeout(
            delay_ms.max(0.0),
            Box::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.timers.borrow_mut().remove(&key);
                    f(&inner);
                }
            }),
        );
        self.timers.borrow_mut().insert(key, id);
    }

    fn cancel_timers(&self) {
        let timers: Vec<TimerId> = self.timers.borrow_mut().drain().map(|(_, id)| id).collect();
        for id in timers {
            self.scheduler.clear_timeout(id);
        }
    }

    fn start_interval(self: &Rc<Self>, period_ms: f64, tick: impl FnMut(&Rc<Self>) -> bool + 'static) {
        self.stop_interval();
        let id = self.spawn_interval(period_ms, tick, IntervalSlot::Effect);
        self.interval.set(Some(id));
    }

    fn start_repeat(self: &Rc<Self>, period_ms: f64, tick: impl FnMut(&Rc<Self>) -> bool + 'static) {
        self.stop_repeat();
        let id = self.spawn_interval(period_ms, tick, IntervalSlot::Repeat);
        self.repeat.set(Some(id));
    }

    /// Interval that clears itself (and its slot) once `tick` returns false.
    fn spawn_interval(
        self: &Rc<Self>,
        period_ms: f64,
        mut tick: impl FnMut(&Rc<Self>) -> bool + 'static,
        slot: IntervalSlot,
    ) -> TimerId {
        let weak: Weak<Self> = Rc::downgrade(self);
        let own_id: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let own_id_tick = own_id.clone();
        let id = self.scheduler.set_interval(
            period_ms,
            Box::new(move || {
                let Some(inner) = weak.upgrade() else {
                    return;
                };
                if tick(&inner) {
                    return;
                }
                if let Some(id) = own_id_tick.get() {
                    inner.scheduler.clear_interval(id);
                    let slot = inner.slot(slot);
                    if slot.get() == Some(id) {
                        slot.set(None);
                    }
                }
            }),
        );
        own_id.set(Some(id));
        id
    }

    fn slot(&self, slot: IntervalSlot) -> &Cell<Option<TimerId>> {
        match slot {
            IntervalSlot::Repeat => &self.repeat,
            IntervalSlot::Effect => &self.interval,
        }
    }

    fn stop_interval(&self) {
        if let Some(id) = self.interval.take() {
            self.scheduler.clear_interval(id);
        }
    }

    fn stop_repeat(&self) {
        if let Some(id) = self.repeat.take() {
            self.scheduler.clear_interval(id);
        }
    }

    fn start_frame_loop(self: &Rc<Self>, step: impl FnMut(&Rc<Self>) -> bool + 'static) {
        self.stop_frame_loop();
        let generation = self.frame_generation.get();
        let step: FrameStep<R, S> = Rc::new(RefCell::new(step));
        self.schedule_frame(generation, step);
    }

    fn schedule_frame(self: &Rc<Self>, generation: u64, step: FrameStep<R, S>) {
        let weak = Rc::downgrade(self);
        let id = self.scheduler.request_frame(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.frame_generation.get() != generation {
                return;
            }
            let keep_going = {
                let mut f = step.borrow_mut();
                (*f)(&inner)
            };
            if inner.frame_generation.get() != generation {
                return;
            }
            if keep_going {
                inner.schedule_frame(generation, step);
            } else {
                inner.frame.set(None);
            }
        }));
        self.frame.set(Some(id));
    }

    /// Frames already queued for the old loop see a stale generation and
    /// do nothing.
    fn stop_frame_loop(&self) {
        self.frame_generation
            .set(self.frame_generation.get().wrapping_add(1));
        if let Some(id) = self.frame.take() {
            self.scheduler.cancel_frame(id);
        }
    }

    fn run(self: &Rc<Self>, effect: Effect, options: BurstConfig) {
        let confetti = Confetti {
            inner: self.clone(),
        };
        match effect {
            Effect::Cannon => confetti.cannon(options),
            Effect::RandomDirection => confetti.random_direction(options),
            Effect::Realistic => confetti.realistic(options),
            Effect::Fireworks => confetti.fireworks(options.into()),
            Effect::Stars => confetti.stars(options),
            Effect::Circles => confetti.circles(options),
            Effect::Squares => confetti.squares(options),
            Effect::Snow => confetti.snow(options.into()),
            Effect::Fall => confetti.fall(options),
            Effect::Pride => confetti.pride(options.into()),
        }
    }

    fn reset(self: &Rc<Self>, mode: ResetMode, options: ResetConfig) {
        log::debug!("reset ({mode})");
        self.stop_frame_loop();
        self.cancel_timers();
        self.stop_repeat();
        match mode {
            ResetMode::Instant => {
                self.stop_interval();
                self.renderer.clear_all();
            }
            ResetMode::Smooth => {
                let steps = presets::fade_steps(options.duration_ms());
                let mut step = 0;
                self.start_interval(RESET_STEP_MS, move |inner| {
                    step += 1;
                    inner.fire_one(&presets::fade_step(&options, step, steps));
                    if step < steps {
                        return true;
                    }
                    inner.renderer.clear_all();
                    false
                });
            }
        }
    }
}

impl<R, S> Drop for Inner<R, S>
where
    R: Renderer + 'static,
    R::Bound: 'static,
    S: Scheduler + 'static,
{
    fn drop(&mut self) {
        self.stop_frame_loop();
        self.stop_repeat();
        self.stop_interval();
        self.cancel_timers();
    }
}
