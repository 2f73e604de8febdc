// Host-side tests for the named effects, driven by the virtual clock.

mod common;

use common::*;
use confetti_core::{
    BurstConfig, FireworksConfig, Origin, PrideConfig, Shape, ShapeKind, SnowConfig,
};

fn counts(bursts: &[Burst]) -> Vec<f64> {
    bursts
        .iter()
        .map(|b| b.config.particle_count.unwrap())
        .collect()
}

#[test]
fn cannon_is_one_hundred_particles_over_defaults() {
    let (confetti, rec, clock) = setup();
    confetti.cannon(BurstConfig::default());
    assert_eq!(rec.burst_count(), 0, "bursts are never fired synchronously");
    clock.advance(0.0);

    let bursts = rec.bursts();
    assert_eq!(bursts.len(), 1);
    let expected = confetti.defaults().merge(&BurstConfig::default().with_particle_count(100.0));
    assert_eq!(bursts[0].config, expected);
}

#[test]
fn cannon_honours_instance_defaults_and_overrides() {
    let (confetti, rec, clock) = setup_with(BurstConfig::default().with_colors(["#123456"]));
    confetti.cannon(BurstConfig {
        spread: Some(10.0),
        ..Default::default()
    });
    clock.advance(0.0);
    let b = &rec.bursts()[0].config;
    assert_eq!(b.colors, Some(vec!["#123456".to_string()]));
    assert_eq!(b.spread, Some(10.0));
    assert_eq!(b.particle_count, Some(100.0));
}

#[test]
fn cannon_waits_for_its_delay() {
    let (confetti, rec, clock) = setup();
    confetti.cannon(BurstConfig::default().with_delay(300.0));
    clock.advance(299.0);
    assert_eq!(rec.burst_count(), 0);
    clock.advance(1.0);
    assert_eq!(rec.burst_count(), 1);
    assert_eq!(rec.bursts()[0].at, 300.0);
    assert_eq!(rec.bursts()[0].config.delay, None);
}

#[test]
fn random_direction_stays_in_range() {
    let (confetti, rec, clock) = setup();
    for _ in 0..200 {
        confetti.random_direction(BurstConfig::default());
    }
    clock.advance(0.0);
    let bursts = rec.bursts();
    assert_eq!(bursts.len(), 200);
    for b in &bursts {
        let c = &b.config;
        let (n, s, a) = (
            c.particle_count.unwrap(),
            c.spread.unwrap(),
            c.angle.unwrap(),
        );
        assert!((0.0..300.0).contains(&n), "count {n}");
        assert!((0.0..360.0).contains(&s), "spread {s}");
        assert!((0.0..360.0).contains(&a), "angle {a}");
        assert_eq!(n.fract(), 0.0);
        assert_eq!(s.fract(), 0.0);
        assert_eq!(a.fract(), 0.0);
    }
}

#[test]
fn realistic_fires_five_layers_in_call_order() {
    let (confetti, rec, clock) = setup();
    confetti.realistic(BurstConfig::default());
    clock.advance(0.0);
    let bursts = rec.bursts();
    assert_eq!(counts(&bursts), vec![50.0, 40.0, 70.0, 20.0, 20.0]);
    let spreads: Vec<f64> = bursts.iter().map(|b| b.config.spread.unwrap()).collect();
    assert_eq!(spreads, vec![26.0, 60.0, 100.0, 120.0, 120.0]);
    assert!(bursts
        .iter()
        .all(|b| b.config.origin == Some(Origin::y(0.7))));
}

#[test]
fn stars_use_star_shape_and_gold_palette() {
    let (confetti, rec, clock) = setup();
    confetti.stars(BurstConfig::default());
    clock.advance(0.0);
    let c = &rec.bursts()[0].config;
    assert_eq!(c.shapes, Some(vec![Shape::Star]));
    assert_eq!(c.particle_count, Some(40.0));
    assert_eq!(c.scalar, Some(1.2));
    assert!(c.colors.as_ref().unwrap().contains(&"#ffe400".to_string()));
}

#[test]
fn circles_and_squares_force_their_shape() {
    let (confetti, rec, clock) = setup();
    confetti.circles(BurstConfig::default());
    confetti.squares(BurstConfig::default().with_shapes(["star"]));
    clock.advance(0.0);
    let b = rec.bursts();
    assert_eq!(b[0].config.shapes, Some(vec![Shape::Circle]));
    assert_eq!(b[1].config.shapes, Some(vec![Shape::Square]));
}

#[test]
fn fireworks_thin_out_and_stop() {
    let (confetti, rec, clock) = setup();
    confetti.fireworks(FireworksConfig::default());
    clock.advance(16_000.0);

    let bursts = rec.bursts();
    // ticks at 250..=14750 fire a pair; the tick at 15000 stops the loop
    assert_eq!(bursts.len(), 59 * 2);
    assert_eq!(bursts[0].at, 250.0);
    assert_eq!(bursts[0].config.particle_count, Some(49.0));
    let c = counts(&bursts);
    assert!(c.windows(2).all(|w| w[1] <= w[0]));
    for pair in bursts.chunks(2) {
        let lx = pair[0].config.origin.unwrap().x.unwrap();
        let rx = pair[1].config.origin.unwrap().x.unwrap();
        assert!((0.1..0.3).contains(&lx));
        assert!((0.7..0.9).contains(&rx));
    }
    assert!(!confetti.active_loops().interval);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn fireworks_particle_count_override_sets_the_peak() {
    let (confetti, rec, clock) = setup();
    confetti.fireworks(FireworksConfig {
        burst: BurstConfig::default().with_particle_count(100.0),
        duration: Some(1000.0),
    });
    clock.advance(250.0);
    assert_eq!(rec.bursts()[0].config.particle_count, Some(75.0));
}

#[test]
fn snow_emits_one_flake_per_frame_until_done() {
    let (confetti, rec, clock) = setup();
    confetti.snow(SnowConfig::default().with_duration(1000.0));
    clock.advance(2000.0);

    let bursts = rec.bursts();
    // frames at 16, 32, ... 1008; the last one sees no time left
    assert_eq!(bursts.len(), 63);
    for b in &bursts {
        let c = &b.config;
        assert_eq!(c.particle_count, Some(1.0));
        assert_eq!(c.start_velocity, Some(0.0));
        assert_eq!(c.colors, Some(vec!["#ffffff".to_string()]));
        assert!(c.ticks.unwrap() >= 200.0 && c.ticks.unwrap() <= 500.0);
        let g = c.gravity.unwrap();
        assert!((0.4..0.6).contains(&g));
    }
    assert!(!confetti.active_loops().frame);
    assert_eq!(clock.pending(), 0);
}

#[test]
fn snow_starts_after_its_delay() {
    let (confetti, rec, clock) = setup();
    confetti.snow(SnowConfig {
        burst: BurstConfig::default().with_delay(500.0),
        duration: Some(100.0),
    });
    clock.advance(500.0);
    assert_eq!(rec.burst_count(), 0);
    clock.advance(1000.0);
    let bursts = rec.bursts();
    assert!(!bursts.is_empty());
    assert!(bursts[0].at > 500.0);
    assert!(bursts.last().unwrap().at <= 500.0 + 100.0 + 16.0);
}

#[test]
fn pride_fires_mirrored_pairs_each_frame() {
    let (confetti, rec, clock) = setup();
    confetti.pride(PrideConfig::default().with_duration(100.0));
    clock.advance(500.0);

    let bursts = rec.bursts();
    assert_eq!(bursts.len(), 7 * 2);
    for pair in bursts.chunks(2) {
        assert_eq!(pair[0].at, pair[1].at);
        assert_eq!(pair[0].config.angle, Some(60.0));
        assert_eq!(pair[1].config.angle, Some(120.0));
        assert_eq!(pair[0].config.origin, Some(Origin::x(0.0)));
        assert_eq!(pair[1].config.origin, Some(Origin::x(1.0)));
        assert_eq!(pair[0].config.spread, Some(55.0));
        assert_eq!(pair[0].config.particle_count, Some(2.0));
    }
    assert!(!confetti.active_loops().frame);
}

#[test]
fn fall_drops_ten_bursts_with_resolved_shapes() {
    let (confetti, rec, clock) = setup();
    confetti.fall(BurstConfig::default());
    clock.advance(0.0);

    let bursts = rec.bursts();
    assert_eq!(bursts.len(), 10);
    for b in &bursts {
        let c = &b.config;
        assert_eq!(c.gravity, Some(0.8));
        assert_eq!(c.ticks, Some(1200.0));
        assert_eq!(c.decay, Some(0.93));
        assert_eq!(c.start_velocity, Some(20.0));
        assert_eq!(c.scalar, Some(1.1));
        let drift = c.drift.unwrap();
        assert!((-0.5..0.5).contains(&drift));
        let shapes = c.shapes.as_ref().unwrap();
        assert_eq!(&shapes[..3], &[Shape::Circle, Shape::Square, Shape::Star]);
        assert!(shapes[3..]
            .iter()
            .all(|s| matches!(s, Shape::Custom(d) if d.kind == ShapeKind::Bitmap)));
    }
    let xs: Vec<f64> = bursts
        .iter()
        .map(|b| b.config.origin.unwrap().x.unwrap())
        .collect();
    assert!(xs.windows(2).any(|w| w[0] != w[1]));
    assert_eq!(
        rec.log.borrow().texts,
        vec![("🍂".to_string(), 1.1), ("🍁".to_string(), 1.1)]
    );

    confetti.fall(BurstConfig::default());
    clock.advance(0.0);
    assert_eq!(rec.burst_count(), 20);
    assert_eq!(rec.log.borrow().texts.len(), 2);
}

#[test]
fn text_shapes_are_built_once_across_a_frame_loop() {
    let (confetti, rec, clock) = setup_with(BurstConfig::default().with_shapes(["🎉"]));
    confetti.pride(PrideConfig::default().with_duration(1000.0));
    clock.advance(2000.0);

    let bursts = rec.bursts();
    assert!(bursts.len() > 50);
    let first = bursts[0].config.shapes.clone();
    assert!(matches!(first.as_deref(), Some([Shape::Custom(d)]) if d.kind == ShapeKind::Bitmap));
    assert!(bursts.iter().all(|b| b.config.shapes == first));
    assert_eq!(rec.log.borrow().texts, vec![("🎉".to_string(), 1.0)]);
}

#[test]
fn unknown_names_in_options_fall_back_to_circle() {
    let (confetti, rec, clock) = setup();
    confetti.cannon(BurstConfig::default().with_shapes(["triangle", "star"]));
    clock.advance(0.0);
    assert_eq!(
        rec.bursts()[0].config.shapes,
        Some(vec![Shape::Circle, Shape::Star])
    );
    assert!(rec.log.borrow().texts.is_empty());
}

#[test]
fn custom_shape_draws_any_text_that_is_not_a_builtin() {
    let (confetti, rec, clock) = setup();
    confetti.custom_shape(["star", "triangle", "🦄", ""], BurstConfig::default());
    clock.advance(0.0);
    let shapes = rec.bursts()[0].config.shapes.clone().unwrap();
    assert_eq!(shapes.len(), 4);
    assert_eq!(shapes[0], Shape::Star);
    assert!(matches!(shapes[1], Shape::Custom(d) if d.kind == ShapeKind::Bitmap));
    assert!(matches!(shapes[2], Shape::Custom(d) if d.kind == ShapeKind::Bitmap));
    assert_eq!(shapes[3], Shape::Circle);
    assert_eq!(
        rec.log.borrow().texts,
        vec![("triangle".to_string(), 1.0), ("🦄".to_string(), 1.0)]
    );
}

#[test]
fn custom_shape_draws_letters_and_digits() {
    let (confetti, rec, clock) = setup();
    let big = BurstConfig {
        scalar: Some(2.0),
        ..Default::default()
    };
    confetti.custom_shape(["A", "2024"], big.clone());
    confetti.custom_shape(["A"], big);
    clock.advance(0.0);

    let bursts = rec.bursts();
    let shapes = bursts[0].config.shapes.clone().unwrap();
    assert_eq!(shapes.len(), 2);
    assert!(shapes
        .iter()
        .all(|s| matches!(s, Shape::Custom(d) if d.kind == ShapeKind::Bitmap)));
    assert_ne!(shapes[0], shapes[1]);
    assert_eq!(bursts[1].config.shapes, Some(vec![shapes[0].clone()]));
    assert_eq!(
        rec.log.borrow().texts,
        vec![("A".to_string(), 2.0), ("2024".to_string(), 2.0)]
    );
}

#[test]
fn custom_shape_from_svg_drops_unresolvable_markup() {
    let (confetti, rec, clock) = setup();
    let heart = r#"<svg viewBox="0 0 20 20"><path d="M10 3L17 17H3Z"/></svg>"#;
    let empty = r#"<svg viewBox="0 0 20 20"><circle r="4"/></svg>"#;
    confetti.custom_shape_from_svg([heart, empty], BurstConfig::default());
    clock.advance(0.0);

    let shapes = rec.bursts()[0].config.shapes.clone().unwrap();
    assert_eq!(shapes.len(), 1);
    assert!(matches!(shapes[0], Shape::Custom(d) if d.kind == ShapeKind::Path));
    let log = rec.log.borrow();
    assert_eq!(log.paths.len(), 1);
    assert_eq!(log.paths[0].0, "M10 3L17 17H3Z");
    assert_eq!(log.paths[0].1, Some([0.5, 0.0, 0.0, 0.5, 0.0, 0.0]));
}

#[test]
fn custom_shape_with_nothing_resolvable_uses_default_shapes() {
    let (confetti, rec, clock) = setup();
    confetti.custom_shape_from_svg(["<svg></svg>"], BurstConfig::default());
    clock.advance(0.0);
    assert_eq!(
        rec.bursts()[0].config.shapes,
        Some(vec![Shape::Square, Shape::Circle])
    );
}

#[test]
fn dispatched_counts_are_floored_and_never_negative() {
    let (confetti, rec, clock) = setup();
    confetti.custom(BurstConfig::default().with_particle_count(-5.5));
    confetti.custom(BurstConfig::default().with_particle_count(7.9));
    clock.advance(0.0);
    assert_eq!(counts(&rec.bursts()), vec![0.0, 7.0]);
}

#[test]
fn out_of_range_values_pass_through() {
    let (confetti, rec, clock) = setup();
    confetti.custom(BurstConfig {
        angle: Some(720.0),
        origin: Some(Origin::new(-1.0, 2.0)),
        ..Default::default()
    });
    clock.advance(0.0);
    let c = &rec.bursts()[0].config;
    assert_eq!(c.angle, Some(720.0));
    assert_eq!(c.origin, Some(Origin::new(-1.0, 2.0)));
}
