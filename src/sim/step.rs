//! Per-frame simulation step
//!
//! Advances every body by `elapsed * simulation_speed`, bounces them off the
//! boundary and splits off duplicates. Duplicates go into a side buffer and
//! are appended only after the full pass, so they are never advanced in the
//! frame that created them.

use glam::Vec2;

use super::body::{Body, BodyStore};
use super::collision::{boundary_collision, clamp_speed, reflect_velocity, BoundaryContact};
use super::color::recolor;
use super::config::SimConfig;
use super::random::RandomSource;

/// Told once per wall collision, in body order. Fire-and-forget.
pub trait CollisionNotifier {
    fn on_collision(&mut self);
}

impl<F: FnMut()> CollisionNotifier for F {
    fn on_collision(&mut self) {
        self()
    }
}

/// Notifier that only counts
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CollisionCounter {
    pub count: u64,
}

impl CollisionNotifier for CollisionCounter {
    fn on_collision(&mut self) {
        self.count += 1;
    }
}

/// What happened during one step
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Wall collisions detected
    pub collisions: usize,
    /// Duplicates appended to the store
    pub spawned: usize,
    /// Duplicates not created because the population cap was reached
    pub dropped: usize,
}

/// Advance the store by one frame.
///
/// Never fails: degenerate vectors fall back to zero and the frame continues.
pub fn step<R, N>(
    store: &mut BodyStore,
    elapsed: f32,
    config: &SimConfig,
    rng: &mut R,
    notifier: &mut N,
) -> StepReport
where
    R: RandomSource + ?Sized,
    N: CollisionNotifier + ?Sized,
{
    let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
    let dt = elapsed * config.simulation_speed;

    let room = store.capacity_left();
    let mut report = StepReport::default();
    let mut spawned: Vec<Body> = Vec::new();

    for body in store.bodies_mut() {
        // --- GRAVITY + INTEGRATE ---
        body.vel.y -= config.gravity * dt;
        body.pos += body.vel * dt;

        // --- BOUNDARY ---
        if let Some(contact) = boundary_collision(body.pos, body.radius, config.boundary_radius) {
            report.collisions += 1;
            notifier.on_collision();

            bounce(body, &contact, config, rng);

            if spawned.len() < room {
                spawned.push(body.split(config));
            } else {
                report.dropped += 1;
            }
        }

        settle(body, config);
    }

    // Duplicates share the parent's position, so this only finalizes their
    // color and clamps their speed; they are not integrated this frame.
    for body in &mut spawned {
        settle(body, config);
    }
    report.spawned = spawned.len();
    store.extend(spawned);

    if report.dropped > 0 {
        log::debug!(
            "Population cap {} reached, dropped {} duplicates",
            store.max_bodies(),
            report.dropped
        );
    }

    report
}

/// Collision response: clamp onto the wall, reflect, blend toward the center
/// with jitter, renormalize, then scale by the ratcheted momentum.
fn bounce<R: RandomSource + ?Sized>(
    body: &mut Body,
    contact: &BoundaryContact,
    config: &SimConfig,
    rng: &mut R,
) {
    body.pos = contact.clamped;

    let normal = if config.normal_from_clamped {
        contact.unit_normal()
    } else {
        contact.normal()
    };

    let reflected = reflect_velocity(body.vel, normal);
    let center = -normal;
    let jitter = Vec2::new(rng.uniform(-1.0, 1.0), rng.uniform(-1.0, 1.0)) * config.random_factor;

    let blended =
        reflected * (1.0 - config.center_bias) + center * config.center_bias + jitter;
    let direction = blended.normalize_or_zero();

    body.added_momentum =
        (body.added_momentum + config.momentum_increment).min(config.max_added_momentum);
    let total_momentum = config.base_momentum + body.added_momentum;
    body.vel = direction * total_momentum;
}

/// End-of-frame bookkeeping: recolor from distance and clamp speed
fn settle(body: &mut Body, config: &SimConfig) {
    body.color = recolor(body.color, body.pos.length(), config.boundary_radius);

    body.vel = clamp_speed(body.vel, config.max_speed);
    if !body.vel.is_finite() {
        body.vel = Vec2::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polar_to_cartesian;
    use crate::sim::random::SimRng;
    use glam::Vec3;
    use proptest::prelude::*;

    const EPS: f32 = 1e-4;

    /// Always returns the midpoint, so bounce jitter is zero
    struct Midpoint;

    impl RandomSource for Midpoint {
        fn uniform(&mut self, lo: f32, hi: f32) -> f32 {
            (lo + hi) * 0.5
        }
    }

    fn body_at(pos: Vec2, vel: Vec2) -> Body {
        Body::new(pos, 0.05, 1.05).with_velocity(vel)
    }

    fn store_with(bodies: impl IntoIterator<Item = Body>, cap: usize) -> BodyStore {
        let mut store = BodyStore::new(cap);
        store.extend(bodies);
        store
    }

    fn contained(body: &Body, config: &SimConfig) -> bool {
        body.pos.length() + body.radius <= config.boundary_radius + EPS
    }

    #[test]
    fn test_body_at_rest_at_center() {
        let config = SimConfig::default();
        let mut store = store_with([body_at(Vec2::ZERO, Vec2::ZERO)], 10);
        let mut counter = CollisionCounter::default();

        let report = step(&mut store, 0.0, &config, &mut Midpoint, &mut counter);

        assert_eq!(report, StepReport::default());
        assert_eq!(counter.count, 0);
        let body = &store.bodies()[0];
        assert_eq!(body.pos, Vec2::ZERO);
        assert_eq!(body.vel, Vec2::ZERO);
        assert_eq!(body.color, Vec3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_gravity_and_integration() {
        let config = SimConfig::default();
        let mut store = store_with([body_at(Vec2::ZERO, Vec2::new(0.2, 0.0))], 10);

        step(&mut store, 0.1, &config, &mut Midpoint, &mut || {});

        let dt = 0.1 * config.simulation_speed;
        let body = &store.bodies()[0];
        let vy = -config.gravity * dt;
        assert!((body.vel.y - vy).abs() < 1e-6);
        assert!((body.pos.x - 0.2 * dt).abs() < 1e-6);
        assert!((body.pos.y - vy * dt).abs() < 1e-6);
    }

    #[test]
    fn test_single_collision_spawns_one_duplicate() {
        let config = SimConfig::default();
        let start = config.boundary_radius - config.body_radius + 0.001;
        let mut store = store_with([body_at(Vec2::new(start, 0.0), Vec2::new(0.5, 0.0))], 10);
        let mut hits = 0;

        let report = step(&mut store, 0.016, &config, &mut SimRng::new(1), &mut || hits += 1);

        assert_eq!(hits, 1);
        assert_eq!(report.collisions, 1);
        assert_eq!(report.spawned, 1);
        assert_eq!(store.len(), 2);
        for body in store.iter() {
            assert!(contained(body, &config));
        }
        let (parent, child) = (&store.bodies()[0], &store.bodies()[1]);
        assert_eq!(child.pos, parent.pos);
        assert_eq!(child.added_momentum, config.base_momentum);
        assert!((parent.added_momentum - 1.10).abs() < 1e-6);
    }

    #[test]
    fn test_duplicate_is_not_advanced_in_same_frame() {
        let config = SimConfig::default();
        let start = config.boundary_radius - config.body_radius + 0.01;
        let mut store = store_with([body_at(Vec2::new(start, 0.0), Vec2::new(0.2, 0.0))], 10);

        step(&mut store, 0.016, &config, &mut Midpoint, &mut || {});

        let (parent, child) = (&store.bodies()[0], &store.bodies()[1]);
        // Same spot: the child was copied after the parent's bounce and not moved
        assert_eq!(child.pos, parent.pos);
        assert_eq!(child.color, parent.color);
    }

    #[test]
    fn test_bounce_without_jitter_heads_inward() {
        let config = SimConfig::default();
        let start = config.boundary_radius - config.body_radius + 0.001;
        let mut store = store_with([body_at(Vec2::new(start, 0.0), Vec2::new(1.0, 0.0))], 10);

        step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        let body = &store.bodies()[0];
        // Head-on hit with zero jitter: straight back toward the center
        assert!(body.vel.x < 0.0);
        assert!(body.vel.y.abs() < 1e-5);
        // 1.05 + 1.10 = 2.15 stays under the clamp
        assert!((body.speed() - 2.15).abs() < 1e-4);
        // Duplicate: 2.15 * 0.95
        assert!((store.bodies()[1].speed() - 2.15 * 0.95).abs() < 1e-4);
    }

    #[test]
    fn test_cap_blocks_duplicates() {
        let config = SimConfig::default();
        let r = config.boundary_radius - config.body_radius + 0.01;
        let bodies = (0..config.max_bodies).map(|i| {
            let theta = i as f32 / config.max_bodies as f32 * std::f32::consts::TAU;
            body_at(polar_to_cartesian(r, theta), polar_to_cartesian(0.5, theta))
        });
        let mut store = store_with(bodies, config.max_bodies);
        assert_eq!(store.len(), 1000);

        let mut counter = CollisionCounter::default();
        let report = step(&mut store, 0.016, &config, &mut SimRng::new(5), &mut counter);

        assert_eq!(counter.count, 1000);
        assert_eq!(report.spawned, 0);
        assert_eq!(report.dropped, 1000);
        assert_eq!(store.len(), 1000);
    }

    #[test]
    fn test_cap_partially_reached() {
        let config = SimConfig::default();
        let r = config.boundary_radius - config.body_radius + 0.01;
        let bodies = (0..4).map(|i| {
            let theta = i as f32 * 1.5;
            body_at(polar_to_cartesian(r, theta), Vec2::ZERO)
        });
        let mut store = store_with(bodies, 6);

        let report = step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        assert_eq!(report.collisions, 4);
        assert_eq!(report.spawned, 2);
        assert_eq!(report.dropped, 2);
        assert_eq!(store.len(), 6);
    }

    #[test]
    fn test_momentum_at_cap_stays_capped() {
        let config = SimConfig::default();
        let start = config.boundary_radius - config.body_radius + 0.001;
        let mut body = body_at(Vec2::new(start, 0.0), Vec2::new(1.0, 0.0));
        body.added_momentum = 5.0;
        let mut store = store_with([body], 10);

        step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        let body = &store.bodies()[0];
        assert_eq!(body.added_momentum, 5.0);
        // 6.05 before the clamp, 2.5 after
        assert!((body.speed() - config.max_speed).abs() < 1e-4);
    }

    #[test]
    fn test_momentum_at_cap_scales_speed_before_clamp() {
        let config = SimConfig {
            max_speed: 100.0,
            ..Default::default()
        };
        let start = config.boundary_radius - config.body_radius + 0.001;
        let mut body = body_at(Vec2::new(start, 0.0), Vec2::new(1.0, 0.0));
        body.added_momentum = 5.0;
        let mut store = store_with([body], 10);

        step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        // base 1.05 + capped bonus 5.0
        let parent = &store.bodies()[0];
        assert_eq!(parent.added_momentum, 5.0);
        assert!((parent.speed() - 6.05).abs() < 1e-4);

        let child = &store.bodies()[1];
        assert!((child.speed() - 6.05 * 0.95).abs() < 1e-4);
        assert_eq!(child.added_momentum, config.base_momentum);
    }

    #[test]
    fn test_momentum_ratchets_across_bounces() {
        let config = SimConfig::default();
        let mut store = store_with([body_at(Vec2::new(0.0, -0.5), Vec2::ZERO)], 1);
        let mut rng = SimRng::new(77);
        let mut last = store.bodies()[0].added_momentum;

        for _ in 0..2000 {
            let report = step(&mut store, 1.0 / 60.0, &config, &mut rng, &mut || {});
            let now = store.bodies()[0].added_momentum;
            if report.collisions > 0 {
                assert!(now >= last);
            } else {
                assert_eq!(now, last);
            }
            assert!(now <= config.max_added_momentum);
            last = now;
        }
        assert!(last > config.base_momentum);
    }

    #[test]
    fn test_normal_from_clamped_toggle() {
        let config = SimConfig {
            normal_from_clamped: true,
            ..Default::default()
        };
        let start = config.boundary_radius - config.body_radius + 0.05;
        let mut store = store_with([body_at(Vec2::new(start, 0.0), Vec2::new(1.0, 0.0))], 10);

        step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        let body = &store.bodies()[0];
        assert!(body.vel.x < 0.0);
        assert!((body.speed() - 2.15).abs() < 1e-4);
    }

    #[test]
    fn test_zero_distance_collision_does_not_produce_nan() {
        // Body wider than the wall collides while sitting on the center
        let config = SimConfig {
            boundary_radius: 0.9,
            ..Default::default()
        };
        let mut store = store_with([Body::new(Vec2::ZERO, 1.0, 1.05)], 10);

        step(&mut store, 0.0, &config, &mut Midpoint, &mut || {});

        for body in store.iter() {
            assert!(body.pos.is_finite());
            assert!(body.vel.is_finite());
            assert!(body.color.is_finite());
        }
    }

    #[test]
    fn test_negative_and_nan_elapsed_are_ignored() {
        let config = SimConfig::default();
        let start = body_at(Vec2::new(0.1, 0.2), Vec2::new(0.1, 0.1));
        let mut store = store_with([start.clone()], 10);

        step(&mut store, -1.0, &config, &mut Midpoint, &mut || {});
        step(&mut store, f32::NAN, &config, &mut Midpoint, &mut || {});

        let body = &store.bodies()[0];
        assert_eq!(body.pos, start.pos);
        assert_eq!(body.vel, start.vel);
    }

    proptest! {
        #[test]
        fn prop_invariants_hold_over_many_frames(
            seed in any::<u64>(),
            frames in 1usize..200,
            elapsed in 0.0f32..0.1,
        ) {
            let config = SimConfig { max_bodies: 64, ..Default::default() };
            let mut rng = SimRng::new(seed);
            let mut store = BodyStore::seeded(&mut rng, &config).unwrap();
            let mut last_len = store.len();

            for _ in 0..frames {
                step(&mut store, elapsed, &config, &mut rng, &mut || {});

                prop_assert!(store.len() >= last_len);
                prop_assert!(store.len() <= config.max_bodies);
                last_len = store.len();

                for body in store.iter() {
                    prop_assert!(contained(body, &config));
                    prop_assert!(body.speed() <= config.max_speed + EPS);
                    prop_assert!(body.added_momentum <= config.max_added_momentum);
                    prop_assert!(body.color.min_element() >= 0.0);
                    prop_assert!(body.color.max_element() <= 1.0);
                }
            }
        }

        #[test]
        fn prop_collision_count_matches_notifications(seed in any::<u64>(), angle in 0.0f32..6.28) {
            let config = SimConfig::default();
            let r = config.boundary_radius - config.body_radius + 0.02;
            let mut store = store_with(
                [body_at(polar_to_cartesian(r, angle), polar_to_cartesian(0.3, angle))],
                10,
            );
            let mut counter = CollisionCounter::default();
            let report = step(&mut store, 0.016, &config, &mut SimRng::new(seed), &mut counter);
            prop_assert_eq!(report.collisions as u64, counter.count);
            prop_assert_eq!(report.collisions, 1);
            prop_assert_eq!(store.len(), 2);
        }
    }
}
