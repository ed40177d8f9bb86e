//! Bodies and the store that owns them
//!
//! A body has no identity beyond its index; each evolves independently of
//! every other body.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::random::RandomSource;
use crate::error::SimError;

/// A circular body inside the boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    /// World-space position, origin at boundary center
    pub pos: Vec2,
    /// World units per unit time
    pub vel: Vec2,
    pub radius: f32,
    /// RGB in [0, 1], recomputed from distance every step
    pub color: Vec3,
    /// Speed bonus ratcheted up by each wall collision
    pub added_momentum: f32,
}

impl Body {
    /// A body at rest with the base momentum bonus
    pub fn new(pos: Vec2, radius: f32, base_momentum: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
            color: Vec3::new(1.0, 0.0, 0.0),
            added_momentum: base_momentum,
        }
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.vel = vel;
        self
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Slower copy split off on a wall hit, with the momentum bonus reset
    pub fn split(&self, config: &SimConfig) -> Self {
        Self {
            vel: self.vel * config.duplicate_damping,
            added_momentum: config.base_momentum,
            ..self.clone()
        }
    }
}

/// Randomly placed, randomly moving body fully inside the boundary.
///
/// Positions are drawn per axis from the boundary square inset by
/// `spawn_margin` and rejected until `|pos| + radius <= boundary_radius`.
pub fn seed<R: RandomSource + ?Sized>(rng: &mut R, config: &SimConfig) -> Result<Body, SimError> {
    let extent = config.boundary_radius - config.spawn_margin;
    let inner = config.boundary_radius - config.body_radius;
    if !(extent.is_finite() && inner.is_finite()) || extent < 0.0 || inner < 0.0 {
        return Err(SimError::NoRoom {
            boundary_radius: config.boundary_radius,
            body_radius: config.body_radius,
            margin: config.spawn_margin,
        });
    }

    let mut pos = None;
    for attempt in 0..config.seed_max_attempts {
        let candidate = Vec2::new(rng.uniform(-extent, extent), rng.uniform(-extent, extent));
        if candidate.length() <= inner {
            if attempt > 0 {
                log::trace!("Seed position accepted after {} rejections", attempt);
            }
            pos = Some(candidate);
            break;
        }
    }
    let Some(pos) = pos else {
        return Err(SimError::SeedExhausted {
            attempts: config.seed_max_attempts,
        });
    };

    let vel = Vec2::new(
        rng.uniform(-config.spawn_speed, config.spawn_speed),
        rng.uniform(-config.spawn_speed, config.spawn_speed),
    );
    Ok(Body::new(pos, config.body_radius, config.base_momentum).with_velocity(vel))
}

/// Ordered, growable population with a hard cap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyStore {
    bodies: Vec<Body>,
    max_bodies: usize,
}

impl BodyStore {
    pub fn new(max_bodies: usize) -> Self {
        Self {
            bodies: Vec::new(),
            max_bodies,
        }
    }

    /// Store holding one seeded body
    pub fn seeded<R: RandomSource + ?Sized>(
        rng: &mut R,
        config: &SimConfig,
    ) -> Result<Self, SimError> {
        let mut store = Self::new(config.max_bodies);
        store.append(seed(rng, config)?);
        Ok(store)
    }

    /// Add a body unless the cap is reached. Returns whether it was added.
    pub fn append(&mut self, body: Body) -> bool {
        if self.is_full() {
            return false;
        }
        self.bodies.push(body);
        true
    }

    /// Append in order until the cap; returns how many were dropped
    pub fn extend<I: IntoIterator<Item = Body>>(&mut self, bodies: I) -> usize {
        let mut dropped = 0;
        for body in bodies {
            if !self.append(body) {
                dropped += 1;
            }
        }
        dropped
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.bodies.len() >= self.max_bodies
    }

    pub fn max_bodies(&self) -> usize {
        self.max_bodies
    }

    /// Remaining room before the cap
    pub fn capacity_left(&self) -> usize {
        self.max_bodies.saturating_sub(self.bodies.len())
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub(crate) fn bodies_mut(&mut self) -> &mut [Body] {
        &mut self.bodies
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Body> {
        self.bodies.iter()
    }
}

impl<'a> IntoIterator for &'a BodyStore {
    type Item = &'a Body;
    type IntoIter = std::slice::Iter<'a, Body>;

    fn into_iter(self) -> Self::IntoIter {
        self.bodies.iter()
    }
}
