//! Collision detection and response against the circular boundary

use glam::Vec2;

use crate::{cartesian_to_polar, polar_to_cartesian};

/// A detected wall hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryContact {
    /// Position projected back onto the wall (center at `boundary - radius`)
    pub clamped: Vec2,
    /// Distance from center before clamping
    pub distance: f32,
    /// How far the body poked through the wall
    pub penetration: f32,
}

impl BoundaryContact {
    /// Outward normal used by the bounce: clamped position over the
    /// pre-clamp distance. Shorter than unit length whenever the body
    /// penetrated. Zero when the distance is zero.
    pub fn normal(&self) -> Vec2 {
        if self.distance > f32::EPSILON {
            self.clamped / self.distance
        } else {
            Vec2::ZERO
        }
    }

    /// Unit outward normal taken from the clamped position
    pub fn unit_normal(&self) -> Vec2 {
        self.clamped.normalize_or_zero()
    }
}

/// Check a body against the boundary wall.
///
/// Hits when `distance + radius > boundary_radius`.
pub fn boundary_collision(pos: Vec2, radius: f32, boundary_radius: f32) -> Option<BoundaryContact> {
    let (r, theta) = cartesian_to_polar(pos);
    let penetration = r + radius - boundary_radius;
    if penetration > 0.0 {
        Some(BoundaryContact {
            clamped: polar_to_cartesian(boundary_radius - radius, theta),
            distance: r,
            penetration,
        })
    } else {
        None
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Rescale velocity down to `max_speed` if it exceeds it
#[inline]
pub fn clamp_speed(velocity: Vec2, max_speed: f32) -> Vec2 {
    let speed = velocity.length();
    if speed > max_speed {
        velocity / speed * max_speed
    } else {
        velocity
    }
}
