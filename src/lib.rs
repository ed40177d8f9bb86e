//! Bounce Bloom - bodies bouncing inside a circular wall
//!
//! Every wall impact speeds the body up and splits off a slower copy, so the
//! population blooms until it reaches the configured cap.
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bodies, boundary collisions, color ramp)
//! - `platform`: Frame clock and input debouncing for the host loop
//! - `headless`: Fixed-frame runner without window or audio
//! - `renderer`: WebGPU rendering pipeline
//! - `settings`: Host configuration (JSON / LocalStorage)

#[cfg(target_arch = "wasm32")]
pub mod audio;
pub mod error;
pub mod headless;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use settings::Settings;

use glam::Vec2;

/// Default simulation constants
pub mod consts {
    /// Slow-motion factor applied to every frame's elapsed time
    pub const SIMULATION_SPEED: f32 = 0.5;
    /// Downward acceleration applied to dy
    pub const GRAVITY: f32 = 1.4;

    /// Boundary wall radius (world units, centered at origin)
    pub const WALL_RADIUS: f32 = 0.9;
    /// Radius of seeded bodies
    pub const BODY_RADIUS: f32 = 0.05;
    /// Population cap
    pub const MAX_BODIES: usize = 1000;

    /// Per-axis inset of the seeding square
    pub const SPAWN_MARGIN: f32 = 0.1;
    /// Max absolute initial velocity component
    pub const SPAWN_SPEED: f32 = 0.25;
    /// Rejection-sampling retry ceiling for seeding
    pub const SEED_MAX_ATTEMPTS: u32 = 10_000;

    /// Weight of the center-pull in the post-bounce velocity blend
    pub const CENTER_BIAS: f32 = 0.5;
    /// Magnitude of per-axis jitter added on bounce
    pub const RANDOM_FACTOR: f32 = 0.4;

    /// Added momentum gained per wall collision
    pub const MOMENTUM_INCREMENT: f32 = 0.05;
    /// Cap on added momentum
    pub const MAX_ADDED_MOMENTUM: f32 = 5.0;
    /// Reset value of added momentum, also the base of total momentum
    pub const BASE_MOMENTUM: f32 = 1.05;
    /// Velocity scale applied to a freshly split duplicate
    pub const DUPLICATE_DAMPING: f32 = 0.95;

    /// Speed clamp
    pub const MAX_SPEED: f32 = 2.5;
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: Vec2) -> (f32, f32) {
    (pos.length(), pos.y.atan2(pos.x))
}
