//! Simulation tunables
//!
//! Defaults come from [`crate::consts`].

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// All knobs the simulation step and seeding read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Radius of the circular wall (centered at origin)
    pub boundary_radius: f32,
    /// Radius given to seeded bodies
    pub body_radius: f32,
    /// Population cap; duplicates are dropped once reached
    pub max_bodies: usize,
    /// Multiplier applied to elapsed time each frame
    pub simulation_speed: f32,
    /// Downward acceleration
    pub gravity: f32,

    // === Seeding ===
    /// Inset of the per-axis sampling square from the wall
    pub spawn_margin: f32,
    /// Max absolute initial velocity component
    pub spawn_speed: f32,
    /// Rejection-sampling retry ceiling
    pub seed_max_attempts: u32,

    // === Bounce response ===
    pub center_bias: f32,
    pub random_factor: f32,
    pub momentum_increment: f32,
    pub max_added_momentum: f32,
    pub base_momentum: f32,
    pub duplicate_damping: f32,
    pub max_speed: f32,

    /// Compute the bounce normal from the clamped position instead of
    /// dividing it by the pre-clamp distance
    pub normal_from_clamped: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            boundary_radius: WALL_RADIUS,
            body_radius: BODY_RADIUS,
            max_bodies: MAX_BODIES,
            simulation_speed: SIMULATION_SPEED,
            gravity: GRAVITY,

            spawn_margin: SPAWN_MARGIN,
            spawn_speed: SPAWN_SPEED,
            seed_max_attempts: SEED_MAX_ATTEMPTS,

            center_bias: CENTER_BIAS,
            random_factor: RANDOM_FACTOR,
            momentum_increment: MOMENTUM_INCREMENT,
            max_added_momentum: MAX_ADDED_MOMENTUM,
            base_momentum: BASE_MOMENTUM,
            duplicate_damping: DUPLICATE_DAMPING,
            max_speed: MAX_SPEED,

            normal_from_clamped: false,
        }
    }
}

impl SimConfig {
    /// Reject values the step cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("boundary_radius", self.boundary_radius)?;
        positive("body_radius", self.body_radius)?;
        if self.body_radius >= self.boundary_radius {
            return Err(ConfigError::invalid(
                "body_radius",
                format!(
                    "{} does not fit inside boundary radius {}",
                    self.body_radius, self.boundary_radius
                ),
            ));
        }
        if self.max_bodies == 0 {
            return Err(ConfigError::invalid("max_bodies", "must be at least 1"));
        }
        if self.seed_max_attempts == 0 {
            return Err(ConfigError::invalid("seed_max_attempts", "must be at least 1"));
        }

        non_negative("simulation_speed", self.simulation_speed)?;
        non_negative("gravity", self.gravity)?;
        non_negative("spawn_margin", self.spawn_margin)?;
        non_negative("spawn_speed", self.spawn_speed)?;
        non_negative("random_factor", self.random_factor)?;
        non_negative("momentum_increment", self.momentum_increment)?;
        non_negative("max_added_momentum", self.max_added_momentum)?;
        non_negative("base_momentum", self.base_momentum)?;
        non_negative("duplicate_damping", self.duplicate_damping)?;
        positive("max_speed", self.max_speed)?;

        if !(0.0..=1.0).contains(&self.center_bias) {
            return Err(ConfigError::invalid(
                "center_bias",
                format!("{} is outside [0, 1]", self.center_bias),
            ));
        }
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and > 0")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be finite and >= 0")))
    }
}
