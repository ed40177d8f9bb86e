//! Deterministic simulation module
//!
//! All simulation logic lives here. This module must stay pure:
//! - Randomness only through an injected `RandomSource`
//! - Stable iteration order (store order)
//! - No rendering, audio or platform dependencies

pub mod body;
pub mod collision;
pub mod color;
pub mod config;
pub mod random;
pub mod step;

pub use body::{Body, BodyStore, seed};
pub use collision::{BoundaryContact, boundary_collision, clamp_speed, reflect_velocity};
pub use color::distance_color;
pub use config::SimConfig;
pub use random::{RandomSource, SimRng};
pub use step::{CollisionCounter, CollisionNotifier, StepReport, step};
