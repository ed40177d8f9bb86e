//! Platform abstraction layer
//!
//! Host-loop helpers that don't touch the browser directly:
//! - Frame timing
//! - Edge-triggered input

pub mod input;
pub mod time;

pub use input::EdgeTrigger;
pub use time::FrameClock;
