//! Headless runner
//!
//! Drives the simulation with a fixed frame time and no window or audio.
//! Used by the native binary and handy for soak-testing a configuration.

use crate::error::SimError;
use crate::settings::Settings;
use crate::sim::{self, BodyStore, CollisionCounter, SimRng};

/// Frames between progress log lines
const LOG_EVERY: u32 = 60;

/// Outcome of a headless run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub seed: u64,
    pub frames: u32,
    pub population: usize,
    pub collisions: u64,
    pub dropped: u64,
    /// First frame at which the store was full, if it ever was
    pub saturated_at: Option<u32>,
}

/// Seed one body and step `settings.headless_frames` times
pub fn run(settings: &Settings, seed: u64) -> Result<RunSummary, SimError> {
    let config = &settings.sim;
    let mut rng = SimRng::new(seed);
    let mut store = BodyStore::seeded(&mut rng, config)?;
    let mut counter = CollisionCounter::default();
    let mut dropped = 0u64;
    let mut saturated_at = None;

    log::info!(
        "Headless run: seed {}, {} frames of {:.4}s, cap {}",
        seed,
        settings.headless_frames,
        settings.headless_frame_time,
        config.max_bodies
    );

    for frame in 1..=settings.headless_frames {
        let report = sim::step(
            &mut store,
            settings.headless_frame_time,
            config,
            &mut rng,
            &mut counter,
        );
        dropped += report.dropped as u64;

        if saturated_at.is_none() && store.is_full() {
            saturated_at = Some(frame);
            log::info!("Population cap {} reached at frame {}", store.max_bodies(), frame);
        }
        if frame % LOG_EVERY == 0 {
            log::info!(
                "frame {:>6}: {} bodies, {} collisions",
                frame,
                store.len(),
                counter.count
            );
        }
    }

    Ok(RunSummary {
        seed,
        frames: settings.headless_frames,
        population: store.len(),
        collisions: counter.count,
        dropped,
        saturated_at,
    })
}
