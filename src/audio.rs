//! Collision ping through the Web Audio API
//!
//! The cue is synthesized per hit; there are no sound files.

use web_sys::{AudioContext, AudioContextState, OscillatorType};

use crate::sim::CollisionNotifier;

/// Minimum spacing between pings (seconds). Hits inside the window are
/// swallowed, the same way replaying a single sound source would.
const MIN_PING_INTERVAL: f64 = 0.03;

const PING_FREQ: f32 = 400.0;
const PING_PEAK: f32 = 0.3;
const PING_FADE: f64 = 0.08;
const PING_LENGTH: f64 = 0.1;

/// Plays the wall-hit ping; doubles as the step's collision notifier
pub struct AudioManager {
    ctx: Option<AudioContext>,
    /// Final gain, already master * effects
    volume: f32,
    muted: bool,
    last_ping: f64,
}

impl AudioManager {
    /// `volume` is the effective effects volume, see `Settings::effect_volume`
    pub fn new(volume: f32) -> Self {
        // Fails outside a secure context; the simulation runs silently then
        let ctx = AudioContext::new().ok();
        if ctx.is_none() {
            log::warn!("Failed to create AudioContext - audio disabled");
        }
        Self {
            ctx,
            volume: volume.clamp(0.0, 1.0),
            muted: false,
            last_ping: f64::NEG_INFINITY,
        }
    }

    /// Unlock playback; browsers only allow this after a user gesture
    pub fn resume(&self) {
        if let Some(ctx) = &self.ctx {
            if ctx.state() == AudioContextState::Suspended {
                let _ = ctx.resume();
            }
        }
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Short decaying sine. Rate-limited and silent on any Web Audio error.
    pub fn play_bounce(&mut self) {
        if self.muted || self.volume <= 0.0 {
            return;
        }
        let Some(ctx) = &self.ctx else { return };
        self.resume();

        let now = ctx.current_time();
        if now - self.last_ping < MIN_PING_INTERVAL {
            return;
        }
        if schedule_ping(ctx, self.volume * PING_PEAK, now).is_some() {
            self.last_ping = now;
        }
    }
}

impl CollisionNotifier for AudioManager {
    fn on_collision(&mut self) {
        self.play_bounce();
    }
}

/// Oscillator -> gain -> speakers, started now and stopped after `PING_LENGTH`
fn schedule_ping(ctx: &AudioContext, peak: f32, now: f64) -> Option<()> {
    let osc = ctx.create_oscillator().ok()?;
    let gain = ctx.create_gain().ok()?;

    osc.set_type(OscillatorType::Sine);
    osc.frequency().set_value(PING_FREQ);
    osc.connect_with_audio_node(&gain).ok()?;
    gain.connect_with_audio_node(&ctx.destination()).ok()?;

    let envelope = gain.gain();
    envelope.set_value_at_time(peak, now).ok()?;
    envelope
        .exponential_ramp_to_value_at_time(0.01, now + PING_FADE)
        .ok()?;

    osc.start().ok()?;
    osc.stop_with_when(now + PING_LENGTH).ok()
}
